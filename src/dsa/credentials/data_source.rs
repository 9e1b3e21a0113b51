// This file is part of the terraform-provider-stackit project
//
// Copyright (C) ANEO, 2024-2024. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License")
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::marker::PhantomData;

use async_trait::async_trait;
use tf_provider::{schema::Schema, value::ValueEmpty, DataSource, Diagnostics};
use tracing::info;

use crate::common::ProviderHandle;
use crate::dsa::{dsa_api, DsaService};
use crate::utils::ExtractDiagnostics;

use super::state::CredentialsState;

#[derive(Debug, Default, Clone)]
pub struct CredentialsDataSource<S> {
    provider: ProviderHandle,
    service: PhantomData<S>,
}

impl<S: DsaService> CredentialsDataSource<S> {
    pub fn new(provider: ProviderHandle) -> Self {
        Self {
            provider,
            service: PhantomData,
        }
    }
}

#[async_trait]
impl<S: DsaService> DataSource for CredentialsDataSource<S> {
    type State<'a> = CredentialsState<'a>;
    type ProviderMetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(CredentialsState::data_source_schema(S::DISPLAY_NAME))
    }

    async fn validate<'a>(&self, diags: &mut Diagnostics, config: Self::State<'a>) -> Option<()> {
        config.validate_lookup(diags);

        if diags.errors.is_empty() {
            Some(())
        } else {
            None
        }
    }

    async fn read<'a>(
        &self,
        diags: &mut Diagnostics,
        config: Self::State<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<Self::State<'a>> {
        let api = dsa_api::<S>(&self.provider, diags).await?;
        let (project_id, instance_id, credentials_id) =
            config.ids().or_diagnose(diags, "Unable to read credentials")?;

        let response = api
            .get_credentials(&project_id, &instance_id, &credentials_id)
            .await
            .or_diagnose(diags, "Unable to read credentials")?;

        let mut state = config;
        state
            .map_response(response)
            .or_diagnose(diags, "Error mapping fields")?;
        info!(service = S::NAME, %project_id, %instance_id, %credentials_id, "credentials read");

        Some(state)
    }
}
