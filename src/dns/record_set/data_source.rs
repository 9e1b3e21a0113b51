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

use async_trait::async_trait;
use tf_provider::{schema::Schema, value::ValueEmpty, DataSource, Diagnostics};
use tracing::info;

use crate::common::ProviderHandle;
use crate::dns::dns_api;
use crate::utils::ExtractDiagnostics;

use super::state::RecordSetState;

#[derive(Debug, Default, Clone)]
pub struct RecordSetDataSource {
    provider: ProviderHandle,
}

impl RecordSetDataSource {
    pub fn new(provider: ProviderHandle) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl DataSource for RecordSetDataSource {
    type State<'a> = RecordSetState<'a>;
    type ProviderMetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(RecordSetState::data_source_schema())
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
        let api = dns_api(&self.provider, diags).await?;
        let (project_id, zone_id, record_set_id) =
            config.ids().or_diagnose(diags, "Error reading record set")?;

        let response = api
            .get_record_set(&project_id, &zone_id, &record_set_id)
            .await
            .or_diagnose(diags, "Error reading record set")?;

        let mut state = config;
        state
            .map_response(response)
            .or_diagnose(diags, "Error mapping fields")?;
        info!(%project_id, %zone_id, %record_set_id, "DNS record set read");

        Some(state)
    }
}
