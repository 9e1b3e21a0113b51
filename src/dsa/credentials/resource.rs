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
use tf_provider::{
    schema::Schema,
    value::{Value, ValueEmpty},
    AttributePath, Diagnostics, Resource,
};
use tracing::info;

use crate::client::require_id;
use crate::common::{log_and_add_error, parse_import_id, ProviderHandle};
use crate::dsa::{dsa_api, DsaService};
use crate::plan;
use crate::utils::{string_value, ExtractDiagnostics};

use super::state::CredentialsState;

#[derive(Debug, Default, Clone)]
pub struct CredentialsResource<S> {
    provider: ProviderHandle,
    service: PhantomData<S>,
}

impl<S: DsaService> CredentialsResource<S> {
    pub fn new(provider: ProviderHandle) -> Self {
        Self {
            provider,
            service: PhantomData,
        }
    }
}

#[async_trait]
impl<S: DsaService> Resource for CredentialsResource<S> {
    type State<'a> = CredentialsState<'a>;
    type PrivateState<'a> = ValueEmpty;
    type ProviderMetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(CredentialsState::schema(S::DISPLAY_NAME))
    }

    async fn validate<'a>(&self, diags: &mut Diagnostics, config: Self::State<'a>) -> Option<()> {
        config.validate(diags);

        if diags.errors.is_empty() {
            Some(())
        } else {
            None
        }
    }

    async fn read<'a>(
        &self,
        diags: &mut Diagnostics,
        state: Self::State<'a>,
        private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let api = dsa_api::<S>(&self.provider, diags).await?;
        let (project_id, instance_id, credentials_id) =
            state.ids().or_diagnose(diags, "Error reading credentials")?;

        let response = api
            .get_credentials(&project_id, &instance_id, &credentials_id)
            .await
            .or_diagnose(diags, "Error reading credentials")?;

        let mut state = state;
        state
            .map_response(response)
            .or_diagnose(diags, "Error mapping fields")?;
        info!(service = S::NAME, %project_id, %instance_id, %credentials_id, "credentials read");

        Some((state, private_state))
    }

    async fn plan_create<'a>(
        &self,
        _diags: &mut Diagnostics,
        proposed_state: Self::State<'a>,
        _config_state: Self::State<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let mut state = proposed_state;
        state.id = Value::Unknown;
        state.credentials_id = Value::Unknown;
        state.host = Value::Unknown;
        state.hosts = Value::Unknown;
        state.password = Value::Unknown;
        state.port = Value::Unknown;
        state.uri = Value::Unknown;
        state.username = Value::Unknown;

        Some((state, Default::default()))
    }

    async fn plan_update<'a>(
        &self,
        _diags: &mut Diagnostics,
        prior_state: Self::State<'a>,
        proposed_state: Self::State<'a>,
        _config_state: Self::State<'a>,
        prior_private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>, Vec<AttributePath>)> {
        let mut state = proposed_state;
        plan::use_state_for_unknown(&mut state.id, &prior_state.id);
        plan::use_state_for_unknown(&mut state.credentials_id, &prior_state.credentials_id);

        let mut replace = Vec::new();
        plan::requires_replace(&mut replace, "project_id", &prior_state.project_id, &state.project_id);
        plan::requires_replace(&mut replace, "instance_id", &prior_state.instance_id, &state.instance_id);

        Some((state, prior_private_state, replace))
    }

    async fn plan_destroy<'a>(
        &self,
        _diags: &mut Diagnostics,
        _prior_state: Self::State<'a>,
        prior_private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<Self::PrivateState<'a>> {
        Some(prior_private_state)
    }

    async fn create<'a>(
        &self,
        diags: &mut Diagnostics,
        planned_state: Self::State<'a>,
        _config_state: Self::State<'a>,
        planned_private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        const SUMMARY: &str = "Error creating credentials";
        let api = dsa_api::<S>(&self.provider, diags).await?;
        let (project_id, instance_id) = planned_state.instance_ids().or_diagnose(diags, SUMMARY)?;

        let response = api
            .create_credentials(&project_id, &instance_id)
            .await
            .or_diagnose(diags, SUMMARY)?;
        let credentials_id = require_id(response.id, "credentials").or_diagnose(diags, SUMMARY)?;
        info!(service = S::NAME, %project_id, %instance_id, %credentials_id, "credentials created, waiting");

        let response = api
            .wait_credentials_created(&project_id, &instance_id, &credentials_id)
            .await
            .map_err(|err| format!("Credentials creation waiting: {err}"))
            .or_diagnose(diags, SUMMARY)?;

        let mut state = planned_state;
        state.credentials_id = credentials_id.clone().into();
        state
            .map_response(response)
            .or_diagnose(diags, "Error mapping fields")?;
        info!(service = S::NAME, %project_id, %instance_id, %credentials_id, "credentials ready");

        Some((state, planned_private_state))
    }

    async fn update<'a>(
        &self,
        diags: &mut Diagnostics,
        _prior_state: Self::State<'a>,
        _planned_state: Self::State<'a>,
        _config_state: Self::State<'a>,
        _planned_private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        // Every configurable attribute forces a replacement
        log_and_add_error(
            diags,
            "Error updating credentials",
            "Credentials can't be updated",
        );
        None
    }

    async fn destroy<'a>(
        &self,
        diags: &mut Diagnostics,
        prior_state: Self::State<'a>,
        _planned_private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<()> {
        const SUMMARY: &str = "Error deleting credentials";
        let api = dsa_api::<S>(&self.provider, diags).await?;
        let (project_id, instance_id, credentials_id) =
            prior_state.ids().or_diagnose(diags, SUMMARY)?;

        api.delete_credentials(&project_id, &instance_id, &credentials_id)
            .await
            .or_diagnose(diags, SUMMARY)?;
        api.wait_credentials_deleted(&project_id, &instance_id, &credentials_id)
            .await
            .map_err(|err| format!("Credentials deletion waiting: {err}"))
            .or_diagnose(diags, SUMMARY)?;
        info!(service = S::NAME, %project_id, %instance_id, %credentials_id, "credentials deleted");

        Some(())
    }

    async fn import<'a>(
        &self,
        diags: &mut Diagnostics,
        id: String,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let mut parts =
            parse_import_id(diags, &id, &["project_id", "instance_id", "credentials_id"])?
                .into_iter();
        let state = CredentialsState {
            project_id: string_value(parts.next()),
            instance_id: string_value(parts.next()),
            credentials_id: string_value(parts.next()),
            ..Default::default()
        };
        info!(service = S::NAME, %id, "credentials state imported");

        Some((state, Default::default()))
    }
}
