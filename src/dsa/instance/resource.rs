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

use crate::client::{require_id, wait::Operation};
use crate::common::{parse_import_id, ProviderHandle};
use crate::dsa::{dsa_api, DsaService};
use crate::plan;
use crate::utils::{string_value, ExtractDiagnostics, WithSchema};

use super::state::InstanceState;

#[derive(Debug, Default, Clone)]
pub struct InstanceResource<S> {
    provider: ProviderHandle,
    service: PhantomData<S>,
}

impl<S: DsaService> InstanceResource<S> {
    pub fn new(provider: ProviderHandle) -> Self {
        Self {
            provider,
            service: PhantomData,
        }
    }
}

#[async_trait]
impl<S: DsaService> Resource for InstanceResource<S> {
    type State<'a> = InstanceState<'a, S>;
    type PrivateState<'a> = ValueEmpty;
    type ProviderMetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(InstanceState::<S>::schema())
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
        let (project_id, instance_id) = state.ids().or_diagnose(diags, "Error reading instance")?;

        let response = api
            .get_instance(&project_id, &instance_id)
            .await
            .or_diagnose(diags, "Error reading instance")?;

        let mut state = state;
        state
            .map_response(response)
            .or_diagnose(diags, "Error mapping fields")?;
        info!(service = S::NAME, %project_id, %instance_id, "instance read");

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
        state.instance_id = Value::Unknown;
        state.cf_guid = Value::Unknown;
        state.cf_space_guid = Value::Unknown;
        state.dashboard_url = Value::Unknown;
        state.image_url = Value::Unknown;
        state.organization_guid = Value::Unknown;
        plan::unknown_if_null(&mut state.parameters);
        if let Value::Value(parameters) = &mut state.parameters {
            S::plan_parameters(parameters);
        }

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
        plan::use_state_for_unknown(&mut state.instance_id, &prior_state.instance_id);

        let mut replace = Vec::new();
        plan::requires_replace(&mut replace, "project_id", &prior_state.project_id, &state.project_id);
        plan::requires_replace(&mut replace, "name", &prior_state.name, &state.name);

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
        const SUMMARY: &str = "Error creating instance";
        let api = dsa_api::<S>(&self.provider, diags).await?;
        let project_id = planned_state.project_id.as_str().to_owned();

        let response = api
            .create_instance(&project_id, &planned_state.to_create_payload())
            .await
            .or_diagnose(diags, SUMMARY)?;
        let instance_id = require_id(response.instance_id, "instance").or_diagnose(diags, SUMMARY)?;
        info!(service = S::NAME, %project_id, %instance_id, "instance created, waiting");

        let response = api
            .wait_instance(&project_id, &instance_id, Operation::Create)
            .await
            .map_err(|err| format!("Instance creation waiting: {err}"))
            .or_diagnose(diags, SUMMARY)?;

        let mut state = planned_state;
        state.instance_id = instance_id.clone().into();
        state
            .map_response(response)
            .or_diagnose(diags, "Error mapping fields")?;
        info!(service = S::NAME, %project_id, %instance_id, "instance ready");

        Some((state, planned_private_state))
    }

    async fn update<'a>(
        &self,
        diags: &mut Diagnostics,
        prior_state: Self::State<'a>,
        planned_state: Self::State<'a>,
        _config_state: Self::State<'a>,
        planned_private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        const SUMMARY: &str = "Error updating instance";
        let api = dsa_api::<S>(&self.provider, diags).await?;
        let (project_id, instance_id) = prior_state.ids().or_diagnose(diags, SUMMARY)?;

        api.partial_update_instance(&project_id, &instance_id, &planned_state.to_update_payload())
            .await
            .or_diagnose(diags, SUMMARY)?;
        let response = api
            .wait_instance(&project_id, &instance_id, Operation::Update)
            .await
            .map_err(|err| format!("Instance update waiting: {err}"))
            .or_diagnose(diags, SUMMARY)?;

        let mut state = planned_state;
        state.instance_id = instance_id.clone().into();
        state
            .map_response(response)
            .or_diagnose(diags, "Error mapping fields in update")?;
        info!(service = S::NAME, %project_id, %instance_id, "instance updated");

        Some((state, planned_private_state))
    }

    async fn destroy<'a>(
        &self,
        diags: &mut Diagnostics,
        prior_state: Self::State<'a>,
        _planned_private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<()> {
        const SUMMARY: &str = "Error deleting instance";
        let api = dsa_api::<S>(&self.provider, diags).await?;
        let (project_id, instance_id) = prior_state.ids().or_diagnose(diags, SUMMARY)?;

        api.delete_instance(&project_id, &instance_id)
            .await
            .or_diagnose(diags, SUMMARY)?;
        api.wait_instance(&project_id, &instance_id, Operation::Delete)
            .await
            .map_err(|err| format!("Instance deletion waiting: {err}"))
            .or_diagnose(diags, SUMMARY)?;
        info!(service = S::NAME, %project_id, %instance_id, "instance deleted");

        Some(())
    }

    async fn import<'a>(
        &self,
        diags: &mut Diagnostics,
        id: String,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let mut parts = parse_import_id(diags, &id, &["project_id", "instance_id"])?.into_iter();
        let state = InstanceState {
            project_id: string_value(parts.next()),
            instance_id: string_value(parts.next()),
            ..Default::default()
        };
        info!(service = S::NAME, %id, "instance state imported");

        Some((state, Default::default()))
    }
}
