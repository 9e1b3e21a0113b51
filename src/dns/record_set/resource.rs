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
use tf_provider::{
    schema::Schema,
    value::{Value, ValueEmpty},
    AttributePath, Diagnostics, Resource,
};
use tracing::info;

use crate::client::{require_id, wait::Operation};
use crate::common::{parse_import_id, ProviderHandle};
use crate::dns::dns_api;
use crate::plan;
use crate::utils::{string_value, ExtractDiagnostics, WithSchema};

use super::state::RecordSetState;

#[derive(Debug, Default, Clone)]
pub struct RecordSetResource {
    provider: ProviderHandle,
}

impl RecordSetResource {
    pub fn new(provider: ProviderHandle) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl Resource for RecordSetResource {
    type State<'a> = RecordSetState<'a>;
    type PrivateState<'a> = ValueEmpty;
    type ProviderMetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(RecordSetState::schema())
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
        let api = dns_api(&self.provider, diags).await?;
        let (project_id, zone_id, record_set_id) =
            state.ids().or_diagnose(diags, "Error reading record set")?;

        let response = api
            .get_record_set(&project_id, &zone_id, &record_set_id)
            .await
            .or_diagnose(diags, "Error reading record set")?;

        let mut state = state;
        state
            .map_response(response)
            .or_diagnose(diags, "Error mapping fields")?;
        info!(%project_id, %zone_id, %record_set_id, "DNS record set read");

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
        state.record_set_id = Value::Unknown;
        state.error = Value::Unknown;
        state.state = Value::Unknown;
        plan::unknown_if_null(&mut state.ttl);
        plan::unknown_if_null(&mut state.record_type);
        plan::unknown_if_null(&mut state.comment);
        plan::default_if_null(&mut state.active, true);

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
        plan::use_state_for_unknown(&mut state.record_set_id, &prior_state.record_set_id);
        plan::use_state_for_unknown(&mut state.record_type, &prior_state.record_type);
        plan::default_if_null(&mut state.active, true);

        let mut replace = Vec::new();
        plan::requires_replace(&mut replace, "project_id", &prior_state.project_id, &state.project_id);
        plan::requires_replace(&mut replace, "zone_id", &prior_state.zone_id, &state.zone_id);
        plan::requires_replace(&mut replace, "type", &prior_state.record_type, &state.record_type);

        if state != prior_state {
            state.error = Value::Unknown;
            state.state = Value::Unknown;
        }

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
        const SUMMARY: &str = "Error creating record set";
        let api = dns_api(&self.provider, diags).await?;
        let project_id = planned_state.project_id.as_str().to_owned();
        let zone_id = planned_state.zone_id.as_str().to_owned();

        let response = api
            .create_record_set(&project_id, &zone_id, &planned_state.to_create_payload())
            .await
            .or_diagnose(diags, SUMMARY)?;
        let record_set_id = require_id(response.rrset.and_then(|rrset| rrset.id), "record set")
            .or_diagnose(diags, SUMMARY)?;
        info!(%project_id, %zone_id, %record_set_id, "DNS record set created, waiting");

        let response = api
            .wait_record_set(&project_id, &zone_id, &record_set_id, Operation::Create)
            .await
            .map_err(|err| format!("Record set creation waiting: {err}"))
            .or_diagnose(diags, SUMMARY)?;

        let mut state = planned_state;
        state.record_set_id = record_set_id.into();
        state
            .map_response(response)
            .or_diagnose(diags, "Error mapping fields")?;
        info!(%project_id, %zone_id, "DNS record set ready");

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
        const SUMMARY: &str = "Error updating record set";
        let api = dns_api(&self.provider, diags).await?;
        let (project_id, zone_id, record_set_id) = prior_state.ids().or_diagnose(diags, SUMMARY)?;

        api.partial_update_record_set(
            &project_id,
            &zone_id,
            &record_set_id,
            &planned_state.to_update_payload(),
        )
        .await
        .or_diagnose(diags, SUMMARY)?;
        api.wait_record_set(&project_id, &zone_id, &record_set_id, Operation::Update)
            .await
            .map_err(|err| format!("Record set update waiting: {err}"))
            .or_diagnose(diags, SUMMARY)?;

        let response = api
            .get_record_set(&project_id, &zone_id, &record_set_id)
            .await
            .or_diagnose(diags, "Error reading updated data")?;

        let mut state = planned_state;
        state.record_set_id = record_set_id.clone().into();
        state
            .map_response(response)
            .or_diagnose(diags, "Error mapping fields in update")?;
        info!(%project_id, %zone_id, %record_set_id, "DNS record set updated");

        Some((state, planned_private_state))
    }

    async fn destroy<'a>(
        &self,
        diags: &mut Diagnostics,
        prior_state: Self::State<'a>,
        _planned_private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<()> {
        const SUMMARY: &str = "Error deleting record set";
        let api = dns_api(&self.provider, diags).await?;
        let (project_id, zone_id, record_set_id) = prior_state.ids().or_diagnose(diags, SUMMARY)?;

        api.delete_record_set(&project_id, &zone_id, &record_set_id)
            .await
            .or_diagnose(diags, SUMMARY)?;
        api.wait_record_set(&project_id, &zone_id, &record_set_id, Operation::Delete)
            .await
            .map_err(|err| format!("Record set deletion waiting: {err}"))
            .or_diagnose(diags, SUMMARY)?;
        info!(%project_id, %zone_id, %record_set_id, "DNS record set deleted");

        Some(())
    }

    async fn import<'a>(
        &self,
        diags: &mut Diagnostics,
        id: String,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let mut parts = parse_import_id(diags, &id, &["project_id", "zone_id", "record_set_id"])?
            .into_iter();
        let state = RecordSetState {
            project_id: string_value(parts.next()),
            zone_id: string_value(parts.next()),
            record_set_id: string_value(parts.next()),
            ..Default::default()
        };
        info!(%id, "DNS record set state imported");

        Some((state, Default::default()))
    }
}
