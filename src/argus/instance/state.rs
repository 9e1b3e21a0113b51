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

use std::{borrow::Cow, collections::BTreeMap};

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tf_provider::{
    map,
    schema::{AttributeConstraint::*, Block, Description, Schema},
    value::{Value, ValueBool, ValueMap, ValueNumber, ValueString},
    AttributePath, Diagnostics,
};

use crate::argus::api::{InstancePayload, InstanceResponse};
use crate::attributes::{boolean, computed, number, sensitive, string, string_map};
use crate::common::build_id;
use crate::utils::{known_str, string_value, WithSchema};
use crate::validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct InstanceState<'a> {
    #[serde(borrow = "'a")]
    pub id: ValueString<'a>,
    pub project_id: ValueString<'a>,
    pub instance_id: ValueString<'a>,
    pub name: ValueString<'a>,
    pub plan_name: ValueString<'a>,
    pub plan_id: ValueString<'a>,
    pub parameters: ValueMap<'a, ValueString<'a>>,
    pub dashboard_url: ValueString<'a>,
    pub is_updatable: ValueBool,
    pub grafana_url: ValueString<'a>,
    pub grafana_public_read_access: ValueBool,
    pub grafana_initial_admin_user: ValueString<'a>,
    pub grafana_initial_admin_password: ValueString<'a>,
    pub metrics_retention_days: ValueNumber,
    pub metrics_retention_days_5m_downsampling: ValueNumber,
    pub metrics_retention_days_1h_downsampling: ValueNumber,
    pub metrics_url: ValueString<'a>,
    pub metrics_push_url: ValueString<'a>,
    pub targets_url: ValueString<'a>,
    pub alerting_url: ValueString<'a>,
    pub logs_url: ValueString<'a>,
    pub logs_push_url: ValueString<'a>,
    pub jaeger_traces_url: ValueString<'a>,
    pub jaeger_ui_url: ValueString<'a>,
    pub otlp_traces_url: ValueString<'a>,
    pub zipkin_spans_url: ValueString<'a>,
}

impl WithSchema for InstanceState<'_> {
    fn schema() -> Schema {
        Schema {
            version: 1,
            block: Block {
                version: 1,
                attributes: map! {
                    "id" => string(Computed, "Terraform's internal resource ID. It is structured as \"`project_id`,`instance_id`\"."),
                    "project_id" => string(Required, "STACKIT project ID to which the instance is associated."),
                    "instance_id" => string(Computed, "The Argus instance ID."),
                    "name" => string(Required, "The name of the Argus instance."),
                    "plan_name" => string(Required, "Specifies the Argus plan. E.g. `Monitoring-Medium-EU01`."),
                    "plan_id" => string(Computed, "The Argus plan ID."),
                    "parameters" => string_map(OptionalComputed, "Additional parameters."),
                    "dashboard_url" => string(Computed, "Specifies Argus instance dashboard URL."),
                    "is_updatable" => boolean(Computed, "Specifies if the instance can be updated."),
                    "grafana_url" => string(Computed, "Specifies Grafana URL."),
                    "grafana_public_read_access" => boolean(Computed, "If true, anyone can access Grafana dashboards without logging in."),
                    "grafana_initial_admin_user" => string(Computed, "Specifies an initial Grafana admin username."),
                    "grafana_initial_admin_password" => sensitive(string(Computed, "Specifies an initial Grafana admin password.")),
                    "metrics_retention_days" => number(Computed, "Specifies for how many days the raw metrics are kept."),
                    "metrics_retention_days_5m_downsampling" => number(Computed, "Specifies for how many days the 5m downsampled metrics are kept."),
                    "metrics_retention_days_1h_downsampling" => number(Computed, "Specifies for how many days the 1h downsampled metrics are kept."),
                    "metrics_url" => string(Computed, "Specifies metrics URL."),
                    "metrics_push_url" => string(Computed, "Specifies URL for pushing metrics."),
                    "targets_url" => string(Computed, "Specifies Targets URL."),
                    "alerting_url" => string(Computed, "Specifies Alerting URL."),
                    "logs_url" => string(Computed, "Specifies Logs URL."),
                    "logs_push_url" => string(Computed, "Specifies URL for pushing logs."),
                    "jaeger_traces_url" => string(Computed, "Specifies Jaeger traces URL."),
                    "jaeger_ui_url" => string(Computed, "Specifies Jaeger UI URL."),
                    "otlp_traces_url" => string(Computed, "Specifies OTLP traces URL."),
                    "zipkin_spans_url" => string(Computed, "Specifies Zipkin spans URL."),
                },
                description: Description::plain("Argus instance resource schema."),
                ..Default::default()
            },
        }
    }
}

impl<'a> InstanceState<'a> {
    /// Same attributes as the resource, looked up by identifiers
    pub fn data_source_schema() -> Schema {
        let mut schema = Self::schema();
        let mut attributes = computed(schema.block.attributes);
        for name in ["project_id", "instance_id"] {
            if let Some(attribute) = attributes.get_mut(name) {
                attribute.constraint = Required;
            }
        }
        schema.block.attributes = attributes;
        schema.block.description = Description::plain("Argus instance data source schema.");
        schema
    }

    pub fn validate(&self, diags: &mut Diagnostics) {
        validate::uuid(diags, AttributePath::new("project_id"), &self.project_id);
        validate::no_separator(diags, AttributePath::new("project_id"), &self.project_id);
        validate::length_between(diags, AttributePath::new("name"), &self.name, 1, 200);
        validate::length_between(diags, AttributePath::new("plan_name"), &self.plan_name, 1, 200);
    }

    pub fn validate_lookup(&self, diags: &mut Diagnostics) {
        for (name, value) in [("project_id", &self.project_id), ("instance_id", &self.instance_id)] {
            validate::uuid(diags, AttributePath::new(name), value);
            validate::no_separator(diags, AttributePath::new(name), value);
        }
    }

    /// Identifiers of the instance
    pub fn ids(&self) -> Result<(String, String)> {
        match (known_str(&self.project_id), known_str(&self.instance_id)) {
            (Some(project_id), Some(instance_id)) => {
                Ok((project_id.to_owned(), instance_id.to_owned()))
            }
            _ => Err(anyhow!("instance identifiers are not known")),
        }
    }

    /// Plan outputs that are only known once the instance is up to date
    pub fn unknown_outputs(&mut self) {
        for value in [
            &mut self.dashboard_url,
            &mut self.grafana_url,
            &mut self.grafana_initial_admin_user,
            &mut self.grafana_initial_admin_password,
            &mut self.metrics_url,
            &mut self.metrics_push_url,
            &mut self.targets_url,
            &mut self.alerting_url,
            &mut self.logs_url,
            &mut self.logs_push_url,
            &mut self.jaeger_traces_url,
            &mut self.jaeger_ui_url,
            &mut self.otlp_traces_url,
            &mut self.zipkin_spans_url,
        ] {
            *value = Value::Unknown;
        }
        for value in [
            &mut self.metrics_retention_days,
            &mut self.metrics_retention_days_5m_downsampling,
            &mut self.metrics_retention_days_1h_downsampling,
        ] {
            *value = Value::Unknown;
        }
        self.is_updatable = Value::Unknown;
        self.grafana_public_read_access = Value::Unknown;
    }

    /// Payload for both creation and update, `plan_id` being resolved from `plan_name`
    pub fn to_payload(&self, plan_id: &str) -> InstancePayload {
        InstancePayload {
            name: known_str(&self.name).map(str::to_owned),
            plan_id: Some(plan_id.to_owned()),
            parameter: self
                .parameters
                .iter()
                .flatten()
                .filter_map(|(key, value)| {
                    Some((key.to_string(), value.as_deref_option()?.to_owned()))
                })
                .collect(),
        }
    }

    pub fn map_response(&mut self, response: InstanceResponse) -> Result<()> {
        let instance_id = match (known_str(&self.instance_id), &response.id) {
            (Some(id), _) if !id.is_empty() => id.to_owned(),
            (_, Some(id)) => id.clone(),
            _ => return Err(anyhow!("instance id not present")),
        };

        self.id = build_id(&[self.project_id.as_str(), &instance_id]).into();
        self.instance_id = instance_id.into();
        // Plan names are matched ignoring case: keep the configured spelling
        let same_plan = match (known_str(&self.plan_name), response.plan_name.as_deref()) {
            (Some(configured), Some(remote)) => configured.eq_ignore_ascii_case(remote),
            _ => false,
        };
        if !same_plan {
            self.plan_name = string_value(response.plan_name);
        }
        self.plan_id = string_value(response.plan_id);
        self.name = string_value(response.name);
        self.parameters = Value::from(response.parameters.map(|parameters| {
            parameters
                .into_iter()
                .map(|(key, value)| (Cow::from(key), Value::Value(Cow::from(value))))
                .collect::<BTreeMap<_, _>>()
        }));
        self.is_updatable = response.is_updatable.into();
        self.dashboard_url = string_value(response.dashboard_url);

        if let Some(instance) = response.instance {
            self.grafana_url = string_value(instance.grafana_url);
            self.grafana_public_read_access = instance.grafana_public_read_access.into();
            self.grafana_initial_admin_password = string_value(instance.grafana_admin_password);
            self.grafana_initial_admin_user = string_value(instance.grafana_admin_user);
            self.metrics_retention_days = instance.metrics_retention_time_raw.into();
            self.metrics_retention_days_5m_downsampling = instance.metrics_retention_time_5m.into();
            self.metrics_retention_days_1h_downsampling = instance.metrics_retention_time_1h.into();
            self.metrics_url = string_value(instance.metrics_url);
            self.metrics_push_url = string_value(instance.push_metrics_url);
            self.targets_url = string_value(instance.targets_url);
            self.alerting_url = string_value(instance.alerting_url);
            self.logs_url = string_value(instance.logs_url);
            self.logs_push_url = string_value(instance.logs_push_url);
            self.jaeger_traces_url = string_value(instance.jaeger_traces_url);
            self.jaeger_ui_url = string_value(instance.jaeger_ui_url);
            self.otlp_traces_url = string_value(instance.otlp_traces_url);
            self.zipkin_spans_url = string_value(instance.zipkin_spans_url);
        }
        Ok(())
    }
}
