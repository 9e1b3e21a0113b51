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

//! STACKIT PostgreSQL (data service API flavour)

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tf_provider::{
    map,
    schema::{Attribute, AttributeConstraint::*},
    value::{ValueBool, ValueList, ValueNumber, ValueString},
    AttributePath, Diagnostics,
};

use crate::attributes::{boolean, number, string, string_list};
use crate::common::ProviderData;
use crate::dsa::{
    bool_param, insert_bool, insert_number, insert_string, insert_strings, number_param,
    string_param, strings_param, DsaService, JsonParameters,
};
use crate::{plan, validate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PostgreSql;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PostgreSqlParameters {
    pub enable_monitoring: ValueBool,
    pub metrics_frequency: ValueNumber,
    pub metrics_prefix: ValueString<'static>,
    pub monitoring_instance_id: ValueString<'static>,
    pub plugins: ValueList<ValueString<'static>>,
    pub sgw_acl: ValueString<'static>,
}

impl DsaService for PostgreSql {
    const NAME: &'static str = "postgresql";
    const DISPLAY_NAME: &'static str = "PostgreSQL";

    type Parameters = PostgreSqlParameters;

    fn endpoint(data: &ProviderData) -> &str {
        &data.postgresql_endpoint
    }

    fn parameters_schema() -> HashMap<String, Attribute> {
        map! {
            "enable_monitoring" => boolean(OptionalComputed, "Enable monitoring."),
            "metrics_frequency" => number(OptionalComputed, "Metrics frequency, in seconds."),
            "metrics_prefix" => string(OptionalComputed, "Prefix of the metrics."),
            "monitoring_instance_id" => string(OptionalComputed, "ID of the Argus instance receiving the metrics."),
            "plugins" => string_list(OptionalComputed, "PostgreSQL extensions to enable."),
            "sgw_acl" => string(OptionalComputed, "Comma separated list of IP networks in CIDR notation which are allowed to access this instance."),
        }
    }

    fn validate_parameters(diags: &mut Diagnostics, parameters: &Self::Parameters) {
        let path = AttributePath::new("parameters");
        validate::uuid(
            diags,
            path.clone().attribute("monitoring_instance_id"),
            &parameters.monitoring_instance_id,
        );
        validate::list_unique(diags, path.attribute("plugins"), &parameters.plugins);
    }

    fn plan_parameters(parameters: &mut Self::Parameters) {
        plan::unknown_if_null(&mut parameters.enable_monitoring);
        plan::unknown_if_null(&mut parameters.metrics_frequency);
        plan::unknown_if_null(&mut parameters.metrics_prefix);
        plan::unknown_if_null(&mut parameters.monitoring_instance_id);
        plan::unknown_if_null(&mut parameters.plugins);
        plan::unknown_if_null(&mut parameters.sgw_acl);
    }

    fn parameters_payload(parameters: &Self::Parameters) -> JsonParameters {
        let mut payload = JsonParameters::new();
        insert_bool(&mut payload, "enable_monitoring", &parameters.enable_monitoring);
        insert_number(&mut payload, "metrics_frequency", &parameters.metrics_frequency);
        insert_string(&mut payload, "metrics_prefix", &parameters.metrics_prefix);
        insert_string(&mut payload, "monitoring_instance_id", &parameters.monitoring_instance_id);
        insert_strings(&mut payload, "plugins", &parameters.plugins);
        insert_string(&mut payload, "sgw_acl", &parameters.sgw_acl);
        payload
    }

    fn map_parameters(parameters: &JsonParameters) -> Self::Parameters {
        PostgreSqlParameters {
            enable_monitoring: bool_param(parameters, "enable_monitoring"),
            metrics_frequency: number_param(parameters, "metrics_frequency"),
            metrics_prefix: string_param(parameters, "metrics_prefix"),
            monitoring_instance_id: string_param(parameters, "monitoring_instance_id"),
            plugins: strings_param(parameters, "plugins"),
            sgw_acl: string_param(parameters, "sgw_acl"),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tf_provider::value::Value;

    use crate::dsa::{api::Instance, instance::InstanceState};
    use crate::utils::WithSchema;

    use super::*;

    const PROJECT: &str = "11111111-2222-3333-4444-555555555555";
    const PLAN: &str = "22222222-3333-4444-5555-666666666666";

    fn parameters() -> PostgreSqlParameters {
        PostgreSqlParameters {
            sgw_acl: "192.168.0.0/24".into(),
            plugins: Value::Value(vec!["pg_stat_statements".into()]),
            enable_monitoring: Value::Value(false),
            ..Default::default()
        }
    }

    #[test]
    fn create_payload() {
        let state = InstanceState::<PostgreSql> {
            project_id: PROJECT.into(),
            name: "db".into(),
            plan_id: PLAN.into(),
            parameters: Value::Value(parameters()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(state.to_create_payload()).unwrap(),
            json!({
                "instanceName": "db",
                "planId": PLAN,
                "parameters": {
                    "sgw_acl": "192.168.0.0/24",
                    "plugins": ["pg_stat_statements"],
                    "enable_monitoring": false,
                },
            })
        );
    }

    #[test]
    fn update_payload_without_parameters() {
        let state = InstanceState::<PostgreSql> {
            plan_id: PLAN.into(),
            parameters: Value::Unknown,
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(state.to_update_payload()).unwrap(),
            json!({"planId": PLAN, "parameters": {}})
        );
    }

    #[test]
    fn map_instance() {
        let mut state = InstanceState::<PostgreSql> {
            project_id: PROJECT.into(),
            ..Default::default()
        };
        let instance: Instance = serde_json::from_value(json!({
            "instanceId": "iid",
            "name": "db",
            "planId": PLAN,
            "parameters": {
                "sgw_acl": "192.168.0.0/24",
                "plugins": ["pg_stat_statements"],
                "enable_monitoring": false,
            },
            "dashboardUrl": "https://dashboard",
        }))
        .unwrap();
        state.map_response(instance).unwrap();

        assert_eq!(state.id, ValueString::from(format!("{PROJECT},iid")));
        assert_eq!(state.instance_id, ValueString::from("iid"));
        assert_eq!(state.parameters, Value::Value(parameters()));
        assert_eq!(state.dashboard_url, ValueString::from("https://dashboard"));
        assert_eq!(state.cf_guid, ValueString::Null);
    }

    #[test]
    fn map_instance_without_parameters() {
        let mut state = InstanceState::<PostgreSql> {
            project_id: PROJECT.into(),
            instance_id: "iid".into(),
            parameters: Value::Value(parameters()),
            ..Default::default()
        };
        state.map_response(Instance::default()).unwrap();
        assert_eq!(state.parameters, Value::Null);
    }

    #[test]
    fn map_instance_requires_id() {
        let mut state = InstanceState::<PostgreSql>::default();
        let err = state.map_response(Instance::default()).unwrap_err();
        assert_eq!(err.to_string(), "instance id not present");
    }

    #[test]
    fn validate_instance() {
        let mut diags = Diagnostics::default();
        InstanceState::<PostgreSql> {
            project_id: PROJECT.into(),
            name: "db".into(),
            plan_id: PLAN.into(),
            parameters: Value::Value(parameters()),
            ..Default::default()
        }
        .validate(&mut diags);
        assert!(diags.errors.is_empty());

        InstanceState::<PostgreSql> {
            project_id: "project".into(),
            name: "db".into(),
            plan_id: PLAN.into(),
            parameters: Value::Value(PostgreSqlParameters {
                monitoring_instance_id: "argus".into(),
                ..Default::default()
            }),
            ..Default::default()
        }
        .validate(&mut diags);
        assert_eq!(diags.errors.len(), 2);
    }

    #[test]
    fn nested_parameters_schema() {
        let schema = InstanceState::<PostgreSql>::schema();
        assert!(schema.block.attributes.contains_key("parameters"));
        let data_source = InstanceState::<PostgreSql>::data_source_schema();
        assert_eq!(
            data_source.block.attributes["instance_id"].constraint,
            Required
        );
        assert_eq!(data_source.block.attributes["name"].constraint, Computed);
    }

    #[test]
    fn plan_unset_parameters() {
        let mut planned = PostgreSqlParameters {
            sgw_acl: "10.0.0.0/8".into(),
            ..Default::default()
        };
        PostgreSql::plan_parameters(&mut planned);
        assert_eq!(planned.sgw_acl, ValueString::from("10.0.0.0/8"));
        assert!(planned.enable_monitoring.is_unknown());
        assert!(planned.metrics_frequency.is_unknown());
        assert!(planned.metrics_prefix.is_unknown());
        assert!(planned.monitoring_instance_id.is_unknown());
        assert!(planned.plugins.is_unknown());

        // unknown values never reach the API
        assert_eq!(
            serde_json::to_value(PostgreSql::parameters_payload(&planned)).unwrap(),
            json!({"sgw_acl": "10.0.0.0/8"})
        );
    }
}
