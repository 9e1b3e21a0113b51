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

//! STACKIT RabbitMQ (data service API flavour)

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
pub struct RabbitMq;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RabbitMqParameters {
    pub consumer_timeout: ValueNumber,
    pub enable_monitoring: ValueBool,
    pub graphite: ValueString<'static>,
    pub max_disk_threshold: ValueNumber,
    pub metrics_frequency: ValueNumber,
    pub metrics_prefix: ValueString<'static>,
    pub monitoring_instance_id: ValueString<'static>,
    pub plugins: ValueList<ValueString<'static>>,
    pub roles: ValueList<ValueString<'static>>,
    pub sgw_acl: ValueString<'static>,
    pub syslog: ValueList<ValueString<'static>>,
    pub tls_protocols: ValueString<'static>,
}

impl DsaService for RabbitMq {
    const NAME: &'static str = "rabbitmq";
    const DISPLAY_NAME: &'static str = "RabbitMQ";

    type Parameters = RabbitMqParameters;

    fn endpoint(data: &ProviderData) -> &str {
        &data.rabbitmq_endpoint
    }

    fn parameters_schema() -> HashMap<String, Attribute> {
        map! {
            "consumer_timeout" => number(OptionalComputed, "The timeout in milliseconds for the consumer."),
            "enable_monitoring" => boolean(OptionalComputed, "Enable monitoring."),
            "graphite" => string(OptionalComputed, "Graphite server URL (host and port). If set, monitoring with Graphite will be enabled."),
            "max_disk_threshold" => number(OptionalComputed, "The maximum disk threshold in MB. If the disk usage exceeds this threshold, the instance will be stopped."),
            "metrics_frequency" => number(OptionalComputed, "The frequency in seconds at which metrics are emitted."),
            "metrics_prefix" => string(OptionalComputed, "The prefix for the metrics. Could be useful when using Graphite monitoring to prefix the metrics with a certain value, like an API key."),
            "monitoring_instance_id" => string(OptionalComputed, "The ID of the STACKIT monitoring instance."),
            "plugins" => string_list(OptionalComputed, "List of plugins to install. Must be a supported plugin name."),
            "roles" => string_list(OptionalComputed, "List of roles to assign to the instance."),
            "sgw_acl" => string(OptionalComputed, "Comma separated list of IP networks in CIDR notation which are allowed to access this instance."),
            "syslog" => string_list(OptionalComputed, "List of syslog servers to send logs to."),
            "tls_protocols" => string(OptionalComputed, "TLS protocol version accepted by the instance."),
        }
    }

    fn validate_parameters(diags: &mut Diagnostics, parameters: &Self::Parameters) {
        let path = AttributePath::new("parameters");
        validate::uuid(
            diags,
            path.clone().attribute("monitoring_instance_id"),
            &parameters.monitoring_instance_id,
        );
        validate::list_unique(diags, path.clone().attribute("plugins"), &parameters.plugins);
        validate::list_unique(diags, path.attribute("roles"), &parameters.roles);
    }

    fn plan_parameters(parameters: &mut Self::Parameters) {
        plan::unknown_if_null(&mut parameters.consumer_timeout);
        plan::unknown_if_null(&mut parameters.enable_monitoring);
        plan::unknown_if_null(&mut parameters.graphite);
        plan::unknown_if_null(&mut parameters.max_disk_threshold);
        plan::unknown_if_null(&mut parameters.metrics_frequency);
        plan::unknown_if_null(&mut parameters.metrics_prefix);
        plan::unknown_if_null(&mut parameters.monitoring_instance_id);
        plan::unknown_if_null(&mut parameters.plugins);
        plan::unknown_if_null(&mut parameters.roles);
        plan::unknown_if_null(&mut parameters.sgw_acl);
        plan::unknown_if_null(&mut parameters.syslog);
        plan::unknown_if_null(&mut parameters.tls_protocols);
    }

    fn parameters_payload(parameters: &Self::Parameters) -> JsonParameters {
        let mut payload = JsonParameters::new();
        insert_number(&mut payload, "consumer_timeout", &parameters.consumer_timeout);
        insert_bool(&mut payload, "enable_monitoring", &parameters.enable_monitoring);
        insert_string(&mut payload, "graphite", &parameters.graphite);
        insert_number(&mut payload, "max_disk_threshold", &parameters.max_disk_threshold);
        insert_number(&mut payload, "metrics_frequency", &parameters.metrics_frequency);
        insert_string(&mut payload, "metrics_prefix", &parameters.metrics_prefix);
        insert_string(&mut payload, "monitoring_instance_id", &parameters.monitoring_instance_id);
        insert_strings(&mut payload, "plugins", &parameters.plugins);
        insert_strings(&mut payload, "roles", &parameters.roles);
        insert_string(&mut payload, "sgw_acl", &parameters.sgw_acl);
        insert_strings(&mut payload, "syslog", &parameters.syslog);
        insert_string(&mut payload, "tls_protocols", &parameters.tls_protocols);
        payload
    }

    fn map_parameters(parameters: &JsonParameters) -> Self::Parameters {
        RabbitMqParameters {
            consumer_timeout: number_param(parameters, "consumer_timeout"),
            enable_monitoring: bool_param(parameters, "enable_monitoring"),
            graphite: string_param(parameters, "graphite"),
            max_disk_threshold: number_param(parameters, "max_disk_threshold"),
            metrics_frequency: number_param(parameters, "metrics_frequency"),
            metrics_prefix: string_param(parameters, "metrics_prefix"),
            monitoring_instance_id: string_param(parameters, "monitoring_instance_id"),
            plugins: strings_param(parameters, "plugins"),
            roles: strings_param(parameters, "roles"),
            sgw_acl: string_param(parameters, "sgw_acl"),
            syslog: strings_param(parameters, "syslog"),
            tls_protocols: string_param(parameters, "tls_protocols"),
        }
    }
}
