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

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tf_provider::{
    map,
    schema::{AttributeConstraint::*, Block, Description, Schema},
    value::{Value, ValueString},
    AttributePath, Diagnostics,
};

use crate::attributes::{computed, object, string};
use crate::common::build_id;
use crate::dsa::{
    api::{CreateInstancePayload, Instance, PartialUpdateInstancePayload},
    DsaService,
};
use crate::utils::{known_str, string_value, WithSchema};
use crate::validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(bound = "")]
pub struct InstanceState<'a, S: DsaService> {
    #[serde(borrow = "'a")]
    pub id: ValueString<'a>,
    pub project_id: ValueString<'a>,
    pub instance_id: ValueString<'a>,
    pub name: ValueString<'a>,
    pub plan_id: ValueString<'a>,
    pub parameters: Value<S::Parameters>,
    pub cf_guid: ValueString<'a>,
    pub cf_space_guid: ValueString<'a>,
    pub dashboard_url: ValueString<'a>,
    pub image_url: ValueString<'a>,
    pub organization_guid: ValueString<'a>,
}

impl<S: DsaService> WithSchema for InstanceState<'_, S> {
    fn schema() -> Schema {
        let service = S::DISPLAY_NAME;
        Schema {
            version: 1,
            block: Block {
                version: 1,
                attributes: map! {
                    "id" => string(Computed, "Terraform's internal resource ID. It is structured as \"`project_id`,`instance_id`\"."),
                    "project_id" => string(Required, "STACKIT project ID to which the instance is associated."),
                    "instance_id" => string(Computed, &format!("ID of the {service} instance.")),
                    "name" => string(Required, "Instance name."),
                    "plan_id" => string(Required, "The selected plan ID."),
                    "parameters" => object(S::parameters_schema(), OptionalComputed, &format!("Configuration parameters of the {service} instance.")),
                    "cf_guid" => string(Computed, "Cloud Foundry GUID of the instance."),
                    "cf_space_guid" => string(Computed, "Cloud Foundry space GUID of the instance."),
                    "dashboard_url" => string(Computed, "Dashboard URL of the instance."),
                    "image_url" => string(Computed, "Image URL of the instance."),
                    "organization_guid" => string(Computed, "Cloud Foundry organization GUID of the instance."),
                },
                description: Description::plain(format!("{service} instance resource schema.")),
                ..Default::default()
            },
        }
    }
}

impl<'a, S: DsaService> InstanceState<'a, S> {
    pub fn data_source_schema() -> Schema {
        let mut schema = Self::schema();
        let mut attributes = computed(schema.block.attributes);
        for name in ["project_id", "instance_id"] {
            if let Some(attribute) = attributes.get_mut(name) {
                attribute.constraint = Required;
            }
        }
        schema.block.attributes = attributes;
        schema.block.description =
            Description::plain(format!("{} instance data source schema.", S::DISPLAY_NAME));
        schema
    }

    pub fn validate(&self, diags: &mut Diagnostics) {
        validate::uuid(diags, AttributePath::new("project_id"), &self.project_id);
        validate::no_separator(diags, AttributePath::new("project_id"), &self.project_id);
        validate::uuid(diags, AttributePath::new("plan_id"), &self.plan_id);
        validate::length_between(diags, AttributePath::new("name"), &self.name, 1, 63);
        validate::no_separator(diags, AttributePath::new("name"), &self.name);
        if let Some(parameters) = self.parameters.as_ref_option() {
            S::validate_parameters(diags, parameters);
        }
    }

    pub fn validate_lookup(&self, diags: &mut Diagnostics) {
        for (name, value) in [("project_id", &self.project_id), ("instance_id", &self.instance_id)] {
            validate::uuid(diags, AttributePath::new(name), value);
            validate::no_separator(diags, AttributePath::new(name), value);
        }
    }

    pub fn ids(&self) -> Result<(String, String)> {
        match (known_str(&self.project_id), known_str(&self.instance_id)) {
            (Some(project_id), Some(instance_id)) => {
                Ok((project_id.to_owned(), instance_id.to_owned()))
            }
            _ => Err(anyhow!("instance identifiers are not known")),
        }
    }

    pub fn to_create_payload(&self) -> CreateInstancePayload {
        CreateInstancePayload {
            instance_name: known_str(&self.name).map(str::to_owned),
            plan_id: known_str(&self.plan_id).map(str::to_owned),
            parameters: self
                .parameters
                .as_ref_option()
                .map(S::parameters_payload)
                .unwrap_or_default(),
        }
    }

    pub fn to_update_payload(&self) -> PartialUpdateInstancePayload {
        PartialUpdateInstancePayload {
            plan_id: known_str(&self.plan_id).map(str::to_owned),
            parameters: self
                .parameters
                .as_ref_option()
                .map(S::parameters_payload)
                .unwrap_or_default(),
        }
    }

    pub fn map_response(&mut self, instance: Instance) -> Result<()> {
        let instance_id = match (known_str(&self.instance_id), &instance.instance_id) {
            (Some(id), _) if !id.is_empty() => id.to_owned(),
            (_, Some(id)) => id.clone(),
            _ => return Err(anyhow!("instance id not present")),
        };

        self.id = build_id(&[self.project_id.as_str(), &instance_id]).into();
        self.instance_id = instance_id.into();
        self.name = string_value(instance.name);
        self.plan_id = string_value(instance.plan_id);
        self.parameters = Value::from(instance.parameters.as_ref().map(S::map_parameters));
        self.cf_guid = string_value(instance.cf_guid);
        self.cf_space_guid = string_value(instance.cf_space_guid);
        self.dashboard_url = string_value(instance.dashboard_url);
        self.image_url = string_value(instance.image_url);
        self.organization_guid = string_value(instance.organization_guid);
        Ok(())
    }
}
