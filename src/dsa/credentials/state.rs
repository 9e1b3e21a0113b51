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
    value::{ValueList, ValueNumber, ValueString},
    AttributePath, Diagnostics,
};

use crate::attributes::{computed, number, sensitive, string, string_list};
use crate::common::build_id;
use crate::dsa::api::CredentialsResponse;
use crate::utils::{known_str, string_list_value, string_value};
use crate::validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CredentialsState<'a> {
    #[serde(borrow = "'a")]
    pub id: ValueString<'a>,
    pub credentials_id: ValueString<'a>,
    pub project_id: ValueString<'a>,
    pub instance_id: ValueString<'a>,
    pub host: ValueString<'a>,
    pub hosts: ValueList<ValueString<'a>>,
    pub password: ValueString<'a>,
    pub port: ValueNumber,
    pub uri: ValueString<'a>,
    pub username: ValueString<'a>,
}

impl<'a> CredentialsState<'a> {
    /// Credentials depend on the service only by their descriptions
    pub fn schema(service: &str) -> Schema {
        Schema {
            version: 1,
            block: Block {
                version: 1,
                attributes: map! {
                    "id" => string(Computed, "Terraform's internal resource identifier. It is structured as \"`project_id`,`instance_id`,`credentials_id`\"."),
                    "credentials_id" => string(Computed, "The credentials ID."),
                    "project_id" => string(Required, "STACKIT project ID to which the instance is associated."),
                    "instance_id" => string(Required, &format!("ID of the {service} instance.")),
                    "host" => string(Computed, "Host of the instance."),
                    "hosts" => string_list(Computed, "Hosts of the instance."),
                    "password" => sensitive(string(Computed, "Password of the credentials.")),
                    "port" => number(Computed, "Port of the instance."),
                    "uri" => sensitive(string(Computed, "Connection URI.")),
                    "username" => string(Computed, "Username of the credentials."),
                },
                description: Description::plain(format!("{service} credentials resource schema.")),
                ..Default::default()
            },
        }
    }

    pub fn data_source_schema(service: &str) -> Schema {
        let mut schema = Self::schema(service);
        let mut attributes = computed(schema.block.attributes);
        for name in ["project_id", "instance_id", "credentials_id"] {
            if let Some(attribute) = attributes.get_mut(name) {
                attribute.constraint = Required;
            }
        }
        schema.block.attributes = attributes;
        schema.block.description =
            Description::plain(format!("{service} credentials data source schema."));
        schema
    }

    pub fn validate(&self, diags: &mut Diagnostics) {
        for (name, value) in [("project_id", &self.project_id), ("instance_id", &self.instance_id)] {
            validate::uuid(diags, AttributePath::new(name), value);
            validate::no_separator(diags, AttributePath::new(name), value);
        }
    }

    pub fn validate_lookup(&self, diags: &mut Diagnostics) {
        self.validate(diags);
        validate::uuid(diags, AttributePath::new("credentials_id"), &self.credentials_id);
        validate::no_separator(diags, AttributePath::new("credentials_id"), &self.credentials_id);
    }

    /// Identifiers of the instance the credentials belong to
    pub fn instance_ids(&self) -> Result<(String, String)> {
        match (known_str(&self.project_id), known_str(&self.instance_id)) {
            (Some(project_id), Some(instance_id)) => {
                Ok((project_id.to_owned(), instance_id.to_owned()))
            }
            _ => Err(anyhow!("instance identifiers are not known")),
        }
    }

    pub fn ids(&self) -> Result<(String, String, String)> {
        let (project_id, instance_id) = self.instance_ids()?;
        match known_str(&self.credentials_id) {
            Some(credentials_id) => Ok((project_id, instance_id, credentials_id.to_owned())),
            None => Err(anyhow!("credentials identifier is not known")),
        }
    }

    pub fn map_response(&mut self, response: CredentialsResponse) -> Result<()> {
        let credentials_id = match (known_str(&self.credentials_id), &response.id) {
            (Some(id), _) if !id.is_empty() => id.to_owned(),
            (_, Some(id)) => id.clone(),
            _ => return Err(anyhow!("credentials id not present")),
        };

        self.id = build_id(&[
            self.project_id.as_str(),
            self.instance_id.as_str(),
            &credentials_id,
        ])
        .into();
        self.credentials_id = credentials_id.into();

        let credentials = response
            .raw
            .and_then(|raw| raw.credentials)
            .unwrap_or_default();
        self.host = string_value(credentials.host);
        self.hosts = string_list_value(credentials.hosts);
        self.password = string_value(credentials.password);
        self.port = credentials.port.into();
        self.uri = string_value(credentials.uri);
        self.username = string_value(credentials.username);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tf_provider::value::Value;

    use crate::dsa::api::{Credentials, RawCredentials};

    use super::*;

    const PROJECT: &str = "11111111-2222-3333-4444-555555555555";
    const INSTANCE: &str = "66666666-7777-8888-9999-000000000000";

    fn state<'a>() -> CredentialsState<'a> {
        CredentialsState {
            project_id: PROJECT.into(),
            instance_id: INSTANCE.into(),
            ..Default::default()
        }
    }

    #[test]
    fn map_default_values() {
        let mut state = state();
        state
            .map_response(CredentialsResponse {
                id: Some("cid".to_owned()),
                raw: None,
            })
            .unwrap();
        assert_eq!(
            state,
            CredentialsState {
                id: format!("{PROJECT},{INSTANCE},cid").into(),
                credentials_id: "cid".into(),
                ..self::state()
            }
        );
    }

    #[test]
    fn map_values() {
        let mut state = state();
        state
            .map_response(CredentialsResponse {
                id: Some("cid".to_owned()),
                raw: Some(RawCredentials {
                    credentials: Some(Credentials {
                        host: Some("host".to_owned()),
                        hosts: Some(vec!["h1".to_owned()]),
                        password: Some("secret".to_owned()),
                        port: Some(5432),
                        uri: Some("uri".to_owned()),
                        username: Some("user".to_owned()),
                    }),
                }),
            })
            .unwrap();
        assert_eq!(state.host, ValueString::from("host"));
        assert_eq!(state.hosts, Value::Value(vec![ValueString::from("h1")]));
        assert_eq!(state.port, Value::Value(5432));
        assert_eq!(state.username, ValueString::from("user"));
    }

    #[test]
    fn map_requires_id() {
        let err = state()
            .map_response(CredentialsResponse::default())
            .unwrap_err();
        assert_eq!(err.to_string(), "credentials id not present");
    }

    #[test]
    fn lookup_requires_uuids() {
        let mut diags = Diagnostics::default();
        CredentialsState {
            credentials_id: "not-a-uuid".into(),
            ..state()
        }
        .validate_lookup(&mut diags);
        assert_eq!(diags.errors.len(), 1);
    }

    #[test]
    fn secrets_are_sensitive() {
        let schema = CredentialsState::schema("PostgreSQL");
        assert!(schema.block.attributes["password"].sensitive);
        assert!(schema.block.attributes["uri"].sensitive);
        assert!(!schema.block.attributes["host"].sensitive);
    }
}
