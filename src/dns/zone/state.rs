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
    value::{Value, ValueBool, ValueList, ValueNumber, ValueString},
    AttributePath, Diagnostics,
};

use crate::attributes::{boolean, computed, number, string, string_list};
use crate::common::build_id;
use crate::dns::api::{CreateZonePayload, UpdateZonePayload, ZoneResponse};
use crate::utils::{known_str, known_strings, string_list_value, string_value, WithSchema};
use crate::validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ZoneState<'a> {
    #[serde(borrow = "'a")]
    pub id: ValueString<'a>,
    pub zone_id: ValueString<'a>,
    pub project_id: ValueString<'a>,
    pub name: ValueString<'a>,
    pub dns_name: ValueString<'a>,
    pub description: ValueString<'a>,
    pub acl: ValueString<'a>,
    pub active: ValueBool,
    pub contact_email: ValueString<'a>,
    pub default_ttl: ValueNumber,
    pub expire_time: ValueNumber,
    pub is_reverse_zone: ValueBool,
    pub negative_cache: ValueNumber,
    pub primaries: ValueList<ValueString<'a>>,
    pub primary_name_server: ValueString<'a>,
    pub record_count: ValueNumber,
    pub refresh_time: ValueNumber,
    pub retry_time: ValueNumber,
    pub serial_number: ValueNumber,
    #[serde(rename = "type")]
    pub zone_type: ValueString<'a>,
    pub visibility: ValueString<'a>,
    pub state: ValueString<'a>,
}

impl WithSchema for ZoneState<'_> {
    fn schema() -> Schema {
        Schema {
            version: 1,
            block: Block {
                version: 1,
                attributes: map! {
                    "id" => string(Computed, "Terraform's internal resource ID. It is structured as \"`project_id`,`zone_id`\"."),
                    "zone_id" => string(Computed, "The zone ID."),
                    "project_id" => string(Required, "STACKIT project ID to which the dns zone is associated."),
                    "name" => string(Required, "The user given name of the zone."),
                    "dns_name" => string(Required, "The zone name. E.g. `example.com`"),
                    "description" => string(Optional, "Description of the zone."),
                    "acl" => string(OptionalComputed, "The access control list. E.g. `0.0.0.0/0,::/0`"),
                    "active" => boolean(OptionalComputed, "Specifies if the zone is active or not."),
                    "contact_email" => string(OptionalComputed, "A contact e-mail for the zone."),
                    "default_ttl" => number(OptionalComputed, "Default time to live. E.g. 3600."),
                    "expire_time" => number(OptionalComputed, "Expire time. E.g. 1209600."),
                    "is_reverse_zone" => boolean(OptionalComputed, "Specifies, if the zone is a reverse zone or not. Defaults to `false`"),
                    "negative_cache" => number(OptionalComputed, "Negative caching. E.g. 60"),
                    "primaries" => string_list(OptionalComputed, "Primary name server for secondary zone. E.g. [\"1.2.3.4\"]"),
                    "primary_name_server" => string(Computed, "Primary name server. FQDN."),
                    "record_count" => number(Computed, "Record count how many records are in the zone."),
                    "refresh_time" => number(OptionalComputed, "Refresh time. E.g. 3600"),
                    "retry_time" => number(OptionalComputed, "Retry time. E.g. 600"),
                    "serial_number" => number(Computed, "Serial number. E.g. `2022111400`."),
                    "type" => string(OptionalComputed, "Zone type. Defaults to `primary`. Possible values are: `primary`, `secondary`."),
                    "visibility" => string(Computed, "Visibility of the zone. E.g. `public`."),
                    "state" => string(Computed, "Zone state. E.g. `CREATE_SUCCEEDED`."),
                },
                description: Description::plain("DNS Zone resource schema."),
                ..Default::default()
            },
        }
    }
}

impl<'a> ZoneState<'a> {
    /// Same attributes as the resource, looked up by identifiers
    pub fn data_source_schema() -> Schema {
        let mut schema = Self::schema();
        let mut attributes = computed(schema.block.attributes);
        for name in ["project_id", "zone_id"] {
            if let Some(attribute) = attributes.get_mut(name) {
                attribute.constraint = Required;
            }
        }
        schema.block.attributes = attributes;
        schema.block.description = Description::plain("DNS Zone data source schema.");
        schema
    }

    pub fn validate(&self, diags: &mut Diagnostics) {
        validate::uuid(diags, AttributePath::new("project_id"), &self.project_id);
        validate::no_separator(diags, AttributePath::new("project_id"), &self.project_id);
        validate::length_between(diags, AttributePath::new("name"), &self.name, 1, 63);
        validate::length_between(diags, AttributePath::new("dns_name"), &self.dns_name, 1, 253);
        validate::length_at_most(diags, AttributePath::new("description"), &self.description, 1024);
        validate::length_at_most(diags, AttributePath::new("acl"), &self.acl, 2000);
        for (name, value) in [
            ("default_ttl", &self.default_ttl),
            ("expire_time", &self.expire_time),
            ("negative_cache", &self.negative_cache),
            ("refresh_time", &self.refresh_time),
            ("retry_time", &self.retry_time),
        ] {
            validate::int_between(diags, AttributePath::new(name), value, 60, 99999999);
        }
        validate::list_each_ip(diags, AttributePath::new("primaries"), &self.primaries);
        validate::one_of(
            diags,
            AttributePath::new("type"),
            &self.zone_type,
            &["primary", "secondary"],
        );
    }

    pub fn validate_lookup(&self, diags: &mut Diagnostics) {
        for (name, value) in [("project_id", &self.project_id), ("zone_id", &self.zone_id)] {
            validate::uuid(diags, AttributePath::new(name), value);
            validate::no_separator(diags, AttributePath::new(name), value);
        }
    }

    /// Identifiers of the zone
    pub fn ids(&self) -> Result<(String, String)> {
        match (known_str(&self.project_id), known_str(&self.zone_id)) {
            (Some(project_id), Some(zone_id)) => Ok((project_id.to_owned(), zone_id.to_owned())),
            _ => Err(anyhow!("zone identifiers are not known")),
        }
    }

    pub fn to_create_payload(&self) -> CreateZonePayload {
        CreateZonePayload {
            name: known_str(&self.name).map(str::to_owned),
            dns_name: known_str(&self.dns_name).map(str::to_owned),
            description: known_str(&self.description).map(str::to_owned),
            acl: known_str(&self.acl).map(str::to_owned),
            contact_email: known_str(&self.contact_email).map(str::to_owned),
            default_ttl: self.default_ttl.as_ref_option().copied(),
            expire_time: self.expire_time.as_ref_option().copied(),
            is_reverse_zone: self.is_reverse_zone.as_ref_option().copied(),
            negative_cache: self.negative_cache.as_ref_option().copied(),
            primaries: known_strings(&self.primaries),
            refresh_time: self.refresh_time.as_ref_option().copied(),
            retry_time: self.retry_time.as_ref_option().copied(),
            zone_type: known_str(&self.zone_type).map(str::to_owned),
        }
    }

    pub fn to_update_payload(&self) -> UpdateZonePayload {
        UpdateZonePayload {
            name: known_str(&self.name).map(str::to_owned),
            // a removed description is cleared, the API keeps omitted fields
            description: match &self.description {
                Value::Value(description) => Some(description.to_string()),
                Value::Null => Some(String::new()),
                Value::Unknown => None,
            },
            acl: known_str(&self.acl).map(str::to_owned),
            contact_email: known_str(&self.contact_email).map(str::to_owned),
            default_ttl: self.default_ttl.as_ref_option().copied(),
            expire_time: self.expire_time.as_ref_option().copied(),
            negative_cache: self.negative_cache.as_ref_option().copied(),
            primaries: known_strings(&self.primaries),
            refresh_time: self.refresh_time.as_ref_option().copied(),
            retry_time: self.retry_time.as_ref_option().copied(),
        }
    }

    pub fn map_response(&mut self, response: ZoneResponse) -> Result<()> {
        let zone = response.zone.ok_or_else(|| anyhow!("response input is nil"))?;

        let zone_id = match (known_str(&self.zone_id), &zone.id) {
            (Some(id), _) if !id.is_empty() => id.to_owned(),
            (_, Some(id)) => id.clone(),
            _ => return Err(anyhow!("zone id not present")),
        };

        self.id = build_id(&[self.project_id.as_str(), &zone_id]).into();
        self.zone_id = zone_id.into();
        self.name = string_value(zone.name);
        self.dns_name = string_value(zone.dns_name);
        self.description = match zone.description {
            Some(description) if description.is_empty() && self.description.is_null() => Value::Null,
            description => string_value(description),
        };
        self.acl = string_value(zone.acl);
        self.active = zone.active.into();
        self.contact_email = string_value(zone.contact_email);
        self.default_ttl = zone.default_ttl.into();
        self.expire_time = zone.expire_time.into();
        self.is_reverse_zone = zone.is_reverse_zone.into();
        self.negative_cache = zone.negative_cache.into();
        self.primaries = string_list_value(zone.primaries);
        self.primary_name_server = string_value(zone.primary_name_server);
        self.record_count = zone.record_count.into();
        self.refresh_time = zone.refresh_time.into();
        self.retry_time = zone.retry_time.into();
        self.serial_number = zone.serial_number.into();
        self.zone_type = string_value(zone.zone_type);
        self.visibility = string_value(zone.visibility);
        self.state = string_value(zone.state);
        Ok(())
    }
}
