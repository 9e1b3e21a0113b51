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
use crate::dns::api::{CreateRecordSetPayload, Record, RecordSetResponse, UpdateRecordSetPayload};
use crate::utils::{known_str, string_value, WithSchema};
use crate::validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RecordSetState<'a> {
    #[serde(borrow = "'a")]
    pub id: ValueString<'a>,
    pub project_id: ValueString<'a>,
    pub zone_id: ValueString<'a>,
    pub record_set_id: ValueString<'a>,
    pub name: ValueString<'a>,
    pub records: ValueList<ValueString<'a>>,
    pub ttl: ValueNumber,
    #[serde(rename = "type")]
    pub record_type: ValueString<'a>,
    pub active: ValueBool,
    pub comment: ValueString<'a>,
    pub error: ValueString<'a>,
    pub state: ValueString<'a>,
}

impl WithSchema for RecordSetState<'_> {
    fn schema() -> Schema {
        Schema {
            version: 1,
            block: Block {
                version: 1,
                attributes: map! {
                    "id" => string(Computed, "Terraform's internal resource ID. It is structured as \"`project_id`,`zone_id`,`record_set_id`\"."),
                    "project_id" => string(Required, "STACKIT project ID to which the dns record set is associated."),
                    "zone_id" => string(Required, "The zone ID to which is dns record set is associated."),
                    "record_set_id" => string(Computed, "The rr set id."),
                    "name" => string(Required, "Name of the record which should be a valid domain according to rfc1035 Section 2.3.4. E.g. `example.com`"),
                    "records" => string_list(Required, "Records."),
                    "ttl" => number(OptionalComputed, "Time to live. E.g. 3600"),
                    "type" => string(OptionalComputed, "The record set type. E.g. `A` or `CNAME`"),
                    "active" => boolean(OptionalComputed, "Specifies if the record set is active or not."),
                    "comment" => string(OptionalComputed, "Comment."),
                    "error" => string(Computed, "Error shows error in case create/update/delete failed."),
                    "state" => string(Computed, "Record set state."),
                },
                description: Description::plain("DNS Record Set Resource schema."),
                ..Default::default()
            },
        }
    }
}

impl RecordSetState<'_> {
    /// Same attributes as the resource, looked up by identifiers
    pub fn data_source_schema() -> Schema {
        let mut schema = Self::schema();
        let mut attributes = computed(schema.block.attributes);
        for name in ["project_id", "zone_id", "record_set_id"] {
            if let Some(attribute) = attributes.get_mut(name) {
                attribute.constraint = Required;
            }
        }
        schema.block.attributes = attributes;
        schema.block.description = Description::plain("DNS Record Set Data Source schema.");
        schema
    }
}

impl<'a> RecordSetState<'a> {
    pub fn validate(&self, diags: &mut Diagnostics) {
        for (name, value) in [("project_id", &self.project_id), ("zone_id", &self.zone_id)] {
            validate::uuid(diags, AttributePath::new(name), value);
            validate::no_separator(diags, AttributePath::new(name), value);
        }
        validate::length_between(diags, AttributePath::new("name"), &self.name, 1, 63);
        let records = AttributePath::new("records");
        validate::list_size_at_least(diags, records.clone(), &self.records, 1);
        validate::list_unique(diags, records.clone(), &self.records);
        validate::list_each_ip(diags, records, &self.records);
        validate::int_between(diags, AttributePath::new("ttl"), &self.ttl, 30, 99999999);
        validate::length_at_most(diags, AttributePath::new("comment"), &self.comment, 255);
        validate::length_at_most(diags, AttributePath::new("error"), &self.error, 2000);
    }

    /// Identifiers of the record set
    pub fn ids(&self) -> Result<(String, String, String)> {
        match (
            known_str(&self.project_id),
            known_str(&self.zone_id),
            known_str(&self.record_set_id),
        ) {
            (Some(project_id), Some(zone_id), Some(record_set_id)) => Ok((
                project_id.to_owned(),
                zone_id.to_owned(),
                record_set_id.to_owned(),
            )),
            _ => Err(anyhow!("record set identifiers are not known")),
        }
    }

    fn records_payload(&self) -> Vec<Record> {
        self.records
            .iter()
            .flatten()
            .map(|record| Record {
                content: record.as_deref_option().map(str::to_owned),
                id: None,
            })
            .collect()
    }

    pub fn to_create_payload(&self) -> CreateRecordSetPayload {
        CreateRecordSetPayload {
            comment: known_str(&self.comment).map(str::to_owned),
            name: known_str(&self.name).map(str::to_owned),
            records: Some(self.records_payload()),
            ttl: self.ttl.as_ref_option().copied(),
            record_type: known_str(&self.record_type).map(str::to_owned),
        }
    }

    /// The record type cannot be updated
    pub fn to_update_payload(&self) -> UpdateRecordSetPayload {
        UpdateRecordSetPayload {
            comment: known_str(&self.comment).map(str::to_owned),
            name: known_str(&self.name).map(str::to_owned),
            records: Some(self.records_payload()),
            ttl: self.ttl.as_ref_option().copied(),
        }
    }

    /// Copy the record set from the API into the state
    pub fn map_response(&mut self, response: RecordSetResponse) -> Result<()> {
        let record_set = response.rrset.ok_or_else(|| anyhow!("response input is nil"))?;

        let record_set_id = match (known_str(&self.record_set_id), &record_set.id) {
            (Some(id), _) if !id.is_empty() => id.to_owned(),
            (_, Some(id)) => id.clone(),
            _ => return Err(anyhow!("record set id not present")),
        };

        self.records = Value::from(record_set.records.map(|records| {
            records
                .into_iter()
                .map(|record| string_value(record.content))
                .collect()
        }));
        self.id = build_id(&[
            self.project_id.as_str(),
            self.zone_id.as_str(),
            &record_set_id,
        ])
        .into();
        self.record_set_id = record_set_id.into();
        self.active = record_set.active.into();
        self.comment = string_value(record_set.comment);
        self.error = string_value(record_set.error);
        self.name = string_value(record_set.name);
        self.state = string_value(record_set.state);
        self.ttl = record_set.ttl.into();
        self.record_type = string_value(record_set.record_type);
        Ok(())
    }
}

impl<'a> RecordSetState<'a> {
    pub fn validate_lookup(&self, diags: &mut Diagnostics) {
        for (name, value) in [
            ("project_id", &self.project_id),
            ("zone_id", &self.zone_id),
            ("record_set_id", &self.record_set_id),
        ] {
            validate::uuid(diags, AttributePath::new(name), value);
            validate::no_separator(diags, AttributePath::new(name), value);
        }
    }
}
