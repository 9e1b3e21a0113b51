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

use std::{borrow::Cow, fmt::Display};

use tf_provider::{
    schema::Schema,
    value::{Value, ValueList, ValueString},
    Diagnostics,
};

use crate::common::log_and_add_error;

pub(crate) trait WithSchema {
    fn schema() -> Schema;
}

/// Report the error of a result as a diagnostic
pub(crate) trait ExtractDiagnostics<T> {
    fn or_diagnose(self, diags: &mut Diagnostics, summary: &str) -> Option<T>;
}

impl<T, E: Display> ExtractDiagnostics<T> for Result<T, E> {
    fn or_diagnose(self, diags: &mut Diagnostics, summary: &str) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(err) => {
                log_and_add_error(diags, summary, err);
                None
            }
        }
    }
}

/// Optional string from the API to a Terraform string
pub(crate) fn string_value<'a>(value: Option<String>) -> ValueString<'a> {
    Value::from(value.map(Cow::from))
}

/// Optional list of strings from the API to a Terraform list
pub(crate) fn string_list_value<'a>(value: Option<Vec<String>>) -> ValueList<ValueString<'a>> {
    Value::from(value.map(|list| list.into_iter().map(|s| Value::Value(Cow::from(s))).collect()))
}

/// Known string, if any
pub(crate) fn known_str<'a>(value: &'a ValueString<'_>) -> Option<&'a str> {
    value.as_deref_option()
}

/// Known strings of a list, skipping null or unknown elements
pub(crate) fn known_strings(value: &ValueList<ValueString<'_>>) -> Option<Vec<String>> {
    value.as_ref_option().map(|list| {
        list.iter()
            .filter_map(|s| s.as_deref_option().map(str::to_owned))
            .collect()
    })
}
