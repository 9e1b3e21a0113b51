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

//! Attribute validators
//!
//! Validators only look at known values: null and unknown values are accepted, the
//! attribute constraints of the schema take care of required attributes.

use std::{collections::HashSet, net::IpAddr};

use tf_provider::{
    value::{Value, ValueList, ValueNumber, ValueString},
    AttributePath, Diagnostics,
};

use crate::common::SEPARATOR;

const INVALID: &str = "Invalid Attribute Value";

fn invalid(diags: &mut Diagnostics, attr_path: AttributePath, detail: String) {
    diags.error(INVALID, detail, attr_path);
}

/// Value must be a UUID
pub fn uuid(diags: &mut Diagnostics, attr_path: AttributePath, value: &ValueString<'_>) {
    if let Some(value) = value.as_deref_option() {
        if uuid::Uuid::parse_str(value).is_err() {
            invalid(
                diags,
                attr_path,
                format!("value must be a valid UUID, got: {value:?}"),
            );
        }
    }
}

/// Value must not contain the composite identifier separator
pub fn no_separator(diags: &mut Diagnostics, attr_path: AttributePath, value: &ValueString<'_>) {
    if let Some(value) = value.as_deref_option() {
        if value.contains(SEPARATOR) {
            invalid(
                diags,
                attr_path,
                format!("value must not contain identifier separator '{SEPARATOR}', got: {value:?}"),
            );
        }
    }
}

/// Value must be an IP address (v4 or v6)
pub fn ip(diags: &mut Diagnostics, attr_path: AttributePath, value: &ValueString<'_>) {
    if let Some(value) = value.as_deref_option() {
        if value.parse::<IpAddr>().is_err() {
            invalid(
                diags,
                attr_path,
                format!("value must be an IP address, got: {value:?}"),
            );
        }
    }
}

/// Value must be an absolute URL
pub fn url(diags: &mut Diagnostics, attr_path: AttributePath, value: &ValueString<'_>) {
    if let Some(value) = value.as_deref_option() {
        if let Err(err) = url::Url::parse(value) {
            invalid(
                diags,
                attr_path,
                format!("value must be a valid URL, got: {value:?} ({err})"),
            );
        }
    }
}

/// Length in characters must lie within `min..=max`
pub fn length_between(
    diags: &mut Diagnostics,
    attr_path: AttributePath,
    value: &ValueString<'_>,
    min: usize,
    max: usize,
) {
    if let Some(value) = value.as_deref_option() {
        let len = value.chars().count();
        if len < min || len > max {
            invalid(
                diags,
                attr_path,
                format!("string length must be between {min} and {max}, got: {len}"),
            );
        }
    }
}

pub fn length_at_most(
    diags: &mut Diagnostics,
    attr_path: AttributePath,
    value: &ValueString<'_>,
    max: usize,
) {
    if let Some(value) = value.as_deref_option() {
        let len = value.chars().count();
        if len > max {
            invalid(
                diags,
                attr_path,
                format!("string length must be at most {max}, got: {len}"),
            );
        }
    }
}

/// Number must lie within `min..=max`
pub fn int_between(
    diags: &mut Diagnostics,
    attr_path: AttributePath,
    value: &ValueNumber,
    min: i64,
    max: i64,
) {
    if let Value::Value(value) = *value {
        if !(min..=max).contains(&value) {
            invalid(
                diags,
                attr_path,
                format!("value must be between {min} and {max}, got: {value}"),
            );
        }
    }
}

/// Value must be one of `allowed`
pub fn one_of(
    diags: &mut Diagnostics,
    attr_path: AttributePath,
    value: &ValueString<'_>,
    allowed: &[&str],
) {
    if let Some(value) = value.as_deref_option() {
        if !allowed.contains(&value) {
            invalid(
                diags,
                attr_path,
                format!("value must be one of: {allowed:?}, got: {value:?}"),
            );
        }
    }
}

/// List must hold at least `min` elements
pub fn list_size_at_least<T>(
    diags: &mut Diagnostics,
    attr_path: AttributePath,
    value: &ValueList<T>,
    min: usize,
) {
    if let Some(list) = value.as_ref_option() {
        if list.len() < min {
            invalid(
                diags,
                attr_path,
                format!("list must contain at least {min} elements, got: {}", list.len()),
            );
        }
    }
}

/// Known elements of the list must be unique
pub fn list_unique(
    diags: &mut Diagnostics,
    attr_path: AttributePath,
    value: &ValueList<ValueString<'_>>,
) {
    let mut seen = HashSet::new();
    for (i, element) in value.iter().flatten().enumerate() {
        if let Some(element) = element.as_deref_option() {
            if !seen.insert(element) {
                diags.error(
                    "Duplicate List Value",
                    format!("this list must contain only unique values, {element:?} is duplicated"),
                    attr_path.clone().index(i as i64),
                );
            }
        }
    }
}

/// Every element of the list must be an IP address
pub fn list_each_ip(
    diags: &mut Diagnostics,
    attr_path: AttributePath,
    value: &ValueList<ValueString<'_>>,
) {
    for (i, element) in value.iter().flatten().enumerate() {
        ip(diags, attr_path.clone().index(i as i64), element);
    }
}
