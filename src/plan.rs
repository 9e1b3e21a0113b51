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

//! Plan modifiers
//!
//! Terraform proposes a new state where computed attributes keep their prior value (or
//! are null on create). Resources adjust that proposal with these helpers.

use tf_provider::{value::Value, AttributePath};

/// Plan an optional+computed attribute left null as unknown
pub fn unknown_if_null<T>(value: &mut Value<T>) {
    if value.is_null() {
        *value = Value::Unknown;
    }
}

/// Plan an optional attribute left null with its static default
pub fn default_if_null<T>(value: &mut Value<T>, default: T) {
    if value.is_null() {
        *value = Value::Value(default);
    }
}

/// Keep the prior value of an attribute that would otherwise be planned as unknown
pub fn use_state_for_unknown<T: Clone>(planned: &mut Value<T>, prior: &Value<T>) {
    if planned.is_unknown() && !prior.is_null() {
        *planned = prior.clone();
    }
}

/// Report `name` as a replacement trigger if its value changes
pub fn requires_replace<T: PartialEq>(
    replace: &mut Vec<AttributePath>,
    name: &'static str,
    prior: &Value<T>,
    planned: &Value<T>,
) {
    if prior != planned {
        replace.push(AttributePath::new(name));
    }
}

#[cfg(test)]
mod tests {
    use tf_provider::value::{ValueBool, ValueString};

    use super::*;

    #[test]
    fn null_becomes_unknown() {
        let mut value = ValueString::Null;
        unknown_if_null(&mut value);
        assert!(value.is_unknown());

        let mut value = ValueString::from("x");
        unknown_if_null(&mut value);
        assert_eq!(value, ValueString::from("x"));
    }

    #[test]
    fn static_default() {
        let mut value = ValueBool::Null;
        default_if_null(&mut value, true);
        assert_eq!(value, Value::Value(true));

        let mut value = Value::Value(false);
        default_if_null(&mut value, true);
        assert_eq!(value, Value::Value(false));
    }

    #[test]
    fn state_for_unknown() {
        let mut planned = ValueString::Unknown;
        use_state_for_unknown(&mut planned, &ValueString::from("id"));
        assert_eq!(planned, ValueString::from("id"));

        let mut planned = ValueString::Unknown;
        use_state_for_unknown(&mut planned, &ValueString::Null);
        assert!(planned.is_unknown());
    }

    #[test]
    fn replace_on_change() {
        let mut replace = Vec::new();
        requires_replace(
            &mut replace,
            "project_id",
            &ValueString::from("a"),
            &ValueString::from("a"),
        );
        assert!(replace.is_empty());
        requires_replace(
            &mut replace,
            "project_id",
            &ValueString::from("a"),
            &ValueString::from("b"),
        );
        assert_eq!(replace, vec![AttributePath::new("project_id")]);
    }
}
