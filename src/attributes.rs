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

//! Shorthands to declare schema attributes

use std::collections::HashMap;

use tf_provider::schema::{Attribute, AttributeConstraint, AttributeType, Description};

pub(crate) fn attribute(
    attr_type: AttributeType,
    constraint: AttributeConstraint,
    description: &str,
) -> Attribute {
    Attribute {
        attr_type,
        description: Description::plain(description),
        constraint,
        ..Default::default()
    }
}

pub(crate) fn string(constraint: AttributeConstraint, description: &str) -> Attribute {
    attribute(AttributeType::String, constraint, description)
}

pub(crate) fn number(constraint: AttributeConstraint, description: &str) -> Attribute {
    attribute(AttributeType::Number, constraint, description)
}

pub(crate) fn boolean(constraint: AttributeConstraint, description: &str) -> Attribute {
    attribute(AttributeType::Bool, constraint, description)
}

pub(crate) fn string_list(constraint: AttributeConstraint, description: &str) -> Attribute {
    attribute(
        AttributeType::List(AttributeType::String.into()),
        constraint,
        description,
    )
}

pub(crate) fn string_map(constraint: AttributeConstraint, description: &str) -> Attribute {
    attribute(
        AttributeType::Map(AttributeType::String.into()),
        constraint,
        description,
    )
}

pub(crate) fn object(
    attributes: HashMap<String, Attribute>,
    constraint: AttributeConstraint,
    description: &str,
) -> Attribute {
    attribute(
        AttributeType::AttributeSingle(attributes),
        constraint,
        description,
    )
}

pub(crate) fn sensitive(attribute: Attribute) -> Attribute {
    Attribute {
        sensitive: true,
        ..attribute
    }
}

/// Same attributes, all of them computed
///
/// Data sources expose the attributes of the resource as read-only outputs.
pub(crate) fn computed(attributes: HashMap<String, Attribute>) -> HashMap<String, Attribute> {
    attributes
        .into_iter()
        .map(|(name, attribute)| {
            let attr_type = match attribute.attr_type {
                AttributeType::AttributeSingle(nested) => {
                    AttributeType::AttributeSingle(computed(nested))
                }
                attr_type => attr_type,
            };
            (
                name,
                Attribute {
                    attr_type,
                    constraint: AttributeConstraint::Computed,
                    ..attribute
                },
            )
        })
        .collect()
}
