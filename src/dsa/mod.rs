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

//! Data service API (DSA) shared by the STACKIT managed data services
//!
//! PostgreSQL and RabbitMQ expose the same instance and credentials API and only
//! differ by their endpoint and by the parameters of their instances. The resources
//! are written once, generic over a [`DsaService`].

pub mod api;
pub mod credentials;
pub mod instance;

use std::{
    borrow::Cow,
    collections::{BTreeMap, HashMap},
    fmt::Debug,
};

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value as Json;
use tf_provider::{
    schema::Attribute,
    value::{Value, ValueBool, ValueList, ValueNumber, ValueString},
    Diagnostics,
};

pub use credentials::{CredentialsDataSource, CredentialsResource};
pub use instance::{InstanceDataSource, InstanceResource};

use crate::common::{ProviderData, ProviderHandle};
use api::DsaApi;

/// Parameters of an instance, as sent to and received from the API
pub type JsonParameters = BTreeMap<String, Json>;

/// A managed data service exposed through the data service API
pub trait DsaService:
    Debug + Clone + Copy + PartialEq + Eq + Default + Send + Sync + 'static
{
    /// Name used in resource type names (`stackit_<NAME>_instance`)
    const NAME: &'static str;
    /// Name used in descriptions and logs
    const DISPLAY_NAME: &'static str;

    /// Terraform representation of the instance parameters
    type Parameters: Serialize
        + DeserializeOwned
        + Debug
        + Clone
        + PartialEq
        + Eq
        + Default
        + Send
        + Sync
        + 'static;

    fn endpoint(data: &ProviderData) -> &str;

    /// Attributes of the nested `parameters` object
    fn parameters_schema() -> HashMap<String, Attribute>;

    fn validate_parameters(_diags: &mut Diagnostics, _parameters: &Self::Parameters) {}

    /// Plan the parameters left unset on create as unknown, the API fills in its defaults
    fn plan_parameters(parameters: &mut Self::Parameters);

    /// Known parameters, keyed as the API expects them
    fn parameters_payload(parameters: &Self::Parameters) -> JsonParameters;

    fn map_parameters(parameters: &JsonParameters) -> Self::Parameters;
}

pub(crate) async fn dsa_api<S: DsaService>(
    provider: &ProviderHandle,
    diags: &mut Diagnostics,
) -> Option<DsaApi> {
    provider
        .client(diags, |data| S::endpoint(data))
        .await
        .map(DsaApi::new)
}

pub(crate) fn insert_string(payload: &mut JsonParameters, key: &str, value: &ValueString<'_>) {
    if let Some(value) = value.as_deref_option() {
        payload.insert(key.to_owned(), Json::from(value));
    }
}

pub(crate) fn insert_bool(payload: &mut JsonParameters, key: &str, value: &ValueBool) {
    if let Some(value) = value.as_ref_option() {
        payload.insert(key.to_owned(), Json::from(*value));
    }
}

pub(crate) fn insert_number(payload: &mut JsonParameters, key: &str, value: &ValueNumber) {
    if let Some(value) = value.as_ref_option() {
        payload.insert(key.to_owned(), Json::from(*value));
    }
}

pub(crate) fn insert_strings(
    payload: &mut JsonParameters,
    key: &str,
    value: &ValueList<ValueString<'_>>,
) {
    if let Some(values) = value.as_ref_option() {
        let values = values
            .iter()
            .filter_map(|value| value.as_deref_option().map(Json::from))
            .collect::<Vec<_>>();
        payload.insert(key.to_owned(), Json::Array(values));
    }
}

pub(crate) fn string_param(parameters: &JsonParameters, key: &str) -> ValueString<'static> {
    Value::from(
        parameters
            .get(key)
            .and_then(Json::as_str)
            .map(|s| Cow::from(s.to_owned())),
    )
}

pub(crate) fn bool_param(parameters: &JsonParameters, key: &str) -> ValueBool {
    Value::from(parameters.get(key).and_then(Json::as_bool))
}

/// Numbers are sometimes reported as strings
pub(crate) fn number_param(parameters: &JsonParameters, key: &str) -> ValueNumber {
    Value::from(parameters.get(key).and_then(|value| match value {
        Json::String(s) => s.parse().ok(),
        value => value.as_i64(),
    }))
}

pub(crate) fn strings_param(
    parameters: &JsonParameters,
    key: &str,
) -> ValueList<ValueString<'static>> {
    Value::from(parameters.get(key).and_then(Json::as_array).map(|values| {
        values
            .iter()
            .filter_map(Json::as_str)
            .map(|s| Value::Value(Cow::from(s.to_owned())))
            .collect()
    }))
}
