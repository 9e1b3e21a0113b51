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

//! STACKIT Argus monitoring

pub mod api;
pub mod instance;

use tf_provider::Diagnostics;

pub use instance::{InstanceDataSource, InstanceResource};

use crate::common::ProviderHandle;
use api::ArgusApi;

pub(crate) async fn argus_api(
    provider: &ProviderHandle,
    diags: &mut Diagnostics,
) -> Option<ArgusApi> {
    provider
        .client(diags, |data| &data.argus_endpoint)
        .await
        .map(ArgusApi::new)
}
