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

use httpmock::MockServer;
use terraform_provider_stackit::{ProviderData, ProviderHandle};

pub const TOKEN: &str = "test-token";
pub const PROJECT_ID: &str = "11111111-2222-3333-4444-555555555555";

/// Provider handle whose every service points to the mock server
pub fn provider(server: &MockServer) -> ProviderHandle {
    ProviderHandle::configured(ProviderData {
        token: TOKEN.to_owned(),
        region: "eu01".to_owned(),
        dns_endpoint: server.base_url(),
        argus_endpoint: server.base_url(),
        postgresql_endpoint: server.base_url(),
        rabbitmq_endpoint: server.base_url(),
        http: reqwest::Client::new(),
    })
}

pub fn bearer() -> String {
    format!("Bearer {TOKEN}")
}
