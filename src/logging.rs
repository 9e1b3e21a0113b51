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

//! Logging setup
//!
//! When Terraform asks the plugin framework to log into `PLUGIN_LOG_FILE`, the framework
//! installs its own subscriber and nothing is done here.
//! Otherwise, events are written to stderr, which Terraform forwards to its own log.

use std::env;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding the log filter of the provider
pub const LOG_ENV: &str = "TF_LOG_PROVIDER_STACKIT";

const DEFAULT_FILTER: &str = "terraform_provider_stackit=info";

/// Build the filter from [`LOG_ENV`], falling back to `RUST_LOG`, then to `info`
pub fn filter() -> EnvFilter {
    env::var(LOG_ENV)
        .ok()
        .and_then(|directives| EnvFilter::try_new(directives.to_lowercase()).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the stderr subscriber, unless the plugin framework handles logging itself
pub fn init() {
    if env::var_os("PLUGIN_LOG_FILE").is_some() {
        return;
    }

    // Terraform prefixes every line itself, so keep the output compact
    _ = tracing_subscriber::registry()
        .with(filter())
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .with_target(false)
                .compact(),
        )
        .try_init();
}
