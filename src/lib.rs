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

//! Terraform provider for STACKIT
//!
//! The provider exposes STACKIT services as Terraform resources and data sources:
//! DNS zones and record sets, Argus monitoring instances, and the PostgreSQL and
//! RabbitMQ data services (instances and credentials).
//!
//! Every resource follows the same shape: the plan is validated, turned into an API
//! payload, sent to the service, the asynchronous operation is awaited with a
//! [`WaitHandler`](client::wait::WaitHandler), and the response is mapped back onto
//! the Terraform state.

pub mod argus;
pub mod client;
pub mod common;
pub mod config;
pub mod dns;
pub mod dsa;
pub mod logging;
pub mod plan;
pub mod postgresql;
pub mod provider;
pub mod rabbitmq;
pub mod validate;

mod attributes;
mod utils;

pub use crate::common::{ProviderData, ProviderHandle};
pub use crate::provider::StackitProvider;
