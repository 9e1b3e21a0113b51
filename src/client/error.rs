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

use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("invalid endpoint `{endpoint}`: {source}")]
    Endpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },

    #[error("endpoint `{0}` cannot be used as a base URL")]
    BaseUrl(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{method} {url}: status {code}, {message}")]
    Status {
        method: reqwest::Method,
        url: String,
        code: u16,
        message: String,
    },

    #[error("cannot decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("timeout after {0:?}")]
    Timeout(Duration),

    #[error("{0}")]
    Failed(String),
}

impl ApiError {
    /// HTTP status code of the response, if the error comes from one
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// The resource does not exist (anymore)
    pub fn is_not_found(&self) -> bool {
        matches!(self.status(), Some(404) | Some(410))
    }
}

pub type Result<T, E = ApiError> = std::result::Result<T, E>;
