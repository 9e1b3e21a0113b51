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

//! Polling of asynchronous operations
//!
//! Most STACKIT operations return before the work is done: the caller then polls the
//! resource until it reaches a terminal state.

use std::{future::Future, time::Duration};

use tracing::trace;

use super::{ApiError, Result};

/// Default delay between two polls
pub const DEFAULT_THROTTLE: Duration = Duration::from_secs(5);
/// Default overall timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Poll a check function until it reports completion
///
/// The check returns:
/// - `Ok(Some(value))` when the operation is finished,
/// - `Ok(None)` when the operation is still in progress,
/// - `Err(err)` when the operation failed (polling stops).
pub struct WaitHandler<F> {
    check: F,
    throttle: Duration,
    timeout: Duration,
}

impl<F> std::fmt::Debug for WaitHandler<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WaitHandler")
            .field("throttle", &self.throttle)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl<F, Fut, T> WaitHandler<F>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>>>,
{
    pub fn new(check: F) -> Self {
        Self {
            check,
            throttle: DEFAULT_THROTTLE,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn set_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn set_throttle(mut self, throttle: Duration) -> Self {
        self.throttle = throttle;
        self
    }

    /// Poll until the check completes, fails, or the timeout elapses
    pub async fn wait(self) -> Result<T> {
        let Self {
            mut check,
            throttle,
            timeout,
        } = self;

        let polling = async move {
            let mut attempt = 0u32;
            loop {
                attempt += 1;
                if let Some(value) = check().await? {
                    return Ok(value);
                }
                trace!(attempt, "operation still in progress");
                tokio::time::sleep(throttle).await;
            }
        };

        match tokio::time::timeout(timeout, polling).await {
            Ok(result) => result,
            Err(_) => Err(ApiError::Timeout(timeout)),
        }
    }
}

/// Kind of asynchronous operation waited for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl Operation {
    /// Lowercase name, as reported by `lastOperation.type`
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }

    /// Status reported once the operation succeeded (`CREATE_SUCCEEDED`, ...)
    pub fn succeeded(self) -> &'static str {
        match self {
            Operation::Create => "CREATE_SUCCEEDED",
            Operation::Update => "UPDATE_SUCCEEDED",
            Operation::Delete => "DELETE_SUCCEEDED",
        }
    }

    /// Status reported once the operation failed (`CREATE_FAILED`, ...)
    pub fn failed(self) -> &'static str {
        match self {
            Operation::Create => "CREATE_FAILED",
            Operation::Update => "UPDATE_FAILED",
            Operation::Delete => "DELETE_FAILED",
        }
    }

    /// Interpret an uppercase status
    ///
    /// Returns `Ok(true)` once succeeded, `Ok(false)` while pending, and an error if failed.
    pub fn check_status(self, status: Option<&str>, error: Option<&str>) -> Result<bool> {
        match status {
            Some(status) if status == self.succeeded() => Ok(true),
            Some(status) if status == self.failed() => Err(ApiError::Failed(match error {
                Some(error) if !error.is_empty() => format!("{} failed: {error}", self.as_str()),
                _ => format!("{} failed", self.as_str()),
            })),
            _ => Ok(false),
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicU32, Ordering},
        Arc,
    };

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn wait_until_done() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let result = WaitHandler::new(move || {
            let counter = counter.clone();
            async move {
                let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
                Ok(if n == 3 { Some(n) } else { None })
            }
        })
        .wait()
        .await
        .unwrap();

        assert_eq!(result, 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn wait_stops_on_error() {
        let result: Result<()> =
            WaitHandler::new(|| async { Err(ApiError::Failed("boom".to_owned())) })
                .wait()
                .await;
        assert!(matches!(result, Err(ApiError::Failed(msg)) if msg == "boom"));
    }

    #[tokio::test(start_paused = true)]
    async fn wait_times_out() {
        let start = tokio::time::Instant::now();
        let result: Result<()> = WaitHandler::new(|| async { Ok(None) })
            .set_timeout(Duration::from_secs(60))
            .set_throttle(Duration::from_secs(10))
            .wait()
            .await;
        assert!(matches!(result, Err(ApiError::Timeout(d)) if d == Duration::from_secs(60)));
        assert!(start.elapsed() >= Duration::from_secs(60));
    }

    #[test]
    fn status_interpretation() {
        let op = Operation::Create;
        assert!(op.check_status(Some("CREATE_SUCCEEDED"), None).unwrap());
        assert!(!op.check_status(Some("CREATING"), None).unwrap());
        assert!(!op.check_status(None, None).unwrap());
        assert!(!op.check_status(Some("UPDATE_SUCCEEDED"), None).unwrap());

        let err = Operation::Update
            .check_status(Some("UPDATE_FAILED"), Some("invalid record"))
            .unwrap_err();
        assert_eq!(err.to_string(), "update failed: invalid record");
    }
}
