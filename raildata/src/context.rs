//! Per-call cancellation and deadlines.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::{RailDataError, Result};

/// Cancellation signal and optional deadline for one client operation.
///
/// Every network exchange performed on behalf of an operation races against
/// this context. Cancellation surfaces as [`RailDataError::Cancelled`] and an
/// elapsed deadline as [`RailDataError::DeadlineExceeded`]; neither triggers a
/// token refresh.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    cancel: CancellationToken,
    deadline: Option<Instant>,
}

impl RequestContext {
    /// A context that is never cancelled and has no deadline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an externally owned cancellation token.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Fail the operation once `deadline` has passed.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Fail the operation once `timeout` has elapsed from now.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// The cancellation token observed by this context.
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Fail fast if the context is already cancelled or past its deadline.
    pub fn check(&self, method: &'static str) -> Result<()> {
        if self.cancel.is_cancelled() {
            return Err(RailDataError::Cancelled { method });
        }
        if self.deadline.is_some_and(|d| Instant::now() >= d) {
            return Err(RailDataError::DeadlineExceeded { method });
        }
        Ok(())
    }

    /// Drive `fut` to completion unless the context fires first.
    ///
    /// When the context wins, `fut` is dropped, which aborts any in-flight
    /// HTTP exchange it owns.
    pub async fn run<T, F>(&self, method: &'static str, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        self.check(method)?;

        let deadline = async {
            match self.deadline {
                Some(d) => tokio::time::sleep_until(d).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(RailDataError::Cancelled { method }),
            _ = deadline => Err(RailDataError::DeadlineExceeded { method }),
            result = fut => result,
        }
    }
}
