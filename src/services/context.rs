use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::{AppError, AppResult};

/// Cancellation and deadline carried through one search call
///
/// Every outbound page fetch is run under the context, so cancelling the token
/// or passing the deadline aborts the in-flight request and fails the call.
#[derive(Debug, Clone, Default)]
pub struct SearchContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl SearchContext {
    /// A context that is never cancelled and has no deadline
    pub fn background() -> Self {
        Self::default()
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: Some(deadline),
        }
    }

    /// Uses an externally owned token, e.g. one cancelled on client disconnect
    pub fn with_token(token: CancellationToken) -> Self {
        Self {
            token,
            deadline: None,
        }
    }

    /// Derives a context that is cancelled with this one and keeps the
    /// earlier of the two deadlines.
    pub fn child_with_timeout(&self, timeout: Duration) -> Self {
        let deadline = Instant::now() + timeout;
        Self {
            token: self.token.child_token(),
            deadline: Some(match self.deadline {
                Some(existing) => existing.min(deadline),
                None => deadline,
            }),
        }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Fails if the context is already cancelled or past its deadline
    pub fn check(&self) -> AppResult<()> {
        if self.token.is_cancelled() {
            return Err(AppError::Cancelled);
        }
        match self.deadline {
            Some(deadline) if deadline <= Instant::now() => Err(AppError::DeadlineExceeded),
            _ => Ok(()),
        }
    }

    /// Runs `fut` until it completes, the token is cancelled or the deadline
    /// passes, whichever comes first. The losing future is dropped.
    pub async fn run<F, T>(&self, fut: F) -> AppResult<T>
    where
        F: Future<Output = AppResult<T>>,
    {
        self.check()?;

        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(AppError::Cancelled),
            _ = sleep_until(self.deadline) => Err(AppError::DeadlineExceeded),
            result = fut => result,
        }
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
