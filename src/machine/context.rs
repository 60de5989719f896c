//! The move a controller is responsible for.

use crate::core::State;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Origin and destination of a dispatched transition, and when it started.
#[derive(Clone, Debug)]
pub struct TransitionContext<S: State> {
    pub from: S,
    pub to: S,
    pub started_at: DateTime<Utc>,
}

impl<S: State> TransitionContext<S> {
    pub(crate) fn begin(from: S, to: S) -> Self {
        Self {
            from,
            to,
            started_at: Utc::now(),
        }
    }

    /// Time since the action was invoked.
    pub fn elapsed(&self) -> Duration {
        Utc::now()
            .signed_duration_since(self.started_at)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }
}
