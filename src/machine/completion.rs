//! Single-shot completion channel for a dispatched transition.

use super::error::TransitionError;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot;

pub(crate) type CompletionSender = oneshot::Sender<Result<(), TransitionError>>;

/// Future resolving to the outcome of a call to `Machine::to`.
///
/// The outcome is only observable by polling, so it can never be seen inside
/// the `to` call that produced it, even when the action finished before `to`
/// returned. Dropping a `Completion` discards the outcome; the transition
/// itself is unaffected.
#[must_use = "a dropped Completion discards the transition's outcome"]
#[derive(Debug)]
pub struct Completion {
    rx: oneshot::Receiver<Result<(), TransitionError>>,
    from: String,
    to: String,
}

impl Completion {
    pub(crate) fn channel(from: &str, to: &str) -> (CompletionSender, Self) {
        let (tx, rx) = oneshot::channel();
        let completion = Self {
            rx,
            from: from.to_string(),
            to: to.to_string(),
        };
        (tx, completion)
    }

    /// A completion whose outcome is already decided.
    pub(crate) fn resolved(from: &str, to: &str, result: Result<(), TransitionError>) -> Self {
        let (tx, completion) = Self::channel(from, to);
        let _ = tx.send(result);
        completion
    }

    /// Origin of the requested move.
    pub fn from(&self) -> &str {
        &self.from
    }

    /// Destination of the requested move.
    pub fn to(&self) -> &str {
        &self.to
    }
}

impl Future for Completion {
    type Output = Result<(), TransitionError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        match Pin::new(&mut this.rx).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(_)) => Poll::Ready(Err(TransitionError::Abandoned {
                from: this.from.clone(),
                to: this.to.clone(),
            })),
            Poll::Pending => Poll::Pending,
        }
    }
}
