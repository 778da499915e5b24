//! Single-flight coordination of token refreshes
//!
//! The first caller to [`RefreshCoordinator::join`] becomes the leader and
//! performs the refresh; everyone arriving while the flag is set gets a
//! receiver instead. Flag reset and waiter drain happen under one lock, and
//! the lock is never held across an await.

use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use tokio::sync::oneshot;
use tracing::debug;

/// Why an in-flight refresh did not produce a token
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct RefreshFailure(pub String);

impl RefreshFailure {
    fn abandoned() -> Self {
        Self("Token refresh was abandoned before it completed".to_string())
    }
}

/// New access token, or the shared failure
pub type RefreshOutcome = Result<String, RefreshFailure>;

#[derive(Default)]
struct PendingRefresh {
    in_progress: bool,
    waiters: Vec<oneshot::Sender<RefreshOutcome>>,
}

#[derive(Clone, Default)]
pub struct RefreshCoordinator {
    state: Arc<Mutex<PendingRefresh>>,
}

/// Role handed out by [`RefreshCoordinator::join`]
pub enum RefreshTicket {
    /// Perform the refresh and settle the guard
    Leader(LeaderGuard),
    /// Wait for the leader's outcome
    Follower(Waiter),
}

impl RefreshCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Become the leader, or enqueue behind the refresh already in flight
    pub fn join(&self) -> RefreshTicket {
        let mut state = self.lock();
        if state.in_progress {
            let (tx, rx) = oneshot::channel();
            state.waiters.push(tx);
            debug!(waiting = state.waiters.len(), "Queued behind in-flight refresh");
            RefreshTicket::Follower(Waiter { rx })
        } else {
            state.in_progress = true;
            RefreshTicket::Leader(LeaderGuard {
                coordinator: self.clone(),
                settled: false,
            })
        }
    }

    pub fn is_refreshing(&self) -> bool {
        self.lock().in_progress
    }

    pub fn waiting(&self) -> usize {
        self.lock().waiters.len()
    }

    fn settle(&self, outcome: &RefreshOutcome) {
        let waiters = {
            let mut state = self.lock();
            state.in_progress = false;
            std::mem::take(&mut state.waiters)
        };
        debug!(
            waiters = waiters.len(),
            success = outcome.is_ok(),
            "Refresh settled"
        );
        for waiter in waiters {
            // A waiter whose caller went away is simply skipped
            let _ = waiter.send(outcome.clone());
        }
    }

    fn lock(&self) -> MutexGuard<'_, PendingRefresh> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Held by the caller performing the refresh.
///
/// Dropping it unsettled rejects every waiter, so a cancelled leader never
/// leaves the flag stuck.
pub struct LeaderGuard {
    coordinator: RefreshCoordinator,
    settled: bool,
}

impl LeaderGuard {
    pub fn settle(mut self, outcome: RefreshOutcome) -> RefreshOutcome {
        self.settled = true;
        self.coordinator.settle(&outcome);
        outcome
    }
}

impl Drop for LeaderGuard {
    fn drop(&mut self) {
        if !self.settled {
            self.coordinator.settle(&Err(RefreshFailure::abandoned()));
        }
    }
}

pub struct Waiter {
    rx: oneshot::Receiver<RefreshOutcome>,
}

impl Waiter {
    pub async fn outcome(self) -> RefreshOutcome {
        self.rx
            .await
            .unwrap_or_else(|_| Err(RefreshFailure::abandoned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leader(ticket: RefreshTicket) -> LeaderGuard {
        match ticket {
            RefreshTicket::Leader(guard) => guard,
            RefreshTicket::Follower(_) => panic!("expected to lead the refresh"),
        }
    }

    fn follower(ticket: RefreshTicket) -> Waiter {
        match ticket {
            RefreshTicket::Follower(waiter) => waiter,
            RefreshTicket::Leader(_) => panic!("expected to follow the refresh"),
        }
    }

    #[tokio::test]
    async fn test_followers_receive_leader_token() {
        let coordinator = RefreshCoordinator::new();
        let guard = leader(coordinator.join());
        let first = follower(coordinator.join());
        let second = follower(coordinator.join());
        assert!(coordinator.is_refreshing());
        assert_eq!(coordinator.waiting(), 2);

        let outcome = guard.settle(Ok("new-token".to_string()));

        assert_eq!(outcome, Ok("new-token".to_string()));
        assert_eq!(first.outcome().await, Ok("new-token".to_string()));
        assert_eq!(second.outcome().await, Ok("new-token".to_string()));
        assert!(!coordinator.is_refreshing());
        assert_eq!(coordinator.waiting(), 0);
    }

    #[tokio::test]
    async fn test_failure_fans_out() {
        let coordinator = RefreshCoordinator::new();
        let guard = leader(coordinator.join());
        let waiter = follower(coordinator.join());

        guard.settle(Err(RefreshFailure("refresh token revoked".to_string())));

        assert_eq!(
            waiter.outcome().await,
            Err(RefreshFailure("refresh token revoked".to_string()))
        );
    }

    #[tokio::test]
    async fn test_next_join_after_settle_leads_again() {
        let coordinator = RefreshCoordinator::new();
        leader(coordinator.join()).settle(Ok("one".to_string())).unwrap();

        let _guard = leader(coordinator.join());
        assert!(coordinator.is_refreshing());
    }

    #[tokio::test]
    async fn test_dropped_leader_rejects_waiters() {
        let coordinator = RefreshCoordinator::new();
        let guard = leader(coordinator.join());
        let waiter = follower(coordinator.join());

        drop(guard);

        assert!(waiter.outcome().await.is_err());
        assert!(!coordinator.is_refreshing());
    }
}
