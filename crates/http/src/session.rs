//! Proactive session renewal
//!
//! The controller renews the access token shortly before it expires, so
//! that expiry is rarely discovered through a failed request. Timer ticks
//! and focus events both call [`SessionController::check`]; overlapping
//! checks collapse onto the client's single in-flight refresh.

use crate::client::ApiClient;
use std::time::Duration;
use tracing::{debug, warn};

/// What prompted a session check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckTrigger {
    Timer,
    /// The user came back to the application
    Focus,
}

/// Result of one session check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCheck {
    /// No session to keep alive
    Idle,
    /// Token is not yet inside the refresh window
    NotDue,
    Refreshed,
    /// Refresh failed; credentials have been cleared
    Terminated,
}

#[derive(Clone)]
pub struct SessionController {
    client: ApiClient,
    interval: Duration,
}

impl SessionController {
    pub fn new(client: ApiClient, interval: Duration) -> Self {
        Self { client, interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Refresh if the stored token is within the lead window of expiry
    pub async fn check(&self, trigger: CheckTrigger) -> SessionCheck {
        let tokens = self.client.tokens();
        if !tokens.is_authenticated() {
            return SessionCheck::Idle;
        }
        if !tokens.should_refresh() {
            return SessionCheck::NotDue;
        }

        debug!(?trigger, "Access token is close to expiry");
        match self.client.refresh_session().await {
            Ok(_) => SessionCheck::Refreshed,
            Err(err) => {
                warn!(?trigger, "Session terminated during proactive refresh: {err}");
                SessionCheck::Terminated
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use timer::SessionTimer;

#[cfg(not(target_arch = "wasm32"))]
mod timer {
    use super::{CheckTrigger, SessionCheck, SessionController};
    use tokio::task::JoinHandle;
    use tokio::time::{MissedTickBehavior, interval};
    use tracing::info;

    /// Background task running timer-triggered checks; aborted on drop
    pub struct SessionTimer {
        handle: Option<JoinHandle<()>>,
    }

    impl SessionController {
        /// Run timer checks on the current tokio runtime until the session
        /// ends or the returned handle is dropped
        pub fn spawn(&self) -> SessionTimer {
            let controller = self.clone();
            let handle = tokio::spawn(async move {
                let mut ticker = interval(controller.interval);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                loop {
                    ticker.tick().await;
                    match controller.check(CheckTrigger::Timer).await {
                        SessionCheck::Terminated | SessionCheck::Idle => {
                            info!("Session ended, stopping session timer");
                            break;
                        }
                        SessionCheck::NotDue | SessionCheck::Refreshed => {}
                    }
                }
            });
            SessionTimer {
                handle: Some(handle),
            }
        }
    }

    impl SessionTimer {
        /// Wait for the timer to stop on its own
        pub async fn finished(mut self) {
            if let Some(handle) = self.handle.take() {
                let _ = handle.await;
            }
        }

        pub fn is_finished(&self) -> bool {
            self.handle.as_ref().is_none_or(JoinHandle::is_finished)
        }
    }

    impl Drop for SessionTimer {
        fn drop(&mut self) {
            if let Some(handle) = self.handle.take() {
                handle.abort();
            }
        }
    }
}
