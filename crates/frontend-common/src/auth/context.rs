//! Global authentication context and provider

use super::keepalive::use_session_keepalive;
use crate::client::api_client;
use crate::config::AuthConfig;
use evcharge_core::{SessionView, UserProfile};
use evcharge_http::SessionEvent;
use std::cell::Cell;
use std::rc::Rc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{error, warn};
use yew::prelude::*;

/// Authentication state
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthState {
    pub session: SessionView,
    /// Message for the login page, set when the session ended on its own
    pub notice: Option<String>,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            // Guards wait until the token store has been read
            session: SessionView::Loading,
            notice: None,
        }
    }
}

/// Authentication context actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthAction {
    /// Result of reading the token store at startup
    Restored(Option<UserProfile>),
    SignedIn(UserProfile),
    Expired,
    SignedOut,
    DismissNotice,
}

impl AuthAction {
    /// State change implied by a client session event, if any
    pub fn from_event(event: SessionEvent) -> Option<Self> {
        match event {
            SessionEvent::LoggedIn(user) => Some(Self::SignedIn(user)),
            SessionEvent::Refreshed { .. } => None,
            SessionEvent::Terminated { .. } => Some(Self::Expired),
            SessionEvent::LoggedOut => Some(Self::SignedOut),
        }
    }
}

/// Authentication context
pub type AuthContext = UseReducerHandle<AuthState>;

impl Reducible for AuthState {
    type Action = AuthAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            AuthAction::Restored(user) => Rc::new(Self {
                session: user.map_or(SessionView::Anonymous, SessionView::Authenticated),
                notice: self.notice.clone(),
            }),
            AuthAction::SignedIn(user) => Rc::new(Self {
                session: SessionView::Authenticated(user),
                notice: None,
            }),
            AuthAction::Expired => Rc::new(Self {
                session: SessionView::Anonymous,
                notice: Some(AuthConfig::SESSION_EXPIRED_NOTICE.to_string()),
            }),
            AuthAction::SignedOut => Rc::new(Self {
                session: SessionView::Anonymous,
                notice: None,
            }),
            AuthAction::DismissNotice => Rc::new(Self {
                notice: None,
                ..(*self).clone()
            }),
        }
    }
}

/// Auth provider props
#[derive(Properties, PartialEq)]
pub struct AuthProviderProps {
    pub children: Children,
}

/// Auth provider component
#[function_component(AuthProvider)]
pub fn auth_provider(props: &AuthProviderProps) -> Html {
    let auth_state = use_reducer(AuthState::default);

    // Resolve the session from storage on mount
    {
        let auth_state = auth_state.clone();
        use_effect_with((), move |_| {
            let user = match api_client() {
                Ok(client) => client.tokens().restore().map(|record| record.user),
                Err(err) => {
                    error!("Failed to create API client: {err}");
                    None
                }
            };
            auth_state.dispatch(AuthAction::Restored(user));
        });
    }

    // Follow login, logout and termination from anywhere in the app
    {
        let auth_state = auth_state.clone();
        use_effect_with((), move |_| {
            let mounted = Rc::new(Cell::new(true));
            if let Ok(client) = api_client() {
                let mut events = client.subscribe();
                let mounted = mounted.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    loop {
                        match events.recv().await {
                            Ok(event) => {
                                if !mounted.get() {
                                    break;
                                }
                                if let Some(action) = AuthAction::from_event(event) {
                                    auth_state.dispatch(action);
                                }
                            }
                            Err(RecvError::Lagged(skipped)) => {
                                warn!(skipped, "Missed session events");
                            }
                            Err(RecvError::Closed) => break,
                        }
                    }
                });
            }

            move || mounted.set(false)
        });
    }

    use_session_keepalive(auth_state.session.is_authenticated());

    html! {
        <ContextProvider<AuthContext> context={auth_state}>
            {props.children.clone()}
        </ContextProvider<AuthContext>>
    }
}

/// Hook to use auth context
#[hook]
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>()
        .expect("AuthContext not found. Make sure to wrap your component with AuthProvider")
}

/// Signed-in profile, if any
#[hook]
pub fn use_current_user() -> Option<UserProfile> {
    let auth = use_auth();
    auth.session.user().cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use evcharge_core::Role;

    fn owner() -> UserProfile {
        UserProfile {
            id: "199012345678".into(),
            name: "Kumari Silva".into(),
            email: None,
            role: Role::EvOwner,
        }
    }

    fn reduce(state: AuthState, action: AuthAction) -> AuthState {
        Rc::new(state).reduce(action).as_ref().clone()
    }

    #[test]
    fn test_starts_loading() {
        assert_eq!(AuthState::default().session, SessionView::Loading);
    }

    #[test]
    fn test_restore_resolves_loading() {
        let state = reduce(AuthState::default(), AuthAction::Restored(None));
        assert_eq!(state.session, SessionView::Anonymous);

        let state = reduce(AuthState::default(), AuthAction::Restored(Some(owner())));
        assert_eq!(state.session, SessionView::Authenticated(owner()));
    }

    #[test]
    fn test_expiry_leaves_a_notice_until_next_sign_in() {
        let signed_in = reduce(AuthState::default(), AuthAction::SignedIn(owner()));
        let expired = reduce(signed_in, AuthAction::Expired);

        assert_eq!(expired.session, SessionView::Anonymous);
        assert_eq!(
            expired.notice.as_deref(),
            Some(AuthConfig::SESSION_EXPIRED_NOTICE)
        );

        let again = reduce(expired, AuthAction::SignedIn(owner()));
        assert_eq!(again.notice, None);
    }

    #[test]
    fn test_sign_out_has_no_notice() {
        let signed_in = reduce(AuthState::default(), AuthAction::SignedIn(owner()));
        let state = reduce(signed_in, AuthAction::SignedOut);
        assert_eq!(state.session, SessionView::Anonymous);
        assert_eq!(state.notice, None);
    }

    #[test]
    fn test_refresh_event_changes_nothing() {
        let event = SessionEvent::Refreshed {
            expires_at: "2030-01-01T00:00:00Z".parse().unwrap(),
        };
        assert_eq!(AuthAction::from_event(event), None);
        assert_eq!(
            AuthAction::from_event(SessionEvent::Terminated {
                reason: "refresh rejected".into()
            }),
            Some(AuthAction::Expired)
        );
    }
}
