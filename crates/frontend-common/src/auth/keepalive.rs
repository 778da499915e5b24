//! Browser triggers for proactive session renewal

use crate::client::api_client;
use crate::config::AuthConfig;
use evcharge_http::{CheckTrigger, SessionController};
use gloo::events::EventListener;
use gloo::timers::callback::Interval;
use gloo::utils::{document, window};
use std::rc::Rc;
use std::time::Duration;
use tracing::{debug, error};
use yew::prelude::*;

/// Listeners and timer kept alive while a session exists
struct Triggers {
    _interval: Interval,
    _focus: EventListener,
    _visibility: EventListener,
}

/// Check the session on a timer and whenever the user comes back to the tab.
///
/// Every trigger goes through [`SessionController::check`], so overlapping
/// triggers join the same refresh instead of issuing their own.
#[hook]
pub fn use_session_keepalive(active: bool) {
    use_effect_with(active, move |active| {
        let triggers = if *active { install() } else { None };
        move || drop(triggers)
    });
}

fn install() -> Option<Triggers> {
    let client = match api_client() {
        Ok(client) => client,
        Err(err) => {
            error!("Session keepalive unavailable: {err}");
            return None;
        }
    };

    let interval_ms = AuthConfig::session_check_interval_ms();
    let controller = SessionController::new(client, Duration::from_millis(interval_ms.into()));
    let run: Rc<dyn Fn(CheckTrigger)> = Rc::new(move |trigger| {
        let controller = controller.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let outcome = controller.check(trigger).await;
            debug!(?trigger, ?outcome, "Session check");
        });
    });

    // A restored session may already be close to expiry
    run(CheckTrigger::Timer);

    let interval = {
        let run = run.clone();
        Interval::new(interval_ms, move || run(CheckTrigger::Timer))
    };
    let focus = {
        let run = run.clone();
        EventListener::new(&window(), "focus", move |_| run(CheckTrigger::Focus))
    };
    let visibility = EventListener::new(&document(), "visibilitychange", move |_| {
        if !document().hidden() {
            run(CheckTrigger::Focus);
        }
    });

    Some(Triggers {
        _interval: interval,
        _focus: focus,
        _visibility: visibility,
    })
}
