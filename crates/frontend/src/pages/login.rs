//! Login forms for both audiences

use crate::forms::input_value;
use evcharge_core::Audience;
use evcharge_frontend_common::auth::AuthAction;
use evcharge_frontend_common::{Alert, AlertKind, Route, api_client, describe_error, use_auth};
use evcharge_http::ClientError;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq)]
pub struct LoginProps {
    pub audience: Audience,
}

fn login_failure(err: &ClientError) -> String {
    match err {
        ClientError::AuthenticationFailed(_) | ClientError::Rejected(_) => {
            "Invalid username or password".to_string()
        }
        other => describe_error(other).unwrap_or_else(|| other.to_string()),
    }
}

/// Sign-in form. Once signed in the guards move the user to their landing page.
#[function_component(LoginPage)]
pub fn login_page(props: &LoginProps) -> Html {
    let auth = use_auth();
    let username = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| Option::<String>::None);
    let is_submitting = use_state(|| false);

    let (heading, username_label, switch_to, switch_label) = match props.audience {
        Audience::Staff => (
            "Back Office Sign In",
            "Username",
            Route::PortalLogin,
            "EV owner? Sign in to the portal",
        ),
        Audience::Portal => (
            "EV Owner Portal",
            "NIC",
            Route::StaffLogin,
            "Staff member? Sign in to the console",
        ),
    };

    let on_username = {
        let username = username.clone();
        Callback::from(move |e: InputEvent| username.set(input_value(&e)))
    };
    let on_password = {
        let password = password.clone();
        Callback::from(move |e: InputEvent| password.set(input_value(&e)))
    };

    let onsubmit = {
        let username = username.clone();
        let password = password.clone();
        let error = error.clone();
        let is_submitting = is_submitting.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if username.trim().is_empty() || password.is_empty() {
                error.set(Some("Enter your credentials".to_string()));
                return;
            }

            let username = username.trim().to_string();
            let password = (*password).clone();
            let error = error.clone();
            let is_submitting = is_submitting.clone();
            is_submitting.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                let result = match api_client() {
                    Ok(client) => client.login(username, password).await.map(|_| ()),
                    Err(err) => Err(err),
                };
                if let Err(err) = result {
                    error.set(Some(login_failure(&err)));
                }
                is_submitting.set(false);
            });
        })
    };

    let dismiss_notice = {
        let auth = auth.clone();
        Callback::from(move |()| auth.dispatch(AuthAction::DismissNotice))
    };

    html! {
        <div class="min-h-screen bg-gray-50 flex items-center justify-center px-4">
            <div class="max-w-md w-full bg-white rounded-lg shadow-lg p-8">
                <h1 class="text-2xl font-bold text-center text-emerald-600 mb-6">{heading}</h1>

                <Alert kind={AlertKind::Info} message={auth.notice.clone()} on_dismiss={dismiss_notice} />
                <Alert kind={AlertKind::Error} message={(*error).clone()} />

                <form {onsubmit} class="space-y-4">
                    <label class="block">
                        <span class="text-sm text-gray-700">{username_label}</span>
                        <input type="text" value={(*username).clone()} oninput={on_username}
                            autocomplete="username" class="mt-1 w-full border rounded px-3 py-2" />
                    </label>
                    <label class="block">
                        <span class="text-sm text-gray-700">{"Password"}</span>
                        <input type="password" value={(*password).clone()} oninput={on_password}
                            autocomplete="current-password" class="mt-1 w-full border rounded px-3 py-2" />
                    </label>
                    <button type="submit" disabled={*is_submitting}
                        class="w-full bg-emerald-600 hover:bg-emerald-700 disabled:bg-gray-400 text-white font-medium py-2 rounded">
                        { if *is_submitting { "Signing in..." } else { "Sign In" } }
                    </button>
                </form>

                <div class="mt-6 text-center">
                    <Link<Route> to={switch_to} classes="text-sm text-gray-600 hover:text-gray-900">{switch_label}</Link<Route>>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_credentials_get_a_generic_message() {
        let err = ClientError::AuthenticationFailed("user nimal not found".into());
        assert_eq!(login_failure(&err), "Invalid username or password");
    }

    #[test]
    fn test_server_errors_are_reported() {
        let err = ClientError::ServerError {
            status: 502,
            message: "bad gateway".into(),
        };
        assert_eq!(login_failure(&err), "Server error 502: bad gateway");
    }
}
