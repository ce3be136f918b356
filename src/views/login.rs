//! Login View

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::user;
use crate::context::AppContext;
use crate::error::ApiError;
use crate::route::{Route, StudioTab};
use crate::store::{use_app_store, AppStateStoreFields};

/// Client-side check before the request goes out
pub fn credentials_error(email: &str, password: &str) -> Option<&'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        Some("Enter your email and password")
    } else if !email.contains('@') {
        Some("That does not look like an email address")
    } else {
        None
    }
}

/// A 401 here means bad credentials, not an expired session
pub fn login_failure_message(err: &ApiError) -> String {
    match err {
        ApiError::Unauthorized => "Invalid email or password".to_string(),
        other => other.to_string(),
    }
}

#[component]
pub fn LoginView() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (form_error, set_form_error) = signal::<Option<String>>(None);
    let (busy, set_busy) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let email = email.get_untracked();
        let password = password.get_untracked();
        if let Some(msg) = credentials_error(&email, &password) {
            set_form_error.set(Some(msg.to_string()));
            return;
        }
        set_form_error.set(None);
        set_busy.set(true);
        spawn_local(async move {
            match user::login(email.trim(), &password).await {
                Ok(response) => {
                    log::info!("[LOGIN] Signed in");
                    store.user().set(response.user);
                    set_password.set(String::new());
                    ctx.clear_error();
                    ctx.navigate(Route::Studio(StudioTab::default()));
                    ctx.reload();
                }
                Err(e) => {
                    log::warn!("[LOGIN] Sign-in failed: {}", e);
                    set_form_error.set(Some(login_failure_message(&e)));
                }
            }
            set_busy.set(false);
        });
    };

    view! {
        <section class="login">
            <form class="login-form card" on:submit=on_submit>
                <h1>"Sign in"</h1>
                <input
                    type="email"
                    placeholder="Email"
                    autocomplete="username"
                    prop:value=move || email.get()
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                />
                <input
                    type="password"
                    placeholder="Password"
                    autocomplete="current-password"
                    prop:value=move || password.get()
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                />
                {move || form_error.get().map(|msg| view! { <div class="inline-error">{msg}</div> })}
                <button type="submit" class="primary-btn" disabled=move || busy.get()>
                    {move || if busy.get() { "Signing in..." } else { "Sign in" }}
                </button>
            </form>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_error() {
        assert!(credentials_error("", "pw").is_some());
        assert!(credentials_error("ann@example.com", "").is_some());
        assert!(credentials_error("ann", "pw").is_some());
        assert_eq!(credentials_error(" ann@example.com ", "pw"), None);
    }

    #[test]
    fn test_rejected_credentials_message() {
        let rejected = ApiError::from_status(401, r#"{"message":"Unauthenticated."}"#);
        assert_eq!(login_failure_message(&rejected), "Invalid email or password");
        assert_eq!(
            login_failure_message(&ApiError::Network("offline".to_string())),
            "Network error: offline"
        );
    }
}
