//! Registration page with client-side validation mirroring the backend rules.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::state::session::SessionState;
#[cfg(feature = "hydrate")]
use crate::state::session::SessionStore;

fn validate_username(raw: &str) -> Result<String, &'static str> {
    let username = raw.trim();
    if username.len() < 3 || username.len() > 30 {
        return Err("Username must be 3-30 characters.");
    }
    if !username.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '_') {
        return Err("Username may only contain letters, numbers, and underscores.");
    }
    Ok(username.to_ascii_lowercase())
}

/// Coarse shape check; the backend owns real address validation.
fn validate_email(raw: &str) -> Result<String, &'static str> {
    let email = raw.trim().to_ascii_lowercase();
    let Some((local, domain)) = email.split_once('@') else {
        return Err("Enter a valid email address.");
    };
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err("Enter a valid email address.");
    }
    Ok(email)
}

fn validate_password(raw: &str) -> Result<(), &'static str> {
    if raw.len() < 8 {
        return Err("Password must be at least 8 characters.");
    }
    if !raw.chars().any(|ch| ch.is_ascii_uppercase()) {
        return Err("Password must contain at least one uppercase letter.");
    }
    if !raw.chars().any(|ch| ch.is_ascii_digit()) {
        return Err("Password must contain at least one digit.");
    }
    Ok(())
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    #[cfg(feature = "hydrate")]
    let store = expect_context::<SessionStore>();
    let navigate = use_navigate();

    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let display_name = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let checked = validate_username(&username.get()).and_then(|username_value| {
            let email_value = validate_email(&email.get())?;
            validate_password(&password.get())?;
            Ok((username_value, email_value))
        });
        let (username_value, email_value) = match checked {
            Ok(values) => values,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        let password_value = password.get();
        let display_value = display_name.get().trim().to_owned();
        busy.set(true);
        info.set("Creating account...".to_owned());

        #[cfg(feature = "hydrate")]
        {
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let display = (!display_value.is_empty()).then_some(display_value.as_str());
                let result = crate::net::api::register(
                    &store,
                    &username_value,
                    &email_value,
                    &password_value,
                    display,
                )
                .await;
                match result {
                    Ok(tokens) => {
                        store.save_tokens(&tokens);
                        match crate::net::api::me(&store).await {
                            Ok(user) => {
                                store.save_user(&user);
                                session.set(SessionState { user: Some(user), loading: false });
                            }
                            Err(_) => session.set(SessionState::default()),
                        }
                        navigate("/", leptos_router::NavigateOptions::default());
                    }
                    Err(err) => {
                        info.set(format!("Registration failed: {err}"));
                        busy.set(false);
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (username_value, email_value, password_value, display_value, &session, &navigate);
            busy.set(false);
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Create Account"</h1>
                <form class="auth-form" on:submit=on_submit>
                    <input
                        class="auth-input"
                        type="text"
                        placeholder="username"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                    <input
                        class="auth-input"
                        type="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="auth-input"
                        type="password"
                        placeholder="password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <input
                        class="auth-input"
                        type="text"
                        placeholder="display name (optional)"
                        prop:value=move || display_name.get()
                        on:input=move |ev| display_name.set(event_target_value(&ev))
                    />
                    <button class="auth-button" type="submit" disabled=move || busy.get()>
                        "Create Account"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="auth-message">{move || info.get()}</p>
                </Show>
                <p class="auth-switch">
                    "Already registered? "<a href="/signin">"Sign in"</a>
                </p>
            </div>
        </div>
    }
}
