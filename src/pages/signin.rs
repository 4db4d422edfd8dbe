//! Sign-in page: email-or-username identifier + password.

#[cfg(test)]
#[path = "signin_test.rs"]
mod signin_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::state::session::SessionState;
#[cfg(feature = "hydrate")]
use crate::state::session::SessionStore;

fn validate_sign_in_input(
    identifier: &str,
    password: &str,
) -> Result<(String, String), &'static str> {
    let identifier = identifier.trim();
    if identifier.is_empty() || password.is_empty() {
        return Err("Enter your email (or username) and password.");
    }
    Ok((identifier.to_owned(), password.to_owned()))
}

#[component]
pub fn SignInPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    #[cfg(feature = "hydrate")]
    let store = expect_context::<SessionStore>();
    let navigate = use_navigate();

    let identifier = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (identifier_value, password_value) =
            match validate_sign_in_input(&identifier.get(), &password.get()) {
                Ok(values) => values,
                Err(message) => {
                    info.set(message.to_owned());
                    return;
                }
            };
        busy.set(true);
        info.set("Signing in...".to_owned());

        #[cfg(feature = "hydrate")]
        {
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match crate::net::api::login(&store, &identifier_value, &password_value).await {
                    Ok(tokens) => {
                        store.save_tokens(&tokens);
                        match crate::net::api::me(&store).await {
                            Ok(user) => {
                                store.save_user(&user);
                                session.set(SessionState { user: Some(user), loading: false });
                            }
                            // An unverifiable fresh token reads as no session.
                            Err(_) => session.set(SessionState::default()),
                        }
                        navigate("/", leptos_router::NavigateOptions::default());
                    }
                    Err(err) => {
                        info.set(format!("Sign in failed: {err}"));
                        busy.set(false);
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (identifier_value, password_value, &session, &navigate);
            busy.set(false);
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Sign in"</h1>
                <form class="auth-form" on:submit=on_submit>
                    <input
                        class="auth-input"
                        type="text"
                        placeholder="email or username"
                        prop:value=move || identifier.get()
                        on:input=move |ev| identifier.set(event_target_value(&ev))
                    />
                    <input
                        class="auth-input"
                        type="password"
                        placeholder="password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="auth-button" type="submit" disabled=move || busy.get()>
                        "Sign in"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="auth-message">{move || info.get()}</p>
                </Show>
                <p class="auth-switch">
                    "New here? "<a href="/register">"Create an account"</a>
                </p>
            </div>
        </div>
    }
}
