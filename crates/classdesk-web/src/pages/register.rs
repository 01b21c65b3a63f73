use classdesk_shared::models::RegisterRequest;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::context::session::use_session;
use crate::router::Route;
use crate::services::api;

#[derive(Clone, Copy, PartialEq)]
enum Field {
    Username,
    Email,
    Password,
    Name,
}

#[function_component(Register)]
pub fn register() -> Html {
    let session = use_session();
    let navigator = use_navigator();
    let form = use_state(RegisterRequest::default);
    let submitting = use_state(|| false);
    let error = use_state(|| None::<String>);
    let awaiting_verification = use_state(|| false);

    let on_input = |field: Field| {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let value = input.value();
            let mut next = (*form).clone();
            match field {
                Field::Username => next.username = value,
                Field::Email => next.email = value,
                Field::Password => next.password = value,
                Field::Name => next.name = Some(value).filter(|v| !v.trim().is_empty()),
            }
            form.set(next);
        })
    };

    let on_submit = {
        let form = form.clone();
        let submitting = submitting.clone();
        let error = error.clone();
        let awaiting_verification = awaiting_verification.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let request = (*form).clone();
            if request.username.trim().is_empty()
                || request.email.trim().is_empty()
                || request.password.is_empty()
            {
                error.set(Some("Username, email and password are required".to_string()));
                return;
            }
            let submitting = submitting.clone();
            let error = error.clone();
            let awaiting_verification = awaiting_verification.clone();
            let session = session.clone();
            let navigator = navigator.clone();
            submitting.set(true);
            error.set(None);
            wasm_bindgen_futures::spawn_local(async move {
                match api::client().register(&request).await {
                    // Accounts that must verify their email get no token yet
                    Ok(auth) if auth.token.is_none() => awaiting_verification.set(true),
                    Ok(auth) => match session.establish(auth) {
                        Ok(()) => {
                            if let Some(navigator) = navigator {
                                navigator.push(&Route::Calendar);
                            }
                        }
                        Err(e) => error.set(Some(e.message())),
                    },
                    Err(e) => error.set(Some(e.message())),
                }
                submitting.set(false);
            });
        })
    };

    if *awaiting_verification {
        return html! {
            <div class="container auth-page">
                <h2>{ "Check your inbox" }</h2>
                <p>{ format!("We sent a verification link to {}.", form.email) }</p>
                <Link<Route> to={Route::Login}>{ "Back to sign in" }</Link<Route>>
            </div>
        };
    }

    html! {
        <div class="container auth-page">
            <h2>{ "Create an account" }</h2>
            <form class="auth-form" onsubmit={on_submit}>
                <label>{ "Username" }
                    <input type="text" value={form.username.clone()} oninput={on_input(Field::Username)} />
                </label>
                <label>{ "Email" }
                    <input type="email" value={form.email.clone()} oninput={on_input(Field::Email)} />
                </label>
                <label>{ "Password" }
                    <input type="password" value={form.password.clone()} oninput={on_input(Field::Password)} />
                </label>
                <label>{ "Display name (optional)" }
                    <input type="text" value={form.name.clone().unwrap_or_default()} oninput={on_input(Field::Name)} />
                </label>
                if let Some(message) = &*error {
                    <p class="error">{ message }</p>
                }
                <button type="submit" class="btn btn-primary" disabled={*submitting}>{ "Register" }</button>
            </form>
            <p class="muted">
                { "Already registered? " }
                <Link<Route> to={Route::Login}>{ "Sign in" }</Link<Route>>
            </p>
        </div>
    }
}
