use classdesk_shared::auth::LoginFailure;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::resend_verification::ResendVerification;
use crate::context::session::use_session;
use crate::router::Route;
use crate::services::api;

#[function_component(Login)]
pub fn login() -> Html {
    let session = use_session();
    let navigator = use_navigator();
    let username = use_state(String::new);
    let password = use_state(String::new);
    let submitting = use_state(|| false);
    let failure = use_state(|| None::<LoginFailure>);

    let on_username_input = {
        let username = username.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            username.set(input.value());
        })
    };
    let on_password_input = {
        let password = password.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            password.set(input.value());
        })
    };

    let on_submit = {
        let username = username.clone();
        let password = password.clone();
        let submitting = submitting.clone();
        let failure = failure.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let username = (*username).clone();
            let password = (*password).clone();
            let submitting = submitting.clone();
            let failure = failure.clone();
            let session = session.clone();
            let navigator = navigator.clone();
            submitting.set(true);
            failure.set(None);
            wasm_bindgen_futures::spawn_local(async move {
                let result = match api::client().login(&username, &password).await {
                    Ok(auth) => session.establish(auth),
                    Err(e) => Err(e),
                };
                match result {
                    Ok(()) => {
                        tracing::info!("Signed in as {}", username);
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::Calendar);
                        }
                    }
                    Err(e) => failure.set(Some(LoginFailure::classify(&e))),
                }
                submitting.set(false);
            });
        })
    };

    html! {
        <div class="container auth-page">
            <h2>{ "Sign in" }</h2>
            <form class="auth-form" onsubmit={on_submit}>
                <label>{ "Username" }
                    <input type="text" autocomplete="username" value={(*username).clone()} oninput={on_username_input} />
                </label>
                <label>{ "Password" }
                    <input type="password" autocomplete="current-password" value={(*password).clone()} oninput={on_password_input} />
                </label>
                <button type="submit" class="btn btn-primary" disabled={*submitting}>
                    { if *submitting { "Signing in..." } else { "Sign in" } }
                </button>
            </form>
            if let Some(failure) = &*failure {
                <p class="error">{ failure.message() }</p>
                if failure.needs_verification() {
                    <ResendVerification />
                }
            }
            <p class="muted">
                { "No account? " }
                <Link<Route> to={Route::Register}>{ "Register" }</Link<Route>>
            </p>
        </div>
    }
}
