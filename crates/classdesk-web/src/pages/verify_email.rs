use classdesk_shared::auth::VerifyOutcome;
use serde::Deserialize;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::router::Route;
use crate::services::api;

#[derive(Debug, Default, Deserialize)]
struct VerifyQuery {
    token: Option<String>,
}

#[function_component(VerifyEmail)]
pub fn verify_email() -> Html {
    let location = use_location();
    let token = location
        .and_then(|location| location.query::<VerifyQuery>().ok())
        .unwrap_or_default()
        .token;
    let outcome = use_state(|| None::<VerifyOutcome>);

    {
        let outcome = outcome.clone();
        use_effect_with(token, move |token| {
            let token = token.clone();
            wasm_bindgen_futures::spawn_local(async move {
                outcome.set(Some(api::client().verify_email(token.as_deref()).await));
            });
            || ()
        });
    }

    html! {
        <div class="container auth-page">
            <h2>{ "Email verification" }</h2>
            {match &*outcome {
                None => html! { <div class="loading"><div class="spinner"></div></div> },
                Some(outcome) => html! {
                    <>
                        <p class={if matches!(outcome, VerifyOutcome::Verified { .. }) { "success" } else { "error" }}>
                            { outcome.message() }
                        </p>
                        <Link<Route> to={Route::Login}>
                            <button class="btn btn-primary">{ "Go to sign in" }</button>
                        </Link<Route>>
                    </>
                },
            }}
        </div>
    }
}
