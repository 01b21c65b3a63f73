use classdesk_shared::auth::ResendOutcome;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::services::api;

#[derive(Properties, PartialEq)]
pub struct ResendVerificationProps {
    #[prop_or_default]
    pub email: String,
}

/// Form offered after a login is refused for an unverified email.
#[function_component(ResendVerification)]
pub fn resend_verification(props: &ResendVerificationProps) -> Html {
    let email = use_state(|| props.email.clone());
    let outcome = use_state(|| None::<ResendOutcome>);
    let sending = use_state(|| false);

    let on_email_input = {
        let email = email.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            email.set(input.value());
        })
    };

    let on_submit = {
        let email = email.clone();
        let outcome = outcome.clone();
        let sending = sending.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let email = (*email).clone();
            let outcome = outcome.clone();
            let sending = sending.clone();
            sending.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                outcome.set(Some(api::client().resend_verification(&email).await));
                sending.set(false);
            });
        })
    };

    html! {
        <form class="resend-verification" onsubmit={on_submit}>
            <p>{ "Your email address has not been verified yet." }</p>
            <label>{ "Email" }
                <input type="email" value={(*email).clone()} oninput={on_email_input} />
            </label>
            <button type="submit" class="btn btn-secondary" disabled={*sending}>
                { "Resend verification email" }
            </button>
            if let Some(outcome) = &*outcome {
                <p class={if outcome.is_success() { "success" } else { "error" }}>{ outcome.message() }</p>
            }
        </form>
    }
}
