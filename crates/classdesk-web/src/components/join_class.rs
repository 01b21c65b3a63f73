use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::components::modal::{ErrorLine, Modal};
use crate::services::api;

const DEFAULT_REASON: &str = "Joined with invite code";

#[derive(Properties, PartialEq)]
pub struct JoinClassProps {
    pub on_close: Callback<()>,
    pub on_joined: Callback<()>,
}

#[function_component(JoinClassModal)]
pub fn join_class_modal(props: &JoinClassProps) -> Html {
    let code = use_state(String::new);
    let reason = use_state(String::new);
    let busy = use_state(|| false);
    let error = use_state(|| None::<String>);
    let notice = use_state(|| None::<String>);

    let on_code_input = {
        let code = code.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            code.set(input.value());
        })
    };
    let on_reason_input = {
        let reason = reason.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            reason.set(input.value());
        })
    };

    let on_submit = {
        let code = code.clone();
        let reason = reason.clone();
        let busy = busy.clone();
        let error = error.clone();
        let notice = notice.clone();
        let on_joined = props.on_joined.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let code = (*code).clone();
            let reason = match reason.trim() {
                "" => DEFAULT_REASON.to_string(),
                other => other.to_string(),
            };
            let busy = busy.clone();
            let error = error.clone();
            let notice = notice.clone();
            let on_joined = on_joined.clone();
            busy.set(true);
            error.set(None);
            wasm_bindgen_futures::spawn_local(async move {
                match api::client().join_class_by_invite_code(&code, &reason).await {
                    Ok(message) => {
                        notice.set(Some(message.unwrap_or_else(|| "Request sent".to_string())));
                        on_joined.emit(());
                    }
                    Err(e) => error.set(Some(e.message())),
                }
                busy.set(false);
            });
        })
    };

    html! {
        <Modal title="Join class" on_close={props.on_close.clone()}>
            if let Some(notice) = &*notice {
                <p class="success">{ notice }</p>
            } else {
                <form class="class-form" onsubmit={on_submit}>
                    <label>{ "Invite code" }
                        <input type="text" value={(*code).clone()} oninput={on_code_input} />
                    </label>
                    <label>{ "Reason (optional)" }
                        <input type="text" value={(*reason).clone()} oninput={on_reason_input} />
                    </label>
                    <ErrorLine message={(*error).clone()} />
                    <button type="submit" class="btn btn-primary" disabled={*busy}>{ "Join" }</button>
                </form>
            }
        </Modal>
    }
}
