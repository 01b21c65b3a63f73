use classdesk_shared::models::CreateClassRequest;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::components::modal::{ErrorLine, Modal};
use crate::services::api;

#[derive(Properties, PartialEq)]
pub struct CreateClassProps {
    pub on_close: Callback<()>,
    pub on_created: Callback<()>,
}

#[function_component(CreateClassModal)]
pub fn create_class_modal(props: &CreateClassProps) -> Html {
    let name = use_state(String::new);
    let description = use_state(String::new);
    let is_public = use_state(|| true);
    let approval_required = use_state(|| false);
    let saving = use_state(|| false);
    let error = use_state(|| None::<String>);
    let created_code = use_state(|| None::<String>);

    let on_name_input = {
        let name = name.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            name.set(input.value());
        })
    };
    let on_description_input = {
        let description = description.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            description.set(input.value());
        })
    };
    let on_public_toggle = {
        let is_public = is_public.clone();
        Callback::from(move |_| is_public.set(!*is_public))
    };
    let on_approval_toggle = {
        let approval_required = approval_required.clone();
        Callback::from(move |_| approval_required.set(!*approval_required))
    };

    let on_submit = {
        let name = name.clone();
        let description = description.clone();
        let is_public = is_public.clone();
        let approval_required = approval_required.clone();
        let saving = saving.clone();
        let error = error.clone();
        let created_code = created_code.clone();
        let on_created = props.on_created.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let request = CreateClassRequest {
                name: name.trim().to_string(),
                description: description.trim().to_string(),
                is_public: *is_public,
                join_approval_required: *approval_required,
            };
            let saving = saving.clone();
            let error = error.clone();
            let created_code = created_code.clone();
            let on_created = on_created.clone();
            saving.set(true);
            error.set(None);
            wasm_bindgen_futures::spawn_local(async move {
                match api::client().create_class(&request).await {
                    Ok(class) => {
                        tracing::info!("Created class {}", request.name);
                        created_code.set(Some(
                            class.and_then(|c| c.invite_code).unwrap_or_default(),
                        ));
                        on_created.emit(());
                    }
                    Err(e) => error.set(Some(e.message())),
                }
                saving.set(false);
            });
        })
    };

    html! {
        <Modal title="Create class" on_close={props.on_close.clone()}>
            if let Some(code) = &*created_code {
                <div class="success">
                    <p>{ "Class created." }</p>
                    if !code.is_empty() {
                        <p>{ "Invite code: " }<code>{ code }</code></p>
                    }
                </div>
            } else {
                <form class="class-form" onsubmit={on_submit}>
                    <label>{ "Name" }
                        <input type="text" value={(*name).clone()} oninput={on_name_input} />
                    </label>
                    <label>{ "Description" }
                        <textarea value={(*description).clone()} oninput={on_description_input} />
                    </label>
                    <label class="checkbox">
                        <input type="checkbox" checked={*is_public} onchange={on_public_toggle} />
                        { "Listed in class search" }
                    </label>
                    <label class="checkbox">
                        <input type="checkbox" checked={*approval_required} onchange={on_approval_toggle} />
                        { "Require approval to join" }
                    </label>
                    <ErrorLine message={(*error).clone()} />
                    <button type="submit" class="btn btn-primary" disabled={*saving}>{ "Create" }</button>
                </form>
            }
        </Modal>
    }
}
