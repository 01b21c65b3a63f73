use classdesk_shared::dates;
use classdesk_shared::models::{ClassId, CreateTaskRequest};
use classdesk_shared::TaskEvent;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::components::modal::{ErrorLine, Modal};
use crate::context::task_bus::use_task_bus;
use crate::services::api;

#[derive(Properties, PartialEq)]
pub struct TaskCreateProps {
    /// Deadline pre-filled in the form, `YYYY-MM-DDTHH:MM:SS`
    #[prop_or_default]
    pub default_deadline: String,
    #[prop_or_default]
    pub class_id: Option<ClassId>,
    #[prop_or_default]
    pub class_name: Option<String>,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub on_created: Callback<()>,
}

#[function_component(TaskCreateModal)]
pub fn task_create_modal(props: &TaskCreateProps) -> Html {
    let bus = use_task_bus();
    let title = use_state(String::new);
    let description = use_state(String::new);
    let course_name = use_state(|| props.class_name.clone().unwrap_or_default());
    let deadline = use_state(|| dates::to_input_value(&props.default_deadline));
    let saving = use_state(|| false);
    let error = use_state(|| None::<String>);

    let on_title_input = {
        let title = title.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            title.set(input.value());
        })
    };
    let on_description_input = {
        let description = description.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            description.set(input.value());
        })
    };
    let on_course_input = {
        let course_name = course_name.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            course_name.set(input.value());
        })
    };
    let on_deadline_input = {
        let deadline = deadline.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            deadline.set(input.value());
        })
    };

    let on_submit = {
        let title = title.clone();
        let description = description.clone();
        let course_name = course_name.clone();
        let deadline = deadline.clone();
        let saving = saving.clone();
        let error = error.clone();
        let class_id = props.class_id;
        let on_created = props.on_created.clone();
        let on_close = props.on_close.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let request = CreateTaskRequest {
                title: title.trim().to_string(),
                description: description.trim().to_string(),
                course_name: course_name.trim().to_string(),
                deadline: dates::to_local_datetime(&deadline),
                class_id,
            };
            let saving = saving.clone();
            let error = error.clone();
            let bus = bus.clone();
            let on_created = on_created.clone();
            let on_close = on_close.clone();
            saving.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                match api::client().create_task(&request).await {
                    Ok(task) => {
                        bus.publish(TaskEvent::Created {
                            task_id: task.map(|t| t.id),
                        });
                        on_created.emit(());
                        on_close.emit(());
                    }
                    Err(e) => {
                        error.set(Some(e.message()));
                        saving.set(false);
                    }
                }
            });
        })
    };

    let heading = match &props.class_name {
        Some(name) => format!("New task for {}", name),
        None => "New task".to_string(),
    };

    html! {
        <Modal title={heading} on_close={props.on_close.clone()}>
            <form class="task-form" onsubmit={on_submit}>
                <label>{ "Title" }
                    <input type="text" required=true value={(*title).clone()} oninput={on_title_input} />
                </label>
                <label>{ "Description" }
                    <textarea value={(*description).clone()} oninput={on_description_input} />
                </label>
                <label>{ "Course" }
                    <input type="text" value={(*course_name).clone()} oninput={on_course_input} />
                </label>
                <label>{ "Deadline" }
                    <input type="datetime-local" value={(*deadline).clone()} oninput={on_deadline_input} />
                </label>
                <ErrorLine message={(*error).clone()} />
                <button type="submit" class="btn btn-primary" disabled={*saving}>
                    { if *saving { "Saving..." } else { "Create" } }
                </button>
            </form>
        </Modal>
    }
}
