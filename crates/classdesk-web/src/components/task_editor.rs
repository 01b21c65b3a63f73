//! Task editor.
//!
//! Which fields are editable depends on the viewer: class members only plan
//! their own status, deadline and notes for a class task, while creators,
//! owners and admins edit the task itself.

use classdesk_shared::models::{ClassRole, Task, TaskStatus};
use classdesk_shared::reconcile::{edits_official_fields, plan_task_edit, TaskDraft};
use classdesk_shared::{dates, TaskEvent};
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::components::modal::{ErrorLine, Modal};
use crate::context::task_bus::use_task_bus;
use crate::services::api;

#[derive(Properties, PartialEq)]
pub struct TaskEditorProps {
    pub task: Task,
    pub on_close: Callback<()>,
}

#[derive(Clone, Copy, PartialEq)]
enum DraftField {
    Title,
    Description,
    Course,
    Deadline,
    PersonalDeadline,
    PersonalNotes,
}

#[function_component(TaskEditor)]
pub fn task_editor(props: &TaskEditorProps) -> Html {
    let bus = use_task_bus();
    let draft = use_state(|| {
        let mut draft = TaskDraft::from_task(&props.task);
        draft.deadline = dates::to_input_value(&draft.deadline);
        draft.personal_deadline = dates::to_input_value(&draft.personal_deadline);
        draft
    });
    let viewer_role = use_state(|| None::<ClassRole>);
    let role_loaded = use_state(|| props.task.class_id.is_none());
    let saving = use_state(|| false);
    let error = use_state(|| None::<String>);

    // Class tasks need the viewer's role to pick the edit target
    {
        let viewer_role = viewer_role.clone();
        let role_loaded = role_loaded.clone();
        let class_id = props.task.class_id;
        use_effect_with(class_id, move |class_id| {
            if let Some(class_id) = *class_id {
                wasm_bindgen_futures::spawn_local(async move {
                    let permissions = api::client().my_role(class_id).await;
                    viewer_role.set(permissions.and_then(|p| p.role));
                    role_loaded.set(true);
                });
            }
            || ()
        });
    }

    let official = edits_official_fields(&props.task, *viewer_role);

    let set_field = |field: DraftField| {
        let draft = draft.clone();
        Callback::from(move |value: String| {
            let mut next = (*draft).clone();
            match field {
                DraftField::Title => next.title = value,
                DraftField::Description => next.description = value,
                DraftField::Course => next.course_name = value,
                DraftField::Deadline => next.deadline = value,
                DraftField::PersonalDeadline => next.personal_deadline = value,
                DraftField::PersonalNotes => next.personal_notes = value,
            }
            draft.set(next);
        })
    };
    let input = |field: DraftField| {
        let set = set_field(field);
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            set.emit(input.value());
        })
    };
    let textarea = |field: DraftField| {
        let set = set_field(field);
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            set.emit(input.value());
        })
    };

    let on_status_change = {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Some(status) = TaskStatus::from_str(&select.value()) {
                let mut next = (*draft).clone();
                next.status = status;
                draft.set(next);
            }
        })
    };

    let on_save = {
        let task = props.task.clone();
        let draft = draft.clone();
        let viewer_role = viewer_role.clone();
        let saving = saving.clone();
        let error = error.clone();
        let bus = bus.clone();
        let on_close = props.on_close.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if draft.title.trim().is_empty() {
                error.set(Some("Title is required".to_string()));
                return;
            }
            let edit = plan_task_edit(&task, &draft, *viewer_role);
            let saving = saving.clone();
            let error = error.clone();
            let bus = bus.clone();
            let on_close = on_close.clone();
            saving.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                match api::client().save_task_edit(&edit).await {
                    Ok(()) => {
                        bus.publish(TaskEvent::Updated {
                            task_id: edit.task_id(),
                        });
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

    let on_delete = {
        let task_id = props.task.id;
        let saving = saving.clone();
        let error = error.clone();
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| {
            let saving = saving.clone();
            let error = error.clone();
            let bus = bus.clone();
            let on_close = on_close.clone();
            saving.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                match api::client().delete_task(task_id).await {
                    Ok(()) => {
                        bus.publish(TaskEvent::Deleted { task_id });
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

    let task = &props.task;

    html! {
        <Modal title={task.title.clone()} on_close={props.on_close.clone()}>
            if let Some(class_name) = &task.class_name {
                <p class="task-class">
                    { format!("Class: {}", class_name) }
                    if let Some(creator) = &task.creator_name {
                        { format!(" · published by {}", creator) }
                    }
                </p>
            }
            if !*role_loaded {
                <div class="loading"><div class="spinner"></div></div>
            } else {
                <form class="task-form" onsubmit={on_save}>
                    if official {
                        <label>{ "Title" }
                            <input type="text" value={draft.title.clone()} oninput={input(DraftField::Title)} />
                        </label>
                        <label>{ "Description" }
                            <textarea value={draft.description.clone()} oninput={textarea(DraftField::Description)} />
                        </label>
                        <label>{ "Course" }
                            <input type="text" value={draft.course_name.clone()} oninput={input(DraftField::Course)} />
                        </label>
                        <label>{ "Deadline" }
                            <input type="datetime-local" value={draft.deadline.clone()} oninput={input(DraftField::Deadline)} />
                        </label>
                    } else {
                        if let Some(description) = &task.description {
                            <p class="task-description">{ description }</p>
                        }
                        if let Some(deadline) = &task.deadline {
                            <p class="task-deadline">{ format!("Official deadline: {}", deadline) }</p>
                        }
                        <label>{ "Status" }
                            <select onchange={on_status_change}>
                                { for TaskStatus::ALL.iter().map(|status| html! {
                                    <option value={status.as_str().to_string()} selected={*status == draft.status}>
                                        { status.label() }
                                    </option>
                                }) }
                            </select>
                        </label>
                        <label>{ "My deadline" }
                            <input type="datetime-local" value={draft.personal_deadline.clone()}
                                oninput={input(DraftField::PersonalDeadline)} />
                        </label>
                        <label>{ "My notes" }
                            <textarea value={draft.personal_notes.clone()} oninput={textarea(DraftField::PersonalNotes)} />
                        </label>
                    }
                    <ErrorLine message={(*error).clone()} />
                    <div class="form-actions">
                        <button type="submit" class="btn btn-primary" disabled={*saving}>{ "Save" }</button>
                        if official {
                            <button type="button" class="btn btn-danger" disabled={*saving} onclick={on_delete}>
                                { "Delete" }
                            </button>
                        }
                    </div>
                </form>
            }
        </Modal>
    }
}
