use chrono::Local;
use classdesk_shared::models::{ClassInfo, RolePermissions, SyncRange, Task, UserId};
use classdesk_shared::{dates, TaskEvent};
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::components::members_modal::MembersModal;
use crate::components::modal::{ErrorLine, Modal};
use crate::components::task_create::TaskCreateModal;
use crate::components::task_editor::TaskEditor;
use crate::context::task_bus::{use_task_bus, use_task_revision};
use crate::services::{api, clipboard};

#[derive(Properties, PartialEq)]
pub struct ClassDetailProps {
    pub class: ClassInfo,
    pub viewer_id: Option<UserId>,
    pub on_close: Callback<()>,
}

#[derive(Clone, PartialEq)]
enum Overlay {
    None,
    Members,
    CreateTask,
    EditTask(Task),
}

#[function_component(ClassDetailModal)]
pub fn class_detail_modal(props: &ClassDetailProps) -> Html {
    let config = api::config();
    let bus = use_task_bus();
    let revision = use_task_revision();
    let permissions = use_state(|| None::<RolePermissions>);
    let tasks = use_state(Vec::<Task>::new);
    let sync_range = use_state(|| config.default_sync_range);
    let notice = use_state(|| None::<String>);
    let error = use_state(|| None::<String>);
    let overlay = use_state(|| Overlay::None);
    let class_id = props.class.id;

    {
        let permissions = permissions.clone();
        use_effect_with(class_id, move |class_id| {
            let class_id = *class_id;
            wasm_bindgen_futures::spawn_local(async move {
                permissions.set(api::client().my_role(class_id).await);
            });
            || ()
        });
    }

    {
        let tasks = tasks.clone();
        let page_size = config.page_size;
        use_effect_with((class_id, revision), move |(class_id, _)| {
            let class_id = *class_id;
            wasm_bindgen_futures::spawn_local(async move {
                tasks.set(api::client().class_tasks(class_id, 0, page_size).await);
            });
            || ()
        });
    }

    let on_range_change = {
        let sync_range = sync_range.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Some(range) = SyncRange::from_str(&select.value()) {
                sync_range.set(range);
            }
        })
    };

    let on_sync = {
        let sync_range = sync_range.clone();
        let notice = notice.clone();
        let error = error.clone();
        let bus = bus.clone();
        Callback::from(move |_| {
            let range = *sync_range;
            let notice = notice.clone();
            let error = error.clone();
            let bus = bus.clone();
            error.set(None);
            wasm_bindgen_futures::spawn_local(async move {
                match api::client().sync_class(class_id, range).await {
                    Ok(result) => {
                        notice.set(Some(format!(
                            "Synced {} new tasks ({} in this {})",
                            result.newly_synced_tasks,
                            result.total_tasks_in_class_in_range,
                            range.as_str()
                        )));
                        bus.publish(TaskEvent::Synced { class_id });
                    }
                    Err(e) => error.set(Some(e.message())),
                }
            });
        })
    };

    let on_copy = {
        let code = props.class.invite_code.clone().unwrap_or_default();
        let notice = notice.clone();
        Callback::from(move |_| {
            let code = code.clone();
            let notice = notice.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match clipboard::copy_text(&code).await {
                    Ok(()) => notice.set(Some("Invite code copied".to_string())),
                    Err(e) => tracing::warn!("{}", e),
                }
            });
        })
    };

    let show = |next: Overlay| {
        let overlay = overlay.clone();
        Callback::from(move |_: MouseEvent| overlay.set(next.clone()))
    };
    let close_overlay = {
        let overlay = overlay.clone();
        Callback::from(move |_| overlay.set(Overlay::None))
    };

    let perms = (*permissions).clone().unwrap_or_default();
    let viewer_role = perms.role.unwrap_or_default();
    let is_manager = viewer_role.is_manager() || perms.can_manage_class;
    let class = &props.class;

    html! {
        <>
        <Modal title={class.name.clone()} on_close={props.on_close.clone()}>
            if let Some(description) = &class.description {
                <p class="class-description">{ description }</p>
            }
            <p class="class-meta">
                { format!("Your role: {}", viewer_role.label()) }
                if let Some(owner) = &class.owner {
                    { format!(" · Owner: {}", owner.label()) }
                }
            </p>
            if is_manager {
                if let Some(code) = &class.invite_code {
                    <div class="invite-code">
                        { "Invite code: " }<code>{ code }</code>
                        <button class="btn btn-small" onclick={on_copy}>{ "Copy" }</button>
                    </div>
                }
            }

            <div class="class-actions">
                <button class="btn btn-secondary" onclick={show(Overlay::Members)}>{ "Members" }</button>
                if perms.can_create_tasks() {
                    <button class="btn btn-primary" onclick={show(Overlay::CreateTask)}>{ "New class task" }</button>
                }
            </div>

            <div class="sync-controls">
                <select onchange={on_range_change}>
                    { for SyncRange::ALL.iter().map(|range| html! {
                        <option value={range.as_str().to_string()} selected={*range == *sync_range}>
                            { range.as_str() }
                        </option>
                    }) }
                </select>
                <button class="btn btn-secondary" onclick={on_sync}>{ "Sync to my calendar" }</button>
            </div>
            if let Some(notice) = &*notice {
                <p class="success">{ notice }</p>
            }
            <ErrorLine message={(*error).clone()} />

            <h4>{ "Class tasks" }</h4>
            if tasks.is_empty() {
                <p class="empty-state">{ "No tasks published yet." }</p>
            } else {
                <ul class="task-list">
                    { for tasks.iter().map(|task| html! {
                        <li key={task.id} class="task-row" onclick={show(Overlay::EditTask(task.clone()))}>
                            <span class="task-title">{ &task.title }</span>
                            if let Some(due) = &task.due_date {
                                <span class="muted">{ format!(" · due {}", dates::to_input_value(due).replace('T', " ")) }</span>
                            }
                        </li>
                    }) }
                </ul>
            }
        </Modal>
        {match &*overlay {
            Overlay::None => html! {},
            Overlay::Members => html! {
                <MembersModal
                    class_id={class_id}
                    class_name={class.name.clone()}
                    {viewer_role}
                    viewer_id={props.viewer_id}
                    on_close={close_overlay.clone()}
                />
            },
            Overlay::CreateTask => html! {
                <TaskCreateModal
                    default_deadline={dates::end_of_day(Local::now().date_naive())}
                    class_id={Some(class_id)}
                    class_name={Some(class.name.clone())}
                    on_close={close_overlay.clone()}
                />
            },
            Overlay::EditTask(task) => html! {
                <TaskEditor task={task.clone()} on_close={close_overlay.clone()} />
            },
        }}
        </>
    }
}
