//! Sidebar listing the viewer's classes and the class-management entry points.

use std::collections::HashMap;

use classdesk_shared::models::{ClassId, ClassInfo};
use yew::prelude::*;

use crate::components::approvals_modal::ApprovalsModal;
use crate::components::class_detail::ClassDetailModal;
use crate::components::class_search::ClassSearchModal;
use crate::components::create_class::CreateClassModal;
use crate::components::join_class::JoinClassModal;
use crate::context::session::use_session;
use crate::context::task_bus::{use_reload, use_task_revision};
use crate::services::api;

#[derive(Clone, PartialEq)]
enum Panel {
    Closed,
    Create,
    Join,
    Search,
    Approvals,
    Detail(ClassInfo),
}

#[function_component(ClassPanel)]
pub fn class_panel() -> Html {
    let session = use_session();
    let revision = use_task_revision();
    let classes = use_state(Vec::<ClassInfo>::new);
    let member_counts = use_state(HashMap::<ClassId, u64>::new);
    let pending = use_state(|| 0u64);
    let (reload, refresh) = use_reload();
    let panel = use_state(|| Panel::Closed);

    {
        let classes = classes.clone();
        let member_counts = member_counts.clone();
        use_effect_with((reload, revision), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                let client = api::client();
                let fetched = client.my_classes().await;
                classes.set(fetched.clone());

                let mut counts = HashMap::new();
                for class in &fetched {
                    let count = match class.member_count {
                        Some(count) => count,
                        None => client.member_count(class.id).await,
                    };
                    counts.insert(class.id, count);
                }
                member_counts.set(counts);
            });
            || ()
        });
    }

    // Pending approvals are counted eagerly for the badge
    {
        let pending = pending.clone();
        use_effect_with(reload, move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                pending.set(api::client().pending_approval_count().await);
            });
            || ()
        });
    }

    let open = |next: Panel| {
        let panel = panel.clone();
        Callback::from(move |_: MouseEvent| panel.set(next.clone()))
    };
    let close = {
        let panel = panel.clone();
        Callback::from(move |_| panel.set(Panel::Closed))
    };
    let on_count_change = {
        let pending = pending.clone();
        Callback::from(move |count: u64| pending.set(count))
    };

    html! {
        <aside class="class-panel">
            <div class="class-panel-header">
                <h3>{ "My classes" }</h3>
                <button class="btn btn-small" onclick={open(Panel::Approvals)}>
                    { "Approvals" }
                    if *pending > 0 {
                        <span class="nav-badge">{ *pending }</span>
                    }
                </button>
            </div>
            <div class="class-panel-actions">
                <button class="btn btn-small btn-primary" onclick={open(Panel::Create)}>{ "Create" }</button>
                <button class="btn btn-small" onclick={open(Panel::Join)}>{ "Join by code" }</button>
                <button class="btn btn-small" onclick={open(Panel::Search)}>{ "Search" }</button>
            </div>
            if classes.is_empty() {
                <p class="empty-state">{ "You have not joined any classes yet." }</p>
            } else {
                <ul class="class-list">
                    { for classes.iter().map(|class| {
                        let count = member_counts.get(&class.id).copied();
                        let dot = class
                            .color
                            .as_deref()
                            .map(|color| format!("background: {}", color))
                            .unwrap_or_default();
                        html! {
                            <li key={class.id} class="class-row" onclick={open(Panel::Detail(class.clone()))}>
                                <span class="class-dot" style={dot}></span>
                                <span class="class-name">{ &class.name }</span>
                                if let Some(count) = count {
                                    <span class="muted">{ format!("{} members", count) }</span>
                                }
                            </li>
                        }
                    }) }
                </ul>
            }

            {match &*panel {
                Panel::Closed => html! {},
                Panel::Create => html! {
                    <CreateClassModal on_close={close.clone()} on_created={refresh.clone()} />
                },
                Panel::Join => html! {
                    <JoinClassModal on_close={close.clone()} on_joined={refresh.clone()} />
                },
                Panel::Search => html! {
                    <ClassSearchModal on_close={close.clone()} on_joined={refresh.clone()} />
                },
                Panel::Approvals => html! {
                    <ApprovalsModal on_close={close.clone()} {on_count_change} />
                },
                Panel::Detail(class) => html! {
                    <ClassDetailModal
                        class={class.clone()}
                        viewer_id={session.session().user_id()}
                        on_close={close.clone()}
                    />
                },
            }}
        </aside>
    }
}
