use std::collections::HashSet;
use std::rc::Rc;

use classdesk_shared::approvals::{ApprovalQueue, QueueUpdate};
use classdesk_shared::models::{Approval, ApprovalAction};
use yew::prelude::*;

use crate::components::modal::{ErrorLine, Modal};
use crate::services::api;

#[derive(Properties, PartialEq)]
pub struct ApprovalsModalProps {
    pub on_close: Callback<()>,
    /// Receives the pending count after every successful resolution
    pub on_count_change: Callback<u64>,
}

#[derive(Default, PartialEq)]
struct PendingQueue(ApprovalQueue);

impl Reducible for PendingQueue {
    type Action = QueueUpdate;

    fn reduce(self: Rc<Self>, update: QueueUpdate) -> Rc<Self> {
        Rc::new(PendingQueue(self.0.apply(update)))
    }
}

/// Approvals with a request in flight.
#[derive(Default, PartialEq)]
struct InFlight(HashSet<i64>);

enum InFlightAction {
    Start(i64),
    Finish(i64),
}

impl Reducible for InFlight {
    type Action = InFlightAction;

    fn reduce(self: Rc<Self>, action: InFlightAction) -> Rc<Self> {
        let mut ids = self.0.clone();
        match action {
            InFlightAction::Start(id) => ids.insert(id),
            InFlightAction::Finish(id) => ids.remove(&id),
        };
        Rc::new(InFlight(ids))
    }
}

#[function_component(ApprovalsModal)]
pub fn approvals_modal(props: &ApprovalsModalProps) -> Html {
    let queue = use_reducer(PendingQueue::default);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);
    let busy = use_reducer(InFlight::default);

    {
        let queue = queue.dispatcher();
        let loading = loading.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                let fetched = api::client()
                    .pending_approvals(0, api::config().page_size)
                    .await;
                queue.dispatch(QueueUpdate::Loaded(fetched));
                loading.set(false);
            });
            || ()
        });
    }

    // Report the count from the reduced queue once it is loaded
    {
        let on_count_change = props.on_count_change.clone();
        use_effect_with((queue.0.total, *loading), move |(total, loading)| {
            if !*loading {
                on_count_change.emit(*total);
            }
            || ()
        });
    }

    let on_action = {
        let queue = queue.dispatcher();
        let error = error.clone();
        let busy = busy.dispatcher();
        Callback::from(move |(approval, action): (Approval, ApprovalAction)| {
            let queue = queue.clone();
            let error = error.clone();
            let busy = busy.clone();
            busy.dispatch(InFlightAction::Start(approval.id));
            error.set(None);
            wasm_bindgen_futures::spawn_local(async move {
                match api::client().process_approval(&approval, action).await {
                    Ok(()) => queue.dispatch(QueueUpdate::Resolved(approval.id)),
                    Err(e) => error.set(Some(e.message())),
                }
                busy.dispatch(InFlightAction::Finish(approval.id));
            });
        })
    };

    let render_approval = |approval: &Approval| {
        let id = approval.id;
        let disabled = busy.0.contains(&id);
        let approve = approval.clone();
        let reject = approval.clone();
        html! {
            <li key={id} class="approval-row">
                <div class="approval-info">
                    <strong>{ approval.applicant.label() }</strong>
                    { format!(" wants to join {}", approval.class_info.name) }
                    if let Some(reason) = &approval.join_reason {
                        <p class="muted">{ format!("\u{201c}{}\u{201d}", reason) }</p>
                    }
                    if let Some(created_at) = &approval.created_at {
                        <p class="muted">{ created_at }</p>
                    }
                </div>
                <div class="approval-actions">
                    <button class="btn btn-small btn-primary" {disabled}
                        onclick={on_action.reform(move |_| (approve.clone(), ApprovalAction::Approve))}>
                        { "Approve" }
                    </button>
                    <button class="btn btn-small btn-danger" {disabled}
                        onclick={on_action.reform(move |_| (reject.clone(), ApprovalAction::Reject))}>
                        { "Reject" }
                    </button>
                </div>
            </li>
        }
    };

    html! {
        <Modal title={format!("Pending approvals ({})", queue.0.total)} on_close={props.on_close.clone()}>
            <ErrorLine message={(*error).clone()} />
            if *loading {
                <div class="loading"><div class="spinner"></div></div>
            } else if queue.0.is_empty() {
                <p class="empty-state">{ "Nothing waiting for approval." }</p>
            } else {
                <ul class="approval-list">
                    { for queue.0.items.iter().map(render_approval) }
                </ul>
            }
        </Modal>
    }
}
