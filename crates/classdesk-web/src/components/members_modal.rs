use classdesk_shared::models::{ClassId, ClassMember, ClassRole, UserId};
use classdesk_shared::roles::{role_change_for, RoleChange};
use yew::prelude::*;

use crate::components::modal::{ErrorLine, Modal};
use crate::context::task_bus::use_reload;
use crate::services::api;

#[derive(Properties, PartialEq)]
pub struct MembersModalProps {
    pub class_id: ClassId,
    pub class_name: String,
    pub viewer_role: ClassRole,
    pub viewer_id: Option<UserId>,
    pub on_close: Callback<()>,
}

#[function_component(MembersModal)]
pub fn members_modal(props: &MembersModalProps) -> Html {
    let members = use_state(Vec::<ClassMember>::new);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);
    let (reload, bump_reload) = use_reload();
    let busy = use_state(|| None::<UserId>);

    {
        let members = members.clone();
        let loading = loading.clone();
        let class_id = props.class_id;
        let page_size = api::config().page_size;
        use_effect_with((class_id, reload), move |_| {
            loading.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                members.set(api::client().class_members(class_id, 0, page_size).await);
                loading.set(false);
            });
            || ()
        });
    }

    let on_change = {
        let class_id = props.class_id;
        let bump_reload = bump_reload.clone();
        let error = error.clone();
        let busy = busy.clone();
        Callback::from(move |(user_id, change): (UserId, RoleChange)| {
            let bump_reload = bump_reload.clone();
            let error = error.clone();
            let busy = busy.clone();
            busy.set(Some(user_id));
            error.set(None);
            wasm_bindgen_futures::spawn_local(async move {
                match api::client()
                    .change_member_role(class_id, user_id, change)
                    .await
                {
                    // Re-fetch so roles come from the backend
                    Ok(()) => bump_reload.emit(()),
                    Err(e) => error.set(Some(e.message())),
                }
                busy.set(None);
            });
        })
    };

    let render_member = |member: &ClassMember| {
        let change = role_change_for(props.viewer_role, props.viewer_id, member);
        let user_id = member.user_id;
        let is_self = props.viewer_id == Some(user_id);
        html! {
            <li key={user_id} class="member-row">
                <span class="member-name">
                    { member.label() }
                    if is_self {
                        <span class="muted">{ " (you)" }</span>
                    }
                </span>
                <span class={classes!("role-badge", format!("role-{}", member.role.as_str().to_lowercase()))}>
                    { member.role.label() }
                </span>
                if let Some(change) = change {
                    <button
                        class="btn btn-small"
                        disabled={*busy == Some(user_id)}
                        onclick={on_change.reform(move |_| (user_id, change))}
                    >
                        { change.label() }
                    </button>
                }
            </li>
        }
    };

    html! {
        <Modal title={format!("Members of {}", props.class_name)} on_close={props.on_close.clone()}>
            <ErrorLine message={(*error).clone()} />
            if *loading && members.is_empty() {
                <div class="loading"><div class="spinner"></div></div>
            } else if members.is_empty() {
                <p class="empty-state">{ "No members." }</p>
            } else {
                <ul class="member-list">
                    { for members.iter().map(render_member) }
                </ul>
            }
        </Modal>
    }
}
