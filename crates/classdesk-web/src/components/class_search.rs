//! Public class search.
//!
//! Typing restarts a debounce timer; only the settled query is sent. Results
//! from a superseded query are dropped through request generations.

use std::rc::Rc;

use classdesk_shared::models::{ClassId, ClassInfo};
use classdesk_shared::search::{SearchState, SearchUpdate};
use classdesk_shared::RequestGenerations;
use gloo::timers::callback::Timeout;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::components::modal::{ErrorLine, Modal};
use crate::services::api;

const DEFAULT_REASON: &str = "Found through class search";

#[derive(Properties, PartialEq)]
pub struct ClassSearchProps {
    pub on_close: Callback<()>,
    pub on_joined: Callback<()>,
}

#[derive(Default, PartialEq)]
struct SearchView(SearchState);

impl Reducible for SearchView {
    type Action = SearchUpdate;

    fn reduce(self: Rc<Self>, update: SearchUpdate) -> Rc<Self> {
        Rc::new(SearchView(self.0.apply(update)))
    }
}

#[function_component(ClassSearchModal)]
pub fn class_search_modal(props: &ClassSearchProps) -> Html {
    let config = api::config();
    let input = use_state(String::new);
    let query = use_state(String::new);
    let page = use_state(|| 0u32);
    let search = use_reducer(SearchView::default);
    let reason = use_state(String::new);
    let join_notice = use_state(|| None::<(ClassId, String)>);
    let debounce = use_mut_ref(|| None::<Timeout>);
    let generations = use_memo((), |_| RequestGenerations::new());

    let on_input = {
        let input = input.clone();
        let query = query.clone();
        let page = page.clone();
        let debounce = debounce.clone();
        let delay = config.search_debounce_ms;
        Callback::from(move |e: InputEvent| {
            let target: HtmlInputElement = e.target_unchecked_into();
            let value = target.value();
            input.set(value.clone());

            let query = query.clone();
            let page = page.clone();
            // Replacing the pending timeout cancels it
            *debounce.borrow_mut() = Some(Timeout::new(delay, move || {
                page.set(0);
                query.set(value);
            }));
        })
    };

    {
        let search = search.dispatcher();
        let generations = generations.clone();
        let page_size = config.page_size;
        use_effect_with(((*query).clone(), *page), move |(query, page)| {
            let generation = generations.begin();
            let query = query.clone();
            let page = *page;
            if query.trim().is_empty() {
                search.dispatch(SearchUpdate::Cleared);
            } else {
                search.dispatch(SearchUpdate::Started);
                wasm_bindgen_futures::spawn_local(async move {
                    let outcome = api::client()
                        .search_classes(&query, page, page_size, None)
                        .await;
                    if !generation.is_current() {
                        tracing::debug!("Discarding stale search results for {:?}", query);
                        return;
                    }
                    search.dispatch(match outcome {
                        Ok(found) => SearchUpdate::Loaded { page, found },
                        Err(e) => SearchUpdate::Failed(e.message()),
                    });
                });
            }
            || ()
        });
    }

    let on_load_more = {
        let page = page.clone();
        Callback::from(move |_| page.set(*page + 1))
    };

    let on_reason_input = {
        let reason = reason.clone();
        Callback::from(move |e: InputEvent| {
            let target: HtmlInputElement = e.target_unchecked_into();
            reason.set(target.value());
        })
    };

    let on_join = {
        let reason = reason.clone();
        let join_notice = join_notice.clone();
        let on_joined = props.on_joined.clone();
        Callback::from(move |class_id: ClassId| {
            let reason = match reason.trim() {
                "" => DEFAULT_REASON.to_string(),
                other => other.to_string(),
            };
            let join_notice = join_notice.clone();
            let on_joined = on_joined.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let notice = match api::client().join_class(class_id, &reason).await {
                    Ok(message) => {
                        on_joined.emit(());
                        message.unwrap_or_else(|| "Request sent".to_string())
                    }
                    Err(e) => e.message(),
                };
                join_notice.set(Some((class_id, notice)));
            });
        })
    };

    let render_class = |class: &ClassInfo| {
        let class_id = class.id;
        let on_join = on_join.clone();
        let notice = (*join_notice)
            .as_ref()
            .filter(|(id, _)| *id == class_id)
            .map(|(_, message)| message.clone());
        html! {
            <li key={class_id} class="search-result">
                <div class="search-result-info">
                    <strong>{ &class.name }</strong>
                    if let Some(owner) = &class.owner {
                        <span class="muted">{ format!(" · {}", owner.label()) }</span>
                    }
                    if let Some(description) = &class.description {
                        <p class="muted">{ description }</p>
                    }
                </div>
                if let Some(notice) = notice {
                    <span class="join-notice">{ notice }</span>
                } else {
                    <button class="btn btn-small" onclick={Callback::from(move |_| on_join.emit(class_id))}>
                        { if class.join_approval_required { "Request to join" } else { "Join" } }
                    </button>
                }
            </li>
        }
    };

    html! {
        <Modal title="Find a class" on_close={props.on_close.clone()}>
            <input
                type="search"
                class="search-input"
                placeholder="Class name"
                value={(*input).clone()}
                oninput={on_input}
            />
            <input
                type="text"
                class="reason-input"
                placeholder="Reason for joining (optional)"
                value={(*reason).clone()}
                oninput={on_reason_input}
            />
            <ErrorLine message={search.0.error.clone()} />
            if search.0.is_empty_result(&query) {
                <p class="empty-state">{ "No classes found." }</p>
            }
            <ul class="search-results">
                { for search.0.results.classes.iter().map(render_class) }
            </ul>
            if search.0.loading {
                <div class="loading"><div class="spinner"></div></div>
            } else if search.0.results.has_more() {
                <button class="btn btn-secondary" onclick={on_load_more}>{ "Load more" }</button>
            }
        </Modal>
    }
}
