use chrono::NaiveDate;
use classdesk_shared::calendar::{DayTasks, MonthCursor};
use classdesk_shared::dates::{self, DAY_FORMAT};
use classdesk_shared::models::Task;
use classdesk_shared::RequestGenerations;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::task_create::TaskCreateModal;
use crate::components::task_editor::TaskEditor;
use crate::context::task_bus::use_task_revision;
use crate::pages::not_found::NotFound;
use crate::router::Route;
use crate::services::api;

#[derive(Properties, PartialEq)]
pub struct DayDetailProps {
    /// `YYYY-MM-DD`
    pub date: String,
}

#[function_component(DayDetail)]
pub fn day_detail(props: &DayDetailProps) -> Html {
    match NaiveDate::parse_from_str(&props.date, DAY_FORMAT) {
        Ok(date) => html! { <DayView {date} /> },
        Err(_) => html! { <NotFound /> },
    }
}

#[derive(Properties, PartialEq)]
struct DayViewProps {
    date: NaiveDate,
}

#[function_component(DayView)]
fn day_view(props: &DayViewProps) -> Html {
    let date = props.date;
    let tasks = use_state(Vec::<Task>::new);
    let loading = use_state(|| true);
    let editing = use_state(|| None::<Task>);
    let creating = use_state(|| false);
    let revision = use_task_revision();
    let generations = use_memo((), |_| RequestGenerations::new());

    {
        let tasks = tasks.clone();
        let loading = loading.clone();
        let generations = generations.clone();
        use_effect_with((date, revision), move |(date, _)| {
            let cursor = MonthCursor::containing(*date);
            let generation = generations.begin();
            wasm_bindgen_futures::spawn_local(async move {
                let fetched = api::client().calendar(cursor.year, cursor.month).await;
                if generation.is_current() {
                    tasks.set(fetched);
                    loading.set(false);
                }
            });
            || ()
        });
    }

    let on_edit = {
        let editing = editing.clone();
        Callback::from(move |task: Task| editing.set(Some(task)))
    };
    let close_editor = {
        let editing = editing.clone();
        Callback::from(move |_| editing.set(None))
    };
    let open_create = {
        let creating = creating.clone();
        Callback::from(move |_| creating.set(true))
    };
    let close_create = {
        let creating = creating.clone();
        Callback::from(move |_| creating.set(false))
    };

    let day = DayTasks::collect(date, &tasks);
    let render_list = |items: &[&Task], empty: &str| -> Html {
        if items.is_empty() {
            return html! { <p class="empty-state">{ empty.to_string() }</p> };
        }
        html! {
            <ul class="task-list">
                { for items.iter().map(|task| {
                    let task = (*task).clone();
                    let onclick = on_edit.reform({
                        let task = task.clone();
                        move |_: MouseEvent| task.clone()
                    });
                    html! {
                        <li key={task.id} class={classes!("task-row", format!("status-{}", task.status.as_str()))} {onclick}>
                            <span class="task-title">{ &task.title }</span>
                            if let Some(class_name) = &task.class_name {
                                <span class="task-class muted">{ format!(" · {}", class_name) }</span>
                            }
                            <span class="task-status">{ task.status.label() }</span>
                            if let Some(due) = &task.due_date {
                                <span class="muted">{ format!(" · due {}", dates::to_input_value(due).replace('T', " ")) }</span>
                            }
                        </li>
                    }
                }) }
            </ul>
        }
    };

    html! {
        <div class="container day-detail">
            <div class="day-detail-header">
                <Link<Route> to={Route::Calendar}>{ "< Calendar" }</Link<Route>>
                <h2>{ date.format("%A, %B %-d, %Y").to_string() }</h2>
                <button class="btn btn-primary" onclick={open_create}>{ "New task" }</button>
            </div>
            if *loading {
                <div class="loading"><div class="spinner"></div></div>
            } else {
                <section>
                    <h3>{ "Due" }</h3>
                    { render_list(&day.due, "Nothing due this day.") }
                </section>
                <section>
                    <h3>{ "Created" }</h3>
                    { render_list(&day.created, "No tasks were created this day.") }
                </section>
            }
            if let Some(task) = &*editing {
                <TaskEditor task={task.clone()} on_close={close_editor} />
            }
            if *creating {
                <TaskCreateModal default_deadline={dates::end_of_day(date)} on_close={close_create} />
            }
        </div>
    }
}
