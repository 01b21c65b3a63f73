use std::rc::Rc;

use chrono::{Local, NaiveDate};
use classdesk_shared::calendar::{MonthCursor, MonthGrid, WEEKDAY_LABELS};
use classdesk_shared::dates::{day_key, end_of_day};
use classdesk_shared::models::Task;
use classdesk_shared::RequestGenerations;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::calendar_day::CalendarDay;
use crate::components::class_panel::ClassPanel;
use crate::components::task_create::TaskCreateModal;
use crate::context::task_bus::use_task_revision;
use crate::router::Route;
use crate::services::api;

#[function_component(CalendarPage)]
pub fn calendar_page() -> Html {
    let today = Local::now().date_naive();
    let cursor = use_state(|| MonthCursor::containing(today));
    let tasks = use_state(|| Rc::new(Vec::<Task>::new()));
    let loading = use_state(|| true);
    let creating = use_state(|| false);
    let revision = use_task_revision();
    let generations = use_memo((), |_| RequestGenerations::new());
    let navigator = use_navigator();

    {
        let tasks = tasks.clone();
        let loading = loading.clone();
        let generations = generations.clone();
        use_effect_with((*cursor, revision), move |(cursor, _)| {
            let cursor = *cursor;
            let generation = generations.begin();
            loading.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                let fetched = api::client().calendar(cursor.year, cursor.month).await;
                // A later month switch may have overtaken this request
                if generation.is_current() {
                    tasks.set(Rc::new(fetched));
                    loading.set(false);
                }
            });
            || ()
        });
    }

    let on_prev = {
        let cursor = cursor.clone();
        Callback::from(move |_| cursor.set(cursor.previous()))
    };
    let on_next = {
        let cursor = cursor.clone();
        Callback::from(move |_| cursor.set(cursor.next()))
    };
    let on_today = {
        let cursor = cursor.clone();
        Callback::from(move |_| cursor.set(MonthCursor::containing(today)))
    };
    let on_select = Callback::from(move |date: NaiveDate| {
        if let Some(navigator) = &navigator {
            navigator.push(&Route::Day { date: day_key(date) });
        }
    });
    let open_create = {
        let creating = creating.clone();
        Callback::from(move |_| creating.set(true))
    };
    let close_create = {
        let creating = creating.clone();
        Callback::from(move |_| creating.set(false))
    };

    let grid = MonthGrid::build(*cursor, today);

    html! {
        <div class="container calendar-layout">
            <ClassPanel />
            <section class="calendar">
                <div class="calendar-header">
                    <button class="btn btn-small" onclick={on_prev}>{ "<" }</button>
                    <h2>{ cursor.title() }</h2>
                    <button class="btn btn-small" onclick={on_next}>{ ">" }</button>
                    <button class="btn btn-small" onclick={on_today}>{ "Today" }</button>
                    <button class="btn btn-primary" onclick={open_create}>{ "New task" }</button>
                    if *loading {
                        <span class="spinner small"></span>
                    }
                </div>
                <div class="calendar-grid">
                    <div class="calendar-week weekday-labels">
                        { for WEEKDAY_LABELS.iter().map(|label| html! {
                            <div class="weekday-label">{ *label }</div>
                        }) }
                    </div>
                    { for grid.weeks().map(|week| html! {
                        <div class="calendar-week">
                            { for week.iter().map(|cell| html! {
                                <CalendarDay
                                    key={cell.key()}
                                    cell={*cell}
                                    tasks={(*tasks).clone()}
                                    on_select={on_select.clone()}
                                />
                            }) }
                        </div>
                    }) }
                </div>
            </section>
            if *creating {
                <TaskCreateModal
                    default_deadline={end_of_day(today)}
                    on_close={close_create}
                />
            }
        </div>
    }
}
