use std::rc::Rc;

use chrono::{Datelike, NaiveDate};
use classdesk_shared::calendar::{DayCell, DayTasks};
use classdesk_shared::models::Task;
use yew::prelude::*;

use crate::components::task_marker::TaskMarker;

#[derive(Properties, PartialEq)]
pub struct CalendarDayProps {
    pub cell: DayCell,
    pub tasks: Rc<Vec<Task>>,
    pub on_select: Callback<NaiveDate>,
}

#[function_component(CalendarDay)]
pub fn calendar_day(props: &CalendarDayProps) -> Html {
    let cell = props.cell;
    let day = DayTasks::collect(cell.date, &props.tasks);
    let markers = day.markers();
    let overflow = day.overflow();

    let onclick = {
        let on_select = props.on_select.clone();
        Callback::from(move |_| on_select.emit(cell.date))
    };

    let class_name = classes!(
        "calendar-day",
        (!cell.in_current_month).then_some("other-month"),
        cell.is_today.then_some("today"),
        (!day.is_empty()).then_some("has-tasks"),
    );

    html! {
        <div class={class_name} {onclick}>
            <div class="day-number">{ cell.date.day() }</div>
            <div class="day-markers">
                { for markers.iter().map(|marker| html! {
                    <TaskMarker key={format!("{}-{}", marker.kind.as_str(), marker.task.id)}
                        task={marker.task.clone()} kind={marker.kind} />
                }) }
                if overflow > 0 {
                    <div class="marker-overflow">{ format!("+{}", overflow) }</div>
                }
            </div>
            if !day.is_empty() {
                <div class="day-popover">
                    if !day.created.is_empty() {
                        <div class="popover-section">
                            <span class="popover-label">{ "Created" }</span>
                            <ul>
                                { for day.created.iter().map(|task| html! { <li>{ &task.title }</li> }) }
                            </ul>
                        </div>
                    }
                    if !day.due.is_empty() {
                        <div class="popover-section">
                            <span class="popover-label">{ "Due" }</span>
                            <ul>
                                { for day.due.iter().map(|task| html! { <li>{ &task.title }</li> }) }
                            </ul>
                        </div>
                    }
                </div>
            }
        </div>
    }
}
