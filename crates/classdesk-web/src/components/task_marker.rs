use classdesk_shared::calendar::MarkerKind;
use classdesk_shared::models::Task;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TaskMarkerProps {
    pub task: Task,
    pub kind: MarkerKind,
}

#[function_component(TaskMarker)]
pub fn task_marker(props: &TaskMarkerProps) -> Html {
    let task = &props.task;
    let style = task
        .course_color
        .as_deref()
        .map(|color| format!("border-left-color: {}", color))
        .unwrap_or_default();
    let class_name = classes!(
        "marker",
        format!("marker-{}", props.kind.as_str()),
        format!("status-{}", task.status.as_str()),
        task.is_class_task().then_some("marker-class"),
    );

    html! {
        <div class={class_name} {style} title={task.title.clone()}>
            { &task.title }
        </div>
    }
}
