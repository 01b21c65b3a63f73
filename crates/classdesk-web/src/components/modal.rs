use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ModalProps {
    pub title: AttrValue,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub children: Html,
}

#[function_component(Modal)]
pub fn modal(props: &ModalProps) -> Html {
    let close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    html! {
        <div class="modal-overlay" onclick={close.clone()}>
            <div class="modal-content" onclick={Callback::from(|e: MouseEvent| e.stop_propagation())}>
                <div class="modal-header">
                    <h3>{ props.title.clone() }</h3>
                    <button class="modal-close" onclick={close}>{"x"}</button>
                </div>
                <div class="modal-body">
                    { props.children.clone() }
                </div>
            </div>
        </div>
    }
}

/// Inline error line used inside forms and modals.
#[derive(Properties, PartialEq)]
pub struct ErrorLineProps {
    pub message: Option<String>,
}

#[function_component(ErrorLine)]
pub fn error_line(props: &ErrorLineProps) -> Html {
    match &props.message {
        Some(message) => html! { <p class="error">{ message }</p> },
        None => html! {},
    }
}
