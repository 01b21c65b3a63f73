use std::rc::Rc;

use classdesk_shared::{TaskBus, TaskEvent};
use yew::prelude::*;

#[derive(Debug, Default, PartialEq)]
struct Revision(u32);

impl Reducible for Revision {
    type Action = ();

    fn reduce(self: Rc<Self>, _: ()) -> Rc<Self> {
        Rc::new(Revision(self.0.wrapping_add(1)))
    }
}

#[hook]
pub fn use_task_bus() -> TaskBus {
    use_context::<TaskBus>().unwrap_or_default()
}

/// Counter that moves every time a task event is published.
///
/// Views put it in their fetch effect's dependencies to re-fetch on change.
#[hook]
pub fn use_task_revision() -> u32 {
    let bus = use_task_bus();
    let revision = use_reducer(Revision::default);

    {
        let revision = revision.dispatcher();
        use_effect_with(bus, move |bus| {
            let subscription = bus.subscribe(move |event: &TaskEvent| {
                tracing::debug!("Task change observed: {:?}", event);
                revision.dispatch(());
            });
            move || drop(subscription)
        });
    }

    revision.0
}

/// Counter plus a callback that bumps it, for "fetch again" triggers.
///
/// Bumps fold into the current count, so two requests finishing before a
/// re-render still move it twice.
#[hook]
pub fn use_reload() -> (u32, Callback<()>) {
    let revision = use_reducer(Revision::default);
    let bump = {
        let dispatcher = revision.dispatcher();
        Callback::from(move |_: ()| dispatcher.dispatch(()))
    };
    (revision.0, bump)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_revision_bumps_compose() {
        let start = Rc::new(Revision::default());
        let held = start.clone();
        let once = start.reduce(());
        let twice = once.reduce(());
        assert_eq!(twice.0, 2);
        assert_eq!(held.0, 0);
    }
}
