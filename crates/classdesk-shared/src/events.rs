//! Task-change notifications between views.
//!
//! A view that mutates tasks publishes on the bus; views that display tasks
//! subscribe and re-fetch. Dropping the [`Subscription`] unsubscribes.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::models::{ClassId, TaskId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskEvent {
    Created { task_id: Option<TaskId> },
    Updated { task_id: TaskId },
    Deleted { task_id: TaskId },
    /// Class tasks were copied into the personal calendar
    Synced { class_id: ClassId },
}

type Listener = Rc<dyn Fn(&TaskEvent)>;

#[derive(Default)]
struct BusInner {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

/// Cloneable handle; all clones share one listener list.
#[derive(Clone, Default)]
pub struct TaskBus {
    inner: Rc<RefCell<BusInner>>,
}

impl PartialEq for TaskBus {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl std::fmt::Debug for TaskBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl TaskBus {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, listener: impl Fn(&TaskEvent) + 'static) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.push((id, Rc::new(listener)));
        Subscription {
            id,
            bus: Rc::downgrade(&self.inner),
        }
    }

    /// Deliver `event` to every current subscriber.
    pub fn publish(&self, event: TaskEvent) {
        // Snapshot so listeners may subscribe or unsubscribe while running.
        let listeners: Vec<Listener> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        tracing::debug!("Publishing {:?} to {} subscribers", event, listeners.len());
        for listener in listeners {
            listener(&event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

/// Live registration on a [`TaskBus`]
pub struct Subscription {
    id: u64,
    bus: Weak<RefCell<BusInner>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.bus.upgrade() {
            inner
                .borrow_mut()
                .listeners
                .retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_publish_reaches_subscribers() {
        let bus = TaskBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let _sub = bus.subscribe(move |event| sink.borrow_mut().push(event.clone()));

        bus.publish(TaskEvent::Deleted { task_id: 4 });
        bus.clone().publish(TaskEvent::Synced { class_id: 2 });

        assert_eq!(
            *seen.borrow(),
            vec![
                TaskEvent::Deleted { task_id: 4 },
                TaskEvent::Synced { class_id: 2 }
            ]
        );
    }

    #[test]
    fn test_drop_unsubscribes() {
        let bus = TaskBus::new();
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let sub = bus.subscribe(move |_| counter.set(counter.get() + 1));
        let _other = bus.subscribe(|_| {});
        assert_eq!(bus.subscriber_count(), 2);

        bus.publish(TaskEvent::Updated { task_id: 1 });
        drop(sub);
        assert_eq!(bus.subscriber_count(), 1);
        bus.publish(TaskEvent::Updated { task_id: 1 });
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_subscription_outlives_bus() {
        let bus = TaskBus::new();
        let sub = bus.subscribe(|_| {});
        drop(bus);
        drop(sub);
    }

    #[test]
    fn test_bus_identity() {
        let bus = TaskBus::new();
        assert_eq!(bus, bus.clone());
        assert_ne!(bus, TaskBus::new());
    }
}
