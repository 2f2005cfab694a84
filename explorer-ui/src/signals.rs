//! Explorer-wide publish/subscribe channel.
//!
//! Components never reach for a global channel; they receive a [`SignalHub`]
//! from their parent and publish into whatever [`SignalChannel`] backs it.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use dioxus_logger::tracing::{debug, trace};
use shared_types::{ExperimentSelected, TabChanged};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalKind {
    TabChanged,
    ExperimentSelected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExplorerSignal {
    TabChanged(TabChanged),
    ExperimentSelected(ExperimentSelected),
}

impl ExplorerSignal {
    pub fn kind(&self) -> SignalKind {
        match self {
            ExplorerSignal::TabChanged(_) => SignalKind::TabChanged,
            ExplorerSignal::ExperimentSelected(_) => SignalKind::ExperimentSelected,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub type SignalHandler = Rc<dyn Fn(&ExplorerSignal)>;

/// Fire-and-forget broadcast channel shared by explorer components.
pub trait SignalChannel {
    fn publish(&self, signal: ExplorerSignal);

    fn subscribe(&self, kind: SignalKind, handler: SignalHandler) -> SubscriptionId;

    /// Returns false when the subscription was already gone.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}

/// Cheap, clonable handle to a [`SignalChannel`], passed down as a prop.
///
/// Two hubs compare equal only when they point at the same channel, which is
/// what Dioxus needs to decide whether a prop changed.
#[derive(Clone)]
pub struct SignalHub(Rc<dyn SignalChannel>);

impl SignalHub {
    pub fn new(channel: impl SignalChannel + 'static) -> Self {
        Self(Rc::new(channel))
    }

    pub fn local() -> Self {
        Self::new(LocalSignalBus::default())
    }

    pub fn publish(&self, signal: ExplorerSignal) {
        self.0.publish(signal);
    }

    pub fn subscribe(
        &self,
        kind: SignalKind,
        handler: impl Fn(&ExplorerSignal) + 'static,
    ) -> SubscriptionId {
        self.0.subscribe(kind, Rc::new(handler))
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.0.unsubscribe(id)
    }

    /// Broadcast a live rename preview for an experiment.
    pub fn fire_tab_changed(&self, name: impl Into<String>, experiment_uuid: impl Into<String>) {
        self.publish(ExplorerSignal::TabChanged(TabChanged {
            name: name.into(),
            experiment_uuid: experiment_uuid.into(),
        }));
    }

    pub fn fire_experiment_selected(&self, experiment_uuid: impl Into<String>) {
        self.publish(ExplorerSignal::ExperimentSelected(ExperimentSelected {
            experiment_uuid: experiment_uuid.into(),
        }));
    }
}

impl PartialEq for SignalHub {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for SignalHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SignalHub")
            .field(&Rc::as_ptr(&self.0).cast::<()>())
            .finish()
    }
}

struct Subscriber {
    id: SubscriptionId,
    kind: SignalKind,
    handler: SignalHandler,
}

/// In-process, single-threaded signal bus.
///
/// Handlers run synchronously in subscription order.
#[derive(Default)]
pub struct LocalSignalBus {
    next_id: Cell<u64>,
    subscribers: RefCell<Vec<Subscriber>>,
}

impl LocalSignalBus {
    #[cfg(test)]
    fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }
}

impl SignalChannel for LocalSignalBus {
    fn publish(&self, signal: ExplorerSignal) {
        let kind = signal.kind();
        // Snapshot so handlers may (un)subscribe while we dispatch.
        let handlers: Vec<SignalHandler> = self
            .subscribers
            .borrow()
            .iter()
            .filter(|s| s.kind == kind)
            .map(|s| s.handler.clone())
            .collect();

        if handlers.is_empty() {
            trace!("No subscribers for {:?}", kind);
            return;
        }

        for handler in handlers {
            handler(&signal);
        }
    }

    fn subscribe(&self, kind: SignalKind, handler: SignalHandler) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.subscribers.borrow_mut().push(Subscriber { id, kind, handler });
        debug!("Subscribed {:?} to {:?}", id, kind);
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|s| s.id != id);
        before != subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(hub: &SignalHub, kind: SignalKind) -> Rc<RefCell<Vec<ExplorerSignal>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        hub.subscribe(kind, move |signal| sink.borrow_mut().push(signal.clone()));
        seen
    }

    #[test]
    fn delivers_only_matching_kind() {
        let hub = SignalHub::local();
        let tabs = collect(&hub, SignalKind::TabChanged);
        let selections = collect(&hub, SignalKind::ExperimentSelected);

        hub.fire_tab_changed("draft", "exp-1");

        assert_eq!(
            *tabs.borrow(),
            vec![ExplorerSignal::TabChanged(TabChanged {
                name: "draft".to_string(),
                experiment_uuid: "exp-1".to_string(),
            })]
        );
        assert!(selections.borrow().is_empty());
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let bus = LocalSignalBus::default();
        let count = Rc::new(Cell::new(0));
        let counter = count.clone();
        let id = bus.subscribe(
            SignalKind::ExperimentSelected,
            Rc::new(move |_: &ExplorerSignal| counter.set(counter.get() + 1)),
        );

        let selected = || {
            ExplorerSignal::ExperimentSelected(ExperimentSelected {
                experiment_uuid: "exp-1".to_string(),
            })
        };
        bus.publish(selected());
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.publish(selected());

        assert_eq!(count.get(), 1);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn handler_may_subscribe_during_publish() {
        let hub = SignalHub::local();
        let inner_hub = hub.clone();
        let late = Rc::new(Cell::new(0));
        let late_counter = late.clone();
        hub.subscribe(SignalKind::TabChanged, move |_| {
            let counter = late_counter.clone();
            inner_hub.subscribe(SignalKind::TabChanged, move |_| {
                counter.set(counter.get() + 1)
            });
        });

        hub.fire_tab_changed("a", "exp-1");
        assert_eq!(late.get(), 0, "new subscriber must not see the signal in flight");

        hub.fire_tab_changed("ab", "exp-1");
        assert_eq!(late.get(), 1);
    }

    #[test]
    fn hubs_compare_by_channel_identity() {
        let hub = SignalHub::local();
        assert_eq!(hub, hub.clone());
        assert_ne!(hub, SignalHub::local());
    }
}
