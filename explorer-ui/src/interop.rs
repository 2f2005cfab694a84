use std::cell::RefCell;
use std::rc::Rc;

use dioxus_logger::tracing::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, Node};

#[derive(Debug, thiserror::Error)]
pub enum ListenerError {
    #[error("no document available")]
    NoDocument,
    #[error("failed to attach click listener: {0}")]
    Attach(String),
}

/// Somewhere a document-wide click listener can be attached and detached.
pub trait ClickListenerHost {
    type Target: 'static;
    type Registration;

    fn attach(
        &self,
        handler: Box<dyn FnMut(&Self::Target)>,
    ) -> Result<Self::Registration, ListenerError>;

    fn detach(&self, registration: Self::Registration);
}

/// Containment test for a widget's root region.
pub trait Region<T> {
    fn encloses(&self, target: &T) -> bool;
}

impl Region<Node> for Element {
    fn encloses(&self, target: &Node) -> bool {
        Node::contains(self, Some(target))
    }
}

/// Shared slot the widget fills once its root node is mounted.
pub type RootSlot<R> = Rc<RefCell<Option<R>>>;

/// Document click listener that fires `on_outside` for clicks landing outside
/// the root region. Attached on construction, detached exactly once on drop.
pub struct OutsideClickGuard<H: ClickListenerHost> {
    host: H,
    registration: Option<H::Registration>,
}

impl<H: ClickListenerHost> OutsideClickGuard<H> {
    pub fn attach<R>(
        host: H,
        root: RootSlot<R>,
        mut on_outside: impl FnMut() + 'static,
    ) -> Result<Self, ListenerError>
    where
        R: Region<H::Target> + 'static,
    {
        let handler = Box::new(move |target: &H::Target| {
            let outside = match root.borrow().as_ref() {
                Some(node) => !node.encloses(target),
                // Root not mounted yet; nothing to compare against.
                None => false,
            };
            if outside {
                on_outside();
            }
        });

        let registration = host.attach(handler)?;
        debug!("Outside-click listener attached");
        Ok(Self {
            host,
            registration: Some(registration),
        })
    }

    pub fn is_attached(&self) -> bool {
        self.registration.is_some()
    }
}

impl<H: ClickListenerHost> Drop for OutsideClickGuard<H> {
    fn drop(&mut self) {
        if let Some(registration) = self.registration.take() {
            self.host.detach(registration);
            debug!("Outside-click listener released");
        }
    }
}

/// The browser document as a [`ClickListenerHost`].
pub struct BrowserDocument {
    document: Document,
}

impl BrowserDocument {
    #[cfg(target_arch = "wasm32")]
    pub fn current() -> Result<Self, ListenerError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or(ListenerError::NoDocument)?;
        Ok(Self { document })
    }

    /// Native renders (SSR, tests) have no browser globals to reach for.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn current() -> Result<Self, ListenerError> {
        Err(ListenerError::NoDocument)
    }
}

impl ClickListenerHost for BrowserDocument {
    type Target = Node;
    type Registration = Closure<dyn FnMut(Event)>;

    fn attach(
        &self,
        mut handler: Box<dyn FnMut(&Node)>,
    ) -> Result<Self::Registration, ListenerError> {
        let closure = Closure::wrap(Box::new(move |e: Event| {
            let Some(target) = e.target().and_then(|t| t.dyn_into::<Node>().ok()) else {
                return;
            };
            handler(&target);
        }) as Box<dyn FnMut(Event)>);

        self.document
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
            .map_err(|e| ListenerError::Attach(format!("{:?}", e)))?;
        Ok(closure)
    }

    fn detach(&self, registration: Self::Registration) {
        if let Err(e) = self
            .document
            .remove_event_listener_with_callback("click", registration.as_ref().unchecked_ref())
        {
            warn!("Failed to remove click listener: {:?}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    type Handler = Box<dyn FnMut(&u32)>;

    /// Document stand-in: click targets are plain numbers.
    #[derive(Clone, Default)]
    struct FakeDocument {
        handlers: Rc<RefCell<Vec<Option<Handler>>>>,
        detached: Rc<Cell<usize>>,
    }

    impl FakeDocument {
        fn click(&self, target: u32) {
            for handler in self.handlers.borrow_mut().iter_mut().flatten() {
                handler(&target);
            }
        }

        fn live_listeners(&self) -> usize {
            self.handlers.borrow().iter().flatten().count()
        }
    }

    impl ClickListenerHost for FakeDocument {
        type Target = u32;
        type Registration = usize;

        fn attach(&self, handler: Handler) -> Result<usize, ListenerError> {
            let mut handlers = self.handlers.borrow_mut();
            handlers.push(Some(handler));
            Ok(handlers.len() - 1)
        }

        fn detach(&self, registration: usize) {
            self.handlers.borrow_mut()[registration] = None;
            self.detached.set(self.detached.get() + 1);
        }
    }

    /// Region covering a half-open range of targets.
    struct Span(u32, u32);

    impl Region<u32> for Span {
        fn encloses(&self, target: &u32) -> bool {
            (self.0..self.1).contains(target)
        }
    }

    fn counting() -> (Rc<Cell<usize>>, impl FnMut() + 'static) {
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        (hits, move || counter.set(counter.get() + 1))
    }

    #[test]
    fn fires_only_for_clicks_outside_the_root() {
        let doc = FakeDocument::default();
        let root = Rc::new(RefCell::new(Some(Span(10, 20))));
        let (hits, on_outside) = counting();
        let _guard = OutsideClickGuard::attach(doc.clone(), root, on_outside).unwrap();

        doc.click(15);
        assert_eq!(hits.get(), 0);
        doc.click(42);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn unmounted_root_is_a_no_op() {
        let doc = FakeDocument::default();
        let root: RootSlot<Span> = Rc::new(RefCell::new(None));
        let (hits, on_outside) = counting();
        let _guard = OutsideClickGuard::attach(doc.clone(), root.clone(), on_outside).unwrap();

        doc.click(42);
        assert_eq!(hits.get(), 0);

        *root.borrow_mut() = Some(Span(0, 5));
        doc.click(42);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn drop_detaches_exactly_once() {
        let doc = FakeDocument::default();
        let root = Rc::new(RefCell::new(Some(Span(0, 5))));
        let (hits, on_outside) = counting();
        let guard = OutsideClickGuard::attach(doc.clone(), root, on_outside).unwrap();
        assert!(guard.is_attached());
        assert_eq!(doc.live_listeners(), 1);

        drop(guard);
        doc.click(42);

        assert_eq!(hits.get(), 0);
        assert_eq!(doc.live_listeners(), 0);
        assert_eq!(doc.detached.get(), 1);
    }

    #[test]
    fn each_guard_owns_its_listener() {
        let doc = FakeDocument::default();
        let (first_hits, first) = counting();
        let (second_hits, second) = counting();
        let first = OutsideClickGuard::attach(
            doc.clone(),
            Rc::new(RefCell::new(Some(Span(0, 10)))),
            first,
        )
        .unwrap();
        let _second = OutsideClickGuard::attach(
            doc.clone(),
            Rc::new(RefCell::new(Some(Span(10, 20)))),
            second,
        )
        .unwrap();
        assert_eq!(doc.live_listeners(), 2);

        doc.click(5);
        assert_eq!((first_hits.get(), second_hits.get()), (0, 1));

        drop(first);
        doc.click(15);
        assert_eq!((first_hits.get(), second_hits.get()), (0, 1));
        doc.click(25);
        assert_eq!((first_hits.get(), second_hits.get()), (0, 2));
        assert_eq!(doc.live_listeners(), 1);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn native_targets_have_no_document() {
        assert!(matches!(
            BrowserDocument::current(),
            Err(ListenerError::NoDocument)
        ));
    }
}
