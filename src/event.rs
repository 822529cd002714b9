//! Event payload and handler handles
//!
//! Handlers are reference counted closures. Cloning an `EventHandler`
//! shares the same callback, so a virtual tree can be rebuilt every render
//! without reallocating the closures it binds.

use std::fmt;
use std::rc::Rc;

use compact_str::CompactString;

// =============================================================================
// Event
// =============================================================================

/// Event delivered to a bound handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Event name without the `on` prefix (`click`, `input`, ...)
    pub name: CompactString,
    /// Current editable value of the target node, if it has one
    pub value: Option<String>,
}

impl Event {
    /// Create an event with no target value.
    pub fn new(name: impl Into<CompactString>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    /// Attach the target's editable value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

// =============================================================================
// EventHandler
// =============================================================================

/// Shared event callback.
#[derive(Clone)]
pub struct EventHandler(Rc<dyn Fn(&Event)>);

impl EventHandler {
    /// Wrap a closure.
    pub fn new(f: impl Fn(&Event) + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Invoke the callback.
    #[inline]
    pub fn call(&self, event: &Event) {
        (self.0)(event)
    }

    /// Whether both handles share the same callback.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for EventHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventHandler({:p})", Rc::as_ptr(&self.0).cast::<()>())
    }
}

impl<F: Fn(&Event) + 'static> From<F> for EventHandler {
    fn from(f: F) -> Self {
        Self::new(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_handler_call_and_share() {
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let handler = EventHandler::new(move |e| {
            assert_eq!(e.name, "click");
            counter.set(counter.get() + 1);
        });

        let shared = handler.clone();
        handler.call(&Event::new("click"));
        shared.call(&Event::new("click"));

        assert_eq!(hits.get(), 2);
        assert!(handler.ptr_eq(&shared));
        assert!(!handler.ptr_eq(&EventHandler::new(|_| {})));
    }

    #[test]
    fn test_event_with_value() {
        let event = Event::new("input").with_value("abc");
        assert_eq!(event.value.as_deref(), Some("abc"));
    }
}
