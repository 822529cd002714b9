//! Attribute system for virtual elements
//!
//! Attributes are stored as a plain vector of key/value pairs. Keys are kept
//! unique by `AttrsExt::set_attr`, ordering carries no meaning.
//!
//! A value is either a literal string or an event handler. Handlers are a
//! separate variant so that diffing and materializing never have to guess
//! from the key whether a slot holds a callback.

use compact_str::CompactString;

use crate::event::EventHandler;

/// Attribute name
pub type AttrKey = CompactString;

/// Prefix carried by event handler keys (`onclick`, `oninput`).
pub const HANDLER_PREFIX: &str = "on";

/// Attribute value: literal text or a bound event handler
#[derive(Debug, Clone)]
pub enum AttrValue {
    /// Plain attribute text
    Literal(CompactString),
    /// Event callback, bound as a listener instead of an attribute
    Handler(EventHandler),
}

impl AttrValue {
    /// Literal text, if this is not a handler
    #[inline]
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Self::Literal(v) => Some(v),
            Self::Handler(_) => None,
        }
    }

    /// Handler, if this is not a literal
    #[inline]
    pub fn as_handler(&self) -> Option<&EventHandler> {
        match self {
            Self::Handler(h) => Some(h),
            Self::Literal(_) => None,
        }
    }

    /// Whether this slot holds an event handler
    #[inline]
    pub fn is_handler(&self) -> bool {
        matches!(self, Self::Handler(_))
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        Self::Literal(v.into())
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        Self::Literal(v.into())
    }
}

impl From<CompactString> for AttrValue {
    fn from(v: CompactString) -> Self {
        Self::Literal(v)
    }
}

impl From<EventHandler> for AttrValue {
    fn from(h: EventHandler) -> Self {
        Self::Handler(h)
    }
}

/// Element attributes as simple key-value pairs
pub type Attrs = Vec<(AttrKey, AttrValue)>;

/// Derive the event name a handler key binds to.
///
/// The `on` prefix is matched case-sensitively; keys without it are used
/// verbatim.
pub fn event_name(key: &str) -> &str {
    key.strip_prefix(HANDLER_PREFIX).unwrap_or(key)
}

/// Extension trait for attribute operations on Attrs
pub trait AttrsExt {
    /// Get an attribute value by name
    fn get_attr(&self, name: &str) -> Option<&AttrValue>;

    /// Get a literal attribute value by name (handlers yield `None`)
    fn get_literal(&self, name: &str) -> Option<&str>;

    /// Check if an attribute exists
    fn has_attr(&self, name: &str) -> bool;

    /// Set an attribute value (insert or update)
    fn set_attr(&mut self, name: impl Into<AttrKey>, value: impl Into<AttrValue>);

    /// Remove an attribute by name, returning the old value if present
    fn remove_attr(&mut self, name: &str) -> Option<AttrValue>;

    /// Iterate over literal attributes, skipping handlers
    fn literals(&self) -> impl Iterator<Item = (&str, &str)>;

    /// Iterate over handler attributes
    fn handlers(&self) -> impl Iterator<Item = (&str, &EventHandler)>;
}

impl AttrsExt for Attrs {
    fn get_attr(&self, name: &str) -> Option<&AttrValue> {
        self.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    fn get_literal(&self, name: &str) -> Option<&str> {
        self.get_attr(name).and_then(AttrValue::as_literal)
    }

    fn has_attr(&self, name: &str) -> bool {
        self.iter().any(|(k, _)| k == name)
    }

    fn set_attr(&mut self, name: impl Into<AttrKey>, value: impl Into<AttrValue>) {
        let name = name.into();
        let value = value.into();
        if let Some(attr) = self.iter_mut().find(|(k, _)| *k == name) {
            attr.1 = value;
        } else {
            self.push((name, value));
        }
    }

    fn remove_attr(&mut self, name: &str) -> Option<AttrValue> {
        self.iter()
            .position(|(k, _)| k == name)
            .map(|pos| self.remove(pos).1)
    }

    fn literals(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter()
            .filter_map(|(k, v)| v.as_literal().map(|v| (k.as_str(), v)))
    }

    fn handlers(&self) -> impl Iterator<Item = (&str, &EventHandler)> {
        self.iter()
            .filter_map(|(k, v)| v.as_handler().map(|h| (k.as_str(), h)))
    }
}

// =============================================================================
// Tests
// =============================================================================
