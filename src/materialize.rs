//! Materializer: build live nodes from virtual nodes
//!
//! A materialized subtree is complete before it is returned: attributes
//! set, handlers bound, children appended in order. The first host failure
//! aborts the whole subtree and is returned unchanged; nothing is rolled back.

use tracing::trace;

use crate::attr::{AttrValue, event_name};
use crate::host::Host;
use crate::node::{Element, VNode};

/// Create a live node (and all descendants) for `node`.
pub fn materialize<H: Host>(host: &mut H, node: &VNode) -> Result<H::Node, H::Error> {
    match node {
        VNode::Leaf(p) => {
            let text = p.to_text();
            trace!(text = %text, "materialize text");
            host.create_text(&text)
        }
        VNode::Element(elem) => materialize_element(host, elem),
    }
}

fn materialize_element<H: Host>(host: &mut H, elem: &Element) -> Result<H::Node, H::Error> {
    trace!(tag = %elem.tag, attrs = elem.attrs.len(), children = elem.children.len(), "materialize element");
    let live = host.create_element(&elem.tag)?;

    for (key, value) in &elem.attrs {
        match value {
            AttrValue::Handler(handler) => {
                host.add_event_listener(&live, event_name(key), handler.clone())?;
            }
            AttrValue::Literal(literal) => host.set_attribute(&live, key, literal)?,
        }
    }

    for child in &elem.children {
        let child_live = materialize(host, child)?;
        host.append_child(&live, &child_live)?;
    }

    Ok(live)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventHandler;
    use crate::memory::{MemoryError, MemoryHost, Mutation};
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_materialize_leaf() {
        let mut host = MemoryHost::new();
        let text = materialize(&mut host, &VNode::from("hello")).unwrap();
        assert_eq!(host.text(text), Some("hello"));

        let number = materialize(&mut host, &VNode::from(42)).unwrap();
        assert_eq!(host.text(number), Some("42"));
    }

    #[test]
    fn test_materialize_element_tree() {
        let mut host = MemoryHost::new();
        let node = h!("div", { "class" => "app", "id" => "root" },
            h!("h1", {}, "Title"),
            "body text",
            h!("input", { "value" => "abc" }),
        );

        let live = materialize(&mut host, &node).unwrap();

        assert_eq!(host.tag(live), Some("div"));
        assert_eq!(host.attribute(live, "class"), Some("app"));
        assert_eq!(host.attribute(live, "id"), Some("root"));
        assert_eq!(host.children(live).len(), 3);
        assert_eq!(
            host.to_html(live),
            r#"<div class="app" id="root"><h1>Title</h1>body text<input value="abc" /></div>"#
        );
    }

    #[test]
    fn test_materialize_binds_handlers_without_prefix() {
        let mut host = MemoryHost::new();
        let clicks = Rc::new(Cell::new(0));
        let counter = Rc::clone(&clicks);
        let node = h!("button", {
            "onclick" => EventHandler::new(move |_| counter.set(counter.get() + 1)),
            "type" => "button",
        }, "Go");

        let live = materialize(&mut host, &node).unwrap();

        assert_eq!(host.listener_count(live), 1);
        assert_eq!(host.attribute(live, "onclick"), None);
        assert_eq!(host.attribute(live, "type"), Some("button"));
        assert!(host.mutations().iter().any(
            |m| matches!(m, Mutation::AddListener { event, .. } if event == "click")
        ));

        assert_eq!(host.dispatch(live, "click"), 1);
        assert_eq!(clicks.get(), 1);
    }

    #[test]
    fn test_materialize_preserves_child_order() {
        let mut host = MemoryHost::new();
        let node = h!("ol", {}, h!("li", {}, "a"), h!("li", {}, "b"), h!("li", {}, "c"));
        let live = materialize(&mut host, &node).unwrap();
        assert_eq!(host.to_html(live), "<ol><li>a</li><li>b</li><li>c</li></ol>");
    }

    #[test]
    fn test_materialize_surfaces_host_failure() {
        let mut host = MemoryHost::new();
        let node = h!("div", {}, h!(""));
        let err = materialize(&mut host, &node).unwrap_err();
        assert!(matches!(err, MemoryError::EmptyTag));
    }
}
