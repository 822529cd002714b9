//! HTML rendering
//!
//! Serializes virtual trees to HTML strings. Handlers have no textual form
//! and are omitted. The same writers serialize `MemoryHost` subtrees, so a
//! patched live tree can be compared with a fresh render of its virtual tree.

use crate::node::{Element, VNode};

// =============================================================================
// Virtual tree rendering
// =============================================================================

/// Render a virtual node to an HTML string.
pub fn to_html(node: &VNode) -> String {
    let mut output = String::new();
    write_html(node, &mut output);
    output
}

/// Append the HTML form of `node` to `output`.
pub fn write_html(node: &VNode, output: &mut String) {
    match node {
        VNode::Element(elem) => write_element(elem, output),
        VNode::Leaf(p) => write_text(&p.to_text(), output),
    }
}

fn write_element(elem: &Element, output: &mut String) {
    let has_children = !elem.children.is_empty();
    if !write_open_tag(&elem.tag, elem.literal_attrs(), has_children, output) {
        return;
    }
    for child in &elem.children {
        write_html(child, output);
    }
    write_close_tag(&elem.tag, output);
}

// =============================================================================
// Shared writers
// =============================================================================

/// Elements written in self-closing form when they have no children.
const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Write `<tag attrs>`.
///
/// A childless void element is closed immediately (`<tag attrs />`) and
/// `false` is returned: no children or closing tag may follow. A void
/// element that does have children is written in full so none are lost.
pub(crate) fn write_open_tag<'a>(
    tag: &str,
    attrs: impl IntoIterator<Item = (&'a str, &'a str)>,
    has_children: bool,
    output: &mut String,
) -> bool {
    output.push('<');
    output.push_str(tag);
    for (name, value) in attrs {
        output.push(' ');
        output.push_str(name);
        output.push_str("=\"");
        push_escaped(value, Context::Attr, output);
        output.push('"');
    }

    if !has_children && is_void_element(tag) {
        output.push_str(" />");
        return false;
    }
    output.push('>');
    true
}

pub(crate) fn write_close_tag(tag: &str, output: &mut String) {
    output.push_str("</");
    output.push_str(tag);
    output.push('>');
}

pub(crate) fn write_text(text: &str, output: &mut String) {
    push_escaped(text, Context::Text, output);
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Context {
    Text,
    Attr,
}

/// Append `s` with markup characters replaced by entities.
///
/// Quotes are only significant inside attribute values.
fn push_escaped(s: &str, ctx: Context, output: &mut String) {
    output.reserve(s.len());
    for c in s.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' if ctx == Context::Attr => output.push_str("&quot;"),
            _ => output.push(c),
        }
    }
}

fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

// =============================================================================
// Tests
// =============================================================================
