//! HTML serialization of fragment nodes.

use super::arena::{Fragment, NodeData, NodeId};

/// Elements written as `<name/>` with no end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Escape text content (`&`, `<`, `>`).
pub fn escape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape a double-quoted attribute value.
pub fn escape_attr(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    result
}

fn is_void(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

/// Write the start tag of element `id` (`<br/>` for void elements).
pub fn write_start_tag(fragment: &Fragment, id: NodeId, out: &mut String) {
    let Some(NodeData::Element { name, attrs, .. }) = fragment.get(id).map(|n| &n.data) else {
        return;
    };

    out.push('<');
    out.push_str(&name.local);
    for attr in attrs {
        out.push(' ');
        out.push_str(&attr.name.local);
        out.push_str("=\"");
        out.push_str(&escape_attr(&attr.value));
        out.push('"');
    }
    if is_void(&name.local) {
        out.push('/');
    }
    out.push('>');
}

/// Write the end tag of element `id`; nothing for void elements.
pub fn write_end_tag(fragment: &Fragment, id: NodeId, out: &mut String) {
    if let Some(name) = fragment.element_name(id)
        && !is_void(name)
    {
        out.push_str("</");
        out.push_str(name);
        out.push('>');
    }
}

/// Serialize a node and everything below it.
pub fn serialize_node(fragment: &Fragment, id: NodeId, out: &mut String) {
    let Some(node) = fragment.get(id) else {
        return;
    };

    match &node.data {
        NodeData::Text(text) => out.push_str(&escape_text(text)),
        NodeData::Comment(text) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
        NodeData::Element { .. } => {
            write_start_tag(fragment, id, out);
            for child in fragment.children(id) {
                serialize_node(fragment, child, out);
            }
            write_end_tag(fragment, id, out);
        }
        NodeData::Document => {
            for child in fragment.children(id) {
                serialize_node(fragment, child, out);
            }
        }
        NodeData::Doctype => {}
    }
}

/// Serialize the children of `id` (the node itself is not written).
pub fn serialize_children(fragment: &Fragment, id: NodeId) -> String {
    let mut out = String::new();
    for child in fragment.children(id) {
        serialize_node(fragment, child, &mut out);
    }
    out
}
