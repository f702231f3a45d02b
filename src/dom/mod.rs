//! Markup fragments: parsing one entry's definition markup into an arena tree
//! and writing nodes back out as HTML.
//!
//! # Example
//!
//! ```
//! use chmdict::dom::{parse_fragment, serialize_children};
//!
//! let fragment = parse_fragment(r#"<span class="m2">a <b>b</b></span>"#);
//! assert_eq!(
//!     serialize_children(&fragment, fragment.root()),
//!     r#"<span class="m2">a <b>b</b></span>"#
//! );
//! ```

mod arena;
mod serialize;
mod tree_sink;

pub use arena::{Attribute, Children, Fragment, Node, NodeData, NodeId};
pub use serialize::{
    escape_attr, escape_text, serialize_children, serialize_node, write_end_tag, write_start_tag,
};
pub use tree_sink::FragmentSink;

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;

/// Parse a fragment of HTML (not a full document).
///
/// The markup is wrapped in a minimal document so the tree builder treats it
/// as body content; the returned tree's [`Fragment::root`] is that `<body>`.
pub fn parse_fragment(html: &str) -> Fragment {
    let wrapped = format!("<!DOCTYPE html><html><head></head><body>{html}</body></html>");

    let mut fragment = parse_document(FragmentSink::new(), ParseOpts::default())
        .from_utf8()
        .one(wrapped.as_bytes())
        .into_fragment();

    if let Some(body) = fragment.find_by_tag("body") {
        fragment.set_root(body);
    }
    fragment
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_root_is_body() {
        let fragment = parse_fragment("<i>x</i> tail");
        assert_eq!(
            fragment.element_name(fragment.root()).map(|n| n.as_ref()),
            Some("body")
        );
        assert_eq!(fragment.children(fragment.root()).count(), 2);
    }

    #[test]
    fn test_leading_newline_survives() {
        let fragment = parse_fragment("\n<b>word</b>");
        assert_eq!(
            serialize_children(&fragment, fragment.root()),
            "\n<b>word</b>"
        );
    }
}
