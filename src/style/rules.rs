//! The fixed style rule table.
//!
//! Order matters: when several rules match one element, the first one in the
//! table rewrites it.

use crate::dom::{Fragment, NodeId};

use super::transliterate::Script;
use super::OutputMode;

/// Tag plus optional class an element must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selector {
    pub tag: &'static str,
    pub class: Option<&'static str>,
}

impl Selector {
    pub const fn tag(tag: &'static str) -> Self {
        Self { tag, class: None }
    }

    pub const fn class(tag: &'static str, class: &'static str) -> Self {
        Self {
            tag,
            class: Some(class),
        }
    }

    pub fn matches(&self, fragment: &Fragment, id: NodeId) -> bool {
        fragment
            .element_name(id)
            .is_some_and(|name| name.as_ref() == self.tag)
            && self.class.is_none_or(|class| fragment.has_class(id, class))
    }
}

/// Output modes in which a rule fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applicability {
    Plain,
    /// Fires in HTML mode too, where it only reports the match.
    Both,
}

/// What a rule does to a matched element in plain mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// Remove the element, keep its contents.
    Unwrap,
    /// Transliterate the first text child, then unwrap.
    Transliterate(Script),
    /// Insert text before the contents, then unwrap.
    Prefix(&'static str),
    /// Surround the contents with `ESC[<code>m` … `ESC[0m`, then unwrap.
    Escape(u8),
}

/// Terminal attribute reset.
pub const RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleRule {
    pub selector: Selector,
    pub applicability: Applicability,
    pub transform: Transform,
    /// Declarations for the HTML style sheet.
    pub css: Option<&'static str>,
}

impl StyleRule {
    const fn plain(selector: Selector, transform: Transform, css: Option<&'static str>) -> Self {
        Self {
            selector,
            applicability: Applicability::Plain,
            transform,
            css,
        }
    }

    pub fn applies_in(&self, mode: OutputMode) -> bool {
        match self.applicability {
            Applicability::Both => true,
            Applicability::Plain => mode == OutputMode::Plain,
        }
    }

    pub fn matches(&self, fragment: &Fragment, id: NodeId) -> bool {
        self.selector.matches(fragment, id)
    }

    /// Direction of the content transform, for sup/sub rules.
    pub fn script(&self) -> Option<Script> {
        match self.transform {
            Transform::Transliterate(script) => Some(script),
            _ => None,
        }
    }

    /// Apply prefix/suffix text around already-rendered contents.
    pub fn wrap(&self, content: String) -> String {
        match self.transform {
            Transform::Unwrap | Transform::Transliterate(_) => content,
            Transform::Prefix(prefix) => format!("{prefix}{content}"),
            Transform::Escape(code) => format!("\x1b[{code}m{content}{RESET}"),
        }
    }
}

/// Selector of the cross-reference marker.
pub const CROSS_REFERENCE: Selector = Selector::class("span", "col_indigo");

/// The rule table, in application order.
pub static RULES: &[StyleRule] = &[
    StyleRule::plain(Selector::tag("dd"), Transform::Unwrap, None),
    StyleRule::plain(
        Selector::tag("sup"),
        Transform::Transliterate(Script::Superscript),
        None,
    ),
    StyleRule::plain(
        Selector::tag("sub"),
        Transform::Transliterate(Script::Subscript),
        None,
    ),
    StyleRule::plain(
        Selector::class("span", "m1"),
        Transform::Prefix(""),
        Some("margin-left:0"),
    ),
    StyleRule::plain(
        Selector::class("span", "m2"),
        Transform::Prefix(" "),
        Some("margin-left:1em"),
    ),
    StyleRule::plain(
        Selector::class("span", "m3"),
        Transform::Prefix("  "),
        Some("margin-left:2em"),
    ),
    StyleRule::plain(
        Selector::class("span", "m4"),
        Transform::Prefix("   "),
        Some("margin-left:3em"),
    ),
    StyleRule::plain(Selector::tag("b"), Transform::Escape(1), None),
    StyleRule::plain(Selector::tag("i"), Transform::Escape(3), None),
    StyleRule::plain(
        Selector::class("span", "p"),
        Transform::Escape(3),
        Some("font-style:italic"),
    ),
    StyleRule::plain(
        Selector::class("span", "col_darkgray"),
        Transform::Escape(4),
        Some("color:darkgray"),
    ),
    StyleRule::plain(
        Selector::class("span", "col_darkred"),
        Transform::Escape(31),
        Some("color:darkred"),
    ),
    StyleRule::plain(
        Selector::class("span", "col_brown"),
        Transform::Escape(33),
        Some("color:brown"),
    ),
    StyleRule::plain(
        Selector::class("span", "col_blue"),
        Transform::Escape(34),
        Some("color:blue"),
    ),
    StyleRule {
        selector: CROSS_REFERENCE,
        applicability: Applicability::Both,
        transform: Transform::Escape(35),
        css: Some("color:indigo"),
    },
];
