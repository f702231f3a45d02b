//! Style rule engine.
//!
//! Renders a parsed [`Fragment`] to text in one pass, applying the fixed
//! [`RULES`] table on the way:
//!
//! - [`OutputMode::Plain`]: matched elements are unwrapped and replaced by their
//!   contents plus terminal escape codes or indentation. When several rules
//!   match, the first in table order rewrites the element.
//! - [`OutputMode::Html`]: markup is kept as is and a style sheet covering the
//!   rule classes is prepended.
//!
//! Every match, including rules shadowed by an earlier one, is reported to a [`RuleObserver`] in document order, in both
//! modes, before the element's contents are rendered.
//!
//! # Example
//!
//! ```
//! use chmdict::dom::parse_fragment;
//! use chmdict::style::{apply, OutputMode};
//!
//! let fragment = parse_fragment(r#"<span class="m3">y</span> <b>x</b>"#);
//! let text = apply(&fragment, OutputMode::Plain, &mut ());
//! assert_eq!(text, "  y \x1b[1mx\x1b[0m");
//! ```

mod rules;
mod transliterate;

use std::sync::LazyLock;

pub use rules::{
    Applicability, CROSS_REFERENCE, RESET, RULES, Selector, StyleRule, Transform,
};
pub use transliterate::{Script, Transliteration, transliterate, untransliterate};

use crate::dom::{Fragment, NodeData, NodeId, escape_text, write_end_tag, write_start_tag};

/// Which dictionary format the output is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum OutputMode {
    /// ANSI-styled text for the line-oriented index.
    #[default]
    Plain,
    /// Self-styled HTML for the container.
    Html,
}

/// Subscriber to the engine's matched-element events.
pub trait RuleObserver {
    /// Called once per (element, rule) match, in document order.
    fn matched(&mut self, fragment: &Fragment, node: NodeId, rule: &StyleRule);
}

/// No-op observer.
impl RuleObserver for () {
    fn matched(&mut self, _fragment: &Fragment, _node: NodeId, _rule: &StyleRule) {}
}

/// Render the content of `fragment` (children of its root) in `mode`.
///
/// This is the bare rule pass: see [`finish`] for the mode-specific
/// post-processing.
pub fn apply(fragment: &Fragment, mode: OutputMode, observer: &mut dyn RuleObserver) -> String {
    let mut engine = Engine {
        fragment,
        mode,
        observer,
    };
    let mut out = String::new();
    for child in fragment.children(fragment.root()) {
        engine.render(child, &mut out);
    }
    out
}

/// Mode-specific finishing of an [`apply`] result.
///
/// Plain output goes through [`post_process`]; HTML output gets the
/// [`style_sheet`] prepended.
pub fn finish(text: &str, mode: OutputMode) -> String {
    match mode {
        OutputMode::Plain => post_process(text),
        OutputMode::Html => format!("{}{text}", style_sheet()),
    }
}

/// Plain-mode cleanup of residual entities and dash-separated paragraphs.
///
/// `&lt;`/`&gt;` become literal angle brackets and every `" —"` starts a new
/// line. Applying it twice is the same as applying it once.
pub fn post_process(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace(" \u{2014}", "\n\u{2014}")
}

static STYLE_SHEET: LazyLock<String> = LazyLock::new(|| {
    let mut css = String::from("<style>");
    for rule in RULES {
        if let Some(declarations) = rule.css {
            css.push_str(rule.selector.tag);
            if let Some(class) = rule.selector.class {
                css.push('.');
                css.push_str(class);
            }
            css.push('{');
            css.push_str(declarations);
            css.push('}');
        }
    }
    css.push_str("</style>");
    css
});

/// `<style>` element with the declarations of every rule class.
pub fn style_sheet() -> &'static str {
    &STYLE_SHEET
}

struct Engine<'a> {
    fragment: &'a Fragment,
    mode: OutputMode,
    observer: &'a mut dyn RuleObserver,
}

impl Engine<'_> {
    fn render(&mut self, id: NodeId, out: &mut String) {
        let fragment = self.fragment;
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
            NodeData::Element { .. } => self.render_element(id, out),
            NodeData::Document | NodeData::Doctype => {}
        }
    }

    fn render_element(&mut self, id: NodeId, out: &mut String) {
        let fragment = self.fragment;
        let matched: Vec<&StyleRule> = RULES
            .iter()
            .filter(|rule| rule.applies_in(self.mode) && rule.matches(fragment, id))
            .collect();

        for rule in &matched {
            self.observer.matched(fragment, id, rule);
        }

        // Unwrapping detaches the element, so only the first rule rewrites it.
        let rule = match matched.first() {
            Some(&rule) if self.mode == OutputMode::Plain => rule,
            _ => {
                write_start_tag(fragment, id, out);
                for child in fragment.children(id) {
                    self.render(child, out);
                }
                write_end_tag(fragment, id, out);
                return;
            }
        };
        let script = rule.script();
        let mut content = String::new();
        for (index, child) in fragment.children(id).enumerate() {
            if index == 0
                && let Some(script) = script
                && let Some(text) = fragment.text_content(child)
            {
                content.push_str(&escape_text(&transliterate(script, text).output));
                continue;
            }
            self.render(child, &mut content);
        }

        out.push_str(&rule.wrap(content));
    }
}
