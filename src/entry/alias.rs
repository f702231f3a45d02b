//! Cross-reference alias extraction.
//!
//! Entries such as `Whale` often carry a pointer like
//! `<span class="col_indigo">see also <b>Cetacean, Orca;</b></span>`. The
//! bolded words are extra lookup keys for the same definition.

use crate::dom::{Fragment, NodeId};
use crate::style::{CROSS_REFERENCE, RuleObserver, StyleRule};

/// Collects alias keys from cross-reference matches, in document order.
#[derive(Debug, Default, Clone)]
pub struct AliasExtractor {
    aliases: Vec<String>,
}

impl AliasExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn into_aliases(self) -> Vec<String> {
        self.aliases
    }
}

impl RuleObserver for AliasExtractor {
    fn matched(&mut self, fragment: &Fragment, node: NodeId, rule: &StyleRule) {
        if rule.selector != CROSS_REFERENCE {
            return;
        }
        let Some(bold) = fragment.find_descendant(node, "b") else {
            return;
        };
        let text = fragment.collect_text(bold);
        self.aliases.extend(split_aliases(&text));
    }
}

/// Split the bolded text of one cross-reference into alias words.
///
/// One trailing `;` is dropped and the rest is split on `", "`. Empty pieces
/// are not keys.
pub fn split_aliases(text: &str) -> impl Iterator<Item = String> + '_ {
    text.strip_suffix(';')
        .unwrap_or(text)
        .split(", ")
        .filter(|word| !word.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_fragment;
    use crate::style::{OutputMode, apply};

    fn extract(html: &str, mode: OutputMode) -> Vec<String> {
        let fragment = parse_fragment(html);
        let mut extractor = AliasExtractor::new();
        apply(&fragment, mode, &mut extractor);
        extractor.into_aliases()
    }

    #[test]
    fn test_split_aliases() {
        assert_eq!(split_aliases("Foo, Bar;").collect::<Vec<_>>(), ["Foo", "Bar"]);
        assert_eq!(split_aliases("Foo;;").collect::<Vec<_>>(), ["Foo;"]);
        assert_eq!(split_aliases("Foo,Bar").collect::<Vec<_>>(), ["Foo,Bar"]);
        assert!(split_aliases("").next().is_none());
        assert!(split_aliases(";").next().is_none());
    }

    #[test]
    fn test_extracts_bold_text_only() {
        let html = r#"<span class="col_indigo">see also: <b>Foo, Bar;</b></span>"#;
        assert_eq!(extract(html, OutputMode::Plain), ["Foo", "Bar"]);
        assert_eq!(extract(html, OutputMode::Html), ["Foo", "Bar"]);
    }

    #[test]
    fn test_only_first_bold_descendant() {
        let html = r#"<span class="col_indigo"><i>cf. <b>One</b></i> and <b>Two</b></span>"#;
        assert_eq!(extract(html, OutputMode::Plain), ["One"]);
    }

    #[test]
    fn test_multiple_references_accumulate_in_order() {
        let html = concat!(
            r#"<span class="col_indigo"><b>Alpha;</b></span> text "#,
            r#"<span class="col_indigo"><b>Beta, Alpha</b></span>"#
        );
        assert_eq!(extract(html, OutputMode::Plain), ["Alpha", "Beta", "Alpha"]);
    }

    #[test]
    fn test_missing_or_empty_bold_contributes_nothing() {
        assert!(extract(r#"<span class="col_indigo">see above</span>"#, OutputMode::Plain).is_empty());
        assert!(extract(r#"<span class="col_indigo"><b></b></span>"#, OutputMode::Plain).is_empty());
    }

    #[test]
    fn test_bold_outside_reference_is_ignored() {
        assert!(extract(r#"<b>Loose</b> <span class="col_blue"><b>Blue</b></span>"#, OutputMode::Plain).is_empty());
    }
}
