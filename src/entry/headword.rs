//! Headword normalization.
//!
//! Source headwords come in three shapes:
//!
//! - `"Whale, The."`: term followed by an article; reordered to `"The Whale"`
//!   as a title line while the term alone becomes the key.
//! - `"A, The."`: an alphabet section header; only the letter is kept.
//! - anything else, kept verbatim.

use crate::dom::escape_text;
use crate::style::OutputMode;

/// Second parts recognized as a trailing article or particle.
pub const ARTICLES: &[&str] = &["The", "A", "An", "'d", "L'", "La", "Il"];

/// Normalized form of a raw headword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Headword {
    /// Index key.
    pub canonical: String,
    /// Reading-order title to put in front of the definition.
    pub title: Option<String>,
}

impl Headword {
    /// Prepend the title, if any, to a rendered definition body.
    ///
    /// In plain mode every following line is indented by one more space so
    /// the source margins stay correct under the new unindented title line.
    pub fn decorate(&self, body: &str, mode: OutputMode) -> String {
        let Some(title) = &self.title else {
            return body.to_string();
        };
        match mode {
            OutputMode::Plain => format!("{title}\n{body}").replace('\n', "\n "),
            OutputMode::Html => format!("<p>{}</p>{body}", escape_text(title)),
        }
    }
}

/// Normalize a raw headword.
///
/// # Examples
///
/// ```
/// use chmdict::entry::normalize_headword;
///
/// let hw = normalize_headword("Whale, The.");
/// assert_eq!(hw.canonical, "Whale");
/// assert_eq!(hw.title.as_deref(), Some("The Whale"));
///
/// assert_eq!(normalize_headword("A, The.").canonical, "A");
/// assert_eq!(normalize_headword("Gogol, N.").canonical, "Gogol, N.");
/// ```
pub fn normalize_headword(raw: &str) -> Headword {
    let parts: Vec<&str> = raw.trim_end_matches('.').split(", ").collect();

    if let [first, second] = parts.as_slice() {
        if first.chars().count() == 1 {
            return Headword {
                canonical: first.to_string(),
                title: None,
            };
        }
        if ARTICLES.contains(&capitalize(second).as_str()) {
            return Headword {
                canonical: first.to_string(),
                title: Some(format!("{second} {first}")),
            };
        }
    }

    Headword {
        canonical: raw.to_string(),
        title: None,
    }
}

/// Uppercase the first character and lowercase the rest.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("the"), "The");
        assert_eq!(capitalize("THE"), "The");
        assert_eq!(capitalize("'D"), "'d");
        assert_eq!(capitalize("l'"), "L'");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_article_reorder() {
        let hw = normalize_headword("Whale, The.");
        assert_eq!(hw.canonical, "Whale");
        assert_eq!(hw.title.as_deref(), Some("The Whale"));
        assert_eq!(
            hw.decorate("a large sea mammal", OutputMode::Plain),
            "The Whale\n a large sea mammal"
        );
    }

    #[test]
    fn test_article_is_case_insensitive_but_kept_as_written() {
        let hw = normalize_headword("Divina Commedia, LA");
        assert_eq!(hw.canonical, "Divina Commedia");
        assert_eq!(hw.title.as_deref(), Some("LA Divina Commedia"));
    }

    #[test]
    fn test_every_article() {
        for article in ARTICLES {
            let hw = normalize_headword(&format!("Term, {article}."));
            assert_eq!(hw.canonical, "Term", "article {article}");
        }
    }

    #[test]
    fn test_single_letter_wins_over_article() {
        assert_eq!(
            normalize_headword("A, The."),
            Headword {
                canonical: "A".into(),
                title: None
            }
        );
        assert_eq!(normalize_headword("Ж, ж").canonical, "Ж");
    }

    #[test]
    fn test_non_article_passes_through() {
        assert_eq!(
            normalize_headword("Gogol, N."),
            Headword {
                canonical: "Gogol, N.".into(),
                title: None
            }
        );
        assert_eq!(normalize_headword("Them, Theirs").canonical, "Them, Theirs");
    }

    #[test]
    fn test_other_shapes_pass_through() {
        assert_eq!(normalize_headword("Whale.").canonical, "Whale.");
        assert_eq!(normalize_headword("a, b, The").canonical, "a, b, The");
        assert_eq!(normalize_headword("Whale,The").canonical, "Whale,The");
    }

    #[test]
    fn test_plain_decorate_reindents_every_line() {
        let hw = normalize_headword("Whale, The");
        assert_eq!(
            hw.decorate("first\n second\n  third", OutputMode::Plain),
            "The Whale\n first\n  second\n   third"
        );
    }

    #[test]
    fn test_html_decorate_adds_paragraph() {
        let hw = normalize_headword("Cat & Dog, The");
        assert_eq!(
            hw.decorate("<b>x</b>", OutputMode::Html),
            "<p>The Cat &amp; Dog</p><b>x</b>"
        );
    }

    #[test]
    fn test_decorate_without_title_is_identity() {
        let hw = normalize_headword("Gogol, N.");
        assert_eq!(hw.decorate("a\nb", OutputMode::Plain), "a\nb");
    }
}
