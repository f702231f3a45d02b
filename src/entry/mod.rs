//! Entry coordinator: one raw help-archive page in, dictionary records out.
//!
//! Each archive page holds a single definition list item:
//!
//! ```text
//! <DL>
//!
//! <!--~--><DT>Whale, The.<!--=--><dd><span class="m1">a large sea mammal</span>
//! </DL>
//! ```
//!
//! [`process`] splits the headword from the definition, renders the
//! definition through the style engine, normalizes the headword and yields a
//! primary record plus, when cross-references were found, an alias record.
//!
//! # Example
//!
//! ```
//! use chmdict::entry::process;
//! use chmdict::style::OutputMode;
//!
//! let page = "<DL>\n\n<!--~--><DT>Whale, The.<!--=-->a large sea mammal\n</DL>";
//! let records: Vec<_> = process(page, OutputMode::Plain)?.collect();
//!
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].keys, ["Whale"]);
//! assert_eq!(records[0].body, "The Whale\n a large sea mammal");
//! # Ok::<(), chmdict::Error>(())
//! ```

mod alias;
mod headword;

pub use alias::{AliasExtractor, split_aliases};
pub use headword::{ARTICLES, Headword, normalize_headword};

use std::fmt;

use memchr::memmem;
use tracing::trace;

use crate::dom::{escape_text, parse_fragment};
use crate::error::{Error, Result};
use crate::style::{self, OutputMode};

/// Opens the definition list wrapping the entry.
pub const LIST_OPEN: &str = "<DL>\n\n";
/// Closes the definition list.
pub const LIST_CLOSE: &str = "\n</DL>";
/// Optional marker in front of the headword.
pub const TERM_PREFIX: &str = "<!--~--><DT>";
/// Separates the headword from its definition.
pub const DEFINITION_MARKER: &str = "<!--=-->";

/// Content type of a record body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    Plain,
    Html,
}

impl ContentType {
    pub fn for_mode(mode: OutputMode) -> Self {
        match mode {
            OutputMode::Plain => ContentType::Plain,
            OutputMode::Html => ContentType::Html,
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            ContentType::Plain => "text/plain; charset=utf-8",
            ContentType::Html => "text/html; charset=utf-8",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime())
    }
}

/// One output record: every key maps to the same body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryRecord {
    /// Never empty.
    pub keys: Vec<String>,
    pub body: String,
    pub content_type: ContentType,
}

/// Records produced by one [`process`] call: the primary record, then the
/// alias record if there is one.
#[derive(Debug, Clone)]
pub struct EntryRecords {
    primary: Option<DictionaryRecord>,
    alias: Option<DictionaryRecord>,
}

impl EntryRecords {
    /// Whether an alias record is (still) pending.
    pub fn has_alias(&self) -> bool {
        self.alias.is_some()
    }
}

impl Iterator for EntryRecords {
    type Item = DictionaryRecord;

    fn next(&mut self) -> Option<Self::Item> {
        self.primary.take().or_else(|| self.alias.take())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = usize::from(self.primary.is_some()) + usize::from(self.alias.is_some());
        (n, Some(n))
    }
}

impl ExactSizeIterator for EntryRecords {}

/// Headword and definition markup of one page, before any rewriting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawEntry<'a> {
    pub headword: &'a str,
    pub definition: &'a str,
}

/// Locate headword and definition in a page whose line endings are already
/// normalized.
pub fn split_entry(page: &str) -> Result<RawEntry<'_>> {
    let open = find_once(page, LIST_OPEN)?;
    let close = find_once(page, LIST_CLOSE)?;
    let start = open + LIST_OPEN.len();
    if close < start {
        return Err(Error::MalformedEntry(format!(
            "{LIST_CLOSE:?} precedes {LIST_OPEN:?}"
        )));
    }

    let data = &page[start..close];
    let data = data.strip_prefix(TERM_PREFIX).unwrap_or(data);
    let marker = find_once(data, DEFINITION_MARKER)?;

    Ok(RawEntry {
        headword: &data[..marker],
        definition: &data[marker + DEFINITION_MARKER.len()..],
    })
}

/// Byte offset of the only occurrence of `needle`.
fn find_once(haystack: &str, needle: &str) -> Result<usize> {
    let mut hits = memmem::find_iter(haystack.as_bytes(), needle.as_bytes());
    match (hits.next(), hits.next()) {
        (Some(pos), None) => Ok(pos),
        (None, _) => Err(Error::MalformedEntry(format!("missing {needle:?}"))),
        (Some(_), Some(_)) => Err(Error::MalformedEntry(format!("duplicate {needle:?}"))),
    }
}

/// Transform one raw page into its dictionary records.
///
/// Fails with [`Error::MalformedEntry`] when the page cannot be split into
/// headword and definition; no records are produced in that case.
pub fn process(page: &str, mode: OutputMode) -> Result<EntryRecords> {
    let page = page.replace("\r\n", "\n");
    let raw = split_entry(&page)?;

    let fragment = parse_fragment(raw.definition);
    let mut extractor = AliasExtractor::new();
    let rendered = style::apply(&fragment, mode, &mut extractor);

    let headword = normalize_headword(raw.headword);
    let body = match mode {
        OutputMode::Plain => headword.decorate(&style::post_process(&rendered), mode),
        OutputMode::Html => style::finish(&headword.decorate(&rendered, mode), mode),
    };
    let aliases = extractor.into_aliases();

    trace!(
        headword = %headword.canonical,
        aliases = aliases.len(),
        "processed entry"
    );

    let content_type = ContentType::for_mode(mode);
    let alias = (!aliases.is_empty()).then(|| DictionaryRecord {
        keys: aliases,
        body: format!("{}{body}", pointer(&headword.canonical, mode)),
        content_type,
    });

    Ok(EntryRecords {
        primary: Some(DictionaryRecord {
            keys: vec![headword.canonical],
            body,
            content_type,
        }),
        alias,
    })
}

/// Leading line or paragraph naming the entry an alias points to.
fn pointer(canonical: &str, mode: OutputMode) -> String {
    match mode {
        OutputMode::Plain => format!("{canonical}\n"),
        OutputMode::Html => format!("<p><b>{}</b></p>", escape_text(canonical)),
    }
}

/// Like [`process`], for undecoded page bytes.
///
/// See [`crate::util::decode_text`] for how `encoding` is used.
pub fn process_bytes(bytes: &[u8], mode: OutputMode, encoding: Option<&str>) -> Result<EntryRecords> {
    process(&crate::util::decode_text(bytes, encoding), mode)
}
