//! Batch driver: every entry page of an archive into one sink.

use tracing::{debug, info, warn};

use crate::archive::{ArchiveSource, EntryFilter};
use crate::entry::process_bytes;
use crate::error::Result;
use crate::export::DictionarySink;
use crate::style::OutputMode;

/// Conversion options.
#[derive(Debug, Clone, Default)]
pub struct ConvertConfig {
    pub mode: OutputMode,
    /// Dictionary name, written as the container `label` tag.
    pub label: Option<String>,
    /// Abort on the first malformed entry instead of skipping it.
    pub strict: bool,
    /// Encoding label tried when a page is not valid UTF-8.
    pub encoding: Option<String>,
    pub filter: EntryFilter,
}

impl ConvertConfig {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }

    pub fn with_filter(mut self, filter: EntryFilter) -> Self {
        self.filter = filter;
        self
    }
}

/// Counters reported after a conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct ConvertStats {
    /// Entry pages converted.
    pub entries: usize,
    /// Records handed to the sink, alias records included.
    pub records: usize,
    /// Alias keys across all alias records.
    pub aliases: usize,
    /// Malformed pages skipped.
    pub skipped: usize,
}

/// Convert every entry page of `archive` and write the records to `sink`.
///
/// Pages are processed in path order. A malformed page aborts the run when
/// `config.strict` is set and is skipped with a warning otherwise. Every other
/// error aborts. The sink is finished on success.
pub fn convert<A, S>(archive: &A, sink: &mut S, config: &ConvertConfig) -> Result<ConvertStats>
where
    A: ArchiveSource,
    S: DictionarySink + ?Sized,
{
    let mut stats = ConvertStats::default();

    for path in archive.paths()? {
        if !config.filter.matches(&path) {
            continue;
        }

        let object = archive.resolve(&path)?;
        let bytes = archive.retrieve(&object)?;
        let records = match process_bytes(&bytes, config.mode, config.encoding.as_deref()) {
            Ok(records) => records,
            Err(e) if e.is_entry_local() && !config.strict => {
                warn!(path = %path, error = %e, "skipping entry");
                stats.skipped += 1;
                continue;
            }
            Err(e) => return Err(e),
        };

        debug!(path = %path, records = records.len(), "converted entry");
        stats.entries += 1;
        for (i, record) in records.enumerate() {
            if i > 0 {
                stats.aliases += record.keys.len();
            }
            sink.add(&record)?;
            stats.records += 1;
        }
    }

    sink.finish()?;

    info!(
        entries = stats.entries,
        records = stats.records,
        aliases = stats.aliases,
        skipped = stats.skipped,
        "conversion finished"
    );
    Ok(stats)
}
