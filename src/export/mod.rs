//! Output sinks for dictionary records.
//!
//! A [`DictionarySink`] receives every record produced by the entry
//! coordinator, then is finished once to flush whatever it buffered.
//!
//! - [`PlainTextSink`]: one `:key:body` line per key, streamed as records arrive
//! - [`SlobWriter`]: a binary slob container, written on [`DictionarySink::finish`]
//!
//! # Example
//!
//! ```
//! use chmdict::entry::process;
//! use chmdict::export::{DictionarySink, PlainTextSink};
//! use chmdict::style::OutputMode;
//!
//! let page = "<DL>\n\n<!--~--><DT>Word<!--=--><b>w</b>\n</DL>";
//! let mut sink = PlainTextSink::new(Vec::new());
//! for record in process(page, OutputMode::Plain)? {
//!     sink.add(&record)?;
//! }
//! sink.finish()?;
//!
//! assert_eq!(sink.into_inner(), b":Word:\x1b[1mw\x1b[0m\n");
//! # Ok::<(), chmdict::Error>(())
//! ```

mod plain;
mod slob;

pub use plain::PlainTextSink;
pub use slob::{SLOB_MAGIC, SlobConfig, SlobWriter};

use crate::entry::DictionaryRecord;
use crate::error::Result;

/// Destination for dictionary records.
pub trait DictionarySink {
    /// Accept one record.
    fn add(&mut self, record: &DictionaryRecord) -> Result<()>;

    /// Write out anything still buffered. Called once, after the last record.
    fn finish(&mut self) -> Result<()>;
}

impl<S: DictionarySink + ?Sized> DictionarySink for Box<S> {
    fn add(&mut self, record: &DictionaryRecord) -> Result<()> {
        (**self).add(record)
    }

    fn finish(&mut self) -> Result<()> {
        (**self).finish()
    }
}
