//! # chmdict
//!
//! Converts dictionary entries extracted from a compiled help archive into
//! portable dictionary formats.
//!
//! ## Features
//!
//! - Split an entry page into headword and definition
//! - Rewrite the archive's inline style vocabulary into ANSI escapes (plain
//!   text index) or self-styled HTML (slob container)
//! - Transliterate superscript and subscript runs into Unicode
//! - Extract cross-reference headwords as alias keys
//! - Reorder "Term, Article" headwords into reading order
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::fs::File;
//! use std::io::BufWriter;
//!
//! use chmdict::archive::DirArchive;
//! use chmdict::export::{SlobConfig, SlobWriter};
//! use chmdict::{ConvertConfig, OutputMode, convert};
//!
//! let archive = DirArchive::open("dict/")?;
//! let file = BufWriter::new(File::create("dict.slob")?);
//! let mut sink = SlobWriter::with_config(file, SlobConfig::default().with_label("Dict"));
//!
//! let stats = convert(&archive, &mut sink, &ConvertConfig::new(OutputMode::Html))?;
//! println!("{} entries", stats.entries);
//! # Ok::<(), chmdict::Error>(())
//! ```
//!
//! ## Single Entries
//!
//! ```
//! use chmdict::{OutputMode, process};
//!
//! let page = "<DL>\n\n<!--~--><DT>Whale, The.<!--=-->a large sea mammal\n</DL>";
//! let record = process(page, OutputMode::Plain)?.next().unwrap();
//! assert_eq!(record.keys, ["Whale"]);
//! # Ok::<(), chmdict::Error>(())
//! ```

pub mod archive;
pub mod convert;
pub mod dom;
pub mod entry;
pub mod error;
pub mod export;
pub mod style;
pub mod util;

pub use convert::{ConvertConfig, ConvertStats, convert};
pub use entry::{ContentType, DictionaryRecord, EntryRecords, process, process_bytes};
pub use error::{Error, Result};
pub use style::OutputMode;
