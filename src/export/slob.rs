//! Slob dictionary container writer.
//!
//! Slob ("sorted list of blobs") is the container format read by Aard 2. The
//! file is a header followed by two item lists:
//!
//! ```text
//! magic "!-1SLOB\x1F" | uuid[16] | encoding | compression
//! tags:          u8 count, (tiny key, tiny value padded to 255) *
//! content types: u8 count, text *
//! blob count u32 | store offset u64 | file size u64
//! refs:  item list of (text key, u32 bin, u16 item, tiny fragment), in collation order
//! store: item list of (u32 n, u8 content type * n, u32 len, zlib bin)
//! ```
//!
//! An item list is `u32 count`, `count` u64 offsets relative to the end of the
//! offset table, then the items. A decompressed bin is `n` u32 offsets
//! (relative to the end of that table) followed by u32-length-prefixed blobs.
//! Tiny text has a u8 length prefix, text a u16 one. Everything is big-endian.

use std::io::Write;

use flate2::Compression;
use flate2::write::ZlibEncoder;
use icu_collator::options::{AlternateHandling, CollatorOptions, Strength};
use icu_collator::{Collator, CollatorBorrowed};
use tracing::{debug, info};

use crate::entry::{ContentType, DictionaryRecord};
use crate::error::{Error, Result};

use super::DictionarySink;

/// File signature.
pub const SLOB_MAGIC: &[u8; 8] = b"!-1SLOB\x1F";

const MAX_TINY_TEXT: usize = u8::MAX as usize;
const MAX_TEXT: usize = u16::MAX as usize;

/// Configuration for slob output.
#[derive(Debug, Clone)]
pub struct SlobConfig {
    /// Human-readable dictionary name (`label` tag).
    pub label: Option<String>,
    /// Uncompressed size at which a bin is closed.
    pub bin_bytes: usize,
    /// zlib level (0-9, default 6).
    pub compression_level: u32,
}

impl Default for SlobConfig {
    fn default() -> Self {
        Self {
            label: None,
            bin_bytes: 384 * 1024,
            compression_level: 6,
        }
    }
}

impl SlobConfig {
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

struct Ref {
    key: String,
    bin: u32,
    item: u16,
}

/// Buffers records and writes a complete slob file on [`DictionarySink::finish`].
pub struct SlobWriter<W: Write> {
    writer: W,
    config: SlobConfig,
    content_types: Vec<ContentType>,
    refs: Vec<Ref>,
    /// Closed, compressed bins: (content type ids, zlib data).
    bins: Vec<(Vec<u8>, Vec<u8>)>,
    /// Open bin: (content type id, blob).
    current: Vec<(u8, Vec<u8>)>,
    current_bytes: usize,
    blob_count: u32,
}

impl<W: Write> SlobWriter<W> {
    pub fn new(writer: W) -> Self {
        Self::with_config(writer, SlobConfig::default())
    }

    pub fn with_config(writer: W, config: SlobConfig) -> Self {
        Self {
            writer,
            config,
            content_types: Vec::new(),
            refs: Vec::new(),
            bins: Vec::new(),
            current: Vec::new(),
            current_bytes: 0,
            blob_count: 0,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn content_type_id(&mut self, content_type: ContentType) -> Result<u8> {
        if let Some(index) = self.content_types.iter().position(|&c| c == content_type) {
            return Ok(index as u8);
        }
        if self.content_types.len() >= u8::MAX as usize {
            return Err(Error::ContainerLimit("too many content types".into()));
        }
        self.content_types.push(content_type);
        Ok((self.content_types.len() - 1) as u8)
    }

    fn close_bin(&mut self) -> Result<()> {
        if self.current.is_empty() {
            return Ok(());
        }
        let items = std::mem::take(&mut self.current);
        self.current_bytes = 0;

        let ids: Vec<u8> = items.iter().map(|(id, _)| *id).collect();
        let blobs: Vec<Vec<u8>> = items.into_iter().map(|(_, blob)| blob).collect();
        let content = encode_bin(&blobs)?;

        let mut encoder = ZlibEncoder::new(
            Vec::new(),
            Compression::new(self.config.compression_level),
        );
        encoder.write_all(&content)?;
        let compressed = encoder.finish()?;
        if compressed.len() > u32::MAX as usize {
            return Err(Error::ContainerLimit("compressed bin exceeds 4 GiB".into()));
        }

        debug!(
            bin = self.bins.len(),
            items = ids.len(),
            raw = content.len(),
            compressed = compressed.len(),
            "closed slob bin"
        );
        self.bins.push((ids, compressed));
        Ok(())
    }

    fn header(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        out.extend_from_slice(SLOB_MAGIC);
        out.extend_from_slice(&container_uuid(self.config.label.as_deref()));
        write_tiny_text(&mut out, "utf-8")?;
        write_tiny_text(&mut out, "zlib")?;

        let mut tags = vec![("created.by", format!("chmdict {}", env!("CARGO_PKG_VERSION")))];
        if let Some(label) = &self.config.label {
            tags.push(("label", label.clone()));
        }
        out.push(tags.len() as u8);
        for (key, value) in &tags {
            write_tiny_text(&mut out, key)?;
            write_padded_tiny_text(&mut out, value)?;
        }

        out.push(self.content_types.len() as u8);
        for content_type in &self.content_types {
            write_text(&mut out, content_type.mime())?;
        }

        out.extend_from_slice(&self.blob_count.to_be_bytes());
        Ok(out)
    }

    fn sorted_refs(&mut self) -> Result<Vec<Vec<u8>>> {
        let collator = ref_collator()?;
        self.refs.sort_by(|a, b| collator.compare(&a.key, &b.key));
        Ok(self
            .refs
            .iter()
            .map(|r| {
                let mut item = Vec::with_capacity(r.key.len() + 9);
                // Key lengths are checked in `add`.
                item.extend_from_slice(&(r.key.len() as u16).to_be_bytes());
                item.extend_from_slice(r.key.as_bytes());
                item.extend_from_slice(&r.bin.to_be_bytes());
                item.extend_from_slice(&r.item.to_be_bytes());
                item.push(0); // empty fragment
                item
            })
            .collect())
    }
}

impl<W: Write> DictionarySink for SlobWriter<W> {
    fn add(&mut self, record: &DictionaryRecord) -> Result<()> {
        if let Some(key) = record.keys.iter().find(|k| k.len() > MAX_TEXT) {
            return Err(Error::ContainerLimit(format!(
                "key of {} bytes is longer than {MAX_TEXT}",
                key.len()
            )));
        }
        let id = self.content_type_id(record.content_type)?;

        if self.current.len() == u16::MAX as usize {
            self.close_bin()?;
        }
        let bin = u32::try_from(self.bins.len())
            .map_err(|_| Error::ContainerLimit("too many bins".into()))?;
        let item = self.current.len() as u16;

        for key in &record.keys {
            self.refs.push(Ref {
                key: key.clone(),
                bin,
                item,
            });
        }
        self.current.push((id, record.body.as_bytes().to_vec()));
        self.current_bytes += record.body.len();
        self.blob_count = self
            .blob_count
            .checked_add(1)
            .ok_or_else(|| Error::ContainerLimit("too many blobs".into()))?;

        if self.current_bytes >= self.config.bin_bytes {
            self.close_bin()?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.close_bin()?;

        let header = self.header()?;
        let refs = encode_item_list(&self.sorted_refs()?);
        let store_items: Vec<Vec<u8>> = self
            .bins
            .iter()
            .map(|(ids, compressed)| {
                let mut item = Vec::with_capacity(ids.len() + compressed.len() + 8);
                item.extend_from_slice(&(ids.len() as u32).to_be_bytes());
                item.extend_from_slice(ids);
                item.extend_from_slice(&(compressed.len() as u32).to_be_bytes());
                item.extend_from_slice(compressed);
                item
            })
            .collect();
        let store = encode_item_list(&store_items);

        // Two u64 fields (store offset, file size) follow the header.
        let store_offset = (header.len() + 16 + refs.len()) as u64;
        let size = store_offset + store.len() as u64;

        self.writer.write_all(&header)?;
        self.writer.write_all(&store_offset.to_be_bytes())?;
        self.writer.write_all(&size.to_be_bytes())?;
        self.writer.write_all(&refs)?;
        self.writer.write_all(&store)?;
        self.writer.flush()?;

        info!(
            refs = self.refs.len(),
            blobs = self.blob_count,
            bins = self.bins.len(),
            bytes = size,
            "wrote slob container"
        );
        Ok(())
    }
}

/// Root-locale collator readers binary-search the refs with: punctuation and
/// spaces shifted, ties broken down to the identical level.
fn ref_collator() -> Result<CollatorBorrowed<'static>> {
    let mut options = CollatorOptions::default();
    options.strength = Some(Strength::Identical);
    options.alternate_handling = Some(AlternateHandling::Shifted);
    Collator::try_new(Default::default(), options).map_err(|e| Error::Collation(e.to_string()))
}

fn write_tiny_text(out: &mut Vec<u8>, text: &str) -> Result<()> {
    if text.len() > MAX_TINY_TEXT {
        return Err(Error::ContainerLimit(format!("{text:?} is longer than 255 bytes")));
    }
    out.push(text.len() as u8);
    out.extend_from_slice(text.as_bytes());
    Ok(())
}

/// Tag values are padded with NULs to the maximum so readers can edit them in
/// place.
fn write_padded_tiny_text(out: &mut Vec<u8>, text: &str) -> Result<()> {
    if text.len() > MAX_TINY_TEXT {
        return Err(Error::ContainerLimit(format!("{text:?} is longer than 255 bytes")));
    }
    out.push(MAX_TINY_TEXT as u8);
    out.extend_from_slice(text.as_bytes());
    out.resize(out.len() + MAX_TINY_TEXT - text.len(), 0);
    Ok(())
}

fn write_text(out: &mut Vec<u8>, text: &str) -> Result<()> {
    if text.len() > MAX_TEXT {
        return Err(Error::ContainerLimit(format!(
            "text of {} bytes is longer than {MAX_TEXT}",
            text.len()
        )));
    }
    out.extend_from_slice(&(text.len() as u16).to_be_bytes());
    out.extend_from_slice(text.as_bytes());
    Ok(())
}

/// u32 count, u64 relative offsets, items.
fn encode_item_list(items: &[Vec<u8>]) -> Vec<u8> {
    let data_len: usize = items.iter().map(Vec::len).sum();
    let mut out = Vec::with_capacity(4 + items.len() * 8 + data_len);
    out.extend_from_slice(&(items.len() as u32).to_be_bytes());
    let mut pos = 0u64;
    for item in items {
        out.extend_from_slice(&pos.to_be_bytes());
        pos += item.len() as u64;
    }
    for item in items {
        out.extend_from_slice(item);
    }
    out
}

/// u32 relative offsets, then u32-length-prefixed blobs.
fn encode_bin(blobs: &[Vec<u8>]) -> Result<Vec<u8>> {
    let data_len: usize = blobs.iter().map(|b| b.len() + 4).sum();
    let mut out = Vec::with_capacity(blobs.len() * 4 + data_len);
    let mut pos = 0usize;
    for blob in blobs {
        let offset = u32::try_from(pos)
            .map_err(|_| Error::ContainerLimit("bin exceeds 4 GiB".into()))?;
        out.extend_from_slice(&offset.to_be_bytes());
        pos += blob.len() + 4;
    }
    for blob in blobs {
        let len = u32::try_from(blob.len())
            .map_err(|_| Error::ContainerLimit("blob exceeds 4 GiB".into()))?;
        out.extend_from_slice(&len.to_be_bytes());
        out.extend_from_slice(blob);
    }
    Ok(out)
}

/// Random-looking version 4 UUID derived from the clock and the label.
fn container_uuid(label: Option<&str>) -> [u8; 16] {
    let mut hasher = sha1_smol::Sha1::new();
    hasher.update(&crate::util::time_seed_nanos().to_be_bytes());
    hasher.update(label.unwrap_or_default().as_bytes());
    let digest = hasher.digest().bytes();

    let mut uuid = [0u8; 16];
    uuid.copy_from_slice(&digest[..16]);
    uuid[6] = (uuid[6] & 0x0F) | 0x40;
    uuid[8] = (uuid[8] & 0x3F) | 0x80;
    uuid
}
