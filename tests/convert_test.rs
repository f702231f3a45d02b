//! End-to-end conversion of an extracted archive directory.

use std::fs;
use std::io::Read;
use std::path::Path;

use chmdict::archive::{DirArchive, EntryFilter};
use chmdict::export::{PlainTextSink, SLOB_MAGIC, SlobConfig, SlobWriter};
use chmdict::{ConvertConfig, Error, OutputMode, convert};
use flate2::read::ZlibDecoder;
use tempfile::TempDir;

fn write_page(dir: &Path, name: &str, headword: &str, definition: &str) {
    let page = format!(
        "<html><head><title>x</title></head><body><DL>\r\n\r\n<!--~--><DT>{headword}<!--=-->{definition}\r\n</DL></body></html>"
    );
    fs::write(dir.join(name), page).unwrap();
}

/// Three entries, one malformed page and two non-entry files.
fn sample_archive() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write_page(
        root,
        "000001.htm",
        "Whale, The.",
        r#"<dd><span class="m1"><span class="p">n.</span> a large sea mammal</span>"#,
    );
    write_page(
        root,
        "000002.htm",
        "Orca",
        r#"<dd><span class="m1">killer whale <span class="col_indigo">see also: <b>Grampus, Blackfish;</b></span></span>"#,
    );
    write_page(root, "000003.htm", "H", r#"<dd>H<sub>2</sub>O, x<sup>2</sup>"#);
    fs::write(root.join("000004.htm"), "<html><body>no list</body></html>").unwrap();
    fs::write(root.join("index.hhc"), "<ul></ul>").unwrap();
    fs::create_dir(root.join("img")).unwrap();
    fs::write(root.join("img").join("000001.htm"), "nested, wrong length").unwrap();
    dir
}

#[test]
fn test_plain_index() {
    let dir = sample_archive();
    let archive = DirArchive::open(dir.path()).unwrap();
    let mut sink = PlainTextSink::new(Vec::new());

    let stats = convert(&archive, &mut sink, &ConvertConfig::default()).unwrap();
    assert_eq!(stats.entries, 3);
    assert_eq!(stats.skipped, 1);
    assert_eq!(stats.records, 4);
    assert_eq!(stats.aliases, 2);

    let text = String::from_utf8(sink.into_inner()).unwrap();
    let expected = concat!(
        ":Whale:The Whale\n \x1b[3mn.\x1b[0m a large sea mammal\n",
        ":Orca:killer whale \x1b[35msee also: \x1b[1mGrampus, Blackfish;\x1b[0m\x1b[0m\n",
        ":Grampus:Orca\nkiller whale \x1b[35msee also: \x1b[1mGrampus, Blackfish;\x1b[0m\x1b[0m\n",
        ":Blackfish:Orca\nkiller whale \x1b[35msee also: \x1b[1mGrampus, Blackfish;\x1b[0m\x1b[0m\n",
        ":H:H\u{2082}O, x\u{00B2}\n",
    );
    assert_eq!(text, expected);
}

#[test]
fn test_strict_fails_on_malformed_page() {
    let dir = sample_archive();
    let archive = DirArchive::open(dir.path()).unwrap();
    let mut sink = PlainTextSink::new(Vec::new());
    let config = ConvertConfig::default().with_strict(true);

    let err = convert(&archive, &mut sink, &config).unwrap_err();
    assert!(matches!(err, Error::MalformedEntry(_)));
}

#[test]
fn test_any_length_filter_reaches_nested_pages() {
    let dir = sample_archive();
    let archive = DirArchive::open(dir.path()).unwrap();
    let mut sink = PlainTextSink::new(Vec::new());
    let config = ConvertConfig::default().with_filter(EntryFilter::any_length(".htm"));

    let stats = convert(&archive, &mut sink, &config).unwrap();
    // The nested page is not an entry either.
    assert_eq!(stats.entries, 3);
    assert_eq!(stats.skipped, 2);
}

#[test]
fn test_slob_container() {
    let dir = sample_archive();
    let archive = DirArchive::open(dir.path()).unwrap();
    let mut sink = SlobWriter::with_config(Vec::new(), SlobConfig::default().with_label("Sample"));

    let config = ConvertConfig::new(OutputMode::Html);
    let stats = convert(&archive, &mut sink, &config).unwrap();
    assert_eq!(stats.records, 4);

    let data = sink.into_inner();
    assert_eq!(&data[..8], SLOB_MAGIC);

    let label = b"Sample";
    assert!(data.windows(label.len()).any(|w| w == label));

    // Walk the header up to the store offset.
    let mut pos = 8 + 16;
    for _ in 0..2 {
        pos += 1 + data[pos] as usize;
    }
    let tags = data[pos] as usize;
    pos += 1;
    for _ in 0..tags {
        pos += 1 + data[pos] as usize;
        pos += 1 + 255;
    }
    let content_types = data[pos] as usize;
    pos += 1;
    for _ in 0..content_types {
        pos += 2 + u16::from_be_bytes([data[pos], data[pos + 1]]) as usize;
    }
    let blobs = u32::from_be_bytes(data[pos..pos + 4].try_into().unwrap());
    assert_eq!(blobs, 4);
    let store = u64::from_be_bytes(data[pos + 4..pos + 12].try_into().unwrap()) as usize;
    let size = u64::from_be_bytes(data[pos + 12..pos + 20].try_into().unwrap());
    assert_eq!(size, data.len() as u64);

    // One bin holding every blob.
    assert_eq!(&data[store..store + 4], &1u32.to_be_bytes());
    let item = store + 4 + 8;
    assert_eq!(&data[item..item + 4], &4u32.to_be_bytes());
    let zlib = item + 4 + 4 + 4;
    let mut content = Vec::new();
    ZlibDecoder::new(&data[zlib..]).read_to_end(&mut content).unwrap();
    let content = String::from_utf8_lossy(&content);

    assert!(content.contains("<p>The Whale</p>"));
    assert!(content.contains("<p><b>Orca</b></p>"));
    assert!(content.contains("H<sub>2</sub>O"));
    assert!(content.contains("span.col_indigo"));
}

#[test]
fn test_missing_input_directory() {
    let dir = TempDir::new().unwrap();
    let err = DirArchive::open(dir.path().join("nope")).unwrap_err();
    assert!(matches!(err, Error::InvalidArchive(_)));
}
