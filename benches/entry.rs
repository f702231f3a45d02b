//! Benchmarks for entry processing and container output.
//!
//! Run with: cargo bench

use criterion::{Criterion, criterion_group, criterion_main};

use chmdict::export::{DictionarySink, SlobWriter};
use chmdict::{OutputMode, process};

/// A definition exercising every rule family.
fn sample_page() -> String {
    let mut definition = String::from(r#"<dd><span class="m1"><span class="p">n.</span> "#);
    for i in 0..20 {
        definition.push_str(&format!(
            r#"<span class="m2">{i}) <b>sense</b> <i>usage</i> x<sup>2</sup> H<sub>2</sub>O &mdash; <span class="col_darkred">note</span></span>"#
        ));
        definition.push('\n');
    }
    definition.push_str(r#"<span class="col_indigo">see also: <b>Foo, Bar, Baz;</b></span></span>"#);
    format!("<DL>\r\n\r\n<!--~--><DT>Whale, The.<!--=-->{definition}\r\n</DL>")
}

// ============================================================================
// Entry Benchmarks
// ============================================================================

fn bench_process_plain(c: &mut Criterion) {
    let page = sample_page();
    c.bench_function("process_plain", |b| {
        b.iter(|| process(&page, OutputMode::Plain).unwrap().count());
    });
}

fn bench_process_html(c: &mut Criterion) {
    let page = sample_page();
    c.bench_function("process_html", |b| {
        b.iter(|| process(&page, OutputMode::Html).unwrap().count());
    });
}

// ============================================================================
// Container Benchmarks
// ============================================================================

fn bench_write_slob(c: &mut Criterion) {
    let records: Vec<_> = process(&sample_page(), OutputMode::Html).unwrap().collect();
    c.bench_function("write_slob_1000", |b| {
        b.iter(|| {
            let mut writer = SlobWriter::new(Vec::new());
            for _ in 0..500 {
                for record in &records {
                    writer.add(record).unwrap();
                }
            }
            writer.finish().unwrap();
            writer.into_inner().len()
        });
    });
}

criterion_group!(benches, bench_process_plain, bench_process_html, bench_write_slob);
criterion_main!(benches);
