//! Entry transformation through the public API.

use chmdict::entry::normalize_headword;
use chmdict::style::{OutputMode, post_process, style_sheet};
use chmdict::{ContentType, Error, process};

fn page(headword: &str, definition: &str) -> String {
    format!("<DL>\n\n<!--~--><DT>{headword}<!--=-->{definition}\n</DL>")
}

#[test]
fn test_headword_examples() {
    let verbatim = normalize_headword("Gogol, N.");
    assert_eq!(verbatim.canonical, "Gogol, N.");
    assert_eq!(verbatim.title, None);

    let letter = normalize_headword("A, The.");
    assert_eq!(letter.canonical, "A");
    assert_eq!(letter.title, None);
}

#[test]
fn test_inline_styles() {
    let body = |definition: &str| {
        process(&page("W", definition), OutputMode::Plain)
            .unwrap()
            .next()
            .unwrap()
            .body
    };
    assert_eq!(body("<b>x</b>"), "\x1b[1mx\x1b[0m");
    assert_eq!(body(r#"<span class="m3">y</span>"#), "  y");
    assert_eq!(body("<i>a</i> &lt;b&gt;"), "\x1b[3ma\x1b[0m <b>");
    assert_eq!(body("x<sup>S</sup>"), "x[sup]S[/sup]");
}

#[test]
fn test_overlapping_classes_use_first_rule() {
    let record = process(&page("W", r#"<span class="m2 col_blue">a</span>"#), OutputMode::Plain)
        .unwrap()
        .next()
        .unwrap();
    assert_eq!(record.body, " a");
}

#[test]
fn test_alias_record_follows_primary() {
    let definition = r#"<span class="col_indigo">see also: <b>Foo, Bar;</b></span>"#;
    let records: Vec<_> = process(&page("Thing", definition), OutputMode::Plain)
        .unwrap()
        .collect();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].keys, ["Thing"]);
    assert_eq!(records[1].keys, ["Foo", "Bar"]);
    assert!(records[1].body.starts_with("Thing\n"));
}

#[test]
fn test_html_records_are_self_styled() {
    let record = process(&page("W", r#"<span class="p">adj.</span>"#), OutputMode::Html)
        .unwrap()
        .next()
        .unwrap();
    assert_eq!(record.content_type, ContentType::Html);
    assert_eq!(
        record.body,
        format!(r#"{}<span class="p">adj.</span>"#, style_sheet())
    );
    assert!(style_sheet().contains("span.p{font-style:italic}"));
}

#[test]
fn test_malformed_page_yields_nothing() {
    for text in ["", "<DL>\n\nW def\n</DL>", page("W", "x<!--=-->y").as_str()] {
        assert!(matches!(
            process(text, OutputMode::Html),
            Err(Error::MalformedEntry(_))
        ));
    }
}

#[test]
fn test_post_process_idempotent_on_sample() {
    let once = post_process("a &lt;b&gt; \u{2014} c \u{2014} d");
    assert_eq!(once, "a <b>\n\u{2014} c\n\u{2014} d");
    assert_eq!(post_process(&once), once);
}
