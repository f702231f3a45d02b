//! Line-oriented plain-text index.

use std::io::Write;

use crate::entry::DictionaryRecord;
use crate::error::Result;

use super::DictionarySink;

/// Writes `:<key>:<body>` followed by a newline, once per key.
///
/// Bodies are written verbatim; embedded newlines pass through.
#[derive(Debug)]
pub struct PlainTextSink<W: Write> {
    writer: W,
    lines: usize,
}

impl<W: Write> PlainTextSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, lines: 0 }
    }

    /// Number of index lines written so far.
    pub fn lines(&self) -> usize {
        self.lines
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> DictionarySink for PlainTextSink<W> {
    fn add(&mut self, record: &DictionaryRecord) -> Result<()> {
        for key in &record.keys {
            writeln!(self.writer, ":{key}:{}", record.body)?;
            self.lines += 1;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::ContentType;

    fn record(keys: &[&str], body: &str) -> DictionaryRecord {
        DictionaryRecord {
            keys: keys.iter().map(|k| k.to_string()).collect(),
            body: body.to_string(),
            content_type: ContentType::Plain,
        }
    }

    #[test]
    fn test_one_line_per_key() {
        let mut sink = PlainTextSink::new(Vec::new());
        sink.add(&record(&["Whale"], "The Whale\n a mammal")).unwrap();
        sink.add(&record(&["Foo", "Bar"], "Whale\nsee")).unwrap();
        sink.finish().unwrap();

        assert_eq!(sink.lines(), 3);
        assert_eq!(
            String::from_utf8(sink.into_inner()).unwrap(),
            ":Whale:The Whale\n a mammal\n:Foo:Whale\nsee\n:Bar:Whale\nsee\n"
        );
    }

    #[test]
    fn test_empty_body() {
        let mut sink = PlainTextSink::new(Vec::new());
        sink.add(&record(&["A"], "")).unwrap();
        assert_eq!(sink.into_inner(), b":A:\n");
    }
}
