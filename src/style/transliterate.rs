//! Superscript and subscript transliteration.
//!
//! Runs of `<sup>`/`<sub>` text are rewritten into Unicode modifier and
//! subscript characters. Unicode has no complete repertoire for either, so a
//! run containing any unmapped character is kept verbatim inside a textual
//! `[sup]…[/sup]` marker instead.

/// Direction of a transliteration run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Script {
    Superscript,
    Subscript,
}

impl Script {
    /// Tag name used by the source markup and by the fallback marker.
    pub fn tag(self) -> &'static str {
        match self {
            Script::Superscript => "sup",
            Script::Subscript => "sub",
        }
    }

    fn table(self) -> &'static [(char, &'static str)] {
        match self {
            Script::Superscript => SUPERSCRIPT,
            Script::Subscript => SUBSCRIPT,
        }
    }

    /// Mapped form of a single character, if there is one.
    pub fn map(self, c: char) -> Option<&'static str> {
        self.table()
            .iter()
            .find(|(from, _)| *from == c)
            .map(|(_, to)| *to)
    }
}

/// Result of transliterating one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transliteration {
    pub output: String,
    /// False when at least one character had no mapping and `output` is the
    /// bracketed fallback.
    pub ok: bool,
}

/// Transliterate `text` in the given direction.
///
/// # Examples
///
/// ```
/// use chmdict::style::{transliterate, Script};
///
/// assert_eq!(transliterate(Script::Superscript, "2").output, "²");
/// assert_eq!(transliterate(Script::Subscript, "n+1").output, "ₙ₊₁");
///
/// // 'b' has no subscript form: the whole run is kept verbatim
/// let t = transliterate(Script::Subscript, "ab");
/// assert!(!t.ok);
/// assert_eq!(t.output, "[sub]ab[/sub]");
/// ```
pub fn transliterate(script: Script, text: &str) -> Transliteration {
    let mut output = String::with_capacity(text.len() * 3);
    for c in text.chars() {
        match script.map(c) {
            Some(mapped) => output.push_str(mapped),
            None => {
                let tag = script.tag();
                return Transliteration {
                    output: format!("[{tag}]{text}[/{tag}]"),
                    ok: false,
                };
            }
        }
    }
    Transliteration { output, ok: true }
}

/// Reverse lookup: recover the source characters of a fully mapped run.
///
/// Returns `None` if `text` contains anything that is not the output of
/// [`transliterate`] in this direction.
pub fn untransliterate(script: Script, text: &str) -> Option<String> {
    let table = script.table();
    let mut rest = text;
    let mut result = String::new();
    while !rest.is_empty() {
        // Longest match first: some mapped forms span two code points.
        let (from, to) = table
            .iter()
            .filter(|(_, to)| rest.starts_with(to))
            .max_by_key(|(_, to)| to.len())?;
        result.push(*from);
        rest = &rest[to.len()..];
    }
    Some(result)
}

static SUPERSCRIPT: &[(char, &str)] = &[
    ('0', "\u{2070}"),
    ('1', "\u{00B9}"),
    ('2', "\u{00B2}"),
    ('3', "\u{00B3}"),
    ('4', "\u{2074}"),
    ('5', "\u{2075}"),
    ('6', "\u{2076}"),
    ('7', "\u{2077}"),
    ('8', "\u{2078}"),
    ('9', "\u{2079}"),
    ('+', "\u{207A}"),
    ('-', "\u{207B}"),
    ('(', "\u{207D}"),
    (')', "\u{207E}"),
    ('=', "\u{207C}"),
    // No superscript solidus exists; a combining acute on a placeholder
    // circle is the closest visual.
    ('/', "\u{25CC}\u{0301}"),
    ('a', "\u{1D43}"),
    ('b', "\u{1D47}"),
    ('c', "\u{1D9C}"),
    ('d', "\u{1D48}"),
    ('e', "\u{1D49}"),
    ('f', "\u{1DA0}"),
    ('g', "\u{1D4D}"),
    ('h', "\u{02B0}"),
    ('i', "\u{2071}"),
    ('j', "\u{02B2}"),
    ('k', "\u{1D4F}"),
    ('l', "\u{02E1}"),
    ('m', "\u{1D50}"),
    ('n', "\u{207F}"),
    ('o', "\u{1D52}"),
    ('p', "\u{1D56}"),
    ('q', "\u{107A5}"),
    ('r', "\u{02B3}"),
    ('s', "\u{02E2}"),
    ('t', "\u{1D57}"),
    ('u', "\u{1D58}"),
    ('v', "\u{1D5B}"),
    ('w', "\u{02B7}"),
    ('x', "\u{02E3}"),
    ('y', "\u{02B8}"),
    ('z', "\u{1DBB}"),
    ('A', "\u{1D2C}"),
    ('B', "\u{1D2E}"),
    ('C', "\u{A7F2}"),
    ('D', "\u{1D30}"),
    ('E', "\u{1D31}"),
    ('F', "\u{A7F3}"),
    ('G', "\u{1D33}"),
    ('H', "\u{1D34}"),
    ('I', "\u{1D35}"),
    ('J', "\u{1D36}"),
    ('K', "\u{1D37}"),
    ('L', "\u{1D38}"),
    ('M', "\u{1D39}"),
    ('N', "\u{1D3A}"),
    ('O', "\u{1D3C}"),
    ('P', "\u{1D3E}"),
    ('Q', "\u{A7F4}"),
    ('R', "\u{1D3F}"),
    ('T', "\u{1D40}"),
    ('U', "\u{1D41}"),
    ('V', "\u{2C7D}"),
    ('W', "\u{1D42}"),
    ('Y', "\u{107B2}"),
];

static SUBSCRIPT: &[(char, &str)] = &[
    ('0', "\u{2080}"),
    ('1', "\u{2081}"),
    ('2', "\u{2082}"),
    ('3', "\u{2083}"),
    ('4', "\u{2084}"),
    ('5', "\u{2085}"),
    ('6', "\u{2086}"),
    ('7', "\u{2087}"),
    ('8', "\u{2088}"),
    ('9', "\u{2089}"),
    ('+', "\u{208A}"),
    ('-', "\u{208B}"),
    ('(', "\u{208D}"),
    (')', "\u{208E}"),
    ('=', "\u{208C}"),
    ('a', "\u{2090}"),
    ('e', "\u{2091}"),
    ('h', "\u{2095}"),
    ('i', "\u{1D62}"),
    ('j', "\u{2C7C}"),
    ('k', "\u{2096}"),
    ('l', "\u{2097}"),
    ('m', "\u{2098}"),
    ('n', "\u{2099}"),
    ('o', "\u{2092}"),
    ('p', "\u{209A}"),
    ('r', "\u{1D63}"),
    ('s', "\u{209B}"),
    ('t', "\u{209C}"),
    ('u', "\u{1D64}"),
    ('v', "\u{1D65}"),
    ('x', "\u{2093}"),
];
