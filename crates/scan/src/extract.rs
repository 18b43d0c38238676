// ABOUTME: Spoken-text extraction: flattens a claimed region into clean plain text.
// ABOUTME: Entity decoding, break normalization, defensive tag stripping, whitespace collapse.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Node};

use crate::exclude::is_excluded;

static BR_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<br\s*/?>").unwrap());

/// Named entities decoded beyond the numeric forms. The parser already
/// decodes entities in well-formed documents; this pass catches values that
/// arrive double-encoded or leak in through raw text.
const NAMED_ENTITIES: &[(&str, &str)] = &[
    ("amp", "&"),
    ("lt", "<"),
    ("gt", ">"),
    ("quot", "\""),
    ("apos", "'"),
    ("nbsp", " "),
    ("ndash", "\u{2013}"),
    ("mdash", "\u{2014}"),
    ("lsquo", "\u{2018}"),
    ("rsquo", "\u{2019}"),
    ("ldquo", "\u{201C}"),
    ("rdquo", "\u{201D}"),
    ("hellip", "\u{2026}"),
    ("copy", "\u{00A9}"),
    ("reg", "\u{00AE}"),
    ("trade", "\u{2122}"),
    ("bull", "\u{2022}"),
    ("middot", "\u{00B7}"),
    ("deg", "\u{00B0}"),
    ("euro", "\u{20AC}"),
    ("pound", "\u{00A3}"),
];

/// Flatten everything spoken under `element`: text runs collected depth
/// first in document order, excluded subtrees skipped, runs joined by a
/// single space, and the result normalized. Pure; empty regions yield "".
pub fn extract_spoken_text(element: ElementRef<'_>) -> String {
    let mut runs = Vec::new();
    collect_runs(element, &mut runs);
    collapse_whitespace(&runs.join(" "))
}

fn collect_runs(element: ElementRef<'_>, runs: &mut Vec<String>) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                let cleaned = clean_text_run(text);
                if !cleaned.is_empty() {
                    runs.push(cleaned);
                }
            }
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    if !is_excluded(&child_el) {
                        collect_runs(child_el, runs);
                    }
                }
            }
            _ => {}
        }
    }
}

/// One text run through the full cleanup chain: inline breaks to newlines,
/// entities to characters, leaked markup stripped, whitespace collapsed.
fn clean_text_run(text: &str) -> String {
    let broken = BR_TAG.replace_all(text, "\n");
    let decoded = decode_entities(&broken);
    let stripped = strip_tags(&decoded);
    collapse_whitespace(&stripped)
}

/// Decode named, decimal, and hex HTML entities in a single pass.
/// Unrecognized or unterminated sequences pass through untouched.
pub fn decode_entities(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(pos) = rest.find('&') {
        result.push_str(&rest[..pos]);
        rest = &rest[pos..];

        // An entity is '&' ... ';' with a short, semicolon-terminated body.
        let Some(end) = rest[1..].find(';').filter(|&e| e <= 32).map(|e| e + 1) else {
            result.push('&');
            rest = &rest[1..];
            continue;
        };

        let body = &rest[1..end];
        match decode_entity_body(body) {
            Some(decoded) => result.push_str(&decoded),
            None => result.push_str(&rest[..=end]),
        }
        rest = &rest[end + 1..];
    }

    result.push_str(rest);
    result
}

fn decode_entity_body(body: &str) -> Option<String> {
    if let Some(numeric) = body.strip_prefix('#') {
        let code = if let Some(hex) = numeric.strip_prefix(['x', 'X']) {
            u32::from_str_radix(hex, 16).ok()?
        } else {
            numeric.parse::<u32>().ok()?
        };
        return char::from_u32(code).map(String::from);
    }
    NAMED_ENTITIES
        .iter()
        .find(|(name, _)| *name == body)
        .map(|(_, repl)| (*repl).to_string())
}

/// Strip angle-bracketed markup from a string. Naive by intent: this only
/// runs over text values, where any tag at all is an accident.
pub fn strip_tags(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut in_tag = false;

    for c in s.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }

    result
}

/// Collapse any run of whitespace into a single space and trim the ends.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
