//! Line-level markup patterns. Nothing here parses XML; every helper looks
//! at one line of text and tolerates half-typed markup.

use regex::Regex;
use std::sync::OnceLock;

fn closing_tag_regex() -> &'static Regex {
    static CLOSING_TAG: OnceLock<Regex> = OnceLock::new();
    CLOSING_TAG.get_or_init(|| Regex::new(r"</(\S+?)>").expect("Invalid closing tag regex"))
}

fn xml_id_regex() -> &'static Regex {
    static XML_ID: OnceLock<Regex> = OnceLock::new();
    XML_ID.get_or_init(|| Regex::new(r#"xml:id=['"](\S+?)['"]"#).expect("Invalid xml:id regex"))
}

fn staff_opening_regex() -> &'static Regex {
    static STAFF: OnceLock<Regex> = OnceLock::new();
    STAFF.get_or_init(|| Regex::new(r"<staff(?:\s|>)").expect("Invalid staff regex"))
}

/// Name of the first closing tag starting at or after byte `from`.
pub fn closing_tag_from(line: &str, from: usize) -> Option<&str> {
    let rest = line.get(from..)?;
    closing_tag_regex()
        .captures(rest)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Value of the first `xml:id` attribute on the line.
pub fn first_xml_id(line: &str) -> Option<&str> {
    xml_id_regex()
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Every `xml:id` attribute on the line as `(byte offset of the attribute, value)`.
pub fn xml_ids(line: &str) -> impl Iterator<Item = (usize, &str)> {
    xml_id_regex().captures_iter(line).filter_map(|caps| {
        let attr = caps.get(0)?;
        let value = caps.get(1)?;
        Some((attr.start(), value.as_str()))
    })
}

/// True if the line contains `<name` as a whole element name, i.e. followed
/// by whitespace, `>`, `/`, or the end of the line.
pub fn opens(line: &str, name: &str) -> bool {
    let needle = format!("<{name}");
    line.match_indices(&needle).any(|(idx, _)| {
        line[idx + needle.len()..]
            .chars()
            .next()
            .is_none_or(|c| c.is_whitespace() || c == '>' || c == '/')
    })
}

pub fn closes(line: &str, name: &str) -> bool {
    line.contains(&format!("</{name}"))
}

/// Number of `<staff` openings in the whole text.
pub fn count_staff_openings(text: &str) -> usize {
    staff_opening_regex().find_iter(text).count()
}
