//! Helpers shared by the OOXML readers and writers.
//!
//! Parts are parsed with `roxmltree` (read-only) and modified by splicing the
//! original text at node byte ranges, so everything not touched is written
//! back byte for byte.

use crate::utils::error::{MedalError, Result};
use roxmltree::{Document, Node};
use std::ops::Range;

/// Relationships namespace used by `r:id` attributes.
pub const REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

pub fn parse<'input>(part: &str, xml: &'input str) -> Result<Document<'input>> {
    Document::parse(xml).map_err(|e| MedalError::xml(part, e))
}

pub fn part_str<'a>(part: &str, bytes: &'a [u8]) -> Result<&'a str> {
    let text = std::str::from_utf8(bytes).map_err(|e| MedalError::xml(part, e))?;
    Ok(text.strip_prefix('\u{feff}').unwrap_or(text))
}

/// Local tag name, namespace ignored.
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

pub fn is_element_named(node: Node<'_, '_>, tag: &str) -> bool {
    node.is_element() && get_tag_name(node) == tag
}

pub fn find_child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|child| is_element_named(*child, tag))
}

pub fn find_children<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |child| is_element_named(*child, tag))
}

/// Concatenated text of all `t` descendants.
pub fn collect_text(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| is_element_named(*n, "t"))
        .filter_map(|n| n.text())
        .collect()
}

/// Qualified name of an element as written in the source, e.g. `w:t`.
pub fn qualified_name<'a>(xml: &'a str, node: Node<'_, '_>) -> &'a str {
    let start = node.range().start + 1;
    let rest = &xml[start..];
    let end = rest
        .find(|c: char| c.is_whitespace() || c == '>' || c == '/')
        .unwrap_or(rest.len());
    &rest[..end]
}

pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn escape_attr(text: &str) -> String {
    escape_text(text).replace('"', "&quot;")
}

/// A replacement of one byte range of the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Splice {
    pub range: Range<usize>,
    pub text: String,
}

impl Splice {
    pub fn new(range: Range<usize>, text: impl Into<String>) -> Self {
        Self {
            range,
            text: text.into(),
        }
    }

    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self::new(at..at, text)
    }
}

/// Applies non-overlapping splices to `xml`.
pub fn apply_splices(xml: &str, mut splices: Vec<Splice>) -> Result<String> {
    splices.sort_by_key(|s| (s.range.start, s.range.end));

    let mut out = String::with_capacity(xml.len());
    let mut cursor = 0;
    for splice in splices {
        if splice.range.start < cursor || splice.range.end > xml.len() {
            return Err(MedalError::processing(format!(
                "overlapping XML edit at byte {}",
                splice.range.start
            )));
        }
        out.push_str(&xml[cursor..splice.range.start]);
        out.push_str(&splice.text);
        cursor = splice.range.end;
    }
    out.push_str(&xml[cursor..]);
    Ok(out)
}

/// Inserts `fragment` right before the closing tag of the root element.
pub fn insert_before_root_end(part: &str, xml: &str, fragment: &str) -> Result<String> {
    let doc = parse(part, xml)?;
    let root = doc.root_element();
    let root_range = root.range();
    let source = &xml[root_range.clone()];
    if source.ends_with("/>") {
        return Err(MedalError::xml(part, "root element has no closing tag"));
    }
    let close = source
        .rfind("</")
        .map(|idx| root_range.start + idx)
        .ok_or_else(|| MedalError::xml(part, "root element has no closing tag"))?;
    apply_splices(xml, vec![Splice::insert(close, fragment)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualified_name() {
        let xml = r#"<w:p xmlns:w="urn:w"><w:t xml:space="preserve">a</w:t><w:t/></w:p>"#;
        let doc = Document::parse(xml).unwrap();
        let names: Vec<&str> = doc
            .descendants()
            .filter(|n| is_element_named(*n, "t"))
            .map(|n| qualified_name(xml, n))
            .collect();
        assert_eq!(names, vec!["w:t", "w:t"]);
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape_text("a<b & c>"), "a&lt;b &amp; c&gt;");
        assert_eq!(escape_attr("\"x\""), "&quot;x&quot;");
    }

    #[test]
    fn test_apply_splices() {
        let out = apply_splices(
            "0123456789",
            vec![Splice::new(6..8, "x"), Splice::new(1..3, ""), Splice::insert(5, "-")],
        )
        .unwrap();
        assert_eq!(out, "034-5x89");
    }

    #[test]
    fn test_overlapping_splices_rejected() {
        let result = apply_splices("0123456789", vec![Splice::new(1..5, ""), Splice::new(3..6, "")]);
        assert!(result.is_err());
    }

    #[test]
    fn test_insert_before_root_end() {
        let out = insert_before_root_end("t.xml", "<a><b/></a>", "<c/>").unwrap();
        assert_eq!(out, "<a><b/><c/></a>");
        assert!(insert_before_root_end("t.xml", "<a/>", "<c/>").is_err());
    }

    #[test]
    fn test_collect_text() {
        let xml = "<si><r><t>Гуров</t></r><r><t> Денис</t></r></si>";
        let doc = Document::parse(xml).unwrap();
        assert_eq!(collect_text(doc.root_element()), "Гуров Денис");
    }
}
