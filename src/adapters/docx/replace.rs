//! Placeholder substitution inside WordprocessingML parts.

use crate::adapters::xml::{self, Splice};
use crate::utils::error::{MedalError, Result};
use regex::{NoExpand, Regex};
use roxmltree::Node;
use std::borrow::Cow;

/// A compiled set of placeholder strings.
///
/// Matching is a single left-to-right pass; at each position the longest
/// placeholder wins, and substituted text is never scanned again.
#[derive(Debug, Clone)]
pub struct Placeholders {
    pattern: Regex,
}

impl Placeholders {
    pub fn compile<S: AsRef<str>>(placeholders: &[S]) -> Result<Self> {
        let mut literals: Vec<&str> = placeholders
            .iter()
            .map(|p| p.as_ref())
            .filter(|p| !p.is_empty())
            .collect();
        if literals.is_empty() {
            return Err(MedalError::MissingConfigError {
                field: "placeholder".to_string(),
            });
        }

        // regex alternation is leftmost-first, so longer literals go first
        literals.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));
        literals.dedup();

        let alternation = literals
            .iter()
            .map(|literal| regex::escape(literal))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&alternation).map_err(|e| MedalError::ConfigValidationError {
            field: "placeholder".to_string(),
            message: e.to_string(),
        })?;

        Ok(Self { pattern })
    }

    pub fn with_value(&self, value: impl Into<String>) -> Replacements {
        Replacements {
            placeholders: self.clone(),
            value: value.into(),
        }
    }
}

/// Placeholders bound to the text that replaces them.
#[derive(Debug, Clone)]
pub struct Replacements {
    placeholders: Placeholders,
    value: String,
}

impl Replacements {
    pub fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        self.placeholders
            .pattern
            .replace_all(text, NoExpand(&self.value))
    }
}

/// Outcome of substituting one part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartReplacement {
    pub xml: String,
    pub paragraphs_changed: usize,
}

fn nearest_paragraph<'a, 'input>(node: Node<'a, 'input>) -> Option<Node<'a, 'input>> {
    node.ancestors().find(|n| xml::is_element_named(*n, "p"))
}

/// Substitutes placeholders paragraph by paragraph.
///
/// A placeholder may be split over several runs. When a paragraph's joined
/// text changes, its first text node receives the whole new text and the
/// remaining text nodes are emptied; run formatting of the first run wins.
pub fn replace_in_part(
    part: &str,
    source: &str,
    replacements: &Replacements,
) -> Result<Option<PartReplacement>> {
    let doc = xml::parse(part, source)?;
    let mut splices = Vec::new();
    let mut paragraphs_changed = 0;

    for paragraph in doc
        .descendants()
        .filter(|n| xml::is_element_named(*n, "p"))
    {
        let texts: Vec<Node> = paragraph
            .descendants()
            .filter(|n| xml::is_element_named(*n, "t"))
            .filter(|n| nearest_paragraph(*n) == Some(paragraph))
            .collect();
        let Some(first) = texts.first() else {
            continue;
        };

        let original: String = texts.iter().filter_map(|t| t.text()).collect();
        let replaced = replacements.apply(&original);
        if let Cow::Borrowed(_) = replaced {
            continue;
        }

        let qname = xml::qualified_name(source, *first);
        splices.push(Splice::new(
            first.range(),
            format!(
                "<{q} xml:space=\"preserve\">{}</{q}>",
                xml::escape_text(&replaced),
                q = qname
            ),
        ));
        for text in &texts[1..] {
            let qname = xml::qualified_name(source, *text);
            splices.push(Splice::new(text.range(), format!("<{}/>", qname)));
        }
        paragraphs_changed += 1;
    }

    if splices.is_empty() {
        return Ok(None);
    }

    Ok(Some(PartReplacement {
        xml: xml::apply_splices(source, splices)?,
        paragraphs_changed,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const W: &str = r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main""#;

    fn defaults() -> Placeholders {
        Placeholders::compile(&[
            "Гурову Денису Сергійовичу",
            "Гуров Денис Сергійович",
            "Гуров",
        ])
        .unwrap()
    }

    #[test]
    fn test_longest_placeholder_wins() {
        let r = defaults().with_value("Шевченку Тетяні Іванівні");
        assert_eq!(
            r.apply("Нагороджується Гурову Денису Сергійовичу!"),
            "Нагороджується Шевченку Тетяні Іванівні!"
        );
        assert_eq!(r.apply("пан Гуров"), "пан Шевченку Тетяні Іванівні");
    }

    #[test]
    fn test_value_not_rescanned() {
        let r = defaults().with_value("Гурову Денису Сергійовичу");
        assert_eq!(
            r.apply("Гурову Денису Сергійовичу"),
            "Гурову Денису Сергійовичу"
        );
    }

    #[test]
    fn test_value_with_dollar_sign_is_literal() {
        let r = Placeholders::compile(&["NAME"]).unwrap().with_value("$1 ${x}");
        assert_eq!(r.apply("to NAME"), "to $1 ${x}");
    }

    #[test]
    fn test_empty_placeholders_rejected() {
        assert!(Placeholders::compile::<&str>(&[]).is_err());
        assert!(Placeholders::compile(&[""]).is_err());
    }

    #[test]
    fn test_replace_across_runs() {
        let source = format!(
            r#"<w:document {W}><w:body><w:p><w:r><w:rPr><w:b/></w:rPr><w:t>Гуро</w:t></w:r><w:r><w:t xml:space="preserve">ву Денису </w:t></w:r><w:r><w:t>Сергійовичу</w:t></w:r></w:p></w:body></w:document>"#
        );
        let r = defaults().with_value("Шевченку Тетяні Іванівні");
        let out = replace_in_part("word/document.xml", &source, &r)
            .unwrap()
            .unwrap();

        assert_eq!(out.paragraphs_changed, 1);
        assert_eq!(
            out.xml,
            format!(
                r#"<w:document {W}><w:body><w:p><w:r><w:rPr><w:b/></w:rPr><w:t xml:space="preserve">Шевченку Тетяні Іванівні</w:t></w:r><w:r><w:t/></w:r><w:r><w:t/></w:r></w:p></w:body></w:document>"#
            )
        );
    }

    #[test]
    fn test_untouched_paragraphs_kept_verbatim() {
        let source = format!(
            r#"<w:document {W}><w:body><w:p><w:r><w:t>Грамота</w:t></w:r></w:p><w:p><w:r><w:t>Гуров</w:t></w:r></w:p></w:body></w:document>"#
        );
        let r = defaults().with_value("Бойку Марії");
        let out = replace_in_part("word/document.xml", &source, &r)
            .unwrap()
            .unwrap();
        assert!(out.xml.contains("<w:t>Грамота</w:t>"));
        assert!(out.xml.contains(r#"<w:t xml:space="preserve">Бойку Марії</w:t>"#));
    }

    #[test]
    fn test_no_match_returns_none() {
        let source = format!(r#"<w:hdr {W}><w:p><w:r><w:t>Грамота</w:t></w:r></w:p></w:hdr>"#);
        let r = defaults().with_value("Бойку Марії");
        assert!(replace_in_part("word/header1.xml", &source, &r)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_escapes_replacement() {
        let source = format!(r#"<w:hdr {W}><w:p><w:r><w:t>NAME &amp; co</w:t></w:r></w:p></w:hdr>"#);
        let r = Placeholders::compile(&["NAME"]).unwrap().with_value("A<B");
        let out = replace_in_part("word/header1.xml", &source, &r)
            .unwrap()
            .unwrap();
        assert!(out.xml.contains(">A&lt;B &amp; co<"));
    }

    #[test]
    fn test_nested_text_box_paragraphs_are_separate() {
        let source = format!(
            r#"<w:document {W}><w:body><w:p><w:r><w:t>Гуров</w:t></w:r><w:r><w:txbxContent><w:p><w:r><w:t>x</w:t></w:r></w:p></w:txbxContent></w:r></w:p></w:body></w:document>"#
        );
        let r = defaults().with_value("Бойку");
        let out = replace_in_part("word/document.xml", &source, &r)
            .unwrap()
            .unwrap();
        assert_eq!(out.paragraphs_changed, 1);
        assert!(out.xml.contains("<w:t>x</w:t>"));
    }

    #[test]
    fn test_invalid_xml() {
        let r = defaults().with_value("x");
        assert!(replace_in_part("word/document.xml", "<w:p>", &r).is_err());
    }
}
