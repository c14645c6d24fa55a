//! Stitching rendered certificates into one multi-section document.
//!
//! The first package is the base. Every further document contributes its
//! body, preceded by a section break that carries the previous document's
//! page setup, so each certificate starts on a new page. Header and footer
//! parts referenced by a copied body are duplicated under new names, which
//! keeps each section's substituted header intact.
//!
//! All inputs are expected to come from the same template: body
//! relationships (images, hyperlinks) are assumed to resolve identically in
//! every package.

use super::package::{rels_part_for, Package, CONTENT_TYPES_PART, DOCUMENT_PART, DOCUMENT_RELS_PART};
use crate::adapters::xml::{self, Splice, REL_NS};
use crate::utils::error::{MedalError, Result};
use roxmltree::{Attribute, Node};
use std::collections::HashMap;
use std::ops::Range;

const HEADER_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.header+xml";
const FOOTER_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.footer+xml";

/// Body of one document, split at its final section properties.
#[derive(Debug, Clone)]
struct BodyLayout {
    /// Element prefix of the main namespace including the colon, e.g. `w:`.
    prefix: String,
    content: String,
    /// Final `sectPr` with any section-start `type` removed.
    sect_pr: Option<String>,
    /// Range of `content` plus the final `sectPr` in the source.
    replace_range: Range<usize>,
}

fn split_body(source: &str) -> Result<BodyLayout> {
    let doc = xml::parse(DOCUMENT_PART, source)?;
    let body = xml::find_child(doc.root_element(), "body")
        .ok_or_else(|| MedalError::template("document has no body"))?;

    let elements: Vec<_> = body.children().filter(|n| n.is_element()).collect();
    let (Some(first), Some(last)) = (elements.first(), elements.last()) else {
        return Err(MedalError::template("document body is empty"));
    };

    let prefix = match xml::qualified_name(source, body).split_once(':') {
        Some((prefix, _)) => format!("{}:", prefix),
        None => String::new(),
    };

    let sect = xml::is_element_named(*last, "sectPr").then_some(*last);
    let content_end = sect.map_or(last.range().end, |s| s.range().start);
    let sect_pr = sect.map(|s| {
        let range = s.range();
        match xml::find_child(s, "type") {
            Some(kind) => format!(
                "{}{}",
                &source[range.start..kind.range().start],
                &source[kind.range().end..range.end]
            ),
            None => source[range].to_string(),
        }
    });

    Ok(BodyLayout {
        prefix,
        content: source[first.range().start..content_end].to_string(),
        sect_pr,
        replace_range: first.range().start..last.range().end,
    })
}

#[derive(Debug, Clone)]
struct Relationship {
    kind: String,
    target: String,
}

fn read_relationships(source: &str) -> Result<HashMap<String, Relationship>> {
    let doc = xml::parse(DOCUMENT_RELS_PART, source)?;
    let rels = xml::find_children(doc.root_element(), "Relationship")
        .filter_map(|rel| {
            let id = rel.attribute("Id")?;
            Some((
                id.to_string(),
                Relationship {
                    kind: rel.attribute("Type").unwrap_or_default().to_string(),
                    target: rel.attribute("Target").unwrap_or_default().to_string(),
                },
            ))
        })
        .collect();
    Ok(rels)
}

fn content_type_overrides(source: &str) -> Result<HashMap<String, String>> {
    let doc = xml::parse(CONTENT_TYPES_PART, source)?;
    let overrides = xml::find_children(doc.root_element(), "Override")
        .filter_map(|o| {
            Some((
                o.attribute("PartName")?.to_string(),
                o.attribute("ContentType")?.to_string(),
            ))
        })
        .collect();
    Ok(overrides)
}

/// Resolves a relationship target of `word/document.xml` to a part name.
fn resolve_target(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("word/{}", target),
    }
}

/// Accumulates edits to the base package's shared parts.
struct BaseEdits {
    relationships: String,
    content_types: String,
    new_parts: Vec<(String, Vec<u8>)>,
}

impl BaseEdits {
    fn add_relationship(&mut self, id: &str, kind: &str, target: &str) -> Result<()> {
        let fragment = format!(
            r#"<Relationship Id="{}" Type="{}" Target="{}"/>"#,
            xml::escape_attr(id),
            xml::escape_attr(kind),
            xml::escape_attr(target)
        );
        self.relationships =
            xml::insert_before_root_end(DOCUMENT_RELS_PART, &self.relationships, &fragment)?;
        Ok(())
    }

    fn add_override(&mut self, part: &str, content_type: &str) -> Result<()> {
        let fragment = format!(
            r#"<Override PartName="/{}" ContentType="{}"/>"#,
            xml::escape_attr(part),
            xml::escape_attr(content_type)
        );
        self.content_types =
            xml::insert_before_root_end(CONTENT_TYPES_PART, &self.content_types, &fragment)?;
        Ok(())
    }
}

/// Copies the header/footer parts referenced from document `index` into the
/// base package and points the references at the copies.
fn relink_headers(index: usize, package: &Package, base: &mut BaseEdits) -> Result<String> {
    let source = xml::part_str(DOCUMENT_PART, package.require_part(DOCUMENT_PART)?)?;
    let rels = read_relationships(xml::part_str(
        DOCUMENT_RELS_PART,
        package.require_part(DOCUMENT_RELS_PART)?,
    )?)?;
    let overrides = match package.part(CONTENT_TYPES_PART) {
        Some(bytes) => content_type_overrides(xml::part_str(CONTENT_TYPES_PART, bytes)?)?,
        None => HashMap::new(),
    };

    let doc = xml::parse(DOCUMENT_PART, source)?;
    let mut renamed: HashMap<String, String> = HashMap::new();
    let mut splices = Vec::new();

    let references = doc.descendants().filter(|n| {
        xml::is_element_named(*n, "headerReference") || xml::is_element_named(*n, "footerReference")
    });

    for reference in references {
        let Some(old_id) = reference.attribute((REL_NS, "id")) else {
            continue;
        };
        let Some(rel) = rels.get(old_id) else {
            tracing::warn!("Dangling header/footer relationship '{}' in document {}", old_id, index);
            continue;
        };

        let new_id = match renamed.get(old_id) {
            Some(id) => id.clone(),
            None => {
                let part = resolve_target(&rel.target);
                let bytes = package
                    .require_part(&part)
                    .map_err(|_| MedalError::template(format!("missing header/footer part '{}'", part)))?;

                let stem = part
                    .rsplit('/')
                    .next()
                    .and_then(|file| file.strip_suffix(".xml"))
                    .unwrap_or("part");
                let new_target = format!("{}_r{}.xml", stem, index);
                let new_part = format!("word/{}", new_target);
                let new_id = format!("rIdMerged{}x{}", index, renamed.len() + 1);

                base.new_parts.push((new_part.clone(), bytes.to_vec()));
                if let Some(part_rels) = package.part(&rels_part_for(&part)) {
                    base.new_parts
                        .push((rels_part_for(&new_part), part_rels.to_vec()));
                }

                let fallback = if xml::get_tag_name(reference) == "headerReference" {
                    HEADER_CONTENT_TYPE
                } else {
                    FOOTER_CONTENT_TYPE
                };
                let content_type = overrides
                    .get(&format!("/{}", part))
                    .map(String::as_str)
                    .unwrap_or(fallback);

                base.add_override(&new_part, content_type)?;
                base.add_relationship(&new_id, &rel.kind, &new_target)?;
                renamed.insert(old_id.to_string(), new_id.clone());
                new_id
            }
        };

        let qname = xml::qualified_name(source, reference);
        let main_prefix = qname.split_once(':').map(|(p, _)| p);
        let rel_prefix = reference.lookup_prefix(REL_NS).unwrap_or("r");
        let kind = reference
            .attributes()
            .find(|a| a.name() == "type")
            .map(|a| a.value())
            .unwrap_or("default");
        let type_attr = match main_prefix {
            Some(p) => format!("{}:type", p),
            None => "type".to_string(),
        };

        splices.push(Splice::new(
            reference.range(),
            format!(
                r#"<{} {}="{}" {}:id="{}"/>"#,
                qname,
                type_attr,
                xml::escape_attr(kind),
                rel_prefix,
                xml::escape_attr(&new_id)
            ),
        ));
    }

    xml::apply_splices(source, splices)
}

/// First drawing (`docPr`) and bookmark ids not yet used in the merged body.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct IdCounters {
    drawing: u64,
    bookmark: u64,
}

fn is_bookmark(node: Node<'_, '_>) -> bool {
    xml::is_element_named(node, "bookmarkStart") || xml::is_element_named(node, "bookmarkEnd")
}

fn numeric_id<'a, 'input>(node: Node<'a, 'input>) -> Option<(Attribute<'a, 'input>, u64)> {
    let attr = node.attributes().find(|a| a.name() == "id")?;
    let id = attr.value().parse().ok()?;
    Some((attr, id))
}

impl IdCounters {
    fn observe(source: &str) -> Result<Self> {
        let doc = xml::parse(DOCUMENT_PART, source)?;
        let mut counters = Self::default();
        for node in doc.descendants() {
            let Some((_, id)) = numeric_id(node) else {
                continue;
            };
            if xml::is_element_named(node, "docPr") {
                counters.drawing = counters.drawing.max(id + 1);
            } else if is_bookmark(node) {
                counters.bookmark = counters.bookmark.max(id + 1);
            }
        }
        Ok(counters)
    }
}

/// Shifts drawing and bookmark ids past those already merged, keeping
/// bookmark start/end pairs matched.
fn renumber_ids(source: &str, counters: &mut IdCounters) -> Result<String> {
    let doc = xml::parse(DOCUMENT_PART, source)?;
    let offsets = *counters;
    let mut splices = Vec::new();

    for node in doc.descendants() {
        let (offset, next) = if xml::is_element_named(node, "docPr") {
            (offsets.drawing, &mut counters.drawing)
        } else if is_bookmark(node) {
            (offsets.bookmark, &mut counters.bookmark)
        } else {
            continue;
        };
        let Some((attr, id)) = numeric_id(node) else {
            continue;
        };

        let new_id = id + offset;
        *next = (*next).max(new_id + 1);
        splices.push(Splice::new(attr.range_value(), new_id.to_string()));
    }

    xml::apply_splices(source, splices)
}

fn section_break(layout: &BodyLayout) -> String {
    let w = &layout.prefix;
    match &layout.sect_pr {
        Some(sect_pr) => format!("<{w}p><{w}pPr>{}</{w}pPr></{w}p>", sect_pr, w = w),
        None => format!(
            r#"<{w}p><{w}r><{w}br {w}type="page"/></{w}r></{w}p>"#,
            w = w
        ),
    }
}

/// Merges rendered documents into one, in the given order.
pub fn merge_documents(documents: &[Vec<u8>]) -> Result<Vec<u8>> {
    let Some((first, rest)) = documents.split_first() else {
        return Err(MedalError::processing("No documents to merge"));
    };
    if rest.is_empty() {
        return Ok(first.clone());
    }

    let mut base = Package::from_bytes(first)?;
    let mut edits = BaseEdits {
        relationships: xml::part_str(DOCUMENT_RELS_PART, base.require_part(DOCUMENT_RELS_PART)?)?
            .to_string(),
        content_types: xml::part_str(CONTENT_TYPES_PART, base.require_part(CONTENT_TYPES_PART)?)?
            .to_string(),
        new_parts: Vec::new(),
    };

    let base_source = xml::part_str(DOCUMENT_PART, base.require_part(DOCUMENT_PART)?)?.to_string();
    let mut layouts = vec![split_body(&base_source)?];
    let mut ids = IdCounters::observe(&base_source)?;

    for (offset, bytes) in rest.iter().enumerate() {
        let index = offset + 1;
        let package = Package::from_bytes(bytes)?;
        let relinked = relink_headers(index, &package, &mut edits)?;
        let renumbered = renumber_ids(&relinked, &mut ids)?;
        layouts.push(split_body(&renumbered)?);
    }

    let mut body = String::new();
    let last = layouts.len() - 1;
    for (i, layout) in layouts.iter().enumerate() {
        body.push_str(&layout.content);
        if i < last {
            body.push_str(&section_break(layout));
        } else if let Some(sect_pr) = &layout.sect_pr {
            body.push_str(sect_pr);
        }
    }

    let range = layouts[0].replace_range.clone();
    let document = xml::apply_splices(&base_source, vec![Splice::new(range, body)])?;

    base.set_part(DOCUMENT_PART, document.into_bytes());
    base.set_part(DOCUMENT_RELS_PART, edits.relationships.into_bytes());
    base.set_part(CONTENT_TYPES_PART, edits.content_types.into_bytes());
    for (name, data) in edits.new_parts {
        base.set_part(&name, data);
    }

    tracing::debug!("Merged {} documents into one package", documents.len());
    base.to_bytes()
}
