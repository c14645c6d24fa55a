//! First-column reader for `.xlsx` workbooks.

use crate::adapters::docx::Package;
use crate::adapters::xml::{self, REL_NS};
use crate::utils::error::{MedalError, Result};
use roxmltree::Node;
use std::collections::HashMap;

const WORKBOOK_PART: &str = "xl/workbook.xml";
const WORKBOOK_RELS_PART: &str = "xl/_rels/workbook.xml.rels";
const SHARED_STRINGS_PART: &str = "xl/sharedStrings.xml";

#[derive(Debug, Clone, PartialEq, Eq)]
struct SheetEntry {
    name: String,
    part: String,
}

fn require_part<'p>(package: &'p Package, part: &str) -> Result<&'p str> {
    let bytes = package
        .part(part)
        .ok_or_else(|| MedalError::spreadsheet(format!("workbook has no '{}' part", part)))?;
    xml::part_str(part, bytes)
}

fn list_sheets(package: &Package) -> Result<Vec<SheetEntry>> {
    let workbook = require_part(package, WORKBOOK_PART)?;
    let rels = require_part(package, WORKBOOK_RELS_PART)?;

    let rels_doc = xml::parse(WORKBOOK_RELS_PART, rels)?;
    let targets: HashMap<&str, &str> = xml::find_children(rels_doc.root_element(), "Relationship")
        .filter_map(|rel| Some((rel.attribute("Id")?, rel.attribute("Target")?)))
        .collect();

    let doc = xml::parse(WORKBOOK_PART, workbook)?;
    let sheets = xml::find_child(doc.root_element(), "sheets")
        .ok_or_else(|| MedalError::spreadsheet("workbook lists no sheets"))?;

    let entries = xml::find_children(sheets, "sheet")
        .filter_map(|sheet| {
            let name = sheet.attribute("name")?;
            let target = targets.get(sheet.attribute((REL_NS, "id"))?)?;
            let part = match target.strip_prefix('/') {
                Some(absolute) => absolute.to_string(),
                None => format!("xl/{}", target),
            };
            Some(SheetEntry {
                name: name.to_string(),
                part,
            })
        })
        .collect();
    Ok(entries)
}

fn shared_strings(package: &Package) -> Result<Vec<String>> {
    let Some(bytes) = package.part(SHARED_STRINGS_PART) else {
        return Ok(Vec::new());
    };
    let doc = xml::parse(SHARED_STRINGS_PART, xml::part_str(SHARED_STRINGS_PART, bytes)?)?;

    let strings = xml::find_children(doc.root_element(), "si")
        .map(|si| {
            // phonetic runs (rPh) are annotations, not cell text
            si.descendants()
                .filter(|n| xml::is_element_named(*n, "t"))
                .filter(|n| !n.ancestors().any(|a| xml::is_element_named(a, "rPh")))
                .filter_map(|n| n.text())
                .collect::<String>()
        })
        .collect();
    Ok(strings)
}

/// Column letters of a cell reference: "AB12" -> "AB".
fn column_of(reference: &str) -> &str {
    let end = reference
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(reference.len());
    &reference[..end]
}

fn cell_value(cell: Node<'_, '_>, shared: &[String]) -> Option<String> {
    let value = || xml::find_child(cell, "v").and_then(|v| v.text()).map(str::to_string);

    match cell.attribute("t") {
        Some("s") => {
            let idx: usize = value()?.trim().parse().ok()?;
            shared.get(idx).cloned()
        }
        Some("inlineStr") => xml::find_child(cell, "is").map(xml::collect_text),
        _ => value(),
    }
}

fn first_column(sheet_part: &str, source: &str, shared: &[String]) -> Result<Vec<String>> {
    let doc = xml::parse(sheet_part, source)?;
    let Some(data) = xml::find_child(doc.root_element(), "sheetData") else {
        return Ok(Vec::new());
    };

    let mut names = Vec::new();
    for row in xml::find_children(data, "row") {
        let cell = xml::find_children(row, "c")
            .enumerate()
            .find(|(position, cell)| match cell.attribute("r") {
                Some(reference) => column_of(reference).eq_ignore_ascii_case("A"),
                None => *position == 0,
            })
            .map(|(_, cell)| cell);

        if let Some(value) = cell.and_then(|c| cell_value(c, shared)) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                names.push(trimmed.to_string());
            }
        }
    }
    Ok(names)
}

/// Reads column A of `sheet` (or the first sheet). Every row is data.
pub fn read_names(bytes: &[u8], sheet: Option<&str>) -> Result<Vec<String>> {
    let package = Package::from_bytes(bytes)?;
    let sheets = list_sheets(&package)?;

    let entry = match sheet {
        Some(wanted) => sheets.iter().find(|s| s.name == wanted).ok_or_else(|| {
            let available: Vec<&str> = sheets.iter().map(|s| s.name.as_str()).collect();
            MedalError::spreadsheet(format!(
                "sheet '{}' not found; available sheets: {}",
                wanted,
                available.join(", ")
            ))
        })?,
        None => sheets
            .first()
            .ok_or_else(|| MedalError::spreadsheet("workbook has no sheets"))?,
    };
    tracing::debug!("Reading names from sheet '{}' ({})", entry.name, entry.part);

    let shared = shared_strings(&package)?;
    let source = require_part(&package, &entry.part)?;
    first_column(&entry.part, source, &shared)
}
