mod common;

use common::{certificate_template, paragraph_texts, part_names, read_part};
use medal_press::adapters::docx::{merge_documents, DocxTemplate, Placeholders};
use medal_press::config::default_placeholders;
use medal_press::inflect_to_dative;
use pretty_assertions::assert_eq;

fn render(template: &DocxTemplate, full_name: &str) -> Vec<u8> {
    let placeholders = Placeholders::compile(&default_placeholders()).unwrap();
    let rendered = template
        .render(&placeholders.with_value(inflect_to_dative(full_name)))
        .unwrap();
    assert_eq!(rendered.paragraphs_changed, 2);
    rendered.bytes
}

#[test]
fn test_render_replaces_body_and_header() {
    let template = DocxTemplate::from_bytes(&certificate_template()).unwrap();
    assert_eq!(
        template.text_parts(),
        ["word/document.xml".to_string(), "word/header1.xml".to_string()]
    );

    let bytes = render(&template, "Шевченко Тетяна Іванівна");

    let document = read_part(&bytes, "word/document.xml").unwrap();
    assert_eq!(
        paragraph_texts(&document),
        vec!["ГРАМОТА", "Нагороджується Шевченку Тетяні Іванівні"]
    );
    // the whole paragraph text lands in its first run
    assert!(document.contains(r#"<w:t xml:space="preserve">Нагороджується Шевченку Тетяні Іванівні</w:t>"#));
    assert!(!document.contains("Гуров"));

    let header = read_part(&bytes, "word/header1.xml").unwrap();
    assert_eq!(paragraph_texts(&header), vec!["Учень: Шевченку Тетяні Іванівні"]);
}

#[test]
fn test_template_without_placeholder_is_unchanged() {
    let template = DocxTemplate::from_bytes(&certificate_template()).unwrap();
    let placeholders = Placeholders::compile(&["ПІБ"]).unwrap();

    let rendered = template.render(&placeholders.with_value("Олександрові")).unwrap();

    assert_eq!(rendered.paragraphs_changed, 0);
    let document = read_part(&rendered.bytes, "word/document.xml").unwrap();
    assert_eq!(
        paragraph_texts(&document),
        vec!["ГРАМОТА", "Нагороджується Гурову Денису Сергійовичу"]
    );
}

#[test]
fn test_not_a_docx() {
    assert!(DocxTemplate::from_bytes(b"definitely not a zip").is_err());
    let no_document = common::zip_parts(&[("word/styles.xml", "<styles/>".to_string())]);
    assert!(DocxTemplate::from_bytes(&no_document).is_err());
}

#[test]
fn test_merge_keeps_order_and_per_section_headers() {
    let template = DocxTemplate::from_bytes(&certificate_template()).unwrap();
    let documents: Vec<Vec<u8>> = [
        "Гуров Денис Сергійович",
        "Бойко Марія Іванівна",
        "Олександр",
    ]
    .iter()
    .map(|name| render(&template, name))
    .collect();

    let merged = merge_documents(&documents).unwrap();

    let document = read_part(&merged, "word/document.xml").unwrap();
    assert_eq!(
        paragraph_texts(&document),
        vec![
            "ГРАМОТА",
            "Нагороджується Гурову Денису Сергійовичу",
            "ГРАМОТА",
            "Нагороджується Бойку Марії Іванівні",
            "ГРАМОТА",
            "Нагороджується Олександрові",
        ]
    );
    // one section per certificate
    assert_eq!(document.matches("<w:sectPr>").count(), 3);

    let names = part_names(&merged);
    assert!(names.contains(&"word/header1_r1.xml".to_string()));
    assert!(names.contains(&"word/header1_r2.xml".to_string()));

    assert_eq!(
        paragraph_texts(&read_part(&merged, "word/header1.xml").unwrap()),
        vec!["Учень: Гурову Денису Сергійовичу"]
    );
    assert_eq!(
        paragraph_texts(&read_part(&merged, "word/header1_r2.xml").unwrap()),
        vec!["Учень: Олександрові"]
    );

    let rels = read_part(&merged, "word/_rels/document.xml.rels").unwrap();
    assert!(rels.contains(r#"Id="rIdMerged1x1""#));
    assert!(rels.contains(r#"Target="header1_r2.xml""#));
    assert!(document.contains(r#"r:id="rIdMerged2x1""#));

    let content_types = read_part(&merged, "[Content_Types].xml").unwrap();
    assert!(content_types.contains(r#"PartName="/word/header1_r1.xml""#));
}

#[test]
fn test_merge_single_document_is_identity() {
    let template = DocxTemplate::from_bytes(&certificate_template()).unwrap();
    let only = render(&template, "Олександр");
    assert_eq!(merge_documents(&[only.clone()]).unwrap(), only);
}
