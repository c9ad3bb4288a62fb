use super::extract_sections;
use crate::formats::markdown::MarkdownFormat;
use crate::section::{Section, SectionKind};

fn kinds(sections: &[Section]) -> Vec<&str> {
    sections.iter().map(Section::kind_name).collect()
}

#[test]
fn test_heading_and_paragraph() {
    let index = extract_sections("# Title\n\nPara one.\nPara two.\n", &MarkdownFormat).unwrap();
    let sections = index.sections();

    assert_eq!(kinds(sections), vec!["heading", "paragraph"]);
    assert_eq!(
        sections[0].kind,
        SectionKind::Heading {
            level: 1,
            text: "Title".to_string()
        }
    );
    assert_eq!((sections[0].start_line, sections[0].end_line), (0, 0));
    assert_eq!((sections[1].start_line, sections[1].end_line), (2, 3));
    assert_eq!(sections[1].end_column, "Para two.".len());
    assert_eq!(sections[1].id(), None);
}

#[test]
fn test_existing_block_id_is_recognised() {
    let index = extract_sections("## Sub\n\nSome text ^k2m4p6\n", &MarkdownFormat).unwrap();
    let paragraph = &index.sections()[1];

    assert_eq!(paragraph.id(), Some("k2m4p6"));
    assert_eq!(index.headings()[0].level, 2);
}

#[test]
fn test_list_is_one_opaque_block() {
    let text = "Intro\n\n- a\n- b\n\nOutro";
    let index = extract_sections(text, &MarkdownFormat).unwrap();
    let sections = index.sections();

    assert_eq!(kinds(sections), vec!["paragraph", "list", "paragraph"]);
    assert_eq!((sections[1].start_line, sections[1].end_line), (2, 3));
    assert_eq!(sections[2].start_line, 5);
}

#[test]
fn test_setext_heading_spans_underline() {
    let index = extract_sections("Title\n=====\n\nBody", &MarkdownFormat).unwrap();
    let heading = &index.sections()[0];

    assert_eq!(
        heading.kind,
        SectionKind::Heading {
            level: 1,
            text: "Title".to_string()
        }
    );
    assert_eq!((heading.start_line, heading.end_line), (0, 1));
}

#[test]
fn test_empty_document_has_no_sections() {
    let index = extract_sections("", &MarkdownFormat).unwrap();
    assert!(index.is_empty());
}

#[test]
fn test_closing_hashes_are_not_heading_text() {
    let index = extract_sections("## Foo ##\n\nBody.\n", &MarkdownFormat).unwrap();

    assert_eq!(
        index.sections()[0].kind,
        SectionKind::Heading {
            level: 2,
            text: "Foo".to_string()
        }
    );
    assert_eq!(index.headings()[0].text, "Foo");
}
