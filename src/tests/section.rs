use super::{heading_text, strip_closing_sequence, Position, Section, SectionIndex, SectionKind};
use crate::error::Error;

fn sample() -> SectionIndex {
    SectionIndex::new(vec![
        Section::heading(0, 1, "Title", 7),
        Section::paragraph(2, 2, 9).with_id("abc123"),
        Section::paragraph(3, 4, 5),
        Section::other("list", 6, 8, 4),
    ])
    .unwrap()
}

#[test]
fn test_rejects_overlapping_sections() {
    let result = SectionIndex::new(vec![
        Section::paragraph(0, 3, 1),
        Section::paragraph(3, 4, 1),
    ]);
    assert!(matches!(result, Err(Error::UnorderedSections { index: 1 })));
}

#[test]
fn test_rejects_inverted_bounds() {
    let result = SectionIndex::new(vec![Section::paragraph(5, 2, 1)]);
    assert!(matches!(result, Err(Error::UnorderedSections { index: 0 })));
}

#[test]
fn test_headings_are_listed_in_order() {
    let headings = sample().headings();
    assert_eq!(headings.len(), 1);
    assert_eq!(headings[0].text, "Title");
    assert_eq!(headings[0].level, 1);
    assert_eq!(headings[0].start_line, 0);
}

#[test]
fn test_ids_only_come_from_paragraphs() {
    let index = sample();
    assert_eq!(index.ids().collect::<Vec<_>>(), vec!["abc123"]);
    assert!(index.contains_id("abc123"));
    assert!(!index.contains_id("zzz999"));
}

#[test]
fn test_assign_id_moves_insertion_column() {
    let mut index = sample();
    index.assign_id(2, "k3j9xa", 8);
    let section = &index.sections()[2];
    assert_eq!(section.id(), Some("k3j9xa"));
    assert_eq!(section.end(), Position::new(4, 13));
}

#[test]
fn test_assign_id_ignores_non_paragraphs() {
    let mut index = sample();
    index.assign_id(3, "k3j9xa", 8);
    assert_eq!(
        index.sections()[3].kind,
        SectionKind::Other {
            kind: "list".to_string()
        }
    );
    assert_eq!(index.sections()[3].end_column, 4);
}

#[test]
fn test_section_serialises_with_type_tag() {
    let json = serde_json::to_value(&sample().sections()[1]).unwrap();
    assert_eq!(json["type"], "paragraph");
    assert_eq!(json["id"], "abc123");
    assert_eq!(json["start_line"], 2);
}

#[test]
fn test_heading_text_drops_closing_sequence() {
    assert_eq!(heading_text("## Foo ##"), "Foo");
    assert_eq!(heading_text("# Foo #####   "), "Foo");
    assert_eq!(heading_text("### C# #"), "C#");
    assert_eq!(heading_text("# Foo#"), "Foo#");
    assert_eq!(heading_text("# ##"), "");
    assert_eq!(heading_text("Setext title"), "Setext title");
}

#[test]
fn test_closing_sequence_needs_separating_space() {
    assert_eq!(strip_closing_sequence("Foo ##"), "Foo");
    assert_eq!(strip_closing_sequence("Foo##"), "Foo##");
    assert_eq!(strip_closing_sequence("Foo"), "Foo");
}
