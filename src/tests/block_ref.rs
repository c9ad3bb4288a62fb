use super::{annotate_selection, annotate_selections, copy_reference, embed, RefToken};
use crate::block_id::{is_valid_id, BlockIdGenerator};
use crate::buffer::{LineBuffer, Selection, TextBuffer};
use crate::error::Error;
use crate::section::{Position, Section, SectionIndex};

const DOC: [&str; 4] = ["# Title", "", "Para one.", "Para two."];

fn index() -> SectionIndex {
    SectionIndex::new(vec![
        Section::heading(0, 1, "Title", 7),
        Section::paragraph(2, 2, 9),
        Section::paragraph(3, 3, 9),
    ])
    .unwrap()
}

fn block_id(token: &RefToken) -> &str {
    match token {
        RefToken::Block { id } => id,
        RefToken::Heading { .. } => panic!("expected a block token, got {token:?}"),
    }
}

#[test]
fn test_copy_reference_embeds_new_id() {
    let mut buffer = TextBuffer::from_lines(&DOC);
    let mut index = index();
    let mut ids = BlockIdGenerator::seeded(1);

    let embed = copy_reference(&mut buffer, "doc", &mut index, &mut ids, 2).unwrap();

    let id = embed.trim_start_matches("![[doc#^").trim_end_matches("]]");
    assert!(is_valid_id(id), "bad embed {embed}");
    assert_eq!(buffer.line(2).unwrap(), format!("Para one. ^{id}"));
    assert_eq!(buffer.line(3), Some("Para two."));
}

#[test]
fn test_copy_reference_is_idempotent() {
    let mut buffer = TextBuffer::from_lines(&DOC);
    let mut index = index();
    let mut ids = BlockIdGenerator::seeded(1);

    let first = copy_reference(&mut buffer, "doc", &mut index, &mut ids, 2).unwrap();
    let second = copy_reference(&mut buffer, "doc", &mut index, &mut ids, 2).unwrap();

    assert_eq!(first, second);
    assert_eq!(buffer.line(2).unwrap().matches(" ^").count(), 1);
}

#[test]
fn test_copy_reference_reuses_existing_id() {
    let mut buffer = TextBuffer::from_lines(&["Para one. ^abc123"]);
    let mut index = SectionIndex::new(vec![Section::paragraph(0, 0, 17).with_id("abc123")]).unwrap();
    let mut ids = BlockIdGenerator::seeded(1);

    let embed = copy_reference(&mut buffer, "doc", &mut index, &mut ids, 0).unwrap();

    assert_eq!(embed, "![[doc#^abc123]]");
    assert!(!buffer.is_modified());
}

#[test]
fn test_copy_reference_for_heading_uses_text() {
    let mut buffer = TextBuffer::from_lines(&DOC);
    let mut index = index();
    let mut ids = BlockIdGenerator::seeded(1);

    let embed = copy_reference(&mut buffer, "notes/doc", &mut index, &mut ids, 0).unwrap();

    assert_eq!(embed, "![[notes/doc#Title]]");
    assert!(!buffer.is_modified());
}

#[test]
fn test_copy_reference_outside_sections() {
    let mut buffer = TextBuffer::from_lines(&DOC);
    let mut index = index();
    let mut ids = BlockIdGenerator::seeded(1);

    let result = copy_reference(&mut buffer, "doc", &mut index, &mut ids, 1);
    assert!(matches!(result, Err(Error::NoEnclosingSection { line: 1 })));
}

#[test]
fn test_copy_reference_rejects_other_blocks() {
    let mut buffer = TextBuffer::from_lines(&["- a", "- b"]);
    let mut index = SectionIndex::new(vec![Section::other("list", 0, 1, 3)]).unwrap();
    let mut ids = BlockIdGenerator::seeded(1);

    let result = copy_reference(&mut buffer, "doc", &mut index, &mut ids, 1);
    assert!(matches!(result, Err(Error::NotReferenceable { kind, .. }) if kind == "list"));
}

#[test]
fn test_annotate_assigns_ids_per_paragraph() {
    let mut buffer = TextBuffer::from_lines(&DOC);
    let mut index = index();
    let mut ids = BlockIdGenerator::seeded(9);
    let selection = Selection::new(Position::new(2, 0), Position::new(3, 9));

    let tokens = annotate_selection(&mut buffer, &mut index, &mut ids, selection);

    assert_eq!(tokens.len(), 2);
    let (first, second) = (block_id(&tokens[0]), block_id(&tokens[1]));
    assert_ne!(first, second);
    assert_eq!(buffer.line(2).unwrap(), format!("Para one. ^{first}"));
    assert_eq!(buffer.line(3).unwrap(), format!("Para two. ^{second}"));
    assert_eq!(tokens[0].to_string(), format!("#^{first}"));
}

#[test]
fn test_annotate_follows_document_order_for_reversed_selection() {
    let mut forward_buffer = TextBuffer::from_lines(&DOC);
    let mut forward_index = index();
    let forward = annotate_selection(
        &mut forward_buffer,
        &mut forward_index,
        &mut BlockIdGenerator::seeded(5),
        Selection::new(Position::new(0, 0), Position::new(2, 4)),
    );

    let mut backward_buffer = TextBuffer::from_lines(&DOC);
    let mut backward_index = index();
    let backward = annotate_selection(
        &mut backward_buffer,
        &mut backward_index,
        &mut BlockIdGenerator::seeded(5),
        Selection::new(Position::new(2, 4), Position::new(0, 0)),
    );

    assert_eq!(forward.len(), 2);
    assert_eq!(forward, backward);
    assert_eq!(
        forward[0],
        RefToken::Heading {
            level: 1,
            text: "Title".to_string()
        }
    );
    assert_eq!(forward[0].to_string(), "#Title");
}

#[test]
fn test_annotate_counts_multi_line_section_once() {
    let mut buffer = TextBuffer::from_lines(&["## Sub", "one", "two", "three"]);
    let mut index = SectionIndex::new(vec![
        Section::heading(0, 2, "Sub", 6),
        Section::paragraph(1, 3, 5).with_id("k2m4p6"),
    ])
    .unwrap();
    let mut ids = BlockIdGenerator::seeded(2);
    let selection = Selection::new(Position::new(0, 0), Position::new(3, 5));

    let tokens = annotate_selection(&mut buffer, &mut index, &mut ids, selection);

    let rendered: Vec<String> = tokens.iter().map(ToString::to_string).collect();
    assert_eq!(rendered, vec!["##Sub", "#^k2m4p6"]);
    assert!(!buffer.is_modified());
}

#[test]
fn test_annotate_multiple_selections_deduplicates() {
    let mut buffer = TextBuffer::from_lines(&DOC);
    let mut index = index();
    let mut ids = BlockIdGenerator::seeded(4);
    let selections = [
        Selection::cursor(Position::new(3, 1)),
        Selection::new(Position::new(2, 0), Position::new(3, 2)),
    ];

    let tokens = annotate_selections(&mut buffer, &mut index, &mut ids, &selections);

    assert_eq!(tokens.len(), 2);
    assert_eq!(index.ids().count(), 2);
}

#[test]
fn test_annotate_then_copy_reuses_id() {
    let mut buffer = TextBuffer::from_lines(&DOC);
    let mut index = index();
    let mut ids = BlockIdGenerator::seeded(6);
    let tokens = annotate_selection(&mut buffer, &mut index, &mut ids, Selection::cursor(Position::new(2, 0)));

    let copied = copy_reference(&mut buffer, "doc", &mut index, &mut ids, 2).unwrap();

    assert_eq!(copied, embed("doc", &tokens[0]));
}

#[test]
fn test_copy_reference_heading_with_closing_sequence() {
    let mut buffer = TextBuffer::from_lines(&["## Foo ##", "", "Body."]);
    let mut index = SectionIndex::new(vec![
        Section::heading(0, 2, "Foo", 9),
        Section::paragraph(2, 2, 5),
    ])
    .unwrap();
    let mut ids = BlockIdGenerator::seeded(1);

    let embed = copy_reference(&mut buffer, "d", &mut index, &mut ids, 0).unwrap();

    assert_eq!(embed, "![[d#Foo]]");
    assert!(!buffer.is_modified());
}

#[test]
fn test_annotate_buffer_cursors() {
    let mut buffer = TextBuffer::from_lines(&DOC);
    buffer.set_selections(vec![
        Selection::cursor(Position::new(3, 2)),
        Selection::cursor(Position::new(0, 1)),
        Selection::cursor(Position::new(9, 0)),
    ]);
    let mut index = index();
    let mut ids = BlockIdGenerator::seeded(6);

    let selections = buffer.selections();
    let tokens = annotate_selections(&mut buffer, &mut index, &mut ids, &selections);

    assert_eq!(selections[2], Selection::cursor(Position::new(3, 9)));
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].to_string(), "#Title");
    let id = block_id(&tokens[1]);
    assert_eq!(buffer.line(2), Some("Para one."));
    assert_eq!(buffer.line(3).unwrap(), format!("Para two. ^{id}"));
}
