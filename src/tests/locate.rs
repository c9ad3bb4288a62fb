use super::{find_enclosing, find_nearest, Direction};
use crate::section::Section;
use proptest::prelude::*;

fn sections() -> Vec<Section> {
    vec![
        Section::heading(0, 1, "Title", 7),
        Section::paragraph(2, 3, 9),
        Section::paragraph(5, 5, 4),
    ]
}

#[test]
fn test_enclosing_finds_multi_line_section() {
    let sections = sections();
    let (index, section) = find_enclosing(&sections, 3).unwrap();
    assert_eq!(index, 1);
    assert_eq!(section.start_line, 2);
}

#[test]
fn test_enclosing_misses_blank_lines() {
    let sections = sections();
    assert!(find_enclosing(&sections, 1).is_none());
    assert!(find_enclosing(&sections, 4).is_none());
    assert!(find_enclosing(&sections, 9).is_none());
}

#[test]
fn test_nearest_up_takes_last_section_before() {
    let sections = sections();
    let (index, _) = find_nearest(&sections, 4, Direction::Up).unwrap();
    assert_eq!(index, 1);
    let (index, _) = find_nearest(&sections, 8, Direction::Up).unwrap();
    assert_eq!(index, 2);
}

#[test]
fn test_nearest_down_takes_first_section_after() {
    let sections = sections();
    let (index, _) = find_nearest(&sections, 4, Direction::Down).unwrap();
    assert_eq!(index, 2);
    assert!(find_nearest(&sections, 8, Direction::Down).is_none());
}

#[test]
fn test_nearest_on_empty_document() {
    assert!(find_nearest(&[], 0, Direction::Up).is_none());
    assert!(find_nearest(&[], 0, Direction::Down).is_none());
}

fn arb_sections() -> impl Strategy<Value = Vec<Section>> {
    prop::collection::vec((0usize..3, 0usize..4), 0..12).prop_map(|spans| {
        let mut line = 0;
        let mut sections = Vec::new();
        for (gap, height) in spans {
            let start = line + gap;
            let end = start + height;
            sections.push(Section::paragraph(start, end, 1));
            line = end + 1;
        }
        sections
    })
}

proptest! {
    #[test]
    fn prop_enclosing_contains_line(sections in arb_sections(), line in 0usize..60) {
        match find_enclosing(&sections, line) {
            Some((_, section)) => {
                prop_assert!(section.start_line <= line && line <= section.end_line);
            }
            None => {
                prop_assert!(sections.iter().all(|s| !s.contains(line)));
            }
        }
    }
}
