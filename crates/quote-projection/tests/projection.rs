/*
 * projection.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * End-to-end projection over a small aligned book.
 */

use pretty_assertions::assert_eq;
use quote_projection::{ProjectionMiss, project_quote};
use usfm_align::{Book, VerseRef, parse_document};

const SOURCE: &str = r#"\id GEN
\c 1
\p
\v 1 \w In\w* \w the\w* \w beginning\w* \w God\w* \w created\w* \w the\w* \w heaven\w* \w and\w* \w the\w* \w earth\w*.
\v 2 And the earth was without form, and void;
"#;

const TARGET: &str = r#"\id GEN ES_GLT
\h Génesis
\c 1
\p
\v 1 \zaln-s |x-occurrence="1" x-occurrences="1" x-content="In"\*\w En|x-occurrence="1" x-occurrences="1"\w*\zaln-e\*
\zaln-s |x-occurrence="1" x-occurrences="3" x-content="the"\*\zaln-s |x-occurrence="1" x-occurrences="1" x-content="beginning"\*\w el|x-occurrence="1" x-occurrences="1"\w*
\w principio|x-occurrence="1" x-occurrences="1"\w*\zaln-e\*\zaln-e\*
\zaln-s |x-occurrence="1" x-occurrences="1" x-content="created"\*\w creó|x-occurrence="1" x-occurrences="1"\w*\zaln-e\*
\zaln-s |x-occurrence="1" x-occurrences="1" x-content="God"\*\w Dios|x-occurrence="1" x-occurrences="1"\w*\zaln-e\*
\zaln-s |x-occurrence="2" x-occurrences="3" x-content="the"\*\w los|x-occurrence="1" x-occurrences="1"\w*\zaln-e\*
\zaln-s |x-occurrence="1" x-occurrences="1" x-content="heaven"\*\w cielos|x-occurrence="1" x-occurrences="1"\w*\zaln-e\*
\zaln-s |x-occurrence="1" x-occurrences="1" x-content="and"\*\w y|x-occurrence="1" x-occurrences="1"\w*\zaln-e\*
\zaln-s |x-occurrence="3" x-occurrences="3" x-content="the"\*\w la|x-occurrence="1" x-occurrences="1"\w*\zaln-e\*
\zaln-s |x-occurrence="1" x-occurrences="1" x-content="earth"\*\w tierra|x-occurrence="1" x-occurrences="1"\w*\zaln-e\*.
\v 2 Y \zaln-s |x-occurrence="1" x-occurrences="1" x-content="the"\*\w la\w*\zaln-e\* \zaln-s |x-occurrence="1" x-occurrences="1" x-content="earth"\*\w tierra\w*\zaln-e\*
\zaln-s |x-occurrence="1" x-occurrences="1" x-content="was"\*\w estaba\w*\zaln-e\*
\zaln-s |x-occurrence="1" x-occurrences="1" x-content="without"\*\zaln-s |x-occurrence="1" x-occurrences="1" x-content="form"\*\w desordenada\w*\zaln-e\*\zaln-e\*
\zaln-s |x-occurrence="1" x-occurrences="1" x-content="and"\*\w y\w*\zaln-e\*
\zaln-s |x-occurrence="1" x-occurrences="1" x-content="void"\*\w vacía\w*\zaln-e\*.
"#;

fn books() -> (Book, Book) {
    (parse_document(SOURCE).unwrap(), parse_document(TARGET).unwrap())
}

fn project(quote: &str, verse: u32, occurrence: usize) -> Result<String, ProjectionMiss> {
    let (source, target) = books();
    project_quote(quote, VerseRef::new(1, verse), occurrence, &source, &target).map(|p| p.text)
}

#[test]
fn test_the_heaven() {
    assert_eq!(project("the heaven", 1, 1).unwrap(), "los cielos");
}

#[test]
fn test_target_word_order_wins() {
    assert_eq!(project("God created", 1, 1).unwrap(), "creó Dios");
}

#[test]
fn test_occurrence_selects_match() {
    assert_eq!(project("the", 1, 1).unwrap(), "el principio");
    assert_eq!(project("the", 1, 2).unwrap(), "los");
    assert_eq!(project("the", 1, 3).unwrap(), "la");
}

#[test]
fn test_occurrence_past_count_is_not_found() {
    assert_eq!(
        project("the", 1, 4),
        Err(ProjectionMiss::QuoteNotFound {
            part: 1,
            words: "the".to_string(),
            occurrence: 4,
        })
    );
}

#[test]
fn test_elliptical_quote_keeps_break() {
    assert_eq!(project("In … God", 1, 1).unwrap(), "En … Dios");
    assert_eq!(
        project("In the beginning ... the heaven", 1, 1).unwrap(),
        "En el principio … los cielos"
    );
}

#[test]
fn test_elliptical_later_part_follows_first() {
    assert_eq!(project("the … the", 1, 1).unwrap(), "el principio … los");
    assert_eq!(project("the … the", 1, 2).unwrap(), "los … la");
}

#[test]
fn test_unaligned_word_is_a_miss() {
    assert_eq!(project("And", 2, 1), Err(ProjectionMiss::Unaligned { part: 1 }));
}

#[test]
fn test_partially_aligned_quote_keeps_aligned_words() {
    assert_eq!(project("And the earth", 2, 1).unwrap(), "la tierra");
}

#[test]
fn test_empty_target_group_is_a_miss() {
    let source = parse_document("\\c 3\n\\v 3 \\w God\\w* \\w said\\w*").unwrap();
    // "said" is aligned to an empty bracket; "dijo" is left outside it.
    let target = parse_document(concat!(
        "\\c 3\n\\v 3 ",
        "\\zaln-s |x-occurrence=\"1\" x-content=\"God\"\\*\\w Dios\\w*\\zaln-e\\* ",
        "\\zaln-s |x-occurrence=\"1\" x-content=\"said\"\\*\\zaln-e\\* \\w dijo\\w*",
    ))
    .unwrap();
    let reference = VerseRef::new(3, 3);
    let project = |quote: &str| {
        project_quote(quote, reference, 1, &source, &target).map(|projected| projected.text)
    };

    assert_eq!(project("God … said"), Err(ProjectionMiss::Unaligned { part: 2 }));
    assert_eq!(project("said"), Err(ProjectionMiss::Unaligned { part: 1 }));
    assert_eq!(project("God said").unwrap(), "Dios");
}

#[test]
fn test_nested_group() {
    assert_eq!(project("without form", 2, 1).unwrap(), "desordenada");
    assert_eq!(project("form, and void", 2, 1).unwrap(), "desordenada y vacía");
}

#[test]
fn test_case_insensitive_quote() {
    assert_eq!(project("THE HEAVEN", 1, 1).unwrap(), "los cielos");
}

#[test]
fn test_unknown_verse() {
    assert_eq!(
        project("the", 9, 1),
        Err(ProjectionMiss::SourceVerseNotFound {
            reference: VerseRef::new(1, 9)
        })
    );
}

#[test]
fn test_reparse_is_idempotent() {
    let (first_source, first_target) = books();
    let (second_source, second_target) = books();
    assert_eq!(first_source, second_source);
    assert_eq!(first_target, second_target);
    assert_eq!(
        project_quote("the heaven", VerseRef::new(1, 1), 1, &first_source, &first_target),
        project_quote("the heaven", VerseRef::new(1, 1), 1, &second_source, &second_target),
    );
}

#[test]
fn test_book_ids() {
    let (source, target) = books();
    assert_eq!(source.id.as_deref(), Some("GEN"));
    assert_eq!(target.id.as_deref(), Some("GEN"));
}
