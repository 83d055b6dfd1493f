//! JSON Lines catalogs on disk.

use crate::common::*;
use affinity::{find_item, CancellationToken, Error, JsonLinesSource, RelatednessEngine, SourceError};

fn catalog() -> Vec<affinity::ItemView> {
    vec![
        make_item("1", "acme/widgets")
            .with_topics(&["rust", "cli"])
            .with_contributors(&["ann", "bob"]),
        make_item("2", "acme/gadgets").with_topics(&["rust"]),
        make_item("3", "globex/widgets")
            .with_topics(&["rust", "cli"])
            .with_contributors(&["ann", "bob"]),
        make_item("4", "initech/tps").with_topics(&["cobol"]),
    ]
}

#[test]
fn test_find_item_is_case_insensitive() {
    let file = write_catalog(&catalog());
    let found = find_item(file.path(), "ACME/Widgets").unwrap().unwrap();
    assert_eq!(found.id.as_str(), "1");
    assert!(find_item(file.path(), "acme/missing").unwrap().is_none());
}

#[test]
fn test_related_from_file_matches_in_memory() {
    let items = catalog();
    let file = write_catalog(&items);
    let target = find_item(file.path(), "acme/widgets").unwrap().unwrap();

    let engine = RelatednessEngine::default();
    let mut source = JsonLinesSource::open(file.path(), Some(target.id.clone())).unwrap();
    let from_file = engine
        .find_related(&target, &mut source, &CancellationToken::new())
        .unwrap();

    let in_memory = related(&target, items);
    assert_eq!(from_file, in_memory);
    assert_eq!(result_ids(&from_file), vec!["2", "3"]);
}

#[test]
fn test_record_roundtrip_preserves_contributor_order() {
    let item = make_item_with_contributors("1", "acme/a", &["zed", "amy", "kim"]);
    let file = write_catalog(std::slice::from_ref(&item));
    let loaded = find_item(file.path(), "acme/a").unwrap().unwrap();
    assert_eq!(loaded.top_contributors, item.top_contributors);
}

#[test]
fn test_malformed_line_fails_the_search() {
    let mut contents = to_json_lines(&catalog());
    contents.push_str("\n{\"id\": \"5\", \"fullName\": ");
    let file = write_temp(&contents);

    let engine = RelatednessEngine::default();
    let target = make_item("t", "acme/t");
    let mut source = JsonLinesSource::open(file.path(), None).unwrap();
    let err = engine
        .find_related(&target, &mut source, &CancellationToken::new())
        .unwrap_err();
    match err {
        Error::Source {
            source: SourceError::Parse { line, .. },
            ..
        } => assert_eq!(line, 5),
        other => panic!("expected parse failure, got {other}"),
    }
}

#[test]
fn test_missing_file_is_io_error() {
    let err = JsonLinesSource::open("/definitely/not/here.jsonl", None).unwrap_err();
    assert!(matches!(err, SourceError::Io(_)));
}
