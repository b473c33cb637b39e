use lottery_core::{parse_names, DrawError, DUPLICATE_PREVIEW_LIMIT};
use pretty_assertions::assert_eq;

#[test]
fn trims_lines_and_skips_blanks() {
    let parsed = parse_names("  Ann \n\n\tBob\r\n   \nCem\n").unwrap();
    assert_eq!(parsed.names, vec!["Ann", "Bob", "Cem"]);
    assert_eq!(parsed.duplicates, None);
}

#[test]
fn keeps_first_occurrence_and_reports_duplicates() {
    let parsed = parse_names("Bob\nAnn\nBob\nCem\nAnn\nBob\n").unwrap();
    assert_eq!(parsed.names, vec!["Bob", "Ann", "Cem"]);

    let duplicates = parsed.duplicates.expect("duplicates reported");
    assert_eq!(duplicates.preview, vec!["Bob", "Ann"]);
    assert_eq!(duplicates.total, 2);
}

#[test]
fn duplicate_matching_is_case_sensitive() {
    let parsed = parse_names("ann\nAnn\n").unwrap();
    assert_eq!(parsed.names, vec!["ann", "Ann"]);
    assert!(parsed.duplicates.is_none());
}

#[test]
fn duplicate_preview_is_capped() {
    let mut text = String::new();
    for i in 0..8 {
        text.push_str(&format!("name{i}\nname{i}\n"));
    }
    let duplicates = parse_names(&text).unwrap().duplicates.unwrap();
    assert_eq!(duplicates.total, 8);
    assert_eq!(duplicates.preview.len(), DUPLICATE_PREVIEW_LIMIT);
    assert!(duplicates.summary().ends_with("and 3 more"));
}

#[test]
fn whitespace_only_input_is_rejected() {
    assert_eq!(parse_names(" \n\t\n"), Err(DrawError::EmptyInput));
    assert_eq!(parse_names(""), Err(DrawError::EmptyInput));
}
