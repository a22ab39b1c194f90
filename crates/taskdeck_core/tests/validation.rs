use taskdeck_core::{validate_draft, validate_patch, TaskDraft, TaskPatch, Violation};

#[test]
fn valid_draft_yields_no_violations() {
    let draft = TaskDraft {
        title: "water the plants".to_string(),
        description: Some("balcony first".to_string()),
        status: Some("in-progress".to_string()),
        priority: Some("low".to_string()),
    };
    assert!(validate_draft(&draft).is_empty());
}

#[test]
fn empty_title_is_required_on_create() {
    let violations = validate_draft(&TaskDraft::titled(""));
    assert_eq!(violations, vec![Violation::TitleRequired]);
    assert_eq!(violations[0].to_string(), "title is required");
}

#[test]
fn overlong_title_and_description_are_rejected() {
    let draft = TaskDraft {
        title: "x".repeat(201),
        description: Some("y".repeat(1001)),
        ..TaskDraft::default()
    };
    let violations = validate_draft(&draft);
    assert_eq!(
        violations,
        vec![Violation::TitleTooLong, Violation::DescriptionTooLong]
    );

    // Boundary values are fine.
    let draft = TaskDraft {
        title: "x".repeat(200),
        description: Some("y".repeat(1000)),
        ..TaskDraft::default()
    };
    assert!(validate_draft(&draft).is_empty());
}

#[test]
fn length_limits_count_characters_not_bytes() {
    // 200 multi-byte characters fit even though the byte length exceeds 200.
    let draft = TaskDraft::titled("ö".repeat(200));
    assert!(validate_draft(&draft).is_empty());
}

#[test]
fn invalid_status_violation_names_the_allowed_values() {
    let draft = TaskDraft {
        title: "x".to_string(),
        status: Some("done".to_string()),
        ..TaskDraft::default()
    };
    let violations = validate_draft(&draft);
    assert_eq!(violations, vec![Violation::InvalidStatus("done".to_string())]);

    let message = violations[0].to_string();
    assert!(message.contains("pending"), "unexpected message: {message}");
    assert!(message.contains("in-progress"), "unexpected message: {message}");
    assert!(message.contains("completed"), "unexpected message: {message}");
}

#[test]
fn invalid_priority_violation_names_the_allowed_values() {
    let draft = TaskDraft {
        title: "x".to_string(),
        priority: Some("urgent".to_string()),
        ..TaskDraft::default()
    };
    let violations = validate_draft(&draft);
    assert_eq!(
        violations,
        vec![Violation::InvalidPriority("urgent".to_string())]
    );

    let message = violations[0].to_string();
    assert!(message.contains("low"), "unexpected message: {message}");
    assert!(message.contains("medium"), "unexpected message: {message}");
    assert!(message.contains("high"), "unexpected message: {message}");
}

#[test]
fn all_violations_are_collected_in_field_order() {
    let draft = TaskDraft {
        title: String::new(),
        description: Some("d".repeat(1001)),
        status: Some("later".to_string()),
        priority: Some("asap".to_string()),
    };
    let violations = validate_draft(&draft);
    assert_eq!(
        violations,
        vec![
            Violation::TitleRequired,
            Violation::DescriptionTooLong,
            Violation::InvalidStatus("later".to_string()),
            Violation::InvalidPriority("asap".to_string()),
        ]
    );
}

#[test]
fn patch_allows_missing_title_but_rejects_empty_one() {
    let patch = TaskPatch {
        status: Some("completed".to_string()),
        ..TaskPatch::default()
    };
    assert!(validate_patch(&patch).is_empty());

    let patch = TaskPatch {
        title: Some(String::new()),
        ..TaskPatch::default()
    };
    assert_eq!(validate_patch(&patch), vec![Violation::TitleRequired]);
}

#[test]
fn patch_checks_every_present_field() {
    let patch = TaskPatch {
        title: Some("t".repeat(201)),
        description: Some(Some("d".repeat(1001))),
        status: Some("paused".to_string()),
        priority: Some("critical".to_string()),
    };
    let violations = validate_patch(&patch);
    assert_eq!(violations.len(), 4);
    assert_eq!(violations[0], Violation::TitleTooLong);
}

#[test]
fn patch_distinguishes_absent_description_from_explicit_null() {
    let absent: TaskPatch = serde_json::from_str(r#"{"title": "keep"}"#).unwrap();
    assert_eq!(absent.description, None);

    let cleared: TaskPatch = serde_json::from_str(r#"{"description": null}"#).unwrap();
    assert_eq!(cleared.description, Some(None));

    let replaced: TaskPatch = serde_json::from_str(r#"{"description": "new text"}"#).unwrap();
    assert_eq!(replaced.description, Some(Some("new text".to_string())));
}

#[test]
fn explicit_null_description_is_valid() {
    let patch = TaskPatch {
        description: Some(None),
        ..TaskPatch::default()
    };
    assert!(validate_patch(&patch).is_empty());
}
