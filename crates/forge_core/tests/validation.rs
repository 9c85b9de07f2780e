use forge_core::{is_blank, validate, ValidationFailure, VALIDATION_ALERT};

#[test]
fn blank_text_is_rejected_whatever_the_template() {
    for text in ["", " ", "   ", "\t\n", "\r\n  \u{00A0}", "\u{2003}\u{3000}", "\u{FEFF}"] {
        assert_eq!(
            validate(text, "deck.pptx"),
            Err(ValidationFailure::MissingText),
            "text {text:?}"
        );
        assert_eq!(
            validate(text, ""),
            Err(ValidationFailure::MissingTextAndTemplate),
            "text {text:?}"
        );
    }
}

#[test]
fn empty_template_is_rejected_whatever_the_text() {
    for text in ["Hello world", "x", "  padded  "] {
        assert_eq!(validate(text, ""), Err(ValidationFailure::MissingTemplate));
    }
}

#[test]
fn any_visible_text_with_a_template_passes() {
    assert_eq!(validate("Hello world", "deck.pptx"), Ok(()));
    assert_eq!(validate("  x  ", "C:\\fakepath\\deck.pptx"), Ok(()));
    assert_eq!(validate("\u{FEFF}a", "t"), Ok(()));
}

#[test]
fn template_is_not_trimmed() {
    // Only emptiness matters for the template value.
    assert_eq!(validate("Hello", " "), Ok(()));
}

#[test]
fn blank_check_only_strips_the_edges() {
    assert!(is_blank(""));
    assert!(is_blank(" \t "));
    assert!(!is_blank(" a b "));
    assert!(!is_blank("\u{200B}"));
    assert!(is_blank("\u{2028}\u{2029}\u{000B}\u{000C}"));
}

#[test]
fn next_line_control_is_not_trimmed() {
    // U+0085 is Unicode whitespace but browsers keep it when trimming.
    assert!(!is_blank("\u{0085}"));
    assert_eq!(validate("\u{0085}", "deck.pptx"), Ok(()));
    assert_eq!(
        validate(" \u{0085} ", ""),
        Err(ValidationFailure::MissingTemplate)
    );
}

#[test]
fn every_failure_uses_the_fixed_alert() {
    for failure in [
        ValidationFailure::MissingText,
        ValidationFailure::MissingTemplate,
        ValidationFailure::MissingTextAndTemplate,
    ] {
        assert_eq!(failure.alert_message(), VALIDATION_ALERT);
    }
    assert_eq!(
        VALIDATION_ALERT,
        "Please provide text and upload a template file."
    );
    assert_eq!(
        ValidationFailure::MissingTemplate.to_string(),
        "no template file selected"
    );
}
