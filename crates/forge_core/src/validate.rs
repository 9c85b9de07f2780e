use thiserror::Error;

/// Fixed text of the blocking notification shown when a submission is rejected.
pub const VALIDATION_ALERT: &str = "Please provide text and upload a template file.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    #[error("text is empty after trimming")]
    MissingText,
    #[error("no template file selected")]
    MissingTemplate,
    #[error("text is empty after trimming and no template file selected")]
    MissingTextAndTemplate,
}

impl ValidationFailure {
    /// Message surfaced to the user. Identical for every failure.
    pub fn alert_message(&self) -> &'static str {
        VALIDATION_ALERT
    }
}

/// Checks the two required fields of a submission.
///
/// The text must contain at least one non-whitespace character. The template
/// only has to be non-empty; it is a stand-in for "a file has been chosen" and
/// is not trimmed.
pub fn validate(text: &str, template: &str) -> Result<(), ValidationFailure> {
    match (is_blank(text), template.is_empty()) {
        (false, false) => Ok(()),
        (true, false) => Err(ValidationFailure::MissingText),
        (false, true) => Err(ValidationFailure::MissingTemplate),
        (true, true) => Err(ValidationFailure::MissingTextAndTemplate),
    }
}

/// True when nothing is left after stripping leading and trailing whitespace.
pub fn is_blank(value: &str) -> bool {
    value.trim_matches(is_trimmable).is_empty()
}

/// Characters browser string trimming removes: the ECMAScript WhiteSpace and
/// LineTerminator sets. Unlike `char::is_whitespace` this includes U+FEFF and
/// excludes U+0085.
fn is_trimmable(c: char) -> bool {
    matches!(
        c,
        '\t' | '\u{000B}'
            | '\u{000C}'
            | ' '
            | '\u{00A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
            | '\n'
            | '\r'
            | '\u{2028}'
            | '\u{2029}'
    )
}
