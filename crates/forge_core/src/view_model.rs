use crate::SubmissionPhase;

/// Label shown on the submit control while the form is being submitted.
pub const SUBMITTING_LABEL: &str = "Generating...";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub phase: SubmissionPhase,
    pub submit_enabled: bool,
    /// `None` keeps whatever label the page was laid out with.
    pub submit_label: Option<&'static str>,
    pub loading_visible: bool,
}
