use crate::view_model::{AppViewModel, SUBMITTING_LABEL};
use crate::ValidationFailure;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Submitting,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    guard_attached: bool,
    phase: SubmissionPhase,
    text: String,
    guidance: String,
    template: String,
    last_failure: Option<ValidationFailure>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let submitting = self.phase == SubmissionPhase::Submitting;
        AppViewModel {
            phase: self.phase,
            submit_enabled: !submitting,
            submit_label: submitting.then_some(SUBMITTING_LABEL),
            loading_visible: submitting,
        }
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    pub fn guard_attached(&self) -> bool {
        self.guard_attached
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn guidance(&self) -> &str {
        &self.guidance
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Reason the most recent intercepted submission was rejected, if it was.
    pub fn last_failure(&self) -> Option<ValidationFailure> {
        self.last_failure
    }

    /// Returns whether the view changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Returns false if the guard was already attached.
    pub(crate) fn attach_guard(&mut self) -> bool {
        !std::mem::replace(&mut self.guard_attached, true)
    }

    pub(crate) fn set_text(&mut self, text: String) {
        self.text = text;
    }

    pub(crate) fn set_guidance(&mut self, guidance: String) {
        self.guidance = guidance;
    }

    pub(crate) fn set_template(&mut self, template: String) {
        self.template = template;
    }

    pub(crate) fn record_failure(&mut self, failure: ValidationFailure) {
        self.last_failure = Some(failure);
    }

    pub(crate) fn begin_submitting(&mut self) {
        self.phase = SubmissionPhase::Submitting;
        self.last_failure = None;
        self.dirty = true;
    }
}
