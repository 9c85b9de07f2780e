#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The page structure is parsed and available; the guard attaches here.
    PageReady,
    /// User edited the text box.
    TextChanged(String),
    /// User edited the optional guidance box.
    GuidanceChanged(String),
    /// User picked a template file (empty when the selection is cleared).
    TemplateChanged(String),
    /// User-initiated submission of the form.
    SubmitRequested,
    /// Message that leaves the state untouched.
    NoOp,
}
