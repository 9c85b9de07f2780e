#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Show a blocking, modal notification to the user.
    Alert { message: String },
    /// Cancel the host's default form submission for the current event.
    PreventDefault,
}
