//! Forge core: the submission guard as a pure state machine plus view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod validate;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{AppState, SubmissionPhase};
pub use update::update;
pub use validate::{is_blank, validate, ValidationFailure, VALIDATION_ALERT};
pub use view_model::{AppViewModel, SUBMITTING_LABEL};
