use crate::platform::host::ControlId;

pub const FORM_SLIDES: ControlId = ControlId::new(1000);
pub const INPUT_TEXT: ControlId = ControlId::new(1001);
pub const INPUT_GUIDANCE: ControlId = ControlId::new(1002);
pub const INPUT_TEMPLATE: ControlId = ControlId::new(1003);
pub const BUTTON_GENERATE: ControlId = ControlId::new(1004);
pub const PANEL_LOADING: ControlId = ControlId::new(2001);
pub const LABEL_LOADING: ControlId = ControlId::new(3001);

/// Marker class that keeps an element out of view.
pub const HIDDEN_CLASS: &str = "hidden";

pub const FIELD_TEXT: &str = "text";
pub const FIELD_GUIDANCE: &str = "guidance";
pub const FIELD_TEMPLATE: &str = "template";
