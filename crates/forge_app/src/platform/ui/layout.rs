use crate::platform::config::FormConfig;
use crate::platform::host::{InputKind, PlatformCommand};

use super::constants::*;

/// Commands that build the page, ending with the page-ready signal.
#[allow(clippy::vec_init_then_push)]
pub fn initial_commands(config: &FormConfig) -> Vec<PlatformCommand> {
    let mut commands = Vec::new();

    commands.push(PlatformCommand::CreateForm {
        control_id: FORM_SLIDES,
        action: config.action.clone(),
        method: config.method,
    });

    commands.push(PlatformCommand::CreateInput {
        parent_control_id: Some(FORM_SLIDES),
        control_id: INPUT_TEXT,
        name: FIELD_TEXT,
        kind: InputKind::MultilineText,
        initial_text: String::new(),
    });

    commands.push(PlatformCommand::CreateInput {
        parent_control_id: Some(FORM_SLIDES),
        control_id: INPUT_GUIDANCE,
        name: FIELD_GUIDANCE,
        kind: InputKind::Text,
        initial_text: String::new(),
    });

    commands.push(PlatformCommand::CreateInput {
        parent_control_id: Some(FORM_SLIDES),
        control_id: INPUT_TEMPLATE,
        name: FIELD_TEMPLATE,
        kind: InputKind::File,
        initial_text: String::new(),
    });

    commands.push(PlatformCommand::CreateButton {
        parent_control_id: Some(FORM_SLIDES),
        control_id: BUTTON_GENERATE,
        text: config.submit_label.clone(),
    });

    // Loading indicator sits outside the form and starts hidden.
    commands.push(PlatformCommand::CreatePanel {
        parent_control_id: None,
        control_id: PANEL_LOADING,
        classes: vec![HIDDEN_CLASS.to_string()],
    });

    commands.push(PlatformCommand::CreateLabel {
        parent_control_id: Some(PANEL_LOADING),
        control_id: LABEL_LOADING,
        initial_text: "Generating your presentation, please wait...".to_string(),
    });

    commands.push(PlatformCommand::SignalPageReady);

    commands
}
