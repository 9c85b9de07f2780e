use forge_core::AppViewModel;

use crate::platform::host::PlatformCommand;

use super::constants::*;

/// Commands bringing the page in line with `view`.
///
/// Only the in-progress state is rendered; the idle look is whatever the
/// layout built.
pub fn render(view: &AppViewModel) -> Vec<PlatformCommand> {
    let mut cmds = vec![PlatformCommand::SetControlEnabled {
        control_id: BUTTON_GENERATE,
        enabled: view.submit_enabled,
    }];

    if let Some(label) = view.submit_label {
        cmds.push(PlatformCommand::SetControlText {
            control_id: BUTTON_GENERATE,
            text: label.to_string(),
        });
    }

    let class = HIDDEN_CLASS.to_string();
    cmds.push(if view.loading_visible {
        PlatformCommand::RemoveClass {
            control_id: PANEL_LOADING,
            class,
        }
    } else {
        PlatformCommand::AddClass {
            control_id: PANEL_LOADING,
            class,
        }
    });

    cmds
}
