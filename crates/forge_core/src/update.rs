use crate::{validate, AppState, Effect, Msg, SubmissionPhase};

/// Pure update function: applies a message to state and returns any effects.
///
/// Effects are returned in the order the host must perform them; a
/// `PreventDefault` has to be honoured before the host's default submission
/// for the same event.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::PageReady => {
            // Registration is one-shot; later ready signals are ignored.
            state.attach_guard();
            Vec::new()
        }
        Msg::TextChanged(text) => {
            state.set_text(text);
            Vec::new()
        }
        Msg::GuidanceChanged(guidance) => {
            state.set_guidance(guidance);
            Vec::new()
        }
        Msg::TemplateChanged(template) => {
            state.set_template(template);
            Vec::new()
        }
        Msg::SubmitRequested => {
            if !state.guard_attached() {
                // Nothing is listening yet: the host submits unguarded.
                return (state, Vec::new());
            }
            match state.phase() {
                SubmissionPhase::Submitting => vec![Effect::PreventDefault],
                SubmissionPhase::Idle => match validate(state.text(), state.template()) {
                    Ok(()) => {
                        state.begin_submitting();
                        Vec::new()
                    }
                    Err(failure) => {
                        state.record_failure(failure);
                        vec![
                            Effect::Alert {
                                message: failure.alert_message().to_string(),
                            },
                            Effect::PreventDefault,
                        ]
                    }
                },
            }
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
