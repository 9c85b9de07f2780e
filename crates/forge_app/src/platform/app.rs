use std::collections::VecDeque;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::mpsc;

use forge_core::{update, AppState, AppViewModel, Effect, Msg, SubmissionPhase};
use forge_logging::{forge_debug, forge_info};
use log::LevelFilter;

use super::config::{self, FormConfig};
use super::effects::{EffectRunner, FormSubmitter, JsonLineSubmitter};
use super::host::{
    AppEvent, EventDisposition, HeadlessPlatform, HostError, PageOutcome, PlatformCommand,
    PlatformEventHandler, UserAction,
};
use super::logging::{self, LogDestination};
use super::ui;
use super::ui::constants::*;

/// Exit status when the guard blocked every submission attempt.
const EXIT_BLOCKED: u8 = 2;
/// Exit status when no submission was attempted.
const EXIT_UNTOUCHED: u8 = 1;

/// What the user enters on the page before pressing the submit button.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionInput {
    pub text: String,
    pub guidance: Option<String>,
    pub template: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct AppOptions {
    pub config_path: Option<PathBuf>,
    pub write_config: bool,
    pub log: LogDestination,
    pub verbose: bool,
    pub input: SessionInput,
}

pub fn run_app(options: AppOptions) -> anyhow::Result<ExitCode> {
    let level = if options.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    logging::initialize(options.log, level);

    let config_path = options
        .config_path
        .unwrap_or_else(config::default_config_path);
    let config = config::load(&config_path);

    if options.write_config {
        let path = config::save(&config_path, &config)?;
        forge_info!("Wrote config to {:?}", path);
        return Ok(ExitCode::SUCCESS);
    }

    let action = config.resolve_action()?;
    forge_info!("Form submits {} {}", config.method.as_str(), action);

    let mut platform = HeadlessPlatform::new(io::stderr());
    let mut submitter = JsonLineSubmitter::new(config.base()?, io::stdout());
    let outcome = run_session(&mut platform, &config, options.input, &mut submitter)?;

    let page = platform.page();
    let button_enabled = page.is_enabled(BUTTON_GENERATE)?;
    let loading_hidden = page.has_class(PANEL_LOADING, HIDDEN_CLASS)?;
    forge_info!(
        "Page finished {:?}: button_enabled={} loading_hidden={} alerts={}",
        outcome,
        button_enabled,
        loading_hidden,
        page.alerts().len()
    );

    Ok(ExitCode::from(exit_status(outcome)))
}

/// Process exit status for how the page session ended.
fn exit_status(outcome: PageOutcome) -> u8 {
    match outcome {
        PageOutcome::Submitted => 0,
        PageOutcome::Blocked => EXIT_BLOCKED,
        PageOutcome::Untouched => EXIT_UNTOUCHED,
    }
}

/// Loads the page into `platform` and plays `input` against it.
pub fn run_session<W: Write>(
    platform: &mut HeadlessPlatform<W>,
    config: &FormConfig,
    input: SessionInput,
    submitter: &mut dyn FormSubmitter,
) -> Result<PageOutcome, HostError> {
    let mut handler = AppEventHandler::new();
    platform.main_event_loop(
        &mut handler,
        ui::layout::initial_commands(config),
        user_actions(input),
        submitter,
    )
}

fn user_actions(input: SessionInput) -> Vec<UserAction> {
    let mut actions = vec![UserAction::Type {
        control_id: INPUT_TEXT,
        text: input.text,
    }];
    if let Some(guidance) = input.guidance {
        actions.push(UserAction::Type {
            control_id: INPUT_GUIDANCE,
            text: guidance,
        });
    }
    if let Some(path) = input.template {
        actions.push(UserAction::ChooseFile {
            control_id: INPUT_TEMPLATE,
            path,
        });
    }
    actions.push(UserAction::Click {
        control_id: BUTTON_GENERATE,
    });
    actions
}

pub struct AppEventHandler {
    state: AppState,
    effects: EffectRunner,
    commands: VecDeque<PlatformCommand>,
    msg_rx: mpsc::Receiver<Msg>,
    msg_tx: mpsc::Sender<Msg>,
}

impl AppEventHandler {
    pub fn new() -> Self {
        let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
        Self {
            state: AppState::new(),
            effects: EffectRunner,
            commands: VecDeque::new(),
            msg_rx,
            msg_tx,
        }
    }

    fn process_pending_messages(&mut self) {
        let mut inbox = Vec::new();
        while let Ok(msg) = self.msg_rx.try_recv() {
            inbox.push(msg);
        }
        for msg in inbox {
            self.dispatch_msg(msg);
        }
    }

    fn dispatch_msg(&mut self, msg: Msg) -> EventDisposition {
        let seq = forge_logging::next_dispatch_seq();
        let state = std::mem::take(&mut self.state);
        let was_attached = state.guard_attached();
        let kind = MsgKind::of(&msg);

        let (mut state, effects) = update(state, msg);
        match kind {
            MsgKind::PageReady if was_attached => {
                forge_debug!("#{} Guard already attached; ignoring ready signal", seq);
            }
            MsgKind::PageReady => forge_info!("#{} Submission guard attached", seq),
            MsgKind::Submit => log_submission(seq, &state, &effects),
            MsgKind::Edit => {}
        }

        let disposition = self.effects.run(effects, &mut self.commands);
        if state.consume_dirty() {
            self.enqueue_render(&state.view());
        }
        self.state = state;
        disposition
    }

    fn enqueue_render(&mut self, view: &AppViewModel) {
        self.commands.extend(ui::render::render(view));
    }

    fn send(&self, msg: Msg) {
        // The receiver lives in `self`, so this cannot fail.
        let _ = self.msg_tx.send(msg);
    }
}

impl Default for AppEventHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformEventHandler for AppEventHandler {
    fn handle_event(&mut self, event: AppEvent) -> EventDisposition {
        match event {
            AppEvent::PageReady => self.send(Msg::PageReady),
            AppEvent::InputTextChanged { control_id, text } if control_id == INPUT_TEXT => {
                self.send(Msg::TextChanged(text));
            }
            AppEvent::InputTextChanged { control_id, text } if control_id == INPUT_GUIDANCE => {
                self.send(Msg::GuidanceChanged(text));
            }
            AppEvent::InputTextChanged { control_id, text } if control_id == INPUT_TEMPLATE => {
                self.send(Msg::TemplateChanged(text));
            }
            AppEvent::FormSubmitted { control_id } if control_id == FORM_SLIDES => {
                // Edits made before the click must be seen by the guard.
                self.process_pending_messages();
                return self.dispatch_msg(Msg::SubmitRequested);
            }
            _ => {}
        }
        EventDisposition::Default
    }

    fn try_dequeue_command(&mut self) -> Option<PlatformCommand> {
        self.process_pending_messages();
        self.commands.pop_front()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MsgKind {
    PageReady,
    Submit,
    Edit,
}

impl MsgKind {
    fn of(msg: &Msg) -> Self {
        match msg {
            Msg::PageReady => MsgKind::PageReady,
            Msg::SubmitRequested => MsgKind::Submit,
            _ => MsgKind::Edit,
        }
    }
}

fn log_submission(seq: u64, state: &AppState, effects: &[Effect]) {
    let prevented = effects.contains(&Effect::PreventDefault);
    if !state.guard_attached() {
        forge_debug!("#{} Submission before page ready; not intercepted", seq);
    } else if prevented && state.phase() == SubmissionPhase::Submitting {
        forge_info!("#{} Duplicate submission suppressed", seq);
    } else if prevented {
        match state.last_failure() {
            Some(failure) => forge_info!("#{} Submission blocked: {}", seq, failure),
            None => forge_info!("#{} Submission blocked", seq),
        }
    } else {
        forge_info!(
            "#{} Submission accepted text_chars={} template_len={}",
            seq,
            state.text().chars().count(),
            state.template().len()
        );
    }
}
