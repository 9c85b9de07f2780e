//! Headless page host.
//!
//! Plays the browser's part: owns the page, feeds user actions to the event
//! handler one at a time, applies the commands it produces and performs the
//! native form submission unless the handler prevented it.

use std::io::Write;

use forge_logging::{forge_debug, forge_info, forge_warn};
use thiserror::Error;

use super::config::FormMethod;
use super::effects::{FormSubmitter, SubmitError};
use super::page::{Page, PageError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ControlId(u32);

impl ControlId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    MultilineText,
    File,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformCommand {
    CreateForm {
        control_id: ControlId,
        action: String,
        method: FormMethod,
    },
    CreateInput {
        parent_control_id: Option<ControlId>,
        control_id: ControlId,
        name: &'static str,
        kind: InputKind,
        initial_text: String,
    },
    CreateButton {
        parent_control_id: Option<ControlId>,
        control_id: ControlId,
        text: String,
    },
    CreatePanel {
        parent_control_id: Option<ControlId>,
        control_id: ControlId,
        classes: Vec<String>,
    },
    CreateLabel {
        parent_control_id: Option<ControlId>,
        control_id: ControlId,
        initial_text: String,
    },
    SetControlText {
        control_id: ControlId,
        text: String,
    },
    SetControlEnabled {
        control_id: ControlId,
        enabled: bool,
    },
    AddClass {
        control_id: ControlId,
        class: String,
    },
    RemoveClass {
        control_id: ControlId,
        class: String,
    },
    /// Blocking notification; the host acknowledges it before continuing.
    ShowAlert { message: String },
    /// The page structure is complete.
    SignalPageReady,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    PageReady,
    InputTextChanged { control_id: ControlId, text: String },
    FormSubmitted { control_id: ControlId },
}

/// Whether the host should go on with the default action of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventDisposition {
    #[default]
    Default,
    DefaultPrevented,
}

pub trait PlatformEventHandler {
    fn handle_event(&mut self, event: AppEvent) -> EventDisposition;
    fn try_dequeue_command(&mut self) -> Option<PlatformCommand>;
}

/// Something a user does to the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Type { control_id: ControlId, text: String },
    ChooseFile { control_id: ControlId, path: String },
    Click { control_id: ControlId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// The form went out to its action.
    Submitted,
    /// At least one submission attempt was cancelled and none went out.
    Blocked,
    /// No submission was attempted.
    Untouched,
}

#[derive(Debug, Error)]
pub enum HostError {
    #[error(transparent)]
    Page(#[from] PageError),
    #[error("submission failed: {0}")]
    Submit(#[from] SubmitError),
    #[error("failed to show alert: {0}")]
    Alert(#[from] std::io::Error),
}

pub struct HeadlessPlatform<W: Write> {
    page: Page,
    alert_sink: W,
    pending_events: Vec<AppEvent>,
}

impl<W: Write> HeadlessPlatform<W> {
    pub fn new(alert_sink: W) -> Self {
        Self {
            page: Page::default(),
            alert_sink,
            pending_events: Vec::new(),
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    #[cfg(test)]
    pub fn into_alert_sink(self) -> W {
        self.alert_sink
    }

    /// Builds the page from `initial_commands`, then replays `actions` in order.
    pub fn main_event_loop(
        &mut self,
        handler: &mut dyn PlatformEventHandler,
        initial_commands: Vec<PlatformCommand>,
        actions: Vec<UserAction>,
        submitter: &mut dyn FormSubmitter,
    ) -> Result<PageOutcome, HostError> {
        for command in initial_commands {
            self.execute(command)?;
        }
        self.flush(handler)?;

        let mut outcome = PageOutcome::Untouched;
        for action in actions {
            if outcome == PageOutcome::Submitted {
                // Navigation has started; the page no longer takes input.
                forge_debug!("Ignoring {:?} after submission", action);
                continue;
            }
            let disposition = self.perform(handler, action)?;
            self.flush(handler)?;
            match disposition {
                Some(EventDisposition::Default) => {
                    let form = self.page.form_data()?;
                    submitter.submit(&form)?;
                    outcome = PageOutcome::Submitted;
                }
                Some(EventDisposition::DefaultPrevented) => outcome = PageOutcome::Blocked,
                None => {}
            }
        }
        Ok(outcome)
    }

    /// Returns the disposition of the submit event if the action raised one.
    fn perform(
        &mut self,
        handler: &mut dyn PlatformEventHandler,
        action: UserAction,
    ) -> Result<Option<EventDisposition>, HostError> {
        match action {
            UserAction::Type { control_id, text }
            | UserAction::ChooseFile {
                control_id,
                path: text,
            } => {
                self.page.set_value(control_id, text.clone())?;
                handler.handle_event(AppEvent::InputTextChanged { control_id, text });
                Ok(None)
            }
            UserAction::Click { control_id } => {
                if !self.page.is_enabled(control_id)? {
                    forge_debug!("Click on disabled control {} ignored", control_id.raw());
                    return Ok(None);
                }
                let Some(form_id) = self.page.form_of(control_id)? else {
                    return Ok(None);
                };
                forge_debug!(
                    "Click on {:?} ({:?}) submits form {}",
                    control_id,
                    self.page.text(control_id)?,
                    form_id.raw()
                );
                let disposition =
                    handler.handle_event(AppEvent::FormSubmitted { control_id: form_id });
                Ok(Some(disposition))
            }
        }
    }

    /// Applies every queued command, including those produced by events the
    /// commands themselves raise.
    fn flush(&mut self, handler: &mut dyn PlatformEventHandler) -> Result<(), HostError> {
        loop {
            while let Some(command) = handler.try_dequeue_command() {
                self.execute(command)?;
            }
            if self.pending_events.is_empty() {
                return Ok(());
            }
            for event in std::mem::take(&mut self.pending_events) {
                handler.handle_event(event);
            }
        }
    }

    fn execute(&mut self, command: PlatformCommand) -> Result<(), HostError> {
        match command {
            PlatformCommand::ShowAlert { message } => {
                forge_warn!("Alert: {}", message);
                writeln!(self.alert_sink, "{message}")?;
                self.alert_sink.flush()?;
                self.page.record_alert(message);
            }
            PlatformCommand::SignalPageReady => {
                forge_info!("Page ready");
                self.pending_events.push(AppEvent::PageReady);
            }
            other => self.page.apply(other)?,
        }
        Ok(())
    }
}
