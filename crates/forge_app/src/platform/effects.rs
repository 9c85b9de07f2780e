use std::collections::{BTreeMap, VecDeque};
use std::io::{self, Write};

use chrono::Utc;
use forge_core::Effect;
use forge_logging::{forge_debug, forge_info};
use serde::Serialize;
use thiserror::Error;
use url::Url;

use super::config::{resolve_action, ConfigError};
use super::host::{EventDisposition, PlatformCommand};
use super::page::FormData;

/// Turns guard effects into page commands and the submit event's disposition.
#[derive(Debug, Default)]
pub struct EffectRunner;

impl EffectRunner {
    pub fn run(
        &self,
        effects: Vec<Effect>,
        commands: &mut VecDeque<PlatformCommand>,
    ) -> EventDisposition {
        let mut disposition = EventDisposition::Default;
        for effect in effects {
            match effect {
                Effect::Alert { message } => {
                    commands.push_back(PlatformCommand::ShowAlert { message });
                }
                Effect::PreventDefault => {
                    forge_debug!("Default submission prevented");
                    disposition = EventDisposition::DefaultPrevented;
                }
            }
        }
        disposition
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Action(#[from] ConfigError),
    #[error("failed to encode submission: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to write submission: {0}")]
    Io(#[from] io::Error),
}

/// The host's native form submission.
pub trait FormSubmitter {
    fn submit(&mut self, form: &FormData) -> Result<(), SubmitError>;
}

/// What a native submission hands to the form's target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionRecord {
    pub method: &'static str,
    pub action: String,
    pub fields: BTreeMap<String, String>,
    /// File input name to the chosen file's name. Contents are never read.
    pub files: BTreeMap<String, String>,
    pub submitted_utc: String,
}

/// Writes each submission as one JSON line to `sink`.
pub struct JsonLineSubmitter<W: Write> {
    base: Url,
    sink: W,
    clock: Box<dyn Fn() -> String>,
}

impl<W: Write> JsonLineSubmitter<W> {
    pub fn new(base: Url, sink: W) -> Self {
        Self::with_clock(base, sink, Box::new(|| Utc::now().to_rfc3339()))
    }

    pub fn with_clock(base: Url, sink: W, clock: Box<dyn Fn() -> String>) -> Self {
        Self { base, sink, clock }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.sink
    }

    pub fn record(&self, form: &FormData) -> Result<SubmissionRecord, SubmitError> {
        let action = resolve_action(&self.base, &form.action)?;
        Ok(SubmissionRecord {
            method: form.method.as_str(),
            action: action.to_string(),
            fields: form.fields.iter().cloned().collect(),
            files: form
                .files
                .iter()
                .map(|(name, path)| (name.clone(), file_name(path)))
                .collect(),
            submitted_utc: (self.clock)(),
        })
    }
}

impl<W: Write> FormSubmitter for JsonLineSubmitter<W> {
    fn submit(&mut self, form: &FormData) -> Result<(), SubmitError> {
        let record = self.record(form)?;
        forge_info!(
            "Submitting {} {} fields={} files={}",
            record.method,
            record.action,
            record.fields.len(),
            record.files.len()
        );
        serde_json::to_writer(&mut self.sink, &record)?;
        writeln!(self.sink)?;
        self.sink.flush()?;
        Ok(())
    }
}

/// Browsers only send the final path component of a chosen file.
fn file_name(path: &str) -> String {
    path.rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or(path)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::config::FormMethod;
    use forge_core::VALIDATION_ALERT;
    use pretty_assertions::assert_eq;

    fn fixed_clock() -> Box<dyn Fn() -> String> {
        Box::new(|| "2026-10-17T12:00:00+00:00".to_string())
    }

    fn sample_form() -> FormData {
        FormData {
            action: "/generate".to_string(),
            method: FormMethod::Post,
            fields: vec![
                ("text".to_string(), "Hello world".to_string()),
                ("guidance".to_string(), String::new()),
            ],
            files: vec![(
                "template".to_string(),
                "C:\\fakepath\\deck.pptx".to_string(),
            )],
        }
    }

    #[test]
    fn alert_then_prevent_default() {
        let mut commands = VecDeque::new();
        let disposition = EffectRunner.run(
            vec![
                Effect::Alert {
                    message: VALIDATION_ALERT.to_string(),
                },
                Effect::PreventDefault,
            ],
            &mut commands,
        );

        assert_eq!(disposition, EventDisposition::DefaultPrevented);
        assert_eq!(
            commands.into_iter().collect::<Vec<_>>(),
            vec![PlatformCommand::ShowAlert {
                message: VALIDATION_ALERT.to_string()
            }]
        );
    }

    #[test]
    fn no_effects_keeps_default() {
        let mut commands = VecDeque::new();
        assert_eq!(
            EffectRunner.run(Vec::new(), &mut commands),
            EventDisposition::Default
        );
        assert!(commands.is_empty());
    }

    #[test]
    fn record_resolves_action_and_strips_file_paths() {
        let base = Url::parse("http://127.0.0.1:5000/").unwrap();
        let submitter = JsonLineSubmitter::with_clock(base, Vec::new(), fixed_clock());

        let record = submitter.record(&sample_form()).unwrap();
        assert_eq!(record.method, "POST");
        assert_eq!(record.action, "http://127.0.0.1:5000/generate");
        assert_eq!(record.fields["text"], "Hello world");
        assert_eq!(record.fields["guidance"], "");
        assert_eq!(record.files["template"], "deck.pptx");
        assert_eq!(record.submitted_utc, "2026-10-17T12:00:00+00:00");
    }

    #[test]
    fn submit_writes_one_json_line() {
        let base = Url::parse("http://127.0.0.1:5000/").unwrap();
        let mut submitter = JsonLineSubmitter::with_clock(base, Vec::new(), fixed_clock());
        submitter.submit(&sample_form()).unwrap();

        let out = String::from_utf8(submitter.into_inner()).unwrap();
        assert_eq!(out.lines().count(), 1);
        let value: serde_json::Value = serde_json::from_str(out.trim_end()).unwrap();
        assert_eq!(value["method"], "POST");
        assert_eq!(value["files"]["template"], "deck.pptx");
    }

    #[test]
    fn unix_paths_keep_only_the_file_name() {
        assert_eq!(file_name("/home/me/decks/q3.pptx"), "q3.pptx");
        assert_eq!(file_name("q3.pptx"), "q3.pptx");
    }
}
