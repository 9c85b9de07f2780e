//! In-memory page: the controls the guard reads from and updates.
use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use super::config::FormMethod;
use super::host::{ControlId, InputKind, PlatformCommand};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageError {
    #[error("unknown control {0:?}")]
    UnknownControl(ControlId),
    #[error("control {0:?} already exists")]
    DuplicateControl(ControlId),
    #[error("control {0:?} does not accept a value")]
    NotAnInput(ControlId),
    #[error("page has no form")]
    NoForm,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ControlKind {
    Form { action: String, method: FormMethod },
    Input { name: &'static str, kind: InputKind },
    Button,
    Panel,
    Label,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Control {
    kind: ControlKind,
    parent: Option<ControlId>,
    text: String,
    enabled: bool,
    classes: BTreeSet<String>,
}

impl Control {
    fn new(kind: ControlKind, parent: Option<ControlId>, text: String) -> Self {
        Self {
            kind,
            parent,
            text,
            enabled: true,
            classes: BTreeSet::new(),
        }
    }
}

/// What a form submission carries, gathered from the page at submit time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormData {
    pub action: String,
    pub method: FormMethod,
    /// Text inputs in document order.
    pub fields: Vec<(String, String)>,
    /// File inputs in document order; the value is the chosen path.
    pub files: Vec<(String, String)>,
}

#[derive(Debug, Default)]
pub struct Page {
    controls: BTreeMap<ControlId, Control>,
    order: Vec<ControlId>,
    alerts: Vec<String>,
}

impl Page {
    pub fn apply(&mut self, command: PlatformCommand) -> Result<(), PageError> {
        match command {
            PlatformCommand::CreateForm {
                control_id,
                action,
                method,
            } => self.insert(
                control_id,
                Control::new(ControlKind::Form { action, method }, None, String::new()),
            ),
            PlatformCommand::CreateInput {
                parent_control_id,
                control_id,
                name,
                kind,
                initial_text,
            } => self.insert(
                control_id,
                Control::new(ControlKind::Input { name, kind }, parent_control_id, initial_text),
            ),
            PlatformCommand::CreateButton {
                parent_control_id,
                control_id,
                text,
            } => self.insert(
                control_id,
                Control::new(ControlKind::Button, parent_control_id, text),
            ),
            PlatformCommand::CreatePanel {
                parent_control_id,
                control_id,
                classes,
            } => {
                let mut control = Control::new(ControlKind::Panel, parent_control_id, String::new());
                control.classes.extend(classes);
                self.insert(control_id, control)
            }
            PlatformCommand::CreateLabel {
                parent_control_id,
                control_id,
                initial_text,
            } => self.insert(
                control_id,
                Control::new(ControlKind::Label, parent_control_id, initial_text),
            ),
            PlatformCommand::SetControlText { control_id, text } => {
                self.control_mut(control_id)?.text = text;
                Ok(())
            }
            PlatformCommand::SetControlEnabled {
                control_id,
                enabled,
            } => {
                self.control_mut(control_id)?.enabled = enabled;
                Ok(())
            }
            PlatformCommand::AddClass { control_id, class } => {
                self.control_mut(control_id)?.classes.insert(class);
                Ok(())
            }
            PlatformCommand::RemoveClass { control_id, class } => {
                self.control_mut(control_id)?.classes.remove(&class);
                Ok(())
            }
            PlatformCommand::ShowAlert { message } => {
                self.record_alert(message);
                Ok(())
            }
            PlatformCommand::SignalPageReady => Ok(()),
        }
    }

    pub fn set_value(&mut self, control_id: ControlId, value: String) -> Result<(), PageError> {
        let control = self.control_mut(control_id)?;
        if !matches!(control.kind, ControlKind::Input { .. }) {
            return Err(PageError::NotAnInput(control_id));
        }
        control.text = value;
        Ok(())
    }

    pub fn text(&self, control_id: ControlId) -> Result<&str, PageError> {
        Ok(&self.control(control_id)?.text)
    }

    pub fn is_enabled(&self, control_id: ControlId) -> Result<bool, PageError> {
        Ok(self.control(control_id)?.enabled)
    }

    pub fn has_class(&self, control_id: ControlId, class: &str) -> Result<bool, PageError> {
        Ok(self.control(control_id)?.classes.contains(class))
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    pub(crate) fn record_alert(&mut self, message: String) {
        self.alerts.push(message);
    }

    /// The form a button submits: its nearest form ancestor, if any.
    pub fn form_of(&self, control_id: ControlId) -> Result<Option<ControlId>, PageError> {
        let control = self.control(control_id)?;
        if control.kind != ControlKind::Button {
            return Ok(None);
        }
        let mut parent = control.parent;
        while let Some(id) = parent {
            let ancestor = self.control(id)?;
            if matches!(ancestor.kind, ControlKind::Form { .. }) {
                return Ok(Some(id));
            }
            parent = ancestor.parent;
        }
        Ok(None)
    }

    /// Collects the values of the page's first form.
    pub fn form_data(&self) -> Result<FormData, PageError> {
        let (form_id, action, method) = self
            .order
            .iter()
            .find_map(|id| match &self.controls[id].kind {
                ControlKind::Form { action, method } => Some((*id, action.clone(), *method)),
                _ => None,
            })
            .ok_or(PageError::NoForm)?;

        let mut data = FormData {
            action,
            method,
            fields: Vec::new(),
            files: Vec::new(),
        };
        for id in &self.order {
            let control = &self.controls[id];
            let ControlKind::Input { name, kind } = control.kind else {
                continue;
            };
            if !self.is_inside(*id, form_id) {
                continue;
            }
            let entry = (name.to_string(), control.text.clone());
            match kind {
                InputKind::File => data.files.push(entry),
                InputKind::Text | InputKind::MultilineText => data.fields.push(entry),
            }
        }
        Ok(data)
    }

    fn is_inside(&self, control_id: ControlId, ancestor: ControlId) -> bool {
        let mut parent = self.controls.get(&control_id).and_then(|c| c.parent);
        while let Some(id) = parent {
            if id == ancestor {
                return true;
            }
            parent = self.controls.get(&id).and_then(|c| c.parent);
        }
        false
    }

    fn insert(&mut self, control_id: ControlId, control: Control) -> Result<(), PageError> {
        if self.controls.contains_key(&control_id) {
            return Err(PageError::DuplicateControl(control_id));
        }
        if let Some(parent) = control.parent {
            self.control(parent)?;
        }
        self.controls.insert(control_id, control);
        self.order.push(control_id);
        Ok(())
    }

    fn control(&self, control_id: ControlId) -> Result<&Control, PageError> {
        self.controls
            .get(&control_id)
            .ok_or(PageError::UnknownControl(control_id))
    }

    fn control_mut(&mut self, control_id: ControlId) -> Result<&mut Control, PageError> {
        self.controls
            .get_mut(&control_id)
            .ok_or(PageError::UnknownControl(control_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORM: ControlId = ControlId::new(1);
    const INPUT: ControlId = ControlId::new(2);
    const FILE: ControlId = ControlId::new(3);
    const BUTTON: ControlId = ControlId::new(4);
    const PANEL: ControlId = ControlId::new(5);
    const OUTSIDE: ControlId = ControlId::new(6);

    fn sample_page() -> Page {
        let mut page = Page::default();
        let commands = vec![
            PlatformCommand::CreateForm {
                control_id: FORM,
                action: "/generate".to_string(),
                method: FormMethod::Post,
            },
            PlatformCommand::CreateInput {
                parent_control_id: Some(FORM),
                control_id: INPUT,
                name: "text",
                kind: InputKind::MultilineText,
                initial_text: String::new(),
            },
            PlatformCommand::CreateInput {
                parent_control_id: Some(FORM),
                control_id: FILE,
                name: "template",
                kind: InputKind::File,
                initial_text: String::new(),
            },
            PlatformCommand::CreateButton {
                parent_control_id: Some(FORM),
                control_id: BUTTON,
                text: "Go".to_string(),
            },
            PlatformCommand::CreatePanel {
                parent_control_id: None,
                control_id: PANEL,
                classes: vec!["hidden".to_string(), "spinner".to_string()],
            },
            PlatformCommand::CreateInput {
                parent_control_id: None,
                control_id: OUTSIDE,
                name: "search",
                kind: InputKind::Text,
                initial_text: "ignored".to_string(),
            },
        ];
        for command in commands {
            page.apply(command).unwrap();
        }
        page
    }

    #[test]
    fn class_changes_touch_only_the_named_class() {
        let mut page = sample_page();
        page.apply(PlatformCommand::RemoveClass {
            control_id: PANEL,
            class: "hidden".to_string(),
        })
        .unwrap();

        assert!(!page.has_class(PANEL, "hidden").unwrap());
        assert!(page.has_class(PANEL, "spinner").unwrap());

        // Removing an absent class is not an error.
        page.apply(PlatformCommand::RemoveClass {
            control_id: PANEL,
            class: "hidden".to_string(),
        })
        .unwrap();
    }

    #[test]
    fn form_data_collects_only_inputs_inside_the_form() {
        let mut page = sample_page();
        page.set_value(INPUT, "Hello".to_string()).unwrap();
        page.set_value(FILE, "deck.pptx".to_string()).unwrap();

        let data = page.form_data().unwrap();
        assert_eq!(data.action, "/generate");
        assert_eq!(data.method, FormMethod::Post);
        assert_eq!(data.fields, vec![("text".to_string(), "Hello".to_string())]);
        assert_eq!(
            data.files,
            vec![("template".to_string(), "deck.pptx".to_string())]
        );
    }

    #[test]
    fn buttons_resolve_their_form() {
        let page = sample_page();
        assert_eq!(page.form_of(BUTTON).unwrap(), Some(FORM));
        assert_eq!(page.form_of(INPUT).unwrap(), None);
    }

    #[test]
    fn rejects_unknown_and_duplicate_controls() {
        let mut page = sample_page();
        assert_eq!(
            page.set_value(ControlId::new(99), String::new()),
            Err(PageError::UnknownControl(ControlId::new(99)))
        );
        assert_eq!(
            page.set_value(BUTTON, String::new()),
            Err(PageError::NotAnInput(BUTTON))
        );
        assert_eq!(
            page.apply(PlatformCommand::CreatePanel {
                parent_control_id: None,
                control_id: PANEL,
                classes: Vec::new(),
            }),
            Err(PageError::DuplicateControl(PANEL))
        );
    }

    #[test]
    fn empty_page_has_no_form() {
        assert_eq!(Page::default().form_data(), Err(PageError::NoForm));
    }
}
