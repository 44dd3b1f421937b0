// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Root Model-View-Update kernel wiring screen state, messages, and commands.
//!
//! Every [`Command`] that touches polls maps to exactly one
//! [`PollRegistry`] operation.

use std::collections::HashSet;
use std::path::PathBuf;

use log::warn;

use crate::config::PollLimits;
use crate::logic::export::export;
use crate::logic::registry::PollRegistry;
use crate::models::Poll;
use crate::ui::components::poll_form::{self, PollFormModel, PollFormMsg};

/// Which view fills the central panel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Home,
    /// Voting view for the named poll.
    Vote(String),
    Create,
    /// Edit form for the named poll (name before editing).
    Edit(String),
}

/// Top-level application state.
#[derive(Default)]
pub struct AppModel {
    /// Current view.
    pub screen: Screen,
    /// Snapshot of the registry, refreshed after every command.
    pub polls: Vec<Poll>,
    /// Choice and vote limits shared with the registry.
    pub limits: PollLimits,
    /// Create/edit form state.
    pub form: PollFormModel,
    /// Poll awaiting delete confirmation.
    pub pending_delete: Option<String>,
    /// Most recent successful export, offered for opening.
    pub last_export: Option<PathBuf>,
    /// Latest status message to display.
    pub status: Option<String>,
    /// Latest error message to display in modal.
    pub error: Option<String>,
}

impl AppModel {
    pub fn poll(&self, name: &str) -> Option<&Poll> {
        self.polls.iter().find(|p| p.name == name)
    }

    /// Whether `poll` stopped accepting votes.
    pub fn is_closed(&self, poll: &Poll) -> bool {
        poll.is_closed(self.limits.vote_limit)
    }
}

/// Application messages routed through the update function.
pub enum Msg {
    ShowHome,
    OpenPoll(String),
    StartCreate,
    StartEdit(String),
    Form(PollFormMsg),
    SubmitForm,
    VoteFor { poll: String, choice: String },
    DeleteRequested(String),
    DeleteConfirmed,
    DeleteCancelled,
    ExportRequested { poll: String, path: PathBuf },
    ExportCancelled,
    OpenReportRequested,
    ReloadRequested,
    DismissError,
    PollsRefreshed(Vec<Poll>),
    PollSaved(Result<String, String>),
    VoteRecorded {
        choice: String,
        result: Result<u64, String>,
    },
    PollDeleted(Result<String, String>),
    ExportCompleted(Result<PathBuf, String>),
    ReportOpened(Result<(), String>),
    Reloaded(Result<usize, String>),
}

/// Commands represent side-effects executed between frames.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    CreatePoll(PollDraft),
    EditPoll { original: String, draft: PollDraft },
    CastVote { poll: String, choice: String },
    DeletePoll(String),
    ExportPoll { poll: String, path: PathBuf },
    OpenReport(PathBuf),
    Reload,
}

/// Captured, validated form data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PollDraft {
    pub name: String,
    pub description: String,
    pub choices: Vec<String>,
}

/// Update the application model and enqueue commands.
pub fn update(model: &mut AppModel, msg: Msg, cmds: &mut Vec<Command>) {
    match msg {
        Msg::ShowHome => model.screen = Screen::Home,
        Msg::OpenPoll(name) => {
            if model.poll(&name).is_some() {
                model.screen = Screen::Vote(name);
            } else {
                surface_event(model, format!("Poll '{name}' not found."), true);
            }
        }
        Msg::StartCreate => {
            model.form = PollFormModel::blank(model.limits);
            model.screen = Screen::Create;
        }
        Msg::StartEdit(name) => match model.poll(&name) {
            Some(poll) => {
                model.form = PollFormModel::from_poll(poll, model.limits);
                model.screen = Screen::Edit(name);
            }
            None => surface_event(model, format!("Poll '{name}' not found."), true),
        },
        Msg::Form(m) => {
            if let Some(event) = poll_form::update(&mut model.form, m) {
                surface_event(model, event.message, event.is_error);
            }
        }
        Msg::SubmitForm => match validate_form(&model.form) {
            Ok(draft) => match &model.screen {
                Screen::Create => cmds.push(Command::CreatePoll(draft)),
                Screen::Edit(original) => cmds.push(Command::EditPoll {
                    original: original.clone(),
                    draft,
                }),
                Screen::Home | Screen::Vote(_) => {}
            },
            Err(err) => surface_event(model, err, true),
        },
        Msg::VoteFor { poll, choice } => cmds.push(Command::CastVote { poll, choice }),
        Msg::DeleteRequested(name) => model.pending_delete = Some(name),
        Msg::DeleteConfirmed => {
            if let Some(name) = model.pending_delete.take() {
                cmds.push(Command::DeletePoll(name));
            }
        }
        Msg::DeleteCancelled => model.pending_delete = None,
        Msg::ExportRequested { poll, path } => cmds.push(Command::ExportPoll { poll, path }),
        Msg::ExportCancelled => surface_event(model, "Export cancelled.".to_string(), false),
        Msg::OpenReportRequested => {
            if let Some(path) = model.last_export.clone() {
                cmds.push(Command::OpenReport(path));
            }
        }
        Msg::ReloadRequested => cmds.push(Command::Reload),
        Msg::DismissError => model.error = None,
        Msg::PollsRefreshed(polls) => {
            model.polls = polls;
            let stale = match &model.screen {
                Screen::Vote(name) | Screen::Edit(name) => model.poll(name).is_none(),
                Screen::Home | Screen::Create => false,
            };
            if stale {
                model.screen = Screen::Home;
            }
        }
        Msg::PollSaved(result) => match result {
            Ok(name) => {
                surface_event(model, format!("Poll '{name}' saved."), false);
                model.screen = Screen::Vote(name);
            }
            Err(err) => surface_event(model, format!("Failed to save poll:\n\n{err}"), true),
        },
        Msg::VoteRecorded { choice, result } => match result {
            Ok(votes) => surface_event(
                model,
                format!("Vote recorded for '{choice}' (now {votes})."),
                false,
            ),
            Err(err) => surface_event(model, err, true),
        },
        Msg::PollDeleted(result) => match result {
            Ok(name) => {
                surface_event(model, format!("'{name}' is removed."), false);
                model.screen = Screen::Home;
            }
            Err(err) => surface_event(model, format!("Failed to delete the poll:\n\n{err}"), true),
        },
        Msg::ExportCompleted(result) => match result {
            Ok(path) => {
                surface_event(model, format!("Poll exported: {}", path.display()), false);
                model.last_export = Some(path);
            }
            Err(err) => surface_event(model, format!("Failed to export the poll:\n\n{err}"), true),
        },
        Msg::ReportOpened(result) => {
            if let Err(err) = result {
                surface_event(model, format!("Failed to open the report:\n\n{err}"), true);
            }
        }
        Msg::Reloaded(result) => match result {
            Ok(count) => {
                surface_event(model, format!("Reloaded {count} poll(s) from disk."), false)
            }
            Err(err) => surface_event(model, format!("Failed to reload polls:\n\n{err}"), true),
        },
    }
}

/// Execute a command synchronously against the registry and return the resulting message.
pub fn run_command(registry: &mut PollRegistry, cmd: Command) -> Msg {
    match cmd {
        Command::CreatePoll(draft) => Msg::PollSaved(
            registry
                .create(&draft.name, &draft.description, &draft.choices)
                .map(|poll| poll.name.clone())
                .map_err(|err| report("create", err)),
        ),
        Command::EditPoll { original, draft } => Msg::PollSaved(
            registry
                .edit(&original, &draft.name, &draft.description, &draft.choices)
                .map(|poll| poll.name.clone())
                .map_err(|err| report("edit", err)),
        ),
        Command::CastVote { poll, choice } => {
            let result = registry
                .vote(&poll, &choice)
                .map_err(|err| report("vote", err));
            Msg::VoteRecorded { choice, result }
        }
        Command::DeletePoll(name) => Msg::PollDeleted(
            registry
                .delete(&name)
                .map(|poll| poll.name)
                .map_err(|err| report("delete", err)),
        ),
        Command::ExportPoll { poll, path } => {
            let result = registry
                .get(&poll)
                .map_err(anyhow::Error::from)
                .and_then(|poll| export(poll, &path))
                .map(|_| path)
                .map_err(|err| report("export", format!("{err:#}")));
            Msg::ExportCompleted(result)
        }
        Command::OpenReport(path) => {
            Msg::ReportOpened(open::that(&path).map_err(|err| report("open report", err)))
        }
        Command::Reload => Msg::Reloaded(
            registry
                .reload()
                .map(|_| registry.polls().len())
                .map_err(|err| report("reload", err)),
        ),
    }
}

/// Snapshot the registry for the view.
pub fn refresh(registry: &PollRegistry) -> Msg {
    Msg::PollsRefreshed(registry.polls().to_vec())
}

/// Log a failed command and turn the error into user-facing text.
fn report(action: &str, err: impl std::fmt::Display) -> String {
    warn!("Failed to {action}: {err}");
    err.to_string()
}

/// Update status/error fields consistently for user feedback.
fn surface_event(model: &mut AppModel, message: String, is_error: bool) {
    if is_error {
        model.error = Some(message.clone());
    }
    model.status = Some(message);
}

/// Validate form state and build the data required to create or edit a poll.
fn validate_form(form: &PollFormModel) -> Result<PollDraft, String> {
    let name = form.name.trim().to_string();
    if name.is_empty() {
        return Err("Please enter a poll name.".into());
    }

    let mut choices = Vec::with_capacity(form.choices().len());
    let mut seen = HashSet::new();
    for (index, choice) in form.choices().iter().enumerate() {
        let label = choice.trim();
        if label.is_empty() {
            return Err(format!(
                "Choice {} is empty. Fill it in or remove it.",
                index + 1
            ));
        }
        if !seen.insert(label) {
            return Err(format!("Choice '{label}' is listed twice."));
        }
        choices.push(label.to_string());
    }

    if choices.len() < form.min_choices() {
        return Err(format!(
            "Please enter at least {} choices.",
            form.min_choices()
        ));
    }

    Ok(PollDraft {
        name,
        description: form.description.trim().to_string(),
        choices,
    })
}
