// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Create/edit form for a poll: name, description, and a dynamic choice list.

use egui::{Color32, RichText};

use crate::config::PollLimits;
use crate::models::Poll;

/// UI model for the poll form, kept free of side effects.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PollFormModel {
    pub name: String,
    pub description: String,
    choices: Vec<String>,
    min_choices: usize,
    max_choices: usize,
}

/// Messages emitted by the form view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PollFormMsg {
    NameChanged(String),
    DescriptionChanged(String),
    ChoiceChanged { index: usize, text: String },
    AddChoice,
    RemoveChoice(usize),
}

/// User-facing feedback surfaced to the status bar or error modal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PollFormEvent {
    pub message: String,
    pub is_error: bool,
}

impl PollFormModel {
    /// Empty form with the minimum number of choice fields.
    pub fn blank(limits: PollLimits) -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            choices: vec![String::new(); limits.min_choices.max(1)],
            min_choices: limits.min_choices.max(1),
            max_choices: limits.max_choices.max(limits.min_choices.max(1)),
        }
    }

    /// Form pre-filled from an existing poll, padded to the minimum field count.
    pub fn from_poll(poll: &Poll, limits: PollLimits) -> Self {
        let mut model = Self::blank(limits);
        model.name = poll.name.clone();
        model.description = poll.description.clone();
        model.choices = poll.choices.iter().map(|c| c.label.clone()).collect();
        while model.choices.len() < model.min_choices {
            model.choices.push(String::new());
        }
        model
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    pub fn min_choices(&self) -> usize {
        self.min_choices
    }

    pub fn can_add_choice(&self) -> bool {
        self.choices.len() < self.max_choices
    }

    pub fn can_remove_choice(&self) -> bool {
        self.choices.len() > self.min_choices
    }
}

/// Apply a message to the model. Returns a feedback event when relevant.
pub fn update(model: &mut PollFormModel, msg: PollFormMsg) -> Option<PollFormEvent> {
    match msg {
        PollFormMsg::NameChanged(text) => {
            model.name = text;
            None
        }
        PollFormMsg::DescriptionChanged(text) => {
            model.description = text;
            None
        }
        PollFormMsg::ChoiceChanged { index, text } => {
            if let Some(slot) = model.choices.get_mut(index) {
                *slot = text;
            }
            None
        }
        PollFormMsg::AddChoice => {
            if !model.can_add_choice() {
                return Some(PollFormEvent {
                    message: format!("A poll can have at most {} choices.", model.max_choices),
                    is_error: true,
                });
            }
            model.choices.push(String::new());
            None
        }
        PollFormMsg::RemoveChoice(index) => {
            if !model.can_remove_choice() {
                return Some(PollFormEvent {
                    message: format!("A poll needs at least {} choices.", model.min_choices),
                    is_error: true,
                });
            }
            if index < model.choices.len() {
                model.choices.remove(index);
            }
            None
        }
    }
}

/// Render the form and return any messages triggered by user interaction.
pub fn view(ui: &mut egui::Ui, model: &PollFormModel) -> Vec<PollFormMsg> {
    let mut msgs = Vec::new();

    egui::Grid::new("poll_form_grid")
        .num_columns(2)
        .spacing(egui::vec2(8.0, 10.0))
        .min_col_width(90.0)
        .show(ui, |ui| {
            ui.label("Name*");
            let mut name = model.name.clone();
            if ui
                .add(
                    egui::TextEdit::singleline(&mut name)
                        .hint_text("e.g., Lunch")
                        .desired_width(f32::INFINITY),
                )
                .changed()
            {
                msgs.push(PollFormMsg::NameChanged(name));
            }
            ui.end_row();

            ui.label("Description");
            let mut description = model.description.clone();
            if ui
                .add(
                    egui::TextEdit::singleline(&mut description)
                        .hint_text("Enter a description/question")
                        .desired_width(f32::INFINITY),
                )
                .changed()
            {
                msgs.push(PollFormMsg::DescriptionChanged(description));
            }
            ui.end_row();
        });

    ui.add_space(12.0);
    ui.label("Choices");
    ui.add_space(4.0);

    for (index, choice) in model.choices.iter().enumerate() {
        ui.horizontal(|ui| {
            let hint = if index < model.min_choices {
                format!("Choice {}*", index + 1)
            } else {
                format!("Choice {}", index + 1)
            };
            let mut text = choice.clone();
            if ui
                .add(egui::TextEdit::singleline(&mut text).hint_text(hint))
                .changed()
            {
                msgs.push(PollFormMsg::ChoiceChanged { index, text });
            }

            if ui
                .add_enabled(
                    model.can_remove_choice(),
                    egui::Button::new(
                        RichText::new(egui_phosphor::regular::TRASH_SIMPLE)
                            .color(Color32::from_gray(140)),
                    ),
                )
                .on_hover_text("Remove choice")
                .clicked()
            {
                msgs.push(PollFormMsg::RemoveChoice(index));
            }
        });
    }

    ui.add_space(6.0);
    if ui
        .add_enabled(
            model.can_add_choice(),
            egui::Button::new(format!("{} Add choice", egui_phosphor::regular::PLUS)),
        )
        .on_disabled_hover_text(format!("At most {} choices", model.max_choices))
        .clicked()
    {
        msgs.push(PollFormMsg::AddChoice);
    }

    msgs
}
