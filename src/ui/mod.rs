// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Top-level egui application shell for BunnyPoll.
//! Handles layout, screen switching, dialogs, and wiring to the poll registry.

pub mod components;

use eframe::egui;

use crate::logic::export::{ensure_extension, suggested_export_name};
use crate::logic::registry::PollRegistry;
use crate::mvu::{self, AppModel, Msg, Screen};
use crate::ui::components::poll_form;
use crate::ui::components::poll_list::{self, PollListMsg};
use crate::ui::components::tally::{self, TallyMsg};

/// Stateful egui application owning the registry for its lifetime.
pub struct BunnyPollApp {
    model: AppModel,
    registry: PollRegistry,
    inbox: Vec<Msg>,
}

impl BunnyPollApp {
    /// Wrap `registry`; `startup_error` is shown in the error modal on the first frame.
    pub fn new(registry: PollRegistry, startup_error: Option<String>) -> Self {
        let model = AppModel {
            polls: registry.polls().to_vec(),
            limits: registry.limits(),
            status: Some(format!(
                "Polls are stored in {}",
                registry.store().path().display()
            )),
            error: startup_error,
            ..Default::default()
        };
        Self {
            model,
            registry,
            inbox: Vec::new(),
        }
    }

    /// Apply queued messages in order, running commands against the registry
    /// as they are produced. Each command is followed by a fresh snapshot.
    fn process_inbox(&mut self) {
        while !self.inbox.is_empty() {
            let msgs = std::mem::take(&mut self.inbox);
            for msg in msgs {
                let mut commands = Vec::new();
                mvu::update(&mut self.model, msg, &mut commands);
                for cmd in commands {
                    let result = mvu::run_command(&mut self.registry, cmd);
                    self.inbox.push(mvu::refresh(&self.registry));
                    self.inbox.push(result);
                }
            }
        }
    }
}

impl eframe::App for BunnyPollApp {
    /// Required by eframe 0.34; all rendering happens in `update`.
    fn ui(&mut self, _ui: &mut egui::Ui, _frame: &mut eframe::Frame) {}

    /// Drives a single UI frame: applies pending messages, then renders the
    /// top bar, modals, status bar, and the current screen. Views queue their
    /// messages for the next frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ensure_spacing(ctx);
        self.process_inbox();

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading(format!("{} BunnyPoll", egui_phosphor::regular::CHART_BAR));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.add_space(2.0);
                    egui::widgets::global_theme_preference_switch(ui);
                    if self.model.screen == Screen::Home {
                        ui.separator();
                        if ui
                            .button(format!("{} Reload", egui_phosphor::regular::ARROW_CLOCKWISE))
                            .on_hover_text("Read the poll file again")
                            .clicked()
                        {
                            self.inbox.push(Msg::ReloadRequested);
                        }
                        if ui
                            .button(format!("{} New poll", egui_phosphor::regular::PLUS))
                            .clicked()
                        {
                            self.inbox.push(Msg::StartCreate);
                        }
                    }
                });
            });
            ui.add_space(4.0);
        });

        self.render_error_modal(ctx);
        self.render_delete_modal(ctx);

        egui::TopBottomPanel::bottom("status_panel")
            .resizable(false)
            .show(ctx, |ui| {
                self.render_status(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(8.0);
            egui::ScrollArea::vertical().show(ui, |ui| match self.model.screen.clone() {
                Screen::Home => self.render_home(ui),
                Screen::Vote(name) => self.render_vote(ui, &name),
                Screen::Create => self.render_form(ui, None),
                Screen::Edit(name) => self.render_form(ui, Some(&name)),
            });
        });

        if !self.inbox.is_empty() {
            ctx.request_repaint();
        }
    }
}

impl BunnyPollApp {
    fn ensure_spacing(&self, ctx: &egui::Context) {
        ctx.style_mut(|style| {
            style.spacing.item_spacing = egui::vec2(6.0, 6.0);
        });
    }

    fn render_home(&mut self, ui: &mut egui::Ui) {
        for msg in poll_list::view(ui, &self.model.polls) {
            self.inbox.push(match msg {
                PollListMsg::Open(name) => Msg::OpenPoll(name),
                PollListMsg::Edit(name) => Msg::StartEdit(name),
                PollListMsg::Delete(name) => Msg::DeleteRequested(name),
            });
        }
    }

    /// Voting view with Back/Edit/Export/Delete actions below the tally.
    fn render_vote(&mut self, ui: &mut egui::Ui, name: &str) {
        let Some(poll) = self.model.poll(name) else {
            self.inbox.push(Msg::ShowHome);
            return;
        };
        let closed = self.model.is_closed(poll);

        let msgs = tally::view(ui, poll, closed);
        self.inbox
            .extend(msgs.into_iter().map(|TallyMsg::Vote(choice)| Msg::VoteFor {
                poll: name.to_string(),
                choice,
            }));

        ui.add_space(12.0);
        ui.horizontal(|ui| {
            if ui
                .button(format!("{} Back", egui_phosphor::regular::ARROW_LEFT))
                .clicked()
            {
                self.inbox.push(Msg::ShowHome);
            }
            if ui
                .button(format!("{} Edit", egui_phosphor::regular::PENCIL_SIMPLE))
                .clicked()
            {
                self.inbox.push(Msg::StartEdit(name.to_string()));
            }
            if ui
                .button(format!("{} Export", egui_phosphor::regular::EXPORT))
                .clicked()
            {
                self.request_export(name);
            }
            if ui
                .button(format!("{} Delete", egui_phosphor::regular::TRASH_SIMPLE))
                .clicked()
            {
                self.inbox.push(Msg::DeleteRequested(name.to_string()));
            }
        });
    }

    /// Open a native save dialog for the tally report of `name`.
    fn request_export(&mut self, name: &str) {
        let dialog = rfd::FileDialog::new()
            .set_title("Export poll results")
            .add_filter("Text report", &["txt"])
            .set_file_name(suggested_export_name(name));

        match dialog.save_file() {
            Some(path) => self.inbox.push(Msg::ExportRequested {
                poll: name.to_string(),
                path: ensure_extension(path, "txt"),
            }),
            None => self.inbox.push(Msg::ExportCancelled),
        }
    }

    /// Create or edit form; `editing` carries the poll name when editing.
    fn render_form(&mut self, ui: &mut egui::Ui, editing: Option<&str>) {
        match editing {
            Some(name) => ui.heading(format!("Edit '{name}'")),
            None => ui.heading("New poll"),
        };
        ui.add_space(8.0);

        let msgs = poll_form::view(ui, &self.model.form);
        self.inbox.extend(msgs.into_iter().map(Msg::Form));

        ui.add_space(12.0);
        ui.horizontal(|ui| {
            let save_label = match editing {
                Some(_) => format!("{} Save", egui_phosphor::regular::FLOPPY_DISK),
                None => format!("{} Post", egui_phosphor::regular::FLOPPY_DISK),
            };
            if ui.button(save_label).clicked() {
                self.inbox.push(Msg::SubmitForm);
            }
            if ui.button("Cancel").clicked() {
                self.inbox.push(match editing {
                    Some(name) => Msg::OpenPoll(name.to_string()),
                    None => Msg::ShowHome,
                });
            }
        });
    }

    /// Render a simple modal window for error messages.
    fn render_error_modal(&mut self, ctx: &egui::Context) {
        if let Some(message) = self.model.error.clone() {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
                .show(ctx, |ui| {
                    ui.label(message);
                    ui.add_space(8.0);
                    if ui.button("OK").clicked() {
                        self.inbox.push(Msg::DismissError);
                    }
                });
        }
    }

    /// Ask before removing a poll and its votes.
    fn render_delete_modal(&mut self, ctx: &egui::Context) {
        if let Some(name) = self.model.pending_delete.clone() {
            egui::Window::new("Delete poll")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
                .show(ctx, |ui| {
                    ui.label(format!("Delete '{name}' and all of its votes?"));
                    ui.add_space(8.0);
                    ui.horizontal(|ui| {
                        if ui.button("Delete").clicked() {
                            self.inbox.push(Msg::DeleteConfirmed);
                        }
                        if ui.button("Cancel").clicked() {
                            self.inbox.push(Msg::DeleteCancelled);
                        }
                    });
                });
        }
    }

    /// Render latest status message and, after an export, a shortcut to open it.
    fn render_status(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if let Some(text) = &self.model.status {
                ui.label(
                    egui::RichText::new(text.as_str()).color(egui::Color32::from_gray(68)),
                );
            }
            if self.model.last_export.is_some() {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .small_button("Open last report")
                        .on_hover_text("Open the exported report with the system viewer")
                        .clicked()
                    {
                        self.inbox.push(Msg::OpenReportRequested);
                    }
                });
            }
        });
    }
}
