// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Home screen table of all polls.

use egui::{Color32, RichText};
use egui_extras::{Column, TableBuilder};

use crate::models::Poll;

/// Row actions emitted by the poll table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PollListMsg {
    Open(String),
    Edit(String),
    Delete(String),
}

/// Render the poll table and return the actions the user triggered.
pub fn view(ui: &mut egui::Ui, polls: &[Poll]) -> Vec<PollListMsg> {
    let mut msgs = Vec::new();

    if polls.is_empty() {
        ui.add_space(24.0);
        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new("No polls yet. Create one to get started.")
                    .italics()
                    .color(Color32::from_gray(110)),
            );
        });
        return msgs;
    }

    TableBuilder::new(ui)
        .striped(true)
        .resizable(false)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::initial(140.0).at_least(100.0).clip(true))
        .column(Column::remainder().at_least(120.0).clip(true))
        .column(Column::auto())
        .column(Column::auto())
        .header(22.0, |mut header| {
            header.col(|ui| {
                ui.strong("Poll");
            });
            header.col(|ui| {
                ui.strong("Description");
            });
            header.col(|ui| {
                ui.strong("Votes");
            });
            header.col(|ui| {
                ui.strong("");
            });
        })
        .body(|mut body| {
            for poll in polls {
                body.row(28.0, |mut row| {
                    row.col(|ui| {
                        if ui
                            .link(poll.name.as_str())
                            .on_hover_text("Open poll")
                            .clicked()
                        {
                            msgs.push(PollListMsg::Open(poll.name.clone()));
                        }
                    });
                    row.col(|ui| {
                        ui.label(poll.description.as_str());
                    });
                    row.col(|ui| {
                        ui.label(poll.total_votes().to_string());
                    });
                    row.col(|ui| {
                        if ui
                            .button(egui_phosphor::regular::PENCIL_SIMPLE)
                            .on_hover_text("Edit poll")
                            .clicked()
                        {
                            msgs.push(PollListMsg::Edit(poll.name.clone()));
                        }
                        if ui
                            .button(
                                RichText::new(egui_phosphor::regular::TRASH_SIMPLE)
                                    .color(Color32::from_gray(140)),
                            )
                            .on_hover_text("Delete poll")
                            .clicked()
                        {
                            msgs.push(PollListMsg::Delete(poll.name.clone()));
                        }
                    });
                });
            }
        });

    msgs
}
