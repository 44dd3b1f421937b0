// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Voting view: one button per choice next to its live count.

use egui::{Color32, RichText};

use crate::models::Poll;

/// Emitted when a choice button is pressed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TallyMsg {
    Vote(String),
}

/// Render the tally for `poll`. Vote buttons are disabled when `closed`.
pub fn view(ui: &mut egui::Ui, poll: &Poll, closed: bool) -> Vec<TallyMsg> {
    let mut msgs = Vec::new();

    ui.heading(poll.name.as_str());
    if !poll.description.is_empty() {
        ui.add_space(4.0);
        ui.label(poll.description.as_str());
    }
    ui.add_space(12.0);

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        egui::Grid::new("tally_grid")
            .num_columns(2)
            .spacing(egui::vec2(12.0, 10.0))
            .min_col_width(120.0)
            .show(ui, |ui| {
                for choice in &poll.choices {
                    let button = egui::Button::new(choice.label.as_str())
                        .min_size(egui::vec2(120.0, 0.0));
                    if ui
                        .add_enabled(!closed, button)
                        .on_disabled_hover_text("Voting is closed for this poll")
                        .clicked()
                    {
                        msgs.push(TallyMsg::Vote(choice.label.clone()));
                    }

                    ui.add(
                        egui::ProgressBar::new(poll.share(&choice.label))
                            .desired_width(200.0)
                            .text(choice.votes.to_string()),
                    );
                    ui.end_row();
                }
            });
    });

    ui.add_space(6.0);
    let total = poll.total_votes();
    let summary = if closed {
        format!("{total} vote(s). Voting closed.")
    } else {
        format!("{total} vote(s)")
    };
    ui.label(
        RichText::new(summary)
            .small()
            .color(Color32::from_gray(110)),
    );

    msgs
}
