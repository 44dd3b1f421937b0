// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Application entry point wiring the poll registry and egui/eframe together.

use eframe::egui;
use egui_phosphor::Variant;
use log::{error, info};

use crate::config::AppConfig;
use crate::logic::{CsvStore, PollRegistry};
use crate::ui::BunnyPollApp;

/// Load the registry and run the main egui event loop.
///
/// A poll file that cannot be read does not stop the app: it starts with an
/// empty registry and shows the failure in the error modal.
pub fn run() -> eframe::Result<()> {
    let config = AppConfig::default();
    let (registry, startup_error) = open_registry(&config);

    // Register Phosphor icon font.
    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, Variant::Regular);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([560.0, 600.0])
            .with_min_inner_size([420.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "BunnyPoll",
        options,
        Box::new(|cc| {
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(BunnyPollApp::new(registry, startup_error)))
        }),
    )
}

fn open_registry(config: &AppConfig) -> (PollRegistry, Option<String>) {
    let store = CsvStore::new(&config.data_file);
    match PollRegistry::open(store.clone(), config.limits) {
        Ok(registry) => {
            info!(
                "Opened {} poll(s) from {:?}",
                registry.polls().len(),
                config.data_file
            );
            (registry, None)
        }
        Err(err) => {
            error!("Could not load polls from {:?}: {err}", config.data_file);
            let message = format!(
                "Could not load saved polls; starting with an empty list.\n\n{err}"
            );
            (PollRegistry::empty(store, config.limits), Some(message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PollLimits;
    use tempfile::TempDir;

    fn config(tmp: &TempDir) -> AppConfig {
        AppConfig {
            data_file: tmp.path().join("polls.csv"),
            limits: PollLimits::default(),
        }
    }

    #[test]
    fn open_registry_reads_existing_file() {
        let tmp = TempDir::new().unwrap();
        let config = config(&tmp);
        std::fs::write(&config.data_file, "Lunch,,Pizza,2\n").unwrap();

        let (registry, startup_error) = open_registry(&config);

        assert!(startup_error.is_none());
        assert_eq!(registry.polls().len(), 1);
    }

    #[test]
    fn unreadable_file_yields_empty_registry_and_message() {
        let tmp = TempDir::new().unwrap();
        let config = config(&tmp);
        std::fs::write(&config.data_file, b"Lunch,,Pi\xffzza,1\n").unwrap();

        let (registry, startup_error) = open_registry(&config);

        assert!(registry.polls().is_empty());
        assert!(
            startup_error
                .as_deref()
                .map(|m| m.contains("empty list"))
                .unwrap_or(false)
        );
    }
}
