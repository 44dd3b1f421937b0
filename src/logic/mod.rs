// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Business logic: CSV storage, the poll registry, and tally export.

pub mod export;
pub mod registry;
pub mod storage;

pub use registry::PollRegistry;
pub use storage::CsvStore;
