// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Domain layer: poll data types, invariants, and the shared error type.

pub mod error;
pub mod poll;

pub use error::{PollError, PollResult};
pub use poll::{Choice, Poll};
