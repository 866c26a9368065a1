/*
 *   Copyright (c) 2025 R3BL LLC
 *   All rights reserved.
 *
 *   Licensed under the Apache License, Version 2.0 (the "License");
 *   you may not use this file except in compliance with the License.
 *   You may obtain a copy of the License at
 *
 *   http://www.apache.org/licenses/LICENSE-2.0
 *
 *   Unless required by applicable law or agreed to in writing, software
 *   distributed under the License is distributed on an "AS IS" BASIS,
 *   WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *   See the License for the specific language governing permissions and
 *   limitations under the License.
 */

//! The `r3bl_console` library lets a program thread ask for typed values (a `char`, an
//! `i32` in a range, a `bool`, a string matching a regex, etc) using plain *blocking*
//! function calls, while the values themselves arrive on a completely different thread,
//! from an event driven display surface (key presses and submitted lines of text).
//!
//! # Why use this crate
//!
//! A callback driven UI (a window toolkit, a terminal event loop, a test harness) never
//! "returns" a value to anyone. It simply invokes handlers when something happens. A lot
//! of programs (quizzes, text adventures, teaching examples) are much easier to write as
//! straight line code that says "ask for a number between 1 and 10, then ask for a
//! name". This crate is the bridge between those two worlds.
//!
//! # Mental model
//!
//! 1. The program thread calls [`Console::fetch_string()`] (or one of the typed getters
//!    built on top of it). This arms an [`InputGate`] with a fresh one shot token, tells
//!    the [`DisplaySurface`] to start accepting input, and blocks.
//! 2. The event thread delivers submitted text to [`Console::receive_input()`]. If (and
//!    only if) a fetch is outstanding in text mode, the text is pushed into the
//!    [`InputHistory`] and the gate is released.
//! 3. The program thread wakes up, tells the display to stop accepting input, and reads
//!    the newest entry from the history.
//!
//! The typed getters wrap this cycle in a validation loop. Invalid input causes the
//! caller supplied error message to be printed and the fetch is repeated. There is no
//! escape hatch: a getter returns only when valid input arrives.
//!
//! Output printed via [`Console::print()`] and [`Console::println()`] goes through an
//! [`AnimatedWriter`], which can "type" text out one character at a time, at the
//! configured [`DisplaySpeed`]. The per character delay can be interrupted, in which
//! case the rest of the text is printed immediately.
//!
//! # Displays
//!
//! The [`Console`] talks to a display only through the [`DisplaySurface`] trait, so it
//! can be backed by anything. Two implementations are provided:
//! - [`OutputDisplay`] writes to any `std::io::Write` sink and lets you inject events
//!   from any thread. This is what the tests use.
//! - [`TerminalDisplay`] puts the terminal in raw mode and reads key events on its own
//!   thread using `crossterm`.
//!
//! Closing the display never exits the process. Instead the console broadcasts a
//! shutdown signal, see [`Console::subscribe_to_shutdown()`].
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use r3bl_console::{Console, TerminalDisplay};
//!
//! fn main() -> miette::Result<()> {
//!     let display = TerminalDisplay::try_start()?
//!         .ok_or_else(|| miette::miette!("stdin and stdout must be a terminal"))?;
//!     let console = Console::new(Arc::new(display));
//!     console.println("How old are you?");
//!     let age = console.get_int_in_range(1, 130, "Please enter a number from 1 to 130");
//!     console.println(format!("You are {age}"));
//!     Ok(())
//! }
//! ```

// https://github.com/rust-lang/rust-clippy/blob/master/clippy_lints/src/unwrap_in_result.rs
// Production code must propagate errors, test code is allowed to use .unwrap().
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach sources.
pub mod display_impl;
pub mod gate_impl;
pub mod public_api;
pub mod tracing_logging;
pub mod writer_impl;

// Re-export the public API.
pub use display_impl::*;
pub use gate_impl::*;
pub use public_api::*;
pub use tracing_logging::*;
pub use writer_impl::*;

// Type aliases.
use std::sync::{Arc, MutexGuard, PoisonError};

pub type StdMutex<T> = std::sync::Mutex<T>;

pub type SendRawTerminal = dyn std::io::Write + Send;
pub type SafeRawTerminal = Arc<StdMutex<SendRawTerminal>>;

pub type SafeHistory = Arc<StdMutex<InputHistory>>;

/// Lock a [`StdMutex`] without panicking. If another thread panicked while holding the
/// lock, the data is still handed out. None of the state guarded in this crate can be
/// left half updated by a panic.
pub trait LockRecover<T: ?Sized> {
    fn lock_recover(&self) -> MutexGuard<'_, T>;
}

impl<T: ?Sized> LockRecover<T> for StdMutex<T> {
    fn lock_recover(&self) -> MutexGuard<'_, T> {
        self.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// Constants.
pub const INPUT_HISTORY_CAPACITY: usize = 16;
pub const DEFAULT_DISPLAY_SPEED_MS: u64 = 0;
pub const DEFAULT_INTERACTION_PROMPT: &str = "Press any key to continue...";
pub const DEFAULT_YES_TOKENS: [&str; 4] = ["yes", "y", "1", "true"];
pub const DEFAULT_NO_TOKENS: [&str; 4] = ["no", "n", "0", "false"];
pub const SHUTDOWN_CHANNEL_CAPACITY: usize = 1;
