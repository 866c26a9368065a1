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

use miette::Diagnostic;

/// Everything that can go wrong while fetching input.
///
/// The first three variants are *input* errors. The typed getters on
/// [`crate::Console`] never return them. Instead they print the caller's message and
/// fetch again. They are surfaced only by the single shot `try_get_*` methods and are
/// logged by the retry loops.
#[derive(Debug, PartialEq, thiserror::Error, Diagnostic)]
pub enum ConsoleError {
    /// The text could not be parsed as the requested type.
    #[error("`{input}` is not a valid {expected}")]
    #[diagnostic(code(r3bl_console::input::format))]
    Format {
        input: String,
        expected: &'static str,
    },

    /// The text was parsed, but the value is outside the caller's bounds.
    #[error("`{input}` is not in the range {min} ..= {max}")]
    #[diagnostic(code(r3bl_console::input::range))]
    Range {
        input: String,
        min: String,
        max: String,
    },

    /// The text failed a length, regex, or membership check.
    #[error("`{input}` is not {expected}")]
    #[diagnostic(code(r3bl_console::input::pattern))]
    Pattern { input: String, expected: String },

    /// A blocking wait or an animation delay was woken early.
    #[error("the wait was interrupted")]
    #[diagnostic(code(r3bl_console::interrupted))]
    Interrupted,

    #[error("a fetch is already waiting for input")]
    #[diagnostic(
        code(r3bl_console::gate::fetch_in_progress),
        help("Only one fetch can be outstanding on an input gate at a time")
    )]
    FetchInProgress,

    #[error("the fetch was dropped before any input was delivered")]
    #[diagnostic(code(r3bl_console::gate::fetch_abandoned))]
    FetchAbandoned,

    #[error("invalid input pattern")]
    #[diagnostic(
        code(r3bl_console::input::invalid_pattern),
        help("The pattern must be valid `regex` crate syntax")
    )]
    InvalidPattern(#[from] regex::Error),
}

impl ConsoleError {
    /// Range errors can be given their own retry message, see
    /// [`crate::RetryMessages`].
    #[must_use]
    pub fn is_range_error(&self) -> bool { matches!(self, ConsoleError::Range { .. }) }
}
