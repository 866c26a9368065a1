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

use std::time::Duration;

use crate::{DEFAULT_DISPLAY_SPEED_MS,
            DEFAULT_INTERACTION_PROMPT,
            DEFAULT_NO_TOKENS,
            DEFAULT_YES_TOKENS,
            INPUT_HISTORY_CAPACITY};

/// Milliseconds to wait between characters when printing. `0` prints atomically.
///
/// It can't be negative. Converting from a signed number clamps negative values to `0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DisplaySpeed(u64);

impl DisplaySpeed {
    pub const ATOMIC: DisplaySpeed = DisplaySpeed(0);

    #[must_use]
    pub const fn from_millis(millis: u64) -> Self { Self(millis) }

    #[must_use]
    pub const fn as_millis(self) -> u64 { self.0 }

    #[must_use]
    pub const fn as_duration(self) -> Duration { Duration::from_millis(self.0) }

    #[must_use]
    pub const fn is_atomic(self) -> bool { self.0 == 0 }
}

impl From<i64> for DisplaySpeed {
    fn from(millis: i64) -> Self { Self(u64::try_from(millis).unwrap_or(0)) }
}

impl From<i32> for DisplaySpeed {
    fn from(millis: i32) -> Self { i64::from(millis).into() }
}

impl From<u64> for DisplaySpeed {
    fn from(millis: u64) -> Self { Self(millis) }
}

impl std::fmt::Display for DisplaySpeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// The strings that [`crate::Console::get_boolean()`] accepts (case insensitive) as a
/// yes or a no answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BooleanTokens {
    pub yes: Vec<String>,
    pub no: Vec<String>,
}

impl Default for BooleanTokens {
    fn default() -> Self { Self::new(DEFAULT_YES_TOKENS, DEFAULT_NO_TOKENS) }
}

impl BooleanTokens {
    pub fn new(
        yes: impl IntoIterator<Item = impl Into<String>>,
        no: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            yes: yes.into_iter().map(Into::into).collect(),
            no: no.into_iter().map(Into::into).collect(),
        }
    }
}

/// Messages printed by the ranged getters before they fetch again. The `format` message
/// is printed when the text doesn't parse, the `range` message when the value is out of
/// bounds.
///
/// The plain ranged getters (eg: [`crate::Console::get_int_in_range()`]) use
/// [`RetryMessages::same()`], so both cases print the one message the caller passed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryMessages {
    pub format: String,
    pub range: String,
}

impl RetryMessages {
    pub fn same(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            format: message.clone(),
            range: message,
        }
    }

    pub fn distinct(format: impl Into<String>, range: impl Into<String>) -> Self {
        Self {
            format: format.into(),
            range: range.into(),
        }
    }

    #[must_use]
    pub fn message_for(&self, error: &crate::ConsoleError) -> &str {
        if error.is_range_error() {
            &self.range
        } else {
            &self.format
        }
    }
}

/// Configure a [`crate::Console`]. Use [`Default`] and override what you need:
///
/// ```
/// use r3bl_console::{ConsoleConfig, DisplaySpeed};
///
/// let config = ConsoleConfig {
///     display_speed: DisplaySpeed::from_millis(25),
///     ..Default::default()
/// };
/// assert_eq!(config.history_capacity, 16);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub display_speed: DisplaySpeed,
    pub boolean_tokens: BooleanTokens,
    /// Printed by [`crate::Console::wait_for_any_key()`].
    pub interaction_prompt: String,
    pub history_capacity: usize,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            display_speed: DisplaySpeed::from_millis(DEFAULT_DISPLAY_SPEED_MS),
            boolean_tokens: BooleanTokens::default(),
            interaction_prompt: DEFAULT_INTERACTION_PROMPT.to_owned(),
            history_capacity: INPUT_HISTORY_CAPACITY,
        }
    }
}

impl From<DisplaySpeed> for ConsoleConfig {
    fn from(display_speed: DisplaySpeed) -> Self {
        Self {
            display_speed,
            ..Default::default()
        }
    }
}
