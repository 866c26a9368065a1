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

use std::ops::Add;

use tracing_core::LevelFilter;

pub const DEFAULT_LOG_FILE_NAME: &str = "console_log.txt";

/// Where the logs go and how verbose they are.
///
/// Functions that initialize logging take an `impl Into<TracingConfig>`, so any of these
/// work, and they can be composed with `+`:
///
/// ```
/// use r3bl_console::{DisplayPreference, TracingConfig, WriterConfig};
///
/// let config_1: TracingConfig = tracing::Level::DEBUG.into();
/// let config_2: TracingConfig = tracing_core::LevelFilter::INFO.into();
/// let config_3: TracingConfig = DisplayPreference::Stderr.into();
/// let config_4: TracingConfig = WriterConfig::File("log.txt".to_string()).into();
///
/// let composed = config_3 + config_4;
/// assert_eq!(
///     composed.writer_config,
///     WriterConfig::DisplayAndFile(DisplayPreference::Stderr, "log.txt".to_string())
/// );
/// # let _ = (config_1, config_2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TracingConfig {
    pub level_filter: LevelFilter,
    pub writer_config: WriterConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WriterConfig {
    None,
    Display(DisplayPreference),
    File(String /* file path */),
    DisplayAndFile(DisplayPreference, String /* file path */),
}

/// A terminal in raw mode owned by a [`crate::TerminalDisplay`] is a bad place for
/// logs. Prefer [`WriterConfig::File`] in that case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum DisplayPreference {
    Stdout,
    Stderr,
}

impl TracingConfig {
    /// Logs nothing.
    #[must_use]
    pub fn off() -> Self {
        Self {
            level_filter: LevelFilter::OFF,
            writer_config: WriterConfig::None,
        }
    }

    #[must_use]
    pub fn get_level_filter(&self) -> LevelFilter { self.level_filter }

    #[must_use]
    pub fn get_writer_config(&self) -> WriterConfig { self.writer_config.clone() }
}

impl From<tracing::Level> for TracingConfig {
    fn from(level: tracing::Level) -> Self { LevelFilter::from_level(level).into() }
}

impl From<LevelFilter> for TracingConfig {
    fn from(level_filter: LevelFilter) -> Self {
        Self {
            level_filter,
            writer_config: WriterConfig::File(DEFAULT_LOG_FILE_NAME.to_string()),
        }
    }
}

impl From<DisplayPreference> for TracingConfig {
    fn from(preferred_display: DisplayPreference) -> Self {
        WriterConfig::Display(preferred_display).into()
    }
}

impl From<WriterConfig> for TracingConfig {
    fn from(writer_config: WriterConfig) -> Self {
        Self {
            level_filter: LevelFilter::DEBUG,
            writer_config,
        }
    }
}

/// The more verbose level filter wins. The writer configs are merged.
impl Add<TracingConfig> for TracingConfig {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            level_filter: self.level_filter.max(rhs.level_filter),
            writer_config: self.writer_config + rhs.writer_config,
        }
    }
}

/// Merge two writer configs. When both sides set the same thing (the display, or the
/// file path) the `rhs` wins, since it is the more specific one.
///
/// - `Display(a) + File(f) = DisplayAndFile(a, f)`.
/// - `Display(a) + Display(b) = Display(b)`.
/// - `DisplayAndFile(a, f) + File(g) = DisplayAndFile(a, g)`.
/// - `None` is the identity.
impl Add<WriterConfig> for WriterConfig {
    type Output = Self;

    fn add(self, rhs: WriterConfig) -> Self::Output {
        use WriterConfig::{Display, DisplayAndFile, File, None};

        match (self, rhs) {
            (None, rhs) => rhs,
            (lhs, None) => lhs,

            (Display(_), Display(dp_rhs)) => Display(dp_rhs),
            (File(_), File(f_rhs)) => File(f_rhs),
            (_, DisplayAndFile(dp_rhs, f_rhs)) => DisplayAndFile(dp_rhs, f_rhs),

            (Display(dp_lhs), File(f_rhs)) => DisplayAndFile(dp_lhs, f_rhs),
            (File(f_lhs), Display(dp_rhs)) => DisplayAndFile(dp_rhs, f_lhs),

            (DisplayAndFile(_, f_lhs), Display(dp_rhs)) => DisplayAndFile(dp_rhs, f_lhs),
            (DisplayAndFile(dp_lhs, _), File(f_rhs)) => DisplayAndFile(dp_lhs, f_rhs),
        }
    }
}
