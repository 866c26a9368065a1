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

use std::{io::{self, Write as _},
          sync::{Arc,
                 atomic::{AtomicBool, Ordering}}};

use crossterm::event::KeyCode;

use crate::{ClosedHandler, DisplaySurface, EventHandlers, KeyPressedHandler,
            LockRecover as _, SafeRawTerminal, StdMutex, TextSubmittedHandler};

/// How line breaks are written. Raw mode terminals need [`LineEnding::CrLf`], since the
/// terminal no longer translates `\n` into a carriage return + line feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, strum_macros::Display)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

/// A [`DisplaySurface`] that writes to any `dyn Write + Send` (supplied via dependency
/// injection, so tests can capture the output) and whose events are injected by calling
/// [`OutputDisplay::submit_text()`], [`OutputDisplay::press_key()`], and
/// [`OutputDisplay::close()`] from whichever thread plays the event source.
///
/// Every [`DisplaySurface::print()`] results in exactly one `write_all` + `flush` on the
/// underlying output, while holding its lock.
pub struct OutputDisplay {
    pub safe_raw_terminal: SafeRawTerminal,
    pub line_ending: LineEnding,
    is_accepting_input: AtomicBool,
    event_handlers: EventHandlers,
}

impl std::fmt::Debug for OutputDisplay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutputDisplay")
            .field("line_ending", &self.line_ending)
            .field("is_accepting_input", &self.is_accepting_input())
            .field("event_handlers", &self.event_handlers)
            .finish_non_exhaustive()
    }
}

impl OutputDisplay {
    pub fn new(safe_raw_terminal: SafeRawTerminal) -> Self {
        Self {
            safe_raw_terminal,
            line_ending: LineEnding::default(),
            is_accepting_input: AtomicBool::new(false),
            event_handlers: EventHandlers::new(),
        }
    }

    /// Convenience constructor for any owned writer, eg: a test mock.
    pub fn from_writer(writer: impl io::Write + Send + 'static) -> Self {
        Self::new(Arc::new(StdMutex::new(writer)))
    }

    #[must_use]
    pub fn new_stdout() -> Self { Self::from_writer(io::stdout()) }

    #[must_use]
    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    /// Event side: the user submitted a line of text.
    pub fn submit_text(&self, text: impl Into<String>) {
        let text = text.into();
        let handled_by = self.event_handlers.dispatch_text_submitted(&text);
        tracing::trace!(%text, handled_by, "text submitted");
    }

    /// Event side: the user pressed a key.
    pub fn press_key(&self, key_code: KeyCode) {
        let handled_by = self.event_handlers.dispatch_key_pressed(key_code);
        tracing::trace!(?key_code, handled_by, "key pressed");
    }

    /// Event side: the display was closed.
    pub fn close(&self) {
        let handled_by = self.event_handlers.dispatch_closed();
        tracing::debug!(handled_by, "display closed");
    }

    fn write_and_flush(&self, text: &str, add_line_break: bool) -> io::Result<()> {
        let mut output = match self.line_ending {
            LineEnding::Lf => text.to_owned(),
            LineEnding::CrLf => text.replace('\n', "\r\n"),
        };
        if add_line_break {
            output.push_str(match self.line_ending {
                LineEnding::Lf => "\n",
                LineEnding::CrLf => "\r\n",
            });
        }
        let terminal = &mut *self.safe_raw_terminal.lock_recover();
        terminal.write_all(output.as_bytes())?;
        terminal.flush()
    }
}

impl DisplaySurface for OutputDisplay {
    fn print(&self, text: &str) -> io::Result<()> { self.write_and_flush(text, false) }

    fn println(&self, text: &str) -> io::Result<()> { self.write_and_flush(text, true) }

    fn set_accepting_input(&self, is_accepting: bool) {
        self.is_accepting_input.store(is_accepting, Ordering::SeqCst);
    }

    fn is_accepting_input(&self) -> bool { self.is_accepting_input.load(Ordering::SeqCst) }

    fn on_text_submitted(&self, handler: TextSubmittedHandler) {
        self.event_handlers.add_text_submitted(handler);
    }

    fn on_key_pressed(&self, handler: KeyPressedHandler) {
        self.event_handlers.add_key_pressed(handler);
    }

    fn on_closed(&self, handler: ClosedHandler) { self.event_handlers.add_closed(handler); }
}
