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

use std::{io::{self, IsTerminal as _},
          sync::Arc,
          thread};

use crossterm::{event::{self, Event, KeyEventKind},
                terminal};
use miette::IntoDiagnostic as _;

use crate::{ClosedHandler, DisplaySurface, KeyPressedHandler, LineAction, LineBuffer,
            LineEnding, LockRecover as _, OutputDisplay, StdMutex, TextSubmittedHandler,
            is_close_chord};

pub type SafeLineBuffer = Arc<StdMutex<LineBuffer>>;

const EVENT_THREAD_NAME: &str = "console-display-events";
const ERASE_LAST_CHAR: &str = "\u{8} \u{8}";

/// A [`DisplaySurface`] backed by the real terminal.
///
/// # Mental model
///
/// - [`TerminalDisplay::try_start()`] puts the terminal in raw mode and spawns the
///   *event thread*, which blocks on [`crossterm::event::read()`].
/// - Every key press is dispatched to the key handlers.
/// - While the display is accepting input, keys are also applied to a [`LineBuffer`]:
///   printable characters are echoed, `Backspace` erases, and `Enter` submits the line to
///   the text handlers.
/// - `Ctrl+C` or `Ctrl+D` dispatch to the closed handlers and end the event thread. The
///   process is *not* exited, that is up to the owner of the display.
///
/// Dropping this struct takes the terminal out of raw mode.
#[derive(Debug)]
pub struct TerminalDisplay {
    pub output_display: Arc<OutputDisplay>,
    pub safe_line_buffer: SafeLineBuffer,
}

impl TerminalDisplay {
    /// # Returns
    /// 1. [None] if the terminal is not interactive (`stdin` or `stdout` is piped, eg: in
    ///    `cargo test` or `echo "foo" | cargo run --bin console_demo`).
    /// 2. Otherwise a [`TerminalDisplay`] whose event thread is already running.
    ///
    /// # Errors
    ///
    /// If raw mode can't be enabled, or the event thread can't be spawned.
    pub fn try_start() -> miette::Result<Option<Self>> {
        if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
            return Ok(None);
        }

        terminal::enable_raw_mode().into_diagnostic()?;

        let output_display =
            Arc::new(OutputDisplay::new_stdout().with_line_ending(LineEnding::CrLf));
        let safe_line_buffer = SafeLineBuffer::default();

        let spawn_result = thread::Builder::new().name(EVENT_THREAD_NAME.into()).spawn({
            let output_display = output_display.clone();
            let safe_line_buffer = safe_line_buffer.clone();
            move || run_event_loop(&output_display, &safe_line_buffer)
        });

        if let Err(error) = spawn_result {
            _ = terminal::disable_raw_mode();
            return Err(error).into_diagnostic();
        }

        Ok(Some(Self {
            output_display,
            safe_line_buffer,
        }))
    }
}

impl Drop for TerminalDisplay {
    fn drop(&mut self) { _ = terminal::disable_raw_mode(); }
}

/// Runs on the event thread until the display is closed or reading events fails.
fn run_event_loop(output_display: &OutputDisplay, safe_line_buffer: &SafeLineBuffer) {
    loop {
        let key_event = match event::read() {
            Ok(Event::Key(key_event)) if key_event.kind == KeyEventKind::Press => key_event,
            Ok(_) => continue,
            Err(error) => {
                tracing::error!(%error, "reading terminal events failed, closing display");
                output_display.close();
                return;
            }
        };

        if is_close_chord(&key_event) {
            output_display.close();
            return;
        }

        output_display.press_key(key_event.code);

        if !output_display.is_accepting_input() {
            continue;
        }

        let line_action = safe_line_buffer.lock_recover().apply(key_event);
        let echo_result = match line_action {
            LineAction::Echo(character) => {
                output_display.print(character.encode_utf8(&mut [0; 4]))
            }
            LineAction::EraseLast => output_display.print(ERASE_LAST_CHAR),
            LineAction::Submit(text) => {
                let result = output_display.println("");
                output_display.submit_text(text);
                result
            }
            LineAction::Ignore => Ok(()),
        };
        if let Err(error) = echo_result {
            tracing::error!(%error, "echoing typed input failed");
        }
    }
}

impl DisplaySurface for TerminalDisplay {
    fn print(&self, text: &str) -> io::Result<()> { self.output_display.print(text) }

    fn println(&self, text: &str) -> io::Result<()> { self.output_display.println(text) }

    fn set_accepting_input(&self, is_accepting: bool) {
        self.output_display.set_accepting_input(is_accepting);
    }

    fn is_accepting_input(&self) -> bool { self.output_display.is_accepting_input() }

    fn clear_input(&self) { self.safe_line_buffer.lock_recover().clear(); }

    fn on_text_submitted(&self, handler: TextSubmittedHandler) {
        self.output_display.on_text_submitted(handler);
    }

    fn on_key_pressed(&self, handler: KeyPressedHandler) {
        self.output_display.on_key_pressed(handler);
    }

    fn on_closed(&self, handler: ClosedHandler) { self.output_display.on_closed(handler); }
}
