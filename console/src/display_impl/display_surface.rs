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

use std::io;

use crossterm::event::KeyCode;

pub type TextSubmittedHandler = Box<dyn Fn(String) + Send + Sync>;
pub type KeyPressedHandler = Box<dyn Fn(KeyCode) + Send + Sync>;
pub type ClosedHandler = Box<dyn Fn() + Send + Sync>;

/// The narrow interface that a [`crate::Console`] needs from whatever actually shows
/// output and produces input events (a terminal, a window, a test double).
///
/// Implementations deliver events by invoking the registered handlers on their own
/// event thread. Handlers must not be invoked while holding a lock that the output
/// methods also take, since the console prints from the program thread.
pub trait DisplaySurface: Send + Sync {
    /// Write `text` as one atomic unit.
    ///
    /// # Errors
    ///
    /// Any I/O error from the underlying output.
    fn print(&self, text: &str) -> io::Result<()>;

    /// Write `text` followed by a line break, as one atomic unit.
    ///
    /// # Errors
    ///
    /// Any I/O error from the underlying output.
    fn println(&self, text: &str) -> io::Result<()>;

    /// Whether the user may currently type and submit text.
    fn set_accepting_input(&self, is_accepting: bool);

    fn is_accepting_input(&self) -> bool;

    /// Discard whatever the user has typed but not submitted yet.
    fn clear_input(&self) {}

    fn on_text_submitted(&self, handler: TextSubmittedHandler);

    fn on_key_pressed(&self, handler: KeyPressedHandler);

    /// Called when the display is closed (eg: the window is closed, or `Ctrl+C` is
    /// pressed in a terminal). Displays that can't be closed may ignore this.
    fn on_closed(&self, _handler: ClosedHandler) {}
}
