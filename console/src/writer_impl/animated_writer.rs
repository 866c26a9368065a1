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

use unicode_segmentation::UnicodeSegmentation as _;

use crate::{DisplaySpeed, DisplaySurface, InterruptSignal};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Completed,
    /// The delay after the `emitted_before_interrupt`-th character was interrupted. The
    /// rest of the text was then printed in one go, so the output is still complete.
    Interrupted { emitted_before_interrupt: usize },
}

/// Prints text to a [`DisplaySurface`], either all at once or "typed out" one grapheme
/// cluster at a time.
///
/// The delay runs on the thread that calls [`AnimatedWriter::write()`]. Completeness of
/// the output is guaranteed, the pacing is best effort: an interruption (via
/// [`AnimatedWriter::interrupt()`] or the signal from [`AnimatedWriter::interrupt_signal()`])
/// skips the remaining delays.
#[derive(Debug, Clone, Default)]
pub struct AnimatedWriter {
    interrupt_signal: InterruptSignal,
}

impl AnimatedWriter {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Skip the remaining delays of the write in progress (or of the next one).
    pub fn interrupt(&self) { self.interrupt_signal.interrupt(); }

    /// A handle that interrupts this writer from another thread.
    #[must_use]
    pub fn interrupt_signal(&self) -> InterruptSignal { self.interrupt_signal.clone() }

    /// - Empty `text` prints nothing.
    /// - [`DisplaySpeed::ATOMIC`] prints `text` with a single [`DisplaySurface::print()`].
    /// - Otherwise each grapheme cluster is printed separately, with a `speed` delay
    ///   *between* them (none after the last one).
    ///
    /// # Errors
    ///
    /// Any I/O error returned by the display. Interruption is not an error.
    pub fn write(
        &self,
        display: &dyn DisplaySurface,
        text: &str,
        speed: DisplaySpeed,
    ) -> io::Result<WriteOutcome> {
        if text.is_empty() {
            return Ok(WriteOutcome::Completed);
        }

        if speed.is_atomic() {
            display.print(text)?;
            return Ok(WriteOutcome::Completed);
        }

        let mut graphemes = text.grapheme_indices(true).peekable();
        let mut emitted = 0;

        while let Some((_, grapheme)) = graphemes.next() {
            display.print(grapheme)?;
            emitted += 1;

            let Some(&(next_index, _)) = graphemes.peek() else {
                break;
            };

            if let Err(error) = self.interrupt_signal.sleep(speed.as_duration()) {
                let rest = &text[next_index..];
                tracing::warn!(
                    %error,
                    emitted,
                    remaining_bytes = rest.len(),
                    "animated write interrupted, printing the rest at once"
                );
                display.print(rest)?;
                return Ok(WriteOutcome::Interrupted {
                    emitted_before_interrupt: emitted,
                });
            }
        }

        Ok(WriteOutcome::Completed)
    }
}
