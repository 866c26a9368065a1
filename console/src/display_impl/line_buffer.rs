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

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What the terminal should do in response to a key, while input is being accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineAction {
    /// Print the character that was just typed.
    Echo(char),
    /// Erase the last character on screen.
    EraseLast,
    /// The user pressed Enter. The line buffer is now empty.
    Submit(String),
    Ignore,
}

/// The (single line) text the user has typed but not submitted yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    pub line: String,
}

impl LineBuffer {
    pub fn apply(&mut self, key_event: KeyEvent) -> LineAction {
        match key_event.code {
            KeyCode::Enter => LineAction::Submit(std::mem::take(&mut self.line)),
            KeyCode::Backspace => match self.line.pop() {
                Some(_) => LineAction::EraseLast,
                None => LineAction::Ignore,
            },
            KeyCode::Char(character)
                if !key_event
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.line.push(character);
                LineAction::Echo(character)
            }
            _ => LineAction::Ignore,
        }
    }

    pub fn clear(&mut self) { self.line.clear(); }
}

/// `Ctrl+C` and `Ctrl+D` close the terminal display.
#[must_use]
pub fn is_close_chord(key_event: &KeyEvent) -> bool {
    key_event.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key_event.code, KeyCode::Char('c' | 'd'))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent { KeyEvent::new(code, KeyModifiers::NONE) }

    #[test]
    fn test_type_erase_and_submit() {
        let mut line_buffer = LineBuffer::default();

        assert_eq!(line_buffer.apply(key(KeyCode::Char('a'))), LineAction::Echo('a'));
        assert_eq!(line_buffer.apply(key(KeyCode::Char('b'))), LineAction::Echo('b'));
        assert_eq!(line_buffer.apply(key(KeyCode::Backspace)), LineAction::EraseLast);
        assert_eq!(line_buffer.apply(key(KeyCode::Char('c'))), LineAction::Echo('c'));
        assert_eq!(line_buffer.apply(key(KeyCode::Left)), LineAction::Ignore);
        assert_eq!(
            line_buffer.apply(key(KeyCode::Enter)),
            LineAction::Submit("ac".to_string())
        );
        assert_eq!(line_buffer.line, "");
    }

    #[test]
    fn test_backspace_on_empty_line_and_empty_submit() {
        let mut line_buffer = LineBuffer::default();
        assert_eq!(line_buffer.apply(key(KeyCode::Backspace)), LineAction::Ignore);
        assert_eq!(
            line_buffer.apply(key(KeyCode::Enter)),
            LineAction::Submit(String::new())
        );
    }

    #[test]
    fn test_control_chords() {
        let mut line_buffer = LineBuffer::default();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        let ctrl_d = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL);
        let shift_c = KeyEvent::new(KeyCode::Char('C'), KeyModifiers::SHIFT);

        assert!(is_close_chord(&ctrl_c));
        assert!(is_close_chord(&ctrl_d));
        assert!(!is_close_chord(&shift_c));
        assert!(!is_close_chord(&key(KeyCode::Char('c'))));

        assert_eq!(line_buffer.apply(ctrl_c), LineAction::Ignore);
        assert_eq!(line_buffer.apply(shift_c), LineAction::Echo('C'));
        line_buffer.clear();
        assert_eq!(line_buffer.line, "");
    }
}
