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

use std::{io::{Result, Write},
          sync::{Arc, Mutex},
          time::{Duration, Instant}};

use strip_ansi_escapes::strip;

/// One call to [`Write::write`] on an [`OutputMock`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteChunk {
    pub bytes: Vec<u8>,
    pub written_at: Instant,
}

impl WriteChunk {
    pub fn as_string_lossy(&self) -> String { String::from_utf8_lossy(&self.bytes).into() }
}

/// You can safely clone this struct, since it only contains an `Arc<Mutex<_>>`. All the
/// clones point to the same recorded chunks, so one clone can be handed to the code
/// under test (as a `dyn Write + Send`) while the test keeps another to inspect.
#[derive(Debug, Clone, Default)]
pub struct OutputMock {
    pub safe_chunks: Arc<Mutex<Vec<WriteChunk>>>,
}

impl OutputMock {
    pub fn new() -> Self { Self::default() }

    pub fn get_copy_of_chunks(&self) -> Vec<WriteChunk> {
        self.safe_chunks.lock().unwrap().clone()
    }

    /// Each write, in order, as a string.
    pub fn get_chunks_as_strings(&self) -> Vec<String> {
        self.safe_chunks
            .lock()
            .unwrap()
            .iter()
            .map(WriteChunk::as_string_lossy)
            .collect()
    }

    pub fn get_copy_of_buffer_as_string(&self) -> String {
        let bytes: Vec<u8> = self
            .safe_chunks
            .lock()
            .unwrap()
            .iter()
            .flat_map(|chunk| chunk.bytes.iter().copied())
            .collect();
        String::from_utf8_lossy(&bytes).into()
    }

    pub fn get_copy_of_buffer_as_string_strip_ansi(&self) -> String {
        let raw = self.get_copy_of_buffer_as_string();
        String::from_utf8_lossy(&strip(raw.as_bytes())).into()
    }

    /// Number of lines (split on `\n`, with `\r` trimmed) that are exactly `needle`.
    pub fn count_lines_equal_to(&self, needle: &str) -> usize {
        self.get_copy_of_buffer_as_string_strip_ansi()
            .split('\n')
            .filter(|line| line.trim_end_matches('\r') == needle)
            .count()
    }

    /// Time elapsed between the first and the last write, if there were at least two.
    pub fn get_elapsed_between_first_and_last_chunk(&self) -> Option<Duration> {
        let chunks = self.safe_chunks.lock().unwrap();
        match (chunks.first(), chunks.last()) {
            (Some(first), Some(last)) if chunks.len() > 1 => {
                Some(last.written_at.duration_since(first.written_at))
            }
            _ => None,
        }
    }

    pub fn clear(&self) { self.safe_chunks.lock().unwrap().clear(); }
}

impl Write for OutputMock {
    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        self.safe_chunks.lock().unwrap().push(WriteChunk {
            bytes: buf.to_vec(),
            written_at: Instant::now(),
        });
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<()> { Ok(()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_mock_records_each_write_as_a_chunk() {
        let mut output_mock = OutputMock::default();
        let output_mock_clone = output_mock.clone(); // Points to the same chunks.

        output_mock.write_all(b"h").unwrap();
        output_mock.write_all(b"i").unwrap();
        output_mock.flush().unwrap();

        pretty_assertions::assert_eq!(output_mock_clone.get_chunks_as_strings(), vec![
            "h".to_string(),
            "i".to_string()
        ]);
        pretty_assertions::assert_eq!(output_mock_clone.get_copy_of_buffer_as_string(), "hi");
        assert!(output_mock_clone.get_elapsed_between_first_and_last_chunk().is_some());
    }

    #[test]
    fn test_output_mock_strip_ansi_and_count_lines() {
        let mut output_mock = OutputMock::new();

        let red_text = "\x1b[31merr\x1b[0m\n"; // Resets color after.
        output_mock.write_all(red_text.as_bytes()).unwrap();
        output_mock.write_all(b"ok\r\nerr\n").unwrap();

        pretty_assertions::assert_eq!(
            output_mock.get_copy_of_buffer_as_string_strip_ansi(),
            "err\nok\r\nerr\n"
        );
        pretty_assertions::assert_eq!(output_mock.count_lines_equal_to("err"), 2);
        pretty_assertions::assert_eq!(output_mock.count_lines_equal_to("ok"), 1);

        output_mock.clear();
        assert!(output_mock.get_copy_of_chunks().is_empty());
        assert!(output_mock.get_elapsed_between_first_and_last_chunk().is_none());
    }
}
