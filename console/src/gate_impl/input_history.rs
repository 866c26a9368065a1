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

use std::collections::{VecDeque, vec_deque};

use crate::INPUT_HISTORY_CAPACITY;

/// Bounded buffer of accepted input, newest entry at index `0`.
///
/// Unlike a readline history, every accepted string is kept, including empty strings
/// and repeats, because [`crate::Console::fetch_string()`] reads its result back from
/// here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputHistory {
    entries: VecDeque<String>,
    capacity: usize,
}

impl Default for InputHistory {
    fn default() -> Self { Self::with_capacity(INPUT_HISTORY_CAPACITY) }
}

impl InputHistory {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// A capacity of `0` is raised to `1`, so that [`Self::latest()`] right after a
    /// [`Self::push()`] always returns the pushed value.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Insert at the front, evicting the oldest entry if the capacity is exceeded.
    pub fn push(&mut self, value: impl Into<String>) {
        self.entries.push_front(value.into());
        if self.entries.len() > self.capacity {
            self.entries.pop_back();
        }
    }

    #[must_use]
    pub fn latest(&self) -> Option<&str> { self.entries.front().map(String::as_str) }

    #[must_use]
    pub fn len(&self) -> usize { self.entries.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    #[must_use]
    pub fn capacity(&self) -> usize { self.capacity }

    /// Newest first.
    pub fn iter(&self) -> vec_deque::Iter<'_, String> { self.entries.iter() }
}

impl<'a> IntoIterator for &'a InputHistory {
    type Item = &'a String;
    type IntoIter = vec_deque::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter { self.iter() }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_latest_on_empty_history() {
        let history = InputHistory::new();
        assert!(history.is_empty());
        assert_eq!(history.latest(), None);
        assert_eq!(history.capacity(), INPUT_HISTORY_CAPACITY);
    }

    #[test]
    fn test_push_is_newest_first() {
        let mut history = InputHistory::new();
        history.push("first");
        history.push("second");
        history.push("second");
        history.push("");

        assert_eq!(history.latest(), Some(""));
        let entries: Vec<&str> = history.iter().map(String::as_str).collect();
        assert_eq!(entries, vec!["", "second", "second", "first"]);
    }

    #[test]
    fn test_keeps_only_the_last_sixteen() {
        let mut history = InputHistory::new();
        for it in 0..20 {
            history.push(it.to_string());
        }

        assert_eq!(history.len(), INPUT_HISTORY_CAPACITY);
        let expected: Vec<String> = (4..20).rev().map(|it| it.to_string()).collect();
        let actual: Vec<String> = history.iter().cloned().collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_zero_capacity_still_remembers_latest() {
        let mut history = InputHistory::with_capacity(0);
        history.push("a");
        history.push("b");
        assert_eq!(history.len(), 1);
        assert_eq!(history.latest(), Some("b"));
    }
}
