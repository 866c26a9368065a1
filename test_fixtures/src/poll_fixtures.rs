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

use std::{thread,
          time::{Duration, Instant}};

/// How often [`poll_until`] re-checks its condition.
pub const POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Default upper bound for a test to wait for another thread to reach some state.
pub const POLL_TIMEOUT: Duration = Duration::from_secs(5);

/// Re-evaluate `condition` every [`POLL_INTERVAL`] until it returns `true` or `timeout`
/// elapses. Returns whether the condition was met.
pub fn poll_until(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    loop {
        if condition() {
            return true;
        }
        if Instant::now() >= deadline {
            return false;
        }
        thread::sleep(POLL_INTERVAL);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc,
                    atomic::{AtomicBool, Ordering}};

    use super::*;

    #[test]
    fn test_poll_until_sees_flag_set_by_other_thread() {
        let flag = Arc::new(AtomicBool::new(false));
        let flag_clone = flag.clone();
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(10));
            flag_clone.store(true, Ordering::SeqCst);
        });

        assert!(poll_until(POLL_TIMEOUT, || flag.load(Ordering::SeqCst)));
        handle.join().unwrap();
    }

    #[test]
    fn test_poll_until_times_out() {
        assert!(!poll_until(Duration::from_millis(5), || false));
    }
}
