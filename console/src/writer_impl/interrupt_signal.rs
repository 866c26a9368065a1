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

use std::{sync::{Arc, Condvar},
          time::Duration};

use crate::{ConsoleError, LockRecover as _, StdMutex};

/// A cloneable "interrupted" flag, with a sleep that can be cut short by it.
///
/// It behaves like a thread interrupt flag: [`InterruptSignal::interrupt()`] raises it,
/// and the current (or next) [`InterruptSignal::sleep()`] returns
/// [`ConsoleError::Interrupted`] immediately and lowers the flag again.
#[derive(Debug, Clone, Default)]
pub struct InterruptSignal {
    inner: Arc<(StdMutex<bool>, Condvar)>,
}

impl InterruptSignal {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    pub fn interrupt(&self) {
        let (is_interrupted, condvar) = &*self.inner;
        *is_interrupted.lock_recover() = true;
        condvar.notify_all();
    }

    #[must_use]
    pub fn is_interrupted(&self) -> bool { *self.inner.0.lock_recover() }

    /// Sleep for `duration`, unless interrupted first.
    ///
    /// # Errors
    ///
    /// [`ConsoleError::Interrupted`] if the flag was raised before or during the sleep.
    pub fn sleep(&self, duration: Duration) -> Result<(), ConsoleError> {
        let (is_interrupted, condvar) = &*self.inner;
        let guard = is_interrupted.lock_recover();
        let (mut guard, _) = condvar
            .wait_timeout_while(guard, duration, |is_interrupted| !*is_interrupted)
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if *guard {
            *guard = false;
            Err(ConsoleError::Interrupted)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{thread, time::Instant};

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_sleep_runs_to_completion() {
        let signal = InterruptSignal::new();
        let start = Instant::now();
        assert_eq!(signal.sleep(Duration::from_millis(20)), Ok(()));
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_interrupt_before_sleep_is_consumed_once() {
        let signal = InterruptSignal::new();
        signal.interrupt();
        assert!(signal.is_interrupted());

        let start = Instant::now();
        assert_eq!(
            signal.sleep(Duration::from_secs(10)),
            Err(ConsoleError::Interrupted)
        );
        assert!(start.elapsed() < Duration::from_secs(5));
        assert!(!signal.is_interrupted());

        assert_eq!(signal.sleep(Duration::from_millis(1)), Ok(()));
    }

    #[test]
    fn test_interrupt_from_other_thread_cuts_sleep_short() {
        let signal = InterruptSignal::new();
        let signal_clone = signal.clone();
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            signal_clone.interrupt();
        });

        let start = Instant::now();
        assert_eq!(
            signal.sleep(Duration::from_secs(10)),
            Err(ConsoleError::Interrupted)
        );
        assert!(start.elapsed() < Duration::from_secs(5));
        handle.join().unwrap();
    }
}
