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

use tokio::sync::oneshot;

use crate::{ConsoleError, LockRecover as _, StdMutex};

/// What kind of event a fetch is waiting for. This is the "awaiting interaction" flag:
/// [`FetchMode::AnyKey`] means the caller is waiting for any key press, and
/// [`FetchMode::Text`] means it is waiting for a submitted line of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum FetchMode {
    Text,
    AnyKey,
}

/// Message delivered over the one shot channel of a [`FetchRequest`].
#[derive(Debug)]
pub enum GateSignal {
    /// The event side handed over control. The fetch is complete.
    Released,
    /// The wait was woken early. The gate is still open, and the waiter must keep waiting
    /// on the enclosed (fresh) receiver.
    Interrupted(oneshot::Receiver<GateSignal>),
}

/// The token for one outstanding fetch. It is created when the gate is armed and
/// consumed when the gate is released, so a signal can never leak into a later fetch.
#[derive(Debug)]
struct FetchRequest {
    mode: FetchMode,
    release_sender: oneshot::Sender<GateSignal>,
}

/// # Mental model
///
/// One shot, cross thread handoff between a *program thread* that wants to block until
/// some input arrives, and an *event thread* that delivers that input.
///
/// 1. The program thread calls [`InputGate::open()`]. A fresh [`FetchRequest`] (holding
///    the sender half of a [`tokio::sync::oneshot`] channel) is stored in the gate, and
///    the program thread blocks on the receiver half.
/// 2. The event thread calls [`InputGate::release()`] or [`InputGate::release_if()`].
///    The request is taken out of the gate and [`GateSignal::Released`] is sent.
/// 3. The program thread wakes up. Anything the event thread wrote before sending is
///    visible to it.
///
/// At most one request is live at a time. Releasing a gate that isn't open does nothing.
///
/// # Interruption
///
/// [`InputGate::interrupt()`] wakes the waiter without completing the fetch. The gate
/// stays open (with the same [`FetchMode`]) and the waiter logs the interruption and
/// goes back to waiting, on a brand new channel that is handed to it along with the
/// interruption. There is no window during which an event could be dropped because the
/// gate looked closed.
#[derive(Debug, Default)]
pub struct InputGate {
    slot: StdMutex<Option<FetchRequest>>,
}

impl InputGate {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Arm the gate in the given `mode`, run `on_open`, then block the calling thread
    /// until the gate is released. There is no timeout.
    ///
    /// `on_open` runs after the request is armed, so any event that it makes possible
    /// (eg: telling a display to start accepting input) is guaranteed to find the gate
    /// open.
    ///
    /// # Errors
    ///
    /// - [`ConsoleError::FetchInProgress`] if another request is already outstanding.
    ///   The caller does not block in this case and `on_open` is not run.
    /// - [`ConsoleError::FetchAbandoned`] if the request was dropped without being
    ///   released.
    ///
    /// # Panics
    ///
    /// This blocks the current thread, so it panics if called from within an async
    /// execution context (see [`oneshot::Receiver::blocking_recv`]).
    pub fn open(&self, mode: FetchMode, on_open: impl FnOnce()) -> Result<(), ConsoleError> {
        let release_receiver = {
            let mut slot = self.slot.lock_recover();
            if slot.is_some() {
                return Err(ConsoleError::FetchInProgress);
            }
            let (release_sender, release_receiver) = oneshot::channel();
            *slot = Some(FetchRequest {
                mode,
                release_sender,
            });
            release_receiver
        };

        tracing::debug!(%mode, "input gate armed");
        on_open();

        wait_for_release(release_receiver)
    }

    /// Release the outstanding request regardless of its mode. Returns `false` (and does
    /// nothing) if the gate is not open.
    pub fn release(&self) -> bool {
        let maybe_request = self.slot.lock_recover().take();
        match maybe_request {
            Some(request) => send_release(request),
            None => false,
        }
    }

    /// Release the outstanding request only if it is waiting in `mode`. The
    /// `before_release` closure runs while the gate is locked, right before the release
    /// is sent, so whatever it writes happens-before the waiter resumes.
    pub fn release_if(&self, mode: FetchMode, before_release: impl FnOnce()) -> bool {
        let mut slot = self.slot.lock_recover();
        let Some(request) = slot.take_if(|request| request.mode == mode) else {
            return false;
        };
        before_release();
        send_release(request)
    }

    /// Wake the waiter early without completing the fetch. Returns `false` if the gate is
    /// not open.
    pub fn interrupt(&self) -> bool {
        let mut slot = self.slot.lock_recover();
        let Some(request) = slot.as_mut() else {
            return false;
        };
        let (next_sender, next_receiver) = oneshot::channel();
        let interrupted_sender = std::mem::replace(&mut request.release_sender, next_sender);
        interrupted_sender
            .send(GateSignal::Interrupted(next_receiver))
            .is_ok()
    }

    #[must_use]
    pub fn is_open(&self) -> bool { self.slot.lock_recover().is_some() }

    #[must_use]
    pub fn mode(&self) -> Option<FetchMode> {
        self.slot.lock_recover().as_ref().map(|request| request.mode)
    }
}

fn send_release(request: FetchRequest) -> bool {
    let FetchRequest {
        mode,
        release_sender,
    } = request;
    let sent = release_sender.send(GateSignal::Released).is_ok();
    if sent {
        tracing::debug!(%mode, "input gate released");
    } else {
        tracing::warn!(%mode, "input gate released, but nothing was waiting on it");
    }
    sent
}

fn wait_for_release(
    mut release_receiver: oneshot::Receiver<GateSignal>,
) -> Result<(), ConsoleError> {
    loop {
        match release_receiver.blocking_recv() {
            Ok(GateSignal::Released) => return Ok(()),
            Ok(GateSignal::Interrupted(next_receiver)) => {
                tracing::warn!(
                    error = %ConsoleError::Interrupted,
                    "wait for input woken early, gate is still open, waiting again"
                );
                release_receiver = next_receiver;
            }
            Err(_) => return Err(ConsoleError::FetchAbandoned),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::{Arc,
                     atomic::{AtomicBool, Ordering}},
              thread,
              time::Duration};

    use pretty_assertions::assert_eq;
    use r3bl_test_fixtures::{POLL_TIMEOUT, poll_until};

    use super::*;

    fn spawn_open(
        gate: &Arc<InputGate>,
        mode: FetchMode,
    ) -> thread::JoinHandle<Result<(), ConsoleError>> {
        let gate = gate.clone();
        thread::spawn(move || gate.open(mode, || {}))
    }

    #[test]
    fn test_open_blocks_until_release() {
        let gate = Arc::new(InputGate::new());
        assert!(!gate.is_open());

        let handle = spawn_open(&gate, FetchMode::Text);
        assert!(poll_until(POLL_TIMEOUT, || gate.is_open()));
        assert_eq!(gate.mode(), Some(FetchMode::Text));

        thread::sleep(Duration::from_millis(20));
        assert!(!handle.is_finished());

        assert!(gate.release());
        assert_eq!(handle.join().unwrap(), Ok(()));
        assert!(!gate.is_open());
        assert_eq!(gate.mode(), None);
    }

    #[test]
    fn test_release_without_open_is_noop() {
        let gate = InputGate::new();
        assert!(!gate.release());
        assert!(!gate.release_if(FetchMode::Text, || panic!("must not run")));
        assert!(!gate.interrupt());
        assert!(!gate.is_open());
    }

    #[test]
    fn test_second_open_is_rejected() {
        let gate = Arc::new(InputGate::new());
        let handle = spawn_open(&gate, FetchMode::AnyKey);
        assert!(poll_until(POLL_TIMEOUT, || gate.is_open()));

        let on_open_ran = AtomicBool::new(false);
        let result = gate.open(FetchMode::Text, || on_open_ran.store(true, Ordering::SeqCst));
        assert_eq!(result, Err(ConsoleError::FetchInProgress));
        assert!(!on_open_ran.load(Ordering::SeqCst));

        assert!(gate.release());
        assert_eq!(handle.join().unwrap(), Ok(()));
    }

    #[test]
    fn test_release_if_only_matches_active_mode() {
        let gate = Arc::new(InputGate::new());
        let handle = spawn_open(&gate, FetchMode::AnyKey);
        assert!(poll_until(POLL_TIMEOUT, || gate.is_open()));

        assert!(!gate.release_if(FetchMode::Text, || panic!("must not run")));
        assert!(gate.is_open());

        let mut before_release_ran = false;
        assert!(gate.release_if(FetchMode::AnyKey, || before_release_ran = true));
        assert!(before_release_ran);
        assert_eq!(handle.join().unwrap(), Ok(()));
    }

    #[test]
    fn test_on_open_runs_after_gate_is_armed() {
        let gate = Arc::new(InputGate::new());
        let was_open_in_callback = Arc::new(AtomicBool::new(false));

        let handle = {
            let gate = gate.clone();
            let gate_in_callback = gate.clone();
            let was_open_in_callback = was_open_in_callback.clone();
            thread::spawn(move || {
                gate.open(FetchMode::Text, move || {
                    was_open_in_callback.store(gate_in_callback.is_open(), Ordering::SeqCst);
                })
            })
        };

        assert!(poll_until(POLL_TIMEOUT, || gate.is_open()));
        assert!(gate.release());
        assert_eq!(handle.join().unwrap(), Ok(()));
        assert!(was_open_in_callback.load(Ordering::SeqCst));
    }

    #[test]
    fn test_interrupt_leaves_gate_open() {
        let gate = Arc::new(InputGate::new());
        let handle = spawn_open(&gate, FetchMode::Text);
        assert!(poll_until(POLL_TIMEOUT, || gate.is_open()));

        // Two interruptions in a row, before the waiter had a chance to re-wait.
        assert!(gate.interrupt());
        assert!(gate.interrupt());

        thread::sleep(Duration::from_millis(20));
        assert!(gate.is_open());
        assert_eq!(gate.mode(), Some(FetchMode::Text));
        assert!(!handle.is_finished());

        assert!(gate.release());
        assert_eq!(handle.join().unwrap(), Ok(()));
    }

    #[test]
    fn test_gate_is_reusable_across_fetches() {
        let gate = Arc::new(InputGate::new());
        for _ in 0..3 {
            let handle = spawn_open(&gate, FetchMode::Text);
            assert!(poll_until(POLL_TIMEOUT, || gate.is_open()));
            assert!(gate.release());
            assert_eq!(handle.join().unwrap(), Ok(()));
        }
        // A stale release after the last fetch completed has no effect.
        assert!(!gate.release());
    }
}
