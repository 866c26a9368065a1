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

use std::{fmt::Debug, sync::Arc};

use crossterm::event::KeyCode;

use crate::{ClosedHandler, KeyPressedHandler, LockRecover as _, StdMutex,
            TextSubmittedHandler};

type SharedHandler<A> = Arc<dyn Fn(A) + Send + Sync>;

/// Registry of the handlers attached to a [`crate::DisplaySurface`]. Dispatching takes a
/// snapshot of the handlers and invokes them *after* releasing the lock, so a handler
/// may safely register more handlers or trigger output.
#[derive(Default)]
pub struct EventHandlers {
    text_submitted: StdMutex<Vec<SharedHandler<String>>>,
    key_pressed: StdMutex<Vec<SharedHandler<KeyCode>>>,
    closed: StdMutex<Vec<SharedHandler<()>>>,
}

impl Debug for EventHandlers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventHandlers")
            .field("text_submitted", &self.text_submitted.lock_recover().len())
            .field("key_pressed", &self.key_pressed.lock_recover().len())
            .field("closed", &self.closed.lock_recover().len())
            .finish()
    }
}

impl EventHandlers {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    pub fn add_text_submitted(&self, handler: TextSubmittedHandler) {
        self.text_submitted.lock_recover().push(Arc::from(handler));
    }

    pub fn add_key_pressed(&self, handler: KeyPressedHandler) {
        self.key_pressed.lock_recover().push(Arc::from(handler));
    }

    pub fn add_closed(&self, handler: ClosedHandler) {
        self.closed
            .lock_recover()
            .push(Arc::new(move |()| handler()));
    }

    /// Returns how many handlers were invoked.
    pub fn dispatch_text_submitted(&self, text: &str) -> usize {
        dispatch(&self.text_submitted, || text.to_owned())
    }

    /// Returns how many handlers were invoked.
    pub fn dispatch_key_pressed(&self, key_code: KeyCode) -> usize {
        dispatch(&self.key_pressed, || key_code)
    }

    /// Returns how many handlers were invoked.
    pub fn dispatch_closed(&self) -> usize { dispatch(&self.closed, || ()) }
}

fn dispatch<A>(handlers: &StdMutex<Vec<SharedHandler<A>>>, make_arg: impl Fn() -> A) -> usize {
    let snapshot = handlers.lock_recover().clone();
    for handler in &snapshot {
        handler(make_arg());
    }
    snapshot.len()
}
