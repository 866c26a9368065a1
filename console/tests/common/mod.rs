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

//! Shared setup for the integration tests. The test thread plays the program thread and
//! a feeder thread plays the display's event thread.

#![allow(dead_code)]

use std::{sync::Arc, thread};

use r3bl_console::{Console, ConsoleConfig, OutputDisplay};
use r3bl_test_fixtures::{OutputMock, POLL_TIMEOUT, poll_until};

#[derive(Debug)]
pub struct Harness {
    pub output_mock: OutputMock,
    pub display: Arc<OutputDisplay>,
    pub console: Arc<Console>,
}

pub fn setup() -> Harness { setup_with_config(ConsoleConfig::default()) }

pub fn setup_with_config(config: ConsoleConfig) -> Harness {
    let output_mock = OutputMock::new();
    let display = Arc::new(OutputDisplay::from_writer(output_mock.clone()));
    let console = Console::with_config(display.clone(), config);
    Harness {
        output_mock,
        display,
        console,
    }
}

/// Submit each of `inputs` as soon as a text fetch is waiting for it.
pub fn spawn_text_feeder(harness: &Harness, inputs: &[&str]) -> thread::JoinHandle<()> {
    let console = harness.console.clone();
    let display = harness.display.clone();
    let inputs: Vec<String> = inputs.iter().map(ToString::to_string).collect();

    thread::spawn(move || {
        for input in inputs {
            assert!(
                poll_until(POLL_TIMEOUT, || console.is_waiting_for_input()
                    && !console.is_awaiting_interaction()),
                "nobody fetched {input:?}"
            );
            display.submit_text(input);
        }
    })
}
