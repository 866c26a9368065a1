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

mod common;

use std::{thread, time::Duration};

use common::{setup, setup_with_config};
use pretty_assertions::assert_eq;
use r3bl_console::{ConsoleConfig, DisplaySpeed};
use r3bl_test_fixtures::{POLL_TIMEOUT, poll_until};

#[test]
fn test_atomic_println_is_one_write() {
    let harness = setup();

    harness.console.println("hello");
    harness.console.print(42);

    assert_eq!(harness.output_mock.get_chunks_as_strings(), vec!["hello\n", "42"]);
}

#[test]
fn test_negative_display_speed_reads_back_as_zero() {
    let harness = setup();

    harness.console.set_display_speed(-5);

    assert_eq!(harness.console.display_speed().as_millis(), 0);
}

#[test]
fn test_animated_print_paces_each_character() {
    let harness = setup();
    harness.console.set_display_speed(50);

    harness.console.print("hi");

    assert_eq!(harness.output_mock.get_chunks_as_strings(), vec!["h", "i"]);
    let elapsed = harness
        .output_mock
        .get_elapsed_between_first_and_last_chunk()
        .unwrap();
    assert!(elapsed >= Duration::from_millis(50), "{elapsed:?}");
}

#[test]
fn test_animated_println_ends_with_line_break() {
    let harness = setup_with_config(ConsoleConfig::from(DisplaySpeed::from_millis(1)));

    harness.console.println("ok");

    assert_eq!(harness.output_mock.get_chunks_as_strings(), vec!["o", "k", "\n"]);
}

#[test]
fn test_interrupted_output_is_still_complete() {
    let harness = setup();
    harness.console.set_display_speed(10_000);

    let interrupter = {
        let console = harness.console.clone();
        let output_mock = harness.output_mock.clone();
        thread::spawn(move || {
            assert!(poll_until(POLL_TIMEOUT, || !output_mock
                .get_copy_of_chunks()
                .is_empty()));
            console.interrupt_output();
        })
    };

    harness.console.print("hi");
    interrupter.join().unwrap();

    assert_eq!(harness.output_mock.get_copy_of_buffer_as_string(), "hi");
    assert_eq!(harness.output_mock.get_chunks_as_strings(), vec!["h", "i"]);
}
