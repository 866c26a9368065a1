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

use common::{setup, setup_with_config, spawn_text_feeder};
use pretty_assertions::assert_eq;
use r3bl_console::{BooleanTokens, ConsoleConfig, ConsoleError, RetryMessages};

#[test]
fn test_get_int_in_range_retries_until_valid() {
    let harness = setup();
    let feeder = spawn_text_feeder(&harness, &["abc", "20", "5"]);

    let value = harness.console.get_int_in_range(1, 10, "err");

    feeder.join().unwrap();
    assert_eq!(value, 5);
    assert_eq!(harness.output_mock.count_lines_equal_to("err"), 2);
}

#[test]
fn test_get_int_in_range_with_distinct_messages() {
    let harness = setup();
    let feeder = spawn_text_feeder(&harness, &["abc", "20", "5"]);

    let value = harness.console.get_int_in_range_with_messages(
        1,
        10,
        &RetryMessages::distinct("not a number", "out of range"),
    );

    feeder.join().unwrap();
    assert_eq!(value, 5);
    assert_eq!(
        harness.output_mock.get_copy_of_buffer_as_string(),
        "not a number\nout of range\n"
    );
}

#[test]
fn test_get_int_does_not_trim() {
    let harness = setup();
    let feeder = spawn_text_feeder(&harness, &[" 7", "7"]);

    let value = harness.console.get_int("err");

    feeder.join().unwrap();
    assert_eq!(value, 7);
    assert_eq!(harness.output_mock.count_lines_equal_to("err"), 1);
}

#[test]
fn test_get_double_in_range_trims() {
    let harness = setup();
    let feeder = spawn_text_feeder(&harness, &["x", " 2 ", " 0.25 "]);

    let value = harness.console.get_double_in_range(0.0, 1.0, "err");

    feeder.join().unwrap();
    assert_eq!(value, 0.25);
    assert_eq!(harness.output_mock.count_lines_equal_to("err"), 2);
}

#[test]
fn test_get_double() {
    let harness = setup();
    let feeder = spawn_text_feeder(&harness, &["three", "3.5"]);

    let value = harness.console.get_double("err");

    feeder.join().unwrap();
    assert_eq!(value, 3.5);
}

#[test]
fn test_get_boolean_is_case_insensitive() {
    let harness = setup();
    let feeder = spawn_text_feeder(&harness, &["maybe", "YES"]);

    let value = harness.console.get_boolean("err");

    feeder.join().unwrap();
    assert!(value);
    assert_eq!(harness.output_mock.count_lines_equal_to("err"), 1);
}

#[test]
fn test_get_boolean_with_custom_tokens() {
    let harness = setup();
    let feeder = spawn_text_feeder(&harness, &["yes", "Nein"]);

    let tokens = BooleanTokens::new(["ja"], ["nein"]);
    let value = harness.console.get_boolean_with(&tokens, "err");

    feeder.join().unwrap();
    assert!(!value);
    assert_eq!(harness.output_mock.count_lines_equal_to("err"), 1);
}

#[test]
fn test_get_boolean_uses_configured_tokens() {
    let harness = setup_with_config(ConsoleConfig {
        boolean_tokens: BooleanTokens::new(["oui"], ["non"]),
        ..Default::default()
    });
    let feeder = spawn_text_feeder(&harness, &["OUI"]);

    assert!(harness.console.get_boolean("err"));
    feeder.join().unwrap();
}

#[test]
fn test_get_char_and_char_in_range() {
    let harness = setup();
    let feeder = spawn_text_feeder(&harness, &["ab", "", "z", "z", "c"]);

    let any_char = harness.console.get_char("one char");
    let in_range = harness.console.get_char_in_range('a', 'e', "a to e");

    feeder.join().unwrap();
    assert_eq!(any_char, 'z');
    assert_eq!(in_range, 'c');
    assert_eq!(harness.output_mock.count_lines_equal_to("one char"), 2);
    assert_eq!(harness.output_mock.count_lines_equal_to("a to e"), 1);
}

#[test]
fn test_get_string_matching_requires_full_match() {
    let harness = setup();
    let feeder = spawn_text_feeder(&harness, &["12", "1234", "a123", "123"]);

    let value = harness.console.get_string_matching(r"\d{3}", "err").unwrap();

    feeder.join().unwrap();
    assert_eq!(value, "123");
    assert_eq!(harness.output_mock.count_lines_equal_to("err"), 3);
}

#[test]
fn test_try_get_int_does_not_retry() {
    let harness = setup();
    let feeder = spawn_text_feeder(&harness, &["abc", "2.5"]);

    let int_result = harness.console.try_get_int();
    let double_result = harness.console.try_get_double();

    feeder.join().unwrap();
    assert_eq!(
        int_result,
        Err(ConsoleError::Format {
            input: "abc".to_owned(),
            expected: "whole number",
        })
    );
    assert_eq!(double_result, Ok(2.5));
    assert_eq!(harness.output_mock.get_copy_of_buffer_as_string(), "");
}

#[test]
fn test_history_keeps_newest_sixteen() {
    let harness = setup();
    let inputs: Vec<String> = (0..20).map(|it| format!("input {it}")).collect();
    let input_refs: Vec<&str> = inputs.iter().map(String::as_str).collect();
    let feeder = spawn_text_feeder(&harness, &input_refs);

    for expected in &inputs {
        assert_eq!(&harness.console.fetch_string(), expected);
    }

    feeder.join().unwrap();
    let history = harness.console.history_snapshot();
    assert_eq!(history.len(), 16);
    assert_eq!(history.first().map(String::as_str), Some("input 19"));
    assert_eq!(history.last().map(String::as_str), Some("input 4"));
    assert_eq!(harness.console.latest_input(), Some("input 19".to_owned()));
}

#[test]
fn test_history_capacity_is_configurable() {
    let harness = setup_with_config(ConsoleConfig {
        history_capacity: 2,
        ..Default::default()
    });
    let feeder = spawn_text_feeder(&harness, &["a", "b", "c"]);

    for _ in 0..3 {
        harness.console.get_string();
    }

    feeder.join().unwrap();
    assert_eq!(harness.console.history_snapshot(), vec!["c", "b"]);
}
