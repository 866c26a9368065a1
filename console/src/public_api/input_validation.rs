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

//! Pure validation functions behind the typed getters on [`crate::Console`]. Each one
//! takes the raw fetched text and either produces the typed value or the
//! [`ConsoleError`] that explains why the text was rejected.

use std::{fmt::Display, str::FromStr};

use regex::Regex;

use crate::{BooleanTokens, ConsoleError};

/// The text must be exactly one `char` long.
///
/// # Errors
///
/// [`ConsoleError::Pattern`] for any other length.
pub fn parse_char(input: &str) -> Result<char, ConsoleError> {
    let mut chars = input.chars();
    match (chars.next(), chars.next()) {
        (Some(it), None) => Ok(it),
        _ => Err(ConsoleError::Pattern {
            input: input.to_owned(),
            expected: "a single character".to_owned(),
        }),
    }
}

/// # Errors
///
/// [`ConsoleError::Pattern`] for the wrong length, [`ConsoleError::Range`] when the
/// character is outside `min ..= max`.
pub fn parse_char_in_range(input: &str, min: char, max: char) -> Result<char, ConsoleError> {
    let it = parse_char(input)?;
    check_range(input, it, min, max)
}

/// Integers are parsed as is (no trimming). Floating point numbers have surrounding
/// whitespace trimmed first.
///
/// # Errors
///
/// [`ConsoleError::Format`] if the text doesn't parse.
pub fn parse_number<T>(input: &str) -> Result<T, ConsoleError>
where
    T: FromStr + NumberKind,
{
    let candidate = if T::TRIM_WHITESPACE { input.trim() } else { input };
    candidate.parse::<T>().map_err(|_| ConsoleError::Format {
        input: input.to_owned(),
        expected: T::EXPECTED,
    })
}

/// # Errors
///
/// [`ConsoleError::Format`] if the text doesn't parse, [`ConsoleError::Range`] if the
/// value is outside `min ..= max`.
pub fn parse_number_in_range<T>(input: &str, min: T, max: T) -> Result<T, ConsoleError>
where
    T: FromStr + NumberKind + PartialOrd + Display,
{
    let it = parse_number::<T>(input)?;
    check_range(input, it, min, max)
}

/// # Errors
///
/// [`ConsoleError::Range`] if `value` is outside `min ..= max`. `NaN` is never in range.
pub fn check_range<T>(input: &str, value: T, min: T, max: T) -> Result<T, ConsoleError>
where
    T: PartialOrd + Display,
{
    if min <= value && value <= max {
        Ok(value)
    } else {
        Err(ConsoleError::Range {
            input: input.to_owned(),
            min: min.to_string(),
            max: max.to_string(),
        })
    }
}

/// Case insensitive membership in the yes or no tokens. Yes tokens are checked first.
///
/// # Errors
///
/// [`ConsoleError::Pattern`] if the text is in neither set.
pub fn parse_boolean(input: &str, tokens: &BooleanTokens) -> Result<bool, ConsoleError> {
    let needle = input.to_lowercase();
    let is_member = |set: &[String]| set.iter().any(|token| token.to_lowercase() == needle);

    if is_member(&tokens.yes) {
        Ok(true)
    } else if is_member(&tokens.no) {
        Ok(false)
    } else {
        Err(ConsoleError::Pattern {
            input: input.to_owned(),
            expected: format!(
                "one of {} or {}",
                tokens.yes.join("/"),
                tokens.no.join("/")
            ),
        })
    }
}

/// Compile `pattern` so that it has to match the *whole* input, not just a part of it.
///
/// # Errors
///
/// [`ConsoleError::InvalidPattern`] if the pattern doesn't compile.
pub fn compile_full_match(pattern: &str) -> Result<Regex, ConsoleError> {
    Ok(Regex::new(&format!("^(?:{pattern})$"))?)
}

/// # Errors
///
/// [`ConsoleError::Pattern`] if the input doesn't match.
pub fn check_full_match(input: &str, regex: &Regex) -> Result<String, ConsoleError> {
    if regex.is_match(input) {
        Ok(input.to_owned())
    } else {
        Err(ConsoleError::Pattern {
            input: input.to_owned(),
            expected: format!("matching {}", regex.as_str()),
        })
    }
}

/// Per type parsing knobs for [`parse_number()`].
pub trait NumberKind {
    /// Used in [`ConsoleError::Format`].
    const EXPECTED: &'static str;
    const TRIM_WHITESPACE: bool;
}

impl NumberKind for i32 {
    const EXPECTED: &'static str = "whole number";
    const TRIM_WHITESPACE: bool = false;
}

impl NumberKind for f64 {
    const EXPECTED: &'static str = "number";
    const TRIM_WHITESPACE: bool = true;
}
