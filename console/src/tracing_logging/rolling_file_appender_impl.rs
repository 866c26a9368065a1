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

use std::path::PathBuf;

use miette::{IntoDiagnostic as _, miette};
use tracing_appender::rolling::{RollingFileAppender, Rotation};

/// Create a file appender that never rotates, writing to `path_str`.
///
/// Note that wrapping this in a non blocking writer doesn't work with the blocking
/// program thread model of this crate, since the worker guard would have to be kept
/// alive by the caller:
///
/// ```ignore
/// tracing_appender::non_blocking(try_create("foo.log")?);
/// ```
///
/// # Errors
///
/// If `path_str` has no file name, its parent folder can't be determined, or the file
/// can't be created.
pub fn try_create(path_str: &str) -> miette::Result<RollingFileAppender> {
    let path = PathBuf::from(path_str);

    let file_name = path.file_name().ok_or_else(|| {
        miette!(
            "Can't access file name {}. It might not exist, or you don't have the required permissions.",
            path.display()
        )
    })?;

    let parent = match path.parent() {
        Some(it) if !it.as_os_str().is_empty() => it.to_path_buf(),
        Some(_) => PathBuf::from("."),
        None => {
            return Err(miette!(
                "Can't access the folder for {}. It might not exist, or you don't have the required permissions.",
                path.display()
            ));
        }
    };

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy().into_owned())
        .build(parent)
        .into_diagnostic()
}
