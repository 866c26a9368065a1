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

//! Test fixtures for the `r3bl_console` crate.
//!
//! - [`OutputMock`] is a cloneable [`std::io::Write`] sink that records every write as a
//!   separate [`WriteChunk`], along with the [`std::time::Instant`] it arrived at. This
//!   lets tests assert on both *what* was printed and *how it was paced* (eg: the
//!   per-character delay of an animated write).
//! - [`poll_until`] is used to choreograph a test that plays the role of the event thread
//!   against a program thread that is blocked inside a fetch.

// Attach sources.
pub mod output_device_fixtures;
pub mod poll_fixtures;

// Re-export.
pub use output_device_fixtures::*;
pub use poll_fixtures::*;
