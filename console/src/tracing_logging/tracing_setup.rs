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

use miette::IntoDiagnostic as _;
use tracing::dispatcher;
use tracing_core::LevelFilter;
use tracing_subscriber::{Layer, Registry, layer::SubscriberExt as _,
                         util::SubscriberInitExt as _};

use crate::{DisplayPreference, TracingConfig, WriterConfig, rolling_file_appender_impl};

pub type DynLayer<S> = dyn Layer<S> + Send + Sync + 'static;

/// Avoid gnarly type annotations by using a macro to create the `fmt` layer.
#[macro_export]
macro_rules! create_fmt {
    () => {
        tracing_subscriber::fmt::layer()
            .compact()
            .without_time()
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
    };
}

/// Install a global default subscriber. This can only be done once per process, so it
/// is meant for apps, not tests.
///
/// Logging is **disabled** if the level filter is [`LevelFilter::OFF`] or the writer
/// config is [`WriterConfig::None`].
///
/// # Errors
///
/// If the log file can't be created, or a global subscriber is already installed.
pub fn try_initialize_logging_global(options: impl Into<TracingConfig>) -> miette::Result<()> {
    let Some(layers) = try_create_layers(options)? else {
        return Ok(());
    };
    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .into_diagnostic()
}

/// Install a subscriber for the current thread only, until the returned guard is
/// dropped. Handy in tests.
///
/// # Errors
///
/// If the log file can't be created.
pub fn try_initialize_logging_thread_local(
    options: impl Into<TracingConfig>,
) -> miette::Result<Option<dispatcher::DefaultGuard>> {
    let Some(layers) = try_create_layers(options)? else {
        return Ok(None);
    };
    Ok(Some(tracing_subscriber::registry().with(layers).set_default()))
}

/// Returns the layers without installing them, or `None` if logging is disabled.
///
/// # Errors
///
/// If the log file can't be created.
pub fn try_create_layers(
    options: impl Into<TracingConfig>,
) -> miette::Result<Option<Vec<Box<DynLayer<Registry>>>>> {
    let tracing_config: TracingConfig = options.into();
    let level_filter = tracing_config.get_level_filter();

    if level_filter == LevelFilter::OFF {
        return Ok(None);
    }

    let (maybe_display, maybe_file_path) = match tracing_config.writer_config {
        WriterConfig::None => return Ok(None),
        WriterConfig::Display(preferred_display) => (Some(preferred_display), None),
        WriterConfig::File(file_path) => (None, Some(file_path)),
        WriterConfig::DisplayAndFile(preferred_display, file_path) => {
            (Some(preferred_display), Some(file_path))
        }
    };

    let mut layers: Vec<Box<DynLayer<Registry>>> = vec![Box::new(level_filter)];

    if let Some(preferred_display) = maybe_display {
        layers.push(create_display_layer(level_filter, preferred_display));
    }

    if let Some(file_path) = maybe_file_path {
        let file = rolling_file_appender_impl::try_create(&file_path)?;
        layers.push(Box::new(
            create_fmt!()
                .with_ansi(false)
                .with_writer(file)
                .with_filter(level_filter),
        ));
    }

    Ok(Some(layers))
}

fn create_display_layer(
    level_filter: LevelFilter,
    preferred_display: DisplayPreference,
) -> Box<DynLayer<Registry>> {
    match preferred_display {
        DisplayPreference::Stdout => Box::new(
            create_fmt!()
                .with_writer(std::io::stdout)
                .with_filter(level_filter),
        ),
        DisplayPreference::Stderr => Box::new(
            create_fmt!()
                .with_writer(std::io::stderr)
                .with_filter(level_filter),
        ),
    }
}
