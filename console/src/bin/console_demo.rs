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

//! Run this with `cargo run --bin console_demo -- --speed 20 --log-file console_demo.log`
//! and answer the questions. Press `Ctrl+C` or `Ctrl+D` to quit at any time.
//!
//! When `stdin` is not a terminal, lines are read from it instead, eg:
//! `printf 'Ada\nb\n36\n1.7\n7\n3.14\nA\n12345\ny\n42\n\n' | cargo run --bin console_demo`.

use std::{io::{self, BufRead as _},
          sync::{Arc, Weak},
          thread,
          time::Duration};

use clap::Parser;
use crossterm::{event::KeyCode, terminal};
use r3bl_console::{Console, ConsoleConfig, DisplaySpeed, OutputDisplay, RetryMessages,
                   TerminalDisplay, TracingConfig, WriterConfig,
                   try_initialize_logging_global};
use tracing_core::LevelFilter;

const STDIN_FEEDER_POLL_INTERVAL: Duration = Duration::from_millis(10);

fn main() -> miette::Result<()> {
    let cli_args = clap_config::CLIArgs::parse();

    if let Some(log_file) = &cli_args.log_file {
        try_initialize_logging_global(TracingConfig {
            level_filter: LevelFilter::from_level(cli_args.log_level),
            writer_config: WriterConfig::File(log_file.clone()),
        })?;
    }
    tracing::info!(?cli_args, "console demo started");

    let config = ConsoleConfig::from(DisplaySpeed::from(cli_args.speed));

    match TerminalDisplay::try_start()? {
        Some(terminal_display) => {
            let console = Console::with_config(Arc::new(terminal_display), config);
            spawn_shutdown_listener(&console);
            run_questionnaire(&console)?;
        }
        None => {
            let display = Arc::new(OutputDisplay::new_stdout());
            let console = Console::with_config(display.clone(), config);
            spawn_shutdown_listener(&console);
            spawn_stdin_feeder(display, Arc::downgrade(&console));
            run_questionnaire(&console)?;
        }
    }

    tracing::info!("console demo finished");
    Ok(())
}

fn run_questionnaire(console: &Console) -> miette::Result<()> {
    console.println("Hello! Press Ctrl+C or Ctrl+D to quit at any time.");

    console.print("What is your name? ");
    let name = console.get_string();

    console.print("Pick a letter from a to e: ");
    let letter = console.get_char_in_range('a', 'e', "That's not a letter from a to e, try again:");

    console.print("How old are you? ");
    let age = console.get_int_in_range_with_messages(
        1,
        130,
        &RetryMessages::distinct("Please type a whole number:", "Please pick an age from 1 to 130:"),
    );

    console.print("How tall are you, in meters? ");
    let height = console.get_double_in_range(0.3, 3.0, "Please type a height from 0.3 to 3.0:");

    console.print("What is your favorite whole number? ");
    let favorite_int = console.get_int("Please type a whole number:");

    console.print("What is your favorite number (any kind)? ");
    let favorite_double = console.get_double("Please type a number:");

    console.print("Type a single character: ");
    let initial = console.get_char("Just one character please:");

    console.print("What is your zip code? ");
    let zip_code = console.get_string_matching(r"\d{5}", "A zip code has 5 digits:")?;

    console.print("Do you like Rust? ");
    let likes_rust = console.get_boolean("Please answer yes or no:");

    console.print("And your lucky number? ");
    let lucky_number = match console.try_get_int() {
        Ok(it) => it.to_string(),
        Err(error) => {
            console.println(format!("{error}, never mind."));
            "a secret".to_owned()
        }
    };

    console.wait_for_any_key();

    console.println(format!(
        "{name} ({age}, {height}m) picked {letter} and {initial}, likes {favorite_int} and \
         {favorite_double}, lives in {zip_code}, lucky number is {lucky_number}."
    ));
    console.println(if likes_rust { "Rust likes you too 🦀" } else { "Maybe next time 🦀" });
    console.println(format!("Your answers, newest first: {:?}", console.history_snapshot()));

    Ok(())
}

/// Closing the display only broadcasts. Restoring the terminal and exiting is up to us.
fn spawn_shutdown_listener(console: &Console) {
    let mut shutdown_receiver = console.subscribe_to_shutdown();
    thread::spawn(move || {
        if shutdown_receiver.blocking_recv().is_ok() {
            tracing::info!("display closed, exiting");
            if let Err(error) = terminal::disable_raw_mode() {
                tracing::error!(%error, "could not disable raw mode");
            }
            println!("\nGoodbye 👋");
            std::process::exit(0);
        }
    });
}

/// Plays the event thread when `stdin` is piped: each line is either submitted as text,
/// or counts as a key press when the console is waiting for one.
fn spawn_stdin_feeder(display: Arc<OutputDisplay>, weak_console: Weak<Console>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            let Some(console) = weak_console.upgrade() else {
                return;
            };
            while !console.is_waiting_for_input() {
                thread::sleep(STDIN_FEEDER_POLL_INTERVAL);
            }
            println!("{line}");
            if console.is_awaiting_interaction() {
                display.press_key(KeyCode::Enter);
            } else {
                display.submit_text(line);
            }
        }
        display.close();
    });
}

mod clap_config {
    use clap::Parser;

    /// More info: <https://docs.rs/clap/latest/clap/_derive/_tutorial/chapter_2/index.html>
    #[derive(Debug, Parser)]
    #[command(bin_name = "console_demo")]
    #[command(about = "Answer a few questions, one typed value at a time 💬")]
    #[command(version)]
    #[command(next_line_help = true)]
    #[command(arg_required_else_help(false))]
    pub struct CLIArgs {
        #[arg(
            long,
            short = 's',
            default_value_t = 0,
            allow_negative_numbers = true,
            help = "Milliseconds between printed characters. 0 (or less) prints at once."
        )]
        pub speed: i64,

        #[arg(
            long,
            short = 'l',
            default_value_t = tracing::Level::DEBUG,
            help = "One of: trace, debug, info, warn, error."
        )]
        pub log_level: tracing::Level,

        #[arg(long, short = 'f', help = "Log to this file. Nothing is logged if omitted.")]
        pub log_file: Option<String>,
    }
}
