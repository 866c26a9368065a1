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

use std::{fmt::Display,
          io,
          sync::{Arc, Weak,
                 atomic::{AtomicU64, Ordering}}};

use crossterm::event::KeyCode;
use tokio::sync::broadcast;

use crate::{AnimatedWriter, BooleanTokens, ConsoleConfig, ConsoleError, DisplaySpeed,
            DisplaySurface, FetchMode, InputGate, InputHistory, LockRecover as _,
            RetryMessages, SHUTDOWN_CHANNEL_CAPACITY, SafeHistory, StdMutex,
            check_full_match, compile_full_match, parse_boolean, parse_char,
            parse_char_in_range, parse_number, parse_number_in_range};

/// Whether submitted text is currently consumed or dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum InputState {
    Rejecting,
    Accepting,
}

/// Blocking, typed input on top of an event driven [`DisplaySurface`].
///
/// # Threads
///
/// - The *program thread* calls the getters ([`Console::fetch_string()`],
///   [`Console::get_int_in_range()`], etc). They block until valid input arrives.
/// - The *event thread* is owned by the display. It calls the handlers that the console
///   registered in [`Console::with_config()`], which forward to
///   [`Console::receive_input()`] and [`Console::on_key()`].
///
/// Never call a getter from the event thread. It would wait for an event that can only
/// be delivered by the thread it is blocking.
///
/// # Lifecycle
///
/// The console is handed out as an `Arc<Console>`. The handlers registered with the
/// display only hold a [`Weak`] reference, so dropping the last `Arc` drops the console
/// even though the display outlives it. Closing the display broadcasts on the channel
/// returned by [`Console::subscribe_to_shutdown()`]. The process is never exited from
/// here.
pub struct Console {
    pub display: Arc<dyn DisplaySurface>,
    pub config: ConsoleConfig,
    gate: InputGate,
    safe_history: SafeHistory,
    display_speed_ms: AtomicU64,
    writer: AnimatedWriter,
    /// Serializes fetches from multiple program threads.
    fetch_lock: StdMutex<()>,
    shutdown_sender: broadcast::Sender<()>,
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console")
            .field("input_state", &self.input_state())
            .field("fetch_mode", &self.gate.mode())
            .field("display_speed", &self.display_speed())
            .field("history_len", &self.safe_history.lock_recover().len())
            .finish_non_exhaustive()
    }
}

impl Console {
    #[must_use]
    pub fn new(display: Arc<dyn DisplaySurface>) -> Arc<Self> {
        Self::with_config(display, ConsoleConfig::default())
    }

    /// Create the console and register its handlers with `display`. The display is told
    /// to reject input until the first fetch.
    #[must_use]
    pub fn with_config(display: Arc<dyn DisplaySurface>, config: ConsoleConfig) -> Arc<Self> {
        let (shutdown_sender, _) = broadcast::channel(SHUTDOWN_CHANNEL_CAPACITY);

        let console = Arc::new(Self {
            safe_history: Arc::new(StdMutex::new(InputHistory::with_capacity(
                config.history_capacity,
            ))),
            display_speed_ms: AtomicU64::new(config.display_speed.as_millis()),
            display,
            config,
            gate: InputGate::new(),
            writer: AnimatedWriter::new(),
            fetch_lock: StdMutex::new(()),
            shutdown_sender,
        });

        console.display.set_accepting_input(false);
        register_handlers(&console);

        tracing::debug!(console = ?console, "console created");
        console
    }

    // Fetch.

    /// Block until the user submits a line of text and return it. This is the newest
    /// entry in the input history once the fetch completes.
    pub fn fetch_string(&self) -> String { self.fetch(FetchMode::Text).unwrap_or_default() }

    /// Same as [`Console::fetch_string()`].
    pub fn get_string(&self) -> String { self.fetch_string() }

    /// Returns the newest history entry for a [`FetchMode::Text`] fetch. It is read
    /// before the fetch lock is released, so another fetch can't push in between.
    ///
    /// The display only accepts typing in [`FetchMode::Text`]. A key that ends an
    /// [`FetchMode::AnyKey`] wait is not echoed.
    fn fetch(&self, mode: FetchMode) -> Option<String> {
        let _fetch_guard = self.fetch_lock.lock_recover();

        let accepts_text = mode == FetchMode::Text;
        let result = self
            .gate
            .open(mode, || self.display.set_accepting_input(accepts_text));
        self.display.set_accepting_input(false);

        match result {
            Ok(()) if accepts_text => self.latest_input(),
            Ok(()) => None,
            Err(error) => {
                tracing::error!(%error, %mode, "fetch ended without input");
                None
            }
        }
    }

    /// Keep fetching until `validate` accepts the text. Each rejection prints the message
    /// that `messages` picks for the error.
    fn fetch_until_valid<T>(
        &self,
        messages: &RetryMessages,
        validate: impl Fn(&str) -> Result<T, ConsoleError>,
    ) -> T {
        loop {
            let input = self.fetch_string();
            match validate(&input) {
                Ok(it) => return it,
                Err(error) => {
                    tracing::debug!(%error, "input rejected, asking again");
                    self.println(messages.message_for(&error));
                }
            }
        }
    }

    // Typed getters.

    pub fn get_char(&self, error: &str) -> char {
        self.fetch_until_valid(&RetryMessages::same(error), parse_char)
    }

    pub fn get_char_in_range(&self, min: char, max: char, error: &str) -> char {
        self.fetch_until_valid(&RetryMessages::same(error), |input| {
            parse_char_in_range(input, min, max)
        })
    }

    pub fn get_int(&self, error: &str) -> i32 {
        self.fetch_until_valid(&RetryMessages::same(error), parse_number::<i32>)
    }

    pub fn get_int_in_range(&self, min: i32, max: i32, error: &str) -> i32 {
        self.get_int_in_range_with_messages(min, max, &RetryMessages::same(error))
    }

    pub fn get_int_in_range_with_messages(
        &self,
        min: i32,
        max: i32,
        messages: &RetryMessages,
    ) -> i32 {
        self.fetch_until_valid(messages, |input| parse_number_in_range(input, min, max))
    }

    pub fn get_double(&self, error: &str) -> f64 {
        self.fetch_until_valid(&RetryMessages::same(error), parse_number::<f64>)
    }

    pub fn get_double_in_range(&self, min: f64, max: f64, error: &str) -> f64 {
        self.get_double_in_range_with_messages(min, max, &RetryMessages::same(error))
    }

    pub fn get_double_in_range_with_messages(
        &self,
        min: f64,
        max: f64,
        messages: &RetryMessages,
    ) -> f64 {
        self.fetch_until_valid(messages, |input| parse_number_in_range(input, min, max))
    }

    /// Fetch once, without retrying.
    ///
    /// # Errors
    ///
    /// [`ConsoleError::Format`] if the text is not a whole number.
    pub fn try_get_int(&self) -> Result<i32, ConsoleError> {
        parse_number(&self.fetch_string())
    }

    /// Fetch once, without retrying.
    ///
    /// # Errors
    ///
    /// [`ConsoleError::Format`] if the text is not a number.
    pub fn try_get_double(&self) -> Result<f64, ConsoleError> {
        parse_number(&self.fetch_string())
    }

    /// Keep fetching until the *whole* text matches `pattern`.
    ///
    /// # Errors
    ///
    /// [`ConsoleError::InvalidPattern`] if `pattern` doesn't compile. This is checked
    /// before anything is fetched.
    pub fn get_string_matching(
        &self,
        pattern: &str,
        error: &str,
    ) -> Result<String, ConsoleError> {
        let regex = compile_full_match(pattern)?;
        Ok(self.fetch_until_valid(&RetryMessages::same(error), |input| {
            check_full_match(input, &regex)
        }))
    }

    /// Uses the tokens from [`ConsoleConfig::boolean_tokens`].
    pub fn get_boolean(&self, error: &str) -> bool {
        self.get_boolean_with(&self.config.boolean_tokens, error)
    }

    pub fn get_boolean_with(&self, tokens: &BooleanTokens, error: &str) -> bool {
        self.fetch_until_valid(&RetryMessages::same(error), |input| {
            parse_boolean(input, tokens)
        })
    }

    // Interaction.

    /// Print `prompt` (if any) on its own line and block until a single key is pressed.
    /// Submitted text is ignored while waiting and the input history is not touched.
    /// Anything left in the display's line buffer is cleared afterwards.
    pub fn wait_for_interaction(&self, prompt: Option<&str>) {
        if let Some(prompt) = prompt {
            self.println(prompt);
        }
        self.fetch(FetchMode::AnyKey);
        self.display.clear_input();
    }

    /// [`Console::wait_for_interaction()`] with [`ConsoleConfig::interaction_prompt`].
    pub fn wait_for_any_key(&self) {
        self.wait_for_interaction(Some(&self.config.interaction_prompt));
    }

    // Event side.

    /// Consume `text` if a text fetch is waiting: push it into the history and wake the
    /// fetch. Otherwise the text is dropped. Returns whether it was consumed.
    pub fn receive_input(&self, text: impl Into<String>) -> bool {
        let text = text.into();
        let consumed = self.gate.release_if(FetchMode::Text, || {
            self.safe_history.lock_recover().push(text.as_str());
        });
        if consumed {
            tracing::debug!(%text, "input accepted");
        } else {
            tracing::debug!(%text, state = %self.input_state(), "input dropped");
        }
        consumed
    }

    /// Wake [`Console::wait_for_interaction()`] if it is waiting. Returns whether the key
    /// was consumed.
    pub fn on_key(&self, key_code: KeyCode) -> bool {
        let consumed = self.gate.release_if(FetchMode::AnyKey, || {});
        if consumed {
            tracing::debug!(?key_code, "interaction key accepted");
        }
        consumed
    }

    // Output.

    /// Print at the current [`Console::display_speed()`]. Display errors are logged, not
    /// returned.
    pub fn print(&self, value: impl Display) {
        let text = value.to_string();
        report_output_error(self.write_animated(&text));
    }

    pub fn println(&self, value: impl Display) {
        let text = value.to_string();
        let speed = self.display_speed();
        let result = if speed.is_atomic() {
            self.display.println(&text)
        } else {
            self.write_animated(&text)
                .and_then(|()| self.display.println(""))
        };
        report_output_error(result);
    }

    fn write_animated(&self, text: &str) -> io::Result<()> {
        self.writer
            .write(self.display.as_ref(), text, self.display_speed())
            .map(|_| ())
    }

    // Configuration.

    /// Milliseconds between printed characters. Negative values are treated as `0`,
    /// which prints each text at once.
    pub fn set_display_speed(&self, millis: i64) {
        let speed = DisplaySpeed::from(millis);
        self.display_speed_ms
            .store(speed.as_millis(), Ordering::SeqCst);
        tracing::debug!(%speed, "display speed changed");
    }

    #[must_use]
    pub fn display_speed(&self) -> DisplaySpeed {
        DisplaySpeed::from_millis(self.display_speed_ms.load(Ordering::SeqCst))
    }

    // Queries.

    /// A fetch (of any kind) is blocked waiting for an event.
    #[must_use]
    pub fn is_waiting_for_input(&self) -> bool { self.gate.is_open() }

    /// [`Console::wait_for_interaction()`] is blocked waiting for a key.
    #[must_use]
    pub fn is_awaiting_interaction(&self) -> bool {
        self.gate.mode() == Some(FetchMode::AnyKey)
    }

    #[must_use]
    pub fn input_state(&self) -> InputState {
        if self.gate.is_open() {
            InputState::Accepting
        } else {
            InputState::Rejecting
        }
    }

    #[must_use]
    pub fn latest_input(&self) -> Option<String> {
        self.safe_history.lock_recover().latest().map(str::to_owned)
    }

    /// Newest first.
    #[must_use]
    pub fn history_snapshot(&self) -> Vec<String> {
        self.safe_history.lock_recover().iter().cloned().collect()
    }

    // Interruption.

    /// Wake a blocked fetch early. It keeps waiting for input, so this only shows up in
    /// the logs. Returns `false` if nothing was waiting.
    pub fn interrupt_fetch(&self) -> bool { self.gate.interrupt() }

    /// Skip the remaining per character delays of the text being printed.
    pub fn interrupt_output(&self) { self.writer.interrupt(); }

    // Shutdown.

    #[must_use]
    pub fn subscribe_to_shutdown(&self) -> broadcast::Receiver<()> {
        self.shutdown_sender.subscribe()
    }

    /// Broadcast the shutdown signal. This also happens when the display is closed.
    pub fn close(&self) {
        match self.shutdown_sender.send(()) {
            Ok(receiver_count) => tracing::debug!(receiver_count, "shutdown broadcast"),
            Err(_) => tracing::debug!("shutdown broadcast, but nobody is subscribed"),
        }
    }
}

fn register_handlers(console: &Arc<Console>) {
    let weak_console: Weak<Console> = Arc::downgrade(console);

    console.display.on_text_submitted(Box::new({
        let weak_console = weak_console.clone();
        move |text| {
            if let Some(console) = weak_console.upgrade() {
                console.receive_input(text);
            }
        }
    }));

    console.display.on_key_pressed(Box::new({
        let weak_console = weak_console.clone();
        move |key_code| {
            if let Some(console) = weak_console.upgrade() {
                console.on_key(key_code);
            }
        }
    }));

    console.display.on_closed(Box::new(move || {
        if let Some(console) = weak_console.upgrade() {
            console.close();
        }
    }));
}

fn report_output_error(result: io::Result<()>) {
    if let Err(error) = result {
        tracing::error!(%error, "could not write to the display");
    }
}
