use crate::api;
use crate::config::Config;
use crate::constants::{NEW_CHAT_GREETING, WELCOME_GREETING};
use crate::models::{Message, Sender};
use crate::typing_indicator::TypingIndicator;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::time::sleep;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Chat,
    QuitConfirm,
    Quit,
}

/// Events delivered back to the UI loop by spawned tasks. Only the loop
/// mutates the transcript; tasks just send these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    BotReply(String),
    Greeting(String),
}

/// The chat session controller: owns the transcript, the input buffer, the
/// typing indicator, and the sending half of the event channel.
pub struct App {
    pub state: AppState,
    pub messages: Vec<Message>,
    pub input: String,
    pub scroll: u16,
    pub typing: TypingIndicator,
    events_tx: UnboundedSender<AppEvent>,
    backend_url: String,
    reply_delay_base_ms: u64,
    reply_delay_jitter_ms: u64,
    welcome_delay_ms: u64,
    new_chat_delay_ms: u64,
}

impl App {
    pub fn new(config: &Config) -> (App, UnboundedReceiver<AppEvent>) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        let app = App {
            state: AppState::Chat,
            messages: Vec::new(),
            input: String::new(),
            scroll: 0,
            typing: TypingIndicator::new(),
            events_tx,
            backend_url: config.backend_url.clone(),
            reply_delay_base_ms: config.reply_delay_base_ms,
            reply_delay_jitter_ms: config.reply_delay_jitter_ms,
            welcome_delay_ms: config.welcome_delay_ms,
            new_chat_delay_ms: config.new_chat_delay_ms,
        };

        (app, events_rx)
    }

    /// One user turn: echo the trimmed input, show the typing indicator, and
    /// spawn a gateway task for the reply. Empty-after-trim input is a no-op.
    ///
    /// There is deliberately no guard against overlapping turns: submitting
    /// again before a reply resolves produces a second in-flight request, and
    /// replies land in resolution order, not submission order.
    pub fn submit(&mut self) {
        let text = self.input.trim().to_string();
        self.input.clear();
        if text.is_empty() {
            return;
        }

        self.push_message(Message::user(text.clone()));
        self.typing.show();

        let tx = self.events_tx.clone();
        let backend_url = self.backend_url.clone();
        let delay_base_ms = self.reply_delay_base_ms;
        let delay_jitter_ms = self.reply_delay_jitter_ms;
        tokio::spawn(async move {
            let reply =
                api::resolve_reply(&backend_url, &text, delay_base_ms, delay_jitter_ms).await;
            // The receiver only drops on shutdown.
            let _ = tx.send(AppEvent::BotReply(reply));
        });
    }

    /// Discards the whole transcript and schedules the new-chat greeting
    /// after a short pacing delay.
    pub fn reset(&mut self) {
        self.messages.clear();
        self.typing.clear();
        self.scroll = 0;

        self.schedule_greeting(NEW_CHAT_GREETING, self.new_chat_delay_ms);
    }

    /// Called once at startup.
    pub fn schedule_welcome(&self) {
        self.schedule_greeting(WELCOME_GREETING, self.welcome_delay_ms);
    }

    fn schedule_greeting(&self, greeting: &'static str, delay_ms: u64) {
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            sleep(Duration::from_millis(delay_ms)).await;
            let _ = tx.send(AppEvent::Greeting(greeting.to_string()));
        });
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::BotReply(text) | AppEvent::Greeting(text) => {
                self.push_message(Message::bot(text));
            }
        }
    }

    /// Appends to the transcript and sticks the view to the newest entry.
    /// Any bot append clears the typing indicator first, so the indicator and
    /// a reply are never simultaneously visible.
    fn push_message(&mut self, message: Message) {
        if message.sender == Sender::Bot {
            self.typing.clear();
        }
        self.messages.push(message);
        self.scroll = u16::MAX; // clamped to the bottom by the view
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }
}
