use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use crate::bot::telegram::{BotApi, CallbackQuery, Message, Update};
use crate::bot::wizard::{Input, Prompt, Step, Wizard, WizardState};
use crate::engine::{Engine, RenderParams};
use crate::foundation::error::QuoteResult;

pub const GREETING: &str = "Hello! I'm your Image Quote Bot.\n\n\
I can create beautiful gradient images with your text on them. Send /create to get started!";
pub const CANCELLED: &str = "Action cancelled. Send /create anytime to start over.";
pub const GENERATING: &str = "Generating your image, please wait a moment...";
pub const PHOTO_CAPTION: &str = "Here's your image!\n\nSend /create to make another one.";
pub const FAILURE_HEADER: &str = "Oops! Something went wrong.";

/// Where a prompt goes: a new message, or an edit of the message that carried the buttons.
#[derive(Clone, Copy, Debug)]
enum ReplyTo {
    NewMessage,
    Edit { message_id: i64 },
}

/// Routes updates to per-chat wizards and renders finished requests.
pub struct Dispatcher<A> {
    api: A,
    engine: Engine,
    sessions: HashMap<i64, Wizard>,
}

impl<A: BotApi> Dispatcher<A> {
    pub fn new(api: A, engine: Engine) -> Self {
        Self {
            api,
            engine,
            sessions: HashMap::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// State of the wizard running in `chat_id`, if any.
    pub fn session_state(&self, chat_id: i64) -> Option<WizardState> {
        self.sessions.get(&chat_id).map(Wizard::state)
    }

    pub fn handle_update(&mut self, update: &Update) -> QuoteResult<()> {
        if let Some(msg) = &update.message {
            return self.handle_message(msg);
        }
        if let Some(cb) = &update.callback_query {
            return self.handle_callback(cb);
        }
        tracing::debug!(update_id = update.update_id, "ignoring update kind");
        Ok(())
    }

    fn handle_message(&mut self, msg: &Message) -> QuoteResult<()> {
        let chat_id = msg.chat.id;
        let Some(text) = msg.text.as_deref() else {
            return Ok(());
        };

        if let Some(cmd) = command_name(text) {
            return match cmd {
                "start" => self.api.send_message(chat_id, GREETING, None),
                "create" => {
                    let (wizard, prompt) = Wizard::start();
                    self.sessions.insert(chat_id, wizard);
                    let user = msg.from.as_ref();
                    tracing::info!(
                        chat_id,
                        user_id = user.map(|u| u.id),
                        username = user.and_then(|u| u.username.as_deref()),
                        "started wizard"
                    );
                    self.reply(chat_id, ReplyTo::NewMessage, &prompt)
                }
                "cancel" => {
                    self.sessions.remove(&chat_id);
                    tracing::info!(chat_id, "cancelled wizard");
                    self.api.send_message(chat_id, CANCELLED, None)
                }
                other => {
                    tracing::debug!(chat_id, command = other, "ignoring unknown command");
                    Ok(())
                }
            };
        }

        self.feed(chat_id, Input::Text(text.to_owned()), ReplyTo::NewMessage)
    }

    fn handle_callback(&mut self, cb: &CallbackQuery) -> QuoteResult<()> {
        self.api.answer_callback_query(&cb.id)?;

        let (Some(data), Some(msg)) = (cb.data.as_deref(), cb.message.as_ref()) else {
            return Ok(());
        };
        let reply_to = ReplyTo::Edit {
            message_id: msg.message_id,
        };
        self.feed(msg.chat.id, Input::Choice(data.to_owned()), reply_to)
    }

    fn feed(&mut self, chat_id: i64, input: Input, reply_to: ReplyTo) -> QuoteResult<()> {
        let Some(wizard) = self.sessions.get_mut(&chat_id) else {
            tracing::debug!(chat_id, "input outside of a wizard");
            return Ok(());
        };

        match wizard.advance(input) {
            Step::Next(prompt) | Step::Retry(prompt) => self.reply(chat_id, reply_to, &prompt),
            Step::Finished(params) => {
                self.sessions.remove(&chat_id);
                let progress = Prompt {
                    text: GENERATING.to_owned(),
                    keyboard: None,
                };
                self.reply(chat_id, reply_to, &progress)?;
                self.deliver(chat_id, &params)
            }
        }
    }

    fn reply(&self, chat_id: i64, reply_to: ReplyTo, prompt: &Prompt) -> QuoteResult<()> {
        match reply_to {
            ReplyTo::NewMessage => {
                self.api
                    .send_message(chat_id, &prompt.text, prompt.keyboard.as_ref())
            }
            ReplyTo::Edit { message_id } => self.api.edit_message_text(
                chat_id,
                message_id,
                &prompt.text,
                prompt.keyboard.as_ref(),
            ),
        }
    }

    /// Render, send, and always remove the generated file.
    fn deliver(&self, chat_id: i64, params: &RenderParams) -> QuoteResult<()> {
        let path = match self.engine.create_image(params) {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!(chat_id, error = %e, "render failed");
                let text = format!("{FAILURE_HEADER}\n\nError: {e}");
                return self.api.send_message(chat_id, &text, None);
            }
        };

        let sent = self.api.send_photo(chat_id, &path, PHOTO_CAPTION);
        remove_generated(&path);
        if sent.is_ok() {
            tracing::info!(chat_id, "delivered image");
        }
        sent
    }
}

fn remove_generated(path: &Path) {
    if let Err(e) = std::fs::remove_file(path) {
        tracing::warn!(path = %path.display(), error = %e, "could not remove generated image");
    }
}

/// `"/create@my_bot extra"` -> `Some("create")`.
pub fn command_name(text: &str) -> Option<&str> {
    let first = text.trim_start().split_whitespace().next()?;
    let cmd = first.strip_prefix('/')?;
    let cmd = cmd.split('@').next().unwrap_or(cmd);
    (!cmd.is_empty()).then_some(cmd)
}

/// Long-polling settings.
#[derive(Clone, Copy, Debug)]
pub struct PollOpts {
    pub timeout: Duration,
    pub retry_delay: Duration,
}

impl Default for PollOpts {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            retry_delay: Duration::from_secs(3),
        }
    }
}

/// Poll for updates and dispatch them in order until `should_stop` returns true.
///
/// Failures of a single update or poll are logged and do not end the loop.
pub fn run_polling<A: BotApi>(
    dispatcher: &mut Dispatcher<A>,
    opts: PollOpts,
    mut should_stop: impl FnMut() -> bool,
) {
    let mut offset = 0i64;
    tracing::info!("bot is running");

    while !should_stop() {
        let updates = match dispatcher.api().get_updates(offset, opts.timeout) {
            Ok(updates) => updates,
            Err(e) => {
                tracing::warn!(error = %e, "polling failed");
                std::thread::sleep(opts.retry_delay);
                continue;
            }
        };

        for update in &updates {
            offset = offset.max(update.update_id + 1);
            if let Err(e) = dispatcher.handle_update(update) {
                tracing::warn!(update_id = update.update_id, error = %e, "update failed");
            }
        }
    }
    tracing::info!("bot stopped");
}

#[cfg(test)]
#[path = "../../tests/unit/bot/dispatch.rs"]
mod tests;
