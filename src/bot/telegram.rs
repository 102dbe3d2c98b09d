//! Minimal blocking client for the Telegram Bot API (long polling).

use std::path::Path;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::bot::wizard::Keyboard;
use crate::foundation::error::{QuoteError, QuoteResult};

pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(default)]
    pub callback_query: Option<CallbackQuery>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    #[serde(default)]
    pub from: Option<User>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Chat {
    pub id: i64,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct CallbackQuery {
    pub id: String,
    #[serde(default)]
    pub data: Option<String>,
    #[serde(default)]
    pub message: Option<Message>,
}

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    #[serde(default)]
    description: Option<String>,
}

impl<T> ApiResponse<T> {
    fn into_result(self, method: &str) -> QuoteResult<T> {
        match (self.ok, self.result) {
            (true, Some(v)) => Ok(v),
            (true, None) => Err(QuoteError::transport(format!("{method}: empty result"))),
            (false, _) => Err(QuoteError::transport(format!(
                "{method}: {}",
                self.description.as_deref().unwrap_or("request failed")
            ))),
        }
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct InlineKeyboardButton<'a> {
    text: &'a str,
    callback_data: &'a str,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct InlineKeyboardMarkup<'a> {
    inline_keyboard: Vec<Vec<InlineKeyboardButton<'a>>>,
}

impl<'a> From<&'a Keyboard> for InlineKeyboardMarkup<'a> {
    fn from(kb: &'a Keyboard) -> Self {
        let inline_keyboard = kb
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|label| InlineKeyboardButton {
                        text: label,
                        callback_data: label,
                    })
                    .collect()
            })
            .collect();
        Self { inline_keyboard }
    }
}

#[derive(Debug, Serialize)]
struct GetUpdates<'a> {
    offset: i64,
    timeout: u64,
    allowed_updates: &'a [&'a str],
}

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: i64,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_markup: Option<InlineKeyboardMarkup<'a>>,
}

#[derive(Debug, Serialize)]
struct EditMessageText<'a> {
    chat_id: i64,
    message_id: i64,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_markup: Option<InlineKeyboardMarkup<'a>>,
}

#[derive(Debug, Serialize)]
struct AnswerCallbackQuery<'a> {
    callback_query_id: &'a str,
}

/// The chat operations the dispatcher needs.
pub trait BotApi {
    /// Long-poll for updates with `update_id >= offset`.
    fn get_updates(&self, offset: i64, timeout: Duration) -> QuoteResult<Vec<Update>>;

    fn send_message(&self, chat_id: i64, text: &str, keyboard: Option<&Keyboard>)
    -> QuoteResult<()>;

    fn edit_message_text(
        &self,
        chat_id: i64,
        message_id: i64,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> QuoteResult<()>;

    fn answer_callback_query(&self, callback_query_id: &str) -> QuoteResult<()>;

    fn send_photo(&self, chat_id: i64, photo: &Path, caption: &str) -> QuoteResult<()>;
}

/// [`BotApi`] over HTTPS.
pub struct TelegramClient {
    http: reqwest::blocking::Client,
    base: String,
}

impl TelegramClient {
    pub fn new(token: &str, api_base: &str, poll_timeout: Duration) -> QuoteResult<Self> {
        if token.trim().is_empty() {
            return Err(QuoteError::validation("bot token must be non-empty"));
        }
        let http = reqwest::blocking::Client::builder()
            .timeout(poll_timeout + Duration::from_secs(15))
            .build()
            .map_err(|e| QuoteError::transport(format!("http client: {e}")))?;
        Ok(Self {
            http,
            base: format!("{}/bot{}", api_base.trim_end_matches('/'), token.trim()),
        })
    }

    fn url(&self, method: &str) -> String {
        format!("{}/{method}", self.base)
    }

    // Errors go through `without_url`: request URLs embed the bot token.
    fn call<B: Serialize, T: DeserializeOwned>(&self, method: &str, body: &B) -> QuoteResult<T> {
        let resp = self
            .http
            .post(self.url(method))
            .json(body)
            .send()
            .map_err(|e| QuoteError::transport(format!("{method}: {}", e.without_url())))?;
        decode(method, resp)
    }
}

fn decode<T: DeserializeOwned>(method: &str, resp: reqwest::blocking::Response) -> QuoteResult<T> {
    let parsed: ApiResponse<T> = resp
        .json()
        .map_err(|e| QuoteError::transport(format!("{method}: bad response: {}", e.without_url())))?;
    parsed.into_result(method)
}

impl BotApi for TelegramClient {
    fn get_updates(&self, offset: i64, timeout: Duration) -> QuoteResult<Vec<Update>> {
        self.call(
            "getUpdates",
            &GetUpdates {
                offset,
                timeout: timeout.as_secs(),
                allowed_updates: &["message", "callback_query"],
            },
        )
    }

    fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> QuoteResult<()> {
        let _: serde_json::Value = self.call(
            "sendMessage",
            &SendMessage {
                chat_id,
                text,
                reply_markup: keyboard.map(InlineKeyboardMarkup::from),
            },
        )?;
        Ok(())
    }

    fn edit_message_text(
        &self,
        chat_id: i64,
        message_id: i64,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> QuoteResult<()> {
        let _: serde_json::Value = self.call(
            "editMessageText",
            &EditMessageText {
                chat_id,
                message_id,
                text,
                reply_markup: keyboard.map(InlineKeyboardMarkup::from),
            },
        )?;
        Ok(())
    }

    fn answer_callback_query(&self, callback_query_id: &str) -> QuoteResult<()> {
        let _: serde_json::Value =
            self.call("answerCallbackQuery", &AnswerCallbackQuery { callback_query_id })?;
        Ok(())
    }

    fn send_photo(&self, chat_id: i64, photo: &Path, caption: &str) -> QuoteResult<()> {
        let form = reqwest::blocking::multipart::Form::new()
            .text("chat_id", chat_id.to_string())
            .text("caption", caption.to_owned())
            .file("photo", photo)
            .map_err(|e| {
                QuoteError::transport(format!("sendPhoto: open '{}': {e}", photo.display()))
            })?;
        let resp = self
            .http
            .post(self.url("sendPhoto"))
            .multipart(form)
            .send()
            .map_err(|e| QuoteError::transport(format!("sendPhoto: {}", e.without_url())))?;
        let _: serde_json::Value = decode("sendPhoto", resp)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/bot/telegram.rs"]
mod tests;
