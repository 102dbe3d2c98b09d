use serde_json::json;

use super::*;

#[test]
fn keyboard_serializes_as_inline_markup() {
    let kb = Keyboard::grid(["Top", "Center", "Bottom"], 3);
    let body = SendMessage {
        chat_id: 42,
        text: "pick",
        reply_markup: Some(InlineKeyboardMarkup::from(&kb)),
    };
    assert_eq!(
        serde_json::to_value(&body).unwrap(),
        json!({
            "chat_id": 42,
            "text": "pick",
            "reply_markup": {"inline_keyboard": [[
                {"text": "Top", "callback_data": "Top"},
                {"text": "Center", "callback_data": "Center"},
                {"text": "Bottom", "callback_data": "Bottom"}
            ]]}
        })
    );
}

#[test]
fn plain_message_omits_reply_markup() {
    let body = SendMessage {
        chat_id: 1,
        text: "hi",
        reply_markup: None,
    };
    let v = serde_json::to_value(&body).unwrap();
    assert!(v.get("reply_markup").is_none());
}

#[test]
fn decodes_message_and_callback_updates() {
    let updates: ApiResponse<Vec<Update>> = serde_json::from_value(json!({
        "ok": true,
        "result": [
            {
                "update_id": 10,
                "message": {
                    "message_id": 5,
                    "chat": {"id": 99, "type": "private"},
                    "from": {"id": 7, "is_bot": false, "first_name": "A", "username": "a"},
                    "date": 0,
                    "text": "/create"
                }
            },
            {
                "update_id": 11,
                "callback_query": {
                    "id": "cbq",
                    "from": {"id": 7, "is_bot": false, "first_name": "A"},
                    "chat_instance": "x",
                    "data": "Poppins",
                    "message": {"message_id": 6, "chat": {"id": 99}, "date": 0}
                }
            },
            {"update_id": 12, "edited_message": {"message_id": 1}}
        ]
    }))
    .unwrap();

    let updates = updates.into_result("getUpdates").unwrap();
    assert_eq!(updates.len(), 3);
    let msg = updates[0].message.as_ref().unwrap();
    assert_eq!(msg.chat.id, 99);
    assert_eq!(msg.text.as_deref(), Some("/create"));
    assert_eq!(msg.from.as_ref().unwrap().username.as_deref(), Some("a"));

    let cb = updates[1].callback_query.as_ref().unwrap();
    assert_eq!(cb.data.as_deref(), Some("Poppins"));
    assert_eq!(cb.message.as_ref().unwrap().message_id, 6);

    assert!(updates[2].message.is_none() && updates[2].callback_query.is_none());
}

#[test]
fn api_errors_carry_description() {
    let resp: ApiResponse<serde_json::Value> = serde_json::from_value(json!({
        "ok": false,
        "error_code": 401,
        "description": "Unauthorized"
    }))
    .unwrap();
    let err = resp.into_result("getMe").unwrap_err();
    assert!(matches!(err, QuoteError::Transport(ref m) if m == "getMe: Unauthorized"));
}

#[test]
fn client_rejects_blank_token() {
    assert!(TelegramClient::new("  ", DEFAULT_API_BASE, Duration::from_secs(1)).is_err());
}

#[test]
fn client_urls_embed_token_and_method() {
    let c = TelegramClient::new("123:abc", "https://example.test/", Duration::from_secs(1)).unwrap();
    assert_eq!(c.url("getUpdates"), "https://example.test/bot123:abc/getUpdates");
}
