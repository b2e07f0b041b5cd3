use serde::Deserialize;
use serde_json::Value;

use crate::sentinel::contains_sentinel;
use crate::{BridgeEffect, ChatEntry, Inbound, Outbound, Participants, PhoneSettings};

/// Routing tag marking an upload as a photo sent inside the chat.
pub const CHAT_PHOTO_CONTEXT: &str = "chat_photo";

/// Gate for untrusted envelopes: anything that is not an object carrying a
/// recognized `type` is dropped without error. Unknown extra fields are
/// tolerated.
pub fn parse_envelope(value: &Value) -> Option<Inbound> {
    if !value.is_object() {
        return None;
    }
    Inbound::deserialize(value).ok()
}

/// Pure dispatch: classify one envelope into its effect.
pub fn dispatch(inbound: Inbound) -> Vec<BridgeEffect> {
    match inbound {
        Inbound::RequestInit => vec![BridgeEffect::SendInit],
        Inbound::UploadImage {
            file,
            file_name,
            context,
        } => vec![BridgeEffect::UploadImage {
            file,
            file_name,
            context,
        }],
        Inbound::SendChatMessage { message } => vec![BridgeEffect::RecordChatMessage { message }],
    }
}

/// Assemble the `init_phone` reply: conversation identity plus the raw text
/// of the most recent chat entry carrying the sentinel tag, if any.
pub fn init_reply(participants: &Participants, entries: &[ChatEntry]) -> Outbound {
    let history = entries
        .iter()
        .rev()
        .find(|entry| contains_sentinel(&entry.text))
        .map(|entry| entry.text.clone());

    Outbound::InitPhone {
        user_name: participants.user_name.clone(),
        char_name: participants.char_name.clone(),
        history,
    }
}

/// Assemble the `upload_success` reply. `original_file` is echoed untouched
/// as the preview payload and `context` passes through unchanged.
pub fn upload_reply(url: String, original_file: String, context: String) -> Outbound {
    Outbound::UploadSuccess {
        url,
        base64_preview: original_file,
        context,
    }
}

/// Whether a stored upload should be flagged for the next generation input.
/// Settings are read fresh by the caller for each decision.
pub fn forward_to_generation(context_tag: &str, settings: &PhoneSettings) -> bool {
    settings.enable_multimodal && context_tag == CHAT_PHOTO_CONTEXT
}
