use serde::{Deserialize, Serialize};

/// Inbound envelope from the embedded phone page, discriminated by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Inbound {
    /// Phone requesting its initialization snapshot.
    RequestInit,
    /// Phone uploading an image into host storage.
    UploadImage {
        /// Image payload as a `data:` URI.
        file: String,
        /// Suggested file name; empty falls back to the stock default.
        #[serde(rename = "fileName", default)]
        file_name: String,
        /// Caller-supplied routing tag, echoed back verbatim on success.
        #[serde(default)]
        context: String,
    },
    /// Phone reporting a simulated chat message.
    SendChatMessage {
        /// The message as rendered inside the phone UI.
        message: ChatMessage,
    },
}

/// Outbound envelope from the host back to the phone page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Outbound {
    /// Snapshot of the host conversation identity.
    InitPhone {
        /// Display name of the user participant.
        #[serde(rename = "userName")]
        user_name: String,
        /// Display name of the character participant.
        #[serde(rename = "charName")]
        char_name: String,
        /// Raw text of the most recent chat entry carrying the sentinel
        /// tag, when one exists.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        history: Option<String>,
    },
    /// Acknowledgement of a stored image. Sent only on success.
    UploadSuccess {
        /// Storage-relative URL of the stored file.
        url: String,
        /// Byte-for-byte echo of the uploaded payload; the phone cannot
        /// read back its own cross-origin-stored file.
        #[serde(rename = "base64Preview")]
        base64_preview: String,
        /// The inbound routing tag, unchanged.
        context: String,
    },
}

/// One message shown in the phone UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub header: String,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thought: Option<String>,
    pub is_user: bool,
}

/// Current user/character display names from the host conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participants {
    pub user_name: String,
    pub char_name: String,
}

/// One entry of the host chat history, raw text only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEntry {
    pub text: String,
}

impl ChatEntry {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}
