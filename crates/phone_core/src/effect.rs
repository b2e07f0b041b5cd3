use crate::ChatMessage;

/// Effect requested by dispatching one inbound envelope. At most one per
/// envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeEffect {
    /// Gather the host snapshot and reply `init_phone` to the sender.
    SendInit,
    /// Decode and store the image, then reply `upload_success` on success.
    /// Failures produce no reply; the phone owns its own timeout UI.
    UploadImage {
        file: String,
        file_name: String,
        context: String,
    },
    /// Record a phone-originated chat message. Never replied to.
    RecordChatMessage { message: ChatMessage },
}
