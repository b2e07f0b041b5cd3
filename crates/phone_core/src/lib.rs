//! Phone core: pure bridge protocol, settings, and sentinel helpers.
mod bridge;
mod effect;
mod msg;
mod sentinel;
mod settings;

pub use bridge::{
    dispatch, forward_to_generation, init_reply, parse_envelope, upload_reply, CHAT_PHOTO_CONTEXT,
};
pub use effect::BridgeEffect;
pub use msg::{ChatEntry, ChatMessage, Inbound, Outbound, Participants};
pub use sentinel::{
    contains_sentinel, iframe_markup, TAG_CLOSE, TAG_CLOSE_ESCAPED, TAG_OPEN, TAG_OPEN_ESCAPED,
};
pub use settings::{PhoneSettings, SettingsHandle, DEFAULT_PHONE_URL};
