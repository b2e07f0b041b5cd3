//! Stub host collaborators for the harness.

use phone_bridge::{ChatSurface, HostContext, ReplySink};
use phone_core::{ChatEntry, Outbound, Participants};

/// Fixed conversation identity with a canned chat log.
pub struct ScriptedHost {
    participants: Participants,
    entries: Vec<ChatEntry>,
}

impl ScriptedHost {
    pub fn sample() -> Self {
        Self {
            participants: Participants {
                user_name: "User".to_string(),
                char_name: "Faye".to_string(),
            },
            entries: vec![
                ChatEntry::new("hey, are you there?"),
                ChatEntry::new("pick up! &lt;fphone&gt;&lt;/fphone&gt;"),
            ],
        }
    }
}

impl HostContext for ScriptedHost {
    fn participants(&self) -> Participants {
        self.participants.clone()
    }

    fn chat_entries(&self) -> Vec<ChatEntry> {
        self.entries.clone()
    }
}

impl ChatSurface for ScriptedHost {
    fn container_present(&self) -> bool {
        true
    }
}

/// Reply handle that prints outbound envelopes as JSON lines.
pub struct StdoutReply;

impl ReplySink for StdoutReply {
    fn send(&self, outbound: Outbound) {
        match serde_json::to_string(&outbound) {
            Ok(json) => println!("{json}"),
            Err(err) => log::error!("failed to serialize reply: {err}"),
        }
    }
}
