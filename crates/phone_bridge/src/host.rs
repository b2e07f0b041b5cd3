use phone_core::{ChatEntry, Outbound, Participants};

use crate::store::StoreError;

/// Read access to the host conversation. The host guarantees this exists
/// for the life of the page; the bridge does not defend against it going
/// away.
pub trait HostContext: Send + Sync {
    /// Current user/character display names.
    fn participants(&self) -> Participants;
    /// Ordered chat history, oldest first. Used only for the backward
    /// sentinel scan in the init snapshot.
    fn chat_entries(&self) -> Vec<ChatEntry>;
}

/// Opaque handle replying to exactly one sender, never a broadcast. The
/// handle carries no origin check: the wire protocol posts to `'*'`, a
/// known gap preserved for compatibility.
pub trait ReplySink: Send + Sync {
    fn send(&self, outbound: Outbound);
}

/// Host storage for uploaded images.
#[async_trait::async_trait]
pub trait ImageStore: Send + Sync {
    /// Store decoded image bytes and return a storage-relative URL.
    async fn store(&self, bytes: Vec<u8>, mime: &str, file_name: &str)
        -> Result<String, StoreError>;
}
