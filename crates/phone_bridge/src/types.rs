use phone_core::ChatMessage;

/// Identifier the host assigns to a newly added chat node.
pub type NodeId = u64;

/// Observability events the host drains from the bridge. Failures never
/// travel back to the phone as typed errors; they only surface here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeEvent {
    /// A phone-originated chat message arrived. Persisting it into host
    /// history and triggering a generation turn is a documented extension
    /// point, not implemented in any deployed variant.
    ChatMessageReceived { message: ChatMessage },
    /// An image upload failed. The sender gets no reply.
    UploadFailed { file_name: String, error: String },
    /// A stored chat photo was flagged for the next generation input.
    MultimodalQueued { url: String },
}

/// One rewritten message-text element within an added chat node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupPatch {
    pub node_id: NodeId,
    /// Index of the message-text element within the node, document order.
    pub fragment_index: usize,
    /// Replacement inner markup for that element.
    pub html: String,
}
