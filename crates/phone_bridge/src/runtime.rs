use std::sync::{mpsc, Arc};
use std::thread;

use serde_json::Value;

use bridge_logging::{bridge_debug, bridge_info, bridge_warn};
use phone_core::{
    dispatch, forward_to_generation, init_reply, parse_envelope, upload_reply, BridgeEffect,
    SettingsHandle,
};

use crate::host::{HostContext, ImageStore, ReplySink};
use crate::types::BridgeEvent;
use crate::upload::{decode_data_uri, effective_file_name};

enum BridgeCommand {
    Deliver {
        envelope: Value,
        reply: Arc<dyn ReplySink>,
    },
}

/// Handle to the bridge runtime. One inbound envelope in, at most one
/// reply out to the same sender. Envelopes are handled independently:
/// concurrent uploads race their replies back in completion order, not
/// receipt order.
pub struct BridgeHandle {
    cmd_tx: mpsc::Sender<BridgeCommand>,
    event_rx: mpsc::Receiver<BridgeEvent>,
}

impl BridgeHandle {
    pub fn new(
        settings: SettingsHandle,
        host: Arc<dyn HostContext>,
        store: Arc<dyn ImageStore>,
    ) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let settings = settings.clone();
                let host = host.clone();
                let store = store.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(command, settings, host, store, event_tx).await;
                });
            }
        });

        Self { cmd_tx, event_rx }
    }

    /// Deliver one envelope together with the opaque handle that replies
    /// to its sender.
    pub fn deliver(&self, envelope: Value, reply: Arc<dyn ReplySink>) {
        let _ = self.cmd_tx.send(BridgeCommand::Deliver { envelope, reply });
    }

    /// Drain one observability event, if any.
    pub fn try_recv_event(&self) -> Option<BridgeEvent> {
        self.event_rx.try_recv().ok()
    }
}

async fn handle_command(
    command: BridgeCommand,
    settings: SettingsHandle,
    host: Arc<dyn HostContext>,
    store: Arc<dyn ImageStore>,
    event_tx: mpsc::Sender<BridgeEvent>,
) {
    let BridgeCommand::Deliver { envelope, reply } = command;
    let Some(inbound) = parse_envelope(&envelope) else {
        // Untrusted senders may post anything; drop it quietly.
        bridge_debug!("ignoring unrecognized envelope");
        return;
    };
    for effect in dispatch(inbound) {
        run_effect(
            effect,
            &settings,
            host.as_ref(),
            store.as_ref(),
            reply.as_ref(),
            &event_tx,
        )
        .await;
    }
}

async fn run_effect(
    effect: BridgeEffect,
    settings: &SettingsHandle,
    host: &dyn HostContext,
    store: &dyn ImageStore,
    reply: &dyn ReplySink,
    event_tx: &mpsc::Sender<BridgeEvent>,
) {
    match effect {
        BridgeEffect::SendInit => {
            let participants = host.participants();
            let entries = host.chat_entries();
            reply.send(init_reply(&participants, &entries));
        }
        BridgeEffect::UploadImage {
            file,
            file_name,
            context,
        } => {
            let decoded = match decode_data_uri(&file) {
                Ok(decoded) => decoded,
                Err(err) => {
                    bridge_warn!("image upload failed: {}", err);
                    let _ = event_tx.send(BridgeEvent::UploadFailed {
                        file_name,
                        error: err.to_string(),
                    });
                    return;
                }
            };

            let name = effective_file_name(&file_name);
            match store.store(decoded.bytes, &decoded.mime, &name).await {
                Ok(url) => {
                    reply.send(upload_reply(url.clone(), file, context.clone()));
                    // Settings are re-read after the awaited store call: a
                    // save landing mid-upload governs this decision.
                    if forward_to_generation(&context, &settings.snapshot()) {
                        bridge_info!("chat photo queued for next generation input: {}", url);
                        let _ = event_tx.send(BridgeEvent::MultimodalQueued { url });
                    }
                }
                Err(err) => {
                    bridge_warn!("image upload failed: {}", err);
                    let _ = event_tx.send(BridgeEvent::UploadFailed {
                        file_name: name,
                        error: err.to_string(),
                    });
                }
            }
        }
        BridgeEffect::RecordChatMessage { message } => {
            // Extension point: the message is not persisted into host
            // history and no generation turn is triggered.
            bridge_info!("chat message from phone (is_user={})", message.is_user);
            let _ = event_tx.send(BridgeEvent::ChatMessageReceived { message });
        }
    }
}
