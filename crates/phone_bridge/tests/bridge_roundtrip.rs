use std::sync::{mpsc, Arc, Mutex, Once};
use std::thread;
use std::time::Duration;

use serde_json::json;

use phone_bridge::{BridgeEvent, BridgeHandle, HostContext, ImageStore, ReplySink, StoreError};
use phone_core::{ChatEntry, Outbound, Participants, PhoneSettings, SettingsHandle};

const WAIT: Duration = Duration::from_secs(2);

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(bridge_logging::initialize_for_tests);
}

struct FixedHost {
    entries: Vec<ChatEntry>,
}

impl HostContext for FixedHost {
    fn participants(&self) -> Participants {
        Participants {
            user_name: "User".to_string(),
            char_name: "Faye".to_string(),
        }
    }

    fn chat_entries(&self) -> Vec<ChatEntry> {
        self.entries.clone()
    }
}

struct EchoStore;

#[async_trait::async_trait]
impl ImageStore for EchoStore {
    async fn store(
        &self,
        _bytes: Vec<u8>,
        _mime: &str,
        file_name: &str,
    ) -> Result<String, StoreError> {
        Ok(format!("user/images/{file_name}"))
    }
}

struct FailingStore;

#[async_trait::async_trait]
impl ImageStore for FailingStore {
    async fn store(
        &self,
        _bytes: Vec<u8>,
        _mime: &str,
        _file_name: &str,
    ) -> Result<String, StoreError> {
        Err(StoreError::ImageDir("storage offline".to_string()))
    }
}

struct ChannelReply {
    tx: Mutex<mpsc::Sender<Outbound>>,
}

impl ChannelReply {
    fn pair() -> (Arc<Self>, mpsc::Receiver<Outbound>) {
        let (tx, rx) = mpsc::channel();
        (Arc::new(Self { tx: Mutex::new(tx) }), rx)
    }
}

impl ReplySink for ChannelReply {
    fn send(&self, outbound: Outbound) {
        if let Ok(tx) = self.tx.lock() {
            let _ = tx.send(outbound);
        }
    }
}

fn bridge_with(
    settings: PhoneSettings,
    entries: Vec<ChatEntry>,
    store: Arc<dyn ImageStore>,
) -> BridgeHandle {
    BridgeHandle::new(
        SettingsHandle::new(settings),
        Arc::new(FixedHost { entries }),
        store,
    )
}

fn wait_event(bridge: &BridgeHandle) -> Option<BridgeEvent> {
    for _ in 0..200 {
        if let Some(event) = bridge.try_recv_event() {
            return Some(event);
        }
        thread::sleep(Duration::from_millis(10));
    }
    None
}

#[test]
fn request_init_replies_with_identity_and_history() {
    init_logging();
    let entries = vec![
        ChatEntry::new("plain"),
        ChatEntry::new("call me on &lt;fphone&gt;&lt;/fphone&gt;"),
    ];
    let bridge = bridge_with(PhoneSettings::default(), entries, Arc::new(EchoStore));
    let (reply, rx) = ChannelReply::pair();

    bridge.deliver(json!({"type": "request_init"}), reply);

    let outbound = rx.recv_timeout(WAIT).expect("init reply");
    assert_eq!(
        outbound,
        Outbound::InitPhone {
            user_name: "User".to_string(),
            char_name: "Faye".to_string(),
            history: Some("call me on &lt;fphone&gt;&lt;/fphone&gt;".to_string()),
        }
    );
    // Exactly one reply.
    assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());
}

#[test]
fn malformed_envelopes_produce_nothing() {
    init_logging();
    let bridge = bridge_with(PhoneSettings::default(), Vec::new(), Arc::new(EchoStore));
    let (reply, rx) = ChannelReply::pair();

    bridge.deliver(json!({"kind": "request_init"}), reply.clone());
    bridge.deliver(json!({"type": "factory_reset"}), reply.clone());
    bridge.deliver(json!(null), reply);

    assert!(rx.recv_timeout(Duration::from_millis(300)).is_err());
    assert_eq!(bridge.try_recv_event(), None);
}

#[test]
fn upload_success_echoes_payload_and_context() {
    init_logging();
    let bridge = bridge_with(PhoneSettings::default(), Vec::new(), Arc::new(EchoStore));
    let (reply, rx) = ChannelReply::pair();

    bridge.deliver(
        json!({
            "type": "upload_image",
            "file": "data:image/png;base64,aGVsbG8=",
            "fileName": "selfie.png",
            "context": "avatar",
        }),
        reply,
    );

    let outbound = rx.recv_timeout(WAIT).expect("upload reply");
    assert_eq!(
        outbound,
        Outbound::UploadSuccess {
            url: "user/images/selfie.png".to_string(),
            base64_preview: "data:image/png;base64,aGVsbG8=".to_string(),
            context: "avatar".to_string(),
        }
    );
}

#[test]
fn chat_photo_upload_queues_multimodal_event() {
    init_logging();
    let bridge = bridge_with(PhoneSettings::default(), Vec::new(), Arc::new(EchoStore));
    let (reply, rx) = ChannelReply::pair();

    bridge.deliver(
        json!({
            "type": "upload_image",
            "file": "data:image/png;base64,aGVsbG8=",
            "fileName": "photo.png",
            "context": "chat_photo",
        }),
        reply,
    );

    assert!(rx.recv_timeout(WAIT).is_ok());
    assert_eq!(
        wait_event(&bridge),
        Some(BridgeEvent::MultimodalQueued {
            url: "user/images/photo.png".to_string(),
        })
    );
}

#[test]
fn multimodal_disabled_suppresses_the_event() {
    init_logging();
    let settings = PhoneSettings {
        enable_multimodal: false,
        ..PhoneSettings::default()
    };
    let bridge = bridge_with(settings, Vec::new(), Arc::new(EchoStore));
    let (reply, rx) = ChannelReply::pair();

    bridge.deliver(
        json!({
            "type": "upload_image",
            "file": "data:image/png;base64,aGVsbG8=",
            "fileName": "photo.png",
            "context": "chat_photo",
        }),
        reply,
    );

    assert!(rx.recv_timeout(WAIT).is_ok());
    thread::sleep(Duration::from_millis(200));
    assert_eq!(bridge.try_recv_event(), None);
}

#[test]
fn store_failure_yields_no_reply_and_one_event() {
    init_logging();
    let bridge = bridge_with(PhoneSettings::default(), Vec::new(), Arc::new(FailingStore));
    let (reply, rx) = ChannelReply::pair();

    bridge.deliver(
        json!({
            "type": "upload_image",
            "file": "data:image/png;base64,aGVsbG8=",
            "fileName": "photo.png",
            "context": "chat_photo",
        }),
        reply,
    );

    match wait_event(&bridge) {
        Some(BridgeEvent::UploadFailed { file_name, error }) => {
            assert_eq!(file_name, "photo.png");
            assert!(error.contains("storage offline"));
        }
        other => panic!("unexpected event: {other:?}"),
    }
    assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());
}

#[test]
fn invalid_data_uri_yields_no_reply_and_one_event() {
    init_logging();
    let bridge = bridge_with(PhoneSettings::default(), Vec::new(), Arc::new(EchoStore));
    let (reply, rx) = ChannelReply::pair();

    bridge.deliver(
        json!({
            "type": "upload_image",
            "file": "definitely not a data uri",
            "fileName": "photo.png",
            "context": "chat_photo",
        }),
        reply,
    );

    assert!(matches!(
        wait_event(&bridge),
        Some(BridgeEvent::UploadFailed { .. })
    ));
    assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());
}

#[test]
fn send_chat_message_is_recorded_but_never_replied_to() {
    init_logging();
    let bridge = bridge_with(PhoneSettings::default(), Vec::new(), Arc::new(EchoStore));
    let (reply, rx) = ChannelReply::pair();

    bridge.deliver(
        json!({
            "type": "send_chat_message",
            "message": {
                "header": "User",
                "body": "hi from the phone",
                "thought": "typing...",
                "isUser": true,
            },
        }),
        reply,
    );

    match wait_event(&bridge) {
        Some(BridgeEvent::ChatMessageReceived { message }) => {
            assert_eq!(message.body, "hi from the phone");
            assert_eq!(message.thought.as_deref(), Some("typing..."));
            assert!(message.is_user);
        }
        other => panic!("unexpected event: {other:?}"),
    }
    assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());
}
