//! Demo host harness: wires the bridge and the tag observer to stub
//! collaborators and drives them from stdin.
//!
//! Input lines:
//! - `/phone` prints the slash-command iframe markup.
//! - `!render <html>` simulates a chat node being added to the DOM.
//! - anything else is parsed as a JSON envelope and delivered to the
//!   bridge; replies print to stdout as JSON.
mod logging;
mod stubs;

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use bridge_logging::{bridge_info, bridge_warn};
use phone_bridge::{
    BridgeHandle, ChatSurface, LocalImageStore, ObserverHandle, ReplySink, STARTUP_DELAY,
};
use phone_core::{iframe_markup, PhoneSettings, SettingsHandle};

use crate::stubs::{ScriptedHost, StdoutReply};

fn main() -> anyhow::Result<()> {
    logging::initialize(logging::LogDestination::Terminal);

    let settings = SettingsHandle::new(PhoneSettings::default());
    let host = Arc::new(ScriptedHost::sample());
    let store = Arc::new(LocalImageStore::new(
        PathBuf::from("./user_uploads"),
        "user/images",
    ));

    let bridge = BridgeHandle::new(settings.clone(), host.clone(), store);
    let observer = ObserverHandle::install(
        host.clone() as Arc<dyn ChatSurface>,
        settings.clone(),
        STARTUP_DELAY,
    );
    let reply: Arc<dyn ReplySink> = Arc::new(StdoutReply);

    bridge_info!("phone host harness ready; reading envelopes from stdin");

    let mut next_node_id = 1;
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line == "/phone" {
            println!("{}", iframe_markup(&settings.snapshot().phone_url));
            continue;
        }

        if let Some(html) = line.strip_prefix("!render ") {
            observer.notify_added(next_node_id, html);
            next_node_id += 1;
        } else {
            match serde_json::from_str::<serde_json::Value>(line) {
                Ok(envelope) => bridge.deliver(envelope, reply.clone()),
                Err(err) => bridge_warn!("not an envelope: {}", err),
            }
        }

        drain(&bridge, &observer);
    }

    Ok(())
}

/// Let in-flight work settle, then print whatever arrived. Good enough for
/// an interactive harness; tests exercise the real async behavior.
fn drain(bridge: &BridgeHandle, observer: &ObserverHandle) {
    thread::sleep(Duration::from_millis(100));
    while let Some(event) = bridge.try_recv_event() {
        bridge_info!("bridge event: {:?}", event);
    }
    while let Some(patch) = observer.try_recv_patch() {
        println!(
            "patch node={} fragment={}: {}",
            patch.node_id, patch.fragment_index, patch.html
        );
    }
}
