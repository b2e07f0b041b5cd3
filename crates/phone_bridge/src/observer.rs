use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use scraper::{Html, Selector};

use bridge_logging::bridge_warn;
use phone_core::SettingsHandle;

use crate::rewrite::rewrite_markup;
use crate::types::{MarkupPatch, NodeId};

/// Startup delay the stock extension waits before probing the chat
/// container.
pub const STARTUP_DELAY: Duration = Duration::from_millis(1000);

/// Message-text elements inside an added chat node.
const MESSAGE_TEXT_SELECTOR: &str = ".mes_text";

/// Probe for the host's chat container. Checked exactly once, after the
/// startup delay; an absent container leaves the observer inactive for the
/// whole page session, with no re-check.
pub trait ChatSurface: Send + Sync {
    fn container_present(&self) -> bool;
}

/// One rewritten message-text element within a scanned fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentRewrite {
    /// Index of the element among the fragment's matches, document order.
    pub fragment_index: usize,
    /// Replacement inner markup.
    pub html: String,
}

/// Scan one added-node fragment: select every message-text element,
/// including the node itself when it qualifies, and rewrite each inner
/// markup that carries the sentinel. Elements the sweep leaves unchanged
/// are omitted.
pub fn scan_fragment(fragment_html: &str, phone_url: &str) -> Vec<FragmentRewrite> {
    let doc = Html::parse_fragment(fragment_html);
    let Ok(selector) = Selector::parse(MESSAGE_TEXT_SELECTOR) else {
        return Vec::new();
    };

    doc.select(&selector)
        .enumerate()
        .filter_map(|(index, element)| {
            rewrite_markup(&element.inner_html(), phone_url).map(|html| FragmentRewrite {
                fragment_index: index,
                html,
            })
        })
        .collect()
}

enum ObserverCommand {
    Added { node_id: NodeId, html: String },
}

/// Handle to the tag observer. Installed once per page session; runs for
/// the life of the handle with no explicit teardown.
pub struct ObserverHandle {
    cmd_tx: mpsc::Sender<ObserverCommand>,
    patch_rx: mpsc::Receiver<MarkupPatch>,
}

impl ObserverHandle {
    /// Install the observer: wait out the startup delay, probe the chat
    /// container once, then turn added-node notifications into markup
    /// patches. With no container, notifications are accepted and dropped.
    pub fn install(
        surface: Arc<dyn ChatSurface>,
        settings: SettingsHandle,
        startup_delay: Duration,
    ) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (patch_tx, patch_rx) = mpsc::channel();

        thread::spawn(move || {
            thread::sleep(startup_delay);
            if !surface.container_present() {
                bridge_warn!("chat container missing; tag observer inactive for this session");
                return;
            }
            while let Ok(ObserverCommand::Added { node_id, html }) = cmd_rx.recv() {
                // The URL is re-read per node so a settings save takes
                // effect without reinstalling.
                let phone_url = settings.snapshot().phone_url;
                for rewrite in scan_fragment(&html, &phone_url) {
                    let _ = patch_tx.send(MarkupPatch {
                        node_id,
                        fragment_index: rewrite.fragment_index,
                        html: rewrite.html,
                    });
                }
            }
        });

        Self { cmd_tx, patch_rx }
    }

    /// Notify the observer of a structurally added chat node.
    pub fn notify_added(&self, node_id: NodeId, html: impl Into<String>) {
        let _ = self.cmd_tx.send(ObserverCommand::Added {
            node_id,
            html: html.into(),
        });
    }

    pub fn try_recv_patch(&self) -> Option<MarkupPatch> {
        self.patch_rx.try_recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::scan_fragment;
    use phone_core::iframe_markup;

    const URL: &str = "https://example.test/phone/";

    #[test]
    fn fragment_without_message_text_yields_nothing() {
        assert!(scan_fragment("<div class=\"avatar\">&lt;fphone&gt;</div>", URL).is_empty());
    }

    #[test]
    fn message_text_without_sentinel_yields_nothing() {
        assert!(scan_fragment("<div class=\"mes_text\">hello</div>", URL).is_empty());
    }

    #[test]
    fn added_node_that_is_itself_message_text_is_scanned() {
        let rewrites = scan_fragment(
            "<div class=\"mes_text\">hi &lt;fphone&gt;&lt;/fphone&gt;</div>",
            URL,
        );
        assert_eq!(rewrites.len(), 1);
        assert_eq!(rewrites[0].fragment_index, 0);
        assert_eq!(rewrites[0].html, format!("hi {}", iframe_markup(URL)));
    }

    #[test]
    fn nested_message_text_elements_are_found_in_document_order() {
        let fragment = "<div class=\"mes\">\
             <div class=\"mes_text\">first <fphone></fphone></div>\
             <div class=\"mes_text\">plain</div>\
             <div class=\"mes_text\">third &lt;fphone&gt;</div>\
             </div>";
        let rewrites = scan_fragment(fragment, URL);

        assert_eq!(rewrites.len(), 2);
        assert_eq!(rewrites[0].fragment_index, 0);
        assert_eq!(rewrites[0].html, format!("first {}", iframe_markup(URL)));
        assert_eq!(rewrites[1].fragment_index, 2);
        assert_eq!(rewrites[1].html, format!("third {}", iframe_markup(URL)));
    }

    #[test]
    fn already_rewritten_markup_is_skipped() {
        let fragment = format!("<div class=\"mes_text\">{}</div>", iframe_markup(URL));
        assert!(scan_fragment(&fragment, URL).is_empty());
    }
}
