//! Phone bridge runtime: envelope handling, the image upload pipeline, and
//! the sentinel tag observer.
mod host;
mod observer;
mod rewrite;
mod runtime;
mod store;
mod types;
mod upload;

pub use host::{HostContext, ImageStore, ReplySink};
pub use observer::{scan_fragment, ChatSurface, FragmentRewrite, ObserverHandle, STARTUP_DELAY};
pub use rewrite::rewrite_markup;
pub use runtime::BridgeHandle;
pub use store::{sanitize_file_name, LocalImageStore, StoreError};
pub use types::{BridgeEvent, MarkupPatch, NodeId};
pub use upload::{
    decode_data_uri, effective_file_name, DecodedImage, UploadError, DEFAULT_FILE_NAME,
    DEFAULT_MIME,
};
