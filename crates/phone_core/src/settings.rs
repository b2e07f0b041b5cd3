use std::sync::{Arc, PoisonError, RwLock};

use url::Url;

/// Embedded-page URL of the stock extension build.
pub const DEFAULT_PHONE_URL: &str = "https://fayephone.pages.dev/fphone/";

/// Configuration record for the bridge and the tag observer. Written only
/// from the settings-save action; read on every operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneSettings {
    /// Origin/path of the embedded phone page.
    pub phone_url: String,
    /// Whether uploaded chat photos are flagged for the host's next
    /// generation input.
    pub enable_multimodal: bool,
}

impl Default for PhoneSettings {
    fn default() -> Self {
        Self {
            phone_url: DEFAULT_PHONE_URL.to_string(),
            enable_multimodal: true,
        }
    }
}

impl PhoneSettings {
    /// Validate and set a new embedded-page URL.
    pub fn set_phone_url(&mut self, raw: &str) -> Result<(), url::ParseError> {
        let parsed = Url::parse(raw.trim())?;
        self.phone_url = parsed.to_string();
        Ok(())
    }
}

/// Shared handle threading the configuration into both components. Reads
/// take a fresh snapshot per operation; writes are last-write-wins.
#[derive(Debug, Clone, Default)]
pub struct SettingsHandle {
    inner: Arc<RwLock<PhoneSettings>>,
}

impl SettingsHandle {
    pub fn new(settings: PhoneSettings) -> Self {
        Self {
            inner: Arc::new(RwLock::new(settings)),
        }
    }

    /// Current settings value. A poisoned lock yields the last written
    /// value rather than propagating the panic.
    pub fn snapshot(&self) -> PhoneSettings {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Apply a settings-save mutation.
    pub fn update(&self, mutate: impl FnOnce(&mut PhoneSettings)) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        mutate(&mut guard);
    }
}
