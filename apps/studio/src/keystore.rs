use std::fmt;

/// Session-scoped holder for the user's generation API key.
///
/// The key lives in memory only and is handed to the analysis client as a
/// call argument; nothing else reads it.
#[derive(Clone, Default)]
pub struct KeyStore {
    key: String,
}

impl KeyStore {
    pub fn new(initial: Option<String>) -> Self {
        Self {
            key: initial.unwrap_or_default(),
        }
    }

    pub fn set(&mut self, key: impl Into<String>) {
        self.key = key.into();
    }

    pub fn get(&self) -> &str {
        &self.key
    }

    pub fn is_configured(&self) -> bool {
        !self.key.trim().is_empty()
    }
}

impl fmt::Debug for KeyStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyStore")
            .field("key", &if self.is_configured() { "<redacted>" } else { "<unset>" })
            .finish()
    }
}
