//! Engine configuration and logging setup.

use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable naming a spell catalog file.
pub const SPELL_CATALOG_ENV: &str = "ECHOSHEET_SPELL_CATALOG";

/// Environment variable holding a tracing filter directive.
pub const LOG_FILTER_ENV: &str = "ECHOSHEET_LOG";

/// Filter used when nothing else is configured.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Configuration for a [`SheetEngine`](crate::engine::SheetEngine).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetConfig {
    /// Spell catalog file. `None` uses the bundled catalog.
    pub spell_catalog_path: Option<PathBuf>,

    /// Tracing filter directive, e.g. `"echosheet_core=debug"`.
    pub log_filter: String,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            spell_catalog_path: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl SheetConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `ECHOSHEET_SPELL_CATALOG` and `ECHOSHEET_LOG` (falling back to
    /// `RUST_LOG`).
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            spell_catalog_path: get(SPELL_CATALOG_ENV).map(PathBuf::from),
            log_filter: get(LOG_FILTER_ENV)
                .or_else(|| get("RUST_LOG"))
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        }
    }

    pub fn with_spell_catalog(mut self, path: impl Into<PathBuf>) -> Self {
        self.spell_catalog_path = Some(path.into());
        self
    }

    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Install a global fmt subscriber using `log_filter`.
    ///
    /// Returns `false` if a subscriber was already installed. An unparsable
    /// filter falls back to `info`.
    pub fn init_tracing(&self) -> bool {
        let filter = tracing_subscriber::EnvFilter::try_new(&self.log_filter)
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER));
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init()
            .is_ok()
    }
}
