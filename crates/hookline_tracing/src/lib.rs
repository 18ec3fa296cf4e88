//! Logging setup for hosts of hookline registries.
//!
//! The registry crates only emit [`tracing`] events; they never install a
//! subscriber. Hosts that want to see those events (registration,
//! unregistration, retrieval, boundary faults) configure output here.
//!
//! # Example
//!
//! ```
//! use hookline_tracing::{TracingConfig, TracingFormat};
//! use tracing::Level;
//!
//! TracingConfig::default()
//!     .with_level(Level::DEBUG)
//!     .with_format(TracingFormat::Compact)
//!     .with_env_filter("hookline_hooks=trace")
//!     .init();
//!
//! tracing::info!("hooks ready");
//! ```
//!
//! # Environment
//!
//! [`TracingConfig::from_env`] reads:
//!
//! | Variable | Meaning |
//! |----------|---------|
//! | `HOOKLINE_LOG` | Filter directives, e.g. `hookline_hooks=debug,warn` |
//! | `HOOKLINE_LOG_FORMAT` | `pretty`, `compact`, or `json` |

use core::str::FromStr;

use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable holding filter directives.
pub const LOG_ENV: &str = "HOOKLINE_LOG";

/// Environment variable selecting the output format.
pub const LOG_FORMAT_ENV: &str = "HOOKLINE_LOG_FORMAT";

// ─────────────────────────────────────────────────────────────────────────────
// TracingFormat
// ─────────────────────────────────────────────────────────────────────────────

/// Tracing output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TracingFormat {
    /// Human-readable colored output (default).
    #[default]
    Pretty,
    /// Compact single-line output.
    Compact,
    /// JSON structured output for log aggregation.
    Json,
}

impl FromStr for TracingFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown tracing format '{other}'")),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// TracingConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Subscriber configuration.
///
/// # Configuration Options
///
/// ```
/// use hookline_tracing::{TracingConfig, TracingFormat};
/// use tracing::Level;
///
/// // Development: pretty output with span enter/exit
/// let dev = TracingConfig::new()
///     .with_level(Level::DEBUG)
///     .with_span_events(true);
///
/// // Production: JSON output, registry internals quiet
/// let prod = TracingConfig::new()
///     .with_format(TracingFormat::Json)
///     .with_env_filter("info,hookline_hooks=warn");
/// # let _ = (dev, prod);
/// ```
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Maximum log level, used when no filter is given or it fails to parse.
    level: Level,
    /// Output format.
    format: TracingFormat,
    /// Environment filter (e.g., `"hookline_hooks=debug,warn"`).
    env_filter: Option<String>,
    /// Whether to include span events (enter/exit).
    span_events: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            format: TracingFormat::Pretty,
            env_filter: None,
            span_events: false,
        }
    }
}

impl TracingConfig {
    /// Creates a `TracingConfig` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration from [`LOG_ENV`] and [`LOG_FORMAT_ENV`].
    ///
    /// Unset variables keep their defaults. An unknown format falls back to
    /// [`TracingFormat::Pretty`].
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var(LOG_ENV).ok(),
            std::env::var(LOG_FORMAT_ENV).ok(),
        )
    }

    fn from_vars(filter: Option<String>, format: Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(filter) = filter.filter(|f| !f.trim().is_empty()) {
            config.env_filter = Some(filter);
        }
        if let Some(format) = format {
            config.format = format.parse().unwrap_or_default();
        }
        config
    }

    /// Sets the maximum log level.
    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Sets the output format.
    #[must_use]
    pub fn with_format(mut self, format: TracingFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets a custom environment filter string.
    ///
    /// Format: `target=level,target=level,...`
    #[must_use]
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Enables span enter/exit events in output.
    #[must_use]
    pub fn with_span_events(mut self, enabled: bool) -> Self {
        self.span_events = enabled;
        self
    }

    /// The configured log level.
    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    /// The configured output format.
    #[must_use]
    pub fn format(&self) -> TracingFormat {
        self.format
    }

    fn filter(&self) -> EnvFilter {
        match &self.env_filter {
            Some(filter) => {
                EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(self.level.as_str()))
            }
            None => EnvFilter::new(self.level.as_str()),
        }
    }

    /// Installs the global subscriber.
    ///
    /// Returns `false` if a subscriber was already installed, in which case
    /// the existing one is kept.
    pub fn init(&self) -> bool {
        let span_events = if self.span_events {
            FmtSpan::ENTER | FmtSpan::EXIT
        } else {
            FmtSpan::NONE
        };

        let installed = match self.format {
            TracingFormat::Pretty => tracing_subscriber::registry()
                .with(self.filter())
                .with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_span_events(span_events),
                )
                .try_init()
                .is_ok(),
            TracingFormat::Compact => tracing_subscriber::registry()
                .with(self.filter())
                .with(
                    tracing_subscriber::fmt::layer()
                        .compact()
                        .with_span_events(span_events),
                )
                .try_init()
                .is_ok(),
            TracingFormat::Json => tracing_subscriber::registry()
                .with(self.filter())
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_span_events(span_events),
                )
                .try_init()
                .is_ok(),
        };

        if installed {
            tracing::info!(
                level = %self.level,
                format = ?self.format,
                "tracing initialized"
            );
        }
        installed
    }
}
