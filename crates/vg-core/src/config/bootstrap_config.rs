use std::time::Duration;

use anyhow::bail;

/// Branding screen stays up at least this long, however fast the setup check is.
pub const DEFAULT_MIN_DISPLAY_DURATION: Duration = Duration::from_secs(2);

/// Bootstrap timing configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapConfig {
    /// Minimum time spent in `Delaying` before the setup check runs.
    pub min_display_duration: Duration,

    /// Upper bound on the setup status check. `None` waits indefinitely.
    pub setup_check_timeout: Option<Duration>,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            min_display_duration: DEFAULT_MIN_DISPLAY_DURATION,
            setup_check_timeout: None,
        }
    }
}

impl BootstrapConfig {
    /// Read the `[bootstrap]` table. Missing keys keep their defaults.
    ///
    /// ```toml
    /// [bootstrap]
    /// min_display_ms = 2000
    /// setup_check_timeout_ms = 10000  # 0 or absent: no timeout
    /// ```
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let mut config = Self::default();
        let Some(section) = toml_value.get("bootstrap") else {
            return Ok(config);
        };

        if let Some(ms) = read_millis(section, "min_display_ms")? {
            config.min_display_duration = Duration::from_millis(ms);
        }
        if let Some(ms) = read_millis(section, "setup_check_timeout_ms")? {
            config.setup_check_timeout = timeout_from_millis(ms);
        }

        Ok(config)
    }

    pub fn with_min_display_duration(mut self, duration: Duration) -> Self {
        self.min_display_duration = duration;
        self
    }

    pub fn with_setup_check_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.setup_check_timeout = timeout;
        self
    }
}

/// Zero disables the timeout.
pub fn timeout_from_millis(ms: u64) -> Option<Duration> {
    (ms > 0).then(|| Duration::from_millis(ms))
}

fn read_millis(section: &toml::Value, key: &str) -> anyhow::Result<Option<u64>> {
    let Some(value) = section.get(key) else {
        return Ok(None);
    };
    let Some(ms) = value.as_integer() else {
        bail!("bootstrap.{key} must be an integer number of milliseconds");
    };
    if ms < 0 {
        bail!("bootstrap.{key} must not be negative, got {ms}");
    }
    Ok(Some(ms as u64))
}
