#![forbid(unsafe_code)]

//! Controller configuration.
//!
//! Configuration affects diagnostics only. It never changes which behaviors
//! run or which hooks are forwarded to.

/// Default label used for the host in log events.
pub const DEFAULT_HOST_LABEL: &str = "host";

/// Settings applied to a [`Controller`](crate::Controller) at attach time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleConfig {
    /// Identifies the host in log events (e.g. `"sidebar"`, `"button#ok"`).
    pub label: String,
    /// Emit a WARN event when `update` or `destroy` is called on a spent
    /// controller. The call still executes either way.
    pub warn_on_spent: bool,
}

impl LifecycleConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            label: DEFAULT_HOST_LABEL.to_string(),
            warn_on_spent: true,
        }
    }

    /// Set the host label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Enable or disable warnings on spent-controller calls.
    #[must_use]
    pub fn with_warn_on_spent(mut self, warn: bool) -> Self {
        self.warn_on_spent = warn;
        self
    }
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = LifecycleConfig::default();
        assert_eq!(config.label, DEFAULT_HOST_LABEL);
        assert!(config.warn_on_spent);
    }

    #[test]
    fn builders() {
        let config = LifecycleConfig::new()
            .with_label("sidebar")
            .with_warn_on_spent(false);
        assert_eq!(config.label, "sidebar");
        assert!(!config.warn_on_spent);
    }
}
