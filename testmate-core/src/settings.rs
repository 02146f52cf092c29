//! Generation settings shared by all model backends.

use std::time::Duration;

/// Sampling and transport settings for a generation call.
///
/// Unset fields fall back to each backend's own defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationSettings {
    /// Maximum tokens to generate.
    pub max_tokens: Option<u64>,
    /// Sampling temperature.
    pub temperature: Option<f64>,
    /// Top-p (nucleus) sampling.
    pub top_p: Option<f64>,
    /// Request timeout.
    pub timeout: Option<Duration>,
}

impl GenerationSettings {
    /// Create new empty settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set max tokens.
    #[must_use]
    pub fn max_tokens(mut self, tokens: u64) -> Self {
        self.max_tokens = Some(tokens);
        self
    }

    /// Set temperature.
    #[must_use]
    pub fn temperature(mut self, temp: f64) -> Self {
        self.temperature = Some(temp);
        self
    }

    /// Set top-p.
    #[must_use]
    pub fn top_p(mut self, p: f64) -> Self {
        self.top_p = Some(p);
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_builder() {
        let settings = GenerationSettings::new()
            .temperature(0.3)
            .max_tokens(4096)
            .timeout(Duration::from_secs(30));

        assert_eq!(settings.temperature, Some(0.3));
        assert_eq!(settings.max_tokens, Some(4096));
        assert_eq!(settings.timeout, Some(Duration::from_secs(30)));
        assert_eq!(settings.top_p, None);
    }
}
