use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum MfccConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Parameters of the MFCC extraction. Every field is optional in the YAML
/// file; missing ones take the defaults the feature tables were built with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MfccConfig {
    pub n_mfcc: usize,
    pub n_mels: usize,
    pub n_fft: usize,
    pub hop_seconds: f64,
    pub window_seconds: f64,
    pub top_db: Option<f64>,
}

impl Default for MfccConfig {
    fn default() -> Self {
        Self {
            n_mfcc: 13,
            n_mels: 32,
            n_fft: 2048,
            hop_seconds: 10e-3,
            window_seconds: 20e-3,
            top_db: Some(80.0),
        }
    }
}

impl MfccConfig {
    pub fn load(path: &Path) -> Result<Self, MfccConfigError> {
        let config_str = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&config_str)
    }

    pub fn from_yaml_str(config_str: &str) -> Result<Self, MfccConfigError> {
        let config: MfccConfig = serde_yaml::from_str(config_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), MfccConfigError> {
        if self.n_mfcc < 2 {
            return Err(MfccConfigError::Invalid(
                "n_mfcc must be at least 2 since coefficient 0 is dropped".into(),
            ));
        }
        if self.n_mfcc > self.n_mels {
            return Err(MfccConfigError::Invalid(format!(
                "n_mfcc ({}) cannot exceed n_mels ({})",
                self.n_mfcc, self.n_mels
            )));
        }
        if self.n_fft < 2 {
            return Err(MfccConfigError::Invalid("n_fft must be at least 2".into()));
        }
        for (name, value) in [
            ("hop_seconds", self.hop_seconds),
            ("window_seconds", self.window_seconds),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(MfccConfigError::Invalid(format!(
                    "{} must be a positive finite number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// Applies hop and window lengths given in milliseconds, then re-validates.
    pub fn with_overrides(
        mut self,
        hop_ms: Option<f64>,
        window_ms: Option<f64>,
    ) -> Result<Self, MfccConfigError> {
        if let Some(hop_ms) = hop_ms {
            self.hop_seconds = hop_ms * 1e-3;
        }
        if let Some(window_ms) = window_ms {
            self.window_seconds = window_ms * 1e-3;
        }
        self.validate()?;
        Ok(self)
    }

    /// Number of feature columns per frame.
    pub fn feature_count(&self) -> usize {
        self.n_mfcc - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_gives_defaults() {
        let config = MfccConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, MfccConfig::default());
        assert_eq!(config.feature_count(), 12);
    }

    #[test]
    fn partial_yaml_overrides_fields() {
        let config = MfccConfig::from_yaml_str("n_mels: 40\nhop_seconds: 0.005\ntop_db: null\n")
            .unwrap();
        assert_eq!(config.n_mels, 40);
        assert_eq!(config.hop_seconds, 0.005);
        assert_eq!(config.top_db, None);
        assert_eq!(config.n_fft, 2048);
    }

    #[test]
    fn rejects_more_coefficients_than_mel_bands() {
        let err = MfccConfig::from_yaml_str("n_mfcc: 40\nn_mels: 32\n").unwrap_err();
        assert!(matches!(err, MfccConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_zero_hop() {
        let err = MfccConfig::from_yaml_str("hop_seconds: 0\n").unwrap_err();
        assert!(matches!(err, MfccConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_infinite_or_nan_lengths() {
        for yaml in ["hop_seconds: .inf\n", "window_seconds: .inf\n", "hop_seconds: .nan\n"] {
            let err = MfccConfig::from_yaml_str(yaml).unwrap_err();
            assert!(matches!(err, MfccConfigError::Invalid(_)), "{yaml}");
        }
    }

    #[test]
    fn overrides_are_milliseconds() {
        let config = MfccConfig::default()
            .with_overrides(Some(5.0), Some(25.0))
            .unwrap();
        assert!((config.hop_seconds - 0.005).abs() < 1e-15);
        assert!((config.window_seconds - 0.025).abs() < 1e-15);

        let unchanged = MfccConfig::default().with_overrides(None, None).unwrap();
        assert_eq!(unchanged, MfccConfig::default());
    }

    #[test]
    fn invalid_override_is_rejected() {
        for (hop, window) in [(Some(0.0), None), (Some(f64::INFINITY), None), (None, Some(-20.0))] {
            let err = MfccConfig::default().with_overrides(hop, window).unwrap_err();
            assert!(matches!(err, MfccConfigError::Invalid(_)));
        }
    }

    #[test]
    fn shipped_config_matches_defaults() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../config/mfcc.yaml");
        assert_eq!(MfccConfig::load(&path).unwrap(), MfccConfig::default());
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mfcc.yaml");
        std::fs::write(&path, "n_mfcc: 20\nn_mels: 64\n").unwrap();
        let config = MfccConfig::load(&path).unwrap();
        assert_eq!(config.feature_count(), 19);
    }
}
