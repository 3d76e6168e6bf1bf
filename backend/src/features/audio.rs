use hound::{SampleFormat, WavReader};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("WAV decoding error: {0}")]
    Wav(#[from] hound::Error),
    #[error("Unsupported WAV layout: {0}")]
    Unsupported(String),
}

/// First channel of a recording, as `f64` samples in `[-1, 1)`.
#[derive(Debug, Clone)]
pub struct Audio {
    pub samples: Vec<f64>,
    pub sample_rate: u32,
}

impl Audio {
    pub fn load_wav(path: &Path) -> Result<Self, AudioError> {
        let reader = WavReader::open(path)?;
        let spec = reader.spec();
        log::debug!(
            "WAV {}: {} Hz, {} channels, {:?}",
            path.display(),
            spec.sample_rate,
            spec.channels,
            spec.sample_format
        );

        let channels = spec.channels as usize;
        if channels == 0 {
            return Err(AudioError::Unsupported("zero channels".into()));
        }

        let samples = match spec.sample_format {
            SampleFormat::Float => reader
                .into_samples::<f32>()
                .step_by(channels)
                .map(|s| s.map(f64::from))
                .collect::<Result<Vec<_>, _>>()?,
            SampleFormat::Int => {
                if spec.bits_per_sample == 0 || spec.bits_per_sample > 32 {
                    return Err(AudioError::Unsupported(format!(
                        "{} bits per sample",
                        spec.bits_per_sample
                    )));
                }
                let max = (1u64 << (spec.bits_per_sample - 1)) as f64;
                reader
                    .into_samples::<i32>()
                    .step_by(channels)
                    .map(|s| s.map(|v| f64::from(v) / max))
                    .collect::<Result<Vec<_>, _>>()?
            }
        };

        Ok(Self {
            samples,
            sample_rate: spec.sample_rate,
        })
    }

    pub fn duration_seconds(&self) -> f64 {
        self.samples.len() as f64 / f64::from(self.sample_rate)
    }

    /// `floor(seconds * sample_rate)`, with negative times pinned to 0.
    pub fn seconds_to_samples(&self, seconds: f64) -> usize {
        seconds_to_samples(seconds, self.sample_rate)
    }

    /// Samples in `[start, end)`, clamped to the recording.
    pub fn segment(&self, start: usize, end: usize) -> &[f64] {
        let end = end.min(self.samples.len());
        let start = start.min(end);
        &self.samples[start..end]
    }
}

pub fn seconds_to_samples(seconds: f64, sample_rate: u32) -> usize {
    let samples = (seconds * f64::from(sample_rate)).floor();
    if samples <= 0.0 { 0 } else { samples as usize }
}
