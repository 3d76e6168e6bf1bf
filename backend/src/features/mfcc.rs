use ndarray::{Array2, Axis};
use rustdct::{Dct2, DctPlanner, TransformType2And3};
use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};
use std::sync::Arc;

use super::config::MfccConfig;

/// Floor applied to mel power before taking the log.
const AMIN: f64 = 1e-10;

// Slaney mel scale: linear below 1 kHz, logarithmic above.
const F_SP: f64 = 200.0 / 3.0;
const MIN_LOG_HZ: f64 = 1000.0;
const MIN_LOG_MEL: f64 = MIN_LOG_HZ / F_SP;

#[derive(Debug, thiserror::Error)]
pub enum MfccError {
    #[error("Window of {window} samples does not fit in an FFT of {n_fft}")]
    WindowTooLong { window: usize, n_fft: usize },
    #[error("Hop length must be at least one sample")]
    ZeroHop,
    #[error("Window length must be at least one sample")]
    ZeroWindow,
    #[error("Cannot compute MFCC of an empty signal")]
    EmptySignal,
}

/// MFCC extractor for one sample rate.
///
/// Frames are centred (the signal is zero padded by `n_fft / 2` on both
/// sides), windowed with a periodic Hann window of the configured length
/// centred inside `n_fft`, mapped through a Slaney-normalised mel filterbank,
/// converted to decibels and decorrelated with an orthonormal DCT-II.
/// Coefficient 0 is dropped, so each frame yields `n_mfcc - 1` features.
pub struct MfccExtractor {
    n_fft: usize,
    hop_length: usize,
    n_mfcc: usize,
    top_db: Option<f64>,
    window: Vec<f64>,
    mel_basis: Array2<f64>,
    fft: Arc<dyn Fft<f64>>,
    dct: Arc<dyn TransformType2And3<f64>>,
}

impl MfccExtractor {
    pub fn new(config: &MfccConfig, sample_rate: u32) -> Result<Self, MfccError> {
        let sr = f64::from(sample_rate);
        let hop_length = (config.hop_seconds * sr).floor() as usize;
        let win_length = (config.window_seconds * sr).floor() as usize;

        if hop_length == 0 {
            return Err(MfccError::ZeroHop);
        }
        if win_length == 0 {
            return Err(MfccError::ZeroWindow);
        }
        if win_length > config.n_fft {
            return Err(MfccError::WindowTooLong {
                window: win_length,
                n_fft: config.n_fft,
            });
        }

        log::debug!(
            "MFCC setup: sr={} hop={} win={} n_fft={} n_mels={}",
            sample_rate,
            hop_length,
            win_length,
            config.n_fft,
            config.n_mels
        );

        Ok(Self {
            n_fft: config.n_fft,
            hop_length,
            n_mfcc: config.n_mfcc,
            top_db: config.top_db,
            window: centered_hann(win_length, config.n_fft),
            mel_basis: mel_filterbank(sr, config.n_fft, config.n_mels),
            fft: FftPlanner::new().plan_fft_forward(config.n_fft),
            dct: DctPlanner::new().plan_dct2(config.n_mels),
        })
    }

    pub fn hop_length(&self) -> usize {
        self.hop_length
    }

    pub fn feature_count(&self) -> usize {
        self.n_mfcc - 1
    }

    pub fn frame_count(&self, signal_len: usize) -> usize {
        let padded_len = signal_len + 2 * (self.n_fft / 2);
        1 + padded_len.saturating_sub(self.n_fft) / self.hop_length
    }

    /// Returns a `frames × (n_mfcc - 1)` matrix.
    pub fn compute(&self, signal: &[f64]) -> Result<Array2<f64>, MfccError> {
        if signal.is_empty() {
            return Err(MfccError::EmptySignal);
        }

        let power = self.power_spectrogram(signal);
        let mut mel_db = self.mel_basis.dot(&power);
        power_to_db(&mut mel_db, self.top_db);

        let frames = mel_db.ncols();
        let mut features = Array2::zeros((frames, self.feature_count()));
        let mut buffer = vec![0.0; mel_db.nrows()];

        for (t, column) in mel_db.axis_iter(Axis(1)).enumerate() {
            for (slot, &value) in buffer.iter_mut().zip(column.iter()) {
                *slot = value;
            }
            self.dct_ortho(&mut buffer);
            for k in 1..self.n_mfcc {
                features[[t, k - 1]] = buffer[k];
            }
        }

        Ok(features)
    }

    /// `|STFT|^2`, shaped `(n_fft / 2 + 1) × frames`.
    pub fn power_spectrogram(&self, signal: &[f64]) -> Array2<f64> {
        let pad = self.n_fft / 2;
        let mut padded = vec![0.0; signal.len() + 2 * pad];
        padded[pad..pad + signal.len()].copy_from_slice(signal);

        let frames = self.frame_count(signal.len());
        let bins = self.n_fft / 2 + 1;
        let mut spectrogram = Array2::zeros((bins, frames));
        let mut buffer = vec![Complex::new(0.0, 0.0); self.n_fft];

        for t in 0..frames {
            let offset = t * self.hop_length;
            let frame = &padded[offset..offset + self.n_fft];
            for ((slot, &x), &w) in buffer.iter_mut().zip(frame).zip(&self.window) {
                *slot = Complex::new(x * w, 0.0);
            }
            self.fft.process(&mut buffer);
            for (f, value) in buffer[..bins].iter().enumerate() {
                spectrogram[[f, t]] = value.norm_sqr();
            }
        }

        spectrogram
    }

    fn dct_ortho(&self, buffer: &mut [f64]) {
        self.dct.process_dct2(buffer);
        let n = buffer.len() as f64;
        let first = (1.0 / n).sqrt();
        let rest = (2.0 / n).sqrt();
        for (k, value) in buffer.iter_mut().enumerate() {
            *value *= if k == 0 { first } else { rest };
        }
    }
}

/// Decibels relative to 1.0, optionally clipped to `top_db` below the peak.
fn power_to_db(values: &mut Array2<f64>, top_db: Option<f64>) {
    values.mapv_inplace(|v| 10.0 * v.max(AMIN).log10());
    if let Some(top_db) = top_db {
        let peak = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let floor = peak - top_db;
        values.mapv_inplace(|v| v.max(floor));
    }
}

/// Periodic Hann window of `win_length`, zero padded to `n_fft` around the centre.
fn centered_hann(win_length: usize, n_fft: usize) -> Vec<f64> {
    let mut window = vec![0.0; n_fft];
    let offset = (n_fft - win_length) / 2;
    let len = win_length as f64;
    for n in 0..win_length {
        window[offset + n] = 0.5 - 0.5 * (2.0 * std::f64::consts::PI * n as f64 / len).cos();
    }
    window
}

pub fn hz_to_mel(hz: f64) -> f64 {
    if hz >= MIN_LOG_HZ {
        MIN_LOG_MEL + (hz / MIN_LOG_HZ).ln() / log_step()
    } else {
        hz / F_SP
    }
}

pub fn mel_to_hz(mel: f64) -> f64 {
    if mel >= MIN_LOG_MEL {
        MIN_LOG_HZ * (log_step() * (mel - MIN_LOG_MEL)).exp()
    } else {
        F_SP * mel
    }
}

fn log_step() -> f64 {
    6.4f64.ln() / 27.0
}

/// Triangular filters between 0 Hz and Nyquist, each scaled to unit area
/// (Slaney normalisation). Shaped `n_mels × (n_fft / 2 + 1)`.
pub fn mel_filterbank(sample_rate: f64, n_fft: usize, n_mels: usize) -> Array2<f64> {
    let bins = n_fft / 2 + 1;
    let fft_freqs: Vec<f64> = (0..bins)
        .map(|k| k as f64 * sample_rate / n_fft as f64)
        .collect();

    let min_mel = hz_to_mel(0.0);
    let max_mel = hz_to_mel(sample_rate / 2.0);
    let edges: Vec<f64> = (0..n_mels + 2)
        .map(|i| mel_to_hz(min_mel + (max_mel - min_mel) * i as f64 / (n_mels + 1) as f64))
        .collect();

    let mut weights = Array2::zeros((n_mels, bins));
    for i in 0..n_mels {
        let (left, center, right) = (edges[i], edges[i + 1], edges[i + 2]);
        let enorm = 2.0 / (right - left);
        for (k, &freq) in fft_freqs.iter().enumerate() {
            let rising = (freq - left) / (center - left);
            let falling = (right - freq) / (right - center);
            weights[[i, k]] = rising.min(falling).max(0.0) * enorm;
        }
    }
    weights
}
