use csv::WriterBuilder;
use ndarray::ArrayView2;
use std::fs::OpenOptions;
use std::path::Path;

use super::Phonon;

/// Rows contributed by one subject to one phonon table.
#[derive(Debug)]
pub struct PhononTable<'a> {
    pub subject_name: &'a str,
    pub asthma_status: &'a str,
    pub feature_count: usize,
    rows: Vec<Vec<String>>,
}

impl<'a> PhononTable<'a> {
    pub fn new(subject_name: &'a str, asthma_status: &'a str, feature_count: usize) -> Self {
        Self {
            subject_name,
            asthma_status,
            feature_count,
            rows: Vec::new(),
        }
    }

    /// Header row: unnamed frame index, `mb_name`, `f1..fN`, `phonon`, `asthma_status`.
    pub fn header(feature_count: usize) -> Vec<String> {
        let mut header = vec![String::new(), "mb_name".to_string()];
        header.extend((1..=feature_count).map(|i| format!("f{}", i)));
        header.push("phonon".to_string());
        header.push("asthma_status".to_string());
        header
    }

    /// Adds every frame of one segment. Frame indices restart at 0 per segment.
    pub fn push_segment(&mut self, phonon: Phonon, segment_index: usize, features: ArrayView2<f64>) {
        let label = format!("{}_{}", phonon, segment_index);
        for (frame, coefficients) in features.rows().into_iter().enumerate() {
            let mut row = Vec::with_capacity(self.feature_count + 4);
            row.push(frame.to_string());
            row.push(self.subject_name.to_string());
            row.extend(coefficients.iter().map(|&c| format_float(c)));
            row.push(label.clone());
            row.push(self.asthma_status.to_string());
            self.rows.push(row);
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Appends the rows to `path`, writing the header first when asked to.
    pub fn append_to(&self, path: &Path, write_header: bool) -> Result<usize, csv::Error> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);

        if write_header {
            writer.write_record(Self::header(self.feature_count))?;
        }
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(self.rows.len())
    }
}

/// Shortest round-trip float text in the layout the existing tables use:
/// positional for exponents in `-4..16`, otherwise `d.ddde±XX`, and always a
/// fractional part on whole numbers (`3.0`, `3.2e-05`, `1e+16`).
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }

    let sci = format!("{:e}", value.abs());
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let sign = if value < 0.0 { "-" } else { "" };

    if !(-4..16).contains(&exponent) {
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        return format!("{}{}e{}{:02}", sign, mantissa, exp_sign, exponent.abs());
    }

    let body = if exponent < 0 {
        format!("0.{}{}", "0".repeat((-exponent - 1) as usize), digits)
    } else {
        let int_len = exponent as usize + 1;
        if digits.len() > int_len {
            format!("{}.{}", &digits[..int_len], &digits[int_len..])
        } else {
            format!("{}{}.0", digits, "0".repeat(int_len - digits.len()))
        }
    };
    format!("{}{}", sign, body)
}
