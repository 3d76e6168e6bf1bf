use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

use super::Phonon;
use super::audio::seconds_to_samples;

#[derive(Debug, thiserror::Error)]
pub enum AnnotationError {
    #[error("Failed to read annotation file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed annotation on line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

/// One labelled span of a recording, in samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Annotation {
    pub start: usize,
    pub end: usize,
    pub phonon: Phonon,
}

impl Annotation {
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

pub fn load_annotations(path: &Path, sample_rate: u32) -> Result<Vec<Annotation>, AnnotationError> {
    let text = std::fs::read_to_string(path)?;
    parse_annotations(&text, sample_rate)
}

/// Parses `start<TAB>end<TAB>label` lines (times in seconds). Labels that are
/// not a known phonon are dropped.
pub fn parse_annotations(text: &str, sample_rate: u32) -> Result<Vec<Annotation>, AnnotationError> {
    let mut annotations = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        if raw.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = raw.split('\t').map(str::trim).collect();
        if fields.len() < 3 {
            return Err(AnnotationError::Malformed {
                line,
                reason: format!("expected 3 tab-separated fields, found {}", fields.len()),
            });
        }

        let start = parse_seconds(fields[0], line)?;
        let end = parse_seconds(fields[1], line)?;

        let Ok(phonon) = Phonon::from_str(fields[2]) else {
            log::debug!("Ignoring annotation label {:?} on line {}", fields[2], line);
            continue;
        };

        annotations.push(Annotation {
            start: seconds_to_samples(start, sample_rate),
            end: seconds_to_samples(end, sample_rate),
            phonon,
        });
    }

    Ok(annotations)
}

fn parse_seconds(field: &str, line: usize) -> Result<f64, AnnotationError> {
    field
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| AnnotationError::Malformed {
            line,
            reason: format!("{:?} is not a time in seconds", field),
        })
}

/// Groups annotations by phonon, keeping file order within each group.
pub fn group_by_phonon(annotations: &[Annotation]) -> BTreeMap<Phonon, Vec<Annotation>> {
    let mut groups: BTreeMap<Phonon, Vec<Annotation>> = BTreeMap::new();
    for annotation in annotations {
        groups.entry(annotation.phonon).or_default().push(*annotation);
    }
    groups
}
