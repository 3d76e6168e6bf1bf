//! Offline feature extraction: annotated phonon recordings to MFCC tables.

pub mod annotation;
pub mod audio;
pub mod config;
pub mod dataset;
pub mod export;
pub mod metadata;
pub mod mfcc;

use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Annotated sound types, in the order their tables are written.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, EnumIter, AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum Phonon {
    Aa,
    Ee,
    Ii,
    Xx,
    Oo,
    Uu,
    Yy,
}

impl Phonon {
    pub fn table_file_name(&self) -> String {
        format!("{}.csv", self)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Audio error: {0}")]
    Audio(#[from] audio::AudioError),
    #[error("Annotation error: {0}")]
    Annotation(#[from] annotation::AnnotationError),
    #[error("Metadata error: {0}")]
    Metadata(#[from] metadata::MetadataError),
    #[error("MFCC error: {0}")]
    Mfcc(#[from] mfcc::MfccError),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Subject {subject}: {source}")]
    Subject {
        subject: String,
        #[source]
        source: Box<PipelineError>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn phonons_iterate_in_table_order() {
        let names: Vec<String> = Phonon::iter().map(|p| p.to_string()).collect();
        assert_eq!(names, ["aa", "ee", "ii", "xx", "oo", "uu", "yy"]);
    }

    #[test]
    fn phonon_parses_from_label() {
        assert_eq!(Phonon::from_str("oo").unwrap(), Phonon::Oo);
        assert!(Phonon::from_str("zz").is_err());
        assert_eq!(Phonon::Yy.table_file_name(), "yy.csv");
    }
}
