use indicatif::{ProgressBar, ProgressStyle};
use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use strum::IntoEnumIterator;

use super::annotation::{group_by_phonon, load_annotations};
use super::audio::Audio;
use super::config::MfccConfig;
use super::export::PhononTable;
use super::metadata::SubjectMetadata;
use super::mfcc::MfccExtractor;
use super::{Phonon, PipelineError};

lazy_static! {
    static ref AUDIO_FILE: Regex = Regex::new(r"^.+before.+[.]wav$").expect("valid audio pattern");
    static ref ANNOTATION_FILE: Regex =
        Regex::new(r"^.+before.+[.]anote[.]txt$").expect("valid annotation pattern");
    static ref METADATA_FILE: Regex = Regex::new(r"^.+[.]json$").expect("valid metadata pattern");
}

/// The three inputs of one recorded subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectFiles {
    pub name: String,
    pub audio: PathBuf,
    pub annotation: PathBuf,
    pub metadata: PathBuf,
}

/// Subject directories of a dataset, sorted by name.
pub fn list_subject_dirs(data_dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(data_dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            dirs.push(entry.path());
        }
    }
    dirs.sort();
    Ok(dirs)
}

/// Picks the pre-treatment recording, its annotation and the metadata file.
/// When several files match a role the last one in name order wins.
pub fn find_subject_files(dir: &Path) -> std::io::Result<Option<SubjectFiles>> {
    let mut names: Vec<String> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect();
    names.sort();

    let mut audio = None;
    let mut annotation = None;
    let mut metadata = None;
    for name in names {
        if AUDIO_FILE.is_match(&name) {
            audio = Some(dir.join(&name));
        }
        if ANNOTATION_FILE.is_match(&name) {
            annotation = Some(dir.join(&name));
        }
        if METADATA_FILE.is_match(&name) {
            metadata = Some(dir.join(&name));
        }
    }

    let subject = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(match (audio, annotation, metadata) {
        (Some(audio), Some(annotation), Some(metadata)) => Some(SubjectFiles {
            name: subject,
            audio,
            annotation,
            metadata,
        }),
        _ => None,
    })
}

#[derive(Debug, Default)]
pub struct PipelineReport {
    pub processed: Vec<String>,
    pub skipped: Vec<String>,
    pub rows_written: usize,
}

pub struct FeaturePipeline {
    config: MfccConfig,
    save_dir: PathBuf,
    show_progress: bool,
}

impl FeaturePipeline {
    pub fn new(config: MfccConfig, save_dir: impl Into<PathBuf>) -> Self {
        Self {
            config,
            save_dir: save_dir.into(),
            show_progress: false,
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn table_path(&self, phonon: Phonon) -> PathBuf {
        self.save_dir.join(phonon.table_file_name())
    }

    /// Processes every complete subject under `data_dir`. Tables get their
    /// header from the first processed subject only; later subjects append.
    pub fn run(&self, data_dir: &Path) -> Result<PipelineReport, PipelineError> {
        fs::create_dir_all(&self.save_dir)?;

        let mut report = PipelineReport::default();
        for dir in list_subject_dirs(data_dir)? {
            let Some(files) = find_subject_files(&dir)? else {
                log::warn!("Skipping {}: missing recording, annotation or metadata", dir.display());
                report
                    .skipped
                    .push(dir.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default());
                continue;
            };

            log::info!("Processing subject {} ({})", report.processed.len(), files.name);
            let first_subject = report.processed.is_empty();
            let rows = self
                .process_subject(&files, first_subject)
                .map_err(|e| PipelineError::Subject {
                    subject: files.name.clone(),
                    source: Box::new(e),
                })?;

            report.rows_written += rows;
            report.processed.push(files.name);
        }

        Ok(report)
    }

    pub fn process_subject(
        &self,
        files: &SubjectFiles,
        write_header: bool,
    ) -> Result<usize, PipelineError> {
        let audio = Audio::load_wav(&files.audio)?;
        let metadata = SubjectMetadata::load(&files.metadata)?;
        let annotations = load_annotations(&files.annotation, audio.sample_rate)?;
        let extractor = MfccExtractor::new(&self.config, audio.sample_rate)?;
        let mut groups = group_by_phonon(&annotations);

        let progress = self.progress_bar(Phonon::iter().count() as u64, &files.name);
        let mut rows_written = 0;

        for phonon in Phonon::iter() {
            progress.set_message(phonon.to_string());
            let mut table = PhononTable::new(
                metadata.subject_name(),
                metadata.asthma_status(),
                extractor.feature_count(),
            );

            for (idx, annotation) in groups.remove(&phonon).unwrap_or_default().iter().enumerate() {
                let segment = audio.segment(annotation.start, annotation.end);
                if segment.is_empty() {
                    log::warn!(
                        "{}: empty {} segment {} ({}..{}), skipped",
                        files.name,
                        phonon,
                        idx,
                        annotation.start,
                        annotation.end
                    );
                    continue;
                }
                let features = extractor.compute(segment)?;
                table.push_segment(phonon, idx, features.view());
            }

            rows_written += table.append_to(&self.table_path(phonon), write_header)?;
            progress.inc(1);
        }

        progress.finish_and_clear();
        log::debug!("{}: wrote {} rows", files.name, rows_written);
        Ok(rows_written)
    }

    fn progress_bar(&self, len: u64, subject: &str) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let bar = ProgressBar::new(len);
        let style = ProgressStyle::with_template("{prefix} [{bar:30.cyan}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(style);
        bar.set_prefix(subject.to_string());
        bar
    }
}
