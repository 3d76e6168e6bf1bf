use serde::Deserialize;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    #[error("Failed to read metadata: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse metadata: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectMetadata {
    pub subject_biodata: SubjectBiodata,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectBiodata {
    pub subject_name: String,
    /// Asthma status label, e.g. "asthma" or "healthy".
    pub subject_type: String,
}

impl SubjectMetadata {
    pub fn load(path: &Path) -> Result<Self, MetadataError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn subject_name(&self) -> &str {
        &self.subject_biodata.subject_name
    }

    pub fn asthma_status(&self) -> &str {
        &self.subject_biodata.subject_type
    }
}
