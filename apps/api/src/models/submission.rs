use serde::{Deserialize, Serialize};

/// One row of the submissions CSV: a candidate's details plus the
/// name of the PDF stored in the resumes directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmissionRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Email")]
    pub email: String,
    /// Comma-separated free text, exactly as the candidate typed it.
    #[serde(rename = "Skills")]
    pub skills: String,
    #[serde(rename = "Filename")]
    pub filename: String,
}
