//! Resume structure: the canonical output of the CV pipeline.
//!
//! Every sequence defaults to empty and every string to `""`, so renderers
//! only ever check for emptiness. Model output is decoded straight into these
//! types, which is why `null` is accepted anywhere a value is expected.

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeStructure {
    #[serde(deserialize_with = "nullable")]
    pub header: ResumeHeader,
    #[serde(deserialize_with = "nullable")]
    pub summary: String,
    #[serde(deserialize_with = "nullable")]
    pub experience: Vec<ExperienceEntry>,
    #[serde(deserialize_with = "nullable")]
    pub projects: Vec<ProjectEntry>,
    #[serde(deserialize_with = "nullable")]
    pub education: Vec<EducationEntry>,
    #[serde(deserialize_with = "nullable")]
    pub skills: Skills,
    #[serde(deserialize_with = "nullable")]
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeHeader {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub email: String,
    #[serde(deserialize_with = "nullable")]
    pub phone: String,
    #[serde(
        alias = "linkedin",
        deserialize_with = "optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub linkedin_url: Option<String>,
    #[serde(
        alias = "github",
        deserialize_with = "optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub github_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    #[serde(deserialize_with = "nullable")]
    pub company: String,
    #[serde(deserialize_with = "nullable")]
    pub duration: String,
    #[serde(deserialize_with = "nullable")]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectEntry {
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    #[serde(deserialize_with = "nullable")]
    pub description: String,
    #[serde(deserialize_with = "nullable")]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    #[serde(deserialize_with = "nullable")]
    pub degree: String,
    #[serde(deserialize_with = "nullable")]
    pub institution: String,
    #[serde(deserialize_with = "nullable")]
    pub duration: String,
    /// Free text; models sometimes emit a bare number (`3.8`).
    #[serde(deserialize_with = "optional_text", skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,
}

/// Technical skills in display order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skills {
    #[serde(deserialize_with = "nullable")]
    pub technical: Vec<String>,
}

/// Treats an explicit `null` the same as a missing field.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Accepts a string, a number or `null` for optional free-text fields.
fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TextOrNumber {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(
        Option::<TextOrNumber>::deserialize(deserializer)?.map(|value| match value {
            TextOrNumber::Text(s) => s,
            TextOrNumber::Number(n) => n.to_string(),
        }),
    )
}

impl ResumeHeader {
    pub fn linkedin(&self) -> Option<&str> {
        non_blank(self.linkedin_url.as_deref())
    }

    pub fn github(&self) -> Option<&str> {
        non_blank(self.github_url.as_deref())
    }
}

impl EducationEntry {
    pub fn gpa(&self) -> Option<&str> {
        non_blank(self.gpa.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
