//! Rubric Record Builder — turns a model response into one fixed-column scoring row.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::scoring::envelope::{EnvelopeDefect, ResponseEnvelope};
use crate::scoring::fields::{extract_field, NOT_FOUND};
use crate::scoring::sections::{split_sections, SectionName};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("malformed response envelope: {0}")]
    MalformedEnvelope(EnvelopeDefect),
}

/// A labeled field the model is asked to report on its own line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RubricField {
    Name,
    Email,
    PhoneNumber,
    Gpa,
    SchoolActivities,
    Awards,
    VolunteerService,
    Leadership,
}

impl RubricField {
    pub const ALL: [RubricField; 8] = [
        RubricField::Name,
        RubricField::Email,
        RubricField::PhoneNumber,
        RubricField::Gpa,
        RubricField::SchoolActivities,
        RubricField::Awards,
        RubricField::VolunteerService,
        RubricField::Leadership,
    ];

    /// Label as written before the colon in the response.
    pub fn label(self) -> &'static str {
        match self {
            RubricField::Name => "Name",
            RubricField::Email => "Email",
            RubricField::PhoneNumber => "Phone Number",
            RubricField::Gpa => "GPA",
            RubricField::SchoolActivities => "School Activities",
            RubricField::Awards => "Awards",
            RubricField::VolunteerService => "Volunteer Service",
            RubricField::Leadership => "Leadership",
        }
    }

    pub fn section(self) -> SectionName {
        match self {
            RubricField::Name | RubricField::Email | RubricField::PhoneNumber => {
                SectionName::PersonalInformation
            }
            _ => SectionName::Grading,
        }
    }
}

/// Column names of the persisted sheet, in order. Changing this changes the stored schema.
pub const RECORD_COLUMNS: [&str; 9] = [
    "Name",
    "Email",
    "Phone Number",
    "GPA",
    "School Activities",
    "Awards",
    "Volunteer Service",
    "Leadership",
    "Scores Explanation",
];

/// One scoring row. Every value is either text the model wrote or [`NOT_FOUND`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RubricRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Phone Number")]
    pub phone_number: String,
    #[serde(rename = "GPA")]
    pub gpa: String,
    #[serde(rename = "School Activities")]
    pub school_activities: String,
    #[serde(rename = "Awards")]
    pub awards: String,
    #[serde(rename = "Volunteer Service")]
    pub volunteer_service: String,
    #[serde(rename = "Leadership")]
    pub leadership: String,
    #[serde(rename = "Scores Explanation")]
    pub scores_explanation: String,
}

impl RubricRecord {
    pub fn field(&self, field: RubricField) -> &str {
        match field {
            RubricField::Name => &self.name,
            RubricField::Email => &self.email,
            RubricField::PhoneNumber => &self.phone_number,
            RubricField::Gpa => &self.gpa,
            RubricField::SchoolActivities => &self.school_activities,
            RubricField::Awards => &self.awards,
            RubricField::VolunteerService => &self.volunteer_service,
            RubricField::Leadership => &self.leadership,
        }
    }

    /// Values in [`RECORD_COLUMNS`] order.
    pub fn values(&self) -> [&str; 9] {
        [
            self.name.as_str(),
            self.email.as_str(),
            self.phone_number.as_str(),
            self.gpa.as_str(),
            self.school_activities.as_str(),
            self.awards.as_str(),
            self.volunteer_service.as_str(),
            self.leadership.as_str(),
            self.scores_explanation.as_str(),
        ]
    }

    /// Labeled fields that fell back to [`NOT_FOUND`].
    pub fn missing_fields(&self) -> Vec<RubricField> {
        RubricField::ALL
            .into_iter()
            .filter(|f| self.field(*f) == NOT_FOUND)
            .collect()
    }
}

/// Builds a record from raw response text. Never fails; absent sections and fields
/// degrade to [`NOT_FOUND`].
pub fn record_from_text(raw_text: &str) -> RubricRecord {
    let sections = split_sections(raw_text);
    let field = |f: RubricField| extract_field(sections.get(f.section()), f.label());

    let record = RubricRecord {
        name: field(RubricField::Name),
        email: field(RubricField::Email),
        phone_number: field(RubricField::PhoneNumber),
        gpa: field(RubricField::Gpa),
        school_activities: field(RubricField::SchoolActivities),
        awards: field(RubricField::Awards),
        volunteer_service: field(RubricField::VolunteerService),
        leadership: field(RubricField::Leadership),
        scores_explanation: sections.get(SectionName::Explanation).trim().to_string(),
    };

    if !sections.unrecognized().is_empty() {
        debug!(
            "Ignored {} unrecognized section(s) in model response",
            sections.unrecognized().len()
        );
    }

    record
}

/// Builds a record from a decoded model response.
pub fn build_record(response: &Value) -> Result<RubricRecord, ExtractionError> {
    let envelope = ResponseEnvelope::classify(response);
    if envelope.ignored_elements() > 0 {
        debug!(
            "Model response has {} extra content element(s); only the first is parsed",
            envelope.ignored_elements()
        );
    }
    let text = envelope
        .primary_text()
        .map_err(ExtractionError::MalformedEnvelope)?;
    Ok(record_from_text(text))
}
