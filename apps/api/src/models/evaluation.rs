use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::scoring::record::RubricRecord;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EvaluationRow {
    pub id: Uuid,
    pub source_name: String,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub gpa: String,
    pub school_activities: String,
    pub awards: String,
    pub volunteer_service: String,
    pub leadership: String,
    pub scores_explanation: String,
    pub created_at: DateTime<Utc>,
}

impl From<EvaluationRow> for RubricRecord {
    fn from(row: EvaluationRow) -> Self {
        RubricRecord {
            name: row.name,
            email: row.email,
            phone_number: row.phone_number,
            gpa: row.gpa,
            school_activities: row.school_activities,
            awards: row.awards,
            volunteer_service: row.volunteer_service,
            leadership: row.leadership,
            scores_explanation: row.scores_explanation,
        }
    }
}
