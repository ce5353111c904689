use aws_sdk_s3::primitives::ByteStream;
use sqlx::{PgExecutor, PgPool};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::evaluation::EvaluationRow;
use crate::scoring::record::{RubricRecord, RECORD_COLUMNS};

/// Where the rendered score sheet is written.
pub struct SheetTarget<'a> {
    pub s3: &'a aws_sdk_s3::Client,
    pub bucket: &'a str,
    pub key: &'a str,
}

/// Advisory lock key serializing score sheet publication across connections.
const SHEET_LOCK_KEY: i64 = 0x7363_6f72_6573;

/// Appends one record as a new row, then re-publishes the full score sheet.
/// CRITICAL: This is append-only. Never UPDATE existing rows.
///
/// The insert commits only after the sheet upload succeeds, so a failed upload leaves
/// neither a row nor a sheet change behind. Appends are serialized on [`SHEET_LOCK_KEY`]
/// so every uploaded sheet includes all committed rows.
pub async fn append_evaluation(
    pool: &PgPool,
    sheet: SheetTarget<'_>,
    source_name: &str,
    record: &RubricRecord,
) -> Result<EvaluationRow, AppError> {
    let mut tx = pool.begin().await?;

    // 1. Serialize with other appends until commit/rollback
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(SHEET_LOCK_KEY)
        .execute(&mut *tx)
        .await?;

    // 2. Append-only INSERT
    let row = sqlx::query_as::<_, EvaluationRow>(
        r#"
        INSERT INTO evaluations
            (id, source_name, name, email, phone_number, gpa, school_activities,
             awards, volunteer_service, leadership, scores_explanation)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(source_name)
    .bind(&record.name)
    .bind(&record.email)
    .bind(&record.phone_number)
    .bind(&record.gpa)
    .bind(&record.school_activities)
    .bind(&record.awards)
    .bind(&record.volunteer_service)
    .bind(&record.leadership)
    .bind(&record.scores_explanation)
    .fetch_one(&mut *tx)
    .await?;

    // 3. Render every row, the uncommitted one included
    let rows = list_evaluations(&mut *tx).await?;
    let row_count = rows.len();
    let csv = render_rows_csv(rows);

    // 4. Upload the sheet; dropping `tx` on failure rolls the insert back
    sheet
        .s3
        .put_object()
        .bucket(sheet.bucket)
        .key(sheet.key)
        .body(ByteStream::from(csv.into_bytes()))
        .content_type("text/csv")
        .send()
        .await
        .map_err(|e| {
            warn!("Score sheet upload failed, rolling back evaluation {}", row.id);
            AppError::S3(format!("Score sheet upload failed: {e}"))
        })?;

    tx.commit().await?;

    info!(
        "Stored evaluation {} for '{}'; uploaded score sheet ({} rows) to s3://{}/{}",
        row.id, source_name, row_count, sheet.bucket, sheet.key
    );

    Ok(row)
}

/// Returns every stored evaluation, oldest first.
pub async fn list_evaluations<'e, E>(executor: E) -> Result<Vec<EvaluationRow>, AppError>
where
    E: PgExecutor<'e>,
{
    Ok(sqlx::query_as::<_, EvaluationRow>(
        "SELECT * FROM evaluations ORDER BY created_at ASC, id ASC",
    )
    .fetch_all(executor)
    .await?)
}

/// Renders stored rows, in the order given, as the score sheet.
pub fn render_rows_csv(rows: Vec<EvaluationRow>) -> String {
    let records: Vec<RubricRecord> = rows.into_iter().map(RubricRecord::from).collect();
    render_sheet_csv(&records)
}

/// Renders records as a CSV sheet: one header row of [`RECORD_COLUMNS`], one row per record.
pub fn render_sheet_csv(records: &[RubricRecord]) -> String {
    let mut csv = csv_row(RECORD_COLUMNS);
    for record in records {
        csv.push_str(&csv_row(record.values()));
    }
    csv
}

fn csv_row(values: [&str; 9]) -> String {
    let mut row = values.map(escape_csv).join(",");
    row.push_str("\r\n");
    row
}

fn escape_csv(value: &str) -> String {
    if value.contains(|c: char| matches!(c, ',' | '"' | '\n' | '\r')) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::fields::NOT_FOUND;

    fn record(name: &str, explanation: &str) -> RubricRecord {
        RubricRecord {
            name: name.to_string(),
            email: "jane@example.com".to_string(),
            phone_number: NOT_FOUND.to_string(),
            gpa: "3.7 - 5 points".to_string(),
            school_activities: "2 - 5 points".to_string(),
            awards: "1 - 3 points".to_string(),
            volunteer_service: "1.5 years - 3 points".to_string(),
            leadership: "President - 5 points".to_string(),
            scores_explanation: explanation.to_string(),
        }
    }

    #[test]
    fn test_empty_sheet_is_header_only() {
        assert_eq!(
            render_sheet_csv(&[]),
            "Name,Email,Phone Number,GPA,School Activities,Awards,Volunteer Service,Leadership,Scores Explanation\r\n"
        );
    }

    #[test]
    fn test_plain_values_are_unquoted() {
        let csv = render_sheet_csv(&[record("Jane Doe", "Strong GPA.")]);
        let rows: Vec<_> = csv.split("\r\n").collect();
        assert_eq!(
            rows[1],
            "Jane Doe,jane@example.com,Not found,3.7 - 5 points,2 - 5 points,1 - 3 points,1.5 years - 3 points,President - 5 points,Strong GPA."
        );
    }

    #[test]
    fn test_multiline_explanation_is_quoted() {
        let csv = render_sheet_csv(&[record("Jane Doe", "Line one.\nLine two.")]);
        assert!(csv.ends_with(",\"Line one.\nLine two.\"\r\n"));
    }

    #[test]
    fn test_commas_and_quotes_are_escaped() {
        assert_eq!(escape_csv("Doe, Jane"), "\"Doe, Jane\"");
        assert_eq!(escape_csv("the \"VP\" role"), "\"the \"\"VP\"\" role\"");
        assert_eq!(escape_csv("plain"), "plain");
    }

    fn row(name: &str, created_at: &str) -> EvaluationRow {
        let record = record(name, "x");
        EvaluationRow {
            id: Uuid::new_v4(),
            source_name: format!("{name}.pdf"),
            name: record.name,
            email: record.email,
            phone_number: record.phone_number,
            gpa: record.gpa,
            school_activities: record.school_activities,
            awards: record.awards,
            volunteer_service: record.volunteer_service,
            leadership: record.leadership,
            scores_explanation: record.scores_explanation,
            created_at: created_at.parse().unwrap(),
        }
    }

    #[test]
    fn test_rows_render_in_listed_order_with_new_row_last() {
        let rows = vec![
            row("Ada", "2026-01-01T00:00:00Z"),
            row("Grace", "2026-01-02T00:00:00Z"),
            row("Jane", "2026-01-03T00:00:00Z"),
        ];
        let csv = render_rows_csv(rows);
        let names: Vec<_> = csv
            .split("\r\n")
            .skip(1)
            .filter(|line| !line.is_empty())
            .map(|line| line.split(',').next().unwrap())
            .collect();
        assert_eq!(names, ["Ada", "Grace", "Jane"]);
    }

    #[test]
    fn test_rendered_rows_omit_storage_columns() {
        let csv = render_rows_csv(vec![row("Jane", "2026-01-01T00:00:00Z")]);
        assert!(!csv.contains("Jane.pdf"));
        assert_eq!(csv.lines().nth(1).unwrap().split(',').count(), RECORD_COLUMNS.len());
    }

    #[test]
    fn test_one_row_per_record() {
        let csv = render_sheet_csv(&[record("A", "x"), record("B", "y"), record("C", "z")]);
        assert_eq!(csv.matches("\r\n").count(), 4);
    }
}
