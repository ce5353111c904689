//! Scoring rubric — the fixed criteria and point thresholds the model is asked to grade against.
//!
//! The rubric is descriptive only: it is rendered into the model instructions and served to
//! clients, but the parser never recomputes or validates the points the model reports.

use serde::Serialize;

/// Performance band for a single criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    AboveAverage,
    Average,
    BelowAverage,
}

impl Rating {
    pub fn label(self) -> &'static str {
        match self {
            Rating::AboveAverage => "Above Average",
            Rating::Average => "Average",
            Rating::BelowAverage => "Below Average",
        }
    }

    pub fn points(self) -> u32 {
        match self {
            Rating::AboveAverage => 5,
            Rating::Average => 3,
            Rating::BelowAverage => 0,
        }
    }
}

/// One band of a criterion: what the resume must show to earn it.
#[derive(Debug, Clone, Serialize)]
pub struct Tier {
    pub rating: Rating,
    pub points: u32,
    pub requirement: &'static str,
}

impl Tier {
    fn new(rating: Rating, requirement: &'static str) -> Self {
        Self {
            rating,
            points: rating.points(),
            requirement,
        }
    }
}

/// A graded criterion. `name` doubles as the field label in the `Grading` section.
#[derive(Debug, Clone, Serialize)]
pub struct Criterion {
    pub name: &'static str,
    pub tiers: [Tier; 3],
}

impl Criterion {
    fn new(
        name: &'static str,
        above: &'static str,
        average: &'static str,
        below: &'static str,
    ) -> Self {
        Self {
            name,
            tiers: [
                Tier::new(Rating::AboveAverage, above),
                Tier::new(Rating::Average, average),
                Tier::new(Rating::BelowAverage, below),
            ],
        }
    }

    pub fn max_points(&self) -> u32 {
        self.tiers.iter().map(|t| t.points).max().unwrap_or(0)
    }
}

/// The full rubric. Built once at startup and shared read-only.
#[derive(Debug, Clone, Serialize)]
pub struct Rubric {
    criteria: Vec<Criterion>,
    max_score: u32,
}

impl Rubric {
    /// The resume rubric: GPA, school activities, awards, volunteer service and leadership.
    pub fn standard() -> Self {
        Self::from_criteria(vec![
            Criterion::new("GPA", "3.0 or greater", "2.51-2.99", "2.50 or below"),
            Criterion::new(
                "School Activities",
                "2 or more activities",
                "1 activity",
                "0 activities",
            ),
            Criterion::new("Awards", "2 or more awards", "1 award", "0 awards"),
            Criterion::new(
                "Volunteer Service",
                "2 or more years of service",
                "1 to 2 (not including 2) years of service",
                "0-1 years of service",
            ),
            Criterion::new(
                "Leadership",
                "President or VP of something",
                "Other leadership position",
                "None",
            ),
        ])
    }

    fn from_criteria(criteria: Vec<Criterion>) -> Self {
        let max_score = criteria.iter().map(Criterion::max_points).sum();
        Self {
            criteria,
            max_score,
        }
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    pub fn max_score(&self) -> u32 {
        self.max_score
    }

    /// Renders the criteria as the plain-text grading guide embedded in the model prompt.
    ///
    /// ```text
    /// GPA:
    ///   - 3.0 or greater = Above Average (5 points)
    ///   ...
    /// ```
    pub fn render_instructions(&self) -> String {
        let mut out = String::new();
        for criterion in &self.criteria {
            out.push_str(criterion.name);
            out.push_str(":\n");
            for tier in &criterion.tiers {
                out.push_str(&format!(
                    "  - {} = {} ({} points)\n",
                    tier.requirement,
                    tier.rating.label(),
                    tier.points
                ));
            }
            out.push('\n');
        }
        out
    }
}
