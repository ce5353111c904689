// Scoring prompt templates.
// The response format below is the contract the section splitter and field extractor parse.

use crate::scoring::rubric::Rubric;

/// System prompt for resume grading.
pub const EVALUATION_SYSTEM: &str = "You are a meticulous resume reviewer. \
    Grade the resume strictly against the criteria you are given. \
    Report only what the resume states; if something is absent, say so. \
    Follow the requested response format exactly, including the section headers.";

/// Template the model must fill in. Headers and labels must stay in sync with
/// `SectionName::header` and `RubricField::label`.
pub const RESPONSE_FORMAT: &str = "\
### Personal Information ###
Name: [Extracted Name]
Email: [Extracted Email]
Phone Number: [Extracted Phone Number]

### Grading ###
GPA: [Extracted GPA Value, e.g., 3.7] - [Corresponding Points]
School Activities: [Number of Activities, e.g., 2] - [Corresponding Points]
Awards: [Number of Awards, e.g., 1] - [Corresponding Points]
Volunteer Service: [Years of Service, e.g., 1.5 years] - [Corresponding Points]
Leadership: [Position Held, e.g., President] - [Corresponding Points]
Total Score: [Total Points]

### Explanation ###
[Provide a detailed explanation of how the total score was calculated based on the above criteria.]";

/// Evaluation prompt template.
/// Replace: {rubric}, {max_score}, {response_format}, {resume_text}
pub const EVALUATION_PROMPT_TEMPLATE: &str = r#"Please evaluate the content based on the following grading criteria:

{rubric}Total Score: Sum of all points based on the above criteria (maximum {max_score}).

Please format the response as follows:

{response_format}

Content to evaluate:
{resume_text}
"#;

/// Renders the full grading prompt for one resume.
pub fn render_evaluation_prompt(rubric: &Rubric, resume_text: &str) -> String {
    EVALUATION_PROMPT_TEMPLATE
        .replace("{rubric}", &rubric.render_instructions())
        .replace("{max_score}", &rubric.max_score().to_string())
        .replace("{response_format}", RESPONSE_FORMAT)
        .replace("{resume_text}", resume_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::record::{record_from_text, RubricField};
    use crate::scoring::sections::SectionName;

    #[test]
    fn test_response_format_has_every_section_header() {
        for name in SectionName::ALL {
            assert!(
                RESPONSE_FORMAT.contains(&format!("### {} ###", name.header())),
                "{:?}",
                name
            );
        }
    }

    #[test]
    fn test_response_format_is_parseable_by_the_record_builder() {
        // The template itself must yield a value (the placeholder) for every field.
        let record = record_from_text(RESPONSE_FORMAT);
        assert!(record.missing_fields().is_empty());
        assert_eq!(record.name, "[Extracted Name]");
        assert!(record.scores_explanation.starts_with("[Provide a detailed"));
        for field in RubricField::ALL {
            assert!(RESPONSE_FORMAT.contains(&format!("\n{}: ", field.label())));
        }
    }

    #[test]
    fn test_rendered_prompt_contains_all_parts() {
        let rubric = Rubric::standard();
        let prompt = render_evaluation_prompt(&rubric, "Jane Doe\nBSc, GPA 3.7");
        assert!(prompt.contains("  - 3.0 or greater = Above Average (5 points)"));
        assert!(prompt.contains("(maximum 25)"));
        assert!(prompt.contains("### Grading ###"));
        assert!(prompt.ends_with("Content to evaluate:\nJane Doe\nBSc, GPA 3.7\n"));
        assert!(!prompt.contains("{rubric}"));
        assert!(!prompt.contains("{response_format}"));
    }
}
