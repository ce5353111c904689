//! Section Splitter — partitions a model response into its `### Name ###` delimited sections.
//!
//! The response template asks for three sections. Anything the model writes before the
//! first header, or between headers it invents, never reaches the record builder.

/// Marker that opens a header line once the line is trimmed.
const HEADER_MARKER: &str = "###";

/// The sections the response template asks the model to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionName {
    PersonalInformation,
    Grading,
    Explanation,
}

impl SectionName {
    pub const ALL: [SectionName; 3] = [
        SectionName::PersonalInformation,
        SectionName::Grading,
        SectionName::Explanation,
    ];

    /// The exact header text between the markers, e.g. `### Personal Information ###`.
    pub fn header(self) -> &'static str {
        match self {
            SectionName::PersonalInformation => "Personal Information",
            SectionName::Grading => "Grading",
            SectionName::Explanation => "Explanation",
        }
    }

    /// Exact, case-sensitive match on the header text.
    pub fn from_header(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.header() == name)
    }
}

/// Which accumulator the splitter is currently appending to.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Cursor {
    Known(SectionName),
    Other(usize),
}

/// Accumulated section text for one response.
///
/// The three known sections always exist, empty when their header never appeared.
/// Each accumulated line is trimmed and terminated with `\n`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sections {
    personal_information: String,
    grading: String,
    explanation: String,
    /// Headers outside the known set, in order of first appearance.
    other: Vec<(String, String)>,
}

impl Sections {
    pub fn get(&self, name: SectionName) -> &str {
        match name {
            SectionName::PersonalInformation => &self.personal_information,
            SectionName::Grading => &self.grading,
            SectionName::Explanation => &self.explanation,
        }
    }

    /// Sections whose header did not match a known name.
    pub fn unrecognized(&self) -> &[(String, String)] {
        &self.other
    }

    fn open(&mut self, name: &str) -> Cursor {
        if let Some(known) = SectionName::from_header(name) {
            return Cursor::Known(known);
        }
        match self.other.iter().position(|(n, _)| n == name) {
            Some(idx) => Cursor::Other(idx),
            None => {
                self.other.push((name.to_string(), String::new()));
                Cursor::Other(self.other.len() - 1)
            }
        }
    }

    fn buffer_mut(&mut self, cursor: &Cursor) -> Option<&mut String> {
        match cursor {
            Cursor::Known(SectionName::PersonalInformation) => Some(&mut self.personal_information),
            Cursor::Known(SectionName::Grading) => Some(&mut self.grading),
            Cursor::Known(SectionName::Explanation) => Some(&mut self.explanation),
            Cursor::Other(idx) => self.other.get_mut(*idx).map(|(_, text)| text),
        }
    }

    fn append(&mut self, cursor: &Cursor, line: &str) {
        if let Some(buffer) = self.buffer_mut(cursor) {
            buffer.push_str(line);
            buffer.push('\n');
        }
    }
}

/// Returns the section name if `line` (already trimmed) is a header line.
///
/// Every `#` is stripped and the remainder trimmed, so `###Grading###` and
/// `### Grading ###` both name `Grading`. Spacing inside the name is kept as written.
fn header_name(line: &str) -> Option<String> {
    if !line.starts_with(HEADER_MARKER) {
        return None;
    }
    Some(line.replace('#', "").trim().to_string())
}

/// Splits raw model output into sections.
///
/// Lines before the first header are dropped. Blank lines are skipped but do not close a
/// section; a section only ends at the next header or at end of input. A repeated header
/// resumes appending to the same section.
pub fn split_sections(raw_text: &str) -> Sections {
    let (_, sections) = raw_text.lines().fold(
        (None::<Cursor>, Sections::default()),
        |(cursor, mut sections), line| {
            let line = line.trim();
            if let Some(name) = header_name(line) {
                let next = sections.open(&name);
                return (Some(next), sections);
            }
            if let Some(current) = &cursor {
                if !line.is_empty() {
                    sections.append(current, line);
                }
            }
            (cursor, sections)
        },
    );
    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_FORMED: &str = "\
### Personal Information ###
Name: Jane Doe
Email: jane@example.com

### Grading ###
GPA: 3.7 - 5 points

### Explanation ###
Jane has a strong GPA.
";

    #[test]
    fn test_splits_three_known_sections() {
        let sections = split_sections(WELL_FORMED);
        assert_eq!(
            sections.get(SectionName::PersonalInformation),
            "Name: Jane Doe\nEmail: jane@example.com\n"
        );
        assert_eq!(sections.get(SectionName::Grading), "GPA: 3.7 - 5 points\n");
        assert_eq!(
            sections.get(SectionName::Explanation),
            "Jane has a strong GPA.\n"
        );
        assert!(sections.unrecognized().is_empty());
    }

    #[test]
    fn test_empty_input_has_all_known_sections_empty() {
        let sections = split_sections("");
        for name in SectionName::ALL {
            assert_eq!(sections.get(name), "");
        }
    }

    #[test]
    fn test_text_before_first_header_is_dropped() {
        let sections = split_sections("Here is my evaluation.\nName: Ghost\n### Grading ###\nAwards: 1\n");
        assert_eq!(sections.get(SectionName::PersonalInformation), "");
        assert_eq!(sections.get(SectionName::Grading), "Awards: 1\n");
    }

    #[test]
    fn test_no_headers_yields_empty_sections() {
        let sections = split_sections("Name: Jane\nGPA: 4.0\n");
        assert_eq!(sections, Sections::default());
    }

    #[test]
    fn test_blank_lines_skipped_without_closing_section() {
        let sections = split_sections("### Explanation ###\nFirst.\n\n   \nSecond.\n");
        assert_eq!(sections.get(SectionName::Explanation), "First.\nSecond.\n");
    }

    #[test]
    fn test_lines_are_trimmed() {
        let sections = split_sections("### Grading ###\n    GPA: 3.2   \r\n");
        assert_eq!(sections.get(SectionName::Grading), "GPA: 3.2\n");
    }

    #[test]
    fn test_indented_header_is_recognized() {
        let sections = split_sections("   ### Grading ###\nAwards: 2\n");
        assert_eq!(sections.get(SectionName::Grading), "Awards: 2\n");
    }

    #[test]
    fn test_header_without_inner_spaces_is_recognized() {
        let sections = split_sections("###Personal Information###\nName: Jane\n");
        assert_eq!(sections.get(SectionName::PersonalInformation), "Name: Jane\n");
    }

    #[test]
    fn test_header_with_altered_inner_spacing_is_unrecognized() {
        let sections = split_sections("### Personal  Information ###\nName: Jane\n");
        assert_eq!(sections.get(SectionName::PersonalInformation), "");
        assert_eq!(
            sections.unrecognized(),
            &[("Personal  Information".to_string(), "Name: Jane\n".to_string())]
        );
    }

    #[test]
    fn test_header_match_is_case_sensitive() {
        let sections = split_sections("### GRADING ###\nGPA: 3.0\n");
        assert_eq!(sections.get(SectionName::Grading), "");
        assert_eq!(sections.unrecognized().len(), 1);
    }

    #[test]
    fn test_unknown_section_does_not_leak_into_known_ones() {
        let text = "### Grading ###\nGPA: 3.1\n### Total ###\nTotal Score: 20\n### Explanation ###\nDone.\n";
        let sections = split_sections(text);
        assert_eq!(sections.get(SectionName::Grading), "GPA: 3.1\n");
        assert_eq!(sections.get(SectionName::Explanation), "Done.\n");
        assert_eq!(
            sections.unrecognized(),
            &[("Total".to_string(), "Total Score: 20\n".to_string())]
        );
    }

    #[test]
    fn test_repeated_header_resumes_same_section() {
        let text = "### Grading ###\nGPA: 3.1\n### Explanation ###\nWhy.\n### Grading ###\nAwards: 0\n";
        let sections = split_sections(text);
        assert_eq!(sections.get(SectionName::Grading), "GPA: 3.1\nAwards: 0\n");
    }

    #[test]
    fn test_bare_markers_open_unnamed_section() {
        let sections = split_sections("###\nstray\n");
        assert_eq!(
            sections.unrecognized(),
            &[(String::new(), "stray\n".to_string())]
        );
    }

    #[test]
    fn test_section_name_round_trips_through_header() {
        for name in SectionName::ALL {
            assert_eq!(SectionName::from_header(name.header()), Some(name));
        }
        assert_eq!(SectionName::from_header("Summary"), None);
    }
}
