use crate::models::domain::MetadataRecord;

pub const EMPTY_TABLE_PLACEHOLDER: &str = "_No verified resources were available._";

const HEADER: &str = "| Title | Type | Year | Access Type | Why it aligns | Suggested Use | URL |";
const SEPARATOR: &str = "|---|---|---|---|---|---|---|";

/// Keeps free text from breaking the table layout.
fn cell(text: &str) -> String {
    text.replace('|', "｜")
        .replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
        .trim()
        .to_string()
}

/// Renders records as a seven-column Markdown table, or the placeholder
/// when there are none.
pub fn render(records: &[MetadataRecord]) -> String {
    if records.is_empty() {
        return EMPTY_TABLE_PLACEHOLDER.to_string();
    }

    let mut lines = Vec::with_capacity(records.len() + 2);
    lines.push(HEADER.to_string());
    lines.push(SEPARATOR.to_string());
    for record in records {
        let year = record.year.map(|y| y.to_string()).unwrap_or_default();
        lines.push(format!(
            "| {} | {} | {} | {} | {} | {} | [Link]({}) |",
            cell(&record.title),
            cell(record.resource_type.label()),
            year,
            cell(record.access.label()),
            cell(&record.why_aligns),
            cell(record.suggested_use.label()),
            record.url
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::domain::{AccessType, ResourceType, SuggestedUse},
        services::url_extractor::extract_urls,
    };

    fn record(title: &str, year: Option<i32>, url: &str) -> MetadataRecord {
        MetadataRecord {
            title: title.to_string(),
            resource_type: ResourceType::Report,
            year,
            access: AccessType::OpenAccess,
            why_aligns: "Covers the drivers of urban growth.".to_string(),
            suggested_use: SuggestedUse::CoreReading,
            url: url.to_string(),
        }
    }

    #[test]
    fn empty_input_renders_the_placeholder() {
        assert_eq!(render(&[]), EMPTY_TABLE_PLACEHOLDER);
    }

    #[test]
    fn renders_header_and_one_row_per_record() {
        let table = render(&[
            record("World Cities Report", Some(2022), "https://unhabitat.org/wcr/"),
            record("Urban Atlas", None, "https://land.copernicus.eu/urban-atlas"),
        ]);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], HEADER);
        assert_eq!(
            lines[2],
            "| World Cities Report | Report | 2022 | Open access | Covers the drivers of urban growth. | Core reading | [Link](https://unhabitat.org/wcr/) |"
        );
        assert!(lines[3].contains("| Urban Atlas | Report |  | Open access |"));
    }

    #[test]
    fn pipes_and_newlines_in_free_text_are_neutralized() {
        let mut r = record("Cities | Growth", Some(2020), "https://example.org/a");
        r.why_aligns = "Line one\nline two | more".to_string();
        let table = render(&[r]);
        let row = table.lines().nth(2).unwrap();

        assert!(row.contains("Cities ｜ Growth"));
        assert!(row.contains("Line one line two ｜ more"));
        assert_eq!(row.matches('|').count(), 8);
    }

    #[test]
    fn rendered_links_extract_back_to_the_same_urls() {
        let urls = ["https://unhabitat.org/wcr/", "https://www.oecd.org/cities/"];
        let table = render(&[record("A", None, urls[0]), record("B", None, urls[1])]);

        assert_eq!(extract_urls(&table, 120), urls.map(String::from).to_vec());
    }
}
