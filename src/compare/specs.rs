use serde::{Deserialize, Serialize};

/// One row of the spec table: a feature and its value for each model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecRow {
    pub feature: String,
    pub model_a: String,
    pub model_b: String,
}

impl SpecRow {
    /// True for the `| Feature | A | B |` row the prompt asks the model to echo
    pub fn is_header_row(&self) -> bool {
        self.feature.eq_ignore_ascii_case("feature")
    }
}

/// A markdown alignment row such as `|---|:---:|---|`
pub fn is_separator_row(line: &str) -> bool {
    let mut content = line
        .chars()
        .filter(|c| *c != '|' && *c != ':' && !c.is_whitespace())
        .peekable();
    content.peek().is_some() && content.all(|c| c == '-')
}

/// Cells of a pipe-delimited row; only the empty fragments outside the outer pipes are dropped
pub fn split_cells(line: &str) -> Vec<String> {
    let mut cells: Vec<&str> = line.split('|').map(str::trim).collect();

    while cells.first().is_some_and(|c| c.is_empty()) {
        cells.remove(0);
    }
    while cells.last().is_some_and(|c| c.is_empty()) {
        cells.pop();
    }

    cells.into_iter().map(str::to_string).collect()
}

/// Extract table rows from the lines of the TECH_SPECS section.
///
/// Lines without a pipe, separator rows and rows with fewer than three cells
/// are skipped. Extra cells beyond the third are ignored.
pub fn extract_spec_rows<S: AsRef<str>>(lines: &[S]) -> Vec<SpecRow> {
    lines
        .iter()
        .map(AsRef::as_ref)
        .filter(|line| line.contains('|') && !is_separator_row(line))
        .filter_map(|line| {
            let mut cells = split_cells(line).into_iter();
            match (cells.next(), cells.next(), cells.next()) {
                (Some(feature), Some(model_a), Some(model_b)) => Some(SpecRow {
                    feature,
                    model_a,
                    model_b,
                }),
                _ => None,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separator_excluded_and_row_split() {
        let rows = extract_spec_rows(&["| Battery | 3kWh | 4kWh |", "|---|---|---|"]);
        assert_eq!(
            rows,
            vec![SpecRow {
                feature: "Battery".into(),
                model_a: "3kWh".into(),
                model_b: "4kWh".into(),
            }]
        );
    }

    #[test]
    fn test_separator_detection() {
        assert!(is_separator_row("|---|---|---|"));
        assert!(is_separator_row("| :--- | :---: | ---: |"));
        assert!(!is_separator_row("| Range | 150 km | 195 km |"));
        assert!(!is_separator_row("| Top speed | 90 km/h | -- |"));
        assert!(!is_separator_row("|  |  |"));
    }

    #[test]
    fn test_short_rows_and_prose_dropped() {
        let lines = [
            "Specs gathered from official datasheets.",
            "| Battery | 3kWh |",
            "| Charging | 5h 45m | 6h 30m | extra |",
        ];
        let rows = extract_spec_rows(&lines);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].feature, "Charging");
        assert_eq!(rows[0].model_b, "6h 30m");
    }

    #[test]
    fn test_rows_without_outer_pipes() {
        let rows = extract_spec_rows(&["Range | 150 km | 195 km"]);
        assert_eq!(rows[0].model_a, "150 km");
    }

    #[test]
    fn test_inner_empty_cell_kept() {
        let cells = split_cells("| Warranty |  | 3 years |");
        assert_eq!(cells, vec!["Warranty", "", "3 years"]);
    }

    #[test]
    fn test_header_row_detection() {
        let rows = extract_spec_rows(&["| Feature | Ather 450X | Ola S1 Pro |"]);
        assert!(rows[0].is_header_row());
    }
}
