use scraper::{ElementRef, Node};

use crate::static_selector;

/// Trimmed from both ends of every cell value.
pub const CLEAN_CHARS: [char; 4] = [' ', '\n', ':', '-'];

/// What a `<tr>` carries, decided from its shape and the text of its first cell.
#[derive(Debug, Clone, Copy)]
pub enum RowKind<'a> {
    /// Exactly two cells: a label and its value.
    Metadata {
        label: ElementRef<'a>,
        value: ElementRef<'a>,
    },
    /// Exactly four cells, the first naming a specific kind of inspection.
    Inspection {
        event: ElementRef<'a>,
        score: ElementRef<'a>,
    },
    Unclassified,
}

impl<'a> RowKind<'a> {
    pub fn classify(row: ElementRef<'a>) -> Self {
        if row.value().name() != "tr" {
            return Self::Unclassified;
        }
        let Some(cells) = flat_cells(row) else {
            return Self::Unclassified;
        };
        match cells.as_slice() {
            &[label, value] => Self::Metadata { label, value },
            &[event, _, score, _] if cell_string(event).is_some_and(names_inspection_event) => {
                Self::Inspection { event, score }
            }
            _ => Self::Unclassified,
        }
    }
}

#[cfg(test)]
pub fn has_two_tds(row: ElementRef<'_>) -> bool {
    matches!(RowKind::classify(row), RowKind::Metadata { .. })
}

#[cfg(test)]
pub fn is_inspection_row(row: ElementRef<'_>) -> bool {
    matches!(RowKind::classify(row), RowKind::Inspection { .. })
}

/// "Routine Inspection" names an event, a bare "Inspection" heading does not.
fn names_inspection_event(text: &str) -> bool {
    text.contains("Inspection") && text.split_whitespace().next() != Some("Inspection")
}

/// The row's `<td>` children, or `None` when some `<td>` sits deeper than one level.
fn flat_cells(row: ElementRef<'_>) -> Option<Vec<ElementRef<'_>>> {
    static_selector!(CELL_SELECTOR <- "td");
    let direct: Vec<ElementRef> = row
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name() == "td")
        .collect();
    let all = row.select(&CELL_SELECTOR).count();
    (all == direct.len()).then_some(direct)
}

/// The single text an element holds, looking through single-child wrappers like `<b>`.
/// `None` when the element is empty or has mixed content.
pub fn cell_string<'a>(element: ElementRef<'a>) -> Option<&'a str> {
    let mut children = element.children();
    let only = children.next()?;
    if children.next().is_some() {
        return None;
    }
    match only.value() {
        Node::Text(text) => Some(&**text),
        Node::Element(_) => ElementRef::wrap(only).and_then(cell_string),
        _ => None,
    }
}

/// Never fails: a cell without plain text cleans to "".
pub fn clean_cell(cell: ElementRef<'_>) -> String {
    cell_string(cell).map_or_else(String::new, |text| {
        text.trim_matches(&CLEAN_CHARS[..]).to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    static_selector!(ROW_SELECTOR <- "tr");
    static_selector!(TD_SELECTOR <- "td");

    fn first_row(html: &Html) -> ElementRef<'_> {
        html.select(&ROW_SELECTOR).next().expect("fixture should have a row")
    }

    fn table(rows: &str) -> Html {
        Html::parse_fragment(&format!("<table><tbody>{rows}</tbody></table>"))
    }

    #[test]
    fn test_clean_cell() {
        let html = table("<tr><td>  Name: </td><td> - 123 Main St -- </td></tr>");
        let cells: Vec<String> = html.select(&TD_SELECTOR).map(clean_cell).collect();
        assert_eq!(cells, ["Name", "123 Main St"]);
    }

    #[test]
    fn test_clean_cell_without_plain_text() {
        let html = table("<tr><td></td><td>Phone: <b>555</b></td><td><b> Bold: </b></td></tr>");
        let cells: Vec<String> = html.select(&TD_SELECTOR).map(clean_cell).collect();
        assert_eq!(cells, ["", "", "Bold"]);
    }

    #[test]
    fn test_has_two_tds() {
        assert!(has_two_tds(first_row(&table("<tr><td>a</td><td>b</td></tr>"))));
        assert!(!has_two_tds(first_row(&table("<tr><td>a</td></tr>"))));
        assert!(!has_two_tds(first_row(&table(
            "<tr><td>a</td><td>b</td><td>c</td></tr>"
        ))));
        assert!(!has_two_tds(first_row(&table(
            "<tr><td>a</td><td><table><tr><td>nested</td></tr></table></td></tr>"
        ))));
        assert!(!has_two_tds(first_row(&table("<tr><th>a</th><th>b</th></tr>"))));
    }

    #[test]
    fn test_is_inspection_row() {
        let routine = table("<tr><td>Routine Inspection</td><td>1/2/2015</td><td>10</td><td></td></tr>");
        assert!(is_inspection_row(first_row(&routine)));

        let consultation = table(
            "<tr><td>Consultation/Education - Inspection</td><td></td><td>0</td><td></td></tr>",
        );
        assert!(is_inspection_row(first_row(&consultation)));

        let heading = table("<tr><td>Inspection</td><td>Date</td><td>Score</td><td>Result</td></tr>");
        assert!(!is_inspection_row(first_row(&heading)));

        let heading_phrase =
            table("<tr><td>Inspection Type</td><td>Date</td><td>Score</td><td>Result</td></tr>");
        assert!(!is_inspection_row(first_row(&heading_phrase)));

        let three_cells = table("<tr><td>Routine Inspection</td><td></td><td>10</td></tr>");
        assert!(!is_inspection_row(first_row(&three_cells)));

        let violation = table("<tr><td>Hand washing</td><td></td><td>10</td><td></td></tr>");
        assert!(!is_inspection_row(first_row(&violation)));
    }

    #[test]
    fn test_classify_non_row() {
        let html = table("<tr><td>a</td><td>b</td></tr>");
        let cell = html.select(&TD_SELECTOR).next().unwrap();
        assert!(matches!(RowKind::classify(cell), RowKind::Unclassified));
    }
}
