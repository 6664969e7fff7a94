//! Cell scanning for lopecode module source.
//!
//! Cells are dependency-injected function definitions of the shape
//!
//! ```text
//! const _name = function _name(dep1, dep2){return(...)}
//! const _name = function*(deps){yield ...}
//! ```
//!
//! A fixed pattern finds each definition head; the body's extent is then
//! recovered by brace depth counting, because bodies nest braces freely
//! (object literals, blocks, inner functions) and no simpler boundary holds.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::Cell;

/// Previews keep at most this many characters of the cell text.
const PREVIEW_LIMIT: usize = 200;
const PREVIEW_MARKER: &str = "...";

static CELL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"const\s+(_\w+)\s*=\s*function\*?\s*\w*\s*\(([^)]*)\)\s*\{").unwrap()
});

/// Scan one module's source for cell definitions, in the order they appear.
///
/// Matches are non-overlapping and found left to right. The returned byte
/// ranges satisfy: `end` is the position immediately after the brace that
/// balances the definition's opening brace. Truncated input (depth never
/// returns to zero) yields a cell ending at end-of-text rather than an error.
pub fn extract_cells(source: &str) -> Vec<Cell> {
    let mut cells = Vec::new();

    for cap in CELL_PATTERN.captures_iter(source) {
        let whole = cap.get(0).unwrap();
        let name = cap.get(1).map(|m| m.as_str()).unwrap_or("");
        let params = cap.get(2).map(|m| m.as_str()).unwrap_or("");

        let dependencies: Vec<String> = params
            .split(',')
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string)
            .collect();

        let end = find_body_end(source, whole.end());
        let text = &source[whole.start()..end];

        cells.push(Cell {
            name: name.to_string(),
            dependencies,
            start: whole.start(),
            end,
            preview: preview_of(text),
        });
    }

    cells
}

/// First cell whose name equals the query or contains it as a substring,
/// in scan order. Exact matches get no priority over earlier substring
/// matches.
pub fn find_cell<'a>(cells: &'a [Cell], query: &str) -> Option<&'a Cell> {
    cells
        .iter()
        .find(|cell| cell.name == query || cell.name.contains(query))
}

/// Walk forward from just past a matched opening brace, counting depth
/// (starting at 1), and return the byte position immediately after the brace
/// that brings depth back to zero. Every brace counts — cell bodies are
/// scanned as opaque text, without string or comment awareness.
fn find_body_end(source: &str, after_open: usize) -> usize {
    let bytes = source.as_bytes();
    let mut depth = 1usize;
    let mut pos = after_open;

    while pos < bytes.len() && depth > 0 {
        match bytes[pos] {
            b'{' => depth += 1,
            b'}' => depth -= 1,
            _ => {}
        }
        pos += 1;
    }

    pos
}

fn preview_of(text: &str) -> String {
    if text.chars().count() > PREVIEW_LIMIT {
        let truncated: String = text.chars().take(PREVIEW_LIMIT).collect();
        format!("{truncated}{PREVIEW_MARKER}")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_cell_name_deps_and_span() {
        let source = "const _x = function _x(a, b){return(a+b)}";

        let cells = extract_cells(source);
        assert_eq!(cells.len(), 1);
        let cell = &cells[0];
        assert_eq!(cell.name, "_x");
        assert_eq!(cell.dependencies, vec!["a", "b"]);
        assert_eq!(cell.start, 0);
        assert_eq!(cell.end, source.len());
        assert_eq!(cell.text(source), source);
    }

    #[test]
    fn test_nested_braces_end_at_outermost_close() {
        let source = "const _y = function(){return({a:1,b:{c:2}})}";

        let cells = extract_cells(source);
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].end, source.len());
        assert_eq!(cells[0].text(source), source);
    }

    #[test]
    fn test_multiple_cells_in_scan_order() {
        let source = "\
const _first = function _first(md){return(md`# hi`)}
const _second = function _second(){return(1)}
const _third = function _third(_first, _second){return(_first + _second)}";

        let cells = extract_cells(source);
        let names: Vec<&str> = cells.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["_first", "_second", "_third"]);
        assert_eq!(cells[2].dependencies, vec!["_first", "_second"]);
    }

    #[test]
    fn test_generator_cells_match() {
        let source = "const _gen = function*(count){yield count}";

        let cells = extract_cells(source);
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].name, "_gen");
        assert_eq!(cells[0].dependencies, vec!["count"]);
    }

    #[test]
    fn test_empty_and_blank_dependency_entries_dropped() {
        let source = "const _z = function(a, , b){return(a)}";

        let cells = extract_cells(source);
        assert_eq!(cells[0].dependencies, vec!["a", "b"]);
    }

    #[test]
    fn test_no_dependencies() {
        let source = "const _n = function _n(){return(42)}";

        let cells = extract_cells(source);
        assert!(cells[0].dependencies.is_empty());
    }

    #[test]
    fn test_unbalanced_braces_stop_at_end_of_text() {
        let source = "const _cut = function(){return({a:1}";

        let cells = extract_cells(source);
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].end, source.len());
    }

    #[test]
    fn test_preview_truncation_boundary() {
        // Head is 24 bytes; body padding brings the cell text to exactly
        // 201 chars, one over the limit.
        let head = "const _p = function(){x;";
        let body_len = 201 - head.len() - 1;
        let source = format!("{head}{}}}", "x".repeat(body_len));
        assert_eq!(source.chars().count(), 201);

        let cells = extract_cells(&source);
        assert_eq!(cells[0].preview.chars().count(), 200 + PREVIEW_MARKER.len());
        assert!(cells[0].preview.ends_with(PREVIEW_MARKER));

        // Exactly 200 chars: no marker.
        let source = format!("{head}{}}}", "x".repeat(body_len - 1));
        assert_eq!(source.chars().count(), 200);

        let cells = extract_cells(&source);
        assert_eq!(cells[0].preview, source);
    }

    #[test]
    fn test_find_cell_exact_match() {
        let cells = extract_cells("const _alpha = function(){a}\nconst _beta = function(){b}");

        let cell = find_cell(&cells, "_beta").unwrap();
        assert_eq!(cell.name, "_beta");
    }

    #[test]
    fn test_find_cell_substring_first_in_scan_order_wins() {
        // "_chart" is a substring of "_chartHelper", which appears first, so
        // the earlier substring match wins over the later exact match.
        let cells = extract_cells(
            "const _chartHelper = function(){h}\nconst _chart = function(){c}",
        );

        let cell = find_cell(&cells, "_chart").unwrap();
        assert_eq!(cell.name, "_chartHelper");
    }

    #[test]
    fn test_find_cell_missing() {
        let cells = extract_cells("const _only = function(){x}");
        assert!(find_cell(&cells, "_nope").is_none());
    }

    #[test]
    fn test_non_cell_declarations_ignored() {
        let source = "const helper = function helper(){plain}\nconst _cell = function(){x}";

        let cells = extract_cells(source);
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].name, "_cell");
    }
}
