pub mod cases;
pub mod fixtures;

pub use crate::fixtures::concat;

/// Parses `input` as a full document and prints it back.
///
/// Comparing normalized strings makes expectations independent of quoting and of whether the
/// author spelled out `html`/`head`/`body`.
pub fn normalize(input: &str) -> String {
    html::serialize(&html::parse_document(input))
}

/// Snapshot lines of the normalized document, for [`diff_lines`] reports.
pub fn snapshot_lines(input: &str) -> Vec<String> {
    let dom = html::parse_document(input);
    html::dom_snapshot::dom_snapshot_lines(&dom, dom.root())
}

/// Asserts that two documents normalize to the same markup, printing a line diff otherwise.
#[track_caller]
pub fn assert_same_document(name: &str, actual: &str, expected: &str) {
    let actual_norm = normalize(actual);
    let expected_norm = normalize(expected);
    if actual_norm != expected_norm {
        let diff = diff_lines(&snapshot_lines(expected), &snapshot_lines(actual));
        panic!(
            "{name}: documents differ\n  expected: {expected_norm}\n    actual: {actual_norm}\n{diff}"
        );
    }
}

pub fn diff_lines(expected: &[String], actual: &[String]) -> String {
    let max = expected.len().max(actual.len());
    let mut out = String::new();
    use std::fmt::Write;
    let missing = "<missing>";
    let mismatch = (0..max).find(|i| expected.get(*i) != actual.get(*i));
    if let Some(i) = mismatch {
        let start = i.saturating_sub(2);
        let end = (i + 3).min(max);
        let _ = writeln!(
            &mut out,
            "first mismatch at line {} (showing {}..={}):",
            i + 1,
            start + 1,
            end
        );
        for line_idx in start..end {
            let left = expected
                .get(line_idx)
                .map(String::as_str)
                .unwrap_or(missing);
            let right = actual.get(line_idx).map(String::as_str).unwrap_or(missing);
            let marker = if line_idx == i { ">" } else { " " };
            let _ = writeln!(&mut out, "{marker} {:>4}  expected: {left}", line_idx + 1);
            let _ = writeln!(&mut out, "{marker} {:>4}    actual: {right}", line_idx + 1);
        }
    }
    let _ = writeln!(
        &mut out,
        "expected {} lines, actual {} lines",
        expected.len(),
        actual.len()
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_adds_required_tags() {
        assert_eq!(
            normalize(&concat(&[fixtures::DOCTYPE, fixtures::SCRIPT_AMP_RUNTIME, "hello"])),
            concat(&[
                "<!doctype html><html><head>",
                fixtures::SCRIPT_AMP_RUNTIME,
                "</head><body>hello</body></html>",
            ])
        );
    }

    #[test]
    fn fixtures_are_already_normalized() {
        for snippet in [
            fixtures::LINK_GOOGLE_FONT_PRECONNECT,
            fixtures::META_VIEWPORT,
            fixtures::NOSCRIPT_AMP_BOILERPLATE,
            fixtures::STYLE_AMP_BOILERPLATE,
            fixtures::SCRIPT_AMP_MUSTACHE,
        ] {
            let doc = concat(&["<html><head>", snippet, "</head><body></body></html>"]);
            assert_eq!(normalize(&doc), doc);
        }
    }

    #[test]
    fn diff_lines_points_at_first_mismatch() {
        let expected = vec!["a".to_string(), "b".to_string()];
        let actual = vec!["a".to_string(), "c".to_string()];
        let report = diff_lines(&expected, &actual);
        assert!(report.contains("first mismatch at line 2"), "{report}");
    }
}
