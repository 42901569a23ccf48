use std::path::Path;

use html_test_support::assert_same_document;
use html_test_support::cases::{case_files, load_cases};
use transformer::{process, Config, Request};

#[test]
fn fixture_cases() {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    let files = case_files(&dir);
    assert!(!files.is_empty(), "no fixture files under {dir:?}");

    let mut ran = 0;
    for file in files {
        for case in load_cases(&file) {
            let mut request = Request::new(case.input.as_str(), case.document_url());
            request.rtv = case.rtv.clone();
            request.css = case.css.clone();
            request.config = Config::Custom(case.transformers.clone());
            let output = process(&request)
                .unwrap_or_else(|err| panic!("{}: {}: {err}", file.display(), case.name));
            assert_same_document(
                &format!("{}: {}", file.display(), case.name),
                &output.html,
                &case.expected,
            );
            ran += 1;
        }
    }
    assert!(ran > 0);
}
