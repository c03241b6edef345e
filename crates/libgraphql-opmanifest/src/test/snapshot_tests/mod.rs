//! File-based snapshot tests for operation manifests.
//!
//! Each directory under `fixtures/valid_manifests/` is one suite: its
//! `*.graphql` files (loaded in file-name order) must build into exactly the
//! manifest described by its `expected.json`. Each `query` is compared as a
//! parsed document, so expected queries may use any layout but must spell out
//! the same literal values. An optional `config.json` supplies a
//! [`ManifestConfig`](crate::ManifestConfig).
//!
//! Each `*.graphql` file or directory under `fixtures/invalid_manifests/` must
//! fail to build. `# EXPECTED_ERROR_TYPE:` and `# EXPECTED_ERROR_CONTAINS:`
//! comments in the inputs narrow down which error is expected.

mod expected_error_pattern;
mod manifest_snapshot_test_case;
mod test_runner;
mod utils;

pub use expected_error_pattern::ExpectedErrorPattern;
pub use manifest_snapshot_test_case::ManifestSnapshotTestCase;

#[cfg(test)]
mod tests {
    use crate::test::snapshot_tests::test_runner;
    use crate::test::snapshot_tests::utils;

    #[test]
    fn verify_manifest_snapshot_tests() {
        let fixtures_dir = utils::get_fixtures_dir();
        let results = test_runner::run_manifest_tests(fixtures_dir);

        if !results.all_passed() {
            eprintln!("{}", results.failure_report());
            eprintln!("\n{}", results.summary());
        } else {
            println!("{}", results.summary());
        }

        assert!(!results.results.is_empty(), "No snapshot tests were discovered");
        assert!(
            results.all_passed(),
            "Manifest snapshot tests failed:\n{}",
            results.failure_report()
        );
    }
}
