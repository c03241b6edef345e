use crate::ast;
use crate::Behaviour;
use crate::ManifestConfig;
use crate::OperationKind;
use crate::OperationManifest;
use crate::OperationManifestBuilder;
use crate::test::snapshot_tests::ManifestSnapshotTestCase;
use crate::tests::test_utils;
use rayon::prelude::IntoParallelRefIterator;
use rayon::prelude::ParallelIterator;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

/// Result of a single snapshot test
#[derive(Debug)]
pub struct SnapshotTestResult {
    pub test_name: String,
    pub passed: bool,
    pub error_message: Option<String>,
    pub file_path: PathBuf,
}

/// Collection of snapshot test results
#[derive(Debug, Default)]
pub struct SnapshotTestResults {
    pub results: Vec<SnapshotTestResult>,
}

impl SnapshotTestResults {
    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|r| r.passed)
    }

    pub fn failure_report(&self) -> String {
        let failures: Vec<_> = self.results.iter().filter(|r| !r.passed).collect();
        let failures_len = failures.len();
        let results_len = self.results.len();
        let failures_text = failures
            .iter()
            .map(|r| format_detailed_failure(r))
            .collect::<Vec<_>>()
            .join("\n\n");

        format!("{failures_len} of {results_len} snapshot tests failed:\n\n{failures_text}")
    }

    pub fn summary(&self) -> String {
        let all_passed = self.all_passed();
        let emoji = if all_passed { "✅" } else { "❌" };
        let banner = format!("{emoji} ========================================");
        let header = format!("{emoji} MANIFEST SNAPSHOT SUMMARY");
        let total = self.results.len();
        let failed: Vec<_> = self.results
            .iter()
            .filter(|r| !r.passed)
            .map(|r| format!("  - {}", r.test_name))
            .collect();
        let passed = total - failed.len();

        if failed.is_empty() {
            format!("{banner}\n{header}\n{banner}\nTotal tests: {total}\nPassed: {total}\nFailed: 0\n{banner}")
        } else {
            let failed_len = failed.len();
            let failed_list = failed.join("\n");
            format!("{banner}\n{header}\n{banner}\nTotal tests: {total}\nPassed: {passed}\nFailed: {failed_len}\n\nFailed snapshot tests:\n{failed_list}\n{banner}")
        }
    }
}

fn format_detailed_failure(result: &SnapshotTestResult) -> String {
    let test_name = &result.test_name;
    let file_path = result.file_path.display();
    let mut output = format!("❌ {test_name}\n   File: {file_path}\n");
    if let Some(msg) = &result.error_message {
        output.push_str(&format!("   {msg}\n"));
    }
    output
}

/// Run every manifest snapshot test discovered under `fixtures_dir`.
pub fn run_manifest_tests(fixtures_dir: &Path) -> SnapshotTestResults {
    let test_cases = ManifestSnapshotTestCase::discover_all(fixtures_dir);
    let results = test_cases
        .par_iter()
        .map(|test_case| {
            if test_case.expects_failure() {
                test_invalid_manifest(test_case)
            } else {
                test_valid_manifest(test_case)
            }
        })
        .collect();

    SnapshotTestResults { results }
}

/// Load config + inputs and build, flattening every kind of failure into its
/// `(Debug, Display)` renderings.
fn build_test_case(
    test_case: &ManifestSnapshotTestCase,
) -> Result<OperationManifest, (String, String)> {
    let config = match &test_case.config_path {
        Some(config_path) => ManifestConfig::from_file(config_path)
            .map_err(|e| (format!("{e:?}"), e.to_string()))?,
        None => ManifestConfig::default(),
    };

    let mut builder = OperationManifestBuilder::new(config);
    for input_path in &test_case.input_paths {
        builder.add_from_file(input_path)
            .map_err(|e| (format!("{e:?}"), e.to_string()))?;
    }

    builder.build().map_err(|e| (format!("{e:?}"), e.to_string()))
}

/// A record with its `query` parsed and stripped of source positions, so
/// hand-written expectations are compared as documents rather than as printer
/// output.
#[derive(Debug, PartialEq)]
struct ComparableRecord {
    operation_name: String,
    operation_type: OperationKind,
    query: ast::operation::Document,
    behaviour: Behaviour,
}

fn comparable_records(manifest: &OperationManifest) -> Result<Vec<ComparableRecord>, String> {
    manifest.records()
        .iter()
        .map(|record| {
            let query = ast::operation::parse(&record.query)
                .map_err(|e| format!("`{}` has an unparseable query: {e}", record.operation_name))?;
            Ok(ComparableRecord {
                operation_name: record.operation_name.clone(),
                operation_type: record.operation_type,
                query: test_utils::without_positions(query),
                behaviour: record.behaviour.clone(),
            })
        })
        .collect()
}

fn test_valid_manifest(test_case: &ManifestSnapshotTestCase) -> SnapshotTestResult {
    let test_name = test_case.name.to_owned();
    let expected_path = test_case.expected_manifest_path.clone().unwrap_or_default();
    let fail = |error_message: String| SnapshotTestResult {
        test_name: test_name.clone(),
        passed: false,
        error_message: Some(error_message),
        file_path: expected_path.clone(),
    };

    let actual = match build_test_case(test_case) {
        Ok(manifest) => manifest,
        Err((_, display)) => return fail(format!("Expected: Valid manifest\nGot: {display}")),
    };

    let expected = match fs::read_to_string(&expected_path)
        .map_err(|e| e.to_string())
        .and_then(|json| {
            serde_json::from_str::<OperationManifest>(&json).map_err(|e| e.to_string())
        })
    {
        Ok(manifest) => manifest,
        Err(e) => return fail(format!("Could not load expected.json: {e}")),
    };

    let (actual_records, expected_records) = match (
        comparable_records(&actual),
        comparable_records(&expected),
    ) {
        (Ok(actual_records), Ok(expected_records)) => (actual_records, expected_records),
        (Err(e), _) => return fail(format!("Emitted manifest is invalid: {e}")),
        (_, Err(e)) => return fail(format!("Could not load expected.json: {e}")),
    };

    if actual_records == expected_records {
        SnapshotTestResult {
            test_name: test_name.clone(),
            passed: true,
            error_message: None,
            file_path: expected_path.clone(),
        }
    } else {
        let actual_json = actual.to_json_string().unwrap_or_default();
        let expected_json = expected.to_json_string().unwrap_or_default();
        fail(format!(
            "Manifest mismatch\n\nExpected:\n{expected_json}\n\nActual:\n{actual_json}"
        ))
    }
}

fn test_invalid_manifest(test_case: &ManifestSnapshotTestCase) -> SnapshotTestResult {
    let test_name = test_case.name.to_owned();
    let file_path = test_case.input_paths.first().cloned().unwrap_or_default();

    let (error_debug, error_display) = match build_test_case(test_case) {
        Ok(_) => return SnapshotTestResult {
            test_name,
            passed: false,
            error_message: Some(
                "Expected: Should fail to build\nGot: Manifest built successfully (false negative!)"
                    .to_string(),
            ),
            file_path,
        },
        Err(err) => err,
    };

    let unmatched: Vec<_> = test_case.expected_errors
        .iter()
        .filter(|pattern| !pattern.matches(&error_debug, &error_display))
        .map(|pattern| format!("  ✗ {pattern}"))
        .collect();

    if unmatched.is_empty() {
        SnapshotTestResult {
            test_name,
            passed: true,
            error_message: None,
            file_path,
        }
    } else {
        let unmatched_list = unmatched.join("\n");
        SnapshotTestResult {
            test_name,
            passed: false,
            error_message: Some(format!(
                "Expected: All error patterns must match\nGot: Not all expected errors matched\n\nUnmatched patterns:\n{unmatched_list}\n\nActual error:\n{error_display}"
            )),
            file_path,
        }
    }
}
