use crate::test::snapshot_tests::utils;
use crate::test::snapshot_tests::ExpectedErrorPattern;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

/// A single manifest snapshot test: a set of input documents and either the
/// manifest they should produce or the errors they should fail with.
#[derive(Debug, Clone)]
pub struct ManifestSnapshotTestCase {
    pub name: String,
    pub input_paths: Vec<PathBuf>,
    pub config_path: Option<PathBuf>,
    pub expected_manifest_path: Option<PathBuf>,
    pub expected_errors: Vec<ExpectedErrorPattern>,
}

impl ManifestSnapshotTestCase {
    /// Discovers all snapshot test cases from the fixtures directory
    pub fn discover_all(fixtures_dir: &Path) -> Vec<Self> {
        let mut cases = Vec::new();
        cases.extend(Self::discover_valid_manifests(fixtures_dir));
        cases.extend(Self::discover_invalid_manifests(fixtures_dir));
        cases.sort_by(|a, b| a.name.cmp(&b.name));
        cases
    }

    pub fn expects_failure(&self) -> bool {
        self.expected_manifest_path.is_none()
    }

    fn discover_valid_manifests(fixtures_dir: &Path) -> Vec<Self> {
        let valid_dir = fixtures_dir.join("valid_manifests");
        let Ok(entries) = fs::read_dir(&valid_dir) else {
            return Vec::new();
        };

        entries
            .filter_map(|entry| {
                let path = entry.ok()?.path();
                if !path.is_dir() {
                    eprintln!("ERROR: Unexpected file in valid_manifests/: {}", path.display());
                    eprintln!("       Each suite must be a directory with *.graphql inputs");
                    eprintln!("       and an expected.json file.");
                    return None;
                }

                let expected_manifest_path = path.join("expected.json");
                if !expected_manifest_path.is_file() {
                    eprintln!("ERROR: Missing expected.json in {}", path.display());
                    return None;
                }

                let suite_name = path.file_name()?.to_str()?.to_string();
                Some(Self {
                    name: format!("valid_manifests/{suite_name}"),
                    input_paths: utils::sorted_graphql_files(&path),
                    config_path: Self::discover_config(&path),
                    expected_manifest_path: Some(expected_manifest_path),
                    expected_errors: Vec::new(),
                })
            })
            .collect()
    }

    fn discover_invalid_manifests(fixtures_dir: &Path) -> Vec<Self> {
        let invalid_dir = fixtures_dir.join("invalid_manifests");
        let Ok(entries) = fs::read_dir(&invalid_dir) else {
            return Vec::new();
        };

        entries
            .filter_map(|entry| {
                let path = entry.ok()?.path();

                let (name, input_paths, config_path) =
                    if path.is_file() && utils::extension_matches_ignore_case(&path, "graphql") {
                        let name = path.file_stem()?.to_str()?.to_string();
                        (name, vec![path], None)
                    } else if path.is_dir() {
                        let name = path.file_name()?.to_str()?.to_string();
                        let config_path = Self::discover_config(&path);
                        (name, utils::sorted_graphql_files(&path), config_path)
                    } else {
                        return None;
                    };

                let expected_errors = input_paths
                    .iter()
                    .flat_map(|p| Self::parse_expected_errors(p))
                    .collect();

                Some(Self {
                    name: format!("invalid_manifests/{name}"),
                    input_paths,
                    config_path,
                    expected_manifest_path: None,
                    expected_errors,
                })
            })
            .collect()
    }

    fn discover_config(dir: &Path) -> Option<PathBuf> {
        let config_path = dir.join("config.json");
        config_path.is_file().then_some(config_path)
    }

    /// Parses EXPECTED_ERROR_TYPE and EXPECTED_ERROR_CONTAINS comments from a
    /// GraphQL file.
    pub fn parse_expected_errors(path: &Path) -> Vec<ExpectedErrorPattern> {
        let Ok(content) = fs::read_to_string(path) else {
            return Vec::new();
        };

        content
            .lines()
            .filter_map(|line| {
                let trimmed = line.trim_start();

                if let Some(type_pattern) = trimmed.strip_prefix("# EXPECTED_ERROR_TYPE:") {
                    Some(ExpectedErrorPattern::ExactType(
                        type_pattern.trim().to_string(),
                    ))
                } else {
                    trimmed.strip_prefix("# EXPECTED_ERROR_CONTAINS:").map(|contains_pattern| {
                        ExpectedErrorPattern::Contains(contains_pattern.trim().to_string())
                    })
                }
            })
            .collect()
    }
}
