use crate::output_utils;
use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use anyhow::Context;
use libgraphql_opmanifest::ManifestConfig;
use libgraphql_opmanifest::OperationKind;
use libgraphql_opmanifest::OperationManifestBuilder;
use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;
use walkdir::WalkDir;

#[derive(Debug, clap::Args)]
pub(crate) struct GenerateCmd {
    #[arg(
        help="Path to a JSON manifest config file (e.g. \
             `{ \"directive_prefix\": \"p__\" }`).",
        long,
    )]
    config: Option<PathBuf>,

    #[arg(
        help="Prefix that marks a directive as a behaviour annotation. \
             Overrides the value from --config.",
        long,
    )]
    directive_prefix: Option<String>,

    #[arg(
        default_values_t=[
            "graphql".to_string(),
            "gql".to_string(),
        ],
        help="Set of file extensions to filter to when searching for files \
             within a directory.",
        long,
        value_delimiter = ',',
    )]
    graphql_file_exts: Vec<String>,

    #[arg(
        help="Path of the `.json` manifest file to write.",
        long,
        short='o',
    )]
    output: PathBuf,

    #[arg(
        help="Paths to one or more GraphQL files or directories containing \
             the GraphQL executable documents to include in the manifest.",
        name="FILE_OR_DIR_PATHS",
        required=true,
    )]
    file_or_dir_paths: Vec<PathBuf>,
}

#[inherent::inherent]
impl RunnableCommand for GenerateCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        // Fail on a bad output path before doing any other work.
        if let Err(e) = libgraphql_opmanifest::validate_output_path(&self.output) {
            return CommandResult::stderr(format_args!(
                "{} {e}",
                output_utils::RED_X,
            ));
        }

        let config = match self.load_config() {
            Ok(config) => config,
            Err(e) => return CommandResult::stderr(format_args!(
                "{} {e:#}",
                output_utils::RED_X,
            )),
        };

        let collected = collect_graphql_files(
            &self.file_or_dir_paths,
            &self.graphql_file_exts,
        );
        if !collected.errors.is_empty() {
            return CommandResult::stderr(format_args!(
                "{} Errors while searching for GraphQL files: {:#?}",
                output_utils::RED_X,
                collected.errors,
            ));
        }
        log::debug!(
            "Found {} GraphQL files to include in the manifest.",
            collected.file_paths.len(),
        );

        let mut builder = OperationManifestBuilder::new(config);
        for file_path in &collected.file_paths {
            if let Err(e) = builder.add_from_file(file_path) {
                return CommandResult::stderr(format_args!(
                    "{} {e}",
                    output_utils::RED_X,
                ));
            }
        }

        let manifest = match builder.build() {
            Ok(manifest) => manifest,
            Err(e) => return CommandResult::stderr(format_args!(
                "{} Errors building operation manifest: {e}",
                output_utils::RED_X,
            )),
        };

        if let Err(e) = libgraphql_opmanifest::write_manifest_file(&self.output, &manifest) {
            return CommandResult::stderr(format_args!(
                "{} {e}",
                output_utils::RED_X,
            ));
        }

        let count_kind = |kind: OperationKind| {
            manifest.records()
                .iter()
                .filter(|record| record.operation_type == kind)
                .count()
        };
        CommandResult::stdout(format_args!(
            concat!(
                "{} Wrote operation manifest to {}:\n",
                "  * Analyzed {} files.\n",
                "  * Skipped {} non-graphql files.\n",
                "  * Emitted {} queries.\n",
                "  * Emitted {} mutations.\n",
                "  * Emitted {} subscriptions.",
            ),
            output_utils::GREEN_CHECK,
            self.output.display(),
            collected.file_paths.len(),
            collected.num_skipped_files,
            count_kind(OperationKind::Query),
            count_kind(OperationKind::Mutation),
            count_kind(OperationKind::Subscription),
        ))
    }
}

impl GenerateCmd {
    fn load_config(&self) -> anyhow::Result<ManifestConfig> {
        let mut config = match &self.config {
            Some(config_path) => ManifestConfig::from_file(config_path)
                .with_context(|| format!("Failed to load config from {config_path:?}"))?,
            None => ManifestConfig::default(),
        };

        if let Some(directive_prefix) = &self.directive_prefix {
            config = config.with_directive_prefix(directive_prefix);
        }
        config.validate()?;

        log::debug!("Using directive prefix `{}`.", config.directive_prefix);
        Ok(config)
    }
}

#[derive(Debug, Default)]
struct CollectedFiles {
    errors: Vec<anyhow::Error>,
    file_paths: Vec<PathBuf>,
    num_skipped_files: usize,
}

/// Find all GraphQL files at or under each input path.
///
/// Inputs keep their command-line order and each directory is walked in
/// file-name order, so the resulting list (and therefore the manifest) is
/// stable across runs. A file reachable from more than one input is only
/// listed once.
fn collect_graphql_files(
    file_or_dir_paths: &[PathBuf],
    graphql_file_exts: &[String],
) -> CollectedFiles {
    let graphql_file_exts: HashSet<&str> =
        graphql_file_exts.iter()
            .map(|ext| ext.trim_start_matches('.'))
            .collect();

    log::debug!("Scanning {} input paths...", file_or_dir_paths.len());
    let mut collected = CollectedFiles::default();
    let mut seen = HashSet::new();
    for path in file_or_dir_paths {
        let walker = WalkDir::new(path.as_path())
            .follow_links(true)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::trace!(
                        "Encountered an error while iterating recursive \
                        filesystem entities at/under {path:#?}."
                    );
                    collected.errors.push(e.into());
                    continue
                },
            };

            let entry_path = entry.path();
            if !entry.file_type().is_file() {
                log::trace!("Skipping non-file: {entry_path:#?}.");
                continue;
            }

            let matches_ext = entry_path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| graphql_file_exts.contains(ext));
            if !matches_ext {
                log::trace!("Skipping non-graphql file: {entry_path:#?}.");
                collected.num_skipped_files += 1;
                continue;
            }

            push_canonical(entry_path, &mut seen, &mut collected);
        }
    }

    // A single explicit file is loaded even if its extension doesn't match.
    if collected.file_paths.is_empty()
        && collected.errors.is_empty()
        && let [only_path] = file_or_dir_paths
        && only_path.is_file() {
        log::warn!(
            "Proceeding to load {only_path:#?} even though it doesn't match \
            any of the --graphql-file-exts ({}).",
            graphql_file_exts.iter()
                .map(|ext| format!("`{ext}`"))
                .collect::<Vec<_>>()
                .join(", "),
        );
        collected.num_skipped_files = 0;
        push_canonical(only_path, &mut seen, &mut collected);
    }

    collected
}

fn push_canonical(
    path: &Path,
    seen: &mut HashSet<PathBuf>,
    collected: &mut CollectedFiles,
) {
    match std::fs::canonicalize(path) {
        Ok(canonical_path) => {
            if seen.insert(canonical_path.clone()) {
                log::trace!("Found file at {canonical_path:#?}.");
                collected.file_paths.push(canonical_path);
            }
        },
        Err(e) => collected.errors.push(
            anyhow::Error::new(e).context(format!("Failed to resolve {path:#?}")),
        ),
    }
}
