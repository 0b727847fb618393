use anyhow::Context;
use libgraphql_engine::schema::Schema;
use libgraphql_engine::schema::SchemaBuilder;
use libgraphql_engine::schema::SchemaOptions;
use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use walkdir::WalkDir;

/// Flags shared by every command that needs a schema.
#[derive(Debug, clap::Args)]
pub(crate) struct SchemaArgs {
    #[arg(
        help="Path to a GraphQL schema (SDL) file, or a directory of schema \
             files. May be given more than once.",
        long="schema",
        required=true,
    )]
    schema_paths: Vec<PathBuf>,

    #[arg(
        help="Reject queries whose fields nest deeper than this.",
        long,
    )]
    max_depth: Option<usize>,

    #[arg(
        help="Reject queries whose estimated complexity exceeds this.",
        long,
    )]
    max_complexity: Option<f64>,

    #[arg(
        help="Abandon execution after this many milliseconds.",
        long,
    )]
    timeout_ms: Option<u64>,
}
impl SchemaArgs {
    /// Load and build the schema, with any limits given on the command line
    /// overriding the defaults.
    pub(crate) fn load_schema(&self) -> anyhow::Result<Arc<Schema>> {
        let schema_exts = ["graphql", "graphqls", "gql"].map(String::from);
        let (file_paths, errors) = find_graphql_files(&self.schema_paths, &schema_exts);
        if let Some(err) = errors.into_iter().next() {
            return Err(err).context("failed to scan the schema paths");
        }
        anyhow::ensure!(!file_paths.is_empty(), "no schema files were found");

        let name = file_paths.first()
            .and_then(|path| path.file_stem())
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "schema".to_string());
        let mut builder = SchemaBuilder::new(name);
        for path in &file_paths {
            log::debug!("Loading schema file {path:#?}.");
            builder = builder.load_file(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
        }

        let defaults = SchemaOptions::default();
        let options = SchemaOptions {
            max_query_complexity: self.max_complexity.or(defaults.max_query_complexity),
            max_query_depth: self.max_depth.or(defaults.max_query_depth),
            query_timeout_ms: self.timeout_ms.or(defaults.query_timeout_ms),
            ..defaults
        };
        let schema = builder.with_options(options).build().context("the schema is invalid")?;
        Ok(Arc::new(schema))
    }
}

/// Every file at or under `paths` whose extension is one of `exts`, along
/// with any errors hit while walking the filesystem. A single file path is
/// always kept, whatever its extension.
pub(crate) fn find_graphql_files(
    paths: &[PathBuf],
    exts: &[String],
) -> (Vec<PathBuf>, Vec<walkdir::Error>) {
    let exts: HashSet<&str> = exts.iter()
        .map(|ext| ext.trim_start_matches('.'))
        .collect();

    let mut errors = vec![];
    let mut file_paths = vec![];
    for path in paths {
        if path.is_file() {
            file_paths.push(path.to_owned());
            continue;
        }
        for entry in WalkDir::new(path.as_path()).follow_links(true).sort_by_file_name() {
            match entry {
                Ok(entry) => {
                    let path = entry.path();
                    if entry.file_type().is_file() && has_extension(path, &exts) {
                        log::trace!("Found file at {path:#?}.");
                        file_paths.push(path.to_owned());
                    } else {
                        log::trace!("Skipping {path:#?}.");
                    }
                },

                Err(e) => {
                    log::trace!(
                        "Encountered an error while iterating recursive \
                        filesystem entities at/under {path:#?}."
                    );
                    errors.push(e);
                },
            }
        }
    }
    (file_paths, errors)
}

fn has_extension(path: &Path, exts: &HashSet<&str>) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| exts.contains(ext))
}
