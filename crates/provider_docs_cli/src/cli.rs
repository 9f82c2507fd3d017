//! `check` subcommand: argument parsing, option resolution, and the run itself.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use provider_docs_check::{
    Check, CheckOptions, FrontMatterField, FsSource, ProviderIdentifiers, Report, ResourceKind,
};

use crate::config::{ConfigLoader, ProviderDocsConfig, DEFAULT_CONFIG_FILE};
use crate::error::{CliError, CliResult};
use crate::report::{print_report, write_json_report};
use crate::schema::load_identifiers;
use crate::walk::collect_documentation;

const PROVIDER_DIRECTORY_PREFIX: &str = "terraform-provider-";

/// Kinds that `--allowed-resource-subcategories` and `--require-resource-subcategory` apply to.
const RESOURCE_LIKE_KINDS: [ResourceKind; 3] = [
    ResourceKind::DataSource,
    ResourceKind::Ephemeral,
    ResourceKind::Resource,
];

/// Validate the documentation tree of a provider checkout.
#[derive(Args, Debug, Default, Clone)]
pub struct CheckArgs {
    /// Provider root directory.
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Config file (default: `<PATH>/.provider-docs.toml` when present).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Provider short name, e.g. `aws`. Derived from a `terraform-provider-<name>` directory.
    #[arg(long)]
    pub provider_name: Option<String>,

    /// Provider source address selecting the entry in the schema file.
    #[arg(long)]
    pub provider_source: Option<String>,

    /// Output of `terraform providers schema -json`.
    #[arg(long)]
    pub providers_schema_json: Option<PathBuf>,

    /// Only report orphaned CDKTF files, not missing ones.
    #[arg(long)]
    pub ignore_cdktf_missing_files: bool,

    /// Comma separated subcategories allowed for guides.
    #[arg(long, value_delimiter = ',')]
    pub allowed_guide_subcategories: Vec<String>,

    /// Comma separated subcategories allowed for data sources, ephemerals and resources.
    #[arg(long, value_delimiter = ',')]
    pub allowed_resource_subcategories: Vec<String>,

    #[arg(long)]
    pub require_guide_subcategory: bool,

    #[arg(long)]
    pub require_resource_subcategory: bool,

    /// Write a JSON report to this file.
    #[arg(long)]
    pub report: Option<PathBuf>,
}

/// Everything a run needs, after config and flags are merged.
#[derive(Clone, Debug)]
pub struct ResolvedCheck {
    pub root: PathBuf,
    pub options: CheckOptions,
    pub identifiers: ProviderIdentifiers,
}

impl CheckArgs {
    fn load_config(&self) -> CliResult<ProviderDocsConfig> {
        match &self.config {
            Some(path) => ConfigLoader::new(&self.path, path).load(),
            None => Ok(ConfigLoader::new(&self.path, DEFAULT_CONFIG_FILE)
                .load_optional()?
                .unwrap_or_default()),
        }
    }

    /// Merge config file and flags. Flags win; the loaded config is left untouched.
    pub fn resolve(&self) -> CliResult<ResolvedCheck> {
        let config = self.load_config()?;
        let options = self.apply_flags(&config.check);

        let schema_path = self
            .providers_schema_json
            .clone()
            .or_else(|| config.providers_schema_json.clone().map(|p| self.path.join(p)));
        let provider_source = self
            .provider_source
            .as_deref()
            .or(config.provider_source.as_deref());
        let identifiers = match schema_path {
            Some(path) => load_identifiers(&path, provider_source, &options.provider_name)?,
            None => {
                tracing::info!("no providers schema given, skipping file mismatch checks");
                ProviderIdentifiers::new()
            }
        };

        Ok(ResolvedCheck {
            root: self.path.clone(),
            options,
            identifiers,
        })
    }

    fn apply_flags(&self, base: &CheckOptions) -> CheckOptions {
        let mut options = base.clone();
        if let Some(name) = &self.provider_name {
            options.provider_name = name.clone();
        } else if options.provider_name.is_empty() {
            options.provider_name = provider_name_from_path(&self.path).unwrap_or_default();
        }
        if self.ignore_cdktf_missing_files {
            options.ignore_cdktf_missing_files = true;
        }

        if !self.allowed_guide_subcategories.is_empty() {
            options.guide.front_matter.allowed_subcategories =
                self.allowed_guide_subcategories.clone();
        }
        if self.require_guide_subcategory {
            let front_matter = &mut options.guide.front_matter;
            *front_matter = front_matter.clone().require(FrontMatterField::Subcategory);
        }
        for kind in RESOURCE_LIKE_KINDS {
            let front_matter = &mut options.kind_mut(kind).front_matter;
            if !self.allowed_resource_subcategories.is_empty() {
                front_matter.allowed_subcategories = self.allowed_resource_subcategories.clone();
            }
            if self.require_resource_subcategory {
                *front_matter = front_matter.clone().require(FrontMatterField::Subcategory);
            }
        }
        options
    }
}

/// `terraform-provider-<name>` → `<name>`.
pub fn provider_name_from_path(path: &Path) -> Option<String> {
    let resolved = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let directory = resolved.file_name()?.to_str()?;
    directory
        .strip_prefix(PROVIDER_DIRECTORY_PREFIX)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

/// Walk, check, and return the report without printing.
pub fn check_tree(resolved: ResolvedCheck) -> CliResult<Report> {
    let mapping = collect_documentation(&resolved.root)?;
    let source = FsSource::new(&resolved.root);
    let report = Check::new(resolved.options, resolved.identifiers, source).run(&mapping)?;
    Ok(report)
}

/// Full `check` command: print every violation and fail on error-severity ones.
pub fn run_check(args: &CheckArgs) -> CliResult<()> {
    let resolved = args.resolve()?;
    tracing::info!(
        root = %resolved.root.display(),
        provider = resolved.options.provider_name.as_str(),
        "checking provider documentation"
    );
    let report = check_tree(resolved)?;
    print_report(&report);
    if let Some(output) = &args.report {
        write_json_report(&report, output)?;
    }
    if report.is_success() {
        return Ok(());
    }
    Err(CliError::validation(format!(
        "documentation check failed with {} issue(s)",
        report.error_count()
    )))
}
