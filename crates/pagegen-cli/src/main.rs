use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use pagegen_backend_compose::ComposeBackend;
use pagegen_core::pipeline::{Backend, BackendInput, Frontend, FrontendInput, GenerateConfig};
use pagegen_core::project::{ProjectManifest, MANIFEST_FILE_NAME};
use pagegen_core::registry::RegistryTable;
use pagegen_frontend_json::{load_page, JsonFrontend};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Page sources used when there is no manifest and none are given.
const DEFAULT_PAGES_DIR: &str = "pages";
/// Output directory used when there is no manifest and none is given.
const DEFAULT_OUTPUT_DIR: &str = "generated";

#[derive(Parser)]
#[command(name = "pagegen", about = "Page-definition code generator")]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Defaults to `generate` with default inputs.
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Lower page definitions and write state holders and views.
    Generate(GenerateArgs),
    /// Lower page definitions in memory and report errors without writing.
    Check(GenerateArgs),
    /// Print a page definition in human-readable form.
    PrintIr {
        /// Path to a JSON page definition.
        file: PathBuf,
    },
    /// Display project manifest info.
    Info {
        /// Path to the project manifest.
        #[arg(long, default_value = MANIFEST_FILE_NAME)]
        manifest: PathBuf,
    },
    /// Print the active construct registry as JSON.
    Registry {
        /// Registry table to load instead of the built-in one.
        #[arg(long)]
        registry: Option<PathBuf>,
    },
}

#[derive(Args)]
struct GenerateArgs {
    /// Path to the project manifest.
    #[arg(long, default_value = MANIFEST_FILE_NAME)]
    manifest: PathBuf,
    /// Page definition files or directories (overrides the manifest).
    #[arg(long = "pages")]
    pages: Vec<PathBuf>,
    /// Output directory (overrides the manifest).
    #[arg(long)]
    output: Option<PathBuf>,
    /// Construct registry table (overrides the manifest).
    #[arg(long)]
    registry: Option<PathBuf>,
    /// Package declared in generated sources.
    #[arg(long)]
    package: Option<String>,
    /// Name of the state-holder parameter in generated views.
    #[arg(long)]
    binding: Option<String>,
    /// Reject actions and `page.` references to undeclared members.
    #[arg(long)]
    strict: bool,
}

impl Default for GenerateArgs {
    fn default() -> Self {
        Self {
            manifest: PathBuf::from(MANIFEST_FILE_NAME),
            pages: Vec::new(),
            output: None,
            registry: None,
            package: None,
            binding: None,
            strict: false,
        }
    }
}

/// Everything one generation run needs, after merging manifest and flags.
struct Job {
    sources: Vec<PathBuf>,
    output_dir: PathBuf,
    registry: RegistryTable,
    config: GenerateConfig,
}

/// Find `pagegen.json` by walking up from `start` through ancestor directories.
fn find_manifest_upward(start: &Path) -> Option<PathBuf> {
    let mut dir = start.to_path_buf();
    loop {
        let candidate = dir.join(MANIFEST_FILE_NAME);
        if candidate.exists() {
            return Some(candidate);
        }
        if !dir.pop() {
            return None;
        }
    }
}

/// Resolve the manifest path. An explicit path must exist; the default name
/// is searched for in ancestor directories and may be absent.
fn resolve_manifest_path(path: &Path) -> Result<Option<PathBuf>> {
    if path.exists() {
        return Ok(Some(path.to_path_buf()));
    }
    if path.as_os_str() == MANIFEST_FILE_NAME {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        let found = find_manifest_upward(&cwd);
        if let Some(found) = &found {
            info!(manifest = %found.display(), "found manifest");
        }
        return Ok(found);
    }
    bail!("manifest not found: {}", path.display())
}

fn load_manifest(path: &Path) -> Result<ProjectManifest> {
    let file =
        File::open(path).with_context(|| format!("failed to open manifest: {}", path.display()))?;
    let mut manifest: ProjectManifest = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse manifest: {}", path.display()))?;
    if let Some(base) = path.canonicalize()?.parent() {
        manifest.resolve_paths(base);
    }
    Ok(manifest)
}

fn load_registry(path: Option<&Path>) -> Result<RegistryTable> {
    match path {
        Some(path) => RegistryTable::load(path)
            .with_context(|| format!("failed to load registry: {}", path.display())),
        None => Ok(RegistryTable::compose_default()),
    }
}

fn resolve_job(args: &GenerateArgs) -> Result<Job> {
    let manifest = match resolve_manifest_path(&args.manifest)? {
        Some(path) => Some(load_manifest(&path)?),
        None => None,
    };

    let sources = if !args.pages.is_empty() {
        args.pages.clone()
    } else if let Some(manifest) = &manifest {
        manifest.pages.clone()
    } else {
        vec![PathBuf::from(DEFAULT_PAGES_DIR)]
    };
    for source in &sources {
        if !source.exists() {
            bail!("page source not found: {}", source.display());
        }
    }

    let output_dir = args
        .output
        .clone()
        .or_else(|| manifest.as_ref().map(|m| m.output_dir.clone()))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

    let registry_path = args
        .registry
        .clone()
        .or_else(|| manifest.as_ref().and_then(|m| m.registry.clone()));
    let registry = load_registry(registry_path.as_deref())?;

    let mut config = manifest
        .as_ref()
        .map(ProjectManifest::generate_config)
        .unwrap_or_default();
    if let Some(package) = &args.package {
        config = config.with_package(package.clone());
    }
    if let Some(binding) = &args.binding {
        config = config.with_binding_name(binding.clone());
    }
    if args.strict {
        config = config.strict(true);
    }

    Ok(Job {
        sources,
        output_dir,
        registry,
        config,
    })
}

fn find_frontend() -> Box<dyn Frontend> {
    Box::new(JsonFrontend)
}

fn find_backend() -> Box<dyn Backend> {
    Box::new(ComposeBackend)
}

fn cmd_generate(args: &GenerateArgs, dry_run: bool) -> Result<()> {
    let job = resolve_job(args)?;

    let frontend = find_frontend();
    let output = frontend
        .extract(FrontendInput {
            sources: job.sources,
        })
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    if output.pages.is_empty() && output.failures.is_empty() {
        bail!("no page definitions found");
    }
    debug!(
        frontend = frontend.name(),
        pages = output.pages.len(),
        unreadable = output.failures.len(),
        "loaded pages"
    );
    for failure in &output.failures {
        eprintln!("error: {}", failure.error);
    }
    let unreadable = output.failures.len();

    let backend = find_backend();
    let input = BackendInput {
        pages: output.pages,
        output_dir: job.output_dir.clone(),
        registry: Box::new(job.registry),
        config: job.config,
        dry_run,
    };
    let reports = backend.emit(input).map_err(|e| anyhow::anyhow!("{e}"))?;

    let mut failed = unreadable;
    for report in &reports {
        match &report.outcome {
            Ok(Some(artifacts)) => println!(
                "Generated {}: {}, {}",
                report.page,
                artifacts.state_holder_path.display(),
                artifacts.view_path.display()
            ),
            Ok(None) => println!("Checked {}", report.page),
            Err(e) => {
                eprintln!("error: page {}: {e}", report.page);
                failed += 1;
            }
        }
    }
    if failed > 0 {
        bail!("{failed} of {} pages failed", reports.len() + unreadable);
    }

    if !dry_run {
        println!(
            "Emitted {} output to {}",
            backend.name(),
            job.output_dir.display()
        );
    }
    Ok(())
}

fn cmd_print_ir(file: &Path) -> Result<()> {
    let page = load_page(file).map_err(|e| anyhow::anyhow!("{e}"))?;
    println!("{page}");
    Ok(())
}

fn cmd_info(manifest_path: &Path) -> Result<()> {
    let Some(path) = resolve_manifest_path(manifest_path)? else {
        bail!("manifest not found: {}", manifest_path.display());
    };
    let manifest = load_manifest(&path)?;
    println!("Project: {}", manifest.name);
    println!("Output:  {}", manifest.output_dir.display());
    if let Some(package) = &manifest.package {
        println!("Package: {package}");
    }
    if let Some(registry) = &manifest.registry {
        println!("Registry: {}", registry.display());
    }
    println!("Strict:  {}", manifest.strict);
    println!("Pages:");
    for page in &manifest.pages {
        println!("  - {}", page.display());
    }
    Ok(())
}

fn cmd_registry(path: Option<&Path>) -> Result<()> {
    let registry = load_registry(path)?;
    println!("{}", serde_json::to_string_pretty(&registry)?);
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match &cli.command {
        None => cmd_generate(&GenerateArgs::default(), false),
        Some(Command::Generate(args)) => cmd_generate(args, false),
        Some(Command::Check(args)) => cmd_generate(args, true),
        Some(Command::PrintIr { file }) => cmd_print_ir(file),
        Some(Command::Info { manifest }) => cmd_info(manifest),
        Some(Command::Registry { registry }) => cmd_registry(registry.as_deref()),
    }
}
