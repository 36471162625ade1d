use anyhow::Context;
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod compile;
mod config;
mod error;
mod output;
mod render;

pub type Result<T> = anyhow::Result<T>;

/// File name of the periodics document inside `--output-dir`.
const PERIODICS_FILE: &str = "generated.yaml";

#[derive(Parser, Debug)]
#[command(name = "generate-tests")]
#[command(about = "Generate periodic CI jobs from an axis-based config", long_about = None)]
struct Cli {
    /// Input config document (jobs + axis maps).
    #[arg(long, value_name = "PATH")]
    yaml_config_path: PathBuf,

    /// Directory the periodics document is written to.
    #[arg(long, value_name = "DIR", default_value = "config/jobs/kubernetes/generated/")]
    output_dir: PathBuf,

    /// Path of the generated test-group document.
    #[arg(
        long,
        value_name = "PATH",
        default_value = "config/testgrids/generated-test-config.yaml"
    )]
    testgrid_output_path: PathBuf,

    /// Template for the periodics document; must contain __PERIODICS__.
    #[arg(long, value_name = "PATH")]
    template: Option<PathBuf>,

    /// Fail when a job name refers to an axis key the config does not define.
    #[arg(long)]
    strict_axes: bool,

    /// Debug logging (RUST_LOG takes precedence).
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("write {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // 1) Load inputs. The template is resolved before compiling so a bad
    // template path fails fast.
    let doc = config::ConfigDocument::load(&cli.yaml_config_path)?;
    let template = match &cli.template {
        Some(path) => render::Template::load(path)?,
        None => render::Template::builtin(),
    };

    // 2) Compile every job; the first error aborts with nothing written.
    let opts = compile::CompileOptions {
        strict_axes: cli.strict_axes,
    };
    let batch = compile::compile_all(&doc, opts).context("generate jobs")?;
    if !batch.unresolved_axes.is_empty() {
        tracing::warn!(
            count = batch.unresolved_axes.len(),
            "some axis keys were not defined and fell back to empty defaults"
        );
    }

    // 3) Render both documents, then write.
    let periodics = template.render(&batch.periodics_document())?;
    let test_groups = render::render_test_groups(&batch.test_groups_document())?;

    let periodics_path = cli.output_dir.join(PERIODICS_FILE);
    tracing::info!(path = %periodics_path.display(), jobs = batch.periodics.len(), "writing periodics");
    write_file(&periodics_path, &periodics)?;

    tracing::info!(
        path = %cli.testgrid_output_path.display(),
        groups = batch.test_groups.len(),
        "writing test groups"
    );
    write_file(&cli.testgrid_output_path, &test_groups)?;

    Ok(())
}
