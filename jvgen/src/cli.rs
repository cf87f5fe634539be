//! The `jvgen` command line.

use anyhow::Context;
use clap::Parser;
use jvgen_codegen::naming::DEFAULT_ROOT_NAME;
use jvgen_codegen::{Encoder, Lang};
use jvgen_schema::Registry;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Generate type definitions from JSON Type Definition schemas
#[derive(Parser, Debug)]
#[command(name = "jvgen", version)]
pub struct Cli {
    /// target language (typescript or rust)
    #[arg(long, default_value_t = Lang::TypeScript)]
    pub lang: Lang,

    /// prefix of every generated type name
    #[arg(long, default_value = DEFAULT_ROOT_NAME)]
    pub root_name: String,

    /// name each schema's types after its id or file stem instead of --root-name
    #[arg(long)]
    pub names_from_ids: bool,

    /// output file (stdout if omitted)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// schema files, generated in the order given
    #[arg(value_name = "SCHEMA", num_args = 1.., required = true)]
    pub schemas: Vec<PathBuf>,
}

/// Loads the schemas named on the command line and writes the generated
/// code to the requested destination.
///
/// # Errors
/// Returns an error if a schema fails to load or generation fails. Output
/// produced before the failure is not removed.
pub fn run(cli: &Cli) -> anyhow::Result<()> {
    let registry = Registry::from_files(&cli.schemas).context("failed to load schemas")?;
    tracing::info!(
        "generating {} types for {} schema(s)",
        cli.lang,
        registry.len()
    );

    match &cli.out {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            generate_into(BufWriter::new(file), &registry, cli)?;
            tracing::info!("wrote {}", path.display());
        }
        None => {
            generate_into(io::stdout().lock(), &registry, cli)?;
        }
    }
    Ok(())
}

/// Generates code for `registry` into `out` with the naming options from
/// `cli`, returning the sink.
///
/// # Errors
/// Returns an error if generation fails.
pub fn generate_into<W: Write>(out: W, registry: &Registry, cli: &Cli) -> anyhow::Result<W> {
    let lang = cli.lang;
    let emitter = lang.emitter(&cli.root_name, cli.names_from_ids);
    let mut encoder = Encoder::new(out, registry, emitter);
    encoder
        .run()
        .with_context(|| format!("failed to generate {lang} code"))?;
    Ok(encoder.into_inner())
}
