use clap::Parser;
use jvgen::cli::{Cli, run};

fn main() -> anyhow::Result<()> {
    // Generated code goes to stdout, so logs must not.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    run(&cli)
}
