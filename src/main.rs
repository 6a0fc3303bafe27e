mod cli;
mod convert;
mod error;

use clap::Parser;

fn main() -> miette::Result<()> {
    let cli = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if cli.list_styles {
        for name in hanji_render::StyleConfig::list_builtins() {
            println!("{name}");
        }
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => hanji_config::Config::load_file(path),
        None => hanji_config::Config::load(),
    }
    .map_err(|err| error::CliError::Config { message: err.to_string() })?;

    let request = convert::Request::resolve(&cli, &config)?;
    let output = convert::run(request)?;
    println!("{}", output.display());
    Ok(())
}
