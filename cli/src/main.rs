//! cep-lookup: terminal front-end for the CEP address lookup form.
//!
//! With a CEP argument it performs one lookup and prints the address block
//! (or the error line). Without one it shows the form as a prompt and reads
//! CEPs from stdin until EOF. Lookup failures are displayed, never turned
//! into a failing exit status.
mod args;

use std::io;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cep_cli::{run_interactive, run_once, UreqExecutor};
use cep_core::{AddressLookup, CepClient};

use crate::args::CliArgs;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")))
        .with_writer(io::stderr)
        .init();

    let args = CliArgs::parse();
    tracing::debug!(?args, "starting");

    let executor = UreqExecutor::new(Duration::from_secs(args.timeout_secs));
    let mut lookup = AddressLookup::new(CepClient::new(&args.base_url));
    let mut stdout = io::stdout().lock();

    match args.cep {
        Some(cep) => run_once(&mut lookup, &executor, &cep, args.json, &mut stdout)
            .context("failed to write lookup result")?,
        None => run_interactive(&mut lookup, &executor, io::stdin().lock(), &mut stdout)
            .context("interactive session failed")?,
    }
    Ok(())
}
