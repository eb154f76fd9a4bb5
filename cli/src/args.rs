use clap::Parser;

use cep_core::DEFAULT_BASE_URL;

/// CLI arguments for cep-lookup
#[derive(Debug, Parser)]
#[command(
    name = "cep-lookup",
    version,
    about = "Look up a Brazilian address by its CEP (postal code)"
)]
pub struct CliArgs {
    /// CEP to look up. Without it, an interactive prompt is started.
    /// Only the first 8 characters are used.
    pub cep: Option<String>,

    /// Base URL serving `{cep}.json` files
    #[arg(long, env = "CEP_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Overall request timeout in seconds
    #[arg(long = "timeout", env = "CEP_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,

    /// Print the outcome as JSON instead of the labelled lines
    #[arg(long)]
    pub json: bool,
}
