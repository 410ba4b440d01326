//! The clap command tree and shared command plumbing.

mod converter;
pub use converter::{ConverterCmd, PrivateKeyToPublicKey};

mod profile;
pub use profile::{Import, List, ProfileCmd};

mod transaction;
pub use transaction::{MosaicAddressRestriction, TransactionCmd};

use crate::{
    announce::{Announcer, Outcome},
    resolvers::{DisabledPrompt, Prompt, TtyPrompt},
};
use symbol_core::types::SignedTransaction;
use symbol_providers::{Provider, RestClient};

/// A command line wallet client for Symbol networks
#[derive(clap::Parser, Debug)]
#[command(name = "symbol-cli", version, about, long_about = None)]
pub enum Cmd {
    /// Sign and announce transactions to the network
    #[command(subcommand)]
    Transaction(TransactionCmd),
    /// Offline key conversions, no node involved
    #[command(subcommand)]
    Converter(ConverterCmd),
    /// Manage stored account profiles
    #[command(subcommand)]
    Profile(ProfileCmd),
}

impl Cmd {
    pub async fn execute(self) -> anyhow::Result<()> {
        match self {
            Cmd::Transaction(cmd) => cmd.execute().await,
            Cmd::Converter(cmd) => cmd.execute().await,
            Cmd::Profile(cmd) => cmd.execute().await,
        }
    }
}

/// Flags shared by every command that signs against a profile.
#[derive(clap::Args, Debug, Default)]
pub struct CommonArgs {
    /// Profile to sign with, defaults to the store's default profile
    #[arg(long)]
    pub profile: Option<String>,
    /// Password unlocking the profile's private key
    #[arg(long)]
    pub password: Option<String>,
    /// Max fee in absolute units
    #[arg(long)]
    pub max_fee: Option<String>,
    /// Fail instead of prompting for missing options
    #[arg(long)]
    pub batch: bool,
}

impl CommonArgs {
    /// The prompt matching the requested interactivity.
    pub fn prompt(&self) -> Box<dyn Prompt> {
        prompt_for(self.batch)
    }
}

pub(crate) fn prompt_for(batch: bool) -> Box<dyn Prompt> {
    if batch {
        Box::new(DisabledPrompt)
    } else {
        Box::new(TtyPrompt)
    }
}

/// Announces a signed batch and prints one line per outcome.
///
/// Outcomes gathered before a transport failure are printed before the error
/// propagates; a rejection also fails the command after the report.
pub(crate) async fn announce_and_report<C: RestClient>(
    provider: &Provider<C>,
    signed: &[SignedTransaction],
) -> anyhow::Result<()> {
    match Announcer::new(provider).announce_all(signed).await {
        Ok(report) => {
            for entry in &report {
                println!("{entry}");
            }
            if let Some(rejected) =
                report.iter().find(|entry| matches!(entry.outcome, Outcome::Rejected { .. }))
            {
                anyhow::bail!("transaction {} was rejected by the network", rejected.hash);
            }
            Ok(())
        }
        Err(err) => {
            for entry in &err.completed {
                println!("{entry}");
            }
            Err(err.into())
        }
    }
}
