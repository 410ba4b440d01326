use super::prompt_for;
use crate::{
    profile::{Profile, ProfileStore},
    resolvers::{NetworkResolver, PasswordResolver, PrivateKeyResolver, Prompt, Resolve},
};
use anyhow::Context;
use std::str::FromStr;
use symbol_providers::{Http, Provider, RestClient};
use symbol_signers::Account;

#[derive(clap::Subcommand, Debug)]
pub enum ProfileCmd {
    /// Import a private key as a stored profile
    Import(Import),
    /// List the stored profiles
    List(List),
}

impl ProfileCmd {
    pub async fn execute(self) -> anyhow::Result<()> {
        match self {
            ProfileCmd::Import(cmd) => cmd.execute().await,
            ProfileCmd::List(cmd) => cmd.execute().await,
        }
    }
}

/// Encrypts a private key into the profile store, capturing the network
/// parameters the signing pipeline needs from the node.
#[derive(clap::Args, Debug)]
pub struct Import {
    /// Name the profile is stored under
    #[arg(long)]
    pub name: String,
    /// The private key as 64 hex characters
    #[arg(short = 'p', long)]
    pub private_key: Option<String>,
    /// Network the key is used on; must match the node
    #[arg(short = 'n', long)]
    pub network: Option<String>,
    /// REST gateway the profile announces through
    #[arg(long, default_value = "http://localhost:3000")]
    pub url: String,
    /// Password encrypting the stored private key
    #[arg(long)]
    pub password: Option<String>,
    /// Max fee applied when a command gives none
    #[arg(long)]
    pub default_max_fee: Option<u64>,
    /// Make this the default profile
    #[arg(long)]
    pub default: bool,
    /// Fail instead of prompting for missing options
    #[arg(long)]
    pub batch: bool,
}

impl Import {
    async fn execute(self) -> anyhow::Result<()> {
        let store = ProfileStore::open_default()?;
        let provider =
            Provider::new(Http::from_str(&self.url).context("invalid gateway url")?);
        let prompt = prompt_for(self.batch);

        let profile = self.import(&store, &provider, prompt.as_ref()).await?;
        println!("Stored profile {} ({}) for {}", profile.name, profile.network_type, profile.url);
        Ok(())
    }

    /// Resolves key, network and password, verifies the node serves the
    /// requested network, and persists the encrypted profile.
    pub async fn import<C: RestClient>(
        &self,
        store: &ProfileStore,
        provider: &Provider<C>,
        prompt: &dyn Prompt,
    ) -> anyhow::Result<Profile> {
        let private_key =
            PrivateKeyResolver::new(self.private_key.as_deref()).resolve(prompt).await?;
        let network = NetworkResolver::new(self.network.as_deref(), None).resolve(prompt).await?;
        let password = PasswordResolver::new(self.password.as_deref()).resolve(prompt).await?;

        let node = provider.node_info().await?;
        let node_network = node.network_type()?;
        if node_network != network {
            anyhow::bail!("the node at {} serves {node_network}, not {network}", self.url);
        }
        let properties = provider.network_properties().await?;

        let account = Account::from_private_key(&private_key, network)?;
        let profile = Profile {
            name: self.name.clone(),
            network_type: network,
            encrypted_private_key: account.encrypt(&*password)?,
            generation_hash: node.network_generation_hash_seed,
            url: self.url.clone(),
            epoch_adjustment: properties.epoch_adjustment,
            currency_mosaic_id: properties.currency_mosaic_id,
            default_max_fee: self.default_max_fee,
        };
        store.save(&profile, self.default)?;
        Ok(profile)
    }
}

/// Prints the stored profiles; key material is never shown.
#[derive(clap::Args, Debug, Default)]
pub struct List {}

impl List {
    async fn execute(self) -> anyhow::Result<()> {
        let store = ProfileStore::open_default()?;
        self.print(&store)
    }

    pub fn print(&self, store: &ProfileStore) -> anyhow::Result<()> {
        let default = store.default_name()?;
        for profile in store.list()? {
            let marker = if default.as_deref() == Some(profile.name.as_str()) { "*" } else { " " };
            println!("{marker} {:<16} {:<10} {}", profile.name, profile.network_type, profile.url);
        }
        Ok(())
    }
}
