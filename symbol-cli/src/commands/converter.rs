use super::prompt_for;
use crate::resolvers::{NetworkResolver, PrivateKeyResolver, Prompt, Resolve};
use symbol_signers::Account;

#[derive(clap::Subcommand, Debug)]
pub enum ConverterCmd {
    /// Derive the public key and address of a private key
    PrivateKeyToPublicKey(PrivateKeyToPublicKey),
}

impl ConverterCmd {
    pub async fn execute(self) -> anyhow::Result<()> {
        match self {
            ConverterCmd::PrivateKeyToPublicKey(cmd) => cmd.execute().await,
        }
    }
}

/// Derives the public half of a key pair, entirely offline.
#[derive(clap::Args, Debug, Default)]
pub struct PrivateKeyToPublicKey {
    /// The private key as 64 hex characters
    #[arg(short = 'p', long)]
    pub private_key: Option<String>,
    /// The network the derived address is for
    #[arg(short = 'n', long)]
    pub network: Option<String>,
    /// Fail instead of prompting for missing options
    #[arg(long)]
    pub batch: bool,
}

impl PrivateKeyToPublicKey {
    async fn execute(self) -> anyhow::Result<()> {
        let prompt = prompt_for(self.batch);
        let account = self.derive(prompt.as_ref()).await?;
        println!("Public key: {}", account.public_key());
        println!("Address:    {}", account.address().pretty());
        Ok(())
    }

    /// Resolves the key and network and derives the account.
    pub async fn derive(&self, prompt: &dyn Prompt) -> anyhow::Result<Account> {
        let private_key =
            PrivateKeyResolver::new(self.private_key.as_deref()).resolve(prompt).await?;
        let network = NetworkResolver::new(self.network.as_deref(), None).resolve(prompt).await?;
        Ok(Account::from_private_key(&private_key, network)?)
    }
}
