//! Transaction commands: resolve, construct, sign, announce.

use super::{announce_and_report, CommonArgs};
use crate::{
    profile::{Profile, ProfileStore},
    resolvers::{
        AddressResolver, MaxFeeResolver, MosaicResolver, PasswordResolver, Prompt, Resolve,
        RestrictionKeyResolver, RestrictionValueResolver,
    },
};
use anyhow::Context;
use std::str::FromStr;
use symbol_core::types::{Deadline, SignedTransaction};
use symbol_providers::{Http, Provider, RestClient, RestrictionService};
use symbol_signers::{sign_transactions, TransactionSignatureOptions};
use tracing::debug;

#[derive(clap::Subcommand, Debug)]
pub enum TransactionCmd {
    /// Set a mosaic address restriction on a target account
    MosaicAddressRestriction(MosaicAddressRestriction),
}

impl TransactionCmd {
    pub async fn execute(self) -> anyhow::Result<()> {
        match self {
            TransactionCmd::MosaicAddressRestriction(cmd) => cmd.execute().await,
        }
    }
}

/// Updates the value a mosaic's address restriction holds for one account.
#[derive(clap::Args, Debug, Default)]
pub struct MosaicAddressRestriction {
    /// Mosaic the restriction applies to, a hex id or @alias
    #[arg(short = 'm', long)]
    pub mosaic_id: Option<String>,
    /// Account the restriction targets, an address or @alias
    #[arg(short = 'a', long)]
    pub target_address: Option<String>,
    /// Restriction key, a decimal number
    #[arg(short = 'k', long)]
    pub restriction_key: Option<String>,
    /// Value the key is set to for the target
    #[arg(short = 'V', long)]
    pub new_restriction_value: Option<String>,
    #[command(flatten)]
    pub common: CommonArgs,
}

impl MosaicAddressRestriction {
    async fn execute(self) -> anyhow::Result<()> {
        let store = ProfileStore::open_default()?;
        let profile = store.load(self.common.profile.as_deref())?;
        let provider = Provider::new(
            Http::from_str(&profile.url)
                .with_context(|| format!("profile {} has an invalid url", profile.name))?,
        );
        let prompt = self.common.prompt();

        let signed = self.sign(&profile, &provider, prompt.as_ref()).await?;
        announce_and_report(&provider, &signed).await
    }

    /// Resolves every option, constructs the restriction update and signs it
    /// according to the account's multisig settings.
    ///
    /// Resolution completes before any signing starts, so aborting at a
    /// prompt aborts the command with nothing announced.
    pub async fn sign<C: RestClient>(
        &self,
        profile: &Profile,
        provider: &Provider<C>,
        prompt: &dyn Prompt,
    ) -> anyhow::Result<Vec<SignedTransaction>> {
        let password =
            PasswordResolver::new(self.common.password.as_deref()).resolve(prompt).await?;
        let account = profile.decrypt(&password)?;

        let mosaic_id =
            MosaicResolver::new(self.mosaic_id.as_deref(), provider).resolve(prompt).await?;
        let target =
            AddressResolver::new(self.target_address.as_deref(), provider).resolve(prompt).await?;
        let restriction_key =
            RestrictionKeyResolver::new(self.restriction_key.as_deref()).resolve(prompt).await?;
        let new_value = RestrictionValueResolver::new(self.new_restriction_value.as_deref())
            .resolve(prompt)
            .await?;
        let max_fee = MaxFeeResolver::new(self.common.max_fee.as_deref(), profile.default_max_fee)
            .resolve(prompt)
            .await?;
        debug!(%mosaic_id, %target, restriction_key, new_value, "options resolved");

        let transaction = RestrictionService::new(provider)
            .create_transaction(
                profile.network_type,
                Deadline::create(profile.epoch_adjustment),
                max_fee,
                mosaic_id,
                restriction_key,
                target,
                new_value,
            )
            .await?;

        // captured once; the envelope decision must not depend on state that
        // can shift between here and signing
        let multisig_info = provider.multisig_info(&account.address()).await?;

        Ok(sign_transactions(TransactionSignatureOptions {
            account,
            transactions: vec![transaction],
            max_fee,
            signer_multisig_info: multisig_info,
            generation_hash: profile.generation_hash,
            epoch_adjustment: profile.epoch_adjustment,
            currency_mosaic_id: profile.currency_mosaic_id,
        })?)
    }
}
