//! Stored account identities and the on-disk profile store.

use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};
use symbol_core::types::{GenerationHash, MosaicId, NetworkType};
use symbol_signers::{Account, AccountError, EncryptedPrivateKey};
use thiserror::Error;

/// An error involving the profile store.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// The requested profile is not in the store
    #[error("profile not found: {0}")]
    NotFound(String),
    /// No profile was named and the store has no default
    #[error("no default profile is set, pass --profile")]
    NoDefault,
    /// Refusing to overwrite a stored profile
    #[error("a profile named {0} already exists")]
    AlreadyExists(String),
    /// The platform exposes no home directory to keep the store under
    #[error("could not locate a home directory")]
    NoHomeDir,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
}

/// A stored account identity.
///
/// The private key is kept encrypted at rest; [`Profile::decrypt`] turns it
/// back into a signing [`Account`] for the duration of one command. The
/// network parameters captured at import time (generation hash, epoch
/// adjustment, currency mosaic) feed deadline computation and hash-lock
/// funding without further node queries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub network_type: NetworkType,
    pub encrypted_private_key: EncryptedPrivateKey,
    pub generation_hash: GenerationHash,
    pub url: String,
    pub epoch_adjustment: u64,
    pub currency_mosaic_id: MosaicId,
    /// Max fee applied when a command does not pass `--max-fee`
    #[serde(default)]
    pub default_max_fee: Option<u64>,
}

impl Profile {
    /// Decrypts the stored private key into a signing account.
    ///
    /// A wrong password fails the keystore's authentication tag check; it can
    /// never produce a wrong-but-usable account.
    pub fn decrypt(&self, password: &str) -> Result<Account, AccountError> {
        Account::from_encrypted(&self.encrypted_private_key, password, self.network_type)
    }
}

/// The JSON profile store, `~/.symbol/profiles.json` by default.
///
/// Layout: `{ "default": "<name>", "profiles": { "<name>": { .. } } }`. A
/// missing file reads as an empty store.
#[derive(Clone, Debug)]
pub struct ProfileStore {
    path: PathBuf,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    #[serde(default)]
    default: Option<String>,
    #[serde(default)]
    profiles: BTreeMap<String, Profile>,
}

impl ProfileStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Opens the store at its standard location under the home directory.
    pub fn open_default() -> Result<Self, ProfileError> {
        let home = home::home_dir().ok_or(ProfileError::NoHomeDir)?;
        Ok(Self::open(home.join(".symbol").join("profiles.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads `name`, or the default profile when no name is given.
    pub fn load(&self, name: Option<&str>) -> Result<Profile, ProfileError> {
        let mut file = self.read()?;
        let name = match name {
            Some(name) => name.to_string(),
            None => file.default.clone().ok_or(ProfileError::NoDefault)?,
        };
        file.profiles.remove(&name).ok_or(ProfileError::NotFound(name))
    }

    /// Adds a new profile.
    ///
    /// The first stored profile becomes the default; `set_default` promotes
    /// this one explicitly. Overwriting an existing name is refused.
    pub fn save(&self, profile: &Profile, set_default: bool) -> Result<(), ProfileError> {
        let mut file = self.read()?;
        if file.profiles.contains_key(&profile.name) {
            return Err(ProfileError::AlreadyExists(profile.name.clone()))
        }
        if set_default || file.default.is_none() {
            file.default = Some(profile.name.clone());
        }
        file.profiles.insert(profile.name.clone(), profile.clone());
        self.write(&file)
    }

    /// All stored profiles, in name order.
    pub fn list(&self) -> Result<Vec<Profile>, ProfileError> {
        Ok(self.read()?.profiles.into_values().collect())
    }

    /// Name of the default profile, if one is set.
    pub fn default_name(&self) -> Result<Option<String>, ProfileError> {
        Ok(self.read()?.default)
    }

    fn read(&self) -> Result<StoreFile, ProfileError> {
        match fs::read(&self.path) {
            Ok(raw) => Ok(serde_json::from_slice(&raw)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(StoreFile::default()),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&self, file: &StoreFile) -> Result<(), ProfileError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(fs::write(&self.path, serde_json::to_vec_pretty(file)?)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use symbol_core::types::Address;
    use symbol_signers::KeystoreError;
    use tempfile::TempDir;

    const PASSWORD: &str = "correct horse battery staple";

    fn store(dir: &TempDir) -> ProfileStore {
        ProfileStore::open(dir.path().join("profiles.json"))
    }

    fn profile(name: &str) -> Profile {
        let account = Account::from_private_key(
            "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60",
            NetworkType::TestNet,
        )
        .unwrap();
        Profile {
            name: name.to_string(),
            network_type: NetworkType::TestNet,
            encrypted_private_key: account.encrypt(PASSWORD).unwrap(),
            generation_hash: "3A985DA74FE225B2045C172D6BD390BD855F086E3E9D525B46BFE24511431532"
                .parse()
                .unwrap(),
            url: "http://localhost:3000".to_string(),
            epoch_adjustment: 1_616_694_977,
            currency_mosaic_id: MosaicId::new(0x6BED913FA20223F8),
            default_max_fee: Some(2_000_000),
        }
    }

    #[test]
    fn stores_without_a_fee_default_still_load() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.save(&profile("main"), false).unwrap();

        // drop the field from the persisted form, as older stores have it
        let raw = std::fs::read_to_string(store.path()).unwrap();
        let mut value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        value["profiles"]["main"].as_object_mut().unwrap().remove("default_max_fee");
        std::fs::write(store.path(), serde_json::to_vec(&value).unwrap()).unwrap();

        assert_eq!(store.load(Some("main")).unwrap().default_max_fee, None);
    }

    #[test]
    fn first_profile_becomes_the_default() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        let saved = profile("main");
        store.save(&saved, false).unwrap();
        assert_eq!(store.load(Some("main")).unwrap(), saved);
        assert_eq!(store.load(None).unwrap(), saved);
        assert_eq!(store.default_name().unwrap().as_deref(), Some("main"));
    }

    #[test]
    fn empty_store_distinguishes_missing_from_no_default() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        assert!(matches!(store.load(None), Err(ProfileError::NoDefault)));
        assert!(matches!(store.load(Some("main")), Err(ProfileError::NotFound(name)) if name == "main"));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn duplicate_names_are_refused() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        store.save(&profile("main"), false).unwrap();
        assert!(matches!(
            store.save(&profile("main"), false),
            Err(ProfileError::AlreadyExists(name)) if name == "main"
        ));
    }

    #[test]
    fn save_can_promote_the_default() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        store.save(&profile("first"), false).unwrap();
        store.save(&profile("second"), true).unwrap();
        assert_eq!(store.load(None).unwrap().name, "second");
        let names: Vec<_> = store.list().unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, ["first", "second"]);
    }

    #[test]
    fn decryption_round_trips_through_the_store() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.save(&profile("main"), false).unwrap();

        let loaded = store.load(None).unwrap();
        let account = loaded.decrypt(PASSWORD).unwrap();
        assert_eq!(account.network_type(), loaded.network_type);
        assert_eq!(
            account.address(),
            Address::from_public_key(&account.public_key(), loaded.network_type)
        );
    }

    #[test]
    fn wrong_password_never_yields_an_account() {
        let profile = profile("main");
        let err = profile.decrypt("not the password").unwrap_err();
        assert!(matches!(
            err,
            AccountError::KeystoreError(KeystoreError::Decryption)
        ));
    }
}
