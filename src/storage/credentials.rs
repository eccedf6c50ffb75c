//! Password storage in the OS keyring
//!
//! Only the password is kept in the keyring; the username lives in the
//! profile. Session tokens are never persisted, every run logs in again.

use super::Result;

#[cfg(not(test))]
use crate::error::StorageError;
#[cfg(not(test))]
use keyring::Entry;

const KEYRING_SERVICE: &str = "appknox";

pub struct Credentials {
    pub profile_name: String,
}

impl Credentials {
    pub fn new(profile_name: impl Into<String>) -> Self {
        Self {
            profile_name: profile_name.into(),
        }
    }

    fn entry_name(&self) -> String {
        format!("password-{}", self.profile_name)
    }

    #[cfg(not(test))]
    fn entry(&self) -> Result<Entry> {
        Entry::new(KEYRING_SERVICE, &self.entry_name())
            .map_err(|e| StorageError::KeyringError(e.to_string()))
    }

    #[cfg(not(test))]
    pub fn load_password(&self) -> Result<Option<String>> {
        match self.entry()?.get_password() {
            Ok(v) => Ok(Some(v)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(StorageError::KeyringError(e.to_string())),
        }
    }

    #[cfg(not(test))]
    pub fn save_password(&self, password: &str) -> Result<()> {
        self.entry()?
            .set_password(password)
            .map_err(|e| StorageError::KeyringError(e.to_string()))
    }

    #[cfg(not(test))]
    pub fn clear_password(&self) -> Result<()> {
        match self.entry()?.delete_credential() {
            Ok(_) => Ok(()),
            // Nothing stored is fine for logout
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(StorageError::KeyringError(e.to_string())),
        }
    }

    #[cfg(test)]
    pub fn load_password(&self) -> Result<Option<String>> {
        println!(
            "MOCK: Loading {}/{}",
            KEYRING_SERVICE,
            self.entry_name()
        );
        Ok(None)
    }

    #[cfg(test)]
    pub fn save_password(&self, password: &str) -> Result<()> {
        println!(
            "MOCK: Saving {}/{} ({} chars)",
            KEYRING_SERVICE,
            self.entry_name(),
            password.len()
        );
        Ok(())
    }

    #[cfg(test)]
    pub fn clear_password(&self) -> Result<()> {
        println!(
            "MOCK: Deleting {}/{}",
            KEYRING_SERVICE,
            self.entry_name()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_name_is_per_profile() {
        assert_eq!(Credentials::new("default").entry_name(), "password-default");
        assert_eq!(Credentials::new("work").entry_name(), "password-work");
    }

    #[test]
    fn test_mock_round_trip() {
        let creds = Credentials::new("test-profile");
        assert!(creds.save_password("secret").is_ok());
        assert_eq!(creds.load_password().unwrap(), None);
        assert!(creds.clear_password().is_ok());
    }
}
