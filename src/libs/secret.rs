//! Encrypted storage for credentials such as the Jira API token.
//!
//! Values are AES-256-CBC encrypted with a key embedded at build time and
//! written base64-encoded to a file in the data directory.

use super::data_storage::DataStorage;
use aes::Aes256;
use anyhow::{anyhow, Result};
use base64::prelude::*;
use block_modes::block_padding::Pkcs7;
use block_modes::{BlockMode, Cbc};
use dialoguer::{theme::ColorfulTheme, Password};
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

include!(concat!(env!("OUT_DIR"), "/app_metadata.rs"));

type Aes256Cbc = Cbc<Aes256, Pkcs7>;

#[derive(Clone, Debug)]
pub struct Secret {
    prompt: String,
    secret_file_path: PathBuf,
}

impl Secret {
    pub fn new(secret_name: &str, prompt: &str) -> Self {
        let secret_file_path = DataStorage::new().get_path(secret_name).unwrap_or_else(|_| PathBuf::from(secret_name));
        Self::at(&secret_file_path, prompt)
    }

    pub fn at(path: &Path, prompt: &str) -> Self {
        Self {
            prompt: prompt.to_owned(),
            secret_file_path: path.to_path_buf(),
        }
    }

    /// Stored value if it can be decrypted, otherwise asks the user.
    pub fn get_or_prompt(&self) -> Result<String> {
        if self.secret_file_path.exists() {
            if let Ok(value) = self.read() {
                return Ok(value);
            }
        }
        self.prompt()
    }

    pub fn prompt(&self) -> Result<String> {
        let value = Password::with_theme(&ColorfulTheme::default())
            .with_prompt(&self.prompt)
            .allow_empty_password(false)
            .interact()?;
        self.write(&value)?;
        Ok(value)
    }

    pub fn write(&self, value: &str) -> Result<()> {
        let cipher = Aes256Cbc::new_from_slices(APP_METADATA_ENCRYPTION_KEY, APP_METADATA_ENCRYPTION_IV)?;
        let encoded = BASE64_STANDARD.encode(cipher.encrypt_vec(value.as_bytes()));

        if let Some(parent) = self.secret_file_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = File::create(&self.secret_file_path)?;
        file.write_all(encoded.as_bytes())?;
        Ok(())
    }

    pub fn read(&self) -> Result<String> {
        let mut file = File::open(&self.secret_file_path)?;
        let mut encoded = String::new();
        file.read_to_string(&mut encoded)?;
        let ciphertext = BASE64_STANDARD.decode(encoded.trim())?;
        let cipher = Aes256Cbc::new_from_slices(APP_METADATA_ENCRYPTION_KEY, APP_METADATA_ENCRYPTION_IV)?;
        let decrypted = cipher.decrypt_vec(&ciphertext).map_err(|e| anyhow!("Cannot decrypt {}: {}", self.secret_file_path.display(), e))?;
        Ok(String::from_utf8(decrypted)?)
    }
}
