use secrecy::ExposeSecret;
use sha2::{Digest, Sha256};

use crate::{
    config::Config,
    errors::{AppError, AppResult},
};

pub fn hash_passcode(passcode: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(passcode.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Holds only the digest of the shared passcode.
#[derive(Clone)]
pub struct PasscodeVerifier {
    digest: String,
}

impl PasscodeVerifier {
    pub fn new(passcode: &str) -> Self {
        Self {
            digest: hash_passcode(passcode),
        }
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        config
            .app_passcode
            .as_ref()
            .map(|secret| Self::new(secret.expose_secret()))
            .ok_or_else(|| AppError::ConfigurationError("APP_PASSCODE is not set".to_string()))
    }

    pub fn verify(&self, candidate: &str) -> bool {
        let candidate = hash_passcode(candidate);
        // Same length by construction; fold over every byte instead of returning early.
        candidate
            .bytes()
            .zip(self.digest.bytes())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }
}
