use std::fmt;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chacha20poly1305::aead::{Aead, KeyInit, Payload};
use chacha20poly1305::{XChaCha20Poly1305, XNonce};
use hkdf::Hkdf;
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::error::{Error, Result};
use crate::providers::ProviderId;

const KEY_VERSION: u32 = 1;
const ALGORITHM: &str = "xchacha20poly1305";
const HKDF_SALT: &[u8] = b"autosocial-api-keys-v1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SealedSecret {
    pub alg: String,
    pub key_version: u32,
    pub nonce: String,
    pub ciphertext: String,
}

/// Root key that API keys are sealed under. Supplied by the embedding shell,
/// typically from the OS keychain.
#[derive(Clone)]
pub struct MasterKey([u8; 32]);

impl MasterKey {
    pub fn generate() -> Self {
        let mut key = [0u8; 32];
        OsRng.fill_bytes(&mut key);
        Self(key)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let key: [u8; 32] = bytes
            .try_into()
            .map_err(|_| Error::Crypto("master key length invalid".to_string()))?;
        Ok(Self(key))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MasterKey(..)")
    }
}

fn derive_key(master_key: &MasterKey, provider: &ProviderId) -> Result<[u8; 32]> {
    let hkdf = Hkdf::<Sha256>::new(Some(HKDF_SALT), master_key.as_bytes());
    let mut derived = [0u8; 32];
    hkdf.expand(provider.as_str().as_bytes(), &mut derived)
        .map_err(|_| Error::Crypto("key derivation failed".to_string()))?;
    Ok(derived)
}

pub fn seal_api_key(
    master_key: &MasterKey,
    provider: &ProviderId,
    api_key: &str,
) -> Result<SealedSecret> {
    let key = derive_key(master_key, provider)?;
    let cipher = XChaCha20Poly1305::new_from_slice(&key)
        .map_err(|_| Error::Crypto("invalid encryption key".to_string()))?;

    let mut nonce_bytes = [0u8; 24];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = XNonce::from_slice(&nonce_bytes);
    let ciphertext = cipher
        .encrypt(
            nonce,
            Payload {
                msg: api_key.as_bytes(),
                aad: provider.as_str().as_bytes(),
            },
        )
        .map_err(|_| Error::Crypto("encryption failed".to_string()))?;

    Ok(SealedSecret {
        alg: ALGORITHM.to_string(),
        key_version: KEY_VERSION,
        nonce: URL_SAFE_NO_PAD.encode(nonce_bytes),
        ciphertext: URL_SAFE_NO_PAD.encode(ciphertext),
    })
}

pub fn open_api_key(
    master_key: &MasterKey,
    provider: &ProviderId,
    sealed: &SealedSecret,
) -> Result<String> {
    if sealed.alg != ALGORITHM {
        return Err(Error::Crypto(format!("unsupported algorithm: {}", sealed.alg)));
    }
    if sealed.key_version != KEY_VERSION {
        return Err(Error::Crypto(format!(
            "unsupported key version: {}",
            sealed.key_version
        )));
    }

    let nonce_bytes = URL_SAFE_NO_PAD
        .decode(&sealed.nonce)
        .map_err(|err| Error::Crypto(format!("invalid nonce: {err}")))?;
    let ciphertext = URL_SAFE_NO_PAD
        .decode(&sealed.ciphertext)
        .map_err(|err| Error::Crypto(format!("invalid ciphertext: {err}")))?;
    if nonce_bytes.len() != 24 {
        return Err(Error::Crypto("invalid nonce length".to_string()));
    }

    let key = derive_key(master_key, provider)?;
    let cipher = XChaCha20Poly1305::new_from_slice(&key)
        .map_err(|_| Error::Crypto("invalid decryption key".to_string()))?;
    let plaintext = cipher
        .decrypt(
            XNonce::from_slice(&nonce_bytes),
            Payload {
                msg: &ciphertext,
                aad: provider.as_str().as_bytes(),
            },
        )
        .map_err(|_| Error::Crypto("decryption failed".to_string()))?;

    String::from_utf8(plaintext).map_err(|_| Error::Crypto("api key is not utf-8".to_string()))
}
