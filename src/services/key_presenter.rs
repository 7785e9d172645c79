use crate::models::{KeyType, PublicKeyInfo, SetupConfig, SshyError, SshResult};
use ssh_key::PublicKey;
use std::path::PathBuf;
use tokio::fs;

/// Reads back the generated public key for display
pub struct KeyPresenter {
    public_key_path: PathBuf,
}

impl KeyPresenter {
    pub fn new(config: &SetupConfig) -> Self {
        Self {
            public_key_path: config.public_key_path(),
        }
    }

    pub async fn present(&self) -> SshResult<PublicKeyInfo> {
        if !self.public_key_path.exists() {
            return Err(SshyError::KeyNotFound {
                path: self.public_key_path.display().to_string(),
            });
        }

        let content = fs::read_to_string(&self.public_key_path)
            .await
            .map_err(|e| SshyError::io("read", &self.public_key_path, e))?;
        let content = content.trim().to_string();

        let mut info = PublicKeyInfo {
            path: self.public_key_path.clone(),
            content,
            key_type: KeyType::Unknown,
            fingerprint: None,
            bit_size: None,
            comment: None,
        };

        // 無法解析時仍然顯示原始內容
        match PublicKey::from_openssh(&info.content) {
            Ok(pub_key) => {
                info.key_type = KeyType::from(pub_key.algorithm().as_str());
                info.fingerprint = Some(pub_key.fingerprint(ssh_key::HashAlg::Sha256).to_string());
                info.bit_size = key_bit_size(&pub_key);
                let comment = pub_key.comment();
                if !comment.is_empty() {
                    info.comment = Some(comment.to_string());
                }
            }
            Err(e) => {
                log::warn!(
                    "[presenter] Could not parse {}: {}",
                    self.public_key_path.display(),
                    e
                );
            }
        }

        Ok(info)
    }
}

/// Bit size of the key's modulus or curve
fn key_bit_size(pub_key: &PublicKey) -> Option<u32> {
    match pub_key.key_data() {
        ssh_key::public::KeyData::Rsa(rsa) => {
            // mpint 可能帶前導 0x00
            let bytes = rsa.n.as_bytes();
            let significant: Vec<u8> = bytes.iter().copied().skip_while(|b| *b == 0).collect();
            let first = *significant.first()?;
            Some((significant.len() as u32 - 1) * 8 + (8 - first.leading_zeros()))
        }
        ssh_key::public::KeyData::Ed25519(_) => Some(256),
        ssh_key::public::KeyData::Ecdsa(ecdsa) => match ecdsa.curve() {
            ssh_key::EcdsaCurve::NistP256 => Some(256),
            ssh_key::EcdsaCurve::NistP384 => Some(384),
            ssh_key::EcdsaCurve::NistP521 => Some(521),
        },
        _ => None,
    }
}
