pub mod config;
pub mod error;
pub mod host_target;
pub mod key_info;

pub use config::SetupConfig;
pub use error::{SshResult, SshyError};
pub use host_target::HostTarget;
pub use key_info::{KeyType, PublicKeyInfo};
