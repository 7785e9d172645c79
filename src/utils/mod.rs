pub mod path_validator;
pub mod ssh_config;

pub use path_validator::{validate_hostname, validate_login_user};
pub use ssh_config::{HostConfig, SshConfigParser};
