use crate::models::{SshyError, SshResult};
use crate::utils::{validate_hostname, validate_login_user};
use std::fmt;
use std::str::FromStr;

/// Remote login target entered as `user@hostname`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostTarget {
    pub user: String,
    pub hostname: String,
}

impl HostTarget {
    /// Alias written on the `Host` line
    pub fn alias(&self) -> &str {
        &self.hostname
    }
}

impl FromStr for HostTarget {
    type Err = SshyError;

    fn from_str(input: &str) -> SshResult<Self> {
        let trimmed = input.trim();
        let invalid = |reason: &str| SshyError::InvalidHostTarget {
            input: trimmed.to_string(),
            reason: reason.to_string(),
        };

        let (user, hostname) = trimmed
            .split_once('@')
            .ok_or_else(|| invalid("expected the format user@hostname"))?;

        validate_login_user(user).map_err(|e| invalid(&reason_of(e)))?;
        validate_hostname(hostname).map_err(|e| invalid(&reason_of(e)))?;

        Ok(Self {
            user: user.to_string(),
            hostname: hostname.to_string(),
        })
    }
}

fn reason_of(error: SshyError) -> String {
    match error {
        SshyError::InvalidPath { message } => message,
        other => other.to_string(),
    }
}

impl fmt::Display for HostTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.user, self.hostname)
    }
}
