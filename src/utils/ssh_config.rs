use crate::models::{HostTarget, SshyError, SshResult};
use std::path::{Path, PathBuf};

/// SSH Host configuration
#[derive(Debug, Clone, Default)]
pub struct HostConfig {
    /// Host alias pattern
    pub host_pattern: String,
    /// Actual hostname
    pub hostname: Option<String>,
    /// Username
    pub user: Option<String>,
    /// Identity file path
    pub identity_file: Option<PathBuf>,
}

/// SSH Config reader, only as deep as sshy needs to spot an existing entry
pub struct SshConfigParser;

impl SshConfigParser {
    /// Parse SSH config file content
    pub fn parse(content: &str) -> Vec<HostConfig> {
        let mut hosts = Vec::new();
        let mut current_host: Option<HostConfig> = None;

        for line in content.lines() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            // Parse key = value or key value format
            let (key, value) = if let Some((k, v)) = line.split_once('=') {
                (k.trim().to_lowercase(), v.trim().to_string())
            } else if let Some((k, v)) = line.split_once(char::is_whitespace) {
                (k.trim().to_lowercase(), v.trim().to_string())
            } else {
                continue;
            };

            match key.as_str() {
                "host" => {
                    if let Some(host) = current_host.take() {
                        hosts.push(host);
                    }
                    current_host = Some(HostConfig {
                        host_pattern: value,
                        ..Default::default()
                    });
                }
                "hostname" => {
                    if let Some(ref mut host) = current_host {
                        host.hostname = Some(value);
                    }
                }
                "user" => {
                    if let Some(ref mut host) = current_host {
                        host.user = Some(value);
                    }
                }
                "identityfile" => {
                    if let Some(ref mut host) = current_host {
                        host.identity_file = Some(PathBuf::from(unquote(&value)));
                    }
                }
                _ => {}
            }
        }

        if let Some(host) = current_host {
            hosts.push(host);
        }

        hosts
    }

    /// Find the first non-wildcard host entry whose pattern list names `alias`
    pub fn find_host<'a>(hosts: &'a [HostConfig], alias: &str) -> Option<&'a HostConfig> {
        hosts.iter().find(|h| {
            h.host_pattern
                .split_whitespace()
                .any(|pattern| pattern != "*" && Self::match_pattern(pattern, alias))
        })
    }

    /// Match host pattern (supports * wildcard)
    fn match_pattern(pattern: &str, alias: &str) -> bool {
        if pattern == "*" {
            return true;
        }

        if pattern.contains('*') {
            let parts: Vec<&str> = pattern.split('*').collect();
            if parts.len() == 2 {
                let prefix = parts[0];
                let suffix = parts[1];
                return alias.starts_with(prefix) && alias.ends_with(suffix);
            }
        }

        pattern == alias
    }

    /// Render the block appended for a provisioned key
    pub fn render_host_block(target: &HostTarget, identity_file: &Path) -> SshResult<String> {
        Ok(format!(
            "Host {alias}\n    User {user}\n    Hostname {hostname}\n    PreferredAuthentications publickey\n    IdentityFile {identity}\n\n",
            alias = target.alias(),
            user = target.user,
            hostname = target.hostname,
            identity = quote_path(identity_file)?,
        ))
    }
}

/// Format a path as one ssh config argument, quoted when it holds whitespace
///
/// ssh config has no escape for `"` or line breaks, so such paths are refused.
pub fn quote_path(path: &Path) -> SshResult<String> {
    let unsupported = |reason: &str| SshyError::UnsupportedIdentityPath {
        path: path.display().to_string(),
        reason: reason.to_string(),
    };

    let value = path
        .to_str()
        .ok_or_else(|| unsupported("path is not valid UTF-8"))?;

    if value.contains('"') || value.contains('\n') || value.contains('\r') {
        return Err(unsupported("path contains a double quote or line break"));
    }

    if value.chars().any(char::is_whitespace) {
        Ok(format!("\"{}\"", value))
    } else {
        Ok(value.to_string())
    }
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}
