use crate::models::{SshyError, SshResult};

/// 驗證主機名，防止寫入設定檔時注入額外指令
pub fn validate_hostname(hostname: &str) -> SshResult<()> {
    // 檢查空值
    if hostname.is_empty() {
        return Err(SshyError::InvalidPath {
            message: "Hostname cannot be empty".to_string(),
        });
    }

    // 檢查長度
    if hostname.len() > 255 {
        return Err(SshyError::InvalidPath {
            message: "Hostname too long".to_string(),
        });
    }

    // 只允許安全字符：字母、數字、點、連字符、下劃線、冒號（IPv6）、方括號（IPv6）
    let is_valid = hostname.chars().all(|c| {
        c.is_ascii_alphanumeric()
            || c == '.'
            || c == '-'
            || c == '_'
            || c == ':'
            || c == '['
            || c == ']'
    });

    if !is_valid {
        return Err(SshyError::InvalidPath {
            message: format!("Hostname contains invalid characters: {}", hostname),
        });
    }

    Ok(())
}

/// 驗證登入使用者名稱
pub fn validate_login_user(user: &str) -> SshResult<()> {
    if user.is_empty() {
        return Err(SshyError::InvalidPath {
            message: "User cannot be empty".to_string(),
        });
    }

    if user.len() > 255 {
        return Err(SshyError::InvalidPath {
            message: "User too long".to_string(),
        });
    }

    // 空白與控制字元會破壞 ssh config 的欄位
    if user.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(SshyError::InvalidPath {
            message: format!("User contains whitespace or control characters: {:?}", user),
        });
    }

    Ok(())
}
