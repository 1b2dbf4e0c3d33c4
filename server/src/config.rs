//! Configuration management via environment variables
//!
//! Provides helper functions for reading environment variables with fallback
//! to unprefixed legacy names with warning logs.

/// Get an environment variable with fallback to a legacy name
///
/// If the new variable name is set, returns its value.
/// If only the old (legacy) variable name is set, returns its value
/// and logs a deprecation warning.
///
/// # Arguments
/// * `new_name` - The new environment variable name (preferred)
/// * `old_name` - The legacy environment variable name (fallback)
///
/// # Returns
/// * `Some(value)` - The environment variable value
/// * `None` - Neither variable is set
pub fn get_env_with_fallback(new_name: &str, old_name: &str) -> Option<String> {
    if let Ok(val) = std::env::var(new_name) {
        return Some(val);
    }
    if let Ok(val) = std::env::var(old_name) {
        tracing::warn!(
            "Environment variable '{}' is deprecated, use '{}' instead",
            old_name,
            new_name
        );
        return Some(val);
    }
    None
}

/// Get an environment variable with fallback and default value
///
/// Similar to `get_env_with_fallback`, but returns a default value
/// if neither variable is set.
pub fn get_env_with_fallback_or(new_name: &str, old_name: &str, default: &str) -> String {
    get_env_with_fallback(new_name, old_name).unwrap_or_else(|| default.to_string())
}

/// Get an environment variable with fallback, parsing to a specific type
///
/// Returns the default value if neither variable is set or parsing fails.
pub fn get_env_with_fallback_parse<T: std::str::FromStr>(
    new_name: &str,
    old_name: &str,
    default: T,
) -> T {
    get_env_with_fallback(new_name, old_name)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// データベースURLを取得
///
/// 環境変数 `VARHUB_DATABASE_URL`（旧: `DATABASE_URL`）から取得し、
/// 未設定の場合はホームディレクトリ配下の `~/.varhub/varhub.db` を使用する。
pub fn get_database_url() -> String {
    get_env_with_fallback("VARHUB_DATABASE_URL", "DATABASE_URL").unwrap_or_else(|| {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .expect("Failed to get home directory");
        format!("sqlite:{}/.varhub/varhub.db", home)
    })
}

/// 管理者キーを取得
///
/// 環境変数 `VARHUB_ADMIN_KEY`（旧: `ADMIN_KEY`）から取得する。
/// 未設定の場合、クリーンアップAPIは常に401を返す。
pub fn get_admin_key() -> Option<String> {
    get_env_with_fallback("VARHUB_ADMIN_KEY", "ADMIN_KEY")
}
