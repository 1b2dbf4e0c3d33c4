//! ロギング初期化ユーティリティ

use tracing_subscriber::EnvFilter;

/// トレーシングサブスクライバーを初期化
///
/// ログレベルは `VARHUB_LOG_LEVEL`（未設定時は `RUST_LOG`、いずれも無ければ
/// `info`）で制御する。
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_env("VARHUB_LOG_LEVEL")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).try_init()?;

    Ok(())
}
