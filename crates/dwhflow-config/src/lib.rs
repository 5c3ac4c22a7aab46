pub mod error;
pub mod settings;

pub use error::*;
pub use settings::{
    AwsSettings, ClusterSettings, DbSettings, IngressSettings, PollSettings, Settings,
};

use std::path::PathBuf;

const CONFIG_FILE: &str = "dwh.cfg";

/// dwh.cfg を探す
///
/// 以下の優先順位で設定ファイルを検索:
/// 1. 環境変数 DWH_CONFIG_PATH (直接パス指定)
/// 2. カレントディレクトリ: dwh.cfg
/// 3. ./.dwhflow/ ディレクトリ内: dwh.cfg
/// 4. ~/.config/dwhflow/dwh.cfg (グローバル設定)
pub fn find_config_file() -> Result<PathBuf> {
    // 1. 環境変数で直接指定
    if let Ok(config_path) = std::env::var("DWH_CONFIG_PATH") {
        let path = PathBuf::from(config_path);
        if path.exists() {
            return Ok(path);
        }
        tracing::warn!("DWH_CONFIG_PATH points to a missing file: {}", path.display());
    }

    let current_dir = std::env::current_dir()?;

    // 2. カレントディレクトリ
    let path = current_dir.join(CONFIG_FILE);
    if path.exists() {
        return Ok(path);
    }

    // 3. ./.dwhflow/
    let path = current_dir.join(".dwhflow").join(CONFIG_FILE);
    if path.exists() {
        return Ok(path);
    }

    // 4. グローバル設定ファイル
    if let Some(config_dir) = dirs::config_dir() {
        let global_config = config_dir.join("dwhflow").join(CONFIG_FILE);
        if global_config.exists() {
            return Ok(global_config);
        }
    }

    Err(ConfigError::ConfigFileNotFound)
}

/// 明示的なパスがあればそれを、なければ探索結果を読み込む
pub fn load_settings(explicit: Option<PathBuf>) -> Result<(PathBuf, Settings)> {
    let path = match explicit {
        Some(path) => path,
        None => find_config_file()?,
    };
    let settings = Settings::load(&path)?;
    Ok((path, settings))
}
