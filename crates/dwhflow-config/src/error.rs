use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "設定ファイルが見つかりません。以下の場所を確認してください:\n\
        - カレントディレクトリ: dwh.cfg\n\
        - ./.dwhflow/ ディレクトリ\n\
        - ~/.config/dwhflow/dwh.cfg\n\
        または DWH_CONFIG_PATH 環境変数で直接指定できます"
    )]
    ConfigFileNotFound,

    #[error("設定の読み込みに失敗しました: {0}")]
    Load(#[from] config::ConfigError),

    #[error("設定値が不正です: {0}")]
    Invalid(String),

    #[error("IO エラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
