//! エラー型
//!
//! 取られた駒の集計と配置は失敗しない。失敗しうるのは入力の解析（局面文字列・指し手・設定）だけ。

use std::path::PathBuf;

use thiserror::Error;

pub use crate::board::{EditError, PositionError};

/// 設定読み込みのエラー
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid layout: {0}")]
    InvalidGeometry(String),
}

/// クレート全体のエラー
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Position(#[from] PositionError),

    #[error(transparent)]
    Edit(#[from] EditError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Unknown variant '{0}'")]
    UnknownVariant(String),
}

pub type Result<T> = std::result::Result<T, Error>;
