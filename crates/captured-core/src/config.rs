//! 表示設定（TOML）
//!
//! ```toml
//! [layout]
//! cell_size = 24.0
//! cell_spacing = 4.0
//! row_spacing = 15.0
//!
//! [theme]
//! current = "Green"
//!
//! [themes.Night]
//! light_square = "#808080"
//! dark_square = "#404040"
//! arrow = "#f7c14c"
//! ```
//!
//! すべての項目に既定値があり、空ファイルも有効な設定になる。

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::layout::SlotGeometry;
use crate::theme::{DEFAULT_THEME, Theme, ThemeRegistry};

/// 使用するテーマの選択
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeSelection {
    pub current: String,
}

impl Default for ThemeSelection {
    fn default() -> Self {
        ThemeSelection { current: DEFAULT_THEME.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewConfig {
    pub layout: SlotGeometry,
    pub theme: ThemeSelection,
    /// 組み込みテーマに追加・上書きするテーマ
    pub themes: BTreeMap<String, Theme>,
}

impl ViewConfig {
    /// ファイルから読み込む
    pub fn load<P: AsRef<Path>>(path: P) -> Result<ViewConfig, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        let config = ViewConfig::from_toml_str(&text)?;
        log::debug!("loaded view config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> Result<ViewConfig, ConfigError> {
        let config: ViewConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let l = &self.layout;
        if !(l.cell_size.is_finite() && l.cell_size > 0.0) {
            return Err(ConfigError::InvalidGeometry(format!("cell_size must be > 0, got {}", l.cell_size)));
        }
        for (name, value) in [("cell_spacing", l.cell_spacing), ("row_spacing", l.row_spacing)] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::InvalidGeometry(format!("{name} must be >= 0, got {value}")));
            }
        }
        if !(l.origin_x.is_finite() && l.origin_y.is_finite()) {
            return Err(ConfigError::InvalidGeometry("origin must be finite".to_string()));
        }
        Ok(())
    }

    /// 組み込みテーマ + 設定のテーマ
    pub fn theme_registry(&self) -> ThemeRegistry {
        let mut registry = ThemeRegistry::default();
        for (name, theme) in &self.themes {
            registry.register(name.clone(), *theme);
        }
        registry
    }

    pub fn current_theme(&self) -> Theme {
        self.theme_registry().resolve(&self.theme.current)
    }
}
