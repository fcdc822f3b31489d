//! 配色テーマ
//!
//! テーマ名 → 色3つ（明るい升・暗い升・矢印）の対応表。プロセス全体の単一インスタンスではなく、
//! 設定から組み立てて描画面の生成時に渡す。

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// `#rrggbb` 形式の色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid color '{0}': expected #rrggbb")]
pub struct ColorParseError(pub String);

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ColorParseError(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(err());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        Ok(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Rgb {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> String {
        c.to_string()
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// テーマ1つ分の色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub light_square: Rgb,
    pub dark_square: Rgb,
    pub arrow: Rgb,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            light_square: Rgb(0xff, 0xce, 0x9e),
            dark_square: Rgb(0xd1, 0x8b, 0x47),
            arrow: Rgb(0, 170, 0),
        }
    }
}

pub const DEFAULT_THEME: &str = "Default";

/// テーマ名 → テーマ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeRegistry {
    themes: BTreeMap<String, Theme>,
}

impl Default for ThemeRegistry {
    /// 組み込みテーマ（Default / Green / Blue）
    fn default() -> Self {
        let mut registry = ThemeRegistry::empty();
        registry.register(DEFAULT_THEME, Theme::default());
        registry.register(
            "Green",
            Theme {
                light_square: Rgb(236, 237, 209),
                dark_square: Rgb(116, 150, 81),
                arrow: Rgb(247, 193, 76),
            },
        );
        registry.register(
            "Blue",
            Theme {
                light_square: Rgb(237, 237, 216),
                dark_square: Rgb(76, 109, 147),
                arrow: Rgb(247, 193, 76),
            },
        );
        registry
    }
}

impl ThemeRegistry {
    pub fn empty() -> Self {
        ThemeRegistry { themes: BTreeMap::new() }
    }

    /// 登録（同名は上書き）
    pub fn register(&mut self, name: impl Into<String>, theme: Theme) {
        self.themes.insert(name.into(), theme);
    }

    pub fn get(&self, name: &str) -> Option<&Theme> {
        self.themes.get(name)
    }

    /// 登録済みのテーマ名（昇順）
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.themes.keys().map(String::as_str)
    }

    /// 名前でテーマを選ぶ。未登録の名前は既定テーマにする。
    pub fn resolve(&self, name: &str) -> Theme {
        match self.themes.get(name) {
            Some(theme) => *theme,
            None => {
                log::warn!("unknown theme '{name}', falling back to {DEFAULT_THEME}");
                Theme::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_parse_and_display() {
        let c: Rgb = "#ffce9E".parse().unwrap();
        assert_eq!(c, Rgb(0xff, 0xce, 0x9e));
        assert_eq!(c.to_string(), "#ffce9e");
        assert!("ffce9e".parse::<Rgb>().is_err());
        assert!("#ffce9".parse::<Rgb>().is_err());
        assert!("#gggggg".parse::<Rgb>().is_err());
    }

    #[test]
    fn test_builtin_themes() {
        let registry = ThemeRegistry::default();
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, vec!["Blue", "Default", "Green"]);
        assert_eq!(registry.resolve("Green").dark_square, Rgb(116, 150, 81));
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        let registry = ThemeRegistry::default();
        assert_eq!(registry.resolve("Solarized"), Theme::default());
        assert!(ThemeRegistry::empty().get(DEFAULT_THEME).is_none());
    }

    #[test]
    fn test_register_overrides() {
        let mut registry = ThemeRegistry::default();
        let custom = Theme { arrow: Rgb(1, 2, 3), ..Theme::default() };
        registry.register("Green", custom);
        assert_eq!(registry.get("Green"), Some(&custom));
    }
}
