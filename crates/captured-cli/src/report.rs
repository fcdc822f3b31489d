//! テキスト / JSON 出力

use std::fmt::Write;

use captured_core::layout::Size;
use captured_core::{CapturedPiecesView, DrawItem, SceneSurface, Variant};
use serde::Serialize;

/// 1局面分の出力
#[derive(Debug, Serialize)]
pub struct Report {
    pub variant: String,
    pub theme: String,
    /// White が取った駒の記号
    pub white: Vec<String>,
    /// Black が取った駒の記号
    pub black: Vec<String>,
    pub bounds: Size,
    pub items: Vec<DrawItem>,
}

impl Report {
    pub fn new(variant: &str, theme: &str, view: &CapturedPiecesView<SceneSurface>) -> Report {
        let items = view.surface().items().to_vec();
        // 描画項目は上の行（White）、下の行（Black）の順に並ぶ
        let split = view.captured().white.len();
        let glyphs = |items: &[DrawItem]| items.iter().map(|i| i.glyph.clone()).collect::<Vec<_>>();
        Report {
            variant: variant.to_ascii_lowercase(),
            theme: theme.to_string(),
            white: glyphs(&items[..split]),
            black: glyphs(&items[split..]),
            bounds: view.surface().logical_size(),
            items,
        }
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "variant: {}", self.variant);
        let _ = writeln!(out, "white captured ({}): {}", self.white.len(), self.white.join(" "));
        let _ = writeln!(out, "black captured ({}): {}", self.black.len(), self.black.join(" "));
        let _ = writeln!(out, "bounds: {}x{}", self.bounds.width, self.bounds.height);
        out
    }
}

/// `--list-variants` の1行
pub fn describe_variant(variant: &Variant) -> String {
    let mode = if variant.has_drops { "reserve" } else { "diff" };
    format!("{:<10} {}x{} {:?} {mode}", variant.name, variant.width, variant.height, variant.notation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use captured_core::{GameSession, SlotGeometry};

    #[test]
    fn test_report_splits_rows() {
        let session = GameSession::replay("standard", None, ["e2e4", "d7d5", "e4d5", "d8d5"]).unwrap();
        let session = Rc::new(RefCell::new(session));
        let mut view = CapturedPiecesView::new(SceneSurface::new(), SlotGeometry::default());
        view.set_game(Some(&session));

        let report = Report::new("Standard", "Default", &view);
        assert_eq!(report.variant, "standard");
        assert_eq!(report.white, vec!["p"]);
        assert_eq!(report.black, vec!["P"]);
        assert_eq!(
            report.to_text(),
            "variant: standard\nwhite captured (1): p\nblack captured (1): P\nbounds: 24x63\n"
        );
    }

    #[test]
    fn test_describe_variant() {
        let line = describe_variant(Variant::by_name("shogi").unwrap());
        assert!(line.starts_with("shogi"));
        assert!(line.contains("9x9 Sfen reserve"));
    }
}
