//! SVG 描画面

use std::fmt::Write;

use captured_core::layout::{Point, Size};
use captured_core::types::Side;
use captured_core::{DrawItem, DrawSurface, Theme};

/// 描画項目を SVG 文書として書き出す描画面
#[derive(Debug, Clone)]
pub struct SvgSurface {
    theme: Theme,
    origin: Point,
    items: Vec<DrawItem>,
    size: Size,
}

impl SvgSurface {
    pub fn new(theme: Theme, origin: Point) -> Self {
        SvgSurface { theme, origin, items: Vec::new(), size: Size::default() }
    }

    pub fn render(&self) -> String {
        let Size { width, height } = self.size;
        let mut out = String::new();
        // String への書き込みは失敗しない
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="{} {} {width} {height}">"#,
            self.origin.x, self.origin.y
        );
        let _ = writeln!(
            out,
            r#"  <rect x="{}" y="{}" width="{width}" height="{height}" fill="{}"/>"#,
            self.origin.x, self.origin.y, self.theme.light_square
        );
        for item in &self.items {
            let DrawItem { piece, glyph, position, size } = item;
            let (fill, text) = match piece.side() {
                Side::White => ("#ffffff", "#000000"),
                Side::Black => ("#000000", "#ffffff"),
            };
            let _ = writeln!(
                out,
                r#"  <rect x="{}" y="{}" width="{size}" height="{size}" rx="3" fill="{}" stroke="{}"/>"#,
                position.x, position.y, self.theme.dark_square, self.theme.arrow
            );
            let _ = writeln!(
                out,
                r#"  <circle cx="{}" cy="{}" r="{}" fill="{fill}"/>"#,
                position.x + size / 2.0,
                position.y + size / 2.0,
                size * 0.4
            );
            let _ = writeln!(
                out,
                r#"  <text x="{}" y="{}" font-size="{}" text-anchor="middle" dominant-baseline="central" fill="{text}">{}</text>"#,
                position.x + size / 2.0,
                position.y + size / 2.0,
                size * 0.5,
                escape(glyph)
            );
        }
        out.push_str("</svg>\n");
        out
    }
}

impl DrawSurface for SvgSurface {
    fn clear(&mut self) {
        self.items.clear();
    }

    fn add_item(&mut self, item: DrawItem) {
        self.items.push(item);
    }

    fn set_logical_size(&mut self, size: Size) {
        self.size = size;
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
