//! 取られた駒の配置（PresentationLayout）
//!
//! 1行ぶんの駒を左から等間隔に並べる純粋関数と、2行（上: White が取った駒、
//! 下: Black が取った駒）をまとめた論理サイズの計算。デバイス座標への変換は行わない。

use serde::{Deserialize, Serialize};

use crate::reconcile::CapturedPieces;
use crate::types::Piece;

/// 論理座標
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Point {
        Point { x, y }
    }
}

/// 論理サイズ
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// 駒1つの配置
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Placement {
    pub piece: Piece,
    pub position: Point,
}

/// 1行を並べる
///
/// 入力順を保ち、1対1で配置を返す。`i` 番目の x は `origin.x + i * (cell_size + cell_spacing)`。
pub fn layout_row(pieces: &[Piece], origin: Point, cell_size: f64, cell_spacing: f64) -> Vec<Placement> {
    let step = cell_size + cell_spacing;
    pieces
        .iter()
        .enumerate()
        .map(|(i, &piece)| Placement {
            piece,
            position: Point::new(origin.x + i as f64 * step, origin.y),
        })
        .collect()
}

/// サムネイル列の寸法
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotGeometry {
    /// 駒1つの一辺
    pub cell_size: f64,
    /// 横に隣り合う駒の間隔
    pub cell_spacing: f64,
    /// 上下の行の間隔
    pub row_spacing: f64,
    pub origin_x: f64,
    pub origin_y: f64,
}

impl Default for SlotGeometry {
    fn default() -> Self {
        SlotGeometry { cell_size: 24.0, cell_spacing: 4.0, row_spacing: 15.0, origin_x: 0.0, origin_y: 0.0 }
    }
}

impl SlotGeometry {
    pub fn origin(&self) -> Point {
        Point::new(self.origin_x, self.origin_y)
    }

    /// 下の行の y オフセット
    pub fn row_offset(&self) -> f64 {
        self.cell_size + self.row_spacing
    }

    /// 全体の論理サイズ。駒がなくても幅は1マス分、高さは常に2行分。
    pub fn bounding_size(&self, columns: usize) -> Size {
        let width = if columns > 0 {
            columns as f64 * (self.cell_size + self.cell_spacing) - self.cell_spacing
        } else {
            self.cell_size
        };
        Size { width, height: self.cell_size * 2.0 + self.row_spacing }
    }
}

/// 2行分の配置結果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapturedLayout {
    /// White が取った駒（上の行）
    pub top: Vec<Placement>,
    /// Black が取った駒（下の行）
    pub bottom: Vec<Placement>,
    pub bounds: Size,
}

impl CapturedLayout {
    /// 上の行、下の行の順に全配置を返す
    pub fn placements(&self) -> impl Iterator<Item = &Placement> {
        self.top.iter().chain(self.bottom.iter())
    }
}

/// 集計結果を2行に並べる
pub fn layout_captured(captured: &CapturedPieces, geometry: &SlotGeometry) -> CapturedLayout {
    let origin = geometry.origin();
    let bottom_origin = Point::new(origin.x, origin.y + geometry.row_offset());
    CapturedLayout {
        top: layout_row(&captured.white, origin, geometry.cell_size, geometry.cell_spacing),
        bottom: layout_row(&captured.black, bottom_origin, geometry.cell_size, geometry.cell_spacing),
        bounds: geometry.bounding_size(captured.columns()),
    }
}
