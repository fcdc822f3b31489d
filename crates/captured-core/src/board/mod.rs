//! 盤面スナップショット
//!
//! - [`BoardSnapshot`]: 読み取り専用の盤面ビュー（取られた駒の集計はこれだけを見る）
//! - [`GridBoard`]: 所有型の具象盤面（升目配列 + 持ち駒表）
//! - [`Variant`]: 盤サイズ・駒記号・初期局面などの静的定義
//! - 局面文字列（FEN / SFEN）の解析と、合法性を検査しない盤面編集

mod edit;
mod grid;
mod notation;
mod square;
mod variant;

pub use edit::{BoardEdit, EditError, Promotion, parse_edit};
pub use grid::GridBoard;
pub use notation::PositionError;
pub use square::Square;
pub use variant::{Glyph, Notation, VARIANTS, Variant};

use crate::types::{Piece, PieceType, Side};

/// 読み取り専用の盤面ビュー
///
/// 持ち駒に関する問い合わせ（`reserve_piece_types` / `reserve_count`）は
/// `has_drop_reserves()` が `true` のときだけ意味を持つ。既定実装は空を返す。
pub trait BoardSnapshot {
    fn width(&self) -> usize;

    fn height(&self) -> usize;

    /// 升目の駒。盤外や空き升は `Piece::NONE`。
    fn piece_at(&self, x: usize, y: usize) -> Piece;

    /// バリアント名（開始局面の構築に使う）
    fn variant(&self) -> &str;

    fn has_drop_reserves(&self) -> bool {
        false
    }

    /// 持ち駒になりうる駒種
    fn reserve_piece_types(&self) -> &[PieceType] {
        &[]
    }

    /// `side` の駒として取られ、相手の持ち駒になっている枚数
    fn reserve_count(&self, _side: Side, _piece_type: PieceType) -> u32 {
        0
    }

    /// 描画用の記号（グリフ資源の識別子）
    fn representation(&self, piece: Piece) -> String;

    /// 升目が1つもない盤か
    fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}
