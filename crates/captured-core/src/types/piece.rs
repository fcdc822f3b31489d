//! 駒（Piece）

use serde::{Deserialize, Serialize};

use super::{PieceType, Side};

/// 駒（先後の区別あり）
///
/// 値型で、等価性は (side, piece_type) のみで決まる。個々の駒の同一性は持たない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub side: Side,
    pub piece_type: PieceType,
}

impl Piece {
    /// 駒なし
    pub const NONE: Piece = Piece { side: Side::White, piece_type: PieceType::NONE };

    /// SideとPieceTypeから生成
    #[inline]
    pub const fn new(side: Side, piece_type: PieceType) -> Piece {
        Piece { side, piece_type }
    }

    /// 手番を取得
    #[inline]
    pub const fn side(self) -> Side {
        self.side
    }

    /// 駒種を取得
    #[inline]
    pub const fn piece_type(self) -> PieceType {
        self.piece_type
    }

    /// 有効な駒か（駒なしでないか）
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.piece_type.is_valid()
    }
}

impl Default for Piece {
    fn default() -> Self {
        Piece::NONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::chess;

    #[test]
    fn test_piece_new() {
        let pc = Piece::new(Side::Black, chess::QUEEN);
        assert_eq!(pc.side(), Side::Black);
        assert_eq!(pc.piece_type(), chess::QUEEN);
        assert!(pc.is_valid());
    }

    #[test]
    fn test_piece_none() {
        assert!(!Piece::NONE.is_valid());
        assert_eq!(Piece::default(), Piece::NONE);
    }

    #[test]
    fn test_piece_equality_by_side_and_type() {
        assert_eq!(Piece::new(Side::White, chess::PAWN), Piece::new(Side::White, chess::PAWN));
        assert_ne!(Piece::new(Side::White, chess::PAWN), Piece::new(Side::Black, chess::PAWN));
    }
}
