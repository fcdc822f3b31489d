//! 駒種（PieceType）
//!
//! 駒種は「バリアントが定義する小さな序数」で、先後の区別を持たない。
//! 0 は駒なし（`PieceType::NONE`）専用で、有効な駒種は 1 以上。

use serde::{Deserialize, Serialize};

/// 駒種（先後の区別なし）
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
#[repr(transparent)]
pub struct PieceType(u8);

impl PieceType {
    /// 駒なし
    pub const NONE: PieceType = PieceType(0);

    /// 序数から生成
    #[inline]
    pub const fn new(ordinal: u8) -> PieceType {
        PieceType(ordinal)
    }

    /// 有効な駒種か（0 以外）
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl std::fmt::Display for PieceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// チェス系バリアント（standard / crazyhouse）の駒種
pub mod chess {
    use super::PieceType;

    pub const PAWN: PieceType = PieceType::new(1);
    pub const KNIGHT: PieceType = PieceType::new(2);
    pub const BISHOP: PieceType = PieceType::new(3);
    pub const ROOK: PieceType = PieceType::new(4);
    pub const QUEEN: PieceType = PieceType::new(5);
    pub const KING: PieceType = PieceType::new(6);
}

/// 将棋系バリアント（shogi / minishogi）の駒種
pub mod shogi {
    use super::PieceType;

    // 生駒
    pub const PAWN: PieceType = PieceType::new(1);
    pub const LANCE: PieceType = PieceType::new(2);
    pub const KNIGHT: PieceType = PieceType::new(3);
    pub const SILVER: PieceType = PieceType::new(4);
    pub const BISHOP: PieceType = PieceType::new(5);
    pub const ROOK: PieceType = PieceType::new(6);
    pub const GOLD: PieceType = PieceType::new(7);
    pub const KING: PieceType = PieceType::new(8);
    // 成駒
    pub const PRO_PAWN: PieceType = PieceType::new(9);
    pub const PRO_LANCE: PieceType = PieceType::new(10);
    pub const PRO_KNIGHT: PieceType = PieceType::new(11);
    pub const PRO_SILVER: PieceType = PieceType::new(12);
    pub const HORSE: PieceType = PieceType::new(13); // 成角
    pub const DRAGON: PieceType = PieceType::new(14); // 成飛
}
