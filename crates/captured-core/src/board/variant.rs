//! バリアント定義
//!
//! 盤サイズ・局面文字列の形式・初期局面・駒記号表・持ち駒の有無をまとめた静的テーブル。
//! 開始局面の構築（[`crate::factory`]）と局面文字列の解析（[`super::notation`]）が参照する。

use crate::types::{Piece, PieceType, Side, chess, shogi};

/// 局面文字列の形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notation {
    /// チェス系 FEN（持ち駒は `[...]` 付記、または9段目として付記）
    Fen,
    /// 将棋系 SFEN（`+` で成駒、第3フィールドが持ち駒）
    Sfen,
}

/// 駒記号1つ分の定義
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    /// 大文字の記号（先手 = White）。後手は小文字で表す。
    pub symbol: char,
    /// `+` 付きの記号か
    pub promoted: bool,
    pub piece_type: PieceType,
}

const fn glyph(symbol: char, piece_type: PieceType) -> Glyph {
    Glyph { symbol, promoted: false, piece_type }
}

const fn promoted_glyph(symbol: char, piece_type: PieceType) -> Glyph {
    Glyph { symbol, promoted: true, piece_type }
}

/// バリアント
#[derive(Debug, PartialEq, Eq)]
pub struct Variant {
    pub name: &'static str,
    pub width: usize,
    pub height: usize,
    pub notation: Notation,
    pub start_position: &'static str,
    /// 取った駒を持ち駒として打てるか
    pub has_drops: bool,
    /// 持ち駒になる駒種（表示順）
    pub reserve_types: &'static [PieceType],
    glyphs: &'static [Glyph],
    /// (生駒, 成駒)
    promotions: &'static [(PieceType, PieceType)],
    royal: PieceType,
}

const CHESS_GLYPHS: [Glyph; 6] = [
    glyph('P', chess::PAWN),
    glyph('N', chess::KNIGHT),
    glyph('B', chess::BISHOP),
    glyph('R', chess::ROOK),
    glyph('Q', chess::QUEEN),
    glyph('K', chess::KING),
];

const CHESS_RESERVE: [PieceType; 5] =
    [chess::PAWN, chess::KNIGHT, chess::BISHOP, chess::ROOK, chess::QUEEN];

const SHOGI_GLYPHS: [Glyph; 14] = [
    glyph('P', shogi::PAWN),
    glyph('L', shogi::LANCE),
    glyph('N', shogi::KNIGHT),
    glyph('S', shogi::SILVER),
    glyph('B', shogi::BISHOP),
    glyph('R', shogi::ROOK),
    glyph('G', shogi::GOLD),
    glyph('K', shogi::KING),
    promoted_glyph('P', shogi::PRO_PAWN),
    promoted_glyph('L', shogi::PRO_LANCE),
    promoted_glyph('N', shogi::PRO_KNIGHT),
    promoted_glyph('S', shogi::PRO_SILVER),
    promoted_glyph('B', shogi::HORSE),
    promoted_glyph('R', shogi::DRAGON),
];

const SHOGI_PROMOTIONS: [(PieceType, PieceType); 6] = [
    (shogi::PAWN, shogi::PRO_PAWN),
    (shogi::LANCE, shogi::PRO_LANCE),
    (shogi::KNIGHT, shogi::PRO_KNIGHT),
    (shogi::SILVER, shogi::PRO_SILVER),
    (shogi::BISHOP, shogi::HORSE),
    (shogi::ROOK, shogi::DRAGON),
];

const SHOGI_RESERVE: [PieceType; 7] = [
    shogi::PAWN,
    shogi::LANCE,
    shogi::KNIGHT,
    shogi::SILVER,
    shogi::GOLD,
    shogi::BISHOP,
    shogi::ROOK,
];

const MINISHOGI_RESERVE: [PieceType; 5] =
    [shogi::PAWN, shogi::SILVER, shogi::GOLD, shogi::BISHOP, shogi::ROOK];

/// 組み込みバリアント一覧
pub static VARIANTS: [Variant; 4] = [
    Variant {
        name: "standard",
        width: 8,
        height: 8,
        notation: Notation::Fen,
        start_position: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        has_drops: false,
        reserve_types: &[],
        glyphs: &CHESS_GLYPHS,
        promotions: &[],
        royal: chess::KING,
    },
    Variant {
        name: "crazyhouse",
        width: 8,
        height: 8,
        notation: Notation::Fen,
        start_position: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR[] w KQkq - 0 1",
        has_drops: true,
        reserve_types: &CHESS_RESERVE,
        glyphs: &CHESS_GLYPHS,
        promotions: &[],
        royal: chess::KING,
    },
    Variant {
        name: "shogi",
        width: 9,
        height: 9,
        notation: Notation::Sfen,
        start_position: "lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 1",
        has_drops: true,
        reserve_types: &SHOGI_RESERVE,
        glyphs: &SHOGI_GLYPHS,
        promotions: &SHOGI_PROMOTIONS,
        royal: shogi::KING,
    },
    Variant {
        name: "minishogi",
        width: 5,
        height: 5,
        notation: Notation::Sfen,
        start_position: "rbsgk/4p/5/P4/KGSBR b - 1",
        has_drops: true,
        reserve_types: &MINISHOGI_RESERVE,
        glyphs: &SHOGI_GLYPHS,
        promotions: &SHOGI_PROMOTIONS,
        royal: shogi::KING,
    },
];

impl Variant {
    /// 名前からバリアントを引く（大文字小文字は区別しない）
    pub fn by_name(name: &str) -> Option<&'static Variant> {
        VARIANTS.iter().find(|v| v.name.eq_ignore_ascii_case(name.trim()))
    }

    pub fn all() -> &'static [Variant] {
        &VARIANTS
    }

    /// 駒記号から駒を得る。大文字は White、小文字は Black。
    pub fn piece_from_symbol(&self, symbol: char, promoted: bool) -> Option<Piece> {
        let side = if symbol.is_ascii_uppercase() { Side::White } else { Side::Black };
        let upper = symbol.to_ascii_uppercase();
        self.glyphs
            .iter()
            .find(|g| g.symbol == upper && g.promoted == promoted)
            .map(|g| Piece::new(side, g.piece_type))
    }

    /// 駒の表示記号（グリフ資源の識別子にも使う）
    ///
    /// 未知の駒種は `None`。
    pub fn representation(&self, piece: Piece) -> Option<String> {
        let g = self.glyphs.iter().find(|g| g.piece_type == piece.piece_type())?;
        let symbol = match piece.side() {
            Side::White => g.symbol,
            Side::Black => g.symbol.to_ascii_lowercase(),
        };
        Some(if g.promoted { format!("+{symbol}") } else { symbol.to_string() })
    }

    /// 成駒を返す（成れない場合はNone）
    pub fn promoted(&self, piece_type: PieceType) -> Option<PieceType> {
        self.promotions.iter().find(|(base, _)| *base == piece_type).map(|(_, pro)| *pro)
    }

    /// 生駒を返す（既に生駒の場合はそのまま）
    pub fn demoted(&self, piece_type: PieceType) -> PieceType {
        self.promotions
            .iter()
            .find(|(_, pro)| *pro == piece_type)
            .map_or(piece_type, |(base, _)| *base)
    }

    /// 取られた駒が持ち駒になるときの駒種
    ///
    /// 成駒は生駒に戻る。玉と、持ち駒にならない駒種は `None`。
    pub fn reserve_type(&self, piece_type: PieceType) -> Option<PieceType> {
        if !self.has_drops || piece_type == self.royal {
            return None;
        }
        let base = self.demoted(piece_type);
        self.reserve_types.contains(&base).then_some(base)
    }

    pub fn is_reservable(&self, piece_type: PieceType) -> bool {
        self.has_drops && self.reserve_types.contains(&piece_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_by_name() {
        assert_eq!(Variant::by_name("standard").map(|v| v.width), Some(8));
        assert_eq!(Variant::by_name("Shogi").map(|v| v.height), Some(9));
        assert!(Variant::by_name("xiangqi").is_none());
    }

    #[test]
    fn test_piece_from_symbol() {
        let v = Variant::by_name("standard").unwrap();
        assert_eq!(v.piece_from_symbol('Q', false), Some(Piece::new(Side::White, chess::QUEEN)));
        assert_eq!(v.piece_from_symbol('n', false), Some(Piece::new(Side::Black, chess::KNIGHT)));
        assert_eq!(v.piece_from_symbol('X', false), None);
        assert_eq!(v.piece_from_symbol('P', true), None);
    }

    #[test]
    fn test_representation() {
        let v = Variant::by_name("shogi").unwrap();
        assert_eq!(v.representation(Piece::new(Side::White, shogi::PAWN)).as_deref(), Some("P"));
        assert_eq!(v.representation(Piece::new(Side::Black, shogi::HORSE)).as_deref(), Some("+b"));
        assert_eq!(v.representation(Piece::NONE), None);
    }

    #[test]
    fn test_reserve_type_demotes_and_excludes_king() {
        let v = Variant::by_name("shogi").unwrap();
        assert_eq!(v.reserve_type(shogi::DRAGON), Some(shogi::ROOK));
        assert_eq!(v.reserve_type(shogi::GOLD), Some(shogi::GOLD));
        assert_eq!(v.reserve_type(shogi::KING), None);

        let std = Variant::by_name("standard").unwrap();
        assert_eq!(std.reserve_type(chess::QUEEN), None);
    }

    #[test]
    fn test_minishogi_has_no_lance() {
        let v = Variant::by_name("minishogi").unwrap();
        assert!(!v.is_reservable(shogi::LANCE));
        assert!(v.is_reservable(shogi::SILVER));
    }
}
