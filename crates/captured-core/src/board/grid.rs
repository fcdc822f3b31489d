//! 具象盤面（GridBoard）

use std::collections::BTreeMap;

use super::notation::{self, PositionError};
use super::{BoardSnapshot, Square, Variant};
use crate::types::{Piece, PieceType, Side};

/// 升目配列と持ち駒表を持つ盤面
///
/// 持ち駒表は「取られた駒の色」をキーにする。White が Black の歩を取って持っていれば
/// `reserve_count(Side::Black, PAWN)` が増える。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridBoard {
    variant: &'static Variant,
    cells: Vec<Piece>,
    reserves: [BTreeMap<PieceType, u32>; Side::NUM],
}

impl GridBoard {
    /// 駒のない盤面
    pub fn empty(variant: &'static Variant) -> GridBoard {
        GridBoard {
            variant,
            cells: vec![Piece::NONE; variant.width * variant.height],
            reserves: [BTreeMap::new(), BTreeMap::new()],
        }
    }

    /// バリアントの初期局面
    pub fn start_position(variant: &'static Variant) -> Result<GridBoard, PositionError> {
        GridBoard::from_position(variant, variant.start_position)
    }

    /// 局面文字列（FEN / SFEN）から生成
    pub fn from_position(variant: &'static Variant, text: &str) -> Result<GridBoard, PositionError> {
        let mut board = GridBoard::empty(variant);
        notation::parse_position(&mut board, text)?;
        Ok(board)
    }

    pub fn variant_info(&self) -> &'static Variant {
        self.variant
    }

    #[inline]
    fn index(&self, sq: Square) -> Option<usize> {
        (sq.x < self.variant.width && sq.y < self.variant.height)
            .then(|| sq.y * self.variant.width + sq.x)
    }

    pub fn contains(&self, sq: Square) -> bool {
        self.index(sq).is_some()
    }

    /// 升目の駒（盤外は `None`）
    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.index(sq).map(|i| self.cells[i])
    }

    /// 駒を置き、元の駒を返す。盤外は `None`。
    pub fn set_piece(&mut self, sq: Square, piece: Piece) -> Option<Piece> {
        let i = self.index(sq)?;
        Some(std::mem::replace(&mut self.cells[i], piece))
    }

    /// 駒を取り除き、元の駒を返す。盤外は `None`。
    pub fn remove_piece(&mut self, sq: Square) -> Option<Piece> {
        self.set_piece(sq, Piece::NONE)
    }

    /// 盤上にある指定の駒の枚数
    pub fn count(&self, piece: Piece) -> usize {
        self.cells.iter().filter(|&&pc| pc == piece).count()
    }

    /// `side` の駒として取られた持ち駒を `n` 枚追加（`u32::MAX` で頭打ち）
    pub fn add_reserve(&mut self, side: Side, piece_type: PieceType, n: u32) {
        if n == 0 {
            return;
        }
        let held = self.reserves[side.index()].entry(piece_type).or_insert(0);
        *held = held.saturating_add(n);
    }

    /// 持ち駒を1枚減らす。持っていなければ `false`。
    pub fn take_reserve(&mut self, side: Side, piece_type: PieceType) -> bool {
        let table = &mut self.reserves[side.index()];
        match table.get_mut(&piece_type) {
            Some(n) if *n > 1 => {
                *n -= 1;
                true
            }
            Some(_) => {
                table.remove(&piece_type);
                true
            }
            None => false,
        }
    }

    /// `holder` が持っている持ち駒の枚数（表記上の「手駒」）
    pub fn hand(&self, holder: Side, piece_type: PieceType) -> u32 {
        self.reserve_count(holder.opponent(), piece_type)
    }
}

impl BoardSnapshot for GridBoard {
    fn width(&self) -> usize {
        self.variant.width
    }

    fn height(&self) -> usize {
        self.variant.height
    }

    fn piece_at(&self, x: usize, y: usize) -> Piece {
        self.get(Square::new(x, y)).unwrap_or(Piece::NONE)
    }

    fn variant(&self) -> &str {
        self.variant.name
    }

    fn has_drop_reserves(&self) -> bool {
        self.variant.has_drops
    }

    fn reserve_piece_types(&self) -> &[PieceType] {
        self.variant.reserve_types
    }

    fn reserve_count(&self, side: Side, piece_type: PieceType) -> u32 {
        self.reserves[side.index()].get(&piece_type).copied().unwrap_or(0)
    }

    fn representation(&self, piece: Piece) -> String {
        self.variant.representation(piece).unwrap_or_else(|| "?".to_string())
    }
}
