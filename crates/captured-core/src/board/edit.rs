//! 盤面編集（BoardEdit）
//!
//! 合法性は検査しない。移動先にある駒はそのまま取り除かれ、持ち駒のあるバリアントでは
//! 動かした側の持ち駒になる（成駒は生駒に戻し、玉は持ち駒にしない）。

use thiserror::Error;

use super::{BoardSnapshot, GridBoard, Notation, Square, Variant};
use crate::types::{Piece, PieceType};

/// 成り指定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Promotion {
    /// 指定の駒種になる（チェスの昇格）
    To(PieceType),
    /// バリアントの成駒表に従って成る（将棋の `+`）
    Promote,
}

/// 盤面への1操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardEdit {
    /// 駒を動かす（移動先の駒は取られる）
    Move { from: Square, to: Square, promotion: Option<Promotion> },
    /// 持ち駒を打つ。`piece` は打つ側の色の駒。
    Drop { piece: Piece, to: Square },
}

/// 盤面編集のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("Square {0} is outside the board")]
    OutOfBounds(Square),

    #[error("No piece on {0}")]
    EmptySquare(Square),

    #[error("Square {0} is occupied")]
    Occupied(Square),

    #[error("Variant '{0}' does not support drops")]
    DropsUnsupported(&'static str),

    #[error("No {piece:?} in reserve")]
    NoReserve { piece: Piece },

    #[error("Invalid move notation: {0}")]
    Notation(String),
}

impl GridBoard {
    /// 編集を適用し、取った駒を返す
    pub fn apply(&mut self, edit: &BoardEdit) -> Result<Option<Piece>, EditError> {
        match *edit {
            BoardEdit::Move { from, to, promotion } => {
                let variant = self.variant_info();
                let moving = self.get(from).ok_or(EditError::OutOfBounds(from))?;
                if !moving.is_valid() {
                    return Err(EditError::EmptySquare(from));
                }
                if !self.contains(to) {
                    return Err(EditError::OutOfBounds(to));
                }
                let placed = match promotion {
                    None => moving,
                    Some(Promotion::To(pt)) => Piece::new(moving.side(), pt),
                    Some(Promotion::Promote) => {
                        let pt = variant.promoted(moving.piece_type()).ok_or_else(|| {
                            EditError::Notation(format!("{} cannot promote", self.representation(moving)))
                        })?;
                        Piece::new(moving.side(), pt)
                    }
                };

                self.remove_piece(from);
                let victim = self.set_piece(to, placed).unwrap_or(Piece::NONE);
                if !victim.is_valid() {
                    return Ok(None);
                }

                if let Some(rt) = variant.reserve_type(victim.piece_type()) {
                    self.add_reserve(victim.side(), rt, 1);
                }
                Ok(Some(victim))
            }
            BoardEdit::Drop { piece, to } => {
                let variant = self.variant_info();
                if !variant.has_drops {
                    return Err(EditError::DropsUnsupported(variant.name));
                }
                match self.get(to) {
                    None => return Err(EditError::OutOfBounds(to)),
                    Some(pc) if pc.is_valid() => return Err(EditError::Occupied(to)),
                    Some(_) => {}
                }
                // 打つ駒は相手の色として持ち駒表に記録されている
                if !self.take_reserve(piece.side().opponent(), piece.piece_type()) {
                    return Err(EditError::NoReserve { piece });
                }
                self.set_piece(to, piece);
                Ok(None)
            }
        }
    }
}

/// 座標表記の1手を `BoardEdit` に変換する
///
/// - FEN 系: `e2e4`, `e7e8q`, `P@e4`（大文字は White の駒）
/// - SFEN 系: `7g7f`, `8h2b+`, `P*5e`（大文字は先手 = White の駒）
pub fn parse_edit(variant: &'static Variant, text: &str) -> Result<BoardEdit, EditError> {
    let text = text.trim();
    let bad = || EditError::Notation(text.to_string());

    let drop_mark = match variant.notation {
        Notation::Fen => '@',
        Notation::Sfen => '*',
    };
    if let Some((symbol, square)) = text.split_once(drop_mark) {
        let mut chars = symbol.chars();
        let (Some(c), None) = (chars.next(), chars.next()) else {
            return Err(bad());
        };
        let piece = variant.piece_from_symbol(c, false).ok_or_else(bad)?;
        let to = parse_square(variant, square).ok_or_else(bad)?;
        return Ok(BoardEdit::Drop { piece, to });
    }

    if text.len() < 4 || !text.is_ascii() {
        return Err(bad());
    }
    let from = parse_square(variant, &text[..2]).ok_or_else(bad)?;
    let to = parse_square(variant, &text[2..4]).ok_or_else(bad)?;
    let suffix = &text[4..];

    let promotion = match (variant.notation, suffix) {
        (_, "") => None,
        (Notation::Fen, s) if s.len() == 1 => {
            let c = s.chars().next().ok_or_else(bad)?;
            let piece = variant.piece_from_symbol(c, false).ok_or_else(bad)?;
            Some(Promotion::To(piece.piece_type()))
        }
        (Notation::Sfen, "+") => Some(Promotion::Promote),
        _ => return Err(bad()),
    };
    Ok(BoardEdit::Move { from, to, promotion })
}

/// 座標1つを解析する（チェス系 "e4"、将棋系 "7g"）
fn parse_square(variant: &Variant, text: &str) -> Option<Square> {
    let bytes = text.as_bytes();
    if bytes.len() != 2 {
        return None;
    }
    let sq = match variant.notation {
        Notation::Fen => {
            let x = bytes[0].checked_sub(b'a')? as usize;
            let rank = bytes[1].checked_sub(b'0')? as usize;
            if rank == 0 || rank > variant.height {
                return None;
            }
            Square::new(x, variant.height - rank)
        }
        Notation::Sfen => {
            let file = bytes[0].checked_sub(b'0')? as usize;
            let y = bytes[1].checked_sub(b'a')? as usize;
            if file == 0 || file > variant.width {
                return None;
            }
            Square::new(variant.width - file, y)
        }
    };
    (sq.x < variant.width && sq.y < variant.height).then_some(sq)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Side, chess, shogi};

    fn variant(name: &str) -> &'static Variant {
        Variant::by_name(name).unwrap()
    }

    #[test]
    fn test_parse_chess_move() {
        let edit = parse_edit(variant("standard"), "e2e4").unwrap();
        assert_eq!(
            edit,
            BoardEdit::Move { from: Square::new(4, 6), to: Square::new(4, 4), promotion: None }
        );
        let edit = parse_edit(variant("standard"), "a7a8q").unwrap();
        assert_eq!(
            edit,
            BoardEdit::Move {
                from: Square::new(0, 1),
                to: Square::new(0, 0),
                promotion: Some(Promotion::To(chess::QUEEN))
            }
        );
    }

    #[test]
    fn test_parse_drops() {
        let edit = parse_edit(variant("crazyhouse"), "p@e5").unwrap();
        assert_eq!(
            edit,
            BoardEdit::Drop { piece: Piece::new(Side::Black, chess::PAWN), to: Square::new(4, 3) }
        );
        let edit = parse_edit(variant("shogi"), "P*5e").unwrap();
        assert_eq!(
            edit,
            BoardEdit::Drop { piece: Piece::new(Side::White, shogi::PAWN), to: Square::new(4, 4) }
        );
    }

    #[test]
    fn test_parse_shogi_square() {
        let edit = parse_edit(variant("shogi"), "7g7f").unwrap();
        assert_eq!(
            edit,
            BoardEdit::Move { from: Square::new(2, 6), to: Square::new(2, 5), promotion: None }
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_edit(variant("standard"), "e9e4").is_err());
        assert!(parse_edit(variant("standard"), "z2z4").is_err());
        assert!(parse_edit(variant("standard"), "e2").is_err());
        assert!(parse_edit(variant("shogi"), "0a1a").is_err());
        assert!(parse_edit(variant("shogi"), "PP*5e").is_err());
    }

    #[test]
    fn test_capture_moves_piece_into_reserve() {
        let mut board = GridBoard::from_position(
            variant("crazyhouse"),
            "rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR[] w KQkq - 0 2",
        )
        .unwrap();
        let captured = board.apply(&parse_edit(variant("crazyhouse"), "e4d5").unwrap()).unwrap();
        assert_eq!(captured, Some(Piece::new(Side::Black, chess::PAWN)));
        assert_eq!(board.reserve_count(Side::Black, chess::PAWN), 1);

        // White が打つと持ち駒が減る
        board.apply(&parse_edit(variant("crazyhouse"), "P@e6").unwrap()).unwrap();
        assert_eq!(board.reserve_count(Side::Black, chess::PAWN), 0);
        assert_eq!(board.piece_at(4, 2), Piece::new(Side::White, chess::PAWN));
    }

    #[test]
    fn test_drop_errors() {
        let mut board = GridBoard::start_position(variant("crazyhouse")).unwrap();
        let err = board.apply(&parse_edit(variant("crazyhouse"), "N@e4").unwrap());
        assert!(matches!(err, Err(EditError::NoReserve { .. })));
        let err = board.apply(&parse_edit(variant("crazyhouse"), "N@e2").unwrap());
        assert_eq!(err, Err(EditError::Occupied(Square::new(4, 6))));

        let mut std = GridBoard::start_position(variant("standard")).unwrap();
        let drop = BoardEdit::Drop { piece: Piece::new(Side::White, chess::PAWN), to: Square::new(4, 4) };
        assert_eq!(std.apply(&drop), Err(EditError::DropsUnsupported("standard")));
    }

    #[test]
    fn test_move_from_empty_square() {
        let mut board = GridBoard::start_position(variant("standard")).unwrap();
        let err = board.apply(&parse_edit(variant("standard"), "e4e5").unwrap());
        assert_eq!(err, Err(EditError::EmptySquare(Square::new(4, 4))));
    }

    #[test]
    fn test_shogi_promotion_uses_variant_table() {
        let v = variant("shogi");
        let mut board = GridBoard::from_position(v, "4k4/9/9/9/9/9/9/1B7/4K4 b - 1").unwrap();
        let edit = parse_edit(v, "8h2b+").unwrap();
        assert_eq!(
            edit,
            BoardEdit::Move {
                from: Square::new(1, 7),
                to: Square::new(7, 1),
                promotion: Some(Promotion::Promote)
            }
        );
        board.apply(&edit).unwrap();
        assert_eq!(board.piece_at(7, 1), Piece::new(Side::White, shogi::HORSE));
    }

    #[test]
    fn test_promotion_of_unpromotable_piece() {
        let v = variant("shogi");
        let mut board = GridBoard::from_position(v, "4k4/9/9/9/9/9/9/9/4K4 b - 1").unwrap();
        let err = board.apply(&parse_edit(v, "5i5h+").unwrap());
        assert!(matches!(err, Err(EditError::Notation(_))));
        // 失敗した編集は盤面を変えない
        assert_eq!(board.piece_at(4, 8), Piece::new(Side::White, shogi::KING));
    }

    #[test]
    fn test_captured_promoted_piece_demotes_in_reserve() {
        let v = variant("shogi");
        let mut board = GridBoard::from_position(v, "4k4/9/9/9/9/9/9/1+r7/4K3B b - 1").unwrap();
        let edit = parse_edit(v, "1i8h").unwrap();
        board.apply(&edit).unwrap();
        assert_eq!(board.reserve_count(Side::Black, shogi::ROOK), 1);
        assert_eq!(board.reserve_count(Side::Black, shogi::DRAGON), 0);
    }
}
