//! 局面文字列（FEN / SFEN）の解析
//!
//! 盤面フィールドは両形式で共通に扱う。
//! - `/` 区切りの行（上の行から）、数字は空き升の連続（2桁以上も可）
//! - SFEN の `+` は直後の駒を成駒にする
//! - FEN の `~`（crazyhouse の成駒印）は受理して読み捨てる
//!
//! 持ち駒は FEN では `[...]` または盤面の次の行として、SFEN では第3フィールドとして書く。
//! 大文字は White が持つ駒で、取られた色（Black）側の `reserve_count` に数える。

use thiserror::Error;

use super::{BoardSnapshot, GridBoard, Notation, Square};
use crate::types::Side;

/// 局面文字列の解析エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionError {
    /// 空文字列
    #[error("Empty position string")]
    Empty,

    /// 行数が盤の高さと合わない
    #[error("Invalid board: expected {expected} rows, got {actual}")]
    RowCount { expected: usize, actual: usize },

    /// 行の升数が盤の幅と合わない
    #[error("Invalid board: row {row} has {actual} squares, expected {expected}")]
    RowWidth { row: usize, expected: usize, actual: usize },

    /// 駒記号が不正
    #[error("Invalid board: unknown piece '{symbol}' in row {row}")]
    UnknownPiece { row: usize, symbol: char },

    /// 手番の形式が不正
    #[error("Invalid side to move: {0}")]
    SideToMove(String),

    /// 持ち駒の形式が不正
    #[error("Invalid reserve: {0}")]
    Reserve(String),

    /// 手数の形式が不正
    #[error("Invalid ply: {0}")]
    Ply(String),
}

/// `board` に局面を書き込む（`board` は空であること）
pub(super) fn parse_position(board: &mut GridBoard, text: &str) -> Result<(), PositionError> {
    let parts: Vec<&str> = text.split_whitespace().collect();
    let Some(&first) = parts.first() else {
        return Err(PositionError::Empty);
    };

    match board.variant_info().notation {
        Notation::Fen => {
            let (placement, reserve) = split_fen_reserve(board, first)?;
            parse_board(board, placement)?;
            if let Some(reserve) = reserve {
                parse_reserve(board, reserve)?;
            }
            if let Some(side) = parts.get(1) {
                parse_side(side, "w", "b")?;
            }
        }
        Notation::Sfen => {
            parse_board(board, first)?;
            if let Some(side) = parts.get(1) {
                parse_side(side, "b", "w")?;
            }
            if let Some(&hand) = parts.get(2) {
                if hand != "-" {
                    parse_reserve(board, hand)?;
                }
            }
            if let Some(ply) = parts.get(3) {
                ply.parse::<u32>().map_err(|_| PositionError::Ply((*ply).to_string()))?;
            }
        }
    }

    Ok(())
}

/// FEN の盤面フィールドから持ち駒部分を切り出す
fn split_fen_reserve<'a>(
    board: &GridBoard,
    field: &'a str,
) -> Result<(&'a str, Option<&'a str>), PositionError> {
    if let Some(open) = field.find('[') {
        let rest = &field[open + 1..];
        let Some(close) = rest.find(']') else {
            return Err(PositionError::Reserve(format!("unterminated '[' in '{field}'")));
        };
        if close + 1 != rest.len() {
            return Err(PositionError::Reserve(format!("trailing characters after ']' in '{field}'")));
        }
        return Ok((&field[..open], Some(&rest[..close])));
    }

    // 盤面の次の行として持ち駒を書く形式（"…/RNBQKBNR/Pp"）
    let height = board.variant_info().height;
    if board.variant_info().has_drops && field.split('/').count() == height + 1 {
        if let Some(pos) = field.rfind('/') {
            return Ok((&field[..pos], Some(&field[pos + 1..])));
        }
    }
    Ok((field, None))
}

fn parse_side(token: &str, first: &str, second: &str) -> Result<Side, PositionError> {
    if token == first {
        Ok(Side::White)
    } else if token == second {
        Ok(Side::Black)
    } else {
        Err(PositionError::SideToMove(format!("Expected '{first}' or '{second}', got '{token}'")))
    }
}

/// 盤面部分をパース
fn parse_board(board: &mut GridBoard, placement: &str) -> Result<(), PositionError> {
    let variant = board.variant_info();
    let rows: Vec<&str> = placement.split('/').collect();
    if rows.len() != variant.height {
        return Err(PositionError::RowCount { expected: variant.height, actual: rows.len() });
    }

    for (y, row) in rows.iter().enumerate() {
        let mut x = 0usize;
        let mut run = 0usize;
        let mut promoted = false;

        for c in row.chars() {
            if let Some(digit) = c.to_digit(10) {
                run = run * 10 + digit as usize;
                // 盤幅を超えた時点で打ち切る（桁あふれさせない）
                if x + run > variant.width {
                    return Err(PositionError::RowWidth { row: y, expected: variant.width, actual: x + run });
                }
                continue;
            }
            x += std::mem::take(&mut run);

            match c {
                '+' => promoted = true,
                '~' => {}
                _ => {
                    let Some(piece) = variant.piece_from_symbol(c, promoted) else {
                        return Err(PositionError::UnknownPiece { row: y, symbol: c });
                    };
                    if board.set_piece(Square::new(x, y), piece).is_none() {
                        return Err(PositionError::RowWidth {
                            row: y,
                            expected: variant.width,
                            actual: x + 1,
                        });
                    }
                    promoted = false;
                    x += 1;
                }
            }
        }
        x += run;

        if x != variant.width {
            return Err(PositionError::RowWidth { row: y, expected: variant.width, actual: x });
        }
    }

    Ok(())
}

/// 持ち駒部分をパース（"2Pp" / "PPp" の両方を受理）
fn parse_reserve(board: &mut GridBoard, text: &str) -> Result<(), PositionError> {
    let variant = board.variant_info();
    if text.is_empty() || text == "-" {
        return Ok(());
    }
    if !variant.has_drops {
        return Err(PositionError::Reserve(format!(
            "variant '{}' has no reserves, got '{text}'",
            variant.name
        )));
    }

    // 1駒種あたりの上限は升目の数
    let limit = (variant.width * variant.height) as u32;
    let too_many = || PositionError::Reserve(format!("count exceeds {limit} in '{text}'"));

    let mut count: Option<u32> = None;
    for c in text.chars() {
        if let Some(digit) = c.to_digit(10) {
            let n = count.unwrap_or(0) * 10 + digit;
            if n > limit {
                return Err(too_many());
            }
            count = Some(n);
            continue;
        }
        let Some(piece) = variant.piece_from_symbol(c, false) else {
            return Err(PositionError::Reserve(format!("unknown piece '{c}' in '{text}'")));
        };
        if !variant.is_reservable(piece.piece_type()) {
            return Err(PositionError::Reserve(format!("piece '{c}' cannot be held in reserve")));
        }
        // 持ち主の反対色の駒として数える
        let side = piece.side().opponent();
        let n = count.take().unwrap_or(1);
        if board.reserve_count(side, piece.piece_type()) + n > limit {
            return Err(too_many());
        }
        board.add_reserve(side, piece.piece_type(), n);
    }

    if count.is_some() {
        return Err(PositionError::Reserve(format!("dangling count in '{text}'")));
    }
    Ok(())
}
