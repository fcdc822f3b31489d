//! 基本型モジュール
//!
//! # 型の依存関係
//!
//! ```text
//! Side
//!   ↓
//! PieceType
//!   ↓
//! Piece
//! ```
//!
//! `PieceType` の序数はバリアントごとに定義される（チェス系と将棋系で別の表を持つ）。
//! 取られた駒の並び順はこの序数の昇順で決まる。

mod piece;
mod piece_type;
mod side;

pub use piece::Piece;
pub use piece_type::{PieceType, chess, shogi};
pub use side::Side;
