//! 取られた駒の集計（CaptureReconciler）
//!
//! 盤面スナップショット1つから、各手番が取った相手の駒の一覧を求める純粋関数。
//! 状態は持たず、盤面が変わるたびに全体を計算し直す。
//!
//! - 持ち駒のあるバリアント: 持ち駒の枚数がそのまま答えになる（推定不要）
//! - 持ち駒のないバリアント: 開始局面と現局面の駒数ヒストグラムの差を取る
//!
//! # 既知の制限
//!
//! 差分方式は駒種ごとの枚数しか見ないため、成り（歩→クイーン等）は
//! 「歩が1枚消え、クイーンが1枚増えた」ように見え、取られていない歩が取られた駒として
//! 表示される。増えた側は 0 で打ち切られる。表示用途としてはこの近似を許容する。
//! 同じ駒種のどの1枚が取られたかも区別しない。

use std::collections::BTreeMap;

use serde::Serialize;

use crate::board::BoardSnapshot;
use crate::factory::{BuiltinVariants, VariantFactory};
use crate::types::{Piece, PieceType, Side};

/// 手番ごと・駒種ごとの盤上の駒数
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Histogram {
    counts: [BTreeMap<PieceType, u32>; Side::NUM],
}

impl Histogram {
    /// 全升を1度ずつ走査して数える
    pub fn from_board(board: &dyn BoardSnapshot) -> Histogram {
        let mut hist = Histogram::default();
        for y in 0..board.height() {
            for x in 0..board.width() {
                let pc = board.piece_at(x, y);
                if pc.is_valid() {
                    *hist.counts[pc.side().index()].entry(pc.piece_type()).or_insert(0) += 1;
                }
            }
        }
        hist
    }

    pub fn count(&self, side: Side, piece_type: PieceType) -> u32 {
        self.counts[side.index()].get(&piece_type).copied().unwrap_or(0)
    }

    /// 駒種の昇順で (駒種, 枚数) を返す
    pub fn iter(&self, side: Side) -> impl Iterator<Item = (PieceType, u32)> + '_ {
        self.counts[side.index()].iter().map(|(&pt, &n)| (pt, n))
    }
}

/// 集計結果
///
/// `white` は White が取った駒（Black の駒）、`black` は Black が取った駒（White の駒）。
/// どちらも駒種の序数の昇順に並ぶ。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CapturedPieces {
    pub white: Vec<Piece>,
    pub black: Vec<Piece>,
}

impl CapturedPieces {
    /// `capturer` が取った駒
    pub fn by(&self, capturer: Side) -> &[Piece] {
        match capturer {
            Side::White => &self.white,
            Side::Black => &self.black,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.white.is_empty() && self.black.is_empty()
    }

    /// 2行のうち長い方の駒数
    pub fn columns(&self) -> usize {
        self.white.len().max(self.black.len())
    }

    /// `capturer` が取った `piece_type` の枚数
    pub fn count(&self, capturer: Side, piece_type: PieceType) -> usize {
        self.by(capturer).iter().filter(|p| p.piece_type() == piece_type).count()
    }

    fn push_n(&mut self, capturer: Side, piece: Piece, n: u32) {
        let list = match capturer {
            Side::White => &mut self.white,
            Side::Black => &mut self.black,
        };
        list.extend(std::iter::repeat_n(piece, n as usize));
    }

    fn sort(&mut self) {
        self.white.sort_by_key(|p| p.piece_type());
        self.black.sort_by_key(|p| p.piece_type());
    }
}

/// 集計方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileMode {
    /// 持ち駒の枚数から
    Reserve,
    /// 開始局面との差分から
    Diff,
}

impl ReconcileMode {
    pub fn for_board(board: &dyn BoardSnapshot) -> ReconcileMode {
        if board.has_drop_reserves() { ReconcileMode::Reserve } else { ReconcileMode::Diff }
    }
}

/// 取られた駒の集計器
#[derive(Debug, Clone, Default)]
pub struct CaptureReconciler<F = BuiltinVariants> {
    factory: F,
}

impl CaptureReconciler<BuiltinVariants> {
    pub fn builtin() -> Self {
        CaptureReconciler { factory: BuiltinVariants }
    }
}

impl<F: VariantFactory> CaptureReconciler<F> {
    pub fn new(factory: F) -> Self {
        CaptureReconciler { factory }
    }

    /// 盤面から両手番の取った駒を求める
    ///
    /// 盤面がない・升目がない場合は空の結果を返す。失敗はしない。
    pub fn reconcile(&self, board: Option<&dyn BoardSnapshot>) -> CapturedPieces {
        let Some(board) = board.filter(|b| !b.is_empty()) else {
            log::debug!("reconcile: no board, nothing captured");
            return CapturedPieces::default();
        };

        let mut captured = match ReconcileMode::for_board(board) {
            ReconcileMode::Reserve => from_reserves(board),
            ReconcileMode::Diff => self.from_diff(board),
        };
        captured.sort();

        log::debug!(
            "reconcile[{}]: white captured {}, black captured {}",
            board.variant(),
            captured.white.len(),
            captured.black.len()
        );
        captured
    }

    fn from_diff(&self, board: &dyn BoardSnapshot) -> CapturedPieces {
        let mut captured = CapturedPieces::default();
        let Some(start) = self.factory.create(board.variant()) else {
            log::warn!("no starting position for variant '{}'", board.variant());
            return captured;
        };

        let start = Histogram::from_board(start.as_ref());
        let current = Histogram::from_board(board);

        for side in Side::ALL {
            for (pt, start_count) in start.iter(side) {
                let missing = start_count.saturating_sub(current.count(side, pt));
                if missing > 0 {
                    log::trace!("diff: {side} {pt} missing {missing}");
                }
                // side の駒が消えた分は相手が取った駒
                captured.push_n(side.opponent(), Piece::new(side, pt), missing);
            }
        }
        captured
    }
}

fn from_reserves(board: &dyn BoardSnapshot) -> CapturedPieces {
    let mut captured = CapturedPieces::default();
    // 1駒種あたり升目の数を超える持ち駒はありえないので、そこで打ち切る
    let limit = u32::try_from(board.width() * board.height()).unwrap_or(u32::MAX);
    for &pt in board.reserve_piece_types() {
        for side in Side::ALL {
            // side の駒が持ち駒にあれば、それは相手が取った駒
            let held = board.reserve_count(side, pt);
            if held > limit {
                log::warn!("reserve: {side} {pt} count {held} clamped to {limit}");
            }
            captured.push_n(side.opponent(), Piece::new(side, pt), held.min(limit));
        }
    }
    captured
}
