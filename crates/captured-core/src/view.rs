//! 取られた駒ビュー
//!
//! 対局セッションを購読し、盤面変更の通知を受けるたびに
//! 集計（[`CaptureReconciler`]）→ 配置（[`layout_captured`]）→ 描画面の全置換 を行う。
//! 描画面の項目は差分更新せず、毎回 clear してから追加し直す。

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::mpsc::TryRecvError;

use serde::Serialize;

use crate::board::BoardSnapshot;
use crate::factory::{BuiltinVariants, VariantFactory};
use crate::layout::{Point, SlotGeometry, Size, layout_captured};
use crate::reconcile::{CaptureReconciler, CapturedPieces};
use crate::session::{GameSession, Subscription};
use crate::types::Piece;

/// 描画項目1つ
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawItem {
    pub piece: Piece,
    /// グリフ資源の識別子（盤面の駒表記）
    pub glyph: String,
    pub position: Point,
    pub size: f64,
}

/// 描画面
pub trait DrawSurface {
    /// 全項目を消す
    fn clear(&mut self);

    fn add_item(&mut self, item: DrawItem);

    /// ビューポート合わせに使う論理サイズ
    fn set_logical_size(&mut self, size: Size);
}

/// メモリ上に項目を保持するだけの描画面
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneSurface {
    items: Vec<DrawItem>,
    logical_size: Size,
    rebuilds: usize,
}

impl SceneSurface {
    pub fn new() -> Self {
        SceneSurface::default()
    }

    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    pub fn logical_size(&self) -> Size {
        self.logical_size
    }

    /// clear された回数
    pub fn rebuild_count(&self) -> usize {
        self.rebuilds
    }
}

impl DrawSurface for SceneSurface {
    fn clear(&mut self) {
        self.items.clear();
        self.rebuilds += 1;
    }

    fn add_item(&mut self, item: DrawItem) {
        self.items.push(item);
    }

    fn set_logical_size(&mut self, size: Size) {
        self.logical_size = size;
    }
}

struct ActiveGame {
    game: Weak<RefCell<GameSession>>,
    subscription: Subscription,
}

/// 取られた駒ビュー
pub struct CapturedPiecesView<S: DrawSurface, F: VariantFactory = BuiltinVariants> {
    reconciler: CaptureReconciler<F>,
    geometry: SlotGeometry,
    surface: S,
    active: Option<ActiveGame>,
    captured: CapturedPieces,
}

impl<S: DrawSurface> CapturedPiecesView<S> {
    pub fn new(surface: S, geometry: SlotGeometry) -> Self {
        CapturedPiecesView::with_reconciler(surface, geometry, CaptureReconciler::builtin())
    }
}

impl<S: DrawSurface, F: VariantFactory> CapturedPiecesView<S, F> {
    pub fn with_reconciler(surface: S, geometry: SlotGeometry, reconciler: CaptureReconciler<F>) -> Self {
        CapturedPiecesView { reconciler, geometry, surface, active: None, captured: CapturedPieces::default() }
    }

    /// 表示する対局を切り替える
    ///
    /// 前の対局の購読を解除し、新しい対局を購読してから再描画する。
    /// 対局は弱参照で保持し、破棄されたら「対局なし」として扱う。
    pub fn set_game(&mut self, game: Option<&Rc<RefCell<GameSession>>>) {
        if let Some(prev) = self.active.take() {
            if let Some(prev_game) = prev.game.upgrade() {
                prev_game.borrow_mut().unsubscribe(prev.subscription.id);
            }
        }

        if let Some(game) = game {
            let subscription = game.borrow_mut().subscribe();
            self.active = Some(ActiveGame { game: Rc::downgrade(game), subscription });
        }

        self.refresh();
    }

    pub fn has_game(&self) -> bool {
        self.active.as_ref().is_some_and(|a| a.game.strong_count() > 0)
    }

    /// 溜まった通知をすべて取り出し、1件以上あれば1回だけ再描画する
    pub fn process_notifications(&mut self) -> bool {
        let Some(active) = &self.active else {
            return false;
        };

        let mut pending = 0usize;
        let mut disconnected = false;
        loop {
            match active.subscription.events.try_recv() {
                Ok(_) => pending += 1,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    disconnected = true;
                    break;
                }
            }
        }

        if disconnected {
            log::debug!("view: game session dropped");
            self.active = None;
        }
        if pending == 0 && !disconnected {
            return false;
        }
        log::trace!("view: {pending} pending notification(s)");
        self.refresh();
        true
    }

    /// 描画面を作り直す
    pub fn refresh(&mut self) {
        self.surface.clear();

        let game = self.active.as_ref().and_then(|a| a.game.upgrade());
        let session = game.as_ref().map(|g| g.borrow());
        let board = session.as_ref().and_then(|s| s.board());

        let captured = self.reconciler.reconcile(board.map(|b| b as &dyn BoardSnapshot));
        let layout = layout_captured(&captured, &self.geometry);
        for placement in layout.placements() {
            let glyph = board.map(|b| b.representation(placement.piece)).unwrap_or_default();
            self.surface.add_item(DrawItem {
                piece: placement.piece,
                glyph,
                position: placement.position,
                size: self.geometry.cell_size,
            });
        }
        self.surface.set_logical_size(layout.bounds);
        self.captured = captured;
    }

    /// 直近の集計結果
    pub fn captured(&self) -> &CapturedPieces {
        &self.captured
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

impl<S: DrawSurface, F: VariantFactory> Drop for CapturedPiecesView<S, F> {
    fn drop(&mut self) {
        if let Some(active) = self.active.take() {
            if let Some(game) = active.game.upgrade() {
                game.borrow_mut().unsubscribe(active.subscription.id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Variant, parse_edit};
    use crate::types::{Side, chess};

    fn standard() -> &'static Variant {
        Variant::by_name("standard").unwrap()
    }

    fn view() -> CapturedPiecesView<SceneSurface> {
        CapturedPiecesView::new(SceneSurface::new(), SlotGeometry::default())
    }

    fn game(variant: &'static Variant, position: &str) -> Rc<RefCell<GameSession>> {
        let mut session = GameSession::start(variant).unwrap();
        session.set_position(variant, position).unwrap();
        Rc::new(RefCell::new(session))
    }

    #[test]
    fn test_no_game_renders_nothing() {
        let mut view = view();
        view.set_game(None);
        assert!(view.surface().items().is_empty());
        assert_eq!(view.surface().logical_size(), Size { width: 24.0, height: 63.0 });
        assert!(!view.process_notifications());
    }

    #[test]
    fn test_set_game_renders_immediately() {
        let g = game(standard(), "rnbqkbnr/pppppppp/8/8/8/8/PPPPP3/RNBQKBNR w KQkq - 0 1");
        let mut view = view();
        view.set_game(Some(&g));

        let items = view.surface().items();
        assert_eq!(items.len(), 3);
        assert!(items.iter().all(|i| i.glyph == "P" && i.size == 24.0));
        // Black が取った駒は下の行
        assert!(items.iter().all(|i| i.position.y == 39.0));
        assert_eq!(view.captured().black.len(), 3);
        assert_eq!(g.borrow().subscriber_count(), 1);
    }

    #[test]
    fn test_notifications_coalesce_into_one_refresh() {
        let g = game(standard(), "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        let mut view = view();
        view.set_game(Some(&g));
        let rebuilds = view.surface().rebuild_count();

        g.borrow_mut().apply_edit(parse_edit(standard(), "e2e4").unwrap()).unwrap();
        g.borrow_mut().apply_edit(parse_edit(standard(), "d7d5").unwrap()).unwrap();
        g.borrow_mut().apply_edit(parse_edit(standard(), "e4d5").unwrap()).unwrap();

        assert!(view.process_notifications());
        assert_eq!(view.surface().rebuild_count(), rebuilds + 1);
        assert_eq!(view.captured().white, vec![Piece::new(Side::Black, chess::PAWN)]);
        assert_eq!(view.surface().items()[0].glyph, "p");
        assert!(!view.process_notifications());
    }

    #[test]
    fn test_switching_games_unsubscribes_previous() {
        let a = game(standard(), "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        let b = game(standard(), "4k3/8/8/8/8/8/8/4K3 w - - 0 1");
        let mut view = view();
        view.set_game(Some(&a));
        view.set_game(Some(&b));
        assert_eq!(a.borrow().subscriber_count(), 0);
        assert_eq!(b.borrow().subscriber_count(), 1);
        assert_eq!(view.captured().white.len(), 15);

        view.set_game(None);
        assert_eq!(b.borrow().subscriber_count(), 0);
        assert!(view.surface().items().is_empty());
    }

    #[test]
    fn test_dropped_game_clears_view() {
        let g = game(standard(), "4k3/8/8/8/8/8/8/4K3 w - - 0 1");
        let mut view = view();
        view.set_game(Some(&g));
        assert!(!view.surface().items().is_empty());

        drop(g);
        assert!(!view.has_game());
        assert!(view.process_notifications());
        assert!(view.surface().items().is_empty());
        assert!(view.captured().is_empty());
    }

    #[test]
    fn test_cleared_board_renders_empty() {
        let g = game(standard(), "4k3/8/8/8/8/8/8/4K3 w - - 0 1");
        let mut view = view();
        view.set_game(Some(&g));
        g.borrow_mut().clear_board();
        assert!(view.process_notifications());
        assert!(view.surface().items().is_empty());
    }

    #[test]
    fn test_view_drop_unsubscribes() {
        let g = game(standard(), "4k3/8/8/8/8/8/8/4K3 w - - 0 1");
        {
            let mut view = view();
            view.set_game(Some(&g));
            assert_eq!(g.borrow().subscriber_count(), 1);
        }
        assert_eq!(g.borrow().subscriber_count(), 0);
    }
}
