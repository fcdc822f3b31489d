//! 対局セッション
//!
//! 盤面を持ち、盤面が変わるたびに購読者へ通知する。通知は `mpsc` チャネルで送り、
//! 受け手（UI スレッド）は都合のよいときにまとめて取り出す。

use std::sync::mpsc::{self, Receiver, Sender};

use crate::board::{BoardEdit, EditError, GridBoard, PositionError, Variant, parse_edit};
use crate::error::Error;
use crate::types::Piece;

/// 盤面変更の通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    /// 1手指された
    MoveMade { edit: BoardEdit, captured: Option<Piece> },
    /// 局面文字列から読み直された
    PositionChanged { position: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// 購読ハンドル
#[derive(Debug)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub events: Receiver<BoardEvent>,
}

/// 対局セッション
#[derive(Debug)]
pub struct GameSession {
    board: Option<GridBoard>,
    subscribers: Vec<(SubscriptionId, Sender<BoardEvent>)>,
    next_id: u64,
}

impl GameSession {
    pub fn new(board: Option<GridBoard>) -> GameSession {
        GameSession { board, subscribers: Vec::new(), next_id: 0 }
    }

    /// バリアントの開始局面で始める
    pub fn start(variant: &'static Variant) -> Result<GameSession, PositionError> {
        Ok(GameSession::new(Some(GridBoard::start_position(variant)?)))
    }

    /// 局面文字列と指し手列から対局を再現する
    ///
    /// `position` が `None` なら開始局面から。指し手は合法性を検査せずに順に適用する。
    pub fn replay<I>(variant: &str, position: Option<&str>, moves: I) -> crate::Result<GameSession>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let variant = Variant::by_name(variant).ok_or_else(|| Error::UnknownVariant(variant.to_string()))?;
        let board = match position {
            Some(text) => GridBoard::from_position(variant, text)?,
            None => GridBoard::start_position(variant)?,
        };
        let mut session = GameSession::new(Some(board));
        for (i, text) in moves.into_iter().enumerate() {
            let edit = parse_edit(variant, text.as_ref())?;
            let captured = session.apply_edit(edit)?;
            log::debug!("replay: #{} {} captured={captured:?}", i + 1, text.as_ref());
        }
        Ok(session)
    }

    pub fn board(&self) -> Option<&GridBoard> {
        self.board.as_ref()
    }

    pub fn subscribe(&mut self) -> Subscription {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        let (tx, rx) = mpsc::channel();
        self.subscribers.push((id, tx));
        log::trace!("session: subscribe {id:?}");
        Subscription { id, events: rx }
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscribers.retain(|(sid, _)| *sid != id);
        log::trace!("session: unsubscribe {id:?}");
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// 局面を読み直す（同じバリアントのまま）
    pub fn set_position(&mut self, variant: &'static Variant, text: &str) -> Result<(), PositionError> {
        self.board = Some(GridBoard::from_position(variant, text)?);
        self.emit(BoardEvent::PositionChanged { position: text.to_string() });
        Ok(())
    }

    /// 1手を適用する。盤面がなければ何もしない。
    pub fn apply_edit(&mut self, edit: BoardEdit) -> Result<Option<Piece>, EditError> {
        let Some(board) = self.board.as_mut() else {
            return Ok(None);
        };
        let captured = board.apply(&edit)?;
        self.emit(BoardEvent::MoveMade { edit, captured });
        Ok(captured)
    }

    /// 盤面を外す（「盤面なし」の状態にする）
    pub fn clear_board(&mut self) {
        self.board = None;
        self.emit(BoardEvent::PositionChanged { position: String::new() });
    }

    fn emit(&mut self, event: BoardEvent) {
        // 受け手が破棄された購読は捨てる
        self.subscribers.retain(|(_, tx)| tx.send(event.clone()).is_ok());
    }
}
