//! # captured-core
//!
//! 盤上ゲームビューアの「取られた駒」表示。
//!
//! ## モジュール構成
//!
//! - `types`: 基本型（Side, PieceType, Piece）
//! - `board`: 盤面スナップショット・バリアント定義・局面文字列の解析
//! - `factory`: バリアントの開始局面
//! - `reconcile`: 盤面から取られた駒を求める（持ち駒 / 開始局面との差分）
//! - `layout`: 2行の表示配置
//! - `theme` / `config`: 配色テーマと表示設定
//! - `session`: 対局セッションと盤面変更の通知
//! - `view`: セッションを購読して描画面を作り直すビュー
//!

// 基本型と盤面
pub mod board;
pub mod types;

// 集計
pub mod factory;
pub mod reconcile;

// 表示
pub mod config;
pub mod layout;
pub mod theme;
pub mod view;

pub mod error;
pub mod session;

pub use board::{BoardSnapshot, GridBoard, Variant};
pub use config::ViewConfig;
pub use error::{Error, Result};
pub use factory::{BuiltinVariants, VariantFactory};
pub use layout::{CapturedLayout, SlotGeometry, layout_captured};
pub use reconcile::{CaptureReconciler, CapturedPieces};
pub use session::GameSession;
pub use theme::{Theme, ThemeRegistry};
pub use view::{CapturedPiecesView, DrawItem, DrawSurface, SceneSurface};
