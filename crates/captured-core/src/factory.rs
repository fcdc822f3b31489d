//! 開始局面ファクトリ
//!
//! 持ち駒のないバリアントでは、取られた駒を「開始局面との差分」から求めるため、
//! 同じバリアントの開始局面が必要になる。

use std::sync::LazyLock;

use crate::board::{BoardSnapshot, GridBoard, VARIANTS, Variant};

/// バリアント名から開始局面を作る
pub trait VariantFactory {
    /// 初期化済みの開始局面。未知のバリアントは `None`。
    fn create(&self, variant: &str) -> Option<Box<dyn BoardSnapshot>>;
}

/// 組み込みバリアントの開始局面（解析は初回アクセス時に1度だけ）
static STARTING_POSITIONS: LazyLock<Vec<GridBoard>> = LazyLock::new(|| {
    VARIANTS
        .iter()
        .filter_map(|variant| match GridBoard::start_position(variant) {
            Ok(board) => Some(board),
            Err(e) => {
                log::warn!("failed to build starting position for '{}': {e}", variant.name);
                None
            }
        })
        .collect()
});

/// 組み込みバリアント（[`VARIANTS`]）用のファクトリ
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinVariants;

impl BuiltinVariants {
    /// 開始局面への参照（複製しない）
    pub fn starting_position(&self, variant: &str) -> Option<&'static GridBoard> {
        let variant = Variant::by_name(variant)?;
        STARTING_POSITIONS.iter().find(|board| std::ptr::eq(board.variant_info(), variant))
    }
}

impl VariantFactory for BuiltinVariants {
    fn create(&self, variant: &str) -> Option<Box<dyn BoardSnapshot>> {
        self.starting_position(variant).map(|board| Box::new(board.clone()) as Box<dyn BoardSnapshot>)
    }
}

impl<F: VariantFactory + ?Sized> VariantFactory for &F {
    fn create(&self, variant: &str) -> Option<Box<dyn BoardSnapshot>> {
        (**self).create(variant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_variants_create() {
        let factory = BuiltinVariants;
        for variant in Variant::all() {
            let board = factory.create(variant.name).expect("starting position");
            assert_eq!(board.width(), variant.width);
            assert_eq!(board.height(), variant.height);
            assert_eq!(board.variant(), variant.name);
        }
        assert!(factory.create("xiangqi").is_none());
    }

    #[test]
    fn test_starting_position_is_memoized() {
        let a = BuiltinVariants.starting_position("standard").unwrap();
        let b = BuiltinVariants.starting_position("STANDARD").unwrap();
        assert!(std::ptr::eq(a, b));
    }
}
