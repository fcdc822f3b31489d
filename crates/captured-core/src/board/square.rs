//! 升（Square）

use serde::{Deserialize, Serialize};

/// 盤上の升。`x` は局面文字列の左から、`y` は上から数えた 0 始まりの座標。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square {
    pub x: usize,
    pub y: usize,
}

impl Square {
    #[inline]
    pub const fn new(x: usize, y: usize) -> Square {
        Square { x, y }
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
