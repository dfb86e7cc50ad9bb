use serde::{Deserialize, Serialize};
use std::fmt;

/// Where on the playfield a trajectory endpoint lies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPointKind {
    #[default]
    Invalid,
    Center,
    WallTop,
    WallBottom,
    PaddleLeft,
    PaddleRight,
}

impl CollisionPointKind {
    pub fn is_wall(self) -> bool {
        matches!(self, CollisionPointKind::WallTop | CollisionPointKind::WallBottom)
    }

    pub fn is_paddle(self) -> bool {
        matches!(
            self,
            CollisionPointKind::PaddleLeft | CollisionPointKind::PaddleRight
        )
    }

    // Kinds a segment may legally start from.
    pub fn is_valid_start(self) -> bool {
        self == CollisionPointKind::Center || self.is_wall() || self.is_paddle()
    }

    // Kinds a segment may legally end at.
    pub fn is_valid_end(self) -> bool {
        self.is_wall() || self.is_paddle()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CollisionPointKind::Invalid => "INVALID",
            CollisionPointKind::Center => "CENTER",
            CollisionPointKind::WallTop => "WALL_TOP",
            CollisionPointKind::WallBottom => "WALL_BOTTOM",
            CollisionPointKind::PaddleLeft => "PADDLE_LEFT",
            CollisionPointKind::PaddleRight => "PADDLE_RIGHT",
        }
    }
}

impl fmt::Display for CollisionPointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
