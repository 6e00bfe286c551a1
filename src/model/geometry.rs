use std::fmt;
use std::ops::Add;

use serde::{Deserialize, Serialize};

/// Integer block position in world space.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The four horizontal neighbours (+x, -x, +z, -z), in inspection order.
    pub fn horizontal_neighbors(self) -> [BlockPos; 4] {
        [
            self + BlockPos::new(1, 0, 0),
            self + BlockPos::new(-1, 0, 0),
            self + BlockPos::new(0, 0, 1),
            self + BlockPos::new(0, 0, -1),
        ]
    }

    /// Euclidean distance to another position.
    pub fn distance_to(self, other: BlockPos) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        let dz = f64::from(self.z) - f64::from(other.z);
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

impl Add for BlockPos {
    type Output = BlockPos;

    /// Saturates at the edges of the world.
    fn add(self, rhs: BlockPos) -> BlockPos {
        BlockPos::new(
            self.x.saturating_add(rhs.x),
            self.y.saturating_add(rhs.y),
            self.z.saturating_add(rhs.z),
        )
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Axis-aligned integer box. Both corners are inclusive.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cuboid {
    pub min: BlockPos,
    pub max: BlockPos,
}

impl Cuboid {
    /// Build a box from two arbitrary corners, normalising so `min <= max` on every axis.
    pub fn new(a: BlockPos, b: BlockPos) -> Self {
        Self {
            min: BlockPos::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: BlockPos::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Cube of half-extent `radius` centred on `center`, clipped to the i32 range.
    pub fn around(center: BlockPos, radius: i32) -> Self {
        let r = i32::try_from(radius.unsigned_abs()).unwrap_or(i32::MAX);
        Self {
            min: BlockPos::new(
                center.x.saturating_sub(r),
                center.y.saturating_sub(r),
                center.z.saturating_sub(r),
            ),
            max: BlockPos::new(
                center.x.saturating_add(r),
                center.y.saturating_add(r),
                center.z.saturating_add(r),
            ),
        }
    }

    pub fn contains(&self, pos: BlockPos) -> bool {
        pos.x >= self.min.x
            && pos.x <= self.max.x
            && pos.y >= self.min.y
            && pos.y <= self.max.y
            && pos.z >= self.min.z
            && pos.z <= self.max.z
    }

    /// True if the two boxes share at least one block.
    pub fn intersects(&self, other: &Cuboid) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }
}
