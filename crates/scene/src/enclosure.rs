use glam::Vec3;
use serde::{Deserialize, Serialize};

use boxroom_common::BoxDims;

/// The open-topped room: four walls plus a floor slab closing the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnclosureSpec {
    /// Horizontal extent along both x and z, outer wall to outer wall.
    pub extent: f32,
    pub wall_height: f32,
    pub wall_thickness: f32,
    pub restitution: f32,
}

impl Default for EnclosureSpec {
    fn default() -> Self {
        Self {
            extent: 20.0,
            wall_height: 4.0,
            wall_thickness: 1.0,
            restitution: 0.9,
        }
    }
}

/// Placement of one boundary body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallSpec {
    pub name: &'static str,
    pub center: Vec3,
    pub dims: BoxDims,
}

impl EnclosureSpec {
    /// Half of the horizontal extent; walls sit at ±this on their axis.
    pub fn half_extent(&self) -> f32 {
        self.extent * 0.5
    }

    /// The five boundaries. Wall centers sit at half height on the
    /// enclosure edge; the floor slab hangs below y = 0 so its top face
    /// closes the bottom exactly.
    pub fn walls(&self) -> [WallSpec; 5] {
        let half = self.half_extent();
        let half_h = self.wall_height * 0.5;
        let half_t = self.wall_thickness * 0.5;

        let across = BoxDims::new(half, half_h, half_t);
        let along = BoxDims::new(half_t, half_h, half);

        [
            WallSpec {
                name: "wall_north",
                center: Vec3::new(0.0, half_h, -half),
                dims: across,
            },
            WallSpec {
                name: "wall_south",
                center: Vec3::new(0.0, half_h, half),
                dims: across,
            },
            WallSpec {
                name: "wall_west",
                center: Vec3::new(-half, half_h, 0.0),
                dims: along,
            },
            WallSpec {
                name: "wall_east",
                center: Vec3::new(half, half_h, 0.0),
                dims: along,
            },
            WallSpec {
                name: "floor",
                center: Vec3::new(0.0, -half_t, 0.0),
                dims: BoxDims::new(half, half_t, half),
            },
        ]
    }

    /// Whether a point lies strictly inside the horizontal bounds and
    /// above the floor plane.
    pub fn contains(&self, point: Vec3) -> bool {
        let half = self.half_extent();
        point.x.abs() < half && point.z.abs() < half && point.y > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_walls_match_fixed_layout() {
        let walls = EnclosureSpec::default().walls();

        assert_eq!(walls[0].center, Vec3::new(0.0, 2.0, -10.0));
        assert_eq!(walls[1].center, Vec3::new(0.0, 2.0, 10.0));
        assert_eq!(walls[2].center, Vec3::new(-10.0, 2.0, 0.0));
        assert_eq!(walls[3].center, Vec3::new(10.0, 2.0, 0.0));
        assert_eq!(walls[4].center, Vec3::new(0.0, -0.5, 0.0));

        // North wall spans the full width, half a unit thick.
        assert_eq!(walls[0].dims.half_extents, Vec3::new(10.0, 2.0, 0.5));
        // Floor slab covers the whole footprint with its top face at y = 0.
        assert_eq!(walls[4].dims.half_extents, Vec3::new(10.0, 0.5, 10.0));
        let floor_top = walls[4].center.y + walls[4].dims.half_extents.y;
        assert_eq!(floor_top, 0.0);
    }

    #[test]
    fn contains_is_strict() {
        let spec = EnclosureSpec::default();
        assert!(spec.contains(Vec3::new(0.0, 1.0, 0.0)));
        assert!(spec.contains(Vec3::new(9.9, 0.1, -9.9)));
        assert!(!spec.contains(Vec3::new(10.0, 1.0, 0.0)));
        assert!(!spec.contains(Vec3::new(0.0, 0.0, 0.0)));
        assert!(!spec.contains(Vec3::new(0.0, -1.0, 0.0)));
    }
}
