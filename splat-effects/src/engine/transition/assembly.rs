use bevy::prelude::*;

use super::hash::{hash3, tumble};
use super::{ObjectRole, SplatModifier, SplatPose, TransitionHalf, TransitionState};
use crate::engine::assets::splat_cloud::SplatPoint;

/// Splits each object into cubic grid cells which fly apart to hashed
/// scatter points and tumble while the next object flies in.
#[derive(Debug, Clone, Copy)]
pub struct AssemblyModifier {
    pub state: TransitionState,
    pub object_index: usize,
    pub grid_size: f32,
    pub scatter_radius: f32,
    pub object_rotation: Quat,
}

/// Cell a splat falls in and the shared scatter target for that cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell {
    pub hash: Vec3,
    pub center: Vec3,
    pub scatter: Vec3,
}

impl AssemblyModifier {
    /// Scatter depends only on the cell, so every object sharing a cell
    /// passes through the same point.
    pub fn cell_of(&self, position: Vec3) -> GridCell {
        let index = (position / self.grid_size).floor();
        let hash = hash3(index);
        let center = index * self.grid_size + Vec3::splat(self.grid_size * 0.5);
        let offset = (hash - 0.5) * self.scatter_radius * 2.0;
        GridCell {
            hash,
            center,
            scatter: center + self.object_rotation * offset,
        }
    }
}

impl SplatModifier for AssemblyModifier {
    fn modify(&self, splat: &SplatPoint) -> SplatPose {
        let rest = splat.center;
        let scales = splat.scales;
        let role = self.state.role_of(self.object_index);
        if role == ObjectRole::Idle {
            return SplatPose::hidden_at(rest, scales);
        }

        let cell = self.cell_of(rest);
        let cell_local = rest - cell.center;
        let spin = cell.hash.length() * 2.0;
        let ease = self.state.eased_half_progress();
        let half = self.state.half();

        match (role, self.state.in_transition, half) {
            (ObjectRole::Current, false, _) => SplatPose::rest(splat),
            (ObjectRole::Current, true, TransitionHalf::Disassembly) => {
                let tumbled = tumble(cell_local, ease * spin);
                SplatPose {
                    center: rest.lerp(cell.scatter + tumbled, ease),
                    scales,
                    opacity: 1.0 - ease,
                }
            }
            (ObjectRole::Next, true, TransitionHalf::Reassembly) => {
                let tumbled = tumble(cell_local, (1.0 - ease) * spin);
                SplatPose {
                    center: (cell.scatter + tumbled).lerp(rest, ease),
                    scales,
                    opacity: ease,
                }
            }
            _ => SplatPose::hidden_at(cell.scatter, scales),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::transition::TransitionTimeline;

    fn splat(center: Vec3) -> SplatPoint {
        SplatPoint {
            center,
            scales: Vec3::splat(0.02),
            rgba: [0.8, 0.4, 0.2, 0.9],
            index: 0,
        }
    }

    fn modifier_at(t: f32, object_index: usize) -> AssemblyModifier {
        let timeline = TransitionTimeline::new(2.0, 4.0, 2).unwrap();
        AssemblyModifier {
            state: timeline.state_at(t),
            object_index,
            grid_size: 0.75,
            scatter_radius: 3.0,
            object_rotation: Quat::IDENTITY,
        }
    }

    #[test]
    fn first_object_starts_assembled() {
        let point = splat(Vec3::new(0.4, 1.2, -0.3));
        let modifier = modifier_at(0.0, 0);
        assert_eq!(modifier.state.current, 0);

        let pose = modifier.modify(&point);
        assert_eq!(pose.opacity, 1.0);
        assert_eq!(pose.center, point.center);
        assert_eq!(pose.scales, point.scales);
        assert_eq!(pose.rgba(&point)[3], 0.9);
    }

    #[test]
    fn next_object_waits_hidden_at_scatter() {
        let point = splat(Vec3::new(0.4, 1.2, -0.3));
        let modifier = modifier_at(0.0, 1);
        let pose = modifier.modify(&point);
        assert_eq!(pose.opacity, 0.0);
        assert_eq!(pose.center, modifier.cell_of(point.center).scatter);
    }

    #[test]
    fn current_object_reaches_scatter_at_half_way() {
        let point = splat(Vec3::new(0.4, 1.2, -0.3));
        let modifier = modifier_at(3.999, 0);
        let pose = modifier.modify(&point);
        let cell = modifier.cell_of(point.center);
        assert!(pose.opacity < 1e-3);
        // Tumbled cell-local offset is at most half the cell diagonal.
        assert!(pose.center.distance(cell.scatter) < 0.75 * 3f32.sqrt() * 0.5 + 1e-3);
    }

    #[test]
    fn next_object_lands_on_rest_pose() {
        let point = splat(Vec3::new(-1.1, 0.2, 2.5));
        let modifier = modifier_at(5.99999, 1);
        let pose = modifier.modify(&point);
        assert!(pose.opacity > 0.999);
        assert!(pose.center.distance(point.center) < 1e-3);
    }

    #[test]
    fn objects_share_scatter_points_per_cell() {
        let a = modifier_at(1.0, 0).cell_of(Vec3::new(0.1, 0.1, 0.1));
        let b = modifier_at(1.0, 1).cell_of(Vec3::new(0.7, 0.6, 0.5));
        assert_eq!(a.scatter, b.scatter);
    }

    #[test]
    fn idle_objects_are_invisible_in_place() {
        let timeline = TransitionTimeline::new(2.0, 4.0, 3).unwrap();
        let modifier = AssemblyModifier {
            state: timeline.state_at(0.5),
            object_index: 2,
            grid_size: 0.75,
            scatter_radius: 3.0,
            object_rotation: Quat::IDENTITY,
        };
        let point = splat(Vec3::ONE);
        let pose = modifier.modify(&point);
        assert_eq!(pose.opacity, 0.0);
        assert_eq!(pose.center, point.center);
    }

    #[test]
    fn object_rotation_turns_scatter_about_cell_center() {
        let mut modifier = modifier_at(0.0, 0);
        let plain = modifier.cell_of(Vec3::new(0.2, 0.3, 0.4));
        modifier.object_rotation = Quat::from_rotation_y(1.0);
        let turned = modifier.cell_of(Vec3::new(0.2, 0.3, 0.4));
        assert_eq!(plain.center, turned.center);
        assert!(
            (plain.scatter.distance(plain.center) - turned.scatter.distance(turned.center)).abs()
                < 1e-5
        );
    }
}
