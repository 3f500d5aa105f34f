//! Catalogue of the splat effects and their scene setup.

use std::f32::consts::PI;
use std::str::FromStr;

use bevy::prelude::*;
use constants::camera::{
    ASSEMBLY_CAMERA_POSITION, BASELINE_LOOK_AT, MORPH_CAMERA_POSITION,
};
use constants::render_settings::SPLAT_OBJECT_SCALE;
use thiserror::Error;

/// Live-tweakable effect parameters.
pub mod parameters;

use parameters::EffectParameters;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EffectKind {
    /// Objects break into grid cells and reassemble as the next object.
    #[default]
    Assembly,
    /// Objects shrink into a flattened cloud and regrow as the next object.
    Morph,
    /// A single scene whose grid cells separate away from the free-look camera.
    InteractiveAssembly,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown effect {0:?}, expected one of: assembly, morph, interactive-assembly")]
pub struct UnknownEffect(pub String);

impl FromStr for EffectKind {
    type Err = UnknownEffect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "assembly" => Ok(Self::Assembly),
            "morph" => Ok(Self::Morph),
            "interactive-assembly" | "interactive_assembly" | "interactive" => {
                Ok(Self::InteractiveAssembly)
            }
            _ => Err(UnknownEffect(s.to_string())),
        }
    }
}

/// How the camera is driven for an effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraRig {
    /// Circles the objects while the rotation toggle is on.
    Orbit,
    /// Stays at its baseline pose.
    Fixed,
    /// Pointer look and WASD movement.
    FreeLook,
}

impl EffectKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Assembly => "assembly",
            Self::Morph => "morph",
            Self::InteractiveAssembly => "interactive-assembly",
        }
    }

    /// Splat files cycled through, in object index order.
    pub fn splat_files(self) -> &'static [&'static str] {
        match self {
            Self::Assembly => &["penguin.spz", "cat.spz"],
            Self::Morph => &["branzino-amarin.spz", "pad-thai.spz", "primerib-tamos.spz"],
            Self::InteractiveAssembly => &["painted-bedroom.spz"],
        }
    }

    pub fn camera_rig(self) -> CameraRig {
        match self {
            Self::Assembly => CameraRig::Orbit,
            Self::Morph => CameraRig::Fixed,
            Self::InteractiveAssembly => CameraRig::FreeLook,
        }
    }

    pub fn camera_start(self) -> Transform {
        match self {
            Self::Assembly => {
                Transform::from_translation(ASSEMBLY_CAMERA_POSITION).looking_at(BASELINE_LOOK_AT, Vec3::Y)
            }
            Self::Morph => {
                Transform::from_translation(MORPH_CAMERA_POSITION).looking_at(BASELINE_LOOK_AT, Vec3::Y)
            }
            Self::InteractiveAssembly => Transform::IDENTITY,
        }
    }

    /// Placement of every splat object. Splat files are authored upside
    /// down, so each object is flipped about X.
    pub fn object_placement(self) -> Transform {
        let flip = Quat::from_rotation_x(PI);
        match self {
            Self::Assembly => Transform::from_xyz(0.0, -3.5, 0.0)
                .with_rotation(flip)
                .with_scale(Vec3::splat(SPLAT_OBJECT_SCALE)),
            Self::Morph => Transform::from_rotation(flip).with_scale(Vec3::splat(SPLAT_OBJECT_SCALE)),
            Self::InteractiveAssembly => Transform::from_rotation(flip),
        }
    }

    pub fn default_parameters(self) -> EffectParameters {
        match self {
            Self::Assembly => EffectParameters::assembly(),
            Self::Morph => EffectParameters::morph(),
            Self::InteractiveAssembly => EffectParameters::interactive_assembly(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_effect_names() {
        assert_eq!("assembly".parse(), Ok(EffectKind::Assembly));
        assert_eq!(" Morph ".parse(), Ok(EffectKind::Morph));
        assert_eq!(
            "interactive-assembly".parse(),
            Ok(EffectKind::InteractiveAssembly)
        );
        assert_eq!(
            "sparkle".parse::<EffectKind>(),
            Err(UnknownEffect("sparkle".to_string()))
        );
    }

    #[test]
    fn names_round_trip() {
        for kind in [
            EffectKind::Assembly,
            EffectKind::Morph,
            EffectKind::InteractiveAssembly,
        ] {
            assert_eq!(kind.name().parse(), Ok(kind));
            assert!(!kind.splat_files().is_empty());
        }
    }

    #[test]
    fn splat_files_match_manifest_keys() {
        assert_eq!(EffectKind::Assembly.splat_files(), ["penguin.spz", "cat.spz"]);
        assert_eq!(
            EffectKind::InteractiveAssembly.splat_files(),
            ["painted-bedroom.spz"]
        );
        assert!(
            EffectKind::Morph
                .splat_files()
                .iter()
                .all(|name| name.ends_with(".spz"))
        );
    }

    #[test]
    fn objects_are_flipped_upright() {
        let placement = EffectKind::Morph.object_placement();
        let up = placement.rotation * Vec3::Y;
        assert!((up - Vec3::NEG_Y).length() < 1e-5);
        assert_eq!(placement.scale, Vec3::splat(1.5));
    }
}
