//! SPZ decoding.
//!
//! An SPZ file is a gzip stream holding a 16-byte header followed by every
//! attribute stored column by column: 24-bit fixed-point positions, then
//! alphas, colours, log scales, rotations and higher-order SH. Rotations and
//! SH bands above DC are not needed by the effects and are skipped.

use std::io::Read;

use bevy::prelude::*;
use byteorder::{LittleEndian, ReadBytesExt};
use flate2::read::GzDecoder;

use super::splat_cloud::{SplatCloud, SplatPoint};
use super::splat_loader::{SH_C0, SplatLoadError};

/// `NGSP` read as a little-endian u32.
const SPZ_MAGIC: u32 = 0x5053_474e;

/// Colours are SH DC coefficients scaled into a byte around 0.5.
const COLOUR_SCALE: f32 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SpzHeader {
    version: u32,
    count: usize,
    sh_degree: u8,
    fractional_bits: u8,
}

impl SpzHeader {
    fn read<R: Read>(reader: &mut R) -> Result<Self, SplatLoadError> {
        let magic = reader.read_u32::<LittleEndian>()?;
        if magic != SPZ_MAGIC {
            return Err(SplatLoadError::NotSpz(magic));
        }
        let version = reader.read_u32::<LittleEndian>()?;
        if !(2..=3).contains(&version) {
            return Err(SplatLoadError::UnsupportedSpzVersion(version));
        }
        let count = reader.read_u32::<LittleEndian>()? as usize;
        let sh_degree = reader.read_u8()?;
        let fractional_bits = reader.read_u8()?;
        let _flags = reader.read_u8()?;
        let _reserved = reader.read_u8()?;

        Ok(Self {
            version,
            count,
            sh_degree,
            fractional_bits,
        })
    }

    /// Bytes per splat for the columns after the header.
    fn bytes_per_splat(&self) -> Result<usize, SplatLoadError> {
        let sh_coefficients = match self.sh_degree {
            0 => 0,
            1 => 3,
            2 => 8,
            3 => 15,
            other => return Err(SplatLoadError::UnsupportedShDegree(other)),
        };
        // Version 3 stores rotations as smallest-three in 4 bytes.
        let rotation = if self.version >= 3 { 4 } else { 3 };
        Ok(9 + 1 + 3 + 3 + rotation + sh_coefficients * 3)
    }
}

/// Decodes a gzip-compressed SPZ file into its splats.
pub fn parse_spz(compressed: &[u8]) -> Result<SplatCloud, SplatLoadError> {
    let mut bytes = Vec::new();
    GzDecoder::new(compressed).read_to_end(&mut bytes)?;

    let mut reader = bytes.as_slice();
    let header = SpzHeader::read(&mut reader)?;
    let count = header.count;

    let needed = count.checked_mul(header.bytes_per_splat()?);
    if needed.is_none_or(|needed| needed > reader.len()) {
        return Err(SplatLoadError::Truncated {
            needed: needed.unwrap_or(usize::MAX),
            found: reader.len(),
        });
    }

    let (mut positions, rest) = reader.split_at(count * 9);
    let (alphas, rest) = rest.split_at(count);
    let (colours, rest) = rest.split_at(count * 3);
    let scales = &rest[..count * 3];

    let position_scale = 1.0 / (1u32 << header.fractional_bits.min(24)) as f32;
    let mut splats = Vec::with_capacity(count);
    for i in 0..count {
        let center = Vec3::new(
            positions.read_i24::<LittleEndian>()? as f32,
            positions.read_i24::<LittleEndian>()? as f32,
            positions.read_i24::<LittleEndian>()? as f32,
        ) * position_scale;

        let column = |data: &[u8]| {
            Vec3::new(data[i * 3] as f32, data[i * 3 + 1] as f32, data[i * 3 + 2] as f32)
        };
        let sh_dc = (column(colours) / 255.0 - 0.5) / COLOUR_SCALE;
        let colour = (sh_dc * SH_C0 + 0.5).clamp(Vec3::ZERO, Vec3::ONE);
        let log_scales = column(scales) / 16.0 - 10.0;

        splats.push(SplatPoint {
            center,
            scales: log_scales.map(f32::exp),
            rgba: [colour.x, colour.y, colour.z, alphas[i] as f32 / 255.0],
            index: i as u32,
        });
    }

    Ok(SplatCloud { splats })
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;

    struct RawSplat {
        position: [i32; 3],
        alpha: u8,
        colour: [u8; 3],
        scale: [u8; 3],
    }

    fn encode(version: u32, declared_count: u32, fractional_bits: u8, splats: &[RawSplat]) -> Vec<u8> {
        let mut raw = Vec::new();
        raw.extend_from_slice(&SPZ_MAGIC.to_le_bytes());
        raw.extend_from_slice(&version.to_le_bytes());
        raw.extend_from_slice(&declared_count.to_le_bytes());
        raw.extend_from_slice(&[0, fractional_bits, 0, 0]);
        for splat in splats {
            for value in splat.position {
                raw.extend_from_slice(&value.to_le_bytes()[..3]);
            }
        }
        raw.extend(splats.iter().map(|s| s.alpha));
        raw.extend(splats.iter().flat_map(|s| s.colour));
        raw.extend(splats.iter().flat_map(|s| s.scale));
        let rotation_bytes = if version >= 3 { 4 } else { 3 };
        raw.extend(std::iter::repeat_n(0u8, splats.len() * rotation_bytes));

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&raw).unwrap();
        encoder.finish().unwrap()
    }

    fn splats() -> Vec<RawSplat> {
        vec![
            RawSplat {
                position: [4096, -2048, 0],
                alpha: 255,
                colour: [128, 255, 0],
                scale: [160, 160, 160],
            },
            RawSplat {
                position: [-4096, 1, 8192],
                alpha: 0,
                colour: [0, 0, 0],
                scale: [0, 16, 32],
            },
        ]
    }

    #[test]
    fn decodes_quantized_columns() {
        let cloud = parse_spz(&encode(2, 2, 12, &splats())).unwrap();
        assert_eq!(cloud.len(), 2);

        let first = cloud.splats[0];
        assert_eq!(first.center, Vec3::new(1.0, -0.5, 0.0));
        assert_eq!(first.rgba[3], 1.0);
        assert!((first.scales.x - 1.0).abs() < 1e-6);
        assert!((first.rgba[0] - 0.5).abs() < 0.01);
        assert!(first.rgba[1] > 0.9);
        assert!(first.rgba[2] < 0.1);

        let second = cloud.splats[1];
        assert_eq!(second.center.x, -1.0);
        assert_eq!(second.center.z, 2.0);
        assert_eq!(second.rgba[3], 0.0);
        assert_eq!(second.index, 1);
        assert!((second.scales.x - (-10.0f32).exp()).abs() < 1e-9);
        assert!((second.scales.y - (-9.0f32).exp()).abs() < 1e-8);
    }

    #[test]
    fn version_three_uses_four_byte_rotations() {
        let cloud = parse_spz(&encode(3, 2, 12, &splats())).unwrap();
        assert_eq!(cloud.len(), 2);
        assert_eq!(cloud.splats[1].center.z, 2.0);
    }

    #[test]
    fn oversized_count_is_truncated() {
        assert!(matches!(
            parse_spz(&encode(2, u32::MAX, 12, &splats())),
            Err(SplatLoadError::Truncated { .. })
        ));
    }

    #[test]
    fn rejects_foreign_streams() {
        assert!(matches!(
            parse_spz(b"ply\nformat ascii 1.0\n"),
            Err(SplatLoadError::Io(_))
        ));

        let bytes = {
            let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(&[0u8; 16]).unwrap();
            encoder.finish().unwrap()
        };
        assert!(matches!(parse_spz(&bytes), Err(SplatLoadError::NotSpz(0))));

        assert!(matches!(
            parse_spz(&encode(1, 2, 12, &splats())),
            Err(SplatLoadError::UnsupportedSpzVersion(1))
        ));
    }
}
