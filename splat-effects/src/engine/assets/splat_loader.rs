//! Gaussian splat PLY decoding.
//!
//! Reads the layout written by 3DGS trainers (`x y z`, log `scale_*`,
//! logit `opacity`, SH DC `f_dc_*`) as well as plain coloured point clouds
//! (`red green blue`). ASCII and binary little-endian bodies are supported.
//! The asset loader also accepts `.spz` files, decoded in [`super::spz`].

use std::io::Read;

use bevy::asset::{AssetLoader, LoadContext, io::Reader};
use bevy::prelude::*;
use byteorder::{LittleEndian, ReadBytesExt};
use thiserror::Error;

use super::splat_cloud::{SplatCloud, SplatPoint};
use super::spz::parse_spz;

/// Zeroth-order spherical harmonic basis constant.
pub(crate) const SH_C0: f32 = 0.282_094_8;

/// Scale given to splats from files without scale properties.
const DEFAULT_SPLAT_SCALE: f32 = 0.01;

#[derive(Error, Debug)]
pub enum SplatLoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not a PLY file")]
    NotPly,

    #[error("PLY header is not terminated by end_header")]
    UnterminatedHeader,

    #[error("unsupported PLY format: {0}")]
    UnsupportedFormat(String),

    #[error("unsupported PLY property: {0}")]
    UnsupportedProperty(String),

    #[error("malformed PLY header line: {0}")]
    MalformedHeader(String),

    #[error("PLY file has no vertex element")]
    MissingVertexElement,

    #[error("vertex element is missing the {0} property")]
    MissingProperty(&'static str),

    #[error("not an SPZ stream (magic {0:#010x})")]
    NotSpz(u32),

    #[error("unsupported SPZ version {0}")]
    UnsupportedSpzVersion(u32),

    #[error("unsupported spherical harmonics degree {0}")]
    UnsupportedShDegree(u8),

    #[error("splat body truncated: needed {needed} bytes, found {found}")]
    Truncated { needed: usize, found: usize },

    #[error("invalid value {value:?} on vertex {vertex}")]
    InvalidValue { vertex: usize, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlyFormat {
    Ascii,
    BinaryLittleEndian,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScalarType {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    F32,
    F64,
}

impl ScalarType {
    fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "char" | "int8" => Self::I8,
            "uchar" | "uint8" => Self::U8,
            "short" | "int16" => Self::I16,
            "ushort" | "uint16" => Self::U16,
            "int" | "int32" => Self::I32,
            "uint" | "uint32" => Self::U32,
            "float" | "float32" => Self::F32,
            "double" | "float64" => Self::F64,
            _ => return None,
        })
    }

    fn size(self) -> usize {
        match self {
            Self::I8 | Self::U8 => 1,
            Self::I16 | Self::U16 => 2,
            Self::I32 | Self::U32 | Self::F32 => 4,
            Self::F64 => 8,
        }
    }

    fn read<R: Read>(self, reader: &mut R) -> std::io::Result<f32> {
        Ok(match self {
            Self::I8 => reader.read_i8()? as f32,
            Self::U8 => reader.read_u8()? as f32,
            Self::I16 => reader.read_i16::<LittleEndian>()? as f32,
            Self::U16 => reader.read_u16::<LittleEndian>()? as f32,
            Self::I32 => reader.read_i32::<LittleEndian>()? as f32,
            Self::U32 => reader.read_u32::<LittleEndian>()? as f32,
            Self::F32 => reader.read_f32::<LittleEndian>()?,
            Self::F64 => reader.read_f64::<LittleEndian>()? as f32,
        })
    }
}

#[derive(Debug)]
struct Element {
    name: String,
    count: usize,
    properties: Vec<(String, ScalarType)>,
}

impl Element {
    fn stride(&self) -> usize {
        self.properties.iter().map(|(_, ty)| ty.size()).sum()
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.properties.iter().position(|(n, _)| n == name)
    }
}

struct Header {
    format: PlyFormat,
    elements: Vec<Element>,
    body_offset: usize,
}

fn parse_header(bytes: &[u8]) -> Result<Header, SplatLoadError> {
    const END: &[u8] = b"end_header";
    let end = bytes
        .windows(END.len())
        .position(|w| w == END)
        .ok_or(SplatLoadError::UnterminatedHeader)?;
    let body_offset = bytes[end..]
        .iter()
        .position(|&b| b == b'\n')
        .map(|p| end + p + 1)
        .ok_or(SplatLoadError::UnterminatedHeader)?;

    let text = String::from_utf8_lossy(&bytes[..end]);
    let mut lines = text.lines().map(str::trim);
    if lines.next() != Some("ply") {
        return Err(SplatLoadError::NotPly);
    }

    let mut format = None;
    let mut elements: Vec<Element> = Vec::new();
    for line in lines {
        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts.as_slice() {
            [] | ["comment", ..] | ["obj_info", ..] => {}
            ["format", "ascii", _] => format = Some(PlyFormat::Ascii),
            ["format", "binary_little_endian", _] => format = Some(PlyFormat::BinaryLittleEndian),
            ["format", other, ..] => {
                return Err(SplatLoadError::UnsupportedFormat(other.to_string()));
            }
            ["element", name, count] => {
                let count = count
                    .parse()
                    .map_err(|_| SplatLoadError::MalformedHeader(line.to_string()))?;
                elements.push(Element {
                    name: name.to_string(),
                    count,
                    properties: Vec::new(),
                });
            }
            ["property", "list", ..] => {
                return Err(SplatLoadError::UnsupportedProperty(line.to_string()));
            }
            ["property", ty, name] => {
                let ty = ScalarType::parse(ty)
                    .ok_or_else(|| SplatLoadError::UnsupportedProperty(line.to_string()))?;
                elements
                    .last_mut()
                    .ok_or_else(|| SplatLoadError::MalformedHeader(line.to_string()))?
                    .properties
                    .push((name.to_string(), ty));
            }
            _ => return Err(SplatLoadError::MalformedHeader(line.to_string())),
        }
    }

    Ok(Header {
        format: format.ok_or_else(|| SplatLoadError::MalformedHeader("missing format".into()))?,
        elements,
        body_offset,
    })
}

/// Column positions of the properties a splat is built from.
struct VertexLayout {
    position: [usize; 3],
    scale: Option<[usize; 3]>,
    opacity: Option<usize>,
    sh_dc: Option<[usize; 3]>,
    rgb: Option<[usize; 3]>,
}

impl VertexLayout {
    fn from_element(element: &Element) -> Result<Self, SplatLoadError> {
        let triple = |a: &str, b: &str, c: &str| -> Option<[usize; 3]> {
            Some([element.index_of(a)?, element.index_of(b)?, element.index_of(c)?])
        };
        Ok(Self {
            position: triple("x", "y", "z").ok_or(SplatLoadError::MissingProperty("x/y/z"))?,
            scale: triple("scale_0", "scale_1", "scale_2"),
            opacity: element.index_of("opacity"),
            sh_dc: triple("f_dc_0", "f_dc_1", "f_dc_2"),
            rgb: triple("red", "green", "blue"),
        })
    }

    fn splat(&self, values: &[f32], index: usize) -> SplatPoint {
        let pick = |cols: [usize; 3]| Vec3::new(values[cols[0]], values[cols[1]], values[cols[2]]);

        let scales = self
            .scale
            .map(|cols| pick(cols).map(f32::exp))
            .unwrap_or(Vec3::splat(DEFAULT_SPLAT_SCALE));
        let alpha = self
            .opacity
            .map(|col| 1.0 / (1.0 + (-values[col]).exp()))
            .unwrap_or(1.0);
        let colour = match (self.sh_dc, self.rgb) {
            (Some(cols), _) => (pick(cols) * SH_C0 + 0.5).clamp(Vec3::ZERO, Vec3::ONE),
            (None, Some(cols)) => pick(cols) / 255.0,
            (None, None) => Vec3::ONE,
        };

        SplatPoint {
            center: pick(self.position),
            scales,
            rgba: [colour.x, colour.y, colour.z, alpha],
            index: index as u32,
        }
    }
}

/// Decodes a complete PLY file into its splats.
pub fn parse_ply(bytes: &[u8]) -> Result<SplatCloud, SplatLoadError> {
    let header = parse_header(bytes)?;
    let vertex_position = header
        .elements
        .iter()
        .position(|e| e.name == "vertex")
        .ok_or(SplatLoadError::MissingVertexElement)?;
    let vertex = &header.elements[vertex_position];
    let layout = VertexLayout::from_element(vertex)?;
    let body = &bytes[header.body_offset..];

    let mut values = vec![0.0f32; vertex.properties.len()];

    let splats = match header.format {
        PlyFormat::BinaryLittleEndian => {
            let skipped = header.elements[..vertex_position]
                .iter()
                .try_fold(0usize, |total, e| {
                    e.count.checked_mul(e.stride())?.checked_add(total)
                });
            let needed = skipped.and_then(|skipped| {
                vertex.count.checked_mul(vertex.stride())?.checked_add(skipped)
            });
            let (skipped, needed) = match (skipped, needed) {
                (Some(skipped), Some(needed)) if needed <= body.len() => (skipped, needed),
                _ => {
                    return Err(SplatLoadError::Truncated {
                        needed: needed.unwrap_or(usize::MAX),
                        found: body.len(),
                    });
                }
            };

            let mut rows = &body[skipped..needed];
            let mut splats = Vec::with_capacity(vertex.count);
            for i in 0..vertex.count {
                for (value, (_, ty)) in values.iter_mut().zip(&vertex.properties) {
                    *value = ty.read(&mut rows)?;
                }
                splats.push(layout.splat(&values, i));
            }
            splats
        }
        PlyFormat::Ascii => {
            let text = String::from_utf8_lossy(body);
            let skipped: usize = header.elements[..vertex_position]
                .iter()
                .map(|e| e.count)
                .fold(0, usize::saturating_add);
            let mut rows = text.lines().filter(|l| !l.trim().is_empty()).skip(skipped);

            // Every row takes at least two bytes, so the body bounds the count.
            let mut splats = Vec::with_capacity(vertex.count.min(body.len() / 2));
            for i in 0..vertex.count {
                let row = rows.next().ok_or(SplatLoadError::Truncated {
                    needed: vertex.count,
                    found: i,
                })?;
                let mut fields = row.split_whitespace();
                for value in values.iter_mut() {
                    let field = fields.next().unwrap_or_default();
                    *value = field.parse().map_err(|_| SplatLoadError::InvalidValue {
                        vertex: i,
                        value: field.to_string(),
                    })?;
                }
                splats.push(layout.splat(&values, i));
            }
            splats
        }
    };

    Ok(SplatCloud { splats })
}

/// Asset loader registering `.ply` and `.spz` splat files with the asset server.
#[derive(Default)]
pub struct SplatCloudLoader;

impl AssetLoader for SplatCloudLoader {
    type Asset = SplatCloud;
    type Settings = ();
    type Error = SplatLoadError;

    async fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &(),
        load_context: &mut LoadContext<'_>,
    ) -> Result<Self::Asset, Self::Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).await?;
        let cloud = match load_context.path().extension().and_then(|ext| ext.to_str()) {
            Some("spz") => parse_spz(&bytes)?,
            _ => parse_ply(&bytes)?,
        };
        info!(
            "Decoded {} splats from {}",
            cloud.len(),
            load_context.path().display()
        );
        Ok(cloud)
    }

    fn extensions(&self) -> &[&str] {
        &["ply", "spz"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ASCII_PLY: &str = "ply
format ascii 1.0
comment exported for tests
element vertex 2
property float x
property float y
property float z
property uchar red
property uchar green
property uchar blue
end_header
0.0 1.0 2.0 255 0 51
-1.5 0.5 3.25 0 255 0
";

    fn binary_gaussian_ply(rows: &[[f32; 11]]) -> Vec<u8> {
        let mut bytes = format!(
            "ply\nformat binary_little_endian 1.0\nelement vertex {}\n\
             property float x\nproperty float y\nproperty float z\n\
             property float scale_0\nproperty float scale_1\nproperty float scale_2\n\
             property float opacity\n\
             property float f_dc_0\nproperty float f_dc_1\nproperty float f_dc_2\n\
             property float rot_0\nend_header\n",
            rows.len()
        )
        .into_bytes();
        for row in rows {
            for value in row {
                bytes.extend_from_slice(&value.to_le_bytes());
            }
        }
        bytes
    }

    #[test]
    fn reads_ascii_coloured_points() {
        let cloud = parse_ply(ASCII_PLY.as_bytes()).unwrap();
        assert_eq!(cloud.len(), 2);

        let first = cloud.splats[0];
        assert_eq!(first.center, Vec3::new(0.0, 1.0, 2.0));
        assert_eq!(first.rgba, [1.0, 0.0, 0.2, 1.0]);
        assert_eq!(first.scales, Vec3::splat(DEFAULT_SPLAT_SCALE));
        assert_eq!(cloud.splats[1].index, 1);
    }

    #[test]
    fn reads_binary_gaussians() {
        let bytes = binary_gaussian_ply(&[
            [1.0, 2.0, 3.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0],
            [-1.0, 0.0, 0.5, -2.0, -2.0, -2.0, 10.0, 1.0, -1.0, 0.0, 1.0],
        ]);
        let cloud = parse_ply(&bytes).unwrap();
        assert_eq!(cloud.len(), 2);

        let first = cloud.splats[0];
        assert_eq!(first.center, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(first.scales, Vec3::ONE);
        assert!((first.rgba[3] - 0.5).abs() < 1e-6);
        assert!((first.rgba[0] - 0.5).abs() < 1e-6);

        let second = cloud.splats[1];
        assert!((second.scales.x - (-2.0f32).exp()).abs() < 1e-6);
        assert!(second.rgba[3] > 0.99);
        assert!(second.rgba[0] > 0.5 && second.rgba[1] < 0.5);
    }

    #[test]
    fn oversized_vertex_count_is_truncated_not_a_panic() {
        let binary = "ply\nformat binary_little_endian 1.0\nelement vertex 18446744073709551615\n\
                      property float x\nproperty float y\nproperty float z\nend_header\n";
        assert!(matches!(
            parse_ply(binary.as_bytes()),
            Err(SplatLoadError::Truncated { .. })
        ));

        let ascii = "ply\nformat ascii 1.0\nelement vertex 18446744073709551615\n\
                     property float x\nproperty float y\nproperty float z\nend_header\n0 0 0\n";
        assert!(matches!(
            parse_ply(ascii.as_bytes()),
            Err(SplatLoadError::Truncated { .. })
        ));
    }

    #[test]
    fn skips_leading_elements_in_binary_body() {
        let mut bytes = b"ply\nformat binary_little_endian 1.0\nelement camera 1\nproperty double fov\n\
                          element vertex 1\nproperty float x\nproperty float y\nproperty float z\n\
                          property short red\nproperty short green\nproperty short blue\nend_header\n"
            .to_vec();
        bytes.extend_from_slice(&1.0f64.to_le_bytes());
        for value in [4.0f32, 5.0, 6.0] {
            bytes.extend_from_slice(&value.to_le_bytes());
        }
        for value in [255i16, 0, 255] {
            bytes.extend_from_slice(&value.to_le_bytes());
        }

        let cloud = parse_ply(&bytes).unwrap();
        assert_eq!(cloud.len(), 1);
        assert_eq!(cloud.splats[0].center, Vec3::new(4.0, 5.0, 6.0));
        assert_eq!(cloud.splats[0].rgba, [1.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn loader_accepts_both_splat_formats() {
        assert_eq!(SplatCloudLoader.extensions(), ["ply", "spz"]);
    }

    #[test]
    fn truncated_binary_body_is_rejected() {
        let mut bytes = binary_gaussian_ply(&[[0.0; 11]]);
        bytes.truncate(bytes.len() - 3);
        assert!(matches!(
            parse_ply(&bytes),
            Err(SplatLoadError::Truncated { .. })
        ));
    }

    #[test]
    fn rejects_non_ply_and_big_endian() {
        assert!(matches!(
            parse_ply(b"solid cube\nend_header\n"),
            Err(SplatLoadError::NotPly)
        ));
        assert!(matches!(
            parse_ply(b"ply\nformat binary_big_endian 1.0\nend_header\n"),
            Err(SplatLoadError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn missing_position_is_an_error() {
        let ply = "ply\nformat ascii 1.0\nelement vertex 1\nproperty float x\nend_header\n1.0\n";
        assert!(matches!(
            parse_ply(ply.as_bytes()),
            Err(SplatLoadError::MissingProperty(_))
        ));
    }
}
