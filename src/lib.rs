use std::fmt;
use std::path::{Path, PathBuf};

/// The six cube faces, ordered the way cubemap targets expect them
/// (+X, -X, +Y, -Y, +Z, -Z).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Face {
    Right,
    Left,
    Top,
    Bottom,
    Front,
    Back,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Right,
        Face::Left,
        Face::Top,
        Face::Bottom,
        Face::Front,
        Face::Back,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Face::Right => "right",
            Face::Left => "left",
            Face::Top => "top",
            Face::Bottom => "bottom",
            Face::Front => "front",
            Face::Back => "back",
        }
    }

    // Grid cell (column, row) of this face in the 4x3 horizontal cross.
    fn cell(self) -> (u32, u32) {
        match self {
            Face::Right => (2, 1),
            Face::Left => (0, 1),
            Face::Top => (1, 0),
            Face::Bottom => (1, 2),
            Face::Front => (1, 1),
            Face::Back => (3, 1),
        }
    }

    pub fn rect(self, tile: u32) -> FaceRect {
        let (column, row) = self.cell();

        FaceRect {
            left: column * tile,
            top: row * tile,
            right: (column + 1) * tile,
            bottom: (row + 1) * tile,
        }
    }
}

/// Crop rectangle in source-image pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceRect {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl FaceRect {
    pub fn width(self) -> u32 {
        self.right - self.left
    }

    pub fn height(self) -> u32 {
        self.bottom - self.top
    }
}

/// Side length of one face, from the composite image width.
pub fn tile_size(width: u32) -> u32 {
    width / 4
}

#[derive(Debug)]
pub enum SplitError {
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
    Geometry {
        width: u32,
        height: u32,
    },
    Write {
        path: PathBuf,
        source: image::ImageError,
    },
}

impl fmt::Display for SplitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitError::Decode { path, source } => {
                write!(f, "failed to decode {}: {}", path.display(), source)
            }
            SplitError::Geometry { width, height } => {
                write!(f, "{}x{} is too small for a 4x3 cubemap cross", width, height)
            }
            SplitError::Write { path, source } => {
                write!(f, "failed to write {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for SplitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SplitError::Decode { source, .. } | SplitError::Write { source, .. } => Some(source),
            SplitError::Geometry { .. } => None,
        }
    }
}

/// Splits a 4x3 horizontal-cross cubemap image into six square face
/// images named `right`, `left`, `top`, `bottom`, `front` and `back`,
/// written as `<face>.<extension>` under `output_dir`.
///
/// Returns the written paths in face order. The first failure aborts;
/// faces already written stay on disk.
pub fn split_cubemap(
    source: &Path,
    output_dir: &Path,
    extension: &str,
) -> Result<Vec<PathBuf>, SplitError> {
    let image = image::open(source)
        .map_err(|err| SplitError::Decode {
            path: source.to_owned(),
            source: err,
        })?
        // The default output format is jpeg, which can't encode alpha.
        .into_rgb8();

    let (width, height) = image.dimensions();
    let tile = tile_size(width);

    if width % 4 != 0 {
        log::warn!(
            "width {} is not divisible by 4, ignoring the {} rightmost pixel column(s)",
            width,
            width - tile * 4
        );
    }

    if tile == 0 || height < tile * 3 {
        return Err(SplitError::Geometry { width, height });
    }

    let mut written = Vec::with_capacity(Face::ALL.len());

    for face in Face::ALL {
        let rect = face.rect(tile);
        let path = output_dir.join(format!("{}.{}", face.name(), extension));

        image::imageops::crop_imm(&image, rect.left, rect.top, rect.width(), rect.height())
            .to_image()
            .save(&path)
            .map_err(|err| SplitError::Write {
                path: path.clone(),
                source: err,
            })?;

        log::info!("wrote {} ({}x{})", path.display(), rect.width(), rect.height());

        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_size_floors() {
        assert_eq!(tile_size(512), 128);
        assert_eq!(tile_size(513), 128);
        assert_eq!(tile_size(3), 0);
    }

    #[test]
    fn rects_are_square_and_inside_the_cross() {
        for face in Face::ALL {
            let rect = face.rect(128);

            assert_eq!(rect.width(), 128, "{}", face.name());
            assert_eq!(rect.height(), 128, "{}", face.name());
            assert!(rect.right <= 4 * 128);
            assert!(rect.bottom <= 3 * 128);
        }
    }

    #[test]
    fn rects_do_not_overlap() {
        for (i, a) in Face::ALL.iter().enumerate() {
            for b in &Face::ALL[i + 1..] {
                let ra = a.rect(64);
                let rb = b.rect(64);

                let disjoint = ra.right <= rb.left
                    || rb.right <= ra.left
                    || ra.bottom <= rb.top
                    || rb.bottom <= ra.top;
                assert!(disjoint, "{} overlaps {}", a.name(), b.name());
            }
        }
    }

    #[test]
    fn rects_match_the_layout_table() {
        assert_eq!(
            Face::Right.rect(128),
            FaceRect {
                left: 256,
                top: 128,
                right: 384,
                bottom: 256
            }
        );
        assert_eq!(
            Face::Top.rect(128),
            FaceRect {
                left: 128,
                top: 0,
                right: 256,
                bottom: 128
            }
        );
        assert_eq!(
            Face::Back.rect(128),
            FaceRect {
                left: 384,
                top: 128,
                right: 512,
                bottom: 256
            }
        );
    }
}
