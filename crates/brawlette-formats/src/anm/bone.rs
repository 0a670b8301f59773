//! Bone decoding: transform matrices, offsets, opacity.

use super::error::{AnmError, AnmResult};
use crate::stream::ByteCursor;

/// 2-D offset vector, lower precision than frame points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
}

impl Vec2 {
    pub(crate) fn parse(cur: &mut ByteCursor<'_>) -> AnmResult<Self> {
        Ok(Self {
            x: cur.read_f32()?,
            y: cur.read_f32()?,
        })
    }

    pub(crate) fn write(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.x.to_le_bytes());
        out.extend_from_slice(&self.y.to_le_bytes());
    }
}

/// Scale/skew transform of a bone.
///
/// The wire form is flag-compressed: a default/identity matrix costs two
/// flag bytes and no floats, a symmetric matrix (Y mirrors X) costs two
/// floats, the general case four.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformMatrix {
    /// X scale
    pub scale_x: f32,
    /// Y scale
    pub scale_y: f32,
    /// First rotational skew
    pub rotate_skew0: f32,
    /// Second rotational skew
    pub rotate_skew1: f32,
}

impl TransformMatrix {
    /// The identity transform: unit scale, no skew.
    pub const IDENTITY: Self = Self {
        scale_x: 1.0,
        scale_y: 1.0,
        rotate_skew0: 0.0,
        rotate_skew1: 0.0,
    };

    pub(crate) fn parse(cur: &mut ByteCursor<'_>) -> AnmResult<Self> {
        let mut identity = false;
        let mut symmetric = false;
        if cur.read_bool()? {
            if cur.read_bool()? {
                identity = true;
            } else {
                symmetric = true;
            }
        }
        if identity {
            return Ok(Self::IDENTITY);
        }

        let scale_x = cur.read_f32()?;
        let rotate_skew0 = cur.read_f32()?;
        if symmetric {
            // Y mirrors X: skews equal, scales negated.
            Ok(Self {
                scale_x,
                scale_y: -scale_x,
                rotate_skew0,
                rotate_skew1: rotate_skew0,
            })
        } else {
            Ok(Self {
                scale_x,
                rotate_skew0,
                rotate_skew1: cur.read_f32()?,
                scale_y: cur.read_f32()?,
            })
        }
    }

    pub(crate) fn write(self, out: &mut Vec<u8>) {
        if self == Self::IDENTITY {
            out.extend_from_slice(&[1, 1]);
        } else if self.rotate_skew1 == self.rotate_skew0 && self.scale_y == -self.scale_x {
            out.extend_from_slice(&[1, 0]);
            out.extend_from_slice(&self.scale_x.to_le_bytes());
            out.extend_from_slice(&self.rotate_skew0.to_le_bytes());
        } else {
            out.push(0);
            out.extend_from_slice(&self.scale_x.to_le_bytes());
            out.extend_from_slice(&self.rotate_skew0.to_le_bytes());
            out.extend_from_slice(&self.rotate_skew1.to_le_bytes());
            out.extend_from_slice(&self.scale_y.to_le_bytes());
        }
    }
}

impl Default for TransformMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Optional six-value affine transform attached to a bone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineMatrix {
    /// Matrix component a
    pub a: f32,
    /// Matrix component b
    pub b: f32,
    /// Matrix component c
    pub c: f32,
    /// Matrix component d
    pub d: f32,
    /// X translation
    pub tx: f32,
    /// Y translation
    pub ty: f32,
}

impl AffineMatrix {
    pub(crate) fn parse(cur: &mut ByteCursor<'_>) -> AnmResult<Self> {
        Ok(Self {
            a: cur.read_f32()?,
            b: cur.read_f32()?,
            c: cur.read_f32()?,
            d: cur.read_f32()?,
            tx: cur.read_f32()?,
            ty: cur.read_f32()?,
        })
    }

    pub(crate) fn write(self, out: &mut Vec<u8>) {
        for value in [self.a, self.b, self.c, self.d, self.tx, self.ty] {
            out.extend_from_slice(&value.to_le_bytes());
        }
    }
}

/// One bone of one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct AnmBone {
    /// Bone identifier
    pub id: u16,
    /// 2-D offset
    pub offset: Vec2,
    /// Scale/skew transform
    pub transform: TransformMatrix,
    /// Attached movie-clip frame index
    pub movie_clip_frame: i16,
    /// Affine transform, absent unless explicitly flagged
    pub affine: Option<AffineMatrix>,
    /// Opacity in [0, 1]
    pub opacity: f64,
}

impl AnmBone {
    /// Decode a fully-specified bone (the non-delta wire form).
    pub(crate) fn parse(cur: &mut ByteCursor<'_>) -> AnmResult<Self> {
        let id = cur.read_u16()?;
        let opaque = cur.read_bool()?;
        let transform =
            TransformMatrix::parse(cur).map_err(AnmError::element("transform matrix"))?;
        let offset = Vec2::parse(cur).map_err(AnmError::element("offset"))?;
        let movie_clip_frame = cur.read_i16()?;
        let opacity = if opaque {
            1.0
        } else {
            f64::from(cur.read_u8()?) / 255.0
        };
        let affine = if cur.read_bool()? {
            Some(AffineMatrix::parse(cur).map_err(AnmError::element("affine matrix"))?)
        } else {
            None
        };

        Ok(Self {
            id,
            offset,
            transform,
            movie_clip_frame,
            affine,
            opacity,
        })
    }

    /// Encode in the fully-specified wire form.
    pub(crate) fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.id.to_le_bytes());
        let opaque = self.opacity == 1.0;
        out.push(u8::from(opaque));
        self.transform.write(out);
        self.offset.write(out);
        out.extend_from_slice(&self.movie_clip_frame.to_le_bytes());
        if !opaque {
            out.push((self.opacity * 255.0).round() as u8);
        }
        match self.affine {
            Some(affine) => {
                out.push(1);
                affine.write(out);
            }
            None => out.push(0),
        }
    }
}
