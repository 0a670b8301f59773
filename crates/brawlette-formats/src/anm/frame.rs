//! Frame decoding, including the delta-bone form.

use super::bone::AnmBone;
use super::error::{AnmError, AnmResult};
use crate::stream::ByteCursor;

/// 2-D point in double precision.
///
/// The wire form starts with a flag byte; when it is zero the point is
/// (0, 0) and no coordinates follow.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Point {
    pub(crate) fn parse(cur: &mut ByteCursor<'_>) -> AnmResult<Self> {
        if !cur.read_bool()? {
            return Ok(Self::default());
        }
        Ok(Self {
            x: cur.read_f64()?,
            y: cur.read_f64()?,
        })
    }

    pub(crate) fn write(self, out: &mut Vec<u8>) {
        if self.x.to_bits() == 0 && self.y.to_bits() == 0 {
            out.push(0);
            return;
        }
        out.push(1);
        out.extend_from_slice(&self.x.to_le_bytes());
        out.extend_from_slice(&self.y.to_le_bytes());
    }
}

/// One frame of an animation.
#[derive(Debug, Clone, PartialEq)]
pub struct AnmFrame {
    /// Numeric frame id
    pub id: u16,
    /// First frame offset
    pub offset_a: Point,
    /// Second frame offset
    pub offset_b: Point,
    /// Rotation field, structurally present but never meaningful in
    /// observed data
    pub rotation: f64,
    /// Bones of the frame, in declared order
    pub bones: Vec<AnmBone>,
}

impl AnmFrame {
    /// Decode one frame.
    ///
    /// `prev` is the previously decoded frame of the same animation (none
    /// for the first); bones flagged as copies resolve against it by index.
    pub(crate) fn parse(cur: &mut ByteCursor<'_>, prev: Option<&AnmFrame>) -> AnmResult<Self> {
        let id = cur.read_u16()?;
        let offset_a = Point::parse(cur).map_err(AnmError::element("offset point A"))?;
        let offset_b = Point::parse(cur).map_err(AnmError::element("offset point B"))?;
        let rotation = cur.read_f64()?;
        let bone_count = cur.read_i16()?;

        let mut bones = Vec::with_capacity(bone_count.max(0) as usize);
        for index in 0..bone_count.max(0) as usize {
            let bone = Self::parse_bone(cur, prev, index).map_err(|e| AnmError::Bone {
                index,
                source: Box::new(e),
            })?;
            bones.push(bone);
        }

        Ok(Self {
            id,
            offset_a,
            offset_b,
            rotation,
            bones,
        })
    }

    // A set leading flag means "copy bone `index` from the previous frame";
    // the copy is by value. A second flag then decides whether the copied
    // movie-clip frame stands or is overwritten, and nothing else of the
    // copy changes. An unset leading flag is followed by the full bone form.
    fn parse_bone(
        cur: &mut ByteCursor<'_>,
        prev: Option<&AnmFrame>,
        index: usize,
    ) -> AnmResult<AnmBone> {
        if cur.read_bool()? {
            let mut bone = prev
                .and_then(|frame| frame.bones.get(index))
                .cloned()
                .ok_or(AnmError::MissingDeltaSource { bone: index })?;
            if !cur.read_bool()? {
                bone.movie_clip_frame = cur.read_i16()?;
            }
            Ok(bone)
        } else {
            AnmBone::parse(cur)
        }
    }

    /// Encode in the wire form, all bones fully specified.
    pub(crate) fn write(&self, out: &mut Vec<u8>) -> AnmResult<()> {
        out.extend_from_slice(&self.id.to_le_bytes());
        self.offset_a.write(out);
        self.offset_b.write(out);
        out.extend_from_slice(&self.rotation.to_le_bytes());

        let bone_count =
            i16::try_from(self.bones.len()).map_err(|_| AnmError::TooManyBones(self.bones.len()))?;
        out.extend_from_slice(&bone_count.to_le_bytes());
        for bone in &self.bones {
            out.push(0);
            bone.write(out);
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::anm::bone::{TransformMatrix, Vec2};

    fn sample_bone() -> AnmBone {
        AnmBone {
            id: 3,
            offset: Vec2 { x: 4.0, y: 5.0 },
            transform: TransformMatrix {
                scale_x: 2.0,
                scale_y: -2.0,
                rotate_skew0: 3.0,
                rotate_skew1: 3.0,
            },
            movie_clip_frame: 9,
            affine: None,
            opacity: 1.0,
        }
    }

    fn frame_with(bones: Vec<AnmBone>) -> AnmFrame {
        AnmFrame {
            id: 0,
            offset_a: Point::default(),
            offset_b: Point::default(),
            rotation: 0.0,
            bones,
        }
    }

    #[test]
    fn test_point_unset_flag_is_origin() {
        let mut cur = ByteCursor::new(&[0, 0xFF]);
        let point = Point::parse(&mut cur).expect("parse should succeed");
        assert_eq!(point, Point::default());
        // Only the flag byte was consumed.
        assert_eq!(cur.position(), 1);
    }

    #[test]
    fn test_point_round_trip() {
        for point in [
            Point::default(),
            Point { x: 1.5, y: -2.5 },
            Point { x: 0.0, y: 3.0 },
        ] {
            let mut out = Vec::new();
            point.write(&mut out);
            let mut cur = ByteCursor::new(&out);
            assert_eq!(Point::parse(&mut cur).expect("parse"), point);
        }
    }

    fn delta_frame_bytes(override_clip: Option<i16>) -> Vec<u8> {
        // Frame header with one delta bone.
        let mut data = Vec::new();
        data.extend_from_slice(&1_u16.to_le_bytes());
        data.push(0);
        data.push(0);
        data.extend_from_slice(&0.0_f64.to_le_bytes());
        data.extend_from_slice(&1_i16.to_le_bytes());
        match override_clip {
            None => data.extend_from_slice(&[1, 1]),
            Some(clip) => {
                data.extend_from_slice(&[1, 0]);
                data.extend_from_slice(&clip.to_le_bytes());
            }
        }
        data
    }

    #[test]
    fn test_delta_bone_copies_previous_frame() {
        let prev = frame_with(vec![sample_bone()]);
        let data = delta_frame_bytes(None);

        let mut cur = ByteCursor::new(&data);
        let frame = AnmFrame::parse(&mut cur, Some(&prev)).expect("parse should succeed");
        assert_eq!(frame.bones, prev.bones);
    }

    #[test]
    fn test_delta_bone_override_replaces_only_clip_frame() {
        let prev = frame_with(vec![sample_bone()]);
        let data = delta_frame_bytes(Some(-17));

        let mut cur = ByteCursor::new(&data);
        let frame = AnmFrame::parse(&mut cur, Some(&prev)).expect("parse should succeed");
        assert_eq!(frame.bones[0].movie_clip_frame, -17);

        let mut expected = sample_bone();
        expected.movie_clip_frame = -17;
        assert_eq!(frame.bones[0], expected);
    }

    #[test]
    fn test_delta_bone_copy_is_independent() {
        let prev = frame_with(vec![sample_bone()]);
        let data = delta_frame_bytes(None);

        let mut cur = ByteCursor::new(&data);
        let mut frame = AnmFrame::parse(&mut cur, Some(&prev)).expect("parse should succeed");
        frame.bones[0].opacity = 0.25;
        frame.bones[0].id = 99;

        // Mutating the copy never touches the prior frame's bone.
        assert_eq!(prev.bones[0], sample_bone());
    }

    #[test]
    fn test_delta_bone_without_previous_frame_is_invalid() {
        let data = delta_frame_bytes(None);
        let mut cur = ByteCursor::new(&data);
        let err = AnmFrame::parse(&mut cur, None).expect_err("parse should fail");
        assert!(matches!(
            err,
            AnmError::Bone { index: 0, ref source }
                if matches!(**source, AnmError::MissingDeltaSource { bone: 0 })
        ));
    }

    #[test]
    fn test_delta_bone_index_out_of_range_is_invalid() {
        // Previous frame exists but has no bone at index 0.
        let prev = frame_with(Vec::new());
        let data = delta_frame_bytes(None);
        let mut cur = ByteCursor::new(&data);
        let err = AnmFrame::parse(&mut cur, Some(&prev)).expect_err("parse should fail");
        assert!(matches!(err, AnmError::Bone { index: 0, .. }));
    }

    #[test]
    fn test_negative_bone_count_yields_no_bones() {
        let mut data = Vec::new();
        data.extend_from_slice(&1_u16.to_le_bytes());
        data.push(0);
        data.push(0);
        data.extend_from_slice(&0.0_f64.to_le_bytes());
        data.extend_from_slice(&(-5_i16).to_le_bytes());

        let mut cur = ByteCursor::new(&data);
        let frame = AnmFrame::parse(&mut cur, None).expect("parse should succeed");
        assert!(frame.bones.is_empty());
    }
}
