//! Animation decoding: markers, auxiliary data, frame sequence.

use super::error::{AnmError, AnmResult};
use super::frame::AnmFrame;
use super::put_string;
use crate::stream::ByteCursor;

/// One animation: a named sequence of frames plus marker indices into it.
///
/// The five markers are plain offsets into [`frames`](Self::frames) and are
/// only valid when smaller than [`frame_count`](Self::frame_count); the
/// accessor methods resolve them and return `None` otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct AnmAnimation {
    /// Animation name
    pub name: String,
    /// Declared number of frames
    pub frame_count: u32,
    /// Frame index the loop restarts from
    pub loop_start: u32,
    /// Frame index recovery begins at
    pub recovery_start: u32,
    /// Frame index the free phase begins at
    pub free_start: u32,
    /// Frame index used for previews
    pub preview_frame: u32,
    /// Frame index the base phase begins at
    pub base_start: u32,
    /// Auxiliary data block, meaning opaque to the decoder
    pub anim_data: Vec<u32>,
    /// Declared size of the frame data block
    pub frame_data_size: u32,
    /// Decoded frames
    pub frames: Vec<AnmFrame>,
}

impl AnmAnimation {
    pub(crate) fn parse(cur: &mut ByteCursor<'_>) -> AnmResult<Self> {
        let name = cur.read_string()?;
        let frame_count = cur.read_u32()?;
        let loop_start = cur.read_u32()?;
        let recovery_start = cur.read_u32()?;
        let free_start = cur.read_u32()?;
        let preview_frame = cur.read_u32()?;
        let base_start = cur.read_u32()?;

        let anim_data_size = cur.read_u32()?;
        let mut anim_data = Vec::with_capacity(anim_data_size as usize);
        for _ in 0..anim_data_size {
            anim_data.push(cur.read_u32()?);
        }
        let frame_data_size = cur.read_u32()?;

        let mut frames: Vec<AnmFrame> = Vec::with_capacity(frame_count as usize);
        for index in 0..frame_count as usize {
            let frame = AnmFrame::parse(cur, frames.last()).map_err(|e| AnmError::Frame {
                index,
                source: Box::new(e),
            })?;
            frames.push(frame);
        }

        Ok(Self {
            name,
            frame_count,
            loop_start,
            recovery_start,
            free_start,
            preview_frame,
            base_start,
            anim_data,
            frame_data_size,
            frames,
        })
    }

    pub(crate) fn write(&self, out: &mut Vec<u8>) -> AnmResult<()> {
        put_string(out, &self.name)?;
        out.extend_from_slice(&self.frame_count.to_le_bytes());
        for marker in [
            self.loop_start,
            self.recovery_start,
            self.free_start,
            self.preview_frame,
            self.base_start,
        ] {
            out.extend_from_slice(&marker.to_le_bytes());
        }
        out.extend_from_slice(&(self.anim_data.len() as u32).to_le_bytes());
        for word in &self.anim_data {
            out.extend_from_slice(&word.to_le_bytes());
        }
        out.extend_from_slice(&self.frame_data_size.to_le_bytes());
        for frame in &self.frames {
            frame.write(out)?;
        }
        Ok(())
    }

    /// The frame the loop restarts from, if the marker is in range.
    pub fn loop_start_frame(&self) -> Option<&AnmFrame> {
        self.frames.get(self.loop_start as usize)
    }

    /// The frame recovery begins at, if the marker is in range.
    pub fn recovery_start_frame(&self) -> Option<&AnmFrame> {
        self.frames.get(self.recovery_start as usize)
    }

    /// The frame the free phase begins at, if the marker is in range.
    pub fn free_start_frame(&self) -> Option<&AnmFrame> {
        self.frames.get(self.free_start as usize)
    }

    /// The preview frame, if the marker is in range.
    pub fn preview(&self) -> Option<&AnmFrame> {
        self.frames.get(self.preview_frame as usize)
    }

    /// The frame the base phase begins at, if the marker is in range.
    pub fn base_start_frame(&self) -> Option<&AnmFrame> {
        self.frames.get(self.base_start as usize)
    }
}
