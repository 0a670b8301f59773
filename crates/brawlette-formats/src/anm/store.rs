//! Store decoding: a named bundle of animations.

use super::animation::AnmAnimation;
use super::error::{AnmError, AnmResult};
use super::put_string;
use crate::stream::ByteCursor;

/// A named bundle of animations sharing a source sprite file.
#[derive(Debug, Clone, PartialEq)]
pub struct AnmStore {
    /// Store name
    pub name: String,
    /// Index string
    pub index: String,
    /// Source sprite file name
    pub file_name: String,
    /// Animations in the store, in declared order
    pub animations: Vec<AnmAnimation>,
}

impl AnmStore {
    pub(crate) fn parse(cur: &mut ByteCursor<'_>) -> AnmResult<Self> {
        let name = cur.read_string()?;
        let index = cur.read_string()?;
        let file_name = cur.read_string()?;
        let animation_count = cur.read_u32()?;

        let mut animations = Vec::with_capacity(animation_count as usize);
        for i in 0..animation_count as usize {
            let animation = AnmAnimation::parse(cur).map_err(|e| AnmError::Animation {
                index: i,
                source: Box::new(e),
            })?;
            animations.push(animation);
        }

        Ok(Self {
            name,
            index,
            file_name,
            animations,
        })
    }

    pub(crate) fn write(&self, out: &mut Vec<u8>) -> AnmResult<()> {
        put_string(out, &self.name)?;
        put_string(out, &self.index)?;
        put_string(out, &self.file_name)?;
        out.extend_from_slice(&(self.animations.len() as u32).to_le_bytes());
        for animation in &self.animations {
            animation.write(out)?;
        }
        Ok(())
    }

    /// Find an animation whose name contains `name`.
    pub fn animation_by_name(&self, name: &str) -> Option<&AnmAnimation> {
        self.animations.iter().find(|a| a.name.contains(name))
    }
}
