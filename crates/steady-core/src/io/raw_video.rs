use std::fs::File;
use std::path::Path;

use memmap2::Mmap;

use crate::error::{Result, StabilizeError};
use crate::frame::{FrameGeometry, RawFrame};

/// Memory-mapped headerless raw video: frames of one geometry, back to back.
pub struct RawVideoReader {
    mmap: Mmap,
    geometry: FrameGeometry,
    frame_count: usize,
}

impl RawVideoReader {
    /// Open a raw video file. The file must hold a whole number of frames.
    pub fn open(path: &Path, geometry: FrameGeometry) -> Result<Self> {
        let file = File::open(path)?;
        if file.metadata()?.len() == 0 {
            return Err(StabilizeError::EmptySequence);
        }
        let mmap = unsafe { Mmap::map(&file)? };

        let frame_size = geometry.frame_size();
        let frame_count = mmap.len() / frame_size;
        if mmap.len() % frame_size != 0 {
            return Err(StabilizeError::FrameSizeMismatch {
                expected: (frame_count + 1) * frame_size,
                actual: mmap.len(),
            });
        }

        Ok(Self {
            mmap,
            geometry,
            frame_count,
        })
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn geometry(&self) -> FrameGeometry {
        self.geometry
    }

    /// Get the raw bytes for a single frame (zero-copy from mmap).
    pub fn frame_raw(&self, index: usize) -> Result<&[u8]> {
        if index >= self.frame_count {
            return Err(StabilizeError::FrameIndexOutOfRange {
                index,
                total: self.frame_count,
            });
        }
        let size = self.geometry.frame_size();
        let offset = index * size;
        Ok(&self.mmap[offset..offset + size])
    }

    pub fn frame(&self, index: usize) -> Result<RawFrame<'_>> {
        RawFrame::new(self.frame_raw(index)?, self.geometry)
    }

    /// Iterator over all frames in file order.
    pub fn frames(&self) -> impl ExactSizeIterator<Item = Result<&[u8]>> + '_ {
        (0..self.frame_count).map(move |i| self.frame_raw(i))
    }
}
