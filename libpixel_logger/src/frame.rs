use super::error::ProviderError;
use super::pixel_map::ValidRange;

/// Frame is a single capture from the spectrometer.
///
/// Counts are stored in pixel order; pixel numbering starts at 1, so pixel `p` lives at
/// `counts[p - 1]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    num_pixels: usize,
    counts: Vec<u32>,
}

impl Frame {
    /// Create a new Frame. The declared pixel count must match the number of counts.
    pub fn new(num_pixels: usize, counts: Vec<u32>) -> Result<Self, ProviderError> {
        if counts.len() != num_pixels {
            return Err(ProviderError::InconsistentPixelCount {
                declared: num_pixels,
                found: counts.len(),
            });
        }
        Ok(Self { num_pixels, counts })
    }

    pub fn num_pixels(&self) -> usize {
        self.num_pixels
    }

    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    /// Get the counts at a (1-based) pixel number.
    ///
    /// Returns None if the frame does not contain that pixel
    pub fn count_at(&self, pixel: i64) -> Option<u32> {
        if pixel < 1 {
            return None;
        }
        self.counts.get((pixel - 1) as usize).copied()
    }

    /// Iterate over (pixel, counts) pairs in increasing pixel order
    pub fn pixels(&self) -> impl Iterator<Item = (i64, u32)> + '_ {
        self.counts
            .iter()
            .take(self.num_pixels)
            .enumerate()
            .map(|(idx, count)| (idx as i64 + 1, *count))
    }

    /// Counts for the pixels inside the range, in increasing pixel order
    pub fn counts_in_range(&self, range: &ValidRange) -> Vec<u32> {
        self.pixels()
            .filter(|(pixel, _)| range.contains(*pixel))
            .map(|(_, count)| count)
            .collect()
    }
}

/// The acquisition side of a logging session.
///
/// Anything that can hand back one full Frame per call can drive a session: a spectrometer,
/// a replay of captured data, or a simulation.
pub trait FrameSource {
    /// Capture a single frame. Blocks until the frame is available.
    fn capture_frame(&mut self) -> Result<Frame, ProviderError>;
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn capture_frame(&mut self) -> Result<Frame, ProviderError> {
        (**self).capture_frame()
    }
}
