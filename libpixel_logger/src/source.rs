use byteorder::{BigEndian, ReadBytesExt};
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::{Path, PathBuf};

use super::error::ProviderError;
use super::frame::{Frame, FrameSource};

/// Status byte of a successful capture
const STATUS_OK: u8 = 0;
/// Pixels on the standard spectrometer detector
pub const DEFAULT_NUM_PIXELS: usize = 392;

const DARK_COUNTS: u32 = 1_000;
const PEAK_COUNTS: u32 = 40_000;
const PEAK_HALF_WIDTH: i64 = 40;

/// SimulatedSource produces synthetic frames so that a session can run without hardware.
///
/// Each frame is a flat dark level with a triangular peak centered on the detector. The
/// peak height steps down slightly with every capture so consecutive rows are
/// distinguishable in the datalog.
#[derive(Debug, Clone)]
pub struct SimulatedSource {
    num_pixels: usize,
    frames_captured: u32,
}

impl SimulatedSource {
    pub fn new(num_pixels: usize) -> Self {
        Self {
            num_pixels,
            frames_captured: 0,
        }
    }

    fn count_at(&self, pixel: i64) -> u32 {
        let center = (self.num_pixels as i64 + 1) / 2;
        let distance = (pixel - center).abs();
        if distance >= PEAK_HALF_WIDTH {
            return DARK_COUNTS;
        }
        let height = PEAK_COUNTS.saturating_sub(self.frames_captured.saturating_mul(100));
        let falloff = (PEAK_HALF_WIDTH - distance) as u32;
        DARK_COUNTS + height / PEAK_HALF_WIDTH as u32 * falloff
    }
}

impl Default for SimulatedSource {
    fn default() -> Self {
        Self::new(DEFAULT_NUM_PIXELS)
    }
}

impl FrameSource for SimulatedSource {
    fn capture_frame(&mut self) -> Result<Frame, ProviderError> {
        let counts = (1..=self.num_pixels as i64)
            .map(|pixel| self.count_at(pixel))
            .collect();
        self.frames_captured = self.frames_captured.saturating_add(1);
        Frame::new(self.num_pixels, counts)
    }
}

/// ReplaySource plays back frames captured earlier from a spectrometer.
///
/// The file is a plain concatenation of capture-frame replies, each laid out as
///
/// ```text
/// status: u8 | num_pixels: u16 | counts: [u16; num_pixels]
/// ```
///
/// with all multi-byte values big-endian. Running out of data exactly at a frame boundary
/// is reported as [`ProviderError::Exhausted`]; running out mid-frame is an IO error.
#[derive(Debug)]
pub struct ReplaySource {
    reader: BufReader<File>,
    path: PathBuf,
}

impl ReplaySource {
    pub fn new(path: &Path) -> Result<Self, ProviderError> {
        if !path.exists() {
            return Err(ProviderError::BadFilePath(path.to_path_buf()));
        }
        Ok(Self {
            reader: BufReader::new(File::open(path)?),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FrameSource for ReplaySource {
    fn capture_frame(&mut self) -> Result<Frame, ProviderError> {
        read_reply(&mut self.reader)?.ok_or(ProviderError::Exhausted)
    }
}

/// Read one capture-frame reply. Returns None if the reader is already at end-of-file.
fn read_reply<R: Read>(reader: &mut R) -> Result<Option<Frame>, ProviderError> {
    let status = match reader.read_u8() {
        Ok(s) => s,
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(ProviderError::IOError(e)),
    };
    if status != STATUS_OK {
        return Err(ProviderError::BadStatus(status));
    }

    let num_pixels = reader.read_u16::<BigEndian>()? as usize;
    let mut raw = vec![0u16; num_pixels];
    reader.read_u16_into::<BigEndian>(&mut raw)?;

    Ok(Some(Frame::new(
        num_pixels,
        raw.into_iter().map(u32::from).collect(),
    )?))
}
