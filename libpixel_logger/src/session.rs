use std::path::Path;

use super::datalog::log_frame;
use super::error::SessionError;
use super::frame::FrameSource;
use super::pixel_map::ValidRange;
use super::status::{SessionStatus, SessionSummary};

/// Capture and log `num_frames` frames, one after another.
///
/// Each frame is fully written to the datalog before the next capture starts. Any capture or
/// write failure ends the session; rows already written stay in the datalog. `on_progress`
/// is called after every logged frame.
pub fn run_session<S, F>(
    source: &mut S,
    log_path: &Path,
    range: &ValidRange,
    num_frames: usize,
    mut on_progress: F,
) -> Result<SessionSummary, SessionError>
where
    S: FrameSource + ?Sized,
    F: FnMut(&SessionStatus),
{
    let mut summary = SessionSummary::default();
    for frame_idx in 0..num_frames {
        let frame = source
            .capture_frame()
            .map_err(|e| SessionError::ProviderError {
                frame: frame_idx,
                source: e,
            })?;

        let n_fields =
            log_frame(log_path, &frame, range).map_err(|e| SessionError::DatalogError {
                frame: frame_idx,
                source: e,
            })?;

        let missing = range.missing_pixels(frame.num_pixels());
        if missing > 0 {
            log::warn!(
                "Frame {} has {} pixels but the valid range ends at pixel {}; row is short by {} fields",
                frame_idx,
                frame.num_pixels(),
                range.stop,
                missing
            );
            summary.short_rows += 1;
        }

        summary.frames_logged += 1;
        on_progress(&SessionStatus::new(
            summary.frames_logged,
            num_frames,
            n_fields,
        ));
    }
    Ok(summary)
}
