use super::config::Config;
use super::datalog::write_header;
use super::error::ProcessorError;
use super::pixel_map::PixelMap;
use super::session::run_session;
use super::status::{SessionStatus, SessionSummary};

/// The main routine of pixel_logger.
///
/// Reads the map file, starts a fresh datalog with the header of mapped values, then logs the
/// configured number of frames from the configured source. Nothing is written if the map
/// cannot be read.
pub fn process<F>(config: &Config, on_progress: F) -> Result<SessionSummary, ProcessorError>
where
    F: FnMut(&SessionStatus),
{
    config.validate()?;

    let (pixel_map, range) = PixelMap::new(&config.map_path)?;
    log::info!(
        "Loaded {} pixels from map {}",
        pixel_map.len(),
        config.map_path.to_string_lossy()
    );
    for pixel in [range.start, range.stop] {
        if let Some(value) = pixel_map.get(pixel) {
            log::info!("Pixel {pixel} is {value}nm");
        }
    }

    let mut source = config.source.open()?;

    let n_header = write_header(&config.datalog_path, &pixel_map, &range)?;
    log::info!(
        "Started datalog {} with {} columns",
        config.datalog_path.to_string_lossy(),
        n_header
    );

    let summary = run_session(
        &mut source,
        &config.datalog_path,
        &range,
        config.num_frames,
        on_progress,
    )?;

    if summary.short_rows > 0 {
        log::warn!(
            "{} of {} rows are shorter than the header",
            summary.short_rows,
            summary.frames_logged
        );
    }
    if let Ok(metadata) = std::fs::metadata(&config.datalog_path) {
        log::info!(
            "Logged {} frames, datalog size: {}",
            summary.frames_logged,
            human_bytes::human_bytes(metadata.len() as f64)
        );
    }

    Ok(summary)
}
