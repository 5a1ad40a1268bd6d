//! # pixel_logger
//!
//! pixel_logger is a datalogger for pixel-array spectrometers, written in Rust. It reads a
//! map file which assigns a calibrated wavelength to each detector pixel, captures frames
//! of per-pixel counts, and appends the counts of the mapped pixels to a comma-separated
//! datalog whose header row holds the wavelengths.
//!
//! ## Building & Install
//!
//! To build and install the CLI use `cargo install --path ./pixel_logger_cli` from the top
//! level pixel_logger repository. The binary will be installed to your cargo install
//! location (typically something like `~/.cargo/bin/`).
//!
//! ## Configuration
//!
//! Running `pixel_logger_cli` with no arguments uses the default configuration. A YAML
//! configuration can be given with `--config`, and a template can be written with
//! `pixel_logger_cli new --config <path>`. The format is:
//!
//! ```yml
//! map_path: 1002-19_map.txt
//! datalog_path: datalog.txt
//! num_frames: 3
//! source:
//!   kind: simulated
//!   num_pixels: 392
//! ```
//!
//! The `source` can also replay frames captured earlier:
//!
//! ```yml
//! source:
//!   kind: replay
//!   path: frames.bin
//! ```
//!
//! ### Map File Format
//!
//! The map file is tab-separated text. Lines starting with `#` are comments and blank
//! lines are ignored. Every other line is a data row of `pixel<TAB>wavelength`, both
//! integers:
//!
//! ```text
//! # Pixel	Wavelength [nm]
//! 227	280
//! 228	285
//! ...
//! 364	1017
//! ```
//!
//! The range of logged pixels runs from the pixel on the first data row to the pixel on the
//! last data row, inclusive, so the file must be sorted by pixel number. If a pixel appears
//! twice, the last wavelength given is used.
//!
//! ## Output
//!
//! The datalog is rewritten at the start of every run. Line 1 is the wavelengths of the
//! pixels in range, in pixel order. Every following line is one frame's counts for those
//! same pixels:
//!
//! ```text
//! 280,285,...,1017
//! 1012,1030,...,998
//! 1009,1041,...,1003
//! ```
//!
//! A frame with fewer pixels than the end of the range produces a shorter row; a warning is
//! logged when this happens.
//!
//! ### Replay Format
//!
//! Replay files are a concatenation of capture-frame replies as sent by the spectrometer:
//! a status byte (0 for success), a big-endian `u16` pixel count, then one big-endian
//! `u16` count per pixel.
pub mod columns;
pub mod config;
pub mod datalog;
pub mod error;
pub mod frame;
pub mod pixel_map;
pub mod process;
pub mod session;
pub mod source;
pub mod status;
