/// Progress of a logging session, handed to the caller after every logged frame
#[derive(Debug, Clone, Default)]
pub struct SessionStatus {
    pub frames_logged: usize,
    pub total_frames: usize,
    pub fields_in_last_row: usize,
}

impl SessionStatus {
    pub fn new(frames_logged: usize, total_frames: usize, fields_in_last_row: usize) -> Self {
        Self {
            frames_logged,
            total_frames,
            fields_in_last_row,
        }
    }

    /// Fraction of the session completed, from 0.0 to 1.0
    pub fn progress(&self) -> f32 {
        if self.total_frames == 0 {
            return 1.0;
        }
        self.frames_logged as f32 / self.total_frames as f32
    }
}

/// What a finished session did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub frames_logged: usize,
    /// Rows that came up short because their frame did not reach the end of the valid range
    pub short_rows: usize,
}
