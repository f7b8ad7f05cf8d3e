use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// The court has not been laid out yet, or the terminal is too small for it.
    #[error("court surface unavailable: need {min_cols}x{min_rows} cells, have {cols}x{rows}")]
    SurfaceUnavailable {
        cols: u16,
        rows: u16,
        min_cols: u16,
        min_rows: u16,
    },
}
