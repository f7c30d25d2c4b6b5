use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("time window end {end} must be after start {start}")]
    EmptyWindow { start: f64, end: f64 },
    #[error("time window bounds must be finite")]
    NonFinite,
}

/// Time range covered by the canvas, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeWindow {
    pub start: f64,
    pub end: f64,
}

impl TimeWindow {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Like [`TimeWindow::new`] but rejects empty, inverted or non-finite ranges.
    pub fn checked(start: f64, end: f64) -> Result<Self, GeometryError> {
        if !start.is_finite() || !end.is_finite() {
            return Err(GeometryError::NonFinite);
        }
        if end <= start {
            return Err(GeometryError::EmptyWindow { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn span(&self) -> f64 {
        self.end - self.start
    }
}

/// Milliseconds represented by one pixel.
pub fn time_to_pixel_ratio(window: &TimeWindow, canvas_width: f64) -> f64 {
    window.span() / canvas_width
}

pub fn time_to_x(window: &TimeWindow, canvas_width: f64, time: f64) -> f64 {
    let width_to_zoom = canvas_width / window.span();
    (time - window.start) * width_to_zoom
}

pub fn x_to_time(window: &TimeWindow, canvas_width: f64, x: f64) -> f64 {
    window.start + x * time_to_pixel_ratio(window, canvas_width)
}

/// Canvas range for a visible range when the canvas is `buffer` viewports
/// wide and centered on what is visible.
pub fn canvas_window(visible: &TimeWindow, buffer: f64) -> TimeWindow {
    let zoom = visible.span();
    let start = visible.start - zoom * (buffer - 1.0) / 2.0;
    TimeWindow {
        start,
        end: start + zoom * buffer,
    }
}

pub fn canvas_width(viewport_width: f64, buffer: f64) -> f64 {
    viewport_width * buffer
}
