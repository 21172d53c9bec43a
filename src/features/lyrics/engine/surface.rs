//! Render surface capability
//!
//! The engine never draws. It asks the surface where lines are and hands
//! back the highlight rectangle and scroll position to show.

use super::types::Geometry;

/// What the engine needs from whatever displays the lyrics
pub trait RenderSurface {
    /// Bounding box of a line, or `None` while it is not laid out yet
    fn measure_line(&self, line_index: usize) -> Option<Geometry>;

    /// Visible height in pixels
    fn viewport_height(&self) -> i32;

    /// Height of all laid-out lines in pixels
    fn total_content_height(&self) -> i32;

    /// Scroll so that `fraction` of the content is above the viewport top
    fn set_scroll(&mut self, fraction: f64);

    /// Show the highlight at `geometry`, or remove it
    fn draw_highlight(&mut self, geometry: Option<Geometry>);
}
