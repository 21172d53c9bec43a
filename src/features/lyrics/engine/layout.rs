//! Stacked text layout
//!
//! A [`RenderSurface`] that stacks lines top to bottom with a fixed glyph
//! advance and row height, wrapping long lines at the content width. Hosts
//! that shape text themselves implement the trait directly instead.

use super::surface::RenderSurface;
use super::types::Geometry;
use crate::features::lyrics::parser::Timeline;

/// Layout parameters in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutConfig {
    /// Left margin of every line
    pub margin_left: i32,
    /// Vertical gap between lines
    pub line_spacing: i32,
    /// Horizontal advance of one character
    pub glyph_advance: i32,
    /// Height of one wrapped row
    pub row_height: i32,
    /// Extra width added to the right of non-blank lines
    pub padding_right: i32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            margin_left: 5,
            line_spacing: 2,
            glyph_advance: 10,
            row_height: 20,
            padding_right: 2,
        }
    }
}

/// Stacked layout surface
///
/// Records the last scroll fraction and highlight it was given so a host
/// can paint from it.
#[derive(Debug, Clone)]
pub struct StackedLayout {
    config: LayoutConfig,
    content_width: i32,
    viewport_height: i32,
    /// Character count per line, `0` for blank lines
    line_chars: Vec<usize>,
    boxes: Vec<Geometry>,
    content_height: i32,
    scroll_fraction: f64,
    highlight: Option<Geometry>,
}

impl StackedLayout {
    pub fn new(config: LayoutConfig, content_width: i32, viewport_height: i32) -> Self {
        Self {
            config,
            content_width,
            viewport_height,
            line_chars: Vec::new(),
            boxes: Vec::new(),
            content_height: 0,
            scroll_fraction: 0.0,
            highlight: None,
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lay out every line of `timeline`
    pub fn layout(&mut self, timeline: &Timeline) {
        self.line_chars = timeline
            .lines()
            .iter()
            .map(|line| line.text.chars().count())
            .collect();
        self.relayout();
    }

    /// Forget all lines; nothing measures until the next [`layout`](Self::layout)
    pub fn clear(&mut self) {
        self.line_chars.clear();
        self.boxes.clear();
        self.content_height = 0;
    }

    pub fn is_laid_out(&self) -> bool {
        !self.boxes.is_empty()
    }

    pub fn set_viewport_height(&mut self, height: i32) {
        self.viewport_height = height.max(0);
    }

    /// Change the wrap width, re-laying out existing lines
    ///
    /// Returns `true` if any line box moved.
    pub fn set_content_width(&mut self, width: i32) -> bool {
        if width == self.content_width {
            return false;
        }
        self.content_width = width;
        let before = std::mem::take(&mut self.boxes);
        self.relayout();
        before != self.boxes
    }

    pub fn line_box(&self, index: usize) -> Option<Geometry> {
        self.boxes.get(index).copied()
    }

    pub fn scroll_fraction(&self) -> f64 {
        self.scroll_fraction
    }

    /// Scroll offset from the content top in pixels
    pub fn scroll_offset_px(&self) -> i32 {
        (self.scroll_fraction * self.content_height as f64).round() as i32
    }

    pub fn highlight(&self) -> Option<Geometry> {
        self.highlight
    }

    /// Characters that fit on one wrapped row
    fn chars_per_row(&self) -> usize {
        let usable = self.content_width - self.config.margin_left - self.config.padding_right;
        (usable / self.config.glyph_advance.max(1)).max(1) as usize
    }

    fn relayout(&mut self) {
        let per_row = self.chars_per_row();
        let LayoutConfig {
            margin_left,
            line_spacing,
            glyph_advance,
            row_height,
            padding_right,
        } = self.config;

        let mut y = 0;
        self.boxes = self
            .line_chars
            .iter()
            .map(|&chars| {
                let geometry = if chars == 0 {
                    Geometry::new(margin_left, y, margin_left, y + row_height)
                } else {
                    let rows = chars.div_ceil(per_row) as i32;
                    let width = chars.min(per_row) as i32 * glyph_advance + padding_right;
                    Geometry::new(margin_left, y, margin_left + width, y + rows * row_height)
                };
                y = geometry.y2 + line_spacing;
                geometry
            })
            .collect();
        self.content_height = self.boxes.last().map_or(0, |g| g.y2);
    }
}

impl RenderSurface for StackedLayout {
    fn measure_line(&self, line_index: usize) -> Option<Geometry> {
        self.line_box(line_index)
    }

    fn viewport_height(&self) -> i32 {
        self.viewport_height
    }

    fn total_content_height(&self) -> i32 {
        self.content_height
    }

    fn set_scroll(&mut self, fraction: f64) {
        self.scroll_fraction = fraction;
    }

    fn draw_highlight(&mut self, geometry: Option<Geometry>) {
        self.highlight = geometry;
    }
}
