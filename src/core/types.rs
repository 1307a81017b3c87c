use serde::{Deserialize, Serialize};

/// Pixel size of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Margins between the canvas edge and the plot area, reserved for labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Padding {
    #[must_use]
    pub const fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }
}

impl Default for Padding {
    fn default() -> Self {
        Self::new(46.0, 14.0, 18.0, 28.0)
    }
}

/// Plot rectangle `(x0, y0)-(x1, y1)` in pixel space.
///
/// Derived per render call; `y0` is the top edge and `y1` the bottom edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl PlotArea {
    #[must_use]
    pub fn from_viewport(viewport: Viewport, padding: Padding) -> Self {
        let width = f64::from(viewport.width);
        let height = f64::from(viewport.height);
        Self {
            x0: padding.left,
            y0: padding.top,
            x1: width - padding.right,
            y1: height - padding.bottom,
        }
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.x1 - self.x0
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.y1 - self.y0
    }

    #[must_use]
    pub fn center(self) -> (f64, f64) {
        ((self.x0 + self.x1) / 2.0, (self.y0 + self.y1) / 2.0)
    }
}
