//! Paging axis and the overflow test that decides whether autoplay is worth arming.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

/// Measured outer size of an element, in CSS pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub width: f32,
    pub height: f32,
}

impl Extent {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn along(&self, orientation: Orientation) -> f32 {
        match orientation {
            Orientation::Horizontal => self.width,
            Orientation::Vertical => self.height,
        }
    }
}

/// Sizes of the visible container and the full list it clips.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ListGeometry {
    pub container: Extent,
    pub list: Extent,
}

impl ListGeometry {
    /// True when the list extends past its container on the paging axis.
    pub fn overflows(&self, orientation: Orientation) -> bool {
        self.list.along(orientation) > self.container.along(orientation)
    }
}
