//! Detection result types

use serde::{Deserialize, Serialize};

/// Face bounding box in pixel units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceBbox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl FaceBbox {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Horizontal center, the roster's left-to-right ordering key
    pub fn center_x(&self) -> u32 {
        self.x + self.width / 2
    }

}

/// One detector invocation's result: presence flag plus all regions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Detection {
    /// Whether at least one face-like region is present
    pub present: bool,
    /// All detected regions, unordered
    pub regions: Vec<FaceBbox>,
}

impl Detection {
    /// No faces in frame
    pub fn none() -> Self {
        Self::default()
    }

    /// Detection with the given regions
    pub fn of(regions: Vec<FaceBbox>) -> Self {
        Self {
            present: !regions.is_empty(),
            regions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detection_presence_follows_regions() {
        assert!(!Detection::none().present);
        assert!(Detection::of(vec![FaceBbox::new(0, 0, 1, 1)]).present);
        assert!(!Detection::of(vec![]).present);
    }
}
