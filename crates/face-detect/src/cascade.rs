//! Sliding-window cascade detector
//!
//! Multi-scale window scan over the grayscale integral image with a
//! neighbor-merge vote: a region only counts as a face once enough
//! overlapping windows agree, which suppresses single-window noise the
//! same way a cascade's `min_neighbors` does. The per-window stage is a
//! luminance-contrast test; detector accuracy is a non-goal here, the
//! contract is `detect(frame) -> (present, regions)`.

use crate::{bbox::Detection, DetectError, FaceBbox, FaceDetect};
use frame_source::VideoFrame;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Cascade tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CascadeConfig {
    /// Window growth factor between scales
    pub scale_factor: f32,

    /// Overlapping window votes required to accept a region
    pub min_neighbors: usize,

    /// Smallest window edge in pixels
    pub min_size: u32,

    /// Minimum mean window luma (0-255) for a candidate
    pub luma_threshold: u32,

    /// Minimum mean luma above the whole-frame mean
    pub min_contrast: u32,
}

impl Default for CascadeConfig {
    fn default() -> Self {
        Self {
            scale_factor: 1.1,
            min_neighbors: 5,
            min_size: 60,
            luma_threshold: 150,
            min_contrast: 48,
        }
    }
}

/// Candidate windows merged into one region
struct Cluster {
    sum_x: u64,
    sum_y: u64,
    sum_w: u64,
    sum_h: u64,
    votes: usize,
}

impl Cluster {
    fn new(seed: FaceBbox) -> Self {
        Self {
            sum_x: seed.x as u64,
            sum_y: seed.y as u64,
            sum_w: seed.width as u64,
            sum_h: seed.height as u64,
            votes: 1,
        }
    }

    fn absorb(&mut self, bbox: FaceBbox) {
        self.sum_x += bbox.x as u64;
        self.sum_y += bbox.y as u64;
        self.sum_w += bbox.width as u64;
        self.sum_h += bbox.height as u64;
        self.votes += 1;
    }

    fn merged(&self) -> FaceBbox {
        let n = self.votes as u64;
        FaceBbox::new(
            (self.sum_x / n) as u32,
            (self.sum_y / n) as u32,
            (self.sum_w / n) as u32,
            (self.sum_h / n) as u32,
        )
    }

    /// Candidate belongs to this cluster when its center lies within half
    /// a window edge of the cluster's running-average center
    fn accepts(&self, bbox: FaceBbox) -> bool {
        let mean = self.merged();
        let (cx, cy) = (mean.center_x() as i64, (mean.y + mean.height / 2) as i64);
        let (bx, by) = (bbox.center_x() as i64, (bbox.y + bbox.height / 2) as i64);
        let reach = mean.width.max(bbox.width) as i64;
        (cx - bx).abs() * 2 < reach && (cy - by).abs() * 2 < reach
    }
}

/// Classical multi-scale window detector
pub struct CascadeDetector {
    config: CascadeConfig,
}

impl CascadeDetector {
    pub fn new(config: CascadeConfig) -> Self {
        info!(
            scale_factor = config.scale_factor,
            min_neighbors = config.min_neighbors,
            min_size = config.min_size,
            "cascade detector initialized"
        );
        Self { config }
    }

    /// Summed-area table with a zero row/column border
    fn integral(gray: &[u8], width: u32, height: u32) -> Vec<u64> {
        let (w, h) = (width as usize, height as usize);
        let stride = w + 1;
        let mut table = vec![0u64; stride * (h + 1)];
        for y in 0..h {
            let mut row_sum = 0u64;
            for x in 0..w {
                row_sum += gray[y * w + x] as u64;
                table[(y + 1) * stride + x + 1] = table[y * stride + x + 1] + row_sum;
            }
        }
        table
    }

    fn window_sum(table: &[u64], stride: usize, x: u32, y: u32, size: u32) -> u64 {
        let (x0, y0) = (x as usize, y as usize);
        let (x1, y1) = (x0 + size as usize, y0 + size as usize);
        table[y1 * stride + x1] + table[y0 * stride + x0]
            - table[y0 * stride + x1]
            - table[y1 * stride + x0]
    }

    /// Assign a candidate window to a nearby cluster, or start one
    fn cluster(clusters: &mut Vec<Cluster>, bbox: FaceBbox) {
        for cluster in clusters.iter_mut() {
            if cluster.accepts(bbox) {
                cluster.absorb(bbox);
                return;
            }
        }
        clusters.push(Cluster::new(bbox));
    }
}

impl FaceDetect for CascadeDetector {
    fn detect(&self, frame: &VideoFrame) -> Result<Detection, DetectError> {
        if frame.data.is_empty() {
            return Err(DetectError::EmptyFrame);
        }
        if frame.width < self.config.min_size || frame.height < self.config.min_size {
            return Err(DetectError::FrameTooSmall {
                width: frame.width,
                height: frame.height,
                min: self.config.min_size,
            });
        }

        let gray = frame.to_grayscale();
        let table = Self::integral(&gray, frame.width, frame.height);
        let stride = frame.width as usize + 1;

        let frame_mean = (gray.iter().map(|&v| v as u64).sum::<u64>()
            / gray.len() as u64) as u32;

        let mut clusters: Vec<Cluster> = Vec::new();
        let max_size = frame.width.min(frame.height);
        let mut size = self.config.min_size;
        while size <= max_size {
            let step = (size / 8).max(1);
            let mut y = 0;
            while y + size <= frame.height {
                let mut x = 0;
                while x + size <= frame.width {
                    let sum = Self::window_sum(&table, stride, x, y, size);
                    let mean = (sum / (size as u64 * size as u64)) as u32;
                    if mean >= self.config.luma_threshold
                        && mean.saturating_sub(frame_mean) >= self.config.min_contrast
                    {
                        Self::cluster(&mut clusters, FaceBbox::new(x, y, size, size));
                    }
                    x += step;
                }
                y += step;
            }
            size = ((size as f32 * self.config.scale_factor) as u32).max(size + 1);
        }

        let mut regions: Vec<FaceBbox> = clusters
            .iter()
            .filter(|c| c.votes >= self.config.min_neighbors)
            .map(Cluster::merged)
            .collect();
        regions.sort_by_key(FaceBbox::center_x);

        debug!(
            candidates = clusters.len(),
            accepted = regions.len(),
            "cascade scan complete"
        );
        Ok(Detection::of(regions))
    }
}
