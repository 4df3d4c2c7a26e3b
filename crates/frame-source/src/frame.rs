//! Video frame type and pixel-level processing

/// Decoded RGB video frame
#[derive(Debug, Clone)]
pub struct VideoFrame {
    /// RGB pixel data (width * height * 3)
    pub data: Vec<u8>,
    /// Frame width
    pub width: u32,
    /// Frame height
    pub height: u32,
    /// Capture timestamp (nanoseconds, monotonic)
    pub timestamp_ns: u64,
    /// Frame sequence number
    pub sequence: u32,
}

impl VideoFrame {
    /// Create a new video frame from raw RGB data
    pub fn new(data: Vec<u8>, width: u32, height: u32, timestamp_ns: u64, sequence: u32) -> Self {
        Self {
            data,
            width,
            height,
            timestamp_ns,
            sequence,
        }
    }

    /// Get pixel at (x, y)
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y * self.width + x) * 3) as usize;
        Some([self.data[idx], self.data[idx + 1], self.data[idx + 2]])
    }

    /// Convert to grayscale, one luma byte per pixel.
    ///
    /// The cascade detector operates on this representation.
    pub fn to_grayscale(&self) -> Vec<u8> {
        let mut gray = Vec::with_capacity((self.width * self.height) as usize);
        for pixel in self.data.chunks(3) {
            // Luminance formula: 0.299*R + 0.587*G + 0.114*B
            let y = (pixel[0] as f32 * 0.299
                   + pixel[1] as f32 * 0.587
                   + pixel[2] as f32 * 0.114) as u8;
            gray.push(y);
        }
        gray
    }

    /// Crop a region of the frame
    pub fn crop(&self, x: u32, y: u32, w: u32, h: u32) -> Option<VideoFrame> {
        if x + w > self.width || y + h > self.height {
            return None;
        }

        let mut cropped = Vec::with_capacity((w * h * 3) as usize);
        for row in y..(y + h) {
            let start = ((row * self.width + x) * 3) as usize;
            let end = start + (w * 3) as usize;
            cropped.extend_from_slice(&self.data[start..end]);
        }

        Some(VideoFrame {
            data: cropped,
            width: w,
            height: h,
            timestamp_ns: self.timestamp_ns,
            sequence: self.sequence,
        })
    }
}

/// Decode a JPEG still into an RGB frame
#[cfg(feature = "jpeg-decode")]
pub fn decode_jpeg(jpeg_data: &[u8]) -> Result<VideoFrame, image::ImageError> {
    use image::ImageFormat;

    let img = image::load_from_memory_with_format(jpeg_data, ImageFormat::Jpeg)?;
    let rgb = img.to_rgb8();

    Ok(VideoFrame {
        width: rgb.width(),
        height: rgb.height(),
        data: rgb.into_raw(),
        timestamp_ns: 0,
        sequence: 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_frame(w: u32, h: u32, rgb: [u8; 3]) -> VideoFrame {
        let mut data = Vec::with_capacity((w * h * 3) as usize);
        for _ in 0..(w * h) {
            data.extend_from_slice(&rgb);
        }
        VideoFrame::new(data, w, h, 0, 0)
    }

    #[test]
    fn test_get_pixel_bounds() {
        let frame = solid_frame(4, 4, [10, 20, 30]);
        assert_eq!(frame.get_pixel(0, 0), Some([10, 20, 30]));
        assert_eq!(frame.get_pixel(3, 3), Some([10, 20, 30]));
        assert_eq!(frame.get_pixel(4, 0), None);
        assert_eq!(frame.get_pixel(0, 4), None);
    }

    #[test]
    fn test_grayscale_white_and_black() {
        let white = solid_frame(2, 2, [255, 255, 255]);
        assert!(white.to_grayscale().iter().all(|&y| y >= 254));

        let black = solid_frame(2, 2, [0, 0, 0]);
        assert!(black.to_grayscale().iter().all(|&y| y == 0));
    }

    #[test]
    fn test_crop_within_bounds() {
        let frame = solid_frame(8, 8, [1, 2, 3]);
        let cropped = frame.crop(2, 2, 4, 4).unwrap();
        assert_eq!(cropped.width, 4);
        assert_eq!(cropped.height, 4);
        assert_eq!(cropped.data.len(), 4 * 4 * 3);
        assert!(frame.crop(6, 6, 4, 4).is_none());
    }
}
