//! Kitty graphics protocol framing for diagram images.
//!
//! Images are PNG-encoded, base64-encoded and sent in 4096-byte chunks. The
//! first frame carries the full control header; continuation frames carry only
//! the more-chunks flag.

use std::io::Cursor;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, ImageFormat, RgbaImage};
use thiserror::Error;

pub const CHUNK_SIZE: usize = 4096;
pub const CELL_WIDTH_PX: u32 = 10;
pub const CELL_HEIGHT_PX: u32 = 20;

const FRAME_START: &str = "\x1b_G";
const FRAME_END: &str = "\x1b\\";

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("encode png: {0}")]
    Encode(#[from] image::ImageError),
}

/// An encoded image with a never-reused protocol id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHandle {
    id: u32,
    width_px: u32,
    height_px: u32,
    payload: String,
}

impl ImageHandle {
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn width_px(&self) -> u32 {
        self.width_px
    }

    pub fn height_px(&self) -> u32 {
        self.height_px
    }

    /// Base64 text of the PNG bytes.
    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn cell_width(&self) -> u32 {
        self.width_px.div_ceil(CELL_WIDTH_PX)
    }

    pub fn cell_height(&self) -> u32 {
        self.height_px.div_ceil(CELL_HEIGHT_PX)
    }

    /// Transmit-and-display frames. Cursor placement is the caller's job. An
    /// empty payload yields no frames.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.payload.len() + 64);
        let mut rest = self.payload.as_str();
        let mut first = true;

        while !rest.is_empty() {
            let (chunk, tail) = rest.split_at(rest.len().min(CHUNK_SIZE));
            let more = u8::from(!tail.is_empty());

            out.push_str(FRAME_START);
            if first {
                out.push_str(&format!(
                    "a=T,f=100,t=d,i={},s={},v={},q=2,m={more};",
                    self.id, self.width_px, self.height_px
                ));
            } else {
                out.push_str(&format!("m={more};"));
            }
            out.push_str(chunk);
            out.push_str(FRAME_END);

            first = false;
            rest = tail;
        }

        out
    }
}

/// Deletes one image by id.
pub fn clear(id: u32) -> String {
    format!("{FRAME_START}a=d,d=I,i={id},q=2{FRAME_END}")
}

/// Deletes every image on screen.
pub fn clear_all() -> String {
    format!("{FRAME_START}a=d,d=A,q=2{FRAME_END}")
}

/// Encodes rasters and owns the id counter, so independent codecs never share ids.
#[derive(Debug, Default)]
pub struct ImageCodec {
    last_id: u32,
}

impl ImageCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_id(&self) -> u32 {
        self.last_id
    }

    pub fn encode(&mut self, raster: &RgbaImage) -> Result<ImageHandle, CodecError> {
        let mut png = Cursor::new(Vec::new());
        raster.write_to(&mut png, ImageFormat::Png)?;

        Ok(ImageHandle {
            id: self.next_id(),
            width_px: raster.width(),
            height_px: raster.height(),
            payload: STANDARD.encode(png.into_inner()),
        })
    }

    // Zero is reserved by the protocol for "no id".
    fn next_id(&mut self) -> u32 {
        self.last_id = self.last_id.checked_add(1).unwrap_or(1);
        self.last_id
    }
}

/// Pixel size that fits `width`x`height` inside a cell box, keeping the aspect
/// ratio. Each cell counts as 10x20 pixels.
pub fn fit_within_cells(width: u32, height: u32, cols: u32, rows: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }

    let max_w = f64::from(cols * CELL_WIDTH_PX);
    let max_h = f64::from(rows * CELL_HEIGHT_PX);
    let scale = (max_w / f64::from(width)).min(max_h / f64::from(height));

    (
        (f64::from(width) * scale) as u32,
        (f64::from(height) * scale) as u32,
    )
}

/// Resamples a decoded image to fill the given cell box.
pub fn scale_to_cells(image: &DynamicImage, cols: u32, rows: u32) -> RgbaImage {
    let (width, height) = image.dimensions();
    let (w, h) = fit_within_cells(width, height, cols, rows);
    let (w, h) = (w.max(1), h.max(1));
    if (w, h) == (width, height) {
        return image.to_rgba8();
    }
    imageops::resize(image, w, h, FilterType::Lanczos3)
}

#[cfg(test)]
mod tests {
    use image::{DynamicImage, Rgba, RgbaImage};

    use super::{
        CHUNK_SIZE, ImageCodec, ImageHandle, clear, clear_all, fit_within_cells, scale_to_cells,
    };

    fn handle(payload_len: usize) -> ImageHandle {
        ImageHandle {
            id: 7,
            width_px: 30,
            height_px: 41,
            payload: "A".repeat(payload_len),
        }
    }

    #[test]
    fn single_chunk_frame_has_full_header() {
        let out = handle(10).render();
        assert_eq!(
            out,
            format!("\x1b_Ga=T,f=100,t=d,i=7,s=30,v=41,q=2,m=0;{}\x1b\\", "A".repeat(10))
        );
    }

    #[test]
    fn multi_chunk_frames_carry_only_more_flag() {
        let out = handle(CHUNK_SIZE * 2 + 5).render();
        let frames: Vec<&str> = out.split("\x1b\\").filter(|f| !f.is_empty()).collect();
        assert_eq!(frames.len(), 3);
        assert!(frames[0].starts_with("\x1b_Ga=T,f=100,t=d,i=7,s=30,v=41,q=2,m=1;"));
        assert!(frames[1].starts_with("\x1b_Gm=1;"));
        assert!(frames[2].starts_with("\x1b_Gm=0;"));
        assert_eq!(frames[2].len(), "\x1b_Gm=0;".len() + 5);
    }

    #[test]
    fn exact_multiple_of_chunk_size_ends_with_final_flag() {
        let out = handle(CHUNK_SIZE).render();
        assert_eq!(out.matches("\x1b_G").count(), 1);
        assert!(out.contains("m=0;"));
    }

    #[test]
    fn empty_payload_emits_nothing() {
        assert_eq!(handle(0).render(), "");
    }

    #[test]
    fn delete_sequences_match_protocol() {
        assert_eq!(clear(12), "\x1b_Ga=d,d=I,i=12,q=2\x1b\\");
        assert_eq!(clear_all(), "\x1b_Ga=d,d=A,q=2\x1b\\");
    }

    #[test]
    fn ids_are_monotonic_and_per_codec() {
        let raster = RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 255]));
        let mut a = ImageCodec::new();
        let mut b = ImageCodec::new();

        let first = a.encode(&raster).expect("encode");
        let second = a.encode(&raster).expect("encode");
        let other = b.encode(&raster).expect("encode");

        assert_eq!(first.id(), 1);
        assert_eq!(second.id(), 2);
        assert_eq!(other.id(), 1);
        assert_eq!(a.last_id(), 2);
    }

    #[test]
    fn id_counter_skips_zero_on_wrap() {
        let mut codec = ImageCodec { last_id: u32::MAX };
        assert_eq!(codec.next_id(), 1);
    }

    #[test]
    fn cell_size_rounds_up() {
        let h = handle(1);
        assert_eq!(h.cell_width(), 3);
        assert_eq!(h.cell_height(), 3);
    }

    #[test]
    fn fit_picks_smaller_axis_scale() {
        // Box is 100x100 px; width is the tighter axis.
        assert_eq!(fit_within_cells(400, 200, 10, 5), (100, 50));
        // Box is 400x100 px; height is the tighter axis.
        assert_eq!(fit_within_cells(200, 200, 40, 5), (100, 100));
        // Small images scale up.
        assert_eq!(fit_within_cells(10, 10, 10, 10), (100, 100));
        assert_eq!(fit_within_cells(0, 10, 10, 10), (0, 0));
    }

    #[test]
    fn scale_to_cells_resizes_into_box() {
        let image = DynamicImage::new_rgba8(400, 200);
        let scaled = scale_to_cells(&image, 10, 5);
        assert_eq!(scaled.dimensions(), (100, 50));

        let tiny = scale_to_cells(&image, 0, 0);
        assert_eq!(tiny.dimensions(), (1, 1));
    }
}
