//! Logo rasterization for the command stream
//!
//! Converts an already-loaded logo image into a 1-bit raster sized for
//! thermal paper (max 384 dots wide), rows packed MSB-first.

use image::GenericImageView;
use shared::LogoImage;
use tracing::{error, info};

/// Maximum raster width in dots (safe for 58mm and 80mm heads).
const MAX_WIDTH: u32 = 384;

#[derive(Debug, Clone)]
pub(crate) struct RasterLogo {
    pub width: u32,
    pub height: u32,
    pub bitmap: Vec<u8>,
}

/// Rasterize a logo image, or `None` if the bytes cannot be decoded.
pub(crate) fn rasterize_logo(logo: &LogoImage) -> Option<RasterLogo> {
    let img = match image::load_from_memory(&logo.bytes) {
        Ok(i) => {
            info!(dimensions = ?i.dimensions(), mime = %logo.mime, "logo image decoded");
            i
        }
        Err(e) => {
            error!(error = %e, mime = %logo.mime, "decode logo failed");
            return None;
        }
    };

    let (w, h) = img.dimensions();
    let (new_w, new_h) = if w > MAX_WIDTH {
        let ratio = MAX_WIDTH as f64 / w as f64;
        (MAX_WIDTH, (h as f64 * ratio) as u32)
    } else {
        (w, h)
    };

    let resized = img.resize(new_w, new_h, image::imageops::FilterType::Nearest);

    let x_bytes = new_w.div_ceil(8);
    let mut bitmap = Vec::with_capacity((x_bytes * new_h) as usize);

    // RGBA so transparent pixels stay white
    let rgba = resized.to_rgba8();

    for y in 0..new_h {
        for x_byte in 0..x_bytes {
            let mut byte = 0u8;
            for bit in 0..8 {
                let x = x_byte * 8 + bit;
                if x < new_w {
                    let pixel = rgba.get_pixel(x, y);
                    let alpha = pixel[3];
                    if alpha >= 128 {
                        let luma = (0.299 * pixel[0] as f32
                            + 0.587 * pixel[1] as f32
                            + 0.114 * pixel[2] as f32) as u8;

                        // Dark enough = print black (1)
                        if luma < 128 {
                            byte |= 1 << (7 - bit);
                        }
                    }
                }
            }
            bitmap.push(byte);
        }
    }

    Some(RasterLogo {
        width: new_w,
        height: new_h,
        bitmap,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_logo(width: u32, height: u32) -> LogoImage {
        let mut img = image::RgbaImage::new(width, height);
        for p in img.pixels_mut() {
            *p = image::Rgba([0, 0, 0, 255]);
        }
        let mut bytes = Vec::new();
        img.write_to(
            &mut std::io::Cursor::new(&mut bytes),
            image::ImageFormat::Png,
        )
        .unwrap();
        LogoImage {
            bytes,
            mime: "image/png".to_string(),
        }
    }

    #[test]
    fn test_rasterize_black_square() {
        let raster = rasterize_logo(&png_logo(16, 8)).unwrap();
        assert_eq!(raster.width, 16);
        assert_eq!(raster.height, 8);
        // 16 px = 2 bytes per row, all black
        assert_eq!(raster.bitmap.len(), 16);
        assert!(raster.bitmap.iter().all(|b| *b == 0xFF));
    }

    #[test]
    fn test_rasterize_resizes_wide_images() {
        let raster = rasterize_logo(&png_logo(768, 100)).unwrap();
        assert_eq!(raster.width, 384);
        assert_eq!(raster.height, 50);
    }

    #[test]
    fn test_rasterize_rejects_garbage() {
        let logo = LogoImage {
            bytes: vec![0, 1, 2, 3],
            mime: "image/png".to_string(),
        };
        assert!(rasterize_logo(&logo).is_none());
    }
}
