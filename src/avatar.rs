// Image-loading collaborator for the TUI: given a URL it asynchronously
// produces a small circular pixel grid, or leaves the placeholder in place.
// Nothing here ever surfaces an error to the list or router logic.

use image::DynamicImage;
use image::imageops::FilterType;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Avatar diameter in pixels on the list screen. Rendered as half-block
/// cells, so a grid of N pixels occupies N/2 terminal rows.
pub const CARD_AVATAR_PX: u32 = 8;
/// Avatar diameter in pixels on the detail screen.
pub const DETAIL_AVATAR_PX: u32 = 24;

#[derive(Debug, Error)]
pub enum AvatarError {
    #[error("avatar download failed: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("avatar decode failed: {0}")]
    Decode(#[from] image::ImageError),
}

/// A decoded avatar, center-cropped to a square, downsampled to `size`
/// pixels per side and masked to a circular viewport. Pixels outside the
/// circle are `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarImage {
    size: u32,
    pixels: Vec<Option<(u8, u8, u8)>>,
}

impl AvatarImage {
    pub fn decode(bytes: &[u8], size: u32) -> Result<Self, AvatarError> {
        let img = image::load_from_memory(bytes)?;
        Ok(Self::from_image(&img, size))
    }

    pub fn from_image(img: &DynamicImage, size: u32) -> Self {
        let (w, h) = image::GenericImageView::dimensions(img);
        let side = w.min(h).max(1);
        let square = img.crop_imm((w - side) / 2, (h - side) / 2, side, side);
        let rgb = square
            .resize_exact(size, size, FilterType::Triangle)
            .to_rgb8();
        let radius = size as f32 / 2.0;
        let mut pixels = Vec::with_capacity((size * size) as usize);
        for y in 0..size {
            for x in 0..size {
                let dx = x as f32 + 0.5 - radius;
                let dy = y as f32 + 0.5 - radius;
                if dx * dx + dy * dy <= radius * radius {
                    let p = rgb.get_pixel(x, y).0;
                    pixels.push(Some((p[0], p[1], p[2])));
                } else {
                    pixels.push(None);
                }
            }
        }
        Self { size, pixels }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// `None` outside the circular mask.
    pub fn pixel(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        if x >= self.size || y >= self.size {
            return None;
        }
        self.pixels[(y * self.size + x) as usize]
    }
}

#[derive(Debug, Clone)]
pub enum AvatarEntry {
    Pending,
    Ready(AvatarImage),
    Failed,
}

/// Shared cache keyed by (url, size). The draw loop reads it every frame;
/// fetch tasks write into it whenever they finish. A fetch whose screen is
/// gone just leaves an entry nobody reads.
#[derive(Clone, Default)]
pub struct AvatarCache {
    inner: Arc<Mutex<HashMap<(String, u32), AvatarEntry>>>,
}

impl AvatarCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, url: &str, size: u32) -> Option<AvatarEntry> {
        let map = self.inner.lock().unwrap();
        map.get(&(url.to_string(), size)).cloned()
    }

    fn insert(&self, url: String, size: u32, entry: AvatarEntry) {
        let mut map = self.inner.lock().unwrap();
        map.insert((url, size), entry);
    }

    /// Kick off a background fetch unless one already ran (or is running)
    /// for this url/size. Safe to call every time a screen becomes visible.
    pub fn spawn_fetch(&self, url: &str, size: u32) {
        {
            let mut map = self.inner.lock().unwrap();
            let key = (url.to_string(), size);
            if map.contains_key(&key) {
                return;
            }
            map.insert(key, AvatarEntry::Pending);
        }
        let cache = self.clone();
        let url = url.to_string();
        tokio::spawn(async move {
            let entry = match fetch_and_decode(&url, size).await {
                Ok(img) => AvatarEntry::Ready(img),
                Err(_) => AvatarEntry::Failed,
            };
            cache.insert(url, size, entry);
        });
    }
}

async fn fetch_and_decode(url: &str, size: u32) -> Result<AvatarImage, AvatarError> {
    let bytes = reqwest::get(url).await?.bytes().await?;
    AvatarImage::decode(&bytes, size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage};
    use std::io::Cursor;

    fn solid_png(w: u32, h: u32, rgb: [u8; 3]) -> Vec<u8> {
        let img = RgbImage::from_pixel(w, h, image::Rgb(rgb));
        let mut buf = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn decode_masks_corners_and_keeps_center() {
        let bytes = solid_png(64, 64, [10, 200, 30]);
        let avatar = AvatarImage::decode(&bytes, 8).unwrap();
        assert_eq!(avatar.size(), 8);
        assert_eq!(avatar.pixel(4, 4), Some((10, 200, 30)));
        assert_eq!(avatar.pixel(0, 0), None);
        assert_eq!(avatar.pixel(7, 7), None);
        assert_eq!(avatar.pixel(8, 4), None);
    }

    #[test]
    fn decode_center_crops_non_square_input() {
        let bytes = solid_png(120, 40, [90, 90, 90]);
        let avatar = AvatarImage::decode(&bytes, 8).unwrap();
        assert_eq!(avatar.pixel(4, 3), Some((90, 90, 90)));
    }

    #[test]
    fn decode_rejects_garbage_bytes() {
        assert!(AvatarImage::decode(b"not an image", 8).is_err());
    }

    #[tokio::test]
    async fn failed_fetch_lands_as_failed_entry() {
        let cache = AvatarCache::new();
        cache.spawn_fetch("http://127.0.0.1:1/none.png", 8);
        // Entry is Pending immediately, then flips to Failed.
        for _ in 0..50 {
            match cache.get("http://127.0.0.1:1/none.png", 8) {
                Some(AvatarEntry::Failed) => return,
                Some(AvatarEntry::Pending) | None => {
                    tokio::time::sleep(std::time::Duration::from_millis(20)).await
                }
                Some(AvatarEntry::Ready(_)) => panic!("fetch to closed port cannot succeed"),
            }
        }
        panic!("fetch never resolved");
    }
}
