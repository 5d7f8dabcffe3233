//! The RGBA pixel buffer every pipeline stage reads and produces.

/// Bytes per pixel (R, G, B, A).
pub const CHANNELS: usize = 4;

/// An immutable RGBA8 image, row-major with a top-left origin.
///
/// Construction is checked: the pixel vector always holds exactly
/// `width * height * 4` bytes and both dimensions are non-zero. Nothing
/// hands out mutable access, so every transform produces a new buffer and
/// a buffer kept as an editing baseline can be shared freely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw RGBA bytes.
    ///
    /// Returns `None` if either dimension is zero or the byte count does not
    /// match `width * height * 4`.
    pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        if pixels.len() != byte_len(width, height) {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    /// A buffer with every pixel set to `rgba`.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        let count = width as usize * height as usize;
        let pixels = rgba.iter().copied().cycle().take(count * CHANNELS).collect();
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    /// Take ownership of an `image::RgbaImage`.
    pub fn from_rgba_image(img: image::RgbaImage) -> Option<Self> {
        let (width, height) = img.dimensions();
        Self::from_raw(width, height, img.into_raw())
    }

    /// Copy into an `image::RgbaImage` for codec work.
    pub fn to_rgba_image(&self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Raw RGBA bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// The pixel at `(x, y)`. Panics if out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = (y as usize * self.width as usize + x as usize) * CHANNELS;
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }

    /// Build a new buffer of the same size by mapping every pixel.
    pub fn map_pixels<F>(&self, mut f: F) -> PixelBuffer
    where
        F: FnMut([u8; 4]) -> [u8; 4],
    {
        let mut out = Vec::with_capacity(self.pixels.len());
        for px in self.pixels.chunks_exact(CHANNELS) {
            out.extend_from_slice(&f([px[0], px[1], px[2], px[3]]));
        }
        PixelBuffer {
            width: self.width,
            height: self.height,
            pixels: out,
        }
    }

    /// Build a new buffer by sending each RGB channel through a lookup table.
    /// Alpha is copied unchanged.
    pub fn map_rgb_lut(&self, lut: &[u8; 256]) -> PixelBuffer {
        self.map_pixels(|[r, g, b, a]| [lut[r as usize], lut[g as usize], lut[b as usize], a])
    }

    /// Byte layout with alpha dropped, as expected by RGB-only encoders.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixel_count() * 3);
        for px in self.pixels.chunks_exact(CHANNELS) {
            out.extend_from_slice(&px[..3]);
        }
        out
    }
}

#[inline]
fn byte_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * CHANNELS
}
