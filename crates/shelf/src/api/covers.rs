use log::trace;

use super::{Client, Error};

macro_rules! cover_url {
    ($id: expr) => {
        format!("https://covers.openlibrary.org/b/OLID/{}-L.jpg", $id)
    };
}

pub(crate) fn cover<C: Client>(id: &str) -> Result<CoverImage, Error> {
    trace!("Fetching the cover image for edition '{id}'");
    let client = C::default();
    client.get_bytes(&cover_url!(id)).map(CoverImage::new)
}

/// An image payload returned by the cover endpoint.
pub struct CoverImage {
    bytes: Vec<u8>,
}

impl CoverImage {
    pub(crate) const fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Whether this payload is the "no cover available" sentinel.
    ///
    /// The cover endpoint answers a 1 pixel high image when no cover exists
    /// for an edition, so the pixel height is sniffed from the image header.
    /// This is a heuristic rather than a documented contract of the endpoint.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        pixel_height(&self.bytes) == Some(1)
    }

    /// The raw image bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

fn pixel_height(bytes: &[u8]) -> Option<u32> {
    gif_height(bytes).or_else(|| jpeg_height(bytes))
}

fn gif_height(bytes: &[u8]) -> Option<u32> {
    if !(bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a")) {
        return None;
    }
    // logical screen height, little endian, directly after the 2 byte width
    bytes
        .get(8..10)
        .map(|h| u32::from(u16::from_le_bytes([h[0], h[1]])))
}

fn jpeg_height(bytes: &[u8]) -> Option<u32> {
    if !bytes.starts_with(&[0xFF, 0xD8]) {
        return None;
    }

    // walk the marker segments until a start-of-frame header is found
    let mut i = 2;
    while i + 3 < bytes.len() {
        if bytes[i] != 0xFF {
            return None;
        }
        let marker = bytes[i + 1];

        // standalone markers carry no length field
        if marker == 0x01 || (0xD0..=0xD9).contains(&marker) {
            i += 2;
            continue;
        }

        let len = usize::from(u16::from_be_bytes([bytes[i + 2], bytes[i + 3]]));
        if matches!(marker, 0xC0..=0xCF) && !matches!(marker, 0xC4 | 0xC8 | 0xCC) {
            // SOF layout: length (2), precision (1), height (2), width (2)
            return bytes
                .get(i + 5..i + 7)
                .map(|h| u32::from(u16::from_be_bytes([h[0], h[1]])));
        }
        i += 2 + len;
    }
    None
}
