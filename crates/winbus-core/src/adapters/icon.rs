//! Icon transcoding between the service's byte buffers and images.

use std::io::Cursor;

use image::{DynamicImage, imageops::FilterType};
use log::warn;

const TARGET: &str = "winbus::window_system";

/// Decode an icon reply. With `scale` set and a decodable buffer, the
/// result is exactly `width`×`height`; an undecodable buffer yields an
/// empty image.
pub(crate) fn decode_icon(bytes: &[u8], width: i32, height: i32, scale: bool) -> DynamicImage {
    match image::load_from_memory(bytes) {
        Ok(icon) if scale => {
            icon.resize_exact(width.max(0) as u32, height.max(0) as u32, FilterType::Triangle)
        }
        Ok(icon) => icon,
        Err(err) => {
            warn!(
                target: TARGET,
                "icon reply could not be decoded (operation=icon, error={err})"
            );
            DynamicImage::new_rgba8(0, 0)
        }
    }
}

/// PNG-encode an icon for transmission. An encode failure downgrades to a
/// warning and an empty buffer.
pub(crate) fn encode_png(icon: &DynamicImage, operation: &'static str) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    match icon.write_to(&mut buffer, image::ImageOutputFormat::Png) {
        Ok(()) => buffer.into_inner(),
        Err(err) => {
            warn!(
                target: TARGET,
                "icon could not be encoded (operation={operation}, error={err})"
            );
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use image::{DynamicImage, GenericImageView};

    use super::{decode_icon, encode_png};

    fn sample_icon(width: u32, height: u32) -> Vec<u8> {
        encode_png(&DynamicImage::new_rgba8(width, height), "test")
    }

    #[test]
    fn decode_without_scaling_keeps_the_native_size() {
        let icon = decode_icon(&sample_icon(8, 8), 64, 64, false);
        assert_eq!((icon.width(), icon.height()), (8, 8));
    }

    #[test]
    fn decode_with_scaling_yields_the_requested_size() {
        let icon = decode_icon(&sample_icon(8, 8), 64, 64, true);
        assert_eq!((icon.width(), icon.height()), (64, 64));
    }

    #[test]
    fn undecodable_replies_yield_an_empty_image() {
        let icon = decode_icon(b"not an image", 64, 64, true);
        assert_eq!((icon.width(), icon.height()), (0, 0));

        let icon = decode_icon(&[], 64, 64, false);
        assert_eq!((icon.width(), icon.height()), (0, 0));
    }

    #[test]
    fn encode_round_trips_through_decode() {
        let bytes = sample_icon(12, 5);
        let icon = decode_icon(&bytes, 0, 0, false);
        assert_eq!((icon.width(), icon.height()), (12, 5));
    }
}
