use magic_image::signatures::{
    BMP_SIGNATURE, GIF_SIGNATURE, JPEG_SIGNATURE, MIN_SIGNATURE_LEN, PNG_SIGNATURE, match_at,
};
use magic_image::types::{format_extension, format_mime_type};
use magic_image::{ImageFormat, detect_format, detect_format_label};

fn with_prefix(prefix: &[u8], tail: usize) -> Vec<u8> {
    let mut data = prefix.to_vec();
    data.extend(std::iter::repeat_n(0u8, tail));
    data
}

#[test]
fn test_detect_each_format() {
    let cases: [(&[u8], ImageFormat, &str); 4] = [
        (&PNG_SIGNATURE, ImageFormat::Png, "PNG"),
        (&JPEG_SIGNATURE, ImageFormat::Jpeg, "JPEG"),
        (&GIF_SIGNATURE, ImageFormat::Gif, "GIF"),
        (&BMP_SIGNATURE, ImageFormat::Bmp, "BMP"),
    ];

    for (prefix, format, label) in cases {
        let data = with_prefix(prefix, 32);
        assert_eq!(detect_format(&data), Some(format));
        assert_eq!(detect_format_label(&data), label);
        assert_eq!(detect_format_label(prefix), label);
    }
}

#[test]
fn test_detect_unknown() {
    let data = vec![0x00, 0x11, 0x22, 0x33, 0x44, 0x55];
    assert_eq!(detect_format(&data), None);
    assert_eq!(detect_format_label(&data), "UNKNOWN");
}

#[test]
fn test_detect_only_looks_at_start() {
    let mut data = vec![0u8; 16];
    data[4..12].copy_from_slice(&PNG_SIGNATURE);
    assert_eq!(detect_format(&data), None);
    assert_eq!(match_at(&data, 4), Some(ImageFormat::Png));
}

#[test]
fn test_buffer_shorter_than_any_signature() {
    assert_eq!(MIN_SIGNATURE_LEN, 2);
    assert_eq!(detect_format_label(&[0x42]), "UNKNOWN");
    assert_eq!(detect_format_label(&[]), "UNKNOWN");
}

#[test]
fn test_gif87a_and_gif89a_both_match() {
    assert_eq!(detect_format(b"GIF87a"), Some(ImageFormat::Gif));
    assert_eq!(detect_format(b"GIF89a"), Some(ImageFormat::Gif));
}

#[test]
fn test_format_metadata() {
    assert_eq!(ImageFormat::Png.extension(), "png");
    assert_eq!(ImageFormat::Jpeg.extension(), "jpg");
    assert_eq!(ImageFormat::Gif.mime_type(), "image/gif");
    assert_eq!(ImageFormat::Bmp.mime_type(), "image/bmp");
    assert_eq!(format_extension(None), "bin");
    assert_eq!(format_mime_type(None), "application/octet-stream");
    assert_eq!(ImageFormat::Jpeg.to_string(), "JPEG");
}
