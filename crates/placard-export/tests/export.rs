use image::{Rgba, RgbaImage};
use placard_core::compress::CompressOptions;
use placard_export::{export, PNG_SIGNATURE};

#[test]
fn test_export_when_canvas_is_large_then_png_is_bounded() {
    let canvas = RgbaImage::from_pixel(1800, 1200, Rgba([200, 100, 50, 255]));
    let png = export(&canvas, &CompressOptions::default()).unwrap();

    assert_eq!(&png[..8], &PNG_SIGNATURE);
    let decoded = image::load_from_memory(&png).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (1200, 800));
}

#[test]
fn test_export_when_ratio_is_one_then_size_only_clamps() {
    let options = CompressOptions {
        resize_ratio: 1.0,
        ..CompressOptions::default()
    };
    let canvas = RgbaImage::from_pixel(640, 480, Rgba([0, 0, 0, 0]));
    let png = export(&canvas, &options).unwrap();

    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (640, 480));
    assert_eq!(decoded.get_pixel(10, 10)[3], 0);
}
