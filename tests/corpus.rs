//! Converter, filters and color engine on synthetic patterns.

use enough::Unstoppable;
use zenraster::color::{self, Cmyk, Hsv, Rgb};
use zenraster::filter::{self, GrayscaleMethod};
use zenraster::surface::{self, CubeFace};
use zenraster::*;

fn checkerboard(w: u32, h: u32) -> PixelBuffer {
    let data = (0..w * h)
        .flat_map(|i| {
            let (x, y) = (i % w, i / w);
            if (x + y) % 2 == 0 {
                [200, 220, 240, 255]
            } else {
                [10, 40, 70, 255]
            }
        })
        .collect();
    PixelBuffer::new(w, h, data).unwrap()
}

fn noise(w: u32, h: u32) -> PixelBuffer {
    let mut state: u32 = 0xDEAD_BEEF;
    let data = (0..w * h * 4)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state as u8
        })
        .collect();
    PixelBuffer::new(w, h, data).unwrap()
}

// ── Converter ────────────────────────────────────────────────────────

#[test]
fn gray_128_expands_to_opaque_rgba() {
    let image: RasterImage = GrayImage::new(1, 1, 255, vec![128]).unwrap().into();
    let buf = to_pixel_buffer(&image);
    assert_eq!(buf.as_bytes(), &[128, 128, 128, 255]);
}

#[test]
fn samples_are_rescaled_to_bytes() {
    let image: RasterImage = RgbImage::new(2, 1, 1000, vec![0, 500, 1000, 1000, 4, 999])
        .unwrap()
        .into();
    let buf = to_pixel_buffer(&image);
    assert_eq!(buf.as_bytes(), &[0, 127, 255, 255, 255, 1, 254, 255]);
}

#[test]
fn bits_expand_to_black_and_white() {
    let image: RasterImage = BitImage::new(2, 1, vec![true, false]).unwrap().into();
    let buf = to_pixel_buffer(&image);
    assert_eq!(buf.as_bytes(), &[0, 0, 0, 255, 255, 255, 255, 255]);
}

#[test]
fn pixel_buffer_back_to_each_kind() {
    let buf = PixelBuffer::new(2, 1, vec![255, 0, 0, 9, 250, 250, 250, 0]).unwrap();

    let RasterImage::Rgb(rgb) = from_pixel_buffer(&buf, RasterKind::Rgb) else {
        panic!("expected rgb");
    };
    assert_eq!(rgb.samples(), &[255, 0, 0, 250, 250, 250]);
    assert_eq!(rgb.max_value(), 255);

    let RasterImage::Gray(gray) = from_pixel_buffer(&buf, RasterKind::Gray) else {
        panic!("expected gray");
    };
    // 0.299 * 255 = 76.245
    assert_eq!(gray.samples(), &[76, 250]);

    let RasterImage::Bit(bits) = from_pixel_buffer(&buf, RasterKind::Bit) else {
        panic!("expected bits");
    };
    assert_eq!(bits.pixels(), &[true, false]);
}

#[test]
fn bit_from_buffer_agrees_with_gray_route() {
    // luma 127.686 truncates to gray 127, which is below 255 / 2
    let buf = PixelBuffer::new(1, 1, vec![0, 168, 255, 255]).unwrap();
    let direct = from_pixel_buffer(&buf, RasterKind::Bit);
    let via_gray = from_pixel_buffer(&buf, RasterKind::Gray).convert(RasterKind::Bit);
    assert_eq!(direct, via_gray);
    let RasterImage::Bit(bits) = direct else {
        panic!("expected bits");
    };
    assert_eq!(bits.pixels(), &[true]);
}

#[test]
fn gray_to_bit_threshold_ties_go_to_background() {
    let image: RasterImage = GrayImage::new(3, 1, 10, vec![4, 5, 6]).unwrap().into();
    let RasterImage::Bit(bits) = image.convert(RasterKind::Bit) else {
        panic!("expected bits");
    };
    assert_eq!(bits.pixels(), &[true, false, false]);
}

#[test]
fn rgb_to_gray_keeps_max_value() {
    let image: RasterImage = RgbImage::new(1, 1, 1000, vec![1000, 1000, 1000])
        .unwrap()
        .into();
    let converted = image.convert(RasterKind::Gray);
    assert_eq!(converted.max_value(), Some(1000));
    let RasterImage::Gray(gray) = converted else {
        panic!("expected gray");
    };
    assert!(gray.samples()[0] >= 999);
}

#[test]
fn legacy_weights_only_when_asked() {
    let image: RasterImage = RgbImage::new(1, 1, 255, vec![100, 0, 0]).unwrap().into();
    let sample = |img: RasterImage| match img {
        RasterImage::Gray(g) => g.samples()[0],
        other => panic!("unexpected {:?}", other.kind()),
    };
    assert_eq!(sample(image.convert(RasterKind::Gray)), 29);
    let legacy = image.convert_with(RasterKind::Gray, LumaWeights::Legacy);
    assert_eq!(sample(legacy), 30);
}

#[test]
fn bit_to_gray_and_back() {
    let image: RasterImage = BitImage::new(3, 1, vec![true, false, true]).unwrap().into();
    let gray = image.convert(RasterKind::Gray);
    assert_eq!(gray.max_value(), Some(255));
    assert_eq!(gray.convert(RasterKind::Bit), image);
    let rgb = image.convert(RasterKind::Rgb);
    assert_eq!(rgb.convert(RasterKind::Bit), image);
}

#[test]
fn kind_names_parse() {
    assert_eq!("PGM".parse::<RasterKind>().unwrap(), RasterKind::Gray);
    assert_eq!("rgb".parse::<RasterKind>().unwrap(), RasterKind::Rgb);
    assert!(matches!(
        "cmyk".parse::<RasterKind>(),
        Err(RasterError::UnsupportedConversion(_))
    ));
}

#[test]
fn invalid_images_are_rejected() {
    assert!(matches!(
        GrayImage::new(2, 2, 255, vec![0; 3]),
        Err(RasterError::InvalidArgument(_))
    ));
    assert!(matches!(
        GrayImage::new(1, 1, 10, vec![11]),
        Err(RasterError::InvalidArgument(_))
    ));
    assert!(matches!(
        BitImage::new(0, 1, vec![]),
        Err(RasterError::InvalidArgument(_))
    ));
    assert!(matches!(
        PixelBuffer::new(2, 2, vec![0; 15]),
        Err(RasterError::InvalidArgument(_))
    ));
}

// ── Filters ──────────────────────────────────────────────────────────

#[test]
fn median_keeps_uniform_color() {
    let buf = PixelBuffer::filled(9, 7, [12, 34, 56, 78]).unwrap();
    assert_eq!(filter::median(&buf), buf);
}

#[test]
fn sobel_on_uniform_is_zero_inside_and_copies_border() {
    let buf = PixelBuffer::filled(6, 5, [90, 120, 150, 200]).unwrap();
    let out = filter::sobel(&buf);
    for y in 0..5 {
        for x in 0..6 {
            let px = out.get(x, y).unwrap();
            if x == 0 || y == 0 || x == 5 || y == 4 {
                assert_eq!(px, buf.get(x, y).unwrap(), "border ({x},{y})");
            } else {
                assert_eq!((px.r, px.g, px.b, px.a), (0, 0, 0, 200), "inside ({x},{y})");
            }
        }
    }
}

#[test]
fn tiny_buffers_are_all_border_for_sobel() {
    for (w, h) in [(1, 1), (2, 2), (1, 5), (5, 2)] {
        let buf = noise(w, h);
        assert_eq!(filter::sobel(&buf), buf);
    }
}

#[test]
fn filters_never_touch_alpha() {
    let src = noise(11, 9);
    let alphas: Vec<u8> = src.pixels().iter().map(|p| p.a).collect();
    let outputs = [
        filter::add(&src, [40, -40, 300]),
        filter::multiply(&src, [0.5, 2.0, 1.0]),
        filter::divide(&src, [0.0, 3.0, 0.25]),
        filter::brightness(&src, -70),
        filter::grayscale(&src, GrayscaleMethod::MaxValue),
        filter::median(&src),
        filter::high_pass(&src),
        filter::gaussian_blur(&src),
    ];
    for out in outputs {
        let got: Vec<u8> = out.pixels().iter().map(|p| p.a).collect();
        assert_eq!(got, alphas);
    }
}

#[test]
fn filters_do_not_mutate_input() {
    let src = checkerboard(6, 6);
    let copy = src.clone();
    let _ = filter::gaussian_blur(&src);
    let _ = filter::high_pass(&src);
    let _ = filter::sobel(&src);
    assert_eq!(src, copy);
}

#[test]
fn high_pass_sharpens_checkerboard() {
    let src = checkerboard(5, 5);
    let out = filter::high_pass(&src);
    // bright cell surrounded by dark ones saturates
    assert_eq!(out.get(2, 2).unwrap().r, 255);
    // dark cell surrounded by bright ones bottoms out
    assert_eq!(out.get(1, 2).unwrap().r, 0);
}

#[test]
fn gaussian_smooths_checkerboard() {
    let src = checkerboard(8, 8);
    let out = filter::gaussian_blur(&src);
    let a = out.get(3, 3).unwrap().r;
    let b = out.get(4, 3).unwrap().r;
    assert!(a.abs_diff(b) < 60, "{a} vs {b}");
}

#[test]
fn pipeline_matches_manual_chain() {
    let src = noise(7, 5);
    let stages = [
        Stage::Brightness(20),
        Stage::Grayscale(GrayscaleMethod::Average),
        Stage::GaussianBlur,
        Stage::Sobel,
    ];
    let pipeline: Pipeline = stages.into_iter().collect();
    let manual = stages.iter().fold(src.clone(), |buf, s| s.apply(&buf));
    assert_eq!(pipeline.run(&src, Unstoppable).unwrap(), manual);
}

// ── Color ────────────────────────────────────────────────────────────

#[test]
fn cmyk_corners() {
    assert_eq!(
        color::cmyk_to_rgb(Cmyk::new(0.0, 0.0, 0.0, 100.0)),
        Rgb::new(0, 0, 0)
    );
    assert_eq!(
        color::cmyk_to_rgb(Cmyk::new(0.0, 0.0, 0.0, 0.0)),
        Rgb::new(255, 255, 255)
    );
    let cyan = color::rgb_to_cmyk(Rgb::new(0, 255, 255));
    assert_eq!((cyan.c, cyan.m, cyan.y, cyan.k), (100.0, 0.0, 0.0, 0.0));
}

#[test]
fn hsv_red_and_green() {
    assert_eq!(
        color::hsv_to_rgb(Hsv::new(0.0, 100.0, 100.0)),
        Rgb::new(255, 0, 0)
    );
    assert_eq!(
        color::hsv_to_rgb(Hsv::new(120.0, 100.0, 100.0)),
        Rgb::new(0, 255, 0)
    );
    let green = Hsv::from_rgb(Rgb::new(0, 255, 0));
    assert_eq!((green.h, green.s, green.v), (120.0, 100.0, 100.0));
}

#[test]
fn hsv_plane_matches_conversion() {
    let plane = surface::hsv_plane(200.0, 11, 11).unwrap();
    let px = plane.get(5, 5).unwrap();
    let expected = color::hsv_to_rgb(Hsv::new(200.0, 50.0, 50.0));
    assert_eq!((px.r, px.g, px.b), (expected.r, expected.g, expected.b));
}

#[test]
fn cube_faces_share_edges() {
    // front's right edge is the right face's left edge (yellow..white)
    let front = surface::cube_face(CubeFace::Front, 16).unwrap();
    let right = surface::cube_face(CubeFace::Right, 16).unwrap();
    for y in 0..16 {
        assert_eq!(front.get(15, y), right.get(0, y));
    }
}
