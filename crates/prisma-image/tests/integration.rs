//! Integration tests for prisma-image.
//!
//! Exercises the public filters end to end on small synthetic images.

use prisma_core::Error;
use prisma_image::{
    Image, ImageFilter, Kernel, PixelFormat, box_blur, color_sobel, convolve, gaussian_blur,
    median_filter, sobel,
};

/// Deterministic RGB test pattern.
fn pattern(width: usize, height: usize) -> Image {
    let data = (0..width * height * 3)
        .map(|i| ((i * 53 + i / 7) % 256) as u8)
        .collect();
    Image::rgb(width, height, data).unwrap()
}

#[test]
fn one_pixel_identity_kernel() {
    let img = Image::rgb(1, 1, vec![12, 34, 56]).unwrap();
    assert_eq!(convolve(&img, &Kernel::identity()).unwrap(), img);
    let explicit = Kernel::from_weights(1, vec![1.0]).unwrap();
    assert_eq!(convolve(&img, &explicit).unwrap(), img);
}

#[test]
fn box_blur_of_checkerboard_with_size_one() {
    let img = Image::gray(2, 2, vec![0, 255, 255, 0]).unwrap();
    assert_eq!(box_blur(&img, 1).unwrap().data(), &[0, 255, 255, 0]);
}

#[test]
fn blur_preserves_dimensions_and_format() {
    let img = pattern(9, 4);
    for out in [
        box_blur(&img, 3).unwrap(),
        gaussian_blur(&img, 5, 1.0).unwrap(),
        median_filter(&img, 3).unwrap(),
    ] {
        assert_eq!((out.width(), out.height(), out.format()), (9, 4, PixelFormat::Rgb));
    }
}

#[test]
fn blur_reduces_contrast() {
    let img = pattern(12, 12);
    let spread = |i: &Image| {
        let max = i.data().iter().copied().max().unwrap_or(0);
        let min = i.data().iter().copied().min().unwrap_or(0);
        max - min
    };
    assert!(spread(&box_blur(&img, 5).unwrap()) < spread(&img));
}

#[test]
fn sobel_output_is_gray_and_stretched() {
    let mut data = vec![0u8; 8 * 8 * 3];
    // Bright square in the middle.
    for y in 2..6 {
        for x in 2..6 {
            let i = (y * 8 + x) * 3;
            data[i..i + 3].copy_from_slice(&[200, 100, 50]);
        }
    }
    let img = Image::rgb(8, 8, data).unwrap();
    let edges = sobel(&img).unwrap();
    assert_eq!(edges.format(), PixelFormat::Gray);
    assert_eq!(edges.data().iter().copied().max(), Some(255));
    // Square interior and far background are flat.
    assert_eq!(edges.pixel(0, 0), &[0]);
    assert_eq!(edges.pixel(7, 7), &[0]);

    let colored = color_sobel(&img).unwrap();
    assert_eq!(colored.format(), PixelFormat::Rgb);
    assert_eq!(colored.data().iter().copied().max(), Some(255));
    assert_eq!(colored.pixel(0, 0), &[0, 0, 0]);
}

#[test]
fn sobel_of_uniform_image_is_zero() {
    for format in [PixelFormat::Gray, PixelFormat::Rgb] {
        let img = Image::filled(7, 3, format, 90);
        assert!(sobel(&img).unwrap().data().iter().all(|&v| v == 0));
    }
}

#[test]
fn named_filters_match_direct_calls() {
    let img = pattern(6, 5);
    assert_eq!(
        ImageFilter::from_name("box_blur", 3).unwrap().apply(&img).unwrap(),
        box_blur(&img, 3).unwrap()
    );
    assert_eq!(
        ImageFilter::from_name("gaussian_blur", 6).unwrap().apply(&img).unwrap(),
        gaussian_blur(&img, 7, 7.0 / 3.0).unwrap()
    );
    assert_eq!(
        ImageFilter::Sobel.apply(&img).unwrap(),
        sobel(&img).unwrap()
    );
}

#[test]
fn errors_are_reported() {
    assert!(matches!(
        Image::gray(3, 3, vec![0; 8]),
        Err(Error::InvalidArgument { .. })
    ));
    assert!(matches!(
        gaussian_blur(&pattern(2, 2), 3, 0.0),
        Err(Error::InvalidArgument { name: "sigma", .. })
    ));
    let flat = Image::gray(3, 1, vec![100; 3]).unwrap();
    for sigma in [1e-200, 1e200] {
        assert!(matches!(
            gaussian_blur(&flat, 3, sigma),
            Err(Error::InvalidArgument { name: "sigma", .. })
        ));
    }
    assert!(matches!(
        Image::gray(usize::MAX, 2, Vec::new()),
        Err(Error::InvalidArgument { name: "data", .. })
    ));
    assert!(matches!(
        ImageFilter::from_name("emboss", 3),
        Err(Error::UnknownIdentifier { kind: "image filter", .. })
    ));
}
