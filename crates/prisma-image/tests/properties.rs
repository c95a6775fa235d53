//! Property-based tests for the image filters.

use proptest::prelude::*;
use prisma_image::{Image, Kernel, box_blur, convolve, median_filter, sobel};

fn gray_image() -> impl Strategy<Value = Image> {
    (1usize..10, 1usize..10).prop_flat_map(|(w, h)| {
        prop::collection::vec(any::<u8>(), w * h)
            .prop_map(move |data| Image::gray(w, h, data).unwrap())
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// The unit kernel leaves any image untouched.
    #[test]
    fn identity_kernel_is_identity(img in gray_image()) {
        prop_assert_eq!(convolve(&img, &Kernel::identity()).unwrap(), img);
    }

    /// A mean never leaves the range of its inputs.
    #[test]
    fn box_blur_stays_within_input_range(img in gray_image(), size in 1usize..6) {
        let lo = *img.data().iter().min().unwrap();
        let hi = *img.data().iter().max().unwrap();
        let out = box_blur(&img, size).unwrap();
        prop_assert!(out.data().iter().all(|&v| v >= lo && v <= hi));
    }

    /// Median outputs are always values present in the input.
    #[test]
    fn median_picks_existing_values(img in gray_image(), size in 1usize..6) {
        let out = median_filter(&img, size).unwrap();
        for v in out.data() {
            prop_assert!(img.data().contains(v));
        }
    }

    /// Uniform images have no edges.
    #[test]
    fn uniform_sobel_is_zero(w in 1usize..8, h in 1usize..8, v in any::<u8>()) {
        let img = Image::gray(w, h, vec![v; w * h]).unwrap();
        prop_assert!(sobel(&img).unwrap().data().iter().all(|&p| p == 0));
    }
}
