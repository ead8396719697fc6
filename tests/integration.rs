use image::{Rgb, RgbImage};

use pano_canvas::{canvas, mask, MaskStrategy, PanoEngine, Placement, PipelineOptions};

fn textured(w: u32, h: u32) -> RgbImage {
    RgbImage::from_fn(w, h, |x, y| {
        #[allow(clippy::cast_possible_truncation)]
        let (r, g, b) = (
            ((x * 7 + 13) % 256) as u8,
            ((y * 11 + 29) % 256) as u8,
            ((x + y) % 256) as u8,
        );
        Rgb([r, g, b])
    })
}

#[test]
fn canvas_dimensions_hold_for_arbitrary_inputs() {
    for (w, h) in [(800, 300), (800, 500), (801, 401), (33, 900), (1024, 512)] {
        let normalized = canvas::normalize(&textured(w, h)).unwrap();
        assert_eq!(normalized.width(), w);
        assert_eq!(normalized.height(), w / 2);
    }
}

#[test]
fn already_two_to_one_composite_is_unchanged() {
    let src = textured(640, 320);
    let normalized = canvas::normalize(&src).unwrap();
    assert_eq!(normalized.image, src);

    let fill = mask::synthesize(&normalized, MaskStrategy::Geometric).unwrap();
    assert!(fill.pixels().all(|px| px[0] == mask::KEEP));
}

#[test]
fn pad_example_800x300_masks_fifty_rows_top_and_bottom() {
    let src = textured(800, 300);
    let normalized = canvas::normalize(&src).unwrap();

    assert_eq!(normalized.height(), 400);
    assert_eq!(
        normalized.placement,
        Placement::Padded {
            y_offset: 50,
            source_h: 300
        }
    );

    // The copied band reproduces the composite pixel-for-pixel.
    for y in 0..300 {
        for x in [0, 399, 799] {
            assert_eq!(normalized.image.get_pixel(x, y + 50), src.get_pixel(x, y));
        }
    }

    let fill = mask::synthesize(&normalized, MaskStrategy::Geometric).unwrap();
    for y in 0..400u32 {
        let expect = if (50..350).contains(&y) {
            mask::KEEP
        } else {
            mask::FILL
        };
        assert_eq!(fill.get_pixel(0, y)[0], expect, "row {y}");
        assert_eq!(fill.get_pixel(799, y)[0], expect, "row {y}");
    }
}

#[test]
fn crop_example_800x500_keeps_center_band_with_empty_mask() {
    let src = textured(800, 500);
    let normalized = canvas::normalize(&src).unwrap();

    assert_eq!(normalized.placement, Placement::Cropped { start_y: 50 });
    for y in 0..400 {
        for x in [0, 250, 799] {
            assert_eq!(normalized.image.get_pixel(x, y), src.get_pixel(x, y + 50));
        }
    }

    let fill = mask::synthesize(&normalized, MaskStrategy::Geometric).unwrap();
    assert!(fill.pixels().all(|px| px[0] == mask::KEEP));
}

#[test]
fn both_strategies_emit_strictly_binary_masks() {
    for (w, h) in [(200, 60), (200, 150), (101, 50)] {
        let normalized = canvas::normalize(&textured(w, h)).unwrap();
        for strategy in [MaskStrategy::Geometric, MaskStrategy::Threshold] {
            let fill = mask::synthesize(&normalized, strategy).unwrap();
            assert_eq!(fill.dimensions(), normalized.image.dimensions());
            for px in fill.pixels() {
                assert!(px[0] == mask::FILL || px[0] == mask::KEEP);
            }
        }
    }
}

#[test]
fn dilated_mask_is_a_superset_of_its_seed() {
    let src = textured(300, 100);
    let normalized = canvas::normalize(&src).unwrap();
    let seed = mask::threshold_mask(&normalized.image, 1).unwrap();
    let grown = mask::threshold_mask(&normalized.image, mask::DILATION_KERNEL).unwrap();

    for (x, y, px) in seed.enumerate_pixels() {
        if px[0] == mask::FILL {
            assert_eq!(grown.get_pixel(x, y)[0], mask::FILL);
        }
    }
}

#[test]
fn failed_stitch_uses_first_image_and_reports_a_notice() {
    // The default engine has no stitching backend, so two inputs always
    // take the fallback path.
    let first = textured(400, 150);
    let second = textured(400, 180);

    let engine = PanoEngine::new();
    let outcome = engine
        .run_from_images(
            vec![first.clone(), second],
            None,
            &PipelineOptions::default(),
        )
        .unwrap();

    assert!(outcome
        .notes
        .iter()
        .any(|n| n.contains("first input image")));

    // The returned canvas embeds the first image, not the second.
    let decoded = image::load_from_memory(&outcome.image_png)
        .unwrap()
        .to_rgb8();
    assert_eq!(decoded.dimensions(), (400, 200));
    for y in 0..150 {
        assert_eq!(decoded.get_pixel(200, y + 25), first.get_pixel(200, y));
    }
}

#[test]
fn run_without_credential_round_trips_the_canvas() {
    let engine = PanoEngine::new();
    let outcome = engine
        .run_from_images(vec![textured(120, 60)], None, &PipelineOptions::default())
        .unwrap();

    let decoded = image::load_from_memory(&outcome.image_png)
        .unwrap()
        .to_rgb8();
    assert_eq!(decoded, textured(120, 60));
    assert!(outcome.notes.iter().any(|n| n.contains("inpaint skipped")));
}
