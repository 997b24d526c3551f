//! Tests for heatmap rendering.
//!
//! Decodes the produced PNG to check:
//! - Orientation (vertical flip, half-width roll)
//! - NaN padding rows
//! - Percentile scaling and transparent missing data

use std::io::Read;

use renderer::{inferno_palette, render_heatmap, HeatmapOptions, TRANSPARENT_INDEX};

// ============================================================================
// Helper functions
// ============================================================================

struct DecodedPng {
    width: u32,
    height: u32,
    color_type: u8,
    palette: Vec<u8>,
    alpha: Vec<u8>,
    indices: Vec<u8>,
}

/// Minimal decoder for the unfiltered indexed PNGs the renderer writes.
fn decode(png: &[u8]) -> DecodedPng {
    assert_eq!(&png[..8], &[137, 80, 78, 71, 13, 10, 26, 10]);

    let mut pos = 8;
    let mut ihdr = Vec::new();
    let mut palette = Vec::new();
    let mut alpha = Vec::new();
    let mut idat = Vec::new();
    while pos < png.len() {
        let len = u32::from_be_bytes(png[pos..pos + 4].try_into().unwrap()) as usize;
        let kind = &png[pos + 4..pos + 8];
        let data = &png[pos + 8..pos + 8 + len];
        match kind {
            b"IHDR" => ihdr = data.to_vec(),
            b"PLTE" => palette = data.to_vec(),
            b"tRNS" => alpha = data.to_vec(),
            b"IDAT" => idat.extend_from_slice(data),
            _ => {}
        }
        pos += 12 + len;
    }

    let width = u32::from_be_bytes(ihdr[0..4].try_into().unwrap());
    let height = u32::from_be_bytes(ihdr[4..8].try_into().unwrap());

    let mut raw = Vec::new();
    flate2::read::ZlibDecoder::new(&idat[..])
        .read_to_end(&mut raw)
        .unwrap();

    let stride = width as usize + 1;
    let mut indices = Vec::with_capacity((width * height) as usize);
    for row in raw.chunks(stride) {
        assert_eq!(row[0], 0, "renderer writes unfiltered scanlines");
        indices.extend_from_slice(&row[1..]);
    }

    DecodedPng {
        width,
        height,
        color_type: ihdr[9],
        palette,
        alpha,
        indices,
    }
}

fn full_range() -> HeatmapOptions {
    HeatmapOptions {
        pad_bottom: 2,
        low_percentile: 0.0,
        high_percentile: 100.0,
        ..HeatmapOptions::default()
    }
}

// ============================================================================
// Layout
// ============================================================================

#[test]
fn test_header_and_palette() {
    let data: Vec<f32> = (0..8).map(|v| v as f32).collect();
    let png = decode(&render_heatmap(&data, 4, 2, &full_range()).unwrap());

    assert_eq!(png.width, 4);
    assert_eq!(png.height, 4);
    assert_eq!(png.color_type, 3);
    assert_eq!(png.palette.len(), 256 * 3);
    assert_eq!(png.alpha.len(), 256);
    assert_eq!(png.alpha[TRANSPARENT_INDEX as usize], 0);
    assert!(png.alpha[..255].iter().all(|&a| a == 255));

    let expected = inferno_palette();
    assert_eq!(&png.palette[..3], &[expected[0].0, expected[0].1, expected[0].2]);
}

#[test]
fn test_orientation_and_padding() {
    // North row: 0 1 2 3, south row: 4 5 6 7
    let data: Vec<f32> = (0..8).map(|v| v as f32).collect();
    let png = decode(&render_heatmap(&data, 4, 2, &full_range()).unwrap());

    // Top image row is the south row rolled by two: 6 7 4 5
    assert_eq!(png.indices[1], 254);
    // Second row is the north row rolled by two: 2 3 0 1
    assert_eq!(png.indices[4 + 2], 0);
    assert!(png.indices[4..8].iter().all(|&i| i < TRANSPARENT_INDEX));
    // Padding rows are transparent.
    assert!(png.indices[8..].iter().all(|&i| i == TRANSPARENT_INDEX));
}

#[test]
fn test_default_padding() {
    let png = decode(&render_heatmap(&[1.0; 6], 3, 2, &HeatmapOptions::default()).unwrap());
    assert_eq!(png.height, 122);
    assert_eq!(png.indices.len(), 3 * 122);
    assert!(png.indices[6..].iter().all(|&i| i == TRANSPARENT_INDEX));
}

// ============================================================================
// Scaling
// ============================================================================

#[test]
fn test_outliers_clipped_by_percentiles() {
    // One extreme value among 100 ordinary ones.
    let mut data: Vec<f32> = (0..100).map(|v| v as f32).collect();
    data.push(1.0e6);
    data.push(-1.0e6);
    let options = HeatmapOptions {
        pad_bottom: 0,
        ..HeatmapOptions::default()
    };
    let png = decode(&render_heatmap(&data, data.len(), 1, &options).unwrap());

    assert!(png.indices.contains(&0));
    assert!(png.indices.contains(&254));
    // Mid-range values land mid-palette instead of collapsing to zero.
    let mid = png.indices.iter().filter(|&&i| (100..=155).contains(&i)).count();
    assert!(mid > 10);
}

#[test]
fn test_constant_field_is_lowest_shade() {
    let mut data = vec![5.0f32; 4];
    data[3] = f32::NAN;
    let options = HeatmapOptions {
        pad_bottom: 0,
        ..HeatmapOptions::default()
    };
    let png = decode(&render_heatmap(&data, 2, 2, &options).unwrap());

    // Orientation moves the NaN from (1, 1) to (0, 0).
    assert_eq!(png.indices, vec![TRANSPARENT_INDEX, 0, 0, 0]);
}

#[test]
fn test_all_missing_is_transparent() {
    let png = decode(&render_heatmap(&[f32::NAN; 4], 2, 2, &full_range()).unwrap());
    assert!(png.indices.iter().all(|&i| i == TRANSPARENT_INDEX));
}
