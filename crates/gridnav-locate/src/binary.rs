//! Global thresholding into a binary foreground mask.

use gridnav_core::GrayImageView;
use serde::{Deserialize, Serialize};

/// Which side of the threshold counts as foreground.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    /// Foreground pixels are darker than the threshold (markers, tape
    /// outlines on a light floor).
    #[default]
    Dark,
    /// Foreground pixels are brighter than the threshold.
    Bright,
}

/// Otsu threshold over the full image histogram.
pub fn otsu_threshold(image: &GrayImageView<'_>) -> u8 {
    let mut hist = [0u64; 256];
    for &v in image.data {
        hist[v as usize] += 1;
    }

    let total = image.data.len() as f64;
    if total < 1.0 {
        return 127;
    }

    let mut sum_total = 0.0_f64;
    for (i, &h) in hist.iter().enumerate() {
        sum_total += i as f64 * h as f64;
    }

    let mut sum_b = 0.0_f64;
    let mut w_b = 0.0_f64;
    let mut best_var = -1.0_f64;
    let mut best_t = 127u8;

    for (t, &h) in hist.iter().enumerate() {
        w_b += h as f64;
        if w_b < 1.0 {
            continue;
        }
        let w_f = total - w_b;
        if w_f < 1.0 {
            break;
        }

        sum_b += t as f64 * h as f64;
        let m_b = sum_b / w_b;
        let m_f = (sum_total - sum_b) / w_f;
        let var_between = w_b * w_f * (m_b - m_f) * (m_b - m_f);
        if var_between > best_var {
            best_var = var_between;
            best_t = t as u8;
        }
    }

    best_t
}

/// Binarize into a row-major 0/1 mask, same dimensions as the input.
///
/// The threshold value itself belongs to the dark class, matching what
/// [`otsu_threshold`] reports.
pub fn binarize(image: &GrayImageView<'_>, threshold: u8, polarity: Polarity) -> Vec<u8> {
    image
        .data
        .iter()
        .map(|&v| {
            let fg = match polarity {
                Polarity::Dark => v <= threshold,
                Polarity::Bright => v > threshold,
            };
            fg as u8
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridnav_core::GrayImage;

    #[test]
    fn otsu_separates_two_populations() {
        let img = GrayImage::from_fn(16, 16, |x, _| if x < 8 { 30 } else { 220 });
        let t = otsu_threshold(&img.view());
        assert!((30..220).contains(&t), "threshold {t} outside both modes");
    }

    #[test]
    fn binarize_respects_polarity() {
        let img = GrayImage::from_fn(2, 1, |x, _| if x == 0 { 10 } else { 200 });
        let dark = binarize(&img.view(), 100, Polarity::Dark);
        let bright = binarize(&img.view(), 100, Polarity::Bright);
        assert_eq!(dark, vec![1, 0]);
        assert_eq!(bright, vec![0, 1]);
    }
}
