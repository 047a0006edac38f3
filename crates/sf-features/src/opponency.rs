//! Double-opponent color maps.
//!
//! Both maps are normalized by the intensity plane of the same level and
//! forced to zero wherever that intensity is not positive.

use sf_core::{Error, Image};

fn check_shapes(reference: &Image<f32>, others: &[&Image<f32>]) -> Result<(), Error> {
    for other in others {
        if other.dims() != reference.dims() {
            return Err(Error::ShapeMismatch {
                expected: reference.dims(),
                actual: other.dims(),
            });
        }
    }
    Ok(())
}

#[inline]
fn ratio(num: f32, intensity: f32) -> f32 {
    if intensity > 0.0 { num / intensity } else { 0.0 }
}

/// `|R - G| / I`, or 0 where `I <= 0`.
pub fn red_green(
    red: &Image<f32>,
    green: &Image<f32>,
    intensity: &Image<f32>,
) -> Result<Image<f32>, Error> {
    check_shapes(intensity, &[red, green])?;

    let data = red
        .data()
        .iter()
        .zip(green.data())
        .zip(intensity.data())
        .map(|((&r, &g), &i)| ratio((r - g).abs(), i))
        .collect();
    Image::from_vec(intensity.width(), intensity.height(), data)
}

/// `|B - min(R, G)| / I`, or 0 where `I <= 0`.
pub fn blue_yellow(
    red: &Image<f32>,
    green: &Image<f32>,
    blue: &Image<f32>,
    intensity: &Image<f32>,
) -> Result<Image<f32>, Error> {
    check_shapes(intensity, &[red, green, blue])?;

    let data = red
        .data()
        .iter()
        .zip(green.data())
        .zip(blue.data())
        .zip(intensity.data())
        .map(|(((&r, &g), &b), &i)| ratio((b - r.min(g)).abs(), i))
        .collect();
    Image::from_vec(intensity.width(), intensity.height(), data)
}

#[cfg(test)]
mod tests {
    use sf_core::{Error, Image};

    use crate::opponency::{blue_yellow, red_green};

    fn plane(values: &[f32]) -> Image<f32> {
        Image::from_vec(values.len(), 1, values.to_vec()).expect("valid plane")
    }

    #[test]
    fn pure_primaries() {
        // red, green, blue, yellow, gray
        let r = plane(&[1.0, 0.0, 0.0, 1.0, 0.5]);
        let g = plane(&[0.0, 1.0, 0.0, 1.0, 0.5]);
        let b = plane(&[0.0, 0.0, 1.0, 0.0, 0.5]);
        let i = plane(&[1.0, 1.0, 1.0, 1.0, 0.5]);

        let rg = red_green(&r, &g, &i).expect("same shapes");
        let by = blue_yellow(&r, &g, &b, &i).expect("same shapes");

        assert_eq!(rg.data(), &[1.0, 1.0, 0.0, 0.0, 0.0]);
        assert_eq!(by.data(), &[0.0, 0.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn zero_intensity_gives_zero() {
        let r = plane(&[0.3, 0.0]);
        let g = plane(&[0.1, 0.0]);
        let b = plane(&[0.7, 0.0]);
        let i = plane(&[0.0, -0.1]);

        let rg = red_green(&r, &g, &i).expect("same shapes");
        let by = blue_yellow(&r, &g, &b, &i).expect("same shapes");
        assert_eq!(rg.data(), &[0.0, 0.0]);
        assert_eq!(by.data(), &[0.0, 0.0]);
    }

    #[test]
    fn maps_are_finite_and_bounded_when_intensity_is_max() {
        let n = 64;
        let r = Image::from_fn(n, 1, |x, _| ((x * 7) % 11) as f32 / 10.0);
        let g = Image::from_fn(n, 1, |x, _| ((x * 3) % 5) as f32 / 4.0);
        let b = Image::from_fn(n, 1, |x, _| ((x * 5) % 13) as f32 / 12.0);
        let i = Image::from_fn(n, 1, |x, y| {
            let (r, g, b) = (r.get(x, y), g.get(x, y), b.get(x, y));
            match (r, g, b) {
                (Some(r), Some(g), Some(b)) => r.max(*g).max(*b),
                _ => 0.0,
            }
        });

        let rg = red_green(&r, &g, &i).expect("same shapes");
        let by = blue_yellow(&r, &g, &b, &i).expect("same shapes");
        for &v in rg.data().iter().chain(by.data()) {
            assert!(v.is_finite());
            assert!((0.0..=1.0 + 1e-6).contains(&v), "value {v}");
        }
    }

    #[test]
    fn mismatched_shapes_are_rejected() {
        let a = Image::new_fill(4, 4, 1.0f32);
        let b = Image::new_fill(4, 3, 1.0f32);
        let err = red_green(&a, &b, &a).expect_err("shape mismatch");
        assert_eq!(
            err,
            Error::ShapeMismatch {
                expected: (4, 4),
                actual: (4, 3)
            }
        );
    }
}
