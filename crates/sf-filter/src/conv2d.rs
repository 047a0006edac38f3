use sf_core::{BorderMode, Image, ImageView, map_index};

/// Correlates `src` with a dense kernel of odd width and height.
///
/// `out(x, y) = sum kernel(i, j) * src(x + i - rx, y + j - ry)` with the
/// kernel anchored at its center `(rx, ry)`. Accumulation is done in `f64`
/// so that zero-mean kernels cancel cleanly on flat regions.
pub fn correlate2d_f32(
    src: &ImageView<'_, f32>,
    kernel: &Image<f64>,
    border: BorderMode<f32>,
) -> Image<f32> {
    assert!(
        kernel.width() % 2 == 1 && kernel.height() % 2 == 1,
        "kernel dimensions must be odd"
    );

    let (w, h) = (src.width(), src.height());
    let mut out = Image::new_fill(w, h, 0.0f32);
    if w == 0 || h == 0 {
        return out;
    }

    let rx = kernel.width() / 2;
    let ry = kernel.height() / 2;
    let interior_x = rx..w.saturating_sub(rx);
    let interior_y = ry..h.saturating_sub(ry);

    for y in 0..h {
        let row_interior = interior_y.contains(&y);
        let dst = out.row_mut(y);
        for (x, d) in dst.iter_mut().enumerate() {
            *d = if row_interior && interior_x.contains(&x) {
                correlate_interior(src, kernel, x - rx, y - ry)
            } else {
                correlate_border(src, kernel, x, y, &border)
            } as f32;
        }
    }

    out
}

#[inline]
fn correlate_interior(src: &ImageView<'_, f32>, kernel: &Image<f64>, x0: usize, y0: usize) -> f64 {
    let kw = kernel.width();
    let mut acc = 0.0f64;
    for j in 0..kernel.height() {
        let src_row = &src.row(y0 + j)[x0..x0 + kw];
        for (&kv, &sv) in kernel.row(j).iter().zip(src_row) {
            acc += kv * sv as f64;
        }
    }
    acc
}

fn correlate_border(
    src: &ImageView<'_, f32>,
    kernel: &Image<f64>,
    x: usize,
    y: usize,
    border: &BorderMode<f32>,
) -> f64 {
    let rx = (kernel.width() / 2) as isize;
    let ry = (kernel.height() / 2) as isize;
    let mut acc = 0.0f64;

    for j in 0..kernel.height() {
        let sy = y as isize + j as isize - ry;
        let my = map_index(sy, src.height(), border);
        for (i, &kv) in kernel.row(j).iter().enumerate() {
            let sx = x as isize + i as isize - rx;
            let v = match (border, my, map_index(sx, src.width(), border)) {
                (BorderMode::Constant(c), _, _)
                    if sx < 0
                        || sy < 0
                        || sx >= src.width() as isize
                        || sy >= src.height() as isize =>
                {
                    *c
                }
                (BorderMode::Constant(_), _, _) => {
                    // SAFETY: the guard above rejected every out-of-range index.
                    unsafe { *src.get_unchecked(sx as usize, sy as usize) }
                }
                (_, Some(my), Some(mx)) => {
                    // SAFETY: `map_index` returns indices in `[0, len)`.
                    unsafe { *src.get_unchecked(mx, my) }
                }
                _ => unreachable!("non-constant border always maps on a non-empty image"),
            };
            acc += kv * v as f64;
        }
    }
    acc
}

#[cfg(test)]
mod tests {
    use sf_core::{BorderMode, Image};

    use crate::conv2d::correlate2d_f32;

    fn naive_reflect(src: &Image<f32>, kernel: &Image<f64>) -> Image<f32> {
        let reflect = |i: isize, n: usize| -> usize {
            sf_core::map_index(i, n, &BorderMode::<f32>::Reflect101).expect("non-empty")
        };
        let (rx, ry) = ((kernel.width() / 2) as isize, (kernel.height() / 2) as isize);
        Image::from_fn(src.width(), src.height(), |x, y| {
            let mut acc = 0.0f64;
            for j in 0..kernel.height() {
                for i in 0..kernel.width() {
                    let sx = reflect(x as isize + i as isize - rx, src.width());
                    let sy = reflect(y as isize + j as isize - ry, src.height());
                    let s = src.get(sx, sy).copied().unwrap_or_default();
                    acc += kernel.get(i, j).copied().unwrap_or_default() * s as f64;
                }
            }
            acc as f32
        })
    }

    #[test]
    fn impulse_kernel_is_identity() {
        let src = Image::from_fn(5, 4, |x, y| (x * 3 + y) as f32);
        let mut kernel = Image::new_fill(3, 3, 0.0f64);
        kernel.row_mut(1)[1] = 1.0;

        let out = correlate2d_f32(&src.as_view(), &kernel, BorderMode::Reflect101);
        assert_eq!(out.data(), src.data());
    }

    #[test]
    fn correlation_does_not_flip_kernel() {
        // Kernel picks the right-hand neighbor.
        let src = Image::from_fn(4, 1, |x, _| x as f32);
        let kernel = Image::from_vec(3, 1, vec![0.0f64, 0.0, 1.0]).expect("valid kernel");
        let out = correlate2d_f32(&src.as_view(), &kernel, BorderMode::Clamp);
        assert_eq!(out.data(), &[1.0, 2.0, 3.0, 3.0]);
    }

    #[test]
    fn matches_naive_reflect101_including_borders() {
        let src = Image::from_fn(9, 6, |x, y| ((x * 7 + y * 13) % 11) as f32 / 10.0);
        let kernel = Image::from_fn(5, 5, |i, j| (i as f64 - 2.0) * 0.3 + (j as f64) * 0.1);

        let fast = correlate2d_f32(&src.as_view(), &kernel, BorderMode::Reflect101);
        let slow = naive_reflect(&src, &kernel);
        for (a, b) in fast.data().iter().zip(slow.data()) {
            assert!((a - b).abs() < 1e-5, "{a} vs {b}");
        }
    }

    #[test]
    fn kernel_larger_than_image_still_maps_borders() {
        let src = Image::from_fn(2, 2, |x, y| (x + 2 * y) as f32);
        let kernel = Image::new_fill(7, 7, 1.0f64 / 49.0);
        let fast = correlate2d_f32(&src.as_view(), &kernel, BorderMode::Reflect101);
        let slow = naive_reflect(&src, &kernel);
        assert_eq!(fast.dims(), (2, 2));
        for (a, b) in fast.data().iter().zip(slow.data()) {
            assert!((a - b).abs() < 1e-5);
        }
    }

    #[test]
    fn constant_border_fills_outside() {
        let src = Image::new_fill(3, 3, 1.0f32);
        let kernel = Image::new_fill(3, 3, 1.0f64);
        let out = correlate2d_f32(&src.as_view(), &kernel, BorderMode::Constant(0.0));
        assert_eq!(out.get(0, 0), Some(&4.0));
        assert_eq!(out.get(1, 1), Some(&9.0));
        assert_eq!(out.get(1, 0), Some(&6.0));
    }
}
