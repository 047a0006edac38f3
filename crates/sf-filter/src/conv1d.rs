use sf_core::{BorderMode, Image, ImageView, map_index};

use crate::kernels1d::Kernel1D;

pub fn convolve_f32(
    signal: &[f32],
    kernel: &[f32],
    radius: usize,
    border: BorderMode<f32>,
    out: &mut [f32],
) {
    assert_eq!(out.len(), signal.len(), "out must match signal length");
    assert_eq!(
        kernel.len(),
        2 * radius + 1,
        "kernel len must be 2*radius+1"
    );

    if signal.is_empty() {
        return;
    }

    match border {
        BorderMode::Constant(c) => convolve_constant(signal, kernel, radius, c, out),
        mode @ (BorderMode::Clamp | BorderMode::Reflect101) => {
            convolve_mapped(signal, kernel, radius, &mode, out)
        }
    }
}

/// Separable 2D filtering: `kernel` along rows, then along columns.
pub fn convolve_separable_f32(
    src: &ImageView<'_, f32>,
    kernel: &Kernel1D,
    border: BorderMode<f32>,
) -> Image<f32> {
    let (w, h) = (src.width(), src.height());
    let mut tmp = Image::new_fill(w, h, 0.0f32);
    if w == 0 || h == 0 {
        return tmp;
    }

    for y in 0..h {
        convolve_f32(src.row(y), &kernel.taps, kernel.radius, border, tmp.row_mut(y));
    }

    let mut out = Image::new_fill(w, h, 0.0f32);
    let mut col = vec![0.0f32; h];
    let mut col_out = vec![0.0f32; h];
    for x in 0..w {
        for (y, c) in col.iter_mut().enumerate() {
            *c = tmp.data()[y * w + x];
        }
        convolve_f32(&col, &kernel.taps, kernel.radius, border, &mut col_out);
        let dst = out.data_mut();
        for (y, &v) in col_out.iter().enumerate() {
            dst[y * w + x] = v;
        }
    }

    out
}

fn convolve_mapped(
    signal: &[f32],
    kernel: &[f32],
    radius: usize,
    border: &BorderMode<f32>,
    out: &mut [f32],
) {
    let n = signal.len();
    let klen = kernel.len();

    let border_tap = |i: usize| {
        let mut acc = 0.0f32;
        for (k, &kv) in kernel.iter().enumerate() {
            let idx = map_index(i as isize + radius as isize - k as isize, n, border)
                .expect("mapped index must exist for non-empty signal");
            acc += signal[idx] * kv;
        }
        acc
    };

    if n <= 2 * radius {
        for (i, out_i) in out.iter_mut().enumerate() {
            *out_i = border_tap(i);
        }
        return;
    }

    for (i, out_i) in out.iter_mut().take(radius).enumerate() {
        *out_i = border_tap(i);
    }

    let interior_end = n - radius;
    let s_ptr = signal.as_ptr();
    let k_ptr = kernel.as_ptr();
    // SAFETY:
    // - `i` in `[radius, n-radius)` guarantees full kernel footprint in bounds.
    // - `base = i-radius`, `base + (klen-1) = i+radius <= n-1`.
    // - Pointers derive from valid slices and are only offset within bounds.
    unsafe {
        for (i, out_i) in out
            .iter_mut()
            .enumerate()
            .take(interior_end)
            .skip(radius)
        {
            let base = i - radius;
            let mut acc = 0.0f32;
            for k in 0..klen {
                acc += *s_ptr.add(base + k) * *k_ptr.add(klen - 1 - k);
            }
            *out_i = acc;
        }
    }

    for (i, out_i) in out.iter_mut().enumerate().skip(interior_end) {
        *out_i = border_tap(i);
    }
}

fn convolve_constant(signal: &[f32], kernel: &[f32], radius: usize, c: f32, out: &mut [f32]) {
    let n = signal.len() as isize;
    for (i, out_i) in out.iter_mut().enumerate() {
        let mut acc = 0.0f32;
        for (k, &kv) in kernel.iter().enumerate() {
            let idx = i as isize + radius as isize - k as isize;
            let v = if idx < 0 || idx >= n {
                c
            } else {
                signal[idx as usize]
            };
            acc += v * kv;
        }
        *out_i = acc;
    }
}
