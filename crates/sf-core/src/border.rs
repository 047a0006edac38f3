/// How out-of-range indices are resolved when a filter footprint or a
/// sampling neighborhood crosses the image edge.
///
/// Pyramid blur and Gabor correlation use [`BorderMode::Reflect101`];
/// cubic resampling uses [`BorderMode::Clamp`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum BorderMode<T> {
    Clamp,
    Constant(T),
    #[default]
    Reflect101,
}

/// Maps a possibly out-of-range index onto `[0, len)`.
///
/// Returns `None` for [`BorderMode::Constant`] (the caller substitutes the
/// fill value) and for empty axes.
pub fn map_index<T>(i: isize, len: usize, mode: &BorderMode<T>) -> Option<usize> {
    if len == 0 {
        return None;
    }

    match mode {
        BorderMode::Constant(_) => None,
        BorderMode::Clamp => Some(i.clamp(0, len as isize - 1) as usize),
        BorderMode::Reflect101 => {
            if len == 1 {
                return Some(0);
            }

            let period = (2 * len - 2) as isize;
            let r = i.rem_euclid(period) as usize;
            if r < len { Some(r) } else { Some(2 * len - 2 - r) }
        }
    }
}
