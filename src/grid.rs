/// Row-major flat grid. One row per circle, one column per angle sample.
/// Columns wrap around (the angular axis is periodic).
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    pub data: Vec<T>,
    pub w: usize,
    pub h: usize,
}

impl<T: Copy + Default> Grid<T> {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            data: vec![T::default(); w * h],
            w,
            h,
        }
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.w && y < self.h);
        y * self.w + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> T {
        self.data[self.idx(x, y)]
    }

    #[inline]
    pub fn row(&self, y: usize) -> &[T] {
        &self.data[y * self.w..(y + 1) * self.w]
    }

    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [T] {
        &mut self.data[y * self.w..(y + 1) * self.w]
    }
}

/// Wrap a signed column index onto [0, w).
#[inline]
pub fn wrap_index(x: i64, w: usize) -> usize {
    x.rem_euclid(w as i64) as usize
}

/// `n` evenly spaced values from `start` to `stop`, both inclusive.
/// One value yields `start`; zero values yield an empty vector.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { stop } else { start + step * i as f64 })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_contiguous() {
        let mut g: Grid<f64> = Grid::new(3, 2);
        g.row_mut(1)[2] = 5.0;
        g.row_mut(0)[1] = 4.0;
        assert_eq!(g.row(0), &[0.0, 4.0, 0.0]);
        assert_eq!(g.row(1), &[0.0, 0.0, 5.0]);
        assert_eq!(g.get(1, 0), 4.0);
    }

    #[test]
    fn wrap_handles_negative_and_overflow() {
        assert_eq!(wrap_index(-1, 10), 9);
        assert_eq!(wrap_index(10, 10), 0);
        assert_eq!(wrap_index(23, 10), 3);
    }

    #[test]
    fn linspace_endpoints() {
        assert_eq!(linspace(0.0, 1.0, 0), Vec::<f64>::new());
        assert_eq!(linspace(0.0, 1.0, 1), vec![0.0]);
        assert_eq!(linspace(1.0, 0.0, 1), vec![1.0]);
        assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        let down = linspace(0.1, 0.01, 4);
        assert_eq!(down[0], 0.1);
        assert_eq!(down[3], 0.01);
    }
}
