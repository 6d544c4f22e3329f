use num_traits::Float;

/// Trapezoidal integral of `y` sampled at `x`
///
/// Samples beyond the shorter of the two slices are ignored; fewer than two
/// samples integrate to zero.
pub fn trapezoid<T: Float>(y: &[T], x: &[T]) -> T {
    let half = T::one() / (T::one() + T::one());
    y.windows(2)
        .zip(x.windows(2))
        .fold(T::zero(), |sum, (ys, xs)| match (ys, xs) {
            ([y0, y1], [x0, x1]) => sum + (*x1 - *x0) * (*y0 + *y1) * half,
            _ => sum,
        })
}

/// Trapezoidal integral of `weight(x) * y` sampled at `x`
pub fn weighted_trapezoid<T, F>(y: &[T], x: &[T], weight: F) -> T
where
    T: Float,
    F: Fn(T) -> T,
{
    let weighted: Vec<T> = y
        .iter()
        .zip(x)
        .map(|(&value, &position)| weight(position) * value)
        .collect();
    trapezoid(&weighted, x)
}

/// Running sum of a sequence
pub fn cumulative_sum<T: Float>(values: &[T]) -> Vec<T> {
    values
        .iter()
        .scan(T::zero(), |running, &value| {
            *running = *running + value;
            Some(*running)
        })
        .collect()
}

/// `count` evenly spaced samples from `start` to `end` inclusive
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count)
                .map(|i| (i as f64).mul_add(step, start))
                .collect()
        }
    }
}
