use std::collections::HashMap;

/// Arithmetic mean. Empty input yields 0.0 rather than NaN so callers can
/// feed group buckets straight through without a guard.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

const VARIANCE_EPSILON: f64 = 1e-12;

// Pearson product-moment correlation. A side with (near-)zero variance has
// no linear relationship to speak of, so that case collapses to 0.0 instead
// of dividing by zero.
pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    debug_assert_eq!(xs.len(), ys.len());

    if xs.is_empty() {
        return 0.0;
    }

    let mx = mean(xs);
    let my = mean(ys);

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mx;
        let dy = y - my;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x < VARIANCE_EPSILON || var_y < VARIANCE_EPSILON {
        return 0.0;
    }

    cov / (var_x.sqrt() * var_y.sqrt())
}

/// Occurrence count per distinct value, ordered by count descending and by
/// label ascending among equals.
pub fn value_counts<I>(values: I) -> Vec<(String, usize)>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let mut counts: HashMap<String, usize> = HashMap::new();
    for value in values {
        *counts.entry(value.into()).or_default() += 1;
    }

    let mut out: Vec<(String, usize)> = counts.into_iter().collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_empty_is_zero() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn mean_basic() {
        assert_eq!(mean(&[80.0, 90.0, 70.0]), 80.0);
    }

    #[test]
    fn pearson_of_column_with_itself_is_one() {
        let xs = [61.0, 67.0, 74.0, 79.0, 83.0];
        assert!((pearson(&xs, &xs) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn pearson_perfect_inverse() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let ys = [8.0, 6.0, 4.0, 2.0];
        assert!((pearson(&xs, &ys) + 1.0).abs() < 1e-9);
    }

    #[test]
    fn pearson_constant_side_is_zero() {
        let xs = [5.0, 5.0, 5.0];
        let ys = [1.0, 2.0, 3.0];
        assert_eq!(pearson(&xs, &ys), 0.0);
    }

    #[test]
    fn value_counts_orders_by_count_then_label() {
        let counts = value_counts(["right", "left", "right", "left", "right"]);
        assert_eq!(
            counts,
            vec![("right".to_string(), 3), ("left".to_string(), 2)]
        );

        let tied = value_counts(["b", "a"]);
        assert_eq!(tied, vec![("a".to_string(), 1), ("b".to_string(), 1)]);
    }
}
