//! Averages over recorded marks.
//!
//! An average over zero marks is `None` rather than a division by zero.

/// Arithmetic mean of `values`, or `None` when there are none.
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = u8>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0u64, 0u64), |(sum, count), v| (sum + u64::from(v), count + 1));

    if count == 0 {
        None
    } else {
        Some(sum as f64 / count as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_nothing_is_none() {
        assert_eq!(mean(Vec::<u8>::new()), None);
    }

    #[test]
    fn mean_of_two_grades() {
        assert_eq!(mean([3, 5]), Some(4.0));
    }

    #[test]
    fn mean_is_order_independent() {
        let a = mean([3, 5, 2]).unwrap();
        let b = mean([2, 3, 5]).unwrap();
        assert!((a - b).abs() < f64::EPSILON);
        assert!((a - 10.0 / 3.0).abs() < 1e-12, "expected ~3.333, got {a}");
    }

    #[test]
    fn mean_of_test_scores() {
        assert_eq!(mean([80, 100]), Some(90.0));
        assert_eq!(mean([0]), Some(0.0));
    }
}
