/// Reduce a rational to lowest terms for display (shutter speed as
/// "1/250" and the like).
///
/// A zero numerator or denominator is returned unchanged so the caller
/// can decide what a degenerate ratio means. The divisor search is a
/// linear scan from `num` downward, not Euclid — EXIF rationals are
/// small, so the first hit wins quickly.
pub fn reduce(num: u32, den: u32) -> (u32, u32) {
    if num == 0 {
        return (0, den);
    }
    if den == 0 {
        return (num, 0);
    }

    for i in (1..=num).rev() {
        if num % i == 0 && den % i == 0 {
            return (num / i, den / i);
        }
    }

    (num, den)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduce_to_lowest_terms() {
        assert_eq!(reduce(2, 500), (1, 250));
        assert_eq!(reduce(6, 4), (3, 2));
        assert_eq!(reduce(10, 1000), (1, 100));
        assert_eq!(reduce(1, 250), (1, 250));
    }

    #[test]
    fn test_reduce_coprime_unchanged() {
        assert_eq!(reduce(7, 3), (7, 3));
        assert_eq!(reduce(13, 400), (13, 400));
    }

    #[test]
    fn test_reduce_preserves_ratio() {
        for (num, den) in [(2u32, 500u32), (48, 36), (100, 75), (9, 27)] {
            let (a, b) = reduce(num, den);
            // a/b == num/den, cross-multiplied to stay in integers
            assert_eq!(u64::from(a) * u64::from(den), u64::from(b) * u64::from(num));
        }
    }

    #[test]
    fn test_zero_numerator_unchanged() {
        assert_eq!(reduce(0, 500), (0, 500));
        assert_eq!(reduce(0, 0), (0, 0));
    }

    #[test]
    fn test_zero_denominator_unchanged() {
        assert_eq!(reduce(5, 0), (5, 0));
    }
}
