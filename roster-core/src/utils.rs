pub trait NumExt {
    /// Returns the base 2 logarithm of the number, rounding up to the next integer. Returns `0`
    /// for `0` and `1`.
    fn ilog2_ceil(self) -> Self;

    /// Returns the larger half of the number, `ceil(self / 2)`.
    fn upper_half(self) -> Self;
}

impl NumExt for usize {
    #[inline]
    fn ilog2_ceil(self) -> Self {
        match self {
            0 | 1 => 0,
            n => (usize::BITS - (n - 1).leading_zeros()) as Self,
        }
    }

    #[inline]
    fn upper_half(self) -> Self {
        self - self / 2
    }
}

#[cfg(test)]
mod tests {
    use super::NumExt;

    #[test]
    fn test_ilog2_ceil() {
        assert_eq!(0_usize.ilog2_ceil(), 0);
        assert_eq!(1_usize.ilog2_ceil(), 0);
        assert_eq!(2_usize.ilog2_ceil(), 1);
        assert_eq!(3_usize.ilog2_ceil(), 2);
        assert_eq!(4_usize.ilog2_ceil(), 2);
        assert_eq!(5_usize.ilog2_ceil(), 3);
        assert_eq!(8_usize.ilog2_ceil(), 3);
        assert_eq!(9_usize.ilog2_ceil(), 4);
        assert_eq!(17_usize.ilog2_ceil(), 5);
        assert_eq!(64_usize.ilog2_ceil(), 6);
    }

    #[test]
    fn test_upper_half() {
        assert_eq!(0_usize.upper_half(), 0);
        assert_eq!(1_usize.upper_half(), 1);
        assert_eq!(2_usize.upper_half(), 1);
        assert_eq!(5_usize.upper_half(), 3);
        assert_eq!(30_usize.upper_half(), 15);
        assert_eq!(55_usize.upper_half(), 28);
    }
}
