/// Extract the top `num_bits` bits from a 64-bit value.
///
/// Useful as a faster alternative to the modulo operation of this kind: `value % (2 ** num_bits)`.
#[inline]
pub const fn extract_bits_64<const SOURCE_BITS: u32>(value: u64, num_bits: u32) -> u32 {
    debug_assert!(
        num_bits >= 1 && num_bits <= 32,
        r#""num_bits" must be [1, 32]"#
    );

    (value >> (SOURCE_BITS - num_bits)) as u32
}

/// Reduce a signed value into `[0, num_buckets)` using the Euclidean remainder.
///
/// Total over the whole `i128` domain, so every primitive integer can be widened into it
/// losslessly and negative values never produce a negative index.
#[inline]
pub const fn reduce_mod(value: i128, num_buckets: u32) -> u32 {
    debug_assert!(num_buckets > 0, r#""num_buckets" must be greater than 0"#);

    value.rem_euclid(num_buckets as i128) as u32
}

/// Reduce the two's-complement bits of a value into `[0, num_buckets)` with a bit-mask.
///
/// Only correct when `num_buckets` is a power of two.
#[inline]
pub const fn reduce_mask(value: u64, num_buckets: u32) -> u32 {
    debug_assert!(
        num_buckets.is_power_of_two(),
        r#""num_buckets" must be a power of two"#
    );

    (value & (num_buckets as u64 - 1)) as u32
}

/// Calculate the number of bits required to represent a given number of buckets.
pub const fn num_bits_for_buckets(num_buckets: u32) -> u32 {
    match num_buckets {
        0 => 0,
        1 => 1,
        _ => num_buckets.next_power_of_two().ilog2(),
    }
}

/// Calculate the number of buckets addressable with `num_bits` bits.
pub const fn num_buckets_for_bits(num_bits: u32) -> u32 {
    1 << num_bits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduce_mod_negative_values() {
        assert_eq!(reduce_mod(-1, 7), 6);
        assert_eq!(reduce_mod(-7, 7), 0);
        assert_eq!(reduce_mod(i64::MIN as i128, 10), 2);
        assert_eq!(reduce_mod(i128::MIN, 1), 0);
    }

    #[test]
    fn test_reduce_mod_positive_values() {
        assert_eq!(reduce_mod(0, 3), 0);
        assert_eq!(reduce_mod(1, 3), 1);
        assert_eq!(reduce_mod(u64::MAX as i128, 1 << 16), 0xFFFF);
    }

    #[test]
    fn test_reduce_mask() {
        assert_eq!(reduce_mask(0x1_0001, 1 << 16), 1);
        assert_eq!(reduce_mask(-1_i64 as u64, 1 << 16), 0xFFFF);
        assert_eq!(reduce_mask(12345, 1), 0);
    }

    #[test]
    fn test_num_bits_for_buckets() {
        assert_eq!(num_bits_for_buckets(1), 1);
        assert_eq!(num_bits_for_buckets(2), 1);
        assert_eq!(num_bits_for_buckets(3), 2);
        assert_eq!(num_bits_for_buckets(1 << 16), 16);
        assert_eq!(num_bits_for_buckets((1 << 16) + 1), 17);
        assert_eq!(num_buckets_for_bits(num_bits_for_buckets(1000)), 1024);
    }
}
