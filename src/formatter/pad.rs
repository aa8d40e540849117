/// Renders `value` as decimal, left-padded with `0` to `width` digits.
pub fn zero_pad(value: u64, width: usize) -> String {
    format!("{value:0width$}")
}

/// Largest value that fits in `width` decimal digits.
pub fn max_for_width(width: usize) -> u64 {
    10u64.pow(width as u32) - 1
}
