/// Numeric magnitude of the first contiguous run of ASCII digits in `text`.
///
/// Listing fields such as `"₹ 500"` or `"13 Years of experience"` carry a
/// number wrapped in units. Only the first digit run counts, so `"₹1,000"`
/// yields `1`. Text without any digit yields `0`, and overly long runs
/// saturate at `u64::MAX` instead of overflowing.
pub fn leading_magnitude(text: &str) -> u64 {
    text.chars()
        .skip_while(|c| !c.is_ascii_digit())
        .map_while(|c| c.to_digit(10))
        .fold(0u64, |acc, digit| {
            acc.saturating_mul(10).saturating_add(u64::from(digit))
        })
}
