/// Quantizes `seconds` to buckets of `round_to_minutes`.
///
/// The duration is rounded down to the bucket boundary unless the remainder
/// has reached 80% of the bucket, in which case it is rounded up. A
/// non-positive granularity leaves the duration untouched.
pub fn round(seconds: i64, round_to_minutes: i64) -> i64 {
    if round_to_minutes <= 0 {
        return seconds;
    }
    let bucket = round_to_minutes * 60;
    let remainder = seconds.rem_euclid(bucket);
    let base = seconds - remainder;
    // Tenths of a bucket, integer arithmetic keeps 80% exact for every granularity.
    if remainder * 10 >= bucket * 8 {
        base + bucket
    } else {
        base
    }
}
