pub const COUNTER_MIN: i64 = -99;
pub const COUNTER_MAX: i64 = 999;

/// Renders a three character counter for the mine and time displays.
/// Values are clamped to `[-99, 999]`; negatives keep the sign in the first
/// slot, so `-5` becomes `-05`.
pub fn format_counter(value: i64) -> String {
    let value = value.clamp(COUNTER_MIN, COUNTER_MAX);
    if value < 0 {
        format!("-{:02}", -value)
    } else {
        format!("{:03}", value)
    }
}
