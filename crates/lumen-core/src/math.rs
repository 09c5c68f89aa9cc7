//! Small integer math helpers shared across the engine.

/// Linearly remap `x` from `[in_min, in_max]` to `[out_min, out_max]`.
///
/// Integer arithmetic with an i64 intermediate; no clamping is applied, and
/// reversed ranges (`in_min > in_max` or `out_min > out_max`) are valid -
/// the light pipeline uses a reversed input range to build a falling map.
#[inline]
pub fn map_range(x: i32, in_min: i32, in_max: i32, out_min: i32, out_max: i32) -> i32 {
    let num = i64::from(x - in_min) * i64::from(out_max - out_min);
    let den = i64::from(in_max - in_min);
    (num / den + i64::from(out_min)) as i32
}
