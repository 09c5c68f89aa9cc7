//! Property tests for the mapping curves.

use lumen_core::{FreqGainTable, bell_curve, freq_rolloff};
use proptest::prelude::*;

proptest! {
    #[test]
    fn bell_curve_output_within_bounds(
        input in -1000.0f32..2000.0,
        out_min in 0.0f32..10.0,
        span in 0.01f32..10.0,
    ) {
        let out_max = out_min + span;
        let v = bell_curve(input, 0.0, 300.0, out_min, out_max);
        prop_assert!(v >= out_min - 1e-4);
        prop_assert!(v <= out_max + 1e-4);
    }

    #[test]
    fn bell_curve_symmetric(input in 0.0f32..150.0) {
        let left = bell_curve(input, 0.0, 300.0, 0.2, 1.3);
        let right = bell_curve(300.0 - input, 0.0, 300.0, 0.2, 1.3);
        prop_assert!((left - right).abs() < 1e-3);
    }

    #[test]
    fn rolloff_no_attenuation_below_cutoff(freq in 0.0f32..300.0) {
        prop_assert_eq!(freq_rolloff(freq, 300.0, 6000.0, 0.001, 0.8), 1.0);
    }

    #[test]
    fn rolloff_bounded(freq in 0.0f32..20_000.0) {
        let g = freq_rolloff(freq, 300.0, 6000.0, 0.001, 0.8);
        prop_assert!((0.001..=1.0).contains(&g));
    }

    #[test]
    fn table_scale_never_amplifies(freq in 0.0f32..20_000.0, gain in 0u8..=255) {
        let table = FreqGainTable::build(300.0, 6000.0, 0.001, 0.8);
        prop_assert!(table.scale(freq, gain) <= gain);
    }
}
