//! Flare envelope: derives the per-frame flare bias from animation state.
//!
//! While a character materializes or dematerializes, the whole skirt tilts
//! in and out around the wave motion. The bias is piecewise-eased over the
//! animation's progress and feeds `DeformParams::flare` once per frame.

/// Eased 0 → 1 ramp: half a sine period remapped onto the unit square.
#[inline]
pub fn norm_sin(t: f32) -> f32 {
    (((2.0 * t - 1.0) * std::f32::consts::FRAC_PI_2).sin() + 1.0) / 2.0
}

/// Animation phase the skirt owner is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlarePhase {
    /// Normal play; the skirt only ripples.
    Steady,
    /// Materializing: the hem pulls in, overshoots outward, then settles.
    Appearing,
    /// Dematerializing: the hem swells outward, then settles.
    Vanishing,
}

/// Flare bias for `phase` at `progress` in [0, 1].
///
/// Continuous within each phase, zero at every phase's start and end, and
/// bounded to [-1, 1].
pub fn flare_bias(phase: FlarePhase, progress: f32) -> f32 {
    match phase {
        FlarePhase::Steady => 0.0,
        FlarePhase::Appearing => {
            if progress < 0.25 {
                -norm_sin(progress * 4.0)
            } else if progress < 0.5 {
                -(1.0 - norm_sin(progress * 4.0 - 1.0))
            } else if progress < 0.75 {
                norm_sin(progress * 4.0 - 2.0)
            } else {
                1.0 - norm_sin(progress * 4.0 - 3.0)
            }
        }
        FlarePhase::Vanishing => {
            if progress < 0.5 {
                norm_sin(progress * 2.0)
            } else {
                1.0 - norm_sin(progress * 2.0 - 1.0)
            }
        }
    }
}
