use bevy::prelude::*;

use super::parameters::{LodControls, LodParam, LodParameters};
use super::policy::{DegradeTier, ParamWrite, RecoverTier, escalation_tier, recovery_tier};
use super::tuning::GovernorTuning;

/// Outcome of feeding one FPS sample to the governor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GovernorDecision {
    Degraded(DegradeTier),
    Recovered(RecoverTier),
    /// Good sample, still inside the recovery debounce.
    Debouncing { good_samples: u32 },
    /// Low sample with the highlight pool at its floor, escalation not yet due.
    DelayingEscalation { low_samples: u32 },
    /// Dead zone or a non-positive reading.
    Idle,
    /// A tier was selected but every field it targets was already at its bound.
    Saturated,
    /// A control could not be read or written this sample.
    Unavailable,
}

impl GovernorDecision {
    pub fn changed_surface(&self) -> bool {
        matches!(
            self,
            GovernorDecision::Degraded(_) | GovernorDecision::Recovered(_)
        )
    }
}

/// Closed-loop frame-rate governor.
///
/// Consumes one FPS sample at a time and moves the LOD controls by at most
/// one tier per sample. The two counters debounce recovery and delay
/// escalation past the highlight floor.
#[derive(Resource, Debug, Clone, Default)]
pub struct PerformanceGovernor {
    tuning: GovernorTuning,
    stability_counter: u32,
    highlight_delay: u32,
}

impl PerformanceGovernor {
    pub fn new(tuning: GovernorTuning) -> Self {
        Self {
            tuning,
            ..default()
        }
    }

    /// Swap tuning; counters keep their values.
    pub fn set_tuning(&mut self, tuning: GovernorTuning) {
        self.tuning = tuning;
    }

    pub fn stability_counter(&self) -> u32 {
        self.stability_counter
    }

    pub fn highlight_delay(&self) -> u32 {
        self.highlight_delay
    }

    pub fn step<C>(&mut self, fps: f32, target_fps: f32, controls: &mut C) -> GovernorDecision
    where
        C: LodControls + ?Sized,
    {
        if !(fps > 0.0) || !fps.is_finite() {
            return GovernorDecision::Idle;
        }

        let Some(snapshot) = read_snapshot(controls) else {
            return GovernorDecision::Unavailable;
        };

        if fps < target_fps {
            self.degrade(&snapshot, controls)
        } else if fps >= target_fps + self.tuning.hysteresis_band_fps {
            self.recover(&snapshot, controls)
        } else {
            GovernorDecision::Idle
        }
    }

    // Counter updates are computed locally and committed only once the
    // planned writes have landed, so an unavailable control leaves the
    // governor exactly as it was.
    fn degrade<C>(&mut self, snapshot: &LodParameters, controls: &mut C) -> GovernorDecision
    where
        C: LodControls + ?Sized,
    {
        let (tier, delay) = if DegradeTier::Highlight.has_headroom(snapshot) {
            (DegradeTier::Highlight, 0)
        } else {
            let delay = self.highlight_delay.saturating_add(1);
            if delay <= self.tuning.highlight_delay_samples {
                self.stability_counter = 0;
                self.highlight_delay = delay;
                return GovernorDecision::DelayingEscalation { low_samples: delay };
            }
            (escalation_tier(snapshot), delay)
        };

        let writes = tier.plan(snapshot, &self.tuning);
        let Some(changed) = apply_writes(controls, snapshot, &writes) else {
            return GovernorDecision::Unavailable;
        };

        self.stability_counter = 0;
        self.highlight_delay = delay;
        if changed {
            GovernorDecision::Degraded(tier)
        } else {
            GovernorDecision::Saturated
        }
    }

    fn recover<C>(&mut self, snapshot: &LodParameters, controls: &mut C) -> GovernorDecision
    where
        C: LodControls + ?Sized,
    {
        let stability = self.stability_counter.saturating_add(1);
        if stability <= self.tuning.recovery_debounce_samples {
            self.stability_counter = stability;
            return GovernorDecision::Debouncing {
                good_samples: stability,
            };
        }

        let Some(tier) = recovery_tier(snapshot, &self.tuning) else {
            self.stability_counter = stability;
            return GovernorDecision::Saturated;
        };

        let writes = tier.plan(snapshot, &self.tuning);
        let Some(changed) = apply_writes(controls, snapshot, &writes) else {
            return GovernorDecision::Unavailable;
        };

        self.stability_counter = stability;
        if changed {
            GovernorDecision::Recovered(tier)
        } else {
            GovernorDecision::Saturated
        }
    }
}

fn read_snapshot<C>(controls: &C) -> Option<LodParameters>
where
    C: LodControls + ?Sized,
{
    LodParam::ALL
        .into_iter()
        .try_fold(LodParameters::default(), |params, param| {
            controls.get(param).map(|value| params.with(param, value))
        })
}

/// Write planned values as a unit. `Some(changed)` on success; on a failed
/// write the earlier ones are restored from `snapshot` and `None` is returned.
fn apply_writes<C>(controls: &mut C, snapshot: &LodParameters, writes: &[ParamWrite]) -> Option<bool>
where
    C: LodControls + ?Sized,
{
    let mut changed = false;
    for (index, &(param, value)) in writes.iter().enumerate() {
        let Some(stored) = controls.set(param, value) else {
            for &(written, _) in &writes[..index] {
                let _ = controls.set(written, snapshot.value(written));
            }
            return None;
        };
        changed |= stored != snapshot.value(param);
    }
    Some(changed)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TARGET: f32 = 24.0;

    fn feed(
        governor: &mut PerformanceGovernor,
        params: &mut LodParameters,
        fps: f32,
        samples: usize,
    ) -> Vec<GovernorDecision> {
        (0..samples)
            .map(|_| governor.step(fps, TARGET, params))
            .collect()
    }

    #[test]
    fn first_low_sample_only_lowers_highlight() {
        let mut governor = PerformanceGovernor::default();
        let mut params = LodParameters::default();

        let decision = governor.step(15.0, TARGET, &mut params);

        assert_eq!(decision, GovernorDecision::Degraded(DegradeTier::Highlight));
        assert_eq!(
            params,
            LodParameters::default().with(LodParam::XorDensity, 95.0)
        );
    }

    #[test]
    fn escalation_waits_for_sixth_floor_sample() {
        let mut governor = PerformanceGovernor::default();
        let mut params = LodParameters::default().with(LodParam::XorDensity, 5.0);
        let before = params;

        let decisions = feed(&mut governor, &mut params, 15.0, 5);
        assert_eq!(params, before);
        assert_eq!(
            decisions.last(),
            Some(&GovernorDecision::DelayingEscalation { low_samples: 5 })
        );

        let decision = governor.step(15.0, TARGET, &mut params);
        assert_eq!(decision, GovernorDecision::Degraded(DegradeTier::Thinning));
        assert!((params.edge_thinning() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn recovery_waits_for_fifth_good_sample() {
        let mut governor = PerformanceGovernor::default();
        let mut params = LodParameters::default().with(LodParam::NodeDensity, 50.0);

        feed(&mut governor, &mut params, 40.0, 4);
        assert_eq!(params.node_density(), 50.0);
        assert_eq!(governor.stability_counter(), 4);

        let decision = governor.step(40.0, TARGET, &mut params);
        assert_eq!(decision, GovernorDecision::Recovered(RecoverTier::NodeDensity));
        assert_eq!(params.node_density(), 52.0);
    }

    #[test]
    fn dead_zone_changes_nothing() {
        let mut governor = PerformanceGovernor::default();
        let mut params = LodParameters::default().with(LodParam::XorDensity, 5.0);
        governor.step(15.0, TARGET, &mut params);
        governor.step(15.0, TARGET, &mut params);
        let before = params;

        for fps in [24.0, 24.5, 24.99] {
            assert_eq!(governor.step(fps, TARGET, &mut params), GovernorDecision::Idle);
        }

        assert_eq!(params, before);
        assert_eq!(governor.highlight_delay(), 2);
        assert_eq!(governor.stability_counter(), 0);
    }

    #[test]
    fn low_sample_resets_stability() {
        let mut governor = PerformanceGovernor::default();
        let mut params = LodParameters::fully_degraded();
        feed(&mut governor, &mut params, 60.0, 3);
        assert_eq!(governor.stability_counter(), 3);

        governor.step(10.0, TARGET, &mut params);
        assert_eq!(governor.stability_counter(), 0);
    }

    #[test]
    fn density_tier_moves_both_fields() {
        let mut governor = PerformanceGovernor::default();
        let mut params = LodParameters::default()
            .with(LodParam::XorDensity, 5.0)
            .with(LodParam::EdgeThinning, 1.0);

        let decisions = feed(&mut governor, &mut params, 10.0, 6);
        assert_eq!(
            decisions.last(),
            Some(&GovernorDecision::Degraded(DegradeTier::Density))
        );
        assert_eq!(params.line_density(), 92.0);
        assert_eq!(params.node_density(), 96.0);
    }

    #[test]
    fn draw_distance_is_last_resort() {
        let mut governor = PerformanceGovernor::default();
        let mut params = LodParameters::fully_degraded()
            .with(LodParam::LineDrawDistance, 100.0)
            .with(LodParam::NodeDrawDistance, 100.0);

        let decisions = feed(&mut governor, &mut params, 10.0, 6);
        assert_eq!(
            decisions.last(),
            Some(&GovernorDecision::Degraded(DegradeTier::DrawDistance))
        );
        assert_eq!(params.line_draw_distance(), 80.0);
        assert_eq!(params.node_draw_distance(), 80.0);

        let decisions = feed(&mut governor, &mut params, 10.0, 10);
        assert_eq!(params.line_draw_distance(), 10.0);
        assert_eq!(decisions.last(), Some(&GovernorDecision::Saturated));
    }

    #[test]
    fn fully_recovered_surface_stays_put() {
        let mut governor = PerformanceGovernor::default();
        let mut params = LodParameters::default();

        let decisions = feed(&mut governor, &mut params, 60.0, 20);

        assert_eq!(params, LodParameters::default());
        assert_eq!(decisions.last(), Some(&GovernorDecision::Saturated));
    }

    #[test]
    fn non_positive_fps_is_ignored() {
        let mut governor = PerformanceGovernor::default();
        let mut params = LodParameters::default();
        assert_eq!(governor.step(0.0, TARGET, &mut params), GovernorDecision::Idle);
        assert_eq!(governor.step(f32::NAN, TARGET, &mut params), GovernorDecision::Idle);
        assert_eq!(params, LodParameters::default());
    }

    struct MissingControl(LodParameters);

    impl LodControls for MissingControl {
        fn get(&self, param: LodParam) -> Option<f32> {
            (param != LodParam::LineDensity).then(|| self.0.value(param))
        }

        fn set(&mut self, param: LodParam, value: f32) -> Option<f32> {
            Some(self.0.set_value(param, value))
        }
    }

    /// Reads everything, refuses writes to one control.
    struct ReadOnlyControl {
        params: LodParameters,
        locked: LodParam,
    }

    impl LodControls for ReadOnlyControl {
        fn get(&self, param: LodParam) -> Option<f32> {
            Some(self.params.value(param))
        }

        fn set(&mut self, param: LodParam, value: f32) -> Option<f32> {
            (param != self.locked).then(|| self.params.set_value(param, value))
        }
    }

    #[test]
    fn failed_highlight_write_keeps_stability_counter() {
        let mut governor = PerformanceGovernor::default();
        let mut controls = ReadOnlyControl {
            params: LodParameters::default().with(LodParam::NodeDensity, 50.0),
            locked: LodParam::XorDensity,
        };
        for _ in 0..3 {
            governor.step(60.0, TARGET, &mut controls);
        }
        assert_eq!(governor.stability_counter(), 3);

        assert_eq!(
            governor.step(10.0, TARGET, &mut controls),
            GovernorDecision::Unavailable
        );
        assert_eq!(governor.stability_counter(), 3);
        assert_eq!(governor.highlight_delay(), 0);
        assert_eq!(controls.params.xor_density(), 100.0);
    }

    #[test]
    fn failed_paired_write_rolls_back_the_tier() {
        let mut governor = PerformanceGovernor::default();
        let start = LodParameters::fully_degraded()
            .with(LodParam::LineDrawDistance, 100.0)
            .with(LodParam::NodeDrawDistance, 100.0);
        let mut controls = ReadOnlyControl {
            params: start,
            locked: LodParam::NodeDrawDistance,
        };

        for _ in 0..5 {
            governor.step(10.0, TARGET, &mut controls);
        }
        assert_eq!(governor.highlight_delay(), 5);

        for _ in 0..3 {
            assert_eq!(
                governor.step(10.0, TARGET, &mut controls),
                GovernorDecision::Unavailable
            );
        }
        assert_eq!(controls.params, start);
        assert_eq!(governor.highlight_delay(), 5);
    }

    #[test]
    fn failed_recovery_write_keeps_counters() {
        let mut governor = PerformanceGovernor::default();
        let mut controls = ReadOnlyControl {
            params: LodParameters::fully_degraded(),
            locked: LodParam::NodeDensity,
        };
        for _ in 0..4 {
            governor.step(60.0, TARGET, &mut controls);
        }

        assert_eq!(
            governor.step(60.0, TARGET, &mut controls),
            GovernorDecision::Unavailable
        );
        assert_eq!(governor.stability_counter(), 4);
        assert_eq!(controls.params, LodParameters::fully_degraded());
    }

    #[test]
    fn missing_control_skips_the_sample() {
        let mut governor = PerformanceGovernor::default();
        let mut controls = MissingControl(LodParameters::default());

        assert_eq!(
            governor.step(10.0, TARGET, &mut controls),
            GovernorDecision::Unavailable
        );
        assert_eq!(controls.0, LodParameters::default());
        assert_eq!(governor.stability_counter(), 0);
        assert_eq!(governor.highlight_delay(), 0);
    }
}
