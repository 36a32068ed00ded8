//! Ordered degradation and recovery tiers.
//!
//! Degradation drops the least essential layer first: the highlight overlay,
//! then line softness, then bulk density, and draw distance last because
//! clipping is the most visible. Recovery runs the other way round for
//! structure, restoring node density and distance before decoration.

use super::parameters::{LodParam, LodParameters};
use super::tuning::GovernorTuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegradeTier {
    Highlight,
    Thinning,
    Density,
    DrawDistance,
}

/// Tiers reached once the highlight pool is at its floor and the escalation delay elapsed.
pub const ESCALATION_ORDER: [DegradeTier; 3] = [
    DegradeTier::Thinning,
    DegradeTier::Density,
    DegradeTier::DrawDistance,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoverTier {
    NodeDensity,
    DrawDistance,
    LineDensity,
    Thinning,
    Highlight,
}

pub const RECOVERY_ORDER: [RecoverTier; 5] = [
    RecoverTier::NodeDensity,
    RecoverTier::DrawDistance,
    RecoverTier::LineDensity,
    RecoverTier::Thinning,
    RecoverTier::Highlight,
];

/// A single planned write.
pub type ParamWrite = (LodParam, f32);

fn above_floor(params: &LodParameters, param: LodParam) -> bool {
    params.value(param) > param.range().min
}

fn below_ceiling(params: &LodParameters, param: LodParam) -> bool {
    params.value(param) < param.range().max
}

impl DegradeTier {
    /// Whether this tier still has room to degrade.
    pub fn has_headroom(self, params: &LodParameters) -> bool {
        match self {
            DegradeTier::Highlight => above_floor(params, LodParam::XorDensity),
            DegradeTier::Thinning => below_ceiling(params, LodParam::EdgeThinning),
            DegradeTier::Density => {
                above_floor(params, LodParam::LineDensity)
                    || above_floor(params, LodParam::NodeDensity)
            }
            DegradeTier::DrawDistance => {
                above_floor(params, LodParam::LineDrawDistance)
                    || above_floor(params, LodParam::NodeDrawDistance)
            }
        }
    }

    pub fn plan(self, params: &LodParameters, tuning: &GovernorTuning) -> Vec<ParamWrite> {
        match self {
            DegradeTier::Highlight => vec![(
                LodParam::XorDensity,
                params.xor_density() - tuning.xor_degrade_step,
            )],
            DegradeTier::Thinning => vec![(
                LodParam::EdgeThinning,
                (params.edge_thinning() + tuning.thinning_degrade_step)
                    .min(LodParam::EdgeThinning.range().max),
            )],
            DegradeTier::Density => {
                let mut writes = Vec::with_capacity(2);
                if above_floor(params, LodParam::LineDensity) {
                    writes.push((
                        LodParam::LineDensity,
                        params.line_density() - tuning.line_density_degrade_step,
                    ));
                }
                if above_floor(params, LodParam::NodeDensity) {
                    writes.push((
                        LodParam::NodeDensity,
                        params.node_density() - tuning.node_density_degrade_step,
                    ));
                }
                writes
            }
            DegradeTier::DrawDistance => vec![
                (
                    LodParam::LineDrawDistance,
                    params.line_draw_distance() - tuning.draw_distance_degrade_step,
                ),
                (
                    LodParam::NodeDrawDistance,
                    params.node_draw_distance() - tuning.draw_distance_degrade_step,
                ),
            ],
        }
    }
}

/// First escalation tier with headroom. Draw distance is the last resort and
/// is returned even when already at its floor.
pub fn escalation_tier(params: &LodParameters) -> DegradeTier {
    ESCALATION_ORDER
        .into_iter()
        .find(|tier| tier.has_headroom(params))
        .unwrap_or(DegradeTier::DrawDistance)
}

impl RecoverTier {
    pub fn has_headroom(self, params: &LodParameters, tuning: &GovernorTuning) -> bool {
        match self {
            RecoverTier::NodeDensity => below_ceiling(params, LodParam::NodeDensity),
            // Both distances move together; line distance gates the pair.
            RecoverTier::DrawDistance => below_ceiling(params, LodParam::LineDrawDistance),
            RecoverTier::LineDensity => below_ceiling(params, LodParam::LineDensity),
            RecoverTier::Thinning => params.edge_thinning() > tuning.thinning_recover_floor,
            RecoverTier::Highlight => below_ceiling(params, LodParam::XorDensity),
        }
    }

    pub fn plan(self, params: &LodParameters, tuning: &GovernorTuning) -> Vec<ParamWrite> {
        match self {
            RecoverTier::NodeDensity => vec![(
                LodParam::NodeDensity,
                params.node_density() + tuning.node_density_recover_step,
            )],
            RecoverTier::DrawDistance => vec![
                (
                    LodParam::LineDrawDistance,
                    params.line_draw_distance() + tuning.draw_distance_recover_step,
                ),
                (
                    LodParam::NodeDrawDistance,
                    params.node_draw_distance() + tuning.draw_distance_recover_step,
                ),
            ],
            RecoverTier::LineDensity => vec![(
                LodParam::LineDensity,
                params.line_density() + tuning.line_density_recover_step,
            )],
            RecoverTier::Thinning => vec![(
                LodParam::EdgeThinning,
                (params.edge_thinning() - tuning.thinning_recover_step)
                    .max(tuning.thinning_recover_floor),
            )],
            RecoverTier::Highlight => vec![(
                LodParam::XorDensity,
                params.xor_density() + tuning.xor_recover_step,
            )],
        }
    }
}

pub fn recovery_tier(params: &LodParameters, tuning: &GovernorTuning) -> Option<RecoverTier> {
    RECOVERY_ORDER
        .into_iter()
        .find(|tier| tier.has_headroom(params, tuning))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escalation_prefers_thinning_then_density() {
        let params = LodParameters::default().with(LodParam::XorDensity, 5.0);
        assert_eq!(escalation_tier(&params), DegradeTier::Thinning);

        let params = params.with(LodParam::EdgeThinning, 1.0);
        assert_eq!(escalation_tier(&params), DegradeTier::Density);

        let params = params
            .with(LodParam::LineDensity, 10.0)
            .with(LodParam::NodeDensity, 30.0);
        assert_eq!(escalation_tier(&params), DegradeTier::DrawDistance);
        assert_eq!(
            escalation_tier(&LodParameters::fully_degraded()),
            DegradeTier::DrawDistance
        );
    }

    #[test]
    fn density_plan_only_touches_fields_above_floor() {
        let tuning = GovernorTuning::default();
        let params = LodParameters::default().with(LodParam::LineDensity, 10.0);
        let writes = DegradeTier::Density.plan(&params, &tuning);
        assert_eq!(writes, vec![(LodParam::NodeDensity, 96.0)]);
    }

    #[test]
    fn recovery_order_from_fully_degraded() {
        let tuning = GovernorTuning::default();
        let params = LodParameters::fully_degraded();
        assert_eq!(recovery_tier(&params, &tuning), Some(RecoverTier::NodeDensity));

        let params = params.with(LodParam::NodeDensity, 100.0);
        assert_eq!(recovery_tier(&params, &tuning), Some(RecoverTier::DrawDistance));

        let params = params.with(LodParam::LineDrawDistance, 100.0);
        assert_eq!(recovery_tier(&params, &tuning), Some(RecoverTier::LineDensity));

        let params = params.with(LodParam::LineDensity, 100.0);
        assert_eq!(recovery_tier(&params, &tuning), Some(RecoverTier::Thinning));

        let params = params.with(LodParam::EdgeThinning, 0.4);
        assert_eq!(recovery_tier(&params, &tuning), Some(RecoverTier::Highlight));

        let params = params.with(LodParam::XorDensity, 100.0);
        assert_eq!(recovery_tier(&params, &tuning), None);
    }

    #[test]
    fn thinning_recovery_stops_at_governed_floor() {
        let tuning = GovernorTuning::default();
        let params = LodParameters::default().with(LodParam::EdgeThinning, 0.42);
        let writes = RecoverTier::Thinning.plan(&params, &tuning);
        assert_eq!(writes, vec![(LodParam::EdgeThinning, 0.4)]);
    }
}
