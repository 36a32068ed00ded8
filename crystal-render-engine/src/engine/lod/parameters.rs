use bevy::prelude::*;
use constants::lod_ranges::{
    EDGE_THINNING, LINE_DENSITY, LINE_DRAW_DISTANCE, LOD_PARAM_MAP, LodParamInfo, NODE_DENSITY,
    NODE_DRAW_DISTANCE, ParamRange, XOR_DENSITY,
};
use serde::{Deserialize, Serialize};

/// The six renderer-facing LOD controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LodParam {
    EdgeThinning,
    LineDrawDistance,
    NodeDrawDistance,
    LineDensity,
    NodeDensity,
    XorDensity,
}

impl LodParam {
    pub const ALL: [LodParam; 6] = [
        LodParam::EdgeThinning,
        LodParam::LineDrawDistance,
        LodParam::NodeDrawDistance,
        LodParam::LineDensity,
        LodParam::NodeDensity,
        LodParam::XorDensity,
    ];

    fn info(self) -> &'static LodParamInfo {
        &LOD_PARAM_MAP[self as usize]
    }

    /// Stable control id used by the web UI.
    pub fn key(self) -> &'static str {
        self.info().key
    }

    pub fn label(self) -> &'static str {
        self.info().label
    }

    pub fn range(self) -> ParamRange {
        self.info().range
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|param| param.key() == key)
    }
}

/// Get/set access to the LOD controls.
///
/// The governor only talks to this trait, so it can drive the engine's
/// [`LodParameters`] resource or any headless stand-in. A `None` from either
/// method means the control is currently unavailable.
pub trait LodControls {
    fn get(&self, param: LodParam) -> Option<f32>;

    /// Write a value, returning what was actually stored after clamping.
    fn set(&mut self, param: LodParam, value: f32) -> Option<f32>;
}

/// Session-scoped LOD parameter surface, in slider units.
///
/// Every write is clamped to the parameter's range, so readers never see an
/// out-of-range value.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LodParameters {
    edge_thinning: f32,
    line_draw_distance: f32,
    node_draw_distance: f32,
    line_density: f32,
    node_density: f32,
    xor_density: f32,
}

impl Default for LodParameters {
    fn default() -> Self {
        Self {
            edge_thinning: EDGE_THINNING.default,
            line_draw_distance: LINE_DRAW_DISTANCE.default,
            node_draw_distance: NODE_DRAW_DISTANCE.default,
            line_density: LINE_DENSITY.default,
            node_density: NODE_DENSITY.default,
            xor_density: XOR_DENSITY.default,
        }
    }
}

impl LodParameters {
    pub fn edge_thinning(&self) -> f32 {
        self.edge_thinning
    }

    pub fn line_draw_distance(&self) -> f32 {
        self.line_draw_distance
    }

    pub fn node_draw_distance(&self) -> f32 {
        self.node_draw_distance
    }

    pub fn line_density(&self) -> f32 {
        self.line_density
    }

    pub fn node_density(&self) -> f32 {
        self.node_density
    }

    pub fn xor_density(&self) -> f32 {
        self.xor_density
    }

    pub fn value(&self, param: LodParam) -> f32 {
        match param {
            LodParam::EdgeThinning => self.edge_thinning,
            LodParam::LineDrawDistance => self.line_draw_distance,
            LodParam::NodeDrawDistance => self.node_draw_distance,
            LodParam::LineDensity => self.line_density,
            LodParam::NodeDensity => self.node_density,
            LodParam::XorDensity => self.xor_density,
        }
    }

    /// Clamp and store. Returns the stored value.
    pub fn set_value(&mut self, param: LodParam, value: f32) -> f32 {
        let clamped = param.range().clamp(value);
        let slot = match param {
            LodParam::EdgeThinning => &mut self.edge_thinning,
            LodParam::LineDrawDistance => &mut self.line_draw_distance,
            LodParam::NodeDrawDistance => &mut self.node_draw_distance,
            LodParam::LineDensity => &mut self.line_density,
            LodParam::NodeDensity => &mut self.node_density,
            LodParam::XorDensity => &mut self.xor_density,
        };
        *slot = clamped;
        clamped
    }

    pub fn with(mut self, param: LodParam, value: f32) -> Self {
        self.set_value(param, value);
        self
    }

    /// Fully degraded surface: every field at the end of the degradation path.
    pub fn fully_degraded() -> Self {
        Self {
            edge_thinning: EDGE_THINNING.max,
            line_draw_distance: LINE_DRAW_DISTANCE.min,
            node_draw_distance: NODE_DRAW_DISTANCE.min,
            line_density: LINE_DENSITY.min,
            node_density: NODE_DENSITY.min,
            xor_density: XOR_DENSITY.min,
        }
    }

    /// Key/value view for the web UI.
    pub fn to_json(&self) -> serde_json::Value {
        let map = LodParam::ALL
            .into_iter()
            .map(|param| (param.key().to_string(), serde_json::json!(self.value(param))))
            .collect::<serde_json::Map<_, _>>();
        serde_json::Value::Object(map)
    }
}

impl LodControls for LodParameters {
    fn get(&self, param: LodParam) -> Option<f32> {
        Some(self.value(param))
    }

    fn set(&mut self, param: LodParam, value: f32) -> Option<f32> {
        Some(self.set_value(param, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip_through_lookup() {
        for param in LodParam::ALL {
            assert_eq!(LodParam::from_key(param.key()), Some(param));
        }
        assert_eq!(LodParam::from_key("pointSize"), None);
    }

    #[test]
    fn table_order_matches_enum() {
        assert_eq!(LodParam::XorDensity.key(), "xorDensity");
        assert_eq!(LodParam::EdgeThinning.key(), "edgeThinning");
        assert_eq!(LodParam::NodeDensity.range().min, 30.0);
    }

    #[test]
    fn ranges_come_from_the_control_table() {
        let expected = [
            EDGE_THINNING,
            LINE_DRAW_DISTANCE,
            NODE_DRAW_DISTANCE,
            LINE_DENSITY,
            NODE_DENSITY,
            XOR_DENSITY,
        ];
        for (param, range) in LodParam::ALL.into_iter().zip(expected) {
            assert_eq!(param.range(), range, "{}", param.key());
            assert!(!param.label().is_empty());
        }
    }

    #[test]
    fn writes_are_clamped() {
        let mut params = LodParameters::default();
        assert_eq!(params.set_value(LodParam::NodeDensity, 5.0), 30.0);
        assert_eq!(params.set_value(LodParam::EdgeThinning, 1.7), 1.0);
        assert_eq!(params.set_value(LodParam::XorDensity, -3.0), 5.0);
        assert_eq!(params.set_value(LodParam::LineDrawDistance, f32::NAN), 100.0);
        assert_eq!(params.node_density(), 30.0);
    }

    #[test]
    fn defaults_match_designer_values() {
        let params = LodParameters::default();
        assert_eq!(params.edge_thinning(), 0.4);
        assert_eq!(params.xor_density(), 100.0);
        assert_eq!(params.line_density(), 100.0);
    }

    #[test]
    fn json_view_uses_control_keys() {
        let json = LodParameters::default().to_json();
        assert_eq!(json["nodeDensity"], serde_json::json!(100.0));
        assert_eq!(json.as_object().map(|m| m.len()), Some(6));
    }
}
