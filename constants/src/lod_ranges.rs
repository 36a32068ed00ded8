/// Closed range and designer default of a single LOD parameter, in slider units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    pub min: f32,
    pub max: f32,
    pub default: f32,
}

impl ParamRange {
    pub const fn new(min: f32, max: f32, default: f32) -> Self {
        Self { min, max, default }
    }

    /// Clamp a value into the range. NaN collapses to the default.
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            return self.default;
        }
        value.clamp(self.min, self.max)
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

pub const EDGE_THINNING: ParamRange = ParamRange::new(0.0, 1.0, 0.4);
pub const LINE_DRAW_DISTANCE: ParamRange = ParamRange::new(10.0, 100.0, 100.0);
pub const NODE_DRAW_DISTANCE: ParamRange = ParamRange::new(10.0, 100.0, 100.0);
pub const LINE_DENSITY: ParamRange = ParamRange::new(10.0, 100.0, 100.0);
pub const NODE_DENSITY: ParamRange = ParamRange::new(30.0, 100.0, 100.0);
/// Highlight (XOR blended) edge pool visibility.
pub const XOR_DENSITY: ParamRange = ParamRange::new(5.0, 100.0, 100.0);

pub struct LodParamInfo {
    /// Stable control id shared with the web UI sliders.
    pub key: &'static str,
    pub label: &'static str,
    pub range: ParamRange,
}

pub const LOD_PARAM_MAP: &[LodParamInfo] = &[
    LodParamInfo {
        key: "edgeThinning",
        label: "Edge thinning",
        range: EDGE_THINNING,
    },
    LodParamInfo {
        key: "lineDrawDistance",
        label: "Line draw distance",
        range: LINE_DRAW_DISTANCE,
    },
    LodParamInfo {
        key: "nodeDrawDistance",
        label: "Node draw distance",
        range: NODE_DRAW_DISTANCE,
    },
    LodParamInfo {
        key: "lineDensity",
        label: "Line density",
        range: LINE_DENSITY,
    },
    LodParamInfo {
        key: "nodeDensity",
        label: "Node density",
        range: NODE_DENSITY,
    },
    LodParamInfo {
        key: "xorDensity",
        label: "Highlight density",
        range: XOR_DENSITY,
    },
];

/// Operator-settable target frame rate.
pub const TARGET_FPS: ParamRange = ParamRange::new(10.0, 120.0, 24.0);

pub const AUTO_FPS_ENABLED_DEFAULT: bool = true;
