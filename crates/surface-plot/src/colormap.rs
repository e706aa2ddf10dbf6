/// A continuous map from a normalized scalar to an RGBA color in `[0, 1]^4`.
pub trait Colormap {
    fn rgba(&self, t: f64) -> [f64; 4];

    fn name(&self) -> &str;
}

/// Number of entries in a sampled lookup table.
pub const LUT_SIZE: usize = 256;

/// Colorbrewer red-blue diverging anchors, dark red at 0 and dark blue at 1.
const RD_BU: [[f64; 3]; 11] = [
    [0.403_921_568_627_451, 0.0, 0.121_568_627_450_980_4],
    [0.698_039_215_686_274_5, 0.094_117_647_058_823_53, 0.168_627_450_980_392_17],
    [0.839_215_686_274_509_8, 0.376_470_588_235_294_1, 0.301_960_784_313_725_5],
    [0.956_862_745_098_039_3, 0.647_058_823_529_411_8, 0.509_803_921_568_627_4],
    [0.992_156_862_745_098_1, 0.858_823_529_411_764_7, 0.780_392_156_862_745_1],
    [0.968_627_450_980_392_2, 0.968_627_450_980_392_2, 0.968_627_450_980_392_2],
    [0.819_607_843_137_254_9, 0.898_039_215_686_274_5, 0.941_176_470_588_235_3],
    [0.572_549_019_607_843_1, 0.772_549_019_607_843_2, 0.870_588_235_294_117_7],
    [0.262_745_098_039_215_7, 0.576_470_588_235_294_1, 0.764_705_882_352_941_1],
    [0.129_411_764_705_882_37, 0.4, 0.674_509_803_921_568_7],
    [0.019_607_843_137_254_9, 0.188_235_294_117_647_06, 0.380_392_156_862_745_1],
];

/// Evenly spaced anchor colors, linearly interpolated and sampled into a
/// [`LUT_SIZE`]-entry table.
///
/// Lookup picks entry `floor(t * LUT_SIZE)`; `t == 1` lands on the last
/// entry, values below 0 on the first, values above 1 on the last. NaN maps
/// to transparent black.
#[derive(Debug, Clone)]
pub struct SegmentedColormap {
    name: String,
    lut: Vec<[f64; 3]>,
}

impl SegmentedColormap {
    /// Build from at least two anchor colors; `None` otherwise.
    pub fn from_anchors(name: impl Into<String>, anchors: &[[f64; 3]]) -> Option<Self> {
        if anchors.len() < 2 {
            return None;
        }
        Some(Self {
            name: name.into(),
            lut: sample(anchors),
        })
    }

    /// The red-blue diverging map.
    pub fn rd_bu() -> Self {
        Self {
            name: "RdBu".to_string(),
            lut: sample(&RD_BU),
        }
    }

    pub fn lut(&self) -> &[[f64; 3]] {
        &self.lut
    }
}

impl Default for SegmentedColormap {
    fn default() -> Self {
        Self::rd_bu()
    }
}

impl Colormap for SegmentedColormap {
    fn rgba(&self, t: f64) -> [f64; 4] {
        if t.is_nan() {
            return [0.0, 0.0, 0.0, 0.0];
        }
        let n = self.lut.len();
        let scaled = t * n as f64;
        let idx = if scaled < 0.0 {
            0
        } else {
            (scaled as usize).min(n - 1)
        };
        let [r, g, b] = self.lut[idx];
        [r, g, b, 1.0]
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn sample(anchors: &[[f64; 3]]) -> Vec<[f64; 3]> {
    let segments = (anchors.len() - 1) as f64;
    (0..LUT_SIZE)
        .map(|i| {
            let x = i as f64 / (LUT_SIZE - 1) as f64 * segments;
            let lo = (x.floor() as usize).min(anchors.len() - 2);
            let frac = x - lo as f64;
            let (a, b) = (anchors[lo], anchors[lo + 1]);
            [0, 1, 2].map(|c| a[c] + (b[c] - a[c]) * frac)
        })
        .collect()
}

/// Format the colormap's color at `t` as `rgb(R,G,B)`, each channel
/// `floor(c * 255 + 0.5)`.
pub fn map_to_rgb(t: f64, colormap: &dyn Colormap) -> String {
    let [r, g, b, _alpha] = colormap.rgba(t);
    format!("rgb({},{},{})", channel(r), channel(g), channel(b))
}

fn channel(c: f64) -> u8 {
    (c * 255.0 + 0.5).floor() as u8
}
