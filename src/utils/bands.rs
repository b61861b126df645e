/// Piecewise-constant lookup over ordered bands.
///
/// Every band is `(upper_edge, value)` and covers `previous_edge < x <= upper_edge`.
/// Inputs at or below `lower_edge` map to `below`; inputs past the last
/// edge map to `above`.
#[derive(Debug, Clone, Copy)]
pub struct BandTable {
    lower_edge: f64,
    below: f64,
    bands: &'static [(f64, f64)],
    above: f64,
}

impl BandTable {
    pub const fn new(
        lower_edge: f64,
        below: f64,
        bands: &'static [(f64, f64)],
        above: f64,
    ) -> Self {
        BandTable {
            lower_edge,
            below,
            bands,
            above,
        }
    }

    pub fn lookup(&self, x: f64) -> f64 {
        if x <= self.lower_edge {
            return self.below;
        }
        self.bands
            .iter()
            .find(|(upper_edge, _)| x <= *upper_edge)
            .map_or(self.above, |(_, value)| *value)
    }

    pub fn lower_edge(&self) -> f64 {
        self.lower_edge
    }

    pub fn upper_edge(&self) -> f64 {
        self.bands.last().map_or(self.lower_edge, |(edge, _)| *edge)
    }

    /// Band edges in ascending order, starting with the lower edge.
    pub fn edges(&self) -> impl Iterator<Item = f64> + '_ {
        std::iter::once(self.lower_edge).chain(self.bands.iter().map(|(edge, _)| *edge))
    }
}
