//! Banded lookup: pick a categorical value by which interval a reading falls in.

/// How a rule compares the reading against its bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Matches when `value < bound`.
    Below,
    /// Matches when `value > bound`.
    Above,
}

/// Ordered rules; the first match wins, otherwise `fallback`.
#[derive(Debug, Clone, Copy)]
pub struct Bands<'a, T> {
    rules: &'a [(Edge, f64, T)],
    fallback: T,
}

impl<'a, T: Copy> Bands<'a, T> {
    pub const fn new(rules: &'a [(Edge, f64, T)], fallback: T) -> Self {
        Self { rules, fallback }
    }

    pub fn pick(&self, value: f64) -> T {
        self.rules
            .iter()
            .find(|(edge, bound, _)| match edge {
                Edge::Below => value < *bound,
                Edge::Above => value > *bound,
            })
            .map(|(_, _, v)| *v)
            .unwrap_or(self.fallback)
    }
}
