//! Handle value arrays
//!
//! Sliders rarely carry more than a handful of handles, so the value array
//! lives inline in a `SmallVec` and only spills to the heap for large sets.

use smallvec::SmallVec;

/// Ordered handle values of a slider
pub type Values = SmallVec<[f64; 4]>;

/// Sort values ascending in place
pub fn sort_values(values: &mut Values) {
    values.sort_by(|a, b| a.total_cmp(b));
}

/// Return an ascending copy of the given values
pub fn sorted(values: &[f64]) -> Values {
    let mut out: Values = values.iter().copied().collect();
    sort_values(&mut out);
    out
}

/// Exact element-wise equality (no epsilon)
pub fn same_values(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x == y)
}
