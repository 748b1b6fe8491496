//! Per-nation protest counts.
//!
//! A naive O(records × nations) containment sweep. Both tables are small
//! and this runs offline, once per regeneration, so there is no spatial
//! index here.
//!
//! Containment rule: a point counts for a nation when it lies in the
//! polygon interior (`geo`'s `Contains`). Points exactly on a shared border
//! count for no nation. Polygons are assumed non-overlapping, so no
//! tie-break is needed; points outside every polygon are simply not
//! counted, which is why the counts can sum to less than the record total.

use geo::algorithm::contains::Contains;
use tracing::info;

use crate::reader::{NationPolygon, ProtestRecord};

/// Assign `protest_count` to every nation, zero included.
///
/// This is the only mutation `NationPolygon` ever sees; afterwards the
/// table is read-only.
pub fn count_protests(protests: &[ProtestRecord], nations: &mut [NationPolygon]) {
    for nation in nations.iter_mut() {
        let count = protests
            .iter()
            .filter(|record| nation.geometry.contains(&record.point))
            .count();
        nation.protest_count = count as u32;
    }

    let matched: u32 = nations.iter().map(|n| n.protest_count).sum();
    info!(
        "Counted {} of {} protests inside {} nations",
        matched,
        protests.len(),
        nations.len()
    );
}
