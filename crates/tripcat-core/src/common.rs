use serde::{Deserialize, Serialize};

/// Simple aggregate statistics for one reconciliation pass.
///
/// Returned alongside the catalog by [`crate::reconcile_with_stats`]. The
/// counts describe the inputs as they were seen, so re-running the same feeds
/// yields the same numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileStats {
    /// Flag records received.
    pub flag_records: usize,
    /// Distinct ISO codes that survived flag validation.
    pub countries_with_flags: usize,
    /// Position records received.
    pub position_records: usize,
    /// Positions attached through the ISO2 join (overwrites included).
    pub matched_by_iso: usize,
    /// Valid positions whose ISO2 had no flag entry.
    pub unmatched_positions: usize,
    /// Positions attached through the name fallback.
    pub matched_by_name: usize,
    /// Whether the name fallback ran.
    pub name_fallback: bool,
    /// Countries in the final catalog.
    pub countries: usize,
}
