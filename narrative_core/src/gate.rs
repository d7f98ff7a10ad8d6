//! Session gate - decides when the verdict may be called.

/// The verdict unlocks once the subject has confessed and enough evidence is found.
///
/// Always recomputed from its inputs; there is no stored gate state.
pub fn session_unlocked(confession_raised: bool, found_evidence: usize, total_evidence: usize) -> bool {
    confession_raised && found_evidence >= total_evidence
}
