/// Aggregated view of challenge progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeProgress {
    pub total: usize,
    pub answered: usize,
    pub position: usize,
    pub is_exhausted: bool,
}
