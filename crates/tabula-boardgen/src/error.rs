//! Board Generator error kinds (§7 `GeneratorError`).

/// Why a request could not be satisfied, or could only be satisfied
/// partially. Distinct from the feasibility *report* attached to a
/// successful-but-degraded response — this is the hard failure path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratorError {
    /// One or more feasibility gates failed (§4.7). Carries the
    /// human-readable reasons, repair suggestions included where
    /// applicable.
    Infeasible(Vec<String>),
    /// The greedy construction could not realize the requested frequency
    /// vector even though the up-front gates passed — a possible but rare
    /// outcome, since the gates in §4.7 are necessary, not sufficient,
    /// conditions for the underlying bipartite degree sequence.
    ConstructionFailed(String),
    /// Every restart's best incumbent still contained two identical
    /// boards. Feasibility guarantees `C(N,S) >= B`, so a duplicate-free
    /// assignment exists in principle; the search simply didn't find one
    /// within its restart/refinement budget. Reporting `success` here
    /// would violate P10 (no two generated boards identical), so this is
    /// a hard failure rather than a `bestEffort` incumbent.
    DuplicateBoards,
}

impl std::fmt::Display for GeneratorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeneratorError::Infeasible(reasons) => {
                write!(f, "infeasible request: {}", reasons.join("; "))
            }
            GeneratorError::ConstructionFailed(reason) => {
                write!(f, "construction failed: {reason}")
            }
            GeneratorError::DuplicateBoards => {
                write!(f, "no duplicate-free assignment found within the search budget")
            }
        }
    }
}
impl std::error::Error for GeneratorError {}
