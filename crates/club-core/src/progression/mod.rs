//! Patch progression - prospect to Half patch to Full patch
//!
//! Pure, derived statistics recomputed from a member snapshot and its
//! activity history. Nothing here is persisted or cached.

mod rules;
mod stats;

pub use rules::{PatchRules, PatchRulesError};
pub use stats::{HalfPatchDateSource, MilestoneProgress, ProspectStats};
