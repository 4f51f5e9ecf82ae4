//! List merge service
//!
//! Absorbs one list's restaurants into another and drops the absorbed list.

use tracing::{debug, info};

use crate::domain::{DomainError, DomainResult, ListRegistry};

/// Result of a completed merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Index of the target list after the source was removed
    pub target: usize,
    /// Name of the list that was merged away
    pub source_name: String,
    /// Restaurants appended to the target
    pub added: usize,
    /// Restaurants dropped because the target already had them
    pub skipped: usize,
}

/// Merges restaurant lists inside a `ListRegistry`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeService;

impl MergeService {
    pub fn new() -> Self {
        Self
    }

    /// Merge the list at `source` into the list at `target`.
    ///
    /// `source == None` means the caller declined to pick a list; that is a
    /// no-op returning `Ok(None)`. Otherwise both indices must be valid and
    /// distinct, checked before anything is mutated. Restaurants already in
    /// the target are skipped, then the source is removed via
    /// [`ListRegistry::remove_at`], which keeps the selection pointing at the
    /// same logical list.
    ///
    /// Observers are not notified here; `SelectionController::merge` does that.
    pub fn merge(
        &self,
        registry: &mut ListRegistry,
        target: usize,
        source: Option<usize>,
    ) -> DomainResult<Option<MergeOutcome>> {
        let Some(source) = source else {
            debug!("merge: no source chosen, nothing to do");
            return Ok(None);
        };
        Self::validate(registry, target, source)?;

        let incoming = registry.get(source)?.restaurants().to_vec();
        let offered = incoming.len();
        let added = registry.get_mut(target)?.add_all(incoming);
        let removed = registry.remove_at(source)?;

        let outcome = MergeOutcome {
            target: if source < target { target - 1 } else { target },
            source_name: removed.name().to_string(),
            added,
            skipped: offered - added,
        };
        info!(
            "merge: {} -> {} (added={}, skipped={})",
            outcome.source_name,
            registry.get(outcome.target)?.name(),
            outcome.added,
            outcome.skipped
        );
        Ok(Some(outcome))
    }

    fn validate(registry: &ListRegistry, target: usize, source: usize) -> DomainResult<()> {
        let invalid = |reason| DomainError::InvalidMerge {
            target_index: target,
            source_index: source,
            reason,
        };
        if target == source {
            return Err(invalid("a list cannot be merged into itself"));
        }
        if target >= registry.len() {
            return Err(invalid("target index out of range"));
        }
        if source >= registry.len() {
            return Err(invalid("source index out of range"));
        }
        Ok(())
    }
}
