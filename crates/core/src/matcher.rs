//! Condition-to-provider matching

use crate::provider::{ProviderDirectory, ProviderRecord};
use crate::taxonomy::resolve_specialties;

/// Providers whose specialty (case-insensitive) is relevant to the condition.
///
/// When nothing matches, every provider is returned so the caller always
/// has candidates to rank.
pub fn match_by_specialty<'a>(
    providers: &'a [ProviderRecord],
    condition_text: &str,
) -> Vec<&'a ProviderRecord> {
    let specialties = resolve_specialties(condition_text);

    let matched: Vec<&ProviderRecord> = providers
        .iter()
        .filter(|p| specialties.contains(p.specialty.trim().to_lowercase().as_str()))
        .collect();

    if matched.is_empty() {
        tracing::debug!(
            condition = condition_text,
            specialties = ?specialties,
            "No provider matched the resolved specialties, widening to all providers"
        );
        return providers.iter().collect();
    }

    matched
}

impl ProviderDirectory {
    /// See [`match_by_specialty`]
    pub fn match_by_specialty(&self, condition_text: &str) -> Vec<&ProviderRecord> {
        match_by_specialty(self.all(), condition_text)
    }
}
