use super::Confirmation;

/// Plan types whose confirmations are worth downloading.
pub const RELEVANT_PLAN_TYPES: &[&str] = &["Restricted Stock", "STOCK OPTIONS"];

pub fn filter_relevant(confirmations: Vec<Confirmation>) -> Vec<Confirmation> {
    confirmations
        .into_iter()
        .filter(|confirmation| RELEVANT_PLAN_TYPES.contains(&confirmation.plan_type_code.as_str()))
        .collect()
}
