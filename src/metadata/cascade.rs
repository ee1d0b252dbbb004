//! First-non-empty-wins selection.
//!
//! A cascade is an ordered list of pure rules, each looking at the same input
//! and optionally producing a value. Evaluation stops at the first rule whose
//! value is non-blank.

/// A single selection rule.
pub type Rule<T> = fn(&T) -> Option<String>;

/// Evaluate `rules` in order and return the first non-blank value.
pub fn first_present<T>(input: &T, rules: &[Rule<T>]) -> Option<String> {
    rules
        .iter()
        .find_map(|rule| rule(input).filter(|value| !value.trim().is_empty()))
}
