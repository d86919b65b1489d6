//! Tier and topical-category classification of scored accounts.

pub mod category;
pub mod tier;

pub use category::{categorize, Category};
pub use tier::{determine_tier, Tier};

use crate::stats::AccountMap;

/// Set `category` and `tier` on every qualified account.
///
/// Returns the number of accounts classified.
pub fn classify_accounts(accounts: &mut AccountMap) -> usize {
    let mut classified = 0;
    for account in accounts.as_mut_slice() {
        let Some(score) = account.influence_score() else {
            continue;
        };
        account.category = Some(categorize(&account.display_name));
        account.tier = Some(determine_tier(score));
        classified += 1;
    }
    classified
}
