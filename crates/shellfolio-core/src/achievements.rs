//! Achievement badges for CTF progress.
//!
//! The rule function is pure: it derives the earned set from the solved
//! count, the catalog size and the Konami flag. Callers union its result
//! into the stored set, so a badge once earned is never revoked.

use serde::Serialize;
use std::collections::BTreeSet;

pub const FIRST_BLOOD: &str = "first_blood";
pub const HALFWAY: &str = "halfway";
pub const MASTER_HACKER: &str = "master_hacker";
pub const KONAMI_WARRIOR: &str = "konami_warrior";

/// Achievement badge with ASCII symbol and description
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Achievement {
    /// Unique identifier
    pub id: &'static str,
    /// ASCII badge symbol (e.g., "[1]", "<*>")
    pub badge: &'static str,
    /// Short name
    pub name: &'static str,
    /// Description of how to earn it
    pub description: &'static str,
}

impl Achievement {
    const fn new(
        id: &'static str,
        badge: &'static str,
        name: &'static str,
        desc: &'static str,
    ) -> Self {
        Self {
            id,
            badge,
            name,
            description: desc,
        }
    }
}

/// All available achievements
pub fn all_achievements() -> Vec<Achievement> {
    vec![
        Achievement::new(FIRST_BLOOD, "[1]", "First Blood", "Solve your first challenge"),
        Achievement::new(HALFWAY, "[1/2]", "Halfway There", "Solve half of all challenges"),
        Achievement::new(MASTER_HACKER, "[**]", "Master Hacker", "Solve every challenge"),
        Achievement::new(KONAMI_WARRIOR, "<^^vv>", "Konami Warrior", "Enter the secret code"),
    ]
}

pub fn find(id: &str) -> Option<Achievement> {
    all_achievements().into_iter().find(|a| a.id == id)
}

/// Achievements earned by the given state.
pub fn earned(solved: usize, catalog_size: usize, konami_unlocked: bool) -> BTreeSet<String> {
    let mut ids = BTreeSet::new();
    if solved == 1 {
        ids.insert(FIRST_BLOOD.to_string());
    }
    if catalog_size > 0 && solved >= catalog_size.div_ceil(2) {
        ids.insert(HALFWAY.to_string());
    }
    if catalog_size > 0 && solved == catalog_size {
        ids.insert(MASTER_HACKER.to_string());
    }
    if konami_unlocked {
        ids.insert(KONAMI_WARRIOR.to_string());
    }
    ids
}

/// Ids present in `after` but not in `before`, in catalog order.
pub fn newly_unlocked(before: &BTreeSet<String>, after: &BTreeSet<String>) -> Vec<Achievement> {
    all_achievements()
        .into_iter()
        .filter(|a| after.contains(a.id) && !before.contains(a.id))
        .collect()
}

/// Format badges of the unlocked ids for a one-line summary.
pub fn format_badges(unlocked: &BTreeSet<String>) -> String {
    all_achievements()
        .iter()
        .filter(|a| unlocked.contains(a.id))
        .map(|a| a.badge)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format a single achievement for notification
pub fn format_achievement_unlock(ach: &Achievement) -> String {
    format!(
        "{} Achievement unlocked: {} - {}",
        ach.badge, ach.name, ach.description
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_blood_only_at_one() {
        assert!(earned(1, 5, false).contains(FIRST_BLOOD));
        assert!(!earned(0, 5, false).contains(FIRST_BLOOD));
        assert!(!earned(2, 5, false).contains(FIRST_BLOOD));
    }

    #[test]
    fn test_halfway_rounds_up() {
        assert!(!earned(2, 5, false).contains(HALFWAY));
        assert!(earned(3, 5, false).contains(HALFWAY));
        assert!(earned(2, 4, false).contains(HALFWAY));
    }

    #[test]
    fn test_master_hacker() {
        let ids = earned(5, 5, false);
        assert!(ids.contains(MASTER_HACKER));
        assert!(ids.contains(HALFWAY));
    }

    #[test]
    fn test_empty_catalog_grants_nothing_for_solves() {
        assert!(earned(0, 0, false).is_empty());
        assert_eq!(earned(0, 0, true).len(), 1);
    }

    #[test]
    fn test_format_badges_ascii() {
        let ids: BTreeSet<String> = [FIRST_BLOOD, KONAMI_WARRIOR]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let formatted = format_badges(&ids);
        assert_eq!(formatted, "[1] <^^vv>");
    }

    #[test]
    fn test_newly_unlocked_diff() {
        let before = earned(1, 4, false);
        let after: BTreeSet<String> = before.union(&earned(2, 4, false)).cloned().collect();
        let new: Vec<_> = newly_unlocked(&before, &after).iter().map(|a| a.id).collect();
        assert_eq!(new, vec![HALFWAY]);
    }
}
