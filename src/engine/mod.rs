//! The transform engine: a pure function from raw records to grouped view
//! records.
//!
//! Stateless by design so it can run on the worker thread or inline as a
//! fallback. Order of operations matters: the nationality tally is computed
//! *after* filtering, so counts always describe the filtered population.

use std::collections::{BTreeMap, HashMap};

use crate::models::{GroupBy, Processed, RawUser, UserGroup, ViewUser};

/// Group title for records whose grouping key is blank.
const OTHER_GROUP: &str = "Other";

/// Filter, enrich, and group a set of raw users.
///
/// - `filter_term` (trimmed): case-insensitive substring match against first
///   name, last name, or email; empty keeps everything.
/// - Groups come back sorted ascending by title; members keep the filtered
///   input order.
pub fn process_users(users: &[RawUser], group_by: GroupBy, filter_term: &str) -> Processed {
    let term = filter_term.trim().to_lowercase();

    let filtered: Vec<&RawUser> = if term.is_empty() {
        users.iter().collect()
    } else {
        users.iter().filter(|u| matches_term(u, &term)).collect()
    };

    // Tally nationalities over the filtered set, not the original input.
    let mut nat_counts: HashMap<&str, usize> = HashMap::new();
    for user in &filtered {
        *nat_counts.entry(user.nat.as_str()).or_insert(0) += 1;
    }

    let all_users: Vec<ViewUser> = filtered
        .iter()
        .map(|user| ViewUser {
            firstname: user.name.first.clone(),
            lastname: user.name.last.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            nat: user.nat.clone(),
            nat_count: nat_counts.get(user.nat.as_str()).copied().unwrap_or(0),
            image_src: format!("{}?id={}", user.picture.medium, user.login.uuid),
            raw: (*user).clone(),
        })
        .collect();

    // BTreeMap keeps group titles in ascending order; pushing in input order
    // keeps members stable within each group.
    let mut buckets: BTreeMap<String, Vec<ViewUser>> = BTreeMap::new();
    for user in &all_users {
        buckets
            .entry(group_key(user, group_by))
            .or_default()
            .push(user.clone());
    }

    let groups = buckets
        .into_iter()
        .map(|(title, users)| UserGroup { title, users })
        .collect();

    Processed { all_users, groups }
}

fn matches_term(user: &RawUser, term: &str) -> bool {
    user.name.first.to_lowercase().contains(term)
        || user.name.last.to_lowercase().contains(term)
        || user.email.to_lowercase().contains(term)
}

fn group_key(user: &ViewUser, group_by: GroupBy) -> String {
    let key = match group_by {
        GroupBy::Nationality => user.nat.clone(),
        GroupBy::Alphabetic => user
            .firstname
            .chars()
            .next()
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_default(),
    };
    if key.is_empty() {
        OTHER_GROUP.to_string()
    } else {
        key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawUser;

    fn sample_set() -> Vec<RawUser> {
        vec![
            RawUser::sample("Bob", "Martin", "bob@example.com", "US", "u1"),
            RawUser::sample("Alice", "Smith", "alice@example.com", "US", "u2"),
            RawUser::sample("Claire", "Dubois", "claire@example.fr", "FR", "u3"),
        ]
    }

    #[test]
    fn groups_by_nationality_sorted_with_counts() {
        let result = process_users(&sample_set(), GroupBy::Nationality, "");

        let titles: Vec<&str> = result.groups.iter().map(|g| g.title.as_str()).collect();
        assert_eq!(titles, vec!["FR", "US"]);
        assert_eq!(result.groups[0].users.len(), 1);
        assert_eq!(result.groups[1].users.len(), 2);
        for user in &result.groups[1].users {
            assert_eq!(user.nat_count, 2);
        }
        assert_eq!(result.groups[0].users[0].nat_count, 1);
    }

    #[test]
    fn filter_is_case_insensitive_across_fields() {
        let users = sample_set();

        let by_first = process_users(&users, GroupBy::Nationality, "BOB");
        assert_eq!(by_first.all_users.len(), 1);
        assert_eq!(by_first.all_users[0].firstname, "Bob");

        let by_last = process_users(&users, GroupBy::Nationality, "dubois");
        assert_eq!(by_last.all_users.len(), 1);
        assert_eq!(by_last.all_users[0].lastname, "Dubois");

        let by_email = process_users(&users, GroupBy::Nationality, "example.fr");
        assert_eq!(by_email.all_users.len(), 1);
        assert_eq!(by_email.all_users[0].email, "claire@example.fr");
    }

    #[test]
    fn nat_counts_recomputed_after_filter() {
        // Unfiltered: US appears twice. Filtered to Bob: US count must be 1.
        let result = process_users(&sample_set(), GroupBy::Nationality, "bob");
        assert_eq!(result.all_users.len(), 1);
        assert_eq!(result.all_users[0].nat_count, 1);
    }

    #[test]
    fn alphabetic_grouping_with_filter() {
        let result = process_users(&sample_set(), GroupBy::Alphabetic, "bob");
        assert_eq!(result.groups.len(), 1);
        assert_eq!(result.groups[0].title, "B");
        assert_eq!(result.groups[0].users[0].firstname, "Bob");
    }

    #[test]
    fn alphabetic_groups_cover_all_initials() {
        let result = process_users(&sample_set(), GroupBy::Alphabetic, "");
        let titles: Vec<&str> = result.groups.iter().map(|g| g.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
    }

    #[test]
    fn blank_key_falls_into_other() {
        let mut user = RawUser::sample("", "Nameless", "x@example.com", "US", "u9");
        user.nat = String::new();

        let by_alpha = process_users(std::slice::from_ref(&user), GroupBy::Alphabetic, "");
        assert_eq!(by_alpha.groups[0].title, "Other");

        let by_nat = process_users(&[user], GroupBy::Nationality, "");
        assert_eq!(by_nat.groups[0].title, "Other");
    }

    #[test]
    fn image_src_carries_uuid_suffix() {
        let result = process_users(&sample_set(), GroupBy::Nationality, "bob");
        assert_eq!(
            result.all_users[0].image_src,
            "https://example.com/u1/med.jpg?id=u1"
        );
    }

    #[test]
    fn empty_input_yields_empty_result() {
        let result = process_users(&[], GroupBy::Nationality, "");
        assert!(result.all_users.is_empty());
        assert!(result.groups.is_empty());
    }

    #[test]
    fn members_keep_input_order_within_group() {
        let users = vec![
            RawUser::sample("Zoe", "Young", "zoe@example.com", "US", "u1"),
            RawUser::sample("Adam", "Old", "adam@example.com", "US", "u2"),
        ];
        let result = process_users(&users, GroupBy::Nationality, "");
        let names: Vec<&str> = result.groups[0]
            .users
            .iter()
            .map(|u| u.firstname.as_str())
            .collect();
        assert_eq!(names, vec!["Zoe", "Adam"]);
    }
}
