// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Ordered membership lists (`children`, `attachers`, `incoming`, `outgoing`).
//!
//! Removal reports where the item was, so a revert can put it back at exactly that
//! position. Removing an absent item is a no-op, which lets delete cascades reach the
//! same connection from both of its ends.

pub fn index_of<T: PartialEq>(list: &[T], item: &T) -> Option<usize> {
    list.iter().position(|candidate| candidate == item)
}

/// Removes `item` and returns the index it occupied.
pub fn remove<T: PartialEq>(list: &mut Vec<T>, item: &T) -> Option<usize> {
    let index = index_of(list, item)?;
    list.remove(index);
    Some(index)
}

/// Adds `item` at `index`, or appends it when no index is given.
///
/// An item that is already present stays where it is unless an explicit, different
/// index is requested, in which case it is moved. Indices past the end append.
pub fn add<T: PartialEq>(list: &mut Vec<T>, item: T, index: Option<usize>) {
    match (index_of(list, &item), index) {
        (Some(current), Some(wanted)) if current == wanted => return,
        (Some(current), Some(_)) => {
            list.remove(current);
        }
        (Some(_), None) => return,
        (None, _) => {}
    }

    match index {
        Some(wanted) if wanted < list.len() => list.insert(wanted, item),
        _ => list.push(item),
    }
}

#[cfg(test)]
mod tests {
    use super::{add, index_of, remove};

    #[test]
    fn remove_reports_index_and_is_idempotent() {
        let mut list = vec!["a", "b", "c"];
        assert_eq!(remove(&mut list, &"b"), Some(1));
        assert_eq!(remove(&mut list, &"b"), None);
        assert_eq!(list, vec!["a", "c"]);
    }

    #[test]
    fn add_restores_recorded_position() {
        let mut list = vec!["a", "b", "c"];
        let index = remove(&mut list, &"a");
        add(&mut list, "a", index);
        assert_eq!(list, vec!["a", "b", "c"]);
    }

    #[test]
    fn add_appends_without_index_and_never_duplicates() {
        let mut list = vec!["a"];
        add(&mut list, "b", None);
        add(&mut list, "a", None);
        assert_eq!(list, vec!["a", "b"]);
    }

    #[test]
    fn add_moves_present_item_to_requested_index() {
        let mut list = vec!["a", "b", "c"];
        add(&mut list, "c", Some(0));
        assert_eq!(list, vec!["c", "a", "b"]);
        add(&mut list, "c", Some(9));
        assert_eq!(list, vec!["a", "b", "c"]);
        assert_eq!(index_of(&list, &"c"), Some(2));
    }
}
