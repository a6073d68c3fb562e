use balanced_tree::BalancedTree;
use quickcheck_macros::quickcheck;

use std::cmp::Ordering;
use std::collections::HashSet;

/// The largest height an AVL tree holding `len` values can have.
fn height_bound(len: usize) -> usize {
    (1.44 * ((len + 2) as f64).log2()).ceil() as usize
}

fn build(xs: &[i8]) -> BalancedTree<i8> {
    let mut tree = BalancedTree::new();
    for x in xs {
        tree.insert(*x);
    }

    tree
}

#[quickcheck]
fn iterates_in_sorted_order(xs: Vec<i8>) -> bool {
    let tree = build(&xs);

    let mut sorted = xs;
    sorted.sort();
    tree.iter().eq(sorted.iter()) && tree.into_iter().eq(sorted.into_iter())
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let tree = build(&xs);

    xs.iter().all(|x| tree.contains(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree = build(&xs);
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| !tree.contains(x))
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree = build(&xs);

    let mut still_present = xs.clone();
    let mut removed = 0;
    for delete in &deletes {
        let expected = match still_present.iter().position(|x| x == delete) {
            Some(pos) => {
                still_present.swap_remove(pos);
                true
            }
            None => false,
        };
        if tree.remove(delete) != expected {
            return false;
        }
        if expected {
            removed += 1;
        }
    }

    still_present.sort();
    tree.len() == xs.len() - removed
        && tree.iter().count() == tree.len()
        && tree.iter().eq(still_present.iter())
        && still_present.iter().all(|x| tree.contains(x))
}

#[quickcheck]
fn removing_missing_values_changes_nothing(xs: Vec<i8>, missing: Vec<i8>) -> bool {
    let mut tree = build(&xs);
    let before = tree.clone();
    let (len, height) = (tree.len(), tree.height());

    missing
        .iter()
        .filter(|m| !xs.contains(m))
        .all(|m| !tree.remove(m))
        && tree == before
        && tree.len() == len
        && tree.height() == height
}

#[quickcheck]
fn height_stays_logarithmic(xs: Vec<i16>, deletes: Vec<i16>) -> bool {
    let mut tree: BalancedTree<_> = xs.into_iter().collect();
    if tree.height() > height_bound(tree.len()) {
        return false;
    }

    deletes.iter().all(|d| {
        tree.remove(d);
        tree.height() <= height_bound(tree.len())
    })
}

#[quickcheck]
fn clear_is_idempotent(xs: Vec<i8>) -> bool {
    let mut tree = build(&xs);

    tree.clear();
    let once = tree.is_empty() && tree.height() == 0 && tree.iter().next().is_none();
    tree.clear();

    once && tree.len() == 0 && tree.height() == 0 && tree.iter().next().is_none()
}

/// A value ordered only by its key so that equal values can still be told apart.
#[derive(Clone, Copy, Debug)]
struct Keyed {
    key: u8,
    order: usize,
}

impl PartialEq for Keyed {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Keyed {}

impl PartialOrd for Keyed {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Keyed {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

#[quickcheck]
fn equal_values_keep_insertion_order(keys: Vec<u8>) -> bool {
    let values: Vec<_> = keys
        .iter()
        .enumerate()
        .map(|(order, key)| Keyed { key: key % 8, order })
        .collect();
    let tree: BalancedTree<_> = values.iter().copied().collect();

    // A stable sort orders equal keys by insertion too.
    let mut sorted = values;
    sorted.sort_by_key(|v| v.key);
    tree.iter()
        .map(|v| (v.key, v.order))
        .eq(sorted.iter().map(|v| (v.key, v.order)))
}
