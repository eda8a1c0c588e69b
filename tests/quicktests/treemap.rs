use treemap::{Error, TreeMap};

use std::collections::HashSet;

use quickcheck_macros::quickcheck;

/// Builds a map out of `xs`, storing each key as its own value. Repeated keys are rejected by the
/// map so only the first occurrence is kept.
fn map_of(xs: &[i8]) -> TreeMap<i8, i8> {
    let mut tree = TreeMap::new();
    for x in xs {
        let _ = tree.insert(*x, *x);
    }

    tree
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let tree = map_of(&xs);

    xs.iter()
        .all(|x| tree.get(x) == Ok(x) && tree.contains_key(x) && tree.contains_value(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree = map_of(&xs);
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.get(x) == Err(Error::KeyNotFound) && !tree.contains_key(x))
}

#[quickcheck]
fn len_counts_distinct_keys(xs: Vec<i8>) -> bool {
    let mut tree = TreeMap::new();
    let inserted = xs.iter().filter(|x| tree.insert(**x, ()).is_ok()).count();
    let distinct: HashSet<_> = xs.iter().collect();

    tree.len() == inserted && tree.len() == distinct.len() && tree.is_empty() == xs.is_empty()
}

#[quickcheck]
fn duplicates_are_rejected(xs: Vec<i8>) -> bool {
    let mut tree = map_of(&xs);
    let len = tree.len();

    xs.iter()
        .all(|x| tree.insert(*x, x.wrapping_add(1)) == Err(Error::DuplicateKey))
        && tree.len() == len
        && xs.iter().all(|x| tree.get(x) == Ok(x))
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree = map_of(&xs);
    let mut removed = 0;
    for delete in &deletes {
        if tree.remove(delete).is_ok() {
            removed += 1;
        }
    }

    let mut still_present = xs.clone();
    for delete in &deletes {
        // We may have inserted the same value multiple times - delete each one.
        while let Some(pos) = still_present.iter().position(|x| x == delete) {
            still_present.swap_remove(pos);
        }
    }

    let distinct: HashSet<_> = xs.iter().collect();
    deletes.iter().all(|x| !tree.contains_key(x))
        && still_present.iter().all(|x| tree.get(x) == Ok(x))
        && tree.len() == distinct.len() - removed
}

#[quickcheck]
fn floor_and_ceil_match_linear_scan(xs: Vec<i8>, queries: Vec<i8>) -> bool {
    let tree = map_of(&xs);

    queries.iter().all(|q| {
        let (floor, ceil) = if xs.is_empty() {
            (Err(Error::EmptyTree), Err(Error::EmptyTree))
        } else {
            (
                xs.iter().filter(|x| *x <= q).max().ok_or(Error::KeyOutOfRange),
                xs.iter().filter(|x| *x >= q).min().ok_or(Error::KeyOutOfRange),
            )
        };

        tree.floor_key(q) == floor && tree.ceil_key(q) == ceil
    })
}

#[quickcheck]
fn min_and_max_match_linear_scan(xs: Vec<i8>) -> bool {
    let tree = map_of(&xs);

    tree.min_key() == xs.iter().min().ok_or(Error::EmptyTree)
        && tree.max_key() == xs.iter().max().ok_or(Error::EmptyTree)
}

#[quickcheck]
fn removing_everything_empties_the_map(xs: Vec<i8>) -> bool {
    let mut tree = map_of(&xs);
    let distinct: HashSet<_> = xs.iter().collect();

    distinct.iter().all(|x| tree.remove(x) == Ok(**x))
        && tree.is_empty()
        && xs.first().map_or(true, |x| tree.remove(x) == Err(Error::EmptyTree))
}
