//! Order-preserving multiset difference

use std::hash::Hash;

use ahash::AHashMap;

/// Items of each side that found no equal counterpart on the other side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Difference<T> {
    pub only_in_a: Vec<T>,
    pub only_in_b: Vec<T>,
}

impl<T> Difference<T> {
    pub fn is_empty(&self) -> bool {
        self.only_in_a.is_empty() && self.only_in_b.is_empty()
    }

    pub fn len(&self) -> usize {
        self.only_in_a.len() + self.only_in_b.len()
    }

    /// Report lines: every `a` leftover as `(a) ...`, then every `b`
    /// leftover as `(b) ...`.
    pub fn lines<F>(&self, render: F) -> Vec<String>
    where
        F: Fn(&T) -> String,
    {
        let mut lines = Vec::with_capacity(self.len());
        lines.extend(self.only_in_a.iter().map(|item| format!("(a) {}", render(item))));
        lines.extend(self.only_in_b.iter().map(|item| format!("(b) {}", render(item))));
        lines
    }
}

/// Items of `source` left over after cancelling them one for one against
/// `other`. Later duplicates are the ones reported.
fn leftovers<'a, T: Hash + Eq>(source: &'a [T], other: &'a [T]) -> Vec<&'a T> {
    let mut remaining: AHashMap<&T, usize> = AHashMap::with_capacity(other.len());
    for item in other {
        *remaining.entry(item).or_insert(0) += 1;
    }

    source
        .iter()
        .filter(|item| match remaining.get_mut(item) {
            Some(count) if *count > 0 => {
                *count -= 1;
                false
            }
            _ => true,
        })
        .collect()
}

/// Multiset difference of two sequences.
///
/// `[u1, u1, u2]` against `[u1, u2, u2]` leaves one `u1` on the `a` side
/// and one `u2` on the `b` side.
pub fn multiset_difference<'a, T: Hash + Eq>(a: &'a [T], b: &'a [T]) -> Difference<&'a T> {
    Difference {
        only_in_a: leftovers(a, b),
        only_in_b: leftovers(b, a),
    }
}

/// True when both sequences hold the same items with the same multiplicity.
pub fn content_equals<T: Hash + Eq>(a: &[T], b: &[T]) -> bool {
    a.len() == b.len() && multiset_difference(a, b).is_empty()
}

/// Multiset difference for items whose equality cannot be hashed exactly.
///
/// `key` must agree with `matches`: items that match always share a key.
/// Candidates are bucketed by key and paired with the first unconsumed
/// item of `b` for which `matches(a_item, b_item)` holds; `a` is always the
/// left operand.
pub fn multiset_difference_by<'a, T, K, FK, FM>(
    a: &'a [T],
    b: &'a [T],
    key: FK,
    matches: FM,
) -> Difference<&'a T>
where
    K: Hash + Eq,
    FK: Fn(&T) -> K,
    FM: Fn(&T, &T) -> bool,
{
    let mut buckets: AHashMap<K, Vec<usize>> = AHashMap::with_capacity(b.len());
    for (index, item) in b.iter().enumerate() {
        buckets.entry(key(item)).or_default().push(index);
    }

    let mut consumed = vec![false; b.len()];
    let mut only_in_a = Vec::new();

    for item in a {
        let paired = buckets.get(&key(item)).and_then(|candidates| {
            candidates
                .iter()
                .copied()
                .find(|&index| !consumed[index] && matches(item, &b[index]))
        });
        match paired {
            Some(index) => consumed[index] = true,
            None => only_in_a.push(item),
        }
    }

    let only_in_b = b
        .iter()
        .zip(consumed)
        .filter_map(|(item, used)| (!used).then_some(item))
        .collect();

    Difference {
        only_in_a,
        only_in_b,
    }
}
