//! Shrink candidate producers.
//!
//! Every function here is lazy: candidates are produced one at a time and
//! are ordered from most to least aggressive, so the property runner can
//! stop at the first one that still fails.

use std::rc::Rc;

/// `n, n/2, n/4, ..` down to 1.
pub fn halves(n: usize) -> impl Iterator<Item = usize> {
    std::iter::successors(Some(n), |&k| Some(k / 2)).take_while(|&k| k > 0)
}

/// Candidates moving `value` toward `destination`, starting with the
/// destination itself and approaching `value` by halving the distance.
pub fn towards(destination: i128, value: i128) -> impl Iterator<Item = i128> {
    let diff = value - destination;
    std::iter::successors(Some(diff), |&d| Some(d / 2))
        .take_while(|&d| d != 0)
        .map(move |d| value - d)
}

/// Every way of removing one aligned chunk of `k` consecutive elements.
///
/// Chunks start at `0, k, 2k, ..`; a trailing partial chunk is never removed.
pub fn removes<X>(k: usize, xs: Rc<Vec<X>>) -> impl Iterator<Item = Vec<X>>
where
    X: Clone,
{
    let n = xs.len();
    let starts = if k == 0 { 0 } else { n / k };
    (0..starts).map(move |chunk| {
        let start = chunk * k;
        let mut remaining = Vec::with_capacity(n - k);
        remaining.extend_from_slice(&xs[..start]);
        remaining.extend_from_slice(&xs[start + k..]);
        remaining
    })
}

/// One candidate per index, each with exactly that element deleted.
///
/// For an input of length `n` this yields `n` candidates of length `n - 1`,
/// the remaining elements kept in their original order.
pub fn single_deletions<T>(xs: Vec<T>) -> impl Iterator<Item = Vec<T>>
where
    T: Clone,
{
    let n = xs.len();
    (0..n).map(move |i| {
        let mut candidate = Vec::with_capacity(n - 1);
        candidate.extend_from_slice(&xs[..i]);
        candidate.extend_from_slice(&xs[i + 1..]);
        candidate
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_halves() {
        assert_eq!(halves(10).collect::<Vec<_>>(), vec![10, 5, 2, 1]);
        assert_eq!(halves(0).count(), 0);
    }

    #[test]
    fn test_towards_starts_at_destination() {
        assert_eq!(towards(0, 100).collect::<Vec<_>>(), vec![0, 50, 75, 88, 94, 97, 99]);
        assert_eq!(towards(-5, -1).collect::<Vec<_>>(), vec![-5, -3, -2]);
        assert_eq!(towards(3, 3).count(), 0);
    }

    #[test]
    fn test_removes_aligned_chunks() {
        let xs = Rc::new(vec![1, 2, 3, 4, 5]);
        assert_eq!(
            removes(2, Rc::clone(&xs)).collect::<Vec<_>>(),
            vec![vec![3, 4, 5], vec![1, 2, 5]]
        );
        assert_eq!(removes(5, xs).collect::<Vec<_>>(), vec![Vec::<i32>::new()]);
    }

    #[test]
    fn test_single_deletions() {
        let candidates: Vec<_> = single_deletions(vec!['a', 'b', 'c']).collect();
        assert_eq!(
            candidates,
            vec![vec!['b', 'c'], vec!['a', 'c'], vec!['a', 'b']]
        );
        assert_eq!(single_deletions(Vec::<u8>::new()).count(), 0);
    }
}
