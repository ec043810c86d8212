//! Crossover operators
//!
//! Order crossover recombines permutations without breaking the label
//! multiset; n-point crossover recombines fixed-length bit strings.
//! Both produce two complementary children per parent pair.

use rand::Rng;

use crate::genome::bit_string::BitString;
use crate::genome::permutation::Permutation;
use crate::operators::traits::CrossoverOperator;

/// Order crossover (OX1) for permutation genotypes
///
/// Copies a block of `⌈n/2⌉` positions, split into two disjoint random
/// sub-intervals, directly from parent 1 into child 1. Child 2 receives
/// parent 1's values at the complementary positions. The remaining gaps
/// in each child are filled by scanning parent 2 left to right and
/// placing each label into whichever child still lacks it, preserving
/// parent 2's relative order. Children are valid permutations of the
/// parents' label set by construction.
///
/// Reference: Davis, L. (1985). Applying Adaptive Algorithms to
/// Epistatic Domains.
#[derive(Clone, Debug, Default)]
pub struct OrderCrossover;

impl OrderCrossover {
    /// Create a new order crossover
    pub fn new() -> Self {
        Self
    }
}

/// A contiguous inclusive index interval `[start, end]` of `size`
/// positions, placed uniformly within `[0, n - 1]`.
fn random_subinterval<R: Rng>(n: usize, size: usize, rng: &mut R) -> (usize, usize) {
    debug_assert!(size >= 1 && size <= n);
    let start = rng.gen_range(0..=n - size);
    (start, start + size - 1)
}

/// A second interval of `size` positions disjoint from `first`, placed
/// fully before it when there is room, otherwise fully after.
fn second_subinterval<R: Rng>(
    n: usize,
    first: (usize, usize),
    size: usize,
    rng: &mut R,
) -> (usize, usize) {
    let (a, b) = first;
    if size <= a {
        let start = rng.gen_range(0..=a - size);
        (start, start + size - 1)
    } else {
        assert!(size <= n - 1 - b, "no room for the second block");
        let start = rng.gen_range(b + 1..=n - size);
        (start, start + size - 1)
    }
}

/// Two disjoint intervals jointly covering `size` positions of `[0, n)`
fn two_disjoint_blocks<R: Rng>(
    n: usize,
    size: usize,
    rng: &mut R,
) -> ((usize, usize), (usize, usize)) {
    debug_assert!(size >= 2 && size <= n);
    let size1 = rng.gen_range(1..size);
    let size2 = size - size1;
    let first = random_subinterval(n, size1, rng);
    let second = second_subinterval(n, first, size2, rng);
    (first, second)
}

impl CrossoverOperator<Permutation> for OrderCrossover {
    fn crossover<R: Rng>(
        &self,
        parent1: &Permutation,
        parent2: &Permutation,
        rng: &mut R,
    ) -> (Permutation, Permutation) {
        assert_eq!(parent1.len(), parent2.len(), "parent length mismatch");
        let n = parent1.len();
        assert!(n >= 3, "order crossover needs at least 3 elements");

        // Half the positions, rounded up, are copied directly.
        let block_size = n / 2 + n % 2;
        let (first, second) = two_disjoint_blocks(n, block_size, rng);

        let mut in_block = vec![false; n];
        for pos in first.0..=first.1 {
            in_block[pos] = true;
        }
        for pos in second.0..=second.1 {
            in_block[pos] = true;
        }

        let p1 = parent1.as_slice();
        let p2 = parent2.as_slice();

        let mut child1 = vec![0usize; n];
        let mut child2 = vec![0usize; n];
        // Label -> copied directly into child 1 (else into child 2).
        let mut in_child1 = vec![false; n];
        let mut gaps1 = Vec::with_capacity(n - block_size);
        let mut gaps2 = Vec::with_capacity(block_size);

        for pos in 0..n {
            if in_block[pos] {
                child1[pos] = p1[pos];
                in_child1[p1[pos]] = true;
                gaps2.push(pos);
            } else {
                child2[pos] = p1[pos];
                gaps1.push(pos);
            }
        }

        // Each label of parent 2 is missing from exactly one child.
        let mut next1 = 0;
        let mut next2 = 0;
        for &label in p2 {
            if in_child1[label] {
                child2[gaps2[next2]] = label;
                next2 += 1;
            } else {
                child1[gaps1[next1]] = label;
                next1 += 1;
            }
        }

        (
            Permutation::new_unchecked(child1),
            Permutation::new_unchecked(child2),
        )
    }
}

/// Generate `count` strictly increasing cut points for a genotype of
/// `length` positions
///
/// Point 0 is excluded and every point is below `length`; each draw is
/// taken from the remaining window, shrunk so the points still to come
/// always fit.
pub fn generate_cut_points<R: Rng>(count: usize, length: usize, rng: &mut R) -> Vec<usize> {
    assert!(count >= 1, "at least one cut point is required");
    assert!(count < length, "too many cut points for genotype length");

    let mut points = Vec::with_capacity(count);
    let mut lower = 1;
    for i in 0..count {
        let upper = length - (count - i - 1);
        let point = rng.gen_range(lower..upper);
        points.push(point);
        lower = point + 1;
    }
    points
}

/// Recombine two bit strings at the given sorted cut points
///
/// Walks the positions with parent 1 donating first; each cut point
/// toggles the donor. Child 1 receives the donor's bit, child 2 the
/// other parent's bit at every position.
pub fn recombine_at_points(
    parent1: &BitString,
    parent2: &BitString,
    points: &[usize],
) -> (BitString, BitString) {
    assert_eq!(parent1.len(), parent2.len(), "parent length mismatch");
    let n = parent1.len();
    assert!(
        points.windows(2).all(|w| w[0] < w[1]),
        "cut points must be strictly increasing"
    );
    if let Some(&first) = points.first() {
        assert!(first > 0, "cut point 0 is not allowed");
    }
    if let Some(&last) = points.last() {
        assert!(last < n, "cut point beyond genotype length");
    }

    let mut child1 = Vec::with_capacity(n);
    let mut child2 = Vec::with_capacity(n);
    let mut donor_is_first = true;
    let mut next_cut = 0;

    for pos in 0..n {
        if next_cut < points.len() && points[next_cut] == pos {
            donor_is_first = !donor_is_first;
            next_cut += 1;
        }
        if donor_is_first {
            child1.push(parent1[pos]);
            child2.push(parent2[pos]);
        } else {
            child1.push(parent2[pos]);
            child2.push(parent1[pos]);
        }
    }

    (BitString::new(child1), BitString::new(child2))
}

/// N-point crossover for bit-string genotypes
///
/// Draws `num_points` random cut points per application and swaps the
/// donating parent at each one. Preserves genotype length and requires
/// no uniqueness of elements.
#[derive(Clone, Debug)]
pub struct NPointCrossover {
    /// Number of cut points per crossover
    pub num_points: usize,
}

impl NPointCrossover {
    /// Create a new n-point crossover with the given number of points
    pub fn new(num_points: usize) -> Self {
        assert!(num_points >= 1, "at least one cut point is required");
        Self { num_points }
    }
}

impl CrossoverOperator<BitString> for NPointCrossover {
    fn crossover<R: Rng>(
        &self,
        parent1: &BitString,
        parent2: &BitString,
        rng: &mut R,
    ) -> (BitString, BitString) {
        assert_eq!(parent1.len(), parent2.len(), "parent length mismatch");
        let points = generate_cut_points(self.num_points, parent1.len(), rng);
        recombine_at_points(parent1, parent2, &points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::traits::PermutationGenome;
    use rand::seq::SliceRandom;

    fn random_permutation_pair(n: usize) -> (Permutation, Permutation) {
        let mut rng = rand::thread_rng();
        loop {
            let p1 = Permutation::random(n, &mut rng);
            let p2 = Permutation::random(n, &mut rng);
            if p1 != p2 {
                return (p1, p2);
            }
        }
    }

    #[test]
    fn test_two_disjoint_blocks_cover_requested_size() {
        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            let n = rng.gen_range(3..40);
            let size = n / 2 + n % 2;
            let (first, second) = two_disjoint_blocks(n, size, &mut rng);

            let len1 = first.1 - first.0 + 1;
            let len2 = second.1 - second.0 + 1;
            assert_eq!(len1 + len2, size);
            assert!(first.1 < n && second.1 < n);

            // Disjoint: the second block ends before or starts after.
            assert!(second.1 < first.0 || second.0 > first.1);
        }
    }

    #[test]
    fn test_order_crossover_preserves_label_multiset() {
        let mut rng = rand::thread_rng();
        let crossover = OrderCrossover::new();

        for _ in 0..500 {
            let (p1, p2) = random_permutation_pair(41);
            let (c1, c2) = crossover.crossover(&p1, &p2, &mut rng);

            assert!(c1.is_valid_permutation());
            assert!(c2.is_valid_permutation());
            assert_eq!(c1.len(), 41);
            assert_eq!(c2.len(), 41);
        }
    }

    #[test]
    fn test_order_crossover_child1_resembles_parent1() {
        let mut rng = rand::thread_rng();
        let crossover = OrderCrossover::new();

        for _ in 0..200 {
            let (p1, p2) = random_permutation_pair(41);
            let (c1, _) = crossover.crossover(&p1, &p2, &mut rng);

            // At least the 21 directly copied positions match parent 1.
            let matches = (0..41).filter(|&i| c1[i] == p1[i]).count();
            assert!(matches >= 21, "only {matches} positions match");
        }
    }

    #[test]
    fn test_order_crossover_identical_parents_clone() {
        let mut rng = rand::thread_rng();
        let crossover = OrderCrossover::new();

        let mut labels: Vec<usize> = (0..20).collect();
        labels.shuffle(&mut rng);
        let parent = Permutation::new(labels);

        for _ in 0..50 {
            let (c1, c2) = crossover.crossover(&parent, &parent, &mut rng);
            assert_eq!(c1, parent);
            assert_eq!(c2, parent);
        }
    }

    #[test]
    fn test_order_crossover_children_usually_differ_from_parents() {
        let mut rng = rand::thread_rng();
        let crossover = OrderCrossover::new();

        let mut fresh_children = 0;
        for _ in 0..50 {
            let (p1, p2) = random_permutation_pair(30);
            let (c1, c2) = crossover.crossover(&p1, &p2, &mut rng);
            if c1 != p1 && c1 != p2 && c2 != p1 && c2 != p2 {
                fresh_children += 1;
            }
        }
        assert!(fresh_children > 0);
    }

    #[test]
    #[should_panic(expected = "length mismatch")]
    fn test_order_crossover_length_mismatch() {
        let mut rng = rand::thread_rng();
        let crossover = OrderCrossover::new();
        let p1 = Permutation::identity(5);
        let p2 = Permutation::identity(6);
        crossover.crossover(&p1, &p2, &mut rng);
    }

    #[test]
    #[should_panic(expected = "at least 3 elements")]
    fn test_order_crossover_too_short() {
        let mut rng = rand::thread_rng();
        let crossover = OrderCrossover::new();
        let p1 = Permutation::identity(2);
        let p2 = Permutation::identity(2);
        crossover.crossover(&p1, &p2, &mut rng);
    }

    #[test]
    fn test_generate_cut_points_properties() {
        let mut rng = rand::thread_rng();
        for _ in 0..10_000 {
            let length = rng.gen_range(11..31);
            let count = rng.gen_range(1..11);
            let points = generate_cut_points(count, length, &mut rng);

            assert_eq!(points.len(), count);
            assert!(points.windows(2).all(|w| w[0] < w[1]));
            assert!(points[0] > 0);
            assert!(*points.last().unwrap() < length);
        }
    }

    #[test]
    #[should_panic(expected = "too many cut points")]
    fn test_generate_cut_points_too_many() {
        let mut rng = rand::thread_rng();
        generate_cut_points(8, 8, &mut rng);
    }

    #[test]
    fn test_recombine_alternates_at_declared_points() {
        let parent1 = BitString::ones(8);
        let parent2 = BitString::zeros(8);

        let (c1, c2) = recombine_at_points(&parent1, &parent2, &[3, 6]);

        let expected1 = [true, true, true, false, false, false, true, true];
        let expected2 = [false, false, false, true, true, true, false, false];
        for i in 0..8 {
            assert_eq!(c1[i], expected1[i], "child 1 wrong at position {i}");
            assert_eq!(c2[i], expected2[i], "child 2 wrong at position {i}");
        }
    }

    #[test]
    fn test_recombine_children_are_complementary() {
        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            let length = rng.gen_range(10..21);
            let parent1 = BitString::random(&mut rng, length);
            let parent2 = BitString::random(&mut rng, length);
            let count = rng.gen_range(1..length);
            let points = generate_cut_points(count, length, &mut rng);

            let (c1, c2) = recombine_at_points(&parent1, &parent2, &points);

            let mut from_first = true;
            let mut next_cut = 0;
            for i in 0..length {
                if next_cut < points.len() && points[next_cut] == i {
                    from_first = !from_first;
                    next_cut += 1;
                }
                if from_first {
                    assert_eq!(c1[i], parent1[i]);
                    assert_eq!(c2[i], parent2[i]);
                } else {
                    assert_eq!(c1[i], parent2[i]);
                    assert_eq!(c2[i], parent1[i]);
                }
            }
        }
    }

    #[test]
    fn test_n_point_crossover_preserves_length() {
        let mut rng = rand::thread_rng();
        let crossover = NPointCrossover::new(3);
        let parent1 = BitString::random(&mut rng, 16);
        let parent2 = BitString::random(&mut rng, 16);

        let (c1, c2) = crossover.crossover(&parent1, &parent2, &mut rng);
        assert_eq!(c1.len(), 16);
        assert_eq!(c2.len(), 16);
    }

    #[test]
    #[should_panic(expected = "length mismatch")]
    fn test_n_point_crossover_length_mismatch() {
        let mut rng = rand::thread_rng();
        let crossover = NPointCrossover::new(2);
        let parent1 = BitString::zeros(8);
        let parent2 = BitString::zeros(9);
        crossover.crossover(&parent1, &parent2, &mut rng);
    }
}
