//! Local search that trades items between boards to reduce overlap and
//! break duplicate boards, without disturbing the frequency vector
//! [`crate::construct::construct`] already realized (§4.7 overlap
//! objective, board-distinctness constraint).
//!
//! Every move is a three-board cycle: pick the pair `(p, q)` with the
//! worst (highest) overlap, a shared item `z` to remove from `p`, a third
//! board `r` holding some item `w` that neither `p` nor `q` has, and swap
//! `z` and `w` between `p` and `r`. `p` loses a shared item and gains an
//! item `q` doesn't have, so `overlap(p, q)` strictly decreases; `r`
//! trades `w` for `z` so its own column sum (`S`) and every row sum
//! (frequency) is untouched.

use tabula_shuffle::Prng;

fn overlap(a: &[usize], b: &[usize]) -> usize {
    a.iter().filter(|x| b.contains(x)).count()
}

/// Runs up to `rounds` improving swaps (or stops early once no pair
/// overlaps at all, or no legal swap remains). `seed` only affects which
/// of several equally-good candidate moves is taken, not whether a move
/// exists — so refinement is deterministic for a fixed seed (useful for
/// the `seedUsed` field to mean something) without affecting correctness.
pub fn refine(mut boards: Vec<Vec<usize>>, rounds: usize, seed: i32) -> Vec<Vec<usize>> {
    let b = boards.len();
    if b < 3 {
        return boards;
    }
    let mut rng = Prng::new(seed);

    for _ in 0..rounds {
        let Some((p, q, worst)) = worst_pair(&boards) else {
            break;
        };
        if worst == 0 {
            break;
        }

        let shared: Vec<usize> = boards[p]
            .iter()
            .copied()
            .filter(|item| boards[q].contains(item))
            .collect();

        let mut moved = false;
        'search: for &z in shared_in_random_order(&shared, &mut rng).iter() {
            for r in 0..b {
                if r == p || r == q {
                    continue;
                }
                if boards[r].contains(&z) {
                    continue;
                }
                if let Some(&w) = boards[r]
                    .iter()
                    .find(|item| !boards[p].contains(*item) && !boards[q].contains(*item))
                {
                    let pos_z = boards[p].iter().position(|&x| x == z).unwrap();
                    boards[p][pos_z] = w;
                    let pos_w = boards[r].iter().position(|&x| x == w).unwrap();
                    boards[r][pos_w] = z;
                    moved = true;
                    break 'search;
                }
            }
        }
        if !moved {
            break;
        }
    }

    boards
}

fn worst_pair(boards: &[Vec<usize>]) -> Option<(usize, usize, usize)> {
    let b = boards.len();
    let mut best: Option<(usize, usize, usize)> = None;
    for p in 0..b {
        for q in (p + 1)..b {
            let o = overlap(&boards[p], &boards[q]);
            if best.is_none_or(|(_, _, best_o)| o > best_o) {
                best = Some((p, q, o));
            }
        }
    }
    best
}

fn shared_in_random_order(shared: &[usize], rng: &mut Prng) -> Vec<usize> {
    let mut out = shared.to_vec();
    for i in (1..out.len()).rev() {
        let j = (rng.next_f64() * (i as f64 + 1.0)).floor() as usize;
        out.swap(i, j);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_a_forced_duplicate() {
        let boards = vec![vec![0, 1, 2], vec![0, 1, 2], vec![0, 3, 4]];
        let refined = refine(boards, 10, 7);
        assert_ne!(refined[0], refined[1]);
        // frequencies preserved
        let mut totals = std::collections::HashMap::new();
        for board in &refined {
            for &item in board {
                *totals.entry(item).or_insert(0) += 1;
            }
        }
        assert_eq!(totals.get(&0).copied().unwrap_or(0), 3);
        assert_eq!(totals.get(&1).copied().unwrap_or(0), 2);
        assert_eq!(totals.get(&2).copied().unwrap_or(0), 2);
    }

    #[test]
    fn two_boards_are_left_alone_no_third_to_cycle_with() {
        let boards = vec![vec![0, 1], vec![0, 1]];
        let refined = refine(boards.clone(), 10, 1);
        assert_eq!(refined, boards);
    }

    #[test]
    fn already_distinct_boards_are_untouched() {
        let boards = vec![vec![0, 1], vec![2, 3], vec![4, 5]];
        let refined = refine(boards.clone(), 10, 1);
        assert_eq!(refined, boards);
    }
}
