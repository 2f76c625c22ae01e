//! Initial assignment construction: a greedy bipartite-degree-sequence
//! realization (the constructive half of the Gale-Ryser theorem).
//!
//! Items are processed in decreasing remaining-frequency order; each
//! item's full frequency is placed in one step, into the boards with the
//! most remaining capacity. This is known to realize any bipartite degree
//! sequence that satisfies the Gale-Ryser condition — §4.7's feasibility
//! gates are a necessary but not always sufficient approximation of that
//! condition, so construction can still fail on a pathological input that
//! cleared the gates; that failure surfaces as
//! [`crate::GeneratorError::ConstructionFailed`].

/// Attempts to realize `frequencies` (row sums) against `b` boards of
/// `s` slots each (column sums). Returns one `Vec<usize>` of item indices
/// per board, or an error naming the item that could not be placed.
pub fn construct(frequencies: &[u32], b: usize, s: usize) -> Result<Vec<Vec<usize>>, String> {
    let n = frequencies.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &c| frequencies[c].cmp(&frequencies[a]).then(a.cmp(&c)));

    let mut board_remaining = vec![s; b];
    let mut boards: Vec<Vec<usize>> = vec![Vec::with_capacity(s); b];

    for &item in &order {
        let need = frequencies[item] as usize;
        if need == 0 {
            continue;
        }
        let mut candidates: Vec<usize> = (0..b).filter(|&bi| board_remaining[bi] > 0).collect();
        if candidates.len() < need {
            return Err(format!(
                "item index {item} needs {need} boards with spare capacity, only {} available",
                candidates.len()
            ));
        }
        candidates.sort_by(|&x, &y| board_remaining[y].cmp(&board_remaining[x]).then(x.cmp(&y)));
        for &bi in candidates.iter().take(need) {
            boards[bi].push(item);
            board_remaining[bi] -= 1;
        }
    }

    for (bi, board) in boards.iter().enumerate() {
        if board.len() != s {
            return Err(format!(
                "board {bi} ended with {} items, expected {s}",
                board.len()
            ));
        }
    }

    Ok(boards)
}
