//! Feasibility gates, computed up-front and fast-failed with actionable
//! messages (§4.7).

/// `C(n, k)`, saturating at `u128::MAX` rather than overflowing — board
/// counts and grid sizes are small in practice, but a pathological
/// request (huge `N`, `S` near `N/2`) shouldn't panic.
pub fn binomial(n: usize, k: usize) -> u128 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut result: u128 = 1;
    for i in 0..k {
        result = result.saturating_mul((n - i) as u128);
        result /= (i + 1) as u128;
    }
    result
}

/// Three concrete repair suggestions for a unique-boards violation
/// (§4.7: "minimum added items, next-smaller `S` that satisfies it, or
/// cap `B` at `C(N, S)`").
pub fn repair_suggestions(n: usize, b: usize, s: usize) -> Vec<String> {
    let mut suggestions = Vec::new();

    let mut add = 1usize;
    while binomial(n + add, s) < b as u128 {
        add += 1;
    }
    suggestions.push(format!(
        "add at least {add} item(s) to the deck (N={} -> N={})",
        n,
        n + add
    ));

    if s > 0 {
        let mut smaller_s = s;
        while smaller_s > 0 && binomial(n, smaller_s) < b as u128 {
            smaller_s -= 1;
        }
        if smaller_s > 0 && smaller_s < s {
            suggestions.push(format!(
                "reduce the board size to S={smaller_s} (fewer rows/cols)"
            ));
        }
    }

    let cap = binomial(n, s).min(b as u128);
    suggestions.push(format!("cap the board count at B={cap}"));

    suggestions
}

/// One failed gate, paired with its human-readable reason (§4.7).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeasibilityViolation {
    pub reason: String,
}

/// Runs every gate in §4.7 and collects every violation (rather than
/// failing fast on the first one) so a caller sees the complete picture
/// in one response.
pub fn check(
    n: usize,
    b: usize,
    s: usize,
    frequencies: &[u32],
) -> Vec<FeasibilityViolation> {
    let mut violations = Vec::new();

    let total: u64 = frequencies.iter().map(|&f| f as u64).sum();
    let expected = (b as u64) * (s as u64);
    if total != expected {
        violations.push(FeasibilityViolation {
            reason: format!(
                "slot balance violated: sum of frequencies is {total}, expected B*S={expected}"
            ),
        });
    }

    if n < s {
        violations.push(FeasibilityViolation {
            reason: format!("item count too small: N={n} < S={s}"),
        });
    }

    for (i, &f) in frequencies.iter().enumerate() {
        if f < 1 || f > b as u32 {
            violations.push(FeasibilityViolation {
                reason: format!(
                    "item at index {i} has frequency {f}, outside the required range [1, {b}]"
                ),
            });
        }
    }

    let unique_capacity = binomial(n, s);
    if unique_capacity < b as u128 {
        let mut reason = format!(
            "not enough distinct {s}-item subsets of {n} items to fill {b} unique boards (C({n},{s})={unique_capacity} < {b})"
        );
        for suggestion in repair_suggestions(n, b, s) {
            reason.push_str("; suggestion: ");
            reason.push_str(&suggestion);
        }
        violations.push(FeasibilityViolation { reason });
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binomial_small_cases() {
        assert_eq!(binomial(12, 9), 220);
        assert_eq!(binomial(9, 9), 1);
        assert_eq!(binomial(5, 0), 1);
        assert_eq!(binomial(5, 6), 0);
    }

    #[test]
    fn seed_scenario_5_passes_all_gates() {
        let frequencies = vec![2, 2, 2, 2, 2, 2, 1, 1, 1, 1, 1, 1];
        let violations = check(12, 2, 9, &frequencies);
        assert!(violations.is_empty(), "{violations:?}");
    }

    #[test]
    fn seed_scenario_6_unique_boards_violation() {
        let frequencies = vec![3; 9];
        let violations = check(9, 3, 9, &frequencies);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].reason.contains("C(9,9)=1 < 3"));
    }

    #[test]
    fn repair_suggestions_cover_three_angles() {
        let suggestions = repair_suggestions(9, 3, 9);
        assert_eq!(suggestions.len(), 3);
        assert!(suggestions[0].contains("add"));
        assert!(suggestions[2].contains("cap"));
    }

    #[test]
    fn slot_balance_violation_is_reported() {
        let frequencies = vec![1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1];
        let violations = check(12, 2, 9, &frequencies);
        assert!(violations.iter().any(|v| v.reason.contains("slot balance")));
    }
}
