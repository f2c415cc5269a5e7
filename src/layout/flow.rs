//! Width distribution for horizontal flows.
//!
//! Vertical flows just stack; the interesting work is horizontal overflow.
//! Given each child's maximum and minimum width and the available span,
//! [`distribute_widths`] picks one of three branches:
//!
//! 1. Everything fits: every child gets its maximum.
//! 2. Even the minimums overflow: every child gets its minimum and the
//!    parent clips the excess.
//! 3. Otherwise the span is split proportionally to the maximums. Children
//!    whose share lands under their own minimum are pinned at that minimum
//!    and the remainder is re-split among the rest - once. A child still
//!    under its minimum after that second pass clamps at render time.
//!
//! Proportional shares use a rounded running sum: each grant is the
//! difference between consecutive rounded cumulative shares, so the grants
//! always sum to exactly the available span regardless of rounding.

// =============================================================================
// Distribution
// =============================================================================

/// Grant a width to each child of a horizontal flow.
///
/// `maxes[i]` / `mins[i]` are child `i`'s maximum and minimum widths for
/// the current parent. The result has one grant per child; in the
/// proportional branch the grants sum to exactly `available`.
///
/// # Examples
///
/// ```
/// use weft_tui::layout::distribute_widths;
///
/// // 10 + 20 + 30 = 60 wanted, 40 available
/// assert_eq!(distribute_widths(&[10, 20, 30], &[0, 0, 0], 40), vec![7, 13, 20]);
/// ```
pub fn distribute_widths(maxes: &[u16], mins: &[u16], available: u16) -> Vec<u16> {
    debug_assert_eq!(maxes.len(), mins.len());
    if maxes.is_empty() {
        return Vec::new();
    }

    let max_total: u64 = maxes.iter().map(|&m| m as u64).sum();
    if max_total <= available as u64 {
        return maxes.to_vec();
    }

    let min_total: u64 = mins.iter().map(|&m| m as u64).sum();
    if min_total >= available as u64 {
        return mins.to_vec();
    }

    let grants = proportional(maxes, available);

    let pinned: Vec<bool> = grants
        .iter()
        .zip(mins)
        .map(|(&grant, &min)| grant < min)
        .collect();
    if !pinned.contains(&true) {
        return grants;
    }

    // one redistribution pass: pinned children keep their minimum, the rest
    // of the span is re-split among the others
    let pinned_total: u64 = mins
        .iter()
        .zip(&pinned)
        .filter(|&(_, &p)| p)
        .map(|(&min, _)| min as u64)
        .sum();
    // min_total < available, so the pinned minimums cannot swallow the span
    let rest_avail = (available as u64 - pinned_total) as u16;

    let free_maxes: Vec<u16> = maxes
        .iter()
        .zip(&pinned)
        .filter(|&(_, &p)| !p)
        .map(|(&max, _)| max)
        .collect();
    let mut free_grants = proportional(&free_maxes, rest_avail).into_iter();

    pinned
        .iter()
        .enumerate()
        .map(|(i, &p)| {
            if p {
                mins[i]
            } else {
                free_grants.next().unwrap_or(0)
            }
        })
        .collect()
}

/// Split `available` proportionally to `weights`, conserving the total.
///
/// grant_i = round(available * prefix_i / total) - round(available * prefix_{i-1} / total)
fn proportional(weights: &[u16], available: u16) -> Vec<u16> {
    let total: u64 = weights.iter().map(|&w| w as u64).sum();
    if total == 0 {
        return vec![0; weights.len()];
    }

    let a = available as u64;
    let mut out = Vec::with_capacity(weights.len());
    let mut prefix = 0u64;
    let mut prev_mark = 0u64;
    for &w in weights {
        prefix += w as u64;
        let mark = (2 * a * prefix + total) / (2 * total);
        out.push((mark - prev_mark) as u16);
        prev_mark = mark;
    }
    out
}

// =============================================================================
// Tests
// =============================================================================
