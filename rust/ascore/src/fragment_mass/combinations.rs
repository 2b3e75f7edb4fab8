use tracing::warn;

/// Every `k` sized subset of `positions`, in lexicographic index order.
///
/// This is the order an "include the current element, then skip it" recursion
/// would produce. At most `max` subsets are returned. With no positions or
/// `k == 0` the single empty subset is returned. A `k` larger than the number
/// of positions is clamped.
///
/// Example:
/// ```
/// use ascore::fragment_mass::combinations;
///
/// let out = combinations(&[2, 4, 6, 8], 2, 1000);
/// assert_eq!(out.len(), 6);
/// assert_eq!(out[0], vec![2, 4]);
/// assert_eq!(out[1], vec![2, 6]);
/// assert_eq!(out[5], vec![6, 8]);
/// ```
pub fn combinations(positions: &[usize], k: usize, max: usize) -> Vec<Vec<usize>> {
    let n = positions.len();
    if n == 0 || k == 0 {
        return vec![Vec::new()];
    }
    let k = if k > n {
        warn!(
            "Asked to place {} modifications over {} eligible positions, placing {}",
            k, n, n
        );
        n
    } else {
        k
    };

    let mut out = Vec::new();
    let mut idx: Vec<usize> = (0..k).collect();
    while out.len() < max {
        out.push(idx.iter().map(|&i| positions[i]).collect());

        // Rightmost index that can still move forward.
        let Some(i) = (0..k).rev().find(|&i| idx[i] < n - k + i) else {
            break;
        };
        idx[i] += 1;
        for j in (i + 1)..k {
            idx[j] = idx[j - 1] + 1;
        }
    }
    out
}
