//! Visible window of a selectable list.

/// Compute the half-open range `(start, end)` of rows to show.
///
/// The window keeps `selection` roughly centred, is pinned to the top and
/// bottom ends of the list, and is exactly `min(total, max_visible)` long.
pub fn compute_window(total: usize, selection: usize, max_visible: usize) -> (usize, usize) {
    let max_visible = max_visible.max(1);
    if total <= max_visible {
        return (0, total);
    }

    let half = max_visible / 2;
    let last_start = total - max_visible;
    let start = if selection < half {
        0
    } else if selection > total - half {
        last_start
    } else {
        (selection - half).min(last_start)
    };
    (start, start + max_visible)
}
