use rand::{seq::SliceRandom, Rng};

/// Choose which obstacle groups to place.
///
/// The subset size is drawn uniformly from the inclusive range `[min, max]`, then that many
/// distinct groups are sampled without replacement. `max` must already be clamped to
/// `groups.len()` and must not be below `min` (see
/// [`MazeConfig::obstacle_bounds`](super::MazeConfig::obstacle_bounds)).
///
/// **Panics** if `min > max` or `max > groups.len()`
pub fn select_obstacle_groups<R: Rng>(
    groups: &[char],
    (min, max): (usize, usize),
    rng: &mut R,
) -> Vec<char> {
    assert!(
        min <= max && max <= groups.len(),
        "Invalid obstacle bounds [{min}, {max}] for {} groups",
        groups.len()
    );
    let n = rng.gen_range(min..=max);
    groups.choose_multiple(rng, n).copied().collect()
}
