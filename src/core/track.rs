//! Virtual track: the real items duplicated into an odd number of copies
//! so scrolling far in either direction still lands on real content.

use super::metrics::Metrics;

/// Smallest usable copy count: one copy on each side of the center copy.
pub const MIN_COPIES: usize = 3;

/// One duplicated slot on the track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VirtualEntry {
    /// Index into the caller's item list (`virtual_index % n`).
    pub item: usize,
    /// Position within the expanded `copies * n` sequence.
    pub virtual_index: usize,
}

/// Round a requested copy count up to the nearest odd value `>= MIN_COPIES`.
pub fn sanitize_copies(copies: usize) -> usize {
    let copies = copies.max(MIN_COPIES);
    if copies % 2 == 0 {
        copies + 1
    } else {
        copies
    }
}

/// Expand `item_count` items into `copies * item_count` virtual entries.
pub fn build_track(item_count: usize, copies: usize) -> Vec<VirtualEntry> {
    let copies = sanitize_copies(copies);
    (0..copies * item_count)
        .map(|virtual_index| VirtualEntry {
            item: virtual_index % item_count,
            virtual_index,
        })
        .collect()
}

/// Smallest odd copy count for which every card that can intersect the
/// viewport has a backing entry, even after a full-speed tick has carried
/// the offset past the normalization band.
///
/// `velocity_limit` is in steps per tick.
pub fn required_copies(metrics: &Metrics, velocity_limit: f64) -> usize {
    if metrics.item_count <= 1 {
        return MIN_COPIES;
    }
    let reach = metrics.viewport_width / 2.0
        + metrics.card_width
        + metrics.step
        + metrics.stride / 2.0
        + velocity_limit.max(0.0) * metrics.step;
    let half = (reach / metrics.stride).ceil() as usize;
    sanitize_copies(half * 2 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::metrics::SurfaceGeometry;

    #[test]
    fn virtual_index_maps_to_item() {
        let track = build_track(4, 9);
        assert_eq!(track.len(), 36);
        for (k, entry) in track.iter().enumerate() {
            assert_eq!(entry.virtual_index, k);
            assert_eq!(entry.item, k % 4);
        }
    }

    #[test]
    fn copies_are_odd_and_at_least_three() {
        assert_eq!(sanitize_copies(0), 3);
        assert_eq!(sanitize_copies(4), 5);
        assert_eq!(sanitize_copies(9), 9);
        assert_eq!(build_track(2, 2).len(), 6);
    }

    #[test]
    fn empty_list_builds_empty_track() {
        assert!(build_track(0, 9).is_empty());
    }

    #[test]
    fn required_copies_covers_viewport() {
        let surface = SurfaceGeometry {
            viewport_width: 1260.0,
            card_width: 300.0,
            gap: 20.0,
        };
        let four = Metrics::resolve(surface, 4).unwrap();
        assert_eq!(required_copies(&four, 1.85), 5);

        // Two wide items need more copies to fill the same viewport.
        let two = Metrics::resolve(surface, 2).unwrap();
        assert!(required_copies(&two, 1.85) > 5);

        let one = Metrics::resolve(surface, 1).unwrap();
        assert_eq!(required_copies(&one, 1.85), MIN_COPIES);
    }
}
