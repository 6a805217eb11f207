use crate::core::geo::TileId;
use fxhash::FxHashSet;

/// Difference between two consecutive tile sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileDiff {
    /// Tiles only in the new set, in the new set's order
    pub added: Vec<TileId>,
    /// Tiles only in the old set, in the old set's order
    pub removed: Vec<TileId>,
}

impl TileDiff {
    /// Compares two sets by tile identity
    pub fn between(previous: &[TileId], next: &[TileId]) -> Self {
        let before: FxHashSet<TileId> = previous.iter().copied().collect();
        let after: FxHashSet<TileId> = next.iter().copied().collect();

        Self {
            added: next.iter().filter(|t| !before.contains(t)).copied().collect(),
            removed: previous.iter().filter(|t| !after.contains(t)).copied().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pan_by_one_column() {
        let old: Vec<TileId> = (0..4).map(|x| TileId::new(x, 0, 14)).collect();
        let new: Vec<TileId> = (1..5).map(|x| TileId::new(x, 0, 14)).collect();
        let diff = TileDiff::between(&old, &new);
        assert_eq!(diff.added, vec![TileId::new(4, 0, 14)]);
        assert_eq!(diff.removed, vec![TileId::new(0, 0, 14)]);
    }

    #[test]
    fn test_zoom_change_replaces_everything() {
        let old = vec![TileId::new(2, 3, 12), TileId::new(3, 3, 12)];
        let new = vec![TileId::new(4, 6, 13), TileId::new(5, 6, 13)];
        let diff = TileDiff::between(&old, &new);
        assert_eq!(diff.added, new);
        assert_eq!(diff.removed, old);
    }

    #[test]
    fn test_identical_sets() {
        let tiles = vec![TileId::new(1, 1, 11), TileId::new(2, 1, 11)];
        assert!(TileDiff::between(&tiles, &tiles).is_empty());
        assert!(TileDiff::between(&[], &[]).is_empty());
    }
}
