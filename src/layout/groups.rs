use std::collections::HashMap;

use crate::ir::{ItemKeys, Record, field_id};

use super::types::Dimensions;

/// Rank of each group id in the caller's group list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupOrder {
    ranks: HashMap<String, usize>,
}

impl GroupOrder {
    pub fn get(&self, group_id: &str) -> Option<usize> {
        self.ranks.get(group_id).copied()
    }

    /// Number of distinct group ids.
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}

/// Groups without a readable id are skipped; a repeated id keeps its last rank.
pub fn build_group_order<R: Record>(groups: &[R], keys: &ItemKeys) -> GroupOrder {
    let mut ranks = HashMap::with_capacity(groups.len());
    for (rank, group) in groups.iter().enumerate() {
        if let Some(id) = field_id(group, &keys.group_id_key) {
            ranks.insert(id, rank);
        }
    }
    GroupOrder { ranks }
}

/// Splits item indices into `group_count` buckets by their group rank,
/// keeping input order inside each bucket. Items with no rank, or a rank
/// past the last bucket, are left out.
pub fn partition_by_group<T: AsRef<Dimensions>>(
    items: &[T],
    group_count: usize,
) -> Vec<Vec<usize>> {
    let mut buckets = vec![Vec::new(); group_count];
    for (idx, item) in items.iter().enumerate() {
        if let Some(bucket) = item.as_ref().order.and_then(|order| buckets.get_mut(order)) {
            bucket.push(idx);
        }
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::dimensions::ItemGeometry;
    use serde_json::json;

    fn dims(order: Option<usize>) -> Dimensions {
        let geometry = ItemGeometry {
            left: 0.0,
            width: 10.0,
            collision_left: 0.0,
            collision_width: 10.0,
            original_left: 0.0,
        };
        Dimensions::new(geometry, 20.0, true, order)
    }

    #[test]
    fn ranks_follow_input_order() {
        let groups = vec![json!({ "id": "B" }), json!({ "id": "A" }), json!({ "id": "C" })];
        let order = build_group_order(&groups, &ItemKeys::default());
        assert_eq!(order.len(), 3);
        assert_eq!(order.get("B"), Some(0));
        assert_eq!(order.get("A"), Some(1));
        assert_eq!(order.get("C"), Some(2));
        assert_eq!(order.get("D"), None);
    }

    #[test]
    fn custom_group_key() {
        let groups = vec![json!({ "key": 10 }), json!({ "key": 20 })];
        let keys = ItemKeys {
            group_id_key: "key".to_string(),
            ..ItemKeys::default()
        };
        let order = build_group_order(&groups, &keys);
        assert_eq!(order.get("20"), Some(1));
    }

    #[test]
    fn partition_keeps_order_and_drops_unknown() {
        let items = vec![dims(Some(1)), dims(None), dims(Some(0)), dims(Some(1)), dims(Some(7))];
        let buckets = partition_by_group(&items, 2);
        assert_eq!(buckets, vec![vec![2], vec![0, 3]]);
    }

    #[test]
    fn empty_groups_still_get_buckets() {
        let buckets = partition_by_group::<Dimensions>(&[], 3);
        assert_eq!(buckets, vec![Vec::<usize>::new(); 3]);
    }
}
