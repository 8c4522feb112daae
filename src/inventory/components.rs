use bevy::prelude::*;
use std::collections::BTreeMap;

/// 一次数量调整
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemDelta {
    Increment,
    Decrease,
    IncreaseBy(i32),
}

/// 玩家背包：物品名 → 数量。数量可以为负，不设上下限
#[derive(Resource, Default, Debug, Clone, PartialEq)]
pub struct Inventory {
    counts: BTreeMap<String, i32>,
}

impl Inventory {
    pub fn from_counts(counts: BTreeMap<String, i32>) -> Self {
        Self { counts }
    }

    /// 用默认目录初始化，每项数量为 0；已有的项不动
    pub fn seed<'a>(&mut self, ids: impl IntoIterator<Item = &'a str>) {
        for id in ids {
            self.ensure(id);
        }
    }

    /// 不存在时插入 0
    pub fn ensure(&mut self, id: &str) -> &mut i32 {
        self.counts.entry(id.to_string()).or_insert(0)
    }

    /// 返回调整后的数量
    pub fn apply(&mut self, id: &str, delta: ItemDelta) -> i32 {
        match delta {
            ItemDelta::Increment => self.increment(id),
            ItemDelta::Decrease => self.decrease(id),
            ItemDelta::IncreaseBy(amount) => self.increase_by(id, amount),
        }
    }

    // 到 i32 边界时饱和
    fn adjust(&mut self, id: &str, amount: i32) -> i32 {
        let count = self.ensure(id);
        *count = count.saturating_add(amount);
        *count
    }

    pub fn increment(&mut self, id: &str) -> i32 {
        self.adjust(id, 1)
    }

    pub fn decrease(&mut self, id: &str) -> i32 {
        self.adjust(id, -1)
    }

    pub fn increase_by(&mut self, id: &str, amount: i32) -> i32 {
        self.adjust(id, amount)
    }

    pub fn get(&self, id: &str) -> Option<i32> {
        self.counts.get(id).copied()
    }

    pub fn counts(&self) -> &BTreeMap<String, i32> {
        &self.counts
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increment_then_decrease_restores_count() {
        let mut inv = Inventory::default();
        inv.increase_by("apple", 5);
        inv.increment("apple");
        inv.decrease("apple");
        assert_eq!(inv.get("apple"), Some(5));
    }

    #[test]
    fn unknown_item_is_created_at_zero() {
        let mut inv = Inventory::default();
        assert_eq!(inv.get("bread"), None);
        assert_eq!(inv.decrease("bread"), -1);
        assert_eq!(inv.increase_by("mana_potion", 0), 0);
        assert_eq!(inv.len(), 2);
    }

    #[test]
    fn seeding_keeps_existing_counts() {
        let mut inv = Inventory::default();
        inv.increase_by("apple", 4);
        inv.seed(["apple", "bread", "old_key"]);
        assert_eq!(inv.len(), 3);
        assert_eq!(inv.get("apple"), Some(4));
        assert_eq!(inv.get("old_key"), Some(0));
    }

    #[test]
    fn apply_dispatches_each_delta() {
        let mut inv = Inventory::default();
        assert_eq!(inv.apply("apple", ItemDelta::IncreaseBy(10)), 10);
        assert_eq!(inv.apply("apple", ItemDelta::Increment), 11);
        assert_eq!(inv.apply("apple", ItemDelta::Decrease), 10);
        assert_eq!(inv.apply("apple", ItemDelta::IncreaseBy(-12)), -2);
    }

    #[test]
    fn adjust_saturates_instead_of_overflowing() {
        let mut inv = Inventory::default();
        inv.increase_by("gold_coin", i32::MAX);
        assert_eq!(inv.increment("gold_coin"), i32::MAX);
    }
}
