// ==========================================
// 菜谱库存可行性系统 - 库存快照
// ==========================================
// 职责: 食材名称 → 库存量 的不可变映射,每次逻辑操作捕获一次
// 红线: 快照从不回写数据库;虚拟消耗只发生在克隆副本上
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// SupplySnapshot - 库存快照
// ==========================================
// 说明: 按食材名称索引（与外部种子数据约定食材名称唯一）
// 使用 BTreeMap 保证遍历顺序确定,便于测试与日志比对
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplySnapshot {
    stock: BTreeMap<String, i64>,
}

impl SupplySnapshot {
    /// 从 (名称, 库存量) 序列构建快照
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, i64)>,
    {
        Self {
            stock: entries.into_iter().collect(),
        }
    }

    /// 查询食材库存量（未知食材按 0 计）
    pub fn get(&self, name: &str) -> i64 {
        self.stock.get(name).copied().unwrap_or(0)
    }

    /// 是否包含该食材
    pub fn contains(&self, name: &str) -> bool {
        self.stock.contains_key(name)
    }

    /// 快照内食材数量
    pub fn len(&self) -> usize {
        self.stock.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stock.is_empty()
    }

    /// 扣减指定食材的库存量
    ///
    /// # 说明
    /// - 仅供消耗模拟在自己的克隆副本上调用（真实快照保持只读）
    /// - 调用方需先完成足量校验;未知食材按 0 起扣
    pub fn deduct(&mut self, name: &str, amount: i64) {
        let entry = self.stock.entry(name.to_string()).or_insert(0);
        *entry -= amount;
    }

    /// 按确定顺序遍历 (名称, 库存量)
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> + '_ {
        self.stock.iter().map(|(name, qty)| (name.as_str(), *qty))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_unknown_ingredient_is_zero() {
        let snapshot = SupplySnapshot::from_entries(vec![("eggs".to_string(), 10)]);
        assert_eq!(snapshot.get("eggs"), 10);
        assert_eq!(snapshot.get("lemon"), 0); // 未知食材按 0 计
        assert!(!snapshot.contains("lemon"));
    }

    #[test]
    fn test_deduct_on_clone_keeps_original() {
        let snapshot = SupplySnapshot::from_entries(vec![
            ("eggs".to_string(), 10),
            ("lemon".to_string(), 3),
        ]);

        let mut virtual_snapshot = snapshot.clone();
        virtual_snapshot.deduct("eggs", 3);
        virtual_snapshot.deduct("lemon", 3);

        // 虚拟副本被扣减
        assert_eq!(virtual_snapshot.get("eggs"), 7);
        assert_eq!(virtual_snapshot.get("lemon"), 0);

        // 原始快照保持不变
        assert_eq!(snapshot.get("eggs"), 10);
        assert_eq!(snapshot.get("lemon"), 3);
    }

    #[test]
    fn test_iter_is_name_ordered() {
        let snapshot = SupplySnapshot::from_entries(vec![
            ("milk".to_string(), 2),
            ("apple".to_string(), 2),
            ("eggs".to_string(), 10),
        ]);
        let names: Vec<&str> = snapshot.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["apple", "eggs", "milk"]);
    }
}
