//! コレクションアイテムのID採番
//!
//! `item-<ミリ秒>` 形式。同じミリ秒に連続で呼ばれても、
//! 既存IDと衝突しても、前回より大きい値にずらして一意にする。

use std::collections::HashSet;

#[derive(Debug, Default)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// `now_millis` を基準に未使用のIDを発行
    pub fn next_id(&mut self, now_millis: u64, taken: &HashSet<&str>) -> String {
        let mut candidate = now_millis.max(self.last.saturating_add(1));
        loop {
            let id = format_id(candidate);
            if !taken.contains(id.as_str()) {
                self.last = candidate;
                return id;
            }
            candidate += 1;
        }
    }
}

pub fn format_id(millis: u64) -> String {
    format!("item-{}", millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_millis_is_unique() {
        let mut ids = IdGenerator::new();
        let taken = HashSet::new();
        let a = ids.next_id(1_700_000_000_000, &taken);
        let b = ids.next_id(1_700_000_000_000, &taken);
        let c = ids.next_id(1_699_999_999_999, &taken);
        assert_eq!(a, "item-1700000000000");
        assert_eq!(b, "item-1700000000001");
        assert_eq!(c, "item-1700000000002");
    }

    #[test]
    fn test_skips_taken_ids() {
        let mut ids = IdGenerator::new();
        let taken: HashSet<&str> = ["item-5", "item-6"].into_iter().collect();
        assert_eq!(ids.next_id(5, &taken), "item-7");
    }
}
