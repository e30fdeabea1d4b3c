//! 索引构建器
//! 一次性消费两个参考数据库，构建 归一化键 -> 记录列表 的索引

use std::sync::Arc;
use std::time::Instant;

use rustc_hash::FxHashMap;
use tracing::debug;

use super::normalize::key_variants;
use crate::dataset::{NovelFoodRecord, PharmaRecord};

/// 多值查找索引
///
/// 同一键下的记录保持数据集中的插入顺序，查询时首个记录生效。
#[derive(Debug, Clone)]
pub struct KeyIndex<R> {
    entries: FxHashMap<String, Vec<Arc<R>>>,
}

impl<R> Default for KeyIndex<R> {
    fn default() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }
}

impl<R> KeyIndex<R> {
    /// 以标签及其变体登记记录
    fn insert_label(&mut self, label: &str, record: &Arc<R>) {
        for key in key_variants(label) {
            let bucket = self.entries.entry(key).or_default();
            // 同一记录的多个标签可能归一化为同一键
            if !bucket.iter().any(|existing| Arc::ptr_eq(existing, record)) {
                bucket.push(Arc::clone(record));
            }
        }
    }

    /// 查询键下的全部记录（空键永远不命中）
    pub fn get(&self, key: &str) -> Option<&[Arc<R>]> {
        if key.is_empty() {
            return None;
        }
        self.entries.get(key).map(Vec::as_slice)
    }

    /// 查询键下首个登记的记录
    pub fn first(&self, key: &str) -> Option<&Arc<R>> {
        self.get(key).and_then(|records| records.first())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// 键数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 构建完成的参考索引（只读）
#[derive(Debug, Clone, Default)]
pub struct ReferenceIndex {
    pub novel_food: KeyIndex<NovelFoodRecord>,
    pub pharma: KeyIndex<PharmaRecord>,
}

/// 构建统计
#[derive(Debug, Default)]
struct BuildStats {
    novel_records: usize,
    novel_skipped: usize,
    pharma_records: usize,
    pharma_skipped: usize,
}

/// 索引构建器
pub struct IndexBuilder;

impl IndexBuilder {
    /// 构建两个索引；纯函数，相同输入得到行为一致的索引，从不失败
    pub fn build(novel_foods: &[NovelFoodRecord], pharma: &[PharmaRecord]) -> ReferenceIndex {
        let novel_foods: Vec<_> = novel_foods.iter().cloned().map(Arc::new).collect();
        let pharma: Vec<_> = pharma.iter().cloned().map(Arc::new).collect();
        Self::build_shared(&novel_foods, &pharma)
    }

    /// 以已共享的记录构建索引，索引与调用方持有同一份记录
    pub fn build_shared(novel_foods: &[Arc<NovelFoodRecord>], pharma: &[Arc<PharmaRecord>]) -> ReferenceIndex {
        let start = Instant::now();
        let mut stats = BuildStats::default();
        let mut index = ReferenceIndex::default();

        // 1. 新型食品：name / common_name / synonyms 及变体
        for record in novel_foods {
            if record.labels().next().is_none() {
                stats.novel_skipped += 1;
                continue;
            }
            for label in record.labels() {
                index.novel_food.insert_label(label, record);
            }
            stats.novel_records += 1;
        }

        // 2. 药品指南：name + 全部同义词 及变体
        for record in pharma {
            if record.labels().next().is_none() {
                stats.pharma_skipped += 1;
                continue;
            }
            for label in record.labels() {
                index.pharma.insert_label(label, record);
            }
            stats.pharma_records += 1;
        }

        debug!("Reference index built in {:?}", start.elapsed());
        debug!(
            "Index stats: novel food records={} (skipped {}) keys={}, pharma records={} (skipped {}) keys={}",
            stats.novel_records,
            stats.novel_skipped,
            index.novel_food.len(),
            stats.pharma_records,
            stats.pharma_skipped,
            index.pharma.len()
        );

        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indexer::normalize;

    fn novel(name: &str, common: Option<&str>, synonyms: Option<&str>) -> NovelFoodRecord {
        NovelFoodRecord {
            id: None,
            name: Some(name.to_string()),
            common_name: common.map(str::to_string),
            synonyms: synonyms.map(str::to_string),
            display_name: Some(name.to_string()),
            status: Some("Novel food".to_string()),
            status_desc: None,
            policy_item_code: None,
            category: None,
            description: None,
        }
    }

    fn pharma(name: &str, synonyms: &[&str], is_medicine: bool) -> PharmaRecord {
        PharmaRecord {
            name: Some(name.to_string()),
            synonyms: synonyms.iter().map(|s| s.to_string()).collect(),
            is_medicine,
            comment: None,
        }
    }

    #[test]
    fn test_build_indexes_all_labels_and_variants() {
        let index = IndexBuilder::build(
            &[novel("Chia seed (Salvia hispanica) (EN)", Some("Chiafrö"), Some("Salvia seed"))],
            &[pharma("Melatonin", &["N-acetyl-5-methoxytryptamine"], true)],
        );

        for label in ["chia seed (salvia hispanica) (en)", "chia seed (salvia hispanica)", "chia seed", "chiafro", "salvia seed"] {
            assert!(index.novel_food.contains_key(label), "missing key {label}");
        }
        assert!(index.pharma.contains_key(&normalize("N-Acetyl-5-methoxytryptamine")));
        assert!(index.pharma.contains_key("melatonin"));
    }

    #[test]
    fn test_first_registered_wins() {
        let index = IndexBuilder::build(
            &[],
            &[pharma("Zinc", &[], false), pharma("ZINC", &["zinc"], true)],
        );
        let records = index.pharma.get("zinc").unwrap();
        assert_eq!(records.len(), 2);
        assert!(!index.pharma.first("zinc").unwrap().is_medicine);
    }

    #[test]
    fn test_record_listed_once_per_key() {
        let index = IndexBuilder::build(&[novel("Spirulina", Some("spirulina"), Some("SPIRULINA"))], &[]);
        assert_eq!(index.novel_food.get("spirulina").unwrap().len(), 1);
    }

    #[test]
    fn test_skips_records_without_labels() {
        let mut nameless = pharma("x", &[], true);
        nameless.name = None;
        let index = IndexBuilder::build(&[], &[nameless, pharma("  ", &[""], true)]);
        assert!(index.pharma.is_empty());
        assert!(index.pharma.get("").is_none());
    }

    #[test]
    fn test_build_shared_keeps_caller_records() {
        let records = vec![Arc::new(novel("Noni", None, None))];
        let index = IndexBuilder::build_shared(&records, &[]);
        assert!(Arc::ptr_eq(index.novel_food.first("noni").unwrap(), &records[0]));
        assert_eq!(Arc::strong_count(&records[0]), 2);
    }

    #[test]
    fn test_rebuild_is_deterministic() {
        let novels = vec![novel("Noni (EN)", None, None), novel("noni", None, None)];
        let pharmas = vec![pharma("Caffeine", &["Koffein"], false)];
        let a = IndexBuilder::build(&novels, &pharmas);
        let b = IndexBuilder::build(&novels, &pharmas);
        for key in ["noni", "noni (en)", "caffeine", "koffein"] {
            assert_eq!(
                a.novel_food.first(key).map(|r| r.name.clone()),
                b.novel_food.first(key).map(|r| r.name.clone())
            );
            assert_eq!(a.pharma.first(key), b.pharma.first(key));
        }
        assert_eq!(a.novel_food.first("noni").unwrap().name.as_deref(), Some("Noni (EN)"));
    }
}
