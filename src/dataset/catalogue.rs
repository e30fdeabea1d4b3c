//! 新型食品目录检索
//! 对名称/通用名/同义词做归一化子串检索，目录编号做不区分大小写的子串检索，
//! 按 policy_item_code 合并多语言条目

use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::Serialize;
use tracing::debug;

use super::model::NovelFoodRecord;
use crate::indexer::normalize;

/// 检索结果条目（同一 policy_item_code 的多语言记录合并为一条）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogueEntry {
    /// 该分组首个命中的记录
    pub record: Arc<NovelFoodRecord>,
    pub policy_item_code: Option<String>,
    /// 分组内出现过的全部通用名，按首次出现顺序
    pub all_common_names: Vec<String>,
}

/// 新型食品目录
#[derive(Debug, Clone, Default)]
pub struct NovelFoodCatalogue {
    records: Vec<Arc<NovelFoodRecord>>,
}

impl NovelFoodCatalogue {
    pub fn new(records: impl IntoIterator<Item = NovelFoodRecord>) -> Self {
        Self::from_shared(records.into_iter().map(Arc::new).collect())
    }

    /// 与索引共享同一份记录
    pub fn from_shared(records: Vec<Arc<NovelFoodRecord>>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 检索目录，空检索词返回空结果
    pub fn search(&self, term: &str) -> Vec<CatalogueEntry> {
        let needle = normalize(term);
        if needle.is_empty() {
            return Vec::new();
        }
        let code_needle = term.trim().to_lowercase();

        let mut entries: Vec<CatalogueEntry> = Vec::new();
        // 分组键 → entries 下标
        let mut groups: FxHashMap<String, usize> = FxHashMap::default();

        for record in &self.records {
            let label_hit = record.labels().any(|label| normalize(label).contains(&needle));
            let code_hit = record
                .policy_item_code
                .as_deref()
                .is_some_and(|code| code.to_lowercase().contains(&code_needle));
            if !label_hit && !code_hit {
                continue;
            }

            // 无 policy_item_code 的记录自成一组
            let slot = match &record.policy_item_code {
                Some(code) => groups.get(code).copied(),
                None => None,
            };

            match slot {
                Some(i) => {
                    let entry = &mut entries[i];
                    if let Some(name) = &record.common_name {
                        if !entry.all_common_names.contains(name) {
                            entry.all_common_names.push(name.clone());
                        }
                    }
                }
                None => {
                    if let Some(code) = &record.policy_item_code {
                        groups.insert(code.clone(), entries.len());
                    }
                    entries.push(CatalogueEntry {
                        record: Arc::clone(record),
                        policy_item_code: record.policy_item_code.clone(),
                        all_common_names: record.common_name.iter().cloned().collect(),
                    });
                }
            }
        }

        debug!("Catalogue search '{}' → {} entries", term, entries.len());
        entries
    }
}
