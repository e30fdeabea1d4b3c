//! 检索词匹配器
//! 归一化检索词 → 查缓存 → 查新型食品索引 / 药品索引 → 已知安全物质兜底

use std::sync::Arc;

use rustc_hash::FxHashSet;

use super::cache::MatchCache;
use super::verdict::{MatchRecord, MatchType};
use crate::config::DEFAULT_SAFE_SUBSTANCES;
use crate::dataset::{NovelFoodRecord, PharmaRecord};
use crate::indexer::{normalize, ReferenceIndex};

/// 已知安全物质合成匹配的固定说明
pub const KNOWN_SAFE_COMMENT: &str =
    "Common nutritional mineral or vitamin: not listed in the Substance Guide, permitted in food supplements";

/// 已知安全物质名单（归一化键集合）
#[derive(Debug, Clone, Default)]
pub struct SafeSubstances {
    keys: FxHashSet<String>,
}

impl SafeSubstances {
    pub fn new<I, S>(substances: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keys = substances
            .into_iter()
            .map(|s| normalize(s.as_ref()))
            .filter(|key| !key.is_empty())
            .collect();
        Self { keys }
    }

    /// 内置默认名单
    pub fn defaults() -> Self {
        Self::new(DEFAULT_SAFE_SUBSTANCES)
    }

    /// `key` 须为归一化后的键
    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// 药品侧缓存结果
#[derive(Debug, Clone, PartialEq)]
pub enum PharmaHit {
    Record(Arc<PharmaRecord>),
    /// 命中已知安全名单；展示名取当次检索词，因此只缓存标记
    KnownSafe,
}

/// 单个归一化键的缓存结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CachedMatch {
    pub novel_food: Option<Arc<NovelFoodRecord>>,
    pub pharma: Option<PharmaHit>,
}

impl CachedMatch {
    /// 用当次检索词还原为匹配记录
    fn materialize(self, term: &str) -> TermMatch {
        let novel_food = self.novel_food.map(|record| MatchRecord::exact(term, record));
        let pharma = self.pharma.map(|hit| match hit {
            PharmaHit::Record(record) => MatchRecord::exact(term, record),
            PharmaHit::KnownSafe => MatchRecord {
                term: term.to_string(),
                record: Arc::new(PharmaRecord {
                    name: Some(term.to_string()),
                    synonyms: Vec::new(),
                    is_medicine: false,
                    comment: Some(KNOWN_SAFE_COMMENT.to_string()),
                }),
                match_type: MatchType::KnownSafe,
                score: 0,
            },
        });
        TermMatch { novel_food, pharma }
    }
}

/// 单个检索词的匹配结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermMatch {
    pub novel_food: Option<MatchRecord<NovelFoodRecord>>,
    pub pharma: Option<MatchRecord<PharmaRecord>>,
}

impl TermMatch {
    pub fn is_empty(&self) -> bool {
        self.novel_food.is_none() && self.pharma.is_none()
    }
}

/// 检索词匹配器
pub struct TermMatcher;

impl TermMatcher {
    /// 匹配单个检索词
    ///
    /// 缓存命中时不再查询索引，结果与重新查询一致。
    pub fn match_term(
        term: &str,
        index: &ReferenceIndex,
        safe_substances: &SafeSubstances,
        cache: &mut MatchCache<CachedMatch>,
    ) -> TermMatch {
        let key = normalize(term);
        // 空键永远不查询
        if key.is_empty() {
            return TermMatch::default();
        }

        if let Some(cached) = cache.get(&key).cloned() {
            return cached.materialize(term);
        }

        let fresh = Self::lookup(&key, index, safe_substances);
        cache.insert(key, fresh.clone());
        fresh.materialize(term)
    }

    /// 查询两个索引（首个登记的记录生效）
    fn lookup(key: &str, index: &ReferenceIndex, safe_substances: &SafeSubstances) -> CachedMatch {
        let novel_food = index.novel_food.first(key).cloned();
        let pharma = match index.pharma.first(key) {
            Some(record) => Some(PharmaHit::Record(Arc::clone(record))),
            None if safe_substances.contains(key) => Some(PharmaHit::KnownSafe),
            None => None,
        };
        CachedMatch { novel_food, pharma }
    }
}
