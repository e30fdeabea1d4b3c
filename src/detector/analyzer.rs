//! 成分分析器：整合分词、匹配、判定与组装，输出批量分析报告
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use tracing::{debug, info};

use super::assembler::VerdictAssembler;
use super::cache::{CacheStats, MatchCache};
use super::classifier::Classifier;
use super::matcher::{CachedMatch, SafeSubstances, TermMatch, TermMatcher};
use super::verdict::{AnalysisReport, Evidence, Verdict};
use crate::config::AnalyzerConfig;
use crate::dataset::{CatalogueEntry, DatasetLoader, NovelFoodCatalogue, ReferenceData};
use crate::error::AnalyzerResult;
use crate::indexer::{IndexBuilder, ReferenceIndex};
use crate::tokenizer::{parse_ingredient, split_ingredients};
use crate::utils::preview_compact;

/// 成分分析器
///
/// 索引与名单构建后只读；匹配缓存在所有克隆间共享，批量分析时整批持锁。
#[derive(Clone)]
pub struct IngredientAnalyzer {
    index: Arc<ReferenceIndex>,
    safe_substances: Arc<SafeSubstances>,
    cache: Arc<Mutex<MatchCache<CachedMatch>>>,
    catalogue: Arc<NovelFoodCatalogue>,
    config: AnalyzerConfig,
}

impl IngredientAnalyzer {
    /// 创建分析器（加载参考数据并构建索引）
    pub async fn new(config: AnalyzerConfig) -> AnalyzerResult<Self> {
        // 1. 加载参考数据
        let data = DatasetLoader::load(&config).await?;

        // 2. 构建索引
        Ok(Self::from_reference_data(data, config))
    }

    /// 由已加载的参考数据创建分析器（不做任何I/O）
    pub fn from_reference_data(data: ReferenceData, config: AnalyzerConfig) -> Self {
        // 记录只包装一次，索引与目录共享
        let ReferenceData { novel_foods, pharma } = data;
        let novel_foods: Vec<_> = novel_foods.into_iter().map(Arc::new).collect();
        let pharma: Vec<_> = pharma.into_iter().map(Arc::new).collect();

        let index = IndexBuilder::build_shared(&novel_foods, &pharma);
        let safe_substances = SafeSubstances::new(&config.safe_substances);
        let cache = MatchCache::new(config.cache_capacity);

        debug!(
            "Analyzer ready: {} novel food keys, {} pharma keys, {} safe substances, cache capacity {}",
            index.novel_food.len(),
            index.pharma.len(),
            safe_substances.len(),
            config.cache_capacity
        );

        Self {
            index: Arc::new(index),
            safe_substances: Arc::new(safe_substances),
            cache: Arc::new(Mutex::new(cache)),
            catalogue: Arc::new(NovelFoodCatalogue::from_shared(novel_foods)),
            config,
        }
    }

    /// 分析完整成分表
    pub fn analyze(&self, text: &str) -> AnalysisReport {
        let start = Instant::now();

        // 1. 顶层拆分
        let segments = split_ingredients(text);

        // 2. 逐个成分判定（整批共用一次缓存锁）
        let verdicts: Vec<Verdict> = {
            let mut cache = self.lock_cache();
            segments
                .iter()
                .map(|segment| self.classify_segment(segment, &mut cache))
                .collect()
        };

        // 3. 组装报告
        let report = VerdictAssembler::report(verdicts, start.elapsed());
        debug!(
            "Analyzed '{}': {} ({:.2} ms)",
            preview_compact(text, 80),
            report.summary,
            report.elapsed_ms
        );
        if self.config.verbose {
            for verdict in &report.verdicts {
                info!("{}", verdict);
            }
        }
        report
    }

    /// 分析单个成分片段（不再做顶层拆分）
    pub fn analyze_ingredient(&self, segment: &str) -> Verdict {
        let mut cache = self.lock_cache();
        self.classify_segment(segment, &mut cache)
    }

    /// 匹配单个检索词
    pub fn match_term(&self, term: &str) -> TermMatch {
        let mut cache = self.lock_cache();
        TermMatcher::match_term(term, &self.index, &self.safe_substances, &mut cache)
    }

    /// 检索新型食品目录
    pub fn search_catalogue(&self, term: &str) -> Vec<CatalogueEntry> {
        self.catalogue.search(term)
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.lock_cache().stats()
    }

    pub fn clear_cache(&self) {
        self.lock_cache().clear();
    }

    pub fn index(&self) -> &ReferenceIndex {
        &self.index
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    fn classify_segment(&self, segment: &str, cache: &mut MatchCache<CachedMatch>) -> Verdict {
        let parsed = parse_ingredient(segment);

        let mut evidence = Evidence::default();
        for term in parsed.search_terms() {
            let matched = TermMatcher::match_term(&term, &self.index, &self.safe_substances, cache);
            evidence.add(matched.novel_food, matched.pharma);
        }

        let classification = Classifier::classify(&evidence);
        VerdictAssembler::assemble(&parsed, classification, evidence)
    }

    // 缓存只保存纯查询结果，锁中毒后数据仍然有效
    fn lock_cache(&self) -> MutexGuard<'_, MatchCache<CachedMatch>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
