//! 检测模块：检索词匹配、判定与结果组装
pub mod verdict;
pub mod cache;
pub mod matcher;
pub mod classifier;
pub mod assembler;
pub mod analyzer;
pub mod global;

// 导出核心接口
pub use self::verdict::{
    AnalysisReport, AnalysisSummary, Classification, Evidence, MatchRecord, MatchType, Status, Verdict,
};
pub use self::cache::{CacheStats, MatchCache};
pub use self::matcher::{CachedMatch, PharmaHit, SafeSubstances, TermMatch, TermMatcher, KNOWN_SAFE_COMMENT};
pub use self::classifier::Classifier;
pub use self::assembler::VerdictAssembler;
pub use self::analyzer::IngredientAnalyzer;
pub use self::global::{analyze_ingredients, get_global_analyzer, init_analyzer, init_analyzer_with_config};
