//! ingredient-analyzer - 补充剂成分表合规分析工具

// 导出全局错误类型
pub use self::error::{AnalyzerError, AnalyzerResult};

// 导出配置模块
pub use self::config::{AnalyzerConfig, ConfigManager, CustomConfigBuilder, DatasetSource};

// 导出数据集模块核心接口
pub use self::dataset::{
    CatalogueEntry, DatasetLoader, NovelFoodCatalogue, NovelFoodRecord, PharmaRecord,
    ReferenceData, SnapshotManager,
};

// 导出索引模块核心接口
pub use self::indexer::{key_variants, normalize, IndexBuilder, KeyIndex, ReferenceIndex};

// 导出分词模块核心接口
pub use self::tokenizer::{parse_ingredient, split_ingredients, ParentheticalGroup, ParsedIngredient};

// 导出工具模块核心接口
pub use self::utils::{preview_compact, HtmlText};

// 导出检测模块核心接口（含全局单例的简化接口）
pub use self::detector::{
    IngredientAnalyzer,
    AnalysisReport,
    AnalysisSummary,
    Classification,
    Evidence,
    MatchRecord,
    MatchType,
    Status,
    Verdict,
    CacheStats,
    init_analyzer,
    init_analyzer_with_config,
    analyze_ingredients,
};

// 声明所有子模块
pub mod config;
pub mod error;
pub mod dataset;
pub mod indexer;
pub mod tokenizer;
pub mod utils;
pub mod detector;
