//! 全局分析器单例管理
use once_cell::sync::Lazy;
use std::sync::Arc;
use tokio::sync::OnceCell;

use super::analyzer::IngredientAnalyzer;
use super::verdict::AnalysisReport;
use crate::config::{AnalyzerConfig, ConfigManager};
use crate::error::{AnalyzerError, AnalyzerResult};

/// 全局分析器实例
static GLOBAL_ANALYZER: Lazy<Arc<OnceCell<IngredientAnalyzer>>> = Lazy::new(|| {
    Arc::new(OnceCell::new())
});

/// 初始化全局分析器（默认配置）
pub async fn init_analyzer() -> AnalyzerResult<()> {
    init_analyzer_with_config(ConfigManager::get_default()).await
}

/// 带自定义配置初始化全局分析器
///
/// 已初始化时直接返回；并发调用只会加载一次参考数据。
pub async fn init_analyzer_with_config(config: AnalyzerConfig) -> AnalyzerResult<()> {
    GLOBAL_ANALYZER
        .get_or_try_init(|| IngredientAnalyzer::new(config))
        .await?;
    Ok(())
}

/// 获取全局分析器
pub fn get_global_analyzer() -> AnalyzerResult<&'static IngredientAnalyzer> {
    GLOBAL_ANALYZER.get()
        .ok_or(AnalyzerError::AnalyzerNotInitialized)
}

/// 使用全局分析器分析成分表
pub fn analyze_ingredients(text: &str) -> AnalyzerResult<AnalysisReport> {
    Ok(get_global_analyzer()?.analyze(text))
}
