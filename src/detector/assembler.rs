//! 结果组装：把判定结论与证据打包为 Verdict，不做任何重新计算

use std::time::Duration;

use super::verdict::{AnalysisReport, AnalysisSummary, Classification, Evidence, Verdict};
use crate::tokenizer::ParsedIngredient;

/// 结果组装器
pub struct VerdictAssembler;

impl VerdictAssembler {
    /// 组装单个成分的判定结果
    pub fn assemble(ingredient: &ParsedIngredient, classification: Classification, evidence: Evidence) -> Verdict {
        Verdict {
            ingredient_name: ingredient.raw.clone(),
            status: classification.status(),
            status_text: classification.label().to_string(),
            search_terms: ingredient.search_terms(),
            evidence,
        }
    }

    /// 组装整批报告
    pub fn report(verdicts: Vec<Verdict>, elapsed: Duration) -> AnalysisReport {
        let summary = AnalysisSummary::from_verdicts(&verdicts);
        AnalysisReport {
            verdicts,
            elapsed_ms: elapsed.as_secs_f64() * 1000.0,
            summary,
        }
    }
}
