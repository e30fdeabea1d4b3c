//! 分析结果模型
//! 匹配记录、证据、判定结论与批量分析报告

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::dataset::{NovelFoodRecord, PharmaRecord};
use crate::error::AnalyzerResult;

/// 匹配方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchType {
    /// 归一化键精确命中
    Exact,
    /// 命中已知安全物质名单（合成的非药品匹配）
    KnownSafe,
}

/// 单个检索词的匹配记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord<R> {
    pub term: String,
    pub record: Arc<R>,
    pub match_type: MatchType,
    /// 候选之间不排序，恒为0
    pub score: u32,
}

impl<R> MatchRecord<R> {
    pub fn exact(term: &str, record: Arc<R>) -> Self {
        Self {
            term: term.to_string(),
            record,
            match_type: MatchType::Exact,
            score: 0,
        }
    }
}

/// 按参考库类型分组、以检索词为键的证据
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    pub novel_food: Vec<MatchRecord<NovelFoodRecord>>,
    pub pharma: Vec<MatchRecord<PharmaRecord>>,
}

impl Evidence {
    /// 记录一个检索词的匹配结果（同一检索词只记录一次）
    pub fn add(&mut self, novel_food: Option<MatchRecord<NovelFoodRecord>>, pharma: Option<MatchRecord<PharmaRecord>>) {
        if let Some(m) = novel_food {
            if self.novel_food_for(&m.term).is_none() {
                self.novel_food.push(m);
            }
        }
        if let Some(m) = pharma {
            if self.pharma_for(&m.term).is_none() {
                self.pharma.push(m);
            }
        }
    }

    pub fn novel_food_for(&self, term: &str) -> Option<&MatchRecord<NovelFoodRecord>> {
        self.novel_food.iter().find(|m| m.term == term)
    }

    pub fn pharma_for(&self, term: &str) -> Option<&MatchRecord<PharmaRecord>> {
        self.pharma.iter().find(|m| m.term == term)
    }

    /// 产生过匹配的检索词（去重，保持出现顺序）
    pub fn matched_terms(&self) -> Vec<&str> {
        let mut terms: Vec<&str> = Vec::new();
        let all = self.pharma.iter().map(|m| m.term.as_str())
            .chain(self.novel_food.iter().map(|m| m.term.as_str()));
        for term in all {
            if !terms.contains(&term) {
                terms.push(term);
            }
        }
        terms
    }

    pub fn is_empty(&self) -> bool {
        self.novel_food.is_empty() && self.pharma.is_empty()
    }
}

/// 判定状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Safe,
    Danger,
    Unknown,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::Safe => "safe",
            Status::Danger => "danger",
            Status::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// 判定结论（决策表的每一行）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    PharmaceuticalMedicine,
    NovelFood,
    NovelFoodNotInSubstanceGuide,
    Approved,
    NoInformation,
}

impl Classification {
    pub fn status(self) -> Status {
        match self {
            Classification::PharmaceuticalMedicine
            | Classification::NovelFood
            | Classification::NovelFoodNotInSubstanceGuide => Status::Danger,
            Classification::Approved => Status::Safe,
            Classification::NoInformation => Status::Unknown,
        }
    }

    /// 面向用户的状态文案
    pub fn label(self) -> &'static str {
        match self {
            Classification::PharmaceuticalMedicine => "Non-Approved (Pharmaceutical Medicine)",
            Classification::NovelFood => "Non-Approved (Novel Food)",
            Classification::NovelFoodNotInSubstanceGuide => "Non-Approved (Novel Food, not in Substance Guide)",
            Classification::Approved => "Approved",
            Classification::NoInformation => "No information",
        }
    }
}

/// 单个成分的判定结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub ingredient_name: String,
    pub status: Status,
    pub status_text: String,
    pub search_terms: Vec<String>,
    pub evidence: Evidence,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.ingredient_name, self.status_text)
    }
}

/// 批量分析统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub total: usize,
    pub safe: usize,
    pub danger: usize,
    pub unknown: usize,
}

impl AnalysisSummary {
    pub fn from_verdicts(verdicts: &[Verdict]) -> Self {
        let mut summary = Self {
            total: verdicts.len(),
            ..Self::default()
        };
        for verdict in verdicts {
            match verdict.status {
                Status::Safe => summary.safe += 1,
                Status::Danger => summary.danger += 1,
                Status::Unknown => summary.unknown += 1,
            }
        }
        summary
    }
}

impl fmt::Display for AnalysisSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Approved: {} | Non-Approved: {} | No information: {}",
            self.safe, self.danger, self.unknown
        )
    }
}

/// 批量分析报告（耗时仅供观测，不影响判定）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub verdicts: Vec<Verdict>,
    pub elapsed_ms: f64,
    pub summary: AnalysisSummary,
}

impl AnalysisReport {
    pub fn is_empty(&self) -> bool {
        self.verdicts.is_empty()
    }

    pub fn to_pretty_json(&self) -> AnalyzerResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
