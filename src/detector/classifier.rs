//! 判定器：对一个成分全部检索词的匹配结果执行两阶段决策

use super::verdict::{Classification, Evidence};

/// 成分判定器
pub struct Classifier;

impl Classifier {
    /// 按严格优先级判定
    ///
    /// 1. 任一药品匹配为药品 → 药品，不予批准
    /// 2. 任一药品匹配为非药品：有新型食品匹配 → 新型食品，不予批准；否则 → 批准
    /// 3. 无药品匹配但有新型食品匹配 → 新型食品（不在物质指南中），不予批准
    /// 4. 其余 → 无信息
    pub fn classify(evidence: &Evidence) -> Classification {
        let any_medicine = evidence.pharma.iter().any(|m| m.record.is_medicine());
        if any_medicine {
            return Classification::PharmaceuticalMedicine;
        }

        let has_novel_food = !evidence.novel_food.is_empty();
        let any_non_medicine = evidence.pharma.iter().any(|m| !m.record.is_medicine());
        match (any_non_medicine, has_novel_food) {
            (true, true) => Classification::NovelFood,
            (true, false) => Classification::Approved,
            (false, true) => Classification::NovelFoodNotInSubstanceGuide,
            (false, false) => Classification::NoInformation,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::dataset::{NovelFoodRecord, PharmaRecord};
    use crate::detector::verdict::{MatchRecord, MatchType, Status};

    fn pharma_match(term: &str, is_medicine: bool) -> MatchRecord<PharmaRecord> {
        MatchRecord::exact(
            term,
            Arc::new(PharmaRecord {
                name: Some(term.to_string()),
                synonyms: Vec::new(),
                is_medicine,
                comment: None,
            }),
        )
    }

    fn novel_match(term: &str) -> MatchRecord<NovelFoodRecord> {
        MatchRecord::exact(
            term,
            Arc::new(NovelFoodRecord {
                id: None,
                name: Some(term.to_string()),
                common_name: None,
                synonyms: None,
                display_name: None,
                status: Some("Novel food".to_string()),
                status_desc: None,
                policy_item_code: None,
                category: None,
                description: None,
            }),
        )
    }

    fn evidence(pharma: Vec<MatchRecord<PharmaRecord>>, novel_food: Vec<MatchRecord<NovelFoodRecord>>) -> Evidence {
        Evidence { novel_food, pharma }
    }

    #[test]
    fn test_medicine_overrides_everything() {
        let e = evidence(
            vec![pharma_match("Y", false), pharma_match("X", true)],
            vec![novel_match("X")],
        );
        let c = Classifier::classify(&e);
        assert_eq!(c, Classification::PharmaceuticalMedicine);
        assert_eq!(c.status(), Status::Danger);
        assert_eq!(c.label(), "Non-Approved (Pharmaceutical Medicine)");
    }

    #[test]
    fn test_non_medicine_without_novel_food_is_approved() {
        let c = Classifier::classify(&evidence(vec![pharma_match("Y", false)], vec![]));
        assert_eq!(c, Classification::Approved);
        assert_eq!(c.status(), Status::Safe);
        assert_eq!(c.label(), "Approved");
    }

    #[test]
    fn test_non_medicine_with_novel_food() {
        let c = Classifier::classify(&evidence(vec![pharma_match("Y", false)], vec![novel_match("Z")]));
        assert_eq!(c, Classification::NovelFood);
        assert_eq!(c.status(), Status::Danger);
        assert_eq!(c.label(), "Non-Approved (Novel Food)");
    }

    #[test]
    fn test_novel_food_not_in_substance_guide() {
        let c = Classifier::classify(&evidence(vec![], vec![novel_match("Z")]));
        assert_eq!(c, Classification::NovelFoodNotInSubstanceGuide);
        assert_eq!(c.status(), Status::Danger);
        assert_eq!(c.label(), "Non-Approved (Novel Food, not in Substance Guide)");
    }

    #[test]
    fn test_no_matches_is_unknown() {
        let c = Classifier::classify(&Evidence::default());
        assert_eq!(c, Classification::NoInformation);
        assert_eq!(c.status(), Status::Unknown);
        assert_eq!(c.label(), "No information");
    }

    #[test]
    fn test_known_safe_counts_as_non_medicine() {
        let mut known_safe = pharma_match("Zinc", false);
        known_safe.match_type = MatchType::KnownSafe;
        assert_eq!(
            Classifier::classify(&evidence(vec![known_safe], vec![])),
            Classification::Approved
        );
    }
}
