//! 单个成分片段解析：主名称 + 首个顶层括号组

use serde::{Deserialize, Serialize};

use super::splitter::split_top_level;

/// 括号组内容
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ParentheticalGroup {
    /// 不含逗号的单项内容
    Single(String),
    /// 含逗号时按逗号切分的枚举
    Enumeration(Vec<String>),
}

/// 解析后的成分
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedIngredient {
    pub raw: String,
    /// 首个 `(` 之前的文本
    pub main_name: String,
    pub parenthetical: Option<ParentheticalGroup>,
}

impl ParsedIngredient {
    /// 解析成分片段
    pub fn parse(segment: &str) -> Self {
        let raw = segment.trim();
        let Some(open) = raw.find('(') else {
            return Self {
                raw: raw.to_string(),
                main_name: raw.to_string(),
                parenthetical: None,
            };
        };

        let main_name = raw[..open].trim().to_string();
        let content = group_content(&raw[open + 1..]).trim();

        let parenthetical = if content.is_empty() {
            None
        } else if content.contains(',') {
            // 嵌套括号内的逗号不切分枚举项
            let items = split_top_level(content, |ch| ch == ',');
            if items.is_empty() {
                None
            } else {
                Some(ParentheticalGroup::Enumeration(items))
            }
        } else {
            Some(ParentheticalGroup::Single(content.to_string()))
        };

        Self {
            raw: raw.to_string(),
            main_name,
            parenthetical,
        }
    }

    /// 派生检索词
    ///
    /// 括号内容为枚举时只检索各枚举项，主名称视为描述性文字不参与检索；
    /// 单项括号内容时主名称与括号内容都检索；无括号时只检索主名称。
    pub fn search_terms(&self) -> Vec<String> {
        match &self.parenthetical {
            Some(ParentheticalGroup::Enumeration(items)) => items.clone(),
            Some(ParentheticalGroup::Single(content)) => {
                let mut terms = Vec::with_capacity(2);
                if !self.main_name.is_empty() {
                    terms.push(self.main_name.clone());
                }
                terms.push(content.clone());
                terms
            }
            None if self.main_name.is_empty() => Vec::new(),
            None => vec![self.main_name.clone()],
        }
    }
}

/// 取首个括号组的内容：`rest` 为 `(` 之后的文本，
/// 返回与之配对的 `)` 之前的部分；未闭合时取到末尾
fn group_content(rest: &str) -> &str {
    let mut depth = 1usize;
    for (pos, ch) in rest.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return &rest[..pos];
                }
            }
            _ => {}
        }
    }
    rest
}

/// 解析成分片段
pub fn parse_ingredient(segment: &str) -> ParsedIngredient {
    ParsedIngredient::parse(segment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_enumeration_drops_main_name() {
        let parsed = parse_ingredient("Anti-caking agent (silicon dioxide, talc)");
        assert_eq!(parsed.main_name, "Anti-caking agent");
        assert_eq!(
            parsed.parenthetical,
            Some(ParentheticalGroup::Enumeration(vec!["silicon dioxide".into(), "talc".into()]))
        );
        assert_eq!(parsed.search_terms(), vec!["silicon dioxide", "talc"]);
    }

    #[test]
    fn test_parse_enumeration_keeps_nested_items_whole() {
        let parsed = parse_ingredient("Blend (Vitamin E (tocopherol, mixed), Zinc)");
        assert_eq!(parsed.search_terms(), vec!["Vitamin E (tocopherol, mixed)", "Zinc"]);

        // 逗号只出现在嵌套括号内时仍视为枚举，枚举项为整段内容
        let parsed = parse_ingredient("Oil (Fish oil (EPA, DHA))");
        assert_eq!(
            parsed.parenthetical,
            Some(ParentheticalGroup::Enumeration(vec!["Fish oil (EPA, DHA)".into()]))
        );
        assert_eq!(parsed.search_terms(), vec!["Fish oil (EPA, DHA)"]);
    }

    #[test]
    fn test_parse_single_parenthetical() {
        let parsed = parse_ingredient("Vitamin E (DL-alpha-tocopheryl acetate)");
        assert_eq!(parsed.search_terms(), vec!["Vitamin E", "DL-alpha-tocopheryl acetate"]);
    }

    #[test]
    fn test_parse_without_parenthetical() {
        let parsed = parse_ingredient("  Magnesium citrate ");
        assert_eq!(parsed.raw, "Magnesium citrate");
        assert_eq!(parsed.parenthetical, None);
        assert_eq!(parsed.search_terms(), vec!["Magnesium citrate"]);
    }

    #[test]
    fn test_parse_only_first_group_used() {
        let parsed = parse_ingredient("Zinc (gluconate) (EN)");
        assert_eq!(parsed.main_name, "Zinc");
        assert_eq!(parsed.search_terms(), vec!["Zinc", "gluconate"]);
    }

    #[test]
    fn test_parse_nested_group_content() {
        let parsed = parse_ingredient("Capsule shell (hydroxypropyl methylcellulose (HPMC))");
        assert_eq!(
            parsed.search_terms(),
            vec!["Capsule shell", "hydroxypropyl methylcellulose (HPMC)"]
        );
    }

    #[test]
    fn test_parse_degenerate_groups() {
        assert_eq!(parse_ingredient("Rice flour ()").search_terms(), vec!["Rice flour"]);
        assert_eq!(parse_ingredient("Rice flour (, )").search_terms(), vec!["Rice flour"]);
        assert_eq!(parse_ingredient("(ascorbic acid)").search_terms(), vec!["ascorbic acid"]);
        assert_eq!(parse_ingredient("Fish oil (omega-3").search_terms(), vec!["Fish oil", "omega-3"]);
        assert!(parse_ingredient("").search_terms().is_empty());
    }
}
