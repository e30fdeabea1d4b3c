//! 参考数据模型定义
//! 仅存储两个参考数据库的记录，加载后不可变，支持序列化/反序列化

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::utils::HtmlText;

/// 欧盟新型食品目录记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NovelFoodRecord {
    #[serde(rename = "policy_item_id", default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(rename = "novel_food_name", default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub common_name: Option<String>,
    /// 同义词（目录中为单个字符串）
    #[serde(default, deserialize_with = "lenient_string")]
    pub synonyms: Option<String>,
    #[serde(rename = "novel_food_display_name", default, deserialize_with = "lenient_string")]
    pub display_name: Option<String>,
    #[serde(rename = "novel_food_status", default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
    /// 状态说明（含HTML）
    #[serde(rename = "novel_food_status_desc", default, deserialize_with = "lenient_string")]
    pub status_desc: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub policy_item_code: Option<String>,
    /// 分类标签
    #[serde(rename = "part_of_novel_food", default, deserialize_with = "lenient_string")]
    pub category: Option<String>,
    /// 描述（含HTML）
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
}

impl NovelFoodRecord {
    /// 展示名称：优先 display_name，回退到 name
    pub fn display(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or_default()
    }

    /// 参与索引的原始标签（name / common_name / synonyms）
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        [&self.name, &self.common_name, &self.synonyms]
            .into_iter()
            .filter_map(|label| label.as_deref())
    }

    /// 状态说明纯文本
    pub fn status_desc_text(&self) -> Option<String> {
        self.status_desc.as_deref().map(HtmlText::to_plain_text)
    }

    /// 描述纯文本
    pub fn description_text(&self) -> Option<String> {
        self.description.as_deref().map(HtmlText::to_plain_text)
    }
}

impl fmt::Display for NovelFoodRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.status {
            Some(status) if !status.is_empty() => write!(f, "{} [{}]", self.display(), status),
            _ => write!(f, "{}", self.display()),
        }
    }
}

/// 药品物质指南记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PharmaRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub synonyms: Vec<String>,
    /// 必须为布尔值，缺失或类型错误的记录在加载时整体跳过
    pub is_medicine: bool,
    #[serde(default, deserialize_with = "lenient_string")]
    pub comment: Option<String>,
}

impl PharmaRecord {
    pub fn display(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// 参与索引的原始标签（name + 全部同义词）
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.name
            .as_deref()
            .into_iter()
            .chain(self.synonyms.iter().map(String::as_str))
    }

    pub fn is_medicine(&self) -> bool {
        self.is_medicine
    }
}

impl fmt::Display for PharmaRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let class = if self.is_medicine { "medicine" } else { "not medicine" };
        write!(f, "{} ({})", self.display(), class)
    }
}

/// 两个参考数据库（外部加载完成后交给索引构建器）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceData {
    pub novel_foods: Vec<NovelFoodRecord>,
    pub pharma: Vec<PharmaRecord>,
}

impl ReferenceData {
    pub fn new(novel_foods: Vec<NovelFoodRecord>, pharma: Vec<PharmaRecord>) -> Self {
        Self { novel_foods, pharma }
    }
}

// ======== 宽松反序列化：非字符串/null 键视为缺失，单条坏记录不影响整体加载 ========
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

fn lenient_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        Some(Value::String(s)) => vec![s],
        _ => Vec::new(),
    })
}
