//! 文本归一化
//!
//! 索引构建与查询必须使用同一个 [`normalize`]，否则查找会静默失败。
//! 归一化步骤：
//! 1. 转小写
//! 2. Unicode NFD 分解并丢弃组合附加符（ö/å/ä → o/a/a）
//! 3. 连字符替换为空格，去除撇号与逗号
//! 4. 空白折叠为单个空格并去除首尾空白
//!
//! 空白折叠放在最后，保证结果幂等。

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// 末尾两字母语言标注，如 "Spirulina (EN)"
static TRAILING_LANG_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\(\s*[A-Za-z]{2}\s*\)\s*$").expect("static regex"));

#[inline]
fn is_hyphen(c: char) -> bool {
    matches!(c, '-' | '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2013}')
}

#[inline]
fn is_apostrophe(c: char) -> bool {
    matches!(c, '\'' | '\u{2018}' | '\u{2019}' | '\u{02BC}' | '`')
}

/// 将文本归一化为查找键；空输入得到空键
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let folded: String = lowered
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter_map(|c| {
            if is_hyphen(c) {
                Some(' ')
            } else if is_apostrophe(c) || c == ',' {
                None
            } else {
                Some(c)
            }
        })
        .collect();

    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// 去除末尾的两字母语言标注
pub fn strip_language_tag(label: &str) -> &str {
    match TRAILING_LANG_TAG.find(label) {
        Some(m) => &label[..m.start()],
        None => label,
    }
}

/// 去除全部括号内容（按嵌套深度扫描，多余的右括号直接丢弃）
pub fn strip_parentheticals(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut depth = 0usize;
    for ch in label.chars() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(ch),
            _ => {}
        }
    }
    out
}

/// 索引构建用的全部键：原始标签的键在前，随后是与之不同的变体键
///
/// 变体：去除语言标注、去除全部括号内容。空键与重复键不输出。
pub fn key_variants(label: &str) -> Vec<String> {
    let mut keys: Vec<String> = Vec::with_capacity(3);
    let candidates = [
        normalize(label),
        normalize(strip_language_tag(label)),
        normalize(&strip_parentheticals(label)),
    ];
    for key in candidates {
        if !key.is_empty() && !keys.contains(&key) {
            keys.push(key);
        }
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_basic_steps() {
        assert_eq!(normalize("  Magnesium   Citrate "), "magnesium citrate");
        assert_eq!(normalize("DL-alpha-tocopheryl acetate"), "dl alpha tocopheryl acetate");
        assert_eq!(normalize("St. John's wort"), "st. johns wort");
        assert_eq!(normalize("Zinc, gluconate"), "zinc gluconate");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" - , ' "), "");
    }

    #[test]
    fn test_normalize_diacritic_folding() {
        assert_eq!(normalize("Järn"), normalize("Jarn"));
        assert_eq!(normalize("Jarn"), normalize("jarn"));
        assert_eq!(normalize("Ölkorn Åkerbär"), "olkorn akerbar");
        assert_eq!(normalize("Crème brûlée"), "creme brulee");
    }

    #[test]
    fn test_normalize_idempotent() {
        let samples = [
            "Järn (Fe) - bisglycinate",
            "a - b",
            "x-",
            "Vitamin  D3 (cholecalciferol, 25 µg)",
            "L'Oréal’s  \t extract",
            "İstanbul",
            "",
        ];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", s);
        }
    }

    #[test]
    fn test_strip_language_tag() {
        assert_eq!(strip_language_tag("Spirulina (EN)"), "Spirulina");
        assert_eq!(strip_language_tag("Spirulina ( sv )"), "Spirulina");
        assert_eq!(strip_language_tag("Vitamin C (ascorbic acid)"), "Vitamin C (ascorbic acid)");
        assert_eq!(strip_language_tag("Zinc (EN) oxide"), "Zinc (EN) oxide");
    }

    #[test]
    fn test_strip_parentheticals() {
        assert_eq!(strip_parentheticals("Vitamin C (ascorbic acid)"), "Vitamin C ");
        assert_eq!(strip_parentheticals("a (b (c)) d"), "a  d");
        assert_eq!(strip_parentheticals("odd) text"), "odd text");
    }

    #[test]
    fn test_key_variants() {
        assert_eq!(key_variants("Spirulina (EN)"), vec!["spirulina (en)", "spirulina"]);
        assert_eq!(
            key_variants("Chia seed (Salvia hispanica) (EN)"),
            vec!["chia seed (salvia hispanica) (en)", "chia seed (salvia hispanica)", "chia seed"]
        );
        assert_eq!(key_variants("Melatonin"), vec!["melatonin"]);
        assert!(key_variants("(EN)").len() == 1);
        assert!(key_variants("   ").is_empty());
    }
}
