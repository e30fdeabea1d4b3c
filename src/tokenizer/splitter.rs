//! 成分表切分
//! 按括号深度扫描，仅在顶层遇到分隔符时切分

/// 顶层分隔符：逗号、分号、换行
#[inline]
fn is_delimiter(ch: char) -> bool {
    matches!(ch, ',' | ';' | '\n')
}

/// 将原始成分表切分为有序的成分片段
///
/// 括号内的分隔符不切分；多余的右括号不报错（深度下限为0）；
/// 片段去除首尾空白，空片段丢弃，末尾无分隔符的片段同样保留。
pub fn split_ingredients(text: &str) -> Vec<String> {
    split_top_level(text, is_delimiter)
}

/// 仅在括号深度为0处按 `is_delimiter` 切分
pub(crate) fn split_top_level(text: &str, is_delimiter: impl Fn(char) -> bool) -> Vec<String> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;

    for (pos, ch) in text.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ if depth == 0 && is_delimiter(ch) => {
                push_segment(&mut segments, &text[start..pos]);
                start = pos + ch.len_utf8();
            }
            _ => {}
        }
    }
    push_segment(&mut segments, &text[start..]);

    segments
}

fn push_segment(segments: &mut Vec<String>, raw: &str) {
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        segments.push(trimmed.to_string());
    }
}
