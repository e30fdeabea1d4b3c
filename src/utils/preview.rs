use std::fmt::{self, Write};

// ======================== 日志预览工具函数 ========================
/// 空白字符折叠 + 截断，用于在日志中预览用户输入的成分表
/// 逻辑：
/// 1. 连续空白（含换行）折叠为单个空格，仅格式化输出，不修改原字符串
/// 2. 达到最大长度时追加省略号并终止
#[inline(always)]
pub fn preview_compact<'a>(s: &'a str, max_len: usize) -> impl fmt::Display + 'a {
    struct CompactView<'a> {
        source: &'a str,
        max_length: usize,
    }

    impl<'a> fmt::Display for CompactView<'a> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let mut char_count = 0;
            let mut last_was_whitespace = false;

            for ch in self.source.trim().chars() {
                if char_count >= self.max_length {
                    f.write_char('…')?;
                    break;
                }

                if ch.is_whitespace() {
                    if !last_was_whitespace {
                        f.write_char(' ')?;
                        char_count += 1;
                        last_was_whitespace = true;
                    }
                } else {
                    f.write_char(ch)?;
                    char_count += 1;
                    last_was_whitespace = false;
                }
            }
            Ok(())
        }
    }

    CompactView {
        source: s,
        max_length: max_len,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_collapses_newlines() {
        let input = "Magnesium citrate,\n\n  Zinc (zinc gluconate)";
        assert_eq!(preview_compact(input, 80).to_string(), "Magnesium citrate, Zinc (zinc gluconate)");
    }

    #[test]
    fn test_preview_truncates() {
        assert_eq!(preview_compact("Ascorbic acid", 8).to_string(), "Ascorbic…");
        assert_eq!(preview_compact("Zinc", 4).to_string(), "Zinc");
    }
}
