//! 富文本转纯文本
//! 目录中的状态说明/描述字段含HTML，输出前统一去除标签、解码实体

use std::cell::{Cell, RefCell};
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts
};
use tendril::StrTendril;

/// 产生单词边界的块级标签
const BLOCK_TAGS: &[&str] = &[
    "br", "p", "div", "li", "ul", "ol", "tr", "td", "th", "h1", "h2", "h3", "h4", "h5", "h6",
];

#[derive(Debug, Default)]
pub struct HtmlText {
    text: RefCell<String>,
    // script/style 内容不输出
    skipping: Cell<bool>,
}

impl TokenSink for HtmlText {
    type Handle = ();

    fn process_token(&self, token: Token, _line: u64) -> TokenSinkResult<()> {
        match token {
            Token::CharacterTokens(chars) => {
                if !self.skipping.get() {
                    self.text.borrow_mut().push_str(&chars);
                }
            }
            Token::TagToken(Tag { kind, name, .. }) => {
                let tag = name.as_ref();
                if tag == "script" || tag == "style" {
                    self.skipping.set(kind == TagKind::StartTag);
                } else if BLOCK_TAGS.contains(&tag) {
                    self.text.borrow_mut().push(' ');
                }
            }
            _ => {}
        }
        TokenSinkResult::Continue
    }
}

impl HtmlText {
    /// HTML片段转纯文本（空白折叠、首尾去空）
    pub fn to_plain_text(html: &str) -> String {
        // 无标签无实体时直接折叠空白
        if !html.contains('<') && !html.contains('&') {
            return collapse_whitespace(html);
        }

        let tokenizer = Tokenizer::new(HtmlText::default(), TokenizerOpts::default());
        let queue = BufferQueue::default();
        queue.push_back(StrTendril::from(html));

        let _ = tokenizer.feed(&queue);
        tokenizer.end();

        let text = tokenizer.sink.text.borrow();
        collapse_whitespace(&text)
    }
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_strips_tags_and_entities() {
        let html = r#"<p>Authorised&nbsp;novel food.</p><p>See <a href="/x">Regulation (EU) 2015/2283</a> &amp; annexes</p>"#;
        assert_eq!(
            HtmlText::to_plain_text(html),
            "Authorised novel food. See Regulation (EU) 2015/2283 & annexes"
        );
    }

    #[test]
    fn test_plain_text_block_tags_split_words() {
        assert_eq!(HtmlText::to_plain_text("line one<br>line two"), "line one line two");
        assert_eq!(HtmlText::to_plain_text("<ul><li>a</li><li>b</li></ul>"), "a b");
    }

    #[test]
    fn test_plain_text_skips_script() {
        assert_eq!(HtmlText::to_plain_text("ok<script>alert(1)</script> done"), "ok done");
    }

    #[test]
    fn test_plain_text_passthrough() {
        assert_eq!(HtmlText::to_plain_text("  Not   novel \n"), "Not novel");
        assert_eq!(HtmlText::to_plain_text(""), "");
    }
}
