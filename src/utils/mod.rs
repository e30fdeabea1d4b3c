//! 工具模块：富文本转换、日志预览
pub mod html_text;
pub mod preview;

// 导出核心接口
pub use self::html_text::HtmlText;
pub use self::preview::preview_compact;
