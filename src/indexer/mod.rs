//! 索引模块：文本归一化与参考索引构建
pub mod normalize;
pub mod builder;

// 导出核心接口
pub use self::normalize::{key_variants, normalize};
pub use self::builder::{IndexBuilder, KeyIndex, ReferenceIndex};
