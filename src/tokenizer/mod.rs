//! 分词模块：成分表切分与成分片段解析
pub mod splitter;
pub mod parser;

// 导出核心接口
pub use self::splitter::split_ingredients;
pub use self::parser::{parse_ingredient, ParentheticalGroup, ParsedIngredient};
