//! 数据集模块：参考数据模型、加载、快照与目录检索
pub mod model;
pub mod loader;
pub mod snapshot;
pub mod catalogue;

// 导出核心接口
pub use self::model::{NovelFoodRecord, PharmaRecord, ReferenceData};
pub use self::loader::DatasetLoader;
pub use self::snapshot::SnapshotManager;
pub use self::catalogue::{CatalogueEntry, NovelFoodCatalogue};
