//! 全局配置管理,存储所有可配置项

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use url::Url;

use crate::error::{AnalyzerError, AnalyzerResult};

/// 默认匹配缓存容量
pub const DEFAULT_CACHE_CAPACITY: usize = 1000;

/// 默认的"已知安全"矿物质/维生素名单（查询时统一归一化）
///
/// 常见营养矿物质往往不在药品物质指南中，但作为补充剂成分毫无争议。
pub const DEFAULT_SAFE_SUBSTANCES: &[&str] = &[
    // 矿物质
    "calcium", "kalcium",
    "magnesium",
    "zinc", "zink",
    "iron", "järn",
    "selenium", "selen",
    "potassium", "kalium",
    "copper", "koppar",
    "manganese", "mangan",
    "chromium", "krom",
    "molybdenum", "molybden",
    "iodine", "jod",
    "phosphorus", "fosfor",
    // 维生素
    "vitamin a", "vitamin b1", "vitamin b2", "vitamin b3", "vitamin b5",
    "vitamin b6", "vitamin b12", "vitamin c", "vitamin d", "vitamin d3",
    "vitamin e", "vitamin k", "vitamin k2",
    "thiamine", "tiamin",
    "riboflavin",
    "niacin",
    "biotin",
    "folic acid", "folsyra",
];

/// 参考数据源：本地文件或远程URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    LocalFile(PathBuf),
    Remote(Url),
}

impl FromStr for DatasetSource {
    type Err = AnalyzerError;

    fn from_str(s: &str) -> AnalyzerResult<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AnalyzerError::InvalidInput("empty dataset source".to_string()));
        }
        if s.starts_with("http://") || s.starts_with("https://") {
            Ok(DatasetSource::Remote(Url::parse(s)?))
        } else {
            Ok(DatasetSource::LocalFile(PathBuf::from(s)))
        }
    }
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetSource::LocalFile(path) => write!(f, "{}", path.display()),
            DatasetSource::Remote(url) => write!(f, "{}", url),
        }
    }
}

/// 分析器配置
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    // 欧盟新型食品目录数据源
    pub novel_food_source: DatasetSource,
    // 药品物质指南数据源
    pub pharma_source: DatasetSource,
    // 本地MessagePack快照路径（None表示不使用快照）
    pub snapshot_path: Option<PathBuf>,
    // 超时配置（单位：秒）
    pub http_timeout: u64,
    // 匹配缓存容量（0表示不缓存）
    pub cache_capacity: usize,
    // 已知安全物质名单（原始文本，构建时归一化）
    pub safe_substances: Vec<String>,
    // 是否启用详细日志
    pub verbose: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            novel_food_source: DatasetSource::LocalFile(PathBuf::from("novel_foods_complete.json")),
            pharma_source: DatasetSource::LocalFile(PathBuf::from("lakemedelsverket_substances.json")),
            snapshot_path: None,
            http_timeout: 30,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            safe_substances: DEFAULT_SAFE_SUBSTANCES.iter().map(|s| s.to_string()).collect(),
            verbose: false,
        }
    }
}

/// 配置管理器
pub struct ConfigManager;

impl ConfigManager {
    /// 获取默认配置
    pub fn get_default() -> AnalyzerConfig {
        AnalyzerConfig::default()
    }

    /// 自定义配置
    pub fn custom() -> CustomConfigBuilder {
        CustomConfigBuilder::new()
    }
}

/// 配置构建器（便于自定义配置）
#[derive(Debug, Clone)]
pub struct CustomConfigBuilder {
    config: AnalyzerConfig,
}

impl Default for CustomConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: AnalyzerConfig::default(),
        }
    }

    pub fn novel_food_source(mut self, source: DatasetSource) -> Self {
        self.config.novel_food_source = source;
        self
    }

    pub fn pharma_source(mut self, source: DatasetSource) -> Self {
        self.config.pharma_source = source;
        self
    }

    pub fn snapshot_path(mut self, path: PathBuf) -> Self {
        self.config.snapshot_path = Some(path);
        self
    }

    pub fn http_timeout(mut self, timeout: u64) -> Self {
        self.config.http_timeout = timeout;
        self
    }

    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.config.cache_capacity = capacity;
        self
    }

    /// 替换整个安全物质名单
    pub fn safe_substances<I, S>(mut self, substances: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.safe_substances = substances.into_iter().map(Into::into).collect();
        self
    }

    /// 在默认名单基础上追加
    pub fn add_safe_substance(mut self, substance: impl Into<String>) -> Self {
        self.config.safe_substances.push(substance.into());
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }

    pub fn build(self) -> AnalyzerConfig {
        self.config
    }
}
