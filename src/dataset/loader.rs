//! 参考数据加载管理器
//! 负责从本地快照、本地文件或远程URL加载两个参考数据库

use std::time::Duration;

use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::model::{NovelFoodRecord, PharmaRecord, ReferenceData};
use super::snapshot::SnapshotManager;
use crate::config::{AnalyzerConfig, DatasetSource};
use crate::error::{AnalyzerError, AnalyzerResult};

/// 参考数据加载管理器
pub struct DatasetLoader;

impl DatasetLoader {
    /// 加载参考数据（优先本地快照，快照不可用则读取数据源）
    ///
    /// 任何失败都归为 `DatabasesUnavailable`，不提供部分可用的引擎。
    pub async fn load(config: &AnalyzerConfig) -> AnalyzerResult<ReferenceData> {
        // 1. 优先加载本地快照
        if let Some(path) = &config.snapshot_path {
            match SnapshotManager::load(path).await {
                Ok(data) => {
                    debug!(
                        "Loaded dataset snapshot {}: {} novel foods, {} pharma substances",
                        path.display(),
                        data.novel_foods.len(),
                        data.pharma.len()
                    );
                    return Ok(data);
                }
                Err(e) => warn!("Dataset snapshot unavailable ({}), reading sources", e),
            }
        }

        // 2. 读取两个数据源
        let data = Self::fetch_sources(config).await.map_err(Self::unavailable)?;

        // 3. 写入本地快照
        if let Some(path) = &config.snapshot_path {
            if let Err(e) = SnapshotManager::save(path, &data).await {
                warn!("Failed to write dataset snapshot {}: {}", path.display(), e);
            } else {
                debug!("Dataset snapshot written to {}", path.display());
            }
        }

        Ok(data)
    }

    /// 从内存中的JSON载荷构建参考数据
    pub fn from_json_slices(novel_foods: &[u8], pharma: &[u8]) -> AnalyzerResult<ReferenceData> {
        let novel_foods = Self::parse_records::<NovelFoodRecord>(novel_foods, "novel food")
            .map_err(Self::unavailable)?;
        let pharma = Self::parse_records::<PharmaRecord>(pharma, "pharma").map_err(Self::unavailable)?;
        Ok(ReferenceData::new(novel_foods, pharma))
    }

    /// 并发读取两个数据源
    async fn fetch_sources(config: &AnalyzerConfig) -> AnalyzerResult<ReferenceData> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout))
            .build()?;

        let (novel_foods, pharma) = tokio::try_join!(
            Self::read_source(&client, &config.novel_food_source),
            Self::read_source(&client, &config.pharma_source),
        )?;

        Self::from_json_slices(&novel_foods, &pharma)
    }

    /// 读取单个数据源的原始字节
    async fn read_source(client: &Client, source: &DatasetSource) -> AnalyzerResult<Vec<u8>> {
        debug!("Reading dataset from {}", source);
        match source {
            DatasetSource::LocalFile(path) => Ok(tokio::fs::read(path).await?),
            DatasetSource::Remote(url) => {
                let response = client
                    .get(url.clone())
                    .header(USER_AGENT, concat!("ingredient-analyzer/", env!("CARGO_PKG_VERSION")))
                    .header(ACCEPT, "application/json")
                    .send()
                    .await?;

                if !response.status().is_success() {
                    return Err(AnalyzerError::DatabasesUnavailable(format!(
                        "{} returned status {}",
                        url,
                        response.status()
                    )));
                }

                Ok(response.bytes().await?.to_vec())
            }
        }
    }

    /// 解析数据集：载荷必须是JSON数组，无法解析为记录的元素直接跳过
    fn parse_records<R: DeserializeOwned>(bytes: &[u8], dataset: &str) -> AnalyzerResult<Vec<R>> {
        let Value::Array(items) = serde_json::from_slice::<Value>(bytes)? else {
            return Err(AnalyzerError::DatabasesUnavailable(format!(
                "{} dataset is not a JSON array",
                dataset
            )));
        };

        let total = items.len();
        let records: Vec<R> = items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect();

        if records.len() < total {
            debug!("Skipped {} malformed {} records", total - records.len(), dataset);
        }
        debug!("Parsed {} {} records", records.len(), dataset);
        Ok(records)
    }

    fn unavailable(err: AnalyzerError) -> AnalyzerError {
        match err {
            AnalyzerError::DatabasesUnavailable(_) => err,
            other => AnalyzerError::DatabasesUnavailable(other.to_string()),
        }
    }
}
