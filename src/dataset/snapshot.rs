//! 参考数据快照管理
//! 仅处理两个参考数据库的本地序列化（MessagePack）和反序列化

use std::path::Path;

use tracing::debug;

use super::model::ReferenceData;
use crate::error::{AnalyzerError, AnalyzerResult};

/// 快照管理器
pub struct SnapshotManager;

impl SnapshotManager {
    /// 从本地快照加载
    pub async fn load(path: &Path) -> AnalyzerResult<ReferenceData> {
        let bytes = tokio::fs::read(path).await?;

        // MessagePack反序列化
        let data: ReferenceData = rmp_serde::from_slice(&bytes)
            .map_err(|e| AnalyzerError::SnapshotError(format!("decode failed: {}", e)))?;

        debug!("Snapshot decoded, {} bytes", bytes.len());
        Ok(data)
    }

    /// 将参考数据写入本地快照
    pub async fn save(path: &Path, data: &ReferenceData) -> AnalyzerResult<()> {
        // 字段名写入快照，记录结构调整后旧快照仍可读
        let bytes = rmp_serde::to_vec_named(data)
            .map_err(|e| AnalyzerError::SnapshotError(format!("encode failed: {}", e)))?;

        debug!("Snapshot encoded, {} bytes", bytes.len());
        tokio::fs::write(path, bytes).await?;
        Ok(())
    }

    /// 清除本地快照
    pub async fn clear(path: &Path) -> AnalyzerResult<()> {
        if path.exists() {
            tokio::fs::remove_file(path).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{NovelFoodRecord, PharmaRecord};

    #[tokio::test]
    async fn test_snapshot_round_trip_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.mp");

        let data = ReferenceData::new(
            vec![NovelFoodRecord {
                id: Some("7".into()),
                name: Some("Chia seed (EN)".into()),
                common_name: Some("Chiafrö".into()),
                synonyms: None,
                display_name: Some("Chia seed".into()),
                status: Some("Authorised".into()),
                status_desc: Some("<p>Authorised</p>".into()),
                policy_item_code: Some("NF-7".into()),
                category: None,
                description: None,
            }],
            vec![PharmaRecord {
                name: Some("Melatonin".into()),
                synonyms: vec!["N-acetyl-5-methoxytryptamine".into()],
                is_medicine: true,
                comment: None,
            }],
        );

        SnapshotManager::save(&path, &data).await.unwrap();
        assert_eq!(SnapshotManager::load(&path).await.unwrap(), data);

        SnapshotManager::clear(&path).await.unwrap();
        assert!(!path.exists());
        assert!(SnapshotManager::load(&path).await.is_err());
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.mp");
        tokio::fs::write(&path, b"\xc1\xc1garbage").await.unwrap();
        assert!(matches!(
            SnapshotManager::load(&path).await,
            Err(AnalyzerError::SnapshotError(_))
        ));
    }
}
