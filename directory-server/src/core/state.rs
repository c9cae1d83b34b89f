use std::sync::Arc;

use crate::core::{Config, Result, ServerError, StorageBackend};
use crate::db::{self, RecordStore, RedbRecordStore};
use crate::services::{CompensationHistory, EmployeeDirectory, ReportingStructureCalculator};
use crate::utils::error::set_support_contact;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 所有服务共享同一个 [`RecordStore`]。使用 Arc 实现浅拷贝，
/// 每个请求克隆一次的成本极低。
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 配置项 (不可变) |
/// | store | 员工记录存储 |
/// | directory | 员工增改查 |
/// | reporting | 汇报结构计算 |
/// | compensation | 薪酬历史 |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub store: Arc<dyn RecordStore>,
    pub directory: EmployeeDirectory,
    pub reporting: ReportingStructureCalculator,
    pub compensation: CompensationHistory,
}

impl ServerState {
    /// 基于已有存储构造状态 (测试中常用)
    pub fn with_store(config: Config, store: Arc<dyn RecordStore>) -> Self {
        let directory = EmployeeDirectory::new(store.clone());
        Self {
            reporting: ReportingStructureCalculator::new(directory.clone()),
            compensation: CompensationHistory::new(directory.clone()),
            directory,
            store,
            config,
        }
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 内部错误联系方式
    /// 2. 存储 (文件或内存)
    /// 3. 空库时导入种子数据
    pub fn initialize(config: &Config) -> Result<Self> {
        set_support_contact(config.support_contact.clone());

        let store: Arc<dyn RecordStore> = match config.storage_backend {
            StorageBackend::File => {
                config.ensure_database_dir()?;
                tracing::info!(path = %config.database_path.display(), "Opening record store");
                Arc::new(RedbRecordStore::open(&config.database_path)?)
            }
            StorageBackend::Memory => {
                tracing::info!("Using in-memory record store");
                Arc::new(RedbRecordStore::open_in_memory()?)
            }
        };

        if let Some(seed_file) = &config.seed_file {
            db::seed_if_empty(store.as_ref(), seed_file).map_err(ServerError::Seed)?;
        }

        let count = store.count()?;
        tracing::info!(employees = count, "Record store ready");

        Ok(Self::with_store(config.clone(), store))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_in_memory_with_seed() {
        let mut config = Config::in_memory();
        config.seed_file = Some(
            std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("seed/employee_database.json"),
        );

        let state = ServerState::initialize(&config).unwrap();
        assert_eq!(state.store.count().unwrap(), 5);

        let john = state
            .reporting
            .find_reporting_structure("16a596ae-edd3-4847-99fe-c4518e82c86f")
            .unwrap();
        assert_eq!(john.number_of_reports, Some(4));
    }

    #[test]
    fn test_initialize_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::in_memory();
        config.storage_backend = StorageBackend::File;
        config.database_path = dir.path().join("nested/directory.redb");

        let state = ServerState::initialize(&config).unwrap();
        assert_eq!(state.store.count().unwrap(), 0);
        assert!(config.database_path.exists());
    }
}
