// ==========================================
// 资产分类 / 部门管理 - 表格导入编排器
// ==========================================
// 流程: 选择文件 → 读取 → 拉取已有数据 → 校验 → 顺序上传 → 汇总提示 → 刷新
// 状态: Idle → Reading → (ReadFailed | Validating)
//       → (LoadFailed | ValidationFailed | Uploading) → Completed
// 拉取已有数据发生在 Validating 阶段,失败即 LoadFailed
// 红线: 不向调用方抛出错误；全部失败收敛到 ImportResult 或提示消息
// ==========================================

use crate::config::ImportConfig;
use crate::domain::import::{ImportResult, ImportRow, ImportWarning, ValidationError};
use crate::domain::types::{ImportStage, UploadMode};
use crate::i18n::{t, t_with_args};
use crate::importer::error::ImportError;
use crate::importer::file_parser::{read_excel_file, FileEvent};
use crate::importer::validator::{ValidationEngine, HEADER_ROW_OFFSET};
use crate::notify::{Notification, Notifier};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

/// 把导入错误转换为面向用户的本地化文本
pub fn user_message(err: &ImportError) -> String {
    match err {
        ImportError::NoFileSelected => t("import.no_file"),
        ImportError::HeaderMismatch { expected } => {
            t_with_args("import.header_mismatch", &[("headers", &expected.join(", "))])
        }
        ImportError::ParseError(_)
        | ImportError::FileReadError(_)
        | ImportError::UnsupportedFormat(_) => {
            t_with_args("import.parse_failed", &[("reason", &err.to_string())])
        }
        ImportError::ExistingDataError(reason) => {
            t_with_args("import.existing_data_failed", &[("reason", reason)])
        }
        ImportError::BatchProcessError(_) => t("import.batch_failed"),
        ImportError::ValidationFailure { errors } => {
            t_with_args("import.validation_failed", &[("count", &errors.len().to_string())])
        }
        ImportError::RowUploadFailure { .. } | ImportError::Other(_) => t("import.failed"),
    }
}

// ==========================================
// ExcelImportService
// ==========================================
pub struct ExcelImportService {
    notifier: Arc<dyn Notifier>,
    life_ms: u64,
}

impl ExcelImportService {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            notifier,
            life_ms: crate::notify::DEFAULT_LIFE_MS,
        }
    }

    /// 提示显示时长（来自 AppConfig.notification_life_ms）
    pub fn with_notification_life(mut self, life_ms: u64) -> Self {
        self.life_ms = life_ms;
        self
    }

    /// 执行一次表格导入
    ///
    /// # 参数
    /// - event: 文件选择事件（仅取第一个文件）
    /// - config: 导入配置（表头 / 规则 / 数据源 / 刷新回调）
    ///
    /// # 返回
    /// - ImportResult: 总是返回；duration_ms 在任何分支都会记录
    ///
    /// # 说明
    /// - 校验阶段全有或全无：任一行不合法则不上传任何行
    /// - 上传阶段逐行顺序执行,单行失败不影响其余行
    #[instrument(skip(self, event, config), fields(entity = %config.entity_name, batch_id))]
    pub async fn import_excel(&self, event: FileEvent, config: &ImportConfig) -> ImportResult {
        let start_time = Instant::now();
        let mut result = ImportResult::new(Uuid::new_v4().to_string());
        tracing::Span::current().record("batch_id", result.batch_id.as_str());

        self.run(event, config, &mut result).await;

        result.duration_ms = start_time.elapsed().as_millis() as u64;
        info!(
            stage = %result.stage,
            total = result.total_count,
            success = result.success_count,
            failed = result.fail_count,
            elapsed_ms = result.duration_ms,
            "导入结束"
        );
        result
    }

    async fn run(&self, event: FileEvent, config: &ImportConfig, result: &mut ImportResult) {
        // === 步骤 1: 取文件 ===
        let Some(file) = event.into_first() else {
            self.fail_fatal(result, ImportStage::ReadFailed, &ImportError::NoFileSelected);
            return;
        };

        // === 步骤 2: 读取与表头校验 ===
        result.stage = ImportStage::Reading;
        debug!(file = %file.name, "步骤 2: 读取文件");
        let rows = match read_excel_file(file, &config.expected_headers).await {
            Ok(rows) => rows,
            Err(e) => {
                self.fail_fatal(result, ImportStage::ReadFailed, &e);
                return;
            }
        };
        result.total_count = rows.len();
        info!(total_rows = rows.len(), "文件解析完成");

        // === 步骤 3: 空文件 ===
        if rows.is_empty() {
            self.notify(Notification::warn(t("import.no_data")));
            result.stage = ImportStage::Completed;
            return;
        }

        // === 步骤 4: 拉取已有数据 ===
        result.stage = ImportStage::Validating;
        let existing = match config.target.get_existing_data().await {
            Ok(existing) => existing,
            Err(e) => {
                let e = match e {
                    ImportError::ExistingDataError(_) => e,
                    other => ImportError::ExistingDataError(other.to_string()),
                };
                self.fail_fatal(result, ImportStage::LoadFailed, &e);
                return;
            }
        };
        debug!(existing = existing.len(), "已有数据加载完成");

        // === 步骤 5: 校验（全有或全无）===
        let validation = ValidationEngine::validate_all(&rows, &existing, &config.rules);
        if !validation.is_valid {
            warn!(errors = validation.errors.len(), "校验未通过，终止上传");
            for err in &validation.errors {
                let row = err.row_index.to_string();
                self.notify(Notification::error(t_with_args(
                    "import.row_error",
                    &[("row", &row), ("message", &err.message)],
                )));
            }
            result.fail_count = result.total_count;
            result.errors = validation.errors;
            result.stage = ImportStage::ValidationFailed;
            return;
        }

        // === 步骤 6: 上传 ===
        result.stage = ImportStage::Uploading;
        match config.target.upload_mode() {
            UploadMode::PerRow => self.upload_rows(&rows, config, result).await,
            UploadMode::Batch => self.upload_batch(&rows, config, result).await,
        }

        // === 步骤 7: 汇总提示 ===
        if result.success_count > 0 {
            self.notify(Notification::success(t_with_args(
                "import.success",
                &[
                    ("success", &result.success_count.to_string()),
                    ("total", &result.total_count.to_string()),
                ],
            )));
        }
        if result.fail_count > 0 {
            self.notify(Notification::warn(t_with_args(
                "import.partial_failure",
                &[("count", &result.fail_count.to_string())],
            )));
        }

        // === 步骤 8: 刷新调用方视图 ===
        if let Some(reload) = &config.load_data_method {
            reload();
        }

        result.stage = ImportStage::Completed;
    }

    /// 逐行顺序上传（并发度 1）
    async fn upload_rows(&self, rows: &[ImportRow], config: &ImportConfig, result: &mut ImportResult) {
        for (idx, row) in rows.iter().enumerate() {
            match config.target.create_entity(row).await {
                Ok(()) => result.success_count += 1,
                Err(e) => {
                    let row_index = idx + HEADER_ROW_OFFSET;
                    warn!(row = row_index, error = %e, "行上传失败");
                    // 数据源不知道行号,由这里补齐
                    let message = match e {
                        ImportError::RowUploadFailure { message, .. } => message,
                        other => other.to_string(),
                    };
                    result.fail_count += 1;
                    result.warnings.push(ImportWarning { row_index, message });
                }
            }
        }
    }

    /// 整批交给数据源处理
    async fn upload_batch(&self, rows: &[ImportRow], config: &ImportConfig, result: &mut ImportResult) {
        match config.target.process_data(rows).await {
            Ok(()) => result.success_count = result.total_count,
            Err(e) => {
                error!(error = %e, "整批处理失败");
                result.fail_count = result.total_count;
                result.errors.push(ValidationError {
                    row_index: 0,
                    field: String::new(),
                    message: e.to_string(),
                });
                self.notify(Notification::error(user_message(&e)));
            }
        }
    }

    fn fail_fatal(&self, result: &mut ImportResult, stage: ImportStage, err: &ImportError) {
        error!(error = %err, stage = %stage, "导入终止");
        result.fail_count = result.total_count;
        result.success_count = 0;
        result.stage = stage;
        self.notify(Notification::error(user_message(err)));
    }

    fn notify(&self, notification: Notification) {
        self.notifier.notify(notification.with_life(self.life_ms));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ImportTarget;
    use crate::domain::import::{ExistingRecord, ValidationRule};
    use crate::importer::file_parser::SelectedFile;
    use crate::notify::{MessageLog, Severity};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingTarget {
        existing: Vec<ExistingRecord>,
        reject: Vec<String>,
        created: Mutex<Vec<String>>,
        fetch_delay_ms: u64,
        fail_fetch: bool,
    }

    #[async_trait]
    impl ImportTarget for RecordingTarget {
        async fn get_existing_data(&self) -> Result<Vec<ExistingRecord>, ImportError> {
            if self.fetch_delay_ms > 0 {
                tokio::time::sleep(std::time::Duration::from_millis(self.fetch_delay_ms)).await;
            }
            if self.fail_fetch {
                return Err(ImportError::ExistingDataError("timeout".to_string()));
            }
            Ok(self.existing.clone())
        }

        async fn create_entity(&self, row: &ImportRow) -> Result<(), ImportError> {
            let name = row.get("Name").unwrap_or_default().to_string();
            self.created.lock().unwrap().push(name.clone());
            if self.reject.contains(&name) {
                return Err(ImportError::RowUploadFailure {
                    row: 0,
                    message: "rejected".to_string(),
                });
            }
            Ok(())
        }
    }

    fn csv_event(body: &str) -> FileEvent {
        FileEvent::single(SelectedFile::new("departments.csv", body.as_bytes().to_vec()))
    }

    fn config(target: Arc<RecordingTarget>) -> ImportConfig {
        ImportConfig::new("Department", &["Name", "ParentName", "IsGroup"], target)
    }

    #[tokio::test]
    async fn test_no_file_selected() {
        let log = Arc::new(MessageLog::new());
        let service = ExcelImportService::new(log.clone());
        let target = Arc::new(RecordingTarget::default());

        let result = service.import_excel(FileEvent::empty(), &config(target)).await;

        assert_eq!(result.total_count, 0);
        assert_eq!(result.stage, ImportStage::ReadFailed);
        assert_eq!(log.count(Severity::Error), 1);
    }

    #[tokio::test]
    async fn test_header_only_file_imports_nothing() {
        let log = Arc::new(MessageLog::new());
        let service = ExcelImportService::new(log.clone());
        let target = Arc::new(RecordingTarget::default());

        let result = service
            .import_excel(csv_event("Name,ParentName,IsGroup\n"), &config(target.clone()))
            .await;

        assert_eq!((result.total_count, result.success_count, result.fail_count), (0, 0, 0));
        assert!(target.created.lock().unwrap().is_empty());
        assert_eq!(log.count(Severity::Warn), 1);
    }

    #[tokio::test]
    async fn test_partial_upload_failure_attempts_every_row() {
        let log = Arc::new(MessageLog::new());
        let service = ExcelImportService::new(log.clone());
        let target = Arc::new(RecordingTarget {
            reject: vec!["B".to_string(), "D".to_string()],
            ..Default::default()
        });
        let reloads = Arc::new(AtomicUsize::new(0));
        let counter = reloads.clone();
        let cfg = config(target.clone()).on_loaded(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let result = service
            .import_excel(csv_event("Name,ParentName,IsGroup\nA,,\nB,,\nC,,\nD,,\n"), &cfg)
            .await;

        assert_eq!(result.total_count, 4);
        assert_eq!(result.success_count, 2);
        assert_eq!(result.fail_count, 2);
        assert!(result.is_balanced());
        assert_eq!(*target.created.lock().unwrap(), vec!["A", "B", "C", "D"]);
        assert_eq!(result.warnings.iter().map(|w| w.row_index).collect::<Vec<_>>(), vec![3, 5]);
        assert_eq!(reloads.load(Ordering::SeqCst), 1);
        assert_eq!(log.count(Severity::Success), 1);
        assert_eq!(log.count(Severity::Warn), 1);
    }

    #[tokio::test]
    async fn test_validation_failure_blocks_upload() {
        let log = Arc::new(MessageLog::new());
        let service = ExcelImportService::new(log.clone());
        let target = Arc::new(RecordingTarget {
            existing: vec![ExistingRecord::default().with("name", "A")],
            ..Default::default()
        });
        let cfg = config(target.clone())
            .with_rules(vec![ValidationRule::new("Name").required().unique().compare_existing("name")]);

        let result = service
            .import_excel(csv_event("Name,ParentName,IsGroup\nA,,\nB,,\n,,true\n"), &cfg)
            .await;

        assert_eq!(result.stage, ImportStage::ValidationFailed);
        assert_eq!(result.fail_count, 3);
        assert_eq!(result.success_count, 0);
        assert_eq!(result.errors.len(), 2);
        assert!(target.created.lock().unwrap().is_empty());
        assert_eq!(log.count(Severity::Error), 2);
    }

    #[tokio::test]
    async fn test_duration_recorded_on_fatal_paths() {
        let service = ExcelImportService::new(Arc::new(MessageLog::new()));

        // 拉取已有数据失败
        let target = Arc::new(RecordingTarget {
            fetch_delay_ms: 20,
            fail_fetch: true,
            ..Default::default()
        });
        let result = service
            .import_excel(csv_event("Name,ParentName,IsGroup
A,,
"), &config(target.clone()))
            .await;
        assert_eq!(result.stage, ImportStage::LoadFailed);
        assert_eq!(result.fail_count, 1);
        assert!(result.duration_ms >= 20);
        assert!(target.created.lock().unwrap().is_empty());

        // 校验失败
        let target = Arc::new(RecordingTarget {
            fetch_delay_ms: 20,
            ..Default::default()
        });
        let cfg = config(target).with_rules(vec![ValidationRule::new("Name").required()]);
        let result = service
            .import_excel(csv_event("Name,ParentName,IsGroup
,,true
"), &cfg)
            .await;
        assert_eq!(result.stage, ImportStage::ValidationFailed);
        assert!(result.duration_ms >= 20);
    }

    #[tokio::test]
    async fn test_batch_failure_is_recorded_as_error() {
        struct FailingBatch;

        #[async_trait]
        impl ImportTarget for FailingBatch {
            async fn create_entity(&self, _row: &ImportRow) -> Result<(), ImportError> {
                Ok(())
            }

            fn upload_mode(&self) -> UploadMode {
                UploadMode::Batch
            }

            async fn process_data(&self, _rows: &[ImportRow]) -> Result<(), ImportError> {
                Err(ImportError::BatchProcessError("down".to_string()))
            }
        }

        let service = ExcelImportService::new(Arc::new(MessageLog::new()));
        let cfg = ImportConfig::new("Department", &["Name", "ParentName", "IsGroup"], Arc::new(FailingBatch));

        let result = service
            .import_excel(csv_event("Name,ParentName,IsGroup
A,,
"), &cfg)
            .await;

        assert_eq!(result.fail_count, 1);
        assert!(result.warnings.is_empty());
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].row_index, 0);
        assert!(result.errors[0].message.contains("down"));
    }
}
