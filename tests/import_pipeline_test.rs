// ==========================================
// 表格导入流程集成测试
// ==========================================
// 测试目标: xlsx → 表头校验 → 规则校验 → 顺序上传 → 汇总
// ==========================================


use asset_admin::config::ImportTarget;
use asset_admin::domain::{ExistingRecord, ImportRow, ValidationRule};
use asset_admin::importer::{
    asset_category_import_config, department_import_config, department_rules, read_excel_file,
    AssetCategoryImportTarget, DepartmentImportTarget,
};
use asset_admin::{
    i18n, logging, ExcelImportService, ImportConfig, ImportError, ImportStage, MessageLog,
    SelectedFile, Severity, UploadMode, ValidationEngine,
};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use test_helpers::{xlsx_bytes, xlsx_event, FakeAssetCategories, FakeDepartments};

const DEPT_HEADERS: &[&str] = &["Name", "ParentName", "IsGroup"];

fn service() -> (ExcelImportService, Arc<MessageLog>) {
    logging::init_test();
    i18n::set_locale("en");
    let log = Arc::new(MessageLog::new());
    (ExcelImportService::new(log.clone()), log)
}

fn department_config(api: &Arc<FakeDepartments>) -> ImportConfig {
    department_import_config(Arc::new(DepartmentImportTarget::new(api.clone())))
}

#[tokio::test]
async fn test_department_import_with_same_batch_parent() {
    let (service, log) = service();
    let api = Arc::new(FakeDepartments::with_existing(&["Headquarters"]));
    let reloads = Arc::new(AtomicUsize::new(0));
    let counter = reloads.clone();
    let config = department_config(&api).on_loaded(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let event = xlsx_event(
        "departments.xlsx",
        &[
            DEPT_HEADERS,
            &["Finance", "Headquarters", "true"],
            &["Payroll", "Finance", "false"],
            &[" IT ", "", "1"],
        ],
    );
    let result = service.import_excel(event, &config).await;

    assert_eq!(result.stage, ImportStage::Completed);
    assert_eq!((result.total_count, result.success_count, result.fail_count), (3, 3, 0));
    assert_eq!(api.created_names(), vec!["Finance", "Payroll", "IT"]);
    assert!(api.created.lock().unwrap()[2].is_group);
    assert_eq!(reloads.load(Ordering::SeqCst), 1);

    let messages = log.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].severity, Severity::Success);
    assert_eq!(messages[0].summary, "Success");
}

#[tokio::test]
async fn test_header_mismatch_rejects_file() {
    let (service, log) = service();
    let api = Arc::new(FakeDepartments::default());

    let event = xlsx_event(
        "departments.xlsx",
        &[&["ParentName", "Name", "IsGroup"], &["HQ", "IT", "false"]],
    );
    let result = service.import_excel(event, &department_config(&api)).await;

    assert_eq!(result.stage, ImportStage::ReadFailed);
    assert_eq!(result.total_count, 0);
    assert!(api.created_names().is_empty());
    let errors: Vec<_> = log
        .messages()
        .into_iter()
        .filter(|n| n.severity == Severity::Error)
        .collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].detail.contains("Name, ParentName, IsGroup"));
}

#[tokio::test]
async fn test_header_mismatch_returns_no_rows() {
    let file = SelectedFile::new(
        "departments.xlsx",
        xlsx_bytes(&[&["Name", "Parent", "IsGroup"], &["IT", "", "false"]]),
    );
    let headers: Vec<String> = DEPT_HEADERS.iter().map(|h| h.to_string()).collect();

    let result = read_excel_file(file, &headers).await;
    assert!(matches!(result, Err(ImportError::HeaderMismatch { .. })));
}

#[tokio::test]
async fn test_unsupported_extension() {
    let (service, _log) = service();
    let api = Arc::new(FakeDepartments::default());
    let event = asset_admin::FileEvent::single(SelectedFile::new("departments.txt", b"Name".to_vec()));

    let result = service.import_excel(event, &department_config(&api)).await;
    assert_eq!(result.stage, ImportStage::ReadFailed);
}

#[tokio::test]
async fn test_duplicate_against_existing_blocks_whole_batch() {
    let (service, log) = service();
    let api = Arc::new(FakeDepartments::with_existing(&["Finance"]));

    let event = xlsx_event(
        "departments.xlsx",
        &[DEPT_HEADERS, &["Legal", "", "false"], &["Finance", "", "true"]],
    );
    let result = service.import_excel(event, &department_config(&api)).await;

    assert_eq!(result.stage, ImportStage::ValidationFailed);
    assert_eq!(result.fail_count, 2);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].row_index, 3);
    assert_eq!(result.errors[0].field, "Name");
    assert!(api.created_names().is_empty());
    assert_eq!(log.count(Severity::Error), 1);
}

#[tokio::test]
async fn test_padded_duplicates_are_caught_before_upload() {
    let (service, _log) = service();
    let api = Arc::new(FakeDepartments::with_existing(&["HQ"]));

    let event = xlsx_event(
        "departments.xlsx",
        &[DEPT_HEADERS, &["IT", "HQ ", "false"], &["IT ", "HQ", "false"]],
    );
    let result = service.import_excel(event, &department_config(&api)).await;

    assert_eq!(result.stage, ImportStage::ValidationFailed);
    let indexes: Vec<usize> = result.errors.iter().map(|e| e.row_index).collect();
    assert_eq!(indexes, vec![2, 3]);
    assert!(result.errors.iter().all(|e| e.field == "Name"));
    assert!(api.created_names().is_empty());
}

#[tokio::test]
async fn test_server_rejection_is_isolated_per_row() {
    let (service, log) = service();
    let api = Arc::new(FakeDepartments {
        reject: vec!["Legal".to_string()],
        ..Default::default()
    });

    let event = xlsx_event(
        "departments.xlsx",
        &[
            DEPT_HEADERS,
            &["Sales", "", "false"],
            &["Legal", "", "false"],
            &["Support", "", "false"],
        ],
    );
    let result = service.import_excel(event, &department_config(&api)).await;

    assert_eq!((result.success_count, result.fail_count), (2, 1));
    assert!(result.is_balanced());
    assert_eq!(api.created_names(), vec!["Sales", "Legal", "Support"]);
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].row_index, 3);
    assert_eq!(result.warnings[0].message, "Legal rejected");
    assert_eq!(log.count(Severity::Success), 1);
    assert_eq!(log.count(Severity::Warn), 1);
}

#[tokio::test]
async fn test_existing_data_failure_is_fatal() {
    let (service, log) = service();
    let api = Arc::new(FakeDepartments {
        fail_list: true,
        ..Default::default()
    });

    let event = xlsx_event("departments.xlsx", &[DEPT_HEADERS, &["Sales", "", "false"]]);
    let result = service.import_excel(event, &department_config(&api)).await;

    assert_eq!(result.stage, ImportStage::LoadFailed);
    assert_eq!(result.fail_count, result.total_count);
    assert_eq!(result.success_count, 0);
    assert!(api.created_names().is_empty());
    let messages = log.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].detail.contains("database unavailable"));
}

#[tokio::test]
async fn test_blank_rows_are_skipped() {
    let (service, _log) = service();
    let api = Arc::new(FakeDepartments::default());

    let event = xlsx_event(
        "departments.xlsx",
        &[DEPT_HEADERS, &["Sales", "", "false"], &["", "", ""], &["Legal", "", "false"]],
    );
    let result = service.import_excel(event, &department_config(&api)).await;

    assert_eq!(result.total_count, 2);
    assert_eq!(api.created_names(), vec!["Sales", "Legal"]);
}

#[tokio::test]
async fn test_asset_category_import() {
    let (service, _log) = service();
    let api = Arc::new(FakeAssetCategories::with_existing(&["Equipment"]));
    let config = asset_category_import_config(Arc::new(AssetCategoryImportTarget::new(api.clone())));

    let event = xlsx_event(
        "categories.xlsx",
        &[
            &["AssetCategoryName", "Symbol", "ParentName", "IsGroup"],
            &["Laptops", "LAP", "Equipment", "false"],
            &["Desks", "", "Equipment", "false"],
        ],
    );
    let result = service.import_excel(event, &config).await;

    assert_eq!(result.success_count, 2);
    let created = api.created.lock().unwrap();
    assert_eq!(created[0].symbol.as_deref(), Some("LAP"));
    assert_eq!(created[1].symbol, None);
    assert_eq!(created[1].parent_name, "Equipment");
}

// ==========================================
// 整批模式
// ==========================================
struct BatchTarget {
    batches: Mutex<Vec<usize>>,
    fail: bool,
}

#[async_trait]
impl ImportTarget for BatchTarget {
    async fn create_entity(&self, _row: &ImportRow) -> Result<(), ImportError> {
        panic!("per-row upload must not be used in batch mode");
    }

    fn upload_mode(&self) -> UploadMode {
        UploadMode::Batch
    }

    async fn process_data(&self, rows: &[ImportRow]) -> Result<(), ImportError> {
        self.batches.lock().unwrap().push(rows.len());
        if self.fail {
            return Err(ImportError::BatchProcessError("bulk endpoint down".to_string()));
        }
        Ok(())
    }
}

#[tokio::test]
async fn test_batch_mode() {
    let (service, log) = service();
    for fail in [false, true] {
        log.drain();
        let target = Arc::new(BatchTarget {
            batches: Mutex::new(Vec::new()),
            fail,
        });
        let config = ImportConfig::new("Department", DEPT_HEADERS, target.clone());
        let event = xlsx_event(
            "departments.xlsx",
            &[DEPT_HEADERS, &["A", "", "true"], &["B", "A", "false"]],
        );

        let result = service.import_excel(event, &config).await;

        assert_eq!(*target.batches.lock().unwrap(), vec![2]);
        assert!(result.is_balanced());
        if fail {
            assert_eq!(result.fail_count, 2);
            assert_eq!(result.errors.len(), 1);
            assert!(result.warnings.is_empty());
            assert_eq!(log.count(Severity::Error), 1);
        } else {
            assert_eq!(result.success_count, 2);
            assert_eq!(log.count(Severity::Success), 1);
        }
    }
}

// ==========================================
// 上级引用: 通用规则 vs 部门规则
// ==========================================
#[test]
fn test_relation_rules_per_call_site() {
    let rows = vec![
        ImportRow::from([("Name", "Root"), ("ParentName", ""), ("IsGroup", "true")]),
        ImportRow::from([("Name", "Child"), ("ParentName", "Root"), ("IsGroup", "false")]),
    ];

    let generic = vec![
        ValidationRule::new("Name").required().unique(),
        ValidationRule::new("ParentName").relation("name"),
    ];
    let result = ValidationEngine::validate_all::<_, ExistingRecord>(&rows, &[], &generic);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].row_index, 3);

    let result = ValidationEngine::validate_all::<_, ExistingRecord>(&rows, &[], &department_rules());
    assert!(result.is_valid);
}
