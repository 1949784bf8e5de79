// ==========================================
// 资产分类 / 部门管理 - 导入层
// ==========================================
// 职责: 表格读取 → 规则校验 → 顺序上传
// 支持: xlsx / xlsm / xls / xlsb / ods / csv
// ==========================================

// 模块声明
pub mod entity_import;
pub mod error;
pub mod excel_importer;
pub mod field_mapper;
pub mod file_parser;
pub mod template;
pub mod validator;

// 重导出核心类型
pub use entity_import::{
    asset_category_import_config, asset_category_rules, department_import_config,
    department_rules, AssetCategoryImportTarget, DepartmentImportTarget,
};
pub use error::ImportError;
pub use excel_importer::{user_message, ExcelImportService};
pub use field_mapper::{FieldMapper, ASSET_CATEGORY_HEADERS, DEPARTMENT_HEADERS};
pub use file_parser::{
    read_excel_file, CsvParser, ExcelParser, FileEvent, FileParser, SelectedFile,
    UniversalFileParser,
};
pub use template::{build_template, template_file_name, write_template};
pub use validator::{parse_bool_flag, ValidationEngine, HEADER_ROW_OFFSET};
