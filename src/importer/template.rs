// ==========================================
// 资产分类 / 部门管理 - 导入模板导出
// ==========================================
// 输出: 单工作表 "Template"（首行表头 + 示例行）
// ==========================================

use crate::domain::types::EntityKind;
use crate::importer::field_mapper::{ASSET_CATEGORY_HEADERS, DEPARTMENT_HEADERS};
use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;
use tracing::info;

pub const TEMPLATE_SHEET: &str = "Template";

/// 模板表头与示例行
pub fn template_rows(kind: EntityKind) -> Vec<Vec<&'static str>> {
    match kind {
        EntityKind::Department => vec![
            DEPARTMENT_HEADERS.to_vec(),
            vec!["Example Department", "", "true"],
            vec!["Sub Department", "Example Department", "false"],
        ],
        EntityKind::AssetCategory => vec![
            ASSET_CATEGORY_HEADERS.to_vec(),
            vec!["Example Category", "EXC", "", "true"],
            vec!["Sub Category", "SUB", "Example Category", "false"],
        ],
    }
}

/// 默认下载文件名
pub fn template_file_name(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Department => "DepartmentTemplate.xlsx",
        EntityKind::AssetCategory => "AssetCategoryTemplate.xlsx",
    }
}

/// 生成模板工作簿（xlsx 字节）
pub fn build_template(kind: EntityKind) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(TEMPLATE_SHEET)?;

    for (row, cells) in template_rows(kind).iter().enumerate() {
        for (col, value) in cells.iter().enumerate() {
            let (row, col) = (row as u32, col as u16);
            if row == 0 {
                worksheet.write_string_with_format(row, col, *value, &header_format)?;
            } else {
                worksheet.write_string(row, col, *value)?;
            }
        }
    }

    workbook
        .save_to_buffer()
        .context("Failed to generate XLSX template")
}

/// 写出模板文件
pub async fn write_template(kind: EntityKind, path: &Path) -> Result<()> {
    let bytes = build_template(kind)?;
    tokio::fs::write(path, &bytes)
        .await
        .with_context(|| format!("Failed to write template to {}", path.display()))?;

    info!(entity = %kind, path = %path.display(), "导入模板已生成");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::file_parser::{ExcelParser, FileParser};

    #[test]
    fn test_department_template_roundtrips_through_reader() {
        let bytes = build_template(EntityKind::Department).unwrap();
        let grid = ExcelParser.parse_to_grid(&bytes).unwrap();

        assert_eq!(grid[0], vec!["Name", "ParentName", "IsGroup"]);
        assert_eq!(grid[2][1], "Example Department");
    }

    #[test]
    fn test_rows_match_header_width() {
        for kind in [EntityKind::Department, EntityKind::AssetCategory] {
            let rows = template_rows(kind);
            assert!(rows.iter().all(|r| r.len() == rows[0].len()));
        }
    }

    #[tokio::test]
    async fn test_write_template_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(template_file_name(EntityKind::AssetCategory));

        write_template(EntityKind::AssetCategory, &path).await.unwrap();
        assert!(path.exists());
    }
}
