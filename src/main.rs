// ==========================================
// 资产分类 / 部门管理 - 命令行入口
// ==========================================
// 子命令: import / template / tree / list / create / update / delete
// 配置: --config 指定文件,否则 <config_dir>/asset-admin/config.json
// ==========================================

use anyhow::{bail, Context, Result};
use asset_admin::api::{
    ApiError, ApiResult, AssetCategoriesApi, AssetCategoriesClient, DepartmentsApi,
    DepartmentsClient, PageQuery, RestClient,
};
use asset_admin::domain::{
    CreateAssetCategoryCommand, CreateDepartmentCommand, EntityKind, UpdateAssetCategoryCommand,
};
use asset_admin::importer::{
    asset_category_import_config, department_import_config, template_file_name, write_template,
    AssetCategoryImportTarget, DepartmentImportTarget,
};
use asset_admin::listing::{self, ListEntity, SortField};
use asset_admin::notify::ToastService;
use asset_admin::tree::{build_hierarchy, TreeEntity, TreeMapper, TreeView};
use asset_admin::{
    i18n, logging, AppConfig, ConfigManager, ExcelImportService, FileEvent, Notification, Notifier,
    SelectedFile, Severity, SortOrder,
};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "asset-admin")]
#[command(about = "Asset category and department administration", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Import a spreadsheet (xlsx/xls/ods/csv)
    Import(ImportArgs),
    /// Write an import template
    Template(TemplateArgs),
    /// Print the hierarchy as a tree
    Tree(TreeArgs),
    /// Print a filtered, sorted flat list
    List(ListArgs),
    /// Create a department or asset category
    Create(CreateArgs),
    /// Update an asset category
    Update(UpdateArgs),
    /// Delete an asset category
    Delete(DeleteArgs),
}

#[derive(Debug, Args)]
struct ImportArgs {
    /// department | asset-category
    entity: EntityKind,
    file: PathBuf,
    /// Print the import result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct TemplateArgs {
    entity: EntityKind,
    /// Output file (default: DepartmentTemplate.xlsx / AssetCategoryTemplate.xlsx)
    out: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct TreeArgs {
    entity: EntityKind,
    #[arg(short, long)]
    search: Option<String>,
    #[arg(long)]
    collapse: bool,
    #[arg(long)]
    can_select_group: bool,
    /// Build the tree from the flat list endpoint
    #[arg(long)]
    flat: bool,
}

#[derive(Debug, Args)]
struct ListArgs {
    entity: EntityKind,
    #[arg(short, long)]
    filter: Option<String>,
    /// name | parentDepartment | isGroup
    #[arg(long)]
    sort: Option<SortField>,
    #[arg(long)]
    desc: bool,
    /// Server-side page (asset categories only)
    #[arg(long)]
    page: Option<u32>,
}

#[derive(Debug, Args)]
struct CreateArgs {
    entity: EntityKind,
    name: String,
    #[arg(long)]
    parent: Option<String>,
    #[arg(long)]
    group: bool,
    /// Asset categories only
    #[arg(long)]
    symbol: Option<String>,
}

#[derive(Debug, Args)]
struct UpdateArgs {
    /// Asset category name (key)
    name: String,
    #[arg(long)]
    display_name: Option<String>,
    #[arg(long)]
    symbol: Option<String>,
    #[arg(long)]
    parent: Option<String>,
    #[arg(long)]
    group: Option<bool>,
}

#[derive(Debug, Args)]
struct DeleteArgs {
    /// Asset category name (key)
    name: String,
}

/// 提示输出到终端
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, n: Notification) {
        match n.severity {
            Severity::Error | Severity::Warn => eprintln!("[{}] {}", n.summary, n.detail),
            Severity::Success | Severity::Info => println!("[{}] {}", n.summary, n.detail),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.json_logs);

    let manager = match &cli.config {
        Some(path) => ConfigManager::new(path),
        None => ConfigManager::with_default_path(),
    };
    let config = manager
        .load()
        .with_context(|| format!("loading {}", manager.path().display()))?;
    i18n::set_locale(&config.locale);

    tracing::info!(version = asset_admin::VERSION, "{} 启动", asset_admin::APP_NAME);

    match cli.command {
        Commands::Import(args) => run_import(&config, args).await,
        Commands::Template(args) => run_template(args).await,
        Commands::Tree(args) => run_tree(&config, args).await,
        Commands::List(args) => run_list(&config, args).await,
        Commands::Create(args) => run_create(&config, args).await,
        Commands::Update(args) => run_update(&config, args).await,
        Commands::Delete(args) => run_delete(&config, args).await,
    }
}

async fn run_import(config: &AppConfig, args: ImportArgs) -> Result<()> {
    let rest = RestClient::from_config(config)?;
    let import_config = match args.entity {
        EntityKind::Department => {
            department_import_config(Arc::new(DepartmentImportTarget::new(DepartmentsClient::new(rest))))
        }
        EntityKind::AssetCategory => asset_category_import_config(Arc::new(
            AssetCategoryImportTarget::new(AssetCategoriesClient::new(rest)),
        )),
    };

    let file = SelectedFile::from_path(&args.file).await?;
    let service = ExcelImportService::new(Arc::new(ConsoleNotifier))
        .with_notification_life(config.notification_life_ms);
    let result = service.import_excel(FileEvent::single(file), &import_config).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!(
            "total={} success={} failed={} stage={} ({} ms)",
            result.total_count, result.success_count, result.fail_count, result.stage, result.duration_ms
        );
    }

    if result.fail_count > 0 {
        bail!("{} row(s) failed", result.fail_count);
    }
    Ok(())
}

async fn run_template(args: TemplateArgs) -> Result<()> {
    let out = args
        .out
        .unwrap_or_else(|| PathBuf::from(template_file_name(args.entity)));
    match write_template(args.entity, &out).await {
        Ok(()) => {
            ConsoleNotifier.notify(Notification::success(i18n::t("template.downloaded")));
            Ok(())
        }
        Err(e) => {
            ConsoleNotifier.notify(Notification::error(i18n::t("template.failed")));
            Err(e)
        }
    }
}

async fn run_tree(config: &AppConfig, args: TreeArgs) -> Result<()> {
    let rest = RestClient::from_config(config)?;
    let mapper = TreeMapper::new(args.can_select_group);

    let output = match (args.entity, args.flat) {
        (EntityKind::Department, false) => {
            let data = load(DepartmentsClient::new(rest).tree().await, "load.department_tree_failed")?;
            render_tree(mapper, data, &args)
        }
        (EntityKind::Department, true) => {
            let data = load(DepartmentsClient::new(rest).list().await, "load.departments_failed")?;
            render_tree(mapper, build_hierarchy(&data), &args)
        }
        (EntityKind::AssetCategory, false) => {
            let data = load(AssetCategoriesClient::new(rest).tree().await, "load.categories_failed")?;
            render_tree(mapper, data, &args)
        }
        (EntityKind::AssetCategory, true) => {
            let data = load(AssetCategoriesClient::new(rest).list().await, "load.categories_failed")?;
            render_tree(mapper, build_hierarchy(&data), &args)
        }
    };

    print!("{}", output);
    Ok(())
}

fn render_tree<T: TreeEntity>(mapper: TreeMapper, data: Vec<T>, args: &TreeArgs) -> String {
    let mut view = TreeView::new(mapper);
    view.load(data);
    if let Some(search) = &args.search {
        view.set_search(search);
    }
    if args.collapse {
        view.collapse_all();
    }
    view.render()
}

async fn run_list(config: &AppConfig, args: ListArgs) -> Result<()> {
    let rest = RestClient::from_config(config)?;
    let sort = args.sort.map(|field| {
        let order = if args.desc { SortOrder::Descending } else { SortOrder::Ascending };
        (field, order)
    });
    let filter = args.filter.as_deref().unwrap_or_default();

    match args.entity {
        EntityKind::Department => {
            let data = load(DepartmentsClient::new(rest).list().await, "load.departments_failed")?;
            print_rows(&listing::apply(&data, filter, sort));
        }
        EntityKind::AssetCategory => {
            let client = AssetCategoriesClient::new(rest);
            let data = match args.page {
                Some(page_number) => {
                    let query = PageQuery {
                        page_number,
                        page_size: config.page_size,
                        search_term: args.filter.clone(),
                    };
                    let page = load(client.paginated(&query).await, "load.categories_failed")?;
                    println!(
                        "page {}/{} ({} total)",
                        page.page_number, page.total_pages, page.total_count
                    );
                    page.items
                }
                None => load(client.list().await, "load.categories_failed")?,
            };
            print_rows(&listing::apply(&data, filter, sort));
        }
    }
    Ok(())
}

async fn run_create(config: &AppConfig, args: CreateArgs) -> Result<()> {
    let rest = RestClient::from_config(config)?;
    let parent_name = args.parent.unwrap_or_default();

    let result = match args.entity {
        EntityKind::Department => {
            let command = CreateDepartmentCommand {
                name: args.name,
                parent_name,
                is_group: args.group,
            };
            DepartmentsClient::new(rest).create(&command).await
        }
        EntityKind::AssetCategory => {
            let command = CreateAssetCategoryCommand {
                asset_category_name: args.name,
                symbol: args.symbol,
                parent_name,
                is_group: args.group,
            };
            AssetCategoriesClient::new(rest).create(&command).await.map(|_| ())
        }
    };
    report(result, "crud.saved", "crud.save_failed")
}

async fn run_update(config: &AppConfig, args: UpdateArgs) -> Result<()> {
    let client = AssetCategoriesClient::new(RestClient::from_config(config)?);
    let current = load(client.get(&args.name).await, "load.categories_failed")?;

    let mut command = UpdateAssetCategoryCommand::from(&current);
    if let Some(display_name) = args.display_name {
        command.asset_category_name = Some(display_name);
    }
    if let Some(symbol) = args.symbol {
        command.symbol = Some(symbol);
    }
    if let Some(parent) = args.parent {
        command.parent_name = Some(parent);
    }
    if let Some(group) = args.group {
        command.is_group = group;
    }

    report(client.update(&command).await, "crud.saved", "crud.save_failed")
}

async fn run_delete(config: &AppConfig, args: DeleteArgs) -> Result<()> {
    let client = AssetCategoriesClient::new(RestClient::from_config(config)?);
    report(client.delete(&args.name).await, "crud.deleted", "crud.delete_failed")
}

/// 输出写操作结果（缺失必填字段单独提示）
fn report(result: ApiResult<()>, ok_key: &str, failed_key: &str) -> Result<()> {
    match result {
        Ok(()) => {
            ConsoleNotifier.notify(Notification::success(i18n::t(ok_key)));
            Ok(())
        }
        Err(ApiError::InvalidInput(field)) => {
            ConsoleNotifier.notify(Notification::warn(i18n::t("crud.required_fields")));
            bail!("missing required field: {}", field)
        }
        Err(e) => {
            ToastService::new(ConsoleNotifier).show_server_error(&i18n::t(failed_key), &e);
            Err(e.into())
        }
    }
}

/// 加载失败时输出本地化提示与服务端消息
fn load<T>(result: ApiResult<T>, message_key: &str) -> Result<T> {
    result.map_err(|e| {
        ToastService::new(ConsoleNotifier).show_server_error(&i18n::t(message_key), &e);
        anyhow::Error::new(e)
    })
}

fn print_rows<T: ListEntity>(rows: &[T]) {
    for row in rows {
        println!(
            "{:<32} {:<32} {}",
            row.name(),
            row.parent().unwrap_or("-"),
            if row.is_group() { "group" } else { "" }
        );
    }
}
