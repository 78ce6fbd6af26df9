//! 人情记录 CLI
//!
//! 基于 SQLite 本地存储，对记录做增删改查并展示关系平衡分

use anyhow::Result;
use clap::{Args as ClapArgs, Parser, Subcommand};
use favor_ledger_core::favor::{
    count_by_status, filter_by_status, FavorDraft, FavorPatch, FavorRecord,
    FavorStatus, FavorStore, FavorStoreConfig, StatusFilter,
};
use favor_ledger_core::favor::models::{DEFAULT_DB_URL, DEFAULT_STORAGE_KEY};
use tracing::{info, warn};

/// 人情记录 CLI
#[derive(Parser, Debug)]
#[command(name = "favor-cli")]
#[command(about = "人情记录 CLI - 记录与联系人之间的互助，查看关系平衡分", long_about = None)]
struct Args {
    /// 数据库路径或 sqlite URL
    #[arg(long, default_value = DEFAULT_DB_URL)]
    db: String,

    /// 存储键
    #[arg(long, default_value = DEFAULT_STORAGE_KEY)]
    key: String,

    /// 日志级别（默认: warn,favor_ledger_core=info）
    #[arg(long, default_value = "warn,favor_ledger_core=info")]
    log_level: String,

    /// 额外把日志写入文件（追加模式）
    #[arg(long)]
    log_file: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 列出记录
    List {
        /// all / pending / completed / cancelled
        #[arg(short, long, default_value = "all")]
        status: StatusFilter,
    },
    /// 查看单条记录
    Show { id: String },
    /// 新增记录
    Add(AddArgs),
    /// 编辑记录（只修改给出的字段）
    Edit(EditArgs),
    /// 删除记录
    Delete { id: String },
    /// 显示平衡分和提示
    Dashboard,
}

#[derive(ClapArgs, Debug)]
struct AddArgs {
    #[arg(short, long)]
    contact: String,
    #[arg(short, long)]
    description: String,
    /// YYYY-MM-DD，默认当天
    #[arg(long)]
    date: Option<String>,
    #[arg(long)]
    contact_id: Option<String>,
    /// 凭证图片路径或 URI
    #[arg(long)]
    proof: Option<String>,
    #[arg(short, long)]
    status: Option<FavorStatus>,
}

#[derive(ClapArgs, Debug)]
struct EditArgs {
    id: String,
    #[arg(short, long)]
    contact: Option<String>,
    #[arg(short, long)]
    description: Option<String>,
    #[arg(long)]
    date: Option<String>,
    #[arg(long, conflicts_with = "clear_contact_id")]
    contact_id: Option<String>,
    #[arg(long)]
    clear_contact_id: bool,
    #[arg(long, conflicts_with = "clear_proof")]
    proof: Option<String>,
    #[arg(long)]
    clear_proof: bool,
    #[arg(short, long)]
    status: Option<FavorStatus>,
}

impl From<AddArgs> for FavorDraft {
    fn from(args: AddArgs) -> Self {
        FavorDraft {
            contact_name: args.contact,
            contact_id: args.contact_id,
            description: args.description,
            date: args.date,
            proof_image: args.proof,
            status: args.status,
        }
    }
}

impl From<EditArgs> for FavorPatch {
    fn from(args: EditArgs) -> Self {
        FavorPatch {
            contact_name: args.contact,
            contact_id: if args.clear_contact_id {
                Some(None)
            } else {
                args.contact_id.map(Some)
            },
            description: args.description,
            date: args.date,
            proof_image: if args.clear_proof {
                Some(None)
            } else {
                args.proof.map(Some)
            },
            status: args.status,
        }
    }
}

/// 初始化日志（stderr，可选同时写入文件；stdout 只输出命令结果）
fn init_logger(log_level: &str, log_file: Option<&str>) -> Result<()> {
    use std::fs::OpenOptions;
    use std::io;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    // 优先使用环境变量 RUST_LOG（如果设置了），否则使用命令行参数
    let filter_layer =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(false)
        .with_ansi(true);

    // 文件不需要颜色
    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(file)
                    .with_file(true)
                    .with_line_number(true)
                    .with_target(false)
                    .with_ansi(false),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(stderr_layer)
        .with(file_layer)
        .init();
    Ok(())
}

fn print_favor(favor: &FavorRecord) {
    println!(
        "{}  {}  {:<9}  {}  {}",
        favor.id,
        favor.date,
        favor.status.as_str(),
        favor.contact_name,
        favor.description
    );
}

fn print_detail(favor: &FavorRecord) {
    println!("ID:          {}", favor.id);
    println!("联系人:      {}", favor.contact_name);
    if let Some(contact_id) = &favor.contact_id {
        println!("联系人 ID:   {}", contact_id);
    }
    println!("描述:        {}", favor.description);
    println!("日期:        {}", favor.date);
    println!("状态:        {}", favor.status);
    if let Some(proof) = &favor.proof_image {
        println!("凭证:        {}", proof);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(&args.log_level, args.log_file.as_deref())?;

    let config = FavorStoreConfig {
        db_path: args.db,
        storage_key: args.key,
    };
    info!("[CLI] 打开存储: {}", config.db_url());
    let mut store = FavorStore::open(config).await?;

    match args.command {
        Command::List { status } => {
            let favors = store.list().await?;
            let counts = count_by_status(&favors);
            let shown = filter_by_status(&favors, status);
            if shown.is_empty() {
                println!("📭 还没有记录（筛选: {}）", status);
            }
            for favor in &shown {
                print_favor(favor);
            }
            println!(
                "共 {} 条 | pending {} | completed {} | cancelled {}",
                counts.total(),
                counts.pending,
                counts.completed,
                counts.cancelled
            );
        }
        Command::Show { id } => {
            let favor = store.get(&id).await?;
            print_detail(&favor);
        }
        Command::Add(add) => {
            let favor = store.create(add.into()).await?;
            println!("✅ 已记录 {}", favor.id);
            print_detail(&favor);
        }
        Command::Edit(edit) => {
            let id = edit.id.clone();
            let patch = FavorPatch::from(edit);
            if patch.is_empty() {
                warn!("[CLI] 没有给出要修改的字段");
            }
            let favor = store.update(&id, patch).await?;
            println!("✅ 已更新 {}", favor.id);
            print_detail(&favor);
        }
        Command::Delete { id } => {
            if store.delete(&id).await? {
                println!("🗑️ 已删除 {}", id);
            } else {
                println!("记录 {} 不存在", id);
            }
        }
        Command::Dashboard => {
            let summary = store.summary().await?;
            if summary.is_empty() {
                println!("🤝 还没有记录，记下第一条互助来开始维护关系平衡吧！");
            }
            println!("记录数: {}", summary.favor_count);
            println!("平衡分: {}", summary.score);
            println!("{}", summary.insight);
        }
    }

    Ok(())
}
