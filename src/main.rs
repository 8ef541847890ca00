// ==========================================
// 滞销库存分析系统 - 命令行入口
// ==========================================
// 子命令: generate (模拟数据) / ingest (上传表校验回填) / summary (驾驶舱聚合)
// 输出: 表数据写 stdout 或 --output 文件;日志写 stderr
// ==========================================

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use dead_stock_analyzer::api::DEFAULT_PRIORITY_LIMIT;
use dead_stock_analyzer::config::ConfigManager;
use dead_stock_analyzer::{export, logging, DashboardSession, InventoryTable};
use serde_json::json;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "dead-stock-analyzer", version, about = "滞销库存分析系统")]
struct Cli {
    /// 配置文件（JSON,扁平键值）
    #[arg(long = "config", global = true)]
    config: Option<PathBuf>,

    /// 基准日 (YYYY-MM-DD),默认取配置或今天
    #[arg(long = "reference-date", global = true)]
    reference_date: Option<NaiveDate>,

    /// 以 JSON 格式输出日志
    #[arg(long = "json-logs", global = true)]
    json_logs: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 生成演示库存表
    Generate(GenerateArgs),
    /// 校验上传表并回填缺失列
    Ingest(IngestArgs),
    /// 输出驾驶舱聚合（KPI / 状态分布 / 优先清单 / 行动建议）
    Summary(SummaryArgs),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
}

#[derive(Debug, Parser)]
struct GenerateArgs {
    /// 随机种子（默认取配置 simulation.seed）
    #[arg(long = "seed")]
    seed: Option<u64>,

    #[arg(long = "format", value_enum, default_value = "csv")]
    format: OutputFormat,

    /// 输出文件（默认 stdout）
    #[arg(long = "output", short = 'o')]
    output: Option<PathBuf>,
}

#[derive(Debug, Parser)]
struct IngestArgs {
    /// 上传的 CSV 文件
    input: PathBuf,

    #[arg(long = "format", value_enum, default_value = "csv")]
    format: OutputFormat,

    #[arg(long = "output", short = 'o')]
    output: Option<PathBuf>,
}

#[derive(Debug, Parser)]
struct SummaryArgs {
    /// 上传的 CSV 文件;缺省时使用演示数据
    #[arg(long = "input")]
    input: Option<PathBuf>,

    /// 演示数据种子（无 --input 时生效）
    #[arg(long = "seed")]
    seed: Option<u64>,

    /// 优先清单条数
    #[arg(long = "limit", default_value_t = DEFAULT_PRIORITY_LIMIT)]
    limit: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.json_logs {
        logging::init_json();
    } else {
        logging::init();
    }
    info!(version = dead_stock_analyzer::VERSION, "{}", dead_stock_analyzer::APP_NAME);

    let config = match &cli.config {
        Some(path) => ConfigManager::from_file(path)
            .with_context(|| format!("无法读取配置文件 {}", path.display()))?,
        None => ConfigManager::new(),
    };

    let mut session = DashboardSession::from_config(&config)?;
    if let Some(reference) = cli.reference_date {
        session = session.with_reference_date(reference);
    }

    match cli.cmd {
        Command::Generate(args) => {
            let seed = args.seed.map(Ok).unwrap_or_else(|| config.get_seed())?;
            let loaded = session.load_demo(seed)?;
            write_table(&loaded.table, args.format, args.output.as_deref())
        }
        Command::Ingest(args) => {
            let content = read_input(&args.input)?;
            let loaded = session.load_upload(&content)?;
            if let Some(report) = &loaded.report {
                for stats in &report.columns {
                    info!(
                        column = %stats.column,
                        derived = stats.derived,
                        defaulted = stats.defaulted,
                        "回填列"
                    );
                }
            }
            write_table(&loaded.table, args.format, args.output.as_deref())
        }
        Command::Summary(args) => {
            match &args.input {
                Some(path) => {
                    let content = read_input(path)?;
                    session.load_upload(&content)?;
                }
                None => {
                    let seed = args.seed.map(Ok).unwrap_or_else(|| config.get_seed())?;
                    session.load_demo(seed)?;
                }
            }

            let dashboard = session.dashboard()?;
            let summary = json!({
                "banner": dashboard.summary_banner(),
                "kpi": dashboard.kpi_summary(),
                "status_breakdown": dashboard.status_breakdown(),
                "category_problem_breakdown": dashboard.category_problem_breakdown(),
                "priority_items": dashboard.priority_items(args.limit),
                "action_insights": dashboard.action_insights(),
            });

            let stdout = io::stdout();
            let mut handle = stdout.lock();
            serde_json::to_writer_pretty(&mut handle, &summary)?;
            writeln!(handle)?;
            Ok(())
        }
    }
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    dead_stock_analyzer::importer::read_csv_file(path)
        .with_context(|| format!("无法读取上传文件 {}", path.display()))
}

fn write_table(table: &InventoryTable, format: OutputFormat, output: Option<&Path>) -> Result<()> {
    let writer: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("无法创建输出文件 {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout())),
    };

    match format {
        OutputFormat::Csv => export::write_csv(table, writer)?,
        OutputFormat::Json => export::write_json(table, writer)?,
    }
    Ok(())
}
