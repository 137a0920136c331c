//! 握手协议一致性验证
//!
//! 跑一次完整的 harness：脚本化握手、复位、再握手、随机激励，然后打印统计与追踪表。

use clap::{Parser, ValueEnum};
use handshake_tb::config::HarnessConfig;
use handshake_tb::error::HarnessError;
use handshake_tb::eut::{self, Fault};
use handshake_tb::tb::{self, RunReport};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FaultArg {
    IgnoreChecksum,
    StuckIdle,
    DoubleOutput,
}

impl From<FaultArg> for Fault {
    fn from(f: FaultArg) -> Self {
        match f {
            FaultArg::IgnoreChecksum => Fault::IgnoreChecksum,
            FaultArg::StuckIdle => Fault::StuckIdle,
            FaultArg::DoubleOutput => Fault::DoubleOutput,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "conformance",
    about = "握手协议一致性 harness：参考模型 + 约束随机激励 + 有序计分板"
)]
struct Args {
    /// JSON 配置文件（缺省字段取默认值）
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    seed: Option<u64>,
    /// C 阶段随机包数量
    #[arg(long)]
    packets: Option<u64>,
    /// 故意破坏校验和的概率
    #[arg(long)]
    error_rate: Option<f64>,
    /// driver 最大抖动（tick）
    #[arg(long)]
    max_jitter: Option<u64>,
    /// 复位保持时间（tick）
    #[arg(long)]
    reset_ticks: Option<u64>,
    /// 排空等待时间（tick）
    #[arg(long)]
    drain_ticks: Option<u64>,
    /// 用故障引擎代替符合协议的引擎（覆盖配置文件中的 fault）
    #[arg(long, value_enum)]
    fault: Option<FaultArg>,
    /// 把完整报告写成 JSON
    #[arg(long)]
    report_json: Option<PathBuf>,
    /// 不打印追踪表
    #[arg(long)]
    no_trace: bool,
    /// 有失败或缺失输出时以非零状态退出
    #[arg(long)]
    strict: bool,
}

const EXIT_MISMATCH: u8 = 1;
const EXIT_FATAL: u8 = 2;
const EXIT_SETUP: u8 = 3;

fn resolve_config(args: &Args) -> Result<HarnessConfig, HarnessError> {
    let mut cfg = match &args.config {
        Some(path) => HarnessConfig::load(path)?,
        None => HarnessConfig::default(),
    };
    if let Some(seed) = args.seed {
        cfg.seed = seed;
    }
    if let Some(packets) = args.packets {
        cfg.packets = packets;
    }
    if let Some(rate) = args.error_rate {
        cfg.error_rate = rate;
    }
    if let Some(jitter) = args.max_jitter {
        cfg.max_jitter = jitter;
    }
    if let Some(ticks) = args.reset_ticks {
        cfg.reset_ticks = ticks;
    }
    if let Some(ticks) = args.drain_ticks {
        cfg.drain_ticks = ticks;
    }
    if let Some(fault) = args.fault {
        cfg.fault = Some(fault.into());
    }
    cfg.validate()?;
    Ok(cfg)
}

fn write_report(path: &Path, report: &RunReport) -> Result<(), HarnessError> {
    let raw = serde_json::to_string_pretty(report).map_err(HarnessError::ReportEncode)?;
    fs::write(path, raw).map_err(|source| HarnessError::ReportIo {
        path: path.to_path_buf(),
        source,
    })
}

fn main() -> ExitCode {
    // 初始化 tracing（写到 stderr，stdout 只留摘要）
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();

    let cfg = match resolve_config(&args) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(EXIT_SETUP);
        }
    };

    let report = match tb::run(&cfg, eut::engine_for(cfg.fault)) {
        Ok(report) => report,
        Err(e) if e.is_fatal_verdict() => {
            eprintln!("FATAL: {e}");
            return ExitCode::from(EXIT_FATAL);
        }
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(EXIT_SETUP);
        }
    };

    print!("{}", report.summary());
    if !args.no_trace {
        println!();
        print!("{}", report.trace_table());
    }

    if let Some(path) = &args.report_json {
        if let Err(e) = write_report(path, &report) {
            eprintln!("error: {e}");
            return ExitCode::from(EXIT_SETUP);
        }
    }

    if args.strict && !report.is_clean() {
        return ExitCode::from(EXIT_MISMATCH);
    }
    ExitCode::SUCCESS
}
