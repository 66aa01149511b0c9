//! 响应载荷翻译演示
//!
//! 读取一份上游 JSON 响应（文件或标准输入），按实体类型翻译后输出。
//!
//! ```text
//! cargo run --example translate_payload -- --kind bond --lang cht emissions.json
//! cargo run --example translate_payload -- --kind issuer --lang zh --offline < issuer.json
//! ```

use std::io::Read;
use std::path::PathBuf;

use clap::Parser;
use serde_json::Value;

use bond_gateway::env::EnvConfig;
use bond_gateway::logging;
use bond_gateway::translation::{
    load_translation_config, ConfigManager, EntityKind, TargetLanguage, TranslationService,
};

#[derive(Debug, Parser)]
#[command(name = "translate_payload", about = "翻译债券数据 API 的 JSON 响应")]
struct Args {
    /// 实体类型（bond-emission / issuer）
    #[arg(short, long, default_value = "bond-emission")]
    kind: EntityKind,

    /// 目标语言（eng / zh / cht）
    #[arg(short, long, default_value = "zh")]
    lang: TargetLanguage,

    /// 覆盖远程翻译服务地址
    #[arg(long)]
    api_url: Option<String>,

    /// 不调用远程翻译，只使用词典
    #[arg(long)]
    offline: bool,

    /// 使用指定的配置文件
    #[arg(short, long)]
    config: Option<String>,

    /// 输出统计信息
    #[arg(long)]
    stats: bool,

    /// 翻译前输出环境变量配置摘要
    #[arg(long)]
    env_summary: bool,

    /// 输入文件，缺省时读取标准输入
    input: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging();
    let args = Args::parse();

    if args.env_summary {
        EnvConfig::from_env()?.print_summary();
    }

    let mut config = match &args.config {
        Some(path) => ConfigManager::from_file(path)?.into_config(),
        None => load_translation_config(),
    };
    if let Some(api_url) = args.api_url {
        config.api_url = api_url;
    }
    if args.offline {
        config.remote_enabled = false;
    }

    let raw = match &args.input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    let payload: Value = serde_json::from_str(&raw)?;

    let service = TranslationService::new(config)?;
    let translated = service
        .translate_response(&payload, args.kind, args.lang)
        .await?;

    println!("{}", serde_json::to_string_pretty(&translated)?);

    if args.stats {
        let stats = service.stats();
        eprintln!("实体: {}", stats.entities_translated);
        eprintln!(
            "词典命中: {} / 未命中: {} ({:.1}%)",
            stats.dictionary_hits,
            stats.dictionary_misses,
            stats.dictionary_hit_rate() * 100.0
        );
        eprintln!(
            "远程请求: {}，失败: {}",
            stats.remote_requests, stats.remote_failures
        );
        eprintln!("隔离失败的实体: {}", stats.entity_failures);
    }

    Ok(())
}
