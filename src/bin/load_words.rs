//! 一次性批量导入: 把 `word:meaning,synonyms,antonyms` 格式的文本文件写入 words 表

use clap::Parser;
use std::path::PathBuf;
use thesaurus::{
    config::StoreConfig, logging, services::loader_service, services::word_service::WordStore,
};

#[derive(Parser, Debug)]
#[command(name = "load_words", about = "Bulk-load a word file into the thesaurus table")]
struct Args {
    /// 导入文件路径
    #[arg(default_value = "1000words.txt")]
    path: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 初始化日志系统
    logging::init();
    let args = Args::parse();

    // 2. 读取数据库配置
    let store = WordStore::new(StoreConfig::from_env());
    store.ensure_schema().await?;

    // 3. 导入; 格式错误的行跳过并汇总
    let report = loader_service::load_file(&store, &args.path).await?;

    println!("Done! {} words inserted.", report.inserted);
    if !report.skipped.is_empty() {
        println!("Skipped {} malformed line(s):", report.skipped.len());
        for err in &report.skipped {
            println!("  {err}");
        }
    }
    Ok(())
}
