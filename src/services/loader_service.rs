use crate::error::{LoadError, ParseError};
use crate::services::parser_service::RecordParser;
use crate::services::word_service::WordStore;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// 导入结果: 成功条数 + 被跳过的格式错误行
#[derive(Debug, Default)]
pub struct LoadReport {
    pub inserted: u64,
    pub skipped: Vec<ParseError>,
}

pub async fn load_file(store: &WordStore, path: &Path) -> Result<LoadReport, LoadError> {
    tracing::info!(">>> 开始导入: {}", path.display());
    let file = File::open(path)?;
    load_reader(store, BufReader::new(file)).await
}

/// 先把整份输入解析完，再在一个事务里写入; 格式错误的行只记录不中断
pub async fn load_reader<R: BufRead>(store: &WordStore, reader: R) -> Result<LoadReport, LoadError> {
    let mut records = Vec::new();
    let mut skipped = Vec::new();

    for item in RecordParser::new(reader) {
        match item? {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!("--- 跳过第 {} 行: {}", e.line(), e);
                skipped.push(e);
            }
        }
    }

    let inserted = store.insert_all(&records).await?;
    tracing::info!("<<< 导入完成: 写入 {} 条, 跳过 {} 行", inserted, skipped.len());

    Ok(LoadReport { inserted, skipped })
}
