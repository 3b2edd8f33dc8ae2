use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::models::word::{WordRecord, WordStats, NONE_SENTINEL};
use sqlx::any::{install_default_drivers, Any, AnyArguments};
use sqlx::query::Query;
use sqlx::{AnyConnection, Connection};

/// 建表语句; word 上只建普通索引，不加唯一约束
const SCHEMA_SQL: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS words (
        word TEXT NOT NULL,
        meaning TEXT NOT NULL,
        synonyms TEXT NOT NULL DEFAULT 'none',
        antonyms TEXT NOT NULL DEFAULT 'none'
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_words_word ON words (word)",
];

const SELECT_ALL_SQL: &str =
    "SELECT word, meaning, synonyms, antonyms FROM words ORDER BY word ASC";
const SELECT_EXACT_SQL: &str =
    "SELECT word, meaning, synonyms, antonyms FROM words WHERE word = $1 ORDER BY word ASC";
const COUNT_ALL_SQL: &str = "SELECT COUNT(*) FROM words";
const COUNT_SYNONYMS_SQL: &str = "SELECT COUNT(*) FROM words WHERE synonyms != $1";
const COUNT_ANTONYMS_SQL: &str = "SELECT COUNT(*) FROM words WHERE antonyms != $1";

/// 单表词汇库的访问层
///
/// 每个操作都新开一个连接，返回前关闭; 出错提前返回时连接随 drop 释放。
/// 所有语句都是参数化的，写操作依赖数据库自动提交。
#[derive(Debug, Clone)]
pub struct WordStore {
    config: StoreConfig,
}

impl WordStore {
    pub fn new(config: StoreConfig) -> Self {
        install_default_drivers();
        Self { config }
    }

    async fn connect(&self) -> Result<AnyConnection, StoreError> {
        AnyConnection::connect(&self.config.database_url)
            .await
            .map_err(|e| {
                tracing::error!("!!! 数据库连接失败: {}", e);
                StoreError::connection(e)
            })
    }

    async fn release(conn: AnyConnection) {
        if let Err(e) = conn.close().await {
            tracing::warn!("--- 关闭数据库连接失败: {}", e);
        }
    }

    fn failed(operation: &'static str, e: sqlx::Error) -> StoreError {
        tracing::error!("!!! {} 失败: {}", operation, e);
        StoreError::statement(operation, e)
    }

    /// 建表 (已存在则跳过)
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        let mut conn = self.connect().await?;
        let mut result = Ok(());
        for stmt in SCHEMA_SQL {
            if let Err(e) = sqlx::query(stmt).execute(&mut conn).await {
                result = Err(e);
                break;
            }
        }
        Self::release(conn).await;
        result.map_err(|e| Self::failed("creating schema", e))
    }

    /// 1. 查询词条列表，可选精确匹配 word，始终按 word 升序
    pub async fn list_words(&self, exact_word: Option<&str>) -> Result<Vec<WordRecord>, StoreError> {
        tracing::debug!(">>> 查询词条: exact_word={:?}", exact_word);
        let mut conn = self.connect().await?;
        let result = match exact_word {
            Some(word) => {
                sqlx::query_as::<_, WordRecord>(SELECT_EXACT_SQL)
                    .bind(word)
                    .fetch_all(&mut conn)
                    .await
            }
            None => {
                sqlx::query_as::<_, WordRecord>(SELECT_ALL_SQL)
                    .fetch_all(&mut conn)
                    .await
            }
        };
        Self::release(conn).await;
        result.map_err(|e| Self::failed("loading words", e))
    }

    /// 2. 统计总数
    pub async fn count_all(&self) -> Result<i64, StoreError> {
        self.count_single(COUNT_ALL_SQL, None).await
    }

    /// 3. 统计有同义词的词条 (synonyms != 'none')
    pub async fn count_with_synonyms(&self) -> Result<i64, StoreError> {
        self.count_single(COUNT_SYNONYMS_SQL, Some(NONE_SENTINEL)).await
    }

    /// 4. 统计有反义词的词条 (antonyms != 'none')
    pub async fn count_with_antonyms(&self) -> Result<i64, StoreError> {
        self.count_single(COUNT_ANTONYMS_SQL, Some(NONE_SENTINEL)).await
    }

    /// 三项统计共用一个连接
    pub async fn stats(&self) -> Result<WordStats, StoreError> {
        let mut conn = self.connect().await?;
        let result = async {
            let total = count(&mut conn, COUNT_ALL_SQL, None).await?;
            let with_synonyms = count(&mut conn, COUNT_SYNONYMS_SQL, Some(NONE_SENTINEL)).await?;
            let with_antonyms = count(&mut conn, COUNT_ANTONYMS_SQL, Some(NONE_SENTINEL)).await?;
            Ok::<_, sqlx::Error>(WordStats {
                total,
                with_synonyms,
                with_antonyms,
            })
        }
        .await;
        Self::release(conn).await;
        result.map_err(|e| Self::failed("loading statistics", e))
    }

    async fn count_single(&self, sql: &str, sentinel: Option<&str>) -> Result<i64, StoreError> {
        let mut conn = self.connect().await?;
        let result = count(&mut conn, sql, sentinel).await;
        Self::release(conn).await;
        result.map_err(|e| Self::failed("loading statistics", e))
    }

    /// 5. 新增词条，空白的同义词/反义词存为 "none"
    pub async fn insert(&self, record: &WordRecord) -> Result<(), StoreError> {
        let record = record.normalized();
        let mut conn = self.connect().await?;
        let result = insert_query(&record).execute(&mut conn).await;
        Self::release(conn).await;
        result.map_err(|e| Self::failed("adding word", e))?;

        tracing::info!("<<< 新增词条: {}", record.word);
        Ok(())
    }

    /// 6. 按旧 word 更新全部四列，返回受影响行数 (0 表示没有匹配)
    pub async fn update(&self, old_word: &str, record: &WordRecord) -> Result<u64, StoreError> {
        let record = record.normalized();
        let mut conn = self.connect().await?;
        let result = sqlx::query(
            r#"
            UPDATE words
            SET word = $1, meaning = $2, synonyms = $3, antonyms = $4
            WHERE word = $5
            "#,
        )
        .bind(record.word.as_str())
        .bind(record.meaning.as_str())
        .bind(record.synonyms.as_str())
        .bind(record.antonyms.as_str())
        .bind(old_word)
        .execute(&mut conn)
        .await;
        Self::release(conn).await;

        let affected = result
            .map_err(|e| Self::failed("updating word", e))?
            .rows_affected();
        tracing::info!("<<< 更新词条: {} ({} 行)", old_word, affected);
        Ok(affected)
    }

    /// 7. 删除所有 word 匹配的行，返回受影响行数
    pub async fn delete(&self, word: &str) -> Result<u64, StoreError> {
        let mut conn = self.connect().await?;
        let result = sqlx::query("DELETE FROM words WHERE word = $1")
            .bind(word)
            .execute(&mut conn)
            .await;
        Self::release(conn).await;

        let affected = result
            .map_err(|e| Self::failed("deleting word", e))?
            .rows_affected();
        tracing::info!("<<< 删除词条: {} ({} 行)", word, affected);
        Ok(affected)
    }

    /// 批量导入: 一个事务内逐条插入，最后统一提交; 任一条失败整体回滚
    pub async fn insert_all(&self, records: &[WordRecord]) -> Result<u64, StoreError> {
        let mut conn = self.connect().await?;
        let result = insert_in_transaction(&mut conn, records).await;
        Self::release(conn).await;
        result.map_err(|e| Self::failed("importing words", e))
    }
}

fn insert_query(record: &WordRecord) -> Query<'_, Any, AnyArguments<'_>> {
    sqlx::query("INSERT INTO words (word, meaning, synonyms, antonyms) VALUES ($1, $2, $3, $4)")
        .bind(record.word.as_str())
        .bind(record.meaning.as_str())
        .bind(record.synonyms.as_str())
        .bind(record.antonyms.as_str())
}

async fn insert_in_transaction(
    conn: &mut AnyConnection,
    records: &[WordRecord],
) -> Result<u64, sqlx::Error> {
    let mut tx = conn.begin().await?;
    let mut inserted = 0;
    for record in records {
        let record = record.normalized();
        inserted += insert_query(&record).execute(&mut *tx).await?.rows_affected();
    }
    tx.commit().await?;
    Ok(inserted)
}

async fn count(
    conn: &mut AnyConnection,
    sql: &str,
    sentinel: Option<&str>,
) -> Result<i64, sqlx::Error> {
    let query = sqlx::query_scalar::<_, i64>(sql);
    let query = match sentinel {
        Some(value) => query.bind(value),
        None => query,
    };
    query.fetch_one(&mut *conn).await
}
