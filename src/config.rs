use dotenvy::dotenv;

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_USER: &str = "postgres";
const DEFAULT_DB_NAME: &str = "words_db";

/// 数据库连接配置，启动时构造一次后传给 WordStore
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub database_url: String,
}

impl StoreConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
        }
    }

    /// 加载 .env 后读取环境变量
    pub fn from_env() -> Self {
        dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// DATABASE_URL 优先; 否则用 DB_HOST / DB_USER / DB_PASSWORD / DB_NAME 拼接
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = non_empty("DATABASE_URL") {
            return Self::new(url);
        }

        let host = non_empty("DB_HOST").unwrap_or_else(|| DEFAULT_HOST.into());
        let user = non_empty("DB_USER").unwrap_or_else(|| DEFAULT_USER.into());
        let name = non_empty("DB_NAME").unwrap_or_else(|| DEFAULT_DB_NAME.into());
        let credentials = match non_empty("DB_PASSWORD") {
            Some(password) => format!("{user}:{password}"),
            None => user,
        };

        Self::new(format!("postgres://{credentials}@{host}/{name}"))
    }
}
