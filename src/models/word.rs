use sqlx::FromRow;
use std::fmt;

/// 同义词/反义词缺省时存入的占位值
pub const NONE_SENTINEL: &str = "none";

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct WordRecord {
    pub word: String,
    pub meaning: String,
    pub synonyms: String,
    pub antonyms: String,
}

impl WordRecord {
    pub fn new(
        word: impl Into<String>,
        meaning: impl Into<String>,
        synonyms: impl Into<String>,
        antonyms: impl Into<String>,
    ) -> Self {
        Self {
            word: word.into(),
            meaning: meaning.into(),
            synonyms: synonyms.into(),
            antonyms: antonyms.into(),
        }
    }

    /// 空白的同义词/反义词替换为 "none"，其余字段去掉首尾空白
    pub fn normalized(&self) -> Self {
        Self {
            word: self.word.trim().to_string(),
            meaning: self.meaning.trim().to_string(),
            synonyms: or_sentinel(&self.synonyms),
            antonyms: or_sentinel(&self.antonyms),
        }
    }
}

/// 按导入文件的格式输出一行: `word:meaning,synonyms,antonyms`
impl fmt::Display for WordRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{},{},{}",
            self.word, self.meaning, self.synonyms, self.antonyms
        )
    }
}

fn or_sentinel(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        NONE_SENTINEL.to_string()
    } else {
        value.to_string()
    }
}

/// 添加/编辑窗体里的输入内容
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordForm {
    pub word: String,
    pub meaning: String,
    pub synonyms: String,
    pub antonyms: String,
}

impl WordForm {
    /// 编辑时回填: 占位值 "none" 显示为空
    pub fn from_record(record: &WordRecord) -> Self {
        let visible = |value: &str| {
            if value == NONE_SENTINEL {
                String::new()
            } else {
                value.to_string()
            }
        };
        Self {
            word: record.word.clone(),
            meaning: record.meaning.clone(),
            synonyms: visible(&record.synonyms),
            antonyms: visible(&record.antonyms),
        }
    }

    pub fn to_record(&self) -> WordRecord {
        WordRecord::new(&self.word, &self.meaning, &self.synonyms, &self.antonyms).normalized()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WordStats {
    pub total: i64,
    pub with_synonyms: i64,
    pub with_antonyms: i64,
}
