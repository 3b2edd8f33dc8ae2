use crate::error::{ActionError, StoreError, ValidationError};
use crate::models::word::{WordForm, WordRecord, WordStats};
use crate::services::word_service::WordStore;

/// 词性筛选，仅作界面状态; 表里没有词性列，不参与查询
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WordType {
    #[default]
    All,
    Noun,
    Verb,
    Adjective,
    Adverb,
    Pronoun,
    Preposition,
}

impl WordType {
    pub const ALL: [WordType; 7] = [
        WordType::All,
        WordType::Noun,
        WordType::Verb,
        WordType::Adjective,
        WordType::Adverb,
        WordType::Pronoun,
        WordType::Preposition,
    ];

    pub fn label(self) -> &'static str {
        match self {
            WordType::All => "All",
            WordType::Noun => "noun",
            WordType::Verb => "verb",
            WordType::Adjective => "adjective",
            WordType::Adverb => "adverb",
            WordType::Pronoun => "pronoun",
            WordType::Preposition => "preposition",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    Add,
    /// 编辑时 word 不可修改，按原 word 更新
    Edit { original_word: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(usize),
    NotFound(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Added(String),
    Updated(String),
    /// 更新影响 0 行: 原词条已不存在
    NotFound(String),
}

/// 写操作已经提交后的结果; 随后的刷新单独报告，失败也不影响写操作本身
#[derive(Debug)]
pub struct Applied<T> {
    pub outcome: T,
    pub refresh: Result<(), StoreError>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted { word: String, rows: u64 },
    NotFound(String),
}

/// 窗体背后的状态: 当前结果集、选中项、统计
///
/// 任何增删改之后都整体重新查询，不在内存里局部修补。
pub struct WordBook {
    store: WordStore,
    current_words: Vec<WordRecord>,
    selected_index: Option<usize>,
    stats: WordStats,
    filter: Option<String>,
    word_type: WordType,
}

impl WordBook {
    pub fn new(store: WordStore) -> Self {
        Self {
            store,
            current_words: Vec::new(),
            selected_index: None,
            stats: WordStats::default(),
            filter: None,
            word_type: WordType::All,
        }
    }

    pub fn words(&self) -> &[WordRecord] {
        &self.current_words
    }

    pub fn stats(&self) -> WordStats {
        self.stats
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    pub fn selected(&self) -> Option<&WordRecord> {
        self.selected_index.and_then(|i| self.current_words.get(i))
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    pub fn word_type(&self) -> WordType {
        self.word_type
    }

    /// 重新拉取统计和列表; 两者都成功才替换当前状态，并清空选中项
    pub async fn refresh(&mut self, filter: Option<&str>) -> Result<(), StoreError> {
        let filter = filter.map(str::trim).filter(|f| !f.is_empty());
        let stats = self.store.stats().await?;
        let words = self.store.list_words(filter).await?;

        self.stats = stats;
        self.current_words = words;
        self.filter = filter.map(str::to_string);
        self.selected_index = None;
        Ok(())
    }

    /// 越界的下标直接忽略
    pub fn select(&mut self, index: usize) -> Option<&WordRecord> {
        if index < self.current_words.len() {
            self.selected_index = Some(index);
        }
        self.selected()
    }

    /// 精确搜索; 空白搜索词等同于不筛选
    pub async fn search(&mut self, term: &str) -> Result<SearchOutcome, StoreError> {
        self.refresh(Some(term)).await?;
        if self.current_words.is_empty() {
            Ok(SearchOutcome::NotFound(term.trim().to_string()))
        } else {
            Ok(SearchOutcome::Found(self.current_words.len()))
        }
    }

    /// 切换词性筛选: 清空搜索条件后刷新
    pub async fn set_word_type(&mut self, word_type: WordType) -> Result<(), StoreError> {
        self.refresh(None).await?;
        self.word_type = word_type;
        Ok(())
    }

    /// 打开添加/编辑窗体时的初始内容
    pub fn editor_for(&self, add: bool) -> Result<(EditorMode, WordForm), ActionError> {
        if add {
            return Ok((EditorMode::Add, WordForm::default()));
        }
        let record = self.selected().ok_or(ActionError::NoSelection)?;
        Ok((
            EditorMode::Edit {
                original_word: record.word.clone(),
            },
            WordForm::from_record(record),
        ))
    }

    pub async fn save(
        &mut self,
        mode: &EditorMode,
        form: &WordForm,
    ) -> Result<Applied<SaveOutcome>, ActionError> {
        let mut record = form.to_record();
        if let EditorMode::Edit { original_word } = mode {
            record.word = original_word.clone();
        }
        validate(&record)?;

        let outcome = match mode {
            EditorMode::Add => {
                self.store.insert(&record).await?;
                SaveOutcome::Added(record.word)
            }
            EditorMode::Edit { original_word } => {
                match self.store.update(original_word, &record).await? {
                    0 => SaveOutcome::NotFound(original_word.clone()),
                    _ => SaveOutcome::Updated(original_word.clone()),
                }
            }
        };

        Ok(self.applied(outcome).await)
    }

    /// 删除当前选中的词条 (确认步骤由界面负责)
    pub async fn delete_selected(&mut self) -> Result<Applied<DeleteOutcome>, ActionError> {
        let word = self
            .selected()
            .map(|record| record.word.clone())
            .ok_or(ActionError::NoSelection)?;

        let outcome = match self.store.delete(&word).await? {
            0 => DeleteOutcome::NotFound(word),
            rows => DeleteOutcome::Deleted { word, rows },
        };
        Ok(self.applied(outcome).await)
    }

    async fn applied<T>(&mut self, outcome: T) -> Applied<T> {
        let refresh = self.refresh(None).await;
        if let Err(e) = &refresh {
            tracing::warn!("--- 写入已提交，但刷新列表失败: {}", e);
        }
        Applied { outcome, refresh }
    }
}

/// word 与 meaning 必填
pub fn validate(record: &WordRecord) -> Result<(), ValidationError> {
    if record.word.trim().is_empty() {
        return Err(ValidationError::MissingWord);
    }
    if record.meaning.trim().is_empty() {
        return Err(ValidationError::MissingMeaning);
    }
    Ok(())
}
