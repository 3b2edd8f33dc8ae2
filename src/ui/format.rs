use crate::models::word::WordRecord;

/// 列表里显示的释义前缀长度 (按字符计)
pub const MEANING_PREVIEW_CHARS: usize = 40;

pub const EMPTY_LIST_ROW: &str = "❌ No words found";

const DETAIL_RULE: &str =
    "════════════════════════════════════════════════════════════════════════════════";

/// `• WORD(左对齐 20)  释义前 40 字...`
pub fn list_row(record: &WordRecord) -> String {
    let preview: String = record.meaning.chars().take(MEANING_PREVIEW_CHARS).collect();
    format!("• {:<20}  {}...", record.word.to_uppercase(), preview)
}

pub fn detail_text(record: &WordRecord) -> String {
    format!(
        "╔{rule}╗\n\
         ║ WORD DETAILS\n\
         ╠{rule}╣\n\
         ║\n\
         ║  WORD:            {word}\n\
         ║  MEANING:         {meaning}\n\
         ║  SYNONYMS:        {synonyms}\n\
         ║  ANTONYMS:        {antonyms}\n\
         ║\n\
         ╚{rule}╝",
        rule = DETAIL_RULE,
        word = record.word.to_uppercase(),
        meaning = record.meaning,
        synonyms = record.synonyms,
        antonyms = record.antonyms,
    )
}
