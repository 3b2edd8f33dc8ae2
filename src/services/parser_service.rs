use crate::error::ParseError;
use crate::models::word::WordRecord;
use std::io::{self, BufRead};

/// 解析一行 `word:meaning,synonyms,antonyms`
/// 冒号只切一次; 逗号后的字段缺失时为空串，多余字段忽略
pub fn parse_line(line_no: usize, line: &str) -> Result<WordRecord, ParseError> {
    let Some((word, rest)) = line.split_once(':') else {
        return Err(ParseError::MissingColon {
            line: line_no,
            content: line.to_string(),
        });
    };

    let mut parts = rest.split(',').map(str::trim);
    let mut next = || parts.next().unwrap_or_default().to_string();
    let meaning = next();
    let synonyms = next();
    let antonyms = next();

    Ok(WordRecord {
        word: word.trim().to_string(),
        meaning,
        synonyms,
        antonyms,
    })
}

/// 逐行读取的惰性解析器，跳过空行
pub struct RecordParser<R> {
    lines: io::Lines<R>,
    line_no: usize,
}

impl<R: BufRead> RecordParser<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
        }
    }
}

impl<R: BufRead> Iterator for RecordParser<R> {
    /// 外层是读取错误，内层是格式错误
    type Item = io::Result<Result<WordRecord, ParseError>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e)),
            };
            self.line_no += 1;

            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            return Some(Ok(parse_line(self.line_no, line)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_all_four_fields() {
        let record = parse_line(1, " run : to move quickly , sprint , walk ").unwrap();
        assert_eq!(record, WordRecord::new("run", "to move quickly", "sprint", "walk"));
        assert_eq!(parse_line(1, &record.to_string()).unwrap(), record);
    }

    #[test]
    fn missing_fields_become_empty() {
        let record = parse_line(1, "cat:a small feline").unwrap();
        assert_eq!(record.synonyms, "");
        assert_eq!(record.antonyms, "");

        let record = parse_line(1, "cat:a small feline,kitty").unwrap();
        assert_eq!(record.synonyms, "kitty");
        assert_eq!(record.antonyms, "");
    }

    #[test]
    fn only_first_colon_splits_word() {
        let record = parse_line(1, "ratio:a:b relation").unwrap();
        assert_eq!(record.word, "ratio");
        assert_eq!(record.meaning, "a:b relation");
    }

    #[test]
    fn extra_comma_parts_are_dropped() {
        let record = parse_line(1, "big:large,huge,small,extra").unwrap();
        assert_eq!(record.antonyms, "small");
    }

    #[test]
    fn line_without_colon_is_malformed() {
        let err = parse_line(7, "no separator here").unwrap_err();
        assert_eq!(err.line(), 7);
    }

    #[test]
    fn parser_skips_blank_lines_and_counts_physical_lines() {
        let input = "run:to move quickly,sprint,walk\n\n   \nbroken line\nsit:to rest\n";
        let items: Vec<_> = RecordParser::new(Cursor::new(input))
            .map(|item| item.unwrap())
            .collect();

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].as_ref().unwrap().word, "run");
        assert_eq!(items[1].as_ref().unwrap_err().line(), 4);
        assert_eq!(items[2].as_ref().unwrap().word, "sit");
    }
}
