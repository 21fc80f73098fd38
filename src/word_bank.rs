// ============================================
// src/word_bank.rs
// 字庫 (漢字 + 倉頡コード) と常用字リストの読み込み
// ============================================

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

/// 字庫の1エントリ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEntry {
    pub character: String, // 出題する漢字
    pub spelling: String,  // 倉頡コード (例: "OIAR")
}

impl WordEntry {
    pub fn new(character: impl Into<String>, spelling: impl Into<String>) -> Self {
        Self {
            character: character.into(),
            spelling: spelling.into(),
        }
    }
}

/// 字庫 (初出順・漢字の重複なし)
pub type WordBank = Vec<WordEntry>;

/// 常用字の集合
pub type FrequentWordSet = HashSet<char>;

/// 字庫ファイルが読めなかったときの最低限のお題
pub const FALLBACK_WORDS: &[(&str, &str)] = &[
    ("倉", "OIAR"),
    ("人", "O"),
    ("一", "M"),
];

/// `FALLBACK_WORDS` を字庫にする
pub fn fallback_word_bank() -> WordBank {
    FALLBACK_WORDS
        .iter()
        .map(|(character, spelling)| WordEntry::new(*character, *spelling))
        .collect()
}

/// 字庫テキストを解析する
///
/// 1行1エントリで `<漢字><空白><コード...>` の形式。
/// 空行と `#` で始まる行は読み飛ばし、形式に合わない行も黙って捨てる。
/// 同じ漢字が2回以上出てきたら最初の行だけを使う。
pub fn parse_word_bank(text: &str) -> WordBank {
    let mut entries = Vec::new();
    let mut seen = HashSet::new();

    // 先頭の BOM は空白扱い
    let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);
    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut parts = trimmed.split_whitespace();
        let (Some(character), Some(first)) = (parts.next(), parts.next()) else {
            continue;
        };
        // 2個目以降のトークンは空白1つでつなぎ直す
        let spelling = std::iter::once(first).chain(parts).collect::<Vec<_>>().join(" ");

        if seen.insert(character.to_string()) {
            entries.push(WordEntry::new(character, spelling));
        }
    }
    entries
}

/// CJK統合漢字 (U+4E00〜U+9FFF) か
fn is_cjk_unified(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
}

/// 常用字テキストから漢字だけを集める (位置や前後の文字は問わない)
pub fn parse_frequent_words(text: &str) -> FrequentWordSet {
    text.chars().filter(|c| is_cjk_unified(*c)).collect()
}

/// 常用字に含まれる漢字だけを残す
///
/// 常用字が空のときは「絞り込みなし」として字庫をそのまま返す。
pub fn filter_by_frequent_words(bank: &[WordEntry], frequent: &FrequentWordSet) -> WordBank {
    if frequent.is_empty() {
        return bank.to_vec();
    }
    bank.iter()
        .filter(|entry| {
            let mut chars = entry.character.chars();
            matches!((chars.next(), chars.next()), (Some(c), None) if frequent.contains(&c))
        })
        .cloned()
        .collect()
}

/// MARK:字庫ファイルを読み込む
pub fn load_word_bank(path: &Path) -> Result<WordBank> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read word bank {}", path.display()))?;
    let bank = parse_word_bank(&text);
    info!(path = %path.display(), entries = bank.len(), "word bank loaded");
    Ok(bank)
}

/// MARK:常用字ファイルを読み込む
pub fn load_frequent_words(path: &Path) -> Result<FrequentWordSet> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read frequent words {}", path.display()))?;
    let frequent = parse_frequent_words(&text);
    debug!(path = %path.display(), characters = frequent.len(), "frequent words loaded");
    Ok(frequent)
}
