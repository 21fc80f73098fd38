// ============================================
// src/history.rs
// 回答履歴 (メモリ上のみ) と JSON 書き出し
// ============================================

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 1問ごとの記録
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub character: String,
    pub spelling: String,
    pub is_correct: bool,
    pub answered_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(character: impl Into<String>, spelling: impl Into<String>, is_correct: bool) -> Self {
        Self {
            character: character.into(),
            spelling: spelling.into(),
            is_correct,
            answered_at: Utc::now(),
        }
    }
}

/// 回答履歴 (新しいものが先頭)
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// 先頭に追加する
    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.insert(0, entry);
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn correct_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_correct).count()
    }

    /// 正答率 (0.0〜1.0、履歴がなければ 0.0)
    pub fn accuracy(&self) -> f64 {
        if self.entries.is_empty() {
            0.0
        } else {
            self.correct_count() as f64 / self.entries.len() as f64
        }
    }

    /// MARK:履歴を JSON で書き出す (読み戻しはしない)
    pub fn export_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.entries)
            .context("failed to serialize history")?;
        fs::write(path, json).with_context(|| format!("failed to write history {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_entry_comes_first() {
        let mut history = History::new();
        history.record(HistoryEntry::new("倉", "OIAR", false));
        history.record(HistoryEntry::new("人", "O", true));
        let characters: Vec<_> = history.entries().iter().map(|e| e.character.as_str()).collect();
        assert_eq!(characters, ["人", "倉"]);
    }

    #[test]
    fn accuracy_counts_correct_answers() {
        let mut history = History::new();
        assert!(history.is_empty());
        assert_eq!(history.accuracy(), 0.0);

        history.record(HistoryEntry::new("倉", "OIAR", false));
        history.record(HistoryEntry::new("人", "O", true));
        history.record(HistoryEntry::new("一", "M", true));
        history.record(HistoryEntry::new("山", "U", true));
        assert_eq!(history.len(), 4);
        assert_eq!(history.correct_count(), 3);
        assert_eq!(history.accuracy(), 0.75);
    }

    #[test]
    fn export_writes_json_array() {
        let mut history = History::new();
        history.record(HistoryEntry::new("倉", "OIAR", false));
        history.record(HistoryEntry::new("人", "O", true));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        history.export_json(&path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let parsed: Vec<HistoryEntry> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, history.entries());
    }

    #[test]
    fn export_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("history.json");
        assert!(History::new().export_json(&path).is_err());
    }
}
