// ============================================
// src/config.rs
// コマンドライン引数とデータファイルの場所
// ============================================

use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser};
use directories::ProjectDirs;
use tracing::Level;

pub const WORD_BANK_FILE: &str = "Cangjie5_TC.txt";
pub const FREQ_WORDS_FILE: &str = "freqword.txt";

/// カレントディレクトリ側のデータフォルダ
const LOCAL_DATA_DIR: &str = "data";

#[derive(Debug, Clone, Parser)]
#[command(name = "cangjie-drill", about = "倉頡 spelling drill", version)]
pub struct Cli {
    /// 字庫ファイル (既定: ./data/Cangjie5_TC.txt → ユーザーデータフォルダ)
    #[arg(long = "word-bank", short = 'w')]
    pub word_bank: Option<PathBuf>,

    /// 常用字ファイル (既定: ./data/freqword.txt → ユーザーデータフォルダ)
    #[arg(long = "freq-words", short = 'f')]
    pub freq_words: Option<PathBuf>,

    /// 乱数のシード (同じシードなら同じ順番で出題)
    #[arg(long)]
    pub seed: Option<u64>,

    /// 終了時に回答履歴を JSON で書き出す先
    #[arg(long = "history-out")]
    pub history_out: Option<PathBuf>,

    /// ログの出力先 (指定しなければログは出さない)
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,

    /// ログを詳しくする (-v: debug, -vv: trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn word_bank_path(&self) -> PathBuf {
        self.word_bank
            .clone()
            .unwrap_or_else(|| default_resource_path(WORD_BANK_FILE))
    }

    pub fn freq_words_path(&self) -> PathBuf {
        self.freq_words
            .clone()
            .unwrap_or_else(|| default_resource_path(FREQ_WORDS_FILE))
    }

    pub fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}

/// MARK:データファイルの既定パスを決める
///
/// `./data/<name>` があればそれを、なければ OS ごとのデータフォルダを使う。
pub fn default_resource_path(name: &str) -> PathBuf {
    let local = Path::new(LOCAL_DATA_DIR).join(name);
    if local.exists() {
        return local;
    }
    match ProjectDirs::from("tw", "cangjie-drill", "CANGJIE_DRILL") {
        Some(proj_dirs) => proj_dirs.data_dir().join(name),
        // ホームが取れない環境ではカレントディレクトリ側のパスのまま
        None => local,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_paths_win() {
        let cli = Cli::parse_from([
            "cangjie-drill",
            "--word-bank",
            "/tmp/bank.txt",
            "-f",
            "/tmp/freq.txt",
            "--seed",
            "9",
        ]);
        assert_eq!(cli.word_bank_path(), PathBuf::from("/tmp/bank.txt"));
        assert_eq!(cli.freq_words_path(), PathBuf::from("/tmp/freq.txt"));
        assert_eq!(cli.seed, Some(9));
        assert!(cli.history_out.is_none());
    }

    #[test]
    fn default_paths_use_resource_names() {
        let cli = Cli::parse_from(["cangjie-drill"]);
        assert!(cli.word_bank_path().ends_with(WORD_BANK_FILE));
        assert!(cli.freq_words_path().ends_with(FREQ_WORDS_FILE));
    }

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(Cli::parse_from(["cangjie-drill"]).log_level(), Level::INFO);
        assert_eq!(Cli::parse_from(["cangjie-drill", "-v"]).log_level(), Level::DEBUG);
        assert_eq!(Cli::parse_from(["cangjie-drill", "-vvv"]).log_level(), Level::TRACE);
    }
}
