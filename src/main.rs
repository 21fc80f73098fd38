// ============================================
// src/main.rs (メインファイル)
// ============================================

use std::fs::File;
use std::io::stdout;
use std::path::Path;
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use crossterm::{
    ExecutableCommand,
    cursor::{Hide, Show},
    event::{self, Event, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tracing::{info, warn};

mod app;
mod cangjie_mapping;
mod config;
mod history;
mod practice;
mod selector;
mod ui;
mod word_bank;

use app::App;
use config::Cli;
use selector::WordSelector;
use word_bank::{FrequentWordSet, WordBank};

// --------------------------------------------------
// メイン関数 (TUIセットアップと実行ループ)
// --------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let (word_bank, frequent) = load_resources(&cli.word_bank_path(), &cli.freq_words_path());
    let mut app = build_app(word_bank, frequent, WordSelector::from_seed(cli.seed));

    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, &mut app);
    // エラーでも端末は必ず元に戻す
    restore_terminal()?;
    result?;

    if let Some(path) = &cli.history_out {
        app.history.export_json(path)?;
        info!(path = %path.display(), entries = app.history.len(), "history exported");
    }
    Ok(())
}

/// `--log-file` があればそこへログを出す
fn init_logging(cli: &Cli) -> Result<()> {
    let Some(path) = &cli.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(cli.log_level())
        .init();
    Ok(())
}

/// 読み込み結果 (失敗時は代わりのデータと画面に出す一言)
struct Loaded<T> {
    data: T,
    notice: Option<String>,
}

/// MARK:字庫と常用字を並行して読み込む
///
/// どちらも読み終わってから返す。失敗したら字庫は組み込みの3字、常用字は空にする。
fn load_resources(bank_path: &Path, freq_path: &Path) -> (Loaded<WordBank>, Loaded<FrequentWordSet>) {
    let (bank, frequent) = thread::scope(|s| {
        let bank = s.spawn(|| word_bank::load_word_bank(bank_path));
        let frequent = s.spawn(|| word_bank::load_frequent_words(freq_path));
        (
            bank.join()
                .unwrap_or_else(|_| Err(anyhow!("word bank loader panicked"))),
            frequent
                .join()
                .unwrap_or_else(|_| Err(anyhow!("frequent words loader panicked"))),
        )
    });

    let bank = match bank {
        Ok(data) => Loaded { data, notice: None },
        Err(err) => {
            warn!("{err:#}; using built-in sample words");
            Loaded {
                data: word_bank::fallback_word_bank(),
                notice: Some(format!("字庫を読み込めませんでした: {}", bank_path.display())),
            }
        }
    };
    let frequent = match frequent {
        Ok(data) => Loaded { data, notice: None },
        Err(err) => {
            warn!("{err:#}; practicing without frequency filter");
            Loaded {
                data: FrequentWordSet::new(),
                notice: Some(format!("常用字を読み込めませんでした: {}", freq_path.display())),
            }
        }
    };
    (bank, frequent)
}

/// 読み込み結果から App を作る
///
/// 読み込み失敗のお知らせは「出題できる字がありません」より優先する。
fn build_app(
    word_bank: Loaded<WordBank>,
    frequent: Loaded<FrequentWordSet>,
    selector: WordSelector,
) -> App {
    let mut app = App::new(word_bank.data, &frequent.data, selector);
    if let Some(notice) = word_bank.notice.or(frequent.notice) {
        app.notice = Some(notice);
    }
    app
}

fn setup_terminal() -> Result<Terminal<impl Backend>> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?; // 代替スクリーンを使用
    stdout().execute(Hide)?; // カーソルを非表示
    let backend = CrosstermBackend::new(stdout());
    Ok(Terminal::new(backend)?)
}

fn restore_terminal() -> Result<()> {
    stdout().execute(Show)?; // カーソルを再表示
    stdout().execute(LeaveAlternateScreen)?; // 代替スクリーンを終了
    disable_raw_mode()?;
    Ok(())
}

fn run_app(terminal: &mut Terminal<impl Backend>, app: &mut App) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|f| ui::ui(f, app))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }
    }
    Ok(())
}
