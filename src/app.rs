// ============================================
// src/app.rs
// アプリ全体の状態とキー入力の振り分け
// ============================================

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::Rng;
use rand::rngs::StdRng;
use ratatui::widgets::ListState;
use tracing::{debug, info};

use crate::history::{History, HistoryEntry};
use crate::practice::{Effect, PracticeSession};
use crate::selector::WordSelector;
use crate::word_bank::{FrequentWordSet, WordBank, WordEntry, filter_by_frequent_words};

/// 字庫パネルに並べる件数
pub const WORD_LIST_LIMIT: usize = 20;

/// キー入力の向き先
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    WordList,
}

/// アプリ全体の状態を管理する
pub struct App<R: Rng = StdRng> {
    /// 読み込んだ字庫 (絞り込み前)
    pub word_bank: WordBank,
    /// 常用字で絞り込んだ出題候補
    pub pool: WordBank,
    selector: WordSelector<R>,

    pub session: PracticeSession,
    pub history: History,

    pub focus: Focus,
    pub list_state: ListState,
    /// 画面下に出す一言
    pub notice: Option<String>,
    pub should_quit: bool,
}

impl<R: Rng> App<R> {
    /// 字庫と常用字から App を作り、最初のお題を選ぶ
    pub fn new(word_bank: WordBank, frequent: &FrequentWordSet, selector: WordSelector<R>) -> Self {
        let pool = filter_by_frequent_words(&word_bank, frequent);
        info!(bank = word_bank.len(), pool = pool.len(), "practice pool ready");

        let mut list_state = ListState::default();
        if !word_bank.is_empty() {
            list_state.select(Some(0));
        }

        let mut app = Self {
            word_bank,
            pool,
            selector,
            session: PracticeSession::new(),
            history: History::new(),
            focus: Focus::Input,
            list_state,
            notice: None,
            should_quit: false,
        };
        app.next_word();
        app
    }

    /// 字庫パネルに表示するエントリ
    pub fn visible_words(&self) -> &[WordEntry] {
        &self.word_bank[..self.word_bank.len().min(WORD_LIST_LIMIT)]
    }

    /// 次のお題をランダムに選ぶ (候補がなければ今のお題のまま)
    pub fn next_word(&mut self) {
        match self.selector.select(&self.pool) {
            Some(entry) => {
                let entry = entry.clone();
                self.set_target(entry);
            }
            None => {
                debug!("no word available in pool");
                self.notice = Some("出題できる字がありません".to_string());
            }
        }
    }

    fn set_target(&mut self, entry: WordEntry) {
        debug!(character = %entry.character, "target changed");
        self.notice = None;
        let effects = self.session.set_target(entry);
        self.handle_effects(effects);
    }

    fn update_input(&mut self, text: String) {
        let effects = self.session.set_input(text);
        self.handle_effects(effects);
    }

    fn advance(&mut self) {
        let effects = self.session.advance();
        self.handle_effects(effects);
    }

    /// セッションからの副作用を処理する
    fn handle_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Completed {
                    character,
                    spelling,
                    is_correct,
                } => {
                    info!(%character, %spelling, is_correct, "answer recorded");
                    self.history.record(HistoryEntry::new(character, spelling, is_correct));
                    self.notice = None;
                    self.next_word();
                }
                Effect::Cleared => {
                    debug!("input cleared");
                    self.notice = Some("クリアしました".to_string());
                    self.focus = Focus::Input;
                }
            }
        }
    }

    /// MARK:キー入力の処理
    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('c') if ctrl => {
                self.should_quit = true;
                return;
            }
            KeyCode::Tab => {
                self.focus = match self.focus {
                    Focus::Input => Focus::WordList,
                    Focus::WordList => Focus::Input,
                };
                return;
            }
            _ => {}
        }

        match self.focus {
            Focus::Input => self.handle_input_key(key, ctrl, alt),
            Focus::WordList => self.handle_list_key(key),
        }
    }

    /// 入力欄にフォーカスがあるとき
    fn handle_input_key(&mut self, key: KeyEvent, ctrl: bool, alt: bool) {
        match key.code {
            KeyCode::Char('u') if ctrl => {
                let effects = self.session.clear();
                self.handle_effects(effects);
            }
            KeyCode::Char('n') if ctrl => {
                // 履歴に残さずに飛ばす
                self.next_word();
            }
            KeyCode::Enter => {
                if self.session.is_awaiting_advance() {
                    self.advance();
                } else {
                    let effects = self.session.check_explicit();
                    self.handle_effects(effects);
                }
            }
            KeyCode::Backspace => {
                let mut text = self.session.state().user_input.clone();
                if text.pop().is_some() {
                    self.update_input(text);
                }
            }
            KeyCode::Char(c) if !ctrl && !alt => {
                // 判定済みでも文字は入力欄に入る (次へ進むのは Enter のみ)
                let mut text = self.session.state().user_input.clone();
                text.push(c);
                self.update_input(text);
            }
            _ => {}
        }
    }

    /// 字庫パネルにフォーカスがあるとき
    fn handle_list_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::Enter if !self.session.is_awaiting_advance() => {
                let picked = self
                    .list_state
                    .selected()
                    .and_then(|i| self.visible_words().get(i))
                    .cloned();
                if let Some(entry) = picked {
                    self.set_target(entry);
                    self.focus = Focus::Input;
                }
            }
            // 入力欄の外で押されたキーは「次へ」
            _ if self.session.is_awaiting_advance() => self.advance(),
            _ => {}
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.visible_words().len();
        if len == 0 {
            return;
        }
        let current = self.list_state.selected().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, len as isize - 1) as usize;
        self.list_state.select(Some(next));
    }
}
