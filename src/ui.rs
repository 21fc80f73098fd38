// ============================================
// src/ui.rs
// 画面描画
// ============================================

use rand::Rng;
use ratatui::{
    prelude::*,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph},
};

use crate::app::{App, Focus};
use crate::cangjie_mapping::spelling_to_components;
use crate::practice::Correctness;

/// 履歴パネルに出す件数
const HISTORY_LIMIT: usize = 10;

pub fn ui<R: Rng>(f: &mut Frame, app: &mut App<R>) {
    let size = f.area();
    // 枠線を描画
    let block = Block::default().borders(Borders::ALL).title("倉頡 Drill");
    let inner_area = block.inner(size);
    f.render_widget(block, size);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(24), Constraint::Min(20)])
        .split(inner_area);

    render_word_list(f, app, columns[0]);
    render_practice(f, app, columns[1]);
}

/// 左側: 字庫パネル
fn render_word_list<R: Rng>(f: &mut Frame, app: &mut App<R>, area: Rect) {
    let focused = app.focus == Focus::WordList;
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let items: Vec<ListItem> = if app.word_bank.is_empty() {
        vec![ListItem::new("字庫を読み込み中...")]
    } else {
        app.visible_words()
            .iter()
            .map(|e| ListItem::new(format!("{} ({})", e.character, e.spelling)))
            .collect()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title("字庫"),
        )
        .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
        .highlight_symbol("> ");
    f.render_stateful_widget(list, area, &mut app.list_state);
}

/// 右側: お題・入力・答え・履歴
fn render_practice<R: Rng>(f: &mut Frame, app: &App<R>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // [0] ステータスバー (正答率)
            Constraint::Length(3), // [1] お題の漢字
            Constraint::Length(4), // [2] 入力
            Constraint::Length(4), // [3] 正確答案
            Constraint::Min(1),    // [4] 履歴
            Constraint::Length(1), // [5] ヘルプ / お知らせ
        ])
        .split(area);

    // 0. ステータスバー
    let history = &app.history;
    let label = if history.is_empty() {
        "0 / 0".to_string()
    } else {
        format!(
            "{} / {} ({:.0}%)",
            history.correct_count(),
            history.len(),
            history.accuracy() * 100.0
        )
    };
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Green).bg(Color::Black))
        .ratio(history.accuracy().clamp(0.0, 1.0))
        .label(label);
    f.render_widget(gauge, chunks[0]);

    let state = app.session.state();

    // 1. お題
    let target = state
        .target
        .as_ref()
        .map(|t| t.character.as_str())
        .unwrap_or("");
    f.render_widget(
        Paragraph::new(target)
            .style(Style::default().fg(Color::White).bold())
            .centered()
            .block(Block::default().borders(Borders::BOTTOM)),
        chunks[1],
    );

    // 2. 入力 (打った綴りとその字根)
    let input_color = match state.correctness {
        Correctness::Correct => Color::Green,
        Correctness::Incorrect => Color::Red,
        Correctness::Unknown => Color::White,
    };
    let input_border = if app.focus == Focus::Input {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let input_lines = vec![
        Line::from(vec![
            Span::raw(state.user_input.as_str()).fg(input_color),
            Span::raw("_").fg(Color::DarkGray),
        ]),
        Line::from(spelling_to_components(&state.user_input)).fg(input_color),
    ];
    f.render_widget(
        Paragraph::new(input_lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(input_border)
                .title("入力"),
        ),
        chunks[2],
    );

    // 3. 正確答案 (不正解のときだけ見せる)
    let answer_lines = match (&state.target, state.reveal_answer) {
        (Some(target), true) => vec![
            Line::from(target.spelling.as_str()).fg(Color::Yellow),
            Line::from(spelling_to_components(&target.spelling)).fg(Color::Yellow),
        ],
        _ => Vec::new(),
    };
    f.render_widget(
        Paragraph::new(answer_lines).block(Block::default().borders(Borders::ALL).title("正確答案")),
        chunks[3],
    );

    // 4. 履歴
    let items: Vec<ListItem> = history
        .entries()
        .iter()
        .take(HISTORY_LIMIT)
        .map(|e| {
            let (mark, color) = if e.is_correct {
                ("o", Color::Green)
            } else {
                ("x", Color::Red)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{mark} "), Style::default().fg(color)),
                Span::raw(format!(
                    "{} {} {}",
                    e.character,
                    e.spelling,
                    spelling_to_components(&e.spelling)
                )),
            ]))
        })
        .collect();
    f.render_widget(
        List::new(items).block(Block::default().borders(Borders::TOP).title("履歴")),
        chunks[4],
    );

    // 5. 次へ進めるときはその案内、それ以外はお知らせか操作説明
    let footer = match &app.notice {
        _ if state.awaiting_advance => Line::from("Enter: next").fg(Color::Gray),
        Some(notice) => Line::from(notice.as_str()).fg(Color::Yellow),
        None => Line::from("Enter: check  Ctrl-U: clear  Ctrl-N: skip  Tab: word list  Esc: quit")
            .fg(Color::DarkGray),
    };
    f.render_widget(Paragraph::new(footer), chunks[5]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::WordSelector;
    use crate::word_bank::{FrequentWordSet, WordEntry};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;

    fn screen_text(app: &mut App) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| ui(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn answer_is_shown_only_after_a_wrong_attempt() {
        let bank = vec![WordEntry::new("倉", "OIAR")];
        let mut app = App::new(bank, &FrequentWordSet::new(), WordSelector::from_seed(Some(1)));
        // 字庫パネルの分だけ
        assert_eq!(screen_text(&mut app).matches("OIAR").count(), 1);

        for c in "oiax".chars() {
            app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
        let text = screen_text(&mut app);
        assert!(text.contains("oiax"));
        assert_eq!(text.matches("OIAR").count(), 2);
        assert!(text.contains("Enter: next"));
    }

    #[test]
    fn next_hint_is_not_hidden_by_a_notice() {
        let bank = vec![WordEntry::new("人", "O")];
        let mut app = App::new(bank, &FrequentWordSet::new(), WordSelector::from_seed(Some(1)));
        app.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert!(app.notice.is_some());
        assert!(!screen_text(&mut app).contains("Enter: next"));

        app.handle_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE));
        assert!(screen_text(&mut app).contains("Enter: next"));
    }
}
