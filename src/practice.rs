// ============================================
// src/practice.rs
// 練習セッションの状態遷移
// ============================================
//
// 遷移は `transition(状態, イベント) -> (新しい状態, 副作用)` の純粋関数。
// 画面や乱数には触らないので、呼び出し側が副作用を処理する。

use tracing::trace;

use crate::word_bank::WordEntry;

/// 入力の正誤
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Correctness {
    #[default]
    Unknown,
    Correct,
    Incorrect,
}

/// 状態から導出される段階
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Composing,
    ResolvedCorrect,
    ResolvedIncorrect,
}

/// セッションへの入力イベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PracticeEvent {
    /// お題の設定・変更
    SetTarget(WordEntry),
    /// 入力欄の内容が変わった
    SetInput(String),
    /// 明示的な答え合わせ (Enter)
    Check,
    /// 次のお題へ
    Advance,
    /// 入力欄のクリア
    Clear,
}

/// 呼び出し側に伝える副作用
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// 1問終わった (履歴に積んで次のお題を選ぶ)
    Completed {
        character: String,
        spelling: String,
        is_correct: bool,
    },
    /// 入力欄がクリアされた
    Cleared,
}

/// セッションの状態
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PracticeState {
    pub target: Option<WordEntry>,
    pub user_input: String,
    pub correctness: Correctness,
    pub reveal_answer: bool,
    pub awaiting_advance: bool,
}

impl PracticeState {
    /// お題を設定した直後の状態
    pub fn with_target(target: WordEntry) -> Self {
        Self {
            target: Some(target),
            ..Self::default()
        }
    }

    pub fn phase(&self) -> Phase {
        match (&self.target, self.correctness) {
            (None, _) => Phase::Idle,
            (Some(_), Correctness::Unknown) => Phase::Composing,
            (Some(_), Correctness::Correct) => Phase::ResolvedCorrect,
            (Some(_), Correctness::Incorrect) => Phase::ResolvedIncorrect,
        }
    }

    /// 判定だけを初期値に戻す (入力とお題はそのまま)
    fn unjudged(self) -> Self {
        Self {
            correctness: Correctness::Unknown,
            reveal_answer: false,
            awaiting_advance: false,
            ..self
        }
    }
}

/// 比較用の正規化: 前後の空白を落として大文字にする (途中の空白は残す)
fn normalize(text: &str) -> String {
    text.trim().to_uppercase()
}

/// MARK:状態遷移
pub fn transition(state: &PracticeState, event: PracticeEvent) -> (PracticeState, Vec<Effect>) {
    trace!(?event, phase = ?state.phase(), "practice transition");

    match event {
        PracticeEvent::SetTarget(entry) => (PracticeState::with_target(entry), Vec::new()),

        PracticeEvent::SetInput(text) => (judge_input(state, text), Vec::new()),

        PracticeEvent::Check => (check_explicit(state), Vec::new()),

        PracticeEvent::Advance => match (&state.target, state.awaiting_advance) {
            (Some(target), true) => {
                let effect = Effect::Completed {
                    character: target.character.clone(),
                    spelling: target.spelling.clone(),
                    is_correct: state.correctness == Correctness::Correct,
                };
                // 次のお題は呼び出し側が SetTarget で渡す
                (state.clone(), vec![effect])
            }
            _ => (state.clone(), Vec::new()),
        },

        PracticeEvent::Clear => {
            let cleared = PracticeState {
                user_input: String::new(),
                ..state.clone()
            }
            .unjudged();
            (cleared, vec![Effect::Cleared])
        }
    }
}

/// 入力が変わるたびの自動判定
fn judge_input(state: &PracticeState, text: String) -> PracticeState {
    let next = PracticeState {
        user_input: text,
        ..state.clone()
    }
    .unjudged();

    let Some(target) = &next.target else {
        return next;
    };
    let input = normalize(&next.user_input);
    let answer = normalize(&target.spelling);
    if input.is_empty() || answer.is_empty() {
        return next;
    }

    if input == answer {
        PracticeState {
            correctness: Correctness::Correct,
            awaiting_advance: true,
            ..next
        }
    } else if input.chars().count() == answer.chars().count() {
        // 長さが揃った時点で (打ち終わったとみなして) 不正解にする
        PracticeState {
            correctness: Correctness::Incorrect,
            reveal_answer: true,
            awaiting_advance: true,
            ..next
        }
    } else {
        next
    }
}

/// Enter による答え合わせ (長さは見ず、完全一致かどうかだけ)
fn check_explicit(state: &PracticeState) -> PracticeState {
    if state.awaiting_advance {
        return state.clone();
    }
    let Some(target) = &state.target else {
        return state.clone();
    };
    let input = normalize(&state.user_input);
    if input.is_empty() {
        return state.clone();
    }

    let correct = input == normalize(&target.spelling);
    PracticeState {
        correctness: if correct {
            Correctness::Correct
        } else {
            Correctness::Incorrect
        },
        reveal_answer: !correct,
        ..state.clone()
    }
}

/// 状態を持つ練習セッション
#[derive(Debug, Default)]
pub struct PracticeSession {
    state: PracticeState,
}

impl PracticeSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PracticeState {
        &self.state
    }

    pub fn target(&self) -> Option<&WordEntry> {
        self.state.target.as_ref()
    }

    pub fn is_awaiting_advance(&self) -> bool {
        self.state.awaiting_advance
    }

    /// イベントを適用して副作用を返す
    pub fn apply(&mut self, event: PracticeEvent) -> Vec<Effect> {
        let (next, effects) = transition(&self.state, event);
        self.state = next;
        effects
    }

    pub fn set_target(&mut self, entry: WordEntry) -> Vec<Effect> {
        self.apply(PracticeEvent::SetTarget(entry))
    }

    pub fn set_input(&mut self, text: impl Into<String>) -> Vec<Effect> {
        self.apply(PracticeEvent::SetInput(text.into()))
    }

    pub fn check_explicit(&mut self) -> Vec<Effect> {
        self.apply(PracticeEvent::Check)
    }

    pub fn advance(&mut self) -> Vec<Effect> {
        self.apply(PracticeEvent::Advance)
    }

    pub fn clear(&mut self) -> Vec<Effect> {
        self.apply(PracticeEvent::Clear)
    }
}
