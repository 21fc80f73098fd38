// ============================================
// src/cangjie_mapping.rs
// 倉頡コード (A-Z) → 字根 の変換表
// ============================================

/// A〜Z の順に並べた字根 (A = 日, B = 月, ...)
const COMPONENTS: [char; 26] = [
    '日', '月', '金', '木', '水', '火', '土', // A-G
    '竹', '戈', '十', '大', '中', '一', '弓', // H-N
    '人', '心', '手', '口', '尸', '廿', '山', // O-U
    '女', '田', '難', '卜', '重', // V-Z
];

/// 1文字分の倉頡コードを字根に変換する (A-Z 以外は None)
pub fn component_for(letter: char) -> Option<char> {
    let upper = letter.to_ascii_uppercase();
    if upper.is_ascii_uppercase() {
        Some(COMPONENTS[(upper as u8 - b'A') as usize])
    } else {
        None
    }
}

/// 倉頡の綴り (例: "OIAR") を字根の列 (例: "人戈日口") に変換する
///
/// 表にない文字 (数字・記号・空白など) はそのまま残すので、
/// 出力の文字数は入力と必ず一致する。
pub fn spelling_to_components(spelling: &str) -> String {
    spelling
        .chars()
        .map(|c| component_for(c).unwrap_or(c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_known_spelling() {
        assert_eq!(spelling_to_components("OIAR"), "人戈日口");
    }

    #[test]
    fn lowercase_is_normalized() {
        assert_eq!(spelling_to_components("oiar"), "人戈日口");
        assert_eq!(spelling_to_components("xz"), "難重");
    }

    #[test]
    fn every_letter_has_a_component() {
        for letter in 'A'..='Z' {
            let component = component_for(letter).unwrap();
            assert!(!component.is_ascii());
        }
        assert_eq!(component_for('A'), Some('日'));
        assert_eq!(component_for('M'), Some('一'));
        assert_eq!(component_for('Z'), Some('重'));
    }

    #[test]
    fn unknown_characters_pass_through() {
        assert_eq!(spelling_to_components("O1 -倉"), "人1 -倉");
        assert_eq!(spelling_to_components(""), "");
    }

    #[test]
    fn output_length_matches_input() {
        for input in ["", "a", "OIAR", "hello world!", "ÉÀ12", "倉頡abc"] {
            let output = spelling_to_components(input);
            assert_eq!(output.chars().count(), input.chars().count());
            for (i, o) in input.chars().zip(output.chars()) {
                assert!(o == i || Some(o) == component_for(i));
            }
        }
    }
}
