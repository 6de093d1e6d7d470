//! Keyword sets built from the embedded lists, with case-insensitive
//! matching.
//!
//! Keywords that start or end in a spaced script (Latin, Cyrillic) must sit
//! on a word boundary there, so "complete" does not match "incomplete".
//! CJK keywords match anywhere, since those scripts do not separate words.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::defaults::KEYWORD_LISTS;

/// What a keyword signals when found in notification text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordKind {
    Answer,
    Decline,
    Speaker,
    Finished,
}

impl KeywordKind {
    pub const ALL: [KeywordKind; 4] = [Self::Answer, Self::Decline, Self::Speaker, Self::Finished];
}

/// Lower-cased keywords grouped by kind.
#[derive(Debug, Clone, Default)]
pub struct KeywordSet {
    words: HashMap<KeywordKind, Vec<String>>,
    patterns: HashMap<KeywordKind, Regex>,
}

static BUILTIN: LazyLock<KeywordSet> = LazyLock::new(|| {
    let set = KeywordSet::from_embedded();
    tracing::debug!(
        answer = set.len(KeywordKind::Answer),
        decline = set.len(KeywordKind::Decline),
        speaker = set.len(KeywordKind::Speaker),
        finished = set.len(KeywordKind::Finished),
        "Loaded builtin keyword lists"
    );
    set
});

/// The keyword set compiled into the binary.
pub fn builtin() -> &'static KeywordSet {
    &BUILTIN
}

impl KeywordSet {
    /// Build a set from every embedded language list.
    pub fn from_embedded() -> Self {
        let mut set = Self::default();
        for list in KEYWORD_LISTS {
            parse_lines(list.answer, KeywordKind::Answer, &mut set);
            parse_lines(list.decline, KeywordKind::Decline, &mut set);
            parse_lines(list.speaker, KeywordKind::Speaker, &mut set);
            parse_lines(list.finished, KeywordKind::Finished, &mut set);
        }
        for kind in KeywordKind::ALL {
            set.compile(kind);
        }
        set
    }

    /// Add one keyword. Blank input and duplicates are ignored.
    pub fn insert(&mut self, kind: KeywordKind, word: &str) {
        if self.push(kind, word) {
            self.compile(kind);
        }
    }

    fn push(&mut self, kind: KeywordKind, word: &str) -> bool {
        let w = word.trim().to_lowercase();
        if w.is_empty() {
            return false;
        }
        let words = self.words.entry(kind).or_default();
        if words.contains(&w) {
            return false;
        }
        words.push(w);
        true
    }

    fn compile(&mut self, kind: KeywordKind) {
        let Some(words) = self.words.get(&kind).filter(|w| !w.is_empty()) else {
            self.patterns.remove(&kind);
            return;
        };
        let alternation = words.iter().map(|w| word_pattern(w)).collect::<Vec<_>>().join("|");
        match Regex::new(&format!("(?i)(?:{alternation})")) {
            Ok(re) => {
                self.patterns.insert(kind, re);
            }
            Err(e) => tracing::warn!(?kind, "Failed to compile keyword pattern: {e}"),
        }
    }

    /// Number of keywords of a kind.
    pub fn len(&self, kind: KeywordKind) -> usize {
        self.words.get(&kind).map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.words.values().all(Vec::is_empty)
    }

    /// Whether `text` contains any keyword of `kind` (case-insensitive).
    pub fn matches(&self, kind: KeywordKind, text: &str) -> bool {
        self.patterns.get(&kind).is_some_and(|re| re.is_match(text))
    }

    /// First kind among `kinds` (in the given order) that `text` matches.
    pub fn classify(&self, text: &str, kinds: &[KeywordKind]) -> Option<KeywordKind> {
        kinds.iter().copied().find(|&kind| self.matches(kind, text))
    }
}

fn parse_lines(content: &str, kind: KeywordKind, out: &mut KeywordSet) {
    for line in content.lines() {
        out.push(kind, line);
    }
}

fn word_pattern(word: &str) -> String {
    let bounded = |c: Option<char>| c.is_some_and(|c| c.is_alphanumeric() && !is_unspaced(c));
    let mut pattern = String::new();
    if bounded(word.chars().next()) {
        pattern.push_str(r"\b");
    }
    pattern.push_str(&regex::escape(word));
    if bounded(word.chars().next_back()) {
        pattern.push_str(r"\b");
    }
    pattern
}

/// Han, kana and Hangul.
fn is_unspaced(c: char) -> bool {
    matches!(
        c as u32,
        0x1100..=0x11FF | 0x3040..=0x30FF | 0x3400..=0x4DBF | 0x4E00..=0x9FFF | 0xAC00..=0xD7AF
            | 0xF900..=0xFAFF
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_lists_are_loaded() {
        let set = builtin();
        for kind in KeywordKind::ALL {
            assert!(set.len(kind) > 0, "no keywords for {kind:?}");
        }
    }

    #[test]
    fn latin_keywords_need_word_boundaries() {
        let set = builtin();
        assert!(set.matches(KeywordKind::Finished, "Upload complete."));
        assert!(set.matches(KeywordKind::Finished, "Done!"));
        assert!(!set.matches(KeywordKind::Finished, "Upload incomplete, retrying"));
        assert!(!set.matches(KeywordKind::Finished, "Changes undone"));
        assert!(!set.matches(KeywordKind::Finished, "Download abandoned"));
        assert!(set.matches(KeywordKind::Finished, "Загрузка завершено"));
    }

    #[test]
    fn cjk_keywords_match_inside_words() {
        let set = builtin();
        assert!(set.matches(KeywordKind::Finished, "文件下载完成了"));
        assert!(set.matches(KeywordKind::Finished, "다운로드완료됨"));
    }

    #[test]
    fn inserted_keyword_is_matchable() {
        let mut set = KeywordSet::default();
        assert!(!set.matches(KeywordKind::Speaker, "loud"));
        set.insert(KeywordKind::Speaker, "Loud");
        assert!(set.matches(KeywordKind::Speaker, "Go LOUD"));
        assert!(!set.matches(KeywordKind::Speaker, "cloudy"));
    }

    #[test]
    fn matching_is_case_insensitive() {
        let set = builtin();
        assert!(set.matches(KeywordKind::Answer, "ANSWER"));
        assert!(set.matches(KeywordKind::Decline, "Decline call"));
        assert!(set.matches(KeywordKind::Speaker, "Turn on Speaker"));
        assert!(!set.matches(KeywordKind::Answer, "Mute"));
    }

    #[test]
    fn matches_non_latin_languages() {
        let set = builtin();
        assert!(set.matches(KeywordKind::Answer, "接听"));
        assert!(set.matches(KeywordKind::Decline, "Отклонить"));
        assert!(set.matches(KeywordKind::Finished, "ダウンロード完了"));
    }

    #[test]
    fn classify_respects_kind_order() {
        let mut set = KeywordSet::default();
        set.insert(KeywordKind::Answer, "ok");
        set.insert(KeywordKind::Decline, "ok");
        assert_eq!(
            set.classify("OK", &[KeywordKind::Decline, KeywordKind::Answer]),
            Some(KeywordKind::Decline)
        );
        assert_eq!(set.classify("nothing", &KeywordKind::ALL), None);
    }

    #[test]
    fn insert_skips_blank_and_duplicates() {
        let mut set = KeywordSet::default();
        set.insert(KeywordKind::Speaker, "  ");
        set.insert(KeywordKind::Speaker, "Speaker");
        set.insert(KeywordKind::Speaker, "speaker ");
        assert_eq!(set.len(KeywordKind::Speaker), 1);
    }
}
