//! Embedded default keyword lists for 8 languages.

/// A single language's embedded keyword lists, one keyword per line.
pub struct EmbeddedKeywordList {
    pub language: &'static str,
    pub answer: &'static str,
    pub decline: &'static str,
    pub speaker: &'static str,
    pub finished: &'static str,
}

/// All embedded keyword lists (8 languages).
pub const KEYWORD_LISTS: &[EmbeddedKeywordList] = &[
    EmbeddedKeywordList {
        language: "de",
        answer: include_str!("../defaults/de/answer.txt"),
        decline: include_str!("../defaults/de/decline.txt"),
        speaker: include_str!("../defaults/de/speaker.txt"),
        finished: include_str!("../defaults/de/finished.txt"),
    },
    EmbeddedKeywordList {
        language: "en",
        answer: include_str!("../defaults/en/answer.txt"),
        decline: include_str!("../defaults/en/decline.txt"),
        speaker: include_str!("../defaults/en/speaker.txt"),
        finished: include_str!("../defaults/en/finished.txt"),
    },
    EmbeddedKeywordList {
        language: "es",
        answer: include_str!("../defaults/es/answer.txt"),
        decline: include_str!("../defaults/es/decline.txt"),
        speaker: include_str!("../defaults/es/speaker.txt"),
        finished: include_str!("../defaults/es/finished.txt"),
    },
    EmbeddedKeywordList {
        language: "fr",
        answer: include_str!("../defaults/fr/answer.txt"),
        decline: include_str!("../defaults/fr/decline.txt"),
        speaker: include_str!("../defaults/fr/speaker.txt"),
        finished: include_str!("../defaults/fr/finished.txt"),
    },
    EmbeddedKeywordList {
        language: "ja",
        answer: include_str!("../defaults/ja/answer.txt"),
        decline: include_str!("../defaults/ja/decline.txt"),
        speaker: include_str!("../defaults/ja/speaker.txt"),
        finished: include_str!("../defaults/ja/finished.txt"),
    },
    EmbeddedKeywordList {
        language: "ko",
        answer: include_str!("../defaults/ko/answer.txt"),
        decline: include_str!("../defaults/ko/decline.txt"),
        speaker: include_str!("../defaults/ko/speaker.txt"),
        finished: include_str!("../defaults/ko/finished.txt"),
    },
    EmbeddedKeywordList {
        language: "ru",
        answer: include_str!("../defaults/ru/answer.txt"),
        decline: include_str!("../defaults/ru/decline.txt"),
        speaker: include_str!("../defaults/ru/speaker.txt"),
        finished: include_str!("../defaults/ru/finished.txt"),
    },
    EmbeddedKeywordList {
        language: "zh",
        answer: include_str!("../defaults/zh/answer.txt"),
        decline: include_str!("../defaults/zh/decline.txt"),
        speaker: include_str!("../defaults/zh/speaker.txt"),
        finished: include_str!("../defaults/zh/finished.txt"),
    },
];
