// File: src/hooks.rs
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

const TEMPLATES: [&str; 10] = [
    "이거 {kw} 모르면 {alt} 놓친다",
    "{kw} 성지, 서울 말고 여기가 진짜야",
    "{num}번 먹고 알았다, {kw}는 이렇게 가자",
    "돈 아끼려면 {kw} 여기부터 저장",
    "줄 서는 이유 있음: {kw} 핵심만 정리",
    "{kw} 초보도 실패 없게: 체크리스트",
    "{kw} 대신 이 조합, 현지인 픽",
    "관광객 몰라요: {kw} 숨은 포인트 {num}개",
    "{kw} 가격대비 미쳤다, 동의하면 저장",
    "서울러도 모르는 {kw} 루트 공개",
];
const ALT_WORDS: [&str; 7] = ["지갑", "여름", "주말", "점심", "퇴근길", "데이트", "비오는날"];
const NUMS: [&str; 4] = ["3", "5", "7", "10"];
const DEFAULT_KEYWORD: &str = "오늘의 맛집";
const SAVE_SUFFIX: &str = " | 저장 필수";

/// Always listed first when present in the set.
const CORE_TAGS: [&str; 5] = ["#카페추천", "#travel", "#foodie", "#instafood", "#reels"];

/// (words in the hook, fragments to look for in hashtags)
const TOPIC_RULES: &[(&[&str], &[&str])] = &[
    (&["연남"], &["연남", "yeonnam"]),
    (&["성수"], &["성수", "seongsu"]),
    (&["서울"], &["서울", "seoul"]),
    (&["빙수"], &["빙수"]),
    (&["카페"], &["카페"]),
    (&["맛집"], &["맛집"]),
    (&["후기", "리뷰", "체험"], &["후기", "review", "체험"]),
    (&["가성비", "돈", "예산"], &["budget", "가성비"]),
    (&["숨은", "숨겨진", "비밀"], &["hidden", "숨은"]),
];
const MAX_HOOK_HASHTAGS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HookSettings {
    pub target: usize,
    pub min_words: usize,
    pub max_words: usize,
}

impl Default for HookSettings {
    fn default() -> Self {
        Self {
            target: 20,
            min_words: 8,
            max_words: 14,
        }
    }
}

/// Fills caption templates with ranked keywords.
pub struct HookGenerator {
    settings: HookSettings,
    stopwords: Vec<String>,
}

impl HookGenerator {
    pub fn new(settings: HookSettings, stopwords: Vec<String>) -> Self {
        Self {
            settings,
            stopwords: stopwords.into_iter().filter(|w| !w.is_empty()).collect(),
        }
    }

    /// Deterministic: same keywords in, same hooks out.
    pub fn generate<K: AsRef<str>>(&self, keywords: &[K]) -> Vec<String> {
        let target = self.settings.target;
        let mut hooks = Vec::with_capacity(target);
        let mut seen = HashSet::new();

        let mut i = 0;
        while hooks.len() < target && i < target * 5 {
            i += 1;
            let keyword = if keywords.is_empty() {
                DEFAULT_KEYWORD
            } else {
                keywords[(i - 1) % keywords.len()].as_ref()
            };
            let filled = TEMPLATES[i % TEMPLATES.len()]
                .replace("{kw}", keyword)
                .replace("{alt}", ALT_WORDS[i % ALT_WORDS.len()])
                .replace("{num}", NUMS[i % NUMS.len()]);

            let Some(text) = self.clean(&filled) else {
                continue;
            };
            if self.fits(&text) && !seen.contains(&text) {
                seen.insert(text.clone());
                hooks.push(text);
                continue;
            }
            let extended = format!("{text}{SAVE_SUFFIX}");
            if self.fits(&extended) && !seen.contains(&extended) {
                seen.insert(extended.clone());
                hooks.push(extended);
            }
        }

        debug!(generated = hooks.len(), attempts = i, "generated hooks");
        hooks
    }

    /// Collapses whitespace. `None` when a stopword appears.
    fn clean(&self, text: &str) -> Option<String> {
        let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if self.stopwords.iter().any(|word| text.contains(word.as_str())) {
            None
        } else {
            Some(text)
        }
    }

    fn fits(&self, text: &str) -> bool {
        let words = text.split_whitespace().count();
        (self.settings.min_words..=self.settings.max_words).contains(&words)
    }
}

/// Orders `hashtags` by relevance to one hook: core tags, then topic matches,
/// then everything else. Deduplicated, at most 20.
pub fn rank_hashtags_for_hook(hook: &str, hashtags: &[String]) -> Vec<String> {
    let hook = hook.to_lowercase();
    let mut ordered: Vec<&str> = CORE_TAGS
        .iter()
        .copied()
        .filter(|core| hashtags.iter().any(|tag| tag.as_str() == *core))
        .collect();

    for (hook_words, tag_fragments) in TOPIC_RULES {
        if hook_words.iter().any(|word| hook.contains(word)) {
            ordered.extend(
                hashtags
                    .iter()
                    .map(String::as_str)
                    .filter(|tag| tag_fragments.iter().any(|fragment| tag.contains(fragment))),
            );
        }
    }
    ordered.extend(hashtags.iter().map(String::as_str));

    let mut seen = HashSet::new();
    ordered
        .into_iter()
        .filter(|tag| seen.insert(*tag))
        .take(MAX_HOOK_HASHTAGS)
        .map(str::to_string)
        .collect()
}
