//! Text normalization and lightweight token helpers

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("Invalid punctuation regex"));

static NORMALIZE_STOP_WORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:and|of|in|the|&)\b").expect("Invalid stop word regex"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

static KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[a-z]{3,}\b").expect("Invalid keyword regex"));

/// Known spacing artifacts left behind by PDF/DOCX text extraction.
static OCR_FIXUPS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"(?i)java\s+script", "javascript"),
        (r"(?i)tensor\s*f\s*low", "tensorflow"),
        (r"(?i)matplo\s*tlib", "matplotlib"),
        (r"(?i)scikit\s*-\s*learn", "scikit-learn"),
    ]
    .into_iter()
    .map(|(pattern, replacement)| (Regex::new(pattern).expect("Invalid fixup regex"), replacement))
    .collect()
});

const KEYWORD_STOP_WORDS: &[&str] = &[
    "the", "a", "an", "in", "on", "at", "for", "of", "with", "by", "is", "are", "was", "were",
];

/// Canonicalize free text for comparison: lowercase, drop punctuation,
/// remove the stop words `and`, `of`, `in`, `the`, `&`, collapse whitespace.
///
/// Total: empty input gives an empty string.
pub fn normalize_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let lowered = text.to_lowercase();
    let without_punctuation = PUNCTUATION.replace_all(&lowered, "");
    let without_stop_words = NORMALIZE_STOP_WORDS.replace_all(&without_punctuation, " ");
    WHITESPACE
        .replace_all(&without_stop_words, " ")
        .trim()
        .to_string()
}

/// Repair extraction artifacts such as "java script" or "tensor f low".
pub fn apply_ocr_fixups(text: &str) -> String {
    let mut fixed = text.to_string();
    for (pattern, replacement) in OCR_FIXUPS.iter() {
        fixed = pattern.replace_all(&fixed, *replacement).into_owned();
    }
    fixed
}

/// Lowercase alphabetic words of three or more letters, minus common stop words.
pub fn keyword_set(text: &str) -> HashSet<String> {
    let lowered = text.to_lowercase();
    KEYWORD
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|word| !KEYWORD_STOP_WORDS.contains(word))
        .map(str::to_string)
        .collect()
}

/// Jaccard overlap of the keyword sets of two texts.
///
/// Returns 0.0 when either text is empty or the second yields no keywords.
pub fn keyword_similarity(text: &str, reference: &str) -> f64 {
    if text.is_empty() || reference.is_empty() {
        return 0.0;
    }

    let words = keyword_set(text);
    let reference_words = keyword_set(reference);
    if reference_words.is_empty() {
        return 0.0;
    }

    let intersection = words.intersection(&reference_words).count();
    let union = words.union(&reference_words).count();

    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}

/// Best-aligned substring similarity on a 0-100 scale.
///
/// The shorter string is slid across the longer one and each equally long
/// window is compared with normalized Levenshtein similarity.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let a_len = a.chars().count();
    let b_len = b.chars().count();
    let (short, long, short_len) = if a_len <= b_len { (a, b, a_len) } else { (b, a, b_len) };

    let long_chars: Vec<char> = long.chars().collect();
    let mut best = 0.0_f64;

    for start in 0..=(long_chars.len() - short_len) {
        let window: String = long_chars[start..start + short_len].iter().collect();
        let score = strsim::normalized_levenshtein(short, &window);
        if score > best {
            best = score;
            if best >= 1.0 {
                break;
            }
        }
    }

    (best * 100.0).round()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degree_field() {
        assert_eq!(
            normalize_text("B.E. in Computer Science & Engineering"),
            "be computer science engineering"
        );
    }

    #[test]
    fn test_normalize_empty_and_whitespace() {
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text("   \t\n "), "");
        assert_eq!(normalize_text("The  Theory of   Everything"), "theory everything");
    }

    #[test]
    fn test_stop_words_are_whole_words_only() {
        assert_eq!(normalize_text("Android Development"), "android development");
        assert_eq!(normalize_text("Information and Theory"), "information theory");
    }

    #[test]
    fn test_ocr_fixups() {
        let fixed = apply_ocr_fixups("Java Script, Tensor F low and scikit - learn, matplo tlib");
        assert_eq!(fixed, "javascript, tensorflow and scikit-learn, matplotlib");
    }

    #[test]
    fn test_keyword_set_filters_short_and_stop_words() {
        let words = keyword_set("The Rust developer WAS working on an API with Go");
        assert!(words.contains("rust"));
        assert!(words.contains("developer"));
        assert!(words.contains("api"));
        assert!(!words.contains("the"));
        assert!(!words.contains("was"));
        assert!(!words.contains("go"));
    }

    #[test]
    fn test_keyword_similarity_bounds() {
        assert_eq!(keyword_similarity("", "python developer"), 0.0);
        assert_eq!(keyword_similarity("python developer", ""), 0.0);
        assert_eq!(keyword_similarity("python developer", "python developer"), 1.0);

        let partial = keyword_similarity("python developer", "python engineer");
        assert!((partial - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_partial_ratio() {
        assert_eq!(partial_ratio("computer science", "computer science engineering"), 100.0);
        assert_eq!(partial_ratio("", "anything"), 0.0);
        assert!(partial_ratio("mechanical", "computer science") < 85.0);
    }
}
