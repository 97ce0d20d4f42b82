//! Fuzzy string matching utilities using Levenshtein distance
//!
//! Speech-to-text output mangles short phrases ("hey platfrom", "hay platform"),
//! so the wake word is located with a per-word edit-distance tolerance.

/// Fuzzy match using Levenshtein distance, allows ~30% errors
pub fn fuzzy_match(expected: &str, actual: &str) -> bool {
    if expected == actual {
        return true;
    }
    if actual.is_empty() {
        return false;
    }
    let max_dist = (expected.chars().count() / 3).max(1);
    levenshtein(expected, actual) <= max_dist
}

/// Calculate Levenshtein distance between two strings
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut row = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        row[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            row[j] = (prev[j] + 1).min(row[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut row);
    }
    prev[b.len()]
}

/// Lowercase a single spoken token and keep only its letters
pub fn clean_word(word: &str) -> String {
    word.chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Find `phrase` (already lowercase words) inside `tokens`, tolerating small
/// transcription errors per word. Returns the token index just past the match.
pub fn find_phrase(tokens: &[&str], phrase: &[String]) -> Option<usize> {
    if phrase.is_empty() || tokens.len() < phrase.len() {
        return None;
    }
    (0..=tokens.len() - phrase.len()).find_map(|start| {
        let hit = phrase
            .iter()
            .zip(&tokens[start..])
            .all(|(expected, spoken)| fuzzy_match(expected, &clean_word(spoken)));
        hit.then_some(start + phrase.len())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(s: &str) -> Vec<String> {
        s.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn test_exact_match() {
        assert!(fuzzy_match("platform", "platform"));
        assert!(fuzzy_match("hey", "hey"));
    }

    #[test]
    fn test_fuzzy_match() {
        assert!(fuzzy_match("platform", "platfrom"));
        assert!(fuzzy_match("hey", "hay"));
        assert!(fuzzy_match("platform", "platforms"));
    }

    #[test]
    fn test_no_match() {
        assert!(!fuzzy_match("platform", "playground"));
        assert!(!fuzzy_match("hey", ""));
    }

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein("hello", "hello"), 0);
        assert_eq!(levenshtein("hello", "helo"), 1);
        assert_eq!(levenshtein("hello", "world"), 4);
        assert_eq!(levenshtein("", "abc"), 3);
    }

    #[test]
    fn test_clean_word() {
        assert_eq!(clean_word("Platform,"), "platform");
        assert_eq!(clean_word("Hey!"), "hey");
    }

    #[test]
    fn test_find_phrase_anywhere() {
        let phrase = words("hey platform");
        let tokens: Vec<&str> = "okay so Hey, Platform filter by motor".split_whitespace().collect();
        assert_eq!(find_phrase(&tokens, &phrase), Some(4));

        let tokens: Vec<&str> = "filter by motor".split_whitespace().collect();
        assert_eq!(find_phrase(&tokens, &phrase), None);
    }
}
