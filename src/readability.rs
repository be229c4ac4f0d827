//! Flesch-Kincaid grade level

/// Flesch-Kincaid grade level of `text`, rounded to two decimals.
///
/// `0.39 * words/sentences + 11.8 * syllables/words - 15.59`. Text without any
/// words scores 0.0.
pub fn flesch_kincaid_grade(text: &str) -> f64 {
    let words: Vec<&str> = words(text).collect();
    if words.is_empty() {
        return 0.0;
    }

    let word_count = words.len() as f64;
    let sentence_count = sentence_count(text) as f64;
    let syllable_count: usize = words.iter().map(|w| syllables(w)).sum();

    let grade =
        0.39 * (word_count / sentence_count) + 11.8 * (syllable_count as f64 / word_count) - 15.59;
    (grade * 100.0).round() / 100.0
}

/// Whitespace-separated tokens containing at least one letter or digit
fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
        .filter(|w| w.chars().any(char::is_alphanumeric))
}

/// Segments terminated by `.`, `!`, or `?` that contain a word; at least one
fn sentence_count(text: &str) -> usize {
    text.split(['.', '!', '?'])
        .filter(|s| s.chars().any(char::is_alphanumeric))
        .count()
        .max(1)
}

/// Vowel-group syllable estimate with silent-e handling; at least one
pub fn syllables(word: &str) -> usize {
    let letters: Vec<char> = word
        .chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect();

    let is_vowel = |c: char| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');

    let mut count = 0;
    let mut prev_vowel = false;
    for &c in &letters {
        let vowel = is_vowel(c);
        if vowel && !prev_vowel {
            count += 1;
        }
        prev_vowel = vowel;
    }

    let n = letters.len();
    // silent trailing e ("make"), but not "-le" ("table")
    if count > 1 && letters[n - 1] == 'e' && letters[n - 2] != 'l' && !is_vowel(letters[n - 2]) {
        count -= 1;
    }

    count.max(1)
}
