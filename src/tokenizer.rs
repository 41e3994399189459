/// Overlapping character n-grams of `text`: `text[n-k..n]` for every
/// `n` in `k..=len`, counted in chars.
///
/// A string shorter than `k` yields no n-grams at all.
pub fn ngrams(text: &str, k: usize) -> Vec<String> {
    if k == 0 {
        return Vec::new();
    }
    let chars: Vec<char> = text.chars().collect();
    if chars.len() < k {
        return Vec::new();
    }
    chars.windows(k).map(|w| w.iter().collect()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ngrams_overlap() {
        assert_eq!(ngrams("дом25", 3), vec!["дом", "ом2", "м25"]);
    }

    #[test]
    fn test_ngrams_count_chars_not_bytes() {
        // Cyrillic letters are two bytes each in UTF-8.
        let grams = ngrams("улица", 3);
        assert_eq!(grams.len(), 3);
        assert!(grams.iter().all(|g| g.chars().count() == 3));
    }

    #[test]
    fn test_short_text_has_no_ngrams() {
        assert!(ngrams("ул", 3).is_empty());
        assert!(ngrams("", 3).is_empty());
    }

    #[test]
    fn test_exact_width_is_single_ngram() {
        assert_eq!(ngrams("дом", 3), vec!["дом"]);
    }

    #[test]
    fn test_repeated_ngrams_are_kept() {
        let grams = ngrams("ааааа", 3);
        assert_eq!(grams, vec!["ааа", "ааа", "ааа"]);
    }
}
