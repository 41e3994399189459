use crate::DocId;
use crate::metadata::CorpusMetadata;
use crate::timing::Timer;
use crate::tokenizer::ngrams;
use log::{debug, info};
use roaring::RoaringBitmap;
use std::collections::HashMap;

/// Documents containing one n-gram, with per-document term frequency.
#[derive(Debug, Clone, Default)]
pub struct Postings {
    docs: RoaringBitmap,
    /// Sorted by doc id: documents are indexed in order.
    frequencies: Vec<(DocId, u32)>,
}

impl Postings {
    fn record(&mut self, doc_id: DocId, count: u32) {
        self.docs.insert(doc_id as u32);
        self.frequencies.push((doc_id, count));
    }

    pub fn docs(&self) -> &RoaringBitmap {
        &self.docs
    }

    pub fn term_frequency(&self, doc_id: DocId) -> u32 {
        self.frequencies
            .binary_search_by_key(&doc_id, |&(id, _)| id)
            .map(|pos| self.frequencies[pos].1)
            .unwrap_or(0)
    }

    pub fn contains(&self, doc_id: DocId) -> bool {
        self.docs.contains(doc_id as u32)
    }

    pub fn len(&self) -> usize {
        self.docs.len() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

/// Character n-gram inverted index over canonical addresses, frozen after
/// [`NgramIndex::build`]. IDF values are computed once at build time.
#[derive(Debug, Clone)]
pub struct NgramIndex {
    width: usize,
    postings: HashMap<String, Postings>,
    metadata: CorpusMetadata,
    idf: HashMap<String, f64>,
}

impl NgramIndex {
    /// `epsilon` floors negative IDF values at `epsilon * average_idf`.
    pub fn build<'a>(
        documents: impl IntoIterator<Item = &'a str>,
        width: usize,
        epsilon: f64,
    ) -> Self {
        let timer = Timer::new("NgramIndex::build");
        let mut postings: HashMap<String, Postings> = HashMap::new();
        let mut metadata = CorpusMetadata::new();

        for text in documents {
            let grams = ngrams(text, width);
            let mut counts: HashMap<String, u32> = HashMap::new();
            for gram in &grams {
                *counts.entry(gram.clone()).or_insert(0) += 1;
            }

            let doc_id = metadata.add_document(grams.len(), counts.keys().map(String::as_str));
            for (term, count) in counts {
                postings.entry(term).or_default().record(doc_id, count);
            }
        }

        let idf = compute_idf(&metadata, epsilon);
        timer.finish_with_count(metadata.total_docs());
        info!(
            "[LEXICAL] Indexed {} documents, {} distinct {}-grams, avgdl {:.2}",
            metadata.total_docs(),
            postings.len(),
            width,
            metadata.average_doc_length()
        );

        Self {
            width,
            postings,
            metadata,
            idf,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn metadata(&self) -> &CorpusMetadata {
        &self.metadata
    }

    pub fn term_count(&self) -> usize {
        self.postings.len()
    }

    /// Tokenizes a query the same way documents were tokenized.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        ngrams(text, self.width)
    }

    pub fn get_postings(&self, term: &str) -> Option<&Postings> {
        let result = self.postings.get(term);
        if let Some(postings) = result {
            debug!("[LEXICAL] Found {} docs for term '{}'", postings.len(), term);
        }
        result
    }

    /// IDF of `term`; zero for terms absent from the corpus.
    pub fn idf(&self, term: &str) -> f64 {
        self.idf.get(term).copied().unwrap_or(0.0)
    }
}

/// Okapi IDF `ln(N - df + 0.5) - ln(df + 0.5)`. Terms present in more than
/// half the corpus go negative; those are replaced by `epsilon * mean(idf)`.
fn compute_idf(metadata: &CorpusMetadata, epsilon: f64) -> HashMap<String, f64> {
    let n = metadata.total_docs() as f64;
    let mut idf = HashMap::with_capacity(metadata.term_df.len());
    let mut idf_sum = 0.0;
    let mut negative = Vec::new();

    for (term, &df) in &metadata.term_df {
        let df = df as f64;
        let value = (n - df + 0.5).ln() - (df + 0.5).ln();
        idf_sum += value;
        if value < 0.0 {
            negative.push(term.clone());
        }
        idf.insert(term.clone(), value);
    }

    if idf.is_empty() {
        return idf;
    }

    let floor = epsilon * idf_sum / idf.len() as f64;
    for term in negative {
        idf.insert(term, floor);
    }
    idf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_frequency_counts_repeats() {
        let index = NgramIndex::build(["ааааа", "абв"], 3, 0.25);
        let postings = index.get_postings("ааа").expect("term not found");
        assert!(postings.contains(0));
        assert!(!postings.contains(1));
        assert_eq!(postings.term_frequency(0), 3);
        assert_eq!(postings.term_frequency(1), 0);
    }

    #[test]
    fn test_document_lengths_follow_ngram_count() {
        let index = NgramIndex::build(["абвгд", "аб"], 3, 0.25);
        assert_eq!(index.metadata().doc_length(0), 3);
        assert_eq!(index.metadata().doc_length(1), 0);
        assert_eq!(index.metadata().total_docs(), 2);
    }

    #[test]
    fn test_common_terms_get_floored_idf() {
        let index = NgramIndex::build(["абв", "абв", "абв", "где"], 3, 0.25);
        let rare = index.idf("где");
        let common = index.idf("абв");
        assert!(rare > 0.0);
        // raw idf of "абв" is negative; the floor is 0.25 * mean(raw idf)
        let raw_rare = (4.0_f64 - 1.0 + 0.5).ln() - 1.5_f64.ln();
        let raw_common = 1.5_f64.ln() - 3.5_f64.ln();
        let expected = 0.25 * (raw_rare + raw_common) / 2.0;
        assert!((common - expected).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_term_has_zero_idf() {
        let index = NgramIndex::build(["абв"], 3, 0.25);
        assert_eq!(index.idf("xyz"), 0.0);
        assert!(index.get_postings("xyz").is_none());
    }
}
