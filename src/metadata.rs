use crate::DocId;
use std::collections::HashMap;

/// Corpus-wide term statistics gathered while the lexical index is built.
#[derive(Debug, Clone, Default)]
pub struct CorpusMetadata {
    /// doc_id -> number of n-grams in the document
    pub doc_lengths: Vec<usize>,
    /// Sum of all document lengths (for avgdl calculation)
    pub total_length: usize,
    /// term -> number of documents containing it
    pub term_df: HashMap<String, usize>,
}

impl CorpusMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_docs(&self) -> usize {
        self.doc_lengths.len()
    }

    pub fn doc_length(&self, doc_id: DocId) -> usize {
        self.doc_lengths.get(doc_id).copied().unwrap_or(0)
    }

    pub fn average_doc_length(&self) -> f64 {
        if self.doc_lengths.is_empty() {
            return 0.0;
        }
        self.total_length as f64 / self.doc_lengths.len() as f64
    }

    /// Registers the next document. `distinct_terms` must hold each term once.
    pub fn add_document<'a>(
        &mut self,
        length: usize,
        distinct_terms: impl IntoIterator<Item = &'a str>,
    ) -> DocId {
        let doc_id = self.doc_lengths.len();
        self.doc_lengths.push(length);
        self.total_length += length;
        for term in distinct_terms {
            *self.term_df.entry(term.to_string()).or_insert(0) += 1;
        }
        doc_id
    }
}
