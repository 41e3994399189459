use crate::config::Bm25Params;
use crate::index::NgramIndex;
use crate::{AddressRecord, DocId};
use log::debug;
use roaring::RoaringBitmap;
use std::collections::BTreeMap;

pub trait Signal {
    fn name(&self) -> &'static str;

    /// At most `limit` candidates for an already normalized query.
    fn candidates(&self, query: &str, limit: usize) -> Vec<(DocId, f64)>;
}

pub struct Bm25Scorer {
    pub index: NgramIndex,
    pub k1: f64,
    pub b: f64,
}

impl Bm25Scorer {
    pub fn new(index: NgramIndex, params: &Bm25Params) -> Self {
        Self {
            index,
            k1: params.k1,
            b: params.b,
        }
    }

    /// Raw BM25 score of every document sharing at least one n-gram with
    /// `query`, in doc id order. Repeated query n-grams count every time.
    pub fn score(&self, query: &str) -> Vec<(DocId, f64)> {
        let terms = self.index.tokenize(query);
        let metadata = self.index.metadata();
        if terms.is_empty() || metadata.total_docs() == 0 {
            return Vec::new();
        }

        let mut query_counts: BTreeMap<&str, usize> = BTreeMap::new();
        for term in &terms {
            *query_counts.entry(term.as_str()).or_insert(0) += 1;
        }

        let mut matches = RoaringBitmap::new();
        let mut weighted_terms = Vec::with_capacity(query_counts.len());
        for (term, repeats) in query_counts {
            if let Some(postings) = self.index.get_postings(term) {
                matches |= postings.docs();
                weighted_terms.push((postings, self.index.idf(term) * repeats as f64));
            }
        }

        let avgdl = metadata.average_doc_length();
        let mut scores = Vec::with_capacity(matches.len() as usize);
        for doc in matches.iter() {
            let doc_id = doc as DocId;
            let dl = metadata.doc_length(doc_id) as f64;
            let norm = self.k1 * (1.0 - self.b + self.b * dl / avgdl);

            let mut doc_score = 0.0;
            for (postings, weight) in &weighted_terms {
                let tf = postings.term_frequency(doc_id) as f64;
                if tf > 0.0 {
                    doc_score += weight * (tf * (self.k1 + 1.0)) / (tf + norm);
                }
            }
            scores.push((doc_id, doc_score));
        }
        scores
    }
}

impl Signal for Bm25Scorer {
    fn name(&self) -> &'static str {
        "bm25"
    }

    /// Positive scores only, divided by the best one, so the top candidate is
    /// exactly 1.0.
    fn candidates(&self, query: &str, limit: usize) -> Vec<(DocId, f64)> {
        let mut scored: Vec<(DocId, f64)> = self
            .score(query)
            .into_iter()
            .filter(|(_, s)| *s > 0.0)
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.truncate(limit);

        let Some(max_score) = scored.first().map(|(_, s)| *s) else {
            debug!("[LEXICAL] No positive scores for '{}'", query);
            return scored;
        };
        for (_, s) in scored.iter_mut() {
            *s /= max_score;
        }
        debug!("[LEXICAL] {} candidates, top raw score {:.4}", scored.len(), max_score);
        scored
    }
}

pub struct EditDistanceScorer<'a> {
    records: &'a [AddressRecord],
}

impl<'a> EditDistanceScorer<'a> {
    pub fn new(records: &'a [AddressRecord]) -> Self {
        Self { records }
    }

    pub fn distances(&self, query: &str) -> Vec<usize> {
        self.records
            .iter()
            .map(|r| strsim::damerau_levenshtein(query, &r.canonical_address))
            .collect()
    }
}

impl Signal for EditDistanceScorer<'_> {
    fn name(&self) -> &'static str {
        "damerau_levenshtein"
    }

    /// Min-max scaled similarity `1 - (d - min) / (max - min)` over the whole
    /// dataset; 0.5 for everyone when all distances are equal.
    fn candidates(&self, query: &str, limit: usize) -> Vec<(DocId, f64)> {
        let distances = self.distances(query);
        let (Some(&min), Some(&max)) = (distances.iter().min(), distances.iter().max()) else {
            return Vec::new();
        };

        let similarity = |d: usize| {
            if max == min {
                0.5
            } else {
                1.0 - (d - min) as f64 / (max - min) as f64
            }
        };

        let mut order: Vec<DocId> = (0..distances.len()).collect();
        order.sort_by_key(|&i| distances[i]);

        let result: Vec<(DocId, f64)> = order
            .into_iter()
            .map(|i| (i, similarity(distances[i])))
            .filter(|(_, s)| *s > 0.0)
            .take(limit)
            .collect();
        debug!(
            "[EDIT] {} candidates, distance range {}..={}",
            result.len(),
            min,
            max
        );
        result
    }
}
