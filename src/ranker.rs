use crate::scorer::Signal;
use crate::{DocId, ScoredCandidate, Weights};
use log::{debug, info};
use std::collections::HashMap;

/// Fuses the edit-distance and lexical signals into one ranked list.
pub struct HybridRanker<'a> {
    pub edit: &'a dyn Signal,
    pub lexical: &'a dyn Signal,
    /// Each signal is asked for `top_n * candidate_multiplier` candidates.
    pub candidate_multiplier: usize,
}

impl HybridRanker<'_> {
    /// `query` must already be in canonical form.
    pub fn rank(&self, query: &str, top_n: usize, weights: Weights) -> Vec<ScoredCandidate> {
        if weights.is_zero() || !weights.is_finite() || top_n == 0 {
            debug!("[RANKER] Nothing to rank (top_n={}, weights={:?})", top_n, weights);
            return Vec::new();
        }

        let pool = top_n.saturating_mul(self.candidate_multiplier);
        let edit = self.edit.candidates(query, pool);
        let lexical = self.lexical.candidates(query, pool);
        info!(
            "[RANKER] {} returned {}, {} returned {} candidates",
            self.edit.name(),
            edit.len(),
            self.lexical.name(),
            lexical.len()
        );

        fuse(&edit, &lexical, weights, top_n)
    }
}

#[derive(Debug)]
struct Accumulator {
    record_index: DocId,
    edit: Option<f64>,
    lexical: Option<f64>,
    sum: f64,
    count: u32,
}

/// Averages each record's weighted scores over the signals that actually
/// returned it, then keeps the best `top_n`. Ties keep first-seen order:
/// edit candidates in their order, then lexical-only ones in theirs.
pub fn fuse(
    edit: &[(DocId, f64)],
    lexical: &[(DocId, f64)],
    weights: Weights,
    top_n: usize,
) -> Vec<ScoredCandidate> {
    let mut slots: Vec<Accumulator> = Vec::with_capacity(edit.len() + lexical.len());
    let mut position: HashMap<DocId, usize> = HashMap::with_capacity(slots.capacity());

    let mut slot = |doc: DocId| -> usize {
        *position.entry(doc).or_insert_with(|| {
            slots.push(Accumulator {
                record_index: doc,
                edit: None,
                lexical: None,
                sum: 0.0,
                count: 0,
            });
            slots.len() - 1
        })
    };

    let mut edit_slots = Vec::with_capacity(edit.len());
    for &(doc, _) in edit {
        edit_slots.push(slot(doc));
    }
    let mut lexical_slots = Vec::with_capacity(lexical.len());
    for &(doc, _) in lexical {
        lexical_slots.push(slot(doc));
    }

    for (&at, &(_, score)) in edit_slots.iter().zip(edit) {
        let acc = &mut slots[at];
        acc.edit = Some(score);
        acc.sum += score * weights.edit;
        acc.count += 1;
    }
    for (&at, &(_, score)) in lexical_slots.iter().zip(lexical) {
        let acc = &mut slots[at];
        acc.lexical = Some(score);
        acc.sum += score * weights.lexical;
        acc.count += 1;
    }

    let mut ranked: Vec<ScoredCandidate> = slots
        .into_iter()
        .map(|acc| ScoredCandidate {
            record_index: acc.record_index,
            edit_score: acc.edit,
            lexical_score: acc.lexical,
            combined_score: acc.sum / f64::from(acc.count),
        })
        .collect();
    ranked.sort_by(|a, b| b.combined_score.total_cmp(&a.combined_score));
    ranked.truncate(top_n);
    ranked
}
