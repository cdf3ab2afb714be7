//! Best-first exploration of the XOR/rotation/odd-multiplication orbit of an S-box.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::bias::biryukov_perrin_metric;
use crate::sbox::Sbox;
use crate::tables::difference_distribution_table;

/// Configuration for the orbit search.
#[derive(Clone, Debug)]
pub struct SearchConfig {
    /// Number of queue pops to expand. `1` reproduces a single-step probe.
    pub rounds: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { rounds: 1 }
    }
}

/// A transformed S-box together with its metric and derivation label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    /// Derivation, e.g. `S⊕3<<<1·5`.
    pub label: String,
    /// Biryukov-Perrin metric of `sbox`.
    pub metric: u64,
    /// The transformed S-box.
    pub sbox: Sbox,
}

/// Result of [`Searcher::run`].
#[derive(Clone, Debug)]
pub struct SearchOutcome {
    /// Lowest-metric candidate still queued, or the last expanded one if the queue drained.
    pub best: Candidate,
    /// Number of expansions actually executed.
    pub expansions: usize,
    /// Labels of the expanded candidates, in pop order.
    pub expanded: Vec<String>,
    /// Number of candidates generated across all expansions.
    pub generated: usize,
}

/// Orbit searcher ordering candidates by `target - metric`, largest first.
pub struct Searcher {
    config: SearchConfig,
}

struct Queued {
    score: i64,
    candidate: Candidate,
}

impl Queued {
    fn key(&self) -> (i64, Reverse<&str>) {
        (self.score, Reverse(self.candidate.label.as_str()))
    }
}

impl PartialEq for Queued {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Queued {}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Queued {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl Searcher {
    /// Creates a searcher with default configuration.
    pub fn new() -> Self {
        Self {
            config: SearchConfig::default(),
        }
    }

    /// Creates a searcher with explicit configuration.
    pub fn with_config(config: SearchConfig) -> Self {
        Self { config }
    }

    /// Returns a mutable reference to the configuration.
    pub fn config_mut(&mut self) -> &mut SearchConfig {
        &mut self.config
    }

    /// Runs the configured number of expansions starting from `sbox`.
    ///
    /// Each expansion pops the lowest-metric candidate and queues every
    /// `((S ⊕ k) <<< r) · mult` for `k < 2^m`, `r < m` and odd `mult < 2^m`.
    pub fn run(&self, sbox: &Sbox) -> SearchOutcome {
        let m = sbox.input_bits();
        let target = search_target(m);
        let _span = tracing::debug_span!("orbit_search", m, target, rounds = self.config.rounds)
            .entered();

        let root = Candidate {
            label: "S".to_owned(),
            metric: sbox.biryukov_perrin_metric(),
            sbox: sbox.clone(),
        };
        let mut heap = BinaryHeap::new();
        heap.push(Queued {
            score: target - root.metric as i64,
            candidate: root.clone(),
        });

        let mut last = root;
        let mut expansions = 0;
        let mut generated = 0;
        let mut expanded = Vec::new();

        while expansions < self.config.rounds {
            let Some(Queued { candidate, .. }) = heap.pop() else {
                break;
            };
            tracing::debug!(label = %candidate.label, metric = candidate.metric, "expanding");

            for child in expand(&candidate, m) {
                generated += 1;
                heap.push(Queued {
                    score: target - child.metric as i64,
                    candidate: child,
                });
            }
            expanded.push(candidate.label.clone());
            last = candidate;
            expansions += 1;
        }

        let best = heap.pop().map_or(last, |queued| queued.candidate);
        tracing::debug!(label = %best.label, metric = best.metric, generated, "search finished");

        SearchOutcome {
            best,
            expansions,
            expanded,
            generated,
        }
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new()
    }
}

/// `(2^m - 2)² · (2^m - 1)`, the reference value metrics are subtracted from.
pub fn search_target(input_bits: u32) -> i64 {
    let size = 1i64 << input_bits;
    (size - 2) * (size - 2) * (size - 1)
}

fn expand(parent: &Candidate, m: u32) -> Vec<Candidate> {
    let domain = 1u32 << m;
    let mut children = Vec::new();

    for k in 0..domain {
        let xored = parent.sbox.xor(k);
        for r in 0..m {
            let rotated = xored.rotate_left(r);
            for mult in (1..domain).step_by(2) {
                let sbox = rotated.mul(mult);
                // Uncached: queued candidates must not each hold a DDT.
                let metric = biryukov_perrin_metric(&difference_distribution_table(&sbox));
                tracing::trace!(k, r, mult, metric, "candidate");
                children.push(Candidate {
                    label: format!("{}⊕{}<<<{}·{}", parent.label, k, r, mult),
                    metric,
                    sbox,
                });
            }
        }
    }

    children
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRESENT: [u32; 16] = [
        0xc, 0x5, 0x6, 0xb, 0x9, 0x0, 0xa, 0xd, 0x3, 0xe, 0xf, 0x8, 0x4, 0x7, 0x1, 0x2,
    ];

    #[test]
    fn target_matches_formula() {
        assert_eq!(search_target(4), 14 * 14 * 15);
        assert_eq!(search_target(1), 0);
        assert_eq!(search_target(0), 0);
    }

    #[test]
    fn single_round_generates_full_cross_product() {
        let s = Sbox::new(PRESENT.to_vec()).unwrap();
        let outcome = Searcher::new().run(&s);
        assert_eq!(outcome.expansions, 1);
        assert_eq!(outcome.generated, 16 * 4 * 8);
        assert!(outcome.best.label.starts_with("S⊕"));
        let expected = biryukov_perrin_metric(outcome.best.sbox.ddt());
        assert_eq!(outcome.best.metric, expected);
    }

    #[test]
    fn best_candidate_has_minimal_metric_among_children() {
        let s = Sbox::new(vec![0, 1, 3, 6, 7, 4, 5, 2]).unwrap();
        let outcome = Searcher::new().run(&s);
        let root = Candidate {
            label: "S".to_owned(),
            metric: 0,
            sbox: s.clone(),
        };
        let min = expand(&root, 3).iter().map(|c| c.metric).min().unwrap();
        assert_eq!(outcome.best.metric, min);
    }

    #[test]
    fn label_describes_transformation_chain() {
        let s = Sbox::new(vec![0, 1, 3, 6, 7, 4, 5, 2]).unwrap();
        let root = Candidate {
            label: "S".to_owned(),
            metric: s.biryukov_perrin_metric(),
            sbox: s.clone(),
        };
        let children = expand(&root, 3);
        let child = children
            .iter()
            .find(|c| c.label == "S⊕5<<<2·3")
            .expect("label present");
        assert_eq!(child.sbox, s.xor(5).rotate_left(2).mul(3));
    }

    #[test]
    fn more_rounds_expand_more_candidates() {
        let s = Sbox::new(vec![0, 1, 3, 6, 7, 4, 5, 2]).unwrap();
        let outcome = Searcher::with_config(SearchConfig { rounds: 3 }).run(&s);
        assert_eq!(outcome.expansions, 3);
        assert_eq!(outcome.generated, 3 * 8 * 3 * 4);
    }

    #[test]
    fn second_round_expands_lowest_metric_child() {
        let s = Sbox::new(vec![0, 1, 3, 6, 7, 4, 5, 2]).unwrap();
        let root = Candidate {
            label: "S".to_owned(),
            metric: s.biryukov_perrin_metric(),
            sbox: s.clone(),
        };
        let first = expand(&root, 3)
            .into_iter()
            .min_by(|a, b| (a.metric, &a.label).cmp(&(b.metric, &b.label)))
            .unwrap();

        let outcome = Searcher::with_config(SearchConfig { rounds: 2 }).run(&s);
        assert_eq!(outcome.expanded.len(), 2);
        assert_eq!(outcome.expanded[0], "S");
        assert_eq!(outcome.expanded[1], first.label);
    }

    #[test]
    fn zero_rounds_returns_the_input() {
        let s = Sbox::new(PRESENT.to_vec()).unwrap();
        let outcome = Searcher::with_config(SearchConfig { rounds: 0 }).run(&s);
        assert_eq!(outcome.expansions, 0);
        assert!(outcome.expanded.is_empty());
        assert_eq!(outcome.best.label, "S");
        assert_eq!(outcome.best.metric, 96);
    }

    #[test]
    fn drained_queue_reports_last_expansion() {
        // m = 0 has no rotations, so an expansion queues nothing.
        let s = Sbox::new(vec![0]).unwrap();
        let outcome = Searcher::with_config(SearchConfig { rounds: 5 }).run(&s);
        assert_eq!(outcome.expansions, 1);
        assert_eq!(outcome.generated, 0);
        assert_eq!(outcome.best.label, "S");
    }
}
