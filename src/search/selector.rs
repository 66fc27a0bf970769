//! Best-region selection.

use std::fmt;

use super::RegionMatch;
use crate::config::LocatorConfig;
use crate::error::Result;
use crate::layout::{
    cluster_by_proximity, estimate_line_height, Cluster, PageMetrics, ScoredFragment, TextFragment,
};
use crate::ranking::{create_ranking, ClusterRanking};
use crate::terms::{FragmentScorer, NoiseEstimator, TermIndex};
use crate::trace::{starts_with_anchor, AnchorTracer};

/// Height multiplier of the second ladder step.
const RELAXED_HEIGHT_FACTOR: f32 = 1.5;
/// Share of `min_cluster_size` required by the last ladder step.
const WIDTH_ONLY_SIZE_FACTOR: f32 = 0.6;

/// Locates the best-matching region for a set of terms on one page.
///
/// Each call is independent: the term index, metrics and clusters live only
/// for the duration of the call, so repeated calls with the same input return
/// identical results.
pub struct RegionLocator {
    config: LocatorConfig,
    ranking: Box<dyn ClusterRanking>,
}

impl fmt::Debug for RegionLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegionLocator")
            .field("config", &self.config)
            .field("ranking", &self.ranking.name())
            .finish()
    }
}

impl Default for RegionLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl RegionLocator {
    /// Create a locator with the default configuration.
    pub fn new() -> Self {
        let config = LocatorConfig::default();
        let ranking = create_ranking(&config);
        Self { config, ranking }
    }

    /// Create a locator with a custom configuration.
    pub fn with_config(config: LocatorConfig) -> Result<Self> {
        config.validate()?;
        let ranking = create_ranking(&config);
        Ok(Self { config, ranking })
    }

    /// The configuration in use.
    pub fn config(&self) -> &LocatorConfig {
        &self.config
    }

    /// Locate `terms` among `fragments`.
    ///
    /// Returns `None` when nothing qualifies; that is an ordinary outcome.
    pub fn locate<S: AsRef<str>>(&self, terms: &[S], fragments: &[TextFragment]) -> Option<RegionMatch> {
        let index = TermIndex::new(terms);
        self.locate_with_index(&index, fragments)
    }

    /// Locate the terms of a prebuilt index among `fragments`.
    pub fn locate_with_index(&self, index: &TermIndex, fragments: &[TextFragment]) -> Option<RegionMatch> {
        if index.is_empty() || fragments.is_empty() {
            log::debug!(
                "Nothing to locate: {} terms, {} fragments",
                index.len(),
                fragments.len()
            );
            return None;
        }

        let mut anchor = self.config.normalized_anchor();

        if let Some(a) = anchor.clone() {
            let a = a.as_str();
            let line_height = estimate_line_height(fragments);
            let tracer = AnchorTracer::new(index, a, line_height)
                .with_low_coverage_cutoff(self.config.trace_low_coverage_cutoff);
            if let Some(trace) = tracer.locate(fragments) {
                if trace.len() >= 2 {
                    return Some(RegionMatch::Trace(trace));
                }
                log::debug!("Anchor trace too short, falling back to clustering");
            }

            if !fragments
                .iter()
                .any(|f| f.text.trim().to_lowercase().contains(a))
            {
                log::debug!("Anchor '{}' absent from page, clustering without it", a);
                anchor = None;
            }
        }

        let config = match anchor {
            Some(_) => self.config.clone(),
            None => LocatorConfig {
                anchor_term: None,
                ..self.config.clone()
            },
        };
        let metrics = PageMetrics::derive(fragments, &config);

        let scored = score_fragments(index, fragments, config.effective_noise_threshold());
        let clusters = cluster_by_proximity(&scored, &metrics.thresholds);
        let ranked = self.ranking.rank(clusters, index);
        log::debug!(
            "{} scored fragments, {} clusters ranked by {}",
            scored.len(),
            ranked.len(),
            self.ranking.name()
        );

        let candidates = match anchor.as_deref() {
            Some(a) => filter_by_anchor(ranked, a),
            None => ranked,
        };

        select_from_ladder(candidates, &metrics, self.config.min_cluster_size).map(RegionMatch::Cluster)
    }
}

/// Locate `terms` among `fragments` with `config`.
///
/// Fails only for an invalid configuration.
pub fn locate_region<S: AsRef<str>>(
    terms: &[S],
    fragments: &[TextFragment],
    config: LocatorConfig,
) -> Result<Option<RegionMatch>> {
    Ok(RegionLocator::with_config(config)?.locate(terms, fragments))
}

/// Score every fragment and keep those worth clustering.
///
/// Fragments scoring 0 are dropped, as are fragments with at least two tokens
/// whose noise ratio exceeds `noise_threshold`.
pub fn score_fragments(
    index: &TermIndex,
    fragments: &[TextFragment],
    noise_threshold: f64,
) -> Vec<ScoredFragment> {
    let scorer = FragmentScorer::new(index);
    let estimator = NoiseEstimator::new(index);

    let mut noisy = 0usize;
    let kept: Vec<ScoredFragment> = fragments
        .iter()
        .enumerate()
        .filter_map(|(i, fragment)| {
            let score = scorer.score(&fragment.text);
            if score.score == 0 {
                return None;
            }
            let noise = estimator.estimate(&fragment.text);
            if noise.token_count >= 2 && noise.noise_ratio > noise_threshold {
                noisy += 1;
                log::trace!(
                    "Dropping noisy fragment {} ({:.2}): {:?}",
                    i,
                    noise.noise_ratio,
                    fragment.text
                );
                return None;
            }
            Some(ScoredFragment::new(i, fragment, score))
        })
        .collect();

    log::debug!(
        "Scored {} fragments: {} kept, {} dropped as noise",
        fragments.len(),
        kept.len(),
        noisy
    );
    kept
}

/// Keep clusters holding the anchor, strictest form first.
fn filter_by_anchor(clusters: Vec<Cluster>, anchor: &str) -> Vec<Cluster> {
    let normalized = |m: &ScoredFragment| m.text.trim().to_lowercase();

    let starting: Vec<Cluster> = clusters
        .iter()
        .filter(|c| c.members.iter().any(|m| starts_with_anchor(&normalized(m), anchor)))
        .cloned()
        .collect();
    if !starting.is_empty() {
        return starting;
    }

    let containing: Vec<Cluster> = clusters
        .iter()
        .filter(|c| c.members.iter().any(|m| normalized(m).contains(anchor)))
        .cloned()
        .collect();
    if !containing.is_empty() {
        log::debug!("No cluster starts with anchor '{}', using clusters containing it", anchor);
        return containing;
    }

    log::debug!("No cluster holds anchor '{}', keeping all clusters", anchor);
    clusters
}

/// Apply the three-step acceptance ladder to ranked clusters.
fn select_from_ladder(ranked: Vec<Cluster>, metrics: &PageMetrics, min_cluster_size: usize) -> Option<Cluster> {
    let fits = |c: &Cluster, max_height: f32| {
        c.len() >= min_cluster_size && c.bounds.height <= max_height && c.bounds.width <= metrics.max_width
    };

    if let Some(pos) = ranked.iter().position(|c| fits(c, metrics.max_height)) {
        log::debug!("Ladder step 1 accepted cluster of {} fragments", ranked[pos].len());
        return ranked.into_iter().nth(pos);
    }

    let relaxed_height = metrics.max_height * RELAXED_HEIGHT_FACTOR;
    if let Some(pos) = ranked.iter().position(|c| fits(c, relaxed_height)) {
        log::debug!("Ladder step 2 accepted cluster of {} fragments", ranked[pos].len());
        return ranked.into_iter().nth(pos);
    }

    let min_size = ((WIDTH_ONLY_SIZE_FACTOR * min_cluster_size as f32).floor() as usize).max(2);
    match ranked.into_iter().find(|c| c.bounds.width <= metrics.max_width) {
        Some(top) if top.len() >= min_size => {
            log::debug!("Ladder step 3 accepted cluster of {} fragments", top.len());
            Some(top)
        },
        _ => {
            log::debug!("No cluster passed the acceptance ladder");
            None
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;

    fn frag(text: &str, x: f32, y: f32, w: f32) -> TextFragment {
        TextFragment::new(text, Rect::new(x, y, w, 12.0))
    }

    fn metrics() -> PageMetrics {
        PageMetrics::derive(&[frag("x", 0.0, 0.0, 10.0)], &LocatorConfig::new())
    }

    fn cluster_of(n: usize, width: f32, line_step: f32) -> Cluster {
        let members = (0..n)
            .map(|i| {
                ScoredFragment::new(
                    i,
                    &frag("gianna", 0.0, line_step * i as f32, width),
                    crate::terms::FragmentScore {
                        score: 10,
                        kind: crate::terms::MatchKind::Exact,
                    },
                )
            })
            .collect();
        Cluster::from_members(members).unwrap()
    }

    #[test]
    fn test_score_fragments_drops_zero_and_noise() {
        let index = TermIndex::new(&["gianna"]);
        let fragments = vec![
            frag("Gianna", 0.0, 0.0, 40.0),
            frag("weather", 0.0, 14.0, 40.0),
            frag("Gianna said that the weather was fine", 0.0, 28.0, 240.0),
            frag("Gianna Rossi", 0.0, 42.0, 80.0),
        ];
        let kept = score_fragments(&index, &fragments, 0.7);
        let indices: Vec<usize> = kept.iter().map(|f| f.index).collect();
        assert_eq!(indices, vec![0, 3]);
    }

    #[test]
    fn test_ladder_step_one_prefers_rank_order() {
        // line height 12: max height 96, max width 432
        let m = metrics();
        let first = cluster_of(5, 50.0, 14.0);
        let second = cluster_of(6, 60.0, 14.0);
        let chosen = select_from_ladder(vec![first.clone(), second], &m, 5).unwrap();
        assert_eq!(chosen, first);
    }

    #[test]
    fn test_ladder_step_two_relaxes_height() {
        let m = metrics();
        // 5 members spaced 25 apart: height 112 > 96 but <= 144
        let tall = cluster_of(5, 50.0, 25.0);
        assert!(select_from_ladder(vec![tall], &m, 5).is_some());
        // spaced 40 apart: height 172 > 144, falls to step three
        let taller = cluster_of(5, 50.0, 40.0);
        assert_eq!(select_from_ladder(vec![taller.clone()], &m, 5), Some(taller));
    }

    #[test]
    fn test_ladder_step_three_requires_min_size() {
        let m = metrics();
        // floor(0.6 * 5) = 3
        assert!(select_from_ladder(vec![cluster_of(2, 50.0, 14.0)], &m, 5).is_none());
        assert!(select_from_ladder(vec![cluster_of(3, 50.0, 14.0)], &m, 5).is_some());
        // too wide for every step
        assert!(select_from_ladder(vec![cluster_of(6, 500.0, 14.0)], &m, 5).is_none());
    }

    #[test]
    fn test_ladder_step_three_floor_is_two() {
        let m = metrics();
        // floor(0.6 * 2) = 1, raised to 2
        assert!(select_from_ladder(vec![cluster_of(1, 50.0, 14.0)], &m, 2).is_none());
        // floor(0.6 * 3) = 1, raised to 2
        assert!(select_from_ladder(vec![cluster_of(2, 50.0, 14.0)], &m, 3).is_some());
    }

    #[test]
    fn test_filter_by_anchor_relaxes() {
        let start = cluster_of(1, 10.0, 14.0);
        let mut with_start = start.clone();
        with_start.members[0].text = "4 Vgl. Schmidt".to_string();
        let mut with_mention = start.clone();
        with_mention.members[0].text = "siehe Fn. 4".to_string();

        let filtered = filter_by_anchor(vec![with_mention.clone(), with_start.clone()], "4");
        assert_eq!(filtered, vec![with_start]);

        let relaxed = filter_by_anchor(vec![start.clone(), with_mention.clone()], "4");
        assert_eq!(relaxed, vec![with_mention]);

        let untouched = filter_by_anchor(vec![start.clone()], "4");
        assert_eq!(untouched, vec![start]);
    }

    #[test]
    fn test_empty_inputs() {
        let locator = RegionLocator::new();
        let empty: &[&str] = &[];
        assert!(locator.locate(empty, &[frag("Gianna", 0.0, 0.0, 40.0)]).is_none());
        assert!(locator.locate(&["gianna"], &[]).is_none());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = LocatorConfig::new().with_min_cluster_size(0);
        assert!(RegionLocator::with_config(config).is_err());
    }
}
