//! Property tests for term normalization, scoring and clustering.

use proptest::prelude::*;
use region_locator::geometry::Rect;
use region_locator::layout::{cluster_by_proximity, ClusterThresholds, ScoredFragment, TextFragment};
use region_locator::search::RegionLocator;
use region_locator::terms::{FragmentScore, FragmentScorer, MatchKind, TermIndex};

const VOCABULARY: [&str; 8] = [
    "Gianna", "Gian-", "na Rossi", "Rossi", "4 Vgl.", "weather", "accepted", "Dr.Gianna",
];

fn scored(index: usize, x: f32, y: f32) -> ScoredFragment {
    ScoredFragment::new(
        index,
        &TextFragment::new("gianna", Rect::new(x, y, 20.0, 10.0)),
        FragmentScore {
            score: 10,
            kind: MatchKind::Exact,
        },
    )
}

fn thresholds(horizontal: f32) -> ClusterThresholds {
    ClusterThresholds {
        vertical: 56.0,
        horizontal,
        column_gap: 120.0,
    }
}

proptest! {
    #[test]
    fn term_set_is_normalized_and_unique(raw in prop::collection::vec("[A-Za-z ]{0,8}", 0..12)) {
        let index = TermIndex::new(&raw);
        let terms: Vec<&str> = index.terms().collect();

        for term in &terms {
            prop_assert!(!term.is_empty());
            prop_assert_eq!(*term, term.trim().to_lowercase());
        }
        let mut deduped = terms.clone();
        deduped.sort_unstable();
        deduped.dedup();
        prop_assert_eq!(deduped.len(), terms.len());

        for r in &raw {
            let normalized = r.trim().to_lowercase();
            prop_assert_eq!(normalized.is_empty(), !index.contains(&normalized));
        }
    }

    #[test]
    fn containment_finds_embedded_terms(
        term in "[a-z]{3,10}",
        before in "[a-z0-9.]{0,5}",
        after in "[a-z0-9.]{0,5}",
    ) {
        let index = TermIndex::new(&[term.as_str()]);
        let text = format!("{}{}{}", before, term.to_uppercase(), after);
        prop_assert!(index.containment_matches(&text));
    }

    #[test]
    fn short_terms_never_contained(term in "[a-z0-9]{1,2}", text in "[a-z0-9]{0,12}") {
        let index = TermIndex::new(&[term.as_str()]);
        prop_assert!(!index.containment_matches(&text));
    }

    #[test]
    fn long_exact_match_outscores_partial_forms(term in "[a-z]{6,10}", cut in 2usize..6) {
        let index = TermIndex::new(&[term.as_str()]);
        let scorer = FragmentScorer::new(&index);
        let exact = scorer.score_value(&term);
        prop_assert_eq!(exact, 10);

        let head = format!("{}-", &term[..cut]);
        let tail = &term[term.len() - 2..];
        let embedded = format!("dr.{}", term);
        for partial in [head.as_str(), tail, embedded.as_str()] {
            prop_assert!(exact > scorer.score_value(partial));
        }
    }

    #[test]
    fn scores_stay_in_range(terms in prop::collection::vec("[a-z]{1,8}", 1..5), text in ".{0,30}") {
        let index = TermIndex::new(&terms);
        prop_assert!(FragmentScorer::new(&index).score_value(&text) <= 10);
    }

    #[test]
    fn fragments_within_thresholds_form_one_cluster(
        positions in prop::collection::vec((0.0f32..100.0, 0.0f32..40.0), 1..20),
    ) {
        let fragments: Vec<ScoredFragment> = positions
            .iter()
            .enumerate()
            .map(|(i, (x, y))| scored(i, *x, *y))
            .collect();

        let clusters = cluster_by_proximity(&fragments, &thresholds(210.0));
        prop_assert_eq!(clusters.len(), 1);
        let cluster = &clusters[0];
        prop_assert_eq!(cluster.len(), fragments.len());
        prop_assert_eq!(cluster.total_score, 10 * fragments.len() as u32);
        for f in &fragments {
            prop_assert!(cluster.bounds.left() <= f.rect.left());
            prop_assert!(cluster.bounds.right() >= f.rect.right());
            prop_assert!(cluster.bounds.top() <= f.rect.top());
            prop_assert!(cluster.bounds.bottom() >= f.rect.bottom());
        }
    }

    #[test]
    fn column_gap_separates_columns(
        left in prop::collection::vec((0.0f32..50.0, 0.0f32..200.0), 1..10),
        right in prop::collection::vec((300.0f32..350.0, 0.0f32..200.0), 1..10),
    ) {
        let fragments: Vec<ScoredFragment> = left
            .iter()
            .chain(right.iter())
            .enumerate()
            .map(|(i, (x, y))| scored(i, *x, *y))
            .collect();

        // wide enough to connect the columns before the gap split
        for cluster in cluster_by_proximity(&fragments, &thresholds(1000.0)) {
            let in_left = cluster.members.iter().filter(|m| m.index < left.len()).count();
            prop_assert!(in_left == 0 || in_left == cluster.len());
        }
    }

    #[test]
    fn locate_is_deterministic(
        layout in prop::collection::vec((0usize..8, 0.0f32..500.0, 0.0f32..700.0), 0..40),
    ) {
        let fragments: Vec<TextFragment> = layout
            .iter()
            .map(|(word, x, y)| TextFragment::new(VOCABULARY[*word], Rect::new(*x, *y, 60.0, 12.0)))
            .collect();
        let locator = RegionLocator::new();
        let terms = ["Gianna", "Rossi"];
        prop_assert_eq!(locator.locate(&terms, &fragments), locator.locate(&terms, &fragments));
    }
}
