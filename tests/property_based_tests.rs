//! Property-based tests for the classification core
//!
//! Covers:
//! 1. Symmetry of the pairwise significance test
//! 2. Order preservation and round-tripping of grouping
//! 3. Classification invariants (single-ad groups, idempotence, overrides)
//! 4. Normal CDF bounds and the zero fallback
//! 5. Reader/writer agreement on arbitrary field text

use adsplit::classify::{classify, decide};
use adsplit::grouper::{flatten, group};
use adsplit::record::{Ad, AdGroup, Record, Schema, Verdict};
use adsplit::significance::{compare, is_winner, normal};
use adsplit::tsv_input::read_report;
use adsplit::tsv_output::TsvOutput;
use proptest::prelude::*;

/// Ads with impressions >= clicks >= 0 and at least one impression
fn ad_strategy() -> impl Strategy<Value = Ad> {
    (1u64..20_000)
        .prop_flat_map(|impressions| (0..=impressions, Just(impressions)))
        .prop_map(|(clicks, impressions)| Ad::new("ad", clicks, impressions))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_is_winner_symmetric(a in ad_strategy(), b in ad_strategy()) {
        prop_assert_eq!(is_winner(&a, &b), is_winner(&b, &a));
    }

    #[test]
    fn prop_equal_ctr_is_never_significant(
        clicks in 1u64..500,
        extra in 1u64..5_000,
        scale in 1u64..5,
    ) {
        // Same impressions and clicks scaled together keeps CTR identical
        let impressions = clicks + extra;
        let a = Ad::new("a", clicks, impressions);
        let b = Ad::new("b", clicks, impressions);
        prop_assert!(!is_winner(&a, &b));

        let c = Ad::new("c", clicks * scale, impressions * scale);
        prop_assert_eq!(compare(&a, &c).z_score, 0.0);
        prop_assert!(!is_winner(&a, &c));
    }

    #[test]
    fn prop_zero_impressions_never_significant(clicks in 0u64..100, other in ad_strategy()) {
        let broken = Ad::new("broken", clicks, 0);
        prop_assert!(!is_winner(&broken, &other));
        prop_assert!(!is_winner(&other, &broken));
    }

    #[test]
    fn prop_cdf_bounded(x in -50.0f64..50.0, mean in -5.0f64..5.0, sd in 0.01f64..10.0) {
        let p = normal::cdf(x, mean, sd);
        prop_assert!((0.0..=1.0).contains(&p));
        prop_assert!(normal::pdf(x, mean, sd) >= 0.0);
    }

    #[test]
    fn prop_cdf_invalid_sd_is_zero(x in -10.0f64..10.0, sd in -10.0f64..=0.0) {
        prop_assert_eq!(normal::cdf(x, 0.0, sd), 0.0);
        prop_assert_eq!(normal::pdf(x, 0.0, sd), 0.0);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_grouping_preserves_order(keys in prop::collection::vec(0u8..6, 1..40)) {
        let records: Vec<Record> = keys
            .iter()
            .enumerate()
            .map(|(i, k)| Record::new(k.to_string(), i.to_string(), "1", "10"))
            .collect();
        let groups = group(records);

        // Group order is first-appearance order
        let mut first_seen: Vec<String> = Vec::new();
        for k in &keys {
            let k = k.to_string();
            if !first_seen.contains(&k) {
                first_seen.push(k);
            }
        }
        let group_keys: Vec<String> = groups.iter().map(|g| g.key.clone()).collect();
        prop_assert_eq!(group_keys, first_seen);

        // Ad ids within each group ascend (row order) and nothing is lost
        let mut total = 0;
        for g in &groups {
            prop_assert!(!g.is_empty());
            let ids: Vec<usize> = g.ads.iter().map(|a| a.id().parse().unwrap()).collect();
            prop_assert!(ids.windows(2).all(|w| w[0] < w[1]));
            total += ids.len();
        }
        prop_assert_eq!(total, keys.len());
    }

    #[test]
    fn prop_flatten_then_group_round_trips(keys in prop::collection::vec(0u8..4, 1..30)) {
        let records: Vec<Record> = keys
            .iter()
            .enumerate()
            .map(|(i, k)| Record::new(format!("g{}", k), format!("ad{}", i), "3", "30"))
            .collect();
        let groups = classify(group(records));
        let regrouped = group(flatten(groups.clone()));

        prop_assert_eq!(regrouped.len(), groups.len());
        for (before, after) in groups.iter().zip(&regrouped) {
            prop_assert_eq!(&before.key, &after.key);
            let ids_before: Vec<&str> = before.ads.iter().map(|a| a.id()).collect();
            let ids_after: Vec<&str> = after.ads.iter().map(|a| a.id()).collect();
            prop_assert_eq!(ids_before, ids_after);
        }
    }

    #[test]
    fn prop_single_ad_group_is_no_result(ad in ad_strategy()) {
        let groups = classify(vec![AdGroup::new("solo", vec![ad])]);
        prop_assert_eq!(groups[0].ads[0].result(), Some(Verdict::NoResult));
    }

    #[test]
    fn prop_classification_is_idempotent(ads in prop::collection::vec(ad_strategy(), 1..6)) {
        let once = classify(vec![AdGroup::new("g", ads)]);
        let twice = classify(once.clone());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_losers_only_alongside_a_winner(ads in prop::collection::vec(ad_strategy(), 2..6)) {
        let decisions = decide(&ads);
        let winners = decisions.iter().filter(|d| d.verdict == Verdict::Winner).count();
        let losers = decisions.iter().filter(|d| d.verdict == Verdict::Loser).count();
        let no_result = decisions.iter().filter(|d| d.verdict == Verdict::NoResult).count();

        if winners == 0 {
            prop_assert_eq!(no_result, ads.len());
        } else {
            prop_assert_eq!(winners + losers, ads.len());
        }
        for d in &decisions {
            prop_assert!(d.winner_count < ads.len());
            prop_assert_eq!(d.verdict == Verdict::Winner, d.winner_count == ads.len() - 1);
        }
    }

    #[test]
    fn prop_written_fields_read_back(
        key in "[a-zA-Z0-9 ,\"\t\n]{1,12}",
        ad_id in "[a-zA-Z0-9 ,\"\t\n]{1,12}",
    ) {
        let schema = Schema::new(vec![
            "Key".to_string(),
            "Ad ID".to_string(),
            "Clicks".to_string(),
            "Impressions".to_string(),
        ])
        .unwrap();
        let mut output = TsvOutput::new(&schema, '\t', true);
        output.add_record(Record::new(key.clone(), ad_id.clone(), "1", "10"));

        let report = read_report(&output.to_tsv(), '\t').unwrap();
        prop_assert_eq!(&report.records[0].group_key, &key);
        prop_assert_eq!(&report.records[0].ad_id, &ad_id);
    }
}
