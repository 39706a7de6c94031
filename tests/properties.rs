use proptest::prelude::*;

use fundview::models::{
    CategoryRecord, QuerySpec, Selection, SortDirection, SortKey, TransactionRecord,
    TransactionStatus,
};
use fundview::reports::{aggregate, filter_and_sort, query, DistributionAllocator, SeededVariance};

fn status_from(code: u8) -> TransactionStatus {
    match code % 3 {
        0 => TransactionStatus::Completed,
        1 => TransactionStatus::Pending,
        _ => TransactionStatus::Failed,
    }
}

fn records_from(rows: &[(i32, u8, u8)]) -> Vec<TransactionRecord> {
    rows.iter()
        .enumerate()
        .map(|(i, (amount, status, account))| {
            TransactionRecord::new(
                format!("t{}", i),
                format!("Payee {}", i % 7),
                format!("2025-01-{:02}", i % 28 + 1),
                f64::from(*amount) / 100.0,
            )
            .with_status(status_from(*status))
            .with_account(format!("Account {}", account % 3))
        })
        .collect()
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(64))]

    #[test]
    fn prop_distribution_sums_exactly(
        total in 0u32..5_000_000,
        buckets in 1usize..40,
        seed in any::<u64>(),
        variance_pct in 0u32..101,
    ) {
        let allocator = DistributionAllocator::new(buckets)
            .with_variance(f64::from(variance_pct) / 100.0);
        let mut source = SeededVariance::new(seed);

        let result = allocator.distribute(f64::from(total), &mut source);

        prop_assert_eq!(result.len(), buckets);
        prop_assert!(result.buckets.iter().all(|b| *b >= 0.0));
        prop_assert_eq!(result.sum(), f64::from(total));
    }

    #[test]
    fn prop_shares_are_whole_and_bounded(
        amounts in proptest::collection::vec(0u32..100_000, 0..20),
    ) {
        let records: Vec<CategoryRecord> = amounts
            .iter()
            .enumerate()
            .map(|(i, a)| CategoryRecord::new(format!("c{}", i), f64::from(*a)))
            .collect();

        let shares = aggregate(&records);

        prop_assert_eq!(shares.len(), records.len());
        for share in &shares {
            prop_assert!(share.percentage.is_finite());
            prop_assert_eq!(share.percentage, share.percentage.floor());
            prop_assert!((0.0..=100.0).contains(&share.percentage));
        }
    }

    #[test]
    fn prop_pages_reconstruct_filtered_list(
        rows in proptest::collection::vec((-100_000i32..100_000, any::<u8>(), any::<u8>()), 0..60),
        page_size in 1usize..12,
        status in proptest::option::of(any::<u8>()),
        desc in any::<bool>(),
    ) {
        let records = records_from(&rows);
        let direction = if desc { SortDirection::Desc } else { SortDirection::Asc };
        let mut spec = QuerySpec::with_page_size(page_size).with_sort(SortKey::Amount, direction);
        if let Some(code) = status {
            spec = spec.with_status(Selection::Only(status_from(code)));
        }

        let expected: Vec<&str> = filter_and_sort(&records, &spec)
            .into_iter()
            .map(|r| r.id.as_str())
            .collect();

        let first = query(&records, &spec);
        prop_assert_eq!(first.total_count, expected.len());

        let mut collected: Vec<&str> = Vec::new();
        for page in 1..=first.total_pages {
            let result = query(&records, &spec.at_page(page));
            prop_assert!(result.page_items.len() <= page_size);
            collected.extend(result.page_items.iter().map(|r| r.id.as_str()));
        }
        prop_assert_eq!(collected, expected);

        if let Some(code) = status {
            let wanted = status_from(code);
            prop_assert!(filter_and_sort(&records, &spec).iter().all(|r| r.status == Some(wanted)));
        }
    }

    #[test]
    fn prop_amount_sort_directions_are_reverses(
        amounts in proptest::collection::hash_set(-1_000_000i32..1_000_000, 0..40),
    ) {
        let rows: Vec<(i32, u8, u8)> = amounts.into_iter().map(|a| (a, 0, 0)).collect();
        let records = records_from(&rows);

        let asc_spec = QuerySpec::default().with_sort(SortKey::Amount, SortDirection::Asc);
        let desc_spec = QuerySpec::default().with_sort(SortKey::Amount, SortDirection::Desc);

        let asc: Vec<&str> = filter_and_sort(&records, &asc_spec).iter().map(|r| r.id.as_str()).collect();
        let mut desc: Vec<&str> = filter_and_sort(&records, &desc_spec).iter().map(|r| r.id.as_str()).collect();
        desc.reverse();

        prop_assert_eq!(asc, desc);
    }
}
