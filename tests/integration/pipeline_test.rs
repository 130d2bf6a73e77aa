//! End-to-end pipeline tests against the in-memory source.

use crate::common::{denied, enabled, scenario_source};
use kl_collector::{Collector, CollectorConfig};
use kl_error::{ApiError, KlError, ListingError};
use kl_report::{active_table, not_authorized_table, render_report};
use kl_traits::MemorySource;
use kl_types::{ListPage, Ownership, RecordStatus, ResourceDetail, ResourceId, ResourceKind};

#[tokio::test]
async fn test_three_key_scenario_tables() {
    let collector = Collector::new(scenario_source(), CollectorConfig::new());
    let inventory = collector.collect().await.unwrap();

    assert_eq!(inventory.records.len(), 3);

    let columns = inventory.tag_columns();
    assert_eq!(columns, vec!["Owner", "Team"]);

    let active = active_table(inventory.kind, &inventory.active(), &columns);
    assert_eq!(active.len(), 2);
    assert_eq!(
        active.headers(),
        ["Key ID", "Status", "Creation Date", "Key Type", "Owner", "Team"]
    );

    let denied = not_authorized_table(inventory.kind, &inventory.not_authorized());
    assert_eq!(denied.len(), 1);

    let c = &inventory.records[2];
    assert_eq!(c.id, "C");
    assert_eq!(c.status, RecordStatus::NotAuthorized);
    assert!(c.tags.is_empty());
    assert_eq!(collector.source().calls().tag_count("C"), 0);
}

#[tokio::test]
async fn test_report_text() {
    let collector = Collector::new(scenario_source(), CollectorConfig::new());
    let report = render_report(&collector.collect().await.unwrap());

    let expected = "\
=== ACTIVE KEYS ===

| Key ID | Status  | Creation Date       | Key Type          | Owner | Team |
+--------+---------+---------------------+-------------------+-------+------+
| A      | Enabled | 2023-11-14 22:13:20 | SYMMETRIC_DEFAULT | -     | core |
| B      | Enabled | 2023-11-15 22:13:20 | SYMMETRIC_DEFAULT | ops   | -    |

=== NOT AUTHORIZED KEYS ===

| Key ID | Status         |
+--------+----------------+
| C      | Not Authorized |

Total keys: 3
  Active:         2
  Not Authorized: 1
  Inactive:       0
  Errors:         0
";
    assert_eq!(report, expected);
}

#[tokio::test]
async fn test_report_is_byte_identical_across_runs() {
    let first = Collector::new(scenario_source(), CollectorConfig::new())
        .collect()
        .await
        .unwrap();
    let second = Collector::new(scenario_source(), CollectorConfig::new().with_concurrency(4))
        .collect()
        .await
        .unwrap();

    assert_eq!(render_report(&first), render_report(&second));
}

#[tokio::test]
async fn test_every_listed_id_yields_one_record() {
    let source = MemorySource::new(ResourceKind::Key)
        .with_page(
            None,
            ListPage::with_next(vec![ResourceId::new("k1"), ResourceId::new("k2")], "t1"),
        )
        .with_page(Some("t1"), ListPage::with_next(vec![ResourceId::new("k3")], "t2"))
        .with_page(Some("t2"), ListPage::last(vec![ResourceId::new("k4")]))
        .with_detail("k1", enabled(0))
        .with_detail("k2", ResourceDetail::new("Disabled"))
        .with_detail_error("k3", denied())
        .with_detail_error("k4", ApiError::new("KMSInternalException", "internal"));

    let collector = Collector::new(source, CollectorConfig::new().with_concurrency(3));
    let inventory = collector.collect().await.unwrap();

    let ids: Vec<&str> = inventory.records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["k1", "k2", "k3", "k4"]);

    let stats = &inventory.stats;
    assert_eq!(stats.listed, 4);
    assert_eq!(stats.active, 1);
    assert_eq!(stats.inactive, 1);
    assert_eq!(stats.not_authorized, 1);
    assert_eq!(stats.errors, 1);

    // Only the active record asks for tags
    let calls = collector.source().calls();
    assert_eq!(calls.list_tags, vec!["k1"]);
}

#[tokio::test]
async fn test_inactive_and_errors_only_in_tally() {
    let source = MemorySource::new(ResourceKind::Key)
        .with_resources(["D", "E"])
        .with_detail("D", ResourceDetail::new("PendingDeletion"))
        .with_detail_error("E", ApiError::new("ThrottlingException", "Rate exceeded"));

    let report = render_report(
        &Collector::new(source, CollectorConfig::new())
            .collect()
            .await
            .unwrap(),
    );

    assert!(!report.contains("==="));
    assert!(report.contains("  Inactive:       1\n"));
    assert!(report.contains("  Errors:         1\n"));
}

#[tokio::test]
async fn test_foreign_keys_filtered_by_default() {
    let source = MemorySource::new(ResourceKind::Key)
        .with_resources(["mine", "aws-managed"])
        .with_detail("mine", enabled(0))
        .with_detail(
            "aws-managed",
            enabled(0).with_ownership(Ownership::Foreign("AWS".to_string())),
        );

    let owned = Collector::new(source, CollectorConfig::new())
        .collect()
        .await
        .unwrap();
    let ids: Vec<&str> = owned.records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["mine"]);
}

#[tokio::test]
async fn test_foreign_keys_kept_when_requested() {
    let source = MemorySource::new(ResourceKind::Key)
        .with_resources(["mine", "aws-managed"])
        .with_detail("mine", enabled(0))
        .with_detail(
            "aws-managed",
            enabled(0).with_ownership(Ownership::Foreign("AWS".to_string())),
        );

    let all = Collector::new(source, CollectorConfig::new().with_owned_only(false))
        .collect()
        .await
        .unwrap();
    assert_eq!(all.records.len(), 2);
}

#[tokio::test]
async fn test_listing_denied_on_first_page_is_empty_success() {
    let source = MemorySource::new(ResourceKind::Secret).with_list_error(None, denied());

    let inventory = Collector::new(source, CollectorConfig::new())
        .collect()
        .await
        .unwrap();

    assert!(inventory.is_empty());
    assert!(render_report(&inventory).starts_with("Total secrets: 0\n"));
}

#[tokio::test]
async fn test_listing_failure_is_fatal() {
    let source = MemorySource::new(ResourceKind::Key)
        .with_page(None, ListPage::with_next(vec![ResourceId::new("k1")], "t1"))
        .with_list_error(Some("t1"), denied());

    let err = Collector::new(source, CollectorConfig::new())
        .collect()
        .await
        .unwrap_err();

    assert!(matches!(err, KlError::Listing(ListingError::Request(_))));
}

#[tokio::test]
async fn test_tag_failure_keeps_record_active() {
    let source = MemorySource::new(ResourceKind::Key)
        .with_resources(["k1"])
        .with_detail("k1", enabled(0))
        .with_tag_error("k1", denied());

    let inventory = Collector::new(source, CollectorConfig::new())
        .collect()
        .await
        .unwrap();

    assert!(inventory.records[0].status.is_active());
    assert!(inventory.records[0].tags.is_empty());
    assert!(inventory.tag_columns().is_empty());
}
