// End-to-end pipeline tests against a fixture remote source on disk.
//
// The remote file server is replaced by a directory read through the same
// RemoteSource seam the HTTP client uses; everything from fetch and cache
// through decode, join, zero-fill and formatting runs for real.

use async_trait::async_trait;
use rust_decimal_macros::dec;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use storefeed::config::{AppConfig, CityConfig, Config, RemoteConfig, ServerConfig, StorageConfig};
use storefeed::core::{AppError, Result};
use storefeed::modules::feeds::services::{FeedFetcher, RemoteSource};
use storefeed::modules::reports::models::{ReportKind, ReportOutput, ReportRequest, ReportRow};
use storefeed::modules::reports::services::ReportService;
use tempfile::TempDir;

/// Remote source backed by a local directory tree.
struct DirSource {
    root: PathBuf,
}

#[async_trait]
impl RemoteSource for DirSource {
    async fn retrieve(&self, remote_path: &str) -> Result<Option<Vec<u8>>> {
        let path = self.root.join(remote_path.trim_start_matches('/'));
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(AppError::transfer(err.to_string())),
        }
    }
}

fn write_feed(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn test_config(data_dir: &Path, cities: &[(&str, &str)]) -> Config {
    Config {
        app: AppConfig {
            env: "test".to_string(),
            log_level: "debug".to_string(),
        },
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            workers: None,
        },
        remote: RemoteConfig {
            base_url: "http://fixture.invalid".to_string(),
            root: "/www".to_string(),
            timeout_secs: 5,
        },
        storage: StorageConfig::with_data_dir(data_dir),
        cities: cities
            .iter()
            .map(|(code, name)| CityConfig {
                code: (*code).to_string(),
                name: (*name).to_string(),
            })
            .collect(),
    }
}

fn build_service(remote_root: &Path, data_dir: &Path, cities: &[(&str, &str)]) -> ReportService {
    let config = test_config(data_dir, cities);
    config.storage.ensure_directories().unwrap();
    let fetcher = FeedFetcher::new(
        Box::new(DirSource {
            root: remote_root.to_path_buf(),
        }),
        config.storage.cache_dir(),
    );
    ReportService::new(Arc::new(fetcher), Arc::new(config))
}

fn request(kind: ReportKind, start: &str, end: &str) -> ReportRequest {
    ReportRequest {
        kind,
        start_date: start.to_string(),
        end_date: end.to_string(),
        second_start_date: None,
        second_end_date: None,
        cities: vec![],
        group_by: vec![],
        export: false,
        clear_cache: false,
    }
}

fn row_for<'a>(output: &'a ReportOutput, shop_name: &str) -> &'a ReportRow {
    output
        .rows
        .iter()
        .find(|row| row.shop_name == shop_name)
        .unwrap_or_else(|| panic!("no row for {shop_name}"))
}

/// One city, one day, three shops; the third shop has no receipts at all
/// and must still appear with zero measures.
fn seed_sales_fixture(root: &Path) {
    write_feed(
        root,
        "www/shop_khar.csv",
        "id|name\nS1|Central\nS2|Station\nS3|Park\n",
    );
    write_feed(
        root,
        "www/receipt/receipt_khar_2025-06-10.csv",
        "id|shop_id\nR1|S1\nR2|S1\nR3|S2\n",
    );
    write_feed(
        root,
        "www/cartitem/cartitem_khar_2025-06-10.csv",
        "receipt_id|qty|total_price\nR1|3|60.00\nR2|2|40.00\nR3|2|40.00\n",
    );
}

#[tokio::test]
async fn test_sales_report_end_to_end() {
    let remote = TempDir::new().unwrap();
    let data = TempDir::new().unwrap();
    seed_sales_fixture(remote.path());

    let service = build_service(remote.path(), data.path(), &[("khar", "Kharkiv")]);
    let output = service
        .generate(request(ReportKind::Sales, "2025-06-10", "2025-06-10"))
        .await
        .unwrap();

    assert_eq!(output.rows.len(), 3);

    let s1 = row_for(&output, "Central");
    assert_eq!(s1.current.count, 2);
    assert_eq!(s1.current.amount, dec!(100.00));
    assert_eq!(s1.current.quantity, dec!(5));

    let s2 = row_for(&output, "Station");
    assert_eq!(s2.current.count, 1);
    assert_eq!(s2.current.amount, dec!(40.00));
    assert_eq!(s2.current.quantity, dec!(2));

    let s3 = row_for(&output, "Park");
    assert_eq!(s3.current.count, 0);
    assert_eq!(s3.current.amount, dec!(0));
    assert_eq!(s3.current.quantity, dec!(0));

    // City ascending, then revenue descending
    let names: Vec<&str> = output.rows.iter().map(|row| row.shop_name.as_str()).collect();
    assert_eq!(names, vec!["Central", "Station", "Park"]);

    assert_eq!(output.summary.row_count, 3);
    assert_eq!(output.summary.totals.count, 3);
    assert_eq!(output.summary.totals.amount, dec!(140.00));
    assert_eq!(output.summary.average_count_per_shop, dec!(1.0));
    assert_eq!(output.summary.top_shops[0].shop_name, "Central");
    assert_eq!(output.summary.city_rollups.len(), 1);
    assert_eq!(output.summary.city_rollups[0].key, "Kharkiv");
}

#[tokio::test]
async fn test_sales_report_zero_fills_when_no_activity_data_exists() {
    let remote = TempDir::new().unwrap();
    let data = TempDir::new().unwrap();
    write_feed(
        remote.path(),
        "www/shop_khar.csv",
        "id|name\nS1|Central\nS2|Station\n",
    );

    let service = build_service(remote.path(), data.path(), &[("khar", "Kharkiv")]);
    let output = service
        .generate(request(ReportKind::Sales, "2025-06-10", "2025-06-12"))
        .await
        .unwrap();

    assert_eq!(output.rows.len(), 2);
    assert!(output.rows.iter().all(|row| row.current.is_zero()));
    assert_eq!(output.summary.totals.count, 0);
}

#[tokio::test]
async fn test_comparison_report_computes_deltas_and_percent_rules() {
    let remote = TempDir::new().unwrap();
    let data = TempDir::new().unwrap();
    write_feed(
        remote.path(),
        "www/shop_khar.csv",
        "id|name\nS1|Central\nS2|Station\n",
    );
    // Base period: only S1 active
    write_feed(
        remote.path(),
        "www/receipt/receipt_khar_2025-06-01.csv",
        "id|shop_id\nR1|S1\n",
    );
    write_feed(
        remote.path(),
        "www/cartitem/cartitem_khar_2025-06-01.csv",
        "receipt_id|qty|total_price\nR1|10|100.00\n",
    );
    // Current period: S1 grows, S2 appears from nothing
    write_feed(
        remote.path(),
        "www/receipt/receipt_khar_2025-06-10.csv",
        "id|shop_id\nR2|S1\nR3|S1\nR4|S2\n",
    );
    write_feed(
        remote.path(),
        "www/cartitem/cartitem_khar_2025-06-10.csv",
        "receipt_id|qty|total_price\nR2|8|90.00\nR3|4|60.00\nR4|5|50.00\n",
    );

    let mut req = request(ReportKind::Comparison, "2025-06-10", "2025-06-10");
    req.second_start_date = Some("2025-06-01".to_string());
    req.second_end_date = Some("2025-06-01".to_string());

    let service = build_service(remote.path(), data.path(), &[("khar", "Kharkiv")]);
    let output = service.generate(req).await.unwrap();

    assert_eq!(output.rows.len(), 2);

    let s1 = row_for(&output, "Central");
    let comparison = s1.comparison.unwrap();
    assert_eq!(comparison.previous.amount, dec!(100.00));
    assert_eq!(s1.current.amount, dec!(150.00));
    assert_eq!(comparison.change.amount, dec!(50.00));
    assert_eq!(comparison.change.amount_pct, dec!(50));
    assert_eq!(comparison.change.count, 1);
    assert_eq!(comparison.change.count_pct, dec!(100));

    // S2 had no base activity: absolute growth, percent pinned to zero
    let s2 = row_for(&output, "Station");
    let comparison = s2.comparison.unwrap();
    assert_eq!(comparison.previous.amount, dec!(0));
    assert_eq!(comparison.change.amount, dec!(50.00));
    assert_eq!(comparison.change.amount_pct, dec!(0));
}

fn seed_loss_fixture(root: &Path) {
    write_feed(root, "www/losstype.csv", "id|name\nT1|Expired\nT2|Damaged\n");
    write_feed(root, "www/shop_khar.csv", "id|name\nS1|Central\nS2|Station\n");
    // D3 belongs to a shop the directory does not know; it and its line
    // must not contribute anywhere
    write_feed(
        root,
        "www/loss/loss_khar_2025-06-10.csv",
        "id|shop_id|type_id\nD1|S1|T1\nD2|S1|T1\nD3|GHOST|T2\n",
    );
    write_feed(
        root,
        "www/lossproduct/lossproduct_khar_2025-06-10.csv",
        "document_id|qty|total_price\nD1|2|20.00\nD2|1,5|7,50\nD3|9|900.00\n",
    );
}

#[tokio::test]
async fn test_losses_report_covers_cross_product_and_excludes_unknown_shops() {
    let remote = TempDir::new().unwrap();
    let data = TempDir::new().unwrap();
    seed_loss_fixture(remote.path());

    let service = build_service(remote.path(), data.path(), &[("khar", "Kharkiv")]);
    let output = service
        .generate(request(ReportKind::Losses, "2025-06-10", "2025-06-10"))
        .await
        .unwrap();

    // 2 shops x 2 types, zero activity included
    assert_eq!(output.rows.len(), 4);

    let expired_central = output
        .rows
        .iter()
        .find(|row| row.shop_name == "Central" && row.loss_type_name.as_deref() == Some("Expired"))
        .unwrap();
    assert_eq!(expired_central.current.count, 2);
    assert_eq!(expired_central.current.amount, dec!(27.50));
    assert_eq!(expired_central.current.quantity, dec!(3.5));

    // The excluded document's money appears nowhere
    assert_eq!(output.summary.totals.amount, dec!(27.50));

    // Type roll-ups cover both types, with the inactive one at zero
    assert_eq!(output.summary.type_rollups.len(), 2);
    let damaged = output
        .summary
        .type_rollups
        .iter()
        .find(|rollup| rollup.key == "Damaged")
        .unwrap();
    assert!(damaged.measure.is_zero());
}

#[tokio::test]
async fn test_detailed_losses_filters_zero_rows_but_never_all() {
    let remote = TempDir::new().unwrap();
    let data = TempDir::new().unwrap();
    seed_loss_fixture(remote.path());

    let service = build_service(remote.path(), data.path(), &[("khar", "Kharkiv")]);
    let output = service
        .generate(request(
            ReportKind::DetailedLosses,
            "2025-06-10",
            "2025-06-10",
        ))
        .await
        .unwrap();

    // Only the one active (shop, type) pair survives the zero filter
    assert_eq!(output.rows.len(), 1);
    assert_eq!(output.rows[0].shop_name, "Central");

    // A period with no write-off data keeps the full zero cross product
    let idle = service
        .generate(request(
            ReportKind::DetailedLosses,
            "2025-07-01",
            "2025-07-01",
        ))
        .await
        .unwrap();
    assert_eq!(idle.rows.len(), 4);
    assert!(idle.rows.iter().all(|row| row.current.is_zero()));
}

#[tokio::test]
async fn test_missing_loss_type_reference_aborts_the_run() {
    let remote = TempDir::new().unwrap();
    let data = TempDir::new().unwrap();
    write_feed(remote.path(), "www/shop_khar.csv", "id|name\nS1|Central\n");

    let service = build_service(remote.path(), data.path(), &[("khar", "Kharkiv")]);
    let result = service
        .generate(request(ReportKind::Losses, "2025-06-10", "2025-06-10"))
        .await;

    assert!(matches!(result, Err(AppError::MissingReference(_))));
}

#[tokio::test]
async fn test_export_writes_pipe_delimited_artifact() {
    let remote = TempDir::new().unwrap();
    let data = TempDir::new().unwrap();
    seed_sales_fixture(remote.path());

    let mut req = request(ReportKind::Sales, "2025-06-10", "2025-06-10");
    req.export = true;

    let service = build_service(remote.path(), data.path(), &[("khar", "Kharkiv")]);
    let output = service.generate(req).await.unwrap();

    let artifact = output.artifact.expect("export requested");
    let content = std::fs::read_to_string(&artifact).unwrap();
    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some("city|shop_id|shop_name|receipts|revenue|quantity")
    );
    assert_eq!(lines.count(), 3);
    assert!(artifact
        .file_name()
        .unwrap()
        .to_string_lossy()
        .starts_with("report_sales_2025-06-10_2025-06-10_"));
}

#[tokio::test]
async fn test_cache_short_circuits_repeat_runs() {
    let remote = TempDir::new().unwrap();
    let data = TempDir::new().unwrap();
    seed_sales_fixture(remote.path());

    let service = build_service(remote.path(), data.path(), &[("khar", "Kharkiv")]);
    let first = service
        .generate(request(ReportKind::Sales, "2025-06-10", "2025-06-10"))
        .await
        .unwrap();

    // Rewrite the remote file; the cached copy must win on the second run
    write_feed(
        remote.path(),
        "www/cartitem/cartitem_khar_2025-06-10.csv",
        "receipt_id|qty|total_price\nR1|1|1.00\n",
    );
    let second = service
        .generate(request(ReportKind::Sales, "2025-06-10", "2025-06-10"))
        .await
        .unwrap();
    assert_eq!(first.rows, second.rows);

    // Clearing the cache picks the new content up
    let mut req = request(ReportKind::Sales, "2025-06-10", "2025-06-10");
    req.clear_cache = true;
    let third = service.generate(req).await.unwrap();
    let s1 = row_for(&third, "Central");
    assert_eq!(s1.current.amount, dec!(1.00));
}
