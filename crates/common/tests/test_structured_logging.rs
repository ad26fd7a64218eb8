use common::{init_structured_logging, LoggingConfig, OperationTimer};

#[test]
fn test_global_subscriber_installs_once() {
    let config = LoggingConfig {
        json_output: true,
        ..LoggingConfig::default()
    };

    init_structured_logging(config.clone()).expect("first install succeeds");
    tracing::info!(product_id = "prod_1", "Structured logging ready");

    let mut timer = OperationTimer::new("load_catalog");
    timer.add_field("items_count", 3);
    timer.finish_with_result::<(), String>(&Err("storage unavailable".to_string()));

    // A second global subscriber is rejected
    assert!(init_structured_logging(config).is_err());
}
