//! Logging helper tests

use osdk_infrastructure::logging::{log_health_check, parse_log_level};
use tracing::Level;

#[test]
fn test_parse_log_level() {
    assert_eq!(parse_log_level("trace").unwrap(), Level::TRACE);
    assert_eq!(parse_log_level("DEBUG").unwrap(), Level::DEBUG);
    assert_eq!(parse_log_level("info").unwrap(), Level::INFO);
    assert_eq!(parse_log_level("warning").unwrap(), Level::WARN);
    assert_eq!(parse_log_level("error").unwrap(), Level::ERROR);
    assert!(parse_log_level("verbose").is_err());
}

#[test]
fn test_log_health_check_does_not_panic_without_subscriber() {
    log_health_check("MainRedis", true, None);
    log_health_check("MainRedis", false, Some("connection refused"));
}
