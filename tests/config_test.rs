//! Tests for configuration validation

use std::env;

use project_forge::builders::build_manager;
use project_forge::config::scheduler::{ENV_MAX_QUEUE_DEPTH, ENV_STACK_SIZE, ENV_WORKER_NAME};
use project_forge::config::SchedulerConfig;
use project_forge::core::SchedulerError;

#[test]
fn test_config_invalid_worker_name() {
    let invalid = SchedulerConfig::new().with_worker_name("   ");
    assert!(invalid.validate().is_err());
}

#[test]
fn test_config_invalid_stack_size() {
    let invalid = SchedulerConfig::new().with_thread_stack_size(1024);
    assert!(invalid.validate().is_err());
}

#[test]
fn test_config_invalid_queue_depth() {
    let invalid = SchedulerConfig::new().with_max_queue_depth(0);
    assert!(invalid.validate().is_err());
}

#[test]
fn test_config_from_json() {
    let json = r#"{
        "worker_name": "line-b",
        "thread_stack_size": 1048576,
        "max_queue_depth": 32
    }"#;
    let cfg = SchedulerConfig::from_json_str(json).unwrap();
    assert_eq!(cfg.worker_name, "line-b");
    assert_eq!(cfg.thread_stack_size, 1_048_576);
    assert_eq!(cfg.max_queue_depth, Some(32));
}

#[test]
fn test_config_from_json_rejects_invalid() {
    assert!(SchedulerConfig::from_json_str(r#"{ "max_queue_depth": 0 }"#).is_err());
    assert!(SchedulerConfig::from_json_str("not json").is_err());
}

#[test]
fn test_build_manager_rejects_invalid_config() {
    let cfg = SchedulerConfig::new().with_thread_stack_size(0);
    assert!(matches!(build_manager(&cfg), Err(SchedulerError::InvalidConfig(_))));
}

// The only test in this binary that touches the environment.
#[test]
fn test_config_from_env() {
    env::set_var(ENV_WORKER_NAME, "env-worker");
    env::set_var(ENV_STACK_SIZE, "262144");
    env::set_var(ENV_MAX_QUEUE_DEPTH, "12");
    let cfg = SchedulerConfig::from_env().unwrap();
    assert_eq!(cfg.worker_name, "env-worker");
    assert_eq!(cfg.thread_stack_size, 262_144);
    assert_eq!(cfg.max_queue_depth, Some(12));

    env::set_var(ENV_MAX_QUEUE_DEPTH, "many");
    assert!(SchedulerConfig::from_env().is_err());

    env::remove_var(ENV_WORKER_NAME);
    env::remove_var(ENV_STACK_SIZE);
    env::remove_var(ENV_MAX_QUEUE_DEPTH);
}
