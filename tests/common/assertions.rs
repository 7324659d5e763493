//! Custom assertions for dispatched rollover requests

use ilm_rollover::rollover::{combine_selector, IndexComponentSelector, RolloverRequest};

/// Assert that a request is an unconditional rollover of `rollover_target`
/// in project `project_id`
///
/// With `failure_store` the expected target carries the failures selector.
pub fn assert_rollover_request(
    request: &RolloverRequest,
    project_id: &str,
    rollover_target: &str,
    failure_store: bool,
) {
    let expected = if failure_store {
        combine_selector(rollover_target, IndexComponentSelector::Failures)
    } else {
        rollover_target.to_string()
    };

    assert_eq!(request.project_id(), project_id, "Request sent to the wrong project");
    assert_eq!(request.indices().len(), 1, "Request should address one expression");
    assert_eq!(request.indices()[0], expected);
    assert_eq!(request.rollover_target(), expected);
    assert_eq!(request.targets_failure_store(), failure_store);
    assert!(!request.is_dry_run(), "Rollover step must never dry run");
    assert!(
        request.conditions().is_empty(),
        "Rollover step must not send conditions"
    );
}
