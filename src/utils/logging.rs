use tracing::{error, info, warn};

/// Logs command start with consistent format
pub fn log_command_start(command: &str, user: &str, user_id: i64, details: Option<&str>) {
    match details {
        Some(d) => info!("CMD_START: {} by {}({}) - {}", command, user, user_id, d),
        None => info!("CMD_START: {} by {}({})", command, user, user_id),
    }
}

/// Logs command completion with consistent format
pub fn log_command_success(command: &str, user: &str, user_id: i64, details: Option<&str>) {
    match details {
        Some(d) => info!("CMD_SUCCESS: {} by {}({}) - {}", command, user, user_id, d),
        None => info!("CMD_SUCCESS: {} by {}({})", command, user, user_id),
    }
}

/// Logs validation errors with consistent format
pub fn log_validation_error(step: &str, value: &str, error: &str, user_id: i64) {
    warn!(
        "VALIDATION_ERROR: {} rejected '{}': {} - user {}",
        step, value, error, user_id
    );
}

/// Logs database errors with consistent format
pub fn log_database_error(operation: &str, error: &str) {
    error!("DB_ERROR: {} failed: {}", operation, error);
}

/// Logs per-recipient notification failures without aborting the batch
pub fn log_delivery_failure(recipient: i64, error: &str) {
    warn!("DELIVERY_FAILURE: admin {} unreachable: {}", recipient, error);
}
