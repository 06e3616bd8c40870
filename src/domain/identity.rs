use uuid::Uuid;

/// Generates a unique client order id.
///
/// One id per logical transaction; the gateway uses it for idempotency
/// correlation and duplicate detection.
pub fn generate_order_id() -> String {
    Uuid::new_v4().simple().to_string()
}
