use klawed_api::config::{parse_log_level, AdminCredentials};
use klawed_api::middleware::auth::{hash_password, verify_password};
use pretty_assertions::assert_eq;

#[test]
fn test_malformed_admin_hash_fails_at_startup() {
    let result = AdminCredentials::password_hash_from(Some("not-a-phc-string".to_string()), None);

    let message = format!("{:#}", result.unwrap_err());
    assert!(message.contains("Invalid ADMIN_PASSWORD_HASH value"));
}

#[test]
fn test_admin_hash_wins_over_plain_password() {
    let hash = hash_password("studio-secret").unwrap();

    let chosen =
        AdminCredentials::password_hash_from(Some(hash.clone()), Some("ignored".to_string()))
            .unwrap();

    assert_eq!(chosen, hash);
}

#[test]
fn test_plain_admin_password_is_hashed() {
    let chosen = AdminCredentials::password_hash_from(None, Some("studio-secret".to_string())).unwrap();

    assert!(verify_password(&chosen, "studio-secret").unwrap());
}

#[test]
fn test_missing_admin_password_is_an_error() {
    assert!(AdminCredentials::password_hash_from(None, None).is_err());
}

#[test]
fn test_unknown_log_level_falls_back_to_info() {
    assert_eq!(parse_log_level("debug"), tracing::Level::DEBUG);
    assert_eq!(parse_log_level("loud"), tracing::Level::INFO);
}
