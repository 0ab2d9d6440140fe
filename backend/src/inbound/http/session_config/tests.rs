//! Unit tests for session configuration parsing.

use super::*;
use mockable::MockEnv;
use rstest::{fixture, rstest};
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug)]
struct TempKeyFile {
    path: PathBuf,
}

impl TempKeyFile {
    fn new(len: usize) -> std::io::Result<Self> {
        let path = std::env::temp_dir().join(format!("habits-session-key-{}", Uuid::new_v4()));
        std::fs::write(&path, vec![b'a'; len])?;
        Ok(Self { path })
    }

    fn path_str(&self) -> &str {
        self.path
            .to_str()
            .expect("temporary path should be valid UTF-8")
    }
}

impl Drop for TempKeyFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

#[fixture]
fn key_file() -> TempKeyFile {
    TempKeyFile::new(SESSION_KEY_MIN_LEN).expect("key file creation should succeed")
}

fn mock_env(vars: HashMap<String, String>) -> MockEnv {
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |key| vars.get(key).cloned());
    env
}

/// A complete release configuration with `overrides` applied. An empty
/// override value removes the variable.
fn release_env(key_path: &str, overrides: &[(&str, &str)]) -> MockEnv {
    let mut vars: HashMap<String, String> = [
        (KEY_FILE_ENV, key_path),
        (COOKIE_SECURE_ENV, "1"),
        (SAMESITE_ENV, "Strict"),
        (ALLOW_EPHEMERAL_ENV, "0"),
    ]
    .into_iter()
    .map(|(name, value)| (name.to_owned(), value.to_owned()))
    .collect();
    for (name, value) in overrides {
        if value.is_empty() {
            vars.remove(*name);
        } else {
            vars.insert((*name).to_owned(), (*value).to_owned());
        }
    }
    mock_env(vars)
}

fn expect_error(result: Result<SessionSettings, SessionConfigError>) -> SessionConfigError {
    match result {
        Ok(_) => panic!("expected session configuration to be rejected"),
        Err(error) => error,
    }
}

#[rstest]
#[case::cookie_secure(COOKIE_SECURE_ENV)]
#[case::same_site(SAMESITE_ENV)]
#[case::allow_ephemeral(ALLOW_EPHEMERAL_ENV)]
fn release_requires_every_toggle(key_file: TempKeyFile, #[case] missing: &'static str) {
    let env = release_env(key_file.path_str(), &[(missing, "")]);
    let err = expect_error(session_settings_from_env(&env, BuildMode::Release));
    assert!(matches!(err, SessionConfigError::MissingEnv { name } if name == missing));
}

#[rstest]
#[case::cookie_secure(COOKIE_SECURE_ENV, "maybe")]
#[case::same_site(SAMESITE_ENV, "sometimes")]
#[case::ttl(TTL_ENV, "0")]
#[case::ttl_text(TTL_ENV, "forever")]
fn release_rejects_malformed_values(
    key_file: TempKeyFile,
    #[case] name: &'static str,
    #[case] value: &str,
) {
    let env = release_env(key_file.path_str(), &[(name, value)]);
    let err = expect_error(session_settings_from_env(&env, BuildMode::Release));
    assert!(matches!(err, SessionConfigError::InvalidEnv { name: n, .. } if n == name));
}

#[rstest]
fn release_ephemeral_enabled_is_rejected(key_file: TempKeyFile) {
    let env = release_env(key_file.path_str(), &[(ALLOW_EPHEMERAL_ENV, "1")]);
    let err = expect_error(session_settings_from_env(&env, BuildMode::Release));
    assert!(matches!(err, SessionConfigError::EphemeralNotAllowed));
}

#[rstest]
fn release_missing_key_file_is_rejected() {
    let missing = std::env::temp_dir().join(format!("absent-{}", Uuid::new_v4()));
    let path = missing.to_str().expect("valid path");
    let env = release_env(path, &[]);
    let err = expect_error(session_settings_from_env(&env, BuildMode::Release));
    assert!(matches!(err, SessionConfigError::KeyRead { .. }));
}

#[rstest]
fn release_short_key_is_rejected() {
    let short = TempKeyFile::new(32).expect("key file creation should succeed");
    let env = release_env(short.path_str(), &[]);
    let err = expect_error(session_settings_from_env(&env, BuildMode::Release));
    assert!(matches!(
        err,
        SessionConfigError::KeyTooShort { length: 32, .. }
    ));
}

#[rstest]
fn release_insecure_none_same_site_is_rejected(key_file: TempKeyFile) {
    let env = release_env(
        key_file.path_str(),
        &[(COOKIE_SECURE_ENV, "0"), (SAMESITE_ENV, "None")],
    );
    let err = expect_error(session_settings_from_env(&env, BuildMode::Release));
    assert!(matches!(err, SessionConfigError::InsecureSameSiteNone));
}

#[rstest]
fn release_valid_settings_succeed(key_file: TempKeyFile) {
    let env = release_env(key_file.path_str(), &[(TTL_ENV, "600")]);
    let settings =
        session_settings_from_env(&env, BuildMode::Release).expect("expected valid settings");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Strict);
    assert_eq!(settings.ttl, Duration::from_secs(600));
}

#[rstest]
fn same_key_file_yields_same_fingerprint(key_file: TempKeyFile) {
    let first = session_settings_from_env(&release_env(key_file.path_str(), &[]), BuildMode::Release)
        .expect("valid settings");
    let second =
        session_settings_from_env(&release_env(key_file.path_str(), &[]), BuildMode::Release)
            .expect("valid settings");
    assert_eq!(first.fingerprint(), second.fingerprint());
}

#[rstest]
fn debug_defaults_allow_ephemeral_key() {
    let env = mock_env(HashMap::from([(
        KEY_FILE_ENV.to_owned(),
        format!("/nonexistent/{}", Uuid::new_v4()),
    )]));
    let settings =
        session_settings_from_env(&env, BuildMode::Debug).expect("debug defaults should succeed");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
    assert_eq!(settings.ttl, DEFAULT_SESSION_TTL);
}

#[rstest]
#[case::same_site(SAMESITE_ENV, "unexpected", SameSite::Lax)]
#[case::ttl(TTL_ENV, "-5", SameSite::Strict)]
fn debug_invalid_values_fall_back_to_defaults(
    key_file: TempKeyFile,
    #[case] name: &str,
    #[case] value: &str,
    #[case] same_site: SameSite,
) {
    let env = release_env(key_file.path_str(), &[(name, value)]);
    let settings = session_settings_from_env(&env, BuildMode::Debug)
        .expect("debug should fall back to defaults");
    assert_eq!(settings.same_site, same_site);
    assert_eq!(settings.ttl, DEFAULT_SESSION_TTL);
}
