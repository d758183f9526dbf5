//! Loads settings from outside the crate, the way the binary does.

// `expect` is idiomatic in test code for failing fast on precondition violations.
#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use std::ffi::OsString;
use std::time::Duration;

use env_lock::lock_env;
use ortho_config::OrthoConfig;
use rstest::rstest;
use user_directory::AppSettings;
use user_directory::domain::FetchPolicy;

fn load_as_binary() -> AppSettings {
    AppSettings::load_from_iter([OsString::from("user-directory")])
        .expect("settings should load")
}

#[rstest]
fn environment_switches_on_single_flight_fetching() {
    let _guard = lock_env([
        ("USER_DIRECTORY_LIST_DELAY_MS", Some("5".to_owned())),
        ("USER_DIRECTORY_CREATE_DELAY_MS", None::<String>),
        ("USER_DIRECTORY_SINGLE_FLIGHT_FETCH", Some("true".to_owned())),
    ]);

    let settings = load_as_binary();

    assert_eq!(settings.fetch_policy(), FetchPolicy::SingleFlight);
    assert_eq!(settings.latency().list, Duration::from_millis(5));
    assert_eq!(settings.latency().create, Duration::from_millis(500));
}

#[rstest]
fn unset_switch_keeps_fetching_permissive() {
    let _guard = lock_env([("USER_DIRECTORY_SINGLE_FLIGHT_FETCH", None::<String>)]);

    assert_eq!(load_as_binary().fetch_policy(), FetchPolicy::Permissive);
}
