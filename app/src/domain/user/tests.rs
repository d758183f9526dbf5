//! Tests for the domain user model.

use super::*;
use crate::test_support::{fixed_clock, fixture_timestamp};
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn candidate() -> NewUser {
    NewUser::new("Dana Scully", "dana@x.com", UserRole::Admin)
}

#[rstest]
#[case("Admin", UserRole::Admin)]
#[case("Editor", UserRole::Editor)]
#[case("Viewer", UserRole::Viewer)]
fn role_parses_canonical_labels(#[case] raw: &str, #[case] expected: UserRole) {
    assert_eq!(raw.parse::<UserRole>(), Ok(expected));
    assert_eq!(expected.to_string(), raw);
}

#[rstest]
#[case("admin")]
#[case("ADMIN")]
#[case("Administrator")]
#[case(" Admin")]
#[case("")]
fn role_parsing_is_exact(#[case] raw: &str) {
    let result = raw.parse::<UserRole>();
    assert_eq!(
        result,
        Err(UserValidationError::UnknownRole {
            value: raw.to_owned()
        })
    );
}

#[rstest]
fn into_user_copies_candidate_fields(candidate: NewUser) {
    let user = candidate.clone().into_user(UserId::new(42));

    assert_eq!(user.id(), UserId::new(42));
    assert_eq!(user.name(), candidate.name);
    assert_eq!(user.email(), candidate.email);
    assert_eq!(user.role(), candidate.role);
    assert!(user.is_admin());
}

#[rstest]
fn user_serialises_with_role_labels() {
    let user = User::new(UserId::new(1), "Alice Johnson", "alice@example.com", UserRole::Admin);

    let value = serde_json::to_value(&user).expect("serialise user");
    assert_eq!(
        value,
        json!({
            "id": 1,
            "name": "Alice Johnson",
            "email": "alice@example.com",
            "role": "Admin"
        })
    );
}

#[rstest]
fn user_deserialisation_rejects_unknown_roles() {
    let payload = json!({
        "id": 7,
        "name": "Eve",
        "email": "eve@example.com",
        "role": "Owner"
    });

    assert!(serde_json::from_value::<User>(payload).is_err());
}

#[rstest]
fn id_source_uses_clock_milliseconds() {
    let now = fixture_timestamp();
    let ids = UserIdSource::new(Arc::new(fixed_clock(now)));

    assert_eq!(ids.next_id(), UserId::new(now.timestamp_millis()));
}

#[rstest]
fn id_source_never_repeats_within_one_tick() {
    let now = fixture_timestamp();
    let ids = UserIdSource::new(Arc::new(fixed_clock(now)));

    let first = ids.next_id();
    let second = ids.next_id();
    let third = ids.next_id();

    assert_eq!(second.get(), first.get() + 1);
    assert_eq!(third.get(), first.get() + 2);
}

#[rstest]
fn id_source_survives_clock_stepping_backwards() {
    let mut clock = mockable::MockClock::new();
    let later = fixture_timestamp();
    let earlier = later - chrono::TimeDelta::seconds(5);
    let mut readings = vec![later, earlier].into_iter();
    clock
        .expect_utc()
        .times(2)
        .returning(move || readings.next().expect("clock reading"));
    let ids = UserIdSource::new(Arc::new(clock));

    let first = ids.next_id();
    let second = ids.next_id();
    assert_eq!(first.get(), later.timestamp_millis());
    assert_eq!(second.get(), first.get() + 1);
}
