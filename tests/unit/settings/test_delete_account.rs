// Unit tests for the delete-account settings flow

use accounts_server::core::errors::{AuthError, AuthErrorKind};
use accounts_server::settings::delete_account::{
    ControllerState, DeleteAccountController, PASSWORD_FIELD, SIGNUP_VIEW,
};
use accounts_server::state::notifier::NotifierEvent;

use crate::common::{
    test_account, MockAuthClient, SettingsHarness, TEST_EMAIL, TEST_PASSWORD, TEST_UID,
};

fn controller(harness: &SettingsHarness) -> DeleteAccountController {
    DeleteAccountController::new(harness.context(), test_account(), 8)
}

#[test]
fn test_is_valid_true_when_password_filled_out() {
    let harness = SettingsHarness::with_auth(MockAuthClient::succeeding());
    let mut view = controller(&harness);
    view.set_password(TEST_PASSWORD);

    assert!(view.is_valid());
}

#[test]
fn test_is_valid_false_when_password_too_short() {
    let harness = SettingsHarness::with_auth(MockAuthClient::succeeding());
    let mut view = controller(&harness);
    view.set_password("passwor");

    assert!(!view.is_valid());
}

#[test]
fn test_show_validation_errors_reports_invalid_password() {
    let harness = SettingsHarness::with_auth(MockAuthClient::succeeding());
    let mut view = controller(&harness);
    view.set_email(TEST_EMAIL);
    view.set_password("passwor");

    let validation = view.show_validation_errors().unwrap();
    assert_eq!(validation.field, PASSWORD_FIELD);
    assert!(!validation.message.is_empty());
}

#[test]
fn test_show_validation_errors_silent_when_valid() {
    let harness = SettingsHarness::with_auth(MockAuthClient::succeeding());
    let mut view = controller(&harness);
    view.set_password(TEST_PASSWORD);

    assert!(view.show_validation_errors().is_none());
}

#[tokio::test]
async fn test_submit_deletes_account_and_redirects_to_signup() {
    let harness = SettingsHarness::with_auth(MockAuthClient::succeeding());
    let mut view = controller(&harness);
    view.set_email(TEST_EMAIL);
    view.set_password(TEST_PASSWORD);

    view.submit().await.unwrap();

    assert_eq!(
        harness.navigator.navigations(),
        vec![(SIGNUP_VIEW.to_string(), true)]
    );
    assert_eq!(
        harness.auth.calls(),
        vec![(TEST_EMAIL.to_string(), TEST_PASSWORD.to_string())]
    );

    let removed = harness.user_store.removed();
    assert_eq!(removed.len(), 1);
    assert_eq!(removed[0].uid, TEST_UID);

    let brokered = harness.broker.deleted();
    assert_eq!(brokered.len(), 1);
    assert_eq!(brokered[0].uid, TEST_UID);

    assert!(harness
        .metrics
        .is_event_logged("settings.delete-account.deleted"));
    assert_eq!(
        harness.notifier.events(),
        vec![NotifierEvent::Delete {
            uid: TEST_UID.to_string()
        }]
    );
    assert_eq!(view.state(), ControllerState::Success);
}

#[tokio::test]
async fn test_submit_shows_error_to_locked_out_users() {
    let harness = SettingsHarness::with_auth(MockAuthClient::failing(AuthError::account_locked()));
    let mut view = controller(&harness);
    view.set_email(TEST_EMAIL);
    view.set_password(TEST_PASSWORD);

    // Absorbed: the failure resolves instead of propagating
    view.submit().await.unwrap();

    assert!(view.is_error_visible());
    assert!(view.error_text().unwrap().to_lowercase().contains("locked"));
    assert!(harness
        .metrics
        .is_error_logged(&AuthError::account_locked()));
    assert!(view.account().has_password());
    assert!(harness.navigator.navigations().is_empty());
    assert_eq!(view.state(), ControllerState::Error);
}

#[tokio::test]
async fn test_submit_rethrows_other_errors() {
    let harness = SettingsHarness::with_auth(MockAuthClient::failing(AuthError::unexpected()));
    let mut view = controller(&harness);
    view.set_email(TEST_EMAIL);
    view.set_password(TEST_PASSWORD);

    let err = view.submit().await.unwrap_err();

    assert_eq!(err.kind(), AuthErrorKind::Unexpected);
    assert!(!view.is_error_visible());
    assert!(!view.account().has_password());
    assert!(harness.navigator.navigations().is_empty());
    assert!(harness.user_store.removed().is_empty());
}

#[tokio::test]
async fn test_submit_twice_dispatches_two_delete_calls() {
    let harness = SettingsHarness::with_auth(MockAuthClient::succeeding());
    let mut view = controller(&harness);
    view.set_email(TEST_EMAIL);
    view.set_password(TEST_PASSWORD);

    view.submit().await.unwrap();
    view.submit().await.unwrap();

    // No de-duplication: disabling the submit control is the host's job
    assert_eq!(harness.auth.call_count(), 2);
}

#[tokio::test]
async fn test_validate_and_submit_blocks_invalid_password() {
    let harness = SettingsHarness::with_auth(MockAuthClient::succeeding());
    let mut view = controller(&harness);
    view.set_email(TEST_EMAIL);
    view.set_password("passwor");

    let validation = view.validate_and_submit().await.unwrap();

    assert!(validation.is_some());
    assert_eq!(harness.auth.call_count(), 0);
    assert_eq!(view.state(), ControllerState::Idle);
}

#[tokio::test]
async fn test_validate_and_submit_runs_valid_form() {
    let harness = SettingsHarness::with_auth(MockAuthClient::succeeding());
    let mut view = controller(&harness);
    view.set_email(TEST_EMAIL);
    view.set_password(TEST_PASSWORD);

    let validation = view.validate_and_submit().await.unwrap();

    assert!(validation.is_none());
    assert_eq!(harness.auth.call_count(), 1);
    assert_eq!(view.state(), ControllerState::Success);
}
