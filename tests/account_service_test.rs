mod helpers;

use chrono::Utc;

use blitzday::application::ports::{MeetingRepository, TokenService, UserRepository};
use blitzday::application::services::{
    AccountError, GENERATED_PASSWORD_LENGTH, ProfileUpdate, SignUpRequest,
};
use blitzday::domain::{Meeting, UserRole};

use helpers::{Harness, tenant};

fn sign_up_request(email: &str) -> SignUpRequest {
    SignUpRequest {
        name: "Ada".to_string(),
        email: email.to_string(),
        password: "correct horse".to_string(),
        company_name: Some("Acme".to_string()),
    }
}

#[tokio::test]
async fn given_new_email_when_signing_up_then_creates_admin_and_issues_token() {
    let harness = Harness::new();
    let accounts = harness.account_service();

    let session = accounts
        .sign_up(sign_up_request("ada@acme.test"))
        .await
        .unwrap();

    assert_eq!(session.name, "Ada");
    assert_eq!(session.role, UserRole::Admin);
    assert_eq!(harness.tokens.verify(&session.token).unwrap(), "ada@acme.test");

    let stored = harness
        .users
        .find_by_email("ada@acme.test")
        .await
        .unwrap()
        .unwrap();
    assert_ne!(stored.password_hash, "correct horse");

    let sent = harness.mailer.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, "Blitzday Account Created");
}

#[tokio::test]
async fn given_existing_email_when_signing_up_again_then_conflict_and_single_record() {
    let harness = Harness::new();
    let accounts = harness.account_service();
    accounts
        .sign_up(sign_up_request("ada@acme.test"))
        .await
        .unwrap();

    let result = accounts.sign_up(sign_up_request("ada@acme.test")).await;

    assert!(matches!(result, Err(AccountError::EmailTaken)));
    assert_eq!(harness.users.count().await, 1);
}

#[tokio::test]
async fn given_missing_password_when_signing_up_then_validation_error() {
    let harness = Harness::new();
    let mut request = sign_up_request("ada@acme.test");
    request.password = String::new();

    let result = harness.account_service().sign_up(request).await;

    assert!(matches!(
        result,
        Err(AccountError::MissingField("Email or Password is required"))
    ));
    assert_eq!(harness.users.count().await, 0);
}

#[tokio::test]
async fn given_failing_mailer_when_signing_up_then_account_is_still_created() {
    let mut harness = Harness::new();
    harness.mailer = std::sync::Arc::new(blitzday::infrastructure::email::RecordingMailer::failing());

    let result = harness
        .account_service()
        .sign_up(sign_up_request("ada@acme.test"))
        .await;

    assert!(result.is_ok());
    assert_eq!(harness.users.count().await, 1);
}

#[tokio::test]
async fn given_registered_user_when_logging_in_then_password_decides_outcome() {
    let harness = Harness::new();
    let accounts = harness.account_service();
    accounts
        .sign_up(sign_up_request("ada@acme.test"))
        .await
        .unwrap();

    let ok = accounts.login("ada@acme.test", "correct horse").await;
    let wrong = accounts.login("ada@acme.test", "battery staple").await;
    let unknown = accounts.login("nobody@acme.test", "correct horse").await;

    assert_eq!(ok.unwrap().role, UserRole::Admin);
    assert!(matches!(wrong, Err(AccountError::IncorrectPassword)));
    assert!(matches!(unknown, Err(AccountError::UserNotFound)));
}

#[tokio::test]
async fn given_admin_when_inviting_member_then_member_is_linked_and_emailed() {
    let harness = Harness::new();
    harness.admin("ada@acme.test").await;
    let accounts = harness.account_service();

    accounts
        .invite_team_member("ada@acme.test", "Bob", "bob@acme.test")
        .await
        .unwrap();

    let member = harness
        .users
        .find_by_email("bob@acme.test")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(member.role, UserRole::TeamMember);
    assert_eq!(member.owner_company_email.as_deref(), Some("ada@acme.test"));

    let invite = harness
        .mailer
        .sent()
        .await
        .into_iter()
        .find(|e| e.to == "bob@acme.test")
        .unwrap();
    assert_eq!(invite.subject, "Blitzday Invite");

    let password = invite
        .body
        .lines()
        .find_map(|line| line.strip_prefix("Password: "))
        .unwrap()
        .to_string();
    assert_eq!(password.chars().count(), GENERATED_PASSWORD_LENGTH);
    assert!(accounts.login("bob@acme.test", &password).await.is_ok());

    let members = accounts.team_members("ada@acme.test").await.unwrap();
    assert_eq!(members.len(), 1);
}

#[tokio::test]
async fn given_team_member_when_inviting_then_forbidden() {
    let harness = Harness::new();
    harness.admin("ada@acme.test").await;
    let accounts = harness.account_service();
    accounts
        .invite_team_member("ada@acme.test", "Bob", "bob@acme.test")
        .await
        .unwrap();

    let result = accounts
        .invite_team_member("bob@acme.test", "Eve", "eve@acme.test")
        .await;

    assert!(matches!(result, Err(AccountError::NotAdmin)));
}

#[tokio::test]
async fn given_existing_email_when_inviting_then_conflict() {
    let harness = Harness::new();
    harness.admin("ada@acme.test").await;
    harness.admin("carl@other.test").await;

    let result = harness
        .account_service()
        .invite_team_member("ada@acme.test", "Carl", "carl@other.test")
        .await;

    assert!(matches!(result, Err(AccountError::EmailTaken)));
}

#[tokio::test]
async fn given_member_with_meetings_when_removed_then_their_meetings_are_deleted() {
    let harness = Harness::new();
    harness.admin("ada@acme.test").await;
    let accounts = harness.account_service();
    accounts
        .invite_team_member("ada@acme.test", "Bob", "bob@acme.test")
        .await
        .unwrap();

    let acme = tenant("ada@acme.test");
    let by_bob = Meeting::new(
        "Bob's call".to_string(),
        Utc::now(),
        acme.clone(),
        "bob@acme.test".to_string(),
    );
    let by_ada = Meeting::new(
        "Ada's call".to_string(),
        Utc::now(),
        acme.clone(),
        "ada@acme.test".to_string(),
    );
    harness.meetings.insert(by_bob).await;
    harness.meetings.insert(by_ada.clone()).await;

    accounts
        .remove_team_member("ada@acme.test", "bob@acme.test")
        .await
        .unwrap();

    assert!(
        harness
            .users
            .find_by_email("bob@acme.test")
            .await
            .unwrap()
            .is_none()
    );
    let remaining = harness.meetings.list_by_owner(&acme).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, by_ada.id);
}

#[tokio::test]
async fn given_member_of_another_company_when_removing_then_not_found() {
    let harness = Harness::new();
    harness.admin("ada@acme.test").await;
    harness.admin("zed@globex.test").await;
    let accounts = harness.account_service();
    accounts
        .invite_team_member("zed@globex.test", "Hank", "hank@globex.test")
        .await
        .unwrap();

    let result = accounts
        .remove_team_member("ada@acme.test", "hank@globex.test")
        .await;

    assert!(matches!(result, Err(AccountError::TeamMemberNotFound)));
    assert_eq!(harness.users.count().await, 3);
}

#[tokio::test]
async fn given_new_profile_email_when_updating_then_token_is_issued_for_new_email() {
    let harness = Harness::new();
    harness.admin("ada@acme.test").await;

    let session = harness
        .account_service()
        .update_current_user(
            "ada@acme.test",
            ProfileUpdate {
                name: "Ada L.".to_string(),
                email: "ada@newacme.test".to_string(),
                company_name: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(session.name, "Ada L.");
    assert_eq!(
        harness.tokens.verify(&session.token).unwrap(),
        "ada@newacme.test"
    );
}

fn profile(name: &str, email: &str) -> ProfileUpdate {
    ProfileUpdate {
        name: name.to_string(),
        email: email.to_string(),
        company_name: None,
    }
}

#[tokio::test]
async fn given_admin_with_team_member_when_changing_email_then_locked_and_tenant_kept() {
    let harness = Harness::new();
    harness.admin("ada@acme.test").await;
    let accounts = harness.account_service();
    accounts
        .invite_team_member("ada@acme.test", "Bob", "bob@acme.test")
        .await
        .unwrap();

    let result = accounts
        .update_current_user("ada@acme.test", profile("Ada", "ada@new.test"))
        .await;

    assert!(matches!(result, Err(AccountError::AdminEmailLocked)));
    let admin = accounts.current_user("ada@acme.test").await.unwrap();
    let member = accounts.current_user("bob@acme.test").await.unwrap();
    assert_eq!(admin.effective_tenant(), member.effective_tenant());
    assert_eq!(
        accounts.team_members("ada@acme.test").await.unwrap().len(),
        1
    );
}

#[tokio::test]
async fn given_admin_with_meeting_when_changing_email_then_locked() {
    let harness = Harness::new();
    harness.admin("ada@acme.test").await;
    harness
        .meetings
        .insert(Meeting::new(
            "Kickoff".to_string(),
            Utc::now(),
            tenant("ada@acme.test"),
            "ada@acme.test".to_string(),
        ))
        .await;

    let result = harness
        .account_service()
        .update_current_user("ada@acme.test", profile("Ada", "ada@new.test"))
        .await;

    assert!(matches!(result, Err(AccountError::AdminEmailLocked)));
}

#[tokio::test]
async fn given_admin_with_team_member_when_renaming_only_then_profile_updates() {
    let harness = Harness::new();
    harness.admin("ada@acme.test").await;
    let accounts = harness.account_service();
    accounts
        .invite_team_member("ada@acme.test", "Bob", "bob@acme.test")
        .await
        .unwrap();

    let session = accounts
        .update_current_user("ada@acme.test", profile("Ada L.", "ada@acme.test"))
        .await
        .unwrap();

    assert_eq!(session.name, "Ada L.");
    assert_eq!(
        accounts.current_user("ada@acme.test").await.unwrap().name,
        "Ada L."
    );
}

#[tokio::test]
async fn given_taken_profile_email_when_updating_then_conflict() {
    let harness = Harness::new();
    harness.admin("ada@acme.test").await;
    harness.admin("carl@other.test").await;

    let result = harness
        .account_service()
        .update_current_user(
            "ada@acme.test",
            ProfileUpdate {
                name: "Ada".to_string(),
                email: "carl@other.test".to_string(),
                company_name: None,
            },
        )
        .await;

    assert!(matches!(result, Err(AccountError::EmailTaken)));
}

#[tokio::test]
async fn given_wrong_current_password_when_updating_password_then_rejected() {
    let harness = Harness::new();
    harness.admin("ada@acme.test").await;
    let accounts = harness.account_service();

    let wrong = accounts
        .update_password("ada@acme.test", "nope", "new-password")
        .await;
    assert!(matches!(wrong, Err(AccountError::CurrentPasswordIncorrect)));

    accounts
        .update_password("ada@acme.test", "admin-password", "new-password")
        .await
        .unwrap();
    assert!(accounts.login("ada@acme.test", "new-password").await.is_ok());
}

#[tokio::test]
async fn given_reset_flow_when_token_verified_then_token_is_single_use() {
    let harness = Harness::new();
    harness.admin("ada@acme.test").await;
    let accounts = harness.account_service();

    accounts
        .generate_password_reset_token("ada@acme.test")
        .await
        .unwrap();
    let reset_token = harness
        .users
        .find_by_email("ada@acme.test")
        .await
        .unwrap()
        .unwrap()
        .reset_token
        .unwrap();
    assert_eq!(reset_token.len(), 24);
    assert!(reset_token.chars().all(|c| c.is_ascii_alphanumeric()));

    let session_token = accounts
        .verify_password_reset_token("ada@acme.test", &reset_token)
        .await
        .unwrap();
    assert_eq!(harness.tokens.verify(&session_token).unwrap(), "ada@acme.test");

    let reused = accounts
        .verify_password_reset_token("ada@acme.test", &reset_token)
        .await;
    assert!(matches!(reused, Err(AccountError::InvalidResetToken)));

    accounts
        .update_forgotten_password("ada@acme.test", "fresh-password")
        .await
        .unwrap();
    assert!(accounts.login("ada@acme.test", "fresh-password").await.is_ok());
}

#[tokio::test]
async fn given_unknown_email_when_requesting_reset_then_rejected() {
    let harness = Harness::new();

    let result = harness
        .account_service()
        .generate_password_reset_token("ghost@acme.test")
        .await;

    assert!(matches!(result, Err(AccountError::ResetEmailUnknown)));
    assert!(harness.mailer.sent().await.is_empty());
}
