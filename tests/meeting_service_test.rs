mod helpers;

use chrono::{Duration, Utc};

use blitzday::application::ports::MeetingRepository;
use blitzday::application::services::{DemoRequest, EMPTY_SECTION, MeetingError};
use blitzday::domain::{Meeting, MeetingId, Transcript, TranscriptStatus, Utterance};

use helpers::{DEMO_RECEIVER, Harness, LLM_ANSWER, tenant};

fn meeting_with_transcript(owner: &str, transcript_id: Option<&str>, hours_ago: i64) -> Meeting {
    let mut meeting = Meeting::new(
        "Weekly sync".to_string(),
        Utc::now() - Duration::hours(hours_ago),
        tenant(owner),
        owner.to_string(),
    );
    meeting.transcript_id = transcript_id.map(str::to_string);
    meeting
}

fn completed_transcript(id: &str, utterances: Vec<(&str, &str)>) -> Transcript {
    Transcript {
        id: id.to_string(),
        status: TranscriptStatus::Completed,
        utterances: utterances
            .into_iter()
            .map(|(speaker, text)| Utterance {
                speaker: speaker.to_string(),
                text: text.to_string(),
            })
            .collect(),
        error: None,
    }
}

#[tokio::test]
async fn given_meeting_without_transcript_scheduled_three_hours_ago_then_expired() {
    let harness = Harness::new();
    let meeting = meeting_with_transcript("ada@acme.test", None, 3);
    let id = meeting.id;
    harness.meetings.insert(meeting).await;

    let result = harness
        .meeting_service()
        .single_meeting(&tenant("ada@acme.test"), id)
        .await;

    let err = result.unwrap_err();
    assert!(matches!(err, MeetingError::Expired));
    assert_eq!(
        err.to_string(),
        "Meeting is expired, because the upload fails"
    );
}

#[tokio::test]
async fn given_recent_meeting_without_transcript_then_compiling() {
    let harness = Harness::new();
    let meeting = meeting_with_transcript("ada@acme.test", None, 1);
    let id = meeting.id;
    harness.meetings.insert(meeting).await;

    let result = harness
        .meeting_service()
        .single_meeting(&tenant("ada@acme.test"), id)
        .await;

    assert!(matches!(result, Err(MeetingError::Compiling)));
}

#[tokio::test]
async fn given_meeting_of_another_tenant_when_fetching_then_not_found() {
    let harness = Harness::new();
    let meeting = meeting_with_transcript("ada@acme.test", Some("tr-1"), 0);
    let id = meeting.id;
    harness.meetings.insert(meeting).await;

    let result = harness
        .meeting_service()
        .single_meeting(&tenant("zed@globex.test"), id)
        .await;

    assert!(matches!(result, Err(MeetingError::NotFound)));
    assert_eq!(harness.transcription.fetch_count(), 0);
}

#[tokio::test]
async fn given_transcript_still_processing_then_processing() {
    let harness = Harness::new();
    let meeting = meeting_with_transcript("ada@acme.test", Some("tr-1"), 0);
    let id = meeting.id;
    harness.meetings.insert(meeting).await;
    harness
        .transcription
        .register(Transcript {
            id: "tr-1".to_string(),
            status: TranscriptStatus::Queued,
            utterances: vec![],
            error: None,
        })
        .await;

    let result = harness
        .meeting_service()
        .single_meeting(&tenant("ada@acme.test"), id)
        .await;

    assert!(matches!(result, Err(MeetingError::Processing)));
    assert_eq!(harness.llm.call_count(), 0);
}

#[tokio::test]
async fn given_failed_transcript_then_upstream_message_is_surfaced() {
    let harness = Harness::new();
    let meeting = meeting_with_transcript("ada@acme.test", Some("tr-1"), 0);
    let id = meeting.id;
    harness.meetings.insert(meeting).await;
    harness
        .transcription
        .register(Transcript {
            id: "tr-1".to_string(),
            status: TranscriptStatus::Error,
            utterances: vec![],
            error: Some("Audio file is too short".to_string()),
        })
        .await;

    let err = harness
        .meeting_service()
        .single_meeting(&tenant("ada@acme.test"), id)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Audio file is too short");
}

#[tokio::test]
async fn given_completed_transcript_when_fetched_twice_then_second_call_is_served_from_cache() {
    let harness = Harness::new();
    let meeting = meeting_with_transcript("ada@acme.test", Some("tr-1"), 0);
    let id = meeting.id;
    harness.meetings.insert(meeting).await;
    harness
        .transcription
        .register(completed_transcript(
            "tr-1",
            vec![("A", "Let's ship Friday"), ("B", "I'll write the notes")],
        ))
        .await;
    let meetings = harness.meeting_service();
    let acme = tenant("ada@acme.test");

    let first = meetings.single_meeting(&acme, id).await.unwrap();
    let second = meetings.single_meeting(&acme, id).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.summary, LLM_ANSWER);
    assert_eq!(first.next_steps, LLM_ANSWER);
    assert_eq!(first.details[0].speaker, "Speaker A");
    assert_eq!(first.details[1].text, "I'll write the notes");
    assert_eq!(harness.transcription.fetch_count(), 1);
    assert_eq!(harness.llm.call_count(), 2);

    let stored = harness.meetings.find(id, &acme).await.unwrap().unwrap();
    assert_eq!(stored.details, Some(first));
}

#[tokio::test]
async fn given_completed_transcript_without_utterances_then_sections_are_dashes() {
    let harness = Harness::new();
    let meeting = meeting_with_transcript("ada@acme.test", Some("tr-1"), 0);
    let id = meeting.id;
    harness.meetings.insert(meeting).await;
    harness
        .transcription
        .register(completed_transcript("tr-1", vec![]))
        .await;

    let details = harness
        .meeting_service()
        .single_meeting(&tenant("ada@acme.test"), id)
        .await
        .unwrap();

    assert!(details.details.is_empty());
    assert_eq!(details.summary, EMPTY_SECTION);
    assert_eq!(details.next_steps, EMPTY_SECTION);
    assert_eq!(harness.llm.call_count(), 0);
}

#[tokio::test]
async fn given_saved_meeting_when_attaching_transcript_then_listed_with_transcript_id() {
    let harness = Harness::new();
    let meetings = harness.meeting_service();
    let acme = tenant("ada@acme.test");

    let saved = meetings
        .save(&acme, "bob@acme.test", "Kickoff", Utc::now())
        .await
        .unwrap();
    meetings
        .attach_transcript(&acme, saved.id, "tr-42")
        .await
        .unwrap();

    let listed = meetings.list(&acme).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].created_by, "bob@acme.test");
    assert_eq!(listed[0].transcript_id.as_deref(), Some("tr-42"));
}

#[tokio::test]
async fn given_invalid_input_when_saving_or_attaching_then_validation_errors() {
    let harness = Harness::new();
    let meetings = harness.meeting_service();
    let acme = tenant("ada@acme.test");

    let unnamed = meetings.save(&acme, "ada@acme.test", "  ", Utc::now()).await;
    let missing_transcript = meetings
        .attach_transcript(&acme, MeetingId::new(), "")
        .await;
    let unknown_meeting = meetings
        .attach_transcript(&acme, MeetingId::new(), "tr-1")
        .await;

    assert!(matches!(unnamed, Err(MeetingError::Validation(_))));
    assert!(matches!(
        missing_transcript,
        Err(MeetingError::Validation("Meeting Id is required"))
    ));
    assert!(matches!(unknown_meeting, Err(MeetingError::NotFound)));
}

#[tokio::test]
async fn given_demo_request_when_scheduling_then_receiver_and_requester_are_emailed() {
    let harness = Harness::new();

    harness
        .meeting_service()
        .schedule_demo(DemoRequest {
            email: "cto@prospect.test".to_string(),
            name: "Grace".to_string(),
            company_name: "Prospect".to_string(),
        })
        .await
        .unwrap();

    let sent = harness.mailer.sent().await;
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].to, DEMO_RECEIVER);
    assert_eq!(sent[0].subject, "Demo Schedule Request");
    assert!(sent[0].body.contains("Prospect"));
    assert_eq!(sent[1].to, "cto@prospect.test");
    assert_eq!(sent[1].subject, "Demo Schedule");
}

#[tokio::test]
async fn given_incomplete_demo_request_when_scheduling_then_nothing_is_sent() {
    let harness = Harness::new();

    let result = harness
        .meeting_service()
        .schedule_demo(DemoRequest {
            email: "cto@prospect.test".to_string(),
            name: String::new(),
            company_name: "Prospect".to_string(),
        })
        .await;

    assert!(matches!(result, Err(MeetingError::Validation(_))));
    assert!(harness.mailer.sent().await.is_empty());
}

#[tokio::test]
async fn given_realtime_token_request_then_uses_ten_hour_expiry() {
    let harness = Harness::new();

    let token = harness.meeting_service().realtime_token().await.unwrap();

    assert_eq!(token, "mock-realtime-token-36000");
}
