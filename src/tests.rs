//! End-to-end flow: conversation → store → reminder tick

use crate::features::conversation::{ConversationEngine, InboundMessage, Phase};
use crate::features::reminders::{reminder_text, ReminderDispatcher};
use crate::features::subscribers::store::load;
use crate::features::subscribers::{RecipientHandle, SubscriberStore, UserId};
use crate::messenger::testing::RecordingMessenger;
use std::sync::Arc;
use uuid::Uuid;

#[tokio::test]
async fn test_signup_then_hourly_reminder() {
    let dir = std::env::temp_dir().join(format!("waterbot-e2e-{}", Uuid::new_v4().simple()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("users.json");

    let store = Arc::new(SubscriberStore::open(&path).await);
    let engine = ConversationEngine::new(store.clone());
    let user = UserId::new("5551");
    let handle = RecipientHandle::new("900");

    let reply = engine
        .handle(&InboundMessage::new(user.clone(), handle.clone(), "175 70"))
        .await
        .unwrap();
    assert!(reply.contains("2.1"));
    assert_eq!(engine.phase(&user).await, Phase::AwaitingReminderChoice);

    engine
        .handle(&InboundMessage::new(user.clone(), handle.clone(), "Так"))
        .await
        .unwrap();
    let record = store.get(&user).await.unwrap();
    assert!(record.reminder_enabled);
    assert_eq!(record.daily_target_liters, 2.1);

    // A restarted process sees the same subscription
    let reopened = Arc::new(SubscriberStore::open(&path).await);
    assert_eq!(reopened.get(&user).await, Some(record));

    let messenger = Arc::new(RecordingMessenger::new());
    let dispatcher = ReminderDispatcher::new(reopened, messenger.clone());
    let report = dispatcher.run_tick().await;

    assert_eq!(report.delivered, 1);
    let sent = messenger.sent_to("900");
    assert_eq!(sent, vec![reminder_text(2.1)]);
    assert!(sent[0].contains("2.1"));

    assert_eq!(load(&path).await.len(), 1);
    let _ = std::fs::remove_dir_all(dir);
}

#[tokio::test]
async fn test_declined_user_gets_no_reminders() {
    let dir = std::env::temp_dir().join(format!("waterbot-e2e-{}", Uuid::new_v4().simple()));
    std::fs::create_dir_all(&dir).unwrap();
    let store = Arc::new(SubscriberStore::open(dir.join("users.json")).await);
    let engine = ConversationEngine::new(store.clone());

    let user = UserId::new("7");
    let handle = RecipientHandle::new("70");
    engine
        .handle(&InboundMessage::new(user.clone(), handle.clone(), "160 55"))
        .await;
    engine
        .handle(&InboundMessage::new(user.clone(), handle, "ні"))
        .await;

    let messenger = Arc::new(RecordingMessenger::new());
    let report = ReminderDispatcher::new(store, messenger.clone())
        .run_tick()
        .await;

    assert_eq!(report.enabled, 0);
    assert!(messenger.sent().is_empty());
    let _ = std::fs::remove_dir_all(dir);
}
