use std::time::Duration;

use client_core::{ScreenFlow, SessionConfig};
use shared::{
    domain::{Screen, SAMPLE_TARGET},
    protocol::SessionEvent,
};

#[tokio::test(start_paused = true)]
async fn train_two_signs_then_recognize_and_return() {
    let config = SessionConfig {
        random_seed: Some(5),
        ..SessionConfig::default()
    };
    let period = config.recognition_period;
    let mut flow = ScreenFlow::new(config);
    let mut events = flow.subscribe_events();

    flow.proceed().expect("welcome -> training");
    assert!(flow.next().await.is_err(), "empty collection must not advance");
    assert_eq!(flow.screen(), Screen::Training);

    let training = flow.training_mut().expect("training screen");
    let hello = training.add("hello").await.expect("add hello");
    let bye = training.add("bye").await.expect("add bye");
    training.select(hello.id).await.expect("select hello");

    for _ in 0..=SAMPLE_TARGET {
        if let Ok(ticket) = training.capture_sample(hello.id).await {
            ticket.finished().await.expect("capture lands");
        }
    }
    let ticket = training.capture_sample(bye.id).await.expect("capture bye");
    ticket.finished().await.expect("capture lands");

    let session = training.session().await;
    assert_eq!(session.get(hello.id).map(|g| g.samples), Some(SAMPLE_TARGET));
    assert_eq!(session.get(bye.id).map(|g| g.samples), Some(1));
    assert_eq!(session.completed_count(), 1);
    let before_handoff = session.snapshot();

    flow.next().await.expect("training -> translation");
    tokio::time::sleep(period + Duration::from_millis(1)).await;
    let recognized = flow
        .translation()
        .expect("translation screen")
        .last_recognized()
        .await;
    assert!(recognized == "hello" || recognized == "bye");

    flow.back_to_training().expect("translation -> training");
    let after_round_trip = flow.training().expect("training").snapshot().await;
    assert_eq!(after_round_trip, before_handoff);

    let mut recognized_events = 0;
    while let Ok(event) = events.try_recv() {
        let json = serde_json::to_value(&event).expect("event serializes");
        assert!(json["type"].is_string());
        if let SessionEvent::Recognized { label, .. } = event {
            assert_eq!(label, recognized);
            recognized_events += 1;
        }
    }
    assert_eq!(recognized_events, 1);
}
