use super::*;
use shared::domain::SAMPLE_TARGET;

const LATENCY: Duration = Duration::from_millis(1500);

fn controller() -> (TrainingController, broadcast::Receiver<SessionEvent>) {
    let (events, rx) = broadcast::channel(256);
    (TrainingController::new(Vec::new(), LATENCY, events), rx)
}

#[tokio::test(start_paused = true)]
async fn sample_count_caps_at_target_after_repeated_captures() {
    let (mut training, _rx) = controller();
    let hello = training.add("hello").await.expect("hello");
    let bye = training.add("bye").await.expect("bye");

    let mut rejected = 0;
    for _ in 0..=SAMPLE_TARGET {
        match training.capture_sample(hello.id).await {
            Ok(ticket) => {
                ticket.finished().await.expect("capture lands");
            }
            Err(err) => {
                assert_eq!(err, SessionError::SampleTargetReached(hello.id));
                rejected += 1;
            }
        }
    }

    let session = training.session().await;
    assert_eq!(rejected, 1);
    assert_eq!(session.get(hello.id).map(|g| g.samples), Some(SAMPLE_TARGET));
    assert_eq!(session.get(bye.id).map(|g| g.samples), Some(0));
    assert!(!session.is_capturing());
}

#[tokio::test(start_paused = true)]
async fn sample_lands_only_after_latency() {
    let (mut training, _rx) = controller();
    let wave = training.add("wave").await.expect("wave");

    let ticket = training.capture_sample(wave.id).await.expect("capture");
    assert!(training.is_capturing().await);

    tokio::time::sleep(LATENCY - Duration::from_millis(10)).await;
    assert_eq!(
        training.session().await.get(wave.id).map(|g| g.samples),
        Some(0)
    );

    assert_eq!(ticket.finished().await, Some(1));
    assert!(!training.is_capturing().await);
}

#[tokio::test(start_paused = true)]
async fn overlapping_capture_requests_are_ignored() {
    let (mut training, _rx) = controller();
    let a = training.add("a").await.expect("a");
    let b = training.add("b").await.expect("b");

    let ticket = training.capture_sample(a.id).await.expect("first capture");
    assert!(matches!(
        training.capture_sample(a.id).await,
        Err(SessionError::CaptureInFlight)
    ));
    assert!(matches!(
        training.capture_sample(b.id).await,
        Err(SessionError::CaptureInFlight)
    ));

    assert_eq!(ticket.finished().await, Some(1));
    let session = training.session().await;
    assert_eq!(session.get(a.id).map(|g| g.samples), Some(1));
    assert_eq!(session.get(b.id).map(|g| g.samples), Some(0));
}

#[tokio::test(start_paused = true)]
async fn edits_during_capture_are_kept() {
    let (mut training, _rx) = controller();
    let a = training.add("a").await.expect("a");

    let ticket = training.capture_sample(a.id).await.expect("capture");
    let b = training.add("b").await.expect("added mid-capture");
    ticket.finished().await.expect("capture lands");

    let session = training.session().await;
    assert_eq!(session.len(), 2);
    assert!(session.get(b.id).is_some());
    assert_eq!(session.get(a.id).map(|g| g.samples), Some(1));
}

#[tokio::test(start_paused = true)]
async fn deleting_gesture_mid_capture_discards_the_sample() {
    let (mut training, _rx) = controller();
    let a = training.add("a").await.expect("a");

    let ticket = training.capture_sample(a.id).await.expect("capture");
    training.delete(a.id).await.expect("delete");

    assert_eq!(ticket.finished().await, None);
    assert!(!training.is_capturing().await);
    assert!(training.session().await.is_empty());
}

#[tokio::test(start_paused = true)]
async fn shutdown_drops_pending_capture() {
    let (mut training, _rx) = controller();
    let a = training.add("a").await.expect("a");

    let ticket = training.capture_sample(a.id).await.expect("capture");
    let snapshot = training.shutdown().await;

    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].samples, 0);
    assert_eq!(ticket.finished().await, None);
}

#[tokio::test]
async fn clear_samples_resets_only_target() {
    let (events, _rx) = broadcast::channel(64);
    let mut a = GestureRecord::new("a").expect("a");
    a.samples = 12;
    let mut b = GestureRecord::new("b").expect("b");
    b.samples = 5;
    let training = TrainingController::new(vec![a.clone(), b.clone()], LATENCY, events);

    training.clear_samples(a.id).await.expect("clear");
    let session = training.session().await;
    assert_eq!(session.get(a.id).map(|g| g.samples), Some(0));
    assert_eq!(session.get(b.id), Some(&b));
}

#[tokio::test]
async fn mutations_are_published_as_events() {
    let (training, mut rx) = controller();
    let hello = training.add("hello").await.expect("hello");
    assert!(training.add("  ").await.is_err());
    training.delete(hello.id).await.expect("delete");

    let mut seen = Vec::new();
    while let Ok(event) = rx.try_recv() {
        seen.push(event);
    }

    assert!(matches!(
        &seen[0],
        SessionEvent::GestureAdded { gesture } if gesture.name == "hello"
    ));
    assert!(matches!(
        &seen[1],
        SessionEvent::SelectionChanged { gesture_id: Some(id) } if *id == hello.id
    ));
    assert!(matches!(&seen[2], SessionEvent::Rejected(_)));
    assert!(matches!(
        &seen[3],
        SessionEvent::GestureDeleted { gesture_id } if *gesture_id == hello.id
    ));
    assert!(matches!(
        &seen[4],
        SessionEvent::SelectionChanged { gesture_id: None }
    ));
}

#[tokio::test]
async fn unknown_ids_leave_session_untouched() {
    let (mut training, _rx) = controller();
    training.add("a").await.expect("a");
    let before = training.session().await;
    let stranger = GestureId::new();

    assert!(training.select(stranger).await.is_err());
    assert!(training.delete(stranger).await.is_err());
    assert!(training.clear_samples(stranger).await.is_err());
    assert!(training.capture_sample(stranger).await.is_err());

    assert_eq!(training.session().await, before);
}
