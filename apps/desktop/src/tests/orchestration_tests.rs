use super::*;
use client_core::SessionConfig;
use shared::domain::Screen;

use crate::commands::parse_command;

fn flow() -> ScreenFlow {
    ScreenFlow::new(SessionConfig {
        random_seed: Some(1),
        ..SessionConfig::default()
    })
}

async fn run_script(flow: &mut ScreenFlow, script: &str) -> Vec<Reply> {
    let mut replies = Vec::new();
    for line in script.lines() {
        if let Some(command) = parse_command(line).expect("valid command") {
            replies.push(dispatch(flow, command).await);
        }
    }
    replies
}

fn text(reply: &Reply) -> &str {
    match reply {
        Reply::Text(text) => text,
        other => panic!("expected text reply, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn scripted_training_session_reaches_recognition() {
    let mut flow = flow();
    let replies = run_script(
        &mut flow,
        "proceed
         add hello
         add bye
         select 1
         capture
         wait 1600
         capture
         wait 1600
         status",
    )
    .await;

    let status = text(replies.last().expect("status reply"));
    assert!(status.contains("2/30"), "status was: {status}");
    assert!(status.contains("> 1. hello"));

    let replies = run_script(&mut flow, "next\nwait 2001\nstatus").await;
    assert_eq!(flow.screen(), Screen::Translation);
    let status = text(replies.last().expect("status reply"));
    assert!(status.contains("recognized: hello") || status.contains("recognized: bye"));
}

#[tokio::test]
async fn commands_outside_their_screen_are_rejected() {
    let mut flow = flow();
    let replies = run_script(&mut flow, "add hello\nnext\npause\nmic").await;

    assert_eq!(
        text(&replies[0]),
        "rejected: 'add' is only available on the training screen"
    );
    assert!(text(&replies[1]).starts_with("rejected: cannot test recognition"));
    assert!(text(&replies[2]).contains("recognition screen"));
    assert!(text(&replies[3]).contains("during a call"));
    assert_eq!(flow.screen(), Screen::Welcome);
}

#[tokio::test]
async fn empty_training_cannot_advance() {
    let mut flow = flow();
    let replies = run_script(&mut flow, "proceed\nadd   \nnext").await;

    assert!(text(&replies[1]).contains("gesture name is empty"));
    assert!(text(&replies[2]).contains("add at least one gesture"));
    assert_eq!(flow.screen(), Screen::Training);
}

#[tokio::test(start_paused = true)]
async fn double_capture_is_reported_busy() {
    let mut flow = flow();
    let replies = run_script(&mut flow, "proceed\nadd wave\ncapture\ncapture").await;

    assert!(text(&replies[2]).starts_with("capturing wave"));
    assert!(text(&replies[3]).contains("already in flight"));
}

#[tokio::test]
async fn missing_positions_are_reported() {
    let mut flow = flow();
    let replies = run_script(&mut flow, "proceed\nadd a\ndelete 3\ncapture").await;

    assert_eq!(text(&replies[2]), "rejected: there is no sign #3");
    assert!(text(&replies[3]).starts_with("capturing a"));
}

#[tokio::test]
async fn back_returns_to_the_previous_screen() {
    let mut flow = flow();
    run_script(&mut flow, "proceed\nadd a\nnext\nback").await;
    assert_eq!(flow.screen(), Screen::Training);

    run_script(&mut flow, "back").await;
    assert_eq!(flow.screen(), Screen::Welcome);
}

#[tokio::test]
async fn call_commands_toggle_media() {
    let mut flow = flow();
    let replies = run_script(&mut flow, "proceed\nadd a\nnext\ncall\nmic\nend\nquit").await;

    assert!(text(&replies[3]).contains("mic: on  camera: on"));
    assert!(text(&replies[4]).contains("mic: off  camera: on"));
    assert!(text(&replies[5]).contains("Test Your Signs"));
    assert_eq!(replies[6], Reply::Quit);
}
