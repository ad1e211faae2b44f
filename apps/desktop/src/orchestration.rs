//! Maps prompt commands onto the screen flow.

use anyhow::{anyhow, Result};
use client_core::{ScreenFlow, TrainingController};
use shared::domain::GestureId;
use tracing::debug;

use crate::{
    commands::{Command, HELP},
    render,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Silent,
    Quit,
}

/// Runs one command. Rejections are reported back as text; none of them
/// end the session.
pub async fn dispatch(flow: &mut ScreenFlow, command: Command) -> Reply {
    let cmd_name = command.name();
    match run(flow, command).await {
        Ok(reply) => {
            debug!(command = cmd_name, "handled command");
            reply
        }
        Err(err) => {
            debug!(command = cmd_name, "command rejected: {err:#}");
            Reply::Text(format!("rejected: {err:#}"))
        }
    }
}

async fn run(flow: &mut ScreenFlow, command: Command) -> Result<Reply> {
    match command {
        Command::Proceed => flow.proceed()?,
        Command::Back => {
            if flow.training().is_some() {
                flow.back()?;
            } else {
                flow.back_to_training()?;
            }
        }
        Command::Next => flow.next().await?,
        Command::Add { name } => {
            training(flow, "add")?.add(&name).await?;
        }
        Command::Select { position } => {
            let training = training(flow, "select")?;
            let id = gesture_at(training, position).await?;
            training.select(id).await?;
        }
        Command::Delete { position } => {
            let training = training(flow, "delete")?;
            let id = gesture_at(training, position).await?;
            training.delete(id).await?;
        }
        Command::Clear { position } => {
            let training = training(flow, "clear")?;
            let id = gesture_at(training, position).await?;
            training.clear_samples(id).await?;
        }
        Command::Capture => {
            let training = training(flow, "capture")?;
            let session = training.session().await;
            let gesture = session
                .selected_gesture()
                .ok_or_else(|| anyhow!("select a sign first"))?;
            training.capture_sample(gesture.id).await?;
            return Ok(Reply::Text(format!(
                "capturing {}... hold the sign",
                gesture.name
            )));
        }
        Command::Pause => translation(flow, "pause")?.pause(),
        Command::Resume => translation(flow, "resume")?.resume(),
        Command::Call => flow.start_call().await?,
        Command::Mic => {
            let call = flow
                .video_call()
                .ok_or_else(|| anyhow!("'mic' is only available during a call"))?;
            call.toggle_mic().await?;
        }
        Command::Camera => {
            let call = flow
                .video_call()
                .ok_or_else(|| anyhow!("'camera' is only available during a call"))?;
            call.toggle_camera().await?;
        }
        Command::End => flow.end_call().await?,
        Command::Status => {}
        Command::Wait { duration } => {
            tokio::time::sleep(duration).await;
            return Ok(Reply::Silent);
        }
        Command::Help => return Ok(Reply::Text(HELP.to_string())),
        Command::Quit => return Ok(Reply::Quit),
    }
    Ok(Reply::Text(render::status(flow).await))
}

fn training<'a>(
    flow: &'a mut ScreenFlow,
    command: &'static str,
) -> Result<&'a mut TrainingController> {
    flow.training_mut()
        .ok_or_else(|| anyhow!("'{command}' is only available on the training screen"))
}

fn translation<'a>(
    flow: &'a mut ScreenFlow,
    command: &'static str,
) -> Result<&'a mut client_core::RecognitionSimulator> {
    flow.translation_mut()
        .ok_or_else(|| anyhow!("'{command}' is only available on the recognition screen"))
}

async fn gesture_at(training: &TrainingController, position: usize) -> Result<GestureId> {
    training
        .session()
        .await
        .gestures()
        .get(position.saturating_sub(1))
        .map(|g| g.id)
        .ok_or_else(|| anyhow!("there is no sign #{position}"))
}

#[cfg(test)]
#[path = "tests/orchestration_tests.rs"]
mod tests;
