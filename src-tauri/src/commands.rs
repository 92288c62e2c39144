use std::sync::mpsc::{self, Sender};

use serde_json::Value;
use snowrelief_shared::command::Command;
use snowrelief_shared::coordinator::AppEvent;
use tauri::State;

/// Sender half of the coordinator channel, managed as Tauri state.
pub struct Events(pub Sender<AppEvent>);

/// Tauri command: run a named coordinator command.
///
/// The reply is `null` for plain commands and a number for
/// `get-current-opacity`.
#[tauri::command]
pub async fn ipc(
    channel: String,
    payload: Option<Value>,
    events: State<'_, Events>,
) -> Result<Value, String> {
    let command = Command::parse(&channel, payload).map_err(|e| e.to_string())?;

    let (reply, answer) = mpsc::channel();
    events
        .0
        .send(AppEvent::Invoke {
            command,
            reply: Some(reply),
        })
        .map_err(|_| "coordinator is not running".to_string())?;

    // Blocks until the coordinator has handled the command.
    let result = tauri::async_runtime::spawn_blocking(move || answer.recv())
        .await
        .map_err(|e| e.to_string())?
        .map_err(|_| format!("{} was dropped without a reply", channel))?;

    let reply = result.map_err(|e| e.to_string())?;
    serde_json::to_value(reply).map_err(|e| e.to_string())
}
