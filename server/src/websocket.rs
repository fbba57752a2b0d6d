//! WebSocket upgrade handler for the push channel
//!
//! One connection per tab/device; each registers with the broadcast
//! registry under the authenticated user id and streams messages (e.g.
//! unread-count changes) until disconnect.

use axum::{
	extract::State,
	extract::ws::{CloseFrame, Message, WebSocket, WebSocketUpgrade},
	response::Response,
};
use futures::{SinkExt, StreamExt};
use tokio::sync::broadcast::error::RecvError;

use quibble_core::extract::OptionalAuth;
use quibble_core::prelude::*;
use quibble_types::utils::random_id;

/// Helper to close WebSocket with error code
async fn close_with_error(mut socket: WebSocket, code: u16, reason: &'static str) {
	let _ = socket
		.send(Message::Close(Some(CloseFrame { code, reason: reason.into() })))
		.await;
	let _ = socket.close().await;
}

/// GET /ws - push channel upgrade. Requires authentication.
pub async fn get_ws(
	ws: WebSocketUpgrade,
	State(app): State<App>,
	OptionalAuth(auth): OptionalAuth,
) -> Response {
	debug!("Push channel WebSocket request");

	let Some(auth) = auth else {
		warn!("Push channel WebSocket rejected - no authentication");
		return ws.on_upgrade(|socket| {
			close_with_error(socket, 4401, "Unauthorized - authentication required")
		});
	};

	let user_id = auth.user_id.to_string();
	ws.on_upgrade(move |socket| handle_connection(socket, user_id, app))
}

async fn handle_connection(socket: WebSocket, user_id: String, app: App) {
	let connection_id = random_id().unwrap_or_default();
	let mut rx = app.broadcast.register_user(&user_id, &connection_id).await;
	let (mut sender, mut receiver) = socket.split();

	loop {
		tokio::select! {
			msg = rx.recv() => match msg {
				Ok(msg) => {
					let payload = serde_json::json!({
						"id": msg.id,
						"cmd": msg.cmd,
						"data": msg.data,
						"timestamp": msg.timestamp,
					});
					if sender.send(Message::Text(payload.to_string().into())).await.is_err() {
						break;
					}
				}
				Err(RecvError::Lagged(skipped)) => {
					warn!(user_id = %user_id, skipped = %skipped, "Push channel lagged");
				}
				Err(RecvError::Closed) => break,
			},
			incoming = receiver.next() => match incoming {
				Some(Ok(Message::Close(_))) | None => break,
				Some(Ok(_)) => {} // client pings and chatter are ignored
				Some(Err(_)) => break,
			},
		}
	}

	app.broadcast.unregister_user(&user_id, &connection_id).await;
	debug!(user_id = %user_id, connection_id = %connection_id, "Push channel closed");
}

// vim: ts=4
