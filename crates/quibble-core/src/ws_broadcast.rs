//! Real-time push channel registry
//!
//! Keeps track of connected WebSocket clients keyed by recipient user id.
//! Supports multiple connections per user (multiple tabs/devices). The
//! notification dispatcher uses this to signal unread-count changes; an
//! offline recipient is a normal outcome, not an error.

use quibble_types::utils::random_id;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{RwLock, broadcast};

/// A message to push to a user
#[derive(Clone, Debug)]
pub struct BroadcastMessage {
	pub id: String,
	pub cmd: String,
	pub data: Value,
	pub sender: String,
	pub timestamp: u64,
}

impl BroadcastMessage {
	/// Create a new message
	pub fn new(cmd: impl Into<String>, data: Value, sender: impl Into<String>) -> Self {
		Self {
			id: random_id().unwrap_or_default(),
			cmd: cmd.into(),
			data,
			sender: sender.into(),
			timestamp: now_timestamp(),
		}
	}
}

/// A registered client connection
#[derive(Debug)]
pub struct UserConnection {
	/// Recipient user id
	pub user_id: Box<str>,
	/// Unique connection ID - supports multiple tabs/devices
	pub connection_id: Box<str>,
	/// When this connection was established
	pub connected_at: u64,
	/// Sender for this connection
	sender: broadcast::Sender<BroadcastMessage>,
}

/// Result of sending a message to a user
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DeliveryResult {
	/// Message delivered to N connections
	Delivered(usize),
	/// User is not connected (offline)
	UserOffline,
}

/// Registry statistics
#[derive(Clone, Debug)]
pub struct RegistryStats {
	/// Number of unique online users
	pub online_users: usize,
	/// Total number of connections (may be > users if multiple tabs)
	pub total_connections: usize,
}

/// Type alias for the registry map: user_id -> Vec<UserConnection>
type UserRegistryMap = HashMap<Box<str>, Vec<UserConnection>>;

/// Configuration
#[derive(Clone, Debug)]
pub struct BroadcastConfig {
	/// Maximum number of messages to buffer per connection
	pub buffer_size: usize,
}

impl Default for BroadcastConfig {
	fn default() -> Self {
		Self { buffer_size: 128 }
	}
}

/// Manages push delivery to connected WebSocket clients
pub struct BroadcastManager {
	users: Arc<RwLock<UserRegistryMap>>,
	config: BroadcastConfig,
}

impl BroadcastManager {
	/// Create a new manager with default config
	pub fn new() -> Self {
		Self::with_config(BroadcastConfig::default())
	}

	/// Create with custom config
	pub fn with_config(config: BroadcastConfig) -> Self {
		Self { users: Arc::new(RwLock::new(HashMap::new())), config }
	}

	/// Register a user connection.
	///
	/// Returns a receiver for messages targeted at this user. The
	/// connection_id should be unique per connection so one tab closing
	/// doesn't unregister the others.
	pub async fn register_user(
		&self,
		user_id: &str,
		connection_id: &str,
	) -> broadcast::Receiver<BroadcastMessage> {
		let (sender, receiver) = broadcast::channel(self.config.buffer_size);

		let connection = UserConnection {
			user_id: user_id.into(),
			connection_id: connection_id.into(),
			connected_at: now_timestamp(),
			sender,
		};

		let mut users = self.users.write().await;
		users.entry(user_id.into()).or_default().push(connection);

		tracing::debug!(user_id = %user_id, connection_id = %connection_id, "User registered");
		receiver
	}

	/// Unregister a user connection.
	///
	/// Removes the specific connection identified by connection_id. Other
	/// connections for the same user (other tabs) are preserved.
	pub async fn unregister_user(&self, user_id: &str, connection_id: &str) {
		let mut users = self.users.write().await;

		if let Some(connections) = users.get_mut(user_id) {
			connections.retain(|conn| conn.connection_id.as_ref() != connection_id);

			// Clean up empty entries
			if connections.is_empty() {
				users.remove(user_id);
			}
		}

		tracing::debug!(user_id = %user_id, connection_id = %connection_id, "User unregistered");
	}

	/// Send a message to a specific user.
	///
	/// Delivers the message to all connections for the user. Returns
	/// `DeliveryResult::Delivered(n)` with the number of connections that
	/// received the message, or `DeliveryResult::UserOffline` if the user
	/// has no active connections.
	pub async fn send_to_user(&self, user_id: &str, msg: BroadcastMessage) -> DeliveryResult {
		let users = self.users.read().await;

		if let Some(connections) = users.get(user_id) {
			let mut delivered = 0;
			for conn in connections {
				if conn.sender.send(msg.clone()).is_ok() {
					delivered += 1;
				}
			}
			if delivered > 0 {
				return DeliveryResult::Delivered(delivered);
			}
		}

		DeliveryResult::UserOffline
	}

	/// Check if a user is currently online (has at least one connection)
	pub async fn is_user_online(&self, user_id: &str) -> bool {
		let users = self.users.read().await;

		users.get(user_id).is_some_and(|connections| !connections.is_empty())
	}

	/// Get registry statistics
	pub async fn stats(&self) -> RegistryStats {
		let users = self.users.read().await;

		let online_users = users.len();
		let total_connections = users.values().map(Vec::len).sum();

		RegistryStats { online_users, total_connections }
	}
}

impl Default for BroadcastManager {
	fn default() -> Self {
		Self::new()
	}
}

/// Get current timestamp
fn now_timestamp() -> u64 {
	std::time::SystemTime::now()
		.duration_since(std::time::UNIX_EPOCH)
		.unwrap_or_default()
		.as_secs()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn test_register_user() {
		let manager = BroadcastManager::new();

		let _rx = manager.register_user("alice", "conn-1").await;

		assert!(manager.is_user_online("alice").await);
		assert!(!manager.is_user_online("bob").await);

		let stats = manager.stats().await;
		assert_eq!(stats.online_users, 1);
		assert_eq!(stats.total_connections, 1);
	}

	#[tokio::test]
	async fn test_multiple_connections_per_user() {
		let manager = BroadcastManager::new();

		let _rx1 = manager.register_user("alice", "conn-1").await;
		let _rx2 = manager.register_user("alice", "conn-2").await;

		let stats = manager.stats().await;
		assert_eq!(stats.online_users, 1);
		assert_eq!(stats.total_connections, 2);

		let msg =
			BroadcastMessage::new("NOTIFICATION", serde_json::json!({ "unread": 3 }), "system");
		let result = manager.send_to_user("alice", msg).await;
		assert_eq!(result, DeliveryResult::Delivered(2));
	}

	#[tokio::test]
	async fn test_send_to_user() {
		let manager = BroadcastManager::new();

		let mut rx = manager.register_user("alice", "conn-1").await;

		let msg =
			BroadcastMessage::new("NOTIFICATION", serde_json::json!({ "unread": 1 }), "system");
		let result = manager.send_to_user("alice", msg).await;

		assert_eq!(result, DeliveryResult::Delivered(1));

		let received = rx.recv().await.unwrap();
		assert_eq!(received.cmd, "NOTIFICATION");
		assert_eq!(received.data["unread"], 1);
	}

	#[tokio::test]
	async fn test_send_to_offline_user() {
		let manager = BroadcastManager::new();

		let msg = BroadcastMessage::new("NOTIFICATION", serde_json::json!({}), "system");
		let result = manager.send_to_user("bob", msg).await;

		assert_eq!(result, DeliveryResult::UserOffline);
	}

	#[tokio::test]
	async fn test_unregister_user() {
		let manager = BroadcastManager::new();

		let _rx1 = manager.register_user("alice", "conn-1").await;
		let _rx2 = manager.register_user("alice", "conn-2").await;

		manager.unregister_user("alice", "conn-1").await;
		assert!(manager.is_user_online("alice").await);

		manager.unregister_user("alice", "conn-2").await;
		assert!(!manager.is_user_online("alice").await);
	}
}

// vim: ts=4
