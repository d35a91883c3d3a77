// src/types.rs
use crate::identity::IdentitySource;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Default user agent advertised by the rich header preset.
pub const DEFAULT_USER_AGENT: &str = "AssetLoadgen/1.0";

/// The actions a virtual user can perform against the asset service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    /// POST /asset/add with a JSON payload
    AddAsset,
    /// GET /asset/balances
    GetBalances,
    /// GET /asset/balance?uid=..&currency=.. (disabled by default)
    GetBalance,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::AddAsset => "add_asset",
            ActionKind::GetBalances => "get_balances",
            ActionKind::GetBalance => "get_balance",
        }
    }
}

/// HTTP method for an action request. Only the two verbs the asset service
/// exposes are needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// One ephemeral HTTP call: built fresh per action, discarded after the call.
#[derive(Debug, Clone)]
pub struct ActionRequest {
    pub kind: ActionKind,
    pub method: Method,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub body: Option<serde_json::Value>,
}

/// JSON body for POST /asset/add.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetPayload {
    pub uid: String,
    pub currency: String,
    pub amount: f64,
}

/// Bounds for the randomized delay between a user's consecutive actions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WaitRange {
    pub min_secs: f64,
    pub max_secs: f64,
}

impl Default for WaitRange {
    fn default() -> Self {
        Self {
            min_secs: 0.5,
            max_secs: 1.0,
        }
    }
}

/// Which optional headers a user attaches to its requests.
///
/// The two observed client variants differed only in headers and identity
/// source; both are kept as explicit presets instead of guessing a single
/// canonical form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeaderConfig {
    pub bearer_token: Option<String>,
    pub send_accept: bool,
    pub send_content_type: bool,
    pub user_agent: Option<String>,
}

impl HeaderConfig {
    /// Full header set: bearer auth, accept, content-type, user agent.
    pub fn rich(token: impl Into<String>) -> Self {
        Self {
            bearer_token: Some(token.into()),
            send_accept: true,
            send_content_type: true,
            user_agent: Some(DEFAULT_USER_AGENT.to_string()),
        }
    }

    /// No optional headers at all.
    pub fn minimal() -> Self {
        Self::default()
    }
}

/// Relative selection weights per action.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ActionWeights {
    pub add_asset: u32,
    pub get_balances: u32,
    pub get_balance: u32,
}

impl Default for ActionWeights {
    fn default() -> Self {
        Self {
            add_asset: 3,
            get_balances: 1,
            get_balance: 0,
        }
    }
}

impl ActionWeights {
    pub fn entries(&self) -> Vec<(ActionKind, u32)> {
        vec![
            (ActionKind::AddAsset, self.add_asset),
            (ActionKind::GetBalances, self.get_balances),
            (ActionKind::GetBalance, self.get_balance),
        ]
    }
}

/// Per-user configuration fixed at user creation. No implicit sharing
/// across users.
#[derive(Debug, Clone)]
pub struct UserConfig {
    pub identity: IdentitySource,
    pub headers: HeaderConfig,
    pub wait: WaitRange,
    pub weights: ActionWeights,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self::fixed_pool()
    }
}

impl UserConfig {
    /// Variant A: fixed three-account pool, rich headers with an empty token.
    pub fn fixed_pool() -> Self {
        Self {
            identity: IdentitySource::default_pool(),
            headers: HeaderConfig::rich(""),
            wait: WaitRange::default(),
            weights: ActionWeights::default(),
        }
    }

    /// Variant B: random nine-character ids, minimal headers.
    pub fn random_ids() -> Self {
        Self {
            identity: IdentitySource::random_alphanumeric(9),
            headers: HeaderConfig::minimal(),
            wait: WaitRange::default(),
            weights: ActionWeights::default(),
        }
    }
}

/// What one completed action looked like on the wire.
#[derive(Debug, Clone)]
pub struct ActionOutcome {
    pub kind: ActionKind,
    /// HTTP status if a response came back at all
    pub status: Option<u16>,
    pub latency: Duration,
    pub success: bool,
}

/// Aggregate counters for one action kind.
#[derive(Debug, Clone, Default)]
pub struct ActionStats {
    pub requests: u64,
    pub failures: u64,
    pub total_latency: Duration,
}

impl ActionStats {
    pub fn avg_latency(&self) -> Duration {
        if self.requests == 0 {
            Duration::ZERO
        } else {
            self.total_latency / self.requests as u32
        }
    }
}

/// Snapshot of the whole run.
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    pub per_action: HashMap<ActionKind, ActionStats>,
    pub started_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl RunStats {
    pub fn total_requests(&self) -> u64 {
        self.per_action.values().map(|s| s.requests).sum()
    }

    pub fn total_failures(&self) -> u64 {
        self.per_action.values().map(|s| s.failures).sum()
    }
}
