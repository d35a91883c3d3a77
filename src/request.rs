// src/request.rs
use crate::error::{LoadgenError, LoadgenResult};
use crate::identity::IdentitySource;
use crate::types::{ActionKind, ActionRequest, AssetPayload, HeaderConfig, Method};
use rand::Rng;
use std::collections::HashMap;

pub const ADD_ASSET_PATH: &str = "/asset/add";
pub const GET_BALANCES_PATH: &str = "/asset/balances";
pub const GET_BALANCE_PATH: &str = "/asset/balance";

const CURRENCY: &str = "USD";

/// Sample an asset amount: uniform in [1, 1000], rounded to 2 decimals.
pub fn sample_amount<R: Rng>(rng: &mut R) -> f64 {
    let raw: f64 = rng.gen_range(1.0..=1000.0);
    (raw * 100.0).round() / 100.0
}

/// Build the JSON payload for an add-asset call, drawing a fresh uid.
pub fn build_payload<R: Rng>(
    identity: &IdentitySource,
    rng: &mut R,
) -> LoadgenResult<AssetPayload> {
    Ok(AssetPayload {
        uid: identity.next_uid(rng)?,
        currency: CURRENCY.to_string(),
        amount: sample_amount(rng),
    })
}

fn base_headers(config: &HeaderConfig) -> HashMap<String, String> {
    let mut headers = HashMap::new();
    if let Some(token) = &config.bearer_token {
        headers.insert("Authorization".to_string(), format!("Bearer {token}"));
    }
    if config.send_accept {
        headers.insert("Accept".to_string(), "application/json".to_string());
    }
    if let Some(agent) = &config.user_agent {
        headers.insert("User-Agent".to_string(), agent.clone());
    }
    headers
}

/// POST /asset/add with a fresh payload. Content-type always accompanies
/// the JSON body.
pub fn add_asset<R: Rng>(
    identity: &IdentitySource,
    config: &HeaderConfig,
    rng: &mut R,
) -> LoadgenResult<ActionRequest> {
    let payload = build_payload(identity, rng)?;
    let body = serde_json::to_value(&payload)
        .map_err(|e| LoadgenError::SerializationError(e.to_string()))?;

    let mut headers = base_headers(config);
    headers.insert(
        "Content-Type".to_string(),
        "application/json".to_string(),
    );

    Ok(ActionRequest {
        kind: ActionKind::AddAsset,
        method: Method::Post,
        path: ADD_ASSET_PATH.to_string(),
        headers,
        body: Some(body),
    })
}

/// GET /asset/balances. Never carries a body.
pub fn get_balances(config: &HeaderConfig) -> ActionRequest {
    ActionRequest {
        kind: ActionKind::GetBalances,
        method: Method::Get,
        path: GET_BALANCES_PATH.to_string(),
        headers: base_headers(config),
        body: None,
    }
}

/// GET /asset/balance for a single uid. The service expects uid and
/// currency as query parameters.
pub fn get_balance<R: Rng>(
    identity: &IdentitySource,
    config: &HeaderConfig,
    rng: &mut R,
) -> LoadgenResult<ActionRequest> {
    let uid = identity.next_uid(rng)?;
    Ok(ActionRequest {
        kind: ActionKind::GetBalance,
        method: Method::Get,
        path: format!("{GET_BALANCE_PATH}?uid={uid}&currency={CURRENCY}"),
        headers: base_headers(config),
        body: None,
    })
}

/// Build the request for whichever action the selection policy picked.
pub fn build_for_action<R: Rng>(
    kind: ActionKind,
    identity: &IdentitySource,
    config: &HeaderConfig,
    rng: &mut R,
) -> LoadgenResult<ActionRequest> {
    match kind {
        ActionKind::AddAsset => add_asset(identity, config, rng),
        ActionKind::GetBalances => Ok(get_balances(config)),
        ActionKind::GetBalance => get_balance(identity, config, rng),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn two_decimals(v: f64) -> bool {
        (v * 100.0 - (v * 100.0).round()).abs() < 1e-9
    }

    #[test]
    fn test_amount_bounds_and_precision() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..10_000 {
            let amount = sample_amount(&mut rng);
            assert!((1.0..=1000.0).contains(&amount), "out of range: {amount}");
            assert!(two_decimals(amount), "more than 2 decimals: {amount}");
        }
    }

    #[test]
    fn test_payload_shape() {
        let identity = IdentitySource::default_pool();
        let mut rng = StdRng::seed_from_u64(12);

        let payload = build_payload(&identity, &mut rng).unwrap();
        assert_eq!(payload.currency, "USD");
        assert!(!payload.uid.is_empty());
    }

    #[test]
    fn test_add_asset_request() {
        let identity = IdentitySource::default_pool();
        let config = HeaderConfig::rich("secret");
        let mut rng = StdRng::seed_from_u64(13);

        let req = add_asset(&identity, &config, &mut rng).unwrap();
        assert_eq!(req.kind, ActionKind::AddAsset);
        assert_eq!(req.method, Method::Post);
        assert_eq!(req.path, "/asset/add");
        assert_eq!(
            req.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(
            req.headers.get("Authorization").map(String::as_str),
            Some("Bearer secret")
        );

        let body = req.body.unwrap();
        assert_eq!(body["currency"], "USD");
        assert!(body["uid"].is_string());
        assert!(body["amount"].is_number());
    }

    #[test]
    fn test_get_balances_has_no_body() {
        let req = get_balances(&HeaderConfig::rich("t"));
        assert_eq!(req.method, Method::Get);
        assert_eq!(req.path, "/asset/balances");
        assert!(req.body.is_none());
        // GETs never get a content-type
        assert!(!req.headers.contains_key("Content-Type"));
    }

    #[test]
    fn test_minimal_headers_omit_everything_optional() {
        let req = get_balances(&HeaderConfig::minimal());
        assert!(req.headers.is_empty());

        let identity = IdentitySource::random_alphanumeric(9);
        let mut rng = StdRng::seed_from_u64(14);
        let post = add_asset(&identity, &HeaderConfig::minimal(), &mut rng).unwrap();
        // content-type still travels with the JSON body
        assert_eq!(post.headers.len(), 1);
        assert!(post.headers.contains_key("Content-Type"));
    }

    #[test]
    fn test_get_balance_query_string() {
        let identity = IdentitySource::FixedPool(vec!["user2".to_string()]);
        let mut rng = StdRng::seed_from_u64(15);

        let req = get_balance(&identity, &HeaderConfig::minimal(), &mut rng).unwrap();
        assert_eq!(req.path, "/asset/balance?uid=user2&currency=USD");
        assert!(req.body.is_none());
    }
}
