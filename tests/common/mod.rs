use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

/// In-memory stand-in for the stack's REST backend. Tests mutate it through
/// the shared handle to stage scenarios (PIN configured, assets referenced,
/// registry changed server-side).
pub struct BackendState {
    pub admin_pin: Option<String>,
    pub locked: bool,
    pub auth_deployed: bool,

    pub active_campaign: String,
    pub llm_provider: String,
    pub audio_registry: Value,

    pub env: BTreeMap<String, String>,
    pub campaigns: Vec<Value>,
    pub characters: Vec<Value>,
    pub asset_refs: BTreeMap<String, Vec<String>>,

    pub restarts: Vec<String>,
    pub deleted_assets: Vec<String>,
    pub config_fetches: u64,
}

impl Default for BackendState {
    fn default() -> Self {
        Self {
            admin_pin: None,
            locked: false,
            auth_deployed: true,
            active_campaign: "the_collision_stone".to_string(),
            llm_provider: "Gemini-Flash".to_string(),
            audio_registry: json!({
                "dmName": "DM",
                "dmVoice": "",
                "archetypes": [],
                "soundscapes": [],
            }),
            env: BTreeMap::new(),
            campaigns: Vec::new(),
            characters: Vec::new(),
            asset_refs: BTreeMap::new(),
            restarts: Vec::new(),
            deleted_assets: Vec::new(),
            config_fetches: 0,
        }
    }
}

type Shared = Arc<Mutex<BackendState>>;

pub struct ServerGuard {
    pub base_url: String,
    pub state: Shared,
    _runtime: tokio::runtime::Runtime,
}

pub fn spawn_server(state: BackendState) -> Result<ServerGuard> {
    let shared: Shared = Arc::new(Mutex::new(state));

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("build test runtime")?;

    let listener = runtime
        .block_on(tokio::net::TcpListener::bind("127.0.0.1:0"))
        .context("bind test listener")?;
    let addr = listener.local_addr().context("listener addr")?;

    let app = router(Arc::clone(&shared));
    runtime.spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(ServerGuard {
        base_url: format!("http://{}", addr),
        state: shared,
        _runtime: runtime,
    })
}

fn router(state: Shared) -> Router {
    Router::new()
        .route("/", get(|| async { "ok" }))
        .route("/system/config", get(get_config))
        .route("/system/audio/save", post(save_audio))
        .route("/system/audio/voices", get(list_voices))
        .route("/system/audio/kenku/tracks", get(list_tracks))
        .route("/system/auth/status", get(auth_status))
        .route("/system/auth/lock", post(auth_lock))
        .route("/system/auth/unlock", post(auth_unlock))
        .route("/system/env/all", get(env_all))
        .route("/system/env", post(env_set))
        .route("/system/campaigns/list", get(campaigns_list))
        .route("/system/campaigns/activate", post(campaigns_activate))
        .route("/system/campaigns/delete/:id", delete(campaigns_delete))
        .route("/system/control/logs/:service", get(control_logs))
        .route("/system/control/restart/:service", post(control_restart))
        .route("/game/discord/members", get(discord_members))
        .route("/game/characters", get(characters_list))
        .route("/game/characters/:id", get(character_get))
        .route("/game/characters/:id/save", post(character_save))
        .route("/game/assets/:id", delete(asset_delete))
        .with_state(state)
}

async fn get_config(State(state): State<Shared>) -> Json<Value> {
    let mut s = state.lock().unwrap();
    s.config_fetches += 1;
    Json(json!({
        "active_campaign": s.active_campaign,
        "llm_provider": s.llm_provider,
        "art_style": "Cinematic Fantasy",
        "audio_registry": s.audio_registry,
    }))
}

async fn save_audio(State(state): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    // Same normalization the real backend applies: rows without ids vanish.
    let normalize = |items: Option<&Value>| -> Vec<Value> {
        items
            .and_then(|v| v.as_array())
            .map(|rows| {
                rows.iter()
                    .filter(|r| {
                        r.get("id")
                            .and_then(|i| i.as_str())
                            .map(|i| !i.is_empty())
                            .unwrap_or(false)
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    };
    let registry = json!({
        "dmName": body.get("dmName").and_then(|v| v.as_str()).unwrap_or("DM"),
        "dmVoice": body.get("dmVoice").and_then(|v| v.as_str()).unwrap_or(""),
        "archetypes": normalize(body.get("archetypes")),
        "soundscapes": normalize(body.get("soundscapes")),
    });
    let mut s = state.lock().unwrap();
    s.audio_registry = registry.clone();
    Json(json!({ "ok": true, "saved": true, "audio_registry": registry }))
}

async fn list_voices() -> Json<Value> {
    Json(json!([
        { "id": "v1", "name": "Gravel Baritone" },
        { "id": "v2", "name": "Silver Tongue" },
    ]))
}

async fn list_tracks() -> Json<Value> {
    Json(json!([{ "id": "t1", "name": "Tavern Ambience" }]))
}

async fn auth_status(State(state): State<Shared>) -> impl IntoResponse {
    let s = state.lock().unwrap();
    if !s.auth_deployed {
        return (StatusCode::NOT_FOUND, Json(json!({"detail": "not found"}))).into_response();
    }
    Json(json!({ "locked": s.locked, "has_pin": s.admin_pin.is_some() })).into_response()
}

async fn auth_lock(State(state): State<Shared>) -> Json<Value> {
    let mut s = state.lock().unwrap();
    if s.admin_pin.is_some() {
        s.locked = true;
    }
    Json(json!({ "ok": true, "locked": s.locked, "has_pin": s.admin_pin.is_some() }))
}

async fn auth_unlock(State(state): State<Shared>, Json(body): Json<Value>) -> impl IntoResponse {
    let mut s = state.lock().unwrap();
    let Some(pin) = s.admin_pin.clone() else {
        s.locked = false;
        return Json(json!({ "ok": true, "locked": false, "has_pin": false })).into_response();
    };
    let given = body.get("pin").and_then(|v| v.as_str()).unwrap_or("");
    if given == pin {
        s.locked = false;
        Json(json!({ "ok": true, "locked": false, "has_pin": true })).into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "Invalid PIN" })),
        )
            .into_response()
    }
}

async fn env_all(State(state): State<Shared>) -> Json<Value> {
    let s = state.lock().unwrap();
    let vars: Vec<Value> = s
        .env
        .iter()
        .map(|(k, v)| json!({ "key": k, "value": v }))
        .collect();
    Json(Value::Array(vars))
}

async fn env_set(State(state): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    let key = body
        .get("key")
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string();
    let value = body
        .get("value")
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string();
    let mut s = state.lock().unwrap();
    if value.is_empty() {
        s.env.remove(&key);
        Json(json!({ "ok": true, "key": key, "deleted": true }))
    } else {
        s.env.insert(key.clone(), value.clone());
        Json(json!({ "ok": true, "key": key, "value": value }))
    }
}

async fn campaigns_list(State(state): State<Shared>) -> Json<Value> {
    Json(Value::Array(state.lock().unwrap().campaigns.clone()))
}

async fn campaigns_activate(State(state): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    let id = body
        .get("campaign_id")
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string();
    state.lock().unwrap().active_campaign = id.clone();
    Json(json!({ "ok": true, "active_campaign": id }))
}

async fn campaigns_delete(
    State(state): State<Shared>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let mut s = state.lock().unwrap();
    let before = s.campaigns.len();
    s.campaigns
        .retain(|c| c.get("id").and_then(|v| v.as_str()) != Some(id.as_str()));
    if s.campaigns.len() == before {
        return (StatusCode::NOT_FOUND, Json(json!({"detail": "not found"}))).into_response();
    }
    Json(json!({ "ok": true })).into_response()
}

async fn control_logs(Path(service): Path<String>) -> String {
    format!("[{}] service started\n[{}] listening\n", service, service)
}

async fn control_restart(State(state): State<Shared>, Path(service): Path<String>) -> Json<Value> {
    state.lock().unwrap().restarts.push(service);
    Json(json!({ "ok": true }))
}

async fn discord_members() -> Json<Value> {
    Json(json!([
        { "name": "T03KNEE", "status": "online", "role": "DM" },
        { "name": "Valerius", "status": "idle", "role": "Player" },
    ]))
}

async fn characters_list(State(state): State<Shared>) -> Json<Value> {
    Json(Value::Array(state.lock().unwrap().characters.clone()))
}

async fn character_get(State(state): State<Shared>, Path(id): Path<String>) -> impl IntoResponse {
    let s = state.lock().unwrap();
    match s
        .characters
        .iter()
        .find(|c| c.get("id").and_then(|v| v.as_str()) == Some(id.as_str()))
    {
        Some(c) => Json(c.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({"detail": "not found"}))).into_response(),
    }
}

async fn character_save(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let mut s = state.lock().unwrap();
    if let Some(slot) = s
        .characters
        .iter_mut()
        .find(|c| c.get("id").and_then(|v| v.as_str()) == Some(id.as_str()))
    {
        *slot = body;
    }
    Json(json!({ "ok": true }))
}

#[derive(serde::Deserialize)]
struct ForceQuery {
    #[serde(default)]
    force: bool,
}

async fn asset_delete(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Query(q): Query<ForceQuery>,
) -> impl IntoResponse {
    let mut s = state.lock().unwrap();
    if !q.force
        && let Some(refs) = s.asset_refs.get(&id)
        && !refs.is_empty()
    {
        return (
            StatusCode::CONFLICT,
            Json(json!({ "detail": format!("asset referenced by {}", refs.join(", ")) })),
        )
            .into_response();
    }
    s.deleted_assets.push(id);
    Json(json!({ "ok": true })).into_response()
}
