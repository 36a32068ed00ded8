use std::collections::VecDeque;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::lod::parameters::{LodParam, LodParameters};
use crate::engine::lod::settings::AutoFpsSettings;
use crate::engine::systems::fps_tracking::FpsReadout;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC error object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Notifications kept while nothing drains the queue; the oldest go first.
pub const MAX_PENDING_NOTIFICATIONS: usize = 256;

/// Outgoing queue shared by every system that talks to the frontend.
/// Drained once per frame by the RPC plugin.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: VecDeque<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the frontend without expecting a response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        if self.outgoing_notifications.len() >= MAX_PENDING_NOTIFICATIONS {
            self.outgoing_notifications.pop_front();
        }
        self.outgoing_notifications.push_back(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    pub fn pending_notifications(&self) -> &VecDeque<RpcNotification> {
        &self.outgoing_notifications
    }

    pub fn pending_responses(&self) -> &[RpcResponse] {
        &self.outgoing_responses
    }

    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

/// Plugin establishing the postMessage RPC layer for iframe deployment.
///
/// Expects the LOD resources from `LodGovernorPlugin` to be present.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    send_outgoing_messages,
                )
                    .chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    let Some(window) = window() else {
        error!("Window object not available, RPC listener not installed");
        return;
    };
    if let Err(e) =
        window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
    {
        error!("Failed to register message listener: {:?}", e);
        return;
    }

    // JS owns the closure from here on.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Messages captured by the browser listener, waiting for the next frame.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Raw RPC message from the frontend.
#[derive(Event, Debug, Clone)]
pub struct IncomingRpcMessage {
    pub content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

/// Mutable view of the LOD state an RPC handler may touch.
pub struct LodRpcContext<'a> {
    pub params: &'a mut LodParameters,
    pub settings: &'a mut AutoFpsSettings,
    pub last_fps: Option<f32>,
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    mut params: ResMut<LodParameters>,
    mut settings: ResMut<AutoFpsSettings>,
    readout: Res<FpsReadout>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for event in events.read() {
        let request = match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => request,
            Err(parse_error) => {
                warn!("Dropping malformed RPC message: {}", parse_error);
                continue;
            }
        };
        debug!("Processing RPC method: {}", request.method);

        let mut surface = *params;
        let mut current_settings = *settings;
        let response = handle_rpc_request(
            &request,
            &mut LodRpcContext {
                params: &mut surface,
                settings: &mut current_settings,
                last_fps: readout.last,
            },
        );

        // Only mark the resources changed when a handler actually wrote to them.
        params.set_if_neq(surface);
        settings.set_if_neq(current_settings);

        if let Some(response) = response {
            rpc_interface.queue_response(response);
        }
    }
}

/// Dispatch one request. Notifications (no id) are applied but get no response.
pub fn handle_rpc_request(request: &RpcRequest, ctx: &mut LodRpcContext) -> Option<RpcResponse> {
    let result = match request.method.as_str() {
        "get_fps" => handle_get_fps(ctx),
        "get_lod_params" => handle_get_lod_params(ctx),
        "set_lod_param" => handle_set_lod_param(&request.params, ctx),
        "set_target_fps" => handle_set_target_fps(&request.params, ctx),
        "set_auto_fps" => handle_set_auto_fps(&request.params, ctx),
        "reset_lod_params" => handle_reset_lod_params(ctx),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            Err(RpcError::method_not_found(&request.method))
        }
    };

    let id = request.id.clone()?;
    Some(match result {
        Ok(result_value) => RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        },
        Err(error) => RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        },
    })
}

fn handle_get_fps(ctx: &LodRpcContext) -> Result<serde_json::Value, RpcError> {
    Ok(serde_json::json!({
        "fps": ctx.last_fps.unwrap_or(0.0)
    }))
}

fn handle_get_lod_params(ctx: &LodRpcContext) -> Result<serde_json::Value, RpcError> {
    Ok(serde_json::json!({
        "params": ctx.params.to_json(),
        "targetFps": ctx.settings.target_fps(),
        "autoFpsEnabled": ctx.settings.auto_enabled(),
        "controls": control_descriptions(),
    }))
}

/// Key, label and range of every control, for building the host's sliders.
fn control_descriptions() -> Vec<serde_json::Value> {
    LodParam::ALL
        .into_iter()
        .map(|param| {
            let range = param.range();
            serde_json::json!({
                "key": param.key(),
                "label": param.label(),
                "min": range.min,
                "max": range.max,
                "default": range.default,
            })
        })
        .collect()
}

fn handle_set_lod_param(
    params: &serde_json::Value,
    ctx: &mut LodRpcContext,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct SetLodParamParams {
        key: String,
        value: f32,
    }

    let parsed = serde_json::from_value::<SetLodParamParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'key' and numeric 'value' parameters"))?;

    let param = LodParam::from_key(&parsed.key)
        .ok_or_else(|| RpcError::invalid_params(&format!("Unknown LOD parameter: {}", parsed.key)))?;

    let applied = ctx.params.set_value(param, parsed.value);
    info!("Operator set {} = {}", param.key(), applied);

    Ok(serde_json::json!({
        "key": param.key(),
        "value": applied
    }))
}

fn handle_set_target_fps(
    params: &serde_json::Value,
    ctx: &mut LodRpcContext,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct SetTargetFpsParams {
        fps: f32,
    }

    let parsed = serde_json::from_value::<SetTargetFpsParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected numeric 'fps' parameter"))?;

    let applied = ctx.settings.set_target_fps(parsed.fps);
    info!("Target FPS set to {}", applied);

    Ok(serde_json::json!({
        "targetFps": applied
    }))
}

fn handle_set_auto_fps(
    params: &serde_json::Value,
    ctx: &mut LodRpcContext,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct SetAutoFpsParams {
        enabled: bool,
    }

    let parsed = serde_json::from_value::<SetAutoFpsParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected boolean 'enabled' parameter"))?;

    ctx.settings.set_auto_enabled(parsed.enabled);
    info!(
        "Auto FPS {}",
        if parsed.enabled { "enabled" } else { "disabled" }
    );

    Ok(serde_json::json!({
        "autoFpsEnabled": parsed.enabled
    }))
}

fn handle_reset_lod_params(ctx: &mut LodRpcContext) -> Result<serde_json::Value, RpcError> {
    *ctx.params = LodParameters::default();
    info!("LOD parameters reset to defaults");

    Ok(serde_json::json!({
        "params": ctx.params.to_json()
    }))
}

/// Send queued notifications and responses to the frontend.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Send serialized message to the parent window.
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
    }
}

impl RpcError {
    pub fn method_not_found(method: &str) -> Self {
        Self {
            code: -32601,
            message: "Method not found".to_string(),
            data: Some(serde_json::json!({ "method": method })),
        }
    }

    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }
}
