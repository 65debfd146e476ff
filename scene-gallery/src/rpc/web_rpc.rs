use crate::engine::core::app_state::GalleryPage;
use crate::engine::core::browser_events::BrowserQueue;
use crate::engine::core::navigation::{NavigationEvent, NavigationSource};
use crate::engine::systems::fps_tracking::smoothed_fps;
use crate::pages::solar_system::selection::{PlanetId, PlanetSelectionRequest};
use bevy::diagnostic::DiagnosticsStore;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[cfg(target_arch = "wasm32")]
use crate::engine::core::browser_events::listen_on_window;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{JsCast, JsValue};
#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// Call from the host page. Requests without an `id` are fire-and-forget.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// Gallery event pushed to the host page: `route_changed`,
/// `planet_selected` or `fps_update`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC 2.0 error object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Outgoing queue, flushed to the parent window at the end of each update.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }

    #[cfg(test)]
    pub fn pending_notifications(&self) -> &[RpcNotification] {
        &self.outgoing_notifications
    }
}

/// Lets a host page drive the gallery when it runs inside an iframe.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .init_resource::<BrowserQueue<String>>()
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

/// Queue string messages that look like JSON-RPC for the next update.
#[cfg(target_arch = "wasm32")]
fn setup_message_listener(queue: Res<BrowserQueue<String>>) {
    let queue = queue.clone();
    listen_on_window("message", move |event| {
        let Some(data) = event
            .dyn_ref::<MessageEvent>()
            .and_then(|message| message.data().as_string())
        else {
            return;
        };
        if data.contains("jsonrpc") {
            queue.push(data);
        }
    });
}

#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

fn process_incoming_messages(
    queue: Res<BrowserQueue<String>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    message_events.write_batch(
        queue
            .drain()
            .into_iter()
            .map(|content| IncomingRpcMessage { content }),
    );
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    diagnostics: Res<DiagnosticsStore>,
    current_page: Res<State<GalleryPage>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut navigation_events: EventWriter<NavigationEvent>,
    mut planet_events: EventWriter<PlanetSelectionRequest>,
) {
    for event in events.read() {
        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                debug!("Processing RPC method: {}", request.method);

                if let Some(response) = handle_rpc_request(
                    &request,
                    &diagnostics,
                    *current_page.get(),
                    &mut navigation_events,
                    &mut planet_events,
                ) {
                    rpc_interface.queue_response(response);
                }
            }
            Err(parse_error) => {
                warn!("Failed to parse RPC message: {}", parse_error);
                rpc_interface.send_notification(
                    "debug_message",
                    serde_json::json!({
                        "message": format!("Parse error: {}", parse_error)
                    }),
                );
            }
        }
    }
}

/// Run one call. Returns the response, or `None` when the call has no id.
fn handle_rpc_request(
    request: &RpcRequest,
    diagnostics: &DiagnosticsStore,
    current_page: GalleryPage,
    navigation_events: &mut EventWriter<NavigationEvent>,
    planet_events: &mut EventWriter<PlanetSelectionRequest>,
) -> Option<RpcResponse> {
    // Notifications carry no ID and get no response, but still take effect.
    let id = request.id.clone();

    let result = match request.method.as_str() {
        "navigate" => handle_navigate(&request.params, navigation_events),
        "get_route" => Ok(route_json(current_page)),
        "list_routes" => Ok(handle_list_routes()),
        "select_planet" => handle_select_planet(&request.params, current_page, planet_events),
        "get_fps" => Ok(serde_json::json!({ "fps": smoothed_fps(diagnostics) })),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            Err(RpcError::method_not_found(&request.method))
        }
    };

    let id = id?;
    match result {
        Ok(result_value) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        }),
        Err(error) => Some(create_error_response(id, error)),
    }
}

fn route_json(page: GalleryPage) -> serde_json::Value {
    serde_json::json!({
        "route": page.route(),
        "title": page.title(),
    })
}

fn handle_navigate(
    params: &serde_json::Value,
    navigation_events: &mut EventWriter<NavigationEvent>,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct NavigateParams {
        route: String,
    }

    let nav_params = serde_json::from_value::<NavigateParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'route' parameter"))?;

    let page = GalleryPage::from_route(&nav_params.route)
        .map_err(|e| RpcError::invalid_params(&e.to_string()))?;

    navigation_events.write(NavigationEvent {
        page,
        source: NavigationSource::Rpc,
    });

    info!("Navigation event dispatched: {}", page.route());

    Ok(serde_json::json!({
        "success": true,
        "route": page.route()
    }))
}

fn handle_list_routes() -> serde_json::Value {
    serde_json::Value::Array(GalleryPage::ALL.iter().map(|p| route_json(*p)).collect())
}

/// Select a planet by name, or clear the selection with a null/missing name.
fn handle_select_planet(
    params: &serde_json::Value,
    current_page: GalleryPage,
    planet_events: &mut EventWriter<PlanetSelectionRequest>,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize, Default)]
    struct SelectPlanetParams {
        #[serde(default)]
        name: Option<String>,
    }

    if current_page != GalleryPage::SolarSystem {
        return Err(RpcError::internal_error("Solar system page is not active"));
    }

    let select_params = if params.is_null() {
        SelectPlanetParams::default()
    } else {
        serde_json::from_value::<SelectPlanetParams>(params.clone())
            .map_err(|_| RpcError::invalid_params("Expected 'name' parameter"))?
    };

    let planet = match select_params.name.as_deref() {
        Some(name) => Some(
            PlanetId::from_name(name)
                .ok_or_else(|| RpcError::invalid_params(&format!("Unknown planet: {}", name)))?,
        ),
        None => None,
    };

    planet_events.write(PlanetSelectionRequest { planet });

    Ok(serde_json::json!({
        "success": true,
        "planet": planet.map(|p| p.name())
    }))
}

fn create_error_response(id: serde_json::Value, error: RpcError) -> RpcResponse {
    RpcResponse {
        jsonrpc: "2.0".to_string(),
        result: None,
        error: Some(error),
        id: Some(id),
    }
}

fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    // Notifications go out before responses.
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

#[cfg(target_arch = "wasm32")]
fn send_message_to_parent<T: Serialize>(message: &T) {
    let json = match serde_json::to_string(message) {
        Ok(json) => json,
        Err(e) => {
            error!("Failed to serialize RPC message: {}", e);
            return;
        }
    };
    let Some(parent) = window().and_then(|w| w.parent().ok().flatten()) else {
        debug!("Not embedded in a host page, dropping RPC message");
        return;
    };
    if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
        error!("Failed to send message to parent: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn send_message_to_parent<T: Serialize>(_message: &T) {}

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

    pub fn internal_error(message: &str) -> Self {
        Self {
            code: -32603,
            message: message.to_string(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;

    fn app_with_page(page: GalleryPage) -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .insert_state(page)
            .init_resource::<DiagnosticsStore>()
            .init_resource::<WebRpcInterface>()
            .init_resource::<BrowserQueue<String>>()
            .add_event::<IncomingRpcMessage>()
            .add_event::<NavigationEvent>()
            .add_event::<PlanetSelectionRequest>()
            .add_systems(
                Update,
                (process_incoming_messages, handle_rpc_messages).chain(),
            );
        app
    }

    fn call(app: &mut App, message: &str) -> Option<RpcResponse> {
        app.world().resource::<BrowserQueue<String>>().push(message.to_string());
        app.update();
        let mut rpc = app.world_mut().resource_mut::<WebRpcInterface>();
        rpc.outgoing_responses.pop()
    }

    fn read_events<E: Event + Clone>(app: &mut App) -> Vec<E> {
        let events = app.world().resource::<Events<E>>();
        events.get_cursor().read(events).cloned().collect()
    }

    #[test]
    fn navigate_dispatches_event() {
        let mut app = app_with_page(GalleryPage::Setup);
        let response = call(
            &mut app,
            r#"{"jsonrpc":"2.0","method":"navigate","params":{"route":"/shadow"},"id":1}"#,
        )
        .unwrap();

        assert!(response.error.is_none());
        assert_eq!(response.result.unwrap()["route"], "/shadow");
        let sent = read_events::<NavigationEvent>(&mut app);
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].page, GalleryPage::Shadow);
        assert_eq!(sent[0].source, NavigationSource::Rpc);
    }

    #[test]
    fn navigate_rejects_unknown_route() {
        let mut app = app_with_page(GalleryPage::Setup);
        let response = call(
            &mut app,
            r#"{"jsonrpc":"2.0","method":"navigate","params":{"route":"/mars"},"id":2}"#,
        )
        .unwrap();

        assert_eq!(response.error.unwrap().code, -32602);
        assert!(read_events::<NavigationEvent>(&mut app).is_empty());
    }

    #[test]
    fn unknown_method_is_reported() {
        let mut app = app_with_page(GalleryPage::Setup);
        let response = call(&mut app, r#"{"jsonrpc":"2.0","method":"warp","id":"x"}"#).unwrap();

        let error = response.error.unwrap();
        assert_eq!(error.code, -32601);
        assert_eq!(error.data.unwrap()["method"], "warp");
    }

    #[test]
    fn list_and_get_route() {
        let mut app = app_with_page(GalleryPage::Lights);

        let routes = call(&mut app, r#"{"jsonrpc":"2.0","method":"list_routes","id":3}"#)
            .unwrap()
            .result
            .unwrap();
        assert_eq!(routes.as_array().unwrap().len(), GalleryPage::ALL.len());
        assert_eq!(routes[12]["route"], "/solar-system");

        let current = call(&mut app, r#"{"jsonrpc":"2.0","method":"get_route","id":4}"#)
            .unwrap()
            .result
            .unwrap();
        assert_eq!(current["route"], "/lights");
    }

    #[test]
    fn select_planet_requires_solar_system_page() {
        let mut app = app_with_page(GalleryPage::Setup);
        let response = call(
            &mut app,
            r#"{"jsonrpc":"2.0","method":"select_planet","params":{"name":"earth"},"id":5}"#,
        )
        .unwrap();
        assert_eq!(response.error.unwrap().code, -32603);
    }

    #[test]
    fn select_planet_by_name_and_clear() {
        let mut app = app_with_page(GalleryPage::SolarSystem);

        let response = call(
            &mut app,
            r#"{"jsonrpc":"2.0","method":"select_planet","params":{"name":"Saturn"},"id":6}"#,
        )
        .unwrap();
        assert_eq!(response.result.unwrap()["planet"], "saturn");

        call(
            &mut app,
            r#"{"jsonrpc":"2.0","method":"select_planet","params":{"name":null},"id":7}"#,
        );

        let requests = read_events::<PlanetSelectionRequest>(&mut app);
        let planets: Vec<_> = requests.iter().map(|r| r.planet).collect();
        assert_eq!(planets, vec![PlanetId::from_name("saturn"), None]);
    }

    #[test]
    fn notifications_take_effect_without_response() {
        let mut app = app_with_page(GalleryPage::Setup);
        let response = call(
            &mut app,
            r#"{"jsonrpc":"2.0","method":"navigate","params":{"route":"camera"}}"#,
        );

        assert!(response.is_none());
        assert_eq!(read_events::<NavigationEvent>(&mut app).len(), 1);
    }
}
