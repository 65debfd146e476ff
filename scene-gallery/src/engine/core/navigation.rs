use bevy::prelude::*;

use crate::engine::core::app_state::{GalleryPage, RouteError};
use crate::engine::core::browser_events::BrowserQueue;
use crate::rpc::web_rpc::WebRpcInterface;

/// Request to show a different page.
#[derive(Event, Debug, Clone, Copy)]
pub struct NavigationEvent {
    pub page: GalleryPage,
    pub source: NavigationSource,
}

/// Where a navigation request came from, for logging and history handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationSource {
    Sidebar,
    Keyboard,
    Rpc,
    Config,
    BrowserLocation,
}

/// Apply navigation requests. Only the last request of a frame wins.
pub fn handle_navigation_events(
    mut events: EventReader<NavigationEvent>,
    current: Res<State<GalleryPage>>,
    mut next_state: ResMut<NextState<GalleryPage>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    let Some(event) = events.read().last().copied() else {
        return;
    };

    if event.page == *current.get() {
        return;
    }

    info!(
        "Navigating {} -> {} via {:?}",
        current.get().route(),
        event.page.route(),
        event.source
    );
    next_state.set(event.page);

    if event.source != NavigationSource::BrowserLocation {
        push_browser_history(event.page);
    }

    rpc_interface.send_notification(
        "route_changed",
        serde_json::json!({
            "route": event.page.route(),
            "title": event.page.title(),
        }),
    );
}

/// Cycle pages with PageUp/PageDown (native builds only).
#[cfg(not(target_arch = "wasm32"))]
pub fn handle_navigation_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    current: Res<State<GalleryPage>>,
    mut navigation: EventWriter<NavigationEvent>,
) {
    let page = if keyboard.just_pressed(KeyCode::PageDown) {
        current.get().next()
    } else if keyboard.just_pressed(KeyCode::PageUp) {
        current.get().previous()
    } else {
        return;
    };

    navigation.write(NavigationEvent {
        page,
        source: NavigationSource::Keyboard,
    });
}

/// Placeholder system for WASM builds where paging is left to the browser.
#[cfg(target_arch = "wasm32")]
pub fn handle_navigation_shortcuts() {}

/// Page request for a browser location path.
pub fn browser_location_request(pathname: &str) -> Result<NavigationEvent, RouteError> {
    GalleryPage::from_route(pathname).map(|page| NavigationEvent {
        page,
        source: NavigationSource::BrowserLocation,
    })
}

/// Path the browser moved to through its Back or Forward buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub struct HistoryPop(pub String);

fn request_browser_location(pathname: &str, navigation: &mut EventWriter<NavigationEvent>) {
    match browser_location_request(pathname) {
        Ok(request) => {
            navigation.write(request);
        }
        Err(e) => warn!("{e}, staying on the current page"),
    }
}

/// Open the page named by the browser location.
#[cfg(target_arch = "wasm32")]
pub fn navigate_from_browser_location(mut navigation: EventWriter<NavigationEvent>) {
    if let Some(pathname) = current_pathname() {
        request_browser_location(&pathname, &mut navigation);
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn navigate_from_browser_location() {}

#[cfg(target_arch = "wasm32")]
fn current_pathname() -> Option<String> {
    web_sys::window().and_then(|w| w.location().pathname().ok())
}

/// Record every `popstate` so Back and Forward switch pages too.
#[cfg(target_arch = "wasm32")]
pub fn listen_for_history_changes(queue: Res<BrowserQueue<HistoryPop>>) {
    let queue = queue.clone();
    crate::engine::core::browser_events::listen_on_window("popstate", move |_| {
        if let Some(pathname) = current_pathname() {
            queue.push(HistoryPop(pathname));
        }
    });
}

/// Turn history moves into navigation requests. Their source keeps them from
/// pushing another history entry.
pub fn follow_browser_history(
    queue: Res<BrowserQueue<HistoryPop>>,
    mut navigation: EventWriter<NavigationEvent>,
) {
    for HistoryPop(pathname) in queue.drain() {
        request_browser_location(&pathname, &mut navigation);
    }
}

fn push_browser_history(page: GalleryPage) {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
            return;
        };
        if let Err(e) = history.push_state_with_url(
            &wasm_bindgen::JsValue::NULL,
            page.title(),
            Some(page.route()),
        ) {
            warn!("Failed to push history entry: {:?}", e);
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = page;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;

    fn app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .init_state::<GalleryPage>()
            .init_resource::<WebRpcInterface>()
            .init_resource::<BrowserQueue<HistoryPop>>()
            .add_event::<NavigationEvent>()
            .add_systems(Update, (follow_browser_history, handle_navigation_events).chain());
        app
    }

    fn current_page(app: &App) -> GalleryPage {
        *app.world().resource::<State<GalleryPage>>().get()
    }

    #[test]
    fn browser_paths_map_to_pages() {
        let request = browser_location_request("/lights").unwrap();
        assert_eq!(request.page, GalleryPage::Lights);
        assert_eq!(request.source, NavigationSource::BrowserLocation);

        assert_eq!(browser_location_request("/").unwrap().page, GalleryPage::Setup);
        assert_eq!(
            browser_location_request("/haunted-house/").unwrap().page,
            GalleryPage::HauntedHouse
        );
        assert!(browser_location_request("/nowhere").is_err());
    }

    #[test]
    fn back_button_returns_to_previous_page() {
        let mut app = app();
        app.world_mut().send_event(NavigationEvent {
            page: GalleryPage::Lights,
            source: NavigationSource::Sidebar,
        });
        app.update();
        app.update();
        assert_eq!(current_page(&app), GalleryPage::Lights);

        app.world()
            .resource::<BrowserQueue<HistoryPop>>()
            .push(HistoryPop("/".to_string()));
        app.update();
        app.update();
        assert_eq!(current_page(&app), GalleryPage::Setup);

        let rpc = app.world().resource::<WebRpcInterface>();
        let routes: Vec<_> = rpc
            .pending_notifications()
            .iter()
            .map(|n| n.params["route"].clone())
            .collect();
        assert_eq!(routes, vec!["/lights", "/"]);
    }

    #[test]
    fn unknown_history_path_keeps_the_page() {
        let mut app = app();
        app.world()
            .resource::<BrowserQueue<HistoryPop>>()
            .push(HistoryPop("/nowhere".to_string()));
        app.update();
        app.update();
        assert_eq!(current_page(&app), GalleryPage::Setup);
    }

    #[test]
    fn navigation_event_switches_page_and_notifies() {
        let mut app = app();
        app.world_mut().send_event(NavigationEvent {
            page: GalleryPage::SolarSystem,
            source: NavigationSource::Sidebar,
        });
        app.update();
        app.update();

        let state = app.world().resource::<State<GalleryPage>>();
        assert_eq!(*state.get(), GalleryPage::SolarSystem);

        let rpc = app.world().resource::<WebRpcInterface>();
        let sent = rpc.pending_notifications();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method, "route_changed");
        assert_eq!(sent[0].params["route"], "/solar-system");
    }

    #[test]
    fn navigating_to_current_page_is_ignored() {
        let mut app = app();
        app.world_mut().send_event(NavigationEvent {
            page: GalleryPage::Setup,
            source: NavigationSource::Keyboard,
        });
        app.update();

        let rpc = app.world().resource::<WebRpcInterface>();
        assert!(rpc.pending_notifications().is_empty());
    }
}
