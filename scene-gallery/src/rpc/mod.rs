//! JSON-RPC 2.0 communication layer for embedding the gallery in a host page.
//!
//! When the WASM build runs inside an iframe, the host page drives it through
//! `postMessage`: requests carry an `id` and get a response, notifications
//! flow one way. Native builds keep the same dispatch but only log outgoing
//! messages.
//!
//! ```text
//! Host (parent window)  <──postMessage──>  Bevy (iframe)
//!        ├─ Request (with id) ─────────────────> │
//!        │ <──────────────── Response (with id) ─┤
//!        │ <──────────── Notification (no id) ───┤
//! ```
//!
//! ## Methods
//!
//! - `navigate`: show the page at `{ "route": "/lights" }`
//! - `get_route`: current route and page title
//! - `list_routes`: every route in sidebar order
//! - `select_planet`: follow `{ "name": "saturn" }`, or release with `null`;
//!   only valid on the solar system page
//! - `get_fps`: current smoothed frame rate
//!
//! ## Notifications
//!
//! - `route_changed`: `{ route, title }` after every page change
//! - `planet_selected`: `{ planet }` when the followed planet changes
//! - `fps_update`: `{ fps }` twice a second
//!
//! Errors use the standard codes: `-32601` for an unknown method and
//! `-32602` for bad parameters.

/// Request dispatch, outgoing message queue and the WASM message listener.
pub mod web_rpc;
