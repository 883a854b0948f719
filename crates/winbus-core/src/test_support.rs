//! Mocked remote endpoint for adapter and bridge tests.
//!
//! Tests talk to a real bus peer: a peer-to-peer connection pair with the
//! mock service registered on the server side. The mocks record every
//! method invocation so tests can assert replies as well as the absence of
//! calls. Methods a mock does not define come back as a bus error, which
//! exercises the adapters' default paths.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use zbus::{interface, object_server::SignalEmitter};

use crate::adapters::dbus::WINDOW_PATH;

/// Shared record of the wire methods a mock has served.
#[derive(Clone, Default)]
pub(crate) struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub(crate) fn record(&self, call: impl Into<String>) {
        self.0.lock().unwrap().push(call.into());
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

/// Mock of the window-system interface. Only the listed methods answer;
/// everything else errors out on the caller's side.
#[derive(Default)]
pub(crate) struct MockWindowSystemService {
    pub(crate) log: CallLog,
    pub(crate) window_list: Vec<u64>,
    pub(crate) active: u64,
    pub(crate) current_desktop: i32,
    pub(crate) desktop_name: String,
    pub(crate) icon_bytes: Vec<u8>,
}

#[interface(name = "org.kde.KWindowSystem")]
impl MockWindowSystemService {
    #[zbus(name = "windows")]
    fn windows(&self) -> Vec<u64> {
        self.log.record("windows");
        self.window_list.clone()
    }

    #[zbus(name = "activeWindow")]
    fn active_window(&self) -> u64 {
        self.log.record("activeWindow");
        self.active
    }

    #[zbus(name = "activateWindow")]
    fn activate_window(&self, window: u64, time: i32) {
        self.log.record(format!("activateWindow({window}, {time})"));
    }

    #[zbus(name = "currentDesktop")]
    fn current_desktop(&self) -> i32 {
        self.log.record("currentDesktop");
        self.current_desktop
    }

    #[zbus(name = "desktopName")]
    fn desktop_name(&self, _desktop: i32) -> String {
        self.log.record("desktopName");
        self.desktop_name.clone()
    }

    #[zbus(name = "icon")]
    fn icon(&self, window: u64, width: i32, height: i32) -> Vec<u8> {
        self.log.record(format!("icon({window}, {width}, {height})"));
        self.icon_bytes.clone()
    }

    #[zbus(name = "setIcons")]
    fn set_icons(&self, _window: u64, icon: Vec<u8>, mini_icon: Vec<u8>) {
        self.log.record(format!(
            "setIcons({}, {})",
            describe_buffer(&icon),
            describe_buffer(&mini_icon)
        ));
    }

    #[zbus(name = "setState")]
    fn set_state(&self, _window: u64, state: u32) {
        self.log.record(format!("setState({state})"));
    }

    #[zbus(name = "setExtendedStrut")]
    #[allow(clippy::too_many_arguments)]
    fn set_extended_strut(
        &self,
        _window: u64,
        left_width: i32,
        left_start: i32,
        left_end: i32,
        _right_width: i32,
        _right_start: i32,
        _right_end: i32,
        _top_width: i32,
        _top_start: i32,
        _top_end: i32,
        _bottom_width: i32,
        _bottom_start: i32,
        _bottom_end: i32,
    ) {
        self.log
            .record(format!("setExtendedStrut({left_width}, {left_start}, {left_end})"));
    }

    #[zbus(signal, name = "activeWindowChanged")]
    pub(crate) async fn active_window_changed(
        emitter: &SignalEmitter<'_>,
        window: u64,
    ) -> zbus::Result<()>;

    #[zbus(signal, name = "currentDesktopChanged")]
    pub(crate) async fn current_desktop_changed(
        emitter: &SignalEmitter<'_>,
        desktop: i32,
    ) -> zbus::Result<()>;

    #[zbus(signal, name = "desktopNamesChanged")]
    pub(crate) async fn desktop_names_changed(emitter: &SignalEmitter<'_>) -> zbus::Result<()>;

    #[zbus(signal, name = "numberOfDesktopsChanged")]
    pub(crate) async fn number_of_desktops_changed(
        emitter: &SignalEmitter<'_>,
        count: i32,
    ) -> zbus::Result<()>;

    #[zbus(signal, name = "showingDesktopChanged")]
    pub(crate) async fn showing_desktop_changed(
        emitter: &SignalEmitter<'_>,
        showing: bool,
    ) -> zbus::Result<()>;

    #[zbus(signal, name = "stackingOrderChanged")]
    pub(crate) async fn stacking_order_changed(emitter: &SignalEmitter<'_>) -> zbus::Result<()>;

    #[zbus(signal, name = "windowAdded")]
    pub(crate) async fn window_added(emitter: &SignalEmitter<'_>, window: u64)
    -> zbus::Result<()>;

    #[zbus(signal, name = "windowChanged")]
    pub(crate) async fn window_changed(
        emitter: &SignalEmitter<'_>,
        window: u64,
        properties: u32,
        properties2: u32,
    ) -> zbus::Result<()>;

    #[zbus(signal, name = "windowRemoved")]
    pub(crate) async fn window_removed(
        emitter: &SignalEmitter<'_>,
        window: u64,
    ) -> zbus::Result<()>;

    #[zbus(signal, name = "workAreaChanged")]
    pub(crate) async fn work_area_changed(emitter: &SignalEmitter<'_>) -> zbus::Result<()>;
}

fn describe_buffer(buffer: &[u8]) -> &'static str {
    if image::load_from_memory(buffer).is_ok() {
        "decodable"
    } else {
        "undecodable"
    }
}

/// Mock of the window-info interface.
#[derive(Default)]
pub(crate) struct MockWindowInfoService {
    pub(crate) log: CallLog,
    pub(crate) window_name: String,
    pub(crate) state: u32,
    pub(crate) mapping_state: i32,
    pub(crate) desktop: i32,
    pub(crate) pid: i32,
    pub(crate) geometry: Vec<i32>,
    pub(crate) frame_geometry: Vec<i32>,
    pub(crate) strut: Vec<i32>,
    pub(crate) window_class: String,
    pub(crate) window_type: i32,
}

#[interface(name = "org.kde.KWindowInfo")]
impl MockWindowInfoService {
    #[zbus(name = "name")]
    fn name(&self, _window: u64) -> String {
        self.log.record("name");
        self.window_name.clone()
    }

    #[zbus(name = "state")]
    fn state(&self, _window: u64) -> u32 {
        self.log.record("state");
        self.state
    }

    #[zbus(name = "mappingState")]
    fn mapping_state(&self, _window: u64) -> i32 {
        self.log.record("mappingState");
        self.mapping_state
    }

    #[zbus(name = "desktop")]
    fn desktop(&self, _window: u64) -> i32 {
        self.log.record("desktop");
        self.desktop
    }

    #[zbus(name = "pid")]
    fn pid(&self, _window: u64) -> i32 {
        self.log.record("pid");
        self.pid
    }

    #[zbus(name = "geometry")]
    fn geometry(&self, _window: u64) -> Vec<i32> {
        self.log.record("geometry");
        self.geometry.clone()
    }

    #[zbus(name = "frameGeometry")]
    fn frame_geometry(&self, _window: u64) -> Vec<i32> {
        self.log.record("frameGeometry");
        self.frame_geometry.clone()
    }

    #[zbus(name = "extendedStrut")]
    fn extended_strut(&self, _window: u64) -> Vec<i32> {
        self.log.record("extendedStrut");
        self.strut.clone()
    }

    #[zbus(name = "windowClassClass")]
    fn window_class_class(&self, _window: u64) -> String {
        self.log.record("windowClassClass");
        self.window_class.clone()
    }

    #[zbus(name = "windowType")]
    fn window_type(&self, _window: u64, supported: u32) -> i32 {
        self.log.record(format!("windowType({supported})"));
        self.window_type
    }

    #[zbus(name = "setGeometry")]
    fn set_geometry(&self, _window: u64, x: i32, y: i32, width: i32, height: i32) {
        self.log
            .record(format!("setGeometry({x}, {y}, {width}, {height})"));
    }

    #[zbus(name = "close")]
    fn close(&self, window: u64) {
        self.log.record(format!("close({window})"));
    }
}

/// Connect a client to a mock service over a private peer-to-peer pair.
///
/// Returns the client connection and the server connection carrying the
/// mock; drop the server end to simulate the service going away.
pub(crate) async fn connection_pair<I>(iface: I) -> (zbus::Connection, zbus::Connection)
where
    I: zbus::object_server::Interface,
{
    let (client_stream, server_stream) =
        tokio::net::UnixStream::pair().expect("socket pair for bus connection");

    let server = zbus::connection::Builder::unix_stream(server_stream)
        .server(zbus::Guid::generate())
        .expect("server guid")
        .p2p()
        .serve_at(WINDOW_PATH, iface)
        .expect("serve mock interface")
        .build();
    let client = zbus::connection::Builder::unix_stream(client_stream)
        .p2p()
        .build();

    let (server, client) = tokio::join!(server, client);
    (
        client.expect("client connection"),
        server.expect("server connection"),
    )
}

/// Emitter for raising the mock service's signals from a test.
pub(crate) fn signal_emitter(conn: &zbus::Connection) -> SignalEmitter<'static> {
    SignalEmitter::new(conn, WINDOW_PATH).expect("signal emitter")
}

/// Poll `condition` until it holds or a two-second deadline passes.
pub(crate) async fn wait_until<F>(condition: F) -> bool
where
    F: Fn() -> bool,
{
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while tokio::time::Instant::now() < deadline {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}
