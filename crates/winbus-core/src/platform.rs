//! Platform factory wiring the adapters and the event bridge together.

use winbus_proto::ports::window::{
    WindowBusError, WindowId, WindowInfoProperties, WindowInfoProperties2, WindowPlatform,
};

use crate::{
    adapters::{dbus::BusAddress, window_info::WindowInfoClient, window_system::WindowSystemClient},
    event_bridge::WindowEventBridge,
};

/// [`WindowPlatform`] implementation backed by the session bus.
///
/// [`connect`] joins the session bus (one process-wide connection,
/// initialized on first use) and brings up the event bridge. Construction
/// is the only fallible surface; the adapters it hands out are infallible
/// per the port contract.
///
/// [`connect`]: DbusWindowPlatform::connect
pub struct DbusWindowPlatform {
    conn: zbus::Connection,
    address: BusAddress,
    bridge: WindowEventBridge,
}

impl DbusWindowPlatform {
    /// Join the session bus and subscribe to the window service's signals.
    pub async fn connect() -> Result<Self, WindowBusError> {
        let conn = zbus::Connection::session()
            .await
            .map_err(|err| WindowBusError::backend("connect", err))?;
        Self::with_connection(conn).await
    }

    /// Use an existing connection against the well-known endpoint.
    pub async fn with_connection(conn: zbus::Connection) -> Result<Self, WindowBusError> {
        Self::with_address(conn, BusAddress::default()).await
    }

    /// Use an existing connection against a custom endpoint.
    pub async fn with_address(
        conn: zbus::Connection,
        address: BusAddress,
    ) -> Result<Self, WindowBusError> {
        let bridge = WindowEventBridge::with_address(&conn, &address).await?;

        Ok(Self {
            conn,
            address,
            bridge,
        })
    }

    /// Connection the platform was built on.
    pub fn connection(&self) -> &zbus::Connection {
        &self.conn
    }

    /// Bridge carrying the window service's notifications.
    pub fn event_bridge(&self) -> &WindowEventBridge {
        &self.bridge
    }

    /// Tear down the event bridge; adapters already handed out keep
    /// working.
    pub fn disconnect(&mut self) {
        self.bridge.close();
    }
}

impl WindowPlatform for DbusWindowPlatform {
    type WindowSystem = WindowSystemClient;
    type WindowInfo = WindowInfoClient;

    async fn create_window_system(&self) -> Result<WindowSystemClient, WindowBusError> {
        WindowSystemClient::with_address(&self.conn, &self.address).await
    }

    async fn create_window_info(
        &self,
        window: WindowId,
        properties: WindowInfoProperties,
        properties2: WindowInfoProperties2,
    ) -> Result<WindowInfoClient, WindowBusError> {
        WindowInfoClient::with_address(&self.conn, &self.address, window, properties, properties2)
            .await
    }
}
