//! Window-scoped accessors backed by the remote window-info interface.

use log::warn;
use tokio::runtime::Handle;
use winbus_proto::ports::window::{
    Actions, Direction, ExtendedStrut, MappingState, Rect, WindowBusError, WindowId,
    WindowInfoPort, WindowInfoProperties, WindowInfoProperties2, WindowStates, WindowType,
    WindowTypeMask,
};

use super::dbus::{BusAddress, WindowInfoProxy, window_info_proxy};

const TARGET: &str = "winbus::window_info";

/// [`WindowInfoPort`] implementation delegating every accessor to the
/// remote window service.
///
/// One instance represents one window handle together with the advisory
/// property sets named at construction. Accessors never fail: a transport
/// or decode problem is logged and the return type's default value is
/// handed back.
pub struct WindowInfoClient {
    proxy: WindowInfoProxy<'static>,
    window: WindowId,
    properties: WindowInfoProperties,
    properties2: WindowInfoProperties2,
}

impl WindowInfoClient {
    /// Build an adapter for `window` against the well-known endpoint.
    pub async fn new(
        conn: &zbus::Connection,
        window: WindowId,
        properties: WindowInfoProperties,
        properties2: WindowInfoProperties2,
    ) -> Result<Self, WindowBusError> {
        Self::with_address(conn, &BusAddress::default(), window, properties, properties2).await
    }

    /// Build an adapter for `window` against a custom endpoint.
    pub async fn with_address(
        conn: &zbus::Connection,
        address: &BusAddress,
        window: WindowId,
        properties: WindowInfoProperties,
        properties2: WindowInfoProperties2,
    ) -> Result<Self, WindowBusError> {
        let proxy = window_info_proxy(conn, address)
            .await
            .map_err(|err| WindowBusError::backend("create_window_info", err))?;

        Ok(Self {
            proxy,
            window,
            properties,
            properties2,
        })
    }

    /// Handle this adapter was created for.
    pub fn window(&self) -> WindowId {
        self.window
    }

    fn expect_properties(&self, operation: &'static str, required: WindowInfoProperties) {
        if !self.properties.contains(required) {
            warn!(
                target: TARGET,
                "accessor used without requesting its property flags (operation={operation}, missing={:?})",
                required.difference(self.properties)
            );
        }
    }

    fn expect_properties2(&self, operation: &'static str, required: WindowInfoProperties2) {
        if !self.properties2.contains(required) {
            warn!(
                target: TARGET,
                "accessor used without requesting its property flags (operation={operation}, missing={:?})",
                required.difference(self.properties2)
            );
        }
    }

    fn reply_or_default<T: Default>(operation: &'static str, reply: zbus::Result<T>) -> T {
        match reply {
            Ok(value) => value,
            Err(err) => {
                warn!(
                    target: TARGET,
                    "window info call failed (operation={operation}, error={err})"
                );
                T::default()
            }
        }
    }

    fn latin1_or_default(operation: &'static str, reply: zbus::Result<String>) -> Vec<u8> {
        latin1_bytes(&Self::reply_or_default(operation, reply))
    }
}

/// Transcode to one byte per character; characters outside Latin-1 become
/// `?`.
fn latin1_bytes(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}

impl WindowInfoPort for WindowInfoClient {
    async fn valid(&self, withdrawn_is_valid: bool) -> bool {
        Self::reply_or_default(
            "valid",
            self.proxy.valid(self.window, withdrawn_is_valid).await,
        )
    }

    async fn state(&self) -> WindowStates {
        self.expect_properties("state", WindowInfoProperties::STATE);
        WindowStates::from_bits_truncate(Self::reply_or_default(
            "state",
            self.proxy.state(self.window).await,
        ))
    }

    async fn is_minimized(&self) -> bool {
        self.expect_properties(
            "isMinimized",
            WindowInfoProperties::STATE | WindowInfoProperties::MAPPING_STATE,
        );
        Self::reply_or_default("isMinimized", self.proxy.is_minimized(self.window).await)
    }

    async fn mapping_state(&self) -> MappingState {
        self.expect_properties("mappingState", WindowInfoProperties::MAPPING_STATE);
        MappingState::from_raw(Self::reply_or_default(
            "mappingState",
            self.proxy.mapping_state(self.window).await,
        ))
    }

    async fn extended_strut(&self) -> ExtendedStrut {
        self.expect_properties2("extendedStrut", WindowInfoProperties2::EXTENDED_STRUT);
        ExtendedStrut::from_reply(&Self::reply_or_default(
            "extendedStrut",
            self.proxy.extended_strut(self.window).await,
        ))
    }

    async fn window_type(&self, supported: WindowTypeMask) -> WindowType {
        self.expect_properties("windowType", WindowInfoProperties::WINDOW_TYPE);
        WindowType::from_raw(Self::reply_or_default(
            "windowType",
            self.proxy.window_type(self.window, supported.bits()).await,
        ))
    }

    async fn name(&self) -> String {
        self.expect_properties("name", WindowInfoProperties::NAME);
        Self::reply_or_default("name", self.proxy.name(self.window).await)
    }

    async fn visible_name(&self) -> String {
        self.expect_properties("visibleName", WindowInfoProperties::VISIBLE_NAME);
        Self::reply_or_default("visibleName", self.proxy.visible_name(self.window).await)
    }

    async fn visible_name_with_state(&self) -> String {
        self.expect_properties(
            "visibleNameWithState",
            WindowInfoProperties::VISIBLE_NAME
                | WindowInfoProperties::STATE
                | WindowInfoProperties::MAPPING_STATE,
        );
        Self::reply_or_default(
            "visibleNameWithState",
            self.proxy.visible_name_with_state(self.window).await,
        )
    }

    async fn icon_name(&self) -> String {
        self.expect_properties("iconName", WindowInfoProperties::ICON_NAME);
        Self::reply_or_default("iconName", self.proxy.icon_name(self.window).await)
    }

    async fn visible_icon_name(&self) -> String {
        self.expect_properties("visibleIconName", WindowInfoProperties::VISIBLE_ICON_NAME);
        Self::reply_or_default(
            "visibleIconName",
            self.proxy.visible_icon_name(self.window).await,
        )
    }

    async fn visible_icon_name_with_state(&self) -> String {
        self.expect_properties(
            "visibleIconNameWithState",
            WindowInfoProperties::VISIBLE_ICON_NAME
                | WindowInfoProperties::STATE
                | WindowInfoProperties::MAPPING_STATE,
        );
        Self::reply_or_default(
            "visibleIconNameWithState",
            self.proxy.visible_icon_name_with_state(self.window).await,
        )
    }

    async fn on_all_desktops(&self) -> bool {
        self.expect_properties("onAllDesktops", WindowInfoProperties::DESKTOP);
        Self::reply_or_default(
            "onAllDesktops",
            self.proxy.on_all_desktops(self.window).await,
        )
    }

    async fn is_on_desktop(&self, desktop: i32) -> bool {
        self.expect_properties("isOnDesktop", WindowInfoProperties::DESKTOP);
        Self::reply_or_default(
            "isOnDesktop",
            self.proxy.is_on_desktop(self.window, desktop).await,
        )
    }

    async fn desktop(&self) -> i32 {
        self.expect_properties("desktop", WindowInfoProperties::DESKTOP);
        Self::reply_or_default("desktop", self.proxy.desktop(self.window).await)
    }

    async fn activities(&self) -> Vec<String> {
        // No activity concept under this protocol; deliberately no call.
        Vec::new()
    }

    async fn geometry(&self) -> Rect {
        self.expect_properties2("geometry", WindowInfoProperties2::GEOMETRY);
        Rect::from_reply(&Self::reply_or_default(
            "geometry",
            self.proxy.geometry(self.window).await,
        ))
    }

    async fn frame_geometry(&self) -> Rect {
        self.expect_properties2("frameGeometry", WindowInfoProperties2::FRAME_EXTENTS);
        Rect::from_reply(&Self::reply_or_default(
            "frameGeometry",
            self.proxy.frame_geometry(self.window).await,
        ))
    }

    async fn transient_for(&self) -> WindowId {
        self.expect_properties2("transientFor", WindowInfoProperties2::TRANSIENT_FOR);
        Self::reply_or_default("transientFor", self.proxy.transient_for(self.window).await)
    }

    async fn group_leader(&self) -> WindowId {
        self.expect_properties2("groupLeader", WindowInfoProperties2::GROUP_LEADER);
        Self::reply_or_default("groupLeader", self.proxy.group_leader(self.window).await)
    }

    async fn win(&self) -> WindowId {
        Self::reply_or_default("win", self.proxy.win(self.window).await)
    }

    async fn window_class_class(&self) -> Vec<u8> {
        self.expect_properties2("windowClassClass", WindowInfoProperties2::WINDOW_CLASS);
        Self::latin1_or_default(
            "windowClassClass",
            self.proxy.window_class_class(self.window).await,
        )
    }

    async fn window_class_name(&self) -> Vec<u8> {
        self.expect_properties2("windowClassName", WindowInfoProperties2::WINDOW_CLASS);
        Self::latin1_or_default(
            "windowClassName",
            self.proxy.window_class_name(self.window).await,
        )
    }

    async fn window_role(&self) -> Vec<u8> {
        self.expect_properties2("windowRole", WindowInfoProperties2::WINDOW_ROLE);
        Self::latin1_or_default("windowRole", self.proxy.window_role(self.window).await)
    }

    async fn client_machine(&self) -> Vec<u8> {
        self.expect_properties2("clientMachine", WindowInfoProperties2::CLIENT_MACHINE);
        Self::latin1_or_default("clientMachine", self.proxy.client_machine(self.window).await)
    }

    async fn gtk_application_id(&self) -> Vec<u8> {
        self.expect_properties2(
            "gtkApplicationId",
            WindowInfoProperties2::GTK_APPLICATION_ID,
        );
        Self::latin1_or_default(
            "gtkApplicationId",
            self.proxy.gtk_application_id(self.window).await,
        )
    }

    async fn action_supported(&self, action: Actions) -> bool {
        self.expect_properties2("actionSupported", WindowInfoProperties2::ALLOWED_ACTIONS);
        Self::reply_or_default(
            "actionSupported",
            self.proxy
                .action_supported(self.window, action.bits())
                .await,
        )
    }

    async fn pid(&self) -> i32 {
        self.expect_properties("pid", WindowInfoProperties::PID);
        Self::reply_or_default("pid", self.proxy.pid(self.window).await)
    }

    async fn request_move_resize(&self, direction: Direction) {
        self.expect_properties("requestMoveResize", WindowInfoProperties::MOVE_RESIZE);
        Self::reply_or_default(
            "requestMoveResize",
            self.proxy
                .request_move_resize(self.window, direction.raw())
                .await,
        )
    }

    async fn set_geometry(&self, rect: Rect) {
        self.expect_properties2("setGeometry", WindowInfoProperties2::MOVE_RESIZE_WINDOW);
        Self::reply_or_default(
            "setGeometry",
            self.proxy
                .set_geometry(self.window, rect.x, rect.y, rect.width, rect.height)
                .await,
        )
    }
}

impl Drop for WindowInfoClient {
    fn drop(&mut self) {
        if !self.properties.contains(WindowInfoProperties::CLOSE_WINDOW) {
            return;
        }

        let proxy = self.proxy.clone();
        let window = self.window;
        match Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    if let Err(err) = proxy.close(window).await {
                        warn!(
                            target: TARGET,
                            "window close request failed (operation=close, error={err})"
                        );
                    }
                });
            }
            Err(_) => warn!(
                target: TARGET,
                "no async runtime to deliver the close request (operation=close)"
            ),
        }
    }
}
