//! Process-wide window and desktop operations backed by the remote
//! window-system interface.

use image::DynamicImage;
use log::warn;
use winbus_proto::ports::window::{
    ExtendedStrut, Point, Rect, Strut, WindowBusError, WindowId, WindowStates, WindowSystemPort,
    WindowType,
};

use super::{
    dbus::{BusAddress, WindowSystemProxy, window_system_proxy},
    icon,
};

const TARGET: &str = "winbus::window_system";

/// [`WindowSystemPort`] implementation delegating every operation to the
/// remote window service.
///
/// Operations without an equivalent under the compositor protocol return a
/// fixed sentinel and never touch the bus; everything else is one call, one
/// reply, with failures downgraded to a warning plus the default value.
pub struct WindowSystemClient {
    proxy: WindowSystemProxy<'static>,
}

impl WindowSystemClient {
    /// Build an adapter against the well-known endpoint.
    pub async fn new(conn: &zbus::Connection) -> Result<Self, WindowBusError> {
        Self::with_address(conn, &BusAddress::default()).await
    }

    /// Build an adapter against a custom endpoint.
    pub async fn with_address(
        conn: &zbus::Connection,
        address: &BusAddress,
    ) -> Result<Self, WindowBusError> {
        let proxy = window_system_proxy(conn, address)
            .await
            .map_err(|err| WindowBusError::backend("create_window_system", err))?;

        Ok(Self { proxy })
    }

    fn reply_or_default<T: Default>(operation: &'static str, reply: zbus::Result<T>) -> T {
        match reply {
            Ok(value) => value,
            Err(err) => {
                warn!(
                    target: TARGET,
                    "window system call failed (operation={operation}, error={err})"
                );
                T::default()
            }
        }
    }
}

impl WindowSystemPort for WindowSystemClient {
    async fn windows(&self) -> Vec<WindowId> {
        Self::reply_or_default("windows", self.proxy.windows().await)
    }

    async fn stacking_order(&self) -> Vec<WindowId> {
        Self::reply_or_default("stackingOrder", self.proxy.stacking_order().await)
    }

    async fn active_window(&self) -> WindowId {
        Self::reply_or_default("activeWindow", self.proxy.active_window().await)
    }

    async fn activate_window(&self, window: WindowId, time: i32) {
        Self::reply_or_default(
            "activateWindow",
            self.proxy.activate_window(window, time).await,
        )
    }

    async fn force_active_window(&self, window: WindowId, time: i32) {
        Self::reply_or_default(
            "forceActiveWindow",
            self.proxy.force_active_window(window, time).await,
        )
    }

    async fn demand_attention(&self, window: WindowId, set: bool) {
        Self::reply_or_default(
            "demandAttention",
            self.proxy.demand_attention(window, set).await,
        )
    }

    fn compositing_active(&self) -> bool {
        true
    }

    async fn current_desktop(&self) -> i32 {
        Self::reply_or_default("currentDesktop", self.proxy.current_desktop().await)
    }

    async fn number_of_desktops(&self) -> i32 {
        Self::reply_or_default("numberOfDesktops", self.proxy.number_of_desktops().await)
    }

    async fn set_current_desktop(&self, desktop: i32) {
        Self::reply_or_default(
            "setCurrentDesktop",
            self.proxy.set_current_desktop(desktop).await,
        )
    }

    async fn set_on_all_desktops(&self, window: WindowId, on_all: bool) {
        Self::reply_or_default(
            "setOnAllDesktops",
            self.proxy.set_on_all_desktops(window, on_all).await,
        )
    }

    async fn set_on_desktop(&self, window: WindowId, desktop: i32) {
        Self::reply_or_default(
            "setOnDesktop",
            self.proxy.set_on_desktop(window, desktop).await,
        )
    }

    fn set_on_activities(&self, _window: WindowId, _activities: &[String]) {
        // No activity concept under this protocol; accepted and discarded.
    }

    async fn icon(
        &self,
        window: WindowId,
        width: i32,
        height: i32,
        scale: bool,
    ) -> DynamicImage {
        let bytes = Self::reply_or_default("icon", self.proxy.icon(window, width, height).await);
        icon::decode_icon(&bytes, width, height, scale)
    }

    async fn set_icons(&self, window: WindowId, icon: &DynamicImage, mini_icon: &DynamicImage) {
        let icon_bytes = icon::encode_png(icon, "setIcons");
        let mini_icon_bytes = icon::encode_png(mini_icon, "setIcons");
        Self::reply_or_default(
            "setIcons",
            self.proxy
                .set_icons(window, &icon_bytes, &mini_icon_bytes)
                .await,
        )
    }

    async fn set_type(&self, window: WindowId, window_type: WindowType) {
        Self::reply_or_default(
            "setType",
            self.proxy.set_type(window, window_type.raw()).await,
        )
    }

    async fn set_state(&self, window: WindowId, state: WindowStates) {
        Self::reply_or_default("setState", self.proxy.set_state(window, state.bits()).await)
    }

    async fn clear_state(&self, window: WindowId, state: WindowStates) {
        Self::reply_or_default(
            "clearState",
            self.proxy.clear_state(window, state.bits()).await,
        )
    }

    async fn minimize_window(&self, window: WindowId) {
        Self::reply_or_default("minimizeWindow", self.proxy.minimize_window(window).await)
    }

    async fn unminimize_window(&self, window: WindowId) {
        Self::reply_or_default(
            "unminimizeWindow",
            self.proxy.unminimize_window(window).await,
        )
    }

    async fn raise_window(&self, window: WindowId) {
        Self::reply_or_default("raiseWindow", self.proxy.raise_window(window).await)
    }

    async fn lower_window(&self, window: WindowId) {
        Self::reply_or_default("lowerWindow", self.proxy.lower_window(window).await)
    }

    fn icccm_compliant_mapping_state(&self) -> bool {
        false
    }

    fn work_area(&self, _desktop: i32) -> Rect {
        Rect::default()
    }

    fn work_area_excluding(&self, _excludes: &[WindowId], _desktop: i32) -> Rect {
        Rect::default()
    }

    async fn desktop_name(&self, desktop: i32) -> String {
        Self::reply_or_default("desktopName", self.proxy.desktop_name(desktop).await)
    }

    async fn set_desktop_name(&self, desktop: i32, name: &str) {
        Self::reply_or_default(
            "setDesktopName",
            self.proxy.set_desktop_name(desktop, name).await,
        )
    }

    async fn showing_desktop(&self) -> bool {
        Self::reply_or_default("showingDesktop", self.proxy.showing_desktop().await)
    }

    async fn set_showing_desktop(&self, showing: bool) {
        Self::reply_or_default(
            "setShowingDesktop",
            self.proxy.set_showing_desktop(showing).await,
        )
    }

    async fn set_user_time(&self, window: WindowId, time: i32) {
        Self::reply_or_default("setUserTime", self.proxy.set_user_time(window, time).await)
    }

    async fn set_extended_strut(&self, window: WindowId, strut: ExtendedStrut) {
        Self::reply_or_default(
            "setExtendedStrut",
            self.proxy
                .set_extended_strut(
                    window,
                    strut.left_width,
                    strut.left_start,
                    strut.left_end,
                    strut.right_width,
                    strut.right_start,
                    strut.right_end,
                    strut.top_width,
                    strut.top_start,
                    strut.top_end,
                    strut.bottom_width,
                    strut.bottom_start,
                    strut.bottom_end,
                )
                .await,
        )
    }

    async fn set_strut(&self, window: WindowId, strut: Strut) {
        Self::reply_or_default(
            "setStrut",
            self.proxy
                .set_strut(window, strut.left, strut.right, strut.top, strut.bottom)
                .await,
        )
    }

    fn allowed_actions_supported(&self) -> bool {
        false
    }

    async fn read_name_property(&self, window: WindowId, atom: u32) -> String {
        Self::reply_or_default(
            "readNameProperty",
            self.proxy.read_name_property(window, atom).await,
        )
    }

    fn allow_external_process_window_activation(&self, _pid: i32) {
        // Accepted and discarded; activation is governed by the service.
    }

    fn set_blocking_compositing(&self, _window: WindowId, _active: bool) {
        // Accepted and discarded; compositing is always on.
    }

    fn map_viewport(&self) -> bool {
        false
    }

    fn viewport_to_desktop(&self, _pos: Point) -> i32 {
        0
    }

    fn viewport_window_to_desktop(&self, _rect: Rect) -> i32 {
        0
    }

    fn desktop_to_viewport(&self, _desktop: i32, _absolute: bool) -> Point {
        Point::default()
    }

    fn constrain_viewport_relative_position(&self, _pos: Point) -> Point {
        Point::default()
    }
}
