//! Proxy declarations for the remote window service.
//!
//! The service exposes two interfaces on one object: the window-system
//! interface (process-wide operations and all signals) and the window-info
//! interface (window-scoped accessors, handle always first). Wire member
//! names are camelCase and fixed by the service.

use zbus::proxy;

/// Well-known bus name of the remote window service.
pub const WINDOW_SERVICE: &str = "org.kde.KWindowSystem";
/// Object path of the remote window service.
pub const WINDOW_PATH: &str = "/org/kde/KWindowSystem";

/// Where the adapters point on the bus.
///
/// The default is the well-known endpoint; overriding it is mainly useful
/// for tests and embedders running the service under a private name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BusAddress {
    /// Bus name of the window service.
    pub service: String,
    /// Object path of the window service.
    pub path: String,
}

impl Default for BusAddress {
    fn default() -> Self {
        Self {
            service: WINDOW_SERVICE.to_owned(),
            path: WINDOW_PATH.to_owned(),
        }
    }
}

pub(crate) async fn window_system_proxy(
    conn: &zbus::Connection,
    address: &BusAddress,
) -> zbus::Result<WindowSystemProxy<'static>> {
    WindowSystemProxy::builder(conn)
        .destination(address.service.clone())?
        .path(address.path.clone())?
        .build()
        .await
}

pub(crate) async fn window_info_proxy(
    conn: &zbus::Connection,
    address: &BusAddress,
) -> zbus::Result<WindowInfoProxy<'static>> {
    WindowInfoProxy::builder(conn)
        .destination(address.service.clone())?
        .path(address.path.clone())?
        .build()
        .await
}

#[proxy(
    interface = "org.kde.KWindowSystem",
    default_service = "org.kde.KWindowSystem",
    default_path = "/org/kde/KWindowSystem",
    gen_blocking = false
)]
pub trait WindowSystem {
    #[zbus(name = "windows")]
    fn windows(&self) -> zbus::Result<Vec<u64>>;

    #[zbus(name = "stackingOrder")]
    fn stacking_order(&self) -> zbus::Result<Vec<u64>>;

    #[zbus(name = "activeWindow")]
    fn active_window(&self) -> zbus::Result<u64>;

    #[zbus(name = "activateWindow")]
    fn activate_window(&self, window: u64, time: i32) -> zbus::Result<()>;

    #[zbus(name = "forceActiveWindow")]
    fn force_active_window(&self, window: u64, time: i32) -> zbus::Result<()>;

    #[zbus(name = "demandAttention")]
    fn demand_attention(&self, window: u64, set: bool) -> zbus::Result<()>;

    #[zbus(name = "currentDesktop")]
    fn current_desktop(&self) -> zbus::Result<i32>;

    #[zbus(name = "numberOfDesktops")]
    fn number_of_desktops(&self) -> zbus::Result<i32>;

    #[zbus(name = "setCurrentDesktop")]
    fn set_current_desktop(&self, desktop: i32) -> zbus::Result<()>;

    #[zbus(name = "setOnAllDesktops")]
    fn set_on_all_desktops(&self, window: u64, on_all: bool) -> zbus::Result<()>;

    #[zbus(name = "setOnDesktop")]
    fn set_on_desktop(&self, window: u64, desktop: i32) -> zbus::Result<()>;

    #[zbus(name = "icon")]
    fn icon(&self, window: u64, width: i32, height: i32) -> zbus::Result<Vec<u8>>;

    #[zbus(name = "setIcons")]
    fn set_icons(&self, window: u64, icon: &[u8], mini_icon: &[u8]) -> zbus::Result<()>;

    #[zbus(name = "setType")]
    fn set_type(&self, window: u64, window_type: i32) -> zbus::Result<()>;

    #[zbus(name = "setState")]
    fn set_state(&self, window: u64, state: u32) -> zbus::Result<()>;

    #[zbus(name = "clearState")]
    fn clear_state(&self, window: u64, state: u32) -> zbus::Result<()>;

    #[zbus(name = "minimizeWindow")]
    fn minimize_window(&self, window: u64) -> zbus::Result<()>;

    #[zbus(name = "unminimizeWindow")]
    fn unminimize_window(&self, window: u64) -> zbus::Result<()>;

    #[zbus(name = "raiseWindow")]
    fn raise_window(&self, window: u64) -> zbus::Result<()>;

    #[zbus(name = "lowerWindow")]
    fn lower_window(&self, window: u64) -> zbus::Result<()>;

    #[zbus(name = "desktopName")]
    fn desktop_name(&self, desktop: i32) -> zbus::Result<String>;

    #[zbus(name = "setDesktopName")]
    fn set_desktop_name(&self, desktop: i32, name: &str) -> zbus::Result<()>;

    #[zbus(name = "showingDesktop")]
    fn showing_desktop(&self) -> zbus::Result<bool>;

    #[zbus(name = "setShowingDesktop")]
    fn set_showing_desktop(&self, showing: bool) -> zbus::Result<()>;

    #[zbus(name = "setUserTime")]
    fn set_user_time(&self, window: u64, time: i32) -> zbus::Result<()>;

    #[allow(clippy::too_many_arguments)]
    #[zbus(name = "setExtendedStrut")]
    fn set_extended_strut(
        &self,
        window: u64,
        left_width: i32,
        left_start: i32,
        left_end: i32,
        right_width: i32,
        right_start: i32,
        right_end: i32,
        top_width: i32,
        top_start: i32,
        top_end: i32,
        bottom_width: i32,
        bottom_start: i32,
        bottom_end: i32,
    ) -> zbus::Result<()>;

    #[zbus(name = "setStrut")]
    fn set_strut(&self, window: u64, left: i32, right: i32, top: i32, bottom: i32)
    -> zbus::Result<()>;

    #[zbus(name = "readNameProperty")]
    fn read_name_property(&self, window: u64, atom: u32) -> zbus::Result<String>;

    #[zbus(signal, name = "activeWindowChanged")]
    fn active_window_changed(&self, window: u64) -> zbus::Result<()>;

    #[zbus(signal, name = "currentDesktopChanged")]
    fn current_desktop_changed(&self, desktop: i32) -> zbus::Result<()>;

    #[zbus(signal, name = "desktopNamesChanged")]
    fn desktop_names_changed(&self) -> zbus::Result<()>;

    #[zbus(signal, name = "numberOfDesktopsChanged")]
    fn number_of_desktops_changed(&self, count: i32) -> zbus::Result<()>;

    #[zbus(signal, name = "showingDesktopChanged")]
    fn showing_desktop_changed(&self, showing: bool) -> zbus::Result<()>;

    #[zbus(signal, name = "stackingOrderChanged")]
    fn stacking_order_changed(&self) -> zbus::Result<()>;

    #[zbus(signal, name = "windowAdded")]
    fn window_added(&self, window: u64) -> zbus::Result<()>;

    #[zbus(signal, name = "windowChanged")]
    fn window_changed(&self, window: u64, properties: u32, properties2: u32) -> zbus::Result<()>;

    #[zbus(signal, name = "windowRemoved")]
    fn window_removed(&self, window: u64) -> zbus::Result<()>;

    #[zbus(signal, name = "workAreaChanged")]
    fn work_area_changed(&self) -> zbus::Result<()>;
}

#[proxy(
    interface = "org.kde.KWindowInfo",
    default_service = "org.kde.KWindowSystem",
    default_path = "/org/kde/KWindowSystem",
    gen_blocking = false
)]
pub trait WindowInfo {
    #[zbus(name = "valid")]
    fn valid(&self, window: u64, withdrawn_is_valid: bool) -> zbus::Result<bool>;

    #[zbus(name = "state")]
    fn state(&self, window: u64) -> zbus::Result<u32>;

    #[zbus(name = "isMinimized")]
    fn is_minimized(&self, window: u64) -> zbus::Result<bool>;

    #[zbus(name = "mappingState")]
    fn mapping_state(&self, window: u64) -> zbus::Result<i32>;

    #[zbus(name = "extendedStrut")]
    fn extended_strut(&self, window: u64) -> zbus::Result<Vec<i32>>;

    #[zbus(name = "windowType")]
    fn window_type(&self, window: u64, supported: u32) -> zbus::Result<i32>;

    #[zbus(name = "name")]
    fn name(&self, window: u64) -> zbus::Result<String>;

    #[zbus(name = "visibleName")]
    fn visible_name(&self, window: u64) -> zbus::Result<String>;

    #[zbus(name = "visibleNameWithState")]
    fn visible_name_with_state(&self, window: u64) -> zbus::Result<String>;

    #[zbus(name = "iconName")]
    fn icon_name(&self, window: u64) -> zbus::Result<String>;

    #[zbus(name = "visibleIconName")]
    fn visible_icon_name(&self, window: u64) -> zbus::Result<String>;

    #[zbus(name = "visibleIconNameWithState")]
    fn visible_icon_name_with_state(&self, window: u64) -> zbus::Result<String>;

    #[zbus(name = "onAllDesktops")]
    fn on_all_desktops(&self, window: u64) -> zbus::Result<bool>;

    #[zbus(name = "isOnDesktop")]
    fn is_on_desktop(&self, window: u64, desktop: i32) -> zbus::Result<bool>;

    #[zbus(name = "desktop")]
    fn desktop(&self, window: u64) -> zbus::Result<i32>;

    #[zbus(name = "geometry")]
    fn geometry(&self, window: u64) -> zbus::Result<Vec<i32>>;

    #[zbus(name = "frameGeometry")]
    fn frame_geometry(&self, window: u64) -> zbus::Result<Vec<i32>>;

    #[zbus(name = "transientFor")]
    fn transient_for(&self, window: u64) -> zbus::Result<u64>;

    #[zbus(name = "groupLeader")]
    fn group_leader(&self, window: u64) -> zbus::Result<u64>;

    #[zbus(name = "win")]
    fn win(&self, window: u64) -> zbus::Result<u64>;

    #[zbus(name = "windowClassClass")]
    fn window_class_class(&self, window: u64) -> zbus::Result<String>;

    #[zbus(name = "windowClassName")]
    fn window_class_name(&self, window: u64) -> zbus::Result<String>;

    #[zbus(name = "windowRole")]
    fn window_role(&self, window: u64) -> zbus::Result<String>;

    #[zbus(name = "clientMachine")]
    fn client_machine(&self, window: u64) -> zbus::Result<String>;

    #[zbus(name = "actionSupported")]
    fn action_supported(&self, window: u64, action: u32) -> zbus::Result<bool>;

    #[zbus(name = "gtkApplicationId")]
    fn gtk_application_id(&self, window: u64) -> zbus::Result<String>;

    #[zbus(name = "requestMoveResize")]
    fn request_move_resize(&self, window: u64, direction: i32) -> zbus::Result<()>;

    #[zbus(name = "setGeometry")]
    fn set_geometry(&self, window: u64, x: i32, y: i32, width: i32, height: i32)
    -> zbus::Result<()>;

    #[zbus(name = "pid")]
    fn pid(&self, window: u64) -> zbus::Result<i32>;

    #[zbus(name = "close")]
    fn close(&self, window: u64) -> zbus::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_address_points_at_the_well_known_endpoint() {
        let address = BusAddress::default();
        assert_eq!(address.service, WINDOW_SERVICE);
        assert_eq!(address.path, WINDOW_PATH);
    }
}
