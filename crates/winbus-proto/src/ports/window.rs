#![allow(async_fn_in_trait)]

//! Window-management port contract.
//!
//! The remote window service owns all window state; this module only
//! describes how to talk about it. Port operations are infallible from the
//! caller's point of view: a backend downgrades transport and decode
//! failures to a diagnostic plus the return type's default value. The sole
//! fallible surface is construction and event subscription, which report a
//! [`WindowBusError`].

use std::{error::Error, fmt};

use bitflags::bitflags;

/// Opaque window identifier, scoped to the remote window service.
///
/// Carries no lifecycle of its own; a stale identifier simply makes the
/// remote service answer with defaults.
pub type WindowId = u64;

bitflags! {
    /// Advisory selection of basic window attributes a caller intends to
    /// read through a window-info port.
    ///
    /// The flags never change what is sent on the wire; an accessor invoked
    /// without its matching flag still performs the call, but the backend
    /// may emit a developer-facing warning. [`CLOSE_WINDOW`] additionally
    /// opts the window-info instance into requesting a window close when it
    /// is dropped.
    ///
    /// [`CLOSE_WINDOW`]: WindowInfoProperties::CLOSE_WINDOW
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct WindowInfoProperties: u32 {
        /// Window state mask ([`WindowInfoPort::state`]).
        const STATE = 1 << 0;
        /// Mapping state ([`WindowInfoPort::mapping_state`],
        /// [`WindowInfoPort::is_minimized`]).
        const MAPPING_STATE = 1 << 1;
        /// Plain window name ([`WindowInfoPort::name`]).
        const NAME = 1 << 2;
        /// Visible (disambiguated) window name.
        const VISIBLE_NAME = 1 << 3;
        /// Plain icon name.
        const ICON_NAME = 1 << 4;
        /// Visible icon name.
        const VISIBLE_ICON_NAME = 1 << 5;
        /// Desktop membership accessors.
        const DESKTOP = 1 << 6;
        /// Window type ([`WindowInfoPort::window_type`]).
        const WINDOW_TYPE = 1 << 7;
        /// Owning process id.
        const PID = 1 << 8;
        /// Interactive move/resize requests.
        const MOVE_RESIZE = 1 << 9;
        /// Request a window close when the info instance is dropped.
        const CLOSE_WINDOW = 1 << 10;
    }
}

bitflags! {
    /// Advisory selection of extended window attributes, the second flag
    /// set supplied at window-info construction.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct WindowInfoProperties2: u32 {
        /// Window geometry ([`WindowInfoPort::geometry`]).
        const GEOMETRY = 1 << 0;
        /// Frame geometry including decorations.
        const FRAME_EXTENTS = 1 << 1;
        /// Reserved screen-edge regions ([`WindowInfoPort::extended_strut`]).
        const EXTENDED_STRUT = 1 << 2;
        /// Transient-for (parent window) handle.
        const TRANSIENT_FOR = 1 << 3;
        /// Window-group leader handle.
        const GROUP_LEADER = 1 << 4;
        /// Window class and class-name.
        const WINDOW_CLASS = 1 << 5;
        /// Window role.
        const WINDOW_ROLE = 1 << 6;
        /// Client machine name.
        const CLIENT_MACHINE = 1 << 7;
        /// Allowed window-manager actions.
        const ALLOWED_ACTIONS = 1 << 8;
        /// GTK application id.
        const GTK_APPLICATION_ID = 1 << 9;
        /// Programmatic geometry changes ([`WindowInfoPort::set_geometry`]).
        const MOVE_RESIZE_WINDOW = 1 << 10;
    }
}

bitflags! {
    /// Window state mask as reported and accepted by the remote service.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct WindowStates: u32 {
        /// Modal dialog.
        const MODAL = 1 << 0;
        /// Kept on all desktops.
        const STICKY = 1 << 1;
        /// Maximized vertically.
        const MAXIMIZED_VERT = 1 << 2;
        /// Maximized horizontally.
        const MAXIMIZED_HORIZ = 1 << 3;
        /// Maximized in both directions.
        const MAXIMIZED = Self::MAXIMIZED_VERT.bits() | Self::MAXIMIZED_HORIZ.bits();
        /// Shaded (rolled up).
        const SHADED = 1 << 4;
        /// Excluded from taskbars.
        const SKIP_TASKBAR = 1 << 5;
        /// Kept above other windows.
        const KEEP_ABOVE = 1 << 6;
        /// Excluded from pagers.
        const SKIP_PAGER = 1 << 7;
        /// Not visible on screen (minimized or on another desktop).
        const HIDDEN = 1 << 8;
        /// Fullscreen.
        const FULLSCREEN = 1 << 9;
        /// Kept below other windows.
        const KEEP_BELOW = 1 << 10;
        /// Wants attention.
        const DEMANDS_ATTENTION = 1 << 11;
        /// Excluded from window switchers.
        const SKIP_SWITCHER = 1 << 12;
        /// Currently focused.
        const FOCUSED = 1 << 13;
    }
}

bitflags! {
    /// Window-manager actions a window may support.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Actions: u32 {
        /// Interactive move.
        const MOVE = 1 << 0;
        /// Interactive resize.
        const RESIZE = 1 << 1;
        /// Minimize.
        const MINIMIZE = 1 << 2;
        /// Shade.
        const SHADE = 1 << 3;
        /// Stick to all desktops.
        const STICK = 1 << 4;
        /// Maximize vertically.
        const MAXIMIZE_VERT = 1 << 5;
        /// Maximize horizontally.
        const MAXIMIZE_HORIZ = 1 << 6;
        /// Maximize in both directions.
        const MAXIMIZE = Self::MAXIMIZE_VERT.bits() | Self::MAXIMIZE_HORIZ.bits();
        /// Fullscreen.
        const FULLSCREEN = 1 << 7;
        /// Move to another desktop.
        const CHANGE_DESKTOP = 1 << 8;
        /// Close.
        const CLOSE = 1 << 9;
    }
}

bitflags! {
    /// Mask of window types a caller understands, forwarded verbatim to the
    /// remote [`WindowInfoPort::window_type`] query.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct WindowTypeMask: u32 {
        /// Normal toplevel windows.
        const NORMAL = 1 << 0;
        /// Desktop background windows.
        const DESKTOP = 1 << 1;
        /// Docks and panels.
        const DOCK = 1 << 2;
        /// Torn-off toolbars.
        const TOOLBAR = 1 << 3;
        /// Torn-off menus.
        const MENU = 1 << 4;
        /// Dialogs.
        const DIALOG = 1 << 5;
        /// Override-redirect windows.
        const OVERRIDE = 1 << 6;
        /// Standalone menubars.
        const TOP_MENU = 1 << 7;
        /// Utility windows.
        const UTILITY = 1 << 8;
        /// Splash screens.
        const SPLASH = 1 << 9;
        /// Dropdown menus.
        const DROPDOWN_MENU = 1 << 10;
        /// Popup menus.
        const POPUP_MENU = 1 << 11;
        /// Tooltips.
        const TOOLTIP = 1 << 12;
        /// Notifications.
        const NOTIFICATION = 1 << 13;
        /// Combo-box popups.
        const COMBO_BOX = 1 << 14;
        /// Drag-and-drop feedback windows.
        const DND_ICON = 1 << 15;
        /// On-screen displays.
        const ON_SCREEN_DISPLAY = 1 << 16;
        /// Critical notifications.
        const CRITICAL_NOTIFICATION = 1 << 17;
        /// Applet popups.
        const APPLET_POPUP = 1 << 18;
    }
}

/// Window type as reported by the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i32)]
pub enum WindowType {
    /// Type could not be determined.
    Unknown = -1,
    /// Normal toplevel window.
    #[default]
    Normal = 0,
    /// Desktop background window.
    Desktop = 1,
    /// Dock or panel.
    Dock = 2,
    /// Torn-off toolbar.
    Toolbar = 3,
    /// Torn-off menu.
    Menu = 4,
    /// Dialog.
    Dialog = 5,
    /// Override-redirect window.
    Override = 6,
    /// Standalone menubar.
    TopMenu = 7,
    /// Utility window.
    Utility = 8,
    /// Splash screen.
    Splash = 9,
    /// Dropdown menu.
    DropdownMenu = 10,
    /// Popup menu.
    PopupMenu = 11,
    /// Tooltip.
    Tooltip = 12,
    /// Notification.
    Notification = 13,
    /// Combo-box popup.
    ComboBox = 14,
    /// Drag-and-drop feedback window.
    DndIcon = 15,
    /// On-screen display.
    OnScreenDisplay = 16,
    /// Critical notification.
    CriticalNotification = 17,
    /// Applet popup.
    AppletPopup = 18,
}

impl WindowType {
    /// Decode a raw discriminant from a reply; values outside the known
    /// range map to [`WindowType::Unknown`].
    pub const fn from_raw(raw: i32) -> Self {
        match raw {
            0 => Self::Normal,
            1 => Self::Desktop,
            2 => Self::Dock,
            3 => Self::Toolbar,
            4 => Self::Menu,
            5 => Self::Dialog,
            6 => Self::Override,
            7 => Self::TopMenu,
            8 => Self::Utility,
            9 => Self::Splash,
            10 => Self::DropdownMenu,
            11 => Self::PopupMenu,
            12 => Self::Tooltip,
            13 => Self::Notification,
            14 => Self::ComboBox,
            15 => Self::DndIcon,
            16 => Self::OnScreenDisplay,
            17 => Self::CriticalNotification,
            18 => Self::AppletPopup,
            _ => Self::Unknown,
        }
    }

    /// Raw wire discriminant.
    pub const fn raw(self) -> i32 {
        self as i32
    }
}

/// Mapping state of a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i32)]
pub enum MappingState {
    /// Not mapped and not iconified.
    #[default]
    Withdrawn = 0,
    /// Mapped and visible.
    Visible = 1,
    /// Iconified (minimized).
    Iconic = 3,
}

impl MappingState {
    /// Decode a raw discriminant; unknown values map to
    /// [`MappingState::Withdrawn`].
    pub const fn from_raw(raw: i32) -> Self {
        match raw {
            1 => Self::Visible,
            3 => Self::Iconic,
            _ => Self::Withdrawn,
        }
    }
}

/// Edge or mode from which an interactive move/resize is initiated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Direction {
    /// Resize from the top-left corner.
    TopLeft = 0,
    /// Resize from the top edge.
    Top = 1,
    /// Resize from the top-right corner.
    TopRight = 2,
    /// Resize from the right edge.
    Right = 3,
    /// Resize from the bottom-right corner.
    BottomRight = 4,
    /// Resize from the bottom edge.
    Bottom = 5,
    /// Resize from the bottom-left corner.
    BottomLeft = 6,
    /// Resize from the left edge.
    Left = 7,
    /// Interactive move.
    Move = 8,
    /// Keyboard-driven resize.
    KeyboardSize = 9,
    /// Keyboard-driven move.
    KeyboardMove = 10,
    /// Cancel the current interactive operation.
    Cancel = 11,
}

impl Direction {
    /// Raw wire discriminant.
    pub const fn raw(self) -> i32 {
        self as i32
    }
}

/// Window geometry in screen coordinates.
///
/// Decoded positionally from a 4-element array reply; any other arity
/// yields the default (empty) rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Rect {
    /// Construct a rectangle from its four components.
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Positional decode of an array reply.
    pub fn from_reply(values: &[i32]) -> Self {
        match *values {
            [x, y, width, height] => Self::new(x, y, width, height),
            _ => Self::default(),
        }
    }

    /// Whether the rectangle covers no area.
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

/// Point in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    /// Horizontal component.
    pub x: i32,
    /// Vertical component.
    pub y: i32,
}

impl Point {
    /// Construct a point from its two components.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Reserved screen-edge region, expressed as width/start/end per edge.
///
/// Decoded positionally from a 12-element array reply; any other arity
/// yields the default (no reservation) strut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ExtendedStrut {
    /// Width reserved at the left edge.
    pub left_width: i32,
    /// Start of the left reservation, in screen coordinates.
    pub left_start: i32,
    /// End of the left reservation.
    pub left_end: i32,
    /// Width reserved at the right edge.
    pub right_width: i32,
    /// Start of the right reservation.
    pub right_start: i32,
    /// End of the right reservation.
    pub right_end: i32,
    /// Height reserved at the top edge.
    pub top_width: i32,
    /// Start of the top reservation.
    pub top_start: i32,
    /// End of the top reservation.
    pub top_end: i32,
    /// Height reserved at the bottom edge.
    pub bottom_width: i32,
    /// Start of the bottom reservation.
    pub bottom_start: i32,
    /// End of the bottom reservation.
    pub bottom_end: i32,
}

impl ExtendedStrut {
    /// Positional decode of an array reply.
    pub fn from_reply(values: &[i32]) -> Self {
        match *values {
            [
                left_width,
                left_start,
                left_end,
                right_width,
                right_start,
                right_end,
                top_width,
                top_start,
                top_end,
                bottom_width,
                bottom_start,
                bottom_end,
            ] => Self {
                left_width,
                left_start,
                left_end,
                right_width,
                right_start,
                right_end,
                top_width,
                top_start,
                top_end,
                bottom_width,
                bottom_start,
                bottom_end,
            },
            _ => Self::default(),
        }
    }

    /// Wire encoding: the twelve components in positional order.
    pub fn to_wire(&self) -> [i32; 12] {
        [
            self.left_width,
            self.left_start,
            self.left_end,
            self.right_width,
            self.right_start,
            self.right_end,
            self.top_width,
            self.top_start,
            self.top_end,
            self.bottom_width,
            self.bottom_start,
            self.bottom_end,
        ]
    }
}

/// Simple per-edge screen reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Strut {
    /// Pixels reserved at the left edge.
    pub left: i32,
    /// Pixels reserved at the right edge.
    pub right: i32,
    /// Pixels reserved at the top edge.
    pub top: i32,
    /// Pixels reserved at the bottom edge.
    pub bottom: i32,
}

/// Local notification mirroring one of the remote service's signals.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WindowEvent {
    /// The active window changed.
    ActiveWindowChanged(WindowId),
    /// The current virtual desktop changed.
    CurrentDesktopChanged(i32),
    /// Desktop names changed.
    DesktopNamesChanged,
    /// The number of virtual desktops changed.
    NumberOfDesktopsChanged(i32),
    /// The showing-desktop mode toggled.
    ShowingDesktopChanged(bool),
    /// The stacking order changed.
    StackingOrderChanged,
    /// A window appeared.
    WindowAdded(WindowId),
    /// Attributes of a window changed. The combined mask payload of the
    /// remote signal is split into the two property-set values.
    WindowChanged {
        /// The window whose attributes changed.
        window: WindowId,
        /// Changed basic attributes.
        properties: WindowInfoProperties,
        /// Changed extended attributes.
        properties2: WindowInfoProperties2,
    },
    /// A window disappeared.
    WindowRemoved(WindowId),
    /// The usable work area changed.
    WorkAreaChanged,
}

/// Error type returned by construction and subscription surfaces.
///
/// Each variant stores the logical operation name to aid diagnostics. Port
/// accessors never return this type; backends downgrade their failures to a
/// diagnostic plus a default value.
#[derive(Debug, thiserror::Error)]
pub enum WindowBusError {
    /// The backend failed to reach or use the message bus.
    #[error("operation `{operation}` failed: {source}")]
    Backend {
        /// Logical operation identifier.
        operation: &'static str,
        /// Source error reported by the bus backend.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// The async runtime required to perform the operation was unavailable.
    #[error("operation `{operation}` unavailable because no async runtime is active")]
    RuntimeUnavailable {
        /// Logical operation identifier.
        operation: &'static str,
    },
    /// The operation failed with an explanatory message.
    #[error("operation `{operation}` failed: {message}")]
    Message {
        /// Logical operation identifier.
        operation: &'static str,
        /// Human readable error description.
        message: String,
    },
}

impl WindowBusError {
    /// Helper for constructing [`WindowBusError::Backend`].
    pub fn backend<E>(operation: &'static str, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self::Backend {
            operation,
            source: Box::new(source),
        }
    }

    /// Helper for constructing [`WindowBusError::RuntimeUnavailable`].
    pub const fn runtime_unavailable(operation: &'static str) -> Self {
        Self::RuntimeUnavailable { operation }
    }

    /// Helper for constructing [`WindowBusError::Message`].
    pub fn message(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Message {
            operation,
            message: message.into(),
        }
    }
}

/// Window-scoped accessors and mutators for one remote window.
///
/// Instances are created through [`WindowPlatform::create_window_info`] with
/// the advisory property sets the caller intends to use. Every method is
/// infallible: on a transport or decode failure the backend returns the
/// type's default value.
pub trait WindowInfoPort: Send + Sync {
    /// Whether the window handle refers to a live window.
    async fn valid(&self, withdrawn_is_valid: bool) -> bool;

    /// Current state mask.
    async fn state(&self) -> WindowStates;

    /// Whether the window is minimized.
    async fn is_minimized(&self) -> bool;

    /// Current mapping state.
    async fn mapping_state(&self) -> MappingState;

    /// Screen-edge reservation claimed by the window.
    async fn extended_strut(&self) -> ExtendedStrut;

    /// Window type, constrained to the types the caller understands.
    async fn window_type(&self, supported: WindowTypeMask) -> WindowType;

    /// Plain window name.
    async fn name(&self) -> String;

    /// Visible window name, disambiguated by the window manager.
    async fn visible_name(&self) -> String;

    /// Visible window name with a state annotation.
    async fn visible_name_with_state(&self) -> String;

    /// Plain icon name.
    async fn icon_name(&self) -> String;

    /// Visible icon name.
    async fn visible_icon_name(&self) -> String;

    /// Visible icon name with a state annotation.
    async fn visible_icon_name_with_state(&self) -> String;

    /// Whether the window appears on all virtual desktops.
    async fn on_all_desktops(&self) -> bool;

    /// Whether the window appears on the given virtual desktop.
    async fn is_on_desktop(&self, desktop: i32) -> bool;

    /// Virtual desktop the window lives on.
    async fn desktop(&self) -> i32;

    /// Activity tags of the window. Activities have no equivalent under
    /// this compositor protocol; the list is always empty and no remote
    /// call is made.
    async fn activities(&self) -> Vec<String>;

    /// Window geometry.
    async fn geometry(&self) -> Rect;

    /// Frame geometry including decorations.
    async fn frame_geometry(&self) -> Rect;

    /// Handle of the window this one is transient for.
    async fn transient_for(&self) -> WindowId;

    /// Handle of the window-group leader.
    async fn group_leader(&self) -> WindowId;

    /// Handle of the window itself, as known to the remote service.
    async fn win(&self) -> WindowId;

    /// Window class, Latin-1 encoded.
    async fn window_class_class(&self) -> Vec<u8>;

    /// Window class name, Latin-1 encoded.
    async fn window_class_name(&self) -> Vec<u8>;

    /// Window role, Latin-1 encoded.
    async fn window_role(&self) -> Vec<u8>;

    /// Client machine name, Latin-1 encoded.
    async fn client_machine(&self) -> Vec<u8>;

    /// GTK application id, Latin-1 encoded.
    async fn gtk_application_id(&self) -> Vec<u8>;

    /// Whether the window manager allows the given action on this window.
    async fn action_supported(&self, action: Actions) -> bool;

    /// Process id of the window's owner.
    async fn pid(&self) -> i32;

    /// Start an interactive move or resize from the given direction.
    async fn request_move_resize(&self, direction: Direction);

    /// Move and resize the window programmatically.
    async fn set_geometry(&self, rect: Rect);
}

/// Process-wide window and desktop operations.
///
/// One instance per platform, created through
/// [`WindowPlatform::create_window_system`]. Every method is infallible;
/// operations without an equivalent under the compositor protocol return a
/// fixed sentinel without touching the bus.
pub trait WindowSystemPort: Send + Sync {
    /// Handles of all mapped windows.
    async fn windows(&self) -> Vec<WindowId>;

    /// Handles of all mapped windows in stacking order.
    async fn stacking_order(&self) -> Vec<WindowId>;

    /// Handle of the active window.
    async fn active_window(&self) -> WindowId;

    /// Request activation of a window.
    async fn activate_window(&self, window: WindowId, time: i32);

    /// Request activation of a window, overriding focus stealing
    /// prevention.
    async fn force_active_window(&self, window: WindowId, time: i32);

    /// Mark or unmark a window as demanding attention.
    async fn demand_attention(&self, window: WindowId, set: bool);

    /// Whether compositing is active. Always `true` under this protocol.
    fn compositing_active(&self) -> bool;

    /// Index of the current virtual desktop.
    async fn current_desktop(&self) -> i32;

    /// Number of virtual desktops.
    async fn number_of_desktops(&self) -> i32;

    /// Switch to a virtual desktop.
    async fn set_current_desktop(&self, desktop: i32);

    /// Pin a window to all desktops, or unpin it.
    async fn set_on_all_desktops(&self, window: WindowId, on_all: bool);

    /// Move a window to a virtual desktop.
    async fn set_on_desktop(&self, window: WindowId, desktop: i32);

    /// Tag a window with activities. Accepted and discarded; activities
    /// have no equivalent under this compositor protocol.
    fn set_on_activities(&self, window: WindowId, activities: &[String]);

    /// Retrieve a window's icon, decoded from the service's encoded reply.
    ///
    /// With `scale` set and a decodable reply, the result is exactly
    /// `width`×`height`; otherwise the image keeps its native decoded size.
    /// An undecodable reply yields an empty image.
    async fn icon(&self, window: WindowId, width: i32, height: i32, scale: bool)
    -> image::DynamicImage;

    /// Publish a window's icon and mini icon.
    async fn set_icons(
        &self,
        window: WindowId,
        icon: &image::DynamicImage,
        mini_icon: &image::DynamicImage,
    );

    /// Set a window's type.
    async fn set_type(&self, window: WindowId, window_type: WindowType);

    /// Set state bits on a window.
    async fn set_state(&self, window: WindowId, state: WindowStates);

    /// Clear state bits on a window.
    async fn clear_state(&self, window: WindowId, state: WindowStates);

    /// Minimize a window.
    async fn minimize_window(&self, window: WindowId);

    /// Restore a minimized window.
    async fn unminimize_window(&self, window: WindowId);

    /// Raise a window in the stacking order.
    async fn raise_window(&self, window: WindowId);

    /// Lower a window in the stacking order.
    async fn lower_window(&self, window: WindowId);

    /// Whether the mapping state follows the legacy session protocol.
    /// Always `false` under this protocol.
    fn icccm_compliant_mapping_state(&self) -> bool;

    /// Usable work area of a desktop. Not exposed by the remote service;
    /// always the empty rectangle.
    fn work_area(&self, desktop: i32) -> Rect;

    /// Usable work area of a desktop ignoring the given windows' struts.
    /// Not exposed by the remote service; always the empty rectangle.
    fn work_area_excluding(&self, excludes: &[WindowId], desktop: i32) -> Rect;

    /// Name of a virtual desktop.
    async fn desktop_name(&self, desktop: i32) -> String;

    /// Rename a virtual desktop.
    async fn set_desktop_name(&self, desktop: i32, name: &str);

    /// Whether the showing-desktop mode is active.
    async fn showing_desktop(&self) -> bool;

    /// Toggle the showing-desktop mode.
    async fn set_showing_desktop(&self, showing: bool);

    /// Record the time of the last user interaction with a window.
    async fn set_user_time(&self, window: WindowId, time: i32);

    /// Claim a screen-edge reservation for a window.
    async fn set_extended_strut(&self, window: WindowId, strut: ExtendedStrut);

    /// Claim a simple per-edge reservation for a window.
    async fn set_strut(&self, window: WindowId, strut: Strut);

    /// Whether allowed-actions introspection is available. Always `false`
    /// under this protocol.
    fn allowed_actions_supported(&self) -> bool;

    /// Read a legacy text property from a window.
    async fn read_name_property(&self, window: WindowId, atom: u32) -> String;

    /// Permit an external process to activate windows. Accepted and
    /// discarded.
    fn allow_external_process_window_activation(&self, pid: i32);

    /// Suspend or resume compositing for a window. Accepted and discarded.
    fn set_blocking_compositing(&self, window: WindowId, active: bool);

    /// Whether desktops are a viewport mapping. Always `false`.
    fn map_viewport(&self) -> bool;

    /// Desktop containing a viewport position. Always `0`.
    fn viewport_to_desktop(&self, pos: Point) -> i32;

    /// Desktop containing a viewport rectangle. Always `0`.
    fn viewport_window_to_desktop(&self, rect: Rect) -> i32;

    /// Viewport position of a desktop. Always the origin.
    fn desktop_to_viewport(&self, desktop: i32, absolute: bool) -> Point;

    /// Constrain a position to the viewport. Always the origin.
    fn constrain_viewport_relative_position(&self, pos: Point) -> Point;
}

/// Factory contract through which a host instantiates the backend.
///
/// # Examples
/// ```ignore
/// use winbus_proto::ports::window::{
///     WindowInfoProperties, WindowInfoProperties2, WindowPlatform,
/// };
///
/// async fn dump_names<P: WindowPlatform>(platform: &P) {
///     let system = platform.create_window_system().await.expect("window system");
///     for window in system.windows().await {
///         let info = platform
///             .create_window_info(
///                 window,
///                 WindowInfoProperties::NAME,
///                 WindowInfoProperties2::empty(),
///             )
///             .await
///             .expect("window info");
///         println!("{window:#x}: {}", info.name().await);
///     }
/// }
/// ```
pub trait WindowPlatform: Send + Sync {
    /// Window-system adapter produced by this platform.
    type WindowSystem: WindowSystemPort;
    /// Window-info adapter produced by this platform.
    type WindowInfo: WindowInfoPort;

    /// Create the process-wide window-system adapter.
    async fn create_window_system(&self) -> Result<Self::WindowSystem, WindowBusError>;

    /// Create a window-info adapter for one window, with the advisory
    /// property sets the caller intends to use.
    async fn create_window_info(
        &self,
        window: WindowId,
        properties: WindowInfoProperties,
        properties2: WindowInfoProperties2,
    ) -> Result<Self::WindowInfo, WindowBusError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_decodes_exact_arity_only() {
        assert_eq!(
            Rect::from_reply(&[1, 2, 3, 4]),
            Rect::new(1, 2, 3, 4)
        );
        assert_eq!(Rect::from_reply(&[1, 2, 3]), Rect::default());
        assert_eq!(Rect::from_reply(&[1, 2, 3, 4, 5]), Rect::default());
        assert_eq!(Rect::from_reply(&[]), Rect::default());
    }

    #[test]
    fn empty_rect_reports_empty() {
        assert!(Rect::default().is_empty());
        assert!(Rect::new(0, 0, 10, 0).is_empty());
        assert!(!Rect::new(-5, -5, 10, 10).is_empty());
    }

    #[test]
    fn rect_displays_as_geometry_string() {
        assert_eq!(Rect::new(5, -7, 800, 600).to_string(), "800x600+5+-7");
    }

    #[test]
    fn extended_strut_decodes_exact_arity_only() {
        let decoded = ExtendedStrut::from_reply(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
        assert_eq!(decoded.left_width, 1);
        assert_eq!(decoded.right_width, 4);
        assert_eq!(decoded.top_end, 9);
        assert_eq!(decoded.bottom_end, 12);

        assert_eq!(
            ExtendedStrut::from_reply(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11]),
            ExtendedStrut::default()
        );
        assert_eq!(ExtendedStrut::from_reply(&[]), ExtendedStrut::default());
    }

    #[test]
    fn extended_strut_wire_order_round_trips() {
        let strut = ExtendedStrut {
            left_width: 24,
            left_start: 0,
            left_end: 1080,
            ..ExtendedStrut::default()
        };
        assert_eq!(ExtendedStrut::from_reply(&strut.to_wire()), strut);
    }

    #[test]
    fn window_type_decodes_unknown_discriminants() {
        assert_eq!(WindowType::from_raw(0), WindowType::Normal);
        assert_eq!(WindowType::from_raw(2), WindowType::Dock);
        assert_eq!(WindowType::from_raw(18), WindowType::AppletPopup);
        assert_eq!(WindowType::from_raw(-1), WindowType::Unknown);
        assert_eq!(WindowType::from_raw(99), WindowType::Unknown);
    }

    #[test]
    fn mapping_state_decodes_unknown_discriminants() {
        assert_eq!(MappingState::from_raw(1), MappingState::Visible);
        assert_eq!(MappingState::from_raw(3), MappingState::Iconic);
        assert_eq!(MappingState::from_raw(0), MappingState::Withdrawn);
        assert_eq!(MappingState::from_raw(42), MappingState::Withdrawn);
    }

    #[test]
    fn maximized_is_both_directions() {
        assert_eq!(
            WindowStates::MAXIMIZED,
            WindowStates::MAXIMIZED_VERT | WindowStates::MAXIMIZED_HORIZ
        );
        assert!(WindowStates::MAXIMIZED.contains(WindowStates::MAXIMIZED_VERT));
    }

    #[test]
    fn error_helpers_carry_operation() {
        let error = WindowBusError::message("windows", "bus unreachable");
        assert_eq!(
            error.to_string(),
            "operation `windows` failed: bus unreachable"
        );

        let error = WindowBusError::runtime_unavailable("close");
        assert!(error.to_string().contains("`close`"));
    }
}
