//! Bridge from remote window-service signals to local observers.

use std::sync::Arc;

use futures::{StreamExt, stream::BoxStream};
use log::warn;
use tokio::task::JoinHandle;
use winbus_proto::ports::window::{
    WindowBusError, WindowEvent, WindowInfoProperties, WindowInfoProperties2,
};

use crate::{
    adapters::dbus::{BusAddress, WindowSystemProxy, window_system_proxy},
    callbacks::{ObserverId, Observers},
};

const TARGET: &str = "winbus::events";

type EventStream = BoxStream<'static, WindowEvent>;

/// Forwards the window service's signals to registered observers.
///
/// Construction subscribes to the fixed set of named signals; a signal
/// that cannot be subscribed is logged and skipped without affecting the
/// rest. Received signals are reshaped into [`WindowEvent`] values and
/// delivered fire-and-forget, in bus-delivery order. [`close`] (or drop)
/// stops forwarding and clears the observer list.
///
/// [`close`]: WindowEventBridge::close
pub struct WindowEventBridge {
    observers: Arc<Observers<WindowEvent>>,
    forwarder: Option<JoinHandle<()>>,
}

impl WindowEventBridge {
    /// Subscribe against the well-known endpoint.
    pub async fn connect(conn: &zbus::Connection) -> Result<Self, WindowBusError> {
        Self::with_address(conn, &BusAddress::default()).await
    }

    /// Subscribe against a custom endpoint.
    pub async fn with_address(
        conn: &zbus::Connection,
        address: &BusAddress,
    ) -> Result<Self, WindowBusError> {
        let proxy = window_system_proxy(conn, address)
            .await
            .map_err(|err| WindowBusError::backend("event_bridge", err))?;

        let streams = subscribe_all(&proxy).await;
        let observers = Arc::new(Observers::new());
        let forwarder = {
            let observers = Arc::clone(&observers);
            tokio::spawn(async move {
                let mut merged = futures::stream::select_all(streams);
                while let Some(event) = merged.next().await {
                    observers.notify(&event);
                }
            })
        };

        Ok(Self {
            observers,
            forwarder: Some(forwarder),
        })
    }

    /// Register an observer for every forwarded event.
    pub fn register<F>(&self, callback: F) -> ObserverId
    where
        F: Fn(&WindowEvent) + Send + Sync + 'static,
    {
        self.observers.register(callback)
    }

    /// Remove a previously registered observer.
    pub fn unregister(&self, id: ObserverId) -> bool {
        self.observers.unregister(id)
    }

    /// Number of registered observers.
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Stop forwarding and clear every observer.
    ///
    /// Dropping the signal streams deregisters the bus matches; clearing
    /// the observers guarantees that an event already in flight reaches
    /// nobody.
    pub fn close(&mut self) {
        if let Some(task) = self.forwarder.take() {
            task.abort();
        }
        self.observers.clear();
    }
}

impl Drop for WindowEventBridge {
    fn drop(&mut self) {
        self.close();
    }
}

/// Attempt to subscribe to each named signal; failures warn and are
/// skipped so the remaining signals still come through.
async fn subscribe_all(proxy: &WindowSystemProxy<'static>) -> Vec<EventStream> {
    let mut streams: Vec<EventStream> = Vec::new();

    match proxy.receive_active_window_changed().await {
        Ok(stream) => streams.push(
            stream
                .filter_map(|signal| async move {
                    signal
                        .args()
                        .ok()
                        .map(|args| WindowEvent::ActiveWindowChanged(args.window))
                })
                .boxed(),
        ),
        Err(err) => warn_subscription("activeWindowChanged", err),
    }

    match proxy.receive_current_desktop_changed().await {
        Ok(stream) => streams.push(
            stream
                .filter_map(|signal| async move {
                    signal
                        .args()
                        .ok()
                        .map(|args| WindowEvent::CurrentDesktopChanged(args.desktop))
                })
                .boxed(),
        ),
        Err(err) => warn_subscription("currentDesktopChanged", err),
    }

    match proxy.receive_desktop_names_changed().await {
        Ok(stream) => {
            streams.push(stream.map(|_| WindowEvent::DesktopNamesChanged).boxed());
        }
        Err(err) => warn_subscription("desktopNamesChanged", err),
    }

    match proxy.receive_number_of_desktops_changed().await {
        Ok(stream) => streams.push(
            stream
                .filter_map(|signal| async move {
                    signal
                        .args()
                        .ok()
                        .map(|args| WindowEvent::NumberOfDesktopsChanged(args.count))
                })
                .boxed(),
        ),
        Err(err) => warn_subscription("numberOfDesktopsChanged", err),
    }

    match proxy.receive_showing_desktop_changed().await {
        Ok(stream) => streams.push(
            stream
                .filter_map(|signal| async move {
                    signal
                        .args()
                        .ok()
                        .map(|args| WindowEvent::ShowingDesktopChanged(args.showing))
                })
                .boxed(),
        ),
        Err(err) => warn_subscription("showingDesktopChanged", err),
    }

    match proxy.receive_stacking_order_changed().await {
        Ok(stream) => {
            streams.push(stream.map(|_| WindowEvent::StackingOrderChanged).boxed());
        }
        Err(err) => warn_subscription("stackingOrderChanged", err),
    }

    match proxy.receive_window_added().await {
        Ok(stream) => streams.push(
            stream
                .filter_map(|signal| async move {
                    signal
                        .args()
                        .ok()
                        .map(|args| WindowEvent::WindowAdded(args.window))
                })
                .boxed(),
        ),
        Err(err) => warn_subscription("windowAdded", err),
    }

    match proxy.receive_window_changed().await {
        Ok(stream) => streams.push(
            stream
                .filter_map(|signal| async move {
                    signal.args().ok().map(|args| WindowEvent::WindowChanged {
                        window: args.window,
                        properties: WindowInfoProperties::from_bits_truncate(args.properties),
                        properties2: WindowInfoProperties2::from_bits_truncate(args.properties2),
                    })
                })
                .boxed(),
        ),
        Err(err) => warn_subscription("windowChanged", err),
    }

    match proxy.receive_window_removed().await {
        Ok(stream) => streams.push(
            stream
                .filter_map(|signal| async move {
                    signal
                        .args()
                        .ok()
                        .map(|args| WindowEvent::WindowRemoved(args.window))
                })
                .boxed(),
        ),
        Err(err) => warn_subscription("windowRemoved", err),
    }

    match proxy.receive_work_area_changed().await {
        Ok(stream) => {
            streams.push(stream.map(|_| WindowEvent::WorkAreaChanged).boxed());
        }
        Err(err) => warn_subscription("workAreaChanged", err),
    }

    streams
}

fn warn_subscription(signal: &'static str, err: zbus::Error) {
    warn!(
        target: TARGET,
        "cannot subscribe to window service signal (signal={signal}, error={err})"
    );
}
