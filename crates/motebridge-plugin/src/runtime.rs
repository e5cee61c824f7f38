use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{select, Receiver};

use motebridge_hid::{Device, ExtensionReceiver, StateReceiver};

use crate::hotplug;
use crate::translate::Translator;

/// Starts the per-binding event thread.
///
/// Drains the device's two change-notification streams until stopped or the
/// transport closes them. State events feed the translator; extension events
/// are applied synchronously so the following state events are decoded under
/// the correct report mode. Exiting the thread drops both receivers, which
/// unsubscribes them from the transport.
pub(crate) fn start_event_thread(
    device: Arc<dyn Device>,
    state_rx: StateReceiver,
    ext_rx: ExtensionReceiver,
    stop_rx: Receiver<()>,
    mut translator: Translator,
) -> JoinHandle<()> {
    thread::spawn(move || loop {
        select! {
            recv(stop_rx) -> _ => break,
            recv(state_rx) -> msg => match msg {
                Ok(event) => {
                    if let Err(e) = translator.handle_event(&event) {
                        log::debug!("state event dropped: {e}");
                    }
                }
                Err(_) => break,
            },
            recv(ext_rx) -> msg => match msg {
                Ok(change) => hotplug::apply(&device, change),
                Err(_) => break,
            },
        }
    })
}
