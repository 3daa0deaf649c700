//! Out-of-process native crash capture.
//!
//! [`init`] re-launches the current executable as a crash reporter process.
//! When the app process faults, the reporter receives a minidump over IPC and
//! sends it to Sentry as a fatal event with the dump attached.

use crate::FLUSH_TIMEOUT;
use minidumper_child::{ClientHandle, Error, MinidumperChild};
use sentry::{
    protocol::{Attachment, AttachmentType, Event, Value},
    Level,
};
use std::path::Path;

#[cfg(feature = "ipc")]
const SCOPE_MESSAGE_KIND: u32 = 1;

/// Keeps the crash reporter attached. Must live until the program exits.
pub struct Handle {
    #[cfg_attr(not(feature = "ipc"), allow(dead_code))]
    client: ClientHandle,
}

impl Handle {
    #[cfg(feature = "ipc")]
    pub(crate) fn send(&self, message: &ScopeMessage) {
        let buffer = match serde_json::to_vec(message) {
            Ok(buffer) => buffer,
            Err(e) => {
                tracing::warn!("could not encode scope message: {e}");
                return;
            }
        };

        if self.client.send_message(SCOPE_MESSAGE_KIND, &buffer).is_err() {
            tracing::warn!("could not forward scope message to crash reporter");
        }
    }
}

/// Scope changes replayed in the crash reporter process so that the minidump
/// event carries the same context as the app process.
#[cfg(feature = "ipc")]
#[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum ScopeMessage {
    SetTag(String, String),
    RemoveTag(String),
    SetExtra(String, Value),
}

#[cfg(feature = "ipc")]
impl ScopeMessage {
    fn apply(self) {
        match self {
            ScopeMessage::SetTag(k, v) => sentry::configure_scope(|scope| scope.set_tag(&k, v)),
            ScopeMessage::RemoveTag(k) => sentry::configure_scope(|scope| scope.remove_tag(&k)),
            ScopeMessage::SetExtra(k, v) => {
                sentry::configure_scope(|scope| scope.set_extra(&k, v))
            }
        }
    }
}

#[cfg(feature = "ipc")]
fn on_message(kind: u32, buffer: Vec<u8>) {
    if kind != SCOPE_MESSAGE_KIND {
        return;
    }

    match serde_json::from_slice::<ScopeMessage>(&buffer) {
        Ok(message) => message.apply(),
        Err(e) => tracing::warn!("dropping malformed scope message: {e}"),
    }
}

fn attachment_from_minidump(buffer: Vec<u8>, path: &Path) -> Attachment {
    Attachment {
        filename: path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "minidump.dmp".to_string()),
        ty: Some(AttachmentType::Minidump),
        buffer,
        content_type: None,
    }
}

/// Runs in the crash reporter process once the dump has been written.
pub(crate) fn capture_minidump(buffer: Vec<u8>, path: &Path) {
    tracing::info!(bytes = buffer.len(), "received minidump from app process");
    let attachment = attachment_from_minidump(buffer, path);

    sentry::with_scope(
        |scope| {
            // Make it obvious the event was sent by the reporter on behalf of
            // the crashed app process
            scope.set_extra("event.process", Value::String("crash-reporter".to_string()));
            scope.add_attachment(attachment);
        },
        || {
            sentry::capture_event(Event {
                level: Level::Fatal,
                ..Default::default()
            })
        },
    );

    // The reporter process exits as soon as this returns
    if let Some(client) = sentry::Hub::current().client() {
        client.flush(Some(FLUSH_TIMEOUT));
    }
}

/// Everything before this call runs in both the app and crash reporter
/// processes. In the crash reporter process it never returns.
pub fn init() -> Result<Handle, Error> {
    let child =
        MinidumperChild::new().on_minidump(|buffer, path| capture_minidump(buffer, &path));

    #[cfg(feature = "ipc")]
    let child = child.on_message(|kind, buffer| on_message(kind, buffer));

    let client = child.spawn()?;

    Ok(Handle { client })
}
