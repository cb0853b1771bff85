//! Listener registration

use crate::gateway::{Listener, ProtocolType};

/// Append `listener` unless one with the same (protocol, port, hostname) is
/// already present.
///
/// The first matching listener wins and existing entries are never renamed.
/// A new listener is named after its protocol and the listener count before
/// it was appended. Returns the name of the appended listener.
pub fn add_listener(listeners: &mut Vec<Listener>, mut listener: Listener) -> Option<String> {
    // TODO: compare TLS settings too; two TLS listeners on the same host with
    // different certificates currently collapse into the first one.
    if listeners.iter().any(|existing| existing.same_binding(&listener)) {
        return None;
    }

    listener.name = listener_name(listener.protocol, listeners.len());
    let name = listener.name.clone();
    listeners.push(listener);
    Some(name)
}

/// `<protocol>-<index>`, e.g. `http-0` or `tls-3`
pub fn listener_name(protocol: ProtocolType, index: usize) -> String {
    format!("{}-{}", protocol.listener_prefix(), index)
}
