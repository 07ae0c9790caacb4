//! Command dispatcher: payload → pin writes.

use crate::domain::{Command, PinWrite};
use crate::gpio::OutputPins;

/// Applies `payload` to `pins` and returns the writes performed.
///
/// Recognized commands write exactly [`Command::writes`]; anything else is
/// a silent no-op and returns an empty vector. A write the backend rejects
/// is logged and otherwise ignored; it still appears in the result, since
/// nothing is read back.
pub fn dispatch<P: OutputPins + ?Sized>(payload: &str, pins: &mut P) -> Vec<PinWrite> {
    let Some(command) = Command::parse(payload) else {
        tracing::debug!(payload = ?payload, "unrecognized command ignored");
        return Vec::new();
    };

    let writes = command.writes();
    for write in &writes {
        if let Err(err) = pins.write(write.role, write.level) {
            tracing::warn!(%command, role = %write.role, level = %write.level, error = %err, "pin write failed");
        }
    }
    tracing::debug!(%command, writes = writes.len(), "command dispatched");
    writes
}
