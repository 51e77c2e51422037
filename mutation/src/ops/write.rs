//! Label writes.

use kin_core::{MutationStore, RecordId};
use tracing::warn;

use crate::result::{FailureReason, OperationResult};

/// Write `to` into the branch field of `record`.
///
/// With `verify`, the field is read back first and must still equal `from`,
/// the value the plan was built against.
pub(crate) fn execute_write<S: MutationStore + ?Sized>(
    store: &mut S,
    record: &RecordId,
    from: &str,
    to: &str,
    verify: bool,
    result: &mut OperationResult,
) {
    if verify {
        match store.read_label(record) {
            Ok(found) if found != from => {
                warn!(%record, expected = from, %found, "label changed since planning");
                result.record_failed(
                    record.clone(),
                    FailureReason::StaleLabel {
                        expected: from.to_string(),
                        found,
                    },
                );
                return;
            }
            Ok(_) => {}
            Err(e) => {
                warn!(%record, error = %e, "label read failed");
                result.record_failed(record.clone(), e);
                return;
            }
        }
    }

    match store.write_label(record, to) {
        Ok(()) => result.record_updated(record.clone()),
        Err(e) => {
            warn!(%record, error = %e, "label write failed");
            result.record_failed(record.clone(), e);
        }
    }
}
