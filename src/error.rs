use thiserror::Error;

use crate::ir::FunctionId;

/// The generic Error type, which provides coverage for all errors this
/// library can potentially return.
///
/// The surface is deliberately small. The analyses themselves are
/// best-effort: a value whose offset cannot be recovered or an access the
/// scan does not understand is silently left alone, degrading to a missed
/// optimization rather than an error. What remains are structural
/// problems with the input that the driver refuses to work on.
#[derive(Error, Debug)]
pub enum Error {
    /// The function's first argument is not a register-state pointer.
    ///
    /// Lifted functions receive the register-state structure by pointer
    /// as their first argument. A function without one cannot be
    /// analyzed; the front end that produced it is broken.
    #[error("Function '{0}' has no register-state pointer argument")]
    MissingStatePointer(String),

    /// The given function id does not name a function of the module.
    #[error("Function {0} does not exist in this module")]
    UnknownFunction(FunctionId),
}
