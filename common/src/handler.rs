//! [`Handler`] abstraction shared by commands, queries and storages.

use std::future::Future;

/// Asynchronous handler of `Args`.
///
/// Every command, query and storage operation is a [`Handler`]
/// implementation over its argument type, which lets callers express
/// required capabilities as trait bounds.
pub trait Handler<Args = ()> {
    /// Successful outcome of this [`Handler`].
    type Ok;

    /// Failure of this [`Handler`].
    type Err;

    /// Handles the provided `args`.
    fn execute(
        &self,
        args: Args,
    ) -> impl Future<Output = Result<Self::Ok, Self::Err>>;
}
