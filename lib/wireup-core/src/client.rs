//! Transport trait.
//!
//! The pipeline never speaks HTTP itself: it hands the finished request to a
//! [`Transport`], an opaque capability supplied by the calling layer.
//! Connection pooling, TLS, and redirects all live behind this boundary.

use std::future::Future;

use bytes::Bytes;
use tokio_util::sync::CancellationToken;

use crate::{Request, Response, Result};

/// Opaque request-sending capability.
///
/// Implementations should be safe for concurrent use; every invocation gets
/// its own request and cancellation token, and nothing else is shared.
///
/// # Example
///
/// ```ignore
/// struct HyperTransport { /* pooled connections */ }
///
/// impl Transport for HyperTransport {
///     fn send(
///         &self,
///         request: Request<Bytes>,
///         cancel: CancellationToken,
///     ) -> impl Future<Output = Result<Response<Bytes>>> + Send {
///         async move {
///             tokio::select! {
///                 () = cancel.cancelled() => Err(Error::Cancelled),
///                 response = self.dispatch(request) => response,
///             }
///         }
///     }
/// }
/// ```
pub trait Transport: Send + Sync {
    /// Send the request and return the response.
    ///
    /// The token is the invocation's cancellation signal; a transport that
    /// observes it should abort and surface [`crate::Error::Cancelled`].
    ///
    /// # Errors
    ///
    /// Returns an error on network failure, non-recoverable protocol
    /// errors, or cancellation.
    fn send(
        &self,
        request: Request<Bytes>,
        cancel: CancellationToken,
    ) -> impl Future<Output = Result<Response<Bytes>>> + Send;
}
