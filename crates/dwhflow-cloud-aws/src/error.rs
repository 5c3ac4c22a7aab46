//! Mapping of AWS SDK errors onto the provider-neutral taxonomy

use aws_sdk_iam::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use dwhflow_cloud::CloudError;

/// Convert any SDK operation error into a `CloudError`
///
/// Timeouts and dispatch failures are transient; service errors are
/// classified by their error code.
pub(crate) fn from_sdk<E, R>(operation: &str, err: SdkError<E, R>) -> CloudError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    match &err {
        SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) => {
            CloudError::Transient(format!("{}: {}", operation, DisplayErrorContext(&err)))
        }
        _ => {
            let service = err.as_service_error();
            let code = service.and_then(|e| e.code());
            let message = service
                .and_then(|e| e.message())
                .map(str::to_string)
                .unwrap_or_else(|| DisplayErrorContext(&err).to_string());
            CloudError::from_code(code, format!("{} ({})", message, operation))
        }
    }
}
