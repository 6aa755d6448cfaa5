//! Guard rejection to gRPC status mapping

use tonic::{metadata::MetadataValue, Status};

use tt_core::errors::{AuthError, RejectionKind};

/// Map a rejection to its status code, carrying only the public message
pub fn rejection_status(rejection: &AuthError) -> Status {
    let message = rejection.public_message();
    match rejection.rejection_kind() {
        RejectionKind::Unauthenticated => Status::unauthenticated(message),
        RejectionKind::ResourceExhausted => {
            let mut status = Status::resource_exhausted(message);
            if let Some(seconds) = rejection.retry_after_seconds() {
                status
                    .metadata_mut()
                    .insert("retry-after", MetadataValue::from(seconds));
            }
            status
        }
        RejectionKind::Internal => Status::internal(message),
    }
}
