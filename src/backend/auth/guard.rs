/**
 * Authorization Guard
 *
 * Ownership check applied before every edit and delete. Reads are public
 * and never reach the guard. Callers resolve the resource first, so a
 * missing resource surfaces as `NotFound` before ownership is considered.
 */

use crate::backend::auth::users::User;
use crate::backend::error::BackendError;

/// A resource owned by exactly one identity
pub trait OwnedResource {
    /// Username of the owning identity
    fn owner_username(&self) -> &str;
}

/// Allow the mutation only if `identity` owns `resource`
pub fn assert_owner<R: OwnedResource + ?Sized>(identity: &User, resource: &R) -> Result<(), BackendError> {
    if identity.username == resource.owner_username() {
        Ok(())
    } else {
        tracing::warn!("{} attempted to modify a resource they do not own", identity.username);
        Err(BackendError::NotAuthorized)
    }
}
