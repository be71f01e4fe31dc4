//! Access rules over the authenticated caller.
//!
//! - No IO
//! - Ownership, visibility and membership facts are passed in by the caller

use crate::auth::AuthContext;
use crate::error::AppError;
use crate::errors::ErrorCode;

/// Caller owns the resource.
pub fn require_owner(ctx: &AuthContext, owner_id: i64) -> Result<(), AppError> {
    if ctx.user_id() == owner_id {
        Ok(())
    } else {
        Err(AppError::forbidden(
            ErrorCode::NotOwner,
            "Only the owner may modify this resource",
        ))
    }
}

/// Caller owns the resource or holds the ADMIN authority.
pub fn require_owner_or_admin(ctx: &AuthContext, owner_id: i64) -> Result<(), AppError> {
    if ctx.is_admin() {
        return Ok(());
    }
    require_owner(ctx, owner_id)
}

/// Public resources are visible to everyone; private ones only to their owner.
///
/// Anonymous callers asking for a private resource get `Unauthorized` so
/// clients know that signing in could help.
pub fn require_visible(
    ctx: Option<&AuthContext>,
    owner_id: i64,
    is_public: bool,
) -> Result<(), AppError> {
    if is_public {
        return Ok(());
    }
    match ctx {
        None => Err(AppError::unauthorized()),
        Some(ctx) if ctx.user_id() == owner_id => Ok(()),
        Some(_) => Err(AppError::forbidden(
            ErrorCode::Forbidden,
            "This memory is private",
        )),
    }
}

/// Caller belongs to the group.
pub fn require_member(is_member: bool) -> Result<(), AppError> {
    if is_member {
        Ok(())
    } else {
        Err(AppError::forbidden(
            ErrorCode::NotAMember,
            "You are not a member of this group",
        ))
    }
}

/// Caller belongs to the group or holds the ADMIN authority.
pub fn require_member_or_admin(ctx: &AuthContext, is_member: bool) -> Result<(), AppError> {
    if ctx.is_admin() {
        return Ok(());
    }
    require_member(is_member)
}
