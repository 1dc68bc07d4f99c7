//! Ownership policy deciding who may act on notes and comments.
//!
//! Anonymous principals are sent to the login page for anything that is not a
//! public read. Authenticated principals acting on an entity they do not own
//! receive the same answer as for a missing entity, so private slugs and ids
//! cannot be probed.

use super::{Error, Principal, UserId};

/// Operation a principal is attempting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Public pages: the news home page and news detail.
    ViewPublic,
    /// Pages scoped to the principal, such as their own note list.
    ViewList,
    /// Creating a new entity.
    Create,
    /// Viewing a single owned entity.
    ViewDetail,
    /// Changing an owned entity.
    Edit,
    /// Removing an owned entity.
    Delete,
}

impl Action {
    const fn requires_login(self) -> bool {
        !matches!(self, Self::ViewPublic)
    }

    const fn requires_ownership(self) -> bool {
        matches!(self, Self::ViewDetail | Self::Edit | Self::Delete)
    }
}

/// Outcome of an authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The principal may proceed.
    Allow,
    /// Respond as if the entity does not exist.
    DenyNotFound,
    /// Send the principal to the login page.
    DenyRedirectLogin,
}

impl Decision {
    /// Convert the decision into a domain result.
    ///
    /// `DenyRedirectLogin` maps to [`super::ErrorCode::Unauthorized`], which
    /// the HTTP adapter turns into a login redirect.
    ///
    /// # Errors
    /// Returns a `not_found` or `unauthorized` error for the deny outcomes.
    pub fn into_result(self, entity: &str) -> Result<(), Error> {
        match self {
            Self::Allow => Ok(()),
            Self::DenyNotFound => Err(Error::not_found(format!("{entity} not found"))),
            Self::DenyRedirectLogin => Err(Error::unauthorized("login required")),
        }
    }
}

/// Decide whether `principal` may perform `action`.
///
/// `owner` is the author of the target entity, or `None` when the action has
/// no target or the target does not exist.
///
/// # Examples
/// ```
/// use noticeboard::domain::{Action, Decision, Principal, UserId, authorize};
///
/// let author = UserId::random();
/// let reader = Principal::Authenticated(UserId::random());
/// assert_eq!(authorize(&reader, Some(&author), Action::Edit), Decision::DenyNotFound);
/// assert_eq!(authorize(&Principal::Anonymous, None, Action::Create), Decision::DenyRedirectLogin);
/// ```
#[must_use]
pub fn authorize(principal: &Principal, owner: Option<&UserId>, action: Action) -> Decision {
    if !action.requires_login() {
        return Decision::Allow;
    }
    let Some(user_id) = principal.user_id() else {
        return Decision::DenyRedirectLogin;
    };
    if !action.requires_ownership() {
        return Decision::Allow;
    }
    match owner {
        Some(owner) if owner == user_id => Decision::Allow,
        _ => Decision::DenyNotFound,
    }
}

/// Authorize an action that has no target entity and return the acting user.
///
/// Use for [`Action::Create`] and [`Action::ViewList`].
///
/// # Errors
/// Returns `unauthorized` for anonymous principals.
pub fn acting_user(principal: &Principal, action: Action) -> Result<&UserId, Error> {
    authorize(principal, None, action).into_result("resource")?;
    principal
        .user_id()
        .ok_or_else(|| Error::unauthorized("login required"))
}
