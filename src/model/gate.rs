use crate::model::policy::PasswordStatus;

///
/// What the caller should do with the current request - decided once, before the
/// request reaches any other handler.
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Gate {
    /// Let the request through untouched.
    Proceed,
    /// Let the request through and queue an expiry warning notice.
    Warn,
    /// Short-circuit the request with a redirect to the change-password endpoint.
    Redirect,
}

///
/// The shape of the inbound request, as resolved by the caller's router.
///
#[derive(Clone, Debug)]
pub struct RequestInfo<'a> {
    pub endpoint: &'a str,
    pub method: &'a str,
    pub is_async: bool,
}

///
/// Everything the gate needs to know about the authenticated identity's password.
///
#[derive(Clone, Debug)]
pub struct IdentityState {
    pub status: PasswordStatus,
    pub must_change: bool,
}

///
/// Endpoints exempt from interception.
///
#[derive(Clone, Debug)]
pub struct Exemptions<'a> {
    pub change_endpoint: &'a str,
    pub logout_endpoint: &'a str,
}

///
/// The gate decision - a pure function of the request, the identity state and the
/// exemption list, so it can be tested without a running server.
///
pub fn decide(request: &RequestInfo, identity: Option<&IdentityState>, exemptions: &Exemptions) -> Gate {

    let identity = match identity {
        Some(identity) => identity,
        None => return Gate::Proceed,
    };

    // The change-password endpoint is always exempt, otherwise the user could never
    // reach the form that clears the must-change state.
    if request.endpoint == exemptions.change_endpoint {
        return Gate::Proceed
    }

    // A login against an expired password pins the user to the change flow until the
    // flag is cleared by a successful change - regardless of the status computed now.
    if identity.must_change {
        return Gate::Redirect
    }

    match identity.status {
        PasswordStatus::Expired => Gate::Redirect,
        PasswordStatus::ExpiringSoon if page_for_warning(request, exemptions) => Gate::Warn,
        _ => Gate::Proceed,
    }
}

///
/// Only warn on pages that are GET requests and not asynchronous calls. Also ignore logouts.
///
fn page_for_warning(request: &RequestInfo, exemptions: &Exemptions) -> bool {
    request.method.eq_ignore_ascii_case("GET")
        && !request.is_async
        && request.endpoint != exemptions.logout_endpoint
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXEMPTIONS: Exemptions<'static> = Exemptions {
        change_endpoint: "password_change",
        logout_endpoint: "logout",
    };

    fn page(endpoint: &str) -> RequestInfo {
        RequestInfo { endpoint, method: "GET", is_async: false }
    }

    fn identity(status: PasswordStatus, must_change: bool) -> IdentityState {
        IdentityState { status, must_change }
    }

    #[test]
    fn test_unauthenticated_requests_proceed() {
        assert_eq!(decide(&page("dashboard"), None, &EXEMPTIONS), Gate::Proceed);
    }

    #[test]
    fn test_a_valid_password_proceeds() {
        let identity = identity(PasswordStatus::Valid, false);
        assert_eq!(decide(&page("dashboard"), Some(&identity), &EXEMPTIONS), Gate::Proceed);
    }

    #[test]
    fn test_an_expired_password_redirects() {
        let identity = identity(PasswordStatus::Expired, false);
        assert_eq!(decide(&page("dashboard"), Some(&identity), &EXEMPTIONS), Gate::Redirect);
    }

    #[test]
    fn test_the_change_endpoint_is_never_redirected() {
        // Otherwise the user could never reach the form that ends the loop.
        let identity = identity(PasswordStatus::Expired, true);
        assert_eq!(decide(&page("password_change"), Some(&identity), &EXEMPTIONS), Gate::Proceed);
    }

    #[test]
    fn test_the_must_change_flag_overrides_a_valid_status() {
        let identity = identity(PasswordStatus::Valid, true);
        assert_eq!(decide(&page("dashboard"), Some(&identity), &EXEMPTIONS), Gate::Redirect);
    }

    #[test]
    fn test_a_password_expiring_soon_warns_on_a_page_load() {
        let identity = identity(PasswordStatus::ExpiringSoon, false);
        assert_eq!(decide(&page("dashboard"), Some(&identity), &EXEMPTIONS), Gate::Warn);
    }

    #[test]
    fn test_no_warning_on_posts() {
        let identity = identity(PasswordStatus::ExpiringSoon, false);
        let request = RequestInfo { endpoint: "dashboard", method: "POST", is_async: false };
        assert_eq!(decide(&request, Some(&identity), &EXEMPTIONS), Gate::Proceed);
    }

    #[test]
    fn test_no_warning_on_asynchronous_calls() {
        let identity = identity(PasswordStatus::ExpiringSoon, false);
        let request = RequestInfo { endpoint: "dashboard", method: "GET", is_async: true };
        assert_eq!(decide(&request, Some(&identity), &EXEMPTIONS), Gate::Proceed);
    }

    #[test]
    fn test_no_warning_on_logout() {
        let identity = identity(PasswordStatus::ExpiringSoon, false);
        assert_eq!(decide(&page("logout"), Some(&identity), &EXEMPTIONS), Gate::Proceed);
    }

    #[test]
    fn test_no_warning_on_the_change_endpoint_itself() {
        let identity = identity(PasswordStatus::ExpiringSoon, false);
        assert_eq!(decide(&page("password_change"), Some(&identity), &EXEMPTIONS), Gate::Proceed);
    }

    #[test]
    fn test_expiry_still_redirects_non_page_requests() {
        // Only the warning is restricted to safe page loads - enforcement is not.
        let identity = identity(PasswordStatus::Expired, false);
        let request = RequestInfo { endpoint: "api_data", method: "POST", is_async: true };
        assert_eq!(decide(&request, Some(&identity), &EXEMPTIONS), Gate::Redirect);
    }
}
