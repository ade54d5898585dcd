//! Routes
//!
//! Hash-based routing (`#/admin/members`) and the guard decision shared by
//! `AdminGuard` and `MemberGuard`.

use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    // Public
    Home,
    PublicDeposits,
    PublicLoans,
    PublicVdf,
    PublicVdfContributions,
    PublicVdfExpenses,
    AdminLogin,
    MemberLogin,
    // Admin
    Members,
    Deposits,
    Loans,
    Statements,
    Reports,
    VdfFamilies,
    VdfContributions,
    VdfExpenses,
    VdfDeposits,
    VdfNotifications,
    Sessions,
    // Member
    MemberDashboard,
}

/// Which session a route requires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Admin,
    Member,
}

const ROUTES: &[(Route, &str)] = &[
    (Route::Home, "/"),
    (Route::PublicDeposits, "/deposits"),
    (Route::PublicLoans, "/loans"),
    (Route::PublicVdf, "/vdf"),
    (Route::PublicVdfContributions, "/vdf/contributions"),
    (Route::PublicVdfExpenses, "/vdf/expenses"),
    (Route::AdminLogin, "/login"),
    (Route::MemberLogin, "/member/login"),
    (Route::Members, "/admin/members"),
    (Route::Deposits, "/admin/deposits"),
    (Route::Loans, "/admin/loans"),
    (Route::Statements, "/admin/statements"),
    (Route::Reports, "/admin/reports"),
    (Route::VdfFamilies, "/admin/vdf/families"),
    (Route::VdfContributions, "/admin/vdf/contributions"),
    (Route::VdfExpenses, "/admin/vdf/expenses"),
    (Route::VdfDeposits, "/admin/vdf/deposits"),
    (Route::VdfNotifications, "/admin/vdf/notifications"),
    (Route::Sessions, "/admin/sessions"),
    (Route::MemberDashboard, "/member/dashboard"),
];

impl Route {
    /// Parse a path (with or without leading `#`); unknown paths give `None`
    pub fn parse(raw: &str) -> Option<Route> {
        let path = raw.trim_start_matches('#');
        let path = path.split(['?', '#']).next().unwrap_or("");
        let path = path.trim_end_matches('/');
        let path = if path.is_empty() { "/" } else { path };
        ROUTES.iter().find(|(_, p)| *p == path).map(|(route, _)| *route)
    }

    pub fn path(&self) -> &'static str {
        ROUTES
            .iter()
            .find(|(route, _)| route == self)
            .map(|(_, path)| *path)
            .unwrap_or("/")
    }

    pub fn href(&self) -> String {
        format!("#{}", self.path())
    }

    pub fn access(&self) -> Access {
        match self {
            Route::Home
            | Route::PublicDeposits
            | Route::PublicLoans
            | Route::PublicVdf
            | Route::PublicVdfContributions
            | Route::PublicVdfExpenses
            | Route::AdminLogin
            | Route::MemberLogin => Access::Public,
            Route::MemberDashboard => Access::Member,
            _ => Access::Admin,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Summary",
            Route::PublicDeposits => "Deposits",
            Route::PublicLoans => "Loans",
            Route::PublicVdf => "Village Development Fund",
            Route::PublicVdfContributions => "VDF Contributions",
            Route::PublicVdfExpenses => "VDF Expenses",
            Route::AdminLogin => "Login",
            Route::MemberLogin => "Member Login",
            Route::Members => "Members",
            Route::Deposits => "Deposits",
            Route::Loans => "Loans",
            Route::Statements => "Statements",
            Route::Reports => "Reports",
            Route::VdfFamilies => "VDF Families",
            Route::VdfContributions => "VDF Contributions",
            Route::VdfExpenses => "VDF Expenses",
            Route::VdfDeposits => "VDF Deposits",
            Route::VdfNotifications => "VDF Notifications",
            Route::Sessions => "Sessions",
            Route::MemberDashboard => "My Dashboard",
        }
    }
}

/// What a guard renders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    Loading,
    Redirect(Route),
    Render,
}

/// Loading wins over everything; then unauthenticated redirects to login
pub fn guard_outcome(loading: bool, authenticated: bool, login: Route) -> GuardOutcome {
    if loading {
        GuardOutcome::Loading
    } else if !authenticated {
        GuardOutcome::Redirect(login)
    } else {
        GuardOutcome::Render
    }
}

// ========================
// Router context
// ========================

fn current_hash() -> String {
    web_sys::window()
        .and_then(|w| w.location().hash().ok())
        .unwrap_or_default()
}

/// Router state provided via context
#[derive(Clone, Copy)]
pub struct Router {
    current: RwSignal<Route>,
}

impl Router {
    /// Create the router, follow `hashchange`, and provide it to children
    pub fn provide() -> Self {
        let router = Self { current: RwSignal::new(Route::Home) };
        router.sync_from_location();

        let handle = window_event_listener(leptos::ev::hashchange, move |_| {
            router.sync_from_location();
        });
        on_cleanup(move || handle.remove());

        provide_context(router);
        router
    }

    /// Unknown paths redirect to the root route
    fn sync_from_location(&self) {
        let hash = current_hash();
        match Route::parse(&hash) {
            Some(route) => self.current.set(route),
            None => {
                log::debug!("[ROUTER] unknown path {:?}, redirecting to /", hash);
                self.navigate(Route::Home);
            }
        }
    }

    pub fn current(&self) -> Route {
        self.current.get()
    }

    pub fn navigate(&self, route: Route) {
        if let Some(window) = web_sys::window() {
            if window.location().set_hash(route.path()).is_err() {
                log::warn!("[ROUTER] failed to set location hash");
            }
        }
        self.current.set(route);
    }
}

pub fn use_router() -> Router {
    expect_context::<Router>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_and_unknown_paths() {
        assert_eq!(Route::parse(""), Some(Route::Home));
        assert_eq!(Route::parse("#/"), Some(Route::Home));
        assert_eq!(Route::parse("#/admin/vdf/families/"), Some(Route::VdfFamilies));
        assert_eq!(Route::parse("/member/dashboard?tab=docs"), Some(Route::MemberDashboard));
        assert_eq!(Route::parse("#/nope"), None);
    }

    #[test]
    fn test_every_route_roundtrips_through_its_path() {
        for (route, _) in ROUTES {
            assert_eq!(Route::parse(route.path()), Some(*route));
        }
    }

    #[test]
    fn test_access_split() {
        assert_eq!(Route::Sessions.access(), Access::Admin);
        assert_eq!(Route::MemberDashboard.access(), Access::Member);
        assert_eq!(Route::PublicVdf.access(), Access::Public);
    }

    #[test]
    fn test_guard_loading_wins_regardless_of_auth() {
        assert_eq!(guard_outcome(true, false, Route::AdminLogin), GuardOutcome::Loading);
        assert_eq!(guard_outcome(true, true, Route::AdminLogin), GuardOutcome::Loading);
    }

    #[test]
    fn test_guard_redirects_or_renders() {
        assert_eq!(
            guard_outcome(false, false, Route::MemberLogin),
            GuardOutcome::Redirect(Route::MemberLogin)
        );
        assert_eq!(guard_outcome(false, true, Route::AdminLogin), GuardOutcome::Render);
    }
}
