use crate::session::SessionState;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Dashboard,
    Transactions,
    Wallets,
    Categories,
}

impl Route {
    /// Screens reachable from the navigation bar, in display order.
    pub const NAV: [Route; 4] = [
        Route::Dashboard,
        Route::Transactions,
        Route::Wallets,
        Route::Categories,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Dashboard => "/",
            Self::Transactions => "/transaction",
            Self::Wallets => "/wallets",
            Self::Categories => "/categories",
        }
    }

    /// Unknown paths fall through to the dashboard.
    pub fn parse(path: &str) -> Self {
        let path = path.trim();
        let path = if path.len() > 1 {
            path.trim_end_matches('/')
        } else {
            path
        };
        match path {
            "/login" => Self::Login,
            "/transaction" => Self::Transactions,
            "/wallets" => Self::Wallets,
            "/categories" => Self::Categories,
            _ => Self::Dashboard,
        }
    }

    pub fn is_protected(self) -> bool {
        !matches!(self, Self::Login)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Login => "Đăng nhập",
            Self::Dashboard => "Tổng quan",
            Self::Transactions => "Giao dịch",
            Self::Wallets => "Ví",
            Self::Categories => "Danh mục",
        }
    }
}

/// Outcome of gating a navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Guard {
    /// Session not restored yet; show a loading indicator.
    Pending,
    Allow(Route),
    Redirect(Route),
}

pub fn guard(route: Route, state: SessionState) -> Guard {
    if state.loading {
        Guard::Pending
    } else if route.is_protected() && !state.authenticated {
        Guard::Redirect(Route::Login)
    } else {
        Guard::Allow(route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const READY: SessionState = SessionState {
        authenticated: true,
        loading: false,
    };
    const ANON: SessionState = SessionState {
        authenticated: false,
        loading: false,
    };

    #[test]
    fn parse_round_trips_and_falls_back() {
        for route in [
            Route::Login,
            Route::Dashboard,
            Route::Transactions,
            Route::Wallets,
            Route::Categories,
        ] {
            assert_eq!(Route::parse(route.path()), route);
        }
        assert_eq!(Route::parse("/nope"), Route::Dashboard);
        assert_eq!(Route::parse("/wallets/"), Route::Wallets);
    }

    #[test]
    fn guard_redirects_anonymous_users() {
        assert_eq!(guard(Route::Wallets, ANON), Guard::Redirect(Route::Login));
        assert_eq!(guard(Route::Login, ANON), Guard::Allow(Route::Login));
        assert_eq!(guard(Route::Wallets, READY), Guard::Allow(Route::Wallets));
    }

    #[test]
    fn guard_waits_for_restore() {
        let loading = SessionState {
            authenticated: false,
            loading: true,
        };
        assert_eq!(guard(Route::Dashboard, loading), Guard::Pending);
    }
}
