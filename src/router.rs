// ============================================================================
// ROUTER - Hash routes for the public site and the portal
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    About,
    Admissions,
    Academics,
    Contact,
    Gallery,
    News,
    Login,
    Dashboard,
    NotFound,
}

impl Route {
    /// Pages listed in the site navigation, in display order
    pub const NAVIGATION: [Route; 7] = [
        Route::Home,
        Route::About,
        Route::Admissions,
        Route::Academics,
        Route::Gallery,
        Route::News,
        Route::Contact,
    ];

    /// Parse `location.hash` (`#/about`, `#/portal/login?next=x`, ...)
    pub fn from_hash(hash: &str) -> Self {
        let path = hash.trim_start_matches('#');
        let path = path.split(['?', '#']).next().unwrap_or("");
        let path = path.trim_matches('/').to_ascii_lowercase();

        match path.as_str() {
            "" | "home" => Route::Home,
            "about" => Route::About,
            "admissions" => Route::Admissions,
            "academics" => Route::Academics,
            "contact" => Route::Contact,
            "gallery" => Route::Gallery,
            "news" => Route::News,
            "portal" | "portal/login" => Route::Login,
            "portal/dashboard" => Route::Dashboard,
            _ => Route::NotFound,
        }
    }

    pub fn to_hash(self) -> &'static str {
        match self {
            Route::Home => "#/",
            Route::About => "#/about",
            Route::Admissions => "#/admissions",
            Route::Academics => "#/academics",
            Route::Contact => "#/contact",
            Route::Gallery => "#/gallery",
            Route::News => "#/news",
            Route::Login => "#/portal/login",
            Route::Dashboard => "#/portal/dashboard",
            Route::NotFound => "#/not-found",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::About => "About Us",
            Route::Admissions => "Admissions",
            Route::Academics => "Academics",
            Route::Contact => "Contact",
            Route::Gallery => "Gallery",
            Route::News => "News & Events",
            Route::Login => "Student Login",
            Route::Dashboard => "Student Dashboard",
            Route::NotFound => "Page Not Found",
        }
    }

    pub fn requires_auth(self) -> bool {
        matches!(self, Route::Dashboard)
    }

    /// Where to actually go given the session. The dashboard bounces to
    /// login once rehydration has finished without a student; a logged-in
    /// student skips the login form.
    pub fn resolve(self, is_authenticated: bool, loading: bool) -> Route {
        match self {
            route if route.requires_auth() && !is_authenticated && !loading => Route::Login,
            Route::Login if is_authenticated => Route::Dashboard,
            route => route,
        }
    }
}
