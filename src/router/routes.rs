//! Static route table

use serde::Serialize;

/// Landing path for authenticated users
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Login path unauthenticated users are sent to
pub const LOGIN_PATH: &str = "/login";

/// Root of the public layout
pub const ROOT_PATH: &str = "/";

/// Page shell a route renders inside
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    Auth,
    Public,
}

/// Page a route renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Dashboard,
    CodeWithGenAi,
    Bookmarks,
    Course,
    StudyWithGenAi,
    Profile,
    Settings,
    TeacherDashboard,
    AdminDashboard,
    Dashboard2,
    Login,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RouteMeta {
    pub requires_auth: bool,
}

/// One entry of the route table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteDescriptor {
    pub path: &'static str,
    pub name: Option<&'static str>,
    pub layout: Layout,
    /// `None` for a bare layout route
    pub view: Option<View>,
    pub meta: RouteMeta,
}

impl RouteDescriptor {
    fn authenticated(path: &'static str, view: View) -> Self {
        Self {
            path,
            name: None,
            layout: Layout::Auth,
            view: Some(view),
            meta: RouteMeta {
                requires_auth: true,
            },
        }
    }

    fn public(path: &'static str, view: Option<View>) -> Self {
        Self {
            path,
            name: None,
            layout: Layout::Public,
            view,
            meta: RouteMeta::default(),
        }
    }

    fn named(mut self, name: &'static str) -> Self {
        self.name = Some(name);
        self
    }

    pub fn requires_auth(&self) -> bool {
        self.meta.requires_auth
    }
}

/// Immutable path-to-view mapping, built once at startup
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new(vec![
            // Authenticated layout; every child inherits requires_auth
            RouteDescriptor::authenticated(DASHBOARD_PATH, View::Dashboard),
            RouteDescriptor::authenticated("/code", View::CodeWithGenAi),
            RouteDescriptor::authenticated("/bookmarks", View::Bookmarks),
            RouteDescriptor::authenticated("/course", View::Course),
            RouteDescriptor::authenticated("/study", View::StudyWithGenAi).named("studywithgenAI"),
            RouteDescriptor::authenticated("/profile", View::Profile),
            RouteDescriptor::authenticated("/settings", View::Settings),
            RouteDescriptor::authenticated("/tdashboard", View::TeacherDashboard),
            RouteDescriptor::authenticated("/adashboard", View::AdminDashboard),
            RouteDescriptor::authenticated("/dashboard2", View::Dashboard2),
            // Public layout
            RouteDescriptor::public(ROOT_PATH, None),
            RouteDescriptor::public(LOGIN_PATH, Some(View::Login)),
        ])
    }
}

impl RouteTable {
    pub fn new(routes: Vec<RouteDescriptor>) -> Self {
        Self { routes }
    }

    /// Find the route for `path` after normalisation
    pub fn resolve(&self, path: &str) -> Option<&RouteDescriptor> {
        let path = normalize_path(path);
        self.routes.iter().find(|route| route.path == path)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&RouteDescriptor> {
        self.routes.iter().find(|route| route.name == Some(name))
    }

    pub fn routes(&self) -> &[RouteDescriptor] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Strip query and fragment, ensure a leading slash and drop trailing ones
pub fn normalize_path(path: &str) -> String {
    let end = path.find(|c: char| c == '?' || c == '#').unwrap_or(path.len());
    let trimmed = path[..end].trim().trim_end_matches('/');

    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}
