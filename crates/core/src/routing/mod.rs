use tracing::{info, warn};

use crate::container::descriptor::{Instance, ServiceId};
use crate::errors::CoreError;

/// HTTP method enumeration for route definitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    GET,
    POST,
    PUT,
    PATCH,
    DELETE,
    OPTIONS,
    HEAD,
}

impl HttpMethod {
    /// Get the method as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::PATCH => "PATCH",
            HttpMethod::DELETE => "DELETE",
            HttpMethod::OPTIONS => "OPTIONS",
            HttpMethod::HEAD => "HEAD",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for HttpMethod {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "GET" => Ok(HttpMethod::GET),
            "POST" => Ok(HttpMethod::POST),
            "PUT" => Ok(HttpMethod::PUT),
            "PATCH" => Ok(HttpMethod::PATCH),
            "DELETE" => Ok(HttpMethod::DELETE),
            "OPTIONS" => Ok(HttpMethod::OPTIONS),
            "HEAD" => Ok(HttpMethod::HEAD),
            _ => Err(CoreError::validation(format!("Invalid HTTP method: {}", s))),
        }
    }
}

/// Route declared by a controller, relative to its base path
#[derive(Debug, Clone)]
pub struct RouteDefinition {
    pub method: HttpMethod,
    pub path: String,
    pub handler: String,
    pub middleware: Vec<String>,
}

impl RouteDefinition {
    /// Create a new route definition
    pub fn new(method: HttpMethod, path: impl Into<String>, handler: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            handler: handler.into(),
            middleware: Vec::new(),
        }
    }

    /// Add a single middleware
    pub fn add_middleware(mut self, middleware: impl Into<String>) -> Self {
        self.middleware.push(middleware.into());
        self
    }

    /// Set route middleware
    pub fn with_middleware(mut self, middleware: Vec<String>) -> Self {
        self.middleware = middleware;
        self
    }
}

/// Controller instance plus the metadata route binding needs.
#[derive(Clone)]
pub struct ResolvedController {
    pub name: String,
    pub id: ServiceId,
    pub base_path: Option<String>,
    pub routes: Vec<RouteDefinition>,
    pub instance: Instance,
}

impl std::fmt::Debug for ResolvedController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedController")
            .field("name", &self.name)
            .field("base_path", &self.base_path)
            .field("routes", &self.routes.len())
            .finish()
    }
}

/// External route-registration collaborator.
///
/// Invoked exactly once per bootstrap, after every controller has been
/// instantiated and never before.
pub trait RouteRegistrar {
    fn register_routes(&mut self, controllers: &[ResolvedController]) -> Result<(), CoreError>;
}

/// One bound route in a `RouteTable`
#[derive(Debug, Clone)]
pub struct RouteEntry {
    pub method: HttpMethod,
    pub path: String,
    pub controller: String,
    pub handler: String,
    pub middleware_count: usize,
}

/// Flat route table; the in-process stand-in for an HTTP framework binding.
///
/// Controllers without a base path are skipped with a warning, paths are
/// normalized to a single leading slash and joined onto the base path.
#[derive(Debug, Default)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    /// Create an empty route table
    pub fn new() -> Self {
        Self::default()
    }

    /// All bound routes, in binding order
    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find a bound route by method and full path
    pub fn lookup(&self, method: HttpMethod, path: &str) -> Option<&RouteEntry> {
        self.entries
            .iter()
            .find(|entry| entry.method == method && entry.path == path)
    }
}

fn normalize(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

fn join(base: &str, path: &str) -> String {
    if base == "/" {
        path.to_string()
    } else {
        format!("{}{}", base, path)
    }
}

impl RouteRegistrar for RouteTable {
    fn register_routes(&mut self, controllers: &[ResolvedController]) -> Result<(), CoreError> {
        for controller in controllers {
            let base = match &controller.base_path {
                Some(path) => normalize(path),
                None => {
                    warn!(
                        controller = %controller.name,
                        "controller declares no base path; skipping route binding"
                    );
                    continue;
                }
            };

            info!(
                controller = %controller.name,
                base = %base,
                routes = controller.routes.len(),
                "binding controller"
            );

            for route in &controller.routes {
                let full_path = join(&base, &normalize(&route.path));
                info!(
                    method = %route.method,
                    path = %full_path,
                    middleware = route.middleware.len(),
                    "route bound"
                );
                self.entries.push(RouteEntry {
                    method: route.method,
                    path: full_path,
                    controller: controller.name.clone(),
                    handler: route.handler.clone(),
                    middleware_count: route.middleware.len(),
                });
            }
        }
        Ok(())
    }
}
