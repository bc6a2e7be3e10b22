//! Project name validation
//!
//! Applies npm package-naming rules. Errors reject the name; warnings are
//! reported alongside but do not block creation.

/// Names that can never be used
const RESERVED_NAMES: &[&str] = &["node_modules", "favicon.ico"];

/// Longest name the registry accepts without a warning
const MAX_NAME_LENGTH: usize = 214;

/// Core runtime modules; packages with these names shadow the built-ins
const CORE_MODULES: &[&str] = &[
    "assert",
    "async_hooks",
    "buffer",
    "child_process",
    "cluster",
    "console",
    "constants",
    "crypto",
    "dgram",
    "diagnostics_channel",
    "dns",
    "domain",
    "events",
    "fs",
    "http",
    "http2",
    "https",
    "inspector",
    "module",
    "net",
    "os",
    "path",
    "perf_hooks",
    "process",
    "punycode",
    "querystring",
    "readline",
    "repl",
    "stream",
    "string_decoder",
    "sys",
    "timers",
    "tls",
    "trace_events",
    "tty",
    "url",
    "util",
    "v8",
    "vm",
    "wasi",
    "worker_threads",
    "zlib",
];

/// Outcome of validating a project name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// A name is accepted when it has no errors; warnings do not count
    pub fn is_accepted(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate `name` as a package name
pub fn validate_project_name(name: &str) -> ValidationResult {
    let mut result = ValidationResult::default();
    let errors = &mut result.errors;
    let warnings = &mut result.warnings;

    if name.is_empty() {
        errors.push("name length must be greater than zero".to_string());
    }
    if name.starts_with('.') {
        errors.push("name cannot start with a period".to_string());
    }
    if name.starts_with('_') {
        errors.push("name cannot start with an underscore".to_string());
    }
    if name.trim() != name {
        errors.push("name cannot contain leading or trailing spaces".to_string());
    }

    let lower = name.to_lowercase();
    for reserved in RESERVED_NAMES {
        if lower == *reserved {
            errors.push(format!("{} is a blacklisted name", reserved));
        }
    }

    if CORE_MODULES.contains(&lower.as_str()) {
        warnings.push(format!("{} is a core module name", lower));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        warnings.push(format!(
            "name can no longer contain more than {} characters",
            MAX_NAME_LENGTH
        ));
    }
    if lower != name {
        warnings.push("name can no longer contain capital letters".to_string());
    }

    let last_segment = name.rsplit('/').next().unwrap_or(name);
    if last_segment.contains(['~', '\'', '!', '(', ')', '*']) {
        warnings.push("name can no longer contain special characters (\"~'!()*\")".to_string());
    }

    if !is_url_safe(name) && !is_url_safe_scoped(name) {
        errors.push("name can only contain URL-friendly characters".to_string());
    }

    tracing::debug!(
        "Validated name '{}': {} error(s), {} warning(s)",
        name,
        result.errors.len(),
        result.warnings.len()
    );
    result
}

/// Characters a URI component keeps unescaped
fn is_url_safe_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '!' | '~' | '*' | '\'' | '(' | ')')
}

fn is_url_safe(s: &str) -> bool {
    s.chars().all(is_url_safe_char)
}

/// `@scope/name` where both parts are non-empty and URL-safe
fn is_url_safe_scoped(name: &str) -> bool {
    let Some(scoped) = name.strip_prefix('@') else {
        return false;
    };
    match scoped.split_once('/') {
        Some((scope, pkg)) => {
            !scope.is_empty() && !pkg.is_empty() && is_url_safe(scope) && is_url_safe(pkg)
        }
        None => false,
    }
}
