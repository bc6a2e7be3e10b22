//! Built-in command table
//!
//! Registration order matters: it is the order of the help screen and the
//! tie-break order for command suggestions.

use super::registry::{CommandSpec, Operation, OptionSpec, PositionalSpec};

const CREATE_OPTIONS: &[OptionSpec] = &[
    OptionSpec::value(
        "preset",
        Some('p'),
        "preset",
        "presetName",
        "Skip prompts and use saved or remote preset",
    ),
    OptionSpec::flag(
        "default",
        Some('d'),
        "default",
        "Skip prompts and use default preset",
    ),
    OptionSpec::value(
        "inlinePreset",
        Some('i'),
        "inlinePreset",
        "json",
        "Skip prompts and use inline JSON string as preset",
    ),
    OptionSpec::value(
        "packageManager",
        Some('m'),
        "packageManager",
        "command",
        "Use specified npm client when installing dependencies",
    ),
    OptionSpec::value(
        "registry",
        Some('r'),
        "registry",
        "url",
        "Use specified npm registry when installing dependencies (only for npm)",
    ),
    OptionSpec::optional_value(
        "git",
        Some('g'),
        "git",
        "message",
        "Force git initialization with initial commit message",
    )
    .negatable(Some('n')),
    OptionSpec::flag(
        "force",
        Some('f'),
        "force",
        "Overwrite target directory if it exists",
    ),
    OptionSpec::flag("merge", None, "merge", "Merge target directory if it exists"),
    OptionSpec::flag(
        "clone",
        Some('c'),
        "clone",
        "Use git clone when fetching remote preset",
    ),
    OptionSpec::value(
        "proxy",
        Some('x'),
        "proxy",
        "proxyUrl",
        "Use specified proxy when creating project",
    ),
    OptionSpec::flag(
        "bare",
        Some('b'),
        "bare",
        "Scaffold project without beginner instructions",
    ),
    OptionSpec::flag(
        "skipGetStarted",
        None,
        "skipGetStarted",
        "Skip displaying \"Get started\" instructions",
    ),
];

const REGISTRY_OPTION: &[OptionSpec] = &[OptionSpec::value(
    "registry",
    None,
    "registry",
    "url",
    "Use specified npm registry when installing dependencies (only for npm)",
)];

const PLUGIN_POSITIONALS: &[PositionalSpec] = &[
    PositionalSpec::required("plugin"),
    PositionalSpec::optional("pluginOptions"),
];

const CREATE_POSITIONALS: &[PositionalSpec] = &[PositionalSpec::required("app-name")];

const INSPECT_POSITIONALS: &[PositionalSpec] = &[PositionalSpec::variadic("paths")];

const SCRIPT_POSITIONALS: &[PositionalSpec] = &[PositionalSpec::variadic("args")];

const INIT_POSITIONALS: &[PositionalSpec] = &[
    PositionalSpec::required("template"),
    PositionalSpec::required("app-name"),
];

const VALUE_POSITIONAL: &[PositionalSpec] = &[PositionalSpec::optional("value")];

const PLUGIN_NAME_POSITIONAL: &[PositionalSpec] = &[PositionalSpec::optional("plugin-name")];

const INSPECT_OPTIONS: &[OptionSpec] = &[
    OptionSpec::value("mode", None, "mode", "mode", ""),
    OptionSpec::value(
        "rule",
        None,
        "rule",
        "ruleName",
        "inspect a specific module rule",
    ),
    OptionSpec::value(
        "plugin",
        None,
        "plugin",
        "pluginName",
        "inspect a specific plugin",
    ),
    OptionSpec::flag("rules", None, "rules", "list all module rule names"),
    OptionSpec::flag("plugins", None, "plugins", "list all plugin names"),
    OptionSpec::flag(
        "verbose",
        Some('v'),
        "verbose",
        "Show full function definitions in output",
    ),
];

const UI_OPTIONS: &[OptionSpec] = &[
    OptionSpec::value(
        "host",
        Some('H'),
        "host",
        "host",
        "Host used for the UI server (default: localhost)",
    ),
    OptionSpec::value(
        "port",
        Some('p'),
        "port",
        "port",
        "Port used for the UI server (by default search for available port)",
    ),
    OptionSpec::flag("dev", Some('D'), "dev", "Run in dev mode"),
    OptionSpec::flag("quiet", None, "quiet", "Don't output starting messages"),
    OptionSpec::flag(
        "headless",
        None,
        "headless",
        "Don't open browser on start and output port",
    ),
];

const INIT_OPTIONS: &[OptionSpec] = &[
    OptionSpec::flag(
        "clone",
        Some('c'),
        "clone",
        "Use git clone when fetching remote template",
    ),
    OptionSpec::flag("offline", None, "offline", "Use cached template"),
];

const CONFIG_OPTIONS: &[OptionSpec] = &[
    OptionSpec::value("get", Some('g'), "get", "path", "get value from option"),
    OptionSpec::value("set", Some('s'), "set", "path", "set option value"),
    OptionSpec::value(
        "delete",
        Some('d'),
        "delete",
        "path",
        "delete option from config",
    ),
    OptionSpec::flag("edit", Some('e'), "edit", "open config with default editor"),
    OptionSpec::flag("json", None, "json", "outputs JSON result only"),
];

const NEXT_OPTION: OptionSpec = OptionSpec::flag(
    "next",
    None,
    "next",
    "Also check for alpha / beta / rc versions when upgrading",
);

const OUTDATED_OPTIONS: &[OptionSpec] = &[NEXT_OPTION];

const UPGRADE_OPTIONS: &[OptionSpec] = &[
    OptionSpec::value(
        "to",
        Some('t'),
        "to",
        "version",
        "Upgrade <package-name> to a version that is not latest",
    ),
    OptionSpec::value(
        "from",
        Some('f'),
        "from",
        "version",
        "Skip probing installed plugin, assuming it is upgraded from the designated version",
    ),
    OptionSpec::value(
        "registry",
        Some('r'),
        "registry",
        "url",
        "Use specified npm registry when installing dependencies",
    ),
    OptionSpec::flag("all", None, "all", "Upgrade all plugins"),
    NEXT_OPTION,
];

const MIGRATE_OPTIONS: &[OptionSpec] = &[OptionSpec::value(
    "from",
    Some('f'),
    "from",
    "version",
    "The base version for the migrator to migrate from",
)
.required()];

/// Every command the CLI knows, in registration order
pub static BUILTIN_COMMANDS: &[CommandSpec] = &[
    CommandSpec::new(
        "create",
        "create a new project powered by the kiln generator",
        Operation::Create,
    )
    .positionals(CREATE_POSITIONALS)
    .options(CREATE_OPTIONS)
    .extra_arguments_notice(
        "You provided more than one argument. The first one will be used as the app's name, the rest are ignored.",
    ),
    CommandSpec::new(
        "add",
        "install a plugin and invoke its generator in an already created project",
        Operation::Add,
    )
    .positionals(PLUGIN_POSITIONALS)
    .options(REGISTRY_OPTION)
    .allow_unknown_options(),
    CommandSpec::new(
        "invoke",
        "invoke the generator of a plugin in an already created project",
        Operation::Invoke,
    )
    .positionals(PLUGIN_POSITIONALS)
    .options(REGISTRY_OPTION)
    .allow_unknown_options(),
    CommandSpec::new(
        "inspect",
        "inspect the build configuration in a project",
        Operation::Inspect,
    )
    .positionals(INSPECT_POSITIONALS)
    .options(INSPECT_OPTIONS),
    CommandSpec::new(
        "serve",
        "alias of \"npm run serve\" in the current project",
        Operation::Serve,
    )
    .positionals(SCRIPT_POSITIONALS)
    .allow_unknown_options(),
    CommandSpec::new(
        "build",
        "alias of \"npm run build\" in the current project",
        Operation::Build,
    )
    .positionals(SCRIPT_POSITIONALS)
    .allow_unknown_options(),
    CommandSpec::new("ui", "start and open the kiln ui", Operation::Ui).options(UI_OPTIONS),
    CommandSpec::new(
        "init",
        "generate a project from a remote template (legacy API)",
        Operation::Init,
    )
    .positionals(INIT_POSITIONALS)
    .options(INIT_OPTIONS),
    CommandSpec::new("config", "inspect and modify the config", Operation::Config)
        .positionals(VALUE_POSITIONAL)
        .options(CONFIG_OPTIONS),
    CommandSpec::new(
        "outdated",
        "(experimental) check for outdated plugins",
        Operation::Outdated,
    )
    .options(OUTDATED_OPTIONS),
    CommandSpec::new(
        "upgrade",
        "(experimental) upgrade plugins",
        Operation::Upgrade,
    )
    .positionals(PLUGIN_NAME_POSITIONAL)
    .options(UPGRADE_OPTIONS),
    CommandSpec::new(
        "migrate",
        "(experimental) run migrator for an already-installed plugin",
        Operation::Migrate,
    )
    .positionals(PLUGIN_NAME_POSITIONAL)
    .options(MIGRATE_OPTIONS),
    CommandSpec::new(
        "info",
        "print debugging information about your environment",
        Operation::Info,
    ),
];
