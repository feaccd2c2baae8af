//! Constants used throughout the application
//!
//! This module centralizes magic strings, UI text, and other constant values
//! to improve maintainability and consistency.

// Working location
/// Directory created under the home directory at startup
pub const WORKDIR_NAME: &str = ".helm-tui";
/// Values file written for the external editor
pub const VALUES_FILE_NAME: &str = "values.yaml";
/// Debug log written when logging is enabled
pub const LOG_FILE_NAME: &str = "debug.log";

// Helm defaults
pub const DEFAULT_HELM_BINARY: &str = "helm";
pub const DEFAULT_NAMESPACE: &str = "default";
pub const DEFAULT_EDITOR: &str = "vim";
pub const EDITOR_ENV_VAR: &str = "EDITOR";

// Catalog defaults
pub const DEFAULT_CATALOG_URL: &str = "https://artifacthub.io";
pub const DEFAULT_CATALOG_LIMIT: u32 = 20;
pub const MAX_CATALOG_LIMIT: u32 = 60;

// Timing
/// Quiet interval before a suggestion lookup is issued
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;
pub const MAX_DEBOUNCE_MS: u64 = 5_000;
pub const DEFAULT_TICK_RATE_MS: u64 = 50;

// Table layout
/// Columns lost to the panel's left and right border
pub const BORDER_ALLOWANCE: u16 = 2;
/// Spacing rendered after every visible cell
pub const CELL_PADDING: u16 = 2;
/// Rows lost to the tab bar and help line
pub const CHROME_HEIGHT: u16 = 2;

// Tab titles
pub const TAB_RELEASES: &str = "Releases";
pub const TAB_REPOSITORIES: &str = "Repositories";
pub const TAB_HUB: &str = "Hub";
pub const TAB_PLUGINS: &str = "Plugins";

// Help lines
pub const HELP_RELEASES_LIST: &str =
    "enter details • i install • u upgrade • d delete • r refresh • [ ] tabs • G logs • ctrl+c quit";
pub const HELP_RELEASES_DETAIL: &str =
    "tab/shift+tab views • R rollback • u upgrade • d delete • esc back • ctrl+c quit";
pub const HELP_WIZARD: &str = "enter next • tab accept suggestion • ↑/↓ suggestions • esc cancel";
pub const HELP_REPOSITORIES: &str =
    "tab/h/l panels • a add • d remove • u update • i install • r refresh • [ ] tabs • ctrl+c quit";
pub const HELP_HUB: &str = "/ search • enter show values • a add repository • esc back • [ ] tabs • ctrl+c quit";
pub const HELP_PLUGINS: &str = "i install • u update • U uninstall • r refresh • esc cancel • [ ] tabs • ctrl+c quit";

// Messages
pub const CONFIG_GENERATED: &str = "✅ Generated default configuration file";
pub const LOADING: &str = "Loading...";
pub const NO_SELECTION_RELEASE: &str = "release";
pub const NO_SELECTION_REVISION: &str = "revision";
pub const NO_SELECTION_REPOSITORY: &str = "repository";
pub const NO_SELECTION_PACKAGE: &str = "package";
pub const NO_SELECTION_VERSION: &str = "version";
pub const NO_SELECTION_PLUGIN: &str = "plugin";
pub const DIALOG_TITLE_DEBUG_LOGS: &str = "🔍 Debug Logs - Press 'Esc', 'G' or 'q' to close";
pub const EDITOR_SUSPENDED: &str = "Waiting for the editor to exit...";

/// Lines kept by the in-memory log buffer
pub const LOG_BUFFER_CAPACITY: usize = 500;
