//! Namespaced message bundles
//!
//! Many independently maintained message tables can be combined into one
//! lookup structure by giving each a short namespace prefix, so unrelated
//! tables can reuse short key names without clashing.
//!
//! - **Specifications**: `"global/global, lang#global/languages/lang"` lists
//!   the tables to load and the namespace each one joins
//! - **Resolution**: [`BundleResolver`] loads every table for a locale and
//!   merges them into a [`NamespacedBundle`]
//! - **Lookup**: `lang.de` reads key `de` from namespace `lang`; keys without
//!   a known namespace go to the default table
//! - **Message source**: [`PrefixedMessageSource`] caches bundles per locale
//!   and formats positional arguments
//!
//! # Quick Start
//!
//! ```rust
//! use nsbundle_i18n::{BundleResolver, Locale, MemoryLoader, MessageTable, ResolverConfig};
//!
//! let world: MessageTable = [("test.key", "value")].into_iter().collect();
//! let other: MessageTable = [("another", "key")].into_iter().collect();
//! let loader = MemoryLoader::new()
//!     .with("world", &Locale::en(), world)
//!     .with_default("other", other);
//!
//! let resolver = BundleResolver::new(ResolverConfig::default(), loader);
//! let bundle = resolver.resolve("hello#world, other", &Locale::en())?;
//!
//! assert_eq!(bundle.lookup("hello.test.key")?, "value");
//! assert_eq!(bundle.lookup("another")?, "key");
//! assert!(bundle.lookup("hello.missing").is_err());
//! # Ok::<(), nsbundle_i18n::BundleError>(())
//! ```
//!
//! # Loading from files
//!
//! ```rust,ignore
//! use nsbundle_i18n::{FileLoader, PrefixedMessageSource, ResolverConfig};
//!
//! let config = ResolverConfig::default().with_name_prefix(Some("messages/"));
//! let mut source = PrefixedMessageSource::new(config, FileLoader::new("resources"));
//! source.add_basenames(["global/global, login#login/global"]);
//!
//! // resources/messages/login/global_en.json
//! let msg = source.get_message("login.user", &[], &"en-US".parse()?)?;
//! ```

pub mod basename;
mod bundle;
mod config;
mod error;
mod loader;
mod locale;
mod resolver;
mod source;
mod table;

pub use basename::{BasenameEntry, NAMESPACE_SEPARATOR, parse_basenames};
pub use bundle::{NamespacedBundle, NamespacedBundleBuilder};
pub use config::{DEFAULT_SEPARATOR, ResolverConfig};
pub use error::BundleError;
pub use loader::{BundleLoader, FileLoader, MemoryLoader, TableFormat};
pub use locale::Locale;
pub use resolver::BundleResolver;
pub use source::{PrefixedMessageSource, format_message};
pub use table::MessageTable;

/// Result type for bundle operations
pub type Result<T> = std::result::Result<T, BundleError>;

/// Prelude for common imports
pub mod prelude {
    pub use crate::{
        BundleError, BundleLoader, BundleResolver, Locale, MemoryLoader, MessageTable,
        NamespacedBundle, PrefixedMessageSource, ResolverConfig, Result,
    };
}
