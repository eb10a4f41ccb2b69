//! Application identity used to address and attribute report emails.
//!
//! [`TextEmailer`](crate::TextEmailer) needs to know who the report is for
//! (the support address) and what it is about (the application name, and
//! optionally its version and build). Where that information lives is up to
//! the host application, so it is looked up through the [`AppMetadata`]
//! trait and validated once into an [`AppInfo`].
//!
//! # Sources
//!
//! - [`StaticMetadata`] - values set in code
//! - [`EnvMetadata`] - values read from environment variables
//! - [`app_info!`](crate::app_info!) - builds an [`AppInfo`] directly from the
//!   calling crate's Cargo metadata

use core::fmt;

use indexmap::IndexMap;

use crate::{error::ConfigError, mailto};

/// A piece of application metadata.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MetadataKey {
    /// The display name of the application. Required.
    AppName,
    /// Where reports are sent. Required.
    SupportAddress,
    /// The user-facing version, e.g. `1.2`.
    Version,
    /// The build identifier, e.g. `7`.
    Build,
}

impl MetadataKey {
    /// All keys, in resolution order.
    pub const ALL: [MetadataKey; 4] = [
        MetadataKey::AppName,
        MetadataKey::SupportAddress,
        MetadataKey::Version,
        MetadataKey::Build,
    ];

    fn env_suffix(self) -> &'static str {
        match self {
            MetadataKey::AppName => "APP_NAME",
            MetadataKey::SupportAddress => "SUPPORT_EMAIL",
            MetadataKey::Version => "VERSION",
            MetadataKey::Build => "BUILD",
        }
    }
}

impl fmt::Display for MetadataKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MetadataKey::AppName => "the application name",
            MetadataKey::SupportAddress => "the support address",
            MetadataKey::Version => "the version",
            MetadataKey::Build => "the build number",
        })
    }
}

/// A source of application metadata.
pub trait AppMetadata {
    /// Looks up `key`, returning `None` when it is not available.
    fn resolve(&self, key: MetadataKey) -> Option<String>;
}

impl<M: AppMetadata + ?Sized> AppMetadata for &M {
    fn resolve(&self, key: MetadataKey) -> Option<String> {
        (**self).resolve(key)
    }
}

/// Metadata held in memory.
///
/// # Examples
///
/// ```
/// use error_reporter::app_info::{AppMetadata, MetadataKey, StaticMetadata};
///
/// let metadata = StaticMetadata::new()
///     .with(MetadataKey::AppName, "Foo")
///     .with(MetadataKey::SupportAddress, "support@example.com");
///
/// assert_eq!(metadata.resolve(MetadataKey::AppName).as_deref(), Some("Foo"));
/// assert_eq!(metadata.resolve(MetadataKey::Build), None);
/// ```
#[derive(Clone, Debug, Default)]
pub struct StaticMetadata {
    values: IndexMap<MetadataKey, String>,
}

impl StaticMetadata {
    /// Creates an empty metadata set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`, replacing any previous value.
    pub fn with(mut self, key: MetadataKey, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Sets `key` to `value`, returning the previous value.
    pub fn insert(&mut self, key: MetadataKey, value: impl Into<String>) -> Option<String> {
        self.values.insert(key, value.into())
    }
}

impl AppMetadata for StaticMetadata {
    fn resolve(&self, key: MetadataKey) -> Option<String> {
        self.values.get(&key).cloned()
    }
}

/// Metadata read from environment variables.
///
/// Each key maps to `{prefix}_{SUFFIX}`, with the suffixes `APP_NAME`,
/// `SUPPORT_EMAIL`, `VERSION` and `BUILD`. The default prefix is
/// `ERROR_REPORTER`, so the support address is read from
/// `ERROR_REPORTER_SUPPORT_EMAIL`. Variables are read on every lookup.
#[derive(Clone, Debug)]
pub struct EnvMetadata {
    prefix: String,
}

impl EnvMetadata {
    /// The prefix used by [`EnvMetadata::new`].
    pub const DEFAULT_PREFIX: &'static str = "ERROR_REPORTER";

    /// Reads variables with the default prefix.
    pub fn new() -> Self {
        Self::with_prefix(Self::DEFAULT_PREFIX)
    }

    /// Reads variables with a custom prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// The variable name `key` is read from.
    pub fn variable(&self, key: MetadataKey) -> String {
        format!("{}_{}", self.prefix, key.env_suffix())
    }
}

impl Default for EnvMetadata {
    fn default() -> Self {
        Self::new()
    }
}

impl AppMetadata for EnvMetadata {
    fn resolve(&self, key: MetadataKey) -> Option<String> {
        std::env::var(self.variable(key)).ok()
    }
}

/// Validated application identity.
///
/// The application name and support address are always present. Version and
/// build are optional; empty strings are treated as absent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppInfo {
    app_name: String,
    support_address: String,
    version: Option<String>,
    build: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

impl AppInfo {
    /// Creates application info from its required parts.
    ///
    /// The parts are not checked; call [`validate`](AppInfo::validate) at
    /// startup, or use [`from_metadata`](AppInfo::from_metadata), to catch a
    /// support address that cannot receive reports.
    pub fn new(app_name: impl Into<String>, support_address: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            support_address: support_address.into(),
            version: None,
            build: None,
        }
    }

    /// Sets the version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = non_empty(Some(version.into()));
        self
    }

    /// Sets the build identifier.
    pub fn with_build(mut self, build: impl Into<String>) -> Self {
        self.build = non_empty(Some(build.into()));
        self
    }

    /// Resolves and validates application info from `metadata`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingMetadata`] when the application name or
    /// the support address is missing or blank, and
    /// [`ConfigError::InvalidSupportAddress`] when the support address is not
    /// a usable email address.
    ///
    /// # Examples
    ///
    /// ```
    /// use error_reporter::{
    ///     ConfigError,
    ///     app_info::{AppInfo, MetadataKey, StaticMetadata},
    /// };
    ///
    /// let metadata = StaticMetadata::new().with(MetadataKey::AppName, "Foo");
    /// assert_eq!(
    ///     AppInfo::from_metadata(&metadata),
    ///     Err(ConfigError::MissingMetadata(MetadataKey::SupportAddress))
    /// );
    /// ```
    pub fn from_metadata(metadata: &dyn AppMetadata) -> Result<Self, ConfigError> {
        let required = |key: MetadataKey| {
            non_empty(metadata.resolve(key)).ok_or(ConfigError::MissingMetadata(key))
        };

        let info = Self {
            app_name: required(MetadataKey::AppName)?,
            support_address: required(MetadataKey::SupportAddress)?,
            version: non_empty(metadata.resolve(MetadataKey::Version)),
            build: non_empty(metadata.resolve(MetadataKey::Build)),
        };
        info.validate()?;
        Ok(info)
    }

    /// Checks that the support address can be used as a mail recipient.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSupportAddress`] when it is empty, has no
    /// `@`, or contains whitespace or control characters.
    ///
    /// # Examples
    ///
    /// ```
    /// use error_reporter::{ConfigError, app_info::AppInfo};
    ///
    /// assert!(AppInfo::new("Foo", "support@example.com").validate().is_ok());
    /// assert_eq!(
    ///     AppInfo::new("Foo", "support").validate(),
    ///     Err(ConfigError::InvalidSupportAddress { reason: "it has no @" })
    /// );
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        match mailto::recipient_problem(&self.support_address) {
            Some(reason) => Err(ConfigError::InvalidSupportAddress { reason }),
            None => Ok(()),
        }
    }

    /// The application display name.
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// The address reports are sent to.
    pub fn support_address(&self) -> &str {
        &self.support_address
    }

    /// The version, if known.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// The build identifier, if known.
    pub fn build(&self) -> Option<&str> {
        self.build.as_deref()
    }

    /// The parenthesized version suffix, e.g. `(v1.2 b7)`.
    ///
    /// Only the known parts are included. Returns `None` when neither is
    /// known.
    pub fn version_string(&self) -> Option<String> {
        let parts = [
            self.version().map(|version| format!("v{version}")),
            self.build().map(|build| format!("b{build}")),
        ];
        let combined = parts.into_iter().flatten().collect::<Vec<_>>().join(" ");
        (!combined.is_empty()).then(|| format!("({combined})"))
    }

    /// The subject line of report emails.
    ///
    /// # Examples
    ///
    /// ```
    /// use error_reporter::app_info::AppInfo;
    ///
    /// let info = AppInfo::new("Foo", "support@example.com");
    /// assert_eq!(info.email_subject(), "Report for Foo");
    ///
    /// let info = info.with_version("1.2").with_build("7");
    /// assert_eq!(info.email_subject(), "Report for Foo  (v1.2 b7)");
    /// ```
    pub fn email_subject(&self) -> String {
        let base = format!("Report for {}", self.app_name);
        match self.version_string() {
            Some(version) => format!("{base}  {version}"),
            None => base,
        }
    }
}

impl AppMetadata for AppInfo {
    fn resolve(&self, key: MetadataKey) -> Option<String> {
        match key {
            MetadataKey::AppName => Some(self.app_name.clone()),
            MetadataKey::SupportAddress => Some(self.support_address.clone()),
            MetadataKey::Version => self.version.clone(),
            MetadataKey::Build => self.build.clone(),
        }
    }
}
