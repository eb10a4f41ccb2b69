/// Builds an [`AppInfo`](crate::app_info::AppInfo) from the calling crate's
/// Cargo metadata.
///
/// The application name is `CARGO_PKG_NAME` and the version is
/// `CARGO_PKG_VERSION`, both read at compile time in the crate that invokes
/// the macro. The support address is always given explicitly. An optional
/// `build` identifier can be passed as a second argument.
///
/// # Examples
///
/// ```
/// use error_reporter::app_info;
///
/// let info = app_info!("support@example.com");
/// assert_eq!(info.app_name(), env!("CARGO_PKG_NAME"));
/// assert_eq!(info.version(), Some(env!("CARGO_PKG_VERSION")));
/// assert_eq!(info.build(), None);
///
/// let info = app_info!("support@example.com", build = "2024.06.1");
/// assert_eq!(info.build(), Some("2024.06.1"));
/// ```
#[macro_export]
macro_rules! app_info {
    ($support_address:expr $(,)?) => {
        $crate::app_info::AppInfo::new(::core::env!("CARGO_PKG_NAME"), $support_address)
            .with_version(::core::env!("CARGO_PKG_VERSION"))
    };
    ($support_address:expr, build = $build:expr $(,)?) => {
        $crate::app_info!($support_address).with_build($build)
    };
}
