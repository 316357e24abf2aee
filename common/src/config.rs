//! Run-wide settings shared by the front-end and the catalog.
//!
//! The CLI fills a [`Config`] from its flags; the catalog only reads the
//! duplicate-link policy when it registers new associations.

/// What a repeated link between an already linked pair does.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateLinks {
    /// Refuse it with `AlreadyLinked`.
    #[default]
    Reject,
    /// Record it again; it counts towards the upper bounds like any other link.
    Count,
}

#[derive(Debug, Default, Clone)]
pub struct Config {
    /// Suppresses the banner printed at start-up.
    pub no_banner: bool,
    /// Quiet level. 1 hides headers, 2 hides object trees too.
    pub quiet: u8,
    /// Policy applied by associations registered after the catalog is built.
    pub duplicate_links: DuplicateLinks,
}
