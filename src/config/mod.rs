//! Settings file schema and precedence resolution.
//!
//! Release settings live in `.relconf` at the repository root, written in
//! git config format under a single `[relconf]` section:
//!
//! - `relconf.releaseBranch` - branch releases are cut from
//! - `relconf.versionFile` - comma-separated version files (`-` = tags only)
//! - `relconf.vPrefix` - whether git tags carry a `v` prefix
//! - `relconf.command` - command run just before release
//! - `relconf.template` - pull request template text
//!
//! ## Precedence
//!
//! For every setting: environment variable > settings file. A setting found
//! in neither layer is unset, which callers must distinguish from an
//! explicitly empty value.
//!
//! ## Null encoding
//!
//! git config cannot store a true empty string, so an explicitly cleared
//! setting is stored as the literal `-` and decoded back to `""` on every
//! read path. The encode/decode pair lives in this module so the sentinel
//! stays in one place.

pub mod resolver;

pub use resolver::{EnvSource, ProcessEnv, ReleaseConfig, Resolved, ValueSource};

/// File holding persisted settings, relative to the repository root.
pub const DEFAULT_CONFIG_FILE: &str = ".relconf";

/// Initial content written when the settings file is first materialized.
///
/// A commented template describing every recognized key, followed by the
/// section marker. Keys are added only by subsequent writes.
pub const DEFAULT_CONFIG_CONTENT: &str = r#"# relconf settings file in git config format
# relconf generates this initial file; rewrite it to suit your release flow.
# CONFIGURATIONS:
#   relconf.releaseBranch
#       Generally, it is "main." It is the branch for releases. The release
#       pipeline tracks this branch, creates or updates a pull request as a
#       release candidate, and tags when it is merged.
#
#   relconf.versionFile
#       Versioning file containing the semantic version needed to be updated
#       at release. It will be synchronized with the "git tag".
#       Often this is a meta-information file such as gemspec, setup.cfg,
#       package.json, etc. Sometimes the source code file, such as version.rs,
#       is used. If you do not want to use versioning files but only git tags,
#       specify the "-" string here. You can specify multiple version files by
#       comma separated strings.
#
#   relconf.vPrefix
#       Flag whether or not v-prefix is added to semver when git tagging.
#       (e.g. v1.2.3 if true) This is only a tagging convention, not how it is
#       described in the version file.
#
#   relconf.command (Optional)
#       Command to change files just before release.
#
#   relconf.template (Optional)
#       Pull request template text.
[relconf]
"#;

/// Environment variable names, one per setting. A non-empty value overrides
/// the settings file; an empty or unset variable falls through to it.
pub const ENV_RELEASE_BRANCH: &str = "RELEASE_BRANCH";
pub const ENV_VERSION_FILE: &str = "VERSION_FILE";
pub const ENV_VPREFIX: &str = "VPREFIX";
pub const ENV_COMMAND: &str = "COMMAND";
pub const ENV_TEMPLATE: &str = "TEMPLATE";

/// Dotted store keys, one per setting.
pub const KEY_RELEASE_BRANCH: &str = "relconf.releaseBranch";
pub const KEY_VERSION_FILE: &str = "relconf.versionFile";
pub const KEY_VPREFIX: &str = "relconf.vPrefix";
pub const KEY_COMMAND: &str = "relconf.command";
pub const KEY_TEMPLATE: &str = "relconf.template";

/// Literal stored in place of an empty value.
pub(crate) const NULL_SENTINEL: &str = "-";

/// Encode a value for storage, mapping `""` to the null sentinel.
pub(crate) fn encode_null(value: &str) -> &str {
    if value.is_empty() { NULL_SENTINEL } else { value }
}

/// Decode a stored value, mapping the null sentinel back to `""`.
pub(crate) fn decode_null(raw: &str) -> &str {
    if raw == NULL_SENTINEL { "" } else { raw }
}

/// Parse a boolean the way `strconv.ParseBool`-style tooling spells them.
pub(crate) fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}
