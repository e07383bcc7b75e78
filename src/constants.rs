// Constants module for shared release naming and installation defaults

pub const DEFAULT_RELEASE_URL_PREFIX: &str =
    "https://github.com/tcforge/build-clang/releases/download";
pub const DEFAULT_PACKAGE_NAME_PREFIX: &str = "clang-toolchain-";
pub const DEFAULT_PACKAGE_NAME_SUFFIX: &str = ".tar.gz";
pub const CHECKSUM_URL_SUFFIX: &str = ".sha256";
pub const DEFAULT_INSTALL_DIR: &str = "toolchains";

/// Completion marker written into an install directory once extraction and
/// verification have finished.
pub const INSTALL_MARKER_FILE: &str = ".toolchain-complete";

/// Platform substituted for tags that predate platform tagging. All of those
/// builds were produced on CentOS 7 x86_64.
pub const LEGACY_OS_NAME_AND_VERSION: &str = "centos7";
pub const LEGACY_ARCHITECTURE: &str = "x86_64";

/// Marker that introduces a build counter in a tag's version suffix,
/// e.g. `build-2` in `v16.0.6-build-2-1708929242-b5e2c76f-almalinux8-x86_64`.
pub const BUILD_COUNTER_PREFIX: &str = "build-";

/// Builds uploaded before this point have no `.sha256` companion asset and
/// are skipped by `update-tags`.
pub const OLDEST_SUPPORTED_BUILD_TIMESTAMP: u64 = 1_619_000_000;
