#![deny(missing_docs)]
#![doc = "Assertion checkers over dynamically typed values, plus a name-keyed registry."]

/// Plain and pretty failure annotations.
pub mod comment;
/// Registry configuration loaded from TOML.
pub mod config;
/// Sequence, string and mapping checkers.
pub mod container;
/// Boolean, emptiness and rendering equality checkers.
pub mod equality;
/// Filesystem checkers.
pub mod fs;
/// Numeric tolerance and bounds checkers.
pub mod numeric;
/// Name-keyed checker registry.
pub mod registry;
/// Checker built from a typed predicate function.
pub mod satisfies;
/// Prefix, suffix and error message checkers.
pub mod strings;
/// Instant and duration checkers.
pub mod time;

pub use comment::{dump, Comment};
pub use config::{load_config, RegistryConfig};
pub use container::{
    contains, is_in, is_sorted, map_equals, same_contents, slice_equals, CONTAINS, IS_IN,
    IS_SORTED, MAP_EQUALS, SAME_CONTENTS, SLICE_EQUALS,
};
pub use equality::{is_empty, is_false, is_true, str_equals, IS_EMPTY, IS_FALSE, IS_TRUE, STR_EQUALS};
pub use fs::{
    does_not_exist, is_directory, is_non_empty_file, is_symlink, same_path,
    symlink_does_not_exist, DOES_NOT_EXIST, IS_DIRECTORY, IS_NON_EMPTY_FILE, IS_SYMLINK,
    SAME_PATH, SYMLINK_DOES_NOT_EXIST,
};
pub use numeric::{between, equals_with_tolerance, to_float, BETWEEN, CLOSE_TO, EQUALS_WITH_TOLERANCE};
pub use registry::{CheckerRegistry, RegistryEntry, PREDICATES};
pub use satisfies::{check_satisfies, satisfies, Satisfies};
pub use strings::{error_contains, has_prefix, has_suffix, ERROR_CONTAINS, HAS_PREFIX, HAS_SUFFIX};
pub use time::{
    duration_less_than, time_between, time_equals, within_duration, TimeBetween, TimeEquals,
    DEFAULT_TIME_EQUALS_TOLERANCE_US, DURATION_LESS_THAN, WITHIN_DURATION,
};

pub use chk_core::{CheckError, Checker, CheckerInfo, Value, Verdict};
