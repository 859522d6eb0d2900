//! Domain constants shared by the loaders, the oracle and the binary.

/// Default source file extension scanned by the corpus loader.
pub const SOURCE_EXTENSION: &str = "cs";

/// Suffix the binder tries first when resolving attribute names.
pub const ATTRIBUTE_SUFFIX: &str = "Attribute";

/// Environment variable holding the log filter (same syntax as `RUST_LOG`).
pub const LOG_ENV: &str = "TYPESLICE_LOG";

/// Environment variable selecting the log format (`text` or `json`).
pub const LOG_FORMAT_ENV: &str = "TYPESLICE_LOG_FORMAT";

/// Comment marker in reference catalog files.
pub const CATALOG_COMMENT: char = '#';

/// Separator between a type and its nested type in catalog entries.
pub const CATALOG_NESTED_SEPARATOR: char = '+';

/// Predefined type keywords and the library types they alias.
pub const PREDEFINED_TYPES: &[(&str, &str)] = &[
    ("bool", "System.Boolean"),
    ("byte", "System.Byte"),
    ("sbyte", "System.SByte"),
    ("char", "System.Char"),
    ("decimal", "System.Decimal"),
    ("double", "System.Double"),
    ("float", "System.Single"),
    ("int", "System.Int32"),
    ("uint", "System.UInt32"),
    ("long", "System.Int64"),
    ("ulong", "System.UInt64"),
    ("short", "System.Int16"),
    ("ushort", "System.UInt16"),
    ("nint", "System.IntPtr"),
    ("nuint", "System.UIntPtr"),
    ("object", "System.Object"),
    ("string", "System.String"),
    ("void", "System.Void"),
];

/// Look up the library type a predefined keyword stands for.
pub fn predefined_type(keyword: &str) -> Option<&'static str> {
    PREDEFINED_TYPES
        .iter()
        .find(|(kw, _)| *kw == keyword)
        .map(|(_, ty)| *ty)
}
