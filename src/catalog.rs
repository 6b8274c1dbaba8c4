//! Recognized `mysqldump` options.
//!
//! Keys are matched exactly (case-sensitive, no prefix matching). A long name
//! and its single-letter alias resolve to the same canonical flag.

use once_cell::sync::Lazy;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    /// Presence-only flag, emitted as `--name`.
    NoValue(&'static str),
    /// Assignment flag, emitted as `--name=<value>`.
    Value(&'static str),
}

impl FlagKind {
    pub fn name(&self) -> &'static str {
        match self {
            FlagKind::NoValue(name) | FlagKind::Value(name) => name,
        }
    }
}

// Existing callers depend on every key here producing the same flag.
const NO_VALUE_FLAGS: &[(&str, Option<&str>)] = &[
    ("all-databases", Some("A")),
    ("all-tablespaces", Some("Y")),
    ("no-tablespaces", Some("y")),
    ("add-drop-database", None),
    ("add-drop-table", None),
    ("add-drop-trigger", None),
    ("add-locks", None),
    ("allow-keywords", None),
    ("apply-replica-statements", None),
    ("comments", Some("i")),
    ("compact", None),
    ("complete-insert", Some("c")),
    ("compress", Some("C")),
    ("create-options", Some("a")),
    ("databases", Some("B")),
    ("delete-source-logs", None),
    ("disable-keys", Some("K")),
    ("events", Some("E")),
    ("extended-insert", Some("e")),
    ("flush-logs", Some("F")),
    ("flush-privileges", None),
    ("force", Some("f")),
    ("hex-blob", None),
    ("include-source-host-port", None),
    ("insert-ignore", None),
    ("lock-all-tables", Some("x")),
    ("lock-tables", Some("l")),
    ("no-autocommit", None),
    ("no-create-db", Some("n")),
    ("no-create-info", Some("t")),
    ("no-data", Some("d")),
    ("no-set-names", Some("N")),
    ("opt", None),
    ("order-by-primary", None),
    ("quick", Some("q")),
    ("quote-names", Some("Q")),
    ("replace", None),
    ("routines", Some("R")),
    ("set-charset", None),
    ("single-transaction", None),
    ("dump-date", None),
    ("skip-opt", None),
    ("get-server-public-key", None),
    ("tables", None),
    ("triggers", None),
    ("tz-utc", None),
    ("verbose", Some("v")),
    ("xml", Some("X")),
    ("enable-cleartext-plugin", None),
    ("network-timeout", Some("M")),
    ("show-create-table-skip-secondary-engine", None),
    ("skip-generated-invisible-primary-key", None),
];

const VALUE_FLAGS: &[(&str, Option<&str>)] = &[
    ("where", Some("w")),
    ("result-file", Some("r")),
    ("socket", Some("S")),
    ("tab", Some("T")),
    ("ignore-table", None),
    ("default-character-set", None),
    ("compatible", None),
    ("bind-address", None),
    ("character-sets-dir", None),
    ("compression-algorithms", None),
    ("zstd-compression-level", None),
    ("default-auth", None),
    ("fields-enclosed-by", None),
    ("fields-escaped-by", None),
    ("fields-optionally-enclosed-by", None),
    ("fields-terminated-by", None),
    ("lines-terminated-by", None),
    ("ignore-error", None),
    ("init-command", None),
    ("max-allowed-packet", None),
    ("net-buffer-length", None),
    ("plugin-dir", None),
    ("protocol", None),
    ("server-public-key-path", None),
    ("set-gtid-purged", None),
    ("source-data", None),
    ("dump-replica", None),
    ("ssl-ca", None),
    ("ssl-capath", None),
    ("ssl-cert", None),
    ("ssl-cipher", None),
    ("ssl-crl", None),
    ("ssl-crlpath", None),
    ("ssl-key", None),
    ("ssl-mode", None),
    ("tls-version", None),
    ("tls-ciphersuites", None),
    ("output-as-version", None),
];

static CATALOG: Lazy<HashMap<&'static str, FlagKind>> = Lazy::new(|| {
    let mut map = HashMap::with_capacity(NO_VALUE_FLAGS.len() * 2 + VALUE_FLAGS.len() * 2);

    let tables: [(&[(&'static str, Option<&'static str>)], fn(&'static str) -> FlagKind); 2] =
        [(NO_VALUE_FLAGS, FlagKind::NoValue), (VALUE_FLAGS, FlagKind::Value)];
    for (table, kind) in tables {
        for &(name, alias) in table {
            map.insert(name, kind(name));
            if let Some(alias) = alias {
                map.insert(alias, kind(name));
            }
        }
    }

    map
});

/// Looks up an option key. `None` means the key is not recognized.
pub fn resolve(key: &str) -> Option<FlagKind> {
    CATALOG.get(key).copied()
}

/// Every key the catalog accepts, long names and aliases alike.
pub fn keys() -> impl Iterator<Item = &'static str> {
    CATALOG.keys().copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_resolve_long_names_and_aliases() {
        assert_eq!(resolve("all-databases"), Some(FlagKind::NoValue("all-databases")));
        assert_eq!(resolve("A"), Some(FlagKind::NoValue("all-databases")));
        assert_eq!(resolve("q"), Some(FlagKind::NoValue("quick")));
        assert_eq!(resolve("M"), Some(FlagKind::NoValue("network-timeout")));
        assert_eq!(resolve("single-transaction"), Some(FlagKind::NoValue("single-transaction")));
        assert_eq!(resolve("where"), Some(FlagKind::Value("where")));
        assert_eq!(resolve("w"), Some(FlagKind::Value("where")));
        assert_eq!(resolve("ignore-table"), Some(FlagKind::Value("ignore-table")));
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        assert_eq!(resolve("y"), Some(FlagKind::NoValue("no-tablespaces")));
        assert_eq!(resolve("Y"), Some(FlagKind::NoValue("all-tablespaces")));
        assert_eq!(resolve("Quick"), None);
        assert_eq!(resolve("QUICK"), None);
    }

    #[test]
    fn test_resolve_rejects_unknown_and_prefixes() {
        assert_eq!(resolve("frobnicate"), None);
        assert_eq!(resolve("qui"), None);
        assert_eq!(resolve("--quick"), None);
        assert_eq!(resolve(""), None);
        assert_eq!(resolve("version"), None);
    }

    #[test]
    fn test_no_duplicate_keys() {
        let mut seen = HashSet::new();
        for &(name, alias) in NO_VALUE_FLAGS.iter().chain(VALUE_FLAGS) {
            assert!(seen.insert(name), "duplicate key {name}");
            if let Some(alias) = alias {
                assert!(seen.insert(alias), "duplicate alias {alias}");
            }
        }
        assert_eq!(seen.len(), keys().count());
    }

    #[test]
    fn test_aliases_are_single_letters() {
        for &(_, alias) in NO_VALUE_FLAGS.iter().chain(VALUE_FLAGS) {
            if let Some(alias) = alias {
                assert_eq!(alias.len(), 1);
            }
        }
    }

    #[test]
    fn test_shared_across_threads() {
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| resolve("hex-blob")))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), Some(FlagKind::NoValue("hex-blob")));
        }
    }
}
