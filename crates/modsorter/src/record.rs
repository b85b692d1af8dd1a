use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// The marker prefix the dump tool puts on module records.
pub const MODULE_PREFIX: &str = "Mod ";

/// A record line that does not match `Mod <index> <path>`.
///
/// Malformed records fail the whole run; they are never silently skipped.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    /// The line does not carry the module marker.
    #[error("not a module record: {line:?}")]
    NotAModule {
        /// The offending line.
        line: String,
    },

    /// The line has fewer than three whitespace-separated fields.
    #[error("malformed module record (expected `Mod <index> <path>`): {line:?}")]
    MissingField {
        /// The offending line.
        line: String,
    },

    /// The index field is not a number.
    #[error("invalid module index {index:?} in record: {line:?}")]
    InvalidIndex {
        /// The field that failed to parse.
        index: String,
        /// The offending line.
        line: String,
    },
}

/// A single module record from the dump tool's output.
///
/// Displaying a record yields the original line rather than a re-rendering,
/// so spacing and casing survive the round trip to stdout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleRecord {
    index: u64,
    path: String,
    raw: String,
}

impl ModuleRecord {
    /// The module's index in the database.
    pub fn index(&self) -> u64 {
        self.index
    }

    /// The module's object/source path, casing preserved.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The lower-cased path records sort by.
    pub fn sort_key(&self) -> String {
        self.path.to_lowercase()
    }
}

impl fmt::Display for ModuleRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for ModuleRecord {
    type Err = RecordError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let rest = line
            .strip_prefix(MODULE_PREFIX)
            .ok_or_else(|| RecordError::NotAModule {
                line: line.to_string(),
            })?;

        // The path may contain embedded whitespace, so only the index is
        // split off; the remainder is the path.
        let (index, path) = split_field(rest).ok_or_else(|| RecordError::MissingField {
            line: line.to_string(),
        })?;
        if path.is_empty() {
            return Err(RecordError::MissingField {
                line: line.to_string(),
            });
        }

        let index = index.parse().map_err(|_| RecordError::InvalidIndex {
            index: index.to_string(),
            line: line.to_string(),
        })?;

        Ok(ModuleRecord {
            index,
            path: path.to_string(),
            raw: line.to_string(),
        })
    }
}

/// Splits off the next whitespace-delimited field, returning it together with
/// the remainder (leading whitespace stripped). Runs of whitespace count as a
/// single separator.
fn split_field(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    match s.find(char::is_whitespace) {
        Some(pos) => Some((&s[..pos], s[pos..].trim_start())),
        None => Some((s, "")),
    }
}

/// Extracts all module records from raw dump output, in emission order.
pub fn filter_records(output: &str) -> Result<Vec<ModuleRecord>, RecordError> {
    output
        .trim()
        .lines()
        .filter(|line| line.starts_with(MODULE_PREFIX))
        .map(|line| line.parse())
        .collect()
}

/// Sorts records ascending by path, case-insensitively.
///
/// The sort is stable: records whose lower-cased paths compare equal keep
/// the order the dump tool emitted them in.
pub fn sort_by_path(records: &mut [ModuleRecord]) {
    records.sort_by_cached_key(|record| record.sort_key());
}

#[cfg(test)]
mod tests {
    use super::*;

    const DUMP_OUTPUT: &str = "\
Mod 0 C:\\Build\\Zeta.obj
Mod 1 C:\\Build\\alpha.obj
Other line ignored
Mod 2 C:\\Build\\Beta.obj
";

    #[test]
    fn filters_and_sorts_module_records() {
        let mut records = filter_records(DUMP_OUTPUT).unwrap();
        sort_by_path(&mut records);
        let lines: Vec<String> = records.iter().map(ToString::to_string).collect();
        assert_eq!(
            lines,
            [
                "Mod 1 C:\\Build\\alpha.obj",
                "Mod 2 C:\\Build\\Beta.obj",
                "Mod 0 C:\\Build\\Zeta.obj",
            ]
        );
    }

    #[test]
    fn parses_paths_with_embedded_whitespace() {
        let record: ModuleRecord = "Mod 4 C:\\Program Files\\app.obj".parse().unwrap();
        assert_eq!(record.index(), 4);
        assert_eq!(record.path(), "C:\\Program Files\\app.obj");
    }

    #[test]
    fn non_module_marker_is_rejected() {
        let err = "Sym 0 foo.obj".parse::<ModuleRecord>().unwrap_err();
        assert!(matches!(err, RecordError::NotAModule { .. }));
    }

    #[test]
    fn short_record_is_an_error() {
        let err = "Mod onlytwo".parse::<ModuleRecord>().unwrap_err();
        assert!(matches!(err, RecordError::MissingField { .. }));
    }

    #[test]
    fn non_numeric_index_is_an_error() {
        let err = "Mod x C:\\Build\\a.obj".parse::<ModuleRecord>().unwrap_err();
        assert!(matches!(err, RecordError::InvalidIndex { .. }));
    }

    #[test]
    fn short_record_fails_the_whole_batch() {
        let output = "Mod 0 C:\\a.obj\nMod onlytwo\n";
        assert_eq!(
            filter_records(output).unwrap_err(),
            RecordError::MissingField {
                line: "Mod onlytwo".to_string()
            }
        );
    }

    #[test]
    fn sort_is_stable_for_case_folded_duplicates() {
        let mut records = filter_records("Mod 0 A.OBJ\nMod 1 a.obj\nMod 2 a.OBJ\n").unwrap();
        sort_by_path(&mut records);
        let indices: Vec<u64> = records.iter().map(ModuleRecord::index).collect();
        assert_eq!(indices, [0, 1, 2]);
    }

    #[test]
    fn sorting_twice_changes_nothing() {
        let mut records = filter_records(DUMP_OUTPUT).unwrap();
        sort_by_path(&mut records);
        let once = records.clone();
        sort_by_path(&mut records);
        assert_eq!(records, once);
    }

    #[test]
    fn empty_output_yields_no_records() {
        assert!(filter_records("").unwrap().is_empty());
        assert!(filter_records("\n  \n").unwrap().is_empty());
    }

    #[test]
    fn indented_lines_are_not_records() {
        let records = filter_records("Mod 0 a.obj\n  Mod 1 b.obj\n").unwrap();
        let indices: Vec<u64> = records.iter().map(ModuleRecord::index).collect();
        assert_eq!(indices, [0]);
    }
}
