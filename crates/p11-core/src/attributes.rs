use crate::compare::compare_ignore_ascii_case;
use crate::error::{TableError, TableResult};
use serde::Serialize;
use std::borrow::Cow;
use std::cmp::Ordering;
use tracing::{debug, trace};

/// Identifier for a PKCS#11 attribute (mirrors CK_ATTRIBUTE_TYPE numeric values).
pub type AttributeId = u32;

/// Returned by [`AttributeTable::resolve`] when a name is not in the table.
///
/// Standard attribute codes never use the all-bits-set value, and tables
/// refuse to hold it.
pub const NOT_FOUND: AttributeId = 0xFFFF_FFFF;

// Sorted and de-duplicated at build time.
include!(concat!(env!("OUT_DIR"), "/attrinfo.rs"));

static BUILTIN: AttributeTable = AttributeTable {
    entries: Cow::Borrowed(&BUILTIN_ENTRIES),
};

/// A single `(code, name)` pair of the attribute vocabulary.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct AttributeEntry {
    code: AttributeId,
    name: Cow<'static, str>,
}

impl AttributeEntry {
    pub fn new<S: Into<Cow<'static, str>>>(code: AttributeId, name: S) -> Self {
        Self {
            code,
            name: name.into(),
        }
    }

    pub const fn from_static(code: AttributeId, name: &'static str) -> Self {
        Self {
            code,
            name: Cow::Borrowed(name),
        }
    }

    pub fn code(&self) -> AttributeId {
        self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Immutable attribute vocabulary ordered by [`compare_ignore_ascii_case`].
///
/// Every constructor leaves the entries strictly ascending under that
/// comparator, which is what makes the binary search in [`get`](Self::get)
/// correct. There is no way to mutate a table once built.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttributeTable {
    entries: Cow<'static, [AttributeEntry]>,
}

impl AttributeTable {
    /// The PKCS#11 vocabulary compiled into the crate.
    pub fn builtin() -> &'static AttributeTable {
        &BUILTIN
    }

    /// Build a table from entries in any order.
    ///
    /// Rejects empty names, the reserved [`NOT_FOUND`] code, and names that
    /// compare equal ignoring ASCII case, whether or not their codes agree.
    pub fn from_entries<I>(entries: I) -> TableResult<Self>
    where
        I: IntoIterator<Item = AttributeEntry>,
    {
        let mut entries: Vec<AttributeEntry> = entries.into_iter().collect();
        for entry in &entries {
            check_entry(entry)?;
        }
        entries.sort_by(|a, b| compare_ignore_ascii_case(&a.name, &b.name));
        for pair in entries.windows(2) {
            if compare_ignore_ascii_case(&pair[0].name, &pair[1].name) == Ordering::Equal {
                return Err(TableError::duplicate(
                    &*pair[1].name,
                    pair[0].code,
                    pair[1].code,
                ));
            }
        }
        debug!(entries = entries.len(), "built attribute table");
        Ok(Self {
            entries: Cow::Owned(entries),
        })
    }

    /// The built-in vocabulary plus vendor-defined entries.
    ///
    /// A vendor name that collides with a built-in one is a
    /// [`TableError::DuplicateName`].
    pub fn with_extensions<I>(extra: I) -> TableResult<Self>
    where
        I: IntoIterator<Item = AttributeEntry>,
    {
        Self::from_entries(Self::builtin().entries.iter().cloned().chain(extra))
    }

    /// Re-check the ordering and content invariants of this table.
    pub fn validate(&self) -> TableResult<()> {
        for entry in self.entries.iter() {
            check_entry(entry)?;
        }
        for pair in self.entries.windows(2) {
            match compare_ignore_ascii_case(&pair[0].name, &pair[1].name) {
                Ordering::Less => {}
                Ordering::Equal => {
                    return Err(TableError::duplicate(
                        &*pair[1].name,
                        pair[0].code,
                        pair[1].code,
                    ))
                }
                Ordering::Greater => {
                    return Err(TableError::Unsorted {
                        name: pair[1].name.to_string(),
                    })
                }
            }
        }
        Ok(())
    }

    /// Look up a name ignoring ASCII case. No other normalization is applied.
    pub fn get(&self, name: &str) -> Option<AttributeId> {
        match self
            .entries
            .binary_search_by(|entry| compare_ignore_ascii_case(&entry.name, name))
        {
            Ok(index) => Some(self.entries[index].code),
            Err(_) => {
                trace!(attribute = name, "unknown attribute name");
                None
            }
        }
    }

    /// Look up a name, returning [`NOT_FOUND`] when it is not in the table.
    pub fn resolve(&self, name: &str) -> AttributeId {
        self.get(name).unwrap_or(NOT_FOUND)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in table order.
    pub fn iter(&self) -> impl Iterator<Item = &AttributeEntry> {
        self.entries.iter()
    }
}

/// Resolve a name against the built-in table.
pub fn resolve(name: &str) -> AttributeId {
    AttributeTable::builtin().resolve(name)
}

fn check_entry(entry: &AttributeEntry) -> TableResult<()> {
    if entry.name.is_empty() {
        return Err(TableError::EmptyName { code: entry.code });
    }
    if entry.code == NOT_FOUND {
        return Err(TableError::reserved(&*entry.name, entry.code));
    }
    Ok(())
}
