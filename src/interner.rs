/// String Interner for event tables
///
/// Athlete names, teams, games labels and sports repeat across hundreds of
/// thousands of rows. The interner stores each distinct string once and hands
/// out integer IDs, so String cells compare and hash as plain integers during
/// deduplication and grouping.
///
/// # Design
///
/// - Strings are stored once in a `Vec<String>` (index = ID)
/// - An `FxHashMap<String, StringId>` provides O(1) lookup from string to ID
/// - Occurrence counts track how many cells reference each string
/// - Tables are append-only, so IDs are never released or reused
///
/// # Examples
///
/// ```
/// use olympics::StringInterner;
///
/// let mut interner = StringInterner::new();
///
/// let usa = interner.intern("USA");
/// let chn = interner.intern("CHN");
/// assert_eq!(interner.intern("USA"), usa);
/// assert_ne!(usa, chn);
///
/// assert_eq!(interner.resolve(usa), Some("USA"));
/// assert_eq!(interner.lookup("GBR"), None);
/// ```
use rustc_hash::FxHashMap;

/// Interned string ID type
pub type StringId = u32;

/// A string interner that stores unique strings and returns integer IDs
#[derive(Debug, Clone, Default)]
pub struct StringInterner {
    string_to_id: FxHashMap<String, StringId>,
    id_to_string: Vec<String>,
    occurrences: Vec<u32>,
}

impl StringInterner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a string, returning its ID.
    /// Repeated strings return the existing ID and bump its occurrence count.
    pub fn intern(&mut self, s: &str) -> StringId {
        if let Some(&id) = self.string_to_id.get(s) {
            self.occurrences[id as usize] += 1;
            return id;
        }

        let id = self.id_to_string.len() as StringId;
        self.id_to_string.push(s.to_string());
        self.occurrences.push(1);
        self.string_to_id.insert(s.to_string(), id);
        id
    }

    /// Find the ID of an already-interned string without interning it.
    ///
    /// Filters use this to translate a predicate value once; a `None` means
    /// no cell can ever match.
    pub fn lookup(&self, s: &str) -> Option<StringId> {
        self.string_to_id.get(s).copied()
    }

    pub fn resolve(&self, id: StringId) -> Option<&str> {
        self.id_to_string.get(id as usize).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.id_to_string.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_to_string.is_empty()
    }

    /// Approximate memory held by the interner, in bytes
    pub fn memory_usage(&self) -> usize {
        let string_bytes: usize = self
            .id_to_string
            .iter()
            .map(|s| s.len() + std::mem::size_of::<String>())
            .sum();

        let map_overhead = self.string_to_id.capacity()
            * (std::mem::size_of::<String>() + std::mem::size_of::<StringId>());

        string_bytes + map_overhead + self.occurrences.capacity() * std::mem::size_of::<u32>()
    }

    pub fn stats(&self) -> InternerStats {
        InternerStats {
            unique_strings: self.len(),
            total_references: self.occurrences.iter().map(|&c| c as u64).sum(),
            memory_bytes: self.memory_usage(),
        }
    }
}

/// Statistics about the string interner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternerStats {
    /// Number of unique strings stored
    pub unique_strings: usize,
    /// Total number of cells referencing any interned string
    pub total_references: u64,
    /// Approximate memory usage in bytes
    pub memory_bytes: usize,
}
