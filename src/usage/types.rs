/// One priced API call read from a usage log
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct UsageRecord {
    pub(crate) model: String,
    pub(crate) input: u64,
    pub(crate) output: u64,
}

/// Records parsed from one file
#[derive(Debug, Default)]
pub(crate) struct ParsedFile {
    pub(crate) records: Vec<UsageRecord>,
    pub(crate) skipped: usize,
    /// Files that could not be opened
    pub(crate) unreadable: usize,
}

impl ParsedFile {
    pub(crate) fn merge(mut self, other: ParsedFile) -> Self {
        self.records.extend(other.records);
        self.skipped += other.skipped;
        self.unreadable += other.unreadable;
        self
    }
}

/// Result of loading every matched file
#[derive(Debug, Default)]
pub(crate) struct LoadResult {
    pub(crate) records: Vec<UsageRecord>,
    pub(crate) skipped: usize,
    pub(crate) files: usize,
    pub(crate) unreadable_files: usize,
    pub(crate) elapsed_ms: f64,
}
