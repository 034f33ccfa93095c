/// Format the next document number for a type.
///
/// Produces `"{prefix}-{year}-{seq}"` where `seq` is `current_count + 1`
/// left-padded with zeros to at least four digits. Wider sequences are not
/// truncated: `next_number("INV", 9999, 2024)` is `"INV-2024-10000"`.
///
/// `current_count` is the number of documents of this type that already
/// exist; fetching it is the caller's job, as is supplying the current year.
pub fn next_number(prefix: &str, current_count: u64, year: i32) -> String {
    format!("{}-{}-{:04}", prefix, year, current_count + 1)
}
