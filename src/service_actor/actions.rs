/// Custom actions for Service documents.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceAction {
    /// Replaces the stored rating aggregate.
    RecordRating { average: f64, count: u32 },
}
