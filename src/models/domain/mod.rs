pub mod liveness;
pub mod metadata_record;
pub mod search_brief;
pub mod search_outcome;
pub mod verified_set;
pub use liveness::LivenessVerdict;
pub use metadata_record::{AccessType, MetadataRecord, ResourceType, SuggestedUse};
pub use search_brief::SearchBrief;
pub use search_outcome::{Diagnostics, RepairAttempt, SearchOutcome};
pub use verified_set::VerifiedSet;
