pub mod config;
pub mod dates;
pub mod payload;
pub mod process;
pub mod record;

pub use config::{
    ConfigError, MissingStyle, OrderPolicy, ProcessConfig, PublishConfig, UrgencyPolicy,
};
pub use dates::{format_date, format_offset, italian_label, parse_date};
pub use payload::{Payload, PublishedRecord, build_payload};
pub use process::process;
pub use record::{Milestone, MilestoneStatus, ProcessedRecord, RawRow};
