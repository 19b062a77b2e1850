//! File-side of the pipeline: CSV tables, the sample expander and the
//! star-schema builder. Nothing here touches the database.

pub mod builder;
pub mod dimension;
pub mod error;
pub mod expand;
pub mod reviews;
pub mod scalar;
pub mod semi_structured;
pub mod table;
pub mod timestamp;

pub use builder::{build_star_schema, BuildOutput, BuildReport};
pub use error::EtlError;
pub use expand::{expand_table, ExpandOptions, DEFAULT_SAMPLE_YEAR, DEFAULT_TARGET_ROWS};
pub use reviews::extract_rating;
pub use semi_structured::{parse_semi_structured, SemiStructured};
pub use table::CsvTable;
pub use timestamp::{parse_timestamp_date, EXPANDED_TIMESTAMP_FORMAT};
