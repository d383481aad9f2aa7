mod meta;
pub use self::meta::{Metadata, PaginatedResponse};

mod bracket;
pub use self::bracket::{IncomeBracket, Sector};

pub mod fields;

mod record;
pub use self::record::{FlatRecord, RecordError};

mod school;
pub use self::school::{NetPriceTable, Ownership, SchoolID, SchoolRecord, SchoolSummary};
