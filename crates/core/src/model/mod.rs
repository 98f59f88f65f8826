mod card;
mod catalog;
mod challenge;
mod ids;
mod report;

pub use card::{CardParseError, CardRecord};
pub use catalog::{Catalog, CatalogError};
pub use challenge::ChallengeRecord;
pub use ids::{CardId, Category, IdError};
pub use report::{ChallengeReport, ReportRow, escape_html};
