// HTML -> source-shaped records.

pub mod columns;
pub mod page;
pub mod row;
pub mod text;

pub use page::{extract_free_agents, extract_records, extract_roster, extract_teams};
pub use row::{parse_row, parse_row_html};
