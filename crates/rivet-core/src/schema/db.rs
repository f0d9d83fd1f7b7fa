mod accessor;
pub use accessor::{Accessor, Segment};

mod column;
pub use column::{Column, ColumnId, ColumnKind};

mod schema;
pub use schema::Schema;

mod sql_type;
pub use sql_type::SqlType;

mod table;
pub use table::{Table, TableId, TableKind};
