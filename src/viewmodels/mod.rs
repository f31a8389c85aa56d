pub mod data_table_viewmodel;
pub mod session_viewmodel;

pub use data_table_viewmodel::{
    display_value, to_records, Column, DataTable, PageSummary, Record, RowAction, RowActions, SortOrder, SortState,
    NO_RECORDS_MESSAGE,
};
pub use session_viewmodel::SessionViewModel;
