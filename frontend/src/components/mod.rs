pub mod error_boundary;
pub mod facet_table;
pub mod site_layout;
pub mod source_counts;
pub mod suspend_boundary;
