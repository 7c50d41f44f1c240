pub mod overview_page;
