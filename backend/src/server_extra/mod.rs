//! Routes mounted next to the server functions.

pub mod thing_select;

/// Path the overview page's raw search links point at.
pub const THING_SELECT_PATH: &str = "/thing/select";
