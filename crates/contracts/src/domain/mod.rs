pub mod a001_page;
pub mod common;
