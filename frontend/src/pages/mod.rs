pub mod catalog_page;
