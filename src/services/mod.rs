pub mod product_pages;
