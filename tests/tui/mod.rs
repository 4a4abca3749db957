mod common;
mod headless_test;
mod navigation_test;
