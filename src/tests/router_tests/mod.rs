mod health_tests;
mod lookup_tests;
mod page_tests;
