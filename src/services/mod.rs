pub mod loader_service;
pub mod parser_service;
pub mod word_service;
