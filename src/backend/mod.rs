pub mod analysis;
pub mod delimiter;
pub mod error;
pub mod export;
pub mod importer;
pub mod loader;
pub mod normalize;
pub mod parser;
pub mod question;
pub mod resolver;
pub mod settings;
pub mod store;
