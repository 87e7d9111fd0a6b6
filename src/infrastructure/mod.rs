// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod file_document_store;
pub mod file_overlay_store;
pub mod github_store;
pub mod http_response;
pub mod local_files;
pub mod system_clock;
