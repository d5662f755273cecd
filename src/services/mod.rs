pub mod classifier;
pub mod listing;
pub mod storage;
pub mod upload_service;
