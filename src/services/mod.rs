pub mod alert_service;
pub mod billing;
pub mod integration_service;
pub mod preference_service;
pub mod profile_service;
pub mod summarizer;
pub mod target_service;
pub mod threat_feed;
