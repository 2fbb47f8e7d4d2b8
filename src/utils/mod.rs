/// Logger
pub mod logger;
/// Network providers
pub mod providers;
