pub mod alert;
pub mod integration;
pub mod preference;
pub mod profile;
pub mod target;

pub use alert::{Alert, AlertWithTarget};
pub use integration::UserIntegration;
pub use preference::NotificationPreference;
pub use profile::UserProfile;
pub use target::MonitoringTarget;
