pub mod announcement;
pub mod user;

pub use announcement::{Announcement, AnnouncementRow};
pub use user::User;
