pub mod color;
pub mod org_code;
pub mod password;
pub mod rating;
pub mod record_id;
pub mod roster;
pub mod user_id;
pub mod username;

pub use color::{BadgeStyle, HexColor};
pub use org_code::OrgCode;
pub use password::{credentials_match, HashedPassword, Password, PasswordChange};
pub use rating::Rating;
pub use record_id::RecordId;
pub use user_id::UserId;
pub use username::Username;
