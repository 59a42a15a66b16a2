//! Wire models exchanged with the pointage API.

pub mod admin;
pub mod member;
pub mod movement;

pub use admin::{AdminAccount, ChangePassword, LoginRequest, LoginResponse, MIN_PASSWORD_LEN, NewAdmin, Role};
pub(crate) use admin::REDACTED;
pub use member::{ImportSummary, Lien, Member, MemberStatus, NewMember};
pub use movement::{CheckInRequest, CheckInResponse, Movement, MovementType, Present, format_timestamp};
