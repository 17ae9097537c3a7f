pub mod signup_request;
pub mod login_request;
pub mod update_user_request;

pub use signup_request::SignupRequest;
pub use login_request::LoginRequest;
pub use update_user_request::UpdateUserRequest;
