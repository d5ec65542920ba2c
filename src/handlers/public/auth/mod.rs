// handlers/public/auth/mod.rs - Sign-in and sign-out actions
//
// GET /auth/signin is an ordinary page in the route table; these are the
// form targets that talk to the session provider.

pub mod signin; // POST /auth/signin - verify credentials, set session cookie
pub mod signout; // POST /auth/signout - revoke session, clear cookie

pub use signin::sign_in_post;
pub use signout::sign_out_post;
