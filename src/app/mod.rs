mod core;
mod session;

#[cfg(test)]
mod tests;

pub use core::Storefront;
pub use session::run_session;
