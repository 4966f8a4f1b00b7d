//! Client SDK for WeChat Pay's merchant HTTP API.
//!
//! Covers the cash-coupon endpoints and the sandbox signing-key negotiation
//! flow. The entry points are [`PaymentClient`] (the signed-request primitive)
//! and [`CouponClient`] (the coupon operations built on top of it).

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use application::client::PaymentClient;
pub use application::coupon::CouponClient;
pub use domain::envelope::Envelope;
pub use domain::merchant::Merchant;
pub use error::{PaymentError, Result};
