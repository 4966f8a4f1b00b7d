//! Application layer wiring the domain rules to the injected collaborators.
//!
//! [`client::PaymentClient`] owns the signed-request primitive and the sandbox
//! key negotiation; [`coupon::CouponClient`] builds the coupon operations on
//! top of it.

pub mod client;
pub mod coupon;
