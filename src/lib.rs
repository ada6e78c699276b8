//! CCPay Gateway - PayCard hosted-checkout integration
//!
//! This crate integrates the PayCard/CCPay payment processor into an
//! e-commerce checkout flow: it initiates hosted payment sessions and
//! reconciles the processor's asynchronous payment callbacks against orders.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
