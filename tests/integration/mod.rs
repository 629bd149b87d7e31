//! Integration tests for the quote relay
//!
//! Each test drives the full relay through the router with real HTTP calls
//! to wiremock servers standing in for the document store and provider.

mod anthropic_relay;
