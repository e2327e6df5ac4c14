//! End-to-end tests for request handling and persistence.

mod requests;
