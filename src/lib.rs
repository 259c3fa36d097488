//! # Anagrafe
//!
//! `anagrafe` is a minimal user-account registry service: register a user,
//! list users, change a password, delete a user, and verify login
//! credentials, backed by PostgreSQL and exposed over HTTP/JSON.
//!
//! ## Credentials
//!
//! Passwords are hashed with bcrypt (embedded random salt, tunable cost)
//! before they reach the database; the plaintext never leaves the request
//! handler. bcrypt only consumes the first 72 bytes of input, so both
//! hashing and verification apply the same 72-byte truncation.
//!
//! ## Accounts
//!
//! The email address is the natural key. Exactly one account exists per
//! email at any time, backed by a `UNIQUE` constraint on the column. Login
//! failures for an unknown email and for a wrong password are deliberately
//! indistinguishable so that the endpoint cannot be used to enumerate
//! registered addresses.

pub mod anagrafe;
pub mod cli;
