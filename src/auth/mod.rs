//! Authentication module for the Soundslice API.
//!
//! Every API call uses HTTP basic auth built from an application id and
//! password. This module provides credential storage with the password kept
//! in a [`secrecy::SecretString`], plus providers for static and
//! environment-sourced credentials.

mod credentials;

pub use credentials::{
    APP_ID_VAR, Credentials, CredentialsProvider, EnvCredentials, PASSWORD_VAR, StaticCredentials,
};
