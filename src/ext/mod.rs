//! Extensions over third-party APIs

pub mod jni;
